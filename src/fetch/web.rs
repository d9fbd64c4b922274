use crate::{
    fetch::{FetchError, Fetcher},
    Config,
};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, Url};

/// A [`Fetcher`] which talks to the outside world using [`reqwest`], only
/// sending requests to an explicit list of hosts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    permitted_hosts: Vec<String>,
}

impl HttpFetcher {
    /// The User-Agent used by [`HttpFetcher::from_config()`].
    pub const USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

    /// Create a [`HttpFetcher`] with an already initialized [`Client`].
    pub fn with_client<I, S>(client: Client, permitted_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HttpFetcher {
            client,
            permitted_hosts: permitted_hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a [`HttpFetcher`] which may contact any of the
    /// [`Config::permitted_hosts`].
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(HttpFetcher::USER_AGENT).build()?;

        Ok(HttpFetcher::with_client(
            client,
            config.permitted_hosts.iter().cloned(),
        ))
    }

    /// The hosts this [`HttpFetcher`] may send requests to.
    pub fn permitted_hosts(&self) -> &[String] { &self.permitted_hosts }

    fn is_permitted(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => self.permitted_hosts.iter().any(|h| h == host),
            None => false,
        }
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &Url) -> BoxFuture<'static, Result<String, FetchError>> {
        if !self.is_permitted(url) {
            let host = url.host_str().unwrap_or_default().to_string();
            log::warn!("Refusing to send a cross-origin request to \"{}\"", url);
            return futures::future::err(FetchError::HostNotPermitted { host })
                .boxed();
        }

        let client = self.client.clone();
        let url = url.clone();

        async move {
            log::debug!("Fetching \"{}\"", url);

            let body = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            Ok(body)
        }
        .boxed()
    }
}
