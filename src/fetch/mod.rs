//! Retrieving the pages links point at.

mod web;

pub use web::HttpFetcher;

use futures::future::BoxFuture;
use url::Url;

/// Something which can retrieve the body of a web page, regardless of the
/// page's origin.
pub trait Fetcher {
    /// Send a GET request to `url`, resolving to the raw response body.
    ///
    /// The returned future mustn't borrow from `self` because it may be
    /// stored and shared long after this call returns.
    ///
    /// This is called while the [`crate::TitleCache`] is locked, so it must
    /// not call back into the [`crate::Annotator`] or its cache. Doing so
    /// will deadlock. Any real work belongs in the returned future.
    fn get(&self, url: &Url) -> BoxFuture<'static, Result<String, FetchError>>;
}

impl<F> Fetcher for F
where
    F: Fn(&Url) -> BoxFuture<'static, Result<String, FetchError>>,
{
    fn get(&self, url: &Url) -> BoxFuture<'static, Result<String, FetchError>> {
        self(url)
    }
}

/// Why a page couldn't be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The link text wasn't a valid URL.
    #[error("\"{url}\" isn't a valid URL")]
    InvalidUrl {
        /// The text we tried to parse.
        url: String,
        /// The underlying error.
        #[source]
        source: url::ParseError,
    },
    /// We aren't allowed to send cross-origin requests to this host.
    #[error("Cross-origin requests to \"{host}\" aren't permitted")]
    HostNotPermitted {
        /// The URL's host.
        host: String,
    },
    /// The request itself failed, or the server returned an error status.
    #[error("The request failed")]
    Web(#[from] reqwest::Error),
}
