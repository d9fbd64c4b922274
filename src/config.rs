use crate::patterns::{IssuePattern, LinkPattern, PullRequestPattern};
use regex::Regex;
use url::Url;

/// Declarative settings describing where the annotator runs and which links
/// it knows how to title.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-1",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// A human-friendly name.
    pub name: String,
    /// The version of these settings.
    pub version: String,
    /// Glob-style page URL patterns (`*` matches anything) the annotator
    /// should activate on.
    pub matches: Vec<String>,
    /// Hosts we are allowed to send cross-origin requests to.
    pub permitted_hosts: Vec<String>,
    /// Selectors for the containers whose mutations are observed.
    pub root_selectors: Vec<String>,
    /// Selectors for the anchors which are candidates for a new title.
    pub link_selectors: Vec<String>,
    /// The issue tracker's "browse" URL, an issue's ID is appended to it.
    pub issue_tracker: String,
    /// The host serving pull requests.
    pub code_host: String,
}

impl Config {
    /// Create a [`Config`] which annotates issue tracker links in a chat
    /// application and pull request links on the code host.
    pub fn new() -> Self {
        Config {
            name: String::from("Better links"),
            version: String::from(env!("CARGO_PKG_VERSION")),
            matches: vec![
                String::from("https://wgaming.slack.com/*"),
                String::from("https://github.com/*"),
            ],
            permitted_hosts: vec![
                String::from("jira.webedia.fr"),
                String::from("github.com"),
            ],
            root_selectors: vec![
                String::from(".client_main_container"),
                String::from(".application-main"),
            ],
            link_selectors: vec![
                String::from(".c-message__body a"),
                String::from(".markdown-body a"),
            ],
            issue_tracker: String::from("https://jira.webedia.fr/browse/"),
            code_host: String::from("github.com"),
        }
    }

    /// Use a different issue tracker, automatically permitting requests to
    /// its host.
    pub fn with_issue_tracker<S: Into<String>>(
        self,
        browse_url: S,
    ) -> Result<Self, ConfigError> {
        let issue_tracker = browse_url.into();
        let host = host_of(&issue_tracker)?;

        Ok(Config {
            issue_tracker,
            ..self
        }
        .with_permitted_host(host))
    }

    /// Use a different code host, automatically permitting requests to it.
    pub fn with_code_host<S: Into<String>>(self, code_host: S) -> Self {
        let code_host = code_host.into();

        Config {
            code_host: code_host.clone(),
            ..self
        }
        .with_permitted_host(code_host)
    }

    /// Allow cross-origin requests to another host.
    pub fn with_permitted_host<S: Into<String>>(mut self, host: S) -> Self {
        let host = host.into();

        if !self.permitted_hosts.contains(&host) {
            self.permitted_hosts.push(host);
        }

        self
    }

    /// Also activate on pages matching this glob-style URL pattern.
    pub fn with_match<S: Into<String>>(mut self, pattern: S) -> Self {
        self.matches.push(pattern.into());
        self
    }

    /// Should the annotator run on this page?
    pub fn activates_on(&self, page: &Url) -> Result<bool, ConfigError> {
        for pattern in &self.matches {
            if glob_to_regex(pattern)?.is_match(page.as_str()) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Compile the [`LinkPattern`]s described by this [`Config`].
    pub fn patterns(&self) -> Result<Vec<LinkPattern>, ConfigError> {
        Ok(vec![
            LinkPattern::Issue(IssuePattern::new(&self.issue_tracker)?),
            LinkPattern::PullRequest(PullRequestPattern::new(&self.code_host)?),
        ])
    }
}

impl Default for Config {
    fn default() -> Self { Config::new() }
}

/// Reasons a [`Config`] may be unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A link pattern or one of the `matches` globs couldn't be compiled.
    #[error("Unable to compile the link pattern")]
    InvalidPattern(#[from] regex::Error),
    /// A URL in the configuration couldn't be parsed or has no host.
    #[error("\"{url}\" isn't a valid absolute URL")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },
}

fn host_of(url: &str) -> Result<String, ConfigError> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .ok_or_else(|| ConfigError::InvalidUrl {
            url: url.to_string(),
        })
}

fn glob_to_regex(pattern: &str) -> Result<Regex, ConfigError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{}$", body)).map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_activates_on_both_hosts() {
        let config = Config::default();
        let activates = |url: &str| {
            config.activates_on(&Url::parse(url).unwrap()).unwrap()
        };

        assert!(activates("https://github.com/acme/widgets/pull/42"));
        assert!(activates("https://wgaming.slack.com/messages/C0123"));
        assert!(!activates("https://gitlab.com/acme/widgets"));
        assert!(!activates("http://github.com/acme"));
    }

    #[test]
    fn globs_dont_treat_dots_as_wildcards() {
        let config = Config::default();
        let url = Url::parse("https://githubxcom.example/").unwrap();

        assert!(!config.activates_on(&url).unwrap());
    }

    #[test]
    fn changing_the_issue_tracker_permits_its_host() {
        let config = Config::default()
            .with_issue_tracker("https://issues.example.org/browse/")
            .unwrap();

        assert_eq!(config.issue_tracker, "https://issues.example.org/browse/");
        assert!(config
            .permitted_hosts
            .contains(&String::from("issues.example.org")));
    }

    #[test]
    fn issue_tracker_must_be_an_absolute_url() {
        let got = Config::default().with_issue_tracker("browse/").unwrap_err();

        assert!(matches!(got, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn hosts_are_only_permitted_once() {
        let config = Config::default().with_code_host("github.com");

        let github_entries = config
            .permitted_hosts
            .iter()
            .filter(|h| *h == "github.com")
            .count();
        assert_eq!(github_entries, 1);
    }

    #[test]
    fn default_patterns_compile() {
        let patterns = Config::default().patterns().unwrap();

        assert_eq!(patterns.len(), 2);
    }

    #[test]
    #[cfg(feature = "serde-1")]
    fn partial_configs_are_filled_with_defaults() {
        let src = r#"{ "code_host": "git.example.com" }"#;

        let got: Config = serde_json::from_str(src).unwrap();

        assert_eq!(got.code_host, "git.example.com");
        assert_eq!(got.link_selectors, Config::default().link_selectors);
    }
}
