use crate::{
    escape::html_escape,
    icons::{self, CODE_HOST_PNG},
    patterns::{first_text, TitleExtractor},
};
use regex::Regex;
use scraper::{Html, Selector};

lazy_static::lazy_static! {
    static ref TITLE: Selector = Selector::parse("h1.gh-header-title span")
        .expect("The title selector is valid");
}

/// Matches links to a pull request, e.g.
/// `https://github.com/owner/project/pull/42`.
#[derive(Debug, Clone)]
pub struct PullRequestPattern {
    regex: Regex,
}

impl PullRequestPattern {
    /// Create a [`PullRequestPattern`] for pull requests hosted on `host`.
    pub fn new(host: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"^https://{}/.*?/(.*?)/pull/([0-9]+)",
            regex::escape(host)
        ))?;

        Ok(PullRequestPattern { regex })
    }

    pub(crate) fn matches(&self, link_text: &str) -> Option<TitleExtractor> {
        let captures = self.regex.captures(link_text)?;
        let group = |i| captures.get(i).map_or("", |m| m.as_str());

        Some(TitleExtractor::PullRequest {
            project: html_escape(group(1)).into_owned(),
            number: html_escape(group(2)).into_owned(),
        })
    }
}

pub(crate) fn extract(doc: &Html, project: &str, number: &str) -> Option<String> {
    let title = first_text(doc, &TITLE)?;

    Some(format!(
        "{} PR {} ({}#{})",
        icons::icon_html(CODE_HOST_PNG),
        html_escape(title.trim()),
        project,
        number
    ))
}
