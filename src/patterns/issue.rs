use crate::{
    escape::html_escape,
    icons::{self, ISSUE_TRACKER_PNG},
    patterns::{first_text, TitleExtractor},
};
use regex::Regex;
use scraper::{Html, Selector};

lazy_static::lazy_static! {
    static ref SUMMARY: Selector = Selector::parse("#summary-val")
        .expect("The summary selector is valid");
}

/// Matches links to an issue on the issue tracker, e.g.
/// `https://jira.example.com/browse/PROJ-123`.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    regex: Regex,
}

impl IssuePattern {
    /// Create an [`IssuePattern`] for the tracker whose issues live under
    /// `browse_url`.
    pub fn new(browse_url: &str) -> Result<Self, regex::Error> {
        let regex =
            Regex::new(&format!("^{}([^?]*)", regex::escape(browse_url)))?;

        Ok(IssuePattern { regex })
    }

    pub(crate) fn matches(&self, link_text: &str) -> Option<TitleExtractor> {
        let captures = self.regex.captures(link_text)?;
        let id = captures.get(1).map_or("", |m| m.as_str());

        Some(TitleExtractor::Issue {
            id: html_escape(id).into_owned(),
        })
    }
}

pub(crate) fn extract(doc: &Html, id: &str) -> Option<String> {
    let summary = first_text(doc, &SUMMARY)?;

    Some(format!(
        "{} {} {}",
        icons::icon_html(ISSUE_TRACKER_PNG),
        id,
        html_escape(&summary)
    ))
}
