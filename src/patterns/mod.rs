//! The kinds of links we know how to find a title for.

mod issue;
mod pull_request;

pub use issue::IssuePattern;
pub use pull_request::PullRequestPattern;

use scraper::{Html, Selector};

/// A URL pattern, paired with the knowledge of where a matching page keeps
/// its title.
#[derive(Debug, Clone)]
pub enum LinkPattern {
    /// A ticket on the issue tracker.
    Issue(IssuePattern),
    /// A pull request on the code host.
    PullRequest(PullRequestPattern),
}

impl LinkPattern {
    /// Check whether `link_text` matches this pattern, returning a
    /// [`TitleExtractor`] primed with the captured parameters if it does.
    pub fn matches(&self, link_text: &str) -> Option<TitleExtractor> {
        match self {
            LinkPattern::Issue(pattern) => pattern.matches(link_text),
            LinkPattern::PullRequest(pattern) => pattern.matches(link_text),
        }
    }
}

/// Knows how to turn a fetched page into a link's new content.
///
/// Captured parameters are stored HTML-escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleExtractor {
    /// Read the summary of an issue.
    Issue {
        /// The issue's ID (e.g. `PROJ-123`).
        id: String,
    },
    /// Read the title of a pull request.
    PullRequest {
        /// The repository's name.
        project: String,
        /// The pull request number.
        number: String,
    },
}

impl TitleExtractor {
    /// Parse the HTML `body` of a fetched page and generate the link's new
    /// content, returning `None` when the page doesn't contain the expected
    /// element.
    pub fn extract(&self, body: &str) -> Option<String> {
        let doc = Html::parse_document(body);

        match self {
            TitleExtractor::Issue { id } => issue::extract(&doc, id),
            TitleExtractor::PullRequest { project, number } => {
                pull_request::extract(&doc, project, number)
            },
        }
    }
}

/// The concatenated text of the first element matching `selector`.
fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector).next().map(|element| element.text().collect())
}
