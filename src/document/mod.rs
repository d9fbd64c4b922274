//! The document whose links are being annotated.

mod page;

pub use page::{LinkId, Page};

use std::fmt::Debug;

/// A host document containing links, such as a chat client or a code host's
/// web page.
///
/// Implementations are expected to remember which links have been
/// processed so they aren't handed out by [`Document::unprocessed_links()`]
/// again.
pub trait Document {
    /// A handle to a link element inside the document.
    type Link: Clone + Debug + Send + 'static;

    /// Every link matched by one of the CSS `selectors` which hasn't been
    /// marked as processed, in document order.
    fn unprocessed_links(&self, selectors: &[String]) -> Vec<Self::Link>;

    /// The link's text content.
    fn link_text(&self, link: &Self::Link) -> String;

    /// Make sure the link is never returned by
    /// [`Document::unprocessed_links()`] again.
    fn mark_processed(&mut self, link: &Self::Link);

    /// Replace the link's rendered content with some HTML.
    fn set_inner_html(&mut self, link: &Self::Link, html: &str);

    /// Does the document contain an element matching any of the CSS
    /// `selectors`?
    fn contains_any(&self, selectors: &[String]) -> bool;
}

/// A change to a [`Document`], such as another script appending some
/// elements.
///
/// The annotator owns the document while observing it, so changes are sent
/// to it and applied before each scan.
pub trait Mutation<D> {
    /// Apply the change.
    fn apply_to(self, document: &mut D);
}

impl<D, F> Mutation<D> for F
where
    F: FnOnce(&mut D),
{
    fn apply_to(self, document: &mut D) { self(document) }
}
