use crate::document::Document;
use scraper::{Html, Selector};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

lazy_static::lazy_static! {
    static ref ANCHOR: Selector =
        Selector::parse("a").expect("The anchor selector is valid");
}

/// Identifies a single link within a [`Page`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId {
    fragment: usize,
    index: usize,
}

/// An in-memory [`Document`] assembled from snippets of HTML.
///
/// The HTML itself is never modified. Processed links and replaced content
/// are tracked alongside it, so [`Page::display_html()`] tells you what a
/// browser would currently render inside each link.
///
/// Each snippet is parsed once, when it is inserted, and the links a set of
/// selectors picks out of it are remembered.
#[derive(Debug, Default)]
pub struct Page {
    fragments: Vec<Fragment>,
    processed: HashSet<LinkId>,
    replaced: HashMap<LinkId, Anchor>,
}

#[derive(Debug)]
struct Fragment {
    doc: Html,
    anchors: Vec<Anchor>,
    /// Anchor positions matched by each selector we've been asked about.
    matches: RefCell<HashMap<String, Vec<usize>>>,
}

#[derive(Debug, Clone, PartialEq)]
struct Anchor {
    text: String,
    inner_html: String,
}

impl Fragment {
    fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let anchors = doc
            .select(&ANCHOR)
            .map(|a| Anchor {
                text: a.text().collect(),
                inner_html: a.inner_html(),
            })
            .collect();

        Fragment {
            doc,
            anchors,
            matches: RefCell::new(HashMap::new()),
        }
    }

    /// The position of every anchor matched by the selector, in document
    /// order.
    fn matching(&self, key: &str, selector: &Selector) -> Vec<usize> {
        if let Some(known) = self.matches.borrow().get(key) {
            return known.clone();
        }

        // anchors are identified by their position in the fragment
        let positions: HashMap<_, usize> = self
            .doc
            .select(&ANCHOR)
            .enumerate()
            .map(|(index, a)| (a.id(), index))
            .collect();
        let found: Vec<usize> = self
            .doc
            .select(selector)
            .filter_map(|element| positions.get(&element.id()).copied())
            .collect();

        self.matches
            .borrow_mut()
            .insert(key.to_string(), found.clone());

        found
    }
}

impl Page {
    /// Create an empty [`Page`].
    pub fn new() -> Self { Page::default() }

    /// Create a [`Page`] from a complete HTML document.
    pub fn parse(html: &str) -> Self {
        let mut page = Page::new();
        page.insert(html);
        page
    }

    /// Add a new subtree to the page, the equivalent of a script appending
    /// some elements to the DOM.
    ///
    /// Selectors are matched within a single subtree, so a link is only
    /// found by `.markdown-body a` when its container was inserted along
    /// with it.
    pub fn insert(&mut self, html: &str) -> Vec<LinkId> {
        let parsed = Fragment::parse(html);
        let fragment = self.fragments.len();
        let ids = (0..parsed.anchors.len())
            .map(|index| LinkId { fragment, index })
            .collect();

        self.fragments.push(parsed);

        ids
    }

    /// Every link on the page, in document order.
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.fragments
            .iter()
            .enumerate()
            .flat_map(|(fragment, f)| {
                (0..f.anchors.len()).map(move |index| LinkId { fragment, index })
            })
    }

    /// The HTML currently rendered inside a link.
    pub fn display_html(&self, link: LinkId) -> Option<&str> {
        self.anchor(link).map(|a| a.inner_html.as_str())
    }

    /// The text currently rendered inside a link.
    pub fn text(&self, link: LinkId) -> Option<&str> {
        self.anchor(link).map(|a| a.text.as_str())
    }

    /// Has this link been processed?
    pub fn is_processed(&self, link: LinkId) -> bool {
        self.processed.contains(&link)
    }

    fn anchor(&self, link: LinkId) -> Option<&Anchor> {
        self.replaced.get(&link).or_else(|| {
            self.fragments
                .get(link.fragment)
                .and_then(|f| f.anchors.get(link.index))
        })
    }
}

impl Document for Page {
    type Link = LinkId;

    fn unprocessed_links(&self, selectors: &[String]) -> Vec<LinkId> {
        let (key, selector) = match compile(selectors) {
            Some(compiled) => compiled,
            None => return Vec::new(),
        };

        self.fragments
            .iter()
            .enumerate()
            .flat_map(|(fragment, f)| {
                f.matching(&key, &selector)
                    .into_iter()
                    .map(move |index| LinkId { fragment, index })
            })
            .filter(|link| !self.processed.contains(link))
            .collect()
    }

    fn link_text(&self, link: &LinkId) -> String {
        self.text(*link).unwrap_or_default().to_string()
    }

    fn mark_processed(&mut self, link: &LinkId) {
        self.processed.insert(*link);
    }

    fn set_inner_html(&mut self, link: &LinkId, html: &str) {
        let fragment = Html::parse_fragment(html);
        let text = fragment.root_element().text().collect();

        self.replaced.insert(
            *link,
            Anchor {
                text,
                inner_html: html.to_string(),
            },
        );
    }

    fn contains_any(&self, selectors: &[String]) -> bool {
        let (_, selector) = match compile(selectors) {
            Some(compiled) => compiled,
            None => return false,
        };

        self.fragments
            .iter()
            .any(|f| f.doc.select(&selector).next().is_some())
    }
}

/// Join the selectors into a single selector list, returning it alongside
/// its source text.
fn compile(selectors: &[String]) -> Option<(String, Selector)> {
    if selectors.is_empty() {
        return None;
    }

    let joined = selectors.join(", ");
    let selector = match Selector::parse(&joined) {
        Ok(selector) => selector,
        Err(e) => {
            log::warn!("Ignoring the invalid selector \"{}\": {:?}", joined, e);
            return None;
        },
    };

    Some((joined, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHAT: &str = r#"
        <div class="client_main_container">
          <div class="c-message__body">
            See <a href="https://jira.webedia.fr/browse/WEB-1">https://jira.webedia.fr/browse/WEB-1</a>
          </div>
          <nav><a href="/settings">Settings</a></nav>
          <div class="c-message__body">
            <a href="https://example.com/"> https://example.com/ </a>
          </div>
        </div>
    "#;

    fn selectors() -> Vec<String> {
        vec![
            String::from(".c-message__body a"),
            String::from(".markdown-body a"),
        ]
    }

    #[test]
    fn only_links_inside_the_containers_are_selected() {
        let page = Page::parse(CHAT);

        let got: Vec<_> = page
            .unprocessed_links(&selectors())
            .iter()
            .map(|link| page.link_text(link))
            .collect();

        assert_eq!(
            got,
            vec![
                String::from("https://jira.webedia.fr/browse/WEB-1"),
                String::from(" https://example.com/ "),
            ]
        );
        assert_eq!(page.links().count(), 3);
    }

    #[test]
    fn processed_links_are_skipped() {
        let mut page = Page::parse(CHAT);
        let first = page.unprocessed_links(&selectors())[0];

        page.mark_processed(&first);

        let got = page.unprocessed_links(&selectors());
        assert_eq!(got.len(), 1);
        assert!(!got.contains(&first));
        assert!(page.is_processed(first));
    }

    #[test]
    fn inserted_subtrees_are_scanned() {
        let mut page = Page::parse(CHAT);
        for link in page.unprocessed_links(&selectors()) {
            page.mark_processed(&link);
        }

        let inserted = page.insert(
            r#"<div class="markdown-body"><p><a href="x">https://github.com/a/b/pull/1</a></p></div>"#,
        );

        assert_eq!(page.unprocessed_links(&selectors()), inserted);
    }

    #[test]
    fn replacing_a_links_content() {
        let mut page = Page::parse(CHAT);
        let link = page.unprocessed_links(&selectors())[0];

        page.set_inner_html(&link, "<b>WEB-1</b> Checkout &amp; payments");

        assert_eq!(
            page.display_html(link),
            Some("<b>WEB-1</b> Checkout &amp; payments")
        );
        assert_eq!(page.text(link), Some("WEB-1 Checkout & payments"));
    }

    #[test]
    fn look_for_root_containers() {
        let page = Page::parse(CHAT);

        assert!(page.contains_any(&[String::from(".client_main_container")]));
        assert!(!page.contains_any(&[String::from(".application-main")]));
        assert!(!page.contains_any(&[]));
    }

    #[test]
    fn invalid_selectors_match_nothing() {
        let page = Page::parse(CHAT);

        assert!(page.unprocessed_links(&[String::from("a[")]).is_empty());
    }

    #[test]
    fn remembered_matches_are_kept_per_selector() {
        let mut page = Page::parse(CHAT);
        let everything = vec![String::from("a")];

        let scoped = page.unprocessed_links(&selectors());
        page.mark_processed(&scoped[0]);

        assert_eq!(page.unprocessed_links(&everything).len(), 2);
        assert_eq!(page.unprocessed_links(&selectors()), vec![scoped[1]]);
        assert_eq!(page.fragments[0].matches.borrow().len(), 2);
    }
}
