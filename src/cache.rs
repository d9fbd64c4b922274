use crate::fetch::FetchError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::{
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// The eventual outcome of looking up a link's title.
///
/// `Ok(None)` means the page was retrieved but we couldn't find a title in
/// it.
pub type TitleOutcome = Result<Option<String>, Arc<FetchError>>;

/// A handle to a title lookup which may still be in flight, and can be
/// awaited by any number of links.
pub type SharedTitle = Shared<BoxFuture<'static, TitleOutcome>>;

/// A cache to avoid fetching the same page more than once.
///
/// Entries are keyed by the raw link text and live as long as the cache
/// does. Failed lookups are cached too.
#[derive(Default)]
pub struct TitleCache {
    entries: Mutex<HashMap<String, SharedTitle>>,
}

impl TitleCache {
    /// Create a new, empty [`TitleCache`].
    pub fn new() -> Self { TitleCache::default() }

    /// Get the lookup for `url`, using `start_lookup` to begin a new one if
    /// this is the first time we've seen it.
    ///
    /// The check and the insert happen under a single lock, so concurrent
    /// callers asking for the same `url` will share one lookup. The flip
    /// side is that `start_lookup` runs with the lock held and mustn't touch
    /// this cache.
    pub fn get_or_insert_with<F>(&self, url: &str, start_lookup: F) -> SharedTitle
    where
        F: FnOnce() -> BoxFuture<'static, TitleOutcome>,
    {
        let mut entries = self.entries();

        if let Some(existing) = entries.get(url) {
            log::debug!("Cache hit for \"{}\"", url);
            return existing.clone();
        }

        let lookup = start_lookup().shared();
        entries.insert(url.to_string(), lookup.clone());

        lookup
    }

    /// Has a lookup for `url` been started?
    pub fn contains(&self, url: &str) -> bool { self.entries().contains_key(url) }

    /// The number of distinct links we've seen.
    pub fn len(&self) -> usize { self.entries().len() }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool { self.entries().is_empty() }

    /// Every completed lookup which produced a title.
    pub fn resolved_titles(&self) -> Vec<(String, String)> {
        self.entries()
            .iter()
            .filter_map(|(url, lookup)| match lookup.peek() {
                Some(Ok(Some(title))) => Some((url.clone(), title.clone())),
                _ => None,
            })
            .collect()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, SharedTitle>> {
        // a panic can't leave the map half-updated
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for TitleCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        f.debug_struct("TitleCache")
            .field("urls", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn lookups_are_only_started_once() {
        let cache = TitleCache::new();
        let calls = AtomicUsize::new(0);
        let start = || {
            calls.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(Ok(Some(String::from("Title")))).boxed()
        };

        let first = cache.get_or_insert_with("https://github.com/a/b/pull/1", start);
        let second = cache.get_or_insert_with("https://github.com/a/b/pull/1", start);

        assert_eq!(first.await.unwrap(), Some(String::from("Title")));
        assert_eq!(second.await.unwrap(), Some(String::from("Title")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn keys_are_raw_link_text() {
        let cache = TitleCache::new();

        let _ = cache.get_or_insert_with("https://github.com/a/b/pull/1", || {
            futures::future::ready(Ok(None)).boxed()
        });
        let _ = cache.get_or_insert_with("https://github.com/a/b/pull/1/", || {
            futures::future::ready(Ok(None)).boxed()
        });

        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn only_successful_lookups_are_resolved_titles() {
        let cache = TitleCache::new();
        let found = cache.get_or_insert_with("found", || {
            futures::future::ready(Ok(Some(String::from("Title")))).boxed()
        });
        let missing = cache.get_or_insert_with("missing", || {
            futures::future::ready(Ok(None)).boxed()
        });
        let pending = cache.get_or_insert_with("pending", || {
            futures::future::pending().boxed()
        });

        let _ = found.await;
        let _ = missing.await;
        drop(pending);

        assert_eq!(
            cache.resolved_titles(),
            vec![(String::from("found"), String::from("Title"))]
        );
    }

    #[tokio::test]
    async fn the_lock_is_released_before_the_lookup_runs() {
        let cache = Arc::new(TitleCache::new());
        let inner = Arc::clone(&cache);

        let lookup = cache.get_or_insert_with("found", move || {
            async move {
                let seen = inner.len().to_string();
                Ok::<_, Arc<FetchError>>(Some(seen))
            }
            .boxed()
        });

        assert_eq!(lookup.await.unwrap(), Some(String::from("1")));
    }
}
