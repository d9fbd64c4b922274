use crate::{
    cache::{SharedTitle, TitleCache, TitleOutcome},
    document::{Document, Mutation},
    fetch::{FetchError, Fetcher},
    patterns::{LinkPattern, TitleExtractor},
    Config, ConfigError,
};
use futures::{
    channel::oneshot,
    future::{BoxFuture, FutureExt},
    stream::{FuturesUnordered, Stream, StreamExt},
};
use std::{future::Future, sync::Arc};
use url::Url;

/// Replaces the content of issue tracker and pull request links with the
/// title of the page they point to.
///
/// Titles are cached for the lifetime of the [`Annotator`], so each distinct
/// link is only ever fetched once.
#[derive(Debug)]
pub struct Annotator<F> {
    config: Config,
    patterns: Vec<LinkPattern>,
    cache: TitleCache,
    fetcher: F,
}

/// A link whose title lookup has completed.
#[derive(Debug)]
pub struct Resolution<L> {
    /// The link being annotated.
    pub link: L,
    /// The link's trimmed text.
    pub url: String,
    /// What the lookup found.
    pub outcome: TitleOutcome,
}

/// A title lookup bound to the link it was started for.
pub type PendingResolution<L> = BoxFuture<'static, Resolution<L>>;

/// What happened when a [`Resolution`] was applied to a link.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The link's content was replaced by its title.
    Annotated,
    /// The page didn't contain a title, the link was left alone.
    Missed,
    /// The page couldn't be retrieved, the link was left alone.
    Failed,
}

/// A summary of an [`Annotator::annotate()`] pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Report {
    /// Links which now show their title.
    pub annotated: usize,
    /// Links whose page had no recognisable title.
    pub missed: usize,
    /// Links whose page couldn't be retrieved.
    pub failed: usize,
}

impl Report {
    fn record(&mut self, applied: Applied) {
        match applied {
            Applied::Annotated => self.annotated += 1,
            Applied::Missed => self.missed += 1,
            Applied::Failed => self.failed += 1,
        }
    }
}

impl<F: Fetcher> Annotator<F> {
    /// Create a new [`Annotator`].
    pub fn new(config: Config, fetcher: F) -> Result<Self, ConfigError> {
        let patterns = config.patterns()?;

        Ok(Annotator {
            config,
            patterns,
            cache: TitleCache::new(),
            fetcher,
        })
    }

    /// The [`Config`] this [`Annotator`] was created with.
    pub fn config(&self) -> &Config { &self.config }

    /// Every title lookup started so far.
    pub fn cache(&self) -> &TitleCache { &self.cache }

    /// Look through the document for links we haven't seen yet and start
    /// looking up their titles.
    ///
    /// Every link inspected is marked as processed up front, whether or not
    /// it matches a [`LinkPattern`] and regardless of how its lookup turns
    /// out, so a link is never looked at twice.
    pub fn scan<D: Document>(
        &self,
        doc: &mut D,
    ) -> Vec<PendingResolution<D::Link>> {
        let mut pending = Vec::new();

        for link in doc.unprocessed_links(&self.config.link_selectors) {
            let text = doc.link_text(&link);
            let url = text.trim();
            doc.mark_processed(&link);

            for pattern in &self.patterns {
                if let Some(extractor) = pattern.matches(url) {
                    let lookup = self.resolve_title(url, extractor);
                    let link = link.clone();
                    let url = url.to_string();

                    pending.push(
                        async move {
                            let outcome = lookup.await;
                            Resolution { link, url, outcome }
                        }
                        .boxed(),
                    );
                }
            }
        }

        pending
    }

    /// Get the title for a link, fetching its page if nobody has asked for
    /// it before.
    pub fn resolve_title(
        &self,
        url: &str,
        extractor: TitleExtractor,
    ) -> SharedTitle {
        self.cache.get_or_insert_with(url, || {
            log::debug!("Looking up the title for \"{}\"", url);

            let body = match Url::parse(url) {
                Ok(parsed) => self.fetcher.get(&parsed),
                Err(source) => futures::future::err(FetchError::InvalidUrl {
                    url: url.to_string(),
                    source,
                })
                .boxed(),
            };

            body.map(move |result| {
                result
                    .map(|body| extractor.extract(&body))
                    .map_err(Arc::new)
            })
            .boxed()
        })
    }

    /// Update a link now that its lookup has finished.
    pub fn apply<D: Document>(
        &self,
        doc: &mut D,
        resolution: Resolution<D::Link>,
    ) -> Applied {
        let Resolution { link, url, outcome } = resolution;

        match outcome {
            Ok(Some(title)) if !title.is_empty() => {
                log::debug!("Replacing \"{}\" with its title", url);
                doc.set_inner_html(&link, &title);
                Applied::Annotated
            },
            Ok(_) => {
                log::debug!("Unable to find a title for \"{}\"", url);
                Applied::Missed
            },
            Err(e) => {
                log::warn!("Unable to fetch \"{}\": {}", url, e);
                Applied::Failed
            },
        }
    }

    /// Scan the document once and wait for every lookup to finish before
    /// updating the links.
    pub async fn annotate<D: Document>(&self, doc: &mut D) -> Report {
        let resolutions = futures::future::join_all(self.scan(doc)).await;
        let mut report = Report::default();

        for resolution in resolutions {
            report.record(self.apply(doc, resolution));
        }

        report
    }

    /// Keep annotating a document as it changes.
    ///
    /// The returned future does an initial scan, then applies each batch of
    /// `mutations` and scans again. Links are updated as soon as their
    /// lookups finish. It resolves to the document once the mutation stream
    /// ends and all outstanding lookups are done, or straight away after
    /// [`Observer::disconnect()`].
    ///
    /// Nothing is observed when the document has none of the
    /// [`Config::root_selectors`].
    pub fn observe<'a, D, M>(
        &'a self,
        doc: D,
        mutations: M,
    ) -> (Observer, impl Future<Output = D> + 'a)
    where
        F: 'a,
        D: Document + 'a,
        M: Stream + Unpin + 'a,
        M::Item: Mutation<D>,
    {
        let (stop, stopped) = oneshot::channel();

        (Observer { stop }, self.run(doc, mutations, stopped))
    }

    async fn run<D, M>(
        &self,
        mut doc: D,
        mutations: M,
        stopped: oneshot::Receiver<()>,
    ) -> D
    where
        D: Document,
        M: Stream + Unpin,
        M::Item: Mutation<D>,
    {
        if !doc.contains_any(&self.config.root_selectors) {
            log::warn!(
                "None of the root containers ({}) were found, not observing",
                self.config.root_selectors.join(", ")
            );
            return doc;
        }

        let mut pending: FuturesUnordered<_> =
            self.scan(&mut doc).into_iter().collect();
        let mut stopped = stopped.fuse();
        let mut mutations = mutations.fuse();

        loop {
            futures::select! {
                signal = stopped => {
                    // a dropped Observer detaches instead of stopping
                    if signal.is_ok() {
                        log::debug!("Disconnected with {} lookups in flight", pending.len());
                        return doc;
                    }
                },
                mutation = mutations.next() => match mutation {
                    Some(mutation) => {
                        mutation.apply_to(&mut doc);
                        pending.extend(self.scan(&mut doc));
                    },
                    None => break,
                },
                resolution = pending.select_next_some() => {
                    self.apply(&mut doc, resolution);
                },
            }
        }

        while let Some(resolution) = pending.next().await {
            self.apply(&mut doc, resolution);
        }

        doc
    }
}

/// A handle to a running [`Annotator::observe()`] loop.
#[derive(Debug)]
pub struct Observer {
    stop: oneshot::Sender<()>,
}

impl Observer {
    /// Stop observing, abandoning any lookups which haven't finished yet.
    ///
    /// The lookups stay in the [`Annotator`]'s cache.
    pub fn disconnect(self) {
        // the loop may have already finished
        let _ = self.stop.send(());
    }
}
