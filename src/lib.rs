//! A library for replacing the text of issue tracker and pull request links
//! with the title of the page they point to.
//!
//! # Examples
//!
//! ```rust,no_run
//! use linktitle::{Annotator, Config, HttpFetcher, Page};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let fetcher = HttpFetcher::from_config(&config)?;
//! let annotator = Annotator::new(config, fetcher)?;
//!
//! let mut page = Page::parse(
//!     r#"<div class="markdown-body">
//!       <a href="https://github.com/rust-lang/rust/pull/1">https://github.com/rust-lang/rust/pull/1</a>
//!     </div>"#,
//! );
//! let report = annotator.annotate(&mut page).await;
//! println!("Annotated {} links", report.annotated);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod annotator;
mod cache;
mod config;
pub mod document;
mod escape;
pub mod fetch;
pub mod icons;
pub mod patterns;

pub use annotator::{
    Annotator, Applied, Observer, PendingResolution, Report, Resolution,
};
pub use cache::{SharedTitle, TitleCache, TitleOutcome};
pub use config::{Config, ConfigError};
pub use document::{Document, Mutation, Page};
pub use escape::html_escape;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
