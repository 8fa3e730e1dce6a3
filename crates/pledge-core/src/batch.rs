//! Batch extraction over an ordered list of page URLs.
//!
//! Every URL is fetched, parsed and assembled into a [`Project`]. Results
//! keep the index of their URL, whatever the concurrency.

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::campaign::CampaignParser;
use crate::error::{PledgeError, RetrievalError};
use crate::html::Document;
use crate::models::campaign::Project;

/// Retrieves the raw markup of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its body.
    async fn fetch(&self, url: &Url) -> Result<String, RetrievalError>;
}

/// What to do when one page of a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Stop at the first failing page.
    #[default]
    FailFast,
    /// Record the failure and carry on with the remaining pages.
    BestEffort,
}

/// Outcome of one page.
#[derive(Debug)]
pub struct PageOutcome {
    /// Position of the URL in the input.
    pub index: usize,
    pub url: Url,
    pub result: crate::Result<Project>,
}

impl PageOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-page outcomes of a batch, in input order.
///
/// Under [`BatchPolicy::FailFast`] the report ends with the failing page;
/// pages after it are not processed.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<PageOutcome>,
}

impl BatchReport {
    /// Number of pages that produced a project.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of pages that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Outcomes that failed, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &PageOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// The projects in input order, or the first error.
    pub fn into_projects(self) -> crate::Result<Vec<Project>> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}

/// Drives fetching and extraction for a list of URLs.
pub struct BatchRunner<F, P> {
    fetcher: F,
    parser: P,
    policy: BatchPolicy,
    concurrency: usize,
}

impl<F: PageFetcher, P: CampaignParser> BatchRunner<F, P> {
    /// Create a sequential, fail-fast runner.
    pub fn new(fetcher: F, parser: P) -> Self {
        Self {
            fetcher,
            parser,
            policy: BatchPolicy::default(),
            concurrency: 1,
        }
    }

    /// Set the failure policy.
    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set how many pages may be fetched at once. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Process every URL in order.
    pub async fn run(&self, urls: &[Url]) -> BatchReport {
        self.run_with_progress(urls, |_| {}).await
    }

    /// Process every URL in order, calling `on_page` as each outcome
    /// becomes available.
    pub async fn run_with_progress<C>(&self, urls: &[Url], mut on_page: C) -> BatchReport
    where
        C: FnMut(&PageOutcome),
    {
        info!(
            "Processing {} pages (concurrency {}, {:?})",
            urls.len(),
            self.concurrency,
            self.policy
        );

        let mut pages = stream::iter(urls.iter().enumerate())
            .map(|(index, url)| self.process_page(index, url))
            .buffered(self.concurrency);

        let mut report = BatchReport::default();
        while let Some(outcome) = pages.next().await {
            on_page(&outcome);

            let failed = !outcome.is_success();
            if let Err(e) = &outcome.result {
                warn!("Page {} ({}) failed: {}", outcome.index, outcome.url, e);
            }
            report.outcomes.push(outcome);

            if failed && self.policy == BatchPolicy::FailFast {
                info!("Stopping batch at first failure");
                break;
            }
        }

        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    async fn process_page(&self, index: usize, url: &Url) -> PageOutcome {
        let result = self.fetch_and_parse(url).await;
        PageOutcome {
            index,
            url: url.clone(),
            result,
        }
    }

    async fn fetch_and_parse(&self, url: &Url) -> crate::Result<Project> {
        debug!("Fetching {}", url);
        let markup = self.fetcher.fetch(url).await?;
        let document = Document::parse(&markup)?;
        let result = self.parser.parse(&document).map_err(PledgeError::from)?;
        debug!("Parsed {} in {} ms", url, result.processing_time_ms);
        Ok(result.project)
    }
}

/// Read page URLs from text: one per line, blank lines and `#` comments
/// ignored.
pub fn parse_url_list(text: &str) -> crate::Result<Vec<Url>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            Url::parse(line).map_err(|source| PledgeError::InvalidUrl {
                input: line.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let urls = parse_url_list(
            "# campaigns\nhttps://example.com/a\n\n  https://example.com/b  \n# done\n",
        )
        .unwrap();

        assert_eq!(
            urls.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_parse_url_list_rejects_garbage() {
        assert!(matches!(
            parse_url_list("https://example.com/a\nnot a url"),
            Err(PledgeError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_report_counts() {
        let url = Url::parse("https://example.com/").unwrap();
        let report = BatchReport {
            outcomes: vec![PageOutcome {
                index: 0,
                url: url.clone(),
                result: Err(RetrievalError::Timeout { url: url.to_string() }.into()),
            }],
        };

        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().count(), 1);
        assert!(report.into_projects().is_err());
    }
}
