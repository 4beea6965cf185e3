//! Recursive crawl task
//!
//! One [`CrawlTask`] handles one address. It decides whether the address may
//! be processed, fetches it, merges its words into the shared tally, then
//! spawns a child task per outgoing link and waits for all of them.

use crate::clock::Clock;
use crate::config::PatternSet;
use crate::parser::{PageContent, PageParser};
use crate::state::SharedCrawlState;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Collaborators shared by every task the engine runs
pub(crate) struct TaskContext {
    pub(crate) parser: Arc<dyn PageParser>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ignored_urls: PatternSet,
}

/// Unit of work for a single address at a given remaining depth
pub(crate) struct CrawlTask {
    address: String,
    remaining_depth: u32,
    state: Arc<SharedCrawlState>,
    context: Arc<TaskContext>,
}

impl CrawlTask {
    pub(crate) fn new(
        address: String,
        remaining_depth: u32,
        state: Arc<SharedCrawlState>,
        context: Arc<TaskContext>,
    ) -> Self {
        Self {
            address,
            remaining_depth,
            state,
            context,
        }
    }

    /// Runs this task and, transitively, all of its children
    ///
    /// The returned future completes only after every descendant task has
    /// completed. It must be polled inside a tokio runtime, since children
    /// are spawned onto the current runtime.
    pub(crate) fn run(self) -> BoxFuture<'static, ()> {
        async move {
            let Some(page) = self.visit().await else {
                return;
            };

            self.fan_out(page.links).await;
        }
        .boxed()
    }

    /// Processes this task's own address
    ///
    /// Returns the parsed page if this task claimed and fetched it, or
    /// `None` if it stopped early or the fetch failed.
    async fn visit(&self) -> Option<PageContent> {
        if self.remaining_depth == 0 {
            return None;
        }

        if self.state.is_expired(self.context.clock.now()) {
            tracing::trace!("Deadline reached, not starting {}", self.address);
            return None;
        }

        if self.context.ignored_urls.matches(&self.address) {
            tracing::debug!("Ignoring {}", self.address);
            return None;
        }

        if !self.state.try_visit(&self.address) {
            tracing::trace!("Already visited {}", self.address);
            return None;
        }

        tracing::debug!(
            "Processing URL: {} (remaining depth {})",
            self.address,
            self.remaining_depth
        );

        // Once claimed, the page is processed even if the deadline passes meanwhile
        match self.context.parser.parse(&self.address).await {
            Ok(page) => {
                self.state.merge_counts(&page.word_counts);
                Some(page)
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", self.address, e);
                None
            }
        }
    }

    /// Spawns one child per link and waits for every child to finish
    async fn fan_out(&self, links: Vec<String>) {
        if links.is_empty() {
            return;
        }

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(self.child(link).run());
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Child task of {} failed: {}", self.address, e);
            }
        }
    }

    fn child(&self, address: String) -> CrawlTask {
        CrawlTask::new(
            address,
            self.remaining_depth - 1,
            Arc::clone(&self.state),
            Arc::clone(&self.context),
        )
    }
}
