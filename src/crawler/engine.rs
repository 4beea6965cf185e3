//! Crawl engine - orchestrates one crawl over a bounded worker pool
//!
//! The engine owns a dedicated multi-threaded tokio runtime sized to
//! `min(target_parallelism, host_parallelism)`. Each crawl:
//! 1. Fixes the deadline from the injected clock
//! 2. Creates fresh shared state
//! 3. Spawns one root task per seed on the pool and waits for every task
//! 4. Ranks the merged word counts
//!
//! [`CrawlerEngine::crawl`] blocks the calling thread; async callers use
//! [`CrawlerEngine::crawl_async`] instead.

use crate::clock::Clock;
use crate::config::{validate_parallelism, validate_timeout, CrawlSettings};
use crate::crawler::ranker::rank;
use crate::crawler::task::{CrawlTask, TaskContext};
use crate::output::CrawlResult;
use crate::parser::PageParser;
use crate::state::SharedCrawlState;
use crate::CrawlError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinSet;

/// Main crawler engine structure
pub struct CrawlerEngine {
    timeout: chrono::Duration,
    popular_word_count: usize,
    max_depth: u32,
    pool_size: usize,
    context: Arc<TaskContext>,
    handle: Handle,
    // Only taken in `Drop`
    runtime: Option<Runtime>,
}

impl CrawlerEngine {
    /// Creates an engine whose pool is capped by the host's core count
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated crawl settings
    /// * `parser` - Fetch/parse collaborator shared by all tasks
    /// * `clock` - Time source for the crawl deadline
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlerEngine)` - Engine ready to crawl
    /// * `Err(CrawlError)` - Invalid settings or the worker pool could not start
    pub fn new(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> crate::Result<Self> {
        Self::with_host_parallelism(settings, parser, clock, num_cpus::get())
    }

    /// Creates an engine with an explicit host parallelism
    ///
    /// The worker pool gets `min(settings.target_parallelism, host_parallelism)`
    /// threads. Tests use this to pin the pool size regardless of the machine.
    pub fn with_host_parallelism(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
        host_parallelism: usize,
    ) -> crate::Result<Self> {
        validate_parallelism(settings.target_parallelism)?;
        let timeout = validate_timeout(settings.timeout)?;

        let pool_size = settings.target_parallelism.min(host_parallelism).max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(pool_size)
            .thread_name("wordcrawl-worker")
            .enable_all()
            .build()
            .map_err(CrawlError::Runtime)?;

        tracing::debug!("Built worker pool with {} threads", pool_size);

        Ok(Self {
            timeout,
            popular_word_count: settings.popular_word_count,
            max_depth: settings.max_depth,
            pool_size,
            context: Arc::new(TaskContext {
                parser,
                clock,
                ignored_urls: settings.ignored_urls,
            }),
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        })
    }

    /// Number of worker threads in the pool
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Crawls outward from `seeds` and returns the ranked word counts
    ///
    /// Blocks the calling thread until every task has finished. Calling it
    /// from inside an async runtime returns [`CrawlError::NestedRuntime`];
    /// use [`CrawlerEngine::crawl_async`] there.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use wordcrawl::{CrawlSettings, CrawlerEngine, HtmlPageParser, PatternSet, SystemClock};
    ///
    /// let settings = CrawlSettings {
    ///     timeout: Duration::from_secs(5),
    ///     popular_word_count: 10,
    ///     target_parallelism: 4,
    ///     ignored_urls: PatternSet::default(),
    ///     max_depth: 2,
    /// };
    /// let parser = HtmlPageParser::new(PatternSet::default()).unwrap();
    /// let engine = CrawlerEngine::new(settings, Arc::new(parser), Arc::new(SystemClock)).unwrap();
    ///
    /// let result = engine.crawl(&["https://example.com/".to_string()]).unwrap();
    /// println!("{} pages visited", result.urls_visited);
    /// ```
    pub fn crawl(&self, seeds: &[String]) -> crate::Result<CrawlResult> {
        if Handle::try_current().is_ok() {
            return Err(CrawlError::NestedRuntime);
        }

        let (start, state) = self.begin(seeds);
        self.handle.block_on(self.run_roots(seeds, Arc::clone(&state)));
        Ok(self.finish(start, state))
    }

    /// Crawls outward from `seeds` without blocking the caller's runtime
    ///
    /// The tasks still run on the engine's own pool; the caller only awaits
    /// their completion.
    pub async fn crawl_async(&self, seeds: &[String]) -> crate::Result<CrawlResult> {
        let (start, state) = self.begin(seeds);
        self.handle
            .spawn(self.run_roots(seeds, Arc::clone(&state)))
            .await?;
        Ok(self.finish(start, state))
    }

    /// Fixes the deadline and creates the state for one crawl
    fn begin(&self, seeds: &[String]) -> (DateTime<Utc>, Arc<SharedCrawlState>) {
        let start = self.context.clock.now();
        let deadline = start
            .checked_add_signed(self.timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::info!(
            "Starting crawl of {} seed URLs on {} workers (deadline {})",
            seeds.len(),
            self.pool_size,
            deadline
        );

        (start, Arc::new(SharedCrawlState::new(deadline)))
    }

    /// Spawns one root task per seed and waits for all of them
    ///
    /// Must be polled inside the engine's runtime.
    fn run_roots(
        &self,
        seeds: &[String],
        state: Arc<SharedCrawlState>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let tasks: Vec<CrawlTask> = seeds
            .iter()
            .map(|seed| {
                CrawlTask::new(
                    seed.clone(),
                    self.max_depth,
                    Arc::clone(&state),
                    Arc::clone(&self.context),
                )
            })
            .collect();

        async move {
            let mut roots = JoinSet::new();
            for task in tasks {
                roots.spawn(task.run());
            }

            while let Some(joined) = roots.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Root crawl task failed: {}", e);
                }
            }
        }
    }

    fn finish(&self, start: DateTime<Utc>, state: Arc<SharedCrawlState>) -> CrawlResult {
        let urls_visited = state.visited_count();
        let counts = match Arc::try_unwrap(state) {
            Ok(state) => state.into_counts(),
            Err(shared) => shared.counts(),
        };

        let elapsed = self.context.clock.now() - start;
        tracing::info!(
            "Crawl completed: {} pages visited, {} distinct words in {}ms",
            urls_visited,
            counts.len(),
            elapsed.num_milliseconds()
        );

        if counts.is_empty() {
            return CrawlResult::new(Vec::new(), urls_visited);
        }

        CrawlResult::new(rank(counts, self.popular_word_count), urls_visited)
    }
}

impl Drop for CrawlerEngine {
    fn drop(&mut self) {
        // A blocking shutdown panics when the engine is dropped inside a runtime
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
