//! One-shot background load of the base collection.
//!
//! The fetch runs on a worker thread and reports back over a channel, so a
//! front-end can keep drawing a loading indicator and flip to the loaded
//! catalog in one step. Dropping the [`PendingCatalog`] abandons the load;
//! the worker's late result is discarded.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use shop_catalog::{CatalogPipeline, Rejected};

use crate::error::FetchError;
use crate::source::CatalogSource;

/// A loaded catalog ready for querying.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub pipeline: CatalogPipeline,
    /// Upstream records dropped by validation.
    pub rejected: Vec<Rejected>,
}

pub type LoadResult = Result<Loaded, FetchError>;

/// Fetch and load the collection on the calling thread.
pub fn load_catalog(source: &dyn CatalogSource) -> LoadResult {
    let decoded = source.fetch_products()?;
    let pipeline = CatalogPipeline::load(decoded.products).map_err(|e| {
        log::warn!("Refusing upstream catalog: {e}");
        FetchError::CatalogUnavailable
    })?;

    Ok(Loaded {
        pipeline,
        rejected: decoded.rejected,
    })
}

/// Start loading the collection on a worker thread.
pub fn spawn_catalog_load(source: Arc<dyn CatalogSource>) -> PendingCatalog {
    let (result_tx, result_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let start = Instant::now();
        let result = load_catalog(source.as_ref());
        log::debug!("Catalog load finished in {:?}", start.elapsed());

        // The receiver is gone if the load was abandoned.
        let _ = result_tx.send(result);
    });

    PendingCatalog {
        result_rx,
        handle: Some(handle),
        started_at: Instant::now(),
    }
}

/// Handle to a catalog load in progress.
pub struct PendingCatalog {
    result_rx: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
    started_at: Instant,
}

impl PendingCatalog {
    /// The result if the load has finished, without blocking.
    pub fn try_finish(&mut self) -> Option<LoadResult> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(self.finish(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.worker_lost()),
        }
    }

    /// Block for at most `timeout`, e.g. between spinner ticks.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<LoadResult> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => Some(self.finish(result)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.worker_lost()),
        }
    }

    pub fn wait(mut self) -> LoadResult {
        match self.result_rx.recv() {
            Ok(result) => self.finish(result),
            Err(_) => self.worker_lost(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn finish(&mut self, result: LoadResult) -> LoadResult {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }

    fn worker_lost(&mut self) -> LoadResult {
        log::error!("Catalog loader exited without a result");
        self.handle.take();
        Err(FetchError::CatalogUnavailable)
    }
}
