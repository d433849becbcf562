//! Parallel PoW generation with cooperative cancellation.
//!
//! The search is embarrassingly parallel: every worker starts from an
//! independent random nonce and hashes until one of them wins. Workers check
//! a shared flag once per batch, so both early termination and cancellation
//! land within one batch of work.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::RngCore;

use nanokit_types::{NanoError, WorkNonce};

use crate::solver::{search_batch, BATCH_SIZE};

/// Process-wide worker count; 0 means "detect at use".
static POOL_THREADS: AtomicUsize = AtomicUsize::new(0);

/// Configure the process-wide PoW worker count. Pass 0 to return to
/// automatic sizing from the detected core count.
pub fn configure_pool(num_threads: usize) {
    POOL_THREADS.store(num_threads, Ordering::Relaxed);
}

fn pool_threads() -> usize {
    match POOL_THREADS.load(Ordering::Relaxed) {
        0 => thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    }
}

/// Cooperative cancellation flag for a running work search.
///
/// Clone freely; all clones observe the same flag. Cancellation takes effect
/// at the next batch boundary of every worker.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Generates proof-of-work for block roots.
#[derive(Clone, Copy, Debug)]
pub struct WorkGenerator {
    threads: usize,
}

impl WorkGenerator {
    /// A generator with an explicit worker count (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// A generator sized from the process-wide pool configuration.
    pub fn from_pool() -> Self {
        Self::new(pool_threads())
    }

    /// Search until a nonce meeting `threshold` is found.
    pub fn generate(&self, root: &[u8; 32], threshold: u64) -> Result<WorkNonce, NanoError> {
        self.generate_cancellable(root, threshold, &CancelToken::new())
    }

    /// Search until a nonce is found or `cancel` fires, whichever is first.
    /// Cancellation returns [`NanoError::Cancelled`] without a nonce.
    pub fn generate_cancellable(
        &self,
        root: &[u8; 32],
        threshold: u64,
        cancel: &CancelToken,
    ) -> Result<WorkNonce, NanoError> {
        let found = AtomicBool::new(false);
        let result = AtomicU64::new(0);
        let started = Instant::now();

        thread::scope(|scope| {
            for _ in 0..self.threads {
                let found = &found;
                let result = &result;
                scope.spawn(move || {
                    let mut nonce = rand::thread_rng().next_u64();
                    while !found.load(Ordering::Relaxed) && !cancel.is_cancelled() {
                        match search_batch(root, nonce, threshold, BATCH_SIZE) {
                            Some(hit) => {
                                result.store(hit, Ordering::Relaxed);
                                found.store(true, Ordering::Release);
                                break;
                            }
                            None => nonce = nonce.wrapping_add(BATCH_SIZE),
                        }
                    }
                });
            }
        });

        if found.load(Ordering::Acquire) {
            let nonce = WorkNonce(result.load(Ordering::Relaxed));
            tracing::debug!(
                threads = self.threads,
                elapsed_ms = started.elapsed().as_millis() as u64,
                %nonce,
                "work generated"
            );
            Ok(nonce)
        } else {
            tracing::debug!(
                threads = self.threads,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "work generation cancelled"
            );
            Err(NanoError::Cancelled)
        }
    }
}

impl Default for WorkGenerator {
    fn default() -> Self {
        Self::from_pool()
    }
}
