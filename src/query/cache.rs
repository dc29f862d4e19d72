use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tokio::time::{Duration, Instant};
use tracing::debug;

use super::state::QueryState;
use crate::source::FetchError;

struct Fetched<T> {
    value: Arc<T>,
    at: Instant,
}

impl<T> Clone for Fetched<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            at: self.at,
        }
    }
}

type Slot<T> = Arc<OnceCell<Result<Fetched<T>, FetchError>>>;

/// Keyed request cache.
///
/// Callers asking for the same key while a request is in flight all await that one
/// request. A successful result is served until `stale_time` has passed; a failure is
/// handed to everyone who waited on it and then forgotten.
pub struct QueryCache<K, T> {
    entries: Mutex<HashMap<K, Slot<T>>>,
    stale_time: Duration,
}

impl<K, T> QueryCache<K, T>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time,
        }
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: &K, fetch: F) -> Result<Arc<T>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let slot = self.slot_for(key);
        let result = slot
            .get_or_init(move || async move {
                fetch().await.map(|value| Fetched {
                    value: Arc::new(value),
                    at: Instant::now(),
                })
            })
            .await;
        result.clone().map(|fetched| fetched.value)
    }

    /// Snapshot of a key without starting a request
    pub fn peek(&self, key: &K) -> QueryState<T> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key).map(|slot| slot.get()) {
            None => QueryState::idle(),
            Some(None) => QueryState::loading(),
            Some(Some(Ok(fetched))) if self.is_fresh(fetched) => {
                QueryState::success(Arc::clone(&fetched.value))
            }
            Some(Some(Ok(fetched))) => QueryState::stale(Arc::clone(&fetched.value)),
            Some(Some(Err(err))) => QueryState::failure(err.clone()),
        }
    }

    fn is_fresh(&self, fetched: &Fetched<T>) -> bool {
        fetched.at.elapsed() < self.stale_time
    }

    fn slot_for(&self, key: &K) -> Slot<T> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = entries.get(key) {
            match slot.get() {
                None => {
                    debug!("Joining in-flight request for {:?}", key);
                    return Arc::clone(slot);
                }
                Some(Ok(fetched)) if self.is_fresh(fetched) => {
                    debug!("Cache hit for {:?}", key);
                    return Arc::clone(slot);
                }
                Some(_) => debug!("Refetching stale or failed entry for {:?}", key),
            }
        }

        // in-flight and fresh entries survive; stale data and failures are dropped
        let before = entries.len();
        entries.retain(|_, slot| match slot.get() {
            None => true,
            Some(Ok(fetched)) => self.is_fresh(fetched),
            Some(Err(_)) => false,
        });
        if entries.len() < before {
            debug!("Evicted {} cache entries", before - entries.len());
        }

        let slot: Slot<T> = Arc::new(OnceCell::new());
        entries.insert(key.clone(), Arc::clone(&slot));
        slot
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
