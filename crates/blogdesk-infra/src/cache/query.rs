//! Keyed fetch cache with in-flight request coalescing.
//!
//! Each [`QueryKey`] owns one slot holding the last known result and, while
//! a request is outstanding, the shared future every caller for that key
//! awaits. Results are only written back by the latest request started for
//! the key. A request detached by [`QueryCache::invalidate`] still settles
//! the slot when nothing newer was started, but its value stays stale.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::RwLock;

use blogdesk_core::domain::QueryKey;
use blogdesk_core::StoreError;

type SharedRequest<V> = Shared<BoxFuture<'static, Result<V, StoreError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Loading,
    Ready,
    Error,
}

/// Snapshot of one cached query.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub status: QueryStatus,
    /// Last successful value. Kept while a refetch is loading or has failed.
    pub value: Option<V>,
    pub error: Option<StoreError>,
    pub updated_at: DateTime<Utc>,
    pub stale: bool,
}

impl<V> CacheEntry<V> {
    fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            value: None,
            error: None,
            updated_at: Utc::now(),
            stale: false,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Ready && !self.stale
    }
}

struct InFlight<V> {
    id: u64,
    request: SharedRequest<V>,
}

struct Slot<V> {
    entry: CacheEntry<V>,
    in_flight: Option<InFlight<V>>,
    /// Id of the last request started for this key.
    latest: Option<u64>,
}

struct Slots<V> {
    by_key: HashMap<QueryKey, Slot<V>>,
    next_request: u64,
}

/// Query cache owned by a controller and shared through an `Arc`.
pub struct QueryCache<V> {
    slots: RwLock<Slots<V>>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(Slots {
                by_key: HashMap::new(),
                next_request: 0,
            }),
        }
    }

    /// Read `key`, calling `fetcher` only when there is no fresh value and
    /// no request for the key is already outstanding.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<V, StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, StoreError>> + Send + 'static,
    {
        let (request_id, request) = {
            let mut guard = self.slots.write().await;
            let slots = &mut *guard;
            let request_id = slots.next_request;

            let slot = slots.by_key.entry(key.clone()).or_insert_with(|| Slot {
                entry: CacheEntry::loading(),
                in_flight: None,
                latest: None,
            });

            if slot.entry.is_fresh() {
                if let Some(value) = &slot.entry.value {
                    tracing::trace!(key = %key, "Cache hit");
                    return Ok(value.clone());
                }
            }

            match &slot.in_flight {
                Some(in_flight) => {
                    tracing::debug!(key = %key, "Joining in-flight request");
                    (in_flight.id, in_flight.request.clone())
                }
                None => {
                    tracing::debug!(key = %key, "Cache miss, fetching");
                    let request = fetcher().boxed().shared();
                    slot.in_flight = Some(InFlight {
                        id: request_id,
                        request: request.clone(),
                    });
                    slot.latest = Some(request_id);
                    slot.entry.status = QueryStatus::Loading;
                    slot.entry.updated_at = Utc::now();
                    slots.next_request += 1;
                    (request_id, request)
                }
            }
        };

        let result = request.await;
        self.settle(key, request_id, &result).await;
        result
    }

    /// Mark `key` stale and detach any outstanding request, so the next
    /// [`fetch`](Self::fetch) goes to the store. Returns whether the key was
    /// cached.
    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        let mut slots = self.slots.write().await;
        match slots.by_key.get_mut(key) {
            Some(slot) => {
                slot.entry.stale = true;
                slot.in_flight = None;
                tracing::debug!(key = %key, "Query invalidated");
                true
            }
            None => false,
        }
    }

    pub async fn refetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<V, StoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, StoreError>> + Send + 'static,
    {
        self.invalidate(key).await;
        self.fetch(key, fetcher).await
    }

    pub async fn peek(&self, key: &QueryKey) -> Option<CacheEntry<V>> {
        let slots = self.slots.read().await;
        slots.by_key.get(key).map(|slot| slot.entry.clone())
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.slots.read().await.by_key.contains_key(key)
    }

    async fn settle(&self, key: &QueryKey, request_id: u64, result: &Result<V, StoreError>) {
        let mut slots = self.slots.write().await;
        let Some(slot) = slots.by_key.get_mut(key) else {
            return;
        };

        if slot.latest != Some(request_id) {
            tracing::trace!(key = %key, request_id, "Dropping superseded result");
            return;
        }

        let detached = match &slot.in_flight {
            Some(in_flight) if in_flight.id == request_id => false,
            Some(_) => return,
            // Either another awaiter already settled it or it was invalidated.
            None if slot.entry.status != QueryStatus::Loading => return,
            None => true,
        };

        slot.in_flight = None;
        let entry = &mut slot.entry;
        entry.updated_at = Utc::now();
        match result {
            Ok(value) => {
                entry.status = QueryStatus::Ready;
                entry.value = Some(value.clone());
                entry.error = None;
                entry.stale = detached;
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Query failed");
                entry.status = QueryStatus::Error;
                entry.error = Some(err.clone());
            }
        }
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
