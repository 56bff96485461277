//! In-memory caching using moka
//!
//! Trip price sheets are read on every keystroke of the booking form, but
//! change only when an admin edits the trip, so they are cached with a TTL.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::models::Trip;
use crate::pricing::queries;

/// Number of Omra trips loaded on each warm-up pass
const WARM_TRIP_LIMIT: i64 = 200;

/// Application cache holding loaded trips
#[derive(Clone)]
pub struct AppCache {
    /// Trips with resolved pricing (trip id -> Trip)
    pub trips: Cache<Uuid, Arc<Trip>>,
}

impl AppCache {
    /// Create a new cache instance with the given trip TTL
    pub fn new(trip_ttl: Duration) -> Self {
        Self {
            // Trips: 1000 entries, idle entries dropped after half the TTL
            trips: Cache::builder()
                .max_capacity(1000)
                .time_to_live(trip_ttl)
                .time_to_idle(trip_ttl / 2)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            trips_size: self.trips.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.trips.invalidate_all();
        info!("All caches invalidated");
    }

    /// Drop a trip after its prices were edited
    pub async fn invalidate_trip(&self, trip_id: Uuid) {
        self.trips.invalidate(&trip_id).await;
        info!("Cache invalidated for trip: {}", trip_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub trips_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, default_currency: String) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db, &default_currency).await;
    }
}

/// Load Omra trips, the ones priced through the allocator
async fn warm_cache(cache: &AppCache, db: &PgPool, default_currency: &str) {
    info!("Starting cache warm-up...");

    match queries::list_omra_trips(db, WARM_TRIP_LIMIT).await {
        Ok(rows) => {
            for row in rows {
                let trip = Trip::from_row(row, default_currency);
                cache.trips.insert(trip.id, Arc::new(trip)).await;
            }
        }
        Err(e) => warn!("Failed to warm trip cache: {}", e),
    }

    cache.trips.run_pending_tasks().await;
    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
