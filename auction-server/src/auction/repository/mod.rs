use {
    super::entities,
    axum_prometheus::metrics,
    std::collections::HashMap,
    time::OffsetDateTime,
    tokio::sync::RwLock,
};

mod add_auction;
mod get_auction;
mod get_auctions;
mod get_in_memory_auction_expiration;
mod get_in_memory_auction_status;
mod get_in_memory_expired_auctions;
mod models;
mod update_auction_status;
mod update_in_memory_auction_status;

pub use models::*;

/// In-memory view of every auction created by this process.
///
/// Each index has its own lock. The two locks are never held at the same time
/// and never across a database call.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub auction_statuses:    RwLock<HashMap<entities::AuctionId, entities::AuctionStatus>>,
    pub auction_expirations: RwLock<HashMap<entities::AuctionId, OffsetDateTime>>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }

    pub(super) async fn update_metrics(&self) {
        let in_memory_auctions = self.in_memory_store.auction_statuses.read().await.len();
        metrics::gauge!("in_memory_auctions").set(in_memory_auctions as f64);
    }
}
