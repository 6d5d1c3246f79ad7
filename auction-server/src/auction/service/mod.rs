use {
    super::repository::{
        self,
        Database,
        Repository,
    },
    std::{
        sync::{
            atomic::AtomicBool,
            Arc,
        },
        time::Duration,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod add_auction;
pub mod close_expired_auctions;
pub mod get_auction_by_id;
pub mod get_auction_status;
pub mod get_auctions;
pub mod update_auction_status;
pub mod workers;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// How long an auction stays active after its creation.
    pub auction_duration: Duration,
    /// How often the closing loop looks for expired auctions.
    pub check_interval:   Duration,
}

pub struct ServiceInner {
    config:       Config,
    repo:         Arc<Repository>,
    task_tracker: TaskTracker,
    exit_token:   CancellationToken,
    started:      AtomicBool,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(db: impl Database, config: Config) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(repository::Repository::new(db)),
            task_tracker: TaskTracker::new(),
            exit_token: CancellationToken::new(),
            started: AtomicBool::new(false),
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::auction::entities,
        axum::async_trait,
        std::sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Mutex,
        },
        time::OffsetDateTime,
        uuid::Uuid,
    };

    pub fn test_config() -> Config {
        Config {
            auction_duration: Duration::from_secs(60),
            check_interval:   Duration::from_millis(50),
        }
    }

    pub fn test_auction(creation_time: OffsetDateTime) -> entities::Auction {
        entities::Auction {
            id: Uuid::new_v4(),
            product_name: "Camera".to_string(),
            category: "Electronics".to_string(),
            description: "35mm film camera".to_string(),
            condition: entities::ProductCondition::Used,
            status: entities::AuctionStatus::Active,
            creation_time,
        }
    }

    /// Store that keeps auctions in a map and takes `update_delay` to acknowledge closing an
    /// auction. Other status updates are acknowledged immediately.
    #[derive(Debug, Default)]
    pub struct SlowDatabase {
        pub update_delay:     Duration,
        pub auctions:         Mutex<std::collections::HashMap<entities::AuctionId, entities::Auction>>,
        pub updates_started:  AtomicUsize,
        pub updates_finished: AtomicUsize,
    }

    impl SlowDatabase {
        pub fn new(update_delay: Duration) -> Self {
            Self {
                update_delay,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Database for Arc<SlowDatabase> {
        async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
            self.auctions
                .lock()
                .unwrap()
                .insert(auction.id, auction.clone());
            Ok(())
        }

        async fn update_auction_status(
            &self,
            auction_id: entities::AuctionId,
            status: entities::AuctionStatus,
        ) -> anyhow::Result<bool> {
            self.updates_started.fetch_add(1, Ordering::SeqCst);
            if status == entities::AuctionStatus::Completed {
                tokio::time::sleep(self.update_delay).await;
            }
            let updated = match self.auctions.lock().unwrap().get_mut(&auction_id) {
                Some(auction) => {
                    auction.status = status;
                    true
                }
                None => false,
            };
            self.updates_finished.fetch_add(1, Ordering::SeqCst);
            Ok(updated)
        }

        async fn get_auction(
            &self,
            auction_id: entities::AuctionId,
        ) -> anyhow::Result<Option<entities::Auction>> {
            Ok(self.auctions.lock().unwrap().get(&auction_id).cloned())
        }

        async fn get_auctions(
            &self,
            status: Option<entities::AuctionStatus>,
            category: Option<String>,
        ) -> anyhow::Result<Vec<entities::Auction>> {
            Ok(self
                .auctions
                .lock()
                .unwrap()
                .values()
                .filter(|auction| status.map_or(true, |status| auction.status == status))
                .filter(|auction| {
                    category
                        .as_ref()
                        .map_or(true, |category| &auction.category == category)
                })
                .cloned()
                .collect())
        }
    }
}
