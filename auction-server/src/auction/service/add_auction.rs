use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct AddAuctionInput {
    pub auction: entities::Auction,
}

impl Service {
    /// Persists a new auction and starts tracking its expiration.
    ///
    /// Nothing is tracked in memory unless the database accepted the auction.
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let expiration_time = input
            .auction
            .expiration_time(self.config.auction_duration)
            .ok_or_else(|| {
                tracing::error!(
                    auction_duration = ?self.config.auction_duration,
                    "Auction expiration time is out of range"
                );
                RestError::TemporarilyUnavailable
            })?;
        let auction = self
            .repo
            .add_auction(input.auction, expiration_time)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to add auction");
                RestError::TemporarilyUnavailable
            })?;
        tracing::info!(auction_id = %auction.id, expiration_time = %expiration_time, "Auction created");
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::{
                tests::{
                    test_auction,
                    test_config,
                },
                Config,
            },
        },
        std::time::Duration,
        time::OffsetDateTime,
    };

    #[tokio::test]
    async fn test_add_auction_tracks_status_and_expiration() {
        let mut db = MockDatabase::new();
        db.expect_add_auction().times(1).returning(|_| Ok(()));
        let config = test_config();
        let service = Service::new(db, config.clone());

        let auction = test_auction(OffsetDateTime::now_utc());
        let created = service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await
            .unwrap();

        assert_eq!(created, auction);
        assert_eq!(
            service.repo.get_in_memory_auction_status(auction.id).await,
            Some(entities::AuctionStatus::Active)
        );
        assert_eq!(
            service
                .repo
                .get_in_memory_auction_expiration(auction.id)
                .await,
            Some(auction.creation_time + config.auction_duration)
        );
    }

    #[tokio::test]
    async fn test_add_auction_expiration_does_not_depend_on_check_interval() {
        let mut db = MockDatabase::new();
        db.expect_add_auction().returning(|_| Ok(()));
        let service = Service::new(
            db,
            Config {
                auction_duration: Duration::from_secs(1),
                check_interval:   Duration::from_secs(30),
            },
        );

        let creation_time = OffsetDateTime::now_utc() - Duration::from_secs(7);
        let auction = test_auction(creation_time);
        service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await
            .unwrap();

        assert_eq!(
            service
                .repo
                .get_in_memory_auction_expiration(auction.id)
                .await,
            Some(creation_time + Duration::from_secs(1))
        );
    }

    #[tokio::test]
    async fn test_add_auction_out_of_range_expiration_is_rejected() {
        let mut db = MockDatabase::new();
        db.expect_add_auction().never();
        let service = Service::new(
            db,
            Config {
                auction_duration: Duration::from_secs(3_155_760_000_000),
                check_interval:   Duration::from_secs(30),
            },
        );

        let auction = test_auction(OffsetDateTime::now_utc());
        let result = service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await;

        assert!(matches!(result, Err(RestError::TemporarilyUnavailable)));
        assert_eq!(
            service.repo.get_in_memory_auction_status(auction.id).await,
            None
        );
    }

    #[tokio::test]
    async fn test_add_auction_store_failure_leaves_indexes_untouched() {
        let mut db = MockDatabase::new();
        db.expect_add_auction()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let service = Service::new(db, test_config());

        let auction = test_auction(OffsetDateTime::now_utc());
        let result = service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await;

        assert!(matches!(result, Err(RestError::TemporarilyUnavailable)));
        assert_eq!(
            service.repo.get_in_memory_auction_status(auction.id).await,
            None
        );
        assert_eq!(
            service
                .repo
                .get_in_memory_auction_expiration(auction.id)
                .await,
            None
        );
    }
}
