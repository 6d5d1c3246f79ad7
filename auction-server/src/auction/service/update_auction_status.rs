use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

pub struct UpdateAuctionStatusInput {
    pub auction_id: entities::AuctionId,
    pub status:     entities::AuctionStatus,
}

impl Service {
    /// Sets the status of an auction. Any transition is accepted, including reopening
    /// a completed auction.
    pub async fn update_auction_status(
        &self,
        input: UpdateAuctionStatusInput,
    ) -> Result<(), RestError> {
        let updated = self
            .repo
            .update_auction_status(input.auction_id, input.status)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    auction_id = %input.auction_id,
                    status = ?input.status,
                    "Failed to update auction status"
                );
                RestError::TemporarilyUnavailable
            })?;
        if !updated {
            return Err(RestError::AuctionNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::{
                add_auction::AddAuctionInput,
                tests::{
                    test_auction,
                    test_config,
                },
            },
        },
        time::OffsetDateTime,
        uuid::Uuid,
    };

    #[tokio::test]
    async fn test_update_auction_status_overwrites_index() {
        let auction = test_auction(OffsetDateTime::now_utc());
        let auction_id = auction.id;
        let mut db = MockDatabase::new();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction_status()
            .withf(move |id, status| {
                *id == auction_id && *status == entities::AuctionStatus::Completed
            })
            .times(1)
            .returning(|_, _| Ok(true));
        let service = Service::new(db, test_config());
        service
            .add_auction(AddAuctionInput { auction })
            .await
            .unwrap();

        service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id,
                status: entities::AuctionStatus::Completed,
            })
            .await
            .unwrap();

        assert_eq!(
            service.repo.get_in_memory_auction_status(auction_id).await,
            Some(entities::AuctionStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_update_auction_status_store_failure_keeps_index() {
        let auction = test_auction(OffsetDateTime::now_utc());
        let auction_id = auction.id;
        let mut db = MockDatabase::new();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction_status()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("write timeout")));
        let service = Service::new(db, test_config());
        service
            .add_auction(AddAuctionInput { auction })
            .await
            .unwrap();

        let result = service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id,
                status: entities::AuctionStatus::Completed,
            })
            .await;

        assert!(matches!(result, Err(RestError::TemporarilyUnavailable)));
        assert_eq!(
            service.repo.get_in_memory_auction_status(auction_id).await,
            Some(entities::AuctionStatus::Active)
        );
    }

    #[tokio::test]
    async fn test_update_auction_status_unknown_auction() {
        let mut db = MockDatabase::new();
        db.expect_update_auction_status()
            .times(1)
            .returning(|_, _| Ok(false));
        let service = Service::new(db, test_config());
        let auction_id = Uuid::new_v4();

        let result = service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id,
                status: entities::AuctionStatus::Completed,
            })
            .await;

        assert!(matches!(result, Err(RestError::AuctionNotFound)));
        assert_eq!(
            service.repo.get_in_memory_auction_status(auction_id).await,
            None
        );
    }
}
