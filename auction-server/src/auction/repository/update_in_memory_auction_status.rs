use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub(super) async fn update_in_memory_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) {
        match self
            .in_memory_store
            .auction_statuses
            .write()
            .await
            .get_mut(&auction_id)
        {
            Some(current) => {
                *current = status;
            }
            None => {
                tracing::warn!(auction_id = %auction_id, "Auction not found in in-memory store");
            }
        };
    }
}
