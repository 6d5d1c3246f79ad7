use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    pub async fn get_in_memory_auction_expiration(
        &self,
        auction_id: entities::AuctionId,
    ) -> Option<OffsetDateTime> {
        self.in_memory_store
            .auction_expirations
            .read()
            .await
            .get(&auction_id)
            .cloned()
    }
}
