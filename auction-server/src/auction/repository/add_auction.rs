use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    async fn add_in_memory_auction(
        &self,
        auction: &entities::Auction,
        expiration_time: OffsetDateTime,
    ) {
        self.in_memory_store
            .auction_statuses
            .write()
            .await
            .insert(auction.id, auction.status);
        self.in_memory_store
            .auction_expirations
            .write()
            .await
            .insert(auction.id, expiration_time);
    }

    // NOTE: Do not call this function directly. Instead call `add_auction` from `Service`.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
        expiration_time: OffsetDateTime,
    ) -> anyhow::Result<entities::Auction> {
        tracing::Span::current().record("auction_id", auction.id.to_string());
        self.db.add_auction(&auction).await?;
        self.add_in_memory_auction(&auction, expiration_time).await;
        Ok(auction)
    }
}
