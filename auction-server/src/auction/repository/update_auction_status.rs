use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Writes the new status to the database first and mirrors it in memory only once
    /// the write is acknowledged.
    ///
    /// Returns `false` if the database has no auction with this id.
    #[tracing::instrument(skip_all, fields(auction_id, status))]
    pub async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<bool> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        tracing::Span::current().record("status", format!("{:?}", status));
        let updated = self.db.update_auction_status(auction_id, status).await?;
        if updated {
            self.update_in_memory_auction_status(auction_id, status)
                .await;
        }
        Ok(updated)
    }
}
