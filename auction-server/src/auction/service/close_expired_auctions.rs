use {
    super::Service,
    crate::auction::entities,
    axum_prometheus::metrics,
    time::OffsetDateTime,
};

impl Service {
    /// Moves every active auction whose expiration time is at or before `now` to completed.
    ///
    /// Failures are logged and skipped. The auction stays active in memory and is
    /// picked up again by the next pass.
    #[tracing::instrument(skip_all, fields(expired_auctions))]
    pub async fn close_expired_auctions(&self, now: OffsetDateTime) {
        let expired_auctions = self.repo.get_in_memory_expired_auctions(now).await;
        tracing::Span::current().record("expired_auctions", expired_auctions.len());

        for auction_id in expired_auctions {
            tracing::info!(auction_id = %auction_id, "Closing expired auction");
            match self
                .repo
                .update_auction_status(auction_id, entities::AuctionStatus::Completed)
                .await
            {
                Ok(true) => {
                    metrics::counter!("auctions_closed_total").increment(1);
                }
                Ok(false) => {
                    tracing::error!(auction_id = %auction_id, "Expired auction not found in database");
                    metrics::counter!("auction_close_failures_total").increment(1);
                }
                Err(e) => {
                    tracing::error!(error = ?e, auction_id = %auction_id, "Failed to close expired auction");
                    metrics::counter!("auction_close_failures_total").increment(1);
                }
            }
        }
    }
}
