use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    /// Ids of the auctions that are still active but whose expiration time is at or before `now`.
    ///
    /// Both indexes are copied under their own lock and released before the
    /// result is computed, so callers can do I/O on the result without blocking writers.
    pub async fn get_in_memory_expired_auctions(
        &self,
        now: OffsetDateTime,
    ) -> Vec<entities::AuctionId> {
        let auction_expirations = self.in_memory_store.auction_expirations.read().await.clone();
        let auction_statuses = self.in_memory_store.auction_statuses.read().await.clone();

        auction_expirations
            .into_iter()
            .filter(|(auction_id, expiration_time)| {
                *expiration_time <= now
                    && auction_statuses
                        .get(auction_id)
                        .is_some_and(|status| status.is_active())
            })
            .map(|(auction_id, _)| auction_id)
            .collect()
    }
}
