use {
    super::Service,
    std::sync::atomic::Ordering,
    time::OffsetDateTime,
    tokio::time::{
        Instant,
        MissedTickBehavior,
    },
};

impl Service {
    pub async fn run_auction_closing_loop(&self) {
        tracing::info!(
            auction_duration = ?self.config.auction_duration,
            check_interval = ?self.config.check_interval,
            "Starting auction closing loop..."
        );
        let period = self.config.check_interval;
        let mut check_interval = tokio::time::interval_at(Instant::now() + period, period);
        check_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.exit_token.cancelled() => break,
                _ = check_interval.tick() => {
                    self.close_expired_auctions(OffsetDateTime::now_utc()).await;
                    self.repo.update_metrics().await;
                }
            }
        }
        tracing::info!("Shutting down auction closing loop...");
    }

    /// Spawns the auction closing loop. Only the first call on a service has an effect.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::warn!("Auction closing loop is already running");
            return;
        }
        self.task_tracker.spawn({
            let service = self.clone();
            async move {
                service.run_auction_closing_loop().await;
            }
        });
    }

    /// Stops the auction closing loop.
    ///
    /// A pass that is already running is allowed to finish; once this returns no
    /// further pass will run.
    pub async fn stop(&self) {
        self.exit_token.cancel();
        self.task_tracker.close();
        self.task_tracker.wait().await;
        tracing::info!("Auction closing loop stopped");
    }
}
