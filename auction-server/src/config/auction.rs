use {
    clap::Args,
    std::time::Duration,
    time::OffsetDateTime,
};

pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Durations are read as raw strings so that a malformed value falls back to its
/// default instead of stopping the server.
#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct Options {
    /// How long an auction stays active after its creation, e.g. `5m`, `90s` or `1h 30m`.
    /// Amounts must be whole numbers, so write `90s` rather than `1.5m`.
    /// Defaults to 5 minutes when unset, invalid or too large to schedule.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub auction_interval:       Option<String>,
    /// How often expired auctions are looked for, e.g. `30s` or `500ms`.
    /// Amounts must be whole numbers, so write `500ms` rather than `0.5s`.
    /// Defaults to 30 seconds when unset, invalid or zero.
    #[arg(long = "auction-check-interval")]
    #[arg(env = "AUCTION_CHECK_INTERVAL")]
    pub auction_check_interval: Option<String>,
}

impl Options {
    pub fn auction_duration(&self) -> Duration {
        let duration = parse_duration_or(
            "auction-interval",
            self.auction_interval.as_deref(),
            DEFAULT_AUCTION_DURATION,
        );
        let schedulable = time::Duration::try_from(duration)
            .ok()
            .and_then(|duration| OffsetDateTime::now_utc().checked_add(duration))
            .is_some();
        if !schedulable {
            tracing::warn!(
                duration = ?duration,
                default = ?DEFAULT_AUCTION_DURATION,
                "Auction interval is too large to schedule, using default"
            );
            return DEFAULT_AUCTION_DURATION;
        }
        duration
    }

    pub fn check_interval(&self) -> Duration {
        let interval = parse_duration_or(
            "auction-check-interval",
            self.auction_check_interval.as_deref(),
            DEFAULT_CHECK_INTERVAL,
        );
        if interval.is_zero() {
            tracing::warn!(
                default = ?DEFAULT_CHECK_INTERVAL,
                "Auction check interval must be positive, using default"
            );
            return DEFAULT_CHECK_INTERVAL;
        }
        interval
    }
}

fn parse_duration_or(option: &str, value: Option<&str>, default: Duration) -> Duration {
    let Some(value) = value else {
        return default;
    };
    match humantime::parse_duration(value.trim()) {
        Ok(duration) => duration,
        Err(err) => {
            tracing::warn!(
                option,
                value,
                error = %err,
                default = ?default,
                "Invalid duration, using default"
            );
            default
        }
    }
}
