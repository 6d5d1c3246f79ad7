use {
    std::time::Duration,
    time::OffsetDateTime,
    timed_auction_api_types::auction as api,
    uuid::Uuid,
};

pub type AuctionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    New,
    Active,
    Completed,
}

impl AuctionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AuctionStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
}

const MIN_PRODUCT_NAME_LEN: usize = 2;
const MIN_CATEGORY_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 11;

impl Auction {
    /// Builds a new auction that is open for bids from now on.
    pub fn try_new(
        product_name: String,
        category: String,
        description: String,
        condition: ProductCondition,
    ) -> Result<Self, String> {
        if product_name.chars().count() < MIN_PRODUCT_NAME_LEN {
            return Err(format!(
                "product_name must have at least {} characters",
                MIN_PRODUCT_NAME_LEN
            ));
        }
        if category.chars().count() < MIN_CATEGORY_LEN {
            return Err(format!(
                "category must have at least {} characters",
                MIN_CATEGORY_LEN
            ));
        }
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(format!(
                "description must have at least {} characters",
                MIN_DESCRIPTION_LEN
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            product_name,
            category,
            description,
            condition,
            status: AuctionStatus::Active,
            creation_time: now_utc_micros(),
        })
    }

    /// The instant after which the auction must no longer be considered active.
    ///
    /// Returns `None` when the instant is past the largest representable date.
    pub fn expiration_time(&self, auction_duration: Duration) -> Option<OffsetDateTime> {
        let auction_duration = time::Duration::try_from(auction_duration).ok()?;
        self.creation_time.checked_add(auction_duration)
    }
}

/// Current time truncated to the microsecond precision the database keeps.
fn now_utc_micros() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

impl From<api::AuctionStatus> for AuctionStatus {
    fn from(status: api::AuctionStatus) -> Self {
        match status {
            api::AuctionStatus::New => AuctionStatus::New,
            api::AuctionStatus::Active => AuctionStatus::Active,
            api::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for api::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::New => api::AuctionStatus::New,
            AuctionStatus::Active => api::AuctionStatus::Active,
            AuctionStatus::Completed => api::AuctionStatus::Completed,
        }
    }
}

impl From<api::ProductCondition> for ProductCondition {
    fn from(condition: api::ProductCondition) -> Self {
        match condition {
            api::ProductCondition::New => ProductCondition::New,
            api::ProductCondition::Used => ProductCondition::Used,
            api::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for api::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => api::ProductCondition::New,
            ProductCondition::Used => api::ProductCondition::Used,
            ProductCondition::Refurbished => api::ProductCondition::Refurbished,
        }
    }
}

impl TryFrom<api::AuctionCreate> for Auction {
    type Error = String;

    fn try_from(auction: api::AuctionCreate) -> Result<Self, Self::Error> {
        Auction::try_new(
            auction.product_name,
            auction.category,
            auction.description,
            auction.condition.into(),
        )
    }
}

impl From<Auction> for api::Auction {
    fn from(auction: Auction) -> Self {
        api::Auction {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_opens_auction() {
        let auction = Auction::try_new(
            "Camera".to_string(),
            "Electronics".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::Used,
        )
        .unwrap();
        assert_eq!(auction.status, AuctionStatus::Active);
        assert!(auction.status.is_active());
    }

    #[test]
    fn test_try_new_rejects_short_fields() {
        assert!(Auction::try_new(
            "C".to_string(),
            "Electronics".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::Used,
        )
        .is_err());
        assert!(Auction::try_new(
            "Camera".to_string(),
            "El".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::Used,
        )
        .is_err());
        assert!(Auction::try_new(
            "Camera".to_string(),
            "Electronics".to_string(),
            "too short".to_string(),
            ProductCondition::Used,
        )
        .is_err());
    }

    #[test]
    fn test_expiration_time_is_creation_plus_duration() {
        let auction = Auction::try_new(
            "Camera".to_string(),
            "Electronics".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::New,
        )
        .unwrap();
        let duration = Duration::from_secs(300);
        assert_eq!(
            auction.expiration_time(duration),
            Some(auction.creation_time + duration)
        );
        assert_eq!(
            auction.expiration_time(duration).unwrap() - auction.creation_time,
            time::Duration::seconds(300)
        );
    }

    #[test]
    fn test_expiration_time_out_of_range() {
        let auction = Auction::try_new(
            "Camera".to_string(),
            "Electronics".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::New,
        )
        .unwrap();
        // 100000 years
        assert_eq!(
            auction.expiration_time(Duration::from_secs(3_155_760_000_000)),
            None
        );
        assert_eq!(auction.expiration_time(Duration::MAX), None);
    }

    #[test]
    fn test_creation_time_has_microsecond_precision() {
        let auction = Auction::try_new(
            "Camera".to_string(),
            "Electronics".to_string(),
            "35mm film camera".to_string(),
            ProductCondition::New,
        )
        .unwrap();
        assert_eq!(auction.creation_time.nanosecond() % 1_000, 0);
    }
}
