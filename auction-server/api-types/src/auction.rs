use {
    crate::{
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// The auction is registered but not yet open for bids.
    New,
    /// The auction is open for bids until its expiration time.
    Active,
    /// The auction is closed, either because its duration elapsed or because it was closed manually.
    Completed,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

/// Parameters needed to create a new auction.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionCreate {
    /// Name of the product being auctioned.
    #[schema(example = "Vintage camera")]
    pub product_name: String,
    /// Category of the product.
    #[schema(example = "Electronics")]
    pub category:     String,
    /// Free form description of the product.
    #[schema(example = "35mm film camera in working condition")]
    pub description:  String,
    pub condition:    ProductCondition,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug)]
pub struct Auction {
    /// The unique id of the auction.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            AuctionId,
    #[schema(example = "Vintage camera")]
    pub product_name:  String,
    #[schema(example = "Electronics")]
    pub category:      String,
    #[schema(example = "35mm film camera in working condition")]
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    /// The time the auction was created.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

/// Status change requested for an auction.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionStatusUpdate {
    pub status: AuctionStatus,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug)]
pub struct AuctionStatusResult {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:              AuctionId,
    pub status:          AuctionStatus,
    /// The time after which the auction is closed automatically if it is still active.
    /// Absent for auctions this server instance is not tracking.
    #[schema(example = "2024-05-23T21:31:57.329954Z", value_type = Option<String>)]
    #[serde(with = "time::serde::rfc3339::option")]
    pub expiration_time: Option<OffsetDateTime>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug, Default)]
pub struct GetAuctionsQueryParams {
    /// Only return auctions with this status.
    pub status:   Option<AuctionStatus>,
    /// Only return auctions in this category.
    #[param(example = "Electronics")]
    pub category: Option<String>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
pub struct AuctionIdParams {
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostAuction,
    #[strum(serialize = "")]
    GetAuctions,
    #[strum(serialize = ":auction_id")]
    GetAuctionById,
    #[strum(serialize = ":auction_id/status")]
    GetAuctionStatus,
    #[strum(serialize = ":auction_id/status")]
    PutAuctionStatus,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let full_path = format!(
            "{}{}{}",
            crate::Route::V1.as_ref(),
            crate::Route::Auction.as_ref(),
            self.as_ref()
        )
        .trim_end_matches('/')
        .to_string();
        match self {
            Route::PostAuction => RouteProperties {
                method: http::Method::POST,
                full_path,
            },
            Route::GetAuctions => RouteProperties {
                method: http::Method::GET,
                full_path,
            },
            Route::GetAuctionById => RouteProperties {
                method: http::Method::GET,
                full_path,
            },
            Route::GetAuctionStatus => RouteProperties {
                method: http::Method::GET,
                full_path,
            },
            Route::PutAuctionStatus => RouteProperties {
                method: http::Method::PUT,
                full_path,
            },
        }
    }
}
