use {
    super::{
        entities,
        service::{
            add_auction::AddAuctionInput,
            get_auction_by_id::GetAuctionByIdInput,
            get_auction_status::GetAuctionStatusInput,
            get_auctions::GetAuctionsInput,
            update_auction_status::UpdateAuctionStatusInput,
        },
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        Json,
        Router,
    },
    std::sync::Arc,
    timed_auction_api_types::{
        auction::{
            Auction,
            AuctionCreate,
            AuctionIdParams,
            AuctionStatusResult,
            AuctionStatusUpdate,
            Auctions,
            GetAuctionsQueryParams,
            Route,
        },
        ErrorBodyResponse,
    },
};

/// Create a new auction.
///
/// The auction is active right away and is closed automatically once the configured
/// auction interval has elapsed since its creation.
#[utoipa::path(post, path = "/v1/auctions", request_body = AuctionCreate, responses(
    (status = 200, description = "Auction was created successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn post_auction(
    State(store): State<Arc<Store>>,
    Json(auction_create): Json<AuctionCreate>,
) -> Result<Json<Auction>, RestError> {
    let auction =
        entities::Auction::try_from(auction_create).map_err(RestError::BadParameters)?;
    let auction = store
        .auction_service
        .add_auction(AddAuctionInput { auction })
        .await?;
    Ok(Json(auction.into()))
}

/// List auctions, newest first.
#[utoipa::path(get, path = "/v1/auctions", params(GetAuctionsQueryParams), responses(
    (status = 200, description = "Auctions matching the filters", body = Auctions),
    (status = 400, response = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(store): State<Arc<Store>>,
    Query(params): Query<GetAuctionsQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store
        .auction_service
        .get_auctions(GetAuctionsInput {
            status:   params.status.map(Into::into),
            category: params.category,
        })
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Into::into).collect(),
    }))
}

/// Query the details of a specific auction.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}", params(AuctionIdParams), responses(
    (status = 200, body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn get_auction_by_id(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .get_auction_by_id(GetAuctionByIdInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Query the current status of a specific auction.
///
/// The status is served from the in-memory index, so only auctions created since the
/// server started are known.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/status", params(AuctionIdParams), responses(
    (status = 200, body = AuctionStatusResult),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
    (status = 503, response = ErrorBodyResponse),
),)]
pub async fn get_auction_status(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
) -> Result<Json<AuctionStatusResult>, RestError> {
    let output = store
        .auction_service
        .get_auction_status(GetAuctionStatusInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(AuctionStatusResult {
        id:              params.auction_id,
        status:          output.status.into(),
        expiration_time: Some(output.expiration_time),
    }))
}

/// Set the status of a specific auction.
///
/// Any transition is accepted, including reopening a completed auction.
#[utoipa::path(put, path = "/v1/auctions/{auction_id}/status", params(AuctionIdParams),
    request_body = AuctionStatusUpdate,
    responses(
        (status = 200, body = AuctionStatusResult),
        (status = 400, response = ErrorBodyResponse),
        (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
        (status = 503, response = ErrorBodyResponse),
    ),
)]
pub async fn put_auction_status(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
    Json(update): Json<AuctionStatusUpdate>,
) -> Result<Json<AuctionStatusResult>, RestError> {
    store
        .auction_service
        .update_auction_status(UpdateAuctionStatusInput {
            auction_id: params.auction_id,
            status:     update.status.into(),
        })
        .await?;
    let expiration_time = store
        .auction_service
        .get_auction_status(GetAuctionStatusInput {
            auction_id: params.auction_id,
        })
        .await
        .ok()
        .map(|output| output.expiration_time);
    Ok(Json(AuctionStatusResult {
        id: params.auction_id,
        status: update.status,
        expiration_time,
    }))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostAuction, post_auction)
        .route(Route::GetAuctions, get_auctions)
        .route(Route::GetAuctionById, get_auction_by_id)
        .route(Route::GetAuctionStatus, get_auction_status)
        .route(Route::PutAuctionStatus, put_auction_status)
        .router
}
