use {
    crate::{
        auction,
        config::RunOptions,
        state::Store,
    },
    anyhow::Result,
    axum::{
        handler::Handler,
        http::StatusCode,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
            put,
        },
        Json,
        Router,
    },
    clap::crate_version,
    std::sync::Arc,
    timed_auction_api_types::{
        self as api_types,
        Routable,
        Route,
    },
    tokio_util::sync::CancellationToken,
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Timed Auction Server API {}", crate_version!())
}

async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Debug, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(api_types::ErrorBodyResponse { error: msg })).into_response()
    }
}

/// Registers handlers under the path and method their route declares.
#[derive(Default)]
pub struct WrappedRouter {
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<H, T>(mut self, path: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let properties = path.properties();
        let method_router = match properties.method.as_str() {
            "GET" => get(handler),
            "POST" => post(handler),
            "PUT" => put(handler),
            method => {
                tracing::error!(method, path = %properties.full_path, "Unsupported route method");
                return self;
            }
        };
        self.router = self.router.route(&properties.full_path, method_router);
        self
    }
}

// Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
#[derive(OpenApi)]
#[openapi(
    paths(
        auction::api::post_auction,
        auction::api::get_auctions,
        auction::api::get_auction_by_id,
        auction::api::get_auction_status,
        auction::api::put_auction_status,
    ),
    components(
        schemas(
            api_types::auction::Auction,
            api_types::auction::AuctionCreate,
            api_types::auction::AuctionStatus,
            api_types::auction::AuctionStatusResult,
            api_types::auction::AuctionStatusUpdate,
            api_types::auction::Auctions,
            api_types::auction::ProductCondition,
            api_types::ErrorBodyResponse,
        ),
        responses(
            api_types::ErrorBodyResponse,
            api_types::auction::Auction,
            api_types::auction::Auctions,
            api_types::auction::AuctionStatusResult,
        ),
    ),
    tags(
        (name = "Timed Auction Server", description = "Timed Auction Server registers auctions and \
        closes each one automatically once its duration has elapsed.")
    )
)]
struct ApiDoc;

pub fn build_router(store: Arc<Store>) -> Router {
    Router::new()
        .merge(Redoc::with_url(Route::Docs.as_ref(), ApiDoc::openapi()))
        .merge(auction::api::get_routes())
        .route(Route::Root.as_ref(), get(root))
        .route(Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

pub async fn start_api(
    run_options: RunOptions,
    store: Arc<Store>,
    exit_token: CancellationToken,
) -> Result<()> {
    tracing::info!(listen_addr = %run_options.server.listen_addr, "Starting RPC server...");
    let app = build_router(store);
    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            exit_token.cancelled().await;
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}
