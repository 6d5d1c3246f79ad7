use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

#[derive(Default)]
pub struct GetAuctionsInput {
    pub status:   Option<entities::AuctionStatus>,
    pub category: Option<String>,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        self.repo
            .get_auctions(input.status, input.category)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to get auctions");
                RestError::TemporarilyUnavailable
            })
    }
}
