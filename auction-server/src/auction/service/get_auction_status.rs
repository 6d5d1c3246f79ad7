use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
    time::OffsetDateTime,
};

pub struct GetAuctionStatusInput {
    pub auction_id: entities::AuctionId,
}

pub struct AuctionStatusOutput {
    pub status:          entities::AuctionStatus,
    pub expiration_time: OffsetDateTime,
}

impl Service {
    /// Reads the status and expiration tracked in memory, without touching the database.
    pub async fn get_auction_status(
        &self,
        input: GetAuctionStatusInput,
    ) -> Result<AuctionStatusOutput, RestError> {
        let status = self
            .repo
            .get_in_memory_auction_status(input.auction_id)
            .await
            .ok_or(RestError::AuctionNotFound)?;
        let expiration_time = self
            .repo
            .get_in_memory_auction_expiration(input.auction_id)
            .await
            .ok_or(RestError::AuctionNotFound)?;
        Ok(AuctionStatusOutput {
            status,
            expiration_time,
        })
    }
}
