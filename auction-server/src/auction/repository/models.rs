#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::db::DB,
    axum::async_trait,
    sqlx::{
        FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "snake_case")]
pub enum AuctionStatus {
    New,
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:            entities::AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::New => AuctionStatus::New,
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::New => entities::AuctionStatus::New,
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        entities::Auction {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

/// Durable record of auctions.
///
/// Writes are expected to be durable once acknowledged and safe to retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    /// Returns `false` when no auction with the given id exists.
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<bool>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>>;
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
        category: Option<String>,
    ) -> anyhow::Result<Vec<entities::Auction>>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(auction.id)
        .bind(&auction.product_name)
        .bind(&auction.category)
        .bind(&auction.description)
        .bind(ProductCondition::from(auction.condition))
        .bind(AuctionStatus::from(auction.status))
        .bind({
            let creation_time = auction.creation_time.to_offset(UtcOffset::UTC);
            PrimitiveDateTime::new(creation_time.date(), creation_time.time())
        })
        .execute(self)
        .await
        .inspect_err(|_| {
            tracing::Span::current().record("result", "error");
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_auction_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2")
            .bind(AuctionStatus::from(status))
            .bind(auction_id)
            .execute(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> anyhow::Result<Option<entities::Auction>> {
        let auction: Option<Auction> = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auction.map(|auction| auction.into()))
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
        category: Option<String>,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = status {
            query.push(" AND status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        if let Some(category) = category {
            query.push(" AND category = ");
            query.push_bind(category);
        }
        query.push(" ORDER BY creation_time DESC");
        let auctions: Vec<Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auctions.into_iter().map(|auction| auction.into()).collect())
    }
}
