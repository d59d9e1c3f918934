#[cfg(test)]
use mockall::automock;
use {
    super::StoreError,
    crate::{
        auction::entities,
        kernel::db::DB,
    },
    async_trait::async_trait,
    sqlx::FromRow,
    std::fmt::Debug,
    time::OffsetDateTime,
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
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

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

/// Row of the `auction` table. The start time is kept as unix seconds.
#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:           String,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
    pub status:       AuctionStatus,
    pub start_time:   i64,
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:           auction.id.clone(),
            product_name: auction.product_name.clone(),
            category:     auction.category.clone(),
            description:  auction.description.clone(),
            condition:    auction.condition.into(),
            status:       auction.status.into(),
            start_time:   auction.start_time.unix_timestamp(),
        }
    }
}

impl TryFrom<Auction> for entities::Auction {
    type Error = StoreError;

    fn try_from(auction: Auction) -> Result<Self, Self::Error> {
        let start_time = OffsetDateTime::from_unix_timestamp(auction.start_time).map_err(|e| {
            StoreError::Unavailable(format!(
                "Invalid start time {} for auction {}: {}",
                auction.start_time, auction.id, e
            ))
        })?;
        Ok(Self {
            id: auction.id,
            product_name: auction.product_name,
            category: auction.category,
            description: auction.description,
            condition: auction.condition.into(),
            status: auction.status.into(),
            start_time,
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    /// Stores a new auction. Either the whole record is written or nothing is.
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError>;
    /// Atomically sets the status to completed if, and only if, it is still active.
    /// Returns whether this call changed the status.
    async fn conclude_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, StoreError>;
    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<Option<entities::Auction>, StoreError>;
    async fn get_active_auctions(&self) -> Result<Vec<entities::Auction>, StoreError>;
}

fn unavailable(error: sqlx::Error) -> StoreError {
    tracing::Span::current().record("result", "error");
    StoreError::Unavailable(error.to_string())
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
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError> {
        let row = Auction::from(auction);
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, start_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&row.id)
        .bind(&row.product_name)
        .bind(&row.category)
        .bind(&row.description)
        .bind(row.condition)
        .bind(row.status)
        .bind(row.start_time)
        .execute(self)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                tracing::Span::current().record("result", "error");
                StoreError::DuplicateId(row.id.clone())
            }
            _ => unavailable(e),
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_conclude_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "conclude_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn conclude_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
            .bind(AuctionStatus::Completed)
            .bind(auction_id)
            .bind(AuctionStatus::Active)
            .execute(self)
            .await
            .map_err(unavailable)?;
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
        auction_id: &entities::AuctionId,
    ) -> Result<Option<entities::Auction>, StoreError> {
        let auction: Option<Auction> = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .map_err(unavailable)?;
        auction.map(entities::Auction::try_from).transpose()
    }

    #[instrument(
        target = "metrics",
        name = "db_get_active_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_active_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_active_auctions(&self) -> Result<Vec<entities::Auction>, StoreError> {
        let auctions: Vec<Auction> =
            sqlx::query_as("SELECT * FROM auction WHERE status = $1 ORDER BY start_time ASC")
                .bind(AuctionStatus::Active)
                .fetch_all(self)
                .await
                .map_err(unavailable)?;
        auctions
            .into_iter()
            .map(entities::Auction::try_from)
            .collect()
    }
}
