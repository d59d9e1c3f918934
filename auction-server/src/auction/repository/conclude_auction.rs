use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities,
};

impl Repository {
    /// Moves the auction from active to completed. Returns `false` when the auction was
    /// not active anymore (or does not exist), in which case nothing is written.
    #[tracing::instrument(skip_all, name = "conclude_auction_repo", fields(auction_id))]
    pub async fn conclude_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<bool, StoreError> {
        tracing::Span::current().record("auction_id", auction_id.as_str());
        self.db.conclude_auction(auction_id).await
    }
}
