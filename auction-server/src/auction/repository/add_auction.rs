use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities,
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `create_auction` from `Service`
    // so that the expiration gets scheduled.
    #[tracing::instrument(skip_all, name = "add_auction_repo", fields(auction_id))]
    pub async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError> {
        tracing::Span::current().record("auction_id", auction.id.as_str());
        self.db.add_auction(auction).await
    }
}
