use {
    super::Service,
    crate::auction::{
        entities,
        repository::StoreError,
    },
};

pub struct CloseAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Completes the auction ahead of its expiry. Uses the same conditional update as the
    /// expiration loop, so whichever runs second is a no-op and gets `false`.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id, closed))]
    pub async fn close_auction(&self, input: CloseAuctionInput) -> Result<bool, StoreError> {
        let closed = self.repo.conclude_auction(&input.auction_id).await?;
        tracing::Span::current().record("closed", closed);
        Ok(closed)
    }
}
