use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<Option<entities::Auction>, StoreError> {
        self.db.get_auction(auction_id).await
    }
}
