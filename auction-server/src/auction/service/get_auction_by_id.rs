use {
    super::Service,
    crate::auction::{
        entities,
        repository::StoreError,
    },
};

pub struct GetAuctionByIdInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction_by_id(
        &self,
        input: GetAuctionByIdInput,
    ) -> Result<Option<entities::Auction>, StoreError> {
        self.repo.get_auction(&input.auction_id).await
    }
}
