use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities,
};

impl Repository {
    pub async fn get_active_auctions(&self) -> Result<Vec<entities::Auction>, StoreError> {
        self.db.get_active_auctions().await
    }
}
