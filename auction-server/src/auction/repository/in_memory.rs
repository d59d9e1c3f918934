use {
    super::{
        Database,
        StoreError,
    },
    crate::auction::entities,
    async_trait::async_trait,
    std::collections::HashMap,
    tokio::sync::RwLock,
};

/// Process-local auction store. Every write takes the same lock, so the
/// conditional close is a single step as seen by other callers.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    auctions: RwLock<HashMap<entities::AuctionId, entities::Auction>>,
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(StoreError::DuplicateId(auction.id.clone()));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn conclude_auction(&self, auction_id: &entities::AuctionId) -> Result<bool, StoreError> {
        let mut auctions = self.auctions.write().await;
        match auctions.get_mut(auction_id) {
            Some(auction) if auction.is_active() => {
                auction.status = entities::AuctionStatus::Completed;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<Option<entities::Auction>, StoreError> {
        Ok(self.auctions.read().await.get(auction_id).cloned())
    }

    async fn get_active_auctions(&self) -> Result<Vec<entities::Auction>, StoreError> {
        let mut auctions: Vec<entities::Auction> = self
            .auctions
            .read()
            .await
            .values()
            .filter(|auction| auction.is_active())
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.start_time);
        Ok(auctions)
    }
}
