use std::fmt::Debug;

mod add_auction;
mod conclude_auction;
mod get_active_auctions;
mod get_auction;
mod in_memory;
mod models;

pub use {
    in_memory::InMemoryDatabase,
    models::*,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An auction with the same id is already stored
    #[error("Auction {0} already exists")]
    DuplicateId(String),
    /// The underlying storage could not complete the operation
    #[error("Auction store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
pub struct Repository {
    pub db: Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self { db: Box::new(db) }
    }
}
