use {
    super::{
        expiration::ExpirationLoopStopped,
        schedule_expiration::{
            ScheduleExpirationError,
            ScheduleExpirationInput,
        },
        Service,
    },
    crate::auction::{
        entities,
        repository::StoreError,
    },
    time::OffsetDateTime,
};

pub struct CreateAuctionInput {
    pub draft: entities::AuctionDraft,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreateAuctionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    ExpirationStopped(#[from] ExpirationLoopStopped),
}

impl Service {
    /// Stores a new active auction and schedules its expiration.
    ///
    /// Returns as soon as the auction is stored; the caller never waits for the expiry.
    /// Nothing is stored once the expiration loop has shut down, and nothing is scheduled
    /// when storing fails. A bad duration setting is logged and does not fail the creation.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn create_auction(
        &self,
        input: CreateAuctionInput,
    ) -> Result<entities::Auction, CreateAuctionError> {
        let auction = entities::Auction::new(input.draft, OffsetDateTime::now_utc());
        tracing::Span::current().record("auction_id", auction.id.as_str());

        if !self.expiration_queue.is_running() {
            tracing::error!("Expiration loop is not running, auction not created");
            return Err(ExpirationLoopStopped.into());
        }

        self.repo.add_auction(&auction).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to insert auction");
            e
        })?;

        match self.schedule_expiration(ScheduleExpirationInput {
            auction: auction.clone(),
        }) {
            Ok(expiry_time) => {
                tracing::info!(expiry_time = %expiry_time, "Auction created");
            }
            // The loop stopped between the check and the push. The record stays active
            // until `rearm_active_auctions` picks it up on the next start.
            Err(ScheduleExpirationError::Stopped(e)) => {
                tracing::error!(error = %e, "Expiration loop stopped while creating auction");
                return Err(e.into());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to schedule auction expiration");
            }
        }
        Ok(auction)
    }
}
