use {
    super::{
        expiration::{
            ExpirationLoopStopped,
            ScheduledExpiration,
        },
        Service,
    },
    crate::{
        auction::entities,
        config::ConfigError,
    },
    time::OffsetDateTime,
    tokio::time::Instant,
};

pub struct ScheduleExpirationInput {
    pub auction: entities::Auction,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleExpirationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Expiry of auction starting at {start_time} is out of range")]
    ExpiryOutOfRange { start_time: OffsetDateTime },
    #[error(transparent)]
    Stopped(#[from] ExpirationLoopStopped),
}

impl Service {
    /// Arms the timer that completes the auction at `start_time + duration`. The duration
    /// is read here, once; it is not read again when the timer fires.
    ///
    /// Returns the expiry instant. A failure means no timer was armed and the auction stays
    /// active until closed by other means.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction.id, expiry_time))]
    pub fn schedule_expiration(
        &self,
        input: ScheduleExpirationInput,
    ) -> Result<OffsetDateTime, ScheduleExpirationError> {
        let minutes = self.config.duration_source.get_duration_minutes()?;
        let out_of_range = || ScheduleExpirationError::ExpiryOutOfRange {
            start_time: input.auction.start_time,
        };
        let expiry_time = i64::try_from(minutes)
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .map(time::Duration::seconds)
            .and_then(|duration| input.auction.expiry_time(duration))
            .ok_or_else(out_of_range)?;
        tracing::Span::current().record("expiry_time", tracing::field::display(expiry_time));

        // Negative means the auction is already past its expiry.
        let remaining = std::time::Duration::try_from(expiry_time - OffsetDateTime::now_utc())
            .unwrap_or_default();
        let deadline = Instant::now()
            .checked_add(remaining)
            .ok_or_else(out_of_range)?;
        self.expiration_queue.push(ScheduledExpiration {
            deadline,
            auction_id: input.auction.id,
        })?;
        tracing::debug!(remaining = ?remaining, "Auction expiration scheduled");
        Ok(expiry_time)
    }
}
