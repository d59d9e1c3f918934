use {
    super::{
        schedule_expiration::ScheduleExpirationInput,
        Service,
    },
    crate::auction::repository::StoreError,
};

impl Service {
    /// Timers only live in memory, so auctions that were active when the process stopped
    /// never complete on their own. This schedules every one of them again; the ones already
    /// past their expiry are closed right away.
    ///
    /// Returns the number of auctions scheduled.
    #[tracing::instrument(skip_all, fields(active_auctions, scheduled))]
    pub async fn rearm_active_auctions(&self) -> Result<usize, StoreError> {
        let auctions = self.repo.get_active_auctions().await?;
        tracing::Span::current().record("active_auctions", auctions.len());

        let mut scheduled = 0;
        for auction in auctions {
            let auction_id = auction.id.clone();
            match self.schedule_expiration(ScheduleExpirationInput { auction }) {
                Ok(_) => scheduled += 1,
                Err(e) => tracing::error!(
                    error = %e,
                    auction_id = %auction_id,
                    "Failed to schedule auction expiration"
                ),
            }
        }
        tracing::Span::current().record("scheduled", scheduled);
        Ok(scheduled)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities,
                repository::{
                    Database,
                    InMemoryDatabase,
                    MockDatabase,
                },
                service::{
                    get_auction_by_id::GetAuctionByIdInput,
                    tests::draft,
                },
            },
            config::{
                EnvDuration,
                FixedDuration,
            },
        },
        std::time::Duration,
        time::{
            Duration as TimeDuration,
            OffsetDateTime,
        },
    };

    async fn status(service: &Service, id: &str) -> entities::AuctionStatus {
        service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: id.to_string(),
            })
            .await
            .unwrap()
            .unwrap()
            .status
    }

    fn auction_started_ago(id: &str, minutes: i64) -> entities::Auction {
        let now = OffsetDateTime::now_utc();
        entities::Auction::new(
            entities::AuctionDraft {
                start_time: Some(now - TimeDuration::minutes(minutes)),
                ..draft(id)
            },
            now,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_closes_overdue_and_schedules_pending() {
        // Records left behind by a previous process, with no timer armed.
        let db = InMemoryDatabase::default();
        db.add_auction(&auction_started_ago("overdue", 30))
            .await
            .unwrap();
        db.add_auction(&auction_started_ago("pending", 5))
            .await
            .unwrap();
        db.add_auction(&auction_started_ago("closed", 30))
            .await
            .unwrap();
        db.conclude_auction(&"closed".to_string()).await.unwrap();

        let service = Service::new_with_duration(db, FixedDuration::from_minutes(10).unwrap());
        assert_eq!(service.rearm_active_auctions().await, Ok(2));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            status(&service, "overdue").await,
            entities::AuctionStatus::Completed
        );
        assert_eq!(
            status(&service, "pending").await,
            entities::AuctionStatus::Active
        );

        tokio::time::sleep(Duration::from_secs(5 * 60 + 1)).await;
        assert_eq!(
            status(&service, "pending").await,
            entities::AuctionStatus::Completed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_with_invalid_duration_schedules_nothing() {
        let db = InMemoryDatabase::default();
        db.add_auction(&auction_started_ago("overdue", 30))
            .await
            .unwrap();

        let service = Service::new_with_duration(db, EnvDuration::new(None));
        assert_eq!(service.rearm_active_auctions().await, Ok(0));

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(
            status(&service, "overdue").await,
            entities::AuctionStatus::Active
        );
    }

    #[tokio::test]
    async fn test_rearm_surfaces_store_errors() {
        let mut db = MockDatabase::new();
        db.expect_get_active_auctions()
            .times(1)
            .returning(|| Err(StoreError::Unavailable("connection refused".to_string())));

        let service = Service::new_with_duration(db, FixedDuration::from_minutes(1).unwrap());
        assert_eq!(
            service.rearm_active_auctions().await,
            Err(StoreError::Unavailable("connection refused".to_string()))
        );
    }
}
