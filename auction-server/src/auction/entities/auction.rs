use {
    strum::Display,
    time::{
        Duration,
        OffsetDateTime,
    },
    uuid::Uuid,
};

pub type AuctionId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

/// Status only ever moves from `Active` to `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:           AuctionId,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
    pub status:       AuctionStatus,
    pub start_time:   OffsetDateTime,
}

/// Everything a caller provides to open a new auction.
#[derive(Clone, Debug)]
pub struct AuctionDraft {
    /// Generated when not provided.
    pub id:           Option<AuctionId>,
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
    /// Defaults to the creation time.
    pub start_time:   Option<OffsetDateTime>,
}

impl Auction {
    /// `start_time` is truncated to whole seconds, the precision it is stored with.
    pub fn new(draft: AuctionDraft, now: OffsetDateTime) -> Self {
        let start_time = draft.start_time.unwrap_or(now);
        Self {
            id:           draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            product_name: draft.product_name,
            category:     draft.category,
            description:  draft.description,
            condition:    draft.condition,
            status:       AuctionStatus::Active,
            start_time:   start_time.replace_nanosecond(0).unwrap_or(start_time),
        }
    }

    /// The instant at which the auction closes on its own, or `None` when it
    /// falls outside the representable date range.
    pub fn expiry_time(&self, duration: Duration) -> Option<OffsetDateTime> {
        self.start_time.checked_add(duration)
    }

    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::macros::datetime,
    };

    fn draft() -> AuctionDraft {
        AuctionDraft {
            id:           None,
            product_name: "Vintage camera".to_string(),
            category:     "Photography".to_string(),
            description:  "Rangefinder, fully working".to_string(),
            condition:    ProductCondition::Used,
            start_time:   None,
        }
    }

    #[test]
    fn test_new_auction_is_active_and_starts_now() {
        let now = datetime!(2026-10-17 12:00 UTC);
        let auction = Auction::new(draft(), now);

        assert!(auction.is_active());
        assert_eq!(auction.start_time, now);
        assert!(Uuid::parse_str(&auction.id).is_ok());
    }

    #[test]
    fn test_new_auction_keeps_caller_id_and_start_time() {
        let start_time = datetime!(2026-10-17 11:30 UTC);
        let auction = Auction::new(
            AuctionDraft {
                id: Some("auction-001".to_string()),
                start_time: Some(start_time),
                ..draft()
            },
            datetime!(2026-10-17 12:00 UTC),
        );

        assert_eq!(auction.id, "auction-001");
        assert_eq!(auction.start_time, start_time);
    }

    #[test]
    fn test_new_auction_start_time_has_second_precision() {
        let auction = Auction::new(draft(), datetime!(2026-10-17 12:00:05.750 UTC));
        assert_eq!(auction.start_time, datetime!(2026-10-17 12:00:05 UTC));
        assert_eq!(auction.start_time.nanosecond(), 0);

        let auction = Auction::new(
            AuctionDraft {
                start_time: Some(datetime!(2026-10-17 11:59:59.999999999 UTC)),
                ..draft()
            },
            datetime!(2026-10-17 12:00 UTC),
        );
        assert_eq!(auction.start_time, datetime!(2026-10-17 11:59:59 UTC));
    }

    #[test]
    fn test_expiry_time() {
        let auction = Auction::new(draft(), datetime!(2026-10-17 12:00 UTC));

        assert_eq!(
            auction.expiry_time(Duration::minutes(90)),
            Some(datetime!(2026-10-17 13:30 UTC))
        );
        assert_eq!(auction.expiry_time(Duration::MAX), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AuctionStatus::Completed.to_string(), "completed");
        assert_eq!(ProductCondition::Refurbished.to_string(), "refurbished");
    }
}
