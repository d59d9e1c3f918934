#[cfg(test)]
use mockall::automock;
use {
    clap::Args,
    std::num::NonZeroU64,
};

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct Options {
    /// Duration of every auction, in minutes. The value is validated each time an
    /// auction is scheduled, not when the server starts.
    #[arg(long = "auction-duration")]
    #[arg(env = "AUCTION_DURATION")]
    pub auction_duration: Option<String>,

    /// Schedule the expiration of every auction that is still active when the server starts.
    /// Auctions whose expiry already passed are closed right away.
    #[arg(long = "rearm-on-startup")]
    #[arg(env = "REARM_ON_STARTUP")]
    pub rearm_on_startup: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Auction duration is not set")]
    Missing,
    #[error("Auction duration must be a positive number of minutes, got {0:?}")]
    Invalid(String),
}

/// Source of the auction duration.
#[cfg_attr(test, automock)]
pub trait DurationSource: Send + Sync + 'static {
    fn get_duration_minutes(&self) -> Result<u64, ConfigError>;
}

/// Duration taken from the `AUCTION_DURATION` setting as it was given at startup.
#[derive(Clone, Debug)]
pub struct EnvDuration {
    raw: Option<String>,
}

impl EnvDuration {
    pub fn new(raw: Option<String>) -> Self {
        Self { raw }
    }
}

impl DurationSource for EnvDuration {
    fn get_duration_minutes(&self) -> Result<u64, ConfigError> {
        let raw = self.raw.as_deref().ok_or(ConfigError::Missing)?;
        match raw.trim().parse::<u64>() {
            Ok(minutes) if minutes > 0 => Ok(minutes),
            _ => Err(ConfigError::Invalid(raw.to_string())),
        }
    }
}

/// A duration that is known to be valid up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDuration(pub NonZeroU64);

impl FixedDuration {
    /// `None` for zero minutes.
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        NonZeroU64::new(minutes).map(Self)
    }
}

impl DurationSource for FixedDuration {
    fn get_duration_minutes(&self) -> Result<u64, ConfigError> {
        Ok(self.0.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_duration() {
        assert_eq!(
            EnvDuration::new(Some("20".to_string())).get_duration_minutes(),
            Ok(20)
        );
        assert_eq!(
            EnvDuration::new(Some(" 5 ".to_string())).get_duration_minutes(),
            Ok(5)
        );
    }

    #[test]
    fn test_env_duration_missing() {
        assert_eq!(
            EnvDuration::new(None).get_duration_minutes(),
            Err(ConfigError::Missing)
        );
    }

    #[test]
    fn test_env_duration_invalid() {
        for raw in ["", "abc", "0", "-3", "1.5"] {
            assert_eq!(
                EnvDuration::new(Some(raw.to_string())).get_duration_minutes(),
                Err(ConfigError::Invalid(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_fixed_duration() {
        assert_eq!(FixedDuration::from_minutes(0), None);
        let duration = FixedDuration::from_minutes(45).unwrap();
        assert_eq!(duration.get_duration_minutes(), Ok(45));
        assert_eq!(duration.get_duration_minutes(), Ok(45));
    }
}
