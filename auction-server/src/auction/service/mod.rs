use {
    super::repository::{
        Database,
        Repository,
    },
    crate::config::DurationSource,
    expiration::ExpirationQueue,
    std::sync::Arc,
    tokio_util::task::TaskTracker,
};

pub mod close_auction;
pub mod create_auction;
pub mod expiration;
pub mod get_auction_by_id;
pub mod rearm_active_auctions;
pub mod schedule_expiration;

pub struct Config {
    /// Read once for every auction that gets scheduled.
    pub duration_source: Arc<dyn DurationSource>,
}

pub struct ServiceInner {
    config:           Config,
    repo:             Arc<Repository>,
    expiration_queue: ExpirationQueue,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    /// Starts the expiration loop on `task_tracker`, so it must be called from within a
    /// tokio runtime.
    pub fn new(db: impl Database, config: Config, task_tracker: TaskTracker) -> Self {
        let repo = Arc::new(Repository::new(db));
        let expiration_queue = ExpirationQueue::start(repo.clone(), task_tracker);
        Self(Arc::new(ServiceInner {
            config,
            repo,
            expiration_queue,
        }))
    }
}
