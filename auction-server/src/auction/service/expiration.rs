use {
    crate::{
        auction::{
            entities,
            repository::Repository,
        },
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
    },
    std::{
        cmp::Reverse,
        collections::BinaryHeap,
        sync::{
            atomic::Ordering,
            Arc,
        },
    },
    tokio::{
        sync::mpsc,
        time::Instant,
    },
    tokio_util::task::TaskTracker,
};

/// An armed timer: close `auction_id` once `deadline` is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledExpiration {
    pub deadline:   Instant,
    pub auction_id: entities::AuctionId,
}

impl Ord for ScheduledExpiration {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then_with(|| self.auction_id.cmp(&other.auction_id))
    }
}

impl PartialOrd for ScheduledExpiration {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Expiration loop is not running")]
pub struct ExpirationLoopStopped;

/// Handle to the expiration loop.
///
/// All armed timers live in a single min-heap owned by the loop, which sleeps until the
/// earliest deadline. Due auctions are closed in their own tasks so a slow store never
/// holds back the next deadline.
#[derive(Debug)]
pub struct ExpirationQueue {
    sender: mpsc::UnboundedSender<ScheduledExpiration>,
}

impl ExpirationQueue {
    pub fn start(repo: Arc<Repository>, task_tracker: TaskTracker) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        task_tracker.spawn(run_expiration_loop(receiver, repo, task_tracker.clone()));
        Self { sender }
    }

    /// A handle whose loop has already exited, as it is after shutdown.
    #[cfg(test)]
    pub fn stopped() -> Self {
        let (sender, _) = mpsc::unbounded_channel();
        Self { sender }
    }

    /// False once the loop has exited; nothing pushed after that is ever closed.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }

    pub fn push(&self, expiration: ScheduledExpiration) -> Result<(), ExpirationLoopStopped> {
        self.sender
            .send(expiration)
            .map_err(|_| ExpirationLoopStopped)
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
async fn expire_auction(repo: Arc<Repository>, auction_id: entities::AuctionId) {
    match repo.conclude_auction(&auction_id).await {
        Ok(true) => tracing::info!("Auction expired"),
        Ok(false) => tracing::debug!("Auction was already completed"),
        Err(e) => tracing::error!(error = ?e, "Failed to close expired auction"),
    }
}

async fn run_expiration_loop(
    mut receiver: mpsc::UnboundedReceiver<ScheduledExpiration>,
    repo: Arc<Repository>,
    task_tracker: TaskTracker,
) {
    tracing::info!("Starting expiration loop...");
    let mut queue: BinaryHeap<Reverse<ScheduledExpiration>> = BinaryHeap::new();
    let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);
    let mut receiving = true;

    while !SHOULD_EXIT.load(Ordering::Acquire) {
        let next_deadline = queue.peek().map(|Reverse(expiration)| expiration.deadline);
        tokio::select! {
            expiration = receiver.recv(), if receiving => {
                match expiration {
                    Some(expiration) => queue.push(Reverse(expiration)),
                    None => receiving = false,
                }
            }
            _ = sleep_until_deadline(next_deadline) => {
                let now = Instant::now();
                while queue
                    .peek()
                    .is_some_and(|Reverse(expiration)| expiration.deadline <= now)
                {
                    if let Some(Reverse(expiration)) = queue.pop() {
                        task_tracker.spawn(expire_auction(repo.clone(), expiration.auction_id));
                    }
                }
            }
            _ = exit_check_interval.tick() => {}
        }

        if !receiving && queue.is_empty() {
            break;
        }
    }
    tracing::info!(
        pending_expirations = queue.len(),
        "Shutting down expiration loop..."
    );
}
