use {
    crate::{
        auction::{
            repository::InMemoryDatabase,
            service::{
                Config,
                Service,
            },
        },
        config::{
            EnvDuration,
            RunOptions,
        },
        kernel::db,
    },
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

async fn setup_service(
    run_options: &RunOptions,
    task_tracker: TaskTracker,
) -> anyhow::Result<Service> {
    let config = Config {
        duration_source: Arc::new(EnvDuration::new(
            run_options.auction.auction_duration.clone(),
        )),
    };

    match &run_options.server.database_url {
        Some(database_url) => {
            let pool = db::connect(
                database_url,
                run_options.server.database_max_connections,
            )
            .await?;
            tracing::info!("Connected to the auction database");
            Ok(Service::new(pool, config, task_tracker))
        }
        None => {
            tracing::warn!("No database url configured, auctions are kept in memory only");
            Ok(Service::new(InMemoryDatabase::default(), config, task_tracker))
        }
    }
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let task_tracker = TaskTracker::new();
    let service = setup_service(&run_options, task_tracker.clone()).await?;

    if run_options.auction.rearm_on_startup {
        let scheduled = service.rearm_active_auctions().await?;
        tracing::info!(scheduled, "Re-armed expiration of active auctions");
    } else {
        tracing::info!("Active auctions from previous runs are not re-armed");
    }

    let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);
    while !SHOULD_EXIT.load(Ordering::Acquire) {
        exit_check_interval.tick().await;
    }

    // Wait for the expiration loop and any in-flight close to finish.
    task_tracker.close();
    task_tracker.wait().await;
    tracing::info!("Server stopped");
    Ok(())
}

// Set once by the shutdown signal handler. Both the wait loop in `start_server` and the
// expiration loop poll it every `EXIT_CHECK_INTERVAL`; once the expiration loop exits, new
// auctions are refused.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
