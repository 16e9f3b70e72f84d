use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use med_guide_domain::services::MedicationServiceTrait;

/// Periodically drop expired cache entries until the task is aborted
pub fn spawn_cache_sweeper(
    service: Arc<dyn MedicationServiceTrait>,
    every: Duration,
) -> JoinHandle<()> {
    info!("Sweeping expired cache entries every {:?}", every);

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = service.purge_expired();
            if removed > 0 {
                debug!("Removed {} expired cache entries", removed);
            }
        }
    })
}
