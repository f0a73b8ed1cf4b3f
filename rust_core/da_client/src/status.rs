use log::info;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const MIN_STATUS_PERIOD: Duration = Duration::from_millis(1);

/// Log a waiting line every `period` for the lifetime of the runtime.
/// Periods shorter than [`MIN_STATUS_PERIOD`] are raised to it.
pub fn spawn_status_loop(period: Duration) -> JoinHandle<()> {
    let period = period.max(MIN_STATUS_PERIOD);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            info!("Waiting for Data to be submitted");
        }
    })
}
