use chrono::Local;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    analytics::{self, AnalyticsConfig},
    models::AnalyticsReport,
    storage::HistoryStore,
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub(crate) fn compute_report(store: &HistoryStore, config: &AnalyticsConfig) -> AnalyticsReport {
    analytics::build_report(&store.get_all(), Local::now().naive_local(), config)
}

/// Recomputes the report on every tick and whenever the store reports a write.
/// The tick covers writes that bypass this process, e.g. another CLI instance
/// sharing the same database.
pub async fn refresh_loop(
    store: HistoryStore,
    config: AnalyticsConfig,
    interval: Duration,
    report_tx: watch::Sender<AnalyticsReport>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut revisions = store.subscribe();

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = revisions.changed() => {
                if changed.is_err() {
                    log_warn!("history store closed; stopping refresh loop");
                    break;
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("refresh loop shutting down");
                break;
            }
        }

        // Store reads go through the blocking SQLite worker.
        let report = {
            let store = store.clone();
            let config = config.clone();
            match tokio::task::spawn_blocking(move || compute_report(&store, &config)).await {
                Ok(report) => report,
                Err(err) => {
                    log_error!("report refresh task failed: {err}");
                    continue;
                }
            }
        };
        if report_tx.send(report).is_err() {
            log_info!("no report subscribers left; stopping refresh loop");
            break;
        }
    }
}
