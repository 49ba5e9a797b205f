use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::{analytics::AnalyticsConfig, models::AnalyticsReport, storage::HistoryStore};

use super::loop_worker::{compute_report, refresh_loop};

pub struct HistoryWatcher {
    store: HistoryStore,
    config: AnalyticsConfig,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    report_rx: Option<watch::Receiver<AnalyticsReport>>,
}

impl HistoryWatcher {
    pub fn new(store: HistoryStore, config: AnalyticsConfig) -> Self {
        Self {
            store,
            config,
            handle: None,
            cancel_token: None,
            report_rx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawns the refresh loop. The returned receiver already holds a report
    /// for the current history.
    pub fn start(&mut self, interval: Duration) -> Result<watch::Receiver<AnalyticsReport>> {
        if self.handle.is_some() {
            bail!("history watcher already running");
        }
        if interval.is_zero() {
            bail!("refresh interval must be greater than zero");
        }

        let initial = compute_report(&self.store, &self.config);
        let (report_tx, report_rx) = watch::channel(initial);

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(refresh_loop(
            self.store.clone(),
            self.config.clone(),
            interval,
            report_tx,
            cancel_token.clone(),
        ));

        info!("History watcher started ({}s interval)", interval.as_secs());
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.report_rx = Some(report_rx.clone());
        Ok(report_rx)
    }

    /// Latest report, if the watcher has been started.
    pub fn latest(&self) -> Option<AnalyticsReport> {
        self.report_rx.as_ref().map(|rx| rx.borrow().clone())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.report_rx = None;

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("refresh loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{models::NewClassification, storage::MemoryMedium, utils::dates};

    fn entry(waste_type: &str) -> NewClassification {
        NewClassification {
            item: "thing".into(),
            waste_type: waste_type.into(),
            confidence: 88.0,
            date: dates::today(),
            time: "09:15 AM".into(),
            image: None,
            description: None,
            location: None,
            disposal_method: None,
        }
    }

    #[tokio::test]
    async fn refreshes_after_store_writes() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::new()));
        let mut watcher = HistoryWatcher::new(store.clone(), AnalyticsConfig::default());

        let mut reports = watcher.start(Duration::from_secs(3600)).unwrap();
        assert_eq!(reports.borrow().statistics.total, 0);

        store.add(entry("Plastic"));
        store.add(entry("General"));

        let report = tokio::time::timeout(
            Duration::from_secs(5),
            reports.wait_for(|report| report.statistics.total == 2),
        )
        .await
        .expect("report refreshed in time")
        .unwrap()
        .clone();

        assert_eq!(report.statistics.classifications_today, 2);
        assert_eq!(report.statistics.recycling_rate, 50);
        watcher.stop().await.unwrap();
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn rejects_double_start() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::new()));
        let mut watcher = HistoryWatcher::new(store, AnalyticsConfig::default());

        watcher.start(Duration::from_secs(60)).unwrap();
        assert!(watcher.start(Duration::from_secs(60)).is_err());
        assert!(watcher.latest().is_some());

        watcher.stop().await.unwrap();
        assert!(watcher.latest().is_none());
    }

    #[tokio::test]
    async fn stop_without_start_is_noop() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::new()));
        let mut watcher = HistoryWatcher::new(store, AnalyticsConfig::default());
        watcher.stop().await.unwrap();
    }
}
