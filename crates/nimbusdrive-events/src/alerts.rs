//! Alert inbox
//!
//! [`AlertInbox`] is a listener that retains account alerts beyond the
//! callbacks that deliver them. The engine owns every delivered list and
//! reclaims it when the callback returns, so the inbox clones each alert
//! it keeps. Redeliveries of a known alert id replace the stored record
//! (the engine re-sends an alert when its seen/relevance flags change);
//! alerts marked no longer relevant drop out of the inbox.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use nimbusdrive_core::domain::newtypes::AlertId;
use nimbusdrive_core::domain::{Alert, EngineHandle};
use nimbusdrive_core::ports::IGlobalListener;

/// Listener retaining cloned account alerts
#[derive(Default)]
pub struct AlertInbox {
    /// Newest known state per alert id
    alerts: DashMap<AlertId, Alert>,
}

impl AlertInbox {
    /// Creates an empty inbox
    pub fn new() -> Self {
        Self {
            alerts: DashMap::new(),
        }
    }

    /// Returns the retained alert with the given id, if still relevant
    pub fn get(&self, id: AlertId) -> Option<Alert> {
        self.alerts.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns all retained alerts, newest first
    pub fn all(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        alerts.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        alerts
    }

    /// Returns the number of retained alerts
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Returns true if the inbox is empty
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Returns how many retained alerts the user has not seen yet
    pub fn unseen_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|entry| !entry.value().is_seen())
            .count()
    }
}

#[async_trait]
impl IGlobalListener for AlertInbox {
    async fn on_user_alerts_update(&self, _engine: &EngineHandle, alerts: &[Alert]) {
        let mut retained = 0usize;
        let mut dropped = 0usize;

        for alert in alerts {
            if alert.is_relevant() {
                // Clone before the engine reclaims the list.
                self.alerts.insert(alert.id(), alert.clone());
                retained += 1;
            } else {
                self.alerts.remove(&alert.id());
                dropped += 1;
            }
        }

        debug!(
            retained,
            dropped,
            total = self.alerts.len(),
            unseen = self.unseen_count(),
            "Applied alert update"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, Utc};
    use nimbusdrive_core::domain::AlertKind;

    fn alert(raw: u64, kind: AlertKind) -> Alert {
        Alert::new(
            AlertId::new(raw).unwrap(),
            kind,
            format!("alert {raw}"),
            Utc::now() - Duration::seconds(raw as i64),
        )
    }

    #[tokio::test]
    async fn test_alerts_retained_after_delivery() {
        let inbox = AlertInbox::new();
        let engine = EngineHandle::new("test/1.0");

        {
            // Simulates an engine-owned list: it only lives for this scope.
            let delivered = vec![alert(1, AlertKind::NewShare)];
            inbox.on_user_alerts_update(&engine, &delivered).await;
        }

        // The clone is still readable after the source list is gone.
        let kept = inbox.get(AlertId::new(1).unwrap()).unwrap();
        assert_eq!(kept.title(), "alert 1");
        assert_eq!(inbox.len(), 1);
    }

    #[tokio::test]
    async fn test_redelivery_replaces() {
        let inbox = AlertInbox::new();
        let engine = EngineHandle::new("test/1.0");

        inbox
            .on_user_alerts_update(&engine, &[alert(1, AlertKind::PaymentFailed)])
            .await;
        assert_eq!(inbox.unseen_count(), 1);

        let seen = alert(1, AlertKind::PaymentFailed).with_seen(true);
        inbox.on_user_alerts_update(&engine, &[seen]).await;

        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.unseen_count(), 0);
    }

    #[tokio::test]
    async fn test_irrelevant_alert_dropped() {
        let inbox = AlertInbox::new();
        let engine = EngineHandle::new("test/1.0");

        inbox
            .on_user_alerts_update(&engine, &[alert(1, AlertKind::Takedown)])
            .await;
        let superseded = alert(1, AlertKind::Takedown).with_relevant(false);
        inbox.on_user_alerts_update(&engine, &[superseded]).await;

        assert!(inbox.is_empty());
    }

    #[tokio::test]
    async fn test_all_sorted_newest_first() {
        let inbox = AlertInbox::new();
        let engine = EngineHandle::new("test/1.0");

        // alert(raw) timestamps go back `raw` seconds, so id 1 is newest
        inbox
            .on_user_alerts_update(
                &engine,
                &[
                    alert(3, AlertKind::ContactChange),
                    alert(1, AlertKind::NewShare),
                    alert(2, AlertKind::PaymentSucceeded),
                ],
            )
            .await;

        let all = inbox.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id(), AlertId::new(1).unwrap());
        assert_eq!(all[2].id(), AlertId::new(3).unwrap());
    }
}
