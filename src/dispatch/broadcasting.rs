//! Best-effort broadcast to every subscriber.

use tracing::{info, warn};

use super::{ChatGateway, TextFormat};

/// Per-recipient outcome of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of chats the message reached.
    pub delivered: usize,

    /// Chats that failed, with the error text.
    pub failed: Vec<(i64, String)>,
}

impl BroadcastReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.delivered + self.failed.len()
    }
}

/// Sends `text` to every recipient, continuing past failures.
///
/// The caller is responsible for checking that `sender_id` may broadcast.
pub async fn broadcast<G: ChatGateway>(
    gateway: &G,
    sender_id: i64,
    recipients: &[i64],
    text: &str,
) -> BroadcastReport {
    info!(
        "Broadcast from {} to {} subscribers",
        sender_id,
        recipients.len()
    );

    let mut report = BroadcastReport::default();

    for &chat_id in recipients {
        match gateway.send_text(chat_id, text, TextFormat::Plain).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                warn!("Failed to send broadcast to {}: {}", chat_id, e);
                report.failed.push((chat_id, e.to_string()));
            }
        }
    }

    info!(
        "Broadcast finished: {}/{} delivered",
        report.delivered,
        report.total()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::testing::{RecordingGateway, Sent};

    #[tokio::test]
    async fn test_broadcast_reaches_everyone() {
        let gateway = RecordingGateway::default();
        let report = broadcast(&gateway, 1, &[10, 20, 30], "hello").await;

        assert_eq!(report.delivered, 3);
        assert!(report.failed.is_empty());
        assert_eq!(
            gateway.sent(),
            vec![
                Sent::text(10, "hello", TextFormat::Plain),
                Sent::text(20, "hello", TextFormat::Plain),
                Sent::text(30, "hello", TextFormat::Plain),
            ]
        );
    }

    #[tokio::test]
    async fn test_broadcast_continues_after_failure() {
        let gateway = RecordingGateway::failing_for([20]);
        let report = broadcast(&gateway, 1, &[10, 20, 30], "hello").await;

        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 20);
        assert_eq!(report.total(), 3);
        assert_eq!(gateway.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_broadcast_to_nobody() {
        let gateway = RecordingGateway::default();
        let report = broadcast(&gateway, 1, &[], "hello").await;
        assert_eq!(report, BroadcastReport::default());
    }
}
