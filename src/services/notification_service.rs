use log::debug;
use tokio::sync::mpsc;

use crate::domain::Notification;

/// Receives one-shot user feedback from the sync layer.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to a receiver, typically the terminal view.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Receiver gone means the view was torn down
        if self.sender.send(notification).is_err() {
            debug!("Dropping notification, no listener");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();

        notifier.notify(Notification::fetch_failed());
        notifier.notify(Notification::news_updated());

        assert_eq!(rx.try_recv().unwrap(), Notification::fetch_failed());
        assert_eq!(rx.try_recv().unwrap(), Notification::news_updated());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);

        notifier.notify(Notification::refresh_failed());
    }
}
