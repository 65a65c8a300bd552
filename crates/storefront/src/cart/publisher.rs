//! Replay-latest value streams.
//!
//! A [`Publisher`] holds exactly one current value. Every [`Subscription`]
//! sees that value as soon as it is created and each value published after
//! it. Values published between two reads are coalesced; only the most
//! recent one is retained.

use tokio::sync::watch;

/// Publishing side of a value stream.
#[derive(Debug)]
pub struct Publisher<T> {
    sender: watch::Sender<T>,
}

impl<T> Publisher<T> {
    /// Create a publisher holding an initial value.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            sender: watch::Sender::new(initial),
        }
    }

    /// Replace the current value and notify subscribers.
    ///
    /// Never blocks and succeeds with or without subscribers. Publishing a
    /// value equal to the current one still counts as a change.
    pub fn publish(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Subscribe to this stream.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Receiving side of a value stream.
#[derive(Debug, Clone)]
pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// The current value, without marking it as seen.
    #[must_use]
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Whether a value was published since the last [`Self::latest`] or
    /// [`Self::changed`].
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// The current value, marking it as seen.
    pub fn latest(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next published value.
    ///
    /// Returns `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_sees_current_value_immediately() {
        let publisher = Publisher::new(1);
        publisher.publish(2);

        let subscription = publisher.subscribe();
        assert_eq!(subscription.current(), 2);
        assert!(!subscription.has_changed());
    }

    #[test]
    fn test_only_latest_value_retained() {
        let publisher = Publisher::new(0);
        let mut subscription = publisher.subscribe();

        publisher.publish(1);
        publisher.publish(2);
        assert!(subscription.has_changed());
        assert_eq!(subscription.latest(), 2);
        assert!(!subscription.has_changed());
    }

    #[test]
    fn test_same_value_counts_as_change() {
        let publisher = Publisher::new(true);
        let subscription = publisher.subscribe();

        publisher.publish(true);
        assert!(subscription.has_changed());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = Publisher::new("a".to_string());
        publisher.publish("b".to_string());

        let subscription = publisher.subscribe();
        assert_eq!(subscription.current(), "b");
    }

    #[tokio::test]
    async fn test_changed_delivers_next_value() {
        let publisher = Publisher::new(0_u32);
        let mut subscription = publisher.subscribe();

        let waiter = tokio::spawn(async move { subscription.changed().await });
        tokio::task::yield_now().await;
        publisher.publish(7);

        assert_eq!(waiter.await.ok().flatten(), Some(7));
    }

    #[tokio::test]
    async fn test_changed_ends_when_publisher_dropped() {
        let publisher = Publisher::new(0_u32);
        let mut subscription = publisher.subscribe();
        drop(publisher);

        assert_eq!(subscription.changed().await, None);
    }
}
