// Order Channel - unbounded FIFO hand-off from many customers to one barista

use crate::domain::Order;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::trace;

/// Channel errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The read end is gone; nobody will ever take this order
    #[error("order receiver has been dropped")]
    ReceiverGone,

    /// Every write end is gone and the queue is drained
    #[error("all order senders have been dropped")]
    SendersGone,
}

/// Create a fresh order channel.
///
/// Orders are delivered in exactly the order `send` was called, with no
/// loss or duplication. `OrderSender` can be cloned for every customer;
/// `OrderReceiver` cannot, which keeps the single-consumer invariant in
/// the type system.
pub fn order_channel() -> (OrderSender, OrderReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OrderSender { tx }, OrderReceiver { rx })
}

/// Write end
#[derive(Clone)]
pub struct OrderSender {
    tx: mpsc::UnboundedSender<Order>,
}

impl OrderSender {
    /// Append an order to the tail of the queue (never blocks)
    pub fn send(&self, order: Order) -> Result<(), ChannelError> {
        trace!(customer_id = %order.customer_id(), "Order enqueued");
        self.tx.send(order).map_err(|_| ChannelError::ReceiverGone)
    }

    /// True once the read end is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read end
pub struct OrderReceiver {
    rx: mpsc::UnboundedReceiver<Order>,
}

impl OrderReceiver {
    /// Take the head order, suspending while the queue is empty.
    ///
    /// Cancel safe: dropping the future before it completes loses no order.
    pub async fn receive(&mut self) -> Result<Order, ChannelError> {
        self.rx.recv().await.ok_or(ChannelError::SendersGone)
    }

    /// Take the head order if one is queued
    pub fn try_receive(&mut self) -> Option<Order> {
        self.rx.try_recv().ok()
    }

    /// Orders sent but not yet received
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CustomerId;
    use tokio::task::JoinSet;
    use tokio_test::{assert_pending, assert_ready_ok, task};

    fn order(id: u32) -> Order {
        Order::for_customer(CustomerId::new(id).unwrap())
    }

    #[tokio::test]
    async fn test_single_sender_fifo() {
        let (tx, mut rx) = order_channel();
        for id in 1..=10 {
            tx.send(order(id)).unwrap();
        }
        assert_eq!(rx.pending(), 10);

        for id in 1..=10 {
            assert_eq!(rx.receive().await.unwrap().customer_id().get(), id);
        }
        assert_eq!(rx.pending(), 0);
        assert!(rx.try_receive().is_none());
    }

    #[test]
    fn test_receive_suspends_until_send() {
        let (tx, mut rx) = order_channel();
        let mut receive = task::spawn(rx.receive());

        assert_pending!(receive.poll());

        tx.send(order(4)).unwrap();
        assert!(receive.is_woken());
        let received = assert_ready_ok!(receive.poll());
        assert_eq!(received, order(4));
    }

    #[tokio::test]
    async fn test_senders_gone_after_drain() {
        let (tx, mut rx) = order_channel();
        tx.send(order(1)).unwrap();
        drop(tx);

        assert_eq!(rx.receive().await.unwrap(), order(1));
        assert_eq!(rx.receive().await, Err(ChannelError::SendersGone));
    }

    #[tokio::test]
    async fn test_send_fails_without_receiver() {
        let (tx, rx) = order_channel();
        assert!(!tx.is_closed());
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.send(order(1)), Err(ChannelError::ReceiverGone));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_senders_keep_per_sender_order() {
        // Customer ids encode (sender, sequence) so each sender's run can be checked
        const SENDERS: u32 = 8;
        const PER_SENDER: u32 = 250;

        let (tx, mut rx) = order_channel();
        let mut senders = JoinSet::new();
        for s in 0..SENDERS {
            let tx = tx.clone();
            senders.spawn(async move {
                for seq in 0..PER_SENDER {
                    tx.send(order(s * PER_SENDER + seq + 1)).unwrap();
                    if seq % 16 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            });
        }
        drop(tx);
        while let Some(joined) = senders.join_next().await {
            joined.unwrap();
        }

        let mut last_seen = vec![None::<u32>; SENDERS as usize];
        let mut total = 0;
        while let Ok(o) = rx.receive().await {
            let raw = o.customer_id().get() - 1;
            let (sender, seq) = ((raw / PER_SENDER) as usize, raw % PER_SENDER);
            if let Some(prev) = last_seen[sender] {
                assert!(seq > prev, "sender {} reordered: {} after {}", sender, seq, prev);
            }
            last_seen[sender] = Some(seq);
            total += 1;
        }
        assert_eq!(total, SENDERS * PER_SENDER, "no loss, no duplication");
    }
}
