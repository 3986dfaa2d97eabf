//! Bounded snapshot hand-off between the simulation thread and a consumer
//!
//! Wraps a `crossbeam_channel::bounded` queue. `publish` blocks while the
//! queue is full and `take` blocks while it is empty. Dropping either side
//! turns the other side's calls into `SimError::ChannelClosed` instead of
//! blocking forever; a consumer still drains what was queued before the
//! producer left.

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::SimError;
use super::snapshot::Snapshot;

/// Snapshots buffered before the producer blocks
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Clone)]
pub struct SnapshotSender {
    inner: Sender<Snapshot>,
}

pub struct SnapshotReceiver {
    inner: Receiver<Snapshot>,
}

pub fn snapshot_channel(capacity: usize) -> (SnapshotSender, SnapshotReceiver) {
    let (tx, rx) = bounded(capacity);
    (SnapshotSender { inner: tx }, SnapshotReceiver { inner: rx })
}

impl SnapshotSender {
    /// Block until there is room, then enqueue
    pub fn publish(&self, snapshot: Snapshot) -> Result<(), SimError> {
        self.inner.send(snapshot).map_err(|_| SimError::ChannelClosed)
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

impl SnapshotReceiver {
    /// Block until a snapshot is available
    pub fn take(&self) -> Result<Snapshot, SimError> {
        self.inner.recv().map_err(|_| SimError::ChannelClosed)
    }

    /// Non-blocking take, `None` when nothing is queued right now
    pub fn try_take(&self) -> Option<Snapshot> {
        self.inner.try_recv().ok()
    }

    pub fn pending(&self) -> usize {
        self.inner.len()
    }

    /// Blocking iterator that ends once the producer is gone and the queue is empty
    pub fn iter(&self) -> impl Iterator<Item = Snapshot> + '_ {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn snap(tick: u64) -> Snapshot {
        Snapshot { tick, positions: vec![[0.0; 3]], speeds: vec![0.0] }
    }

    #[test]
    fn producer_blocks_when_full() {
        let (tx, rx) = snapshot_channel(2);
        tx.publish(snap(0)).unwrap();
        tx.publish(snap(1)).unwrap();
        assert!(tx.is_full());

        let handle = thread::spawn(move || {
            tx.publish(snap(2)).unwrap();
        });
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        assert_eq!(rx.pending(), 2);

        assert_eq!(rx.take().unwrap().tick, 0);
        handle.join().unwrap();
        assert_eq!(rx.take().unwrap().tick, 1);
        assert_eq!(rx.take().unwrap().tick, 2);
    }

    #[test]
    fn consumer_drains_then_sees_close() {
        let (tx, rx) = snapshot_channel(DEFAULT_CAPACITY);
        for k in 0..3 {
            tx.publish(snap(k)).unwrap();
        }
        drop(tx);

        let ticks: Vec<u64> = rx.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!(rx.take(), Err(SimError::ChannelClosed));
    }

    #[test]
    fn try_take_never_blocks() {
        let (tx, rx) = snapshot_channel(2);
        assert!(rx.try_take().is_none());

        tx.publish(snap(4)).unwrap();
        assert_eq!(rx.try_take().map(|s| s.tick), Some(4));
        assert!(rx.try_take().is_none());

        drop(tx);
        assert!(rx.try_take().is_none());
    }

    #[test]
    fn publish_fails_once_consumer_is_gone() {
        let (tx, rx) = snapshot_channel(1);
        drop(rx);
        assert_eq!(tx.publish(snap(0)), Err(SimError::ChannelClosed));
    }
}
