//! # Pre-Ready Operation Queue
//!
//! Operations issued against an adapter while its backend is still
//! initializing are recorded here and replayed once, in FIFO order, when the
//! backend becomes ready. After that single drain the queue is retired:
//! adapters apply later operations directly, and any attempt to enqueue is
//! rejected.

use crate::adapter::{MediaMethod, PropertyWrite};
use std::collections::VecDeque;
use tracing::debug;

/// One queued operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingOp {
    Set(PropertyWrite),
    Call(MediaMethod),
}

/// FIFO queue with drain-exactly-once semantics.
#[derive(Debug, Default)]
pub struct PendingOps {
    queue: VecDeque<PendingOp>,
    drained: bool,
}

impl PendingOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an operation. Returns `false` (and drops the operation) if
    /// the queue was already drained.
    pub fn push(&mut self, op: PendingOp) -> bool {
        if self.drained {
            debug!(?op, "operation received after queue drain was dropped");
            return false;
        }
        self.queue.push_back(op);
        true
    }

    /// Take every queued operation in FIFO order and retire the queue.
    /// A second drain yields nothing.
    pub fn drain(&mut self) -> Vec<PendingOp> {
        if self.drained {
            return Vec::new();
        }
        self.drained = true;
        self.queue.drain(..).collect()
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_fifo_order() {
        let mut ops = PendingOps::new();
        assert!(ops.push(PendingOp::Set(PropertyWrite::Src("a.m3u8".into()))));
        assert!(ops.push(PendingOp::Set(PropertyWrite::Volume(0.5))));
        assert!(ops.push(PendingOp::Call(MediaMethod::Play)));

        let drained = ops.drain();
        assert_eq!(
            drained,
            vec![
                PendingOp::Set(PropertyWrite::Src("a.m3u8".into())),
                PendingOp::Set(PropertyWrite::Volume(0.5)),
                PendingOp::Call(MediaMethod::Play),
            ]
        );
    }

    #[test]
    fn queue_is_retired_after_one_drain() {
        let mut ops = PendingOps::new();
        ops.push(PendingOp::Call(MediaMethod::Load));

        assert_eq!(ops.drain().len(), 1);
        assert!(ops.is_drained());
        assert!(ops.drain().is_empty());

        // Late pushes are rejected.
        assert!(!ops.push(PendingOp::Call(MediaMethod::Pause)));
        assert!(ops.drain().is_empty());
    }

    #[test]
    fn empty_queue_drains_empty() {
        let mut ops = PendingOps::new();
        assert!(ops.is_empty());
        assert!(ops.drain().is_empty());
        assert!(ops.is_drained());
    }
}
