use crate::ops::{OutgoingMessage, WorkerOp};

/// Link between one worker and the deployment.
///
/// Implementations own replication fan-out and command routing; they must
/// deliver ops for a single component stream in order.
pub trait Connection {
    fn is_connected(&self) -> bool;
    /// Ops received since the last call, in arrival order
    fn get_op_list(&mut self) -> Vec<WorkerOp>;
    fn send(&mut self, message: OutgoingMessage);
}
