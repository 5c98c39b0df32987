use thiserror::Error;

use crate::protocol::mano::ManoError;
use crate::publish::registry::MessageKind;

/// Errors arising while routing a raw packet to a publisher.
///
/// Only `HandlerNotFound` is surfaced by the dispatcher; generic and custom
/// decode failures are logged at the handler boundary and the packet is
/// dropped.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("generic deserialization failed: {reason}")]
    Generic { reason: String },
    #[error("custom decode failed: {0}")]
    Custom(#[from] ManoError),
    #[error("no handler registered for message kind {kind}")]
    HandlerNotFound { kind: MessageKind },
}
