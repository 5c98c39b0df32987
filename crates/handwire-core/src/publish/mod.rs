//! Publisher registry and packet dispatch.
//!
//! The registry maps message kinds to handler factories and is built once by
//! the composition root at startup; steady-state operation only reads it.
//! Handlers own the two-stage decode policy: a generic, host-framework
//! deserialization attempt with a sticky per-instance fallback to the custom
//! MANO decoder. Decode failures at this layer are logged and the packet is
//! dropped; no error crosses back into the transport, since one malformed
//! packet must not terminate the stream.

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod registry;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use handler::{GenericDecodeError, GenericDecoder, HandPoseHandler, PacketHandler, PublishSink};
pub use registry::{
    HandlerConfig, HandlerFactory, HandlerStatus, MANO_LANDMARKS, MessageKind, PublisherRegistry,
};
