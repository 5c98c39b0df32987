use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::Landmarks;
use crate::protocol::mano::{WireVariant, parse_landmarks};
use crate::publish::error::DispatchError;

/// Opaque failure from the host framework's typed deserializer.
pub type GenericDecodeError = Box<dyn std::error::Error + Send + Sync>;

/// Downstream publish collaborator. Failures there are outside this core's
/// error taxonomy.
pub trait PublishSink: Send + Sync {
    fn publish(&self, msg: &Landmarks);
}

/// Host-framework capability that reconstructs a typed message from its
/// standard serialized form, independent of the custom packet layout.
pub trait GenericDecoder: Send + Sync {
    fn deserialize(&self, raw: &[u8]) -> Result<Landmarks, GenericDecodeError>;
}

/// A registered handler: accepts one complete raw packet and publishes the
/// decoded message, or drops it.
pub trait PacketHandler: Send + Sync {
    fn send(&self, raw: &[u8]);
}

/// Hand-pose handler with the sticky two-stage decode policy.
///
/// The stream may carry either standards-conformant serialized messages or
/// the legacy custom packet layout, and which one is not knowable a priori.
/// Each instance first attempts generic deserialization; after the first
/// generic failure it switches to the custom decoder permanently, paying the
/// cost of the distinction once per handler lifetime rather than per packet.
///
/// `send` takes `&self` so one instance can serve concurrent I/O callbacks;
/// the flag is an atomic, and the acceptable worst case is two threads both
/// attempting the generic path once.
pub struct HandPoseHandler {
    topic: String,
    sink: Arc<dyn PublishSink>,
    generic: Arc<dyn GenericDecoder>,
    try_generic: AtomicBool,
}

impl HandPoseHandler {
    pub fn new(
        topic: impl Into<String>,
        sink: Arc<dyn PublishSink>,
        generic: Arc<dyn GenericDecoder>,
    ) -> Self {
        Self {
            topic: topic.into(),
            sink,
            generic,
            try_generic: AtomicBool::new(true),
        }
    }

    /// Whether the next `send` will attempt generic deserialization first.
    pub fn prefers_generic(&self) -> bool {
        self.try_generic.load(Ordering::Acquire)
    }

    /// Run the two-stage decode without publishing.
    ///
    /// A generic failure flips the instance to custom-only and falls
    /// through; only a custom decode failure is returned.
    pub fn decode(&self, raw: &[u8]) -> Result<Landmarks, DispatchError> {
        if self.try_generic.load(Ordering::Acquire) {
            match self.generic.deserialize(raw) {
                Ok(msg) => return Ok(msg),
                Err(cause) => {
                    let err = DispatchError::Generic {
                        reason: cause.to_string(),
                    };
                    debug!(
                        topic = %self.topic,
                        error = %err,
                        "switching to custom decode"
                    );
                    self.try_generic.store(false, Ordering::Release);
                }
            }
        }
        Ok(parse_landmarks(raw, WireVariant::Timestamped)?)
    }
}

impl PacketHandler for HandPoseHandler {
    fn send(&self, raw: &[u8]) {
        match self.decode(raw) {
            Ok(msg) => self.sink.publish(&msg),
            Err(err) => {
                // Silent-drop policy: there is no delivery channel back to
                // the packet source, so a failed decode ends here.
                warn!(topic = %self.topic, error = %err, "dropping packet");
            }
        }
    }
}
