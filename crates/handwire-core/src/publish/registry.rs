use std::collections::HashMap;
use std::fmt;

use crate::publish::handler::PacketHandler;

/// Interned-symbol key identifying a message kind in the registry.
///
/// Kinds defined outside this crate register under their own symbols; the
/// registry does not enumerate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKind(pub &'static str);

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The hand-pose landmark message kind shipped with this crate.
pub const MANO_LANDMARKS: MessageKind = MessageKind("vr_haptic_msgs/ManoLandmarks");

/// Default publisher queue depth.
pub const DEFAULT_QUEUE_SIZE: usize = 10;

/// Per-handler construction parameters supplied by the composition root.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Output channel name in the host messaging system.
    pub topic: String,
    /// Queue depth for the downstream publisher.
    pub queue_size: usize,
}

impl HandlerConfig {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }

    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }
}

/// Constructor for a publisher-capable handler.
pub type HandlerFactory = Box<dyn Fn(&HandlerConfig) -> Box<dyn PacketHandler> + Send + Sync>;

enum Registration {
    Available(HandlerFactory),
    /// The kind is known but its message definitions are not installed in
    /// this deployment. Distinct from an unregistered kind.
    Unavailable,
}

/// Registration outcome reported by [`PublisherRegistry::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStatus {
    Registered,
    Unavailable,
    Unregistered,
}

/// Explicitly constructed, injectable lookup table from message kind to
/// handler factory.
///
/// Owned by the composition root and populated once at startup; lookups in
/// steady state are read-only. Callers that must register concurrently with
/// lookups wrap the registry in an `RwLock`. Duplicate registration is not
/// an error: the last writer wins, which lets optional handlers re-register
/// unconditionally.
#[derive(Default)]
pub struct PublisherRegistry {
    entries: HashMap<MessageKind, Registration>,
}

impl PublisherRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a handler factory for `kind`, replacing any prior entry.
    pub fn register<F>(&mut self, kind: MessageKind, factory: F)
    where
        F: Fn(&HandlerConfig) -> Box<dyn PacketHandler> + Send + Sync + 'static,
    {
        self.entries
            .insert(kind, Registration::Available(Box::new(factory)));
    }

    /// Record that `kind` exists but cannot be handled in this deployment
    /// (e.g., its message package is not installed).
    pub fn mark_unavailable(&mut self, kind: MessageKind) {
        self.entries.insert(kind, Registration::Unavailable);
    }

    /// Look up the factory for `kind`.
    ///
    /// Returns `None` for unregistered and unavailable kinds alike; absence
    /// is a normal outcome the caller decides how to treat. Use
    /// [`status`](Self::status) to distinguish the two.
    pub fn lookup(&self, kind: MessageKind) -> Option<&HandlerFactory> {
        match self.entries.get(&kind) {
            Some(Registration::Available(factory)) => Some(factory),
            _ => None,
        }
    }

    pub fn status(&self, kind: MessageKind) -> HandlerStatus {
        match self.entries.get(&kind) {
            Some(Registration::Available(_)) => HandlerStatus::Registered,
            Some(Registration::Unavailable) => HandlerStatus::Unavailable,
            None => HandlerStatus::Unregistered,
        }
    }

    pub fn contains(&self, kind: MessageKind) -> bool {
        self.lookup(kind).is_some()
    }

    /// Registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = MessageKind> + '_ {
        self.entries.iter().filter_map(|(kind, entry)| match entry {
            Registration::Available(_) => Some(*kind),
            Registration::Unavailable => None,
        })
    }

    /// Build a handler instance for `kind` with the given configuration.
    pub fn instantiate(
        &self,
        kind: MessageKind,
        config: &HandlerConfig,
    ) -> Option<Box<dyn PacketHandler>> {
        self.lookup(kind).map(|factory| factory(config))
    }
}
