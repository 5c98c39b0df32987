use std::collections::HashMap;

use tracing::debug;

use crate::publish::error::DispatchError;
use crate::publish::handler::PacketHandler;
use crate::publish::registry::{HandlerConfig, MessageKind, PublisherRegistry};

/// Routes raw packets to per-kind handler instances.
///
/// Built once from the registry at startup; `dispatch` is the steady-state
/// entry point fed by the transport layer.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<MessageKind, Box<dyn PacketHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Instantiate a handler for every requested kind the registry can
    /// provide. Kinds without a usable registration are skipped; a missing
    /// optional handler is an expected deployment state, not an error.
    pub fn from_registry(
        registry: &PublisherRegistry,
        requests: &[(MessageKind, HandlerConfig)],
    ) -> Self {
        let mut dispatcher = Self::new();
        for (kind, config) in requests {
            match registry.instantiate(*kind, config) {
                Some(handler) => dispatcher.insert(*kind, handler),
                None => {
                    debug!(kind = %kind, status = ?registry.status(*kind), "no handler instantiated");
                }
            }
        }
        dispatcher
    }

    pub fn insert(&mut self, kind: MessageKind, handler: Box<dyn PacketHandler>) {
        self.handlers.insert(kind, handler);
    }

    pub fn handles(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Hand `raw` to the handler for `kind`.
    ///
    /// Decode failures inside the handler are logged and swallowed there;
    /// the only error surfaced here is an unknown kind, which the caller may
    /// treat as skip, warn, or register-later.
    pub fn dispatch(&self, kind: MessageKind, raw: &[u8]) -> Result<(), DispatchError> {
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(DispatchError::HandlerNotFound { kind })?;
        handler.send(raw);
        Ok(())
    }
}
