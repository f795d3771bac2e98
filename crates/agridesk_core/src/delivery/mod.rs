//! In-process delivery adapter registry.
//!
//! # Responsibility
//! - Define the transport contract for push/SMS/email/in-app delivery.
//! - Route a resolved channel set to the registered adapters.
//!
//! # Invariants
//! - At most one adapter per channel.
//! - The registry never decides eligibility; it only carries a channel
//!   set the routing policy already resolved.

use crate::model::history::EntityKind;
use crate::model::{Channel, ChannelSet, PriorityTier};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Registration/dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// A second adapter was registered for the same channel.
    DuplicateChannel(Channel),
    /// Dispatch requested a channel with no registered adapter.
    ChannelNotRegistered(Channel),
    /// Adapter-reported transport failure.
    Transport { channel: Channel, message: String },
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateChannel(channel) => {
                write!(f, "adapter already registered for channel `{}`", channel.as_str())
            }
            Self::ChannelNotRegistered(channel) => {
                write!(f, "no adapter registered for channel `{}`", channel.as_str())
            }
            Self::Transport { channel, message } => {
                write!(f, "delivery via `{}` failed: {message}", channel.as_str())
            }
        }
    }
}

impl Error for DeliveryError {}

/// Payload handed to transport adapters once routing has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub entity_kind: EntityKind,
    pub entity_id: Uuid,
    pub title: String,
    pub body: String,
    pub tier: PriorityTier,
}

/// Transport contract implemented by host-side delivery integrations.
pub trait DeliveryAdapter {
    fn channel(&self) -> Channel;
    fn deliver(&self, request: &DispatchRequest) -> Result<(), DeliveryError>;
}

/// Per-channel adapter registry.
#[derive(Default)]
pub struct DeliveryRegistry {
    adapters: BTreeMap<Channel, Arc<dyn DeliveryAdapter>>,
}

impl DeliveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one adapter under its declared channel.
    pub fn register(&mut self, adapter: Arc<dyn DeliveryAdapter>) -> Result<(), DeliveryError> {
        let channel = adapter.channel();
        if self.adapters.contains_key(&channel) {
            return Err(DeliveryError::DuplicateChannel(channel));
        }
        self.adapters.insert(channel, adapter);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Channels with a registered adapter, in channel order.
    pub fn registered_channels(&self) -> Vec<Channel> {
        self.adapters.keys().copied().collect()
    }

    pub fn get(&self, channel: Channel) -> Option<Arc<dyn DeliveryAdapter>> {
        self.adapters.get(&channel).cloned()
    }

    /// Delivers `request` over every channel in `channels`.
    ///
    /// Fails on the first missing adapter or transport error; the
    /// channels already delivered to are listed in order on success.
    pub fn dispatch(
        &self,
        channels: &ChannelSet,
        request: &DispatchRequest,
    ) -> Result<Vec<Channel>, DeliveryError> {
        let mut delivered = Vec::with_capacity(channels.len());
        for channel in channels {
            let adapter = self
                .get(*channel)
                .ok_or(DeliveryError::ChannelNotRegistered(*channel))?;
            adapter.deliver(request)?;
            delivered.push(*channel);
        }
        Ok(delivered)
    }
}
