use tracing::{debug, info};

use crate::errors::UploadsError;
use crate::platform::VideoPlatform;
use crate::reference::ChannelReference;

pub const SEARCH_MAX_RESULTS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub channel_id: String,
    /// Title reported by the lookup that found the channel, if it made one.
    pub title: Option<String>,
    pub strategy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedChannel),
    TryNext,
}

pub trait ResolveStrategy {
    fn name(&self) -> &'static str;

    fn attempt(
        &self,
        platform: &dyn VideoPlatform,
        reference: &ChannelReference,
    ) -> Result<Resolution, UploadsError>;
}

/// Accepts references that already look like a channel ID. Never touches the network.
pub struct ChannelIdStrategy;

impl ResolveStrategy for ChannelIdStrategy {
    fn name(&self) -> &'static str {
        "channel-id"
    }

    fn attempt(
        &self,
        _platform: &dyn VideoPlatform,
        reference: &ChannelReference,
    ) -> Result<Resolution, UploadsError> {
        if !reference.is_channel_id() {
            return Ok(Resolution::TryNext);
        }
        Ok(Resolution::Resolved(ResolvedChannel {
            channel_id: reference.as_str().to_string(),
            title: None,
            strategy: self.name(),
        }))
    }
}

/// Legacy username lookup. Failures of any kind fall through to the next strategy.
pub struct LegacyUsernameStrategy;

impl ResolveStrategy for LegacyUsernameStrategy {
    fn name(&self) -> &'static str {
        "legacy-username"
    }

    fn attempt(
        &self,
        platform: &dyn VideoPlatform,
        reference: &ChannelReference,
    ) -> Result<Resolution, UploadsError> {
        let payload = match platform.channels_by_username(reference.as_str()) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(reference = %reference, error = %err, "username lookup failed");
                return Ok(Resolution::TryNext);
            }
        };
        Ok(match payload.items.into_iter().next() {
            Some(item) => Resolution::Resolved(ResolvedChannel {
                channel_id: item.id,
                title: Some(item.snippet.title),
                strategy: self.name(),
            }),
            None => Resolution::TryNext,
        })
    }
}

/// Channel search on the reference with the handle marker removed.
pub struct SearchStrategy;

impl ResolveStrategy for SearchStrategy {
    fn name(&self) -> &'static str {
        "search"
    }

    fn attempt(
        &self,
        platform: &dyn VideoPlatform,
        reference: &ChannelReference,
    ) -> Result<Resolution, UploadsError> {
        let payload = platform.search_channels(reference.search_term(), SEARCH_MAX_RESULTS)?;
        Ok(match payload.items.into_iter().next() {
            Some(item) => Resolution::Resolved(ResolvedChannel {
                channel_id: item.snippet.channel_id,
                title: Some(item.snippet.title),
                strategy: self.name(),
            }),
            None => Resolution::TryNext,
        })
    }
}

pub struct ChannelResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl Default for ChannelResolver {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ChannelIdStrategy),
            Box::new(LegacyUsernameStrategy),
            Box::new(SearchStrategy),
        ])
    }
}

impl ChannelResolver {
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs the strategies in order; `None` means every one of them came up empty.
    pub fn resolve(
        &self,
        platform: &dyn VideoPlatform,
        reference: &ChannelReference,
    ) -> Result<Option<ResolvedChannel>, UploadsError> {
        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), reference = %reference, "trying strategy");
            if let Resolution::Resolved(channel) = strategy.attempt(platform, reference)? {
                match &channel.title {
                    Some(title) => info!(strategy = channel.strategy, %title, "found channel"),
                    None => info!(strategy = channel.strategy, id = %channel.channel_id, "using channel id"),
                }
                return Ok(Some(channel));
            }
        }
        Ok(None)
    }
}
