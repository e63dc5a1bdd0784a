use crate::errors::UploadsError;
use crate::models::{ChannelListPayload, PlaylistItemPage, SearchListPayload};

/// The video-platform operations the exporter consumes.
///
/// Implemented over HTTP by [`crate::client::YouTubeClient`]; tests supply
/// their own implementation to observe the call sequence.
pub trait VideoPlatform {
    /// Channel lookup by legacy username.
    fn channels_by_username(&self, username: &str) -> Result<ChannelListPayload, UploadsError>;

    /// Channel lookup by canonical ID, with content details and snippet.
    fn channels_by_id(&self, channel_id: &str) -> Result<ChannelListPayload, UploadsError>;

    /// Channel search by free-text query.
    fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListPayload, UploadsError>;

    /// One page of a playlist, starting at `page_token` when given.
    fn playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemPage, UploadsError>;
}
