use serde::{Deserialize, Serialize};

use crate::errors::UploadsError;

pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub title: String,
    pub uploads_playlist_id: String,
}

/// One exported row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Published")]
    pub published: String,
    #[serde(rename = "Video_ID")]
    pub video_id: String,
}

impl VideoRecord {
    pub fn from_item(item: &PlaylistItem) -> Self {
        let video_id = item.snippet.resource_id.video_id.clone();
        Self {
            title: item.snippet.title.clone(),
            url: watch_url(&video_id),
            published: item.snippet.published_at.clone(),
            video_id,
        }
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

pub fn extract_records(items: &[PlaylistItem]) -> Vec<VideoRecord> {
    items.iter().map(VideoRecord::from_item).collect()
}

/// Error envelope returned by the platform alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListPayload {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    #[serde(rename = "contentDetails", default)]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

impl ChannelItem {
    pub fn into_channel_record(self) -> Result<ChannelRecord, UploadsError> {
        let details = self.content_details.ok_or_else(|| {
            UploadsError::InvalidResponse(format!(
                "channel {} is missing contentDetails.relatedPlaylists.uploads",
                self.id
            ))
        })?;
        Ok(ChannelRecord {
            channel_id: self.id,
            title: self.snippet.title,
            uploads_playlist_id: details.related_playlists.uploads,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListPayload {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSnippet {
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistItemPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

impl PlaylistItemPage {
    /// Continuation cursor, treating an empty token as the last page.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}
