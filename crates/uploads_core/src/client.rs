use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::UploadsError;
use crate::models::{ApiErrorEnvelope, ChannelListPayload, PlaylistItemPage, SearchListPayload};
use crate::platform::VideoPlatform;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const CHANNEL_PARTS: &str = "contentDetails,snippet";

pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    (
        "user-agent",
        concat!("get-youtube-channel-videos/", env!("CARGO_PKG_VERSION")),
    ),
    ("accept", "application/json"),
];

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_key: String,
    pub timeout: Duration,
    pub base_url: Option<String>,
    pub extra_headers: HashMap<String, String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            base_url: None,
            extra_headers: HashMap::new(),
        }
    }
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    options: ClientOptions,
}

impl YouTubeClient {
    pub fn new(options: ClientOptions) -> Result<Self, UploadsError> {
        let mut headers = HeaderMap::new();
        for (name, value) in DEFAULT_HEADERS.iter() {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        for (key, value) in &options.extra_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| UploadsError::Other(format!("invalid header name: {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| UploadsError::Other(format!("invalid header value: {err}")))?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(UploadsError::Request)?;

        let base_url = options
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            options,
        })
    }

    fn request<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<T, UploadsError> {
        let url = format!("{}/{resource}", self.base_url);
        debug!(%url, ?params, "platform request");
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.options.api_key.as_str())])
            .send()
            .map_err(UploadsError::Request)?;
        let status = response.status();
        let bytes = response.bytes().map_err(UploadsError::Request)?;
        if !status.is_success() {
            return Err(match serde_json::from_slice::<ApiErrorEnvelope>(&bytes) {
                Ok(envelope) => UploadsError::Api {
                    code: if envelope.error.code == 0 {
                        status.as_u16()
                    } else {
                        envelope.error.code
                    },
                    message: envelope.error.message,
                },
                Err(_) => UploadsError::Http { status },
            });
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| UploadsError::InvalidResponse(format!("{resource}: {err}")))
    }
}

impl VideoPlatform for YouTubeClient {
    fn channels_by_username(&self, username: &str) -> Result<ChannelListPayload, UploadsError> {
        self.request(
            "channels",
            &[
                ("part", CHANNEL_PARTS.to_string()),
                ("forUsername", username.to_string()),
            ],
        )
    }

    fn channels_by_id(&self, channel_id: &str) -> Result<ChannelListPayload, UploadsError> {
        self.request(
            "channels",
            &[
                ("part", CHANNEL_PARTS.to_string()),
                ("id", channel_id.to_string()),
            ],
        )
    }

    fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListPayload, UploadsError> {
        self.request(
            "search",
            &[
                ("part", "snippet".to_string()),
                ("q", query.to_string()),
                ("type", "channel".to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
    }

    fn playlist_items(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemPage, UploadsError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("playlistId", playlist_id.to_string()),
            ("maxResults", page_size.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        self.request("playlistItems", &params)
    }
}
