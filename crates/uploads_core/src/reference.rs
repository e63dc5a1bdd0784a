use std::fmt;

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::errors::UploadsError;

pub const CHANNEL_ID_PREFIX: &str = "UC";
pub const HANDLE_MARKER: char = '@';

lazy_static! {
    static ref CHANNEL_PATH: Regex = Regex::new(
        r"^/(?:channel/(?P<id>[^/]+)|@(?P<handle>[^/]+)|(?:user|c)/(?P<name>[^/]+))"
    )
    .expect("channel path regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    ChannelId,
    Handle,
    /// Legacy username or free-text search term.
    Name,
}

/// User-supplied channel reference, classified once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReference {
    raw: String,
    text: String,
    kind: ReferenceKind,
}

impl ChannelReference {
    /// Classifies `input` verbatim. Channel URLs take their kind from the path
    /// segment; every other input is classified by its leading characters.
    pub fn parse(input: &str) -> Result<Self, UploadsError> {
        if input.trim().is_empty() {
            return Err(UploadsError::InvalidReference(
                "channel reference is empty".to_string(),
            ));
        }
        let (text, kind) = normalize_channel_url(input)
            .unwrap_or_else(|| (input.to_string(), classify(input)));
        Ok(Self {
            raw: input.to_string(),
            text,
            kind,
        })
    }

    /// The input exactly as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The reference after URL normalization; used for ID and username lookups.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &ReferenceKind {
        &self.kind
    }

    pub fn is_channel_id(&self) -> bool {
        self.kind == ReferenceKind::ChannelId
    }

    /// Search query: the handle marker is removed once, nothing else changes.
    pub fn search_term(&self) -> &str {
        self.text
            .strip_prefix(HANDLE_MARKER)
            .unwrap_or(self.text.as_str())
    }

    /// Default export file name, `<reference>_videos.csv`.
    pub fn default_file_name(&self) -> String {
        let safe: String = self
            .raw
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                other => other,
            })
            .collect();
        format!("{safe}_videos.csv")
    }
}

impl fmt::Display for ChannelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn classify(text: &str) -> ReferenceKind {
    if text.starts_with(CHANNEL_ID_PREFIX) {
        ReferenceKind::ChannelId
    } else if text.starts_with(HANDLE_MARKER) {
        ReferenceKind::Handle
    } else {
        ReferenceKind::Name
    }
}

fn normalize_channel_url(input: &str) -> Option<(String, ReferenceKind)> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    if host != "youtube.com" {
        return None;
    }
    let captures = CHANNEL_PATH.captures(url.path())?;
    let decode = |segment: &str| percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if let Some(id) = captures.name("id") {
        Some((decode(id.as_str()), ReferenceKind::ChannelId))
    } else if let Some(handle) = captures.name("handle") {
        Some((
            format!("{HANDLE_MARKER}{}", decode(handle.as_str())),
            ReferenceKind::Handle,
        ))
    } else {
        captures
            .name("name")
            .map(|name| (decode(name.as_str()), ReferenceKind::Name))
    }
}
