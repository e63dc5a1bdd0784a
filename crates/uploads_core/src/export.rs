use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::client::{ClientOptions, YouTubeClient};
use crate::csv_utils::write_records;
use crate::errors::ExportError;
use crate::models::{extract_records, ChannelRecord, VideoRecord};
use crate::platform::VideoPlatform;
use crate::reference::ChannelReference;
use crate::resolver::{ChannelResolver, ResolvedChannel};
use crate::uploads::{fetch_all_uploads, fetch_channel_details, PageProgress};

pub type ProgressCallback = Arc<dyn Fn(PageProgress) + Send + Sync + 'static>;

/// Everything needed to run an export against the live API.
#[derive(Clone)]
pub struct ExportOptions {
    pub channel: String,
    pub csv_path: Option<PathBuf>,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: Option<String>,
    pub extra_headers: HashMap<String, String>,
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            channel: String::new(),
            csv_path: None,
            api_key: String::new(),
            timeout_secs: 30,
            base_url: None,
            extra_headers: HashMap::new(),
            progress_callback: None,
        }
    }
}

/// Platform-independent part of an export.
#[derive(Clone, Default)]
pub struct ExportRequest {
    pub channel: String,
    /// Defaults to `<reference>_videos.csv` in the working directory.
    pub csv_path: Option<PathBuf>,
    pub progress_callback: Option<ProgressCallback>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundStage {
    Resolution,
    Details,
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub csv_path: PathBuf,
    /// How the reference was resolved, including the title the lookup reported.
    pub resolved: ResolvedChannel,
    pub channel: ChannelRecord,
    pub records: Vec<VideoRecord>,
    pub pages: u32,
}

#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Exported(ExportResult),
    ChannelNotFound {
        reference: String,
        stage: NotFoundStage,
    },
}

pub fn export_channel(options: ExportOptions) -> Result<ExportOutcome, ExportError> {
    let client = YouTubeClient::new(ClientOptions {
        api_key: options.api_key,
        timeout: Duration::from_secs(options.timeout_secs),
        base_url: options.base_url,
        extra_headers: options.extra_headers,
    })?;
    export_channel_with(
        &client,
        ExportRequest {
            channel: options.channel,
            csv_path: options.csv_path,
            progress_callback: options.progress_callback,
        },
    )
}

pub fn export_channel_with(
    platform: &dyn VideoPlatform,
    request: ExportRequest,
) -> Result<ExportOutcome, ExportError> {
    let reference = ChannelReference::parse(&request.channel)?;

    let Some(resolved) = ChannelResolver::default().resolve(platform, &reference)? else {
        return Ok(ExportOutcome::ChannelNotFound {
            reference: reference.raw().to_string(),
            stage: NotFoundStage::Resolution,
        });
    };

    let Some(channel) = fetch_channel_details(platform, &resolved.channel_id)? else {
        return Ok(ExportOutcome::ChannelNotFound {
            reference: reference.raw().to_string(),
            stage: NotFoundStage::Details,
        });
    };
    info!(title = %channel.title, "fetching videos");

    let progress_callback = request.progress_callback.clone();
    let (items, pages) = fetch_all_uploads(platform, &channel.uploads_playlist_id, |progress| {
        if let Some(callback) = progress_callback.as_ref() {
            callback(progress);
        }
    })?;
    let records = extract_records(&items);

    let csv_path = request
        .csv_path
        .unwrap_or_else(|| PathBuf::from(reference.default_file_name()));
    write_records(&csv_path, &records).map_err(|err| {
        ExportError::from(err).context(format!("failed to write {}", csv_path.display()))
    })?;
    info!(path = %csv_path.display(), count = records.len(), "export complete");

    Ok(ExportOutcome::Exported(ExportResult {
        csv_path,
        resolved,
        channel,
        records,
        pages,
    }))
}
