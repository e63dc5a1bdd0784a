pub mod client;
pub mod csv_utils;
pub mod errors;
pub mod export;
pub mod models;
pub mod platform;
pub mod reference;
pub mod resolver;
pub mod uploads;

pub use client::{ClientOptions, YouTubeClient, DEFAULT_BASE_URL, DEFAULT_HEADERS};
pub use csv_utils::{read_records, write_records, FIELDNAMES};
pub use errors::{ExportError, UploadsError};
pub use export::{
    export_channel,
    export_channel_with,
    ExportOptions,
    ExportOutcome,
    ExportRequest,
    ExportResult,
    NotFoundStage,
    ProgressCallback,
};
pub use models::{
    extract_records, watch_url, ChannelListPayload, ChannelRecord, PlaylistItem,
    PlaylistItemPage, SearchListPayload, VideoRecord, WATCH_URL_PREFIX,
};
pub use platform::VideoPlatform;
pub use reference::{ChannelReference, ReferenceKind};
pub use resolver::{
    ChannelIdStrategy, ChannelResolver, LegacyUsernameStrategy, ResolveStrategy, Resolution,
    ResolvedChannel, SearchStrategy,
};
pub use uploads::{fetch_all_uploads, fetch_channel_details, PageProgress, UPLOADS_PAGE_SIZE};
