use tracing::{debug, info};

use crate::errors::UploadsError;
use crate::models::{ChannelRecord, PlaylistItem};
use crate::platform::VideoPlatform;

pub const UPLOADS_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub fetched: u64,
    pub pages: u32,
}

/// Fetches title and uploads playlist for a channel ID. `Ok(None)` when the
/// platform reports no such channel.
pub fn fetch_channel_details(
    platform: &dyn VideoPlatform,
    channel_id: &str,
) -> Result<Option<ChannelRecord>, UploadsError> {
    let payload = platform.channels_by_id(channel_id)?;
    match payload.items.into_iter().next() {
        Some(item) => {
            let record = item.into_channel_record()?;
            info!(
                title = %record.title,
                playlist = %record.uploads_playlist_id,
                "fetched channel details"
            );
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

/// Follows continuation cursors until the platform stops returning one.
pub fn fetch_all_uploads<F>(
    platform: &dyn VideoPlatform,
    playlist_id: &str,
    mut on_page: F,
) -> Result<(Vec<PlaylistItem>, u32), UploadsError>
where
    F: FnMut(PageProgress),
{
    let mut items = Vec::new();
    let mut pages = 0u32;
    let mut page_token: Option<String> = None;
    loop {
        let page = platform.playlist_items(playlist_id, UPLOADS_PAGE_SIZE, page_token.as_deref())?;
        pages += 1;
        let next = page.continuation().map(str::to_string);
        debug!(
            page = pages,
            count = page.items.len(),
            has_more = next.is_some(),
            "fetched uploads page"
        );
        items.extend(page.items);
        on_page(PageProgress {
            fetched: items.len() as u64,
            pages,
        });
        match next {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }
    Ok((items, pages))
}
