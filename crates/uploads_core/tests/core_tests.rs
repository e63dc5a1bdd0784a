use std::fs;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use uploads_core::{
    export_channel, read_records, write_records, ExportError, ExportOptions, ExportOutcome,
    NotFoundStage, UploadsError, VideoRecord,
};

type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const API_KEY: &str = "test_api_key";

fn options(server: &MockServer, channel: &str, csv_path: std::path::PathBuf) -> ExportOptions {
    ExportOptions {
        channel: channel.to_string(),
        csv_path: Some(csv_path),
        api_key: API_KEY.to_string(),
        timeout_secs: 10,
        base_url: Some(server.base_url()),
        ..Default::default()
    }
}

fn channel_details_body() -> serde_json::Value {
    json!({
        "items": [{
            "id": "UC123456789",
            "snippet": {"title": "Test Channel"},
            "contentDetails": {"relatedPlaylists": {"uploads": "UU123456789"}}
        }]
    })
}

#[test]
fn channel_id_export_writes_header_and_row() -> TestResult<()> {
    let server = MockServer::start();

    let username_mock = server.mock(|when, then| {
        when.method(GET).path("/channels").query_param_exists("forUsername");
        then.status(200).json_body(json!({"items": []}));
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!({"items": []}));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("id", "UC123456789")
            .query_param("key", API_KEY);
        then.status(200).json_body(channel_details_body());
    });
    let items_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/playlistItems")
            .query_param("part", "snippet")
            .query_param("playlistId", "UU123456789")
            .query_param("maxResults", "50")
            .query_param("key", API_KEY);
        then.status(200).json_body(json!({
            "items": [{
                "snippet": {
                    "resourceId": {"videoId": "video123"},
                    "title": "Test Video",
                    "publishedAt": "2023-01-01T00:00:00Z"
                }
            }],
            "nextPageToken": null
        }));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("test_output.csv");
    let outcome = export_channel(options(&server, "UC123456789", csv_path.clone()))?;

    let ExportOutcome::Exported(result) = outcome else {
        panic!("expected an export");
    };
    assert_eq!(result.channel.title, "Test Channel");
    assert_eq!(result.resolved.strategy, "channel-id");
    assert_eq!(result.resolved.title, None);
    assert_eq!(result.pages, 1);
    assert_eq!(result.records.len(), 1);

    let content = fs::read_to_string(&csv_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title,URL,Published,Video_ID",
            "Test Video,https://www.youtube.com/watch?v=video123,2023-01-01T00:00:00Z,video123",
        ]
    );

    details_mock.assert();
    items_mock.assert();
    username_mock.assert_hits(0);
    search_mock.assert_hits(0);
    Ok(())
}

#[test]
fn username_hit_skips_search() -> TestResult<()> {
    let server = MockServer::start();

    let username_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("forUsername", "testchannel");
        then.status(200).json_body(json!({
            "items": [{"id": "UC123456789", "snippet": {"title": "Test Channel"}}]
        }));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("id", "UC123456789");
        then.status(200).json_body(channel_details_body());
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!({"items": []}));
    });
    let items_mock = server.mock(|when, then| {
        when.method(GET).path("/playlistItems");
        then.status(200).json_body(json!({"items": []}));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("videos.csv");
    let outcome = export_channel(options(&server, "testchannel", csv_path.clone()))?;
    let ExportOutcome::Exported(result) = outcome else {
        panic!("expected an export");
    };
    assert!(result.records.is_empty());
    assert_eq!(result.resolved.strategy, "legacy-username");
    assert_eq!(result.resolved.title.as_deref(), Some("Test Channel"));

    let content = fs::read_to_string(&csv_path)?;
    assert_eq!(content, "Title,URL,Published,Video_ID\r\n");

    username_mock.assert();
    details_mock.assert();
    items_mock.assert();
    search_mock.assert_hits(0);
    Ok(())
}

#[test]
fn handle_falls_back_to_search_without_marker() -> TestResult<()> {
    let server = MockServer::start();

    let username_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("forUsername", "@testchannel");
        then.status(200).json_body(json!({"items": []}));
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("part", "snippet")
            .query_param("q", "testchannel")
            .query_param("type", "channel")
            .query_param("maxResults", "1");
        then.status(200).json_body(json!({
            "items": [{"snippet": {"channelId": "UC123456789", "title": "Test Channel"}}]
        }));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("id", "UC123456789");
        then.status(200).json_body(channel_details_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/playlistItems");
        then.status(200).json_body(json!({"items": [], "nextPageToken": null}));
    });

    let dir = tempdir()?;
    let outcome = export_channel(options(&server, "@testchannel", dir.path().join("out.csv")))?;
    assert!(matches!(outcome, ExportOutcome::Exported(_)));

    username_mock.assert();
    search_mock.assert();
    details_mock.assert();
    Ok(())
}

#[test]
fn username_error_is_swallowed() -> TestResult<()> {
    let server = MockServer::start();

    let username_mock = server.mock(|when, then| {
        when.method(GET).path("/channels").query_param_exists("forUsername");
        then.status(500).body("backend unavailable");
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!({
            "items": [{"snippet": {"channelId": "UC123456789", "title": "Test Channel"}}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("id", "UC123456789");
        then.status(200).json_body(channel_details_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/playlistItems");
        then.status(200).json_body(json!({"items": []}));
    });

    let dir = tempdir()?;
    let outcome = export_channel(options(&server, "somebody", dir.path().join("out.csv")))?;
    assert!(matches!(outcome, ExportOutcome::Exported(_)));
    username_mock.assert();
    search_mock.assert();
    Ok(())
}

#[test]
fn unresolvable_channel_writes_nothing() -> TestResult<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/channels");
        then.status(200).json_body(json!({"items": []}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!({"items": []}));
    });
    let items_mock = server.mock(|when, then| {
        when.method(GET).path("/playlistItems");
        then.status(200).json_body(json!({"items": []}));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("nonexistent_videos.csv");
    let outcome = export_channel(options(&server, "nonexistent", csv_path.clone()))?;

    match outcome {
        ExportOutcome::ChannelNotFound { reference, stage } => {
            assert_eq!(reference, "nonexistent");
            assert_eq!(stage, NotFoundStage::Resolution);
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(!csv_path.exists());
    items_mock.assert_hits(0);
    Ok(())
}

#[test]
fn empty_detail_lookup_is_not_found() -> TestResult<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/channels")
            .query_param("id", "UCgone");
        then.status(200).json_body(json!({"items": []}));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("gone.csv");
    let outcome = export_channel(options(&server, "UCgone", csv_path.clone()))?;
    assert!(matches!(
        outcome,
        ExportOutcome::ChannelNotFound {
            stage: NotFoundStage::Details,
            ..
        }
    ));
    assert!(!csv_path.exists());
    Ok(())
}

#[test]
fn platform_error_on_details_is_reported() -> TestResult<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/channels");
        then.status(403).json_body(json!({
            "error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota."}
        }));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("out.csv");
    let err = export_channel(options(&server, "UC123456789", csv_path.clone())).unwrap_err();

    assert!(err.is_platform());
    match err {
        ExportError::Core(UploadsError::Api { code, message }) => {
            assert_eq!(code, 403);
            assert!(message.contains("quota"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!csv_path.exists());
    Ok(())
}

#[test]
fn missing_item_fields_are_named_parse_errors() -> TestResult<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/channels");
        then.status(200).json_body(channel_details_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/playlistItems");
        then.status(200).json_body(json!({
            "items": [{"snippet": {"title": "No id", "publishedAt": "2023-01-01T00:00:00Z"}}]
        }));
    });

    let dir = tempdir()?;
    let csv_path = dir.path().join("out.csv");
    let err = export_channel(options(&server, "UC123456789", csv_path.clone())).unwrap_err();

    assert!(!err.is_platform());
    match err {
        ExportError::Core(UploadsError::InvalidResponse(message)) => {
            assert!(message.contains("resourceId"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!csv_path.exists());
    Ok(())
}

#[test]
fn csv_output_is_quoted_and_truncated() -> TestResult<()> {
    let dir = tempdir()?;
    let csv_path = dir.path().join("nested").join("videos.csv");
    let tricky = VideoRecord {
        title: "Hello, \"World\"".to_string(),
        url: "https://www.youtube.com/watch?v=abc".to_string(),
        published: "2023-02-01T10:00:00Z".to_string(),
        video_id: "abc".to_string(),
    };
    let plain = VideoRecord {
        title: "Plain".to_string(),
        url: "https://www.youtube.com/watch?v=def".to_string(),
        published: "2023-02-02T10:00:00Z".to_string(),
        video_id: "def".to_string(),
    };

    write_records(&csv_path, &[tricky.clone(), plain])?;
    let content = fs::read_to_string(&csv_path)?;
    assert!(content.contains("\"Hello, \"\"World\"\"\""));

    write_records(&csv_path, std::slice::from_ref(&tricky))?;
    let records = read_records(&csv_path)?;
    assert_eq!(records, vec![tricky]);
    Ok(())
}
