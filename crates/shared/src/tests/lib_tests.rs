use crate::{
    domain::{FormatId, Platform},
    error::ErrorBody,
    protocol::{download_file_path, DownloadRequest, Format, VideoInfo},
};

#[test]
fn video_info_accepts_backend_payload_with_extra_fields() {
    let raw = r#"{
        "title": "Rust in 100 seconds",
        "thumbnail": "https://i.ytimg.com/vi/abc/hq.jpg",
        "duration": 142,
        "platform": "youtube",
        "formats": [
            {"format_id": "18", "ext": "mp4", "resolution": "640x360", "quality": 1, "filesize": 5242880},
            {"format_id": "22", "ext": "mp4", "resolution": "1280x720", "quality": 2.5, "filesize": null}
        ],
        "uploader": "ignored"
    }"#;

    let info: VideoInfo = serde_json::from_str(raw).expect("decode video info");
    assert_eq!(info.title.as_deref(), Some("Rust in 100 seconds"));
    assert_eq!(info.platform, Some(Platform::Youtube));
    assert_eq!(info.duration, Some(142.0));
    assert_eq!(info.formats.len(), 2);
    assert_eq!(info.formats[0].format_id, FormatId::new("18"));
    assert_eq!(info.formats[0].filesize, Some(5_242_880));
    assert_eq!(info.formats[1].filesize, None);
    assert_eq!(info.formats[1].quality, 2.5);
}

#[test]
fn video_info_tolerates_missing_and_empty_fields() {
    let info: VideoInfo =
        serde_json::from_str(r#"{"thumbnail": "", "formats": null}"#).expect("decode");
    assert_eq!(info.title, None);
    assert_eq!(info.thumbnail, None);
    assert!(info.formats.is_empty());

    let info: VideoInfo = serde_json::from_str("{}").expect("decode empty object");
    assert!(info.formats.is_empty());
}

#[test]
fn format_defaults_and_lenient_sizes() {
    let format: Format =
        serde_json::from_str(r#"{"format_id": "hls-1", "quality": null, "filesize": 1048576.7}"#)
            .expect("decode format");
    assert_eq!(format.ext, "mp4");
    assert_eq!(format.quality, 0.0);
    assert_eq!(format.filesize, Some(1_048_576));

    let zero: Format =
        serde_json::from_str(r#"{"format_id": "x", "ext": "webm", "quality": 0, "filesize": 0}"#)
            .expect("decode format");
    assert_eq!(zero.known_size(), None);
}

#[test]
fn best_available_format_is_the_synthetic_entry() {
    let best = Format::best_available();
    assert_eq!(best.format_id.as_str(), "best");
    assert_eq!(best.ext, "mp4");
    assert_eq!(best.resolution.as_deref(), Some("Best available"));
}

#[test]
fn unknown_platform_key_deserializes_as_unknown() {
    let platform: Platform = serde_json::from_str(r#""vimeo""#).expect("decode platform");
    assert_eq!(platform, Platform::Unknown);
}

#[test]
fn detects_platform_from_host() {
    assert_eq!(Platform::from_host("youtu.be"), Platform::Youtube);
    assert_eq!(Platform::from_host("m.youtube.com"), Platform::Youtube);
    assert_eq!(Platform::from_host("www.LinkedIn.com"), Platform::Linkedin);
    assert_eq!(Platform::from_host("x.com"), Platform::Twitter);
    assert_eq!(Platform::from_host("www.instagram.com"), Platform::Instagram);
    assert_eq!(Platform::from_host("vimeo.com"), Platform::Unknown);
}

#[test]
fn lookalike_hosts_are_not_claimed_by_a_platform() {
    assert_eq!(Platform::from_host("dropbox.com"), Platform::Unknown);
    assert_eq!(Platform::from_host("netflix.com"), Platform::Unknown);
    assert_eq!(Platform::from_host("notyoutube.com"), Platform::Unknown);
    assert_eq!(Platform::Unknown.display_name(), None);
}

#[test]
fn placeholder_falls_back_for_unknown_platform() {
    assert_eq!(
        Platform::from_key("twitter").placeholder(),
        "Paste X (Twitter) video link here..."
    );
    assert_eq!(
        Platform::from_key("tiktok").placeholder(),
        "Paste video link here..."
    );
}

#[test]
fn download_file_path_percent_encodes_filename() {
    assert_eq!(download_file_path("clip.mp4"), "/api/download-file/clip.mp4");
    assert_eq!(
        download_file_path("my clip/part 1.mp4"),
        "/api/download-file/my%20clip%2Fpart%201.mp4"
    );
}

#[test]
fn download_request_serializes_format_id_as_string() {
    let body = serde_json::to_value(DownloadRequest {
        url: "https://youtu.be/abc".to_string(),
        format_id: FormatId::new("22"),
    })
    .expect("encode");
    assert_eq!(
        body,
        serde_json::json!({"url": "https://youtu.be/abc", "format_id": "22"})
    );
}

#[test]
fn error_body_prefers_server_message() {
    let body = ErrorBody::from_slice(br#"{"error": "format unavailable"}"#);
    assert_eq!(body.message_or("Download failed"), "format unavailable");

    let body = ErrorBody::from_slice(b"<html>502 Bad Gateway</html>");
    assert_eq!(body.message_or("Download failed"), "Download failed");

    let body = ErrorBody::from_slice(br#"{"error": "  "}"#);
    assert_eq!(body.message_or("Download failed"), "Download failed");
}
