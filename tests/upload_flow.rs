mod common;

use common::{setup, MockBackend, MIB};
use evalyn_client::{ClientError, Config, ConfigBuilder, MessageKind, ValidationError, VideoFile};
use std::time::Duration;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_upload_success_seeds_poll_input() {
    let backend = MockBackend::new().with_upload_reply("vid_123", "pending");
    let (app, _surface, backend) = setup(backend, &Config::default());

    let file = VideoFile::from_bytes("pitch.mp4", vec![0u8; 10 * MIB]);
    let response = assert_ok!(app.upload_video(Some(file)).await);
    assert_eq!(response.video_id, "vid_123");

    let state = app.snapshot().await;
    assert!(!state.upload.loading);
    assert_eq!(state.upload.message_kind, MessageKind::Success);
    assert!(state.upload.result_message.contains("vid_123"));
    assert!(state.upload.result_message.contains("10.00 MB"));
    assert!(state.upload.result_message.contains("pitch.mp4"));
    assert_eq!(state.upload.last_assigned_id.as_deref(), Some("vid_123"));
    assert_eq!(state.poll.video_id_input, "vid_123");

    assert_eq!(backend.analyze_calls(), 1);
    assert_eq!(*backend.uploaded_sizes.lock().unwrap(), vec![10 * MIB]);
}

#[tokio::test]
async fn test_missing_file_makes_no_remote_call() {
    let (app, surface, backend) = setup(MockBackend::new(), &Config::default());

    let err = assert_err!(app.upload_video(None).await);
    assert!(matches!(err, ClientError::Validation(ValidationError::NoFile)));

    let state = app.snapshot().await;
    assert!(!state.upload.loading);
    assert_eq!(state.upload.result_message, "Please select a video file first!");
    assert_eq!(state.upload.message_kind, MessageKind::Error);
    assert_eq!(backend.analyze_calls(), 0);
    assert!(surface.last().contains("Please select a video file first!"));
}

#[tokio::test]
async fn test_rejected_attempt_drops_earlier_identifier() {
    let backend = MockBackend::new().with_upload_reply("vid_123", "pending");
    let (app, _surface, _backend) = setup(backend, &Config::default());

    assert_ok!(app.upload_video(Some(VideoFile::from_bytes("a.mp4", vec![0u8; 16]))).await);
    assert_err!(app.upload_video(None).await);

    let state = app.snapshot().await;
    assert_eq!(state.upload.last_assigned_id, None);
    assert_eq!(state.upload.result_message, "Please select a video file first!");
    // the results field keeps the identifier it was seeded with
    assert_eq!(state.poll.video_id_input, "vid_123");
}

#[tokio::test]
async fn test_size_limit_on_disk_files() {
    let temp_dir = TempDir::new().unwrap();
    let at_limit = temp_dir.path().join("at_limit.mp4");
    let over_limit = temp_dir.path().join("over_limit.mp4");

    // Sparse files keep the test cheap
    std::fs::File::create(&at_limit).unwrap().set_len(50 * MIB as u64).unwrap();
    std::fs::File::create(&over_limit).unwrap().set_len(50 * MIB as u64 + 1).unwrap();

    let backend = MockBackend::new().with_upload_reply("vid_50", "pending");
    let (app, _surface, backend) = setup(backend, &Config::default());

    let err = assert_err!(app.upload_video(Some(VideoFile::open(&over_limit).await.unwrap())).await);
    assert!(matches!(err, ClientError::Validation(ValidationError::TooLarge { .. })));
    assert_eq!(
        app.snapshot().await.upload.result_message,
        "File too large! Please select a video under 50MB."
    );
    assert_eq!(backend.analyze_calls(), 0);

    assert_ok!(app.upload_video(Some(VideoFile::open(&at_limit).await.unwrap())).await);
    assert_eq!(backend.analyze_calls(), 1);
    assert!(app.snapshot().await.upload.result_message.contains("50.00 MB"));
}

#[tokio::test]
async fn test_configured_limit_applies() {
    let config = ConfigBuilder::new().with_max_file_size(MIB as u64).build();
    let (app, _surface, backend) = setup(MockBackend::new(), &config);

    let file = VideoFile::from_bytes("big.mov", vec![0u8; MIB + 1]);
    assert_err!(app.upload_video(Some(file)).await);
    assert_eq!(
        app.snapshot().await.upload.result_message,
        "File too large! Please select a video under 1MB."
    );
    assert_eq!(backend.analyze_calls(), 0);
}

#[tokio::test]
async fn test_loading_is_presented_before_remote_call() {
    let backend = MockBackend::new().with_upload_reply("vid_1", "pending");
    let (app, surface, backend) = setup(backend, &Config::default());

    assert_ok!(app.upload_video(Some(VideoFile::from_bytes("a.mp4", vec![1, 2, 3]))).await);

    let pages_at_call = backend.pages_at_call.lock().unwrap().clone();
    assert_eq!(pages_at_call.len(), 1);
    assert!(pages_at_call[0].contains(r#"id="uploadLoading" style="display: block""#));
    assert!(pages_at_call[0].contains(r#"id="uploadBtn" disabled"#));

    // initial page, loading, result
    assert_eq!(surface.count(), 3);
    assert!(surface.last().contains(r#"id="uploadLoading" style="display: none""#));
}

#[tokio::test]
async fn test_remote_failure_is_reported() {
    let backend = MockBackend::new().with_upload_error(500, "canister trapped");
    let (app, _surface, _backend) = setup(backend, &Config::default());

    let err = assert_err!(app.upload_video(Some(VideoFile::from_bytes("a.mp4", vec![0; 8]))).await);
    assert!(matches!(err, ClientError::Remote(_)));

    let state = app.snapshot().await;
    assert!(!state.upload.loading);
    assert_eq!(state.upload.message_kind, MessageKind::Error);
    assert_eq!(
        state.upload.result_message,
        "Upload failed: service error 500: canister trapped"
    );
    assert_eq!(state.upload.last_assigned_id, None);
    assert!(state.poll.video_id_input.is_empty());
}

#[tokio::test]
async fn test_new_attempt_clears_previous_result() {
    let backend = MockBackend::new()
        .with_upload_reply("vid_1", "pending")
        .with_upload_error(503, "unavailable");
    let (app, _surface, _backend) = setup(backend, &Config::default());

    assert_ok!(app.upload_video(Some(VideoFile::from_bytes("a.mp4", vec![0; 8]))).await);
    assert_err!(app.upload_video(Some(VideoFile::from_bytes("b.mp4", vec![0; 8]))).await);

    let state = app.snapshot().await;
    assert_eq!(state.upload.last_assigned_id, None);
    assert!(state.upload.result_message.starts_with("Upload failed:"));
    // the seeded identifier stays in the poll field
    assert_eq!(state.poll.video_id_input, "vid_1");
}

#[tokio::test(start_paused = true)]
async fn test_upload_timeout_is_reported() {
    let backend = MockBackend::new().with_delayed_upload_reply("vid_1", "pending", Duration::from_secs(60));
    let config = ConfigBuilder::new().with_timeout(Some(5)).build();
    let (app, _surface, _backend) = setup(backend, &config);

    let err = assert_err!(app.upload_video(Some(VideoFile::from_bytes("a.mp4", vec![0; 8]))).await);
    assert!(matches!(err, ClientError::Timeout(_)));

    let state = app.snapshot().await;
    assert!(!state.upload.loading);
    assert_eq!(state.upload.result_message, "Upload failed: request timed out after 5s");
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_upload_does_not_overwrite_newer_one() {
    let backend = MockBackend::new()
        .with_delayed_upload_reply("vid_slow", "pending", Duration::from_millis(200))
        .with_delayed_upload_reply("vid_fast", "pending", Duration::from_millis(10));
    let (app, _surface, backend) = setup(backend, &Config::default());

    let (first, second) = tokio::join!(
        app.upload_video(Some(VideoFile::from_bytes("first.mp4", vec![0; 4]))),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            app.upload_video(Some(VideoFile::from_bytes("second.mp4", vec![0; 4]))).await
        }
    );
    assert_eq!(assert_ok!(first).video_id, "vid_slow");
    assert_eq!(assert_ok!(second).video_id, "vid_fast");
    assert_eq!(backend.analyze_calls(), 2);

    let state = app.snapshot().await;
    assert_eq!(state.upload.last_assigned_id.as_deref(), Some("vid_fast"));
    assert!(state.upload.result_message.contains("second.mp4"));
    assert_eq!(state.poll.video_id_input, "vid_fast");
    assert!(!state.upload.loading);
}
