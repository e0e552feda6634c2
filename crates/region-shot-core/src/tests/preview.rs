use crate::{
    PreviewManager, PreviewTarget, RegionId, RegionPayload,
    tests::fake_backend::{FakeBackend, png_bytes},
};

use std::sync::Arc;

fn draft(x1: i32, y1: i32, x2: i32, y2: i32) -> PreviewTarget {
    PreviewTarget::Draft(RegionPayload {
        name: "price".to_string(),
        x1,
        y1,
        x2,
        y2,
    })
}

/// WHAT: Repeated previews keep exactly one handle alive
/// WHY: Each superseded preview must be released
#[tokio::test]
async fn given_many_requests_when_each_succeeds_then_one_live_handle() {
    // Given: A manager over a backend that always renders
    let backend = Arc::new(FakeBackend::default());
    let mut manager = PreviewManager::new(Arc::clone(&backend));

    // When: Requesting five previews in a row
    for offset in 0..5 {
        manager.request(draft(0, 0, 10 + offset, 10)).await;
    }

    // Then: One handle alive, the latest one
    assert_eq!(manager.live_handles(), 1);
    assert_eq!(manager.current().map(|h| h.serial()), Some(5));
    assert_eq!(backend.state().calls.temp_preview, 5);
}

/// WHAT: A failed render releases the previous preview and yields None
/// WHY: A stale image must not stay on screen for new coordinates
#[tokio::test]
async fn given_existing_preview_when_next_render_fails_then_none_and_released() {
    // Given: One successful preview
    let backend = Arc::new(FakeBackend::default());
    let mut manager = PreviewManager::new(Arc::clone(&backend));
    assert!(manager.request(draft(0, 0, 10, 10)).await.is_some());

    // When: The next render fails
    backend.state().preview = None;
    let result = manager.request(draft(0, 0, 20, 20)).await;

    // Then: No preview, nothing alive
    assert!(result.is_none());
    assert!(manager.current().is_none());
    assert_eq!(manager.live_handles(), 0);
}

/// WHAT: Zero-area drafts never reach the backend
/// WHY: The backend cannot render an empty rectangle
#[tokio::test]
async fn given_zero_area_draft_when_requesting_then_no_request_and_none() {
    // Given: A manager showing a preview
    let backend = Arc::new(FakeBackend::default());
    let mut manager = PreviewManager::new(Arc::clone(&backend));
    manager.request(draft(0, 0, 10, 10)).await;

    // When: Requesting a zero-width draft
    let result = manager.request(draft(5, 0, 5, 10)).await;

    // Then: No request made, previous preview released
    assert!(result.is_none());
    assert_eq!(backend.state().calls.temp_preview, 1);
    assert_eq!(manager.live_handles(), 0);
}

/// WHAT: Temporary previews are sent under a placeholder name
/// WHY: The draft's real name is irrelevant to rendering
#[tokio::test]
async fn given_named_draft_when_previewing_then_placeholder_name_sent() {
    // Given: A draft called "price"
    let backend = Arc::new(FakeBackend::default());
    let mut manager = PreviewManager::new(Arc::clone(&backend));

    // When: Requesting its preview
    manager.request(draft(10, 20, 50, 60)).await;

    // Then: Sent as "temp" with the draft coordinates
    let payload = backend.state().last_temp_payload.clone();
    assert_eq!(
        payload,
        Some(RegionPayload {
            name: "temp".to_string(),
            x1: 10,
            y1: 20,
            x2: 50,
            y2: 60,
        })
    );
}

/// WHAT: Stored regions use the stored render endpoint
/// WHY: Persisted regions are rendered from backend coordinates
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_stored_target_when_requesting_then_region_preview_used_and_dimensions_read() {
    // Given: A backend rendering an 8x5 image
    let backend = Arc::new(FakeBackend::default());
    backend.state().preview = Some(png_bytes(8, 5));
    let mut manager = PreviewManager::new(Arc::clone(&backend));
    let id = RegionId::from("region-1");

    // When: Requesting the stored preview
    let handle = manager
        .request(PreviewTarget::Stored(id.clone()))
        .await
        .unwrap();

    // Then: Dimensions come from the image; only the stored endpoint was hit
    assert_eq!((handle.width(), handle.height()), (8, 5));
    assert_eq!(handle.target(), &PreviewTarget::Stored(id));
    assert!(!handle.bytes().is_empty());
    assert_eq!(backend.state().calls.stored_preview, 1);
    assert_eq!(backend.state().calls.temp_preview, 0);
}

/// WHAT: Bytes that are not an image are treated as no preview
/// WHY: A broken render must not be shown
#[tokio::test]
async fn given_non_image_bytes_when_requesting_then_none() {
    // Given: A backend answering with plain text
    let backend = Arc::new(FakeBackend::default());
    backend.state().preview = Some(b"not an image".to_vec());
    let mut manager = PreviewManager::new(Arc::clone(&backend));

    // When: Requesting a preview
    let result = manager.request(draft(0, 0, 10, 10)).await;

    // Then: Nothing to show, nothing alive
    assert!(result.is_none());
    assert_eq!(manager.live_handles(), 0);
}

/// WHAT: Releasing drops the handle on display
/// WHY: Closing a preview view must free its resources
#[tokio::test]
async fn given_preview_when_released_then_no_live_handles() {
    // Given: A preview on display
    let backend = Arc::new(FakeBackend::default());
    let mut manager = PreviewManager::new(backend);
    manager.request(draft(0, 0, 10, 10)).await;

    // When: Releasing it
    manager.release();

    // Then: Nothing alive
    assert!(manager.current().is_none());
    assert_eq!(manager.live_handles(), 0);
}
