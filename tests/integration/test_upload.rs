use super::helpers::{
    FakeCardService, InMemoryStorage, StoredObject, build_handler, unreachable_url,
};
use axum::http::StatusCode;
use cards::{
    application::upload_card_image::dto::{CardImageUpdated, UploadCardImageRequest},
    config::ConfigError,
    presentation::lambda::{handler::CardImageHandler, response::FailureResponse},
};
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};

// "hello" in base64
const IMAGE: &str = "aGVsbG8=";

fn upload(card_id: &str, content_type: Option<&str>) -> UploadCardImageRequest {
    UploadCardImageRequest {
        card_id: Some(card_id.to_string()),
        base64_image: Some(IMAGE.to_string()),
        content_type: content_type.map(str::to_string),
    }
}

fn assert_failure(failure: &FailureResponse, status: u16, message: &str) {
    assert_eq!(failure.status_code, status, "unexpected failure: {}", failure);
    assert!(
        failure.message.contains(message),
        "expected message containing {:?}, got {:?}",
        message,
        failure.message
    );
}

#[tokio::test]
async fn upload_stores_image_and_links_card() {
    let fake = FakeCardService::default().with_card("abc123", r#"{"report":{"text":"flood"}}"#);
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let res = handler.process(upload("abc123", Some("image/jpeg"))).await.unwrap();

    assert_eq!(res.status_code, 200);
    assert_eq!(
        res.result,
        CardImageUpdated {
            card_id: "abc123".to_string(),
            updated: true
        }
    );
    assert_eq!(
        storage.objects(),
        vec![StoredObject {
            key: "abc123.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: b"hello".to_vec(),
        }]
    );
    let patches = fake.patches();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].card_id, "abc123");
    assert_eq!(patches[0].body, json!({ "image_url": "abc123.jpg" }));
}

#[tokio::test]
async fn gif_upload_keeps_gif_extension() {
    let fake = FakeCardService::default().with_card("abc123", "{}");
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    handler.process(upload("abc123", Some("image/gif"))).await.unwrap();

    assert_eq!(storage.objects()[0].key, "abc123.gif");
    assert_eq!(fake.patches()[0].body, json!({ "image_url": "abc123.gif" }));
}

#[tokio::test]
async fn missing_fields_are_rejected_before_any_call() {
    let fake = FakeCardService::default().with_card("abc123", "{}");
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let mut no_card = upload("abc123", None);
    no_card.card_id = None;
    let failure = handler.process(no_card).await.unwrap_err();
    assert_eq!(failure.message, "cardId is required");
    assert_eq!(failure.status_code, 400);

    let mut no_image = upload("abc123", None);
    no_image.base64_image = Some(String::new());
    let failure = handler.process(no_image).await.unwrap_err();
    assert_eq!(failure.message, "base64Image is required");
    assert_eq!(failure.status_code, 400);

    assert!(fake.lookups().is_empty());
    assert!(fake.patches().is_empty());
    assert!(storage.objects().is_empty());
}

#[tokio::test]
async fn unknown_card_returns_404_and_stores_nothing() {
    let fake = FakeCardService::default();
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("missing1", None)).await.unwrap_err();

    assert_failure(&failure, 404, "No card exists with cardId 'missing1'");
    assert_eq!(fake.lookups(), vec!["missing1".to_string()]);
    assert!(storage.objects().is_empty());
    assert!(fake.patches().is_empty());
}

#[tokio::test]
async fn card_with_image_returns_409_and_stores_nothing() {
    let fake = FakeCardService::default()
        .with_card("abc123", r#"{"report":{"image_url":"abc123.jpg"}}"#);
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 409, "This card already has an image 'abc123'");
    assert!(storage.objects().is_empty());
    assert!(fake.patches().is_empty());
}

#[tokio::test]
async fn non_string_image_reference_is_a_conflict() {
    let fake = FakeCardService::default()
        .with_card("numbered", r#"{"report":{"image_url":42}}"#)
        .with_card("flagged", r#"{"report":{"image_url":true}}"#);
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    for card_id in ["numbered", "flagged"] {
        let failure = handler.process(upload(card_id, None)).await.unwrap_err();
        assert_failure(&failure, 409, "This card already has an image");
    }
    assert!(storage.objects().is_empty());
    assert!(fake.patches().is_empty());
}

#[tokio::test]
async fn text_report_does_not_block_upload() {
    let fake = FakeCardService::default().with_card("abc123", r#"{"report":"text"}"#);
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let res = handler.process(upload("abc123", None)).await.unwrap();

    assert_eq!(res.status_code, 200);
    assert_eq!(storage.objects().len(), 1);
    assert_eq!(fake.patches().len(), 1);
}

#[tokio::test]
async fn false_card_body_returns_404() {
    let fake = FakeCardService::default().with_card("abc123", "false");
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 404, "No card exists with cardId 'abc123'");
    assert!(storage.objects().is_empty());
}

#[tokio::test]
async fn refused_update_returns_409_and_keeps_blob() {
    let fake = FakeCardService::default()
        .with_card("abc123", "{}")
        .with_patch_status(StatusCode::INTERNAL_SERVER_ERROR);
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(
        &failure,
        409,
        "An image was uploaded but the card record could not be updated for cardId 'abc123'",
    );
    assert_eq!(storage.objects().len(), 1);
    assert_eq!(storage.objects()[0].key, "abc123.jpg");
    assert_eq!(storage.objects()[0].content_type, "image/png");
}

#[tokio::test]
async fn record_service_error_status_returns_500() {
    let fake = FakeCardService::default().with_lookup_response(
        "abc123",
        StatusCode::SERVICE_UNAVAILABLE,
        "",
    );
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 500, "Problem retrieving card (status 503)");
    assert!(storage.objects().is_empty());
}

#[tokio::test]
async fn malformed_card_body_returns_500() {
    let fake = FakeCardService::default().with_card("abc123", "<html>oops</html>");
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 500, "malformed response: <html>oops</html>");
    assert!(storage.objects().is_empty());
}

#[tokio::test]
async fn unreachable_record_service_returns_500() {
    let storage = InMemoryStorage::default();
    let handler = build_handler(unreachable_url().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 500, "Record service request failed");
    assert!(storage.objects().is_empty());
}

#[tokio::test]
async fn store_failure_returns_500_without_update() {
    let fake = FakeCardService::default().with_card("abc123", "{}");
    let storage = InMemoryStorage::failing("AccessDenied: bucket policy");
    let handler = build_handler(fake.spawn().await, &storage);

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 500, "AccessDenied: bucket policy");
    assert!(fake.patches().is_empty());
}

#[tokio::test]
async fn misconfigured_function_fails_every_invocation() {
    let handler = CardImageHandler::misconfigured(ConfigError::Missing(vec![
        "CARD_IMAGE_BUCKET".to_string(),
    ]));

    let failure = handler.process(upload("abc123", None)).await.unwrap_err();

    assert_failure(&failure, 500, "Missing required environment variables");
}

#[tokio::test]
async fn handle_reports_failures_as_json_errors() {
    let fake = FakeCardService::default();
    let storage = InMemoryStorage::default();
    let handler = build_handler(fake.spawn().await, &storage);

    let event = LambdaEvent::new(upload("missing1", None), Context::default());
    let err = handler.handle(event).await.unwrap_err();

    let payload: Value = serde_json::from_str(&err.to_string()).unwrap();
    assert_eq!(
        payload,
        json!({ "statusCode": 404, "message": "No card exists with cardId 'missing1'" })
    );
}
