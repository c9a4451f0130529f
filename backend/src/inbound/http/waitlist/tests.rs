//! Regression coverage for the waitlist handlers.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, http::StatusCode, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::auth::API_KEY_HEADER;
use crate::inbound::http::test_utils::{TEST_API_KEY, test_state};

use super::*;

/// Initialised test service over a fresh in-memory repository.
async fn test_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<BoxBody>,
    Error = actix_web::Error,
> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .service(create_entry)
            .service(list_entries)
            // Literal paths before the `{id}` matcher.
            .service(count_entries)
            .service(check_email)
            .service(get_entry)
            .service(delete_entry),
    )
    .await
}

fn submission() -> Value {
    json!({
        "document_type": "CC",
        "document_number": "12345678",
        "first_name": "maría josé",
        "last_name": "garcía lópez",
        "email": "maria@example.com",
        "country_code": "+57",
        "phone": "300 123 4567",
        "city": "barranquilla",
        "referral_source": "social",
        "terms_accepted": true
    })
}

async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
    >,
    payload: Value,
) -> ServiceResponse<BoxBody> {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/waitlist")
            .insert_header((API_KEY_HEADER, TEST_API_KEY))
            .set_json(payload)
            .to_request(),
    )
    .await
}

#[actix_web::test]
async fn missing_api_key_is_a_request_validation_failure() {
    let app = test_app().await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/waitlist").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn wrong_api_key_is_unauthorized() {
    let app = test_app().await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/waitlist")
            .insert_header((API_KEY_HEADER, "wrong-key"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&Value::Bool(false)));
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Invalid or missing API key")
    );
}

#[actix_web::test]
async fn registration_returns_normalized_payload_and_position() {
    let app = test_app().await;

    let response = register(&app, submission()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&Value::Bool(true)));
    let message = body.get("message").and_then(Value::as_str).expect("message");
    assert!(message.contains("María José"));

    let data = body.get("data").expect("data object");
    assert_eq!(
        data.get("first_name").and_then(Value::as_str),
        Some("María José")
    );
    assert_eq!(
        data.get("last_name").and_then(Value::as_str),
        Some("García López")
    );
    assert_eq!(
        data.get("email").and_then(Value::as_str),
        Some("maria@example.com")
    );
    assert_eq!(data.get("position").and_then(Value::as_u64), Some(1));
    assert!(data.get("registered_at").is_some());
}

#[actix_web::test]
async fn registration_lower_cases_the_email() {
    let app = test_app().await;
    let mut payload = submission();
    payload["email"] = json!("MARIA@EJEMPLO.COM");

    let response = register(&app, payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/data/email").and_then(Value::as_str),
        Some("maria@ejemplo.com")
    );
}

#[rstest]
#[case(json!({"terms_accepted": false}))]
#[case(json!({"document_number": "12345"}))]
#[case(json!({"email": "not-an-email"}))]
#[case(json!({"phone": "123456"}))]
#[actix_web::test]
async fn invalid_submissions_are_unprocessable(#[case] patch: Value) {
    let app = test_app().await;
    let mut payload = submission();
    for (key, value) in patch.as_object().expect("patch object") {
        payload[key.as_str()] = value.clone();
    }

    let response = register(&app, payload).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&Value::Bool(false)));
    assert_eq!(body.get("status_code").and_then(Value::as_u64), Some(422));
    assert!(body.get("details").is_some());
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = test_app().await;
    assert_eq!(register(&app, submission()).await.status(), StatusCode::CREATED);

    let mut second = submission();
    second["document_number"] = json!("9999999999");
    let response = register(&app, second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    let error = body.get("error").and_then(Value::as_str).expect("error");
    assert!(error.to_lowercase().contains("email"));
}

#[actix_web::test]
async fn duplicate_document_is_a_conflict() {
    let app = test_app().await;
    assert_eq!(register(&app, submission()).await.status(), StatusCode::CREATED);

    let mut second = submission();
    second["email"] = json!("otra@example.com");
    let response = register(&app, second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    let error = body.get("error").and_then(Value::as_str).expect("error");
    assert!(error.to_lowercase().contains("document"));
}

#[actix_web::test]
async fn count_and_check_routes_win_over_the_id_matcher() {
    let app = test_app().await;
    assert_eq!(register(&app, submission()).await.status(), StatusCode::CREATED);

    let count = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/waitlist/count")
            .insert_header((API_KEY_HEADER, TEST_API_KEY))
            .to_request(),
    )
    .await;
    assert_eq!(count.status(), StatusCode::OK);
    let count_body: Value = actix_test::read_body_json(count).await;
    assert_eq!(count_body.get("total").and_then(Value::as_u64), Some(1));
    assert_eq!(
        count_body.get("message").and_then(Value::as_str),
        Some("1 person is waiting for the launch")
    );

    let check = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/waitlist/check/maria@example.com")
            .insert_header((API_KEY_HEADER, TEST_API_KEY))
            .to_request(),
    )
    .await;
    assert_eq!(check.status(), StatusCode::OK);
    let check_body: Value = actix_test::read_body_json(check).await;
    assert_eq!(check_body.get("exists"), Some(&Value::Bool(true)));
}

#[actix_web::test]
async fn list_returns_entry_details_without_audit_fields() {
    let app = test_app().await;
    assert_eq!(register(&app, submission()).await.status(), StatusCode::CREATED);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/waitlist?skip=0&limit=10")
            .insert_header((API_KEY_HEADER, TEST_API_KEY))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(
        entry.get("document_type").and_then(Value::as_str),
        Some("CC")
    );
    assert_eq!(
        entry.get("referral_source").and_then(Value::as_str),
        Some("social")
    );
    assert!(entry.get("terms_accepted").is_none());
    assert!(entry.get("origin_address").is_none());
}

#[actix_web::test]
async fn get_and_delete_report_missing_entries() {
    let app = test_app().await;

    for request in [
        actix_test::TestRequest::get().uri("/waitlist/99999"),
        actix_test::TestRequest::delete().uri("/waitlist/99999"),
    ] {
        let response = actix_test::call_service(
            &app,
            request
                .insert_header((API_KEY_HEADER, TEST_API_KEY))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn delete_confirms_with_the_display_name() {
    let app = test_app().await;
    let created = register(&app, submission()).await;
    let created_body: Value = actix_test::read_body_json(created).await;
    let id = created_body
        .pointer("/data/id")
        .and_then(Value::as_i64)
        .expect("entry id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/waitlist/{id}"))
            .insert_header((API_KEY_HEADER, TEST_API_KEY))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&Value::Bool(true)));
    assert_eq!(body.get("deleted_id").and_then(Value::as_i64), Some(id));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Entry for María José García López deleted successfully")
    );
}
