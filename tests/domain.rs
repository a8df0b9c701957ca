//! Tests for wire-type serde shapes, the visitor lifecycle, quiz scoring,
//! and the client-side upload guards.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use gatepass_client::api::training::estimate_score;
use gatepass_client::api::visitors::visitor_query;
use gatepass_client::error::ApiError;
use gatepass_client::models::{
    DocumentType, LoginResponse, Role, Training, Visitor, VisitorCategory, VisitorFilters,
    VisitorStatus,
};
use gatepass_client::services::{MediaKind, upload_media};
use gatepass_client::session::SessionManager;
use gatepass_client::{ApiClient, ClientConfig};

fn test_client() -> ApiClient {
    let config = ClientConfig::new(
        "http://localhost:1/api",
        "http://localhost:1/admin",
        "http://localhost:1/upload",
        "test_preset",
    );
    ApiClient::new(config, Arc::new(SessionManager::default()))
}

fn sample_visitor(status: VisitorStatus) -> Visitor {
    let when = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    Visitor {
        id: "v-123456".into(),
        first_name: "Ada".into(),
        last_name: "Okafor".into(),
        email: "ada@example.com".into(),
        phone: "+14155550101".into(),
        purpose: "Quarterly audit".into(),
        host_employee: "host@example.com".into(),
        department: "Finance".into(),
        meeting_location: None,
        site_location: None,
        visit_start_date: when,
        visit_end_date: when,
        status,
        category: VisitorCategory::Visitor,
        check_in_time: None,
        check_out_time: None,
        training_completed: None,
        hazards: None,
        ppe: None,
        documents: None,
    }
}

// --- lifecycle ------------------------------------------------------------

#[test]
fn lifecycle_permits_only_forward_transitions() {
    use VisitorStatus::*;

    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Cancelled));
    assert!(Approved.can_transition_to(CheckedIn));
    assert!(Approved.can_transition_to(Cancelled));
    assert!(CheckedIn.can_transition_to(CheckedOut));

    assert!(!Approved.can_transition_to(Pending));
    assert!(!CheckedIn.can_transition_to(Cancelled));
    assert!(!CheckedOut.can_transition_to(CheckedIn));
    assert!(!Cancelled.can_transition_to(Approved));
    assert!(!Pending.can_transition_to(CheckedIn));
}

#[tokio::test]
async fn approving_a_checked_out_visitor_fails_locally() {
    let client = test_client();
    let visitor = sample_visitor(VisitorStatus::CheckedOut);

    let err = client.approve_visitor("tok", &visitor).await.unwrap_err();
    match err {
        ApiError::Validation(msg) => {
            assert_eq!(msg, "Cannot approve a visitor in status 'checked-out'")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejecting_a_checked_in_visitor_fails_locally() {
    let client = test_client();
    let visitor = sample_visitor(VisitorStatus::CheckedIn);

    let err = client.reject_visitor("tok", &visitor).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

// --- scoring --------------------------------------------------------------

#[test]
fn estimate_score_rounds_to_nearest_integer() {
    assert_eq!(estimate_score(4, 5, 70), (80, true));
    assert_eq!(estimate_score(2, 3, 70), (67, false));
    assert_eq!(estimate_score(1, 3, 33), (33, true));
    assert_eq!(estimate_score(0, 5, 70), (0, false));
    assert_eq!(estimate_score(5, 5, 100), (100, true));
}

#[test]
fn estimate_score_with_no_questions() {
    assert_eq!(estimate_score(0, 0, 0), (0, true));
    assert_eq!(estimate_score(0, 0, 70), (0, false));
}

// --- serde shapes ---------------------------------------------------------

#[test]
fn login_response_uses_camel_case_keys() {
    let body = r#"{
        "userId": "u1",
        "email": "ops@example.com",
        "firstName": "Sam",
        "lastName": "Reyes",
        "role": "receptionist",
        "accessToken": "at",
        "refreshToken": "rt"
    }"#;

    let login: LoginResponse = serde_json::from_str(body).unwrap();
    assert_eq!(login.user_id, "u1");
    assert_eq!(login.role, Role::Receptionist);
    assert_eq!(login.access_token, "at");
}

#[test]
fn unknown_role_string_defaults_to_employee() {
    assert_eq!(Role::from("superuser"), Role::Employee);
    assert_eq!(Role::from("admin"), Role::Admin);
}

#[test]
fn visitor_round_trips_ids_and_kebab_case_status() {
    let visitor = sample_visitor(VisitorStatus::CheckedIn);
    let json = serde_json::to_value(&visitor).unwrap();

    assert_eq!(json["_id"], "v-123456");
    assert_eq!(json["status"], "checked-in");
    assert_eq!(json["category"], "visitor");
    assert_eq!(json["firstName"], "Ada");

    let back: Visitor = serde_json::from_value(json).unwrap();
    assert_eq!(back.status, VisitorStatus::CheckedIn);
}

#[test]
fn training_kind_serializes_under_type_key() {
    let body = r#"{
        "_id": "t1",
        "title": "Site Safety",
        "description": "Induction",
        "type": "safety",
        "content": "<p>rules</p>",
        "questions": [
            {"question": "Hard hat area?", "options": ["Yes","No","Maybe","Never"], "correctAnswer": 0}
        ],
        "requiredScore": 70,
        "isActive": true
    }"#;

    let training: Training = serde_json::from_str(body).unwrap();
    assert_eq!(training.required_score, 70);
    assert_eq!(training.questions[0].correct_answer, 0);
    assert!(training.videos.is_empty());

    let json = serde_json::to_value(&training).unwrap();
    assert_eq!(json["type"], "safety");
}

// --- query building -------------------------------------------------------

#[test]
fn visitor_query_includes_only_set_filters() {
    let filters = VisitorFilters {
        status: Some(VisitorStatus::Pending),
        category: Some(VisitorCategory::Contractor),
        department: None,
        search: Some("okafor".into()),
        start_date: None,
        end_date: None,
    };

    let params = visitor_query(&filters);
    assert_eq!(
        params.pairs(),
        &[
            ("status".to_string(), "pending".to_string()),
            ("category".to_string(), "contractor".to_string()),
            ("search".to_string(), "okafor".to_string()),
        ]
    );
}

#[test]
fn empty_filters_produce_no_query() {
    assert!(visitor_query(&VisitorFilters::default()).is_empty());
}

// --- upload guards --------------------------------------------------------

#[tokio::test]
async fn empty_document_upload_is_rejected_before_network() {
    let client = test_client();
    let err = client
        .upload_document(
            "tok",
            "v-123456",
            "id.pdf",
            "application/pdf",
            Vec::new(),
            DocumentType::Id,
            None,
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "No file selected"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_document_upload_is_rejected_before_network() {
    let client = test_client();
    let bytes = vec![0u8; 5 * 1024 * 1024 + 1];
    let err = client
        .upload_document(
            "tok",
            "v-123456",
            "id.pdf",
            "application/pdf",
            bytes,
            DocumentType::Id,
            None,
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(msg) => {
            assert_eq!(msg, "File is too large. Documents must be 5MB or smaller.")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn media_upload_enforces_per_kind_limits() {
    let config = ClientConfig::new(
        "http://localhost:1/api",
        "http://localhost:1/admin",
        "http://localhost:1/upload",
        "test_preset",
    );

    let oversized_photo = vec![0u8; 6 * 1024 * 1024];
    let err = upload_media(&config, MediaKind::Photo, "image/png", &oversized_photo)
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "File is too large. Maximum size is 5MB."),
        other => panic!("expected validation error, got {other:?}"),
    }

    let err = upload_media(&config, MediaKind::TrainingDocument, "application/pdf", &[])
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "No file selected"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn video_upload_limit_is_exactly_one_hundred_megabytes() {
    let config = ClientConfig::new(
        "http://localhost:1/api",
        "http://localhost:1/admin",
        "http://localhost:1/upload",
        "test_preset",
    );

    // At the ceiling the guard passes; the call then fails on transport
    // because the host is unroutable, proving it reached the network stage.
    let at_limit = vec![0u8; 100 * 1024 * 1024];
    let err = upload_media(&config, MediaKind::TrainingVideo, "video/mp4", &at_limit)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    let over_limit = vec![0u8; 100 * 1024 * 1024 + 1];
    let err = upload_media(&config, MediaKind::TrainingVideo, "video/mp4", &over_limit)
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "File is too large. Maximum size is 100MB."),
        other => panic!("expected validation error, got {other:?}"),
    }
}
