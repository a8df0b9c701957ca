//! Tests for the accepted QR validation response shapes.

use gatepass_client::api::access_control::{QrValidationResponse, QrVerdict};

fn verdict_of(body: &str) -> QrVerdict {
    serde_json::from_str::<QrValidationResponse>(body)
        .unwrap()
        .verdict()
}

#[test]
fn valid_flag_shape_grants() {
    assert_eq!(
        verdict_of(r#"{"valid":true,"visitorId":"123456"}"#),
        QrVerdict::Granted {
            visitor_id: "123456".into()
        }
    );
}

#[test]
fn valid_flag_false_denies() {
    assert_eq!(
        verdict_of(r#"{"valid":false,"visitorId":"123456"}"#),
        QrVerdict::Denied
    );
}

#[test]
fn valid_flag_without_visitor_id_denies() {
    assert_eq!(verdict_of(r#"{"valid":true}"#), QrVerdict::Denied);
}

#[test]
fn access_granted_shape_grants() {
    assert_eq!(
        verdict_of(r#"{"accessGranted":true,"visitorId":"123456"}"#),
        QrVerdict::Granted {
            visitor_id: "123456".into()
        }
    );
}

#[test]
fn access_granted_false_denies() {
    assert_eq!(
        verdict_of(r#"{"accessGranted":false,"visitorId":"123456"}"#),
        QrVerdict::Denied
    );
}

#[test]
fn wrapped_data_shape_grants() {
    assert_eq!(
        verdict_of(r#"{"data":{"visitorId":"123456"}}"#),
        QrVerdict::Granted {
            visitor_id: "123456".into()
        }
    );
}

#[test]
fn wrapped_data_without_visitor_id_denies() {
    assert_eq!(verdict_of(r#"{"data":{}}"#), QrVerdict::Denied);
}

#[test]
fn unrecognized_shape_denies() {
    assert_eq!(verdict_of(r#"{"status":"ok"}"#), QrVerdict::Denied);
    assert_eq!(verdict_of(r#"[1,2,3]"#), QrVerdict::Denied);
    assert_eq!(verdict_of("42"), QrVerdict::Denied);
}
