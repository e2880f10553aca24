//! Tests for the response envelope decode contract.

use lockbox_protocol::{LoginResponse, Response, SecretsSyncResponse, decode_response, encode_response};

#[test]
fn ok_envelope_round_trips() {
    let envelope = Response::ok(LoginResponse { authenticated: true });
    let doc = encode_response(&envelope).unwrap();
    let back: Response<LoginResponse> = decode_response(&doc).unwrap();
    assert!(back.success);
    assert!(back.data.unwrap().authenticated);
    assert!(back.error_message.is_none());
}

#[test]
fn err_envelope_round_trips() {
    let envelope: Response<LoginResponse> = Response::err("Invalid access token.");
    let doc = encode_response(&envelope).unwrap();
    let back: Response<LoginResponse> = decode_response(&doc).unwrap();
    assert!(!back.success);
    assert!(back.data.is_none());
    assert_eq!(back.error_message.as_deref(), Some("Invalid access token."));
}

#[test]
fn success_with_error_message_is_malformed() {
    let doc = r#"{"success":true,"data":{"authenticated":true},"errorMessage":"boom"}"#;
    let err = decode_response::<LoginResponse>(doc).unwrap_err();
    assert!(err.to_string().contains("malformed response"));
}

#[test]
fn failure_without_error_message_is_malformed() {
    let doc = r#"{"success":false}"#;
    assert!(decode_response::<LoginResponse>(doc).is_err());
}

#[test]
fn failure_with_data_is_malformed() {
    let doc = r#"{"success":false,"data":{"authenticated":false},"errorMessage":"no"}"#;
    assert!(decode_response::<LoginResponse>(doc).is_err());
}

#[test]
fn data_of_the_wrong_shape_is_malformed() {
    let doc = r#"{"success":true,"data":{"authenticated":"yes"}}"#;
    assert!(decode_response::<LoginResponse>(doc).is_err());
}

#[test]
fn not_json_is_malformed() {
    assert!(decode_response::<LoginResponse>("definitely not json").is_err());
}

#[test]
fn unchanged_sync_envelope_omits_secrets_key() {
    let envelope = Response::ok(SecretsSyncResponse {
        has_changes: false,
        secrets: None,
    });
    let doc = encode_response(&envelope).unwrap();
    assert!(!doc.contains("secrets"));
    assert!(!doc.contains("null"));
}

#[test]
fn payload_types_need_no_default_impl_to_decode() {
    // `LoginResponse` has no `Default`; decoding an envelope with the
    // `data` key absent must still work for it.
    let doc = r#"{"success":false,"errorMessage":"Invalid access token."}"#;
    let back: Response<LoginResponse> = decode_response(doc).unwrap();
    assert!(back.data.is_none());
}

#[test]
fn explicit_null_error_message_decodes_as_absent() {
    // Engines that emit `"errorMessage": null` mean the same as omitting it.
    let doc = r#"{"success":true,"data":{"authenticated":true},"errorMessage":null}"#;
    let back: Response<LoginResponse> = decode_response(doc).unwrap();
    assert!(back.success);
    assert!(back.error_message.is_none());
}
