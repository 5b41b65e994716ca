use crate::e2e::helpers;

use helpers::api_client::FormPart;
use helpers::{stubs::UNPRONOUNCEABLE, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;
use uuid::Uuid;

fn csv_file<'a>(filename: &'a str, contents: &'a [u8]) -> FormPart<'a> {
    FormPart::File {
        name: "file",
        filename,
        contents,
    }
}

fn audio_names(body: &Value) -> Vec<String> {
    body.get("audios")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .filter_map(|audio| audio.get("name").and_then(|n| n.as_str()))
        .map(str::to_string)
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pronounce_every_name_and_log_them_all(ctx: &TestContext) {
    let contents = format!("Ada,{}\nGrace\n\nLinus\n", UNPRONOUNCEABLE);

    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("class.csv", contents.as_bytes())])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body.get("filename"), Some(&json!("class.csv")));
    assert_eq!(body.get("names_count"), Some(&json!(4)));
    assert_eq!(body.get("status"), Some(&json!("logged")));
    assert_eq!(audio_names(body), vec!["Ada", "Grace", "Linus"]);

    let failed = body.get("failed").and_then(|v| v.as_array()).unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].get("name"), Some(&json!(UNPRONOUNCEABLE)));

    // The log holds the parsed names, including the one that failed synthesis
    let id = body
        .get("operation_id")
        .and_then(|v| v.as_str())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap();
    assert_eq!(
        ctx.fixtures.names_json(id).await.unwrap(),
        json!({"names": ["Ada", UNPRONOUNCEABLE, "Grace", "Linus"], "count": 4})
    );

    assert!(ctx.audio_dir.join("Ada.mp3").exists());
    assert!(ctx.audio_dir.join("Linus.mp3").exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_the_header_row_when_asked(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/upload",
            &[
                FormPart::Text {
                    name: "has_header",
                    value: "true",
                },
                csv_file("names.csv", b"name\nAda\nGrace\n"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(audio_names(response.json()), vec!["Ada", "Grace"]);
    assert_eq!(*ctx.tts.calls.lock(), vec!["Ada".to_string(), "Grace".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_duplicate_names_in_order(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("dupes.csv", b"Zoe\nAl\nZoe\n")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let uploads = ctx.store.joined_csv_uploads(None).await.unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].names, vec!["Zoe", "Al", "Zoe"]);
    assert_eq!(uploads[0].names_count, 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_names_differing_in_punctuation_their_own_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("names.csv", b"Ana\nAna!\nA/na\n")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let urls: Vec<String> = response
        .json()
        .get("audios")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .filter_map(|audio| audio.get("audio_url").and_then(|u| u.as_str()))
        .map(str::to_string)
        .collect();
    assert_eq!(urls.len(), 3);
    let mut distinct = urls.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), 3);

    for url in &urls {
        ctx.client.get(url).await.unwrap().assert_status(StatusCode::OK);
    }
    assert!(ctx.audio_dir.join("Ana%21.mp3").exists());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_log_an_empty_upload(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("empty.csv", b"")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body.get("names_count"), Some(&json!(0)));
    assert!(audio_names(body).is_empty());
    assert_eq!(ctx.fixtures.count("csv_upload_entry").await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_the_upload_under_its_basename(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/upload",
            &[csv_file("../../etc/roster.csv", b"Ada\n")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json().get("filename"), Some(&json!("roster.csv")));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_non_csv_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("names.txt", b"Ada\n")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json().get("message"), Some(&json!("Invalid file format")));
    assert_eq!(ctx.fixtures.count("operation").await.unwrap(), 0);
    assert!(ctx.tts.calls.lock().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_csv_that_is_not_utf8(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/api/upload", &[csv_file("latin1.csv", b"Jos\xe9\nRen\xe9e\n")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.fixtures.count("operation").await.unwrap(), 0);
    assert!(ctx.tts.calls.lock().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_form_without_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/upload",
            &[FormPart::Text {
                name: "has_header",
                value: "false",
            }],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.fixtures.count("operation").await.unwrap(), 0);
}

#[tokio::test]
async fn it_should_process_uploads_when_audit_logging_is_disabled() {
    let client = helpers::start_unlogged_app().await;

    let response = client
        .post_multipart("/api/upload", &[csv_file("names.csv", b"Ada\nGrace\n")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body.get("status"), Some(&json!("unlogged")));
    assert_eq!(audio_names(body), vec!["Ada", "Grace"]);
}
