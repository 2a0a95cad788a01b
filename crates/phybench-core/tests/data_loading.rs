//! Loader behaviour against files, inline bytes and unreachable sources.

use phybench_core::{
    load, load_or_empty, source_for, BytesSource, DataLoadError, Field, FileSource,
    IntegrityError, LeaderboardError, ScoreType, REFERENCE_BASELINE_ID,
};
use serde_json::{json, Value};
use std::path::PathBuf;

fn full_scores(base: f64) -> Value {
    json!({
        "ALL": base, "MECHANICS": base, "ELECTRICITY": base, "THERMODYNAMICS": base,
        "OPTICS": base, "MODERN": base, "ADVANCED": base
    })
}

fn entry_json(id: &str, eed: f64, acc: f64) -> Value {
    json!({
        "name": id.to_uppercase(),
        "id": id,
        "icon": "openai",
        "org": "Org",
        "eed": full_scores(eed),
        "acc": full_scores(acc),
    })
}

fn shipped_data_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/leaderboard.json")
}

#[tokio::test]
async fn loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leaderboard.json");
    let doc = json!([entry_json("a", 50.0, 40.0), entry_json("b", 80.0, 20.0)]);
    std::fs::write(&path, doc.to_string()).expect("write");

    let board = load(&FileSource::new(&path)).await.expect("load");
    assert_eq!(board.len(), 2);
    assert_eq!(board.entries()[1].value(ScoreType::Eed, Field::All), 80.0);
}

#[tokio::test]
async fn optional_note_is_read() {
    let mut e = entry_json("a", 10.0, 10.0);
    e["note"] = json!("evaluated without tools");
    let source = BytesSource::new("inline", json!([e]).to_string());
    let board = load(&source).await.expect("load");
    assert_eq!(board.entries()[0].note(), Some("evaluated without tools"));
}

#[tokio::test]
async fn malformed_json_yields_empty_view() {
    let source = BytesSource::new("broken", "[{\"id\": \"a\",");
    let err = load(&source).await.unwrap_err();
    assert!(matches!(
        err,
        LeaderboardError::DataLoad(DataLoadError::Malformed(_))
    ));

    let board = load_or_empty(&source).await.expect("recoverable");
    assert!(board.is_empty());
}

#[tokio::test]
async fn wrong_shape_yields_empty_view() {
    let source = BytesSource::new("object", json!({"models": []}).to_string());
    let board = load_or_empty(&source).await.expect("recoverable");
    assert!(board.is_empty());
}

#[tokio::test]
async fn unreachable_file_yields_empty_view() {
    let source = FileSource::new("/nonexistent/phybench/leaderboard.json");
    let err = load(&source).await.unwrap_err();
    assert!(matches!(
        err,
        LeaderboardError::DataLoad(DataLoadError::Io { .. })
    ));
    assert!(load_or_empty(&source).await.expect("recoverable").is_empty());
}

#[tokio::test]
async fn unreachable_url_yields_empty_view() {
    let source = source_for("http://127.0.0.1:9/leaderboard.json").expect("source");
    let board = load_or_empty(source.as_ref()).await.expect("recoverable");
    assert!(board.is_empty());
}

#[tokio::test]
async fn missing_optics_key_is_rejected_not_zeroed() {
    let mut e = entry_json("m", 50.0, 40.0);
    e["eed"]
        .as_object_mut()
        .expect("eed object")
        .remove("OPTICS");
    let source = BytesSource::new("inline", json!([entry_json("ok", 1.0, 1.0), e]).to_string());

    let err = load(&source).await.unwrap_err();
    match &err {
        LeaderboardError::Integrity(IntegrityError::MissingField {
            id,
            score_type,
            field,
        }) => {
            assert_eq!(id, "m");
            assert_eq!(*score_type, ScoreType::Eed);
            assert_eq!(*field, Field::Optics);
        }
        other => panic!("expected missing field, got {other}"),
    }

    // not a recoverable load failure: the empty fallback does not hide it
    assert!(load_or_empty(&source).await.is_err());
}

#[tokio::test]
async fn missing_acc_object_is_rejected_not_emptied() {
    let mut e = entry_json("no-acc", 50.0, 40.0);
    e.as_object_mut().expect("entry object").remove("acc");
    let source = BytesSource::new("inline", json!([entry_json("ok", 1.0, 1.0), e]).to_string());

    let err = load(&source).await.unwrap_err();
    assert!(
        matches!(
            &err,
            LeaderboardError::Integrity(IntegrityError::MissingScoreObject {
                id,
                score_type: ScoreType::Acc,
            }) if id == "no-acc"
        ),
        "unexpected error: {err}"
    );
    assert!(load_or_empty(&source).await.is_err());
}

#[tokio::test]
async fn null_score_is_rejected_not_emptied() {
    let mut e = entry_json("nullish", 50.0, 40.0);
    e["eed"]["OPTICS"] = Value::Null;
    let source = BytesSource::new("inline", json!([e]).to_string());

    let err = load(&source).await.unwrap_err();
    assert!(
        matches!(
            &err,
            LeaderboardError::Integrity(IntegrityError::MissingField {
                id,
                score_type: ScoreType::Eed,
                field: Field::Optics,
            }) if id == "nullish"
        ),
        "unexpected error: {err}"
    );
    assert!(load_or_empty(&source).await.is_err());
}

#[tokio::test]
async fn string_score_is_rejected_not_emptied() {
    let mut e = entry_json("stringy", 50.0, 40.0);
    e["acc"]["ALL"] = json!("40.0");
    let source = BytesSource::new("inline", json!([e]).to_string());

    let err = load_or_empty(&source).await.unwrap_err();
    assert!(matches!(
        err,
        LeaderboardError::Integrity(IntegrityError::NotANumber {
            field: Field::All,
            ..
        })
    ));
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let source = BytesSource::new(
        "inline",
        json!([entry_json("a", 1.0, 1.0), entry_json("a", 2.0, 2.0)]).to_string(),
    );
    let err = load(&source).await.unwrap_err();
    assert!(matches!(
        err,
        LeaderboardError::Integrity(IntegrityError::DuplicateId(id)) if id == "a"
    ));
}

#[tokio::test]
async fn out_of_range_score_is_rejected() {
    let mut e = entry_json("a", 1.0, 1.0);
    e["acc"]["MODERN"] = json!(140.0);
    let source = BytesSource::new("inline", json!([e]).to_string());
    let err = load(&source).await.unwrap_err();
    assert!(matches!(
        err,
        LeaderboardError::Integrity(IntegrityError::OutOfRange {
            field: Field::Modern,
            score_type: ScoreType::Acc,
            ..
        })
    ));
}

#[tokio::test]
async fn shipped_data_file_is_valid() {
    let board = load(&FileSource::new(shipped_data_file()))
        .await
        .expect("shipped data loads");
    assert!(board.len() >= 2);
    assert!(board.get(REFERENCE_BASELINE_ID).is_some());
}
