//! In-process tests for the HTTP API.

use std::sync::Arc;

use ark_bn254::Fr;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use merkle_core::{CircuitInput, DecimalElement, MerkleTree, PoseidonOracle};

use crate::config::ServerConfig;
use crate::handlers::max_proof_depth;
use crate::{app, AppState};

fn test_app(max_leaves: usize) -> (Router, Arc<PoseidonOracle>) {
    let oracle = Arc::new(PoseidonOracle::new());
    let state = Arc::new(AppState {
        oracle: Arc::clone(&oracle),
        config: ServerConfig {
            max_leaves,
            ..ServerConfig::default()
        },
    });
    (app(state), oracle)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn decimal_leaves(oracle: &PoseidonOracle, count: u64) -> Vec<String> {
    oracle
        .leaves_from_values(&(1..=count).collect::<Vec<_>>())
        .iter()
        .map(DecimalElement::to_decimal)
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app(16);
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_matches_core() {
    let (app, oracle) = test_app(16);
    let leaves = decimal_leaves(&oracle, 5);

    let (status, body) = post(app, "/api/tree/root", json!({ "leaves": leaves })).await;
    assert_eq!(status, StatusCode::OK);

    let parsed: Vec<Fr> = leaves.iter().map(|l| Fr::from_decimal(l).unwrap()).collect();
    let tree = MerkleTree::new(parsed, oracle.as_ref()).unwrap();
    assert_eq!(body["root"], tree.root().to_decimal());
    assert_eq!(body["leafCount"], 5);
    assert_eq!(body["height"], 3);
}

#[tokio::test]
async fn test_proof_then_verify() {
    let (app, oracle) = test_app(16);
    let leaves = decimal_leaves(&oracle, 8);

    let (status, proof) = post(
        app.clone(),
        "/api/tree/proof",
        json!({ "leaves": leaves, "index": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(proof["leaf"], leaves[2]);
    assert_eq!(proof["pathIndices"], json!([0, 1, 0]));
    assert_eq!(proof["pathElements"][0], leaves[3]);

    let (status, body) = post(app.clone(), "/api/proof/verify", proof.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    // Well-formed but wrong root: a normal negative answer.
    let mut tampered: CircuitInput = serde_json::from_value(proof).unwrap();
    tampered.root = "1".to_string();
    let (status, body) = post(app, "/api/proof/verify", json!(tampered)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_error_kinds() {
    let (app, oracle) = test_app(4);
    let leaves = decimal_leaves(&oracle, 3);

    let (status, body) = post(app.clone(), "/api/tree/root", json!({ "leaves": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidInput");

    for index in [-1, 3] {
        let (status, body) = post(
            app.clone(),
            "/api/tree/proof",
            json!({ "leaves": leaves, "index": index }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "IndexOutOfRange");
    }

    let malformed = json!({
        "leaf": "1",
        "pathElements": ["2", "3"],
        "pathIndices": [0],
        "root": "4",
    });
    let (status, body) = post(app.clone(), "/api/proof/verify", malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MalformedProof");

    let (status, body) = post(app.clone(), "/api/tree/root", json!({ "leaves": ["abc"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidElement");

    for direction in [-1i64, 256] {
        let bad_direction = json!({
            "leaf": "1",
            "pathElements": ["2"],
            "pathIndices": [direction],
            "root": "4",
        });
        let (status, body) = post(app.clone(), "/api/proof/verify", bad_direction).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "MalformedProof", "direction={direction}");
    }

    let (status, body) = post(
        app.clone(),
        "/api/tree/proof",
        json!({ "leaves": leaves, "index": u64::MAX }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "IndexOutOfRange");

    // Empty leaves are reported before the index is looked at.
    let (status, body) = post(
        app.clone(),
        "/api/tree/proof",
        json!({ "leaves": [], "index": -1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidInput");

    let (status, body) = post(app.clone(), "/api/tree/root", json!({ "leafs": ["1"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidRequest");

    let too_many = decimal_leaves(&oracle, 5);
    let (status, body) = post(app, "/api/tree/root", json!({ "leaves": too_many })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "TooManyLeaves");
}

#[test]
fn test_max_proof_depth() {
    assert_eq!(max_proof_depth(1), 0);
    assert_eq!(max_proof_depth(2), 1);
    assert_eq!(max_proof_depth(16), 4);
    assert_eq!(max_proof_depth(17), 5);
}

#[tokio::test]
async fn test_verify_rejects_proofs_deeper_than_any_tree() {
    let (app, oracle) = test_app(16);

    // A 16-leaf tree has height 4; its proofs are accepted.
    let leaves = decimal_leaves(&oracle, 16);
    let (status, proof) = post(
        app.clone(),
        "/api/tree/proof",
        json!({ "leaves": leaves, "index": 15 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post(app.clone(), "/api/proof/verify", proof).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    for depth in [5usize, 200_000] {
        let deep = json!({
            "leaf": "1",
            "pathElements": vec!["2"; depth],
            "pathIndices": vec![0; depth],
            "root": "3",
        });
        let (status, body) = post(app.clone(), "/api/proof/verify", deep).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "depth={depth}");
        assert_eq!(body["kind"], "MalformedProof");
    }

    // Only one side oversized still counts.
    let lopsided = json!({
        "leaf": "1",
        "pathElements": ["2"],
        "pathIndices": vec![0; 64],
        "root": "3",
    });
    let (status, body) = post(app, "/api/proof/verify", lopsided).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MalformedProof");
}
