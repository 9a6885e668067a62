//! Console commands end to end

use pharma_console::{run_check, run_diff, ConsoleConfig, ConsoleError};
use pharma_lookup::LookupKind;
use pharma_validation::{FieldOutcome, ReasonCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::net::SocketAddr;
use tempfile::NamedTempFile;
use warp::http::StatusCode;
use warp::Filter;

fn json_file(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

async fn start_service() -> SocketAddr {
    let products = warp::path!("api" / "productos" / "sku" / String).map(|sku: String| {
        let status = if sku == "SKU-1" {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        warp::reply::with_status(warp::reply::json(&json!({ "sku": sku })), status)
    });
    let (addr, server) = warp::serve(products).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

#[test]
fn diff_without_baseline_returns_full_form() {
    let current = json_file(&json!({ "name": "X", "price": 10 }));

    let changes = run_diff(None, current.path()).unwrap();

    assert_eq!(changes.to_json(), json!({ "name": "X", "price": 10 }));
}

#[test]
fn diff_against_baseline_returns_changed_fields() {
    let baseline = json_file(&json!({ "name": "A", "price": 10, "active": true }));
    let current = json_file(&json!({ "name": "A", "price": 20, "active": false }));

    let changes = run_diff(Some(baseline.path()), current.path()).unwrap();

    assert_eq!(changes.to_json(), json!({ "price": 20, "active": false }));
}

#[test]
fn diff_rejects_non_object_files() {
    let current = json_file(&json!(["not", "an", "entity"]));

    let err = run_diff(None, current.path()).unwrap_err();

    assert!(matches!(err, ConsoleError::Entity { .. }));
}

#[test]
fn diff_reports_missing_file() {
    let err = run_diff(None, std::path::Path::new("/nonexistent/current.json")).unwrap_err();
    assert!(matches!(err, ConsoleError::Io { .. }));
}

#[tokio::test]
async fn check_confirms_existing_product() {
    let addr = start_service().await;
    let config = ConsoleConfig::default().with_base_url(format!("http://{addr}/api"));

    let outcome = run_check(&config, LookupKind::Product, " SKU-1 ").await.unwrap();

    assert_eq!(outcome, FieldOutcome::Valid);
}

#[tokio::test]
async fn check_reports_missing_product() {
    let addr = start_service().await;
    let config = ConsoleConfig::default().with_base_url(format!("http://{addr}/api"));

    let outcome = run_check(&config, LookupKind::Product, "SKU-404").await.unwrap();

    assert_eq!(outcome, FieldOutcome::invalid(ReasonCode::ProductNotExists, "SKU-404"));
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({ "productoNotExists": { "value": "SKU-404" } })
    );
}

#[tokio::test]
async fn check_rejects_unusable_base_url() {
    let config = ConsoleConfig::default().with_base_url("not a url");

    let err = run_check(&config, LookupKind::Salesperson, "VE-01").await.unwrap_err();

    assert!(matches!(err, ConsoleError::Lookup(_)));
}

async fn run_binary(args: &[&str]) -> std::process::Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_pharma-console"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn check_command_exits_with_failure_for_missing_product() {
    let addr = start_service().await;
    let base_url = format!("http://{addr}/api");

    let output = run_binary(&["check", "--kind", "product", "--base-url", &base_url, "SKU-404"]).await;

    assert_eq!(output.status.code(), Some(1));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!({ "productoNotExists": { "value": "SKU-404" } }));
}

#[tokio::test]
async fn check_command_succeeds_for_existing_product() {
    let addr = start_service().await;
    let base_url = format!("http://{addr}/api");

    let output = run_binary(&["check", "--kind", "product", "--base-url", &base_url, "SKU-1"]).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "null");
}
