use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use dukascan_client::flows::{self, Notice};
use dukascan_client::types::{DUPLICATE, NETWORK_ERROR, SAVED, SAVE_FAILED};
use dukascan_client::{InMemorySettingsStore, SaveOutcome, SyncClient, SyncResult};
use dukascan_core::Product;
use dukascan_infra::{InMemoryTable, ProductTable};

struct MockRemote {
    url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl MockRemote {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { url, handle }
    }

    /// Remote that answers every POST with `reply`.
    async fn replying(status: StatusCode, reply: Value) -> Self {
        let app = Router::new().route(
            "/",
            get(|| async { "ok" }).post(move || {
                let reply = reply.clone();
                async move { (status, Json(reply)) }
            }),
        );
        Self::spawn(app).await
    }
}

impl Drop for MockRemote {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn widget() -> Product {
    Product::new("1234567890123", "Widget", "19.99")
        .with_description("A widget")
        .with_quantity("5")
}

#[tokio::test]
async fn duplicate_reply_is_a_failure() {
    let remote = MockRemote::replying(
        StatusCode::OK,
        json!({"status": "duplicate", "message": "This barcode already exists in the inventory"}),
    )
    .await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::failed(DUPLICATE));
}

#[tokio::test]
async fn duplicate_reply_with_null_message_is_still_duplicate() {
    let remote =
        MockRemote::replying(StatusCode::OK, json!({"status": "duplicate", "message": null})).await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::failed(DUPLICATE));
}

#[tokio::test]
async fn error_reply_with_null_message_is_generic_failure() {
    let remote =
        MockRemote::replying(StatusCode::OK, json!({"status": "error", "message": null})).await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::failed(SAVE_FAILED));
}

#[tokio::test]
async fn http_500_is_generic_failure() {
    let remote = MockRemote::replying(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"status": "success"}),
    )
    .await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::failed(SAVE_FAILED));
}

#[tokio::test]
async fn error_reply_surfaces_remote_message() {
    let remote = MockRemote::replying(
        StatusCode::OK,
        json!({"status": "error", "message": "Missing required fields: barcode, name, or price"}),
    )
    .await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(
        result,
        SyncResult::failed("Missing required fields: barcode, name, or price")
    );
}

#[tokio::test]
async fn reply_without_status_counts_as_saved() {
    let remote = MockRemote::replying(StatusCode::OK, json!({"ok": true})).await;

    let outcome = SyncClient::new().save_outcome(&remote.url, &widget()).await;
    assert_eq!(outcome, SaveOutcome::Saved { row: None });
}

#[tokio::test]
async fn non_json_reply_is_generic_failure() {
    let app = Router::new().route("/", axum::routing::post(|| async { "<html>oops</html>" }));
    let remote = MockRemote::spawn(app).await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::failed(SAVE_FAILED));
}

#[tokio::test]
async fn body_carries_all_fields_as_strings() {
    let seen = Arc::new(tokio::sync::Mutex::new(None::<Value>));
    let sink = seen.clone();
    let app = Router::new().route(
        "/",
        axum::routing::post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().await = Some(body);
                Json(json!({"status": "success", "message": "Product saved successfully!"}))
            }
        }),
    );
    let remote = MockRemote::spawn(app).await;

    let result = SyncClient::new().save_product(&remote.url, &widget()).await;
    assert_eq!(result, SyncResult::ok(SAVED));

    let body = seen.lock().await.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "barcode": "1234567890123",
            "name": "Widget",
            "description": "A widget",
            "price": "19.99",
            "quantity": "5",
        })
    );
}

#[tokio::test]
async fn unreachable_remote_is_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let result = SyncClient::new().save_product(&url, &widget()).await;
    assert_eq!(result, SyncResult::failed(NETWORK_ERROR));

    let probe = SyncClient::new().test_connection(&url).await;
    assert_eq!(
        probe,
        SyncResult::failed("Connection failed. Please check the URL and try again.")
    );
}

#[tokio::test]
async fn test_connection_reports_status_code() {
    let ok = MockRemote::replying(StatusCode::OK, json!({})).await;
    assert_eq!(
        SyncClient::new().test_connection(&ok.url).await,
        SyncResult::ok("Connection successful!")
    );

    let app = Router::new().route("/", get(|| async { StatusCode::FORBIDDEN }));
    let forbidden = MockRemote::spawn(app).await;
    assert_eq!(
        SyncClient::new().test_connection(&forbidden.url).await,
        SyncResult::failed("Connection failed with status: 403")
    );
}

#[tokio::test]
async fn submit_against_real_append_service() {
    let table = Arc::new(InMemoryTable::default());
    let remote = MockRemote::spawn(dukascan_api::app::build_app(table.clone())).await;
    let settings = InMemorySettingsStore::with_script_url(&remote.url);
    let client = SyncClient::new();

    let first = flows::submit_product(&settings, &client, &widget()).await;
    assert_eq!(first, Notice::new("Success", "Product saved successfully!"));

    let second = flows::submit_product(&settings, &client, &widget()).await;
    assert_eq!(
        second,
        Notice::new("Error", "This barcode already exists in your inventory.")
    );

    assert_eq!(
        client.save_outcome(&remote.url, &Product::new("42", "Lamp", "3")).await,
        SaveOutcome::Saved { row: Some(3) }
    );
    assert_eq!(table.rows().unwrap().len(), 2);

    let probe = flows::test_settings(&client, &remote.url).await;
    assert_eq!(probe, Notice::new("Success", "Connection successful!"));
}
