//! End-to-end test over a real socket
//!
//! Starts the server on an ephemeral port backed by the file store and talks
//! to it with an HTTP client, the way a deployed instance is used.

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use mathserver::{FileHistoryStore, WebServer};

#[tokio::test]
async fn test_calculations_persist_across_restarts() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("calculations.jsonl");

    let created_id = {
        let store = FileHistoryStore::open(&data_file).await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            WebServer::new(store)
                .serve(listener, async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let client = reqwest::Client::new();
        let response = client
            .post(format!("{base_url}/api/math"))
            .json(&json!({"num1": 12, "num2": 4, "operation": "multiply"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "12 × 4 = 48");

        let response = client
            .post(format!("{base_url}/api/math"))
            .json(&json!({"num1": 12, "num2": 0, "operation": "divide"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        drop(client);
        shutdown_tx.send(()).unwrap();
        server.await.unwrap().unwrap();

        body["calculationId"].as_str().unwrap().to_string()
    };

    // Second instance replays the journal
    let store = FileHistoryStore::open(&data_file).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        WebServer::new(store)
            .serve(listener, async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let history: Value = reqwest::get(format!("{base_url}/api/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["count"], 1);
    assert_eq!(history["calculations"][0]["id"], created_id.as_str());
    assert_eq!(history["calculations"][0]["result"], 48);

    let record: Value = reqwest::get(format!("{base_url}/api/calculation/{created_id}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["operation"], "multiplication");

    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
