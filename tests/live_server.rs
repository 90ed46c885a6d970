use reqwest::Client;
use sensor_sink::{build_router, serve, SensorStore, StoreView};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::Duration;

#[tokio::test]
async fn device_push_over_tcp_records_peer_ip() {
    let store = Arc::new(SensorStore::new());
    let app = build_router(store.clone(), Duration::from_secs(5));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        serve(listener, app, async {
            stop_rx.await.ok();
        })
        .await
        .unwrap();
    });

    let client = Client::builder().build().unwrap();
    let base = format!("http://{addr}/api/data");

    let resp = client
        .post(&base)
        .json(&json!({"sensor": "dht22", "value1": 22.4, "value2": 48.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let view: StoreView = client.get(&base).send().await.unwrap().json().await.unwrap();
    let latest = view.sensor_data.unwrap();
    assert_eq!(latest["client_ip"], "127.0.0.1");
    assert_eq!(latest["sensor"], "dht22");
    assert_eq!(view.history.len(), 1);

    let resp = client
        .post(&base)
        .header("content-type", "application/json")
        .body("[1,2,3]")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(store.snapshot().await.history.len(), 1);

    drop(client);
    stop_tx.send(()).ok();
    handle.await.unwrap();
}
