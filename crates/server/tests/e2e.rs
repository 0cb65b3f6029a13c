use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::records::FileRecordStore;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;
use server::AppState;

struct TestApp {
    base_url: String,
    store_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.store_path);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use an isolated temp file store per test run
    let store_path = std::env::temp_dir().join(format!("sos_e2e_{}.json", Uuid::new_v4()));
    let store = FileRecordStore::open(&store_path).await?;
    let app = routes::build_router(AppState::new(store), routes::build_cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, store_path })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn submit(app: &TestApp, body: Value) -> anyhow::Result<reqwest::Response> {
    Ok(client().post(format!("{}/sos", app.base_url)).json(&body).send().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_submit_valid_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = submit(&app, json!({"type": "medical", "location": {"lat": 14.5995, "lng": 120.9842}, "notes": "help"})).await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "SOS submitted successfully");
    let data = &body["data"];
    assert!(!data["id"].as_str().unwrap_or_default().is_empty());
    assert_eq!(data["status"], "active");
    assert_eq!(data["notes"], "help");
    let ts = data["timestamp"].as_i64().unwrap();
    assert_eq!(data["ttl"].as_i64().unwrap(), ts / 1000 + 604_800);
    assert!(data.get("updatedAt").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_submit_validation_errors() -> anyhow::Result<()> {
    let app = start_server().await?;

    let cases = [
        json!({"location": {"lat": 14.5, "lng": 120.9}}),
        json!({"type": "medical"}),
        json!({"type": "medical", "location": {"lat": 14.5}}),
        json!({"type": "medical", "location": {"lat": "north", "lng": 120.9}}),
        json!({"type": "medical", "location": {"lat": 95.0, "lng": 120.9}}),
        json!({"type": "earthquake", "location": {"lat": 14.5, "lng": 120.9}}),
    ];
    for body in cases {
        let res = submit(&app, body.clone()).await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "body {body}");
        let err = res.json::<Value>().await?;
        assert!(err["message"].is_string());
    }

    let res = client()
        .post(format!("{}/sos", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_zero_coordinates_are_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = submit(&app, json!({"type": "water", "location": {"lat": 0, "lng": 0}})).await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["location"]["lat"], 0.0);
    assert_eq!(body["data"]["notes"], "");
    Ok(())
}

#[tokio::test]
async fn e2e_list_filters_and_orders() -> anyhow::Result<()> {
    let app = start_server().await?;
    for (kind, notes) in [("food", "rice"), ("medical", "insulin"), ("food", "water too")] {
        let res = submit(&app, json!({"type": kind, "location": {"lat": 14.6, "lng": 121.0}, "notes": notes})).await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let body = client().get(format!("{}/sos", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(body["count"], 3);
    let stamps: Vec<i64> = data.iter().map(|r| r["timestamp"].as_i64().unwrap()).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(data[0]["notes"], "water too");

    let food = client().get(format!("{}/sos?type=food", app.base_url)).send().await?.json::<Value>().await?;
    let food = food["data"].as_array().unwrap();
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|r| r["type"] == "food"));

    let all = client().get(format!("{}/sos?type=all", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    for unknown in ["volcano", "Food"] {
        let res = client().get(format!("{}/sos?type={unknown}", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "type={unknown}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 0);
        assert!(body["data"].as_array().unwrap().is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn e2e_resolve_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let created = submit(&app, json!({"type": "rescue", "location": {"lat": 14.65, "lng": 121.05}, "notes": "rooftop"}))
        .await?
        .json::<Value>()
        .await?;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let res = client().post(format!("{}/sos/{}/resolve", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "SOS resolved successfully");
    assert_eq!(body["data"]["status"], "resolved");
    assert!(body["data"]["updatedAt"].is_i64());

    let list = client().get(format!("{}/sos", app.base_url)).send().await?.json::<Value>().await?;
    assert!(list["data"].as_array().unwrap().is_empty());

    // resolving again is harmless
    let again = client().post(format!("{}/sos/{}/resolve", app.base_url, id)).send().await?;
    assert_eq!(again.status(), HttpStatusCode::OK);
    assert_eq!(again.json::<Value>().await?["data"]["status"], "resolved");
    Ok(())
}

#[tokio::test]
async fn e2e_resolve_errors() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(format!("{}/sos/{}/resolve", app.base_url, Uuid::new_v4())).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let blank = client().post(format!("{}/sos/%20/resolve", app.base_url)).send().await?;
    assert_eq!(blank.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(blank.json::<Value>().await?["message"], "Missing SOS ID");

    // not valid UTF-8 once decoded
    for res in [
        client().post(format!("{}/sos/%FF/resolve", app.base_url)).send().await?,
        client().delete(format!("{}/sos/%FF", app.base_url)).send().await?,
    ] {
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let body = res.json::<Value>().await?;
        assert!(body["message"].as_str().unwrap_or_default().starts_with("Invalid SOS ID"));
    }
    Ok(())
}

#[tokio::test]
async fn e2e_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let created = submit(&app, json!({"type": "other", "location": {"lat": 1.0, "lng": 1.0}}))
        .await?
        .json::<Value>()
        .await?;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let res = client().delete(format!("{}/sos/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client().delete(format!("{}/sos/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_preflight() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .request(reqwest::Method::OPTIONS, format!("{}/sos", app.base_url))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.json::<Value>().await?["message"], "CORS OK");
    Ok(())
}
