use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestApp {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::seeded_app();
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move { let _ = rx.await; };
        if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, shutdown: Some(tx) })
}

#[tokio::test]
async fn e2e_crud_round() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Welcome to the Student API");

    // Create
    let res = c.post(format!("{}/students", app.base_url))
        .json(&json!({"name": "A", "age": 5, "course": "X"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["id"], 3);

    // Update
    let res = c.put(format!("{}/students/3", app.base_url))
        .json(&json!({"name": "B"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated, json!({"id": 3, "name": "B", "age": 5, "course": "X"}));

    // Delete
    let res = c.delete(format!("{}/students/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/students/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let list = c.get(format!("{}/students", app.base_url)).send().await?
        .json::<Vec<serde_json::Value>>().await?;
    assert_eq!(list.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_field_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let res = c.post(format!("{}/students", app.base_url))
        .json(&json!({"name": "A", "age": 5}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Missing name, age, or course");
    Ok(())
}
