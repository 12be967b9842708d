//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#![cfg(feature = "http")]

use std::sync::Arc;

use patient_records::{http, InMemoryStore, PatientService};
use serde_json::{json, Value};

/// Bind to port 0 and return the actual address.
async fn start_server() -> String {
    let service = Arc::new(PatientService::new(InMemoryStore::new()));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn patient(id: &str, height: f64, weight: f64) -> Value {
    json!({
        "id": id,
        "name": format!("Patient {id}"),
        "city": "Bhopal",
        "age": 63,
        "gender": "male",
        "height": height,
        "weight": weight
    })
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{base}/create"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn static_routes() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "message": "Patients Management System API" }));

    let body: Value = client
        .get(format!("{base}/about"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({ "message": "A fully functional API to manage patients records." })
    );

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_view_and_get() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, patient("P001", 1.75, 70.0)).await;
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Patient created successfully" }));

    let view: Value = client
        .get(format!("{base}/view"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["P001"]["bmi"], 22.86);
    assert_eq!(view["P001"]["verdict"], "Normal");
    assert!(view["P001"].get("id").is_none());

    let resp = client.get(format!("{base}/patient/P001")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let record: Value = resp.json().await.unwrap();
    assert_eq!(record["id"], "P001");
    assert_eq!(record["name"], "Patient P001");
    assert_eq!(record["gender"], "male");
}

#[tokio::test]
async fn unknown_patient_returns_404() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/patient/nope")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nope"));

    let resp = client
        .put(format!("{base}/edit/nope"))
        .json(&json!({ "city": "Indore" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client.delete(format!("{base}/delete/nope")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn duplicate_create_returns_409() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    assert_eq!(create(&client, &base, patient("P1", 1.7, 60.0)).await.status(), 201);
    assert_eq!(create(&client, &base, patient("P1", 1.8, 90.0)).await.status(), 409);

    let record: Value = client
        .get(format!("{base}/patient/P1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["height"], 1.7);
}

#[tokio::test]
async fn invalid_create_returns_422() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let mut body = patient("P2", 1.7, 60.0);
    body["age"] = json!(0);
    assert_eq!(create(&client, &base, body).await.status(), 422);

    let mut body = patient("P2", 1.7, 60.0);
    body["gender"] = json!("unknown");
    assert_eq!(create(&client, &base, body).await.status(), 422);

    let mut body = patient("P2", 1.7, 60.0);
    body.as_object_mut().unwrap().remove("weight");
    let resp = create(&client, &base, body).await;
    assert_eq!(resp.status(), 422);
    let err: Value = resp.json().await.unwrap();
    assert!(err["error"].as_str().unwrap().contains("weight"));

    let view: Value = client
        .get(format!("{base}/view"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view, json!({}));
}

#[tokio::test]
async fn malformed_bodies_return_422() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, patient("P1", 1.7, 60.0)).await;

    let requests = [
        client
            .post(format!("{base}/create"))
            .header("content-type", "application/json")
            .body(r#"{"id": "P1","#),
        client
            .put(format!("{base}/edit/P1"))
            .header("content-type", "application/json")
            .body("not json"),
        client.post(format!("{base}/create")).body("{}"),
    ];
    for request in requests {
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("validation failed: body:"));
    }

    let record: Value = client
        .get(format!("{base}/patient/P1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["weight"], 60.0);
}

#[tokio::test]
async fn partial_edit_recomputes_bmi() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, patient("P3", 1.6, 50.0)).await;

    let resp = client
        .put(format!("{base}/edit/P3"))
        .json(&json!({ "weight": 85.0, "bmi": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Patient updated" }));

    let record: Value = client
        .get(format!("{base}/patient/P3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["weight"], 85.0);
    assert_eq!(record["bmi"], 33.2);
    assert_eq!(record["verdict"], "Obese");
    assert_eq!(record["city"], "Bhopal");

    let resp = client
        .put(format!("{base}/edit/P3"))
        .json(&json!({ "height": -1.6 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn sort_and_bad_parameters() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, patient("A", 1.5, 70.0)).await;
    create(&client, &base, patient("B", 1.8, 60.0)).await;
    create(&client, &base, patient("C", 1.6, 65.0)).await;

    let ids = |records: Vec<Value>| -> Vec<String> {
        records
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    };

    let records: Vec<Value> = client
        .get(format!("{base}/sort?sort_by=height"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ids(records), vec!["A", "C", "B"]);

    let records: Vec<Value> = client
        .get(format!("{base}/sort?sort_by=BMI&order=desc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // A 31.11, C 25.39, B 18.52
    assert_eq!(ids(records), vec!["A", "C", "B"]);

    for query in ["sort_by=age", "sort_by=weight&order=down", ""] {
        let resp = client
            .get(format!("{base}/sort?{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "query {query:?}");
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("choose from"));
    }
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, patient("P4", 1.7, 70.0)).await;

    let resp = client.delete(format!("{base}/delete/P4")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Patient deleted" }));

    let resp = client.get(format!("{base}/patient/P4")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}
