//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use employee_registry::http::{self, EmployeeList};
use employee_registry::{Employee, EmployeeService, InMemoryEmployeeStore};
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let service = Arc::new(EmployeeService::new(InMemoryEmployeeStore::new()));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{base}/employees"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "total_count": 0 }));
}

#[tokio::test]
async fn create_then_fetch() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, json!({ "name": " Alice Tan ", "age": 30, "salary": 5000.0 })).await;
    assert_eq!(resp.status(), 201);
    let created: Employee = resp.json().await.unwrap();
    assert_eq!(created.name, "Alice Tan");

    let resp = client
        .get(format!("{base}/employees/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Employee = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn invalid_form_returns_422_with_violations() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, json!({ "name": "A", "age": 17 })).await;
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    let violations = body["violations"].as_array().unwrap();
    let fields: Vec<&str> = violations
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "age", "salary"]);
    assert_eq!(violations[2]["message"], "Salary is required");
}

#[tokio::test]
async fn duplicate_name_returns_409() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create(&client, &base, json!({ "name": "Alice Tan", "age": 30, "salary": 5000.0 })).await;
    let resp = create(&client, &base, json!({ "name": " alice tan ", "age": 25, "salary": 4000.0 })).await;
    assert_eq!(resp.status(), 409);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "employee with name 'alice tan' already exists");
}

#[tokio::test]
async fn update_and_delete() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let created: Employee = create(&client, &base, json!({ "name": "Bob", "age": 40, "salary": 2000.0 }))
        .await
        .json()
        .await
        .unwrap();

    let resp = client
        .put(format!("{base}/employees/{}", created.id))
        .json(&json!({ "name": "Robert", "age": 41, "salary": 2500.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Employee = resp.json().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let url = format!("{base}/employees/{}", created.id);
    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.delete(&url).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    let resp = client.get(&url).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/employees/999"))
        .json(&json!({ "name": "Nobody", "age": 30, "salary": 2000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "employee not found with id: 999");
}

#[tokio::test]
async fn listings_search_and_sorting() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for (name, age, salary) in [("Alice Tan", 30, 5000.0), ("Bob", 45, 9000.0), ("Tanya", 22, 3000.0)] {
        create(&client, &base, json!({ "name": name, "age": age, "salary": salary })).await;
    }

    let get = |path: &str| {
        let url = format!("{base}{path}");
        let client = client.clone();
        async move {
            let resp = client.get(url).send().await.unwrap();
            assert_eq!(resp.status(), 200);
            resp.json::<EmployeeList>().await.unwrap()
        }
    };
    let names = |list: &EmployeeList| -> Vec<String> {
        list.employees.iter().map(|e| e.name.clone()).collect()
    };

    let all = get("/employees").await;
    assert_eq!(names(&all), vec!["Alice Tan", "Bob", "Tanya"]);
    assert_eq!(all.total_count, 3);

    let by_salary = get("/employees/by-salary").await;
    assert_eq!(names(&by_salary), vec!["Bob", "Alice Tan", "Tanya"]);

    let hits = get("/employees/search?query=tan").await;
    assert_eq!(names(&hits), vec!["Alice Tan", "Tanya"]);
    assert_eq!(hits.total_count, 2);

    let everything = get("/employees/search?query=").await;
    assert_eq!(everything.total_count, 3);
    let everything = get("/employees/search").await;
    assert_eq!(names(&everything), names(&all));

    let ages = get("/employees/age-between?min=25&max=50").await;
    assert_eq!(names(&ages), vec!["Alice Tan", "Bob"]);

    let salaries = get("/employees/salary-between?min=1000&max=5000").await;
    assert_eq!(names(&salaries), vec!["Alice Tan", "Tanya"]);
}

fn assert_json(resp: &reqwest::Response) {
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("application/json"), "got {content_type}");
}

#[tokio::test]
async fn mistyped_fields_are_field_violations() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for age in [json!("thirty"), json!(30.0)] {
        let resp = create(&client, &base, json!({ "name": "Alice Tan", "age": age, "salary": 5000 })).await;
        assert_eq!(resp.status(), 422);
        assert_json(&resp);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(
            body["violations"],
            json!([{ "field": "age", "message": "Age must be a whole number" }])
        );
    }

    let resp = create(&client, &base, json!({ "name": "Alice Tan", "age": 30, "salary": "lots" })).await;
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["violations"][0]["field"], "salary");
    assert_eq!(body["violations"][0]["message"], "Salary must be a number");

    let all: EmployeeList = client
        .get(format!("{base}/employees"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.total_count, 0);
}

#[tokio::test]
async fn malformed_body_returns_400_json() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/employees"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_json(&resp);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_numeric_id_returns_400_json() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for resp in [
        client.get(format!("{base}/employees/abc")).send().await.unwrap(),
        client.delete(format!("{base}/employees/abc")).send().await.unwrap(),
        client
            .put(format!("{base}/employees/abc"))
            .json(&json!({ "name": "Bob", "age": 40, "salary": 2000 }))
            .send()
            .await
            .unwrap(),
    ] {
        assert_eq!(resp.status(), 400);
        assert_json(&resp);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn out_of_range_query_returns_400_json() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for path in [
        "/employees/age-between?min=300&max=5",
        "/employees/age-between?min=18",
        "/employees/salary-between?min=cheap&max=5000",
    ] {
        let resp = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), 400, "{path}");
        assert_json(&resp);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string(), "{path}");
    }
}
