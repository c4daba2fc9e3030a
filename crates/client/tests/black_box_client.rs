use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use dealership_client::{
    ClientConfig, ClientError, Deletion, HttpInventoryApi, InventoryApi, InventoryClient,
    InventoryView, ListView, Operation,
};
use dealership_core::{CarId, FieldInput, FormField};
use serde_json::{Value, json};

/// In-process stand-in for the inventory REST API.
#[derive(Default)]
struct Stub {
    cars: Vec<Value>,
    next_id: i64,
    /// Status to answer the next request of a given method with.
    fail: HashMap<&'static str, StatusCode>,
    malformed_list: bool,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<Stub>>;

impl Stub {
    fn take_failure(&mut self, method: &'static str) -> Option<StatusCode> {
        self.fail.remove(method)
    }
}

async fn list(State(stub): State<Shared>) -> Response {
    let mut stub = stub.lock().unwrap();
    stub.requests.push("GET".into());
    if let Some(status) = stub.take_failure("GET") {
        return status.into_response();
    }
    if stub.malformed_list {
        return (StatusCode::OK, "definitely not json").into_response();
    }
    Json(stub.cars.clone()).into_response()
}

async fn create(State(stub): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut stub = stub.lock().unwrap();
    stub.requests.push("POST".into());
    if let Some(status) = stub.take_failure("POST") {
        return status.into_response();
    }
    stub.next_id += 1;
    body["id"] = json!(stub.next_id);
    stub.cars.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn replace(
    State(stub): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut stub = stub.lock().unwrap();
    stub.requests.push(format!("PUT {id}"));
    if let Some(status) = stub.take_failure("PUT") {
        return status.into_response();
    }
    match stub.cars.iter_mut().find(|c| c["id"] == json!(id)) {
        Some(car) => {
            *car = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(stub): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut stub = stub.lock().unwrap();
    stub.requests.push(format!("DELETE {id}"));
    if let Some(status) = stub.take_failure("DELETE") {
        return status.into_response();
    }
    let before = stub.cars.len();
    stub.cars.retain(|c| c["id"] != json!(id));
    if stub.cars.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

struct TestServer {
    base_url: String,
    stub: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(cars: Vec<Value>) -> Self {
        dealership_observability::init_for_tests();

        let next_id = cars
            .iter()
            .filter_map(|c| c["id"].as_i64())
            .max()
            .unwrap_or(0);
        let stub: Shared = Arc::new(Mutex::new(Stub {
            cars,
            next_id,
            ..Stub::default()
        }));

        let app = Router::new()
            .route("/api/cars", get(list).post(create))
            .route("/api/cars/:id", put(replace).delete(remove))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            stub,
            handle,
        }
    }

    fn api(&self) -> HttpInventoryApi {
        HttpInventoryApi::new(ClientConfig::new(&self.base_url).unwrap())
    }

    fn fail_next(&self, method: &'static str, status: StatusCode) {
        self.stub.lock().unwrap().fail.insert(method, status);
    }

    fn requests(&self) -> Vec<String> {
        self.stub.lock().unwrap().requests.clone()
    }

    fn stored(&self) -> Vec<Value> {
        self.stub.lock().unwrap().cars.clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn camry() -> Value {
    json!({"id": 1, "make": "Toyota", "model": "Camry", "year": 2020, "price": 25000, "inStock": true})
}

fn civic() -> Value {
    json!({"id": 2, "make": "Honda", "model": "Civic", "year": 2018, "price": 17999.99, "inStock": false})
}

fn rows(view: &InventoryView) -> &[dealership_client::CarRow] {
    match &view.list {
        ListView::Rows(rows) => rows,
        other => panic!("expected rows, got {other:?}"),
    }
}

#[tokio::test]
async fn fetched_inventory_renders_formatted_rows() {
    let srv = TestServer::spawn(vec![camry(), civic()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);

    client.mount().await.unwrap();

    let state = client.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error, None);

    let view = InventoryView::from_state(&state);
    let rows = rows(&view);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].make, "Toyota");
    assert_eq!(rows[0].price, "$25,000.00");
    assert_eq!(rows[0].stock, "Yes");
    assert_eq!(rows[1].price, "$17,999.99");
    assert_eq!(rows[1].stock, "No");
}

#[tokio::test]
async fn server_error_on_fetch_keeps_previous_list() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);
    client.fetch_all().await.unwrap();

    srv.fail_next("GET", StatusCode::INTERNAL_SERVER_ERROR);
    let err = client.fetch_all().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let state = client.snapshot();
    assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    assert!(!state.loading);
    assert_eq!(state.cars.len(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let srv = TestServer::spawn(vec![camry()]).await;
    srv.stub.lock().unwrap().malformed_list = true;

    let err = srv.api().list_cars().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    dealership_observability::init_for_tests();
    // Nothing listens on port 1 of loopback.
    let api = HttpInventoryApi::new(ClientConfig::new("http://127.0.0.1:1").unwrap());

    let err = api.list_cars().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn submitting_the_add_form_posts_typed_values_then_refetches_once() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);
    client.mount().await.unwrap();

    client.toggle_add_form().unwrap();
    client.update_field(FormField::Make, FieldInput::text("Ford"));
    client.update_field(FormField::Model, FieldInput::text("Focus"));
    client.update_field(FormField::Year, FieldInput::text("2019"));
    client.update_field(FormField::Price, FieldInput::text("14500.50"));
    client.update_field(FormField::InStock, FieldInput::checked(false));
    client.submit().await.unwrap();

    assert_eq!(srv.requests(), vec!["GET", "POST", "GET"]);

    let stored = srv.stored();
    let posted = &stored[1];
    assert_eq!(posted["make"], "Ford");
    assert_eq!(posted["year"], json!(2019));
    assert_eq!(posted["price"], json!(14500.5));
    assert_eq!(posted["inStock"], json!(false));

    let state = client.snapshot();
    assert_eq!(state.cars.len(), 2);
    assert!(!state.show_add_form);
    assert_eq!(state.editing_car, None);
}

#[tokio::test]
async fn failed_create_leaves_the_form_open() {
    let srv = TestServer::spawn(Vec::new()).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);

    client.toggle_add_form().unwrap();
    client.update_field(FormField::Make, FieldInput::text("Ford"));
    client.update_field(FormField::Model, FieldInput::text("Focus"));
    client.update_field(FormField::Price, FieldInput::text("9000"));

    srv.fail_next("POST", StatusCode::BAD_REQUEST);
    let err = client.submit().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    let state = client.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to create car: 400"));
    assert!(state.show_add_form);
    assert_eq!(state.form.make, "Ford");
    assert_eq!(srv.requests(), vec!["POST"]);
}

#[tokio::test]
async fn editing_a_car_puts_the_whole_record() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);
    client.mount().await.unwrap();

    let car = client.snapshot().cars[0].clone();
    client.begin_edit(&car).unwrap();
    assert_eq!(client.snapshot().form.make, "Toyota");

    client.update_field(FormField::Price, FieldInput::text("24000"));
    client.submit().await.unwrap();

    assert_eq!(srv.requests(), vec!["GET", "PUT 1", "GET"]);
    let stored = srv.stored();
    assert_eq!(stored[0]["id"], json!(1));
    assert_eq!(stored[0]["price"], json!(24000.0));
    assert_eq!(stored[0]["model"], "Camry");

    let state = client.snapshot();
    assert_eq!(state.editing_car, None);
    let view = InventoryView::from_state(&state);
    assert_eq!(rows(&view)[0].price, "$24,000.00");
}

#[tokio::test]
async fn updating_a_missing_car_reports_not_found() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);
    client.mount().await.unwrap();

    let mut ghost = client.snapshot().cars[0].clone();
    ghost.id = CarId::new(99);
    client.begin_edit(&ghost).unwrap();

    let err = client.submit().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Http {
            operation: Operation::Update,
            status: 404
        }
    ));
    let state = client.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to update car: 404"));
    assert_eq!(state.editing_car.map(|c| c.id), Some(CarId::new(99)));
}

#[tokio::test]
async fn confirmed_delete_removes_and_refetches() {
    let srv = TestServer::spawn(vec![camry(), civic()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| true);
    client.mount().await.unwrap();

    let outcome = client.delete(CarId::new(1)).await.unwrap();

    assert_eq!(outcome, Deletion::Deleted);
    assert_eq!(srv.requests(), vec!["GET", "DELETE 1", "GET"]);
    let state = client.snapshot();
    assert_eq!(state.cars.len(), 1);
    assert_eq!(state.cars[0].id, CarId::new(2));
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let client = InventoryClient::new(srv.api(), |_: &str| false);

    let outcome = client.delete(CarId::new(1)).await.unwrap();

    assert_eq!(outcome, Deletion::Cancelled);
    assert!(srv.requests().is_empty());
    assert_eq!(srv.stored().len(), 1);
}

#[tokio::test]
async fn read_only_client_never_writes() {
    let srv = TestServer::spawn(vec![camry()]).await;
    let config = ClientConfig::new(&srv.base_url).unwrap().read_only(true);
    let client = InventoryClient::from_config(
        HttpInventoryApi::new(config.clone()),
        |_: &str| true,
        &config,
    );
    client.mount().await.unwrap();

    let err = client.delete(CarId::new(1)).await.unwrap_err();
    assert!(matches!(err, ClientError::ReadOnly(Operation::Delete)));
    assert!(client.toggle_add_form().is_err());

    assert_eq!(srv.requests(), vec!["GET"]);
    assert!(InventoryView::from_state(&client.snapshot()).read_only);
}
