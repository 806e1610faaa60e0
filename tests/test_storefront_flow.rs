//! End-to-end storefront tests: a stub marketplace backend and the frontend
//! router run in-process on ephemeral ports, driven over HTTP.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use rebay_frontend::transport;
use rebay_frontend::{BackendClient, SessionStore, StorefrontService};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PROVIDER_TOKEN: &str = "provider-jwt";
const CONSUMER_TOKEN: &str = "consumer-jwt";

#[derive(Clone, Default)]
struct StubState {
    create_calls: Arc<AtomicUsize>,
    signup_calls: Arc<AtomicUsize>,
}

fn stub_products() -> Value {
    json!([
        {
            "id": "1",
            "productName": "Laptop XYZ",
            "model": "X1",
            "manufacturer": "TechCo",
            "stock": 10,
            "description": "Leistungsstarker Laptop",
            "images": ["iVBORw0KGgo"],
            "category": "COMPUTER",
            "condition": "NEUWERTIG"
        },
        {
            "id": 2,
            "productName": "Drucker ABC",
            "model": "A2",
            "manufacturer": "IT Solutions",
            "stock": 3,
            "description": "Gute Drucker",
            "images": ["/drucker.jpg"],
            "category": "DRUCKER",
            "condition": "BENUTZT"
        },
        {
            "id": "3",
            "productName": "Monitor Pro",
            "model": "M27",
            "manufacturer": "TechCo",
            "stock": 0,
            "description": "27 Zoll",
            "images": ["data:image/png;base64,AAAA"],
            "category": "MONITOR",
            "condition": "KAUM_BENUTZT"
        }
    ])
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn stub_login(Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["loginContactEmail"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let reply = match (email, password) {
        ("anbieter@example.com", "passwort123") => json!({
            "user": {
                "id": "21",
                "loginContactEmail": "anbieter@example.com",
                "authorities": [{"authority": "ROLE_ANBIETER"}]
            },
            "token": PROVIDER_TOKEN
        }),
        ("erika@example.com", "passwort123") => json!({
            "user": {
                "id": 12,
                "loginContactEmail": "erika@example.com",
                "authorities": [{"authority": "ROLE_ABNEHMER"}]
            },
            "token": CONSUMER_TOKEN
        }),
        _ => return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad credentials"}))),
    };
    (StatusCode::OK, Json(reply))
}

async fn stub_signup(State(state): State<StubState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.signup_calls.fetch_add(1, Ordering::SeqCst);
    assert!(body["role"].is_boolean(), "signup role must be the legacy boolean");
    if body["loginContactEmail"] == "taken@example.com" {
        return (StatusCode::CONFLICT, Json(json!({"message": "email taken"})));
    }
    (StatusCode::OK, Json(json!({})))
}

async fn stub_catalog() -> impl IntoResponse {
    Json(stub_products())
}

async fn stub_product_detail(Path(id): Path<i64>, headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    let products = stub_products();
    let found = products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_i64().unwrap_or(-1) == id || p["id"].as_str() == Some(&id.to_string()));
    match found {
        Some(p) => Json(p.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "no such product"}))).into_response(),
    }
}

async fn stub_my_products(headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers) != Some(PROVIDER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    Json(stub_products()).into_response()
}

async fn stub_create(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    if bearer(&headers) != Some(PROVIDER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    state.create_calls.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(99);
    Json(body).into_response()
}

async fn stub_update(
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    if bearer(&headers) != Some(PROVIDER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    body["id"] = json!(id);
    Json(body).into_response()
}

async fn stub_delete_product(Path(_id): Path<i64>, headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers) != Some(PROVIDER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    Json(json!({})).into_response()
}

async fn stub_my_requests(headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers) != Some(CONSUMER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    Json(json!([
        {
            "id": "7",
            "productName": "Laptop XYZ",
            "productModel": "X1",
            "productManufacturer": "TechCo",
            "productCategory": "COMPUTER",
            "productCondition": "NEUWERTIG"
        },
        {
            "id": 8,
            "productName": "Drucker ABC",
            "productModel": "A2",
            "productManufacturer": "IT Solutions",
            "productCategory": "DRUCKER",
            "productCondition": "BENUTZT"
        }
    ]))
    .into_response()
}

async fn stub_delete_request(Path(_id): Path<i64>, headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers) != Some(CONSUMER_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response();
    }
    Json(json!({})).into_response()
}

fn stub_router(state: StubState) -> Router {
    Router::new()
        .route("/account/login", post(stub_login))
        .route("/account/signup", post(stub_signup))
        .route("/products/catalog", get(stub_catalog))
        .route("/products/all", get(stub_my_products))
        .route("/products/create", post(stub_create))
        .route("/products/update/:id", patch(stub_update))
        .route("/products/delete/:id", delete(stub_delete_product))
        .route("/products/:id", get(stub_product_detail))
        .route("/requests/mine", get(stub_my_requests))
        .route("/requests/delete/:id", delete(stub_delete_request))
        .with_state(state)
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Stub backend + frontend router, both on ephemeral ports.
async fn start_stack() -> (String, StubState) {
    let stub_state = StubState::default();
    let backend_url = spawn(stub_router(stub_state.clone())).await;

    let storefront = Arc::new(StorefrontService::new(
        BackendClient::new(backend_url),
        SessionStore::new(1),
    ));
    let frontend_url = spawn(transport::http::create_router(transport::http::AppState {
        storefront,
    }))
    .await;

    (frontend_url, stub_state)
}

fn client() -> reqwest::Client {
    // redirects stay visible so the 303-to-home rule can be asserted
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn login(client: &reqwest::Client, base: &str, email: &str) -> String {
    let response = client
        .post(format!("{base}/account/login"))
        .json(&json!({"email": email, "password": "passwort123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_catalog_browsing_and_filtering() {
    let (base, _stub) = start_stack().await;
    let client = client();

    // full catalog, ids canonicalized to numbers, raw base64 promoted to a data URI
    let body: Value = client
        .get(format!("{base}/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["id"], json!(1));
    assert!(products[0]["images"][0]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert_eq!(products[1]["images"][0], json!("/drucker.jpg"));

    // sidebar criteria and live search compose conjunctively
    let body: Value = client
        .get(format!("{base}/catalog?manufacturer=techco&q=monitor"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], json!(3));

    // minStock keeps input order
    let body: Value = client
        .get(format!("{base}/catalog?minStock=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    // the `alle` sentinel disables an enum filter, garbage is a 400
    let response = client
        .get(format!("{base}/catalog?condition=alle"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let response = client
        .get(format!("{base}/catalog?condition=WIE_NEU"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_role_gated_navigation() {
    let (base, _stub) = start_stack().await;
    let client = client();

    // the two gated pages redirect home without a session
    for page in ["/my/products", "/my/requests"] {
        let response = client.get(format!("{base}{page}")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{page}");
        assert_eq!(response.headers()["location"], "/");
    }

    // bad credentials never create a session
    let response = client
        .post(format!("{base}/account/login"))
        .json(&json!({"email": "erika@example.com", "password": "falsch"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let provider = login(&client, &base, "anbieter@example.com").await;
    let consumer = login(&client, &base, "erika@example.com").await;

    // providers see their listings; consumers get a role error there
    let response = client
        .get(format!("{base}/my/products"))
        .bearer_auth(&provider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let response = client
        .get(format!("{base}/my/products"))
        .bearer_auth(&consumer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // and the other way round for requests
    let response = client
        .get(format!("{base}/my/requests"))
        .bearer_auth(&provider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // product detail needs any live session
    let response = client
        .get(format!("{base}/products/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let response = client
        .get(format!("{base}/products/1"))
        .bearer_auth(&consumer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // logout revokes the session, the page gate redirects again
    let response = client
        .post(format!("{base}/account/logout"))
        .bearer_auth(&provider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let response = client
        .get(format!("{base}/my/products"))
        .bearer_auth(&provider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_product_submission_gate() {
    let (base, stub) = start_stack().await;
    let client = client();
    let provider = login(&client, &base, "anbieter@example.com").await;

    // an invalid draft is rejected with the field-error map and no backend call
    let response = client
        .post(format!("{base}/my/products"))
        .bearer_auth(&provider)
        .json(&json!({
            "productName": "Headset One",
            "model": "H1",
            "manufacturer": "SoundTech",
            "stock": "-1",
            "description": "Gutes Headset",
            "category": "AUDIO",
            "condition": "BENUTZT",
            "images": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    let field_errors = &body["data"]["fieldErrors"];
    assert_eq!(
        field_errors["stock"],
        json!("Stock must be a non-negative number")
    );
    assert_eq!(
        field_errors["images"],
        json!("At least one image is required")
    );
    assert_eq!(field_errors["model"], json!(""));
    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);

    // a valid draft reaches the backend and comes back with its new id
    let response = client
        .post(format!("{base}/my/products"))
        .bearer_auth(&provider)
        .json(&json!({
            "productName": "Headset One",
            "model": "H1",
            "manufacturer": "SoundTech",
            "stock": "5",
            "description": "Gutes Headset",
            "category": "AUDIO",
            "condition": "BENUTZT",
            "images": ["data:image/png;base64,AAAA"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], json!(99));
    assert_eq!(body["data"]["stock"], json!(5));
    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 1);

    // one bad file rejects the whole upload batch, nothing is appended
    let response = client
        .post(format!("{base}/my/products/images"))
        .bearer_auth(&provider)
        .json(&json!({
            "images": ["data:image/png;base64,AAAA"],
            "uploads": [
                {"fileName": "ok.png", "mimeType": "image/png", "content": "AQID"},
                {"fileName": "bad.exe", "mimeType": "application/x-msdownload", "content": "AQID"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        json!("Only image files (JPEG, PNG, GIF, WEBP) are allowed")
    );

    // a clean batch comes back base64-encoded and appended in order
    let response = client
        .post(format!("{base}/my/products/images"))
        .bearer_auth(&provider)
        .json(&json!({
            "images": ["data:image/png;base64,AAAA"],
            "uploads": [
                {"fileName": "ok.webp", "mimeType": "image/webp", "content": "AQID"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let images = body["data"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[1], json!("data:image/webp;base64,AQID"));

    // edit flow: full replace through the same gate
    let response = client
        .patch(format!("{base}/my/products/3"))
        .bearer_auth(&provider)
        .json(&json!({
            "productName": "Monitor Pro",
            "model": "M27",
            "manufacturer": "TechCo",
            "stock": "2",
            "description": "27 Zoll, neu kalibriert",
            "category": "MONITOR",
            "condition": "KAUM_BENUTZT",
            "images": ["data:image/png;base64,AAAA"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], json!(3));
    assert_eq!(body["data"]["description"], json!("27 Zoll, neu kalibriert"));

    // delete
    let response = client
        .delete(format!("{base}/my/products/3"))
        .bearer_auth(&provider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_signup_validation_gate() {
    let (base, stub) = start_stack().await;
    let client = client();

    let valid = json!({
        "name": "Erika Mustermann",
        "email": "neu@example.com",
        "phone": "030-123-4567",
        "password": "langes-passwort",
        "confirmPassword": "langes-passwort",
        "address": "Musterstr. 1",
        "city": "Berlin",
        "postalCode": "10115",
        "role": "consumer"
    });

    // a failing field blocks the request entirely
    let mut invalid = valid.clone();
    invalid["postalCode"] = json!("12a45");
    invalid["confirmPassword"] = json!("anderes-passwort");
    let response = client
        .post(format!("{base}/account/signup"))
        .json(&invalid)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    let field_errors = &body["data"]["fieldErrors"];
    assert_eq!(
        field_errors["postalCode"],
        json!("Invalid postal code (5 digits required)")
    );
    assert_eq!(field_errors["confirmPassword"], json!("Passwords do not match"));
    assert_eq!(stub.signup_calls.load(Ordering::SeqCst), 0);

    // unset role is invalid
    let mut no_role = valid.clone();
    no_role["role"] = json!(null);
    let response = client
        .post(format!("{base}/account/signup"))
        .json(&no_role)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // a valid draft goes through
    let response = client
        .post(format!("{base}/account/signup"))
        .json(&valid)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(stub.signup_calls.load(Ordering::SeqCst), 1);

    // backend rejection reads as "email already taken"
    let mut taken = valid.clone();
    taken["email"] = json!("taken@example.com");
    let response = client
        .post(format!("{base}/account/signup"))
        .json(&taken)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_request_management() {
    let (base, _stub) = start_stack().await;
    let client = client();
    let consumer = login(&client, &base, "erika@example.com").await;

    let response = client
        .get(format!("{base}/my/requests"))
        .bearer_auth(&consumer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let requests = body["data"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["id"], json!(7));
    assert_eq!(requests[0]["productCondition"], json!("NEUWERTIG"));

    let response = client
        .delete(format!("{base}/my/requests/7"))
        .bearer_auth(&consumer)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
