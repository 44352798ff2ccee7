//! HTTP client behavior against an in-process axum server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use gre_core::ErrorKind;
use gre_core::api::{CustomerQuery, DashboardApi, LoginApi};
use gre_core::auth::model::LoginRequest;
use gre_core::auth::{ClientContext, LoginGateway};
use gre_core::config::DashboardConfig;
use gre_core::customer::CustomerPatch;
use gre_core::error::{AUTH_FAILED_MESSAGE, NETWORK_MESSAGE, SERVER_ERROR_MESSAGE, TIMEOUT_MESSAGE};
use gre_interaction::{DashboardApiClient, RemoteLoginClient};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Recorded {
    auth_headers: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.auth_headers.lock().unwrap().push(value);
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> DashboardConfig {
    DashboardConfig {
        api_base_url: format!("http://{}", addr),
        login_url: format!("http://{}/api/sales-person/login", addr),
        project_id: "krisala".into(),
        ..Default::default()
    }
}

fn session_json(id: &str) -> Value {
    json!({
        "sessionId": id,
        "salesPersonId": "sp-1",
        "salesPersonName": "Rakhi Sangwan",
        "customerId": "c-1",
        "customerName": "Asha",
        "projectId": "krisala",
        "isActive": true,
        "startTime": "2024-01-05T05:00:00Z"
    })
}

#[tokio::test]
async fn test_active_sessions_sends_bearer_and_project() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/sales-person/active-sessions",
            get(
                |State(rec): State<Recorded>,
                 headers: HeaderMap,
                 Query(q): Query<HashMap<String, String>>| async move {
                    rec.record_auth(&headers);
                    rec.queries.lock().unwrap().push(q);
                    Json(json!({"success": true, "data": {"activeSessions": [session_json("a")]}}))
                },
            ),
        )
        .with_state(recorded.clone());
    let addr = serve(app).await;

    let client = DashboardApiClient::new(&config_for(addr));
    let sessions = client.fetch_active_sessions(Some("tok-1")).await.unwrap();

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id, "a");
    assert_eq!(recorded.auth_headers.lock().unwrap()[0], "Bearer tok-1");
    assert_eq!(
        recorded.queries.lock().unwrap()[0].get("project_id").map(String::as_str),
        Some("krisala")
    );
}

#[tokio::test]
async fn test_unknown_envelope_and_non_json_body_are_empty() {
    let app = Router::new()
        .route(
            "/api/sales-person/active-sessions",
            get(|| async { Json(json!({"foo": "bar"})) }),
        )
        .route("/customer/krisala", get(|| async { "<html>oops</html>" }));
    let addr = serve(app).await;
    let client = DashboardApiClient::new(&config_for(addr));

    assert!(client.fetch_active_sessions(Some("t")).await.unwrap().is_empty());
    assert!(
        client
            .fetch_customers(Some("t"), &CustomerQuery::All)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_truncated_body_is_empty() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = DashboardApiClient::new(&config_for(addr));
    let sessions = client.fetch_active_sessions(Some("t")).await.unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_status_classification() {
    let app = Router::new()
        .route(
            "/api/sales-person/active-sessions",
            get(|| async { StatusCode::UNAUTHORIZED }),
        )
        .route(
            "/customer/krisala",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/sales-people/project/krisala",
            get(|| async { StatusCode::NOT_FOUND }),
        );
    let addr = serve(app).await;
    let client = DashboardApiClient::new(&config_for(addr));

    let err = client.fetch_active_sessions(Some("t")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.to_string(), AUTH_FAILED_MESSAGE);

    let err = client
        .fetch_customers(Some("t"), &CustomerQuery::All)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);

    let err = client.fetch_sales_people(Some("t")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Request);
    assert_eq!(err.to_string(), "Failed to fetch sales people: Not Found");
}

#[tokio::test]
async fn test_slow_response_is_a_timeout() {
    let app = Router::new().route(
        "/api/sales-person/active-sessions",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    );
    let addr = serve(app).await;
    let client =
        DashboardApiClient::new(&config_for(addr)).with_timeout(Duration::from_millis(200));

    let err = client.fetch_active_sessions(Some("t")).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(!err.is_network());
    assert_eq!(err.to_string(), TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DashboardApiClient::new(&config_for(addr));
    let err = client.fetch_active_sessions(Some("t")).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.to_string(), NETWORK_MESSAGE);
}

#[tokio::test]
async fn test_customer_queries_and_envelopes() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/customer/krisala",
            get(
                |State(rec): State<Recorded>, Query(q): Query<HashMap<String, String>>| async move {
                    rec.queries.lock().unwrap().push(q);
                    Json(json!({"data": [
                        {"_id": "m1", "id": "1", "name": "Asha", "budget": "2500000"},
                        "not a record",
                        {"_id": "m2", "id": "2", "name": "Vikram", "budget": 12000000}
                    ]}))
                },
            ),
        )
        .with_state(recorded.clone());
    let addr = serve(app).await;
    let client = DashboardApiClient::new(&config_for(addr));

    let customers = client
        .fetch_customers(Some("t"), &CustomerQuery::BySalesPerson("Rakhi Sangwan".into()))
        .await
        .unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[1].effective_budget(), 12_000_000.0);

    client
        .fetch_customers(Some("t"), &CustomerQuery::ByPhone("9876543210".into()))
        .await
        .unwrap();

    let queries = recorded.queries.lock().unwrap();
    assert_eq!(queries[0].get("salesPerson").map(String::as_str), Some("Rakhi Sangwan"));
    assert_eq!(queries[1].get("phone").map(String::as_str), Some("9876543210"));
}

#[tokio::test]
async fn test_update_customer_puts_partial_body() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/customer/krisala/{id}",
            put(
                |State(rec): State<Recorded>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    rec.bodies.lock().unwrap().push(body.clone());
                    Json(json!({"data": {"id": id, "name": "Asha", "remark_9b8": body["remark_9b8"]}}))
                },
            ),
        )
        .with_state(recorded.clone());
    let addr = serve(app).await;
    let client = DashboardApiClient::new(&config_for(addr));

    let patch = CustomerPatch::new().set("remark_9b8", "Called back");
    let updated = client.update_customer(Some("t"), "42", &patch).await.unwrap();

    assert_eq!(updated.id, "42");
    assert_eq!(updated.remark.as_deref(), Some("Called back"));
    assert_eq!(recorded.bodies.lock().unwrap()[0], json!({"remark_9b8": "Called back"}));
}

#[tokio::test]
async fn test_sales_people_bare_array() {
    let app = Router::new().route(
        "/sales-people/project/krisala",
        get(|| async { Json(json!([{"name": "Rakhi Sangwan"}, {"name": "Shivam Shelke"}])) }),
    );
    let addr = serve(app).await;
    let client = DashboardApiClient::new(&config_for(addr));

    let people = client.fetch_sales_people(Some("t")).await.unwrap();
    assert_eq!(people.len(), 2);
}

async fn fake_login(
    State(rec): State<Recorded>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    rec.bodies.lock().unwrap().push(body.clone());
    let full_name = match body["email"].as_str() {
        Some("mohini@krisala.com") => "Mohini Jadhav",
        _ => "Outsider",
    };
    if body["password"] == "locked" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "message": "Account locked"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "salesPerson": {
                    "user_id": "u-1",
                    "email": body["email"],
                    "full_name": full_name,
                    "permissions": []
                },
                "token": {"access_token": "remote-token"}
            }
        })),
    )
}

#[tokio::test]
async fn test_login_gateway_end_to_end() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/sales-person/login", post(fake_login))
        .with_state(recorded.clone());
    let addr = serve(app).await;
    let config = config_for(addr);
    let gateway = LoginGateway::new(Arc::new(RemoteLoginClient::new(&config)), &config);
    let client = ClientContext::from_headers(Some("203.0.113.9"), None, Some("gre-cli"));

    let request = |email: &str, password: &str| LoginRequest {
        email: email.into(),
        password: password.into(),
        remember_me: true,
    };

    let session = gateway
        .authenticate(&request("mohini@krisala.com", "secret"), &client)
        .await
        .unwrap();
    assert_eq!(session.access_token, "remote-token");
    assert_eq!(session.user.full_name, "Mohini Jadhav");

    let sent = recorded.bodies.lock().unwrap()[0].clone();
    assert_eq!(sent["business_identifier"], "krisala");
    assert_eq!(sent["ip_address"], "203.0.113.9");
    assert_eq!(sent["device_info"]["user_agent"], "gre-cli");
    assert_eq!(sent["silent_relogin"], false);

    let err = gateway
        .authenticate(&request("someone@krisala.com", "secret"), &client)
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 403);

    let err = gateway
        .authenticate(&request("mohini@krisala.com", "locked"), &client)
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 403);
    assert_eq!(err.to_string(), "Account locked");
}

#[tokio::test]
async fn test_login_client_tolerates_non_json_error() {
    let app = Router::new().route(
        "/api/sales-person/login",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let addr = serve(app).await;
    let config = config_for(addr);

    let login = Arc::new(RemoteLoginClient::new(&config));
    let payload = LoginGateway::new(login.clone(), &config).build_payload(
        &LoginRequest {
            email: "a@b.com".into(),
            password: "p".into(),
            remember_me: false,
        },
        "p".into(),
        &ClientContext::default(),
        0,
    );

    let response = login.login(&payload).await.unwrap();

    assert_eq!(response.status, 502);
    assert!(!response.is_ok());
    assert_eq!(response.body.message, None);
}
