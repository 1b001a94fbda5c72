//! Integration tests for the onboarding portal REST surface.
//!
//! Each test spins up an Axum server on a random port and drives the real
//! HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use onboard_assist::config::{ComposingDelay, PortalConfig};
use onboard_assist::provisioning::{StepKey, StepSpec};
use onboard_assist::registry::Registry;
use onboard_assist::routes::{AppState, portal_routes};
use onboard_assist::session::{MemorySessionStore, SessionStore};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn fast_config() -> PortalConfig {
    PortalConfig {
        composing_delay: ComposingDelay::NONE,
        provisioning_plan: StepKey::ALL
            .iter()
            .map(|&key| StepSpec::new(key, Duration::from_millis(1)))
            .collect(),
        provisioning_settle: Duration::ZERO,
        ..PortalConfig::default()
    }
}

/// Start an Axum server on a random port, return (port, session store).
async fn start_server() -> (u16, Arc<MemorySessionStore>) {
    let sessions = Arc::new(MemorySessionStore::new());
    let store: Arc<dyn SessionStore> = Arc::clone(&sessions) as Arc<dyn SessionStore>;
    let state = AppState::new(&fast_config(), Arc::new(Registry::builtin()), store);
    let app = portal_routes(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, sessions)
}

async fn post(port: u16, path: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://127.0.0.1:{port}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn onboard_jordan(port: u16) -> Value {
    let resp = post(
        port,
        "/api/onboard",
        json!({
            "name": "Jordan Lee",
            "email": "jordan@rc.com",
            "project": "aurora",
            "role": "UX Designer"
        }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

async fn login_jordan(port: u16) -> Value {
    let resp = post(
        port,
        "/api/login",
        json!({ "name": "Jordan Lee", "email": "jordan@rc.com" }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn rest_health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "onboard-assist");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_lists_projects_in_form_order() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/projects"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Vec<Value> = resp.json().await.unwrap();
        let values: Vec<&str> = body.iter().map(|p| p["value"].as_str().unwrap()).collect();
        assert_eq!(values, ["aurora", "nova", "customer360"]);
        assert_eq!(body[0]["label"], "Aurora Design System");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rest_lists_roles_for_project() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/projects/nova/roles"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Vec<Value> = resp.json().await.unwrap();
        let titles: Vec<&str> = body.iter().map(|r| r["value"].as_str().unwrap()).collect();
        assert_eq!(titles, ["Software Engineer", "Product Manager", "QA Engineer"]);

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/projects/nope/roles"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Vec<Value> = resp.json().await.unwrap();
        assert!(body.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_provisions_and_stores_session() {
    timeout(TEST_TIMEOUT, async {
        let (port, sessions) = start_server().await;

        let body = onboard_jordan(port).await;

        let channels = &body["employee"]["onboardingData"]["slack"]["channels"];
        assert_eq!(
            channels,
            &json!(["#design-system", "#onboarding", "#ux-team", "#product"])
        );
        assert_eq!(
            body["employee"]["onboardingData"]["role"]["manager"],
            "Rania Boutros"
        );

        let progress = body["progress"].as_array().unwrap();
        let expected: Vec<Value> = ["profile", "slack", "github", "chatbot"]
            .iter()
            .flat_map(|key| {
                [
                    json!({ "key": key, "state": "active" }),
                    json!({ "key": key, "state": "completed" }),
                ]
            })
            .collect();
        assert_eq!(progress, &expected);

        let summary = body["summary"].as_str().unwrap();
        assert!(summary.contains("Manager: Rania Boutros (UX Team)"));
        assert!(summary.contains("Manager email: rania.boutros@raspberry-coffee.com"));

        let stored = sessions.current().await.unwrap().unwrap();
        assert_eq!(stored.name, "Jordan Lee");
        assert_eq!(stored.project, "aurora");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_rejects_missing_fields() {
    timeout(TEST_TIMEOUT, async {
        let (port, sessions) = start_server().await;

        let resp = post(
            port,
            "/api/onboard",
            json!({ "name": "  ", "email": "jordan@rc.com", "project": "aurora", "role": "UX Designer" }),
        )
        .await;
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Please fill in all required fields");

        assert!(sessions.current().await.unwrap().is_none());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_rejects_unknown_selection() {
    timeout(TEST_TIMEOUT, async {
        let (port, sessions) = start_server().await;

        let resp = post(
            port,
            "/api/onboard",
            json!({ "name": "Jordan", "email": "j@rc.com", "project": "mars", "role": "UX Designer" }),
        )
        .await;
        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("mars"));

        let resp = post(
            port,
            "/api/onboard",
            json!({ "name": "Jordan", "email": "j@rc.com", "project": "aurora", "role": "Astronaut" }),
        )
        .await;
        assert_eq!(resp.status(), 422);

        assert!(sessions.current().await.unwrap().is_none());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn login_opens_chat_with_welcome() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;
        onboard_jordan(port).await;

        let body = login_jordan(port).await;
        assert!(body["chatId"].as_str().is_some());
        assert_eq!(body["initials"], "JL");
        assert_eq!(body["role"], "UX Designer");
        let welcome = body["welcome"].as_str().unwrap();
        assert!(welcome.starts_with("Welcome Jordan Lee!"));
        assert!(welcome.contains("#design-system, #onboarding, #ux-team, #product"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn login_rejects_unknown_employee() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;
        onboard_jordan(port).await;

        let resp = post(
            port,
            "/api/login",
            json!({ "name": "Sam Park", "email": "jordan@rc.com" }),
        )
        .await;
        assert_eq!(resp.status(), 401);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Invalid credentials"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn chat_answers_and_records_history() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;
        onboard_jordan(port).await;
        let chat_id = login_jordan(port).await["chatId"]
            .as_str()
            .unwrap()
            .to_string();

        let resp = post(
            port,
            &format!("/api/chat/{chat_id}"),
            json!({ "message": "Who is my manager?" }),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["intent"], "manager_contact");
        assert!(body["reply"].as_str().unwrap().contains("Rania Boutros"));

        let resp = post(
            port,
            &format!("/api/chat/{chat_id}"),
            json!({ "message": "tell me a joke" }),
        )
        .await;
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["intent"], "help");

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/chat/{chat_id}/history"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        let turns = body["turns"].as_array().unwrap();
        let speakers: Vec<&str> = turns.iter().map(|t| t["speaker"].as_str().unwrap()).collect();
        assert_eq!(
            speakers,
            ["assistant", "employee", "assistant", "employee", "assistant"]
        );
        assert_eq!(turns[1]["text"], "Who is my manager?");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn chat_rejects_unknown_session_and_empty_message() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;

        let unknown = uuid::Uuid::new_v4();
        let resp = post(
            port,
            &format!("/api/chat/{unknown}"),
            json!({ "message": "hello" }),
        )
        .await;
        assert_eq!(resp.status(), 404);

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/api/chat/{unknown}/history"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        onboard_jordan(port).await;
        let chat_id = login_jordan(port).await["chatId"]
            .as_str()
            .unwrap()
            .to_string();
        let resp = post(port, &format!("/api/chat/{chat_id}"), json!({ "message": "   " })).await;
        assert_eq!(resp.status(), 400);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn logout_closes_chat_session() {
    timeout(TEST_TIMEOUT, async {
        let (port, _sessions) = start_server().await;
        onboard_jordan(port).await;
        let chat_id = login_jordan(port).await["chatId"]
            .as_str()
            .unwrap()
            .to_string();

        let client = reqwest::Client::new();
        let url = format!("http://127.0.0.1:{port}/api/chat/{chat_id}");
        let resp = client.delete(&url).send().await.unwrap();
        assert_eq!(resp.status(), 204);

        let resp = post(port, &format!("/api/chat/{chat_id}"), json!({ "message": "hello" })).await;
        assert_eq!(resp.status(), 404);

        let resp = reqwest::get(format!("{url}/history")).await.unwrap();
        assert_eq!(resp.status(), 404);

        let resp = client.delete(&url).send().await.unwrap();
        assert_eq!(resp.status(), 404);

        // The stored employee survives logout and can sign in again.
        let body = login_jordan(port).await;
        assert_ne!(body["chatId"].as_str().unwrap(), chat_id);
    })
    .await
    .expect("test timed out");
}
