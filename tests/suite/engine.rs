//! Cross-crate engine flows against a mock service.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use triagem_engine::Notification;
use triagem_types::{InputMode, TaskState};

use crate::common::{history_item, test_app};

fn record(id: u64, classificacao: &str, resposta: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "conteudo": "eco",
        "classificacao": classificacao,
        "resposta": resposta,
        "created_at": "2025-01-03T09:00:00Z",
        "assunto": format!("Assunto {id}")
    })
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails/ai"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    // Blank text in text mode
    app.draft_mut().set_text("   ");
    app.submit().await;
    assert!(app.task_state().is_idle());

    // File mode without an attachment
    app.draft_mut().set_mode(InputMode::File);
    app.submit().await;
    assert!(app.task_state().is_idle());
    assert!(app.drain_notifications().is_empty());
}

#[tokio::test]
async fn later_submits_overwrite_earlier_terminal_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails/ai"))
        .and(body_string_contains("primeiro"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(record(1, "Produtivo", "primeira resposta")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails/ai"))
        .and(body_string_contains("segundo"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({ "detail": "ocupado" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [history_item(1, "Assunto 1", "Produtivo")]
        })))
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.draft_mut().set_text("primeiro email");
    app.submit().await;
    assert_eq!(app.task_state().outcome().unwrap().id, "1");

    app.draft_mut().set_text("segundo email");
    app.submit().await;

    // The failure replaced the success wholesale
    assert_eq!(app.task_state(), &TaskState::Failed("ocupado".to_string()));
    assert!(app.task_state().outcome().is_none());

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 2);
    assert!(!notifications[0].is_failure());
    assert!(notifications[1].is_failure());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [history_item(7, "Sete", "Produtivo")]
        })))
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.refresh_history().await;
    assert_eq!(app.history().entries().len(), 1);

    // Service starts failing; the list survives and one notification is emitted
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    app.refresh_history().await;
    assert_eq!(app.history().entries().len(), 1);
    assert_eq!(app.history().entries()[0].id, "7");

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert!(matches!(
        notifications[0],
        Notification::HistoryLoadFailed { .. }
    ));
}

/// The startup load retries a bounded number of times with backoff, then
/// surfaces the failure exactly once. It must never loop.
#[tokio::test]
async fn initial_load_is_bounded_to_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "fora do ar" })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.initial_load().await;

    assert!(app.history().entries().is_empty());
    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message(), "fora do ar");

    // verify_and_clear on drop asserts the call count stayed at 3
}

#[tokio::test]
async fn initial_load_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [history_item(1, "Depois da retentativa", "Produtivo")]
        })))
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.initial_load().await;

    assert_eq!(app.history().entries().len(), 1);
    // The transient failure never surfaced: only the final result counts
    assert!(app.drain_notifications().is_empty());
}
