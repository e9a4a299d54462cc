//! End-to-end scenarios against a mock classification service.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use triagem_engine::Notification;
use triagem_types::{SUBJECT_PRODUCTIVE, TaskState, View};

use crate::common::{history_item, test_app};

/// Draft text → service answers Produtivo without an assunto → the displayed
/// subject is the fixed Produtivo fallback phrase.
#[tokio::test]
async fn classification_without_subject_uses_fixed_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails/ai"))
        .and(body_string_contains("Preciso de ajuda com contrato"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 41,
            "conteudo": "Preciso de ajuda com contrato",
            "classificacao": "Produtivo",
            "resposta": "Claro! Segue o procedimento...",
            "created_at": "2025-01-03T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [history_item(41, "", "Produtivo")]
        })))
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.draft_mut().set_text("Preciso de ajuda com contrato");
    app.submit().await;

    let outcome = app.task_state().outcome().expect("succeeded");
    assert_eq!(outcome.subject, SUBJECT_PRODUCTIVE);
    assert_eq!(outcome.original_content, "Preciso de ajuda com contrato");

    // Success auto-selects the result view and refreshes history
    assert_eq!(app.view(), View::Result);
    assert_eq!(app.history().entries().len(), 1);

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert!(matches!(
        notifications[0],
        Notification::ClassificationReady { .. }
    ));
}

/// HTTP 500 with `{ detail }` → Failed with the verbatim message, one
/// notification, and no auto-switch away from the submission view.
#[tokio::test]
async fn service_error_detail_reaches_the_user_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails/ai"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "modelo indisponível" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.draft_mut().set_text("qualquer coisa");
    app.submit().await;

    assert_eq!(
        app.task_state(),
        &TaskState::Failed("modelo indisponível".to_string())
    );
    assert_eq!(app.view(), View::Submission);

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message(), "modelo indisponível");

    // The failure is terminal: nothing is retried behind the user's back
    assert!(app.drain_notifications().is_empty());
}

/// A successful refresh holds exactly the fetched page; toggling an entry
/// opens its detail panel.
#[tokio::test]
async fn history_refresh_replaces_list_and_toggle_opens_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                history_item(1, "Contrato", "Produtivo"),
                history_item(2, "Feliz natal", "Improdutivo"),
                history_item(3, "Fatura", "Produtivo"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut fixture = test_app(&server);
    let app = &mut fixture.app;

    app.refresh_history().await;
    assert!(app.drain_notifications().is_empty());

    let ids: Vec<_> = app.history().entries().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let first = ids[0].clone();
    assert!(app.toggle_expanded(&first));
    assert!(app.history().is_expanded(&first));
    assert!(!app.history().is_expanded("2"));
}
