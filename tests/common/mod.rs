//! Shared fixtures for the integration suite.

use tempfile::TempDir;
use wiremock::MockServer;

use triagem_client::ApiBase;
use triagem_engine::{App, NoAmbientScheme, ThemeStore, TriagemConfig};

/// An [`App`] wired to a mock server, with preferences in a temp dir.
///
/// The temp dir must outlive the app so theme toggles keep a writable target.
pub struct TestApp {
    pub app: App,
    _preferences_dir: TempDir,
}

pub fn test_app(server: &MockServer) -> TestApp {
    let preferences_dir = tempfile::tempdir().expect("temp dir");
    let config = TriagemConfig {
        api_base: ApiBase::new(server.uri()),
        page_size: 10,
    };
    let theme = ThemeStore::load(
        preferences_dir.path().join("preferences.toml"),
        &NoAmbientScheme,
    );
    TestApp {
        app: App::new(config, theme),
        _preferences_dir: preferences_dir,
    }
}

pub fn history_item(id: u64, assunto: &str, classificacao: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "assunto": assunto,
        "classificacao": classificacao,
        "resposta": format!("Resposta {id}"),
        "created_at": "2025-01-01T12:00:00Z"
    })
}
