//! Triagem CLI - line-oriented frontend for the classification engine.
//!
//! The engine owns all state; this binary only translates commands into
//! engine operations and prints what the engine exposes. Rendering stays
//! deliberately dumb - cards, tabs and toasts belong to richer frontends.

use std::io::BufRead;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use triagem_engine::types::{FileAttachment, InputMode, TaskState, Theme, View};
use triagem_engine::{AmbientScheme, App, ThemeStore, TriagemConfig, mailto_url};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Ambient color scheme read from the terminal's `COLORFGBG` convention.
///
/// The variable holds `foreground;background` color indices; a low background
/// index means a dark terminal.
struct TerminalScheme;

impl AmbientScheme for TerminalScheme {
    fn prefers_dark(&self) -> bool {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| value.rsplit(';').next()?.trim().parse::<u8>().ok())
            .is_some_and(|background| matches!(background, 0..=6 | 8))
    }
}

fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn print_notifications(app: &mut App) {
    for notification in app.drain_notifications() {
        let marker = if notification.is_failure() { "✗" } else { "✓" };
        println!("{marker} {}", notification.message());
    }
}

fn print_result(app: &App) {
    match app.task_state() {
        TaskState::Idle => println!("Nenhum resultado ainda."),
        TaskState::Pending => println!("Processando..."),
        TaskState::Succeeded(outcome) => {
            println!("Classificação: {}", outcome.classification);
            println!("Assunto: {}", outcome.subject);
            println!();
            println!("{}", outcome.body);
        }
        TaskState::Failed(message) => println!("Falhou: {message}"),
    }
}

fn print_history(app: &App) {
    if app.history().entries().is_empty() {
        println!("Histórico vazio.");
        return;
    }
    for entry in app.history().entries() {
        println!(
            "[{}] {} — {} ({})",
            entry.id,
            entry.subject,
            entry.classification,
            format_timestamp(&entry.created_at)
        );
        if app.history().is_expanded(&entry.id) {
            println!("    {}", entry.reply.replace('\n', "\n    "));
        }
    }
}

fn print_help() {
    println!("Comandos:");
    println!("  text <conteúdo>     define o texto do e-mail e o modo texto");
    println!("  file <caminho>      anexa um arquivo e ativa o modo arquivo");
    println!("  mode text|file      troca o modo sem limpar nada");
    println!("  submit              envia para classificação");
    println!("  view result|sub     troca de aba");
    println!("  show                mostra a aba ativa");
    println!("  history             recarrega e lista o histórico");
    println!("  open <id>           abre/fecha um item do histórico");
    println!("  copy                imprime o resultado em formato de cópia");
    println!("  mailto              imprime a URL mailto: do resultado");
    println!("  theme               alterna claro/escuro");
    println!("  quit                sai");
}

async fn handle_command(app: &mut App, line: &str) -> Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "text" => {
            app.draft_mut().set_text(rest);
            app.draft_mut().set_mode(InputMode::Text);
        }
        "file" => {
            let bytes = std::fs::read(rest).with_context(|| format!("lendo {rest}"))?;
            let name = std::path::Path::new(rest)
                .file_name()
                .map_or_else(|| rest.to_string(), |n| n.to_string_lossy().into_owned());
            app.draft_mut().set_file(FileAttachment::new(name, bytes));
            app.draft_mut().set_mode(InputMode::File);
        }
        "mode" => match rest {
            "text" => app.draft_mut().set_mode(InputMode::Text),
            "file" => app.draft_mut().set_mode(InputMode::File),
            _ => println!("modo desconhecido: {rest}"),
        },
        "submit" => {
            if !app.draft().is_valid() {
                println!("Nada para enviar: preencha o texto ou anexe um arquivo.");
            } else {
                app.submit().await;
            }
        }
        "view" => {
            let view = match rest {
                "result" => View::Result,
                _ => View::Submission,
            };
            if !app.select_view(view) {
                println!("Ainda não há resultado para mostrar.");
            }
        }
        "show" => match app.view() {
            View::Submission => {
                let draft = app.draft();
                println!(
                    "Modo: {:?} | texto: {} caracteres | arquivo: {}",
                    draft.mode(),
                    draft.text().chars().count(),
                    draft.file().map_or("nenhum", |f| f.name.as_str())
                );
            }
            View::Result => print_result(app),
        },
        "history" => {
            app.refresh_history().await;
            print_notifications(app);
            print_history(app);
        }
        "open" => {
            app.toggle_expanded(rest);
            print_history(app);
        }
        "copy" => match app.task_state().outcome() {
            Some(outcome) => println!("{}", outcome.clipboard_text()),
            None => println!("Nenhum resultado para copiar."),
        },
        "mailto" => match app.task_state().outcome() {
            Some(outcome) => println!("{}", mailto_url(outcome)),
            None => println!("Nenhum resultado para enviar."),
        },
        "theme" => {
            let theme = app.toggle_theme().context("persistindo preferência")?;
            println!(
                "Tema: {}",
                if theme == Theme::Dark { "escuro" } else { "claro" }
            );
        }
        "" => {}
        other => println!("Comando desconhecido: {other} (use \"help\")"),
    }

    print_notifications(app);
    Ok(true)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let config = TriagemConfig::load().context("carregando configuração")?;
    let preferences = TriagemConfig::preferences_path()
        .context("nenhum diretório de configuração disponível")?;
    let theme = ThemeStore::load(preferences, &TerminalScheme);

    tracing::info!(api = config.api_base.as_str(), "Triagem iniciado");
    let mut app = App::new(config, theme);

    app.initial_load().await;
    print_notifications(&mut app);
    print_history(&app);
    println!("Digite \"help\" para os comandos.");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("lendo stdin")?;
        match handle_command(&mut app, line.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("erro: {e:#}"),
        }
    }

    Ok(())
}
