use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chat_client::{
    ChatController, ClientConfig, ClientError, HttpBackend,
    services::composer::{Composer, InputAction},
    view::{ChatView, TerminalView},
};

type Controller = ChatController<HttpBackend, TerminalView<std::io::Stdout>>;

const HELP: &str = "commands: /new  /load <n|id>  /list  /upload <path>  /help  /quit\n\
                    end a line with \\ to continue the message on the next line";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "chat_client=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().context("loading configuration")?;
    let backend = HttpBackend::new(&config).context("building http client")?;
    tracing::info!(base_url = %backend.base_url(), "chat client starting");

    let mut controller = ChatController::new(backend, TerminalView::new(std::io::stdout()));
    println!("{}", HELP);

    let mut composer = Composer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        // Commands are only recognised at the start of a fresh message.
        if composer.text().is_empty() {
            let trimmed = line.trim();
            if trimmed == "/quit" {
                break;
            }
            if trimmed.starts_with('/') {
                run_command(&mut controller, trimmed).await;
                continue;
            }
        }

        if let InputAction::Submit(text) = composer.feed_line(&line) {
            composer.clear();
            let result = controller.send_message(&text).await.map(|_| ());
            report(&mut controller, result);
        }
    }

    tracing::info!("chat client exiting");
    Ok(())
}

async fn run_command(controller: &mut Controller, command: &str) {
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let result = match name {
        "/new" => controller.create_session().await.map(|_| ()),
        "/load" => match controller.state().resolve_target(arg) {
            Some(target) => controller.load_session(&target).await.map(|_| ()),
            None if !arg.is_empty() => controller.load_session(arg).await.map(|_| ()),
            None => {
                controller.show_error("usage: /load <n|id>");
                Ok(())
            }
        },
        "/list" => {
            let entries: Vec<String> = controller
                .state()
                .sidebar()
                .iter()
                .map(|e| {
                    let marker = if controller.state().active() == Some(e.target_id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    format!("{} {} ({})", marker, e.display_label, e.target_id)
                })
                .collect();
            if entries.is_empty() {
                println!("no conversations yet, use /new");
            }
            for entry in entries {
                println!("{}", entry);
            }
            Ok(())
        }
        "/upload" if !arg.is_empty() => controller.upload_file(Path::new(arg)).await.map(|_| ()),
        "/upload" => {
            controller.show_error("usage: /upload <path>");
            Ok(())
        }
        _ => {
            println!("{}", HELP);
            Ok(())
        }
    };

    report(controller, result);
}

/// Show failures the controller did not already render.
fn report(controller: &mut Controller, result: Result<(), ClientError>) {
    match result {
        Ok(()) => {}
        Err(ClientError::EmptyMessage) => {}
        Err(e) if e.is_surfaced() => tracing::debug!(error = %e, "already shown"),
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            controller.view_mut().show_error(&e.to_string());
        }
    }
}
