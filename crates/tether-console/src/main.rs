//! # tether-console
//!
//! Terminal console binary: connects to a remote agent backend, mirrors the
//! session state locally, and logs timeline and browser changes as they
//! stream in.

#![deny(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tether_client::AgentSession;
use tether_core::settings::{load_settings_from_path, settings_path};

/// Tether agent console.
#[derive(Parser, Debug)]
#[command(name = "tether", about = "Console for a remote browser agent session")]
struct Cli {
    /// HTTP API base URL (overrides settings).
    #[arg(long)]
    api_url: Option<String>,

    /// WebSocket base URL (overrides settings).
    #[arg(long)]
    ws_url: Option<String>,

    /// Message to send to the agent once a session is established.
    #[arg(long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = settings_path();
    let mut settings = load_settings_from_path(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(ws_url) = args.ws_url {
        settings.ws_url = ws_url;
    }

    info!(api_url = %settings.api_url, ws_url = %settings.ws_url, "starting console");

    let agent = AgentSession::new(&settings);
    agent.connect();

    if let Some(message) = args.message {
        send_when_ready(&agent, &message).await;
    }

    watch(&agent).await;

    agent.close();
    info!("console shut down");
    Ok(())
}

/// Wait for the backend to assign a session, then send the message and log
/// the reply.
async fn send_when_ready(agent: &AgentSession, message: &str) {
    for _ in 0..100 {
        if agent.snapshot().session.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    match agent.send_message(message).await {
        Ok(reply) if reply.needs_follow_up => {
            info!(question = ?reply.question, "agent needs clarification");
        }
        Ok(reply) if reply.start_execution => {
            if let Some(task) = reply.task_data {
                info!("task approved, starting execution");
                if !agent.start_task(task) {
                    warn!("not connected, task not started");
                }
            }
        }
        Ok(_) => info!("message delivered"),
        Err(error) => warn!(%error, "failed to send message"),
    }
}

/// Log session changes until Ctrl-C.
async fn watch(agent: &AgentSession) {
    let mut interval = tokio::time::interval(Duration::from_millis(500));
    let mut last_seen = 0u64;
    let mut last_connected = agent.is_connected();
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let snap = agent.snapshot();
                if snap.connected != last_connected {
                    last_connected = snap.connected;
                    if snap.connected {
                        info!("connected");
                    } else {
                        warn!("disconnected, retrying");
                    }
                }
                if snap.events_seen != last_seen {
                    last_seen = snap.events_seen;
                    report(&snap);
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(error) = result {
                    warn!(%error, "failed to listen for shutdown signal");
                }
                break;
            }
        }
    }
}

fn report(snap: &tether_client::Snapshot) {
    let Some(session) = &snap.session else {
        return;
    };
    info!(
        session_id = %session.id,
        status = ?session.status,
        event = snap.last_event_kind.unwrap_or("-"),
        url = %snap.browser.url,
        "session update"
    );
    for (step, status) in snap.steps.iter().zip(&snap.display_statuses) {
        info!(step_id = %step.id, name = %step.name, status = ?status, "step");
    }
}
