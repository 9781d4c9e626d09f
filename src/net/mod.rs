//! WebSocket transport.
//!
//! One task pair per connection: the reader loop owns the session state (the
//! logged-in player id) and feeds the engine; a writer task drains the
//! connection's outbound channel and serializes frames onto the socket. The
//! engine never touches sockets, it only sends on [`Outbound`] handles.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};

use crate::engine::GameEngine;
use crate::protocol::{ClientMessage, Outbound, ServerMessage};

const WELCOME_TEXT: &str = "Welcome to the MUD! Please enter your name to begin.";

/// The network front of the game: an axum router with a single `/ws` route.
pub struct GameServer {
    engine: Arc<GameEngine>,
    bind: String,
}

impl GameServer {
    pub fn new(engine: Arc<GameEngine>, bind: impl Into<String>) -> Self {
        Self {
            engine,
            bind: bind.into(),
        }
    }

    /// Bind the listener and serve connections until the process exits.
    pub async fn run(self) -> Result<()> {
        let router = Router::new()
            .route("/ws", get(ws_handler))
            .with_state(Arc::clone(&self.engine));

        let listener = tokio::net::TcpListener::bind(&self.bind)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind))?;
        info!(target: "castlemud::net", "listening on ws://{}/ws", self.bind);

        axum::serve(listener, router)
            .await
            .context("Server error")?;
        Ok(())
    }
}

/// WebSocket upgrade handler, the entry point for new connections.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(engine): State<Arc<GameEngine>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, engine))
}

/// Drive one connection from upgrade to close.
async fn handle_socket(socket: WebSocket, engine: Arc<GameEngine>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (outbound, mut rx) = Outbound::channel();

    // Writer task: everything the engine fans out to this player goes
    // through here, including the replies to its own commands.
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match serde_json::to_string(&frame) {
                Ok(text) => {
                    if ws_sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!(target: "castlemud::net", "encode failed: {}", e),
            }
        }
    });

    outbound.send(ServerMessage::Welcome {
        message: WELCOME_TEXT.to_string(),
    });

    let mut player_id: Option<String> = None;

    while let Some(result) = ws_receiver.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                debug!(target: "castlemud::net", "socket error: {}", e);
                break;
            }
        };
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum; anything else is ignored.
            _ => continue,
        };

        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Login { name, class }) => {
                if player_id.is_some() {
                    outbound.send(ServerMessage::error("You are already logged in."));
                    continue;
                }
                let (id, replies) = engine
                    .login(&name, class.as_deref(), outbound.clone())
                    .await;
                player_id = id;
                for reply in replies {
                    outbound.send(reply);
                }
            }
            Ok(ClientMessage::Command { message }) => {
                let Some(id) = player_id.as_deref() else {
                    outbound.send(ServerMessage::error("You are not logged in."));
                    continue;
                };
                let reply = engine.handle_command(id, &message).await;
                outbound.send(reply);
            }
            Err(e) => {
                debug!(target: "castlemud::net", "bad client frame: {}", e);
                outbound.send(ServerMessage::error("Invalid message format"));
            }
        }
    }

    if let Some(id) = player_id {
        engine.disconnect(&id).await;
    }
    writer.abort();
}
