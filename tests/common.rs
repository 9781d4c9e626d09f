//! Shared helpers for the integration tests: a seeded world plus a thin
//! client harness that captures each player's outbound frames.

use castlemud::engine::session;
use castlemud::protocol::{Outbound, ServerMessage};
use castlemud::world::seed::build_world;
use castlemud::world::World;
use tokio::sync::mpsc::UnboundedReceiver;

pub struct TestClient {
    pub id: String,
    pub rx: UnboundedReceiver<ServerMessage>,
}

impl TestClient {
    /// Drain every frame delivered so far.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

pub fn seeded_world() -> World {
    build_world()
}

/// Log a player in, asserting success, and return the connected client with
/// its login frames already drained.
pub fn login(world: &mut World, name: &str, class: Option<&str>) -> TestClient {
    let (outbound, rx) = Outbound::channel();
    let (id, replies) = session::login(world, name, class, outbound);
    let id = id.unwrap_or_else(|| panic!("login rejected for {}: {:?}", name, replies));
    let mut client = TestClient { id, rx };
    client.drain();
    client
}

/// Attempt a login expected to fail; returns the rejection frames.
pub fn login_expect_failure(world: &mut World, name: &str) -> Vec<ServerMessage> {
    let (outbound, _rx) = Outbound::channel();
    let (id, replies) = session::login(world, name, None, outbound);
    assert!(id.is_none(), "login unexpectedly accepted for {}", name);
    replies
}

/// Pull the message text out of any frame variant that carries one.
pub fn frame_text(frame: &ServerMessage) -> &str {
    match frame {
        ServerMessage::Welcome { message }
        | ServerMessage::Login { message, .. }
        | ServerMessage::Look { message }
        | ServerMessage::Help { message }
        | ServerMessage::Message { message }
        | ServerMessage::Chat { message, .. }
        | ServerMessage::Emote { message, .. }
        | ServerMessage::Combat { message, .. }
        | ServerMessage::Victory { message, .. }
        | ServerMessage::Death { message, .. }
        | ServerMessage::LevelUp { message, .. }
        | ServerMessage::Inventory { message }
        | ServerMessage::Item { message }
        | ServerMessage::Consume { message, .. }
        | ServerMessage::Equipment { message, .. }
        | ServerMessage::Respawn { message }
        | ServerMessage::Error { message } => message,
    }
}
