//! Wire-level message model shared by the engines and the transport.
//!
//! Inbound frames decode to [`ClientMessage`]; every engine operation
//! produces exactly one [`ServerMessage`] as its synchronous result, plus
//! zero or more out-of-band messages delivered through [`Outbound`] handles.
//! The enums are closed: each variant carries only the fields its operation
//! actually produces, so producers and consumers cannot drift apart.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A decoded inbound frame from one client connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request to enter the game under a display name.
    Login {
        name: String,
        #[serde(default)]
        class: Option<String>,
    },
    /// A raw command line to interpret.
    Command { message: String },
}

/// Current and maximum health, attached to combat and consumption results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
}

/// Aggregate attack/defense ratings after an equipment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
}

/// Chat delivery scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatChannel {
    Say,
    Shout,
    Whisper,
}

/// Player state exposed at login and on stat-affecting events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub class: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub experience: u64,
    pub attack: i32,
    pub defense: i32,
}

/// An outbound frame: either the synchronous result of a command or an
/// out-of-band notification from the fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Greeting pushed to a fresh connection before login.
    Welcome { message: String },
    /// Successful login, with the initial player snapshot.
    Login {
        message: String,
        player: PlayerSnapshot,
    },
    /// Room or target description.
    Look { message: String },
    /// Help text.
    Help { message: String },
    /// Plain room traffic: arrivals, departures, joins, leaves.
    Message { message: String },
    /// Spoken text on a chat channel.
    Chat {
        channel: ChatChannel,
        sender: String,
        message: String,
    },
    /// A freeform or canned emote.
    Emote { sender: String, message: String },
    /// One strike in a combat exchange. `vitals` is present on frames
    /// addressed to the combatant, absent on room broadcasts.
    Combat {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        vitals: Option<Vitals>,
    },
    /// Synchronous result of a killing blow.
    Victory {
        message: String,
        experience: u64,
        level: u32,
    },
    /// Private notice that the player was defeated and relocated.
    Death { message: String, vitals: Vitals },
    /// Private notice of a level gain, with the refreshed stat block.
    LevelUp {
        message: String,
        player: PlayerSnapshot,
    },
    /// Inventory listing.
    Inventory { message: String },
    /// Item picked up or dropped.
    Item { message: String },
    /// A consumable's effect was applied.
    Consume {
        message: String,
        vitals: Vitals,
        gold: u64,
    },
    /// Equipment slot change, with the resulting aggregate ratings.
    Equipment { message: String, stats: StatBlock },
    /// A creature reappeared in its home room.
    Respawn { message: String },
    /// User-level error; never terminates the session.
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}

/// Opaque handle to one connection's outbound queue.
///
/// Delivery is fire-and-forget: sending to a closed connection is silently
/// dropped so one dead recipient never affects the rest of a fan-out.
#[derive(Debug, Clone)]
pub struct Outbound(mpsc::UnboundedSender<ServerMessage>);

impl Outbound {
    /// Create a handle together with the receiving half the transport drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Outbound(tx), rx)
    }

    pub fn send(&self, message: ServerMessage) {
        let _ = self.0.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_login_decodes() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"login","name":"Aria","class":"mage"}"#).unwrap();
        match msg {
            ClientMessage::Login { name, class } => {
                assert_eq!(name, "Aria");
                assert_eq!(class.as_deref(), Some("mage"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn client_command_decodes_without_class() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"command","message":"look"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Command { .. }));
    }

    #[test]
    fn combat_broadcast_omits_vitals() {
        let json = serde_json::to_string(&ServerMessage::Combat {
            message: "Aria attacks Forest Wolf for 8 damage!".into(),
            vitals: None,
        })
        .unwrap();
        assert!(json.contains(r#""type":"combat""#));
        assert!(!json.contains("vitals"));
    }

    #[test]
    fn outbound_send_after_drop_is_silent() {
        let (handle, rx) = Outbound::channel();
        drop(rx);
        handle.send(ServerMessage::error("gone"));
    }
}
