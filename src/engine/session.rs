//! Session registry: login and disconnect.
//!
//! This is the only module that creates or destroys player records. A player
//! is added to the registry and the starting room in one store operation,
//! and removed the same way, so no observer ever sees a half-present player.

use log::info;

use super::{look, notify};
use crate::logutil::escape_log;
use crate::protocol::{Outbound, ServerMessage};
use crate::validation::validate_display_name;
use crate::world::seed::STARTING_ROOM_ID;
use crate::world::types::{class_template, Player};
use crate::world::World;

/// Handle a login request.
///
/// On success the returned frames are the login result followed by the
/// initial room description, and the starting room is told about the
/// arrival. On failure a single error frame is returned and nothing is
/// created.
pub fn login(
    world: &mut World,
    name: &str,
    class: Option<&str>,
    outbound: Outbound,
) -> (Option<String>, Vec<ServerMessage>) {
    let trimmed = match validate_display_name(name) {
        Ok(trimmed) => trimmed,
        Err(reason) => return (None, vec![ServerMessage::error(reason.to_string())]),
    };

    if world.find_player_by_name(trimmed).is_some() {
        return (
            None,
            vec![ServerMessage::error(
                "That name is already taken. Please choose another.",
            )],
        );
    }

    let mut player = Player::new(trimmed, STARTING_ROOM_ID, outbound);
    if let Some(class_name) = class {
        player.apply_class(class_template(class_name));
    }
    let player_id = player.id.clone();
    let player_name = player.name.clone();
    let snapshot = player.snapshot();

    if let Err(e) = world.add_player(player) {
        // Starting room missing means the seed never ran; refuse the login
        // rather than leave a registered player nowhere.
        log::error!(target: "castlemud::session", "login failed: {}", e);
        return (
            None,
            vec![ServerMessage::error("The world is not ready. Try again.")],
        );
    }

    info!(
        target: "castlemud::session",
        "login: player={} name={}", player_id, escape_log(&player_name)
    );

    notify::broadcast_room(
        world,
        STARTING_ROOM_ID,
        ServerMessage::Message {
            message: format!("{} has entered the game.", player_name),
        },
        Some(&player_id),
    );

    let replies = vec![
        ServerMessage::Login {
            message: format!("Welcome, {}! You are now in the game.", player_name),
            player: snapshot,
        },
        look::look_room(world, &player_id),
    ];
    (Some(player_id), replies)
}

/// Remove a player from the registry and their room, announcing the
/// departure. Idempotent: a repeat call for the same id does nothing.
pub fn disconnect(world: &mut World, player_id: &str) {
    let Some(player) = world.remove_player(player_id) else {
        return;
    };
    info!(
        target: "castlemud::session",
        "disconnect: player={} name={}", player_id, escape_log(&player.name)
    );
    notify::broadcast_room(
        world,
        &player.room_id,
        ServerMessage::Message {
            message: format!("{} has left the game.", player.name),
        },
        Some(player_id),
    );
}
