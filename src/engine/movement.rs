//! Room-to-room movement.

use log::warn;

use super::{look, notify};
use crate::protocol::ServerMessage;
use crate::world::{Direction, World};

/// Move a player through an exit of their current room.
///
/// The occupant-set update and the player's room field change together in
/// one store operation; observers in either room are notified afterwards and
/// the mover receives the destination's description as the result.
pub fn move_player(world: &mut World, player_id: &str, direction: Direction) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let player_name = player.name.clone();
    let Some(current_room) = world.room(&player.room_id) else {
        return ServerMessage::error("You are in an unknown location.");
    };
    let from_room_id = current_room.id.clone();

    let Some(destination_id) = current_room.exits.get(&direction).cloned() else {
        return ServerMessage::error("You cannot go that way.");
    };
    if world.room(&destination_id).is_none() {
        // Exit points at a room the builder never created. Data integrity,
        // not a user mistake; the session keeps running.
        warn!(
            target: "castlemud::movement",
            "dangling exit: {} -> {} ({})", from_room_id, destination_id, direction
        );
        return ServerMessage::error("The destination does not exist.");
    }

    if let Err(e) = world.move_player(player_id, &destination_id) {
        warn!(target: "castlemud::movement", "move failed for {}: {}", player_id, e);
        return ServerMessage::error("The destination does not exist.");
    }

    notify::broadcast_room(
        world,
        &from_room_id,
        ServerMessage::Message {
            message: format!("{} has left to the {}.", player_name, direction),
        },
        Some(player_id),
    );
    notify::broadcast_room(
        world,
        &destination_id,
        ServerMessage::Message {
            message: format!("{} has arrived.", player_name),
        },
        Some(player_id),
    );

    look::look_room(world, player_id)
}
