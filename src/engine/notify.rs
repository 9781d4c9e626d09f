//! Notification fan-out.
//!
//! Delivery is fire-and-forget over each player's outbound channel: a closed
//! or backed-up connection never fails the triggering command and never
//! prevents delivery to the other recipients in the same fan-out.

use crate::protocol::ServerMessage;
use crate::world::World;

/// Deliver one frame to one player, if connected.
pub fn send_to_player(world: &World, player_id: &str, message: ServerMessage) {
    if let Some(player) = world.player(player_id) {
        player.outbound.send(message);
    }
}

/// Deliver a frame to every occupant of a room, optionally excluding one
/// player (typically the actor who already got a synchronous result).
pub fn broadcast_room(world: &World, room_id: &str, message: ServerMessage, exclude: Option<&str>) {
    let Some(room) = world.room(room_id) else {
        return;
    };
    for player_id in &room.players {
        if exclude == Some(player_id.as_str()) {
            continue;
        }
        send_to_player(world, player_id, message.clone());
    }
}

/// Deliver a frame to every connected player.
pub fn broadcast_all(world: &World, message: ServerMessage, exclude: Option<&str>) {
    for player in world.players() {
        if exclude == Some(player.id.as_str()) {
            continue;
        }
        player.outbound.send(message.clone());
    }
}
