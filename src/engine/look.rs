//! Room and target inspection.
//!
//! Descriptions are composed from the live membership sets on every call,
//! never cached, so two looks with no intervening mutation are identical.

use crate::protocol::ServerMessage;
use crate::world::{Direction, World};

/// Compose the full description of the player's current room.
pub fn look_room(world: &World, player_id: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let Some(room) = world.room(&player.room_id) else {
        return ServerMessage::error("You are in an unknown location.");
    };

    let mut text = format!("{}\n{}\n\n", room.name, room.description);

    text.push_str("Exits: ");
    let exits = room.sorted_exit_names();
    if exits.is_empty() {
        text.push_str("none");
    } else {
        text.push_str(&exits.join(", "));
    }
    text.push_str("\n\n");

    let mut others: Vec<&str> = room
        .players
        .iter()
        .filter(|id| id.as_str() != player_id)
        .filter_map(|id| world.player(id).map(|p| p.name.as_str()))
        .collect();
    others.sort_unstable();
    if !others.is_empty() {
        text.push_str("Players here: ");
        text.push_str(&others.join(", "));
        text.push('\n');
    }

    let mut mobs: Vec<&str> = room
        .mobs
        .iter()
        .filter_map(|id| world.mob(id).map(|m| m.name.as_str()))
        .collect();
    mobs.sort_unstable();
    if !mobs.is_empty() {
        text.push_str("Creatures here: ");
        text.push_str(&mobs.join(", "));
        text.push('\n');
    }

    let mut items: Vec<&str> = room.items.iter().map(|id| world.item_name(id)).collect();
    items.sort_unstable();
    if !items.is_empty() {
        text.push_str("Items here: ");
        text.push_str(&items.join(", "));
        text.push('\n');
    }

    ServerMessage::Look { message: text }
}

/// Look at a named target: other occupants first, then creatures, then exit
/// directions. First match wins.
pub fn look_at(world: &World, player_id: &str, target: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let Some(room) = world.room(&player.room_id) else {
        return ServerMessage::error("You are in an unknown location.");
    };

    for id in &room.players {
        if let Some(other) = world.player(id) {
            if other.name.eq_ignore_ascii_case(target) {
                return ServerMessage::Look {
                    message: format!("{} is a level {} adventurer.", other.name, other.level),
                };
            }
        }
    }

    if let Some(mob) = world.mob_in_room_by_name(&room.id, target) {
        return ServerMessage::Look {
            message: format!("{}: {}", mob.name, mob.description),
        };
    }

    if let Some(direction) = Direction::parse(&target.to_lowercase()) {
        if let Some(destination) = room.exits.get(&direction) {
            if let Some(next_room) = world.room(destination) {
                return ServerMessage::Look {
                    message: format!("You peer {} and see {}.", direction, next_room.name),
                };
            }
        }
    }

    ServerMessage::error(format!("You don't see {} here.", target))
}
