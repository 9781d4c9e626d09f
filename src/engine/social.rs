//! Chat and emotes. None of these mutate world state.

use super::notify;
use crate::protocol::{ChatChannel, ServerMessage};
use crate::world::World;

/// Speak to everyone in the current room. The room broadcast includes the
/// speaker; the synchronous result is a second-person echo.
pub fn say(world: &World, player_id: &str, text: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    if world.room(&player.room_id).is_none() {
        return ServerMessage::error("You are in an unknown location.");
    }

    notify::broadcast_room(
        world,
        &player.room_id,
        ServerMessage::Chat {
            channel: ChatChannel::Say,
            sender: player.name.clone(),
            message: format!("{} says: \"{}\"", player.name, text),
        },
        None,
    );

    ServerMessage::Chat {
        channel: ChatChannel::Say,
        sender: player.name.clone(),
        message: format!("You say: \"{}\"", text),
    }
}

/// Shout to every connected player regardless of room.
pub fn shout(world: &World, player_id: &str, text: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };

    notify::broadcast_all(
        world,
        ServerMessage::Chat {
            channel: ChatChannel::Shout,
            sender: player.name.clone(),
            message: format!("{} shouts: \"{}\"", player.name, text),
        },
        None,
    );

    ServerMessage::Chat {
        channel: ChatChannel::Shout,
        sender: player.name.clone(),
        message: format!("You shout: \"{}\"", text),
    }
}

/// Private message to a named player anywhere in the world.
pub fn whisper(world: &World, player_id: &str, target: &str, text: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };

    let Some(target_player) = world.find_player_by_name(target) else {
        return ServerMessage::error(format!("Player {} is not online.", target));
    };
    let target_id = target_player.id.clone();
    let target_name = target_player.name.clone();

    notify::send_to_player(
        world,
        &target_id,
        ServerMessage::Chat {
            channel: ChatChannel::Whisper,
            sender: player.name.clone(),
            message: format!("{} whispers: \"{}\"", player.name, text),
        },
    );

    ServerMessage::Chat {
        channel: ChatChannel::Whisper,
        sender: player.name.clone(),
        message: format!("You whisper to {}: \"{}\"", target_name, text),
    }
}

/// Perform a freeform action visible to the room.
pub fn emote(world: &World, player_id: &str, action: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    if world.room(&player.room_id).is_none() {
        return ServerMessage::error("You are in an unknown location.");
    }

    notify::broadcast_room(
        world,
        &player.room_id,
        ServerMessage::Emote {
            sender: player.name.clone(),
            message: format!("{} {}", player.name, action),
        },
        None,
    );

    ServerMessage::Emote {
        sender: player.name.clone(),
        message: format!("You {}", action),
    }
}

/// Canned emote text for the predefined social verbs.
pub fn canned_emote(verb: &str) -> Option<&'static str> {
    match verb {
        "smile" => Some("smiles."),
        "laugh" => Some("laughs heartily."),
        "wave" => Some("waves."),
        "dance" => Some("dances around excitedly."),
        "bow" => Some("bows gracefully."),
        _ => None,
    }
}
