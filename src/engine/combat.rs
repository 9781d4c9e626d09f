//! Combat resolution: one attack/counter-attack exchange per command.
//!
//! Creature death strictly precedes any counterattack in the same exchange;
//! a creature reduced to zero health never strikes back. Defeated creatures
//! are pulled from the store immediately and queued for respawn in their
//! home room.

use std::time::Instant;

use log::{debug, info};

use super::{look, notify};
use crate::protocol::{ServerMessage, Vitals};
use crate::world::seed::STARTING_ROOM_ID;
use crate::world::World;

/// Experience granted per creature level on a kill.
const EXPERIENCE_PER_LEVEL: u64 = 10;
/// Experience needed per player level to advance.
const EXPERIENCE_TO_LEVEL: u64 = 100;
/// Stat growth per level gained.
const LEVEL_ATTACK_STEP: i32 = 1;
const LEVEL_DEFENSE_STEP: i32 = 1;
const LEVEL_HEALTH_STEP: i32 = 10;

/// Damage for one strike: attack minus defense, floored at 1 so combat
/// always progresses.
pub fn damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(1)
}

/// Resolve one attack exchange against a named creature in the player's
/// current room.
pub fn attack(world: &mut World, player_id: &str, target: &str, now: Instant) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let player_name = player.name.clone();
    let player_attack = player.attack;
    let Some(room) = world.room(&player.room_id) else {
        return ServerMessage::error("You are in an unknown location.");
    };
    let room_id = room.id.clone();
    if room.safe {
        return ServerMessage::error("You cannot attack in a safe zone.");
    }

    let Some(mob) = world.mob_in_room_by_name(&room_id, target) else {
        return ServerMessage::error(format!("You don't see {} here.", target));
    };
    let mob_id = mob.id.clone();

    let dealt = damage(player_attack, mob.defense);
    let mob = world.mob_mut(&mob_id).expect("mob resolved above");
    mob.health -= dealt;
    let mob_name = mob.name.clone();
    let mob_dead = mob.health <= 0;

    notify::broadcast_room(
        world,
        &room_id,
        ServerMessage::Combat {
            message: format!(
                "{} attacks {} for {} damage!",
                player_name, mob_name, dealt
            ),
            vitals: None,
        },
        None,
    );

    if mob_dead {
        return resolve_kill(world, player_id, &mob_id, &room_id, now);
    }

    resolve_counterattack(world, player_id, &mob_id, &room_id, dealt)
}

fn resolve_kill(
    world: &mut World,
    player_id: &str,
    mob_id: &str,
    room_id: &str,
    now: Instant,
) -> ServerMessage {
    let mob = world.remove_mob(mob_id).expect("mob present before kill");
    let experience_gained = u64::from(mob.level) * EXPERIENCE_PER_LEVEL;

    let player = world.player_mut(player_id).expect("attacker exists");
    let player_name = player.name.clone();
    player.experience += experience_gained;
    let leveled_up = player.experience >= u64::from(player.level) * EXPERIENCE_TO_LEVEL;
    if leveled_up {
        player.level += 1;
        player.attack += LEVEL_ATTACK_STEP;
        player.defense += LEVEL_DEFENSE_STEP;
        player.max_health += LEVEL_HEALTH_STEP;
        player.health = player.max_health;
    }
    let experience = player.experience;
    let level = player.level;

    if leveled_up {
        let snapshot = world.player(player_id).expect("attacker exists").snapshot();
        info!(
            target: "castlemud::combat",
            "level up: player={} level={}", player_id, level
        );
        notify::send_to_player(
            world,
            player_id,
            ServerMessage::LevelUp {
                message: format!("You have reached level {}!", level),
                player: snapshot,
            },
        );
    }

    notify::broadcast_room(
        world,
        room_id,
        ServerMessage::Combat {
            message: format!("{} has defeated {}!", player_name, mob.name),
            vitals: None,
        },
        None,
    );

    debug!(
        target: "castlemud::combat",
        "creature defeated: {} respawns in {:?}", mob.id, mob.respawn_delay
    );
    let due = now + mob.respawn_delay;
    let mob_name = mob.name.clone();
    world.schedule_respawn(mob.fresh(), due);

    ServerMessage::Victory {
        message: format!(
            "You have defeated {} and gained {} experience!",
            mob_name, experience_gained
        ),
        experience,
        level,
    }
}

fn resolve_counterattack(
    world: &mut World,
    player_id: &str,
    mob_id: &str,
    room_id: &str,
    dealt: i32,
) -> ServerMessage {
    let mob = world.mob(mob_id).expect("mob survived the strike");
    let mob_name = mob.name.clone();
    let mob_attack = mob.attack;
    let (mob_health, mob_max_health) = (mob.health, mob.max_health);

    let player = world.player_mut(player_id).expect("attacker exists");
    let taken = damage(mob_attack, player.defense);
    player.health -= taken;
    let vitals = Vitals {
        health: player.health,
        max_health: player.max_health,
    };
    let player_dead = player.health <= 0;
    let player_name = player.name.clone();

    notify::send_to_player(
        world,
        player_id,
        ServerMessage::Combat {
            message: format!("{} attacks you for {} damage!", mob_name, taken),
            vitals: Some(vitals),
        },
    );

    if player_dead {
        return resolve_player_death(world, player_id, &player_name, room_id);
    }

    ServerMessage::Combat {
        message: format!(
            "You attack {} for {} damage. It has {}/{} health remaining.",
            mob_name, dealt, mob_health, mob_max_health
        ),
        vitals: Some(vitals),
    }
}

fn resolve_player_death(
    world: &mut World,
    player_id: &str,
    player_name: &str,
    room_id: &str,
) -> ServerMessage {
    let player = world.player_mut(player_id).expect("attacker exists");
    player.health = player.max_health;
    let vitals = Vitals {
        health: player.health,
        max_health: player.max_health,
    };

    if let Err(e) = world.move_player(player_id, STARTING_ROOM_ID) {
        // The entrance is part of the fixed seed; failing to find it means
        // the store is unusable, but the session still must not crash.
        log::error!(target: "castlemud::combat", "death relocation failed: {}", e);
        return ServerMessage::error("You are in an unknown location.");
    }
    info!(
        target: "castlemud::combat",
        "player defeated: {} sent back to {}", player_id, STARTING_ROOM_ID
    );

    notify::broadcast_room(
        world,
        room_id,
        ServerMessage::Combat {
            message: format!(
                "{} has been defeated and sent back to the castle.",
                player_name
            ),
            vitals: None,
        },
        Some(player_id),
    );
    notify::send_to_player(
        world,
        player_id,
        ServerMessage::Death {
            message: "You have been defeated and sent back to the castle entrance.".to_string(),
            vitals,
        },
    );

    look::look_room(world, player_id)
}
