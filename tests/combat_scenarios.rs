//! Combat exchanges: damage, kills, experience, level-ups, player death,
//! safe zones, and respawn scheduling.

mod common;

use std::time::{Duration, Instant};

use castlemud::engine::combat;
use castlemud::engine::command::dispatch;
use castlemud::protocol::{Outbound, ServerMessage};
use castlemud::world::seed::STARTING_ROOM_ID;
use castlemud::world::types::{Direction, Mob, Player, Room};
use castlemud::world::World;
use common::{frame_text, login, seeded_world};
use tokio::sync::mpsc::UnboundedReceiver;

/// Castle entrance (safe) plus one arena room to the south.
fn arena_world() -> World {
    let mut world = World::new();
    world.insert_room(
        Room::new(STARTING_ROOM_ID, "Castle Entrance", "The safe entrance.")
            .with_exit(Direction::South, "arena")
            .safe_zone(),
    );
    world.insert_room(
        Room::new("arena", "Arena", "An open fighting pit.")
            .with_exit(Direction::North, STARTING_ROOM_ID),
    );
    world
}

fn add_player_in(
    world: &mut World,
    name: &str,
    room: &str,
) -> (String, UnboundedReceiver<ServerMessage>) {
    let (outbound, rx) = Outbound::channel();
    let player = Player::new(name, room, outbound);
    let id = player.id.clone();
    world.add_player(player).unwrap();
    (id, rx)
}

fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

#[test]
fn weak_creature_dies_to_one_strike() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new("rat-1", "Giant Rat", "a rat", 5, 1, 2, 1, "arena"))
        .unwrap();
    let (id, mut rx) = add_player_in(&mut world, "Aria", "arena");
    let now = Instant::now();

    // attack 10 vs defense 2: 8 damage, enough to kill outright.
    let result = combat::attack(&mut world, &id, "giant rat", now);
    let ServerMessage::Victory {
        message,
        experience,
        level,
    } = result
    else {
        panic!("expected victory, got {:?}", result);
    };
    assert!(message.contains("defeated Giant Rat"));
    assert!(message.contains("10 experience"));
    assert_eq!(experience, 10);
    assert_eq!(level, 1);

    // Dead creature is out of the store; a respawn entry is pending.
    assert!(world.mob("rat-1").is_none());
    assert_eq!(world.pending_respawns(), 1);

    // The killer took no counterattack damage.
    assert_eq!(world.player(&id).unwrap().health, 100);

    let frames = drain(&mut rx);
    assert!(frames
        .iter()
        .any(|f| frame_text(f) == "Aria attacks Giant Rat for 8 damage!"));
    assert!(frames
        .iter()
        .any(|f| frame_text(f) == "Aria has defeated Giant Rat!"));
}

#[test]
fn surviving_creature_counterattacks() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new("ogre-1", "Ogre", "an ogre", 50, 8, 2, 2, "arena"))
        .unwrap();
    let (id, mut rx) = add_player_in(&mut world, "Aria", "arena");

    let result = combat::attack(&mut world, &id, "ogre", Instant::now());
    let ServerMessage::Combat { message, vitals } = result else {
        panic!("expected combat result");
    };
    // 10 - 2 = 8 dealt; counter 8 - 5 = 3 taken.
    assert_eq!(
        message,
        "You attack Ogre for 8 damage. It has 42/50 health remaining."
    );
    assert_eq!(vitals.unwrap().health, 97);
    assert_eq!(world.mob("ogre-1").unwrap().health, 42);

    let frames = drain(&mut rx);
    assert!(frames
        .iter()
        .any(|f| frame_text(f) == "Ogre attacks you for 3 damage!"));
}

#[test]
fn damage_floors_at_one_against_heavy_armor() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new(
            "golem-1", "Golem", "a golem", 30, 1, 50, 1, "arena",
        ))
        .unwrap();
    let (id, _rx) = add_player_in(&mut world, "Aria", "arena");

    combat::attack(&mut world, &id, "golem", Instant::now());
    assert_eq!(world.mob("golem-1").unwrap().health, 29);
}

#[test]
fn safe_zone_rejects_combat() {
    let mut world = seeded_world();
    let client = login(&mut world, "Aria", None);
    let result = dispatch(&mut world, &client.id, "attack forest wolf", Instant::now());
    assert_eq!(result, ServerMessage::error("You cannot attack in a safe zone."));
}

#[test]
fn missing_target_is_an_error() {
    let mut world = arena_world();
    let (id, _rx) = add_player_in(&mut world, "Aria", "arena");
    let result = combat::attack(&mut world, &id, "dragon", Instant::now());
    assert_eq!(result, ServerMessage::error("You don't see dragon here."));
}

#[test]
fn killing_blow_precedes_counterattack() {
    let mut world = arena_world();
    // Strong enough to one-shot the player if it ever got to strike.
    world
        .insert_mob(Mob::new(
            "wisp-1", "Dying Wisp", "a wisp", 1, 500, 0, 1, "arena",
        ))
        .unwrap();
    let (id, _rx) = add_player_in(&mut world, "Aria", "arena");

    let result = combat::attack(&mut world, &id, "dying wisp", Instant::now());
    assert!(matches!(result, ServerMessage::Victory { .. }));
    let player = world.player(&id).unwrap();
    assert_eq!(player.health, 100);
    assert_eq!(player.room_id, "arena");
}

#[test]
fn level_up_grows_stats_and_heals() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new(
            "champ-1", "Champion", "a champion", 5, 1, 0, 10, "arena",
        ))
        .unwrap();
    let (id, mut rx) = add_player_in(&mut world, "Aria", "arena");
    world.player_mut(&id).unwrap().health = 40;

    // Level 10 kill grants 100 experience, exactly the level 1 threshold.
    let result = combat::attack(&mut world, &id, "champion", Instant::now());
    let ServerMessage::Victory {
        experience, level, ..
    } = result
    else {
        panic!("expected victory");
    };
    assert_eq!(experience, 100);
    assert_eq!(level, 2);

    let player = world.player(&id).unwrap();
    assert_eq!(player.attack, 11);
    assert_eq!(player.defense, 6);
    assert_eq!(player.max_health, 110);
    assert_eq!(player.health, 110);

    let frames = drain(&mut rx);
    assert!(frames.iter().any(
        |f| matches!(f, ServerMessage::LevelUp { message, .. } if message == "You have reached level 2!")
    ));
}

#[test]
fn defeated_player_is_relocated_with_full_health() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new(
            "reaper-1", "Reaper", "a reaper", 100, 500, 0, 5, "arena",
        ))
        .unwrap();
    let (id, mut rx) = add_player_in(&mut world, "Aria", "arena");
    let (_watcher_id, mut watcher_rx) = add_player_in(&mut world, "Brom", "arena");
    drain(&mut watcher_rx);

    let result = combat::attack(&mut world, &id, "reaper", Instant::now());
    // The synchronous result is the entrance description.
    assert!(frame_text(&result).contains("Castle Entrance"));

    let player = world.player(&id).unwrap();
    assert_eq!(player.room_id, STARTING_ROOM_ID);
    assert_eq!(player.health, player.max_health);
    world.check_invariants().unwrap();

    let frames = drain(&mut rx);
    assert!(frames.iter().any(|f| matches!(
        f,
        ServerMessage::Death { message, .. }
            if message == "You have been defeated and sent back to the castle entrance."
    )));

    let watcher_frames = drain(&mut watcher_rx);
    assert!(watcher_frames
        .iter()
        .any(|f| frame_text(f) == "Aria has been defeated and sent back to the castle."));
}

#[test]
fn lethal_counterattack_applies_the_damage_formula() {
    let mut world = arena_world();
    world
        .insert_mob(Mob::new(
            "brute-1", "Brute", "a brute", 50, 10, 0, 3, "arena",
        ))
        .unwrap();
    let (id, mut rx) = add_player_in(&mut world, "Aria", "arena");
    world.player_mut(&id).unwrap().health = 4;

    // Counter: 10 attack - 5 defense = 5 damage against 4 health.
    let result = combat::attack(&mut world, &id, "brute", Instant::now());
    assert!(matches!(result, ServerMessage::Look { .. }));

    let frames = drain(&mut rx);
    assert!(frames
        .iter()
        .any(|f| frame_text(f) == "Brute attacks you for 5 damage!"));
    assert_eq!(
        world.player(&id).unwrap().room_id,
        STARTING_ROOM_ID
    );
}

#[test]
fn defeated_creature_respawns_after_its_delay() {
    let mut world = arena_world();
    world
        .insert_mob(
            Mob::new("rat-1", "Giant Rat", "a rat", 5, 1, 2, 1, "arena")
                .with_respawn_delay(Duration::from_secs(60)),
        )
        .unwrap();
    let (id, _rx) = add_player_in(&mut world, "Aria", "arena");
    let base = Instant::now();

    combat::attack(&mut world, &id, "giant rat", base);
    assert!(world.mob("rat-1").is_none());

    assert!(world
        .process_due_respawns(base + Duration::from_secs(59))
        .is_empty());
    let fired = world.process_due_respawns(base + Duration::from_secs(60));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].mob_name, "Giant Rat");
    assert_eq!(fired[0].room_id, "arena");

    let rat = world.mob("rat-1").unwrap();
    assert_eq!(rat.health, rat.max_health);
    assert!(world.room("arena").unwrap().mobs.contains("rat-1"));
    world.check_invariants().unwrap();
}
