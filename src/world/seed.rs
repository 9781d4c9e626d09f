//! Canonical world seed: the castle-and-forest starting area.
//!
//! The World Builder runs exactly once at process start. Rooms, creature
//! placements, and the item catalog are fixed content; everything that
//! mutates afterwards lives in the occupant/creature/item sets.

use std::time::Duration;

use log::info;

use super::store::World;
use super::types::{ConsumeEffect, Direction, EquipSlot, ItemTemplate, Mob, Room};

/// Safe room where new players enter and defeated players respawn.
pub const STARTING_ROOM_ID: &str = "castle-entrance";

/// Build the full starting world: room graph, creatures, item catalog, and
/// the items lying around at boot.
pub fn build_world() -> World {
    let mut world = World::new();
    seed_rooms(&mut world);
    seed_mobs(&mut world);
    seed_items(&mut world);
    info!(
        target: "castlemud::world",
        "world initialized: {} rooms", world.room_count()
    );
    world
}

fn seed_rooms(world: &mut World) {
    world.insert_room(
        Room::new(
            STARTING_ROOM_ID,
            "Castle Entrance",
            "You stand at the grand entrance of a magnificent castle. Stone walls rise high \
             above you, and a large wooden gate stands open, welcoming adventurers. This is a \
             safe area where new adventurers gather.",
        )
        .with_exit(Direction::North, "castle-courtyard")
        .with_exit(Direction::East, "castle-gardens")
        .with_exit(Direction::West, "castle-guardhouse")
        .with_exit(Direction::South, "forest-path-1")
        .safe_zone(),
    );

    world.insert_room(
        Room::new(
            "castle-courtyard",
            "Castle Courtyard",
            "The courtyard is bustling with activity. Merchants have set up stalls selling \
             various goods, and other adventurers are preparing for their journeys.",
        )
        .with_exit(Direction::South, STARTING_ROOM_ID)
        .with_exit(Direction::North, "castle-keep")
        .with_exit(Direction::East, "castle-barracks")
        .with_exit(Direction::West, "castle-stables")
        .safe_zone(),
    );

    world.insert_room(
        Room::new(
            "castle-gardens",
            "Castle Gardens",
            "Beautiful gardens surround this part of the castle. Colorful flowers bloom, and \
             the air is filled with their sweet scent.",
        )
        .with_exit(Direction::West, STARTING_ROOM_ID)
        .with_exit(Direction::North, "castle-barracks")
        .safe_zone(),
    );

    world.insert_room(
        Room::new(
            "castle-guardhouse",
            "Castle Guardhouse",
            "The guardhouse is where the castle guards rest between shifts. Weapons and armor \
             are neatly arranged on racks.",
        )
        .with_exit(Direction::East, STARTING_ROOM_ID)
        .with_exit(Direction::North, "castle-stables")
        .safe_zone(),
    );

    world.insert_room(
        Room::new(
            "forest-path-1",
            "Forest Path",
            "A narrow path leads into a dense forest. The trees provide shade from the sun, \
             and you can hear birds chirping in the distance.",
        )
        .with_exit(Direction::North, STARTING_ROOM_ID)
        .with_exit(Direction::South, "forest-clearing-1")
        .with_exit(Direction::East, "forest-path-2")
        .with_exit(Direction::West, "forest-path-3"),
    );

    world.insert_room(
        Room::new(
            "forest-path-2",
            "Eastern Forest Path",
            "The forest path continues eastward. The trees are thicker here, and less sunlight \
             filters through the canopy.",
        )
        .with_exit(Direction::West, "forest-path-1")
        .with_exit(Direction::East, "forest-river-1"),
    );

    world.insert_room(
        Room::new(
            "forest-path-3",
            "Western Forest Path",
            "The forest path continues westward. You can hear the sounds of small animals \
             moving through the underbrush.",
        )
        .with_exit(Direction::East, "forest-path-1")
        .with_exit(Direction::West, "forest-cave-entrance"),
    );

    world.insert_room(
        Room::new(
            "forest-clearing-1",
            "Forest Clearing",
            "A small clearing in the forest. Sunlight streams down, illuminating a patch of \
             wildflowers.",
        )
        .with_exit(Direction::North, "forest-path-1")
        .with_exit(Direction::South, "deep-forest-1"),
    );

    world.insert_room(
        Room::new(
            "deep-forest-1",
            "Deep Forest",
            "The forest grows darker and more ominous. The trees are ancient and twisted, and \
             strange sounds echo in the distance.",
        )
        .with_exit(Direction::North, "forest-clearing-1")
        .with_exit(Direction::South, "deep-forest-2")
        .with_exit(Direction::East, "deep-forest-3")
        .with_exit(Direction::West, "deep-forest-4"),
    );
}

fn seed_mobs(world: &mut World) {
    let mobs = [
        Mob::new(
            "forest-wolf-1",
            "Forest Wolf",
            "A gray wolf with piercing yellow eyes. It looks hungry.",
            20,
            5,
            2,
            1,
            "forest-path-1",
        )
        .aggressive()
        .with_respawn_delay(Duration::from_secs(60))
        .with_loot(&["wolf-pelt", "wolf-fang"]),
        Mob::new(
            "forest-wolf-2",
            "Forest Wolf",
            "A gray wolf with piercing yellow eyes. It looks hungry.",
            20,
            5,
            2,
            1,
            "forest-path-2",
        )
        .aggressive()
        .with_respawn_delay(Duration::from_secs(60))
        .with_loot(&["wolf-pelt", "wolf-fang"]),
        Mob::new(
            "forest-bandit-1",
            "Forest Bandit",
            "A rough-looking human wearing tattered clothes and wielding a rusty dagger.",
            25,
            6,
            3,
            1,
            "forest-path-3",
        )
        .aggressive()
        .with_respawn_delay(Duration::from_secs(120))
        .with_loot(&["rusty-dagger", "leather-pouch"]),
        Mob::new(
            "forest-deer-1",
            "Forest Deer",
            "A gentle deer grazing in the clearing. It looks up nervously as you approach.",
            15,
            2,
            1,
            1,
            "forest-clearing-1",
        )
        .with_respawn_delay(Duration::from_secs(45))
        .with_loot(&["deer-hide", "venison"]),
        Mob::new(
            "forest-bear-1",
            "Forest Bear",
            "A large brown bear. It looks powerful and dangerous.",
            40,
            10,
            5,
            2,
            "deep-forest-1",
        )
        .aggressive()
        .with_respawn_delay(Duration::from_secs(180))
        .with_loot(&["bear-pelt", "bear-claw"]),
    ];
    for mob in mobs {
        world
            .insert_mob(mob)
            .expect("seed mobs reference seeded rooms");
    }
}

fn seed_items(world: &mut World) {
    let templates = [
        ItemTemplate::new(
            "wolf-pelt",
            "Wolf Pelt",
            "A gray wolf pelt. It could be sold to a merchant or used for crafting.",
            5,
            2,
        ),
        ItemTemplate::new(
            "wolf-fang",
            "Wolf Fang",
            "A sharp wolf fang. It could be used for crafting.",
            3,
            1,
        ),
        ItemTemplate::new(
            "rusty-dagger",
            "Rusty Dagger",
            "A rusty dagger. It's not very sharp, but it's better than nothing.",
            10,
            2,
        )
        .equippable(EquipSlot::Weapon, 2, 0),
        ItemTemplate::new(
            "leather-pouch",
            "Leather Pouch",
            "A small leather pouch. It contains a few coins.",
            15,
            1,
        )
        .consumable(ConsumeEffect::Gold(5)),
        ItemTemplate::new(
            "deer-hide",
            "Deer Hide",
            "A soft deer hide. It could be used for crafting or sold to a merchant.",
            8,
            3,
        ),
        ItemTemplate::new(
            "venison",
            "Venison",
            "Fresh venison. It looks delicious and would restore some health if eaten.",
            6,
            2,
        )
        .consumable(ConsumeEffect::Health(10)),
        ItemTemplate::new(
            "bear-pelt",
            "Bear Pelt",
            "A thick bear pelt. It's quite valuable and could be used for crafting warm \
             clothing.",
            20,
            5,
        ),
        ItemTemplate::new(
            "bear-claw",
            "Bear Claw",
            "A sharp bear claw. It could be used for crafting or as a trophy.",
            12,
            1,
        ),
        ItemTemplate::new(
            "leather-armor",
            "Leather Armor",
            "Basic leather armor. It provides some protection.",
            25,
            8,
        )
        .equippable(EquipSlot::Armor, 0, 3),
        ItemTemplate::new(
            "healing-potion",
            "Healing Potion",
            "A small vial containing a red liquid. It will restore health when consumed.",
            15,
            1,
        )
        .consumable(ConsumeEffect::Health(25)),
    ];
    for template in templates {
        world.insert_template(template);
    }

    // Starter placements.
    for (template, room) in [
        ("healing-potion", "castle-courtyard"),
        ("leather-armor", "castle-guardhouse"),
        ("rusty-dagger", "forest-path-1"),
    ] {
        world
            .spawn_item_in_room(template, room)
            .expect("seed items reference seeded rooms and templates");
    }
}
