//! Chat channels and emotes: say, shout, whisper, and the canned socials.

mod common;

use std::time::Instant;

use castlemud::engine::command::dispatch;
use castlemud::protocol::{ChatChannel, ServerMessage};
use castlemud::world::World;
use common::{frame_text, login, seeded_world};

fn run(world: &mut World, player_id: &str, line: &str) -> ServerMessage {
    dispatch(world, player_id, line, Instant::now())
}

#[test]
fn say_echoes_and_reaches_the_room_including_the_speaker() {
    let mut world = seeded_world();
    let mut listener = login(&mut world, "Brom", None);
    let mut speaker = login(&mut world, "Aria", None);
    listener.drain();
    speaker.drain();

    let result = run(&mut world, &speaker.id, "say hello there");
    assert_eq!(
        result,
        ServerMessage::Chat {
            channel: ChatChannel::Say,
            sender: "Aria".to_string(),
            message: "You say: \"hello there\"".to_string(),
        }
    );

    let expected = "Aria says: \"hello there\"";
    assert!(listener.drain().iter().any(|f| frame_text(f) == expected));
    // The speaker hears their own broadcast too.
    assert!(speaker.drain().iter().any(|f| frame_text(f) == expected));
}

#[test]
fn say_does_not_leave_the_room() {
    let mut world = seeded_world();
    let mut remote = login(&mut world, "Brom", None);
    let speaker = login(&mut world, "Aria", None);
    run(&mut world, &remote.id, "north");
    remote.drain();

    run(&mut world, &speaker.id, "say anyone here?");
    assert!(remote.drain().is_empty());
}

#[test]
fn shout_reaches_every_connected_player() {
    let mut world = seeded_world();
    let mut remote = login(&mut world, "Brom", None);
    let speaker = login(&mut world, "Aria", None);
    run(&mut world, &remote.id, "north");
    run(&mut world, &remote.id, "north");
    remote.drain();

    run(&mut world, &speaker.id, "shout the wolves are loose");
    assert!(remote
        .drain()
        .iter()
        .any(|f| frame_text(f) == "Aria shouts: \"the wolves are loose\""));
}

#[test]
fn whisper_is_private_and_global() {
    let mut world = seeded_world();
    let mut target = login(&mut world, "Brom", None);
    let mut bystander = login(&mut world, "Cora", None);
    let speaker = login(&mut world, "Aria", None);
    run(&mut world, &target.id, "north");
    target.drain();
    bystander.drain();

    let result = run(&mut world, &speaker.id, "whisper brom meet me south");
    assert_eq!(
        result,
        ServerMessage::Chat {
            channel: ChatChannel::Whisper,
            sender: "Aria".to_string(),
            message: "You whisper to Brom: \"meet me south\"".to_string(),
        }
    );

    assert!(target
        .drain()
        .iter()
        .any(|f| frame_text(f) == "Aria whispers: \"meet me south\""));
    assert!(bystander.drain().is_empty());
}

#[test]
fn whisper_to_an_offline_player_fails() {
    let mut world = seeded_world();
    let speaker = login(&mut world, "Aria", None);
    assert_eq!(
        run(&mut world, &speaker.id, "whisper ghost hello"),
        ServerMessage::error("Player ghost is not online.")
    );
}

#[test]
fn custom_emote_is_prefixed_with_the_name() {
    let mut world = seeded_world();
    let mut listener = login(&mut world, "Brom", None);
    let speaker = login(&mut world, "Aria", None);
    listener.drain();

    let result = run(&mut world, &speaker.id, "emote stretches and yawns");
    assert_eq!(frame_text(&result), "You stretches and yawns");
    assert!(listener
        .drain()
        .iter()
        .any(|f| frame_text(f) == "Aria stretches and yawns"));
}

#[test]
fn canned_socials_expand_to_full_emotes() {
    let mut world = seeded_world();
    let mut listener = login(&mut world, "Brom", None);
    let speaker = login(&mut world, "Aria", None);
    listener.drain();

    run(&mut world, &speaker.id, "bow");
    assert!(listener
        .drain()
        .iter()
        .any(|f| frame_text(f) == "Aria bows gracefully."));

    run(&mut world, &speaker.id, "laugh");
    assert!(listener
        .drain()
        .iter()
        .any(|f| frame_text(f) == "Aria laughs heartily."));
}

#[test]
fn empty_chat_arguments_are_usage_errors() {
    let mut world = seeded_world();
    let speaker = login(&mut world, "Aria", None);
    assert_eq!(
        run(&mut world, &speaker.id, "say"),
        ServerMessage::error("Say what?")
    );
    assert_eq!(
        run(&mut world, &speaker.id, "whisper brom"),
        ServerMessage::error("Whisper to whom and what?")
    );
    assert_eq!(
        run(&mut world, &speaker.id, "emote"),
        ServerMessage::error("Emote what?")
    );
}
