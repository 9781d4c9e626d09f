//! The authoritative in-memory world: entity model, store, and world seed.
//!
//! All cross-references between entities are by identifier only; the store
//! is the single place allowed to mutate membership sets, which keeps the
//! room/player/item consistency invariants in one file.

pub mod errors;
pub mod seed;
pub mod store;
pub mod types;

pub use errors::WorldError;
pub use store::World;
pub use types::{
    ClassTemplate, ConsumeEffect, Direction, EquipInfo, EquipSlot, ItemInstance, ItemTemplate,
    Mob, Player, Room,
};
