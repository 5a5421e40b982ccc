#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod dungeon;
pub mod player;

pub use dungeon::{Dungeon, Room, Stage, Tile, Vector};
pub use player::Player;
