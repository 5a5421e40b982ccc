#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use log::trace;

use crate::dungeon::{Dungeon, Vector};

/// A player moving freely in pixel space, confined to walkable tiles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    speed: i32,
}

impl Player {
    pub const DEFAULT_SPEED: i32 = 300;
    pub const SPEED_STEP: i32 = 20;
    pub const MAX_SPEED: i32 = 1000;

    pub fn spawn_in(dungeon: &Dungeon, tile_size: i32) -> Self {
        let (x, y) = dungeon.spawn_in_pixels(tile_size);
        Self {
            x,
            y,
            speed: Self::DEFAULT_SPEED,
        }
    }

    /// Pixels per second.
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    pub fn faster(&mut self) {
        if self.speed < Self::MAX_SPEED {
            self.speed += Self::SPEED_STEP;
        }
    }

    pub fn slower(&mut self) {
        if self.speed >= Self::SPEED_STEP {
            self.speed -= Self::SPEED_STEP;
        }
    }

    pub fn tile(&self, tile_size: i32) -> Vector {
        Vector(
            Self::to_cell(self.x, tile_size),
            Self::to_cell(self.y, tile_size),
        )
    }

    fn to_cell(pixels: f32, tile_size: i32) -> i32 {
        (pixels / tile_size as f32).floor() as i32
    }

    /// Moves along each axis in turn, `dx` first. An axis is only committed when
    /// its destination tile is walkable. Returns whether the player moved at all.
    pub fn step(&mut self, dungeon: &Dungeon, dx: i32, dy: i32, dt: f32, tile_size: i32) -> bool {
        let distance = self.speed as f32 * dt;
        let mut moved = false;

        if dx != 0 {
            let x = self.x + dx.signum() as f32 * distance;
            if dungeon.is_walkable(Self::to_cell(x, tile_size), Self::to_cell(self.y, tile_size)) {
                self.x = x;
                moved = true;
            }
        }

        if dy != 0 {
            let y = self.y + dy.signum() as f32 * distance;
            if dungeon.is_walkable(Self::to_cell(self.x, tile_size), Self::to_cell(y, tile_size)) {
                self.y = y;
                moved = true;
            }
        }

        trace!("step ({dx}, {dy}) -> ({}, {}) moved={moved}", self.x, self.y);
        moved
    }
}
