#![allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]

use std::{
    fmt::Display,
    ops::{Add, RangeInclusive},
};

use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

impl Tile {
    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => ' ',
            Self::Floor => '█',
        }
    }
}

/// A fixed-size grid of tiles, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl Stage {
    /// Creates a stage filled with walls. Non-positive dimensions give an empty stage.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; Self::area(width, height)],
        }
    }

    /// Cell count for the given dimensions, computed without `i32` overflow.
    pub fn area(width: i32, height: i32) -> usize {
        width.max(0) as usize * height.max(0) as usize
    }

    pub fn set(&mut self, pos: Vector, tile: Tile) {
        if let Some(t) = self.index(pos).and_then(|idx| self.tiles.get_mut(idx)) {
            *t = tile;
        }
    }

    pub fn get(&self, pos: Vector) -> Option<Tile> {
        self.index(pos).and_then(|idx| self.tiles.get(idx).copied())
    }

    pub const fn contains(&self, pos: Vector) -> bool {
        pos.0 >= 0 && pos.0 < self.width && pos.1 >= 0 && pos.1 < self.height
    }

    fn index(&self, pos: Vector) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.1 as usize * self.width as usize + pos.0 as usize)
    }

    fn row(&self, y: i32) -> &[Tile] {
        let width = self.width as usize;
        let start = y.max(0) as usize * width;
        self.tiles.get(start..start + width).unwrap_or(&[])
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border = "-".repeat(self.width as usize + 2);
        writeln!(f, "{border}")?;
        for y in 0..self.height {
            let line: String = self.row(y).iter().copied().map(Tile::to_char).collect();
            writeln!(f, "|{line}|")?;
        }
        write!(f, "{border}")
    }
}

/// A rectangular room, anchored at its top-left cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Room {
    pub const fn anchor(self) -> Vector {
        Vector(self.x, self.y)
    }

    pub const fn center(self) -> Vector {
        Vector(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// A grid coordinate: (column, row).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector(pub i32, pub i32);
impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0, self.1 + other.1)
    }
}

/// Generates room-and-corridor layouts and answers walkability queries against them.
#[derive(Clone, Debug)]
pub struct Dungeon {
    width: i32,
    height: i32,
    seed: u64,
    stage: Stage,
    spawn: Vector,
}

impl Dungeon {
    pub const N_ROOMS: i32 = 8;

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            seed: 0,
            stage: Stage::new(width, height),
            spawn: Vector::default(),
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The seed used by the most recent generation, or 0 before the first one.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub const fn spawn(&self) -> Vector {
        self.spawn
    }

    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Replaces the dimensions used by the next generation.
    /// The current stage is left as it is.
    pub fn configure(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Side length scale shared by room sizes and placement ranges.
    pub fn room_distance(width: i32, height: i32) -> i32 {
        (f64::from(width).hypot(f64::from(height)) / f64::from(Self::N_ROOMS)) as i32
    }

    /// Builds a fresh layout. A seed of 0 picks a new random seed.
    pub fn generate(&mut self, seed: u64) {
        self.seed = seed;
        while self.seed == 0 {
            self.seed = rand::thread_rng().gen();
        }

        self.stage = Stage::new(self.width, self.height);

        let room_distance = Self::room_distance(self.width, self.height);
        // Ranges are clamped so that small or thin grids still sample from a non-empty range.
        let room_size = (room_distance / 2).max(1)..=room_distance.max(1);
        let anchor_x = 1..=Self::anchor_limit(self.width, room_distance);
        let anchor_y = 1..=Self::anchor_limit(self.height, room_distance);

        info!(
            "generating {}x{} dungeon with seed {} (room distance {room_distance})",
            self.width, self.height, self.seed
        );

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
        let mut last_room: Option<Room> = None;

        for idx in 0..Self::N_ROOMS {
            let room = Self::random_room(&mut rng, &room_size, &anchor_x, &anchor_y);
            debug!("room {idx}: {room:?}");

            self.carve_room(room);

            if let Some(last) = last_room {
                self.carve_corridor(last.center(), room.center());
            }

            last_room = Some(room);
        }

        if let Some(room) = last_room {
            self.spawn = room.anchor();
        }
    }

    /// Generates again with the current seed, picking up any new dimensions.
    pub fn regenerate(&mut self) {
        self.generate(self.seed);
    }

    /// Largest anchor coordinate along an axis of the given length, never below 1.
    fn anchor_limit(len: i32, room_distance: i32) -> i32 {
        len.saturating_sub(room_distance)
            .saturating_sub(1)
            .max(1)
    }

    fn random_room(
        rng: &mut impl Rng,
        size: &RangeInclusive<i32>,
        anchor_x: &RangeInclusive<i32>,
        anchor_y: &RangeInclusive<i32>,
    ) -> Room {
        // Draw order is part of the layout for a given seed.
        let w = rng.gen_range(size.clone());
        let h = rng.gen_range(size.clone());
        let x = rng.gen_range(anchor_x.clone());
        let y = rng.gen_range(anchor_y.clone());
        Room { x, y, w, h }
    }

    fn carve_room(&mut self, room: Room) {
        self.carve_rect(room.x, room.y, room.x + room.w, room.y + room.h);
    }

    /// Carves an L-shaped corridor, horizontal leg first. The target cell itself
    /// is left alone; it belongs to the room the corridor leads into.
    fn carve_corridor(&mut self, from: Vector, to: Vector) {
        trace!("corridor {from:?} -> {to:?}");

        if from.0 <= to.0 {
            self.carve_rect(from.0, from.1, to.0, from.1 + 1);
        } else {
            self.carve_rect(to.0 + 1, from.1, from.0 + 1, from.1 + 1);
        }
        if from.1 <= to.1 {
            self.carve_rect(to.0, from.1, to.0 + 1, to.1);
        } else {
            self.carve_rect(to.0, to.1 + 1, to.0 + 1, from.1 + 1);
        }
    }

    /// Marks `[left, right) x [top, bottom)` as floor. The last row and column
    /// of the stage always stay walls.
    fn carve_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        let right = right.min(self.stage.width - 1);
        let bottom = bottom.min(self.stage.height - 1);
        for y in top.max(0)..bottom {
            for x in left.max(0)..right {
                self.stage.set(Vector(x, y), Tile::Floor);
            }
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.stage.get(Vector(x, y)) == Some(Tile::Floor)
    }

    /// Every walkable cell, row by row.
    pub fn walkable_tiles(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.stage.height)
            .flat_map(move |y| (0..self.stage.width).map(move |x| Vector(x, y)))
            .filter(move |&pos| self.stage.get(pos) == Some(Tile::Floor))
    }

    pub fn for_each_walkable(&self, mut visit: impl FnMut(i32, i32)) {
        for Vector(x, y) in self.walkable_tiles() {
            visit(x, y);
        }
    }

    pub fn walkable_count(&self) -> usize {
        self.walkable_tiles().count()
    }

    /// The spawn cell's center, in pixels.
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn_in_pixels(&self, tile_size: i32) -> (f32, f32) {
        let half = tile_size as f32 / 2.0;
        (
            self.spawn.0 as f32 * tile_size as f32 + half,
            self.spawn.1 as f32 * tile_size as f32 + half,
        )
    }
}
