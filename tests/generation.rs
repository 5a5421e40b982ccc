use std::collections::HashSet;

use pretty_assertions::assert_eq;

use dungeon_crawler::{Dungeon, Vector};

fn generated(width: i32, height: i32, seed: u64) -> Dungeon {
    let mut dungeon = Dungeon::new(width, height);
    dungeon.generate(seed);
    dungeon
}

#[test]
fn same_seed_same_layout() {
    for seed in [1, 42, 0xdead_beef, u64::MAX] {
        let a = generated(64, 36, seed);
        let b = generated(64, 36, seed);
        assert_eq!(a.stage(), b.stage());
        assert_eq!(a.spawn(), b.spawn());
        assert_eq!(a.seed(), seed);
    }
}

#[test]
fn different_seeds_differ() {
    assert_ne!(generated(64, 36, 1).stage(), generated(64, 36, 2).stage());
}

#[test]
fn unset_seed_is_replaced() {
    let mut dungeon = Dungeon::new(64, 36);
    dungeon.generate(0);
    let first = dungeon.seed();
    dungeon.generate(0);
    let second = dungeon.seed();

    assert_ne!(first, 0);
    assert_ne!(second, 0);
    assert_ne!(first, second);
}

#[test]
fn out_of_bounds_is_blocked() {
    let dungeon = generated(64, 36, 42);
    assert!(!dungeon.is_walkable(-1, 5));
    assert!(!dungeon.is_walkable(64, 0));
    assert!(!dungeon.is_walkable(0, 36));
    assert!(!dungeon.is_walkable(5, -1));
    assert!(!dungeon.is_walkable(i32::MIN, i32::MAX));
}

#[test]
fn spawn_is_walkable_and_centered() {
    const TILE: i32 = 20;
    for seed in 1..100 {
        let dungeon = generated(64, 36, seed);
        let Vector(col, row) = dungeon.spawn();
        assert!(dungeon.is_walkable(col, row), "seed {seed}");

        let (x, y) = dungeon.spawn_in_pixels(TILE);
        assert_eq!(x, (col * TILE) as f32 + 10.0);
        assert_eq!(y, (row * TILE) as f32 + 10.0);
        assert_eq!(
            ((x / TILE as f32).floor() as i32, (y / TILE as f32).floor() as i32),
            (col, row)
        );
    }
}

#[test]
fn walkable_traversal_matches_query() {
    let dungeon = generated(64, 36, 42);

    let mut visited = Vec::new();
    dungeon.for_each_walkable(|x, y| visited.push((x, y)));

    let expected: Vec<(i32, i32)> = (0..36)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| dungeon.is_walkable(x, y))
        .collect();

    assert!(!visited.is_empty());
    assert_eq!(visited.len(), visited.iter().collect::<HashSet<_>>().len());
    assert_eq!(visited, expected);
}

#[test]
fn traversal_can_be_repeated() {
    let dungeon = generated(64, 36, 7);
    let first: Vec<Vector> = dungeon.walkable_tiles().collect();
    let second: Vec<Vector> = dungeon.walkable_tiles().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), dungeon.walkable_count());
}

#[test]
fn configure_does_not_regenerate() {
    let mut dungeon = generated(64, 36, 42);
    let before = dungeon.stage().clone();
    let spawn = dungeon.spawn();

    dungeon.configure(32, 18);

    assert_eq!(dungeon.width(), 32);
    assert_eq!(dungeon.height(), 18);
    assert_eq!(dungeon.stage(), &before);
    assert_eq!(dungeon.stage().width, 64);
    assert_eq!(dungeon.spawn(), spawn);
    assert!(!dungeon.is_walkable(64, 0));

    dungeon.generate(dungeon.seed());
    assert_eq!(dungeon.stage().width, 32);
    assert_eq!(dungeon.stage().height, 18);
}
