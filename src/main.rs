#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::bail;
use clap::Parser;
use log::info;

use dungeon_crawler::{Dungeon, Player};

/// Frame time used for each step of a walk script.
const FRAME_TIME: f32 = 1.0 / 40.0;

/// Generate a dungeon, print it, and optionally walk the player through it.
#[derive(Debug, Parser)]
struct Args {
    /// Dungeon width in tiles.
    #[arg(long, default_value_t = 64)]
    width: i32,

    /// Dungeon height in tiles.
    #[arg(long, default_value_t = 36)]
    height: i32,

    /// Layout seed; 0 picks a random one.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Tile size in pixels.
    #[arg(long = "tile-size", default_value_t = 20)]
    tile_size: i32,

    /// Moves to play, one per frame: `w`, `a`, `s`, `d`, and `+`/`-` to change speed.
    #[arg(long, default_value = "")]
    walk: String,

    /// Enable debug logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if args.tile_size <= 0 {
        bail!("tile size must be positive, got {}", args.tile_size);
    }

    let mut dungeon = Dungeon::new(args.width, args.height);
    dungeon.generate(args.seed);
    println!("{}", dungeon.stage());
    info!(
        "{} x {} tiles, seed {}, {} walkable",
        dungeon.width(),
        dungeon.height(),
        dungeon.seed(),
        dungeon.walkable_count()
    );

    let mut player = Player::spawn_in(&dungeon, args.tile_size);
    info!("player spawned at {:?}", player.tile(args.tile_size));

    for step in args.walk.chars() {
        let (dx, dy) = match step {
            'w' => (0, -1),
            'a' => (-1, 0),
            's' => (0, 1),
            'd' => (1, 0),
            '+' => {
                player.faster();
                continue;
            }
            '-' => {
                player.slower();
                continue;
            }
            other => bail!("unknown move {other:?} in walk script"),
        };
        player.step(&dungeon, dx, dy, FRAME_TIME, args.tile_size);
    }

    if !args.walk.is_empty() {
        info!(
            "player ended at ({:.1}, {:.1}), tile {:?}, speed {}",
            player.x,
            player.y,
            player.tile(args.tile_size),
            player.speed()
        );
    }

    Ok(())
}
