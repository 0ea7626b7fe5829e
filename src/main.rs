//! Dungeon grid generator
//!
//! Generates dungeons from the command line and prints them as ASCII or JSON.

use clap::{Parser, ValueEnum};
use dungeon_grid::dungeon_gen;
use dungeon_grid::{farthest_room_start, player_start, DungeonRng, GenerationParams, Map};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

/// Procedural dungeon grid generator
#[derive(Parser, Debug)]
#[command(name = "dungeon-grid")]
#[command(version, about = "Generate room-and-corridor dungeon grids", long_about = None)]
struct Args {
    /// Map width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Map height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Fraction of the map to cover with rooms (0 to 1)
    #[arg(long)]
    goal: Option<f64>,

    /// Minimum room size
    #[arg(long = "min-size")]
    min_size: Option<u32>,

    /// Maximum base room size
    #[arg(long = "max-size")]
    max_size: Option<u32>,

    /// Number of zones to cluster rooms into
    #[arg(long)]
    zones: Option<u32>,

    /// Pin the largest room into the first zone
    #[arg(long = "boss-room")]
    boss_room: bool,

    /// Maximum number of rooms to place
    #[arg(long = "max-rooms")]
    max_rooms: Option<usize>,

    /// Seed for reproducible output (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with generation parameters; other flags override it
    #[arg(long)]
    params: Option<PathBuf>,

    /// Regenerate up to this many times until the dungeon is fully connected
    #[arg(long = "retry-until-connected", value_name = "N")]
    retry_until_connected: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value = "ascii")]
    format: Format,

    /// Number of dungeons to generate
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Serve profiling data to puffin_viewer while generating
    #[arg(long)]
    profile: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn generation_params(&self) -> Result<GenerationParams, Box<dyn std::error::Error>> {
        let mut params = match &self.params {
            Some(path) => GenerationParams::load(path)?,
            None => GenerationParams::default(),
        };

        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if self.goal.is_some() {
            params.goal = self.goal;
        }
        if self.min_size.is_some() {
            params.min_size = self.min_size;
        }
        if self.max_size.is_some() {
            params.max_size = self.max_size;
        }
        if self.zones.is_some() {
            params.zones = self.zones;
        }
        if self.max_rooms.is_some() {
            params.max_rooms = self.max_rooms;
        }
        params.boss_room |= self.boss_room;

        Ok(params)
    }
}

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(log_level(verbose));
    Ok(())
}

#[derive(Serialize)]
struct Output<'a> {
    seed: u64,
    attempts: u32,
    spawn: (i32, i32),
    farthest_spawn: (i32, i32),
    #[serde(flatten)]
    map: &'a Map,
}

fn render_ascii(map: &Map, spawn: (i32, i32)) -> String {
    let boss = map.boss_room().map(|room| room.rect.center());
    let mut out = String::with_capacity((map.width + 1) * map.height);

    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            let glyph = if (x, y) == spawn && map.is_walkable(x, y) {
                '@'
            } else if Some((x, y)) == boss {
                'B'
            } else {
                map.cell(x, y).map_or(' ', |cell| cell.glyph())
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let params = args.generation_params()?.resolve()?;

    let _server = if args.profile {
        puffin::set_scopes_on(true);
        let addr = format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT);
        let server = puffin_http::Server::new(&addr)?;
        log::info!("Serving profile data on {}", addr);
        Some(server)
    } else {
        None
    };

    let mut rng = match args.seed {
        Some(seed) => DungeonRng::new(seed),
        None => DungeonRng::from_entropy(),
    };
    log::debug!("Seed {}", rng.seed());

    for index in 0..args.count {
        let (map, attempts) = match args.retry_until_connected {
            Some(max_attempts) => dungeon_gen::generate_connected(&params, &mut rng, max_attempts.max(1)),
            None => (dungeon_gen::generate(&params, &mut rng), 1),
        };

        if !map.connected {
            log::warn!("Dungeon {} is not fully connected", index + 1);
        }

        let spawn = player_start(&map);

        match args.format {
            Format::Ascii => {
                if index > 0 {
                    println!();
                }
                print!("{}", render_ascii(&map, spawn));
            }
            Format::Json => {
                let output = Output {
                    seed: rng.seed(),
                    attempts,
                    spawn,
                    farthest_spawn: farthest_room_start(&map),
                    map: &map,
                };
                println!("{}", serde_json::to_string(&output)?);
            }
        }

        puffin::GlobalProfiler::lock().new_frame();
    }

    Ok(())
}
