//! Headless driver for the walt player controller.
//!
//! Builds an ECS world with one player standing on a flat floor, plays a
//! scripted input timeline against it and logs every request the controller
//! sends to its collaborators (audio, spawner, tweens, scene).
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing) and parse the script
//! 2. Insert resources, spawn the player and its observers
//! 3. Each tick:
//!    - advance [`WorldTime`](waltplayer::resources::worldtime::WorldTime)
//!    - apply scripted input and events
//!    - run the controller schedule plus the flat-floor body
//!    - rebuild the scene when a restart was requested
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 600 --seed 42 --script "10:+right,40:jump"
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{info, warn};

use waltplayer::components::player::PlayerState;
use waltplayer::demo::{
    DEFAULT_SCRIPT, FlatFloor, ScriptDriver, flat_floor_physics, log_collaborator_requests,
    parse_script,
};
use waltplayer::game::{build_update_schedule, init_world, restart_scene, setup_scene};
use waltplayer::resources::gameconfig::GameConfig;
use waltplayer::resources::worldsignals::{FLAG_RESTART_SCENE, SIGNAL_COINS, WorldSignals};
use waltplayer::systems::player::player_controller;
use waltplayer::systems::scene::apply_scene_cmds;
use waltplayer::systems::time::update_world_time;

/// Walt player controller, headless
#[derive(Parser)]
#[command(version, about = "Runs the platformer player controller against a scripted timeline.")]
struct Cli {
    /// INI file with [player], [timing] and [simulation] settings.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seed for smoke randomness. Overrides simulation.seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Inline script, e.g. "10:+right,40:jump,90:prize=boots".
    #[arg(long, value_name = "SCRIPT", conflicts_with = "script_file")]
    script: Option<String>,

    /// File holding the script, one or more items per line.
    #[arg(long, value_name = "PATH")]
    script_file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let script = match (cli.script, cli.script_file) {
        (Some(script), _) => script,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read script {:?}: {}", path, e))?,
        (None, None) => DEFAULT_SCRIPT.to_string(),
    };
    let mut driver = ScriptDriver::new(parse_script(&script)?);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    init_world(&mut world, &config)?;
    world.insert_resource(FlatFloor { y: config.floor_y });
    setup_scene(&mut world);

    let mut update = build_update_schedule();
    update.add_systems(flat_floor_physics.after(player_controller));
    update.add_systems(log_collaborator_requests.after(apply_scene_cmds));
    update
        .initialize(&mut world)
        .map_err(|e| format!("Failed to initialize schedule: {:?}", e))?;

    // --------------- Main loop ---------------
    let dt = config.tick_seconds();
    let mut restarts = 0;
    for tick in 0..cli.ticks {
        update_world_time(&mut world, dt);
        driver.apply_tick(&mut world, tick);

        update.run(&mut world);

        world.clear_trackers();

        if world.resource::<WorldSignals>().has_flag(FLAG_RESTART_SCENE) {
            restarts += 1;
            info!("[{}] restarting scene", tick);
            restart_scene(&mut world);
        }
    }

    let coins = world
        .resource::<WorldSignals>()
        .get_integer(SIGNAL_COINS)
        .unwrap_or(0);
    let mut players = world.query::<&PlayerState>();
    for state in players.iter(&world) {
        info!(
            "Final player: health={} {:?} {:?} jumps={}/{} invincible={}",
            state.health,
            state.lifecycle,
            state.motion,
            state.jump_count,
            state.max_jumps,
            state.invincible
        );
    }
    info!(
        "Done: {} ticks, {} restarts, {} coins, script finished={}",
        cli.ticks,
        restarts,
        coins,
        driver.is_finished()
    );
    Ok(())
}
