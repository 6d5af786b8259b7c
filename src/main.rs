use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use grid_dijkstra::algorithms::a_star::AStar;
use grid_dijkstra::config::Config;
use grid_dijkstra::planner::{Command, Planner};
use grid_dijkstra::render::{self, TerminalSink};
use grid_dijkstra::scene::Scene;
use grid_dijkstra::{
    Dijkstra, MovementTable, ObstacleMap, PathfindingAlgorithm, Position, Result, SearchResult,
};

/// Relative tolerance for comparing against the fixed-point A* baseline.
const VERIFY_TOLERANCE: f64 = 1e-3;

struct Environment {
    map: ObstacleMap,
    movement: MovementTable,
    start: Position,
    goal: Position,
}

fn main() {
    let config = Config::parse();

    let default_level = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when `--verify` found a mismatch.
fn run(config: &Config) -> Result<bool> {
    let env = build_environment(config)?;
    info!(
        "Grid {}x{}, {} blocked cells, {} moves, start {}, goal {}",
        env.map.width(),
        env.map.height(),
        env.map.blocked_count(),
        env.movement.moves().len(),
        env.start,
        env.goal
    );

    let search = Dijkstra::new()
        .with_movement(env.movement.clone())
        .with_path(!config.no_path);

    if config.interactive {
        run_interactive(env, search)?;
        return Ok(true);
    }

    let result = search.search(env.start, env.goal, &env.map)?;
    if !config.quiet {
        print!(
            "{}",
            render::render(&env.map, Some(env.start), Some(env.goal), Some(&result))
        );
        println!();
    }
    print_result(&result);
    if !config.quiet {
        println!("{}", result.stats);
    }

    if config.verify {
        return verify(&env, &result);
    }
    Ok(true)
}

fn build_environment(config: &Config) -> Result<Environment> {
    let movement = |scene_movement: MovementTable| {
        if config.four_connected {
            MovementTable::four_connected()
        } else {
            scene_movement
        }
    };

    if let Some(path) = &config.scene {
        let scene = Scene::load(path)?;
        let map = scene.obstacle_map()?;
        let start = config.start.or(scene.start).unwrap_or(Position::new(0, 0));
        let goal = config
            .goal
            .or(scene.goal)
            .unwrap_or(Position::new(map.width() - 1, map.height() - 1));
        info!("Loaded scene from {}", path.display());
        return Ok(Environment {
            map,
            movement: movement(scene.movement_table()),
            start,
            goal,
        });
    }

    // Validate extents and endpoints before spending time on generation.
    let bounds = ObstacleMap::new(config.width, config.height)?;
    let start = config.start.unwrap_or(Position::new(0, 0));
    let goal = config
        .goal
        .unwrap_or(Position::new(config.width - 1, config.height - 1));
    bounds.is_blocked(start)?;
    bounds.is_blocked(goal)?;

    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!("Environment seed: {} (for reproducibility)", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let map = ObstacleMap::random(
        config.width,
        config.height,
        config.num_walls,
        &[start, goal],
        &mut rng,
    )?;

    Ok(Environment {
        map,
        movement: movement(MovementTable::eight_connected()),
        start,
        goal,
    })
}

fn print_result(result: &SearchResult) {
    println!("=== SEARCH RESULT ===");
    match result.goal_cost() {
        Some(cost) => {
            println!("Goal cost: {:.4}", cost);
            if !result.path.is_empty() {
                println!("Path length: {} cells", result.path.len());
            }
        }
        None => println!("Goal unreachable from {}", result.start),
    }
}

fn verify(env: &Environment, result: &SearchResult) -> Result<bool> {
    let mut baseline = AStar::new(env.movement.clone());
    let expected = baseline.find_path(&env.map, env.start, env.goal)?;

    let agrees = match (result.goal_cost(), &expected) {
        (None, None) => true,
        (Some(cost), Some((_, baseline_cost))) => {
            (cost - baseline_cost).abs() <= VERIFY_TOLERANCE * baseline_cost.max(1.0)
        }
        _ => false,
    };

    if agrees {
        println!("Baseline {} agrees", baseline.name());
    } else {
        error!(
            "Baseline {} disagrees: dijkstra {:?}, baseline {:?}",
            baseline.name(),
            result.goal_cost(),
            expected.map(|(_, cost)| cost)
        );
    }
    Ok(agrees)
}

fn run_interactive(env: Environment, search: Dijkstra) -> Result<()> {
    let mut planner = Planner::new(env.map, search);
    let mut sink = TerminalSink::new(io::stdout());

    planner.set_start(env.start)?;
    planner.set_goal(env.goal)?;
    planner.present(&mut sink)?;
    println!("Commands: block x y | free x y | clear | start x y | goal x y | show | quit");

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = planner.apply(command) {
            warn!("{}", e);
            continue;
        }
        planner.present(&mut sink)?;
    }
    Ok(())
}
