//! runmap CLI - generate a floor and play through it from the terminal.

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use runmap_core::{Graph, NodeId, NodeType};
use runmap_generator::{GeneratorConfig, GraphGenerator};
use runmap_progress::{clear_progress, NodeStatus, ProgressTracker, TrackerConfig};
use runmap_storage::{read_json, write_json, JsonFileStore};

/// Key the generated floor is stored under.
const FLOOR_KEY: &str = "floor_graph";

/// Key the floor's generation parameters are stored under.
const FLOOR_CONFIG_KEY: &str = "floor_config";

#[derive(Parser)]
#[command(name = "runmap")]
#[command(about = "Roguelite floor generator and progression tracker", long_about = None)]
struct Cli {
    /// Directory holding the floor and progress records
    #[arg(long, global = true, default_value = ".runmap")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new floor, discarding previous progress
    New {
        /// Boss level
        #[arg(long, default_value = "5")]
        max_level: u32,
        /// Upper bound on nodes per level
        #[arg(long, default_value = "4")]
        width: u32,
        /// Seed for a reproducible floor
        #[arg(long)]
        seed: Option<u64>,
    },
    #[command(flatten)]
    Play(PlayCommands),
}

/// Commands that act on an existing floor.
#[derive(Subcommand)]
enum PlayCommands {
    /// Print the floor level by level
    Show {
        /// Only list nodes of this type (e.g. combat, boss)
        #[arg(long = "type", value_parser = parse_node_type)]
        node_type: Option<NodeType>,
    },
    /// Show progress statistics
    Status,
    /// Select a node to play
    Select {
        /// Node ID
        id: String,
    },
    /// Mark a node completed
    Complete {
        /// Node ID
        id: String,
    },
    /// List available nodes, best first
    Recommend,
    /// Shortest path to a node
    Path {
        /// Target node ID
        id: String,
    },
    /// Forget all progress on the current floor
    Reset,
    /// Complete every node below a level
    SkipTo {
        /// Level to open
        level: u32,
    },
}

/// How a stored floor was generated.
#[derive(Debug, Serialize, Deserialize)]
struct FloorConfig {
    seed: u64,
    generator: GeneratorConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut store = JsonFileStore::new(&cli.state_dir)
        .with_context(|| format!("cannot open state directory {}", cli.state_dir.display()))?;

    let command = match cli.command {
        Commands::New { max_level, width, seed } => return new_floor(&mut store, max_level, width, seed),
        Commands::Play(command) => command,
    };

    let Some(graph) = read_json::<Graph>(&store, FLOOR_KEY)? else {
        bail!("No floor in {}; run `runmap new` first", cli.state_dir.display());
    };
    let mut tracker = ProgressTracker::new(Arc::new(graph), store, TrackerConfig::default());

    match command {
        PlayCommands::Show { node_type } => {
            let graph = Arc::clone(tracker.graph());
            if let Some(floor) = read_json::<FloorConfig>(tracker.store(), FLOOR_CONFIG_KEY)? {
                println!("Floor (seed {}, max level {})", floor.seed, floor.generator.max_level);
            }
            for (level, nodes) in graph.levels().iter().rev() {
                let shown: Vec<_> = nodes
                    .iter()
                    .filter(|n| node_type.map_or(true, |t| n.node_type == t))
                    .collect();
                if shown.is_empty() {
                    continue;
                }
                println!("Level {}", level);
                for node in shown {
                    let next: Vec<&str> = graph.successors(&node.id).map(|id| id.as_str()).collect();
                    println!(
                        "  {:<6} {:<10} {:<9} -> {}",
                        node.id.as_str(),
                        node.node_type,
                        format_status(tracker.node_status(&node.id)),
                        if next.is_empty() { "-".to_string() } else { next.join(", ") },
                    );
                }
            }
        }
        PlayCommands::Status => {
            let stats = tracker.progress_stats();
            println!("Run Status");
            println!("  Level: {}", tracker.current_level());
            println!(
                "  Current: {}",
                tracker.current_node().map(|id| id.as_str()).unwrap_or("-")
            );
            println!("  Completed: {}/{}", stats.completed, stats.total_nodes);
            println!("  Available: {}", stats.available);
            println!("  Locked: {}", stats.locked);
            println!("  Completion: {:.0}%", stats.completion_rate * 100.0);
            println!("  Boss: {}/{}", stats.boss_completed, stats.boss_nodes);
            if stats.is_game_complete {
                println!("  Floor cleared!");
            }
        }
        PlayCommands::Select { id } => {
            let id = NodeId::new(id);
            if !tracker.select_node(&id) {
                bail!("Cannot select {}", id);
            }
            println!("Selected {}", id);
        }
        PlayCommands::Complete { id } => {
            let id = NodeId::new(id);
            if !tracker.complete_node(&id) {
                bail!("Cannot complete {}", id);
            }
            println!("Completed {}", id);
            if tracker.progress_stats().is_game_complete {
                println!("Floor cleared!");
            }
        }
        PlayCommands::Recommend => {
            let recommended = tracker.recommendations();
            println!("Recommended ({})", recommended.len());
            for node in recommended {
                println!("  {} | {}", node.id, node.node_type);
            }
        }
        PlayCommands::Path { id } => {
            let path = tracker.find_path_to_node(&NodeId::new(id.clone()));
            if path.is_empty() {
                println!("No path to {}", id);
            } else {
                let hops: Vec<&str> = path.iter().map(|id| id.as_str()).collect();
                println!("{}", hops.join(" -> "));
            }
        }
        PlayCommands::Reset => {
            tracker.reset_progress();
            println!("Progress reset");
        }
        PlayCommands::SkipTo { level } => {
            tracker.set_progress_to_level(level);
            println!("Skipped to level {}", tracker.current_level());
        }
    }

    Ok(())
}

/// Generate and store a fresh floor, dropping progress from the old one.
fn new_floor(store: &mut JsonFileStore, max_level: u32, width: u32, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let config = GeneratorConfig::new(max_level, width);
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = GraphGenerator::new(config)?.generate(&mut rng)?;

    write_json(store, FLOOR_KEY, &graph)?;
    write_json(store, FLOOR_CONFIG_KEY, &FloorConfig { seed, generator: config })?;
    clear_progress(store, &TrackerConfig::default().storage_key)?;

    info!("Generated floor with seed {}", seed);
    println!(
        "New floor: {} levels, {} nodes, {} edges (seed {})",
        graph.levels().len(),
        graph.len(),
        graph.edges().len(),
        seed
    );
    Ok(())
}

fn parse_node_type(s: &str) -> std::result::Result<NodeType, String> {
    NodeType::parse(s).ok_or_else(|| {
        let names: Vec<&str> = NodeType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown node type '{}', expected one of {}", s, names.join(", "))
    })
}

fn format_status(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Completed => "COMPLETED",
        NodeStatus::Current => "CURRENT",
        NodeStatus::Available => "AVAILABLE",
        NodeStatus::Locked => "LOCKED",
    }
}
