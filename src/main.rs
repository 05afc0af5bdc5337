//! Runs the demonstration script against a simulated ring: create it, add
//! a node, remove a node, then search, printing the ring after each step.
//!
//! ```bash
//! cargo run                                  # built-in script, 3-bit ring {0, 3, 5}
//! cargo run -- --random 12 --bits 6          # twelve random members on 64 identifiers
//! cargo run -- --config script.json --json   # script from a file, JSON snapshots
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use chord_model::{config::ModelConfig, Ring};


#[derive(Parser, Debug)]
#[command(version, about = "Chord ring simulation: finger tables and greedy lookup")]
struct Cli {
	/// JSON file holding the script (bits, positions, add, remove, search_from, search_to)
	#[arg(long, value_name = "FILE", conflicts_with = "random")]
	config: Option<PathBuf>,

	/// Build a random script with this many initial members
	#[arg(long, value_name = "COUNT")]
	random: Option<usize>,

	/// Bit width of the random ring
	#[arg(long, default_value_t = 3)]
	bits: u32,

	/// Print ring snapshots as JSON
	#[arg(long)]
	json: bool,
}

fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

fn print_ring(header: &str, ring: &Ring, json: bool) -> Result<()> {
	println!("======== {} ========", header);
	if json {
		println!("{}", ring.snapshot().to_json()?);
	}else{
		print!("{}", ring);
	}
	println!("=======================================");
	Ok(())
}

fn main() -> Result<()> {
	init_tracing();

	let cli = Cli::parse();
	let config = match (&cli.config, cli.random) {
		(Some(path), _) => ModelConfig::from_file(path)
			.with_context(|| format!("failed to load script from {}", path.display()))?,
		(None, Some(count)) => ModelConfig::random(cli.bits, count),
		(None, None) => ModelConfig::default(),
	};
	info!("Running script {:?}", config);

	// 1. Create system
	let mut ring = Ring::new(config.bits, config.positions.clone())
		.context("failed to create ring")?;
	print_ring("#1. Created system", &ring, cli.json)?;

	// 2. Add node
	ring.add_node(&config.add)
		.with_context(|| format!("failed to add node {}", config.add))?;
	print_ring("#2. System with new node", &ring, cli.json)?;

	// 3. Remove node
	ring.remove_node(&config.remove)
		.with_context(|| format!("failed to remove node {}", config.remove))?;
	print_ring("#3. System without one node", &ring, cli.json)?;

	// 4. Search node
	let lookup = ring.find_node(&config.search_from, &config.search_to)
		.with_context(|| format!("failed to search {} -> {}", config.search_from, config.search_to))?;
	println!("{}", lookup);
	println!("Transitions count: {}", lookup.hops());

	Ok(())
}
