use std::collections::BTreeMap;
use std::path::PathBuf;

use gasdoc::wire::{GsnState, read_buffer};

use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	/// Account data file.
	pub path: PathBuf,
	/// Treat the file as hex text.
	#[arg(long)]
	pub hex: bool,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Decode and print gas-station account state.
pub fn run(args: Args) -> gasdoc::wire::Result<()> {
	let Args { path, hex, json } = args;

	let (encoding, bytes) = read_buffer(&path, hex)?;
	let state = GsnState::decode(&bytes)?;

	if json {
		return print_json(&serde_json::json!({
			"is_initialized": state.is_initialized,
			"consumer": state.consumer,
			"executor": state.executor,
		}));
	}

	println!("path: {}", path.display());
	println!("encoding: {}", encoding.as_str());
	println!("is_initialized: {}", state.is_initialized);
	print_balances("consumer", &state.consumer);
	print_balances("executor", &state.executor);
	Ok(())
}

fn print_balances(label: &str, balances: &BTreeMap<String, u64>) {
	println!("{label}: {}", balances.len());
	for (address, amount) in balances {
		println!("  {address}: {amount}");
	}
}
