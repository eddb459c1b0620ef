#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod logging;

use logging::{LogFormat, LogLevel};

#[derive(Parser)]
#[command(name = "gasdoc", about = "Gas-station account and instruction inspection tools")]
struct Cli {
	/// Log verbosity written to stderr.
	#[arg(long, value_enum, default_value = "warn", global = true)]
	log_level: LogLevel,
	/// Log line format.
	#[arg(long, value_enum, default_value = "text", global = true)]
	log_format: LogFormat,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a buffer with a JSON schema.
	Decode(cmd::decode::Args),
	/// Decode gas-station account data.
	State(cmd::state::Args),
	/// Encode an instruction payload.
	Encode(cmd::encode::Args),
	/// Decode an instruction payload.
	Instruction(cmd::instruction::Args),
	/// List the entries of a JSON schema.
	Schema(cmd::schema::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> gasdoc::wire::Result<()> {
	let cli = Cli::parse();
	logging::init_logging(cli.log_format, cli.log_level);

	match cli.command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::State(args) => cmd::state::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Instruction(args) => cmd::instruction::run(args),
		Commands::Schema(args) => cmd::schema::run(args),
	}
}
