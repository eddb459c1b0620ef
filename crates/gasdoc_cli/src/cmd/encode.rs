use clap::ValueEnum;
use gasdoc::wire::{Instruction, Opcode};

use crate::cmd::util::print_json;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Op {
	Initialize,
	Topup,
	Transfer,
}

impl From<Op> for Opcode {
	fn from(op: Op) -> Self {
		match op {
			Op::Initialize => Opcode::Initialize,
			Op::Topup => Opcode::Topup,
			Op::Transfer => Opcode::Transfer,
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	/// Instruction to encode.
	#[arg(value_enum)]
	pub op: Op,
	/// Lamports for `topup` and `transfer`.
	#[arg(long)]
	pub amount: Option<u128>,
	/// Emit JSON instead of bare hex.
	#[arg(long)]
	pub json: bool,
}

/// Encode an instruction payload and print it as hex.
pub fn run(args: Args) -> gasdoc::wire::Result<()> {
	let Args { op, amount, json } = args;

	let opcode = Opcode::from(op);
	let bytes = Instruction::new(opcode, amount)?.encode();
	let payload = hex::encode(&bytes);

	if json {
		return print_json(&serde_json::json!({
			"instruction": opcode.name(),
			"discriminant": opcode as u8,
			"len": bytes.len(),
			"hex": payload,
		}));
	}

	println!("{payload}");
	Ok(())
}
