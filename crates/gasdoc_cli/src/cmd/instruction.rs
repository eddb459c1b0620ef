use gasdoc::wire::{Instruction, parse_hex};

use crate::cmd::util::print_json;

#[derive(clap::Args)]
pub struct Args {
	/// Instruction payload as hex.
	pub payload: String,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Decode and print an instruction payload.
pub fn run(args: Args) -> gasdoc::wire::Result<()> {
	let Args { payload, json } = args;

	let instruction = Instruction::decode(&parse_hex(&payload)?)?;
	let opcode = instruction.opcode();
	let amount = match instruction {
		Instruction::Initialize => None,
		Instruction::Topup { amount } | Instruction::Transfer { amount } => Some(amount),
	};

	if json {
		return print_json(&serde_json::json!({
			"instruction": opcode.name(),
			"discriminant": opcode as u8,
			"amount": amount,
		}));
	}

	println!("instruction: {}", opcode.name());
	println!("discriminant: {}", opcode as u8);
	if let Some(amount) = amount {
		println!("amount: {amount}");
	}
	Ok(())
}
