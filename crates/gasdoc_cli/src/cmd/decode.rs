use std::path::PathBuf;

use gasdoc::wire::{DecodeOptions, FieldPath, Registry, TypeRef, decode, read_buffer};

use crate::cmd::util::{PrintOptions, print_json, print_value};

#[derive(clap::Args)]
pub struct Args {
	/// Buffer file to decode.
	pub path: PathBuf,
	/// JSON schema file.
	#[arg(long)]
	pub schema: PathBuf,
	/// Type reference to decode, e.g. `GsnInfo`, `u64`, `[32]`, `["string"]`.
	#[arg(long = "type")]
	pub ty: String,
	/// Treat the buffer file as hex text.
	#[arg(long)]
	pub hex: bool,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
	/// Print only the value at this field path.
	#[arg(long)]
	pub select: Option<String>,
	/// Override the nesting ceiling.
	#[arg(long)]
	pub max_depth: Option<u32>,
	/// Fail when bytes remain after the value.
	#[arg(long)]
	pub strict: bool,
}

/// Decode a buffer file against a JSON schema.
pub fn run(args: Args) -> gasdoc::wire::Result<()> {
	let Args {
		path,
		schema,
		ty,
		hex,
		json,
		select,
		max_depth,
		strict,
	} = args;

	let registry = Registry::from_json_str(&std::fs::read_to_string(&schema)?)?;
	let ty = TypeRef::parse(&ty)?;
	let select = select.as_deref().map(FieldPath::parse).transpose()?;

	let mut options = if strict { DecodeOptions::strict() } else { DecodeOptions::default() };
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}

	let (encoding, bytes) = read_buffer(&path, hex)?;
	let value = decode(&registry, &ty, &bytes, &options)?;
	let shown = match &select {
		Some(selector) => value.select(selector)?,
		None => &value,
	};

	if json {
		return print_json(shown);
	}

	println!("path: {}", path.display());
	println!("encoding: {}", encoding.as_str());
	println!("type: {ty}");
	println!("len: {}", bytes.len());
	if let Some(select) = &select {
		println!("select: {select}");
	}
	println!("decoded:");
	print_value(shown, 0, 0, PrintOptions::default());
	Ok(())
}
