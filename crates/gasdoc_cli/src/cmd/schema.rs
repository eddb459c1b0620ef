use std::path::PathBuf;

use gasdoc::wire::{Registry, SchemaEntry};

#[derive(clap::Args)]
pub struct Args {
	/// JSON schema file.
	pub path: PathBuf,
}

/// Print every schema entry with its kind and layout.
pub fn run(args: Args) -> gasdoc::wire::Result<()> {
	let Args { path } = args;

	let registry = Registry::from_json_str(&std::fs::read_to_string(&path)?)?;

	println!("path: {}", path.display());
	println!("entries: {}", registry.len());
	for (name, entry) in registry.iter() {
		match entry {
			SchemaEntry::Struct(fields) => {
				println!("  {name}: struct");
				for (field, ty) in fields {
					println!("    {field}: {ty}");
				}
			}
			SchemaEntry::Option(inner) => println!("  {name}: option<{inner}>"),
			SchemaEntry::Function(_) => println!("  {name}: function"),
		}
	}
	Ok(())
}
