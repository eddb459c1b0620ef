use gasdoc::wire::{Result, Value};
use serde::Serialize;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrintOptions {
	/// Maximum number of fields printed for a single struct or map.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested values.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded value tree as indented text.
pub(crate) fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => println!("{pad}null"),
		Value::Bool(v) => println!("{pad}{v}"),
		Value::U8(v) => println!("{pad}{v}"),
		Value::U32(v) => println!("{pad}{v}"),
		Value::U64(v) => println!("{pad}{v}"),
		Value::U128(v) => println!("{pad}{v}"),
		Value::Bytes(v) => println!("{pad}bytes[{}] {}", v.len(), truncate(&hex::encode(v), options.max_string_len)),
		Value::String(v) => println!("{pad}\"{}\"", truncate(v, options.max_string_len)),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{pad}  ... {} more", items.len() - options.max_array_items);
			}
			println!("{pad}]");
		}
		Value::Map(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{... {} entries}}", entries.len());
				return;
			}
			println!("{pad}{{");
			for (key, item) in entries.iter().take(options.max_fields_per_struct) {
				print!("{pad}  {} => ", inline_label(key, options));
				print_field(item, indent, depth, options);
			}
			if entries.len() > options.max_fields_per_struct {
				println!("{pad}  ... {} more entries", entries.len() - options.max_fields_per_struct);
			}
			println!("{pad}}}");
		}
		Value::Struct(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}{} {{ ... }}", item.type_name);
				return;
			}
			println!("{pad}{} {{", item.type_name);
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				print!("{pad}  {} = ", field.name);
				print_field(&field.value, indent, depth, options);
			}
			if item.fields.len() > options.max_fields_per_struct {
				println!("{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			println!("{pad}}}");
		}
	}
}

fn print_field(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	if matches!(value, Value::Struct(_) | Value::Array(_) | Value::Map(_)) {
		println!();
		print_value(value, indent + 4, depth + 1, options);
	} else {
		print_value(value, 0, depth + 1, options);
	}
}

fn inline_label(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		other => match other.as_u128() {
			Some(n) => n.to_string(),
			None => other.kind_name().to_owned(),
		},
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

/// Print any serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
