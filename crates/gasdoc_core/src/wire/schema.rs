use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::wire::{Cursor, Nested, Result, Value, WireError};

/// Primitive wire types understood without a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
	/// One byte.
	U8,
	/// Four bytes, little-endian.
	U32,
	/// Eight bytes, little-endian.
	U64,
	/// Sixteen bytes, little-endian.
	U128,
	/// One byte, 0 or 1.
	Bool,
	/// `u32` length prefix then UTF-8 bytes.
	String,
}

impl Primitive {
	/// Resolve a primitive from its schema spelling.
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"u8" => Self::U8,
			"u32" => Self::U32,
			"u64" => Self::U64,
			"u128" => Self::U128,
			"bool" => Self::Bool,
			"string" => Self::String,
			_ => return None,
		})
	}

	/// Schema spelling of the primitive.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::U8 => "u8",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::Bool => "bool",
			Self::String => "string",
		}
	}
}

/// What to decode next.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTypeRef")]
pub enum TypeRef {
	/// Built-in primitive.
	Primitive(Primitive),
	/// Exactly `N` raw bytes, no length prefix.
	FixedArray(usize),
	/// `u32` element count then that many elements.
	DynamicArray(Box<TypeRef>),
	/// Registry entry name.
	Named(String),
}

impl TypeRef {
	/// Build a reference from a name, preferring primitives.
	pub fn name(name: &str) -> Self {
		match Primitive::from_name(name) {
			Some(primitive) => Self::Primitive(primitive),
			None => Self::Named(name.to_owned()),
		}
	}

	/// Dynamic array of `elem`.
	pub fn vec(elem: TypeRef) -> Self {
		Self::DynamicArray(Box::new(elem))
	}

	/// Parse the JSON spelling (`"u8"`, `"Name"`, `[32]`, `["u64"]`); a bare word is taken as a name.
	pub fn parse(input: &str) -> Result<Self> {
		let trimmed = input.trim();
		if trimmed.starts_with('[') || trimmed.starts_with('"') {
			return Ok(serde_json::from_str(trimmed)?);
		}
		if trimmed.is_empty() {
			return Err(WireError::InvalidSchema {
				reason: "empty type reference".to_owned(),
			});
		}
		Ok(Self::name(trimmed))
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primitive(primitive) => f.write_str(primitive.as_str()),
			Self::FixedArray(len) => write!(f, "[{len}]"),
			Self::DynamicArray(elem) => write!(f, "[{elem}]"),
			Self::Named(name) => f.write_str(name),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTypeRef {
	Name(String),
	Fixed([usize; 1]),
	Dynamic([Box<RawTypeRef>; 1]),
}

impl From<RawTypeRef> for TypeRef {
	fn from(raw: RawTypeRef) -> Self {
		match raw {
			RawTypeRef::Name(name) => TypeRef::name(&name),
			RawTypeRef::Fixed([len]) => TypeRef::FixedArray(len),
			RawTypeRef::Dynamic([elem]) => TypeRef::vec(TypeRef::from(*elem)),
		}
	}
}

/// Custom decode routine for layouts a declarative entry cannot express.
///
/// The [`Nested`] handle exposes the registry and decodes sub-values under the
/// enclosing call's depth limit and error path.
pub type DecodeFn = Arc<dyn Fn(&mut Cursor<'_>, &mut Nested<'_, '_>) -> Result<Value> + Send + Sync>;

/// One registry entry.
#[derive(Clone)]
pub enum SchemaEntry {
	/// Fields decoded in declared order.
	Struct(Vec<(String, TypeRef)>),
	/// One-byte presence tag then the inner value.
	Option(TypeRef),
	/// Caller-supplied routine.
	Function(DecodeFn),
}

impl SchemaEntry {
	/// Lowercase entry kind label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Struct(_) => "struct",
			Self::Option(_) => "option",
			Self::Function(_) => "function",
		}
	}
}

impl fmt::Debug for SchemaEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Struct(fields) => f.debug_tuple("Struct").field(fields).finish(),
			Self::Option(inner) => f.debug_tuple("Option").field(inner).finish(),
			Self::Function(_) => f.write_str("Function(..)"),
		}
	}
}

/// Immutable name to entry mapping shared by decode calls.
#[derive(Debug, Clone, Default)]
pub struct Registry {
	entries: BTreeMap<String, SchemaEntry>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a struct; field names must be unique.
	pub fn insert_struct<N: Into<String>>(&mut self, name: impl Into<String>, fields: impl IntoIterator<Item = (N, TypeRef)>) -> Result<()> {
		let name = name.into();
		let fields: Vec<(String, TypeRef)> = fields.into_iter().map(|(field, ty)| (field.into(), ty)).collect();
		let mut seen = HashSet::with_capacity(fields.len());
		for (field, _) in &fields {
			if !seen.insert(field.as_str()) {
				return Err(WireError::DuplicateField {
					type_name: name,
					field: field.clone(),
				});
			}
		}
		self.entries.insert(name, SchemaEntry::Struct(fields));
		Ok(())
	}

	/// Register an option wrapper around `inner`.
	pub fn insert_option(&mut self, name: impl Into<String>, inner: TypeRef) {
		self.entries.insert(name.into(), SchemaEntry::Option(inner));
	}

	/// Register a custom decode routine.
	pub fn insert_function<F>(&mut self, name: impl Into<String>, routine: F)
	where
		F: Fn(&mut Cursor<'_>, &mut Nested<'_, '_>) -> Result<Value> + Send + Sync + 'static,
	{
		self.entries.insert(name.into(), SchemaEntry::Function(Arc::new(routine)));
	}

	/// Look up an entry.
	pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
		self.entries.get(name)
	}

	/// Iterate entries sorted by name.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
		self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the registry has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Parse a registry from schema JSON.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
		let mut registry = Self::new();
		for (name, entry) in raw {
			match entry {
				RawEntry::Struct { fields } => registry.insert_struct(name, fields)?,
				RawEntry::Option { inner } => registry.insert_option(name, inner),
				RawEntry::Function(RawRoutine::Map { key, value }) => registry.insert_function(name, map_routine(key, value)),
			}
		}
		tracing::debug!(entries = registry.len(), "schema loaded");
		Ok(registry)
	}
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawEntry {
	Struct {
		fields: Vec<(String, TypeRef)>,
	},
	Option {
		#[serde(rename = "type")]
		inner: TypeRef,
	},
	Function(RawRoutine),
}

#[derive(Deserialize)]
#[serde(tag = "routine", rename_all = "lowercase")]
enum RawRoutine {
	Map { key: TypeRef, value: TypeRef },
}

/// Routine decoding a `u32` count followed by that many key/value pairs.
///
/// The count is held to `max_array_elems` and a failing entry reports its
/// index on the error path.
pub fn map_routine(key: TypeRef, value: TypeRef) -> impl Fn(&mut Cursor<'_>, &mut Nested<'_, '_>) -> Result<Value> + Send + Sync + 'static {
	move |cursor: &mut Cursor<'_>, nested: &mut Nested<'_, '_>| {
		let count = nested.read_len(cursor)?;
		let mut entries = Vec::with_capacity(count.min(cursor.remaining()));
		for index in 0..count {
			let entry = nested.at_index(index, |nested| Ok((nested.decode(&key, cursor)?, nested.decode(&value, cursor)?)))?;
			entries.push(entry);
		}
		Ok(Value::Map(entries))
	}
}

#[cfg(test)]
mod tests;
