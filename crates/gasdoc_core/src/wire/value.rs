use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::wire::{FieldPath, PathStep, Result, WireError};

/// Decoded runtime value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Absent option.
	Null,
	/// Boolean byte.
	Bool(bool),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// Unsigned 128-bit integer.
	U128(u128),
	/// Length-prefixed UTF-8 text.
	String(Box<str>),
	/// Opaque fixed-length byte array.
	Bytes(Vec<u8>),
	/// Ordered list from a dynamic array.
	Array(Vec<Value>),
	/// Ordered key/value pairs from a map routine.
	Map(Vec<(Value, Value)>),
	/// Decoded struct with fields in wire order.
	Struct(StructValue),
}

/// Decoded struct instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
	/// Registry name the struct was decoded from.
	pub type_name: Box<str>,
	/// Fields in declared order.
	pub fields: Vec<FieldValue>,
}

/// One named field of a [`StructValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Decoded field value.
	pub value: Value,
}

impl StructValue {
	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

impl Value {
	/// Short label for the value variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::U8(_) => "u8",
			Self::U32(_) => "u32",
			Self::U64(_) => "u64",
			Self::U128(_) => "u128",
			Self::String(_) => "string",
			Self::Bytes(_) => "bytes",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
			Self::Struct(_) => "struct",
		}
	}

	/// Look up a struct field by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Self::Struct(item) => item.field(name),
			Self::Map(entries) => entries.iter().find(|(key, _)| key.as_str() == Some(name)).map(|(_, value)| value),
			_ => None,
		}
	}

	/// Borrow string contents.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text),
			_ => None,
		}
	}

	/// Widen any unsigned integer variant to `u128`.
	pub fn as_u128(&self) -> Option<u128> {
		match self {
			Self::U8(v) => Some(u128::from(*v)),
			Self::U32(v) => Some(u128::from(*v)),
			Self::U64(v) => Some(u128::from(*v)),
			Self::U128(v) => Some(*v),
			_ => None,
		}
	}

	/// Follow a parsed field path into the tree.
	pub fn select(&self, path: &FieldPath) -> Result<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Field(name) => current.field(name).ok_or_else(|| WireError::MissingField { field: name.clone() })?,
				PathStep::Index(index) => match current {
					Self::Array(items) => items.get(*index).ok_or_else(|| WireError::MissingField { field: format!("[{index}]") })?,
					other => {
						return Err(WireError::TypeMismatch {
							expected: "array",
							got: other.kind_name().to_owned(),
						});
					}
				},
			};
		}
		Ok(current)
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(v) => serializer.serialize_bool(*v),
			Self::U8(v) => serializer.serialize_u8(*v),
			Self::U32(v) => serializer.serialize_u32(*v),
			Self::U64(v) => serializer.serialize_u64(*v),
			Self::U128(v) => serializer.serialize_str(&v.to_string()),
			Self::String(v) => serializer.serialize_str(v),
			Self::Bytes(v) => serializer.serialize_str(&hex::encode(v)),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(entries) if entries.iter().all(|(key, _)| key.as_str().is_some()) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Self::Map(entries) => {
				let mut seq = serializer.serialize_seq(Some(entries.len()))?;
				for pair in entries {
					seq.serialize_element(&[&pair.0, &pair.1])?;
				}
				seq.end()
			}
			Self::Struct(item) => item.serialize(serializer),
		}
	}
}

impl Serialize for StructValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.fields.len()))?;
		for field in &self.fields {
			map.serialize_entry(field.name.as_ref(), &field.value)?;
		}
		map.end()
	}
}
