use std::collections::HashSet;

use crate::wire::value::{FieldValue, StructValue};
use crate::wire::{Cursor, FieldPath, PathStep, Primitive, Registry, Result, SchemaEntry, TypeRef, Value, WireError};

/// Runtime limits and behavior switches for schema decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of structs, options, and arrays.
	pub max_depth: u32,
	/// Maximum element count accepted from a dynamic array prefix.
	pub max_array_elems: usize,
	/// Error when bytes remain after the top-level value.
	pub strict_layout: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_array_elems: 1 << 20,
			strict_layout: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that requires the buffer to hold exactly one value.
	pub fn strict() -> Self {
		Self {
			strict_layout: true,
			..Self::default()
		}
	}
}

/// Decode one value of type `ty` from `bytes`.
///
/// The call is all-or-nothing: any failure aborts the whole decode and is
/// returned as [`WireError::Decode`] carrying the field path and offset.
pub fn decode(registry: &Registry, ty: &TypeRef, bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
	tracing::debug!(ty = %ty, len = bytes.len(), "decode start");

	let mut cursor = Cursor::new(bytes);
	let mut decoder = Decoder::new(registry, opt);
	let result = match ensure_terminates(registry, ty) {
		Ok(()) => decoder.value(ty, &mut cursor, 0),
		Err(err) => Err(err),
	};

	let value = match result {
		Ok(value) => value,
		Err(source) => {
			let path = FieldPath { steps: decoder.path }.to_string();
			tracing::debug!(%path, at = cursor.pos(), error = %source, "decode failed");
			return Err(WireError::Decode {
				path,
				at: cursor.pos(),
				source: Box::new(source),
			});
		}
	};

	if !cursor.is_empty() && opt.strict_layout {
		return Err(WireError::Decode {
			path: FieldPath::default().to_string(),
			at: cursor.pos(),
			source: Box::new(WireError::TrailingBytes {
				at: cursor.pos(),
				leftover: cursor.remaining(),
			}),
		});
	}

	tracing::debug!(consumed = cursor.pos(), leftover = cursor.remaining(), "decode done");
	Ok(value)
}

/// Decode one value from an existing cursor.
///
/// Standalone counterpart of [`decode`] for callers that manage their own
/// cursor. Errors are returned unwrapped, without path or offset. Function
/// routines running inside a decode use [`Nested`] instead so the enclosing
/// call's depth and limits keep applying.
pub fn decode_from(registry: &Registry, ty: &TypeRef, cursor: &mut Cursor<'_>, opt: &DecodeOptions) -> Result<Value> {
	ensure_terminates(registry, ty)?;
	Decoder::new(registry, opt).value(ty, cursor, 0)
}

/// Handle given to function routines for decoding sub-values.
///
/// Sub-values decoded through the handle count against the enclosing
/// decode's `max_depth` and land on its error path.
pub struct Nested<'d, 'r> {
	decoder: &'d mut Decoder<'r>,
	depth: u32,
}

impl Nested<'_, '_> {
	/// Registry the enclosing decode resolves names against.
	pub fn registry(&self) -> &Registry {
		self.decoder.registry
	}

	/// Limits of the enclosing decode.
	pub fn options(&self) -> &DecodeOptions {
		self.decoder.opt
	}

	/// Decode one value one level below the routine.
	pub fn decode(&mut self, ty: &TypeRef, cursor: &mut Cursor<'_>) -> Result<Value> {
		self.decoder.value(ty, cursor, self.depth + 1)
	}

	/// Read a `u32` element count, checked against `max_array_elems`.
	pub fn read_len(&self, cursor: &mut Cursor<'_>) -> Result<usize> {
		self.decoder.read_len(cursor)
	}

	/// Run `f` with `[index]` appended to the error path.
	pub fn at_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.decoder.path.push(PathStep::Index(index));
		let out = f(self)?;
		self.decoder.path.pop();
		Ok(out)
	}
}

struct Decoder<'r> {
	registry: &'r Registry,
	opt: &'r DecodeOptions,
	path: Vec<PathStep>,
}

impl<'r> Decoder<'r> {
	fn new(registry: &'r Registry, opt: &'r DecodeOptions) -> Self {
		Self {
			registry,
			opt,
			path: Vec::new(),
		}
	}

	// Path steps are popped only on success so a failure leaves the stack at the failing field.
	fn value(&mut self, ty: &TypeRef, cursor: &mut Cursor<'_>, depth: u32) -> Result<Value> {
		match ty {
			TypeRef::Primitive(primitive) => primitive_value(*primitive, cursor),
			TypeRef::FixedArray(len) => Ok(Value::Bytes(cursor.read_bytes(*len)?.to_vec())),
			TypeRef::DynamicArray(elem) => {
				self.enter(depth)?;
				let count = self.read_len(cursor)?;
				let mut items = Vec::with_capacity(count.min(cursor.remaining()));
				for index in 0..count {
					self.path.push(PathStep::Index(index));
					items.push(self.value(elem, cursor, depth + 1)?);
					self.path.pop();
				}
				Ok(Value::Array(items))
			}
			TypeRef::Named(name) => self.named(name, cursor, depth),
		}
	}

	fn named(&mut self, name: &str, cursor: &mut Cursor<'_>, depth: u32) -> Result<Value> {
		self.enter(depth)?;
		let entry = self.registry.get(name).ok_or_else(|| WireError::UnknownSchemaType { name: name.to_owned() })?;
		tracing::trace!(name, kind = entry.kind(), at = cursor.pos(), "decode named");

		match entry {
			SchemaEntry::Option(inner) => {
				let at = cursor.pos();
				match cursor.read_u8()? {
					0 => Ok(Value::Null),
					1 => self.value(inner, cursor, depth + 1),
					tag => Err(WireError::InvalidOptionTag { at, tag }),
				}
			}
			SchemaEntry::Struct(fields) => {
				let mut out = Vec::with_capacity(fields.len());
				for (field, ty) in fields {
					self.path.push(PathStep::Field(field.clone()));
					let value = self.value(ty, cursor, depth + 1)?;
					self.path.pop();
					out.push(FieldValue {
						name: field.as_str().into(),
						value,
					});
				}
				Ok(Value::Struct(StructValue {
					type_name: name.into(),
					fields: out,
				}))
			}
			SchemaEntry::Function(routine) => routine(cursor, &mut Nested { decoder: self, depth }),
		}
	}

	fn read_len(&self, cursor: &mut Cursor<'_>) -> Result<usize> {
		let count = cursor.read_u32_le()? as usize;
		if count > self.opt.max_array_elems {
			return Err(WireError::ArrayTooLarge {
				count,
				max: self.opt.max_array_elems,
			});
		}
		Ok(count)
	}

	fn enter(&self, depth: u32) -> Result<()> {
		if depth >= self.opt.max_depth {
			return Err(WireError::SchemaTooDeep { max_depth: self.opt.max_depth });
		}
		Ok(())
	}
}

fn primitive_value(primitive: Primitive, cursor: &mut Cursor<'_>) -> Result<Value> {
	Ok(match primitive {
		Primitive::U8 => Value::U8(cursor.read_u8()?),
		Primitive::U32 => Value::U32(cursor.read_u32_le()?),
		Primitive::U64 => Value::U64(cursor.read_u64_le()?),
		Primitive::U128 => Value::U128(cursor.read_u128_le()?),
		Primitive::Bool => {
			let at = cursor.pos();
			match cursor.read_u8()? {
				0 => Value::Bool(false),
				1 => Value::Bool(true),
				byte => return Err(WireError::InvalidBool { at, byte }),
			}
		}
		Primitive::String => Value::String(cursor.read_string()?.into()),
	})
}

/// Reject schemas where a struct contains itself through plain struct fields.
///
/// Options and dynamic arrays can end the recursion on the wire (tag 0, length
/// 0) and function routines are opaque, so only struct-to-struct edges count.
/// Recursion through a routine is bounded by the runtime depth guard.
fn ensure_terminates(registry: &Registry, ty: &TypeRef) -> Result<()> {
	let mut done = HashSet::new();
	let mut stack = Vec::new();
	walk_struct_edges(registry, ty, &mut stack, &mut done)
}

fn walk_struct_edges<'r>(registry: &'r Registry, ty: &'r TypeRef, stack: &mut Vec<&'r str>, done: &mut HashSet<&'r str>) -> Result<()> {
	let TypeRef::Named(name) = ty else {
		return Ok(());
	};
	let Some(SchemaEntry::Struct(fields)) = registry.get(name) else {
		return Ok(());
	};
	let name = name.as_str();
	if done.contains(name) {
		return Ok(());
	}
	if stack.contains(&name) {
		return Err(WireError::SchemaCycle { name: name.to_owned() });
	}

	stack.push(name);
	for (_, field_ty) in fields {
		walk_struct_edges(registry, field_ty, stack, done)?;
	}
	stack.pop();
	done.insert(name);
	Ok(())
}
