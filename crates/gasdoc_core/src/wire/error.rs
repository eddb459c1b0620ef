use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Coarse failure category shared by every [`WireError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A read needed more bytes than the buffer holds.
	OutOfBounds,
	/// Bytes are present but break a format rule.
	InvalidEncoding,
	/// A named reference has no registry entry.
	UnknownSchemaType,
	/// Nesting ceiling hit or a schema that can never terminate.
	SchemaTooDeep,
	/// A value does not fit its wire width.
	FieldTooLarge,
	/// A configured resource limit was exceeded.
	LimitExceeded,
	/// Schema data or a typed view is malformed.
	InvalidSchema,
	/// Filesystem or stream failure.
	Io,
}

/// Errors produced while reading, decoding, and encoding wire data.
#[derive(Debug, Error)]
pub enum WireError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("out of bounds at offset {at}, need {need} bytes, remaining {rem}")]
	OutOfBounds {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// String payload is not valid UTF-8.
	#[error("invalid utf-8 in {len}-byte string at offset {at}")]
	InvalidUtf8 {
		/// Offset of the first string byte.
		at: usize,
		/// Declared string length.
		len: usize,
	},
	/// Boolean byte was neither 0 nor 1.
	#[error("invalid bool byte 0x{byte:02x} at offset {at}")]
	InvalidBool {
		/// Offset of the offending byte.
		at: usize,
		/// Offending byte value.
		byte: u8,
	},
	/// Option discriminant was neither 0 nor 1.
	#[error("invalid option tag {tag} at offset {at}")]
	InvalidOptionTag {
		/// Offset of the discriminant byte.
		at: usize,
		/// Offending discriminant.
		tag: u8,
	},
	/// Strict layout mode found bytes after the top-level value.
	#[error("trailing bytes after value: offset={at}, leftover={leftover}")]
	TrailingBytes {
		/// Offset where decoding stopped.
		at: usize,
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Named type reference is missing from the registry.
	#[error("schema type {name} is missing in schema")]
	UnknownSchemaType {
		/// Requested type name.
		name: String,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("schema nesting too deep (max={max_depth})")]
	SchemaTooDeep {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Struct refers back to itself with no option or array in between.
	#[error("schema type {name} contains itself and can never terminate")]
	SchemaCycle {
		/// First struct found on the cycle.
		name: String,
	},
	/// Dynamic array length prefix exceeded configured limit.
	#[error("array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Declared element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Decompressed input exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Numeric value does not fit its declared wire width.
	#[error("field {field} value {value} does not fit in {width} bytes")]
	FieldTooLarge {
		/// Field name from the instruction layout.
		field: &'static str,
		/// Offending value.
		value: u128,
		/// Declared width in bytes.
		width: usize,
	},
	/// Instruction discriminant is not part of the protocol.
	#[error("unknown instruction discriminant {discriminant}")]
	UnknownInstruction {
		/// Offending discriminant.
		discriminant: u8,
	},
	/// Instruction encode call supplied the wrong number of fields.
	#[error("instruction {discriminant} takes {expected} fields, got {got}")]
	FieldCountMismatch {
		/// Instruction discriminant.
		discriminant: u8,
		/// Fields declared by the layout.
		expected: usize,
		/// Fields supplied.
		got: usize,
	},
	/// Struct declares the same field name twice.
	#[error("struct {type_name} declares field {field} more than once")]
	DuplicateField {
		/// Struct entry name.
		type_name: String,
		/// Repeated field name.
		field: String,
	},
	/// Schema document is malformed.
	#[error("invalid schema: {reason}")]
	InvalidSchema {
		/// Human-readable reason.
		reason: String,
	},
	/// Schema JSON failed to parse.
	#[error("schema json: {0}")]
	Json(#[from] serde_json::Error),
	/// Hex text input failed to parse.
	#[error("hex: {0}")]
	Hex(#[from] hex::FromHexError),
	/// Decoded value had a different shape than a typed view expects.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual logical value kind.
		got: String,
	},
	/// Requested field is missing on a decoded struct.
	#[error("missing field {field}")]
	MissingField {
		/// Missing field name.
		field: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Top-level decode failure annotated with where it happened.
	#[error("decode failed at {path} (offset {at}): {source}")]
	Decode {
		/// Field path at the failure point, `$` for the root value.
		path: String,
		/// Cursor offset at the failure point.
		at: usize,
		/// Underlying failure.
		source: Box<WireError>,
	},
}

impl WireError {
	/// Return the innermost error, looking through [`WireError::Decode`].
	pub fn root(&self) -> &WireError {
		match self {
			Self::Decode { source, .. } => source.root(),
			other => other,
		}
	}

	/// Return the failure category.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Decode { source, .. } => source.kind(),
			Self::Io(_) => ErrorKind::Io,
			Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
			Self::InvalidUtf8 { .. } | Self::InvalidBool { .. } | Self::InvalidOptionTag { .. } | Self::TrailingBytes { .. } | Self::UnknownInstruction { .. } | Self::Hex(_) => {
				ErrorKind::InvalidEncoding
			}
			Self::UnknownSchemaType { .. } => ErrorKind::UnknownSchemaType,
			Self::SchemaTooDeep { .. } | Self::SchemaCycle { .. } => ErrorKind::SchemaTooDeep,
			Self::ArrayTooLarge { .. } | Self::DecompressedTooLarge { .. } => ErrorKind::LimitExceeded,
			Self::FieldTooLarge { .. } => ErrorKind::FieldTooLarge,
			Self::FieldCountMismatch { .. }
			| Self::DuplicateField { .. }
			| Self::InvalidSchema { .. }
			| Self::Json(_)
			| Self::TypeMismatch { .. }
			| Self::MissingField { .. }
			| Self::InvalidFieldPath { .. } => ErrorKind::InvalidSchema,
		}
	}

	/// Field path recorded by the top-level decode call, if any.
	pub fn path(&self) -> Option<&str> {
		match self {
			Self::Decode { path, .. } => Some(path),
			_ => None,
		}
	}
}
