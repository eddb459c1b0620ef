mod bytes;
mod decode;
mod error;
mod gsn;
mod input;
mod instruction;
mod path;
mod schema;
mod value;

/// Forward-only bounded byte cursor.
pub use bytes::Cursor;
/// Schema-driven decoding entry points and options.
pub use decode::{DecodeOptions, Nested, decode, decode_from};
/// Error and result aliases.
pub use error::{ErrorKind, Result, WireError};
/// Gas-station account schema and typed state view.
pub use gsn::{BALANCE_MAP_TYPE, GsnState, STATE_TYPE, state_registry};
/// Buffer file loading helpers.
pub use input::{Encoding, ZSTD_MAGIC, decode_bytes, parse_hex, read_buffer};
/// Outbound instruction payload codec.
pub use instruction::{FieldSpec, Instruction, Opcode, encode as encode_instruction, instruction_registry};
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Schema registry and type references.
pub use schema::{DecodeFn, Primitive, Registry, SchemaEntry, TypeRef, map_routine};
/// Decoded runtime value types.
pub use value::{FieldValue, StructValue, Value};
