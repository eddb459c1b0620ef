//! Public library API for decoding gas-station account data and instruction payloads.

/// Cursor, schema registry, schema-driven decoder, and instruction codec.
pub mod wire;
