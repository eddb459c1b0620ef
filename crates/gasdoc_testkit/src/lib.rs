//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a hex-text fixture into bytes.
pub fn hex_fixture(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	let compact: String = text.chars().filter(|ch| !ch.is_whitespace()).collect();
	hex::decode(compact).unwrap_or_else(|err| panic!("hex fixture {}: {err}", path.display()))
}

/// Read a JSON fixture.
pub fn json_fixture(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	serde_json::from_str(&text).unwrap_or_else(|err| panic!("json fixture {}: {err}", path.display()))
}
