#![allow(missing_docs)]

use gasdoc::wire::{DecodeOptions, Encoding, ErrorKind, GsnState, Registry, TypeRef, Value, decode, read_buffer};
use gasdoc_testkit::{fixture_path, hex_fixture, json_fixture};

const CONSUMER: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
const SECOND_CONSUMER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
const EXECUTOR: &str = "CuieVDEDtLo7FypA9SbLM9saXFdb1dsshEkyErMqkRQq";

#[test]
fn builtin_state_schema_reads_fixture() {
	let state = GsnState::decode(&hex_fixture("gsn_state.hex")).expect("state decodes");
	assert!(state.is_initialized);
	assert_eq!(state.consumer.len(), 2);
	assert_eq!(state.consumer[CONSUMER], 10_000_000);
	assert_eq!(state.consumer[SECOND_CONSUMER], 250_000);
	assert_eq!(state.executor[EXECUTOR], 5_000);
}

#[test]
fn json_schema_matches_builtin_schema() {
	let registry = fixture_registry();
	let bytes = hex_fixture("gsn_state.hex");

	let value = decode(&registry, &TypeRef::name("GsnInfo"), &bytes, &DecodeOptions::default()).expect("decodes");
	assert_eq!(GsnState::from_value(&value).expect("typed view"), GsnState::decode(&bytes).expect("builtin"));
}

#[test]
fn strict_layout_flags_account_padding() {
	let registry = fixture_registry();
	let err = decode(&registry, &TypeRef::name("GsnInfo"), &hex_fixture("gsn_state.hex"), &DecodeOptions::strict()).expect_err("padding remains");
	assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
}

#[test]
fn raw_and_hex_fixtures_agree() {
	let (raw_encoding, raw) = read_buffer(fixture_path("gsn_state.bin"), false).expect("raw reads");
	let (hex_encoding, hex) = read_buffer(fixture_path("gsn_state.hex"), true).expect("hex reads");
	assert_eq!(raw_encoding, Encoding::Raw);
	assert_eq!(hex_encoding, Encoding::Hex);
	assert_eq!(raw, hex);
}

#[test]
fn option_of_struct_from_fixture_schema() {
	let registry = fixture_registry();
	let mut bytes = vec![1, 1];
	bytes.extend_from_slice(&42_u64.to_le_bytes());

	let value = decode(&registry, &TypeRef::name("MaybeTopup"), &bytes, &DecodeOptions::strict()).expect("decodes");
	assert_eq!(value.field("amount"), Some(&Value::U64(42)));
}

fn fixture_registry() -> Registry {
	Registry::from_json_str(&json_fixture("gsn_schema.json").to_string()).expect("schema loads")
}
