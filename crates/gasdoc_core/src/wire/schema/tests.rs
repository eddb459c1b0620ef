use crate::wire::{DecodeOptions, ErrorKind, Primitive, Registry, SchemaEntry, TypeRef, Value, WireError, decode};

const GSN_SCHEMA: &str = r#"{
	"GsnInfo": { "kind": "struct", "fields": [["is_initialized", "bool"], ["consumer", "BalanceMap"], ["memo", "Memo"]] },
	"Memo": { "kind": "option", "type": "string" },
	"BalanceMap": { "kind": "function", "routine": "map", "key": "string", "value": "u64" }
}"#;

#[test]
fn type_refs_parse_from_json_spellings() {
	assert_eq!(TypeRef::parse("u64").expect("bare"), TypeRef::Primitive(Primitive::U64));
	assert_eq!(TypeRef::parse("\"GsnInfo\"").expect("quoted"), TypeRef::Named("GsnInfo".into()));
	assert_eq!(TypeRef::parse("[32]").expect("fixed"), TypeRef::FixedArray(32));
	assert_eq!(TypeRef::parse("[\"u8\"]").expect("dynamic"), TypeRef::vec(TypeRef::Primitive(Primitive::U8)));
	assert_eq!(TypeRef::parse("[[4]]").expect("nested"), TypeRef::vec(TypeRef::FixedArray(4)));
	assert!(TypeRef::parse("   ").is_err());
}

#[test]
fn type_ref_display_matches_json_spelling() {
	let ty = TypeRef::vec(TypeRef::vec(TypeRef::FixedArray(2)));
	assert_eq!(ty.to_string(), "[[[2]]]");
	assert_eq!(TypeRef::name("Pubkey").to_string(), "Pubkey");
}

#[test]
fn loads_all_entry_kinds() {
	let registry = Registry::from_json_str(GSN_SCHEMA).expect("schema loads");
	assert_eq!(registry.len(), 3);
	assert!(matches!(registry.get("GsnInfo"), Some(SchemaEntry::Struct(fields)) if fields.len() == 3));
	assert!(matches!(registry.get("Memo"), Some(SchemaEntry::Option(TypeRef::Primitive(Primitive::String)))));
	assert_eq!(registry.get("BalanceMap").map(SchemaEntry::kind), Some("function"));

	let kinds: Vec<(&str, &str)> = registry.iter().map(|(name, entry)| (name, entry.kind())).collect();
	assert_eq!(kinds, [("BalanceMap", "function"), ("GsnInfo", "struct"), ("Memo", "option")]);
}

#[test]
fn loaded_schema_decodes_account_data() {
	let registry = Registry::from_json_str(GSN_SCHEMA).expect("schema loads");
	let mut bytes = vec![1, 1, 0, 0, 0, 3, 0, 0, 0, b'e', b'v', b'e'];
	bytes.extend_from_slice(&77_u64.to_le_bytes());
	bytes.push(0);

	let value = decode(&registry, &TypeRef::name("GsnInfo"), &bytes, &DecodeOptions::strict()).expect("decodes");
	assert_eq!(value.field("is_initialized"), Some(&Value::Bool(true)));
	assert_eq!(value.field("consumer").and_then(|map| map.field("eve")), Some(&Value::U64(77)));
	assert_eq!(value.field("memo"), Some(&Value::Null));
}

#[test]
fn duplicate_field_names_are_rejected() {
	let json = r#"{ "Pair": { "kind": "struct", "fields": [["a", "u8"], ["a", "u32"]] } }"#;
	let err = Registry::from_json_str(json).expect_err("duplicate");
	assert!(matches!(err, WireError::DuplicateField { ref type_name, ref field } if type_name == "Pair" && field == "a"));
	assert_eq!(err.kind(), ErrorKind::InvalidSchema);
}

#[test]
fn unknown_kind_and_routine_are_rejected() {
	for json in [
		r#"{ "X": { "kind": "enum", "variants": [] } }"#,
		r#"{ "X": { "kind": "function", "routine": "pubkey" } }"#,
		r#"{ "X": { "kind": "option" } }"#,
	] {
		let err = Registry::from_json_str(json).expect_err("rejected");
		assert_eq!(err.kind(), ErrorKind::InvalidSchema, "{json}");
	}
}

#[test]
fn registry_is_shareable_across_threads() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<Registry>();
}
