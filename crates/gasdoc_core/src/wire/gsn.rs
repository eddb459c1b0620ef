use std::collections::BTreeMap;

use crate::wire::schema::map_routine;
use crate::wire::{DecodeOptions, Primitive, Registry, Result, TypeRef, Value, WireError, decode};

/// Registry name of the gas-station account state struct.
pub const STATE_TYPE: &str = "GsnInfo";
/// Registry name of the `string -> u64` balance map.
pub const BALANCE_MAP_TYPE: &str = "BalanceMap";

/// Registry describing the gas-station account layout.
pub fn state_registry() -> Result<Registry> {
	let mut registry = Registry::new();
	registry.insert_function(
		BALANCE_MAP_TYPE,
		map_routine(TypeRef::Primitive(Primitive::String), TypeRef::Primitive(Primitive::U64)),
	);
	registry.insert_struct(
		STATE_TYPE,
		[
			("is_initialized", TypeRef::Primitive(Primitive::Bool)),
			("consumer", TypeRef::Named(BALANCE_MAP_TYPE.to_owned())),
			("executor", TypeRef::Named(BALANCE_MAP_TYPE.to_owned())),
		],
	)?;
	Ok(registry)
}

/// Typed view of the gas-station account state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GsnState {
	/// Set once the initialize instruction ran.
	pub is_initialized: bool,
	/// Consumer address to deposited lamports.
	pub consumer: BTreeMap<String, u64>,
	/// Executor address to earned lamports.
	pub executor: BTreeMap<String, u64>,
}

impl GsnState {
	/// Decode account data; zero padding after the state is ignored.
	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let registry = state_registry()?;
		let value = decode(&registry, &TypeRef::Named(STATE_TYPE.to_owned()), bytes, &DecodeOptions::default())?;
		Self::from_value(&value)
	}

	/// Extract the typed view from a decoded `GsnInfo` value.
	pub fn from_value(value: &Value) -> Result<Self> {
		let is_initialized = match required(value, "is_initialized")? {
			Value::Bool(flag) => *flag,
			other => return Err(mismatch("bool", other)),
		};
		Ok(Self {
			is_initialized,
			consumer: balances(required(value, "consumer")?)?,
			executor: balances(required(value, "executor")?)?,
		})
	}
}

fn required<'v>(value: &'v Value, field: &str) -> Result<&'v Value> {
	value.field(field).ok_or_else(|| WireError::MissingField { field: field.to_owned() })
}

fn balances(value: &Value) -> Result<BTreeMap<String, u64>> {
	let Value::Map(entries) = value else {
		return Err(mismatch("map", value));
	};

	let mut out = BTreeMap::new();
	for (key, amount) in entries {
		let address = key.as_str().ok_or_else(|| mismatch("string", key))?;
		let Value::U64(amount) = amount else {
			return Err(mismatch("u64", amount));
		};
		out.insert(address.to_owned(), *amount);
	}
	Ok(out)
}

fn mismatch(expected: &'static str, got: &Value) -> WireError {
	WireError::TypeMismatch {
		expected,
		got: got.kind_name().to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::{GsnState, STATE_TYPE, state_registry};
	use crate::wire::{DecodeOptions, ErrorKind, TypeRef, Value, decode};

	fn borsh_string(out: &mut Vec<u8>, text: &str) {
		out.extend_from_slice(&(text.len() as u32).to_le_bytes());
		out.extend_from_slice(text.as_bytes());
	}

	fn account_bytes() -> Vec<u8> {
		let mut out = vec![1];
		out.extend_from_slice(&2_u32.to_le_bytes());
		borsh_string(&mut out, "alice");
		out.extend_from_slice(&10_000_000_u64.to_le_bytes());
		borsh_string(&mut out, "bob");
		out.extend_from_slice(&5_u64.to_le_bytes());
		out.extend_from_slice(&0_u32.to_le_bytes());
		out
	}

	#[test]
	fn decodes_state_with_trailing_padding() {
		let mut bytes = account_bytes();
		bytes.resize(1024, 0);

		let state = GsnState::decode(&bytes).expect("state decodes");
		assert!(state.is_initialized);
		assert_eq!(state.consumer.get("alice"), Some(&10_000_000));
		assert_eq!(state.consumer.get("bob"), Some(&5));
		assert!(state.executor.is_empty());
	}

	#[test]
	fn fresh_zeroed_account_is_uninitialized() {
		let state = GsnState::decode(&[0_u8; 1024]).expect("zeroed account decodes");
		assert_eq!(state, GsnState::default());
	}

	#[test]
	fn map_preserves_wire_order() {
		let registry = state_registry().expect("registry builds");
		let value = decode(&registry, &TypeRef::Named(STATE_TYPE.into()), &account_bytes(), &DecodeOptions::strict()).expect("decodes");
		let Some(Value::Map(entries)) = value.field("consumer") else {
			panic!("consumer should be a map");
		};
		let keys: Vec<&str> = entries.iter().filter_map(|(key, _)| key.as_str()).collect();
		assert_eq!(keys, ["alice", "bob"]);
	}

	#[test]
	fn truncated_map_entry_fails() {
		let bytes = account_bytes();
		let err = GsnState::decode(&bytes[..12]).expect_err("truncated");
		assert_eq!(err.kind(), ErrorKind::OutOfBounds);
		assert_eq!(err.path(), Some("consumer[0]"));

		let err = GsnState::decode(&bytes[..30]).expect_err("truncated second entry");
		assert_eq!(err.kind(), ErrorKind::OutOfBounds);
		assert_eq!(err.path(), Some("consumer[1]"));
	}

	#[test]
	fn from_value_rejects_wrong_shapes() {
		let err = GsnState::from_value(&Value::U8(1)).expect_err("not a struct");
		assert_eq!(err.kind(), ErrorKind::InvalidSchema);
	}
}
