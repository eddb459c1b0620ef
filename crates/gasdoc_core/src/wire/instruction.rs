use crate::wire::{Cursor, Primitive, Registry, Result, TypeRef, WireError};

/// One fixed-width field in an instruction layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
	/// Field name.
	pub name: &'static str,
	/// Little-endian width in bytes.
	pub width: usize,
}

const AMOUNT: FieldSpec = FieldSpec { name: "amount", width: 8 };

/// Instruction discriminants understood by the gas-station program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
	/// Mark the state account initialized.
	Initialize = 0,
	/// Deposit lamports for a consumer.
	Topup = 1,
	/// Relay a transfer paid for by the gas station.
	Transfer = 2,
}

impl Opcode {
	/// Every opcode in discriminant order.
	pub const ALL: [Opcode; 3] = [Opcode::Initialize, Opcode::Topup, Opcode::Transfer];

	/// Resolve a discriminant byte.
	pub fn from_discriminant(discriminant: u8) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|op| *op as u8 == discriminant)
			.ok_or(WireError::UnknownInstruction { discriminant })
	}

	/// Fields following the discriminant.
	pub fn layout(self) -> &'static [FieldSpec] {
		match self {
			Self::Initialize => &[],
			Self::Topup | Self::Transfer => &[AMOUNT],
		}
	}

	/// Exact payload size including the discriminant.
	pub fn payload_len(self) -> usize {
		1 + self.layout().iter().map(|field| field.width).sum::<usize>()
	}

	/// Schema entry name used by [`instruction_registry`].
	pub fn name(self) -> &'static str {
		match self {
			Self::Initialize => "Initialize",
			Self::Topup => "Topup",
			Self::Transfer => "Transfer",
		}
	}
}

/// Typed outbound instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
	/// Discriminant only.
	Initialize,
	/// Discriminant plus amount.
	Topup {
		/// Lamports to deposit.
		amount: u64,
	},
	/// Discriminant plus amount.
	Transfer {
		/// Lamports to move.
		amount: u64,
	},
}

impl Instruction {
	/// Opcode for this instruction.
	pub fn opcode(&self) -> Opcode {
		match self {
			Self::Initialize => Opcode::Initialize,
			Self::Topup { .. } => Opcode::Topup,
			Self::Transfer { .. } => Opcode::Transfer,
		}
	}

	/// Build an instruction from an opcode and an optional amount of any magnitude.
	pub fn new(opcode: Opcode, amount: Option<u128>) -> Result<Self> {
		let fields: Vec<u128> = amount.into_iter().collect();
		let bytes = encode(opcode as u8, &fields)?;
		Self::decode(&bytes)
	}

	/// Serialize to the exact payload bytes.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.opcode().payload_len());
		out.push(self.opcode() as u8);
		match self {
			Self::Initialize => {}
			Self::Topup { amount } | Self::Transfer { amount } => out.extend_from_slice(&amount.to_le_bytes()),
		}
		out
	}

	/// Parse a payload, ignoring bytes past the layout.
	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		let opcode = Opcode::from_discriminant(cursor.read_u8()?)?;
		Ok(match opcode {
			Opcode::Initialize => Self::Initialize,
			Opcode::Topup => Self::Topup {
				amount: cursor.read_u64_le()?,
			},
			Opcode::Transfer => Self::Transfer {
				amount: cursor.read_u64_le()?,
			},
		})
	}
}

/// Encode `discriminant` followed by `fields` at their declared widths.
pub fn encode(discriminant: u8, fields: &[u128]) -> Result<Vec<u8>> {
	let opcode = Opcode::from_discriminant(discriminant)?;
	let layout = opcode.layout();
	if layout.len() != fields.len() {
		return Err(WireError::FieldCountMismatch {
			discriminant,
			expected: layout.len(),
			got: fields.len(),
		});
	}

	let mut out = Vec::with_capacity(opcode.payload_len());
	out.push(discriminant);
	for (spec, value) in layout.iter().zip(fields) {
		let bytes = value.to_le_bytes();
		let (head, tail) = bytes.split_at(spec.width);
		if tail.iter().any(|byte| *byte != 0) {
			return Err(WireError::FieldTooLarge {
				field: spec.name,
				value: *value,
				width: spec.width,
			});
		}
		out.extend_from_slice(head);
	}
	Ok(out)
}

/// Schema entries describing every instruction payload, keyed by [`Opcode::name`].
pub fn instruction_registry() -> Result<Registry> {
	let mut registry = Registry::new();
	for opcode in Opcode::ALL {
		let mut fields = vec![("instruction", TypeRef::Primitive(Primitive::U8))];
		for spec in opcode.layout() {
			let primitive = match spec.width {
				1 => Primitive::U8,
				4 => Primitive::U32,
				8 => Primitive::U64,
				_ => Primitive::U128,
			};
			fields.push((spec.name, TypeRef::Primitive(primitive)));
		}
		registry.insert_struct(opcode.name(), fields)?;
	}
	Ok(registry)
}
