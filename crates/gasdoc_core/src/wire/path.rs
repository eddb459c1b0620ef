use std::fmt;

use crate::wire::{Result, WireError};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named struct field.
	Field(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed field path expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// A leading `$` names the root, so every rendered error path parses back:
	/// `$`, `$[0].owner`, `consumer[1]`.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || WireError::InvalidFieldPath { path: input.to_owned() };
		let (mut rest, rooted) = match input.strip_prefix('$') {
			Some(rest) => (rest, true),
			None if input.is_empty() => return Err(invalid()),
			None => (input, false),
		};

		let mut steps = Vec::new();
		while !rest.is_empty() {
			if let Some(tail) = rest.strip_prefix('[') {
				let (digits, tail) = tail.split_once(']').ok_or_else(invalid)?;
				if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
					return Err(invalid());
				}
				steps.push(PathStep::Index(digits.parse().map_err(|_| invalid())?));
				rest = tail;
				continue;
			}

			// Only an unrooted path starts with a bare field name.
			let tail = if steps.is_empty() && !rooted {
				rest
			} else {
				rest.strip_prefix('.').ok_or_else(invalid)?
			};
			let end = tail.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(tail.len());
			if end == 0 {
				return Err(invalid());
			}
			steps.push(PathStep::Field(tail[..end].to_owned()));
			rest = &tail[end..];
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("$");
		}
		for (i, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) if i == 0 => f.write_str(name)?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
