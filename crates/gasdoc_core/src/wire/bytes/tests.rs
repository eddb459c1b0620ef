use crate::wire::{Cursor, WireError};

#[test]
fn reads_little_endian_integers() {
	let mut bytes = vec![0x2a];
	bytes.extend_from_slice(&0xdead_beef_u32.to_le_bytes());
	bytes.extend_from_slice(&0x0102_0304_0506_0708_u64.to_le_bytes());
	bytes.extend_from_slice(&(u128::MAX - 7).to_le_bytes());

	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_u8().expect("u8"), 0x2a);
	assert_eq!(cursor.read_u32_le().expect("u32"), 0xdead_beef);
	assert_eq!(cursor.read_u64_le().expect("u64"), 0x0102_0304_0506_0708);
	assert_eq!(cursor.read_u128_le().expect("u128"), u128::MAX - 7);
	assert_eq!(cursor.pos(), 29);
	assert!(cursor.is_empty());
}

#[test]
fn u64_low_byte_comes_first() {
	let mut cursor = Cursor::new(&[0x80, 0x96, 0x98, 0, 0, 0, 0, 0]);
	assert_eq!(cursor.read_u64_le().expect("u64"), 10_000_000);
}

#[test]
fn short_read_fails_without_advancing() {
	let mut cursor = Cursor::new(&[1, 2, 3]);
	let err = cursor.read_u32_le().expect_err("three bytes cannot hold a u32");
	assert!(matches!(err, WireError::OutOfBounds { at: 0, need: 4, rem: 3 }));
	assert_eq!(cursor.pos(), 0);
	assert_eq!(cursor.read_u8().expect("byte still available"), 1);
}

#[test]
fn read_bytes_returns_exactly_requested_window() {
	let data = [9, 8, 7, 6, 5];
	let mut cursor = Cursor::new(&data);
	let _ = cursor.read_u8().expect("skip one");
	let window = cursor.read_bytes(2).expect("two bytes");
	assert_eq!(window, &[8, 7]);
	assert_eq!(cursor.remaining(), 2);
	assert!(cursor.read_bytes(3).is_err());
}

#[test]
fn reads_hello_string() {
	let mut cursor = Cursor::new(&[0x05, 0x00, 0x00, 0x00, b'h', b'e', b'l', b'l', b'o']);
	assert_eq!(cursor.read_string().expect("string"), "hello");
	assert_eq!(cursor.pos(), 9);
}

#[test]
fn rejects_invalid_utf8() {
	let mut cursor = Cursor::new(&[0x01, 0x00, 0x00, 0x00, 0xff]);
	let err = cursor.read_string().expect_err("0xff is not utf-8");
	assert!(matches!(err, WireError::InvalidUtf8 { at: 4, len: 1 }));
}

#[test]
fn string_length_past_end_is_out_of_bounds() {
	let mut cursor = Cursor::new(&[0x10, 0x00, 0x00, 0x00, b'a']);
	let err = cursor.read_string().expect_err("declared length exceeds buffer");
	assert!(matches!(err, WireError::OutOfBounds { at: 4, need: 16, rem: 1 }));
}
