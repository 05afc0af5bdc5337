use std::fmt;
use std::cmp::Ordering;

use num_bigint::BigUint;

use serde::{
	ser::{Serializer, SerializeSeq},
	de::{self, Deserialize, Deserializer, SeqAccess, Visitor},
};


/// The modular identifier space of a ring: every identifier lies in `[0, 2^bits)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSpace{
	bits: u32,
	size: BigUint,
}

impl IdentifierSpace{
	/// Creates the space of `2^bits` identifiers. A zero bit width is a
	/// programming error; callers validate it first.
	pub fn new(bits: u32) -> IdentifierSpace{
		assert!(bits >= 1, "identifier space needs at least one bit");
		IdentifierSpace{
			bits,
			size: BigUint::new(vec!(2)).pow(bits),
		}
	}

	pub fn bits(&self) -> u32 {
		self.bits
	}

	/// The ring size N.
	pub fn size(&self) -> &BigUint {
		&self.size
	}

	pub fn contains(&self, id: &BigUint) -> bool {
		id < &self.size
	}

	/// The start of finger `index` (1-based) of the node at `position`.
	/// `index` may exceed `bits`, the result is still reduced modulo N.
	pub fn finger_start(&self, position: &BigUint, index: u32) -> BigUint {
		let offset = BigUint::new(vec!(2)).pow(index - 1);
		(position + offset) % &self.size
	}

	/// The half-open interval owned by finger `index` of the node at `position`.
	pub fn finger_interval(&self, position: &BigUint, index: u32) -> Interval {
		Interval::new(
			self.finger_start(position, index),
			self.finger_start(position, index + 1),
		)
	}

	/// Parses a decimal position and checks that it lies inside the space.
	pub fn parse(&self, data: &str) -> Option<BigUint> {
		let id = parse_decimal(data)?;
		if self.contains(&id) {
			Some(id)
		}else{
			None
		}
	}
}

/// Parses an unsigned decimal number. Signs, separators and blanks are rejected.
pub fn parse_decimal(data: &str) -> Option<BigUint> {
	if data.is_empty() || !data.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	BigUint::parse_bytes(data.as_bytes(), 10)
}


/// A half-open range `[start, end)` on the ring. It wraps past the
/// largest identifier back to zero when `start >= end`; `start == end`
/// covers the whole ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval{
	start: BigUint,
	end: BigUint,
}

impl Interval{
	pub fn new(start: BigUint, end: BigUint) -> Interval{
		Interval{start, end}
	}

	pub fn start(&self) -> &BigUint {
		&self.start
	}

	pub fn end(&self) -> &BigUint {
		&self.end
	}

	pub fn is_wrapped(&self) -> bool {
		self.start >= self.end
	}

	/// Tests if id is in the range [start, end) on the ring.
	pub fn contains(&self, id: &BigUint) -> bool {
		match self.start.cmp(&self.end){
			Ordering::Less => (id >= &self.start) && (id < &self.end),
			Ordering::Equal | Ordering::Greater => (id >= &self.start) || (id < &self.end),
		}
	}
}

impl fmt::Display for Interval {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "[{}, {})", self.start, self.end)
	}
}


/// Serde adaptor writing identifiers as decimal strings and reading them
/// back from either strings or plain JSON numbers.
pub mod decimal {
	use super::*;

	pub fn serialize<S>(id: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&id.to_str_radix(10))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(DecimalVisitor)
	}
}

/// Sequence form of [`decimal`].
pub mod decimal_seq {
	use super::*;

	pub fn serialize<S>(ids: &[BigUint], serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(ids.len()))?;
		for id in ids {
			seq.serialize_element(&id.to_str_radix(10))?;
		}
		seq.end()
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigUint>, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_seq(DecimalSeqVisitor)
	}
}


struct Decimal(BigUint);

impl<'de> Deserialize<'de> for Decimal {
	fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(DecimalVisitor).map(Decimal)
	}
}


struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
	type Value = BigUint;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("an unsigned integer or a decimal string")
	}

	fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Ok(BigUint::from(value))
	}

	fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		u64::try_from(value)
			.map(BigUint::from)
			.map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		parse_decimal(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
	}
}


struct DecimalSeqVisitor;

impl<'de> Visitor<'de> for DecimalSeqVisitor {
	type Value = Vec<BigUint>;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a list of identifiers")
	}

	fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
	where
		S: SeqAccess<'de>
	{
		let mut v = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(Decimal(id)) = seq.next_element()? {
			v.push(id);
		}
		Ok(v)
	}
}
