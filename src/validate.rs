//! Input checks run before the ring is touched. Each returns the parsed,
//! in-range positions so the core only ever sees well-formed input.

use std::collections::BTreeSet;

use num_bigint::BigUint;

use crate::{error::ModelError, identifier::IdentifierSpace, ring::Ring};


/// Checks a bit width and an initial membership list.
pub fn construction(bits: u32, positions: &[BigUint]) -> Result<IdentifierSpace, ModelError> {
	if bits == 0 {
		return Err(ModelError::InvalidConfiguration("bit count must be at least 1".to_string()));
	}
	let space = IdentifierSpace::new(bits);

	let mut seen = BTreeSet::new();
	for position in positions {
		if !space.contains(position) {
			return Err(ModelError::InvalidConfiguration(format!(
				"position {} is outside [0, {})", position, space.size()
			)));
		}
		if !seen.insert(position) {
			return Err(ModelError::InvalidConfiguration(format!("position {} is repeated", position)));
		}
	}
	Ok(space)
}

/// Checks a position about to be added.
pub fn add(ring: &Ring, position: &str) -> Result<BigUint, ModelError> {
	let position = in_range(ring, position)?;
	if ring.contains(&position) {
		return Err(ModelError::DuplicateNode(position));
	}
	Ok(position)
}

/// Checks a position about to be removed.
pub fn remove(ring: &Ring, position: &str) -> Result<BigUint, ModelError> {
	member(ring, position)
}

/// Checks both ends of a lookup.
pub fn search(ring: &Ring, start: &str, target: &str) -> Result<(BigUint, BigUint), ModelError> {
	Ok((member(ring, start)?, member(ring, target)?))
}


fn in_range(ring: &Ring, position: &str) -> Result<BigUint, ModelError> {
	ring.space().parse(position).ok_or_else(|| ModelError::OutOfRange {
		position: position.to_string(),
		size: ring.size().clone(),
	})
}

fn member(ring: &Ring, position: &str) -> Result<BigUint, ModelError> {
	match ring.space().parse(position) {
		Some(id) if ring.contains(&id) => Ok(id),
		_ => Err(ModelError::UnknownNode(position.to_string())),
	}
}
