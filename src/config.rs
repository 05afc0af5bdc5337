use std::path::Path;

use num_bigint::{BigUint, RandBigInt};
use serde::{Serialize, Deserialize};

use crate::{error::ModelError, identifier::{decimal_seq, IdentifierSpace}};


/// The demonstration script: build a ring, add a node, remove a node,
/// then search from one member for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig{
	pub bits: u32,
	#[serde(with = "decimal_seq")]
	pub positions: Vec<BigUint>,
	pub add: String,
	pub remove: String,
	pub search_from: String,
	pub search_to: String,
}

impl Default for ModelConfig {
	fn default() -> Self {
		ModelConfig{
			bits: 3,
			positions: vec![BigUint::from(0u32), BigUint::from(3u32), BigUint::from(5u32)],
			add: "6".to_string(),
			remove: "3".to_string(),
			search_from: "0".to_string(),
			search_to: "6".to_string(),
		}
	}
}

impl ModelConfig{

	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError>{
		let data = std::fs::read_to_string(&path)?;
		let config = serde_json::from_str(&data)?;
		Ok(config)
	}

	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError>{
		let data = serde_json::to_string_pretty(self)?;
		std::fs::write(path, data)?;
		Ok(())
	}

	/// The default script on a ring of `2^bits` identifiers with `count`
	/// distinct random members, at least one and at most one less than the
	/// ring size. The script adds a random free position, removes the first
	/// member, and searches from the second member to the added one (from
	/// the added one itself when there is no second member).
	pub fn random(bits: u32, count: usize) -> Self {
		let bits = bits.max(1);
		let space = IdentifierSpace::new(bits);
		let mut rng = rand::thread_rng();

		// the removed node must exist before the add, and the added node
		// needs a free slot
		let slots = usize::try_from(space.size()).unwrap_or(usize::MAX);
		let count = count.clamp(1, slots - 1);

		let mut positions: Vec<BigUint> = Vec::with_capacity(count);
		while positions.len() < count {
			let id = rng.gen_biguint_below(space.size());
			if !positions.contains(&id) {
				positions.push(id);
			}
		}
		let add = loop {
			let id = rng.gen_biguint_below(space.size());
			if !positions.contains(&id) {
				break id;
			}
		};

		let remove = positions[0].clone();
		let search_from = positions.get(1).cloned().unwrap_or_else(|| add.clone());

		ModelConfig{
			bits,
			positions,
			remove: remove.to_string(),
			search_from: search_from.to_string(),
			search_to: add.to_string(),
			add: add.to_string(),
		}
	}
}
