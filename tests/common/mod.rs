#![allow(dead_code)]

use chord_model::{BigUint, Ring};
use rand::{rngs::StdRng, Rng, SeedableRng};


pub fn id(value: u32) -> BigUint {
	BigUint::from(value)
}

pub fn ids(values: &[u32]) -> Vec<BigUint> {
	values.iter().map(|v| id(*v)).collect()
}

fn small(value: &BigUint) -> u32 {
	u32::try_from(value).expect("test identifiers fit in u32")
}

/// (start, end, successor, predecessor) of every finger of `position`.
pub fn fingers(ring: &Ring, position: u32) -> Vec<(u32, u32, u32, u32)> {
	let node = ring.node(&id(position)).expect("node should be a member");
	node.fingers().iter().map(|finger| (
		small(finger.interval().start()),
		small(finger.interval().end()),
		small(finger.successor()),
		small(finger.predecessor()),
	)).collect()
}

/// Checks every finger of every member against the ownership rule: the
/// successor is the first member (ascending) inside the interval, or the
/// smallest member when none is inside; the predecessor is the member just
/// before that owner, or the largest member.
pub fn assert_consistent(ring: &Ring) {
	let positions: Vec<BigUint> = ring.positions().cloned().collect();
	let smallest = positions.first().expect("ring should not be empty");
	let largest = positions.last().expect("ring should not be empty");

	for node in ring.nodes() {
		assert_eq!(node.fingers().len(), ring.bits() as usize);
		for finger in node.fingers() {
			let inside = positions.iter().position(|p| finger.interval().contains(p));
			match inside {
				Some(slot) => {
					assert!(finger.interval().contains(finger.successor()));
					assert_eq!(finger.successor(), &positions[slot], "node {} finger {}", node.position(), finger.index());
					let before = if slot == 0 { largest } else { &positions[slot - 1] };
					assert_eq!(finger.predecessor(), before, "node {} finger {}", node.position(), finger.index());
				},
				None => {
					assert_eq!(finger.successor(), smallest, "node {} finger {}", node.position(), finger.index());
					assert_eq!(finger.predecessor(), largest, "node {} finger {}", node.position(), finger.index());
				},
			}
		}
	}
}

pub fn seeded(seed: u64) -> StdRng {
	StdRng::seed_from_u64(seed)
}

/// `count` distinct positions on a ring of `2^bits` identifiers, in draw order.
pub fn random_positions(rng: &mut StdRng, bits: u32, count: usize) -> Vec<u32> {
	let size = 1u32 << bits;
	let mut positions = Vec::with_capacity(count);
	while positions.len() < count.min(size as usize) {
		let p = rng.gen_range(0..size);
		if !positions.contains(&p) {
			positions.push(p);
		}
	}
	positions
}
