mod common;

use std::collections::HashSet;

use chord_model::{BigUint, ModelError, Ring};

use common::{assert_consistent, fingers, id, ids, random_positions, seeded};


#[test]
fn three_bit_ring_tables() {
	let ring = Ring::new(3, [0u32, 3, 5]).unwrap();
	assert_eq!(ring.size(), &id(8));
	assert_eq!(ring.len(), 3);

	// finger starts 1, 2, 4; [1, 2) has no member and falls back to the smallest
	assert_eq!(fingers(&ring, 0), vec![(1, 2, 0, 5), (2, 4, 3, 0), (4, 0, 5, 3)]);
	assert_eq!(fingers(&ring, 3), vec![(4, 5, 0, 5), (5, 7, 5, 3), (7, 3, 0, 5)]);
	assert_eq!(fingers(&ring, 5), vec![(6, 7, 0, 5), (7, 1, 0, 5), (1, 5, 3, 0)]);
	assert_consistent(&ring);
}

#[test]
fn adding_a_node_refreshes_every_table() {
	let mut ring = Ring::new(3, [0u32, 3, 5]).unwrap();
	ring.add_node("6").unwrap();
	assert_eq!(ring.len(), 4);

	// node 0's third finger still lands on 5
	assert_eq!(fingers(&ring, 0)[2], (4, 0, 5, 3));
	// node 5's finger at 6 now resolves to the new node instead of wrapping to 0
	assert_eq!(fingers(&ring, 5)[0], (6, 7, 6, 5));
	assert_eq!(fingers(&ring, 6), vec![(7, 0, 0, 6), (0, 2, 0, 6), (2, 6, 3, 0)]);
	assert_consistent(&ring);

	let lookup = ring.find_node("0", "6").unwrap();
	assert_eq!(lookup.node().position(), &id(6));
	assert_eq!(lookup.path(), ids(&[0, 5, 6]).as_slice());
	assert_eq!(lookup.hops(), 2);
}

#[test]
fn removing_a_node_refreshes_every_table() {
	let mut ring = Ring::new(3, [0u32, 3, 5]).unwrap();
	ring.add_node("6").unwrap();
	let removed = ring.remove_node("3").unwrap();
	assert_eq!(removed.position(), &id(3));
	assert!(!ring.contains(&id(3)));

	assert_eq!(fingers(&ring, 0), vec![(1, 2, 0, 6), (2, 4, 0, 6), (4, 0, 5, 0)]);
	assert_eq!(fingers(&ring, 5), vec![(6, 7, 6, 5), (7, 1, 0, 6), (1, 5, 0, 6)]);
	assert_eq!(fingers(&ring, 6), vec![(7, 0, 0, 6), (0, 2, 0, 6), (2, 6, 5, 0)]);
	for node in ring.nodes() {
		for finger in node.fingers() {
			assert_ne!(finger.successor(), &id(3));
			assert_ne!(finger.predecessor(), &id(3));
		}
	}
	assert_consistent(&ring);
}

#[test]
fn membership_errors_leave_ring_untouched() {
	let mut ring = Ring::new(3, [0u32, 3, 5]).unwrap();
	let before = ring.snapshot();

	assert!(matches!(ring.add_node("3"), Err(ModelError::DuplicateNode(p)) if p == id(3)));
	assert!(matches!(ring.add_node("8"), Err(ModelError::OutOfRange { .. })));
	assert!(matches!(ring.add_node("-2"), Err(ModelError::OutOfRange { .. })));
	assert!(matches!(ring.remove_node("4"), Err(ModelError::UnknownNode(_))));
	assert!(matches!(ring.find_node("0", "4"), Err(ModelError::UnknownNode(_))));
	assert!(matches!(ring.find_node("9", "0"), Err(ModelError::UnknownNode(_))));

	assert_eq!(ring.snapshot(), before);
}

#[test]
fn invalid_configurations() {
	assert!(matches!(Ring::new(0, [0u32]), Err(ModelError::InvalidConfiguration(_))));
	assert!(matches!(Ring::new(3, [0u32, 8]), Err(ModelError::InvalidConfiguration(_))));
	assert!(matches!(Ring::new(3, [2u32, 5, 2]), Err(ModelError::InvalidConfiguration(_))));
}

#[test]
fn empty_ring_grows_from_one_node() {
	let mut ring = Ring::new(4, Vec::<u32>::new()).unwrap();
	assert!(ring.is_empty());

	ring.add_node("9").unwrap();
	let node = ring.node(&id(9)).unwrap();
	assert_eq!(node.fingers().len(), 4);
	for finger in node.fingers() {
		assert_eq!(finger.successor(), &id(9));
		assert_eq!(finger.predecessor(), &id(9));
	}
}

#[test]
fn lone_member_points_at_itself() {
	for bits in 1..=6 {
		let size = 1u32 << bits;
		for position in [0, size / 2, size - 1] {
			let ring = Ring::new(bits, [position]).unwrap();
			let node = ring.node(&id(position)).unwrap();
			for finger in node.fingers() {
				assert_eq!(finger.successor(), &id(position));
				assert_eq!(finger.predecessor(), &id(position));
			}
		}
	}

	// shrinking back to one member gives the same picture
	let mut ring = Ring::new(3, [1u32, 4, 6]).unwrap();
	ring.remove_node("1").unwrap();
	ring.remove_node("6").unwrap();
	assert_eq!(fingers(&ring, 4), vec![(5, 6, 4, 4), (6, 0, 4, 4), (0, 4, 4, 4)]);
}

#[test]
fn intervals_cover_ring_except_own_position() {
	for bits in 1..=6 {
		let size = 1u32 << bits;
		let positions: Vec<u32> = (0..size).step_by(3).collect();
		let ring = Ring::new(bits, positions.clone()).unwrap();
		for node in ring.nodes() {
			for value in 0..size {
				let value = id(value);
				let owners = node.fingers().iter().filter(|f| f.interval().contains(&value)).count();
				let expected = if &value == node.position() { 0 } else { 1 };
				assert_eq!(owners, expected, "bits {} node {} id {}", bits, node.position(), value);
			}
		}
	}
}

#[test]
fn intervals_fixed_across_membership_changes() {
	let mut ring = Ring::new(5, [2u32, 19]).unwrap();
	let intervals = |ring: &Ring| -> Vec<(BigUint, BigUint)> {
		ring.node(&id(2)).unwrap().fingers().iter()
			.map(|f| (f.interval().start().clone(), f.interval().end().clone()))
			.collect()
	};
	let before = intervals(&ring);

	ring.add_node("7").unwrap();
	ring.add_node("30").unwrap();
	ring.remove_node("19").unwrap();
	assert_eq!(intervals(&ring), before);
}

#[test]
fn refresh_is_idempotent() {
	let mut rng = seeded(7);
	for _ in 0..20 {
		let positions = random_positions(&mut rng, 5, 9);
		let mut ring = Ring::new(5, positions).unwrap();
		let first = ring.snapshot();
		ring.refresh();
		let second = ring.snapshot();
		ring.refresh();
		assert_eq!(first, second);
		assert_eq!(second, ring.snapshot());
	}
}

#[test]
fn tables_depend_only_on_membership() {
	let mut rng = seeded(11);
	for _ in 0..20 {
		let positions = random_positions(&mut rng, 6, 12);
		let mut reversed = positions.clone();
		reversed.reverse();

		let forward = Ring::new(6, positions.clone()).unwrap();
		let backward = Ring::new(6, reversed).unwrap();
		assert_eq!(forward.snapshot(), backward.snapshot());

		// a detour through an extra member leaves no trace
		let mut detour = Ring::new(6, positions.clone()).unwrap();
		let extra = (0..64u32).find(|p| !positions.contains(p)).unwrap();
		detour.add_node(&extra.to_string()).unwrap();
		detour.remove_node(&extra.to_string()).unwrap();
		assert_eq!(detour.snapshot(), forward.snapshot());
	}
}

#[test]
fn consistent_after_random_mutations() {
	let mut rng = seeded(2024);
	let bits = 6;
	let mut ring = Ring::new(bits, random_positions(&mut rng, bits, 4)).unwrap();

	for step in 0..200u32 {
		let candidate = random_positions(&mut rng, bits, 1)[0];
		let remove = ring.len() > 1 && (ring.contains(&id(candidate)) || step % 3 == 0);
		if remove {
			let victim = if ring.contains(&id(candidate)) {
				id(candidate)
			}else{
				ring.positions().next().unwrap().clone()
			};
			ring.remove_node(&victim.to_string()).unwrap();
		}else if !ring.contains(&id(candidate)) {
			ring.add_node(&candidate.to_string()).unwrap();
		}
		assert_consistent(&ring);
	}
}

#[test]
fn zero_hop_lookups() {
	let ring = Ring::new(4, [1u32, 4, 9, 11, 14]).unwrap();
	for position in ["1", "4", "9", "11", "14"] {
		let lookup = ring.find_node(position, position).unwrap();
		assert_eq!(lookup.hops(), 0);
		assert_eq!(lookup.node().position().to_string(), position);
	}
}

#[test]
fn multi_hop_lookups() {
	let ring = Ring::new(4, [1u32, 4, 9, 11, 14]).unwrap();
	assert_eq!(ring.find_node("1", "11").unwrap().path(), ids(&[1, 9, 11]).as_slice());
	assert_eq!(ring.find_node("4", "14").unwrap().path(), ids(&[4, 1, 9, 14]).as_slice());
	assert_eq!(ring.find_node("11", "9").unwrap().path(), ids(&[11, 4, 9]).as_slice());
	assert_eq!(ring.find_node("14", "11").unwrap().path(), ids(&[14, 9, 11]).as_slice());
}

#[test]
fn full_rings_route_everywhere() {
	for bits in 1..=5 {
		let size = 1u32 << bits;
		let ring = Ring::new(bits, 0..size).unwrap();
		for start in 0..size {
			for target in 0..size {
				let lookup = ring.find_node(&start.to_string(), &target.to_string()).unwrap();
				assert_eq!(lookup.node().position(), &id(target));
				assert!(lookup.hops() < size as usize);
			}
		}
	}
}

#[test]
fn lookups_end_at_target_or_report_loop() {
	let mut rng = seeded(99);
	for _ in 0..50 {
		let positions = random_positions(&mut rng, 5, 7);
		let ring = Ring::new(5, positions.clone()).unwrap();
		for start in &positions {
			for target in &positions {
				match ring.find_node(&start.to_string(), &target.to_string()) {
					Ok(lookup) => {
						assert_eq!(lookup.node().position(), &id(*target));
						assert_eq!(lookup.path().first(), Some(&id(*start)));
						assert!(lookup.hops() < positions.len());
						let distinct: HashSet<&BigUint> = lookup.path().iter().collect();
						assert_eq!(distinct.len(), lookup.path().len());
					},
					Err(ModelError::RoutingLoop { path, .. }) => {
						let last = path.last().unwrap();
						assert!(path[..path.len() - 1].contains(last));
						assert!(!path.contains(&id(*target)));
					},
					Err(other) => panic!("unexpected error {:?}", other),
				}
			}
		}
	}
}

#[test]
fn wide_identifier_space() {
	let big = BigUint::from(2u32).pow(100) + 12345u32;
	let mut ring = Ring::new(128, [BigUint::from(0u32), big.clone()]).unwrap();
	assert_eq!(ring.node(&big).unwrap().fingers().len(), 128);
	assert_consistent(&ring);

	let lookup = ring.find_node("0", &big.to_string()).unwrap();
	assert_eq!(lookup.node().position(), &big);

	ring.add_node("340282366920938463463374607431768211455").unwrap();
	assert!(matches!(
		ring.add_node("340282366920938463463374607431768211456"),
		Err(ModelError::OutOfRange { .. })
	));
	assert_consistent(&ring);
}

#[test]
fn display_lists_every_finger() {
	let ring = Ring::new(2, [1u32]).unwrap();
	let text = ring.to_string();
	assert!(text.starts_with("Ring of 4 identifiers (2 bits), 1 members"));
	assert!(text.contains("Node 1:"));
	assert!(text.contains("#1 start = 2, interval = [2, 3), successor = 1, predecessor = 1"));
	assert!(text.contains("#2 start = 3, interval = [3, 1), successor = 1, predecessor = 1"));
}
