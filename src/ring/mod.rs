use crate::{
	error::ModelError,
	finger_table::FingerTable,
	identifier::{IdentifierSpace, Interval},
	node::Node,
	snapshot::RingSnapshot,
	validate,
};

use std::{
	collections::BTreeMap,
	fmt,
};

use num_bigint::BigUint;
use tracing::{debug, info, instrument};

mod lookup;
pub use lookup::Lookup;


/// The simulated ring: every member keyed by position, in ascending order.
///
/// Membership only changes through [`Ring::add_node`] and [`Ring::remove_node`],
/// and both finish with a full refresh of every finger's successor and
/// predecessor, so readers always see a consistent ring.
#[derive(Debug, Clone)]
pub struct Ring{
	space: IdentifierSpace,
	members: BTreeMap<BigUint, Node>,
}

impl Ring{

	/// Creates a ring of `2^bits` identifiers and adds `positions` one by one,
	/// in the order given.
	#[instrument(skip(positions))]
	pub fn new<P: Into<BigUint>>(bits: u32, positions: impl IntoIterator<Item = P>) -> Result<Self, ModelError>{
		let positions: Vec<BigUint> = positions.into_iter().map(Into::into).collect();
		let space = validate::construction(bits, &positions)?;

		let mut ring = Ring{
			space,
			members: BTreeMap::new(),
		};
		for position in positions {
			ring.insert(position);
		}

		info!("Created ring of size {} with {} members", ring.size(), ring.len());
		Ok(ring)
	}

	/// Adds the node at the decimal `position`.
	#[instrument(skip(self))]
	pub fn add_node(&mut self, position: &str) -> Result<(), ModelError>{
		let position = validate::add(self, position)?;
		self.insert(position);
		Ok(())
	}

	/// Removes the node at the decimal `position` and returns it as it was
	/// just before removal.
	#[instrument(skip(self))]
	pub fn remove_node(&mut self, position: &str) -> Result<Node, ModelError>{
		let position = validate::remove(self, position)?;
		let node = self.evict(&position);
		Ok(node)
	}

	/// Recomputes successor and predecessor of every finger of every member
	/// from the current membership. Interval boundaries are left alone.
	pub fn refresh(&mut self){
		let positions: Vec<BigUint> = self.members.keys().cloned().collect();
		let bits = self.space.bits() as usize;

		for node in self.members.values_mut() {
			debug_assert_eq!(node.fingers().len(), bits, "finger table of {} has the wrong length", node.position());
			for finger in node.fingers_mut().iter_mut() {
				let (successor, predecessor) = resolve(&positions, finger.interval());
				finger.set_references(successor.clone(), predecessor.clone());
			}
		}
		debug!("Refreshed {} finger tables", positions.len());
	}

	/// The member owning `interval`: the first member, in ascending order, that
	/// lies inside it, or the smallest member when none does.
	pub fn successor_of(&self, interval: &Interval) -> Option<&Node>{
		let positions: Vec<BigUint> = self.members.keys().cloned().collect();
		successor_in(&positions, interval).and_then(|position| self.members.get(position))
	}

	/// The member immediately before [`Ring::successor_of`] for the same
	/// interval, or the largest member when no member lies inside it.
	pub fn predecessor_of(&self, interval: &Interval) -> Option<&Node>{
		let positions: Vec<BigUint> = self.members.keys().cloned().collect();
		predecessor_in(&positions, interval).and_then(|position| self.members.get(position))
	}

	pub fn space(&self) -> &IdentifierSpace {
		&self.space
	}

	pub fn bits(&self) -> u32 {
		self.space.bits()
	}

	/// The number of identifiers, N = 2^bits.
	pub fn size(&self) -> &BigUint {
		self.space.size()
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	pub fn contains(&self, position: &BigUint) -> bool {
		self.members.contains_key(position)
	}

	pub fn node(&self, position: &BigUint) -> Option<&Node> {
		self.members.get(position)
	}

	/// Members in ascending order of position.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.members.values()
	}

	pub fn positions(&self) -> impl Iterator<Item = &BigUint> {
		self.members.keys()
	}

	pub fn snapshot(&self) -> RingSnapshot {
		RingSnapshot::of(self)
	}


	fn insert(&mut self, position: BigUint){
		debug_assert!(self.space.contains(&position));
		debug_assert!(!self.members.contains_key(&position));

		// fingers of the new node are resolved against the ring as it was,
		// a lone node answers every finger itself
		let positions: Vec<BigUint> = self.members.keys().cloned().collect();
		let fingers = FingerTable::build(&self.space, &position, |interval| {
			if positions.is_empty() {
				(position.clone(), position.clone())
			}else{
				let (successor, predecessor) = resolve(&positions, interval);
				(successor.clone(), predecessor.clone())
			}
		});

		self.members.insert(position.clone(), Node::new(position.clone(), fingers));
		self.refresh();
		info!("Added node {}, ring now has {} members", position, self.len());
	}

	fn evict(&mut self, position: &BigUint) -> Node{
		let node = match self.members.remove(position) {
			Some(node) => node,
			None => panic!("node {} vanished before removal", position),
		};
		self.refresh();
		info!("Removed node {}, ring now has {} members", position, self.len());
		node
	}
}

impl fmt::Display for Ring {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "Ring of {} identifiers ({} bits), {} members", self.size(), self.bits(), self.len())?;
		for node in self.nodes() {
			write!(f, "{}", node)?;
		}
		Ok(())
	}
}


// Both resolvers take the same interval and the sorted member positions;
// the ring is never empty when they run.
fn resolve<'a>(positions: &'a [BigUint], interval: &Interval) -> (&'a BigUint, &'a BigUint) {
	match (successor_in(positions, interval), predecessor_in(positions, interval)) {
		(Some(successor), Some(predecessor)) => (successor, predecessor),
		_ => panic!("resolving interval {} against an empty ring", interval),
	}
}

fn successor_in<'a>(positions: &'a [BigUint], interval: &Interval) -> Option<&'a BigUint> {
	positions.iter()
		.find(|position| interval.contains(position))
		.or_else(|| positions.first())
}

fn predecessor_in<'a>(positions: &'a [BigUint], interval: &Interval) -> Option<&'a BigUint> {
	let last = positions.last()?;
	let mut previous = last;
	for position in positions {
		if interval.contains(position) {
			return Some(previous);
		}
		previous = position;
	}
	Some(last)
}
