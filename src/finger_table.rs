use std::fmt;

use num_bigint::BigUint;

use crate::identifier::{IdentifierSpace, Interval};


/// One routing entry. `start` and `interval` are fixed when the owning node
/// is created; `successor` and `predecessor` are positions of ring members
/// and are overwritten on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finger{
	index: u32,
	interval: Interval,
	successor: BigUint,
	predecessor: BigUint,
}

impl Finger{
	pub fn new(index: u32, interval: Interval, successor: BigUint, predecessor: BigUint) -> Finger{
		Finger{
			index,
			interval,
			successor,
			predecessor,
		}
	}

	/// 1-based index in the table.
	pub fn index(&self) -> u32 {
		self.index
	}

	pub fn start(&self) -> &BigUint {
		self.interval.start()
	}

	pub fn interval(&self) -> &Interval {
		&self.interval
	}

	pub fn successor(&self) -> &BigUint {
		&self.successor
	}

	pub fn predecessor(&self) -> &BigUint {
		&self.predecessor
	}

	pub(crate) fn set_references(&mut self, successor: BigUint, predecessor: BigUint) {
		self.successor = successor;
		self.predecessor = predecessor;
	}
}

impl fmt::Display for Finger {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"#{} start = {}, interval = {}, successor = {}, predecessor = {}",
			self.index,
			self.start(),
			self.interval,
			self.successor,
			self.predecessor,
		)
	}
}


/// The fingers of a single node, one per bit of the identifier space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerTable{
	fingers: Vec<Finger>,
}

impl FingerTable{
	/// Builds the table for `position`, asking `resolve` for the successor and
	/// predecessor of every finger interval.
	pub fn build<F>(space: &IdentifierSpace, position: &BigUint, mut resolve: F) -> FingerTable
	where
		F: FnMut(&Interval) -> (BigUint, BigUint),
	{
		let fingers = (1..=space.bits()).map(|index| {
			let interval = space.finger_interval(position, index);
			let (successor, predecessor) = resolve(&interval);
			Finger::new(index, interval, successor, predecessor)
		}).collect();

		FingerTable{fingers}
	}

	pub fn len(&self) -> usize {
		self.fingers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fingers.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Finger> {
		self.fingers.iter()
	}

	pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Finger> {
		self.fingers.iter_mut()
	}

	/// Finger by 1-based index.
	pub fn get(&self, index: u32) -> Option<&Finger> {
		let slot = usize::try_from(index).ok()?.checked_sub(1)?;
		self.fingers.get(slot)
	}

	/// The first finger, in index order, whose interval contains `id`.
	pub fn covering(&self, id: &BigUint) -> Option<&Finger> {
		self.fingers.iter().find(|finger| finger.interval.contains(id))
	}

	/// The second-to-last finger, or the only one in a one-bit space.
	pub fn fallback(&self) -> &Finger {
		let slot = self.fingers.len().saturating_sub(2);
		&self.fingers[slot]
	}
}

impl<'a> IntoIterator for &'a FingerTable {
	type Item = &'a Finger;
	type IntoIter = std::slice::Iter<'a, Finger>;

	fn into_iter(self) -> Self::IntoIter {
		self.fingers.iter()
	}
}
