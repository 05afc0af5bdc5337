use std::fmt;

use num_bigint::BigUint;

use crate::finger_table::{Finger, FingerTable};


/// A ring member. The position never changes after creation; the finger
/// references are refreshed by the ring after every membership change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node{
	position: BigUint,
	fingers: FingerTable,
}

impl Node{

	pub(crate) fn new(position: BigUint, fingers: FingerTable) -> Node{
		Node{
			position,
			fingers,
		}
	}

	pub fn position(&self) -> &BigUint {
		&self.position
	}

	pub fn fingers(&self) -> &FingerTable {
		&self.fingers
	}

	pub(crate) fn fingers_mut(&mut self) -> &mut FingerTable {
		&mut self.fingers
	}

	/// Where a lookup for `target` goes next from this node: the successor of
	/// the first finger covering `target`, unless that would not move, in
	/// which case the second-to-last finger's successor is used.
	pub fn next_hop(&self, target: &BigUint) -> (&BigUint, bool) {
		if let Some(finger) = self.fingers.covering(target) {
			if finger.successor() != &self.position {
				return (finger.successor(), false);
			}
		}
		(self.fingers.fallback().successor(), true)
	}

	/// The finger whose interval starts at `start`, if any.
	pub fn finger_starting_at(&self, start: &BigUint) -> Option<&Finger> {
		self.fingers.iter().find(|finger| finger.start() == start)
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "Node {}:", self.position)?;
		for finger in &self.fingers {
			writeln!(f, "  {}", finger)?;
		}
		Ok(())
	}
}
