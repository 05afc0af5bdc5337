use std::{collections::HashSet, fmt};

use num_bigint::BigUint;
use tracing::{debug, info, instrument, warn};

use crate::{error::ModelError, node::Node, validate};

use super::Ring;


/// The result of a lookup: the member found and every member visited on
/// the way, starting with the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup{
	node: Node,
	path: Vec<BigUint>,
}

impl Lookup{
	pub fn node(&self) -> &Node {
		&self.node
	}

	pub fn path(&self) -> &[BigUint] {
		&self.path
	}

	/// Number of transitions between members.
	pub fn hops(&self) -> usize {
		self.path.len() - 1
	}
}

impl fmt::Display for Lookup {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let steps: Vec<String> = self.path.iter().map(|id| id.to_string()).collect();
		write!(f, "{} ({} hops)", steps.join(" -> "), self.hops())
	}
}


impl Ring{

	/// Walks the ring from the member at `start` to the member at `target`
	/// following finger successors.
	#[instrument(skip(self))]
	pub fn find_node(&self, start: &str, target: &str) -> Result<Lookup, ModelError>{
		let (start, target) = validate::search(self, start, target)?;
		self.route(&start, &target)
	}

	/// Routing over validated member positions. Each step jumps to the
	/// successor of the first finger covering `target`; a step that would
	/// not move, or finds no covering finger, takes the second-to-last
	/// finger's successor instead. Revisiting a member aborts the walk.
	pub(crate) fn route(&self, start: &BigUint, target: &BigUint) -> Result<Lookup, ModelError>{
		let mut current = start.clone();
		let mut path = vec![current.clone()];
		let mut visited = HashSet::new();
		visited.insert(current.clone());

		while &current != target {
			// successors always name members after a refresh
			let node = &self.members[&current];
			let (next, fallback) = node.next_hop(target);
			if fallback {
				warn!("No finger of {} moves toward {}, falling back to finger {}", current, target, node.fingers().fallback().index());
			}
			debug!("Hop {} -> {}", current, next);

			let next = next.clone();
			path.push(next.clone());
			if !visited.insert(next.clone()) {
				warn!("Lookup from {} to {} revisited {}", start, target, next);
				return Err(ModelError::RoutingLoop {
					start: start.clone(),
					target: target.clone(),
					path,
				});
			}
			current = next;
		}

		let lookup = Lookup{
			node: self.members[target].clone(),
			path,
		};
		info!("Found node {} from {} in {} hops", target, start, lookup.hops());
		Ok(lookup)
	}
}
