//! Read-only, serializable views of the ring for presentation.

use num_bigint::BigUint;
use serde::{Serialize, Deserialize};

use crate::{
	finger_table::Finger,
	identifier::{decimal, decimal_seq},
	node::Node,
	ring::Ring,
};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSnapshot{
	pub bits: u32,
	#[serde(with = "decimal")]
	pub size: BigUint,
	pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot{
	#[serde(with = "decimal")]
	pub position: BigUint,
	pub fingers: Vec<FingerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerSnapshot{
	pub index: u32,
	/// `[start, end)`, `start` is also the finger start.
	#[serde(with = "decimal_seq")]
	pub interval: Vec<BigUint>,
	#[serde(with = "decimal")]
	pub successor: BigUint,
	#[serde(with = "decimal")]
	pub predecessor: BigUint,
}

impl RingSnapshot{
	pub fn of(ring: &Ring) -> Self {
		RingSnapshot{
			bits: ring.bits(),
			size: ring.size().clone(),
			nodes: ring.nodes().map(NodeSnapshot::of).collect(),
		}
	}

	/// Member positions, ascending.
	pub fn positions(&self) -> Vec<BigUint> {
		self.nodes.iter().map(|node| node.position.clone()).collect()
	}

	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string_pretty(self)
	}
}

impl NodeSnapshot{
	pub fn of(node: &Node) -> Self {
		NodeSnapshot{
			position: node.position().clone(),
			fingers: node.fingers().iter().map(FingerSnapshot::of).collect(),
		}
	}
}

impl FingerSnapshot{
	pub fn of(finger: &Finger) -> Self {
		FingerSnapshot{
			index: finger.index(),
			interval: vec![finger.interval().start().clone(), finger.interval().end().clone()],
			successor: finger.successor().clone(),
			predecessor: finger.predecessor().clone(),
		}
	}
}
