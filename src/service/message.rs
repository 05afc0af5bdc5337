use num_bigint::BigUint;
use tokio::sync::oneshot;

use crate::{error::ModelError, node::Node, ring::Lookup, snapshot::RingSnapshot};


/// A request to the ring processor, carrying the channel its answer goes back on.
#[derive(Debug)]
pub(crate) enum Request{
	// Membership
	AddNode{position: String, reply: oneshot::Sender<Result<(), ModelError>>},
	RemoveNode{position: String, reply: oneshot::Sender<Result<Node, ModelError>>},

	// Queries
	FindNode{start: String, target: String, reply: oneshot::Sender<Result<Lookup, ModelError>>},
	Snapshot{reply: oneshot::Sender<RingSnapshot>},
	Members{reply: oneshot::Sender<Vec<BigUint>>},

	Shutdown,
}

impl Request{
	pub(crate) fn name(&self) -> &'static str {
		match self {
			Request::AddNode { .. } => "add_node",
			Request::RemoveNode { .. } => "remove_node",
			Request::FindNode { .. } => "find_node",
			Request::Snapshot { .. } => "snapshot",
			Request::Members { .. } => "members",
			Request::Shutdown => "shutdown",
		}
	}
}
