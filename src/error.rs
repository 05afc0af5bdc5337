//! Error types for ring construction, membership changes and lookups.

use num_bigint::BigUint;

/// Errors reported by the ring before any state is touched.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	/// Bad bit width or bad initial membership.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// The position is already a member of the ring.
	#[error("node {0} is already a member of the ring")]
	DuplicateNode(BigUint),

	/// The position does not name a current member.
	#[error("node {0} is not a member of the ring")]
	UnknownNode(String),

	/// The position does not parse, or lies outside `[0, 2^bits)`.
	#[error("position {position:?} is outside the ring of size {size}")]
	OutOfRange {
		/// Raw input as received.
		position: String,
		/// Ring size N.
		size: BigUint,
	},

	/// The lookup revisited a member before reaching its target.
	#[error("lookup from {start} to {target} entered a loop after visiting {path:?}")]
	RoutingLoop {
		start: BigUint,
		target: BigUint,
		path: Vec<BigUint>,
	},

	/// The ring service is no longer running.
	#[error("ring service has stopped")]
	ServiceClosed,

	/// Reading or writing a configuration file failed.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// A configuration file is not valid JSON for the script.
	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}
