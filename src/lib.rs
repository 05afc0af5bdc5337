//! A simulated Chord ring: members placed on a `2^m` identifier space, one
//! finger table per member rebuilt after every membership change, and a
//! greedy lookup that walks member to member through those tables.

pub mod identifier;
pub use identifier::{IdentifierSpace, Interval};

pub mod finger_table;
pub use finger_table::{Finger, FingerTable};

mod node;
pub use node::Node;

pub mod ring;
pub use ring::{Lookup, Ring};

pub mod validate;

mod error;
pub use error::ModelError;

pub mod snapshot;
pub mod config;

pub mod service;
pub use service::{RingClient, RingHandle, RingService};


pub use num_bigint::BigUint;
