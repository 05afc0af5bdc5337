//! Shared access to a ring. The ring is moved into a single processor task
//! and every operation is a message to it, so membership changes (and the
//! refresh that follows them) never interleave with each other or with a
//! lookup in progress.

use num_bigint::BigUint;
use tokio::sync::mpsc::{channel, Sender, Receiver};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{error::ModelError, node::Node, ring::{Lookup, Ring}, snapshot::RingSnapshot};

mod message;
use message::Request;


/// A ring waiting to be started. Acts like a builder: created around a
/// ring, then consumed by [`RingService::start`].
#[derive(Debug)]
pub struct RingService{
	ring: Ring,
	channel_rx: Receiver<Request>,
	channel_tx: Sender<Request>,
}

impl RingService{

	pub fn new(ring: Ring) -> Self{
		let (channel_tx, channel_rx) = channel(50);
		RingService{
			ring,
			channel_rx,
			channel_tx,
		}
	}

	/// A client for this ring. Requests queue up until the service is started.
	pub fn client(&self) -> RingClient{
		RingClient{
			to: self.channel_tx.clone(),
		}
	}

	/// Spawns the processor task and returns a handle to it.
	pub fn start(mut self) -> RingHandle{
		let client = self.client();

		let processor_handle = tokio::spawn(async move{
			while let Some(request) = self.channel_rx.recv().await{
				debug!("Processing {} request", request.name());
				match request{
					Request::AddNode { position, reply } => {
						let _ = reply.send(self.ring.add_node(&position));
					},
					Request::RemoveNode { position, reply } => {
						let _ = reply.send(self.ring.remove_node(&position));
					},
					Request::FindNode { start, target, reply } => {
						let _ = reply.send(self.ring.find_node(&start, &target));
					},
					Request::Snapshot { reply } => {
						let _ = reply.send(self.ring.snapshot());
					},
					Request::Members { reply } => {
						let _ = reply.send(self.ring.positions().cloned().collect());
					},
					Request::Shutdown => break,
				}
			}
			info!("ring processor terminating");
			self.ring
		});

		RingHandle{
			processor_handle,
			client,
		}
	}
}


/// A RingHandle represents a started ring service.
pub struct RingHandle{
	processor_handle: JoinHandle<Ring>,
	client: RingClient,
}

impl RingHandle{
	/// Get a new client connected to the running ring.
	pub fn client(&self) -> RingClient{
		self.client.clone()
	}

	/// Stops the processor after the requests already queued and hands the
	/// ring back. Clients kept past this point get `ServiceClosed`.
	pub async fn stop(self) -> Option<Ring>{
		let _ = self.client.to.send(Request::Shutdown).await;
		self.processor_handle.await.ok()
	}
}


/// Cloneable sender side of the ring service.
#[derive(Debug, Clone)]
pub struct RingClient{
	to: Sender<Request>,
}

impl RingClient{

	pub async fn add_node(&self, position: &str) -> Result<(), ModelError>{
		self.request(|reply| Request::AddNode { position: position.to_string(), reply }).await?
	}

	pub async fn remove_node(&self, position: &str) -> Result<Node, ModelError>{
		self.request(|reply| Request::RemoveNode { position: position.to_string(), reply }).await?
	}

	pub async fn find_node(&self, start: &str, target: &str) -> Result<Lookup, ModelError>{
		self.request(|reply| Request::FindNode { start: start.to_string(), target: target.to_string(), reply }).await?
	}

	pub async fn snapshot(&self) -> Result<RingSnapshot, ModelError>{
		self.request(|reply| Request::Snapshot { reply }).await
	}

	/// Member positions, ascending.
	pub async fn members(&self) -> Result<Vec<BigUint>, ModelError>{
		self.request(|reply| Request::Members { reply }).await
	}

	async fn request<T, F>(&self, make: F) -> Result<T, ModelError>
	where
		F: FnOnce(oneshot::Sender<T>) -> Request,
	{
		let (reply, answer) = oneshot::channel();
		self.to.send(make(reply)).await.map_err(|_| ModelError::ServiceClosed)?;
		answer.await.map_err(|_| ModelError::ServiceClosed)
	}
}
