//! Background fetch workers and the request-sequencing discipline.
//!
//! Each view owns one [`FetchRuntime`] bound to a fetch function. The
//! runtime tags every issued request with a monotonically increasing
//! id; a response whose id is not the latest issued id is stale and
//! must be discarded by the caller (check [`FetchRuntime::matches_latest`]
//! before applying). Dropping the runtime closes the command channel,
//! which makes the worker thread exit, so teardown abandons any work
//! still queued behind an in-flight request.

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::api::ApiError;

pub struct FetchCommand<Q> {
	pub id: u64,
	pub request: Q,
}

pub struct FetchResult<R> {
	pub id: u64,
	pub outcome: Result<R, ApiError>,
}

pub struct FetchRuntime<Q, R> {
	tx: Sender<FetchCommand<Q>>,
	rx: Receiver<FetchResult<R>>,
	next_id: u64,
	current_id: Option<u64>,
	in_flight: bool,
}

impl<Q, R> FetchRuntime<Q, R>
where
	Q: Send + 'static,
	R: Send + 'static,
{
	/// Spawn a worker thread that serves requests with `fetch`.
	pub fn spawn<F>(fetch: F) -> Self
	where
		F: Fn(&Q) -> Result<R, ApiError> + Send + 'static,
	{
		let (cmd_tx, cmd_rx) = channel::<FetchCommand<Q>>();
		let (result_tx, result_rx) = channel::<FetchResult<R>>();

		thread::spawn(move || {
			while let Ok(command) = cmd_rx.recv() {
				let outcome = fetch(&command.request);
				if result_tx
					.send(FetchResult {
						id: command.id,
						outcome,
					})
					.is_err()
				{
					break;
				}
			}
		});

		Self {
			tx: cmd_tx,
			rx: result_rx,
			next_id: 0,
			current_id: None,
			in_flight: false,
		}
	}

	/// Hand a request to the worker without cancelling the in-flight
	/// one; staleness is resolved on the response side instead.
	pub fn issue(&mut self, request: Q) {
		self.next_id = self.next_id.saturating_add(1);
		let id = self.next_id;
		self.current_id = Some(id);
		self.in_flight = true;
		let _ = self.tx.send(FetchCommand { id, request });
	}

	/// Whether a result belongs to the most recently issued request.
	pub fn matches_latest(&self, result_id: u64) -> bool {
		Some(result_id) == self.current_id
	}

	pub fn record_completion(&mut self) {
		self.in_flight = false;
	}

	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	pub fn has_issued(&self) -> bool {
		self.current_id.is_some()
	}

	pub fn try_recv(&mut self) -> Result<FetchResult<R>, TryRecvError> {
		self.rx.try_recv()
	}
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use super::*;

	/// Block until the worker has answered `count` requests.
	fn collect<Q: Send + 'static, R: Send + 'static>(
		runtime: &mut FetchRuntime<Q, R>,
		count: usize,
	) -> Vec<FetchResult<R>> {
		let deadline = Instant::now() + Duration::from_secs(2);
		let mut results = Vec::new();
		while results.len() < count {
			match runtime.try_recv() {
				Ok(result) => results.push(result),
				Err(TryRecvError::Empty) => {
					assert!(Instant::now() < deadline, "worker did not answer in time");
					thread::sleep(Duration::from_millis(5));
				}
				Err(TryRecvError::Disconnected) => panic!("worker exited early"),
			}
		}
		results
	}

	#[test]
	fn responses_carry_the_id_of_their_request() {
		let mut runtime = FetchRuntime::spawn(|request: &u64| Ok(request * 10));
		runtime.issue(3);
		let results = collect(&mut runtime, 1);
		assert_eq!(results[0].id, 1);
		assert_eq!(*results[0].outcome.as_ref().unwrap(), 30);
	}

	#[test]
	fn only_the_latest_request_wins() {
		let mut runtime = FetchRuntime::spawn(|request: &&str| Ok(request.to_string()));
		runtime.issue("first");
		runtime.issue("second");

		let results = collect(&mut runtime, 2);
		assert!(!runtime.matches_latest(results[0].id), "first response is stale");
		assert!(runtime.matches_latest(results[1].id));
		assert_eq!(results[1].outcome.as_ref().unwrap(), "second");
	}

	#[test]
	fn errors_travel_back_as_outcomes() {
		let mut runtime: FetchRuntime<(), u64> =
			FetchRuntime::spawn(|_request| Err(ApiError::NotFound));
		runtime.issue(());
		let results = collect(&mut runtime, 1);
		assert!(results[0].outcome.as_ref().is_err_and(ApiError::is_not_found));
	}
}
