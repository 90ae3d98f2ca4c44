use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::dns::QuerySink;
use crate::sampler::Sampler;
use crate::stats::RunStats;

/// Cooperative stop flag shared between the sampling loop and whatever
/// requests shutdown (signal handler, duration bound, tests).
#[derive(Debug, Clone, Default)]
pub struct RunContext {
	stop: Arc<AtomicBool>,
}

impl RunContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn request_stop(&self) {
		self.stop.store(true, Ordering::Relaxed);
	}

	pub fn is_stop_requested(&self) -> bool {
		self.stop.load(Ordering::Relaxed)
	}
}

/// External bounds on a run; both optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLimits {
	/// Stop after exactly this many queries.
	pub count: Option<u64>,
	/// Stop at this monotonic deadline, checked cooperatively.
	pub deadline: Option<Instant>,
}

impl RunLimits {
	fn reached(&self, emitted: u64) -> bool {
		if let Some(count) = self.count {
			if emitted >= count {
				return true;
			}
		}
		if let Some(deadline) = self.deadline {
			if Instant::now() >= deadline {
				return true;
			}
		}
		false
	}
}

/// Run the sampling loop until a limit is reached or a stop is requested.
///
/// Single logical actor: one query at a time, timed sleeps between
/// emissions. The stop flag and limits are polled before every emission,
/// including between events inside a burst, so a burst can be interrupted
/// mid-way.
pub async fn run<S: QuerySink>(
	sampler: &mut Sampler,
	sink: &S,
	ctx: &RunContext,
	stats: &mut RunStats,
	limits: RunLimits,
) {
	loop {
		if ctx.is_stop_requested() || limits.reached(stats.total()) {
			break;
		}
		match sampler.roll_burst() {
			Some(size) => {
				println!("BURST: {} queries", size);
				for _ in 0..size {
					if ctx.is_stop_requested() || limits.reached(stats.total()) {
						break;
					}
					emit_one(sampler, sink, stats).await;
					tokio::time::sleep(sampler.intra_burst_delay()).await;
				}
			}
			None => {
				emit_one(sampler, sink, stats).await;
			}
		}
		if ctx.is_stop_requested() {
			break;
		}
		tokio::time::sleep(sampler.next_delay()).await;
	}
}

/// Emit a single query and record the outcome. Failed attempts are
/// counted and never retried.
async fn emit_one<S: QuerySink>(sampler: &mut Sampler, sink: &S, stats: &mut RunStats) {
	let event = sampler.next_event();
	let success = sink.attempt(&event.domain, event.record_type).await;
	stats.record(event.category, success);

	if stats.total() % 100 == 0 {
		println!(
			"queries: {} ({:.1} q/s)",
			stats.total(),
			stats.queries_per_second(),
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::AtomicU64;

	use crate::event::RecordType;
	use crate::profile::preset;

	/// Sink that records attempts and optionally requests a stop after a
	/// fixed number of them.
	struct CountingSink {
		attempts: AtomicU64,
		stop_after: Option<(u64, RunContext)>,
	}

	impl CountingSink {
		fn new() -> Self {
			Self { attempts: AtomicU64::new(0), stop_after: None }
		}

		fn stopping_after(limit: u64, ctx: RunContext) -> Self {
			Self { attempts: AtomicU64::new(0), stop_after: Some((limit, ctx)) }
		}

		fn attempts(&self) -> u64 {
			self.attempts.load(Ordering::SeqCst)
		}
	}

	impl QuerySink for CountingSink {
		async fn attempt(&self, _domain: &str, _record_type: RecordType) -> bool {
			let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
			if let Some((limit, ctx)) = &self.stop_after {
				if n >= *limit {
					ctx.request_stop();
				}
			}
			true
		}
	}

	fn fast_profile() -> crate::profile::TrafficProfile {
		let mut profile = preset("mixed").unwrap();
		profile.interval = (0.001, 0.002);
		profile.burst_probability = 0.0;
		profile
	}

	#[tokio::test]
	async fn test_count_limit_exact() {
		let mut sampler = Sampler::new(fast_profile(), Some(11)).unwrap();
		let sink = CountingSink::new();
		let ctx = RunContext::new();
		let mut stats = RunStats::new();
		let limits = RunLimits { count: Some(7), deadline: None };

		run(&mut sampler, &sink, &ctx, &mut stats, limits).await;

		assert_eq!(stats.total(), 7);
		assert_eq!(sink.attempts(), 7);
	}

	#[tokio::test]
	async fn test_stop_interrupts_burst() {
		let mut profile = fast_profile();
		profile.burst_probability = 1.0;
		profile.burst_size = (100, 100);
		let mut sampler = Sampler::new(profile, Some(12)).unwrap();

		let ctx = RunContext::new();
		let sink = CountingSink::stopping_after(5, ctx.clone());
		let mut stats = RunStats::new();

		run(&mut sampler, &sink, &ctx, &mut stats, RunLimits::default()).await;

		// The stop lands during the 5th attempt; the burst must halt
		// well short of its 100 events.
		assert_eq!(stats.total(), 5);
		assert!(ctx.is_stop_requested());
	}

	#[tokio::test]
	async fn test_elapsed_deadline_stops_run() {
		let mut sampler = Sampler::new(fast_profile(), Some(13)).unwrap();
		let sink = CountingSink::new();
		let ctx = RunContext::new();
		let mut stats = RunStats::new();
		let limits = RunLimits { count: None, deadline: Some(Instant::now()) };

		run(&mut sampler, &sink, &ctx, &mut stats, limits).await;

		assert_eq!(stats.total(), 0);
	}

	#[tokio::test]
	async fn test_failures_are_counted_not_retried() {
		struct FailingSink;
		impl QuerySink for FailingSink {
			async fn attempt(&self, _domain: &str, _record_type: RecordType) -> bool {
				false
			}
		}

		let mut sampler = Sampler::new(fast_profile(), Some(14)).unwrap();
		let ctx = RunContext::new();
		let mut stats = RunStats::new();
		let limits = RunLimits { count: Some(5), deadline: None };

		run(&mut sampler, &FailingSink, &ctx, &mut stats, limits).await;

		assert_eq!(stats.total(), 5);
		assert_eq!(stats.failed(), 5);
	}
}
