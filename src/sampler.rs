use std::time::Duration;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dga;
use crate::domains::{catalog, Category};
use crate::event::{QueryEvent, RecordType};
use crate::profile::{ConfigError, TrafficProfile};

/// Draws categories, domains, record types, and pacing delays from a
/// validated profile.
///
/// All randomness flows through one seedable RNG so runs are reproducible
/// under `--seed`. The sampler itself performs no I/O.
pub struct Sampler {
	profile: TrafficProfile,
	categories: WeightedIndex<f64>,
	record_types: WeightedIndex<f64>,
	rng: StdRng,
}

impl Sampler {
	/// Build a sampler, rejecting invalid profiles up front.
	pub fn new(profile: TrafficProfile, seed: Option<u64>) -> Result<Self, ConfigError> {
		profile.validate()?;
		let categories = WeightedIndex::new(profile.weights.iter().copied())
			.map_err(|_| ConfigError::EmptyWeights)?;
		let record_types =
			WeightedIndex::new(RecordType::WEIGHTED.iter().map(|(_, weight)| *weight))
				.map_err(|_| ConfigError::EmptyWeights)?;
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Ok(Self { profile, categories, record_types, rng })
	}

	/// Weighted draw over the profile's category weights.
	pub fn select_category(&mut self) -> Category {
		Category::ALL[self.categories.sample(&mut self.rng)]
	}

	/// Weighted draw over the fixed global record-type table.
	pub fn select_record_type(&mut self) -> RecordType {
		RecordType::WEIGHTED[self.record_types.sample(&mut self.rng)].0
	}

	fn select_domain(&mut self, category: Category) -> String {
		if category == Category::Dga {
			return dga::synthesize(&mut self.rng, self.profile.dga_complexity);
		}
		let pool = catalog(category);
		pool[self.rng.gen_range(0..pool.len())].to_string()
	}

	/// Sample the next query event: category, then domain, then record type.
	pub fn next_event(&mut self) -> QueryEvent {
		let category = self.select_category();
		let domain = self.select_domain(category);
		let record_type = self.select_record_type();
		QueryEvent { domain, record_type, category }
	}

	/// Inter-event delay, uniform over the profile's interval range.
	pub fn next_delay(&mut self) -> Duration {
		let (min, max) = self.profile.interval;
		Duration::from_secs_f64(self.rng.gen_range(min..=max))
	}

	/// Decide whether the next emission is a burst; returns the burst size
	/// when it is.
	pub fn roll_burst(&mut self) -> Option<u32> {
		if self.rng.gen::<f64>() < self.profile.burst_probability {
			let (min, max) = self.profile.burst_size;
			Some(self.rng.gen_range(min..=max))
		} else {
			None
		}
	}

	/// Spacing between events inside a burst.
	pub fn intra_burst_delay(&mut self) -> Duration {
		Duration::from_secs_f64(self.rng.gen_range(0.01..=0.05))
	}
}
