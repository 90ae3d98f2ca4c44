use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::dga::DgaComplexity;
use crate::domains::Category;

/// Invalid or unrecognized profile parameters, surfaced before the
/// sampling loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("category weights must include at least one positive weight")]
	EmptyWeights,
	#[error("category weights must be finite and non-negative")]
	NegativeWeight,
	#[error("query interval must satisfy 0 < min <= max, got {min}..{max}")]
	InvalidInterval { min: f64, max: f64 },
	#[error("burst size range must satisfy 1 <= min <= max, got {min}..{max}")]
	InvalidBurstSize { min: u32, max: u32 },
	#[error("burst probability must be within [0, 1], got {0}")]
	InvalidBurstProbability(f64),
	#[error("unknown profile '{0}' (expected auto, enterprise, infected, developer, or mixed)")]
	UnknownProfile(String),
}

/// Complete traffic shape for one simulated client.
///
/// Immutable once produced. Weights are relative, need not sum to 1, and
/// may be fractional. The derivation metadata fields (`client_id`,
/// `dominant`, `secondary`, `suppressed`) are populated only by [`derive`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficProfile {
	pub name: String,
	/// Relative category weights in `Category::ALL` order.
	pub weights: [f64; 7],
	/// Inter-query delay bounds in seconds.
	pub interval: (f64, f64),
	pub burst_probability: f64,
	/// Inclusive burst size bounds.
	pub burst_size: (u32, u32),
	pub dga_complexity: DgaComplexity,
	pub client_id: Option<String>,
	pub dominant: Option<Category>,
	pub secondary: Option<Category>,
	pub suppressed: Vec<Category>,
}

impl TrafficProfile {
	pub fn weight(&self, category: Category) -> f64 {
		self.weights[category.index()]
	}

	/// Reject degenerate parameter combinations before a sampler is built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
			return Err(ConfigError::NegativeWeight);
		}
		if self.weights.iter().sum::<f64>() <= 0.0 {
			return Err(ConfigError::EmptyWeights);
		}
		let (min, max) = self.interval;
		if !(min > 0.0 && min <= max) {
			return Err(ConfigError::InvalidInterval { min, max });
		}
		if !(0.0..=1.0).contains(&self.burst_probability) {
			return Err(ConfigError::InvalidBurstProbability(self.burst_probability));
		}
		let (bmin, bmax) = self.burst_size;
		if bmin < 1 || bmin > bmax {
			return Err(ConfigError::InvalidBurstSize { min: bmin, max: bmax });
		}
		Ok(())
	}
}

fn static_profile(
	name: &str,
	weights: [f64; 7],
	interval: (f64, f64),
	burst_probability: f64,
	burst_size: (u32, u32),
	dga_complexity: DgaComplexity,
) -> TrafficProfile {
	TrafficProfile {
		name: name.to_string(),
		weights,
		interval,
		burst_probability,
		burst_size,
		dga_complexity,
		client_id: None,
		dominant: None,
		secondary: None,
		suppressed: Vec::new(),
	}
}

/// Look up a named preset profile.
///
/// Weights are listed in `Category::ALL` order:
/// normal, cdn, suspicious, dga, malware, ads, tracking.
pub fn preset(name: &str) -> Result<TrafficProfile, ConfigError> {
	match name {
		// Enterprise workstation: heavy normal traffic, some CDN
		"enterprise" => Ok(static_profile(
			"enterprise",
			[60.0, 25.0, 1.5, 0.3, 0.2, 8.0, 5.0],
			(0.1, 0.5),
			0.05,
			(5, 15),
			DgaComplexity::Low,
		)),
		// Infected workstation: high suspicious/DGA traffic, erratic pace
		"infected" => Ok(static_profile(
			"infected",
			[20.0, 5.0, 30.0, 35.0, 8.0, 1.0, 1.0],
			(0.05, 0.3),
			0.2,
			(10, 50),
			DgaComplexity::High,
		)),
		// Developer workstation: mixed with lots of variety
		"developer" => Ok(static_profile(
			"developer",
			[45.0, 30.0, 5.0, 3.0, 2.0, 5.0, 10.0],
			(0.2, 1.0),
			0.15,
			(3, 20),
			DgaComplexity::Medium,
		)),
		"mixed" => Ok(static_profile(
			"mixed",
			[40.0, 20.0, 15.0, 10.0, 5.0, 5.0, 5.0],
			(0.1, 0.8),
			0.1,
			(5, 25),
			DgaComplexity::Medium,
		)),
		other => Err(ConfigError::UnknownProfile(other.to_string())),
	}
}

/// Derive a deterministic traffic profile from a stable client identifier.
///
/// The SHA-256 digest of the identifier is consumed as fixed 16-bit
/// segments (each one 4-hex-character window of the hex digest): one per
/// category for base weights, then dedicated segments for the dominant
/// boost, secondary boost, suppression quota, pacing, and burst
/// probability. Identical identifiers yield bit-identical profiles across
/// runs and processes.
pub fn derive(client_id: &str) -> TrafficProfile {
	let digest = Sha256::digest(client_id.as_bytes());
	let seg = |i: usize| u32::from(u16::from_be_bytes([digest[2 * i], digest[2 * i + 1]]));

	// Base weight per category, in [1, 99]
	let mut base = [0u32; 7];
	for (k, slot) in base.iter_mut().enumerate() {
		*slot = (seg(k) % 100).max(1);
	}
	let mut weights: [f64; 7] = base.map(f64::from);

	// Dominant category: maximum base weight, first in order wins ties.
	// Boosted by [20, 50), never past 80.
	let mut dominant = 0;
	for k in 1..7 {
		if base[k] > base[dominant] {
			dominant = k;
		}
	}
	let boost = f64::from(20 + seg(7) % 30);
	weights[dominant] = (weights[dominant] + boost).min(80.0);

	// Secondary category: highest remaining weight, boosted by [10, 25),
	// never past 60.
	let mut secondary = usize::MAX;
	for k in 0..7 {
		if k == dominant {
			continue;
		}
		if secondary == usize::MAX || weights[k] > weights[secondary] {
			secondary = k;
		}
	}
	let boost = f64::from(10 + seg(8) % 15);
	weights[secondary] = (weights[secondary] + boost).min(60.0);

	// Quarter 1-2 of the remaining categories, gated per category on an
	// even digest byte. The gate can leave the quota unmet.
	let quota = (seg(9) % 2 + 1) as usize;
	let mut suppressed = Vec::new();
	for k in 0..7 {
		if k == dominant || k == secondary {
			continue;
		}
		if digest[20 + k] % 2 == 0 && suppressed.len() < quota {
			weights[k] = (weights[k] / 4.0).floor().max(1.0);
			suppressed.push(Category::ALL[k]);
		}
	}

	let pace = seg(10);
	let min_interval = 0.05 + f64::from(pace % 20) / 100.0;
	let max_interval = min_interval + 0.3 + f64::from(pace % 50) / 100.0;
	let burst_probability = 0.05 + f64::from(seg(11) % 20) / 100.0;

	let dga_complexity = match Category::ALL[dominant] {
		Category::Dga | Category::Malware | Category::Suspicious => DgaComplexity::High,
		Category::Normal | Category::Cdn => DgaComplexity::Low,
		_ => DgaComplexity::Medium,
	};

	TrafficProfile {
		name: "auto".to_string(),
		weights,
		interval: (min_interval, max_interval),
		burst_probability,
		burst_size: (5, 25),
		dga_complexity,
		client_id: Some(client_id.to_string()),
		dominant: Some(Category::ALL[dominant]),
		secondary: Some(Category::ALL[secondary]),
		suppressed,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_derive_deterministic() {
		let a = derive("192.168.1.1");
		let b = derive("192.168.1.1");
		assert_eq!(a, b);
	}

	#[test]
	fn test_derive_known_vector() {
		// Fixed vector for SHA-256("192.168.1.1")
		let profile = derive("192.168.1.1");
		assert_eq!(profile.weights, [60.0, 4.0, 12.0, 80.0, 63.0, 12.0, 64.0]);
		assert_eq!(profile.dominant, Some(Category::Dga));
		assert_eq!(profile.secondary, Some(Category::Normal));
		assert_eq!(profile.suppressed, vec![Category::Cdn, Category::Suspicious]);
		assert!((profile.interval.0 - 0.13).abs() < 1e-9);
		assert!((profile.interval.1 - 0.51).abs() < 1e-9);
		assert!((profile.burst_probability - 0.24).abs() < 1e-9);
		assert_eq!(profile.dga_complexity, DgaComplexity::High);
		assert_eq!(profile.burst_size, (5, 25));
		assert_eq!(profile.client_id.as_deref(), Some("192.168.1.1"));
	}

	#[test]
	fn test_derive_invariants() {
		for host in 1..=12 {
			let id = format!("192.168.1.{}", host);
			let profile = derive(&id);
			let dominant = profile.dominant.expect("derived profile has a dominant");
			let secondary = profile.secondary.expect("derived profile has a secondary");

			let max = profile.weights.iter().cloned().fold(f64::MIN, f64::max);
			assert_eq!(profile.weight(dominant), max, "dominant not max for {}", id);
			assert!(profile.weight(dominant) <= 80.0, "dominant over cap for {}", id);
			assert!(profile.weight(secondary) <= 60.0, "secondary over cap for {}", id);

			assert!(
				(1..=2).contains(&profile.suppressed.len()),
				"suppression count out of range for {}", id,
			);
			assert!(!profile.suppressed.contains(&dominant));
			assert!(!profile.suppressed.contains(&secondary));

			assert!(profile.validate().is_ok(), "derived profile invalid for {}", id);
			assert!(profile.interval.0 >= 0.05 && profile.interval.0 < 0.25);
			assert!(profile.interval.1 > profile.interval.0);
			assert!(profile.burst_probability >= 0.05 && profile.burst_probability < 0.25);
		}
	}

	#[test]
	fn test_preset_enterprise_exact() {
		let p = preset("enterprise").unwrap();
		assert_eq!(p.weight(Category::Normal), 60.0);
		assert_eq!(p.weight(Category::Cdn), 25.0);
		assert_eq!(p.weight(Category::Ads), 8.0);
		assert_eq!(p.weight(Category::Tracking), 5.0);
		assert_eq!(p.weight(Category::Suspicious), 1.5);
		assert_eq!(p.weight(Category::Dga), 0.3);
		assert_eq!(p.weight(Category::Malware), 0.2);
		assert_eq!(p.interval, (0.1, 0.5));
		assert_eq!(p.burst_probability, 0.05);
		assert_eq!(p.burst_size, (5, 15));
		assert_eq!(p.dga_complexity, DgaComplexity::Low);
	}

	#[test]
	fn test_preset_infected_exact() {
		let p = preset("infected").unwrap();
		assert_eq!(p.weights, [20.0, 5.0, 30.0, 35.0, 8.0, 1.0, 1.0]);
		assert_eq!(p.interval, (0.05, 0.3));
		assert_eq!(p.burst_probability, 0.2);
		assert_eq!(p.burst_size, (10, 50));
		assert_eq!(p.dga_complexity, DgaComplexity::High);
	}

	#[test]
	fn test_preset_developer_exact() {
		let p = preset("developer").unwrap();
		assert_eq!(p.weights, [45.0, 30.0, 5.0, 3.0, 2.0, 5.0, 10.0]);
		assert_eq!(p.interval, (0.2, 1.0));
		assert_eq!(p.burst_probability, 0.15);
		assert_eq!(p.burst_size, (3, 20));
		assert_eq!(p.dga_complexity, DgaComplexity::Medium);
	}

	#[test]
	fn test_preset_mixed_exact() {
		let p = preset("mixed").unwrap();
		assert_eq!(p.weights, [40.0, 20.0, 15.0, 10.0, 5.0, 5.0, 5.0]);
		assert_eq!(p.interval, (0.1, 0.8));
		assert_eq!(p.burst_probability, 0.1);
		assert_eq!(p.burst_size, (5, 25));
		assert_eq!(p.dga_complexity, DgaComplexity::Medium);
	}

	#[test]
	fn test_preset_unknown() {
		let err = preset("stealth").unwrap_err();
		assert!(matches!(err, ConfigError::UnknownProfile(_)));
	}

	#[test]
	fn test_presets_validate() {
		for name in ["enterprise", "infected", "developer", "mixed"] {
			assert!(preset(name).unwrap().validate().is_ok(), "invalid preset {}", name);
		}
	}

	#[test]
	fn test_validate_rejects_zero_weights() {
		let mut p = preset("mixed").unwrap();
		p.weights = [0.0; 7];
		assert!(matches!(p.validate(), Err(ConfigError::EmptyWeights)));
	}

	#[test]
	fn test_validate_rejects_negative_weight() {
		let mut p = preset("mixed").unwrap();
		p.weights[0] = -1.0;
		assert!(matches!(p.validate(), Err(ConfigError::NegativeWeight)));
	}

	#[test]
	fn test_validate_rejects_bad_interval() {
		let mut p = preset("mixed").unwrap();
		p.interval = (0.0, 0.5);
		assert!(matches!(p.validate(), Err(ConfigError::InvalidInterval { .. })));
		p.interval = (0.8, 0.2);
		assert!(matches!(p.validate(), Err(ConfigError::InvalidInterval { .. })));
	}

	#[test]
	fn test_validate_rejects_bad_burst() {
		let mut p = preset("mixed").unwrap();
		p.burst_size = (0, 10);
		assert!(matches!(p.validate(), Err(ConfigError::InvalidBurstSize { .. })));
		p.burst_size = (20, 10);
		assert!(matches!(p.validate(), Err(ConfigError::InvalidBurstSize { .. })));
	}

	#[test]
	fn test_validate_rejects_bad_burst_probability() {
		let mut p = preset("mixed").unwrap();
		p.burst_probability = 1.5;
		assert!(matches!(p.validate(), Err(ConfigError::InvalidBurstProbability(_))));
	}
}
