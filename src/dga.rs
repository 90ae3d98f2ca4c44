use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use sha2::{Digest, Sha256};

/// How elaborate synthesized names should look.
///
/// Derived profiles pick the tier from the dominant category; presets fix it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DgaComplexity {
	Low,
	Medium,
	High,
}

impl DgaComplexity {
	pub fn name(self) -> &'static str {
		match self {
			DgaComplexity::Low => "low",
			DgaComplexity::Medium => "medium",
			DgaComplexity::High => "high",
		}
	}
}

impl fmt::Display for DgaComplexity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// TLDs commonly seen on algorithmically generated infrastructure.
pub(crate) const TLDS: [&str; 10] = [
	"com", "net", "org", "xyz", "top", "info", "biz", "tk", "cc", "pw",
];

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxz";
const VOWELS: &[u8] = b"aeiou";
const ALNUM_LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ALNUM_MIXED: &[u8] =
	b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Synthesize one DGA-style domain at the requested complexity tier.
///
/// Every call produces a fresh independent name; nothing is memoized.
pub fn synthesize<R: Rng>(rng: &mut R, complexity: DgaComplexity) -> String {
	let label = match complexity {
		DgaComplexity::Low => low_label(rng),
		DgaComplexity::Medium => medium_label(rng),
		DgaComplexity::High => high_label(rng),
	};
	let tld = TLDS[rng.gen_range(0..TLDS.len())];
	format!("{}.{}", label, tld)
}

fn pick<R: Rng>(rng: &mut R, alphabet: &[u8]) -> char {
	alphabet[rng.gen_range(0..alphabet.len())] as char
}

/// Plain random lowercase label, 8-12 characters.
fn low_label<R: Rng>(rng: &mut R) -> String {
	let length = rng.gen_range(8..=12);
	(0..length).map(|_| pick(rng, LOWER)).collect()
}

/// Pronounceable consonant/vowel alternation, 10-16 characters, with a
/// numeric token spliced into the middle half the time.
fn medium_label<R: Rng>(rng: &mut R) -> String {
	let length = rng.gen_range(10..=16);
	let mut label: String = (0..length)
		.map(|i| {
			if i % 2 == 0 {
				pick(rng, CONSONANTS)
			} else {
				pick(rng, VOWELS)
			}
		})
		.collect();
	if rng.gen_bool(0.5) {
		let head = rng.gen_range(3..=6);
		let tail = rng.gen_range(6..=10);
		let token = rng.gen_range(0..1000u32);
		label = format!("{}{}{}", &label[..head], token, &label[tail..]);
	}
	label
}

/// One of four generation strategies, chosen uniformly per call.
fn high_label<R: Rng>(rng: &mut R) -> String {
	match rng.gen_range(0..4) {
		0 => {
			let length = rng.gen_range(10..=20);
			(0..length).map(|_| pick(rng, ALNUM_LOWER)).collect()
		}
		1 => digest_label(rng),
		2 => {
			let pairs = rng.gen_range(6..=10);
			let mut label = String::with_capacity(pairs * 2);
			for _ in 0..pairs {
				label.push(pick(rng, LOWER));
				label.push(pick(rng, DIGITS));
			}
			label
		}
		_ => {
			// Resembles lowercased base64-encoded data
			let length = rng.gen_range(12..=18);
			(0..length)
				.map(|_| pick(rng, ALNUM_MIXED).to_ascii_lowercase())
				.collect()
		}
	}
}

/// A 12-16 hex-character slice of a digest over the current timestamp.
fn digest_label<R: Rng>(rng: &mut R) -> String {
	let now = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default();
	let digest = Sha256::digest(now.as_nanos().to_string().as_bytes());
	let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
	let length = rng.gen_range(12..=16);
	hex[..length].to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	fn split(domain: &str) -> (&str, &str) {
		domain.rsplit_once('.').expect("generated name has no TLD")
	}

	#[test]
	fn test_low_shape() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			let domain = synthesize(&mut rng, DgaComplexity::Low);
			let (label, tld) = split(&domain);
			assert!(TLDS.contains(&tld), "unexpected TLD in {}", domain);
			assert!((8..=12).contains(&label.len()), "bad length: {}", domain);
			assert!(
				label.chars().all(|c| c.is_ascii_lowercase()),
				"non-alphabetic label: {}", domain,
			);
		}
	}

	#[test]
	fn test_medium_shape() {
		let mut rng = StdRng::seed_from_u64(8);
		for _ in 0..1000 {
			let domain = synthesize(&mut rng, DgaComplexity::Medium);
			let (label, tld) = split(&domain);
			assert!(TLDS.contains(&tld), "unexpected TLD in {}", domain);
			assert!(!label.is_empty());
			assert!(
				label.chars().all(|c| c.is_ascii_alphanumeric()),
				"non-alphanumeric label: {}", domain,
			);
		}
	}

	#[test]
	fn test_high_shape() {
		let mut rng = StdRng::seed_from_u64(9);
		for _ in 0..1000 {
			let domain = synthesize(&mut rng, DgaComplexity::High);
			let (label, tld) = split(&domain);
			assert!(TLDS.contains(&tld), "unexpected TLD in {}", domain);
			assert!(!label.is_empty());
			assert!(
				label.chars().all(|c| c.is_ascii_alphanumeric()),
				"non-alphanumeric label: {}", domain,
			);
		}
	}

	#[test]
	fn test_high_digest_strategy_bounds() {
		let mut rng = StdRng::seed_from_u64(10);
		for _ in 0..100 {
			let label = digest_label(&mut rng);
			assert!((12..=16).contains(&label.len()));
			assert!(label.chars().all(|c| c.is_ascii_hexdigit()));
		}
	}
}
