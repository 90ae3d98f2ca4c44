use std::fmt;

use crate::domains::Category;

/// DNS record type requested for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
	A,
	Aaaa,
	Mx,
	Txt,
	Cname,
	Ns,
}

impl RecordType {
	/// Fixed global selection weights, independent of category.
	pub const WEIGHTED: [(RecordType, f64); 6] = [
		(RecordType::A, 70.0),
		(RecordType::Aaaa, 15.0),
		(RecordType::Mx, 5.0),
		(RecordType::Txt, 5.0),
		(RecordType::Cname, 3.0),
		(RecordType::Ns, 2.0),
	];

	pub fn name(self) -> &'static str {
		match self {
			RecordType::A => "A",
			RecordType::Aaaa => "AAAA",
			RecordType::Mx => "MX",
			RecordType::Txt => "TXT",
			RecordType::Cname => "CNAME",
			RecordType::Ns => "NS",
		}
	}
}

impl fmt::Display for RecordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One sampled query, consumed immediately by the sink and the stats
/// accumulator.
#[derive(Debug, Clone)]
pub struct QueryEvent {
	pub domain: String,
	pub record_type: RecordType,
	pub category: Category,
}
