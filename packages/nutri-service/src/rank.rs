use std::collections::HashSet;

use crate::{Result, normalize::Record, strategy::StrategyKind};

/// What one strategy produced. Failures are kept so the reducer can skip them and callers can
/// report them.
#[derive(Debug)]
pub struct StrategyOutcome {
	pub kind: StrategyKind,
	pub concept: Option<String>,
	pub result: Result<Vec<Record>>,
}
impl StrategyOutcome {
	pub fn record_count(&self) -> usize {
		self.result.as_ref().map_or(0, Vec::len)
	}
}

/// Pools successful outcomes in execution order, then deduplicates and truncates.
pub fn merge(outcomes: &[StrategyOutcome], limit: usize) -> Vec<Record> {
	let pooled = outcomes
		.iter()
		.filter_map(|outcome| outcome.result.as_ref().ok())
		.flat_map(|records| records.iter().cloned());

	deduplicate(pooled, limit)
}

/// Keeps the first record per identity key, up to `limit` records.
pub fn deduplicate<I>(records: I, limit: usize) -> Vec<Record>
where
	I: IntoIterator<Item = Record>,
{
	let mut seen = HashSet::new();
	let mut kept = Vec::new();

	for record in records {
		if kept.len() >= limit {
			break;
		}
		if seen.insert(record.key()) {
			kept.push(record);
		}
	}

	kept
}
