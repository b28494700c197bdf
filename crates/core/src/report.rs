//! Per-category tallies of what a run stripped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::Category;

/// Number of constructs stripped per category. Categories with no hits are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementCounts(BTreeMap<Category, usize>);

impl ElementCounts {
	pub fn get(&self, category: Category) -> usize {
		self.0.get(&category).copied().unwrap_or(0)
	}

	pub fn total(&self) -> usize {
		self.0.values().sum()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Non-zero counts in pipeline order.
	pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
		self.0.iter().map(|(category, count)| (*category, *count))
	}

	pub(crate) fn record(&mut self, category: Category, count: usize) {
		if count > 0 {
			*self.0.entry(category).or_default() += count;
		}
	}
}

/// Output of [`crate::clean_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
	pub text: String,
	pub removed: ElementCounts,
}
