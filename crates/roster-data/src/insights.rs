use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate figures over all members
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub total: u64,
    /// Number of members per mode of payment
    pub distribution: BTreeMap<String, u64>,
    /// Mode with the highest count. Ties go to the
    /// lexicographically smallest mode.
    pub most_common: Option<String>,
}

impl Insights {
    /// Fold the payment modes of all members
    pub fn from_modes<I, S>(modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut total = 0;
        let mut distribution: BTreeMap<String, u64> = BTreeMap::new();
        for mode in modes {
            total += 1;
            *distribution.entry(mode.into()).or_default() += 1;
        }

        // Iteration is ordered by key, so the first maximum wins
        let mut most_common: Option<(&String, u64)> = None;
        for (mode, count) in &distribution {
            match most_common {
                Some((_, best)) if best >= *count => {}
                _ => most_common = Some((mode, *count)),
            }
        }
        let most_common = most_common.map(|(mode, _)| mode.clone());

        Self {
            total,
            distribution,
            most_common,
        }
    }
}
