//! Per-arm summary statistics for revenue experiments.
//!
//! An arm is described by its total exposed count and the revenue values of
//! the users who purchased; everyone else contributed 0. Two views are
//! derived: "all users" (zero-filled, feeds ARPU) and "purchasers only"
//! (feeds AOV). Both use the Bessel-corrected sample standard deviation,
//! defined as 0 below two observations.

use serde::{Deserialize, Serialize};

use crate::error::UpliftError;

/// Raw observations for one arm of an experiment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueGroup {
    /// Total users exposed to this arm, including non-purchasers.
    pub exposed: u64,
    /// Revenue per purchasing user. Length is the purchaser count.
    pub purchaser_revenues: Vec<f64>,
}

/// Immutable `{n, mean, stddev}` snapshot of one view of an arm.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub n: u64,
    pub mean: f64,
    pub stddev: f64,
}

/// Both views of an arm, computed once per analysis.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummaries {
    pub all_users: GroupSummary,
    pub purchasers: GroupSummary,
}

impl RevenueGroup {
    pub fn new(exposed: u64, purchaser_revenues: Vec<f64>) -> Result<Self, UpliftError> {
        let group = Self {
            exposed,
            purchaser_revenues,
        };
        group.validate()?;
        Ok(group)
    }

    pub fn validate(&self) -> Result<(), UpliftError> {
        if self.exposed == 0 {
            return Err(UpliftError::InvalidGroup(
                "exposed count must be at least 1".to_string(),
            ));
        }
        if self.purchaser_revenues.len() as u64 > self.exposed {
            return Err(UpliftError::InvalidGroup(format!(
                "purchaser count {} exceeds exposed count {}",
                self.purchaser_revenues.len(),
                self.exposed
            )));
        }
        for &r in &self.purchaser_revenues {
            if !r.is_finite() || r < 0.0 {
                return Err(UpliftError::InvalidRevenue(format!("{}", r)));
            }
        }
        Ok(())
    }

    pub fn purchaser_count(&self) -> u64 {
        self.purchaser_revenues.len() as u64
    }

    pub fn total_revenue(&self) -> f64 {
        self.purchaser_revenues.iter().sum()
    }

    /// Purchasers over exposed, as a percentage 0–100.
    pub fn conversion_rate_pct(&self) -> f64 {
        self.purchaser_count() as f64 / self.exposed as f64 * 100.0
    }

    pub fn summaries(&self) -> GroupSummaries {
        GroupSummaries {
            all_users: summarize_all_users(self),
            purchasers: summarize_purchasers(&self.purchaser_revenues),
        }
    }
}

/// Summary over all exposed users, with non-purchasers contributing 0.
///
/// Equivalent to summarizing the purchaser revenues padded with
/// `exposed − purchasers` zeros, without materializing that array. The caller
/// validates `exposed >= 1` beforehand, so the mean is total.
pub fn summarize_all_users(group: &RevenueGroup) -> GroupSummary {
    let n = group.exposed;
    let k = group.purchaser_revenues.len() as u64;
    let mean = group.total_revenue() / n as f64;

    let stddev = if n < 2 {
        0.0
    } else {
        // Padded zeros each deviate from the mean by exactly -mean.
        let purchaser_ss: f64 = group
            .purchaser_revenues
            .iter()
            .map(|&r| (r - mean).powi(2))
            .sum();
        let zero_ss = n.saturating_sub(k) as f64 * mean.powi(2);
        ((purchaser_ss + zero_ss) / (n - 1) as f64).sqrt()
    };

    GroupSummary { n, mean, stddev }
}

/// Summary over the purchasing users alone. `{0, 0.0, 0.0}` when empty.
pub fn summarize_purchasers(revenues: &[f64]) -> GroupSummary {
    let n = revenues.len() as u64;
    if n == 0 {
        return GroupSummary {
            n: 0,
            mean: 0.0,
            stddev: 0.0,
        };
    }

    let mean = revenues.iter().sum::<f64>() / n as f64;
    let stddev = if n < 2 {
        0.0
    } else {
        let ss: f64 = revenues.iter().map(|&r| (r - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    GroupSummary { n, mean, stddev }
}
