//! Prospective sample-size and duration planning.
//!
//! Two-proportion power analysis gives the per-variant sample requirement for
//! a baseline conversion rate and a relative minimum detectable effect; the
//! observed traffic rate turns that into a calendar projection. A readiness
//! gate combines the sample requirement with a minimum-days floor so that
//! weekday/weekend cycles are covered before anyone reads the results.

use serde::{Deserialize, Serialize};

use crate::distributions::z_from_p;

/// Two-sided significance level used when the caller has no opinion.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Default power (1 − β).
pub const DEFAULT_POWER: f64 = 0.80;
/// Floor on experiment duration, independent of sample size.
pub const DEFAULT_MINIMUM_DAYS: u32 = 14;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Per-variant sample requirement from the power analysis.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SampleSizeEstimate {
    pub per_variant: u64,
    pub total: u64,
}

/// Calendar projection from the observed traffic rate.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DurationProjection {
    /// Total days of traffic needed to reach the required sample, from day 0.
    pub days_needed: u64,
    /// Days still to go beyond what has already elapsed.
    pub additional_days: u64,
}

/// Combined sample-size and duration recommendation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SampleSizePlan {
    pub required_per_variant: u64,
    pub required_total: u64,
    pub days_needed: u64,
    pub additional_days_needed: u64,
}

/// Whether an experiment has collected enough data to be read.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessGate {
    pub minimum_n_reached: bool,
    pub minimum_days_reached: bool,
    pub ready_to_read: bool,
}

impl ReadinessGate {
    pub fn new(
        control_n: u64,
        variant_n: u64,
        required_per_variant: u64,
        elapsed_days: f64,
        minimum_days: u32,
    ) -> Self {
        let minimum_n_reached =
            control_n >= required_per_variant && variant_n >= required_per_variant;
        let minimum_days_reached = elapsed_days >= minimum_days as f64;
        Self {
            minimum_n_reached,
            minimum_days_reached,
            ready_to_read: minimum_n_reached && minimum_days_reached,
        }
    }
}

/// Two-proportion power analysis for the per-variant sample requirement.
///
/// `baseline_rate` is a proportion in (0, 1); `relative_mde` is the smallest
/// relative lift worth detecting (0.10 = 10%). With `p1 = baseline` and
/// `p2 = baseline · (1 + mde)`:
///
/// `n = ceil((z_{α/2}·sqrt(2·p̄(1−p̄)) + z_β·sqrt(p1q1 + p2q2))² / (p2−p1)²)`
///
/// Returns `None` when the requirement is indeterminate: zero MDE or zero
/// baseline (p2 = p1 divides by zero), a shifted rate outside (0, 1), or
/// alpha/power at a boundary where the z-quantile is infinite.
pub fn required_sample_size(
    baseline_rate: f64,
    relative_mde: f64,
    alpha: f64,
    power: f64,
) -> Option<SampleSizeEstimate> {
    if !(baseline_rate > 0.0 && baseline_rate < 1.0) {
        return None;
    }
    let p1 = baseline_rate;
    let p2 = baseline_rate * (1.0 + relative_mde);
    if !(p2 > 0.0 && p2 < 1.0) {
        return None;
    }
    let delta = (p2 - p1).abs();
    if delta == 0.0 {
        return None;
    }

    let z_alpha = z_from_p(1.0 - alpha / 2.0);
    let z_power = z_from_p(power);
    if !z_alpha.is_finite() || !z_power.is_finite() {
        return None;
    }

    let p_bar = (p1 + p2) / 2.0;
    let numerator = z_alpha * (2.0 * p_bar * (1.0 - p_bar)).sqrt()
        + z_power * (p1 * (1.0 - p1) + p2 * (1.0 - p2)).sqrt();
    let ratio = numerator.powi(2) / delta.powi(2);
    if !ratio.is_finite() {
        return None;
    }
    // A requirement past u64 range saturates the cast; no experiment can
    // collect that, so the doubled total folds it into the indeterminate case.
    let per_variant = ratio.ceil() as u64;
    let total = per_variant.checked_mul(2)?;

    Some(SampleSizeEstimate { per_variant, total })
}

/// Projects how long reaching `required_total` visitors will take at the
/// traffic rate observed so far.
///
/// Returns `None` when no rate can be derived: `days_elapsed` non-positive or
/// zero visitors per day. That division-by-zero case is an indeterminate
/// outcome, not an error.
pub fn projected_duration(
    required_total: u64,
    current_total: u64,
    days_elapsed: f64,
) -> Option<DurationProjection> {
    if !days_elapsed.is_finite() || days_elapsed <= 0.0 {
        return None;
    }
    let visitors_per_day = current_total as f64 / days_elapsed;
    if visitors_per_day <= 0.0 {
        return None;
    }

    let days_needed = (required_total as f64 / visitors_per_day).ceil() as u64;
    let additional_days = (days_needed as f64 - days_elapsed).max(0.0).ceil() as u64;

    Some(DurationProjection {
        days_needed,
        additional_days,
    })
}

/// Full plan: power analysis plus calendar projection at the observed
/// traffic rate. `None` whenever either half is indeterminate.
pub fn plan(
    baseline_rate: f64,
    relative_mde: f64,
    alpha: f64,
    power: f64,
    current_visitors: u64,
    days_elapsed: f64,
) -> Option<SampleSizePlan> {
    let estimate = required_sample_size(baseline_rate, relative_mde, alpha, power)?;
    let projection = projected_duration(estimate.total, current_visitors, days_elapsed)?;
    Some(SampleSizePlan {
        required_per_variant: estimate.per_variant,
        required_total: estimate.total,
        days_needed: projection.days_needed,
        additional_days_needed: projection.additional_days,
    })
}

/// Single duration recommendation: the sample-size projection, floored at
/// `minimum_days`.
pub fn recommended_days(projection: &DurationProjection, minimum_days: u32) -> u64 {
    projection.days_needed.max(minimum_days as u64)
}

/// Elapsed days between an epoch-milliseconds start timestamp and now.
pub fn elapsed_days(started_at_ms: i64) -> f64 {
    elapsed_days_between(started_at_ms, chrono::Utc::now().timestamp_millis())
}

/// Elapsed days between two epoch-milliseconds timestamps.
pub fn elapsed_days_between(started_at_ms: i64, now_ms: i64) -> f64 {
    (now_ms - started_at_ms) as f64 / MS_PER_DAY
}
