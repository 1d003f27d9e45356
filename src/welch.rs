//! Welch's t-test for unequal-variance mean comparison.
//!
//! Used for ARPU (all-users summaries) and AOV (purchasers-only summaries).
//! Works on `{n, mean, stddev}` snapshots so callers can test any pair of
//! summaries without re-touching the raw observations.

use serde::{Deserialize, Serialize};

use crate::distributions::students_t_two_tailed_p;
use crate::summary::GroupSummary;

/// Computable outcome of a Welch two-sample test.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TTestOutcome {
    /// Positive when the variant mean exceeds the control mean.
    pub t: f64,
    /// Welch–Satterthwaite degrees of freedom, generally non-integer.
    pub df: f64,
    pub p_value: f64,
    /// `(1 − p) × 100`, a display percentage.
    pub confidence: f64,
}

/// Two-sample unequal-variance mean comparison.
///
/// Sign convention: `t = (variant.mean − control.mean) / se`, so a positive
/// statistic means the variant outperforms control. Display layers must keep
/// that direction.
///
/// Returns `None` when the result is indeterminate: fewer than 2 observations
/// in either arm, or a pooled standard error of exactly zero (identical
/// zero-variance arms).
pub fn welch_t_test(control: &GroupSummary, variant: &GroupSummary) -> Option<TTestOutcome> {
    if control.n < 2 || variant.n < 2 {
        return None;
    }

    let var_per_n_c = control.stddev.powi(2) / control.n as f64;
    let var_per_n_v = variant.stddev.powi(2) / variant.n as f64;

    let se = (var_per_n_c + var_per_n_v).sqrt();
    if se == 0.0 || !se.is_finite() {
        return None;
    }

    let t = (variant.mean - control.mean) / se;

    // Welch–Satterthwaite degrees of freedom
    let df_denom = var_per_n_c.powi(2) / (control.n - 1) as f64
        + var_per_n_v.powi(2) / (variant.n - 1) as f64;
    if df_denom <= 0.0 || !df_denom.is_finite() {
        return None;
    }
    let df = (var_per_n_c + var_per_n_v).powi(2) / df_denom;

    let p_value = students_t_two_tailed_p(t, df)?;

    Some(TTestOutcome {
        t,
        df,
        p_value,
        confidence: (1.0 - p_value) * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(n: u64, mean: f64, stddev: f64) -> GroupSummary {
        GroupSummary { n, mean, stddev }
    }

    #[test]
    fn positive_t_when_variant_outperforms_control() {
        let out = welch_t_test(&summary(50, 10.0, 2.0), &summary(60, 11.0, 2.5)).unwrap();
        assert!(out.t > 0.0, "t={}", out.t);
    }

    #[test]
    fn matches_hand_computed_statistic_and_df() {
        // se = sqrt(4/50 + 6.25/60) = 0.429147, t = 1/se = 2.330203
        let out = welch_t_test(&summary(50, 10.0, 2.0), &summary(60, 11.0, 2.5)).unwrap();
        assert!((out.t - 2.330203).abs() < 1e-4, "t={}", out.t);
        assert!((out.df - 107.83).abs() < 0.05, "df={}", out.df);
        assert!(out.p_value > 0.015 && out.p_value < 0.03, "p={}", out.p_value);
    }

    #[test]
    fn p_value_matches_t_critical_at_df_10() {
        // Equal n and sd gives df = 10 exactly for n = 6 per arm; a mean
        // difference of t_{0.975,10} * se puts the two-tailed p at 0.05.
        let se = (2.0_f64 / 6.0).sqrt();
        let diff = 2.228139 * se;
        let out = welch_t_test(&summary(6, 0.0, 1.0), &summary(6, diff, 1.0)).unwrap();
        assert!((out.df - 10.0).abs() < 1e-6, "df={}", out.df);
        assert!((out.p_value - 0.05).abs() < 5e-4, "p={}", out.p_value);
        assert!((out.confidence - 95.0).abs() < 0.05, "conf={}", out.confidence);
    }

    #[test]
    fn swapping_arms_negates_t_and_preserves_p_and_df() {
        let a = summary(40, 8.0, 3.0);
        let b = summary(55, 9.5, 4.0);
        let fwd = welch_t_test(&a, &b).unwrap();
        let rev = welch_t_test(&b, &a).unwrap();
        assert!((fwd.t + rev.t).abs() < 1e-12, "t={} vs {}", fwd.t, rev.t);
        assert!((fwd.df - rev.df).abs() < 1e-12);
        assert!((fwd.p_value - rev.p_value).abs() < 1e-12);
    }

    #[test]
    fn p_value_stays_in_unit_interval() {
        let out = welch_t_test(&summary(3, 0.0, 1.0), &summary(3, 100.0, 1.0)).unwrap();
        assert!(out.p_value >= 0.0 && out.p_value <= 1.0, "p={}", out.p_value);
        assert!(out.p_value < 1e-3, "p={}", out.p_value);
    }

    #[test]
    fn indeterminate_when_either_arm_below_two() {
        assert!(welch_t_test(&summary(1, 5.0, 0.0), &summary(10, 6.0, 1.0)).is_none());
        assert!(welch_t_test(&summary(10, 5.0, 1.0), &summary(0, 6.0, 1.0)).is_none());
    }

    #[test]
    fn indeterminate_for_identical_zero_variance_arms() {
        // n = 2, both arms constant at 5: pooled standard error is zero.
        assert!(welch_t_test(&summary(2, 5.0, 0.0), &summary(2, 5.0, 0.0)).is_none());
    }
}
