//! Pooled two-proportion z-test for conversion-rate comparison.

use serde::{Deserialize, Serialize};

use crate::distributions::normal_sf;

/// Computable outcome of a two-proportion z-test.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZTestOutcome {
    /// Positive when the variant rate exceeds the control rate.
    pub z: f64,
    pub p_value: f64,
    /// `(1 − p) × 100`, a display percentage.
    pub confidence: f64,
}

/// Compares two binomial conversion rates via the normal approximation.
///
/// Rates are percentages (0–100), matching how conversion is reported
/// upstream. Validity assumes independent observations and adequate expected
/// success counts in each arm; neither is checked at runtime.
///
/// Returns `None` when either arm has no exposure or the pooled standard
/// error is zero (both rates at 0% or both at 100%).
pub fn two_proportion_z_test(
    rate_a_pct: f64,
    n_a: u64,
    rate_b_pct: f64,
    n_b: u64,
) -> Option<ZTestOutcome> {
    if n_a == 0 || n_b == 0 {
        return None;
    }

    let p_a = rate_a_pct / 100.0;
    let p_b = rate_b_pct / 100.0;
    let na = n_a as f64;
    let nb = n_b as f64;

    let pooled = (p_a * na + p_b * nb) / (na + nb);
    let se = (pooled * (1.0 - pooled) * (1.0 / na + 1.0 / nb)).sqrt();
    if !se.is_finite() || se == 0.0 {
        return None;
    }

    let z = (p_b - p_a) / se;
    let p_value = (2.0 * normal_sf(z.abs())).clamp(0.0, 1.0);

    Some(ZTestOutcome {
        z,
        p_value,
        confidence: (1.0 - p_value) * 100.0,
    })
}
