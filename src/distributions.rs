//! Distribution evaluation shared by the hypothesis tests and the planner.
//!
//! Thin wrappers over `statrs`. The normal CDF and quantile feed the
//! two-proportion z-test and the sample-size formula; the Student-t survival
//! function (continuous, non-integer df) feeds Welch's t-test. Tail accuracy
//! matters for p-values near the significance threshold, so these come from a
//! vetted library rather than a rational approximation.

use once_cell::sync::Lazy;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

static STANDARD_NORMAL: Lazy<Normal> =
    Lazy::new(|| Normal::new(0.0, 1.0).expect("standard normal parameters are finite"));

/// Computes P(Z > z) for the standard normal distribution.
pub fn normal_sf(z: f64) -> f64 {
    1.0 - STANDARD_NORMAL.cdf(z)
}

/// Inverse normal CDF. Returns z such that P(Z < z) = p.
/// Boundary inputs map to ±infinity; callers guard on finiteness.
pub fn z_from_p(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    STANDARD_NORMAL.inverse_cdf(p)
}

/// Two-tailed p-value for Student's t-distribution with `df` degrees of
/// freedom. `df` is generally non-integer (Welch–Satterthwaite).
/// Returns `None` for non-positive or non-finite `df`.
pub fn students_t_two_tailed_p(t: f64, df: f64) -> Option<f64> {
    if !df.is_finite() || df <= 0.0 {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_sf_at_z196_is_approximately_0025() {
        let sf = normal_sf(1.96);
        assert!((sf - 0.025).abs() < 0.0005, "sf={}", sf);
    }

    #[test]
    fn normal_sf_at_z0_is_0_5() {
        let sf = normal_sf(0.0);
        assert!((sf - 0.5).abs() < 1e-9, "sf={}", sf);
    }

    #[test]
    fn normal_sf_at_z329_gives_p_value_0001() {
        let sf = normal_sf(3.291);
        assert!((sf - 0.0005).abs() < 0.0001, "sf={}", sf);
    }

    #[test]
    fn z_from_p_recovers_two_sided_critical_value() {
        let z = z_from_p(0.975);
        assert!((z - 1.959964).abs() < 1e-5, "z={}", z);
    }

    #[test]
    fn z_from_p_recovers_power_quantile() {
        let z = z_from_p(0.80);
        assert!((z - 0.841621).abs() < 1e-5, "z={}", z);
    }

    #[test]
    fn z_from_p_boundaries_are_infinite() {
        assert!(z_from_p(0.0).is_infinite());
        assert!(z_from_p(1.0).is_infinite());
    }

    #[test]
    fn students_t_matches_critical_value_at_df_10() {
        // t_{0.975, 10} = 2.228139, so the two-tailed p there is 0.05.
        let p = students_t_two_tailed_p(2.228139, 10.0).unwrap();
        assert!((p - 0.05).abs() < 5e-4, "p={}", p);
    }

    #[test]
    fn students_t_approaches_normal_at_large_df() {
        let p_t = students_t_two_tailed_p(1.96, 100_000.0).unwrap();
        let p_z = 2.0 * normal_sf(1.96);
        assert!((p_t - p_z).abs() < 1e-4, "p_t={} p_z={}", p_t, p_z);
    }

    #[test]
    fn students_t_rejects_non_positive_df() {
        assert!(students_t_two_tailed_p(1.0, 0.0).is_none());
        assert!(students_t_two_tailed_p(1.0, -3.0).is_none());
        assert!(students_t_two_tailed_p(1.0, f64::NAN).is_none());
    }
}
