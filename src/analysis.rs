//! End-to-end readout for a two-arm revenue experiment.
//!
//! Takes raw per-arm observations, derives both summary views, runs the three
//! comparisons (conversion rate, ARPU, AOV), and attaches lift percentages
//! and a winner. A comparison whose test is indeterminate carries no outcome
//! and never names a winner.

use serde::{Deserialize, Serialize};

use crate::error::UpliftError;
use crate::proportion::{two_proportion_z_test, ZTestOutcome};
use crate::summary::{GroupSummaries, GroupSummary, RevenueGroup};
use crate::welch::{welch_t_test, TTestOutcome};

/// Which arm a significant comparison favors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    Control,
    Variant,
}

/// Derived metrics for one arm.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArmSnapshot {
    pub exposed: u64,
    pub purchasers: u64,
    pub total_revenue: f64,
    pub conversion_rate_pct: f64,
    pub summaries: GroupSummaries,
}

/// Welch comparison of one revenue metric (ARPU or AOV) across arms.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueComparison {
    pub control: GroupSummary,
    pub variant: GroupSummary,
    /// Relative lift of the variant mean over control, as a percentage.
    /// `None` when the control mean is zero.
    pub lift_pct: Option<f64>,
    /// `None` means the test was indeterminate (not enough data).
    pub outcome: Option<TTestOutcome>,
    pub significant: bool,
    pub winner: Option<Arm>,
}

/// Z-test comparison of conversion rates across arms.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionComparison {
    pub control_rate_pct: f64,
    pub variant_rate_pct: f64,
    pub lift_pct: Option<f64>,
    pub outcome: Option<ZTestOutcome>,
    pub significant: bool,
    pub winner: Option<Arm>,
}

/// Everything a display layer needs for one experiment readout.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentReadout {
    pub control: ArmSnapshot,
    pub variant: ArmSnapshot,
    pub conversion: ConversionComparison,
    pub arpu: RevenueComparison,
    pub aov: RevenueComparison,
}

/// Runs the full pipeline over two validated arms at significance `alpha`.
///
/// ARPU compares the all-users summaries (non-purchasers as 0); AOV compares
/// the purchasers-only summaries and is indeterminate unless both arms have
/// at least two purchasers. Conversion compares purchasers/exposed via the
/// pooled z-test.
pub fn analyze(
    control: &RevenueGroup,
    variant: &RevenueGroup,
    alpha: f64,
) -> Result<ExperimentReadout, UpliftError> {
    control.validate()?;
    variant.validate()?;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(UpliftError::InvalidRate(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }

    let control_snap = snapshot(control);
    let variant_snap = snapshot(variant);

    let conversion = compare_conversion(&control_snap, &variant_snap, alpha);
    let arpu = compare_revenue(
        control_snap.summaries.all_users,
        variant_snap.summaries.all_users,
        alpha,
    );
    let aov = compare_revenue(
        control_snap.summaries.purchasers,
        variant_snap.summaries.purchasers,
        alpha,
    );

    tracing::debug!(
        conversion_p = conversion.outcome.map(|o| o.p_value),
        arpu_p = arpu.outcome.map(|o| o.p_value),
        aov_p = aov.outcome.map(|o| o.p_value),
        "experiment readout computed"
    );

    Ok(ExperimentReadout {
        control: control_snap,
        variant: variant_snap,
        conversion,
        arpu,
        aov,
    })
}

fn snapshot(group: &RevenueGroup) -> ArmSnapshot {
    ArmSnapshot {
        exposed: group.exposed,
        purchasers: group.purchaser_count(),
        total_revenue: group.total_revenue(),
        conversion_rate_pct: group.conversion_rate_pct(),
        summaries: group.summaries(),
    }
}

fn compare_revenue(control: GroupSummary, variant: GroupSummary, alpha: f64) -> RevenueComparison {
    let outcome = welch_t_test(&control, &variant);
    let (significant, winner) = verdict(
        outcome.map(|o| o.p_value),
        control.mean,
        variant.mean,
        alpha,
    );
    RevenueComparison {
        lift_pct: relative_lift_pct(control.mean, variant.mean),
        control,
        variant,
        outcome,
        significant,
        winner,
    }
}

fn compare_conversion(
    control: &ArmSnapshot,
    variant: &ArmSnapshot,
    alpha: f64,
) -> ConversionComparison {
    let outcome = two_proportion_z_test(
        control.conversion_rate_pct,
        control.exposed,
        variant.conversion_rate_pct,
        variant.exposed,
    );
    let (significant, winner) = verdict(
        outcome.map(|o| o.p_value),
        control.conversion_rate_pct,
        variant.conversion_rate_pct,
        alpha,
    );
    ConversionComparison {
        control_rate_pct: control.conversion_rate_pct,
        variant_rate_pct: variant.conversion_rate_pct,
        lift_pct: relative_lift_pct(control.conversion_rate_pct, variant.conversion_rate_pct),
        outcome,
        significant,
        winner,
    }
}

/// Relative lift of the variant over control, as a percentage.
/// `None` when the control value is zero (the ratio is undefined).
fn relative_lift_pct(control: f64, variant: f64) -> Option<f64> {
    if control == 0.0 {
        None
    } else {
        Some((variant - control) / control * 100.0)
    }
}

fn verdict(
    p_value: Option<f64>,
    control_metric: f64,
    variant_metric: f64,
    alpha: f64,
) -> (bool, Option<Arm>) {
    let significant = p_value.is_some_and(|p| p < alpha);
    let winner = if significant {
        if variant_metric > control_metric {
            Some(Arm::Variant)
        } else {
            Some(Arm::Control)
        }
    } else {
        None
    };
    (significant, winner)
}
