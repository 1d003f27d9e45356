//! Statistical inference for two-arm e-commerce A/B tests.
//!
//! Everything is a pure function over plain numbers: raw per-user
//! observations reduce to `{n, mean, stddev}` summaries, summaries feed the
//! hypothesis tests, and a baseline rate plus a minimum detectable effect
//! feed the sample-size planner. No I/O, no shared state; every call is
//! independent and safe to run concurrently.
//!
//! - [`summary`] — per-arm reduction: all-users (ARPU) and purchasers-only
//!   (AOV) views.
//! - [`welch`] — Welch's unequal-variance t-test for mean comparisons.
//! - [`proportion`] — pooled two-proportion z-test for conversion rates.
//! - [`planning`] — required sample size, duration projection, and the
//!   readiness gate with its minimum-days floor.
//! - [`analysis`] — full readout combining the above with lift percentages
//!   and winner calls.
//! - [`input`] — boundary parsing for comma-separated revenue text.
//!
//! Indeterminate results (zero pooled standard error, too little data, zero
//! traffic rate) come back as `None`, never as panics or errors; invalid
//! inputs are rejected up front with [`UpliftError`].

pub mod analysis;
pub mod distributions;
pub mod error;
pub mod input;
pub mod planning;
pub mod proportion;
pub mod summary;
pub mod welch;

pub use analysis::{analyze, Arm, ConversionComparison, ExperimentReadout, RevenueComparison};
pub use error::UpliftError;
pub use input::parse_revenue_list;
pub use planning::{
    plan, projected_duration, recommended_days, required_sample_size, DurationProjection,
    ReadinessGate, SampleSizeEstimate, SampleSizePlan, DEFAULT_ALPHA, DEFAULT_MINIMUM_DAYS,
    DEFAULT_POWER,
};
pub use proportion::{two_proportion_z_test, ZTestOutcome};
pub use summary::{
    summarize_all_users, summarize_purchasers, GroupSummaries, GroupSummary, RevenueGroup,
};
pub use welch::{welch_t_test, TTestOutcome};
