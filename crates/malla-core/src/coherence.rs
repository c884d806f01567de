//! Credit-total coherence check.
//!
//! A pure classification of placed credits against the program target:
//! above the target is an error, below 80% of it is a warning, anything in
//! between is fine. The thresholds are fixed.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::curriculum::Curriculum;

/// Lower bound of the healthy band, as a fraction `NUM / DEN` of the target.
const WARNING_THRESHOLD_NUM: u64 = 4;
const WARNING_THRESHOLD_DEN: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceStatus {
    Ok,
    Warning,
    Error,
}

impl CoherenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoherenceStatus::Ok => "ok",
            CoherenceStatus::Warning => "warning",
            CoherenceStatus::Error => "error",
        }
    }
}

/// Result of a coherence evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coherence {
    pub status: CoherenceStatus,
    pub message: String,
    pub total_credits: u32,
    pub target_credits: u32,
}

/// Classifies `total_credits` against `target_credits`.
pub fn evaluate(total_credits: u32, target_credits: u32) -> Coherence {
    // Integer comparison: total < 0.8 * target  <=>  5 * total < 4 * target.
    let below_band = WARNING_THRESHOLD_DEN * u64::from(total_credits)
        < WARNING_THRESHOLD_NUM * u64::from(target_credits);

    let (status, message) = if total_credits > target_credits {
        let excess = total_credits - target_credits;
        (
            CoherenceStatus::Error,
            format!(
                "{total_credits} credits placed, exceeds the target of {target_credits} by {excess} credits"
            ),
        )
    } else if below_band {
        let gap = target_credits - total_credits;
        (
            CoherenceStatus::Warning,
            format!(
                "{total_credits} credits placed, {gap} credits short of the target of {target_credits}"
            ),
        )
    } else {
        (
            CoherenceStatus::Ok,
            format!("{total_credits} of {target_credits} credits placed"),
        )
    };

    Coherence {
        status,
        message,
        total_credits,
        target_credits,
    }
}

/// Evaluates a curriculum's placed credits against its own target.
pub fn evaluate_curriculum(curriculum: &Curriculum, catalog: &Catalog) -> Coherence {
    evaluate(curriculum.total_credits(catalog), curriculum.target_credits)
}
