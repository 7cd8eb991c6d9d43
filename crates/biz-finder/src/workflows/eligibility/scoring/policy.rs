use super::super::domain::BusinessProfile;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};
use serde::{Deserialize, Serialize};

/// Terminal screening outcome. Ineligibility is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible { reason: IneligibleReason },
}

impl Eligibility {
    pub fn summary(&self) -> String {
        match self {
            Eligibility::Eligible => "eligible for policy funding".to_string(),
            Eligibility::Ineligible { reason } => reason.summary(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IneligibleReason {
    CreditBelowCutoff { credit_score: u16, cutoff: u16 },
}

impl IneligibleReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibleReason::CreditBelowCutoff {
                credit_score,
                cutoff,
            } => format!(
                "ineligible: CEO credit score {credit_score} is below the {cutoff} cutoff"
            ),
        }
    }
}

pub(crate) fn screen(profile: &BusinessProfile, config: &ScoringConfig) -> Option<IneligibleReason> {
    if profile.ceo_credit_score < config.credit_cutoff {
        return Some(IneligibleReason::CreditBelowCutoff {
            credit_score: profile.ceo_credit_score,
            cutoff: config.credit_cutoff,
        });
    }

    None
}

/// Clamps the raw total into `0..=max_score`, recording any adjustment in the trail
/// so the component points sum to the reported score whenever the adjustment fits `i16`.
pub(crate) fn clamp_score(
    raw_total: i32,
    config: &ScoringConfig,
    components: &mut Vec<ScoreComponent>,
) -> u8 {
    let ceiling = i32::from(config.max_score);
    let clamped = raw_total.clamp(0, ceiling);

    if clamped != raw_total {
        let notes = if raw_total > ceiling {
            format!("raw score {raw_total} capped at {ceiling}")
        } else {
            format!("raw score {raw_total} floored at 0")
        };
        let adjustment = clamped - raw_total;
        let points = i16::try_from(adjustment).unwrap_or(if adjustment < 0 {
            i16::MIN
        } else {
            i16::MAX
        });
        components.push(ScoreComponent {
            factor: ScoreFactor::Adjustment,
            points,
            notes,
        });
    }

    u8::try_from(clamped).unwrap_or(config.max_score)
}
