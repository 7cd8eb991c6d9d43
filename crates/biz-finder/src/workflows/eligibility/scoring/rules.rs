use super::super::domain::BusinessProfile;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

/// Applies the additive rules, returning the audit trail and the unclamped total.
/// The credit cutoff is expected to have been checked already. The total is widened
/// to `i32` so custom configs cannot overflow it.
pub(crate) fn score_profile(
    profile: &BusinessProfile,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, i32) {
    let mut components = vec![ScoreComponent {
        factor: ScoreFactor::Base,
        points: config.base_score,
        notes: "base score".to_string(),
    }];

    let credit = profile.ceo_credit_score;
    if let Some(tier) = config
        .credit_tiers
        .iter()
        .find(|tier| credit >= tier.min_credit_score)
    {
        components.push(ScoreComponent {
            factor: ScoreFactor::CreditTier,
            points: tier.points,
            notes: format!(
                "credit score {credit} meets tier {}",
                tier.min_credit_score
            ),
        });
    }

    if profile.employee_grew_yoy {
        components.push(ScoreComponent {
            factor: ScoreFactor::EmploymentGrowth,
            points: config.employment_growth_points,
            notes: "headcount grew year over year".to_string(),
        });
    }

    if profile.employee_count >= config.workforce_threshold {
        components.push(ScoreComponent {
            factor: ScoreFactor::Workforce,
            points: config.workforce_points,
            notes: format!(
                "{} employees (threshold {})",
                profile.employee_count, config.workforce_threshold
            ),
        });
    }

    let bands = &config.debt_bands;
    let debt = profile.debt_ratio;
    let debt_adjustment = if debt > bands.severe_above {
        Some((
            bands.severe_points,
            format!("debt ratio {debt}% above {}%", bands.severe_above),
        ))
    } else if debt > bands.elevated_above {
        Some((
            bands.elevated_points,
            format!("debt ratio {debt}% above {}%", bands.elevated_above),
        ))
    } else if debt < bands.healthy_below {
        Some((
            bands.healthy_points,
            format!("debt ratio {debt}% below {}%", bands.healthy_below),
        ))
    } else {
        None
    };
    if let Some((points, notes)) = debt_adjustment {
        components.push(ScoreComponent {
            factor: ScoreFactor::DebtRatio,
            points,
            notes,
        });
    }

    let flags = profile.bonus_flags.count();
    if flags > 0 {
        components.push(ScoreComponent {
            factor: ScoreFactor::Certification,
            points: i16::from(flags).saturating_mul(config.bonus_flag_points),
            notes: format!("{flags} bonus certification(s)"),
        });
    }

    let margin_floor = profile.annual_revenue * config.profit_margin_threshold;
    if profile.operating_profit > margin_floor {
        components.push(ScoreComponent {
            factor: ScoreFactor::Profitability,
            points: config.profit_points,
            notes: format!(
                "operating profit {:.1} exceeds {:.0}% of revenue",
                profile.operating_profit,
                config.profit_margin_threshold * 100.0
            ),
        });
    } else if profile.operating_profit < 0.0 {
        components.push(ScoreComponent {
            factor: ScoreFactor::Profitability,
            points: config.loss_points,
            notes: format!("operating loss {:.1}", profile.operating_profit),
        });
    }

    let total = components
        .iter()
        .map(|component| i32::from(component.points))
        .sum();
    (components, total)
}
