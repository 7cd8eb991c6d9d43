use serde::Serialize;

use super::domain::BusinessProfile;
use super::programs::ProgramCatalog;
use super::scoring::ScoreResult;

/// Industry average score the benchmark delta is measured against.
const INDUSTRY_AVERAGE_SCORE: i16 = 60;
const APPROVAL_LIKELIHOOD_CAP: u8 = 95;
const HIGH_LEVERAGE_DEBT_RATIO: u32 = 300;
const STABLE_CREDIT_SCORE: u16 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::BPlus,
            _ => Grade::B,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthArea {
    Technology,
    RevenueStability,
}

impl StrengthArea {
    pub const fn label(self) -> &'static str {
        match self {
            StrengthArea::Technology => "technology",
            StrengthArea::RevenueStability => "revenue stability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Weakness {
    HighLeverage { debt_ratio: u32 },
    MissingResearchLab,
}

impl Weakness {
    pub fn advice(&self) -> String {
        match self {
            Weakness::HighLeverage { debt_ratio } => format!(
                "Debt ratio of {debt_ratio}% is high; converting shareholder loans to equity \
                 to bring it into the 200% range opens lower rates"
            ),
            Weakness::MissingResearchLab => {
                "Technical score needs reinforcement; a registered corporate research lab \
                 adds 5 bonus points"
                    .to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStanding {
    Stable,
    NeedsImprovement,
}

impl CreditStanding {
    pub const fn remark(self) -> &'static str {
        match self {
            CreditStanding::Stable => "is in the stable range",
            CreditStanding::NeedsImprovement => "needs improvement",
        }
    }
}

/// One spoke of the radar chart, on a 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub benchmark: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardInsights {
    pub grade: Grade,
    pub benchmark_delta: i16,
    pub approval_likelihood_pct: u8,
    /// Remaining limit converted from 억원 to 만원, truncated.
    pub remaining_limit_manwon: u64,
    pub radar: Vec<RadarAxis>,
    pub strength: StrengthArea,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakness: Option<Weakness>,
    pub credit_standing: CreditStanding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_case: Option<String>,
}

/// Derives the dashboard figures. Ineligible results have nothing to show.
pub fn generate_insights(
    profile: &BusinessProfile,
    result: &ScoreResult,
    catalog: &ProgramCatalog,
) -> Option<DashboardInsights> {
    if !result.is_eligible() {
        return None;
    }

    let score = result.score;
    let flags = profile.bonus_flags.count();

    let weakness = if profile.debt_ratio > HIGH_LEVERAGE_DEBT_RATIO {
        Some(Weakness::HighLeverage {
            debt_ratio: profile.debt_ratio,
        })
    } else if !profile.bonus_flags.has_research_lab {
        Some(Weakness::MissingResearchLab)
    } else {
        None
    };

    let credit_standing = if profile.ceo_credit_score > STABLE_CREDIT_SCORE {
        CreditStanding::Stable
    } else {
        CreditStanding::NeedsImprovement
    };

    Some(DashboardInsights {
        grade: Grade::from_score(score),
        benchmark_delta: i16::from(score) - INDUSTRY_AVERAGE_SCORE,
        approval_likelihood_pct: score.saturating_add(5).min(APPROVAL_LIKELIHOOD_CAP),
        remaining_limit_manwon: (result.remaining_limit * 10_000.0).floor() as u64,
        radar: radar_axes(profile),
        strength: if flags > 2 {
            StrengthArea::Technology
        } else {
            StrengthArea::RevenueStability
        },
        weakness,
        credit_standing,
        reference_case: catalog.reference_case(profile.sector).map(str::to_string),
    })
}

fn radar_axes(profile: &BusinessProfile) -> Vec<RadarAxis> {
    let flags = f64::from(profile.bonus_flags.count());
    let growth_bonus = if profile.employee_grew_yoy { 10.0 } else { 0.0 };

    let axes = [
        (
            "revenue_growth",
            "Revenue growth",
            (profile.annual_revenue * 5.0).min(90.0),
            60.0,
        ),
        (
            "profitability",
            "Profitability",
            (profile.operating_profit * 20.0 + 50.0).min(90.0),
            60.0,
        ),
        ("technology", "Technology", 50.0 + flags * 20.0, 40.0),
        (
            "stability",
            "Stability (debt)",
            (100.0 - f64::from(profile.debt_ratio) / 5.0).max(30.0),
            60.0,
        ),
        (
            "policy_fit",
            "Policy fit",
            60.0 + flags * 10.0 + growth_bonus,
            50.0,
        ),
    ];

    axes.into_iter()
        .map(|(key, label, value, benchmark)| RadarAxis {
            key,
            label,
            value: value.clamp(0.0, 100.0),
            benchmark,
        })
        .collect()
}
