use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{BusinessProfile, Sector};
use super::normalizer::normalize_label;

/// Funding channel a program belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    WorkingCapital,
    Facility,
    ResearchAndDevelopment,
    Guarantee,
}

impl ProgramCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ProgramCategory::WorkingCapital => "Working capital",
            ProgramCategory::Facility => "Facility",
            ProgramCategory::ResearchAndDevelopment => "R&D",
            ProgramCategory::Guarantee => "Guarantee",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "working_capital" | "working" | "운전자금" => Some(ProgramCategory::WorkingCapital),
            "facility" | "시설자금" => Some(ProgramCategory::Facility),
            "research_and_development" | "r&d" | "rnd" | "r&d_과제" => {
                Some(ProgramCategory::ResearchAndDevelopment)
            }
            "guarantee" | "보증" => Some(ProgramCategory::Guarantee),
            _ => None,
        }
    }
}

/// Predicate a profile must satisfy for a program to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgramRule {
    Always,
    EarlyStage { max_years: u32 },
    TechnicalCertification,
    /// Fails into a single funding-restriction warning instead of silently dropping.
    LowLeverage { max_debt_ratio: u32 },
}

impl ProgramRule {
    pub fn admits(&self, profile: &BusinessProfile) -> bool {
        match self {
            ProgramRule::Always => true,
            ProgramRule::EarlyStage { max_years } => profile.years_established <= *max_years,
            ProgramRule::TechnicalCertification => {
                profile.bonus_flags.has_technical_certification()
            }
            ProgramRule::LowLeverage { max_debt_ratio } => profile.debt_ratio < *max_debt_ratio,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ProgramRule::Always => "open to all eligible applicants".to_string(),
            ProgramRule::EarlyStage { max_years } => {
                format!("established {max_years} year(s) or less")
            }
            ProgramRule::TechnicalCertification => {
                "research lab or venture certification".to_string()
            }
            ProgramRule::LowLeverage { max_debt_ratio } => {
                format!("debt ratio below {max_debt_ratio}%")
            }
        }
    }
}

/// Row of the program table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEntry {
    pub key: String,
    pub name: String,
    pub agency: String,
    pub category: ProgramCategory,
    /// Program-specific amount ceiling in 억원.
    pub ceiling: f64,
    pub rate: String,
    /// Fit rating from 1 to 5.
    pub fit: u8,
    pub rule: ProgramRule,
    /// Empty means every sector qualifies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<Sector>,
}

impl ProgramEntry {
    pub fn covers_sector(&self, sector: Sector) -> bool {
        self.sectors.is_empty() || self.sectors.contains(&sector)
    }

    fn matched(&self, remaining_limit: f64) -> MatchedProgram {
        MatchedProgram {
            key: self.key.clone(),
            name: self.name.clone(),
            agency: self.agency.clone(),
            category: Some(self.category),
            amount_cap: remaining_limit.min(self.ceiling),
            rate: self.rate.clone(),
            fit: fit_stars(self.fit),
            kind: MatchKind::Program,
        }
    }

    fn leverage_warning(&self, max_debt_ratio: u32) -> MatchedProgram {
        MatchedProgram {
            key: LEVERAGE_WARNING_KEY.to_string(),
            name: format!("Funding restricted: debt ratio at or above {max_debt_ratio}%"),
            agency: self.agency.clone(),
            category: None,
            amount_cap: 0.0,
            rate: "-".to_string(),
            fit: "restricted".to_string(),
            kind: MatchKind::Warning,
        }
    }
}

pub const LEVERAGE_WARNING_KEY: &str = "leverage_restriction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Program,
    Warning,
}

/// Program record produced for a scored profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedProgram {
    pub key: String,
    pub name: String,
    pub agency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProgramCategory>,
    /// `min(remaining_limit, ceiling)` in 억원; zero for warnings.
    pub amount_cap: f64,
    pub rate: String,
    pub fit: String,
    pub kind: MatchKind,
}

impl MatchedProgram {
    pub fn is_warning(&self) -> bool {
        self.kind == MatchKind::Warning
    }
}

fn fit_stars(fit: u8) -> String {
    "★".repeat(usize::from(fit.clamp(1, 5)))
}

/// Static program table plus the per-sector reference cases used in narratives.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCatalog {
    entries: Vec<ProgramEntry>,
    reference_cases: BTreeMap<Sector, String>,
}

impl ProgramCatalog {
    pub fn new(entries: Vec<ProgramEntry>, reference_cases: BTreeMap<Sector, String>) -> Self {
        Self {
            entries,
            reference_cases,
        }
    }

    /// Imported tables keep the standard reference cases.
    pub fn with_entries(entries: Vec<ProgramEntry>) -> Self {
        Self::new(entries, standard_reference_cases())
    }

    pub fn standard() -> Self {
        Self::with_entries(standard_entries())
    }

    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&ProgramEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn reference_case(&self, sector: Sector) -> Option<&str> {
        self.reference_cases.get(&sector).map(String::as_str)
    }

    pub fn reference_cases(&self) -> impl Iterator<Item = (Sector, &str)> {
        self.reference_cases
            .iter()
            .map(|(sector, case)| (*sector, case.as_str()))
    }

    /// Evaluates every entry in table order. At most one leverage warning is emitted.
    pub fn match_profile(
        &self,
        profile: &BusinessProfile,
        remaining_limit: f64,
    ) -> Vec<MatchedProgram> {
        let mut matched = Vec::new();
        let mut warned = false;

        for entry in &self.entries {
            if !entry.covers_sector(profile.sector) {
                continue;
            }

            if entry.rule.admits(profile) {
                matched.push(entry.matched(remaining_limit));
            } else if let ProgramRule::LowLeverage { max_debt_ratio } = entry.rule {
                if !warned {
                    matched.push(entry.leverage_warning(max_debt_ratio));
                    warned = true;
                }
            }
        }

        matched
    }
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_entries() -> Vec<ProgramEntry> {
    vec![
        ProgramEntry {
            key: "innovation_growth".to_string(),
            name: "Innovation Growth Fund".to_string(),
            agency: "KOSME".to_string(),
            category: ProgramCategory::WorkingCapital,
            ceiling: 10.0,
            rate: "2.5%~".to_string(),
            fit: 5,
            rule: ProgramRule::TechnicalCertification,
            sectors: Vec::new(),
        },
        ProgramEntry {
            key: "startup_foundation".to_string(),
            name: "Startup Foundation Fund".to_string(),
            agency: "KOSME".to_string(),
            category: ProgramCategory::WorkingCapital,
            ceiling: 5.0,
            rate: "2.7%~".to_string(),
            fit: 4,
            rule: ProgramRule::EarlyStage { max_years: 3 },
            sectors: Vec::new(),
        },
        ProgramEntry {
            key: "new_growth_guarantee".to_string(),
            name: "New Growth Engine Guarantee".to_string(),
            agency: "KODIT".to_string(),
            category: ProgramCategory::Guarantee,
            ceiling: 3.0,
            rate: "guarantee fee 0.2% off".to_string(),
            fit: 4,
            rule: ProgramRule::LowLeverage {
                max_debt_ratio: 300,
            },
            sectors: Vec::new(),
        },
        ProgramEntry {
            key: "new_growth_facility".to_string(),
            name: "New Growth Foundation Fund (Facility)".to_string(),
            agency: "KOSME".to_string(),
            category: ProgramCategory::Facility,
            ceiling: 20.0,
            rate: "2.4%~".to_string(),
            fit: 3,
            rule: ProgramRule::Always,
            sectors: vec![Sector::Manufacturing],
        },
        ProgramEntry {
            key: "rnd_commercialization".to_string(),
            name: "R&D Commercialization Fund".to_string(),
            agency: "KIBO".to_string(),
            category: ProgramCategory::ResearchAndDevelopment,
            ceiling: 5.0,
            rate: "2.0%~".to_string(),
            fit: 4,
            rule: ProgramRule::TechnicalCertification,
            sectors: vec![Sector::ItSoftware],
        },
    ]
}

fn standard_reference_cases() -> BTreeMap<Sector, String> {
    [
        (
            Sector::Manufacturing,
            "Parts maker financed a smart-factory line with facility and working-capital loans",
        ),
        (
            Sector::ItSoftware,
            "SaaS company scaled its R&D team on innovation-growth working capital",
        ),
        (
            Sector::Service,
            "Service operator funded new branches through startup working capital",
        ),
        (
            Sector::Construction,
            "Specialty contractor refinanced equipment with guarantee-backed loans",
        ),
        (
            Sector::WholesaleRetail,
            "Distributor opened export channels with market-entry working capital",
        ),
        (
            Sector::Other,
            "Small business stabilised cash flow with general policy working capital",
        ),
    ]
    .into_iter()
    .map(|(sector, case)| (sector, case.to_string()))
    .collect()
}
