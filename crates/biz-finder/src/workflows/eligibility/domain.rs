use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalizer::normalize_label;

/// Industry classification captured on the intake form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Sector {
    Manufacturing,
    ItSoftware,
    Service,
    Construction,
    WholesaleRetail,
    Other,
}

impl Sector {
    pub const ALL: [Sector; 6] = [
        Sector::Manufacturing,
        Sector::ItSoftware,
        Sector::Service,
        Sector::Construction,
        Sector::WholesaleRetail,
        Sector::Other,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Sector::Manufacturing => "manufacturing",
            Sector::ItSoftware => "it_software",
            Sector::Service => "service",
            Sector::Construction => "construction",
            Sector::WholesaleRetail => "wholesale_retail",
            Sector::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Sector::Manufacturing => "Manufacturing",
            Sector::ItSoftware => "IT/Software",
            Sector::Service => "Service",
            Sector::Construction => "Construction",
            Sector::WholesaleRetail => "Wholesale/Retail",
            Sector::Other => "Other",
        }
    }

    /// Accepts the canonical keys, the English display labels and the Korean form labels.
    pub fn from_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "manufacturing" | "제조업" | "제조" => Some(Sector::Manufacturing),
            "it_software" | "it_sw" | "it" | "software" | "sw" => Some(Sector::ItSoftware),
            "service" | "services" | "서비스" | "서비스업" => Some(Sector::Service),
            "construction" | "건설" | "건설업" => Some(Sector::Construction),
            "wholesale_retail" | "wholesale" | "retail" | "도소매" | "도소매업" => {
                Some(Sector::WholesaleRetail)
            }
            "other" | "기타" => Some(Sector::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Sector {
    type Error = UnknownSector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Sector::from_label(&value).ok_or(UnknownSector(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sector '{0}'")]
pub struct UnknownSector(pub String);

/// Certifications and qualifications that each earn a fixed bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusFlags {
    #[serde(default)]
    pub has_research_lab: bool,
    #[serde(default)]
    pub has_patent: bool,
    #[serde(default)]
    pub is_venture_certified: bool,
    #[serde(default)]
    pub is_women_or_youth_led: bool,
}

impl BonusFlags {
    pub fn count(&self) -> u8 {
        [
            self.has_research_lab,
            self.has_patent,
            self.is_venture_certified,
            self.is_women_or_youth_led,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count() as u8
    }

    /// A research lab or a venture/innobiz certification.
    pub fn has_technical_certification(&self) -> bool {
        self.has_research_lab || self.is_venture_certified
    }
}

/// Validated business attributes consumed by the scorer. Amounts are in 억원.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub sector: Sector,
    pub years_established: u32,
    pub annual_revenue: f64,
    pub operating_profit: f64,
    pub policy_loan_balance: f64,
    pub debt_ratio: u32,
    pub employee_count: u32,
    pub employee_grew_yoy: bool,
    pub ceo_credit_score: u16,
    pub bonus_flags: BonusFlags,
}
