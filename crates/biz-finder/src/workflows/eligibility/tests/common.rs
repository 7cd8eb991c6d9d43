use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::eligibility::{
    BonusFlags, BusinessProfile, EligibilityScorer, EligibilityService, ProfileSubmission, Sector,
};

/// Manufacturing company sitting right on the industry average.
pub(super) fn typical_profile() -> BusinessProfile {
    BusinessProfile {
        sector: Sector::Manufacturing,
        years_established: 3,
        annual_revenue: 10.0,
        operating_profit: 1.0,
        policy_loan_balance: 2.0,
        debt_ratio: 250,
        employee_count: 5,
        employee_grew_yoy: false,
        ceo_credit_score: 850,
        bonus_flags: BonusFlags::default(),
    }
}

/// Profile whose raw total overshoots the score ceiling.
pub(super) fn strong_profile() -> BusinessProfile {
    BusinessProfile {
        sector: Sector::ItSoftware,
        years_established: 5,
        annual_revenue: 20.0,
        operating_profit: 3.0,
        policy_loan_balance: 0.0,
        debt_ratio: 100,
        employee_count: 15,
        employee_grew_yoy: true,
        ceo_credit_score: 950,
        bonus_flags: BonusFlags {
            has_research_lab: true,
            has_patent: true,
            is_venture_certified: false,
            is_women_or_youth_led: false,
        },
    }
}

/// Otherwise strong profile that trips the credit cutoff.
pub(super) fn ineligible_profile() -> BusinessProfile {
    BusinessProfile {
        ceo_credit_score: 500,
        ..strong_profile()
    }
}

/// Service company with high leverage and no certifications.
pub(super) fn leveraged_profile() -> BusinessProfile {
    BusinessProfile {
        sector: Sector::Service,
        years_established: 10,
        debt_ratio: 350,
        ..typical_profile()
    }
}

pub(super) fn submission_from(profile: &BusinessProfile) -> ProfileSubmission {
    ProfileSubmission {
        sector: profile.sector,
        years_established: i64::from(profile.years_established),
        annual_revenue: profile.annual_revenue,
        operating_profit: profile.operating_profit,
        policy_loan_balance: profile.policy_loan_balance,
        debt_ratio: i64::from(profile.debt_ratio),
        employee_count: i64::from(profile.employee_count),
        employee_grew_yoy: profile.employee_grew_yoy,
        ceo_credit_score: i64::from(profile.ceo_credit_score),
        bonus_flags: profile.bonus_flags,
    }
}

pub(super) fn scorer() -> EligibilityScorer {
    EligibilityScorer::standard()
}

pub(super) fn service() -> Arc<EligibilityService> {
    Arc::new(EligibilityService::standard())
}

pub(super) fn issued_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
}

pub(super) fn flags_with(count: usize) -> BonusFlags {
    let mut flags = BonusFlags::default();
    let toggles: [&mut bool; 4] = [
        &mut flags.has_research_lab,
        &mut flags.has_patent,
        &mut flags.is_venture_certified,
        &mut flags.is_women_or_youth_led,
    ];
    for toggle in toggles.into_iter().take(count) {
        *toggle = true;
    }
    flags
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
