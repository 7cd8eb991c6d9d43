use super::common::*;
use crate::workflows::eligibility::intake::IntegerBounds;
use crate::workflows::eligibility::{
    IntakeBounds, IntakeGuard, IntakeViolation, ProfileSubmission, Sector,
};

#[test]
fn valid_submission_becomes_profile() {
    let profile = typical_profile();
    let converted = IntakeGuard::default()
        .profile_from_submission(submission_from(&profile))
        .expect("submission within bounds");

    assert_eq!(converted, profile);
}

#[test]
fn out_of_range_years_are_rejected() {
    let submission = ProfileSubmission {
        years_established: 51,
        ..submission_from(&typical_profile())
    };

    let error = IntakeGuard::default()
        .profile_from_submission(submission)
        .expect_err("years above bound");

    assert_eq!(
        error,
        IntakeViolation::IntegerOutOfRange {
            field: "years_established",
            min: 0,
            max: 50,
            found: 51,
        }
    );
}

#[test]
fn first_violation_in_form_order_is_reported() {
    let submission = ProfileSubmission {
        debt_ratio: -1,
        ceo_credit_score: 1001,
        ..submission_from(&typical_profile())
    };

    match IntakeGuard::default().profile_from_submission(submission) {
        Err(IntakeViolation::IntegerOutOfRange { field, .. }) => assert_eq!(field, "debt_ratio"),
        other => panic!("expected debt ratio violation, got {other:?}"),
    }
}

#[test]
fn operating_loss_bound_is_inclusive() {
    let guard = IntakeGuard::default();
    let base = submission_from(&typical_profile());

    assert!(guard
        .profile_from_submission(ProfileSubmission {
            operating_profit: -50.0,
            ..base.clone()
        })
        .is_ok());

    let error = guard
        .profile_from_submission(ProfileSubmission {
            operating_profit: -50.5,
            ..base
        })
        .expect_err("loss beyond bound");
    assert!(error.to_string().contains("operating_profit"));
}

#[test]
fn non_finite_amounts_are_rejected() {
    let submission = ProfileSubmission {
        annual_revenue: f64::NAN,
        ..submission_from(&typical_profile())
    };

    assert_eq!(
        IntakeGuard::default().profile_from_submission(submission),
        Err(IntakeViolation::NotFinite {
            field: "annual_revenue"
        })
    );
}

#[test]
fn widened_bounds_still_fit_profile_types() {
    let guard = IntakeGuard::with_bounds(IntakeBounds {
        ceo_credit_score: IntegerBounds { min: 0, max: 100_000 },
        ..IntakeBounds::default()
    });
    let submission = ProfileSubmission {
        ceo_credit_score: 70_000,
        ..submission_from(&typical_profile())
    };

    match guard.profile_from_submission(submission) {
        Err(IntakeViolation::IntegerOutOfRange { field, max, .. }) => {
            assert_eq!(field, "ceo_credit_score");
            assert_eq!(max, i64::from(u16::MAX));
        }
        other => panic!("expected narrowing violation, got {other:?}"),
    }
}

#[test]
fn submissions_accept_korean_sector_labels_and_default_flags() {
    let payload = serde_json::json!({
        "sector": "제조업",
        "years_established": 3,
        "annual_revenue": 10.0,
        "operating_profit": 1.0,
        "policy_loan_balance": 2.0,
        "debt_ratio": 250,
        "employee_count": 5,
        "ceo_credit_score": 850
    });

    let submission: ProfileSubmission =
        serde_json::from_value(payload).expect("submission deserializes");

    assert_eq!(submission.sector, Sector::Manufacturing);
    assert!(!submission.employee_grew_yoy);
    assert_eq!(submission.bonus_flags.count(), 0);
}

#[test]
fn unknown_sector_labels_fail_deserialization() {
    let payload = serde_json::json!({
        "sector": "shipbuilding",
        "years_established": 3,
        "annual_revenue": 10.0,
        "operating_profit": 1.0,
        "policy_loan_balance": 2.0,
        "debt_ratio": 250,
        "employee_count": 5,
        "ceo_credit_score": 850
    });

    let error = serde_json::from_value::<ProfileSubmission>(payload).expect_err("unknown sector");
    assert!(error.to_string().contains("shipbuilding"));
}
