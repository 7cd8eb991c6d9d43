use serde::{Deserialize, Serialize};

use super::domain::{BonusFlags, BusinessProfile, Sector};

/// Raw intake form payload before bounds validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub sector: Sector,
    pub years_established: i64,
    pub annual_revenue: f64,
    pub operating_profit: f64,
    pub policy_loan_balance: f64,
    pub debt_ratio: i64,
    pub employee_count: i64,
    #[serde(default)]
    pub employee_grew_yoy: bool,
    pub ceo_credit_score: i64,
    #[serde(default)]
    pub bonus_flags: BonusFlags,
}

/// Validation errors raised by the intake guard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} must be between {min} and {max} (found {found})")]
    IntegerOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        found: i64,
    },
    #[error("{field} must be between {min:.1} and {max:.1} (found {found:.1})")]
    DecimalOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerBounds {
    pub min: i64,
    pub max: i64,
}

impl IntegerBounds {
    fn check(&self, field: &'static str, value: i64) -> Result<i64, IntakeViolation> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(IntakeViolation::IntegerOutOfRange {
                field,
                min: self.min,
                max: self.max,
                found: value,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalBounds {
    pub min: f64,
    pub max: f64,
}

impl DecimalBounds {
    fn check(&self, field: &'static str, value: f64) -> Result<f64, IntakeViolation> {
        if !value.is_finite() {
            return Err(IntakeViolation::NotFinite { field });
        }
        if value < self.min || value > self.max {
            return Err(IntakeViolation::DecimalOutOfRange {
                field,
                min: self.min,
                max: self.max,
                found: value,
            });
        }
        Ok(value)
    }
}

/// Field limits enforced by the intake form.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeBounds {
    pub years_established: IntegerBounds,
    pub annual_revenue: DecimalBounds,
    pub operating_profit: DecimalBounds,
    pub policy_loan_balance: DecimalBounds,
    pub debt_ratio: IntegerBounds,
    pub employee_count: IntegerBounds,
    pub ceo_credit_score: IntegerBounds,
}

impl Default for IntakeBounds {
    fn default() -> Self {
        Self {
            years_established: IntegerBounds { min: 0, max: 50 },
            annual_revenue: DecimalBounds {
                min: 0.0,
                max: 1000.0,
            },
            operating_profit: DecimalBounds {
                min: -50.0,
                max: 500.0,
            },
            policy_loan_balance: DecimalBounds {
                min: 0.0,
                max: 500.0,
            },
            debt_ratio: IntegerBounds { min: 0, max: 1000 },
            employee_count: IntegerBounds { min: 0, max: 1000 },
            ceo_credit_score: IntegerBounds { min: 0, max: 1000 },
        }
    }
}

/// Guard responsible for producing `BusinessProfile` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    bounds: IntakeBounds,
}

impl IntakeGuard {
    pub fn with_bounds(bounds: IntakeBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &IntakeBounds {
        &self.bounds
    }

    /// Convert an inbound submission into a validated profile. Fields are checked in
    /// form order and the first violation is reported.
    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<BusinessProfile, IntakeViolation> {
        let bounds = &self.bounds;

        let years_established = bounds
            .years_established
            .check("years_established", submission.years_established)?;
        let annual_revenue = bounds
            .annual_revenue
            .check("annual_revenue", submission.annual_revenue)?;
        let operating_profit = bounds
            .operating_profit
            .check("operating_profit", submission.operating_profit)?;
        let policy_loan_balance = bounds
            .policy_loan_balance
            .check("policy_loan_balance", submission.policy_loan_balance)?;
        let debt_ratio = bounds
            .debt_ratio
            .check("debt_ratio", submission.debt_ratio)?;
        let employee_count = bounds
            .employee_count
            .check("employee_count", submission.employee_count)?;
        let ceo_credit_score = bounds
            .ceo_credit_score
            .check("ceo_credit_score", submission.ceo_credit_score)?;

        Ok(BusinessProfile {
            sector: submission.sector,
            years_established: narrow(years_established, "years_established")?,
            annual_revenue,
            operating_profit,
            policy_loan_balance,
            debt_ratio: narrow(debt_ratio, "debt_ratio")?,
            employee_count: narrow(employee_count, "employee_count")?,
            employee_grew_yoy: submission.employee_grew_yoy,
            ceo_credit_score: narrow(ceo_credit_score, "ceo_credit_score")?,
            bonus_flags: submission.bonus_flags,
        })
    }
}

/// Bounds may be widened by callers, so the conversion is still checked.
fn narrow<T>(value: i64, field: &'static str) -> Result<T, IntakeViolation>
where
    T: TryFrom<i64> + Bounded,
{
    T::try_from(value).map_err(|_| IntakeViolation::IntegerOutOfRange {
        field,
        min: 0,
        max: T::MAX_I64,
        found: value,
    })
}

trait Bounded {
    const MAX_I64: i64;
}

impl Bounded for u16 {
    const MAX_I64: i64 = u16::MAX as i64;
}

impl Bounded for u32 {
    const MAX_I64: i64 = u32::MAX as i64;
}
