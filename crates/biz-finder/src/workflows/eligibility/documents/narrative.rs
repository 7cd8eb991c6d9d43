use super::super::domain::BusinessProfile;
use super::super::insights::DashboardInsights;
use super::super::scoring::ScoreResult;
use super::template::{DocumentTemplate, TemplateSlots};
use super::{format_eok, DocumentError};

const CONSULTANT_NOTE: &str = "[Summary]\n\
A {{sector}} business whose standout is {{strength}}. The remaining funding limit is \
{{remaining_limit}} (100M KRW) for a company in its {{years}} year(s) of operation.\n\
{{reference_case}}\n\
\n\
[Recommendations]\n\
1. {{weakness_advice}}\n\
2. Use employment results to target job-creation special funds.\n\
3. The current credit score ({{credit_score}}) {{credit_remark}}.";

/// Consultant remarks shown next to the radar chart.
pub fn render_narrative(
    profile: &BusinessProfile,
    result: &ScoreResult,
    insights: &DashboardInsights,
) -> Result<String, DocumentError> {
    let weakness_advice = insights
        .weakness
        .map(|weakness| weakness.advice())
        .unwrap_or_else(|| {
            "Financials are healthy; an assertive facility-fund application is viable."
                .to_string()
        });

    let reference_case = insights
        .reference_case
        .as_deref()
        .map(|case| format!("Reference case: {case}."))
        .unwrap_or_default();

    let slots = TemplateSlots::new()
        .with("sector", profile.sector)
        .with("strength", insights.strength.label())
        .with("remaining_limit", format_eok(result.remaining_limit))
        .with("years", profile.years_established)
        .with("reference_case", reference_case)
        .with("weakness_advice", weakness_advice)
        .with("credit_score", profile.ceo_credit_score)
        .with("credit_remark", insights.credit_standing.remark());

    DocumentTemplate::parse("consultant_note", CONSULTANT_NOTE)?.render(&slots)
}
