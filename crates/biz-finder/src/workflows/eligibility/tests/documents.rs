use super::common::*;
use crate::workflows::eligibility::documents::{draft_business_plan, render_narrative};
use crate::workflows::eligibility::insights::generate_insights;
use crate::workflows::eligibility::{
    BusinessProfile, DocumentError, DocumentTemplate, ProgramCatalog, TemplateSlots,
};

#[test]
fn narrative_leads_with_leverage_advice() {
    let profile = leveraged_profile();
    let result = scorer().score(&profile);
    let insights = generate_insights(&profile, &result, &ProgramCatalog::standard())
        .expect("eligible profile");

    let narrative = render_narrative(&profile, &result, &insights).expect("narrative renders");

    assert!(narrative.starts_with("[Summary]"));
    assert!(narrative.contains("1. Debt ratio of 350% is high"));
    assert!(narrative.contains("Service business"));
    assert!(!narrative.contains("{{"));
}

#[test]
fn radar_axes_are_clamped_to_chart_scale() {
    let profile = strong_profile();
    let result = scorer().score(&profile);
    let insights = generate_insights(&profile, &result, &ProgramCatalog::standard())
        .expect("eligible profile");

    let values: Vec<(&str, f64)> = insights
        .radar
        .iter()
        .map(|axis| (axis.key, axis.value))
        .collect();
    assert_eq!(
        values,
        vec![
            ("revenue_growth", 90.0),
            ("profitability", 90.0),
            ("technology", 90.0),
            ("stability", 80.0),
            ("policy_fit", 90.0),
        ]
    );
}

#[test]
fn insights_are_withheld_for_ineligible_results() {
    let profile = ineligible_profile();
    let result = scorer().score(&profile);

    assert!(generate_insights(&profile, &result, &ProgramCatalog::standard()).is_none());
}

#[test]
fn business_plan_body_numbers_sections() {
    let profile = typical_profile();
    let result = scorer().score(&profile);
    let program = &result.matched_programs[0];

    let draft = draft_business_plan(&profile, program, issued_on()).expect("draft renders");
    let body = draft.body();

    assert!(body.starts_with("2025 SME Policy Fund Loan Application\nForm ID: 2025-KOSME-LN-01"));
    assert!(body.contains("\n1. Company overview\nSector: Manufacturing\nFounded: 2022.01.01"));
    assert!(body.contains("\n4. Business outlook\n"));
    assert!(body.contains("revenue of 15.0 (100M KRW)"));
    assert!(body.contains("driven by expanded marketing"));
}

#[test]
fn business_plan_rejects_founding_before_year_zero() {
    let profile = BusinessProfile {
        years_established: u32::MAX,
        ..typical_profile()
    };
    let result = scorer().score(&typical_profile());

    let error = draft_business_plan(&profile, &result.matched_programs[0], issued_on())
        .expect_err("founding year out of range");
    assert!(matches!(error, DocumentError::FoundingDate { .. }));
}

#[test]
fn templates_report_their_slots_once() {
    let template =
        DocumentTemplate::parse("greeting", "Dear {{ name }}, {{name}} owes {{amount}}.")
            .expect("template parses");

    assert_eq!(template.name(), "greeting");
    assert_eq!(template.slots(), vec!["name", "amount"]);

    let rendered = template
        .render(&TemplateSlots::new().with("name", "Kim").with("amount", 3))
        .expect("all slots bound");
    assert_eq!(rendered, "Dear Kim, Kim owes 3.");
}

#[test]
fn business_plan_refuses_program_names_with_markers() {
    let profile = typical_profile();
    let result = scorer().score(&profile);
    let mut program = result.matched_programs[0].clone();
    program.name = "Fund {{amount}}".to_string();

    let error = draft_business_plan(&profile, &program, issued_on())
        .expect_err("marker must not reach the draft");
    assert!(matches!(
        error,
        DocumentError::MarkerInValue { ref slot, .. } if slot == "program_name"
    ));
}
