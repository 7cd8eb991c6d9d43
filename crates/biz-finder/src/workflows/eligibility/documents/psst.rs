use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::super::domain::BusinessProfile;
use super::super::programs::{MatchedProgram, ProgramCategory};
use super::template::{DocumentTemplate, TemplateSlots};
use super::{format_eok, DocumentError};

const OVERVIEW: &str = "Sector: {{sector}}\n\
Founded: {{founded_on}}\n\
Annual revenue: {{revenue}} (100M KRW)\n\
Full-time employees: {{employees}}";

const FUNDING: &str = "Requested fund: {{program_name}} ({{agency}})\n\
Requested amount: {{amount}} (100M KRW)\n\
Use of funds: {{use_of_funds}}";

const TECHNOLOGY: &str =
    "The company holds {{patents}} registered patent(s). {{lab_note}}";

const BUSINESS: &str = "With this funding the company targets revenue of \
{{projected_revenue}} (100M KRW) next year, {{growth_note}}.";

/// Projected next-year revenue multiple quoted in the business section.
const PROJECTED_GROWTH: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftSection {
    pub heading: String,
    pub body: String,
}

/// Problem-Solution-Scale-Team style loan application draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessPlanDraft {
    pub title: String,
    pub form_id: String,
    pub program_key: String,
    pub program_name: String,
    pub requested_amount: f64,
    pub issued_on: NaiveDate,
    pub founded_on: NaiveDate,
    pub sections: Vec<DraftSection>,
}

impl BusinessPlanDraft {
    /// Plain-text rendering with numbered section headings.
    pub fn body(&self) -> String {
        let mut body = format!("{}\nForm ID: {}\n", self.title, self.form_id);
        for (index, section) in self.sections.iter().enumerate() {
            body.push_str(&format!(
                "\n{}. {}\n{}\n",
                index + 1,
                section.heading,
                section.body
            ));
        }
        body
    }
}

pub fn draft_business_plan(
    profile: &BusinessProfile,
    program: &MatchedProgram,
    issued_on: NaiveDate,
) -> Result<BusinessPlanDraft, DocumentError> {
    let year = issued_on.year();
    let founded_on = i32::try_from(profile.years_established)
        .ok()
        .and_then(|years| NaiveDate::from_ymd_opt(year - years, 1, 1))
        .ok_or(DocumentError::FoundingDate {
            years: profile.years_established,
            issued_on,
        })?;

    let flags = &profile.bonus_flags;
    let slots = TemplateSlots::new()
        .with("sector", profile.sector)
        .with("founded_on", founded_on.format("%Y.%m.%d"))
        .with("revenue", format_eok(profile.annual_revenue))
        .with("employees", profile.employee_count)
        .with("program_name", &program.name)
        .with("agency", &program.agency)
        .with("amount", format_eok(program.amount_cap))
        .with("use_of_funds", use_of_funds(program.category))
        .with("patents", u8::from(flags.has_patent))
        .with(
            "lab_note",
            if flags.has_research_lab {
                "A corporate research lab reinvests over 10% of revenue in R&D every year."
            } else {
                "R&D is carried out by a dedicated team without a registered research lab."
            },
        )
        .with(
            "projected_revenue",
            format_eok(profile.annual_revenue * PROJECTED_GROWTH),
        )
        .with(
            "growth_note",
            if profile.employee_grew_yoy {
                "building on last year's hiring growth"
            } else {
                "driven by expanded marketing"
            },
        );

    let sections = [
        ("Company overview", "psst_overview", OVERVIEW),
        ("Funding plan", "psst_funding", FUNDING),
        ("Technology", "psst_technology", TECHNOLOGY),
        ("Business outlook", "psst_business", BUSINESS),
    ]
    .into_iter()
    .map(|(heading, name, source)| -> Result<DraftSection, DocumentError> {
        let body = DocumentTemplate::parse(name, source)?.render(&slots)?;
        Ok(DraftSection {
            heading: heading.to_string(),
            body,
        })
    })
    .collect::<Result<Vec<_>, _>>()?;

    Ok(BusinessPlanDraft {
        title: format!("{year} SME Policy Fund Loan Application"),
        form_id: format!("{year}-{}-LN-01", program.agency),
        program_key: program.key.clone(),
        program_name: program.name.clone(),
        requested_amount: program.amount_cap,
        issued_on,
        founded_on,
        sections,
    })
}

fn use_of_funds(category: Option<ProgramCategory>) -> &'static str {
    match category {
        Some(ProgramCategory::WorkingCapital) | None => "raw materials and R&D payroll",
        Some(ProgramCategory::Facility) => "production equipment and plant expansion",
        Some(ProgramCategory::ResearchAndDevelopment) => "prototype development and certification",
        Some(ProgramCategory::Guarantee) => "guarantee-backed operating loan",
    }
}
