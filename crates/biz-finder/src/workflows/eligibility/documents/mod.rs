//! Template-driven documents: the consultant narrative and the business-plan draft.

mod narrative;
mod psst;
mod template;

pub use narrative::render_narrative;
pub use psst::{draft_business_plan, BusinessPlanDraft, DraftSection};
pub use template::{DocumentTemplate, TemplateSlots};
pub(crate) use template::contains_marker;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("template '{template}' has an unterminated slot marker at byte {offset}")]
    Unterminated { template: String, offset: usize },
    #[error("template '{template}' has an empty slot marker at byte {offset}")]
    EmptySlot { template: String, offset: usize },
    #[error("template '{template}' references unbound slot '{slot}'")]
    MissingSlot { template: String, slot: String },
    #[error("slot '{slot}' of template '{template}' carries a template marker")]
    MarkerInValue { template: String, slot: String },
    #[error("cannot derive a founding date {years} year(s) before {issued_on}")]
    FoundingDate {
        years: u32,
        issued_on: chrono::NaiveDate,
    },
}

/// Formats an amount in 억원 the way the documents print it.
pub(crate) fn format_eok(amount: f64) -> String {
    format!("{amount:.1}")
}
