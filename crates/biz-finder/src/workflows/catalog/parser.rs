use crate::workflows::eligibility::documents::contains_marker;
use crate::workflows::eligibility::normalizer::normalize_label;
use crate::workflows::eligibility::{ProgramCategory, ProgramEntry, ProgramRule, Sector};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;

use super::ProgramCatalogImportError;

pub(crate) fn parse_entries<R: Read>(
    reader: R,
) -> Result<Vec<ProgramEntry>, ProgramCatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();
    let mut seen_keys = HashSet::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        // Header occupies line 1.
        let line = index as u64 + 2;
        let row = record?;
        let entry = row
            .into_entry()
            .map_err(|reason| ProgramCatalogImportError::InvalidRow { line, reason })?;

        if !seen_keys.insert(entry.key.clone()) {
            return Err(ProgramCatalogImportError::InvalidRow {
                line,
                reason: format!("duplicate program key '{}'", entry.key),
            });
        }
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(ProgramCatalogImportError::Empty);
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Agency")]
    agency: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Ceiling")]
    ceiling: f64,
    #[serde(rename = "Rate", default)]
    rate: String,
    #[serde(rename = "Fit")]
    fit: u8,
    #[serde(rename = "Rule")]
    rule: String,
    #[serde(
        rename = "Rule Value",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    rule_value: Option<String>,
    #[serde(rename = "Sectors", default, deserialize_with = "empty_string_as_none")]
    sectors: Option<String>,
}

impl CatalogRow {
    fn into_entry(self) -> Result<ProgramEntry, String> {
        let key = normalize_label(&self.key);
        if key.is_empty() {
            return Err("program key is blank".to_string());
        }
        if self.name.is_empty() {
            return Err(format!("program '{key}' has no name"));
        }
        for (field, text) in [
            ("Key", key.as_str()),
            ("Name", self.name.as_str()),
            ("Agency", self.agency.as_str()),
            ("Rate", self.rate.as_str()),
        ] {
            if contains_marker(text) {
                return Err(format!("field '{field}' must not contain template markers"));
            }
        }

        let category = ProgramCategory::from_label(&self.category)
            .ok_or_else(|| format!("unknown category '{}'", self.category))?;

        if !self.ceiling.is_finite() || self.ceiling < 0.0 {
            return Err(format!("ceiling must be a non-negative number, got {}", self.ceiling));
        }
        if !(1..=5).contains(&self.fit) {
            return Err(format!("fit must be between 1 and 5, got {}", self.fit));
        }

        let rule = parse_rule(&self.rule, self.rule_value.as_deref())?;
        let sectors = self
            .sectors
            .as_deref()
            .map(parse_sectors)
            .transpose()?
            .unwrap_or_default();

        Ok(ProgramEntry {
            key,
            name: self.name,
            agency: self.agency,
            category,
            ceiling: self.ceiling,
            rate: self.rate,
            fit: self.fit,
            rule,
            sectors,
        })
    }
}

fn parse_rule(rule: &str, value: Option<&str>) -> Result<ProgramRule, String> {
    let numeric = |label: &str| -> Result<u32, String> {
        let raw = value.ok_or_else(|| format!("rule '{label}' requires a Rule Value"))?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| format!("rule '{label}' expects a whole number, got '{raw}'"))
    };

    match normalize_label(rule).as_str() {
        "always" | "" => Ok(ProgramRule::Always),
        "early_stage" => Ok(ProgramRule::EarlyStage {
            max_years: numeric("early_stage")?,
        }),
        "technical_certification" => Ok(ProgramRule::TechnicalCertification),
        "low_leverage" => Ok(ProgramRule::LowLeverage {
            max_debt_ratio: numeric("low_leverage")?,
        }),
        other => Err(format!("unknown rule '{other}'")),
    }
}

fn parse_sectors(raw: &str) -> Result<Vec<Sector>, String> {
    raw.split(['|', ';'])
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| Sector::from_label(label).ok_or_else(|| format!("unknown sector '{label}'")))
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_rule_for_tests(rule: &str, value: Option<&str>) -> Result<ProgramRule, String> {
    parse_rule(rule, value)
}
