use std::collections::BTreeMap;
use std::fmt::Display;

use super::DocumentError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(String),
}

/// Text with `{{slot}}` markers, parsed once and filled from a slot map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl DocumentTemplate {
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, DocumentError> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or_else(|| DocumentError::Unterminated {
                    template: name.clone(),
                    offset: offset + start,
                })?;

            let slot = after_open[..end].trim();
            if slot.is_empty() {
                return Err(DocumentError::EmptySlot {
                    template: name,
                    offset: offset + start,
                });
            }
            segments.push(Segment::Slot(slot.to_string()));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot names in order of first appearance.
    pub fn slots(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Slot(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Fills every slot. A value that itself carries `{{` or `}}` is rejected so no
    /// marker survives into the rendered text.
    pub fn render(&self, slots: &TemplateSlots) -> Result<String, DocumentError> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Slot(name) => {
                    let value = slots.get(name).ok_or_else(|| DocumentError::MissingSlot {
                        template: self.name.clone(),
                        slot: name.clone(),
                    })?;
                    if contains_marker(value) {
                        return Err(DocumentError::MarkerInValue {
                            template: self.name.clone(),
                            slot: name.clone(),
                        });
                    }
                    output.push_str(value);
                }
            }
        }
        Ok(output)
    }
}

pub(crate) fn contains_marker(text: &str) -> bool {
    text.contains(OPEN) || text.contains(CLOSE)
}

/// Named values interpolated into templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSlots {
    values: BTreeMap<String, String>,
}

impl TemplateSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
