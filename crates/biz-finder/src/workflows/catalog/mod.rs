//! CSV import for the policy-fund program table.

mod parser;

use crate::workflows::eligibility::ProgramCatalog;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ProgramCatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
    Empty,
}

impl std::fmt::Display for ProgramCatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramCatalogImportError::Io(err) => {
                write!(f, "failed to read program catalog: {}", err)
            }
            ProgramCatalogImportError::Csv(err) => {
                write!(f, "invalid program catalog CSV data: {}", err)
            }
            ProgramCatalogImportError::InvalidRow { line, reason } => {
                write!(f, "invalid program catalog row on line {}: {}", line, reason)
            }
            ProgramCatalogImportError::Empty => write!(f, "program catalog has no rows"),
        }
    }
}

impl std::error::Error for ProgramCatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProgramCatalogImportError::Io(err) => Some(err),
            ProgramCatalogImportError::Csv(err) => Some(err),
            ProgramCatalogImportError::InvalidRow { .. } | ProgramCatalogImportError::Empty => {
                None
            }
        }
    }
}

impl From<std::io::Error> for ProgramCatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProgramCatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ProgramCatalogImporter;

impl ProgramCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProgramCatalog, ProgramCatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProgramCatalog, ProgramCatalogImportError> {
        let entries = parser::parse_entries(reader)?;
        Ok(ProgramCatalog::with_entries(entries))
    }
}
