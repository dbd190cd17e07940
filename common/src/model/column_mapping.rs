use crate::model::contact::Contact;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed CSV data row: header title to cell value.
pub type CsvRow = BTreeMap<String, String>;

/// Which CSV header feeds each contact field. An empty string leaves the field unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub name: String,
    pub role: String,
    pub persona: String,
    pub startup: String,
    pub phone: String,
    pub linkedin: String,
    pub template: String,
}

impl ColumnMapping {
    /// Guesses a mapping from the header titles of an export.
    ///
    /// Starts from the column names of the usual lead export and lets each
    /// header claim the first field whose rule it satisfies. When several
    /// headers satisfy the same rule the last one wins.
    pub fn suggest<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut mapping = ColumnMapping {
            name: "First Name".to_string(),
            role: "Hiring Role".to_string(),
            persona: "Role Title".to_string(),
            startup: "Company Name".to_string(),
            phone: "Mobile Phone".to_string(),
            linkedin: String::new(),
            template: String::new(),
        };

        for header in headers {
            let header = header.as_ref();
            let lower = header.to_lowercase();
            let slot = if lower == "first name" || lower == "name" {
                &mut mapping.name
            } else if lower == "hiring role" {
                &mut mapping.role
            } else if lower == "role title" {
                &mut mapping.persona
            } else if lower == "company name" {
                &mut mapping.startup
            } else if lower == "mobile phone" || lower == "phone" {
                &mut mapping.phone
            } else if lower.contains("linkedin") || (lower.contains("profile") && lower.contains("url"))
            {
                &mut mapping.linkedin
            } else if lower.contains("template") || lower.contains("script") {
                &mut mapping.template
            } else {
                continue;
            };
            *slot = header.to_string();
        }

        mapping
    }

    /// Builds a contact from one row. Fields whose header is unmapped, missing
    /// from the row, or holds an empty cell stay absent.
    pub fn apply(&self, row: &CsvRow) -> Contact {
        let pick = |column: &str| -> Option<String> {
            if column.is_empty() {
                return None;
            }
            row.get(column).filter(|v| !v.is_empty()).cloned()
        };

        Contact {
            name: pick(&self.name),
            role: pick(&self.role),
            persona: pick(&self.persona),
            startup: pick(&self.startup),
            phone: pick(&self.phone),
            linkedin: pick(&self.linkedin),
            template: pick(&self.template),
            extra: BTreeMap::new(),
        }
    }

    pub fn apply_all(&self, rows: &[CsvRow]) -> Vec<Contact> {
        rows.iter().map(|row| self.apply(row)).collect()
    }
}
