//! CSV export of saved leads. Uses the `csv` crate for quoting/escaping.

use crate::domain::{DomainError, SavedLead};
use std::path::Path;
use tracing::info;

const HEADER: [&str; 13] = [
    "id",
    "company_name",
    "website_url",
    "address",
    "contact_email",
    "phone_number",
    "status",
    "priority",
    "discovered_sectors",
    "discovered_at",
    "notes",
    "description",
    "automation_proposal",
];

/// Convert saved leads to a comma-delimited CSV string with a header row.
///
/// Multi-line text fields are flattened to single lines; sector lists are joined with `; `.
pub fn saved_leads_to_csv(leads: &[SavedLead]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;

    for saved in leads {
        let lead = &saved.lead;
        let opt = |v: &Option<String>| flatten(v.as_deref().unwrap_or_default());
        wtr.write_record([
            saved.id.to_string(),
            flatten(&lead.company_name),
            opt(&lead.website_url),
            opt(&lead.address),
            opt(&lead.contact_email),
            opt(&lead.phone_number),
            saved.status.to_string(),
            saved.priority.to_string(),
            saved.discovered_sectors.join("; "),
            saved.discovered_at.clone(),
            opt(&saved.notes),
            opt(&lead.description),
            opt(&lead.automation_proposal),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// Write the CSV to `path`, creating parent directories.
pub async fn write_saved_leads_csv(path: &Path, leads: &[SavedLead]) -> Result<(), DomainError> {
    let content = saved_leads_to_csv(leads).map_err(|e| DomainError::Export(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainError::Export(e.to_string()))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| DomainError::Export(e.to_string()))?;
    info!(path = %path.display(), rows = leads.len(), "saved leads exported");
    Ok(())
}

fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
