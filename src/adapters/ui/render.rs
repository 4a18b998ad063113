//! Plain-text rendering for the terminal: tables, lead cards, markdown proposals.
//!
//! Formatting returns Strings so it can be tested; printing adds color via crossterm.

use crate::domain::{DiscoveredLead, LeadPriority, LeadStats, LeadStatus, SavedLead, Sector};
use crate::usecases::saved_leads_table::{priority_badge, status_badge};
use crossterm::style::Stylize;

/// Cut `text` to `width` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

fn cell(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width), width = width)
}

pub fn sector_line(sector: &Sector, selected: bool) -> String {
    let mark = if selected { "[x]" } else { "[ ]" };
    match sector.relevance_reason.as_deref().filter(|r| !r.is_empty()) {
        Some(reason) => format!("{} {} - {}", mark, sector.name, truncate(reason, 70)),
        None => format!("{} {}", mark, sector.name),
    }
}

/// Table row for a discovered lead; `saved` adds the saved marker.
pub fn discovered_row(index: usize, lead: &DiscoveredLead, saved: bool) -> String {
    format!(
        "{:>3}  {}  {}  {}",
        index + 1,
        cell(&lead.company_name, 32),
        cell(lead.website_url.as_deref().unwrap_or("-"), 32),
        if saved { "saved" } else { "" }
    )
    .trim_end()
    .to_string()
}

pub fn saved_row(lead: &SavedLead) -> String {
    format!(
        "#{:<5} {}  {}  {}  {}",
        lead.id,
        cell(&lead.lead.company_name, 30),
        cell(&status_badge(lead), 11),
        cell(&priority_badge(lead), 11),
        lead.discovered_at
    )
}

/// Status and priority badges side by side.
pub fn saved_row_badges(lead: &SavedLead) -> String {
    format!("{} {}", status_badge(lead), priority_badge(lead))
}

/// Multi-line card with the lead's contact data and proposal summary.
pub fn lead_card(lead: &DiscoveredLead) -> String {
    let mut out = String::new();
    let field = |out: &mut String, label: &str, value: Option<&str>| {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!("{:<14}{}\n", format!("{}:", label), v));
        }
    };
    out.push_str(&format!("{}\n", lead.company_name));
    field(&mut out, "Website", lead.website_url.as_deref());
    field(&mut out, "Address", lead.address.as_deref());
    field(&mut out, "Location", lead.location.as_deref());
    field(&mut out, "Email", lead.contact_email.as_deref());
    field(&mut out, "Phone", lead.phone_number.as_deref());
    field(&mut out, "Sector", lead.sector.as_deref());
    field(&mut out, "LinkedIn", lead.linkedin_info.as_deref());
    if let Some(score) = lead.confidence_score {
        out.push_str(&format!("{:<14}{:.0}%\n", "Confidence:", score * 100.0));
    }
    field(&mut out, "Description", lead.description.as_deref());
    field(&mut out, "Proposal", lead.automation_proposal.as_deref());
    out
}

pub fn stats_report(stats: &LeadStats) -> String {
    let mut out = format!(
        "Total leads: {}\nDiscovered in the last 30 days: {}\n\nBy status:\n",
        stats.total, stats.recent
    );
    for status in LeadStatus::ALL {
        out.push_str(&format!("  {:<10} {}\n", status.as_str(), stats.status_count(status)));
    }
    out.push_str("\nBy priority:\n");
    for priority in LeadPriority::ALL {
        out.push_str(&format!("  {:<10} {}\n", priority.as_str(), stats.priority_count(priority)));
    }
    out
}

/// Print markdown with headings and `**bold**` spans emphasized.
pub fn print_markdown(text: &str) {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(heading) = trimmed.strip_prefix('#') {
            println!("{}", heading.trim_start_matches('#').trim().bold().underlined());
            continue;
        }
        let mut rendered = String::new();
        for (i, part) in line.split("**").enumerate() {
            if i % 2 == 1 {
                rendered.push_str(&part.bold().to_string());
            } else {
                rendered.push_str(part);
            }
        }
        println!("{}", rendered);
    }
}

/// Page-level error, shown inline in red.
pub fn print_error(message: Option<&str>) {
    if let Some(m) = message {
        println!("{}", format!("Error: {}", m).red());
    }
}

pub fn print_info(message: &str) {
    println!("{}", message.green());
}

pub fn print_heading(title: &str) {
    println!();
    println!("{}", title.bold().magenta());
    println!("{}", "─".repeat(title.chars().count().max(8)).dark_grey());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("äöüßé", 3), "äö…");
    }

    #[test]
    fn test_discovered_row_saved_marker() {
        let lead = DiscoveredLead {
            company_name: "Acme".into(),
            website_url: Some("https://acme.de".into()),
            ..Default::default()
        };
        assert!(discovered_row(0, &lead, true).ends_with("saved"));
        assert!(discovered_row(0, &lead, false).ends_with("https://acme.de"));
        assert!(discovered_row(4, &lead, false).trim_start().starts_with("5 "));
    }

    #[test]
    fn test_lead_card_skips_empty_fields() {
        let lead = DiscoveredLead {
            company_name: "Acme".into(),
            contact_email: Some(String::new()),
            phone_number: Some("+49 30 1234".into()),
            confidence_score: Some(0.82),
            ..Default::default()
        };
        let card = lead_card(&lead);
        assert!(card.contains("Phone:        +49 30 1234"));
        assert!(card.contains("Confidence:   82%"));
        assert!(!card.contains("Email:"));
    }

    #[test]
    fn test_sector_line() {
        let sector = Sector {
            id: 1,
            name: "Logistics".into(),
            relevance_reason: Some("Lots of paperwork".into()),
            description: None,
        };
        assert_eq!(sector_line(&sector, true), "[x] Logistics - Lots of paperwork");
    }
}
