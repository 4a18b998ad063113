//! Implements InputPort. Inquire-based interactive dashboard.
//!
//! One screen per page model; every screen re-renders after each action and shows the
//! page's error inline. Esc goes back, Ctrl-C quits.

use crate::adapters::ui::progress::with_spinner;
use crate::adapters::ui::render;
use crate::domain::{DomainError, LeadPriority, LeadStatus, ProposalKind, ToneVariant};
use crate::ports::{ClipboardPort, InputPort, LeadApiPort, LeadCachePort};
use crate::usecases::{
    LeadDetail, LeadDiscovery, LeadSource, ProfileEditor, ProfileField, SaveOutcome,
    SavedLeadEditor, SavedLeadsTable, SectorSelector,
};
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Neon prompt theme for all inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("❯").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

/// Esc is `None` (go back); Ctrl-C is `Interrupted`.
fn ask<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(InquireError::OperationInterrupted) => Err(DomainError::Interrupted),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

/// Menu entry: label shown, value returned.
struct Choice<T> {
    label: String,
    value: T,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn choice<T>(label: impl Into<String>, value: T) -> Choice<T> {
    Choice {
        label: label.into(),
        value,
    }
}

fn pick<T>(prompt: &str, options: Vec<Choice<T>>) -> Result<Option<T>, DomainError> {
    if options.is_empty() {
        return Ok(None);
    }
    Ok(ask(Select::new(prompt, options).with_page_size(15).prompt())?.map(|c| c.value))
}

fn tone_tabs(active: ToneVariant) -> String {
    ToneVariant::ALL
        .iter()
        .map(|t| {
            if *t == active {
                format!("[{}]", t.label()).bold().cyan().to_string()
            } else {
                format!(" {} ", t.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick_tone(current: ToneVariant) -> Result<Option<ToneVariant>, DomainError> {
    let start = ToneVariant::ALL.iter().position(|t| *t == current).unwrap_or(0);
    let options: Vec<Choice<ToneVariant>> = ToneVariant::ALL
        .iter()
        .map(|t| choice(t.label(), *t))
        .collect();
    Ok(ask(Select::new("Tone", options).with_starting_cursor(start).prompt())?.map(|c| c.value))
}

#[derive(Clone, Copy)]
enum MainAction {
    Profile,
    Sectors,
    Discover,
    Discovered,
    Saved,
    Stats,
    Export,
    Quit,
}

#[derive(Clone, Copy)]
enum SectorAction {
    Choose,
    Toggle,
    Refresh,
}

#[derive(Clone, Copy)]
enum ProposalAction {
    Generate,
    Tone,
    Copy(ProposalKind),
    Save,
    Back,
}

#[derive(Clone, Copy)]
enum SavedAction {
    Edit,
    Status,
    Priority,
    Notes,
    SaveEdit,
    CancelEdit,
    Regenerate,
    Tone,
    Copy(ProposalKind),
    Delete,
    Back,
}

/// All page models, owned by the UI for the session.
struct Pages {
    profile: ProfileEditor,
    sectors: SectorSelector,
    discovery: LeadDiscovery,
    detail: LeadDetail,
    saved_editor: SavedLeadEditor,
    saved_table: SavedLeadsTable,
    export_path: PathBuf,
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    pages: Mutex<Pages>,
}

impl TuiInputPort {
    /// Builds every page model on the shared adapters.
    ///
    /// # Arguments
    /// * `api` - Lead backend (HTTP or mock).
    /// * `cache` - Discovered-leads cache.
    /// * `clipboard` - Copy target.
    /// * `export_path` - Default CSV export path.
    pub fn new(
        api: Arc<dyn LeadApiPort>,
        cache: Arc<dyn LeadCachePort>,
        clipboard: Arc<dyn ClipboardPort>,
        export_path: PathBuf,
    ) -> Self {
        let pages = Pages {
            profile: ProfileEditor::new(Arc::clone(&api)),
            sectors: SectorSelector::new(Arc::clone(&api)),
            discovery: LeadDiscovery::new(Arc::clone(&api), Arc::clone(&cache)),
            detail: LeadDetail::new(Arc::clone(&api), cache, Arc::clone(&clipboard)),
            saved_editor: SavedLeadEditor::new(Arc::clone(&api), clipboard),
            saved_table: SavedLeadsTable::new(api),
            export_path,
        };
        Self {
            pages: Mutex::new(pages),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut pages = self.pages.lock().await;
        match pages.main_menu().await {
            Err(DomainError::Interrupted) => {
                info!("interrupted; leaving dashboard");
                Ok(())
            }
            other => other,
        }
    }
}

impl Pages {
    /// Loads the profile and the cached leads, then loops over the main menu until Quit.
    async fn main_menu(&mut self) -> Result<(), DomainError> {
        with_spinner("Loading company profile", self.profile.load()).await;
        render::print_error(self.profile.error());
        let cached = self.discovery.restore().await;
        if cached > 0 {
            render::print_info(&format!("{} discovered leads restored from cache", cached));
        }

        loop {
            let options = vec![
                choice("Company Profile", MainAction::Profile),
                choice(
                    format!("Sectors ({} selected)", self.sectors.selected_count()),
                    MainAction::Sectors,
                ),
                choice("Discover Leads", MainAction::Discover),
                choice(
                    format!("Discovered Leads ({})", self.discovery.rows().len()),
                    MainAction::Discovered,
                ),
                choice("Saved Leads", MainAction::Saved),
                choice("Statistics", MainAction::Stats),
                choice("Export saved leads (CSV)", MainAction::Export),
                choice("Quit", MainAction::Quit),
            ];
            let action = pick("LeadSense", options)?.unwrap_or(MainAction::Quit);
            match action {
                MainAction::Profile => self.profile_view().await?,
                MainAction::Sectors => self.sectors_view().await?,
                MainAction::Discover => self.discover().await?,
                MainAction::Discovered => self.discovered_view().await?,
                MainAction::Saved => self.saved_view().await?,
                MainAction::Stats => self.stats_view().await,
                MainAction::Export => self.export_view().await?,
                MainAction::Quit => return Ok(()),
            }
        }
    }

    /// Field-by-field profile form with an explicit save.
    async fn profile_view(&mut self) -> Result<(), DomainError> {
        loop {
            render::print_heading("Company Profile");
            for field in ProfileField::ALL {
                println!("{:<34}{}", field.label(), self.profile.field_value(field));
            }
            match self.profile.id() {
                Some(id) => println!("{}", format!("Saved as profile #{}", id).dark_grey()),
                None => println!("{}", "Not saved yet".dark_grey()),
            }
            render::print_error(self.profile.error());

            let mut options: Vec<Choice<Option<ProfileField>>> = ProfileField::ALL
                .iter()
                .map(|f| choice(format!("Edit {}", f.label()), Some(*f)))
                .collect();
            options.push(choice("Save profile", None));
            let Some(action) = pick("Profile", options)? else {
                return Ok(());
            };
            match action {
                Some(field) => {
                    let current = self.profile.field_value(field);
                    if let Some(value) =
                        ask(Text::new(field.label()).with_initial_value(&current).prompt())?
                    {
                        self.profile.set_field(field, &value);
                    }
                }
                None => {
                    if let Some(outcome) = with_spinner("Saving profile", self.profile.save()).await
                    {
                        render::print_info(match outcome {
                            SaveOutcome::Created => "Profile created",
                            SaveOutcome::Updated => "Profile updated",
                        });
                    }
                }
            }
        }
    }

    /// Sector list with multi-select; Refresh re-runs identification for the current profile.
    async fn sectors_view(&mut self) -> Result<(), DomainError> {
        if self.sectors.sectors().is_empty() {
            with_spinner("Loading sectors", self.sectors.load()).await;
        }
        loop {
            render::print_heading("Target Sectors");
            if self.sectors.sectors().is_empty() {
                println!("No sectors yet. Refresh to identify sectors for your profile.");
            }
            for sector in self.sectors.sectors() {
                println!("{}", render::sector_line(sector, self.sectors.is_selected(sector.id)));
            }
            render::print_error(self.sectors.error());

            let options = vec![
                choice("Choose sectors", SectorAction::Choose),
                choice("Toggle one sector", SectorAction::Toggle),
                choice("Refresh (identify sectors for current profile)", SectorAction::Refresh),
            ];
            let Some(action) = pick("Sectors", options)? else {
                return Ok(());
            };
            match action {
                SectorAction::Toggle => {
                    let options: Vec<Choice<i64>> = self
                        .sectors
                        .sectors()
                        .iter()
                        .map(|s| choice(render::sector_line(s, self.sectors.is_selected(s.id)), s.id))
                        .collect();
                    if let Some(id) = pick("Toggle sector", options)? {
                        self.sectors.toggle(id);
                    }
                }
                SectorAction::Choose => {
                    let options: Vec<Choice<i64>> = self
                        .sectors
                        .sectors()
                        .iter()
                        .map(|s| choice(s.name.clone(), s.id))
                        .collect();
                    if options.is_empty() {
                        continue;
                    }
                    let defaults: Vec<usize> = self
                        .sectors
                        .sectors()
                        .iter()
                        .enumerate()
                        .filter(|(_, s)| self.sectors.is_selected(s.id))
                        .map(|(i, _)| i)
                        .collect();
                    let picked = ask(
                        MultiSelect::new("Target sectors", options)
                            .with_default(&defaults)
                            .prompt(),
                    )?;
                    if let Some(picked) = picked {
                        self.sectors.set_selected(picked.into_iter().map(|c| c.value));
                    }
                }
                SectorAction::Refresh => {
                    with_spinner(
                        "Identifying sectors",
                        self.sectors.refresh(self.profile.profile()),
                    )
                    .await;
                }
            }
        }
    }

    /// Runs discovery for the selected sectors and opens the result table.
    async fn discover(&mut self) -> Result<(), DomainError> {
        let names = self.sectors.selected_names();
        render::print_heading("Discover Leads");
        if !names.is_empty() {
            println!("Sectors: {}", names.join(", "));
        }
        let ok = with_spinner(
            "Discovering leads (this can take a few minutes)",
            self.discovery.discover(self.profile.profile(), &names),
        )
        .await;
        if !ok {
            render::print_error(self.discovery.error());
            return Ok(());
        }
        render::print_info(&format!("{} leads discovered", self.discovery.rows().len()));
        // A failed cache write stays on the page error and shows in the table view.
        self.discovered_view().await
    }

    /// Discovered-leads table with saved markers.
    async fn discovered_view(&mut self) -> Result<(), DomainError> {
        if self.discovery.rows().is_empty() {
            self.discovery.restore().await;
        }
        with_spinner("Checking saved leads", self.discovery.refresh_saved_index()).await;
        loop {
            render::print_heading("Discovered Leads");
            if self.discovery.rows().is_empty() {
                println!("No discovered leads yet. Select sectors and run Discover Leads.");
                render::print_error(self.discovery.error());
                return Ok(());
            }
            for (i, lead) in self.discovery.rows().iter().enumerate() {
                println!("{}", render::discovered_row(i, lead, self.discovery.is_saved(i)));
            }
            render::print_error(self.discovery.error());

            let options: Vec<Choice<usize>> = self
                .discovery
                .rows()
                .iter()
                .enumerate()
                .map(|(i, lead)| choice(format!("{:>3}. {}", i + 1, lead.company_name), i))
                .collect();
            let Some(index) = pick("Open lead (Esc to go back)", options)? else {
                return Ok(());
            };
            self.discovered_row_actions(index).await?;
        }
    }

    async fn discovered_row_actions(&mut self, index: usize) -> Result<(), DomainError> {
        let mut options = vec![choice("View details & proposals", true)];
        if !self.discovery.is_saved(index) {
            options.push(choice("Save lead", false));
        }
        let Some(view) = pick("Lead", options)? else {
            return Ok(());
        };
        if view {
            let source = match self.discovery.lead(index) {
                Some(lead) => LeadSource::Navigation {
                    lead: lead.clone(),
                    index: Some(index),
                },
                None => LeadSource::CacheIndex(index),
            };
            self.detail_view(source).await?;
            if let Some(lead) = self.detail.lead() {
                self.discovery.update_row(index, lead.clone());
            }
            self.discovery.refresh_saved_index().await;
        } else {
            let names = self.sectors.selected_names();
            if let Some(saved) =
                with_spinner("Saving lead", self.discovery.save_row(index, &names)).await
            {
                render::print_info(&format!("Saved as lead #{}", saved.id));
            }
        }
        Ok(())
    }

    /// Lead card, saved state, proposals with tone switch and copy actions.
    async fn detail_view(&mut self, source: LeadSource) -> Result<(), DomainError> {
        if !self.detail.open(source).await {
            render::print_error(self.detail.error());
            return Ok(());
        }
        loop {
            let Some(lead) = self.detail.lead() else {
                return Ok(());
            };
            render::print_heading("Lead Detail");
            print!("{}", render::lead_card(lead));
            match self.detail.saved_id() {
                Some(id) => println!("{}", format!("Saved as lead #{}", id).green()),
                None => println!("{}", "Not saved".dark_grey()),
            }
            let has_proposals = lead.automation_email.is_some() || lead.linkedin_message.is_some();
            let single_tone = [ProposalKind::Email, ProposalKind::LinkedIn]
                .iter()
                .filter_map(|k| lead.proposal(*k))
                .all(|p| !p.has_variants());
            if has_proposals {
                println!();
                println!("{}", tone_tabs(self.detail.tone()));
                if single_tone {
                    println!("{}", "Same text for every tone".dark_grey());
                }
                for kind in [ProposalKind::Email, ProposalKind::LinkedIn] {
                    if let Some(text) = self.detail.proposal_text(kind) {
                        println!("\n{}", format!("── {} ──", kind).magenta());
                        render::print_markdown(text);
                    }
                }
            }
            render::print_error(self.detail.error());

            let mut options = vec![choice(
                if has_proposals { "Regenerate proposals" } else { "Generate proposals" },
                ProposalAction::Generate,
            )];
            if has_proposals {
                options.push(choice("Switch tone", ProposalAction::Tone));
                for kind in [ProposalKind::Email, ProposalKind::LinkedIn] {
                    options.push(choice(
                        format!("{} {}", self.detail.copy_label(kind), kind),
                        ProposalAction::Copy(kind),
                    ));
                }
            }
            if self.detail.saved_id().is_none() {
                options.push(choice("Save lead", ProposalAction::Save));
            }
            options.push(choice("Back", ProposalAction::Back));

            match pick("Proposals", options)?.unwrap_or(ProposalAction::Back) {
                ProposalAction::Generate => {
                    with_spinner(
                        "Generating email and LinkedIn proposals",
                        self.detail.generate(self.profile.profile()),
                    )
                    .await;
                }
                ProposalAction::Tone => {
                    if let Some(tone) = pick_tone(self.detail.tone())? {
                        self.detail.set_tone(tone);
                    }
                }
                ProposalAction::Copy(kind) => {
                    self.detail.copy(kind).await;
                }
                ProposalAction::Save => {
                    let names = self.sectors.selected_names();
                    with_spinner("Saving lead", self.detail.save(&names)).await;
                }
                ProposalAction::Back => return Ok(()),
            }
        }
    }

    /// Saved-leads table; reloaded every time it is shown.
    async fn saved_view(&mut self) -> Result<(), DomainError> {
        loop {
            with_spinner("Loading saved leads", self.saved_table.load()).await;
            render::print_heading("Saved Leads");
            if self.saved_table.rows().is_empty() {
                println!("No saved leads yet.");
            }
            for lead in self.saved_table.rows() {
                println!("{}", render::saved_row(lead));
            }
            render::print_error(self.saved_table.error());

            let options: Vec<Choice<i64>> = self
                .saved_table
                .rows()
                .iter()
                .map(|l| choice(format!("#{} {}", l.id, l.lead.company_name), l.id))
                .collect();
            let Some(id) = pick("Open saved lead (Esc to go back)", options)? else {
                return Ok(());
            };
            self.saved_detail_view(id).await?;
        }
    }

    /// Saved-lead detail.
    ///
    /// # Arguments
    /// * `id` - Backend id of the saved lead.
    async fn saved_detail_view(&mut self, id: i64) -> Result<(), DomainError> {
        if !with_spinner("Loading lead", self.saved_editor.open(id)).await {
            render::print_error(self.saved_editor.error());
            return Ok(());
        }
        loop {
            let Some(saved) = self.saved_editor.lead() else {
                return Ok(());
            };
            render::print_heading(&format!("Saved Lead #{}", saved.id));
            print!("{}", render::lead_card(&saved.lead));
            println!(
                "{:<14}{}  {}",
                "Status:",
                render::saved_row_badges(saved),
                format!("discovered {}", saved.discovered_at).dark_grey()
            );
            if !saved.discovered_sectors.is_empty() {
                println!("{:<14}{}", "Sectors:", saved.discovered_sectors.join(", "));
            }
            println!("{:<14}{}", "Notes:", saved.notes.as_deref().unwrap_or("-"));

            let has_proposals =
                saved.lead.automation_email.is_some() || saved.lead.linkedin_message.is_some();
            if has_proposals {
                println!();
                println!("{}", tone_tabs(self.saved_editor.tone()));
                for kind in [ProposalKind::Email, ProposalKind::LinkedIn] {
                    if let Some(text) = self.saved_editor.active_text(kind) {
                        println!("\n{}", format!("── {} ──", kind).magenta());
                        render::print_markdown(text);
                    }
                }
            }
            if let Some(draft) = self.saved_editor.draft() {
                println!();
                println!(
                    "{}",
                    format!(
                        "Editing: status={} priority={} notes={:?}",
                        draft.status, draft.priority, draft.notes
                    )
                    .yellow()
                );
            }
            render::print_error(self.saved_editor.error());

            let options = if self.saved_editor.is_editing() {
                vec![
                    choice("Change status", SavedAction::Status),
                    choice("Change priority", SavedAction::Priority),
                    choice("Edit notes", SavedAction::Notes),
                    choice("Save changes", SavedAction::SaveEdit),
                    choice("Cancel", SavedAction::CancelEdit),
                ]
            } else {
                let mut options = vec![
                    choice("Edit status / priority / notes", SavedAction::Edit),
                    choice("Regenerate proposals", SavedAction::Regenerate),
                ];
                if has_proposals {
                    options.push(choice("Switch tone tab", SavedAction::Tone));
                    for kind in [ProposalKind::Email, ProposalKind::LinkedIn] {
                        options.push(choice(
                            format!("{} {}", self.saved_editor.copy_label(kind), kind),
                            SavedAction::Copy(kind),
                        ));
                    }
                }
                options.push(choice("Delete lead", SavedAction::Delete));
                options.push(choice("Back", SavedAction::Back));
                options
            };

            let fallback = if self.saved_editor.is_editing() {
                SavedAction::CancelEdit
            } else {
                SavedAction::Back
            };
            match pick("Saved lead", options)?.unwrap_or(fallback) {
                SavedAction::Edit => self.saved_editor.begin_edit(),
                SavedAction::Status => {
                    let current = self.saved_editor.draft().map(|d| d.status).unwrap_or_default();
                    let start = LeadStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);
                    let options: Vec<Choice<LeadStatus>> = LeadStatus::ALL
                        .iter()
                        .map(|s| choice(s.as_str(), *s))
                        .collect();
                    if let Some(c) =
                        ask(Select::new("Status", options).with_starting_cursor(start).prompt())?
                    {
                        self.saved_editor.set_status(c.value);
                    }
                }
                SavedAction::Priority => {
                    let current = self.saved_editor.draft().map(|d| d.priority).unwrap_or_default();
                    let start = LeadPriority::ALL.iter().position(|p| *p == current).unwrap_or(0);
                    let options: Vec<Choice<LeadPriority>> = LeadPriority::ALL
                        .iter()
                        .map(|p| choice(p.as_str(), *p))
                        .collect();
                    if let Some(c) =
                        ask(Select::new("Priority", options).with_starting_cursor(start).prompt())?
                    {
                        self.saved_editor.set_priority(c.value);
                    }
                }
                SavedAction::Notes => {
                    let current = self
                        .saved_editor
                        .draft()
                        .map(|d| d.notes.clone())
                        .unwrap_or_default();
                    if let Some(notes) =
                        ask(Text::new("Notes").with_initial_value(&current).prompt())?
                    {
                        self.saved_editor.set_notes(notes);
                    }
                }
                SavedAction::SaveEdit => {
                    if with_spinner("Saving changes", self.saved_editor.save()).await {
                        render::print_info("Lead updated");
                    }
                }
                SavedAction::CancelEdit => self.saved_editor.cancel(),
                SavedAction::Regenerate => {
                    with_spinner(
                        "Regenerating proposals",
                        self.saved_editor.regenerate(self.profile.profile()),
                    )
                    .await;
                }
                SavedAction::Tone => {
                    if let Some(tone) = pick_tone(self.saved_editor.tone())? {
                        self.saved_editor.set_tone(tone);
                    }
                }
                SavedAction::Copy(kind) => {
                    self.saved_editor.copy(kind).await;
                }
                SavedAction::Delete => {
                    let name = self
                        .saved_editor
                        .lead()
                        .map(|l| l.lead.company_name.clone())
                        .unwrap_or_default();
                    let confirmed = ask(
                        Confirm::new(&format!("Delete {}? This cannot be undone.", name))
                            .with_default(false)
                            .prompt(),
                    )?
                    .unwrap_or(false);
                    if !confirmed {
                        continue;
                    }
                    if with_spinner("Deleting lead", self.saved_table.delete(id)).await {
                        render::print_info("Lead deleted");
                        return Ok(());
                    }
                    render::print_error(self.saved_table.error());
                }
                SavedAction::Back => return Ok(()),
            }
        }
    }

    async fn stats_view(&mut self) {
        with_spinner("Loading saved leads", self.saved_table.load()).await;
        render::print_heading("Statistics");
        if let Some(e) = self.saved_table.error() {
            render::print_error(Some(e));
            return;
        }
        print!("{}", render::stats_report(&self.saved_table.stats()));
    }

    /// Writes all saved leads to a CSV path the user confirms.
    async fn export_view(&mut self) -> Result<(), DomainError> {
        with_spinner("Loading saved leads", self.saved_table.load()).await;
        if let Some(e) = self.saved_table.error() {
            render::print_error(Some(e));
            return Ok(());
        }
        let default = self.export_path.display().to_string();
        let Some(path) = ask(Text::new("Export to").with_initial_value(&default).prompt())? else {
            return Ok(());
        };
        let path = PathBuf::from(path.trim());
        if self.saved_table.export_csv(&path).await {
            render::print_info(&format!(
                "{} leads exported to {}",
                self.saved_table.rows().len(),
                path.display()
            ));
        } else {
            render::print_error(self.saved_table.error());
        }
        Ok(())
    }
}
