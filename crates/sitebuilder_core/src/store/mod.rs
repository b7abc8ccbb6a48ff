//! Document store: the single owner of project and selection state.
//!
//! # Responsibility
//! - Hold the canonical project snapshot plus active page / selected section.
//! - Expose every mutation as a named operation and notify subscribers.
//! - Bootstrap from persistence and drive debounced autosave.
//!
//! # Invariants
//! - The project always has at least one page.
//! - Every mutation installs a new snapshot; an `Arc<Project>` handed out
//!   earlier is never modified.
//! - A mutation touching page content stamps that page's `updated_at`.
//! - `selected_section_id`, when set, names a section of the active page.
//! - Operations on unknown page/section ids are no-ops returning `false`.

mod events;

pub use events::{Listener, StoreEvent, SubscriptionId};

use crate::config::BuilderConfig;
use crate::export::{export_project, ExportBundle, ExportError};
use crate::model::id::{PageId, SectionId};
use crate::model::project::{Page, Project, Theme};
use crate::model::section::{Section, SectionPatch, SectionType};
use crate::scheduler::DebouncedTask;
use crate::storage::{KeyValueStore, ProjectStorage};
use events::Subscribers;
use log::{debug, info};
use std::sync::Arc;

/// Canonical project state container.
///
/// Owned by the application's composition root; presentation code reads
/// through the accessors and writes only through the named operations.
pub struct DocumentStore<S: KeyValueStore> {
    project: Arc<Project>,
    active_page_id: Option<PageId>,
    selected_section_id: Option<SectionId>,
    storage: Arc<ProjectStorage<S>>,
    config: BuilderConfig,
    subscribers: Subscribers,
    autosave: Option<SubscriptionId>,
}

impl<S: KeyValueStore> DocumentStore<S> {
    /// Creates a store over `backend` with default configuration.
    ///
    /// The store starts with an unsaved starter project and no active page;
    /// call [`DocumentStore::initialize`] once per session.
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, BuilderConfig::default())
    }

    pub fn with_config(backend: S, config: BuilderConfig) -> Self {
        let storage = ProjectStorage::with_key(backend, config.storage_key.clone());
        Self {
            project: Arc::new(Project::starter()),
            active_page_id: None,
            selected_section_id: None,
            storage: Arc::new(storage),
            config,
            subscribers: Subscribers::default(),
            autosave: None,
        }
    }

    // ---- queries ----

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Cheap handle to the current immutable snapshot.
    pub fn snapshot(&self) -> Arc<Project> {
        Arc::clone(&self.project)
    }

    pub fn active_page_id(&self) -> Option<&str> {
        self.active_page_id.as_deref()
    }

    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section_id.as_deref()
    }

    /// Page identified by the active page id, if it still exists.
    pub fn active_page(&self) -> Option<&Page> {
        let page_id = self.active_page_id.as_deref()?;
        self.project.page(page_id)
    }

    /// Selected section resolved inside the active page.
    pub fn selected_section(&self) -> Option<&Section> {
        let section_id = self.selected_section_id.as_deref()?;
        self.active_page()?.section(section_id)
    }

    /// Page shown by a preview: the active page, else the home page.
    pub fn preview_page(&self) -> Option<&Page> {
        self.active_page().or_else(|| self.project.home_page())
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn storage(&self) -> &ProjectStorage<S> {
        &self.storage
    }

    // ---- lifecycle ----

    /// Loads the persisted project, or creates and saves the starter project.
    ///
    /// Activates the first page and clears the section selection. Calling it
    /// again reloads from storage.
    pub fn initialize(&mut self) {
        let project = match self.storage.load() {
            Some(project) => {
                info!(
                    "event=store_init module=store status=ok source=storage project_id={} pages={}",
                    project.id,
                    project.pages.len()
                );
                project
            }
            None => {
                let project = Project::starter();
                self.storage.save(&project);
                info!(
                    "event=store_init module=store status=ok source=default project_id={}",
                    project.id
                );
                project
            }
        };

        let first_page = project.home_page().map(|page| page.id.clone());
        self.project = Arc::new(project);
        self.publish_project();
        self.set_selection(first_page, None);
    }

    /// Writes the current project immediately, bypassing autosave debounce.
    ///
    /// Returns whether the write succeeded; failures are logged by storage.
    pub fn save_to_storage(&self) -> bool {
        self.storage.save(&self.project)
    }

    /// Builds the static export bundle for the current snapshot.
    pub fn export(&self) -> Result<ExportBundle, ExportError> {
        export_project(&self.project)
    }

    // ---- project ----

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_mut().name = name.into();
        debug!("event=project_rename module=store status=ok");
        self.publish_project();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.project_mut().theme = theme;
        debug!("event=theme_set module=store status=ok theme={}", theme.as_str());
        self.publish_project();
    }

    /// Flips light/dark and returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.project.theme.toggled();
        self.set_theme(theme);
        theme
    }

    // ---- pages ----

    /// Appends a "New Page" at `/new-page` and makes it active.
    pub fn add_page(&mut self) -> PageId {
        let page = Page::untitled();
        let page_id = page.id.clone();
        self.project_mut().pages.push(page);
        debug!("event=page_add module=store status=ok page_id={page_id}");
        self.publish_project();
        self.set_selection(Some(page_id.clone()), None);
        page_id
    }

    /// Removes a page, substituting an empty "Home" page if none would remain.
    ///
    /// When the removed page was active, the first page becomes active.
    pub fn delete_page(&mut self, page_id: &str) -> bool {
        if self.project.page(page_id).is_none() {
            return self.skip("page_delete", page_id);
        }

        let project = self.project_mut();
        project.pages.retain(|page| page.id != page_id);
        if project.pages.is_empty() {
            project.pages.push(Page::home());
        }
        let first_page = project.home_page().map(|page| page.id.clone());
        debug!(
            "event=page_delete module=store status=ok page_id={page_id} remaining={}",
            self.project.pages.len()
        );
        self.publish_project();

        if self.active_page_id.as_deref() == Some(page_id) {
            self.set_selection(first_page, None);
        }
        true
    }

    pub fn rename_page(&mut self, page_id: &str, name: impl Into<String>) -> bool {
        if self.project.page(page_id).is_none() {
            return self.skip("page_rename", page_id);
        }
        if let Some(page) = self.project_mut().page_mut(page_id) {
            page.name = name.into();
            page.touch();
        }
        debug!("event=page_rename module=store status=ok page_id={page_id}");
        self.publish_project();
        true
    }

    /// Activates a page and always clears the section selection.
    pub fn set_active_page(&mut self, page_id: &str) -> bool {
        if self.project.page(page_id).is_none() {
            return self.skip("page_activate", page_id);
        }
        self.set_selection(Some(page_id.to_string()), None);
        true
    }

    // ---- sections ----

    /// Appends a placeholder section of `kind` to the active page and selects it.
    pub fn add_section(&mut self, kind: SectionType) -> Option<SectionId> {
        let section = Section::new(kind);
        let section_id = section.id.clone();
        let page_id = self.with_active_page(|page| {
            page.sections.push(section);
            true
        })?;
        debug!(
            "event=section_add module=store status=ok page_id={page_id} section_id={section_id} type={kind}"
        );
        self.publish_project();
        self.set_selection(Some(page_id), Some(section_id.clone()));
        Some(section_id)
    }

    /// Removes a section from the active page, clearing it from the selection.
    pub fn delete_section(&mut self, section_id: &str) -> bool {
        let removed = self.with_active_page(|page| {
            let before = page.sections.len();
            page.sections.retain(|section| section.id != section_id);
            page.sections.len() != before
        });
        let Some(page_id) = removed else {
            return self.skip("section_delete", section_id);
        };
        debug!(
            "event=section_delete module=store status=ok page_id={page_id} section_id={section_id}"
        );
        self.publish_project();

        if self.selected_section_id.as_deref() == Some(section_id) {
            self.set_selection(Some(page_id), None);
        }
        true
    }

    /// Shallow-merges `patch` into a section of the active page.
    ///
    /// The section's type never changes; patch fields of other types are
    /// ignored.
    pub fn update_section(&mut self, section_id: &str, patch: &SectionPatch) -> bool {
        let updated = self.with_active_page(|page| match page.section_mut(section_id) {
            Some(section) => {
                section.data.apply(patch);
                true
            }
            None => false,
        });
        let Some(page_id) = updated else {
            return self.skip("section_update", section_id);
        };
        debug!(
            "event=section_update module=store status=ok page_id={page_id} section_id={section_id}"
        );
        self.publish_project();
        true
    }

    /// Replaces the active page's section list wholesale.
    ///
    /// The caller supplies the permutation; it is not validated. A selected
    /// section missing from the new list is deselected.
    pub fn reorder_sections(&mut self, sections: Vec<Section>) -> bool {
        let count = sections.len();
        let reordered = self.with_active_page(|page| {
            page.sections = sections;
            true
        });
        let Some(page_id) = reordered else {
            return self.skip("section_reorder", "-");
        };
        debug!("event=section_reorder module=store status=ok page_id={page_id} sections={count}");
        self.publish_project();

        if self.selected_section_id.is_some() && self.selected_section().is_none() {
            self.set_selection(Some(page_id), None);
        }
        true
    }

    /// Drag-and-drop helper: moves `section_id` to the position of `target_id`.
    ///
    /// Computes the permutation and applies it through
    /// [`DocumentStore::reorder_sections`].
    pub fn move_section(&mut self, section_id: &str, target_id: &str) -> bool {
        let Some(page) = self.active_page() else {
            return self.skip("section_move", section_id);
        };
        let from = page.sections.iter().position(|s| s.id == section_id);
        let to = page.sections.iter().position(|s| s.id == target_id);
        let (Some(from), Some(to)) = (from, to) else {
            return self.skip("section_move", section_id);
        };
        if from == to {
            return false;
        }

        let mut sections = page.sections.clone();
        let moved = sections.remove(from);
        sections.insert(to, moved);
        self.reorder_sections(sections)
    }

    /// Sets or clears the selected section.
    ///
    /// `Some(id)` is accepted only for a section of the active page.
    pub fn set_selected_section(&mut self, section_id: Option<&str>) -> bool {
        match section_id {
            None => {
                self.set_selection(self.active_page_id.clone(), None);
                true
            }
            Some(section_id) => {
                let exists = self
                    .active_page()
                    .is_some_and(|page| page.section(section_id).is_some());
                if !exists {
                    return self.skip("section_select", section_id);
                }
                self.set_selection(self.active_page_id.clone(), Some(section_id.to_string()));
                true
            }
        }
    }

    // ---- subscriptions ----

    /// Registers a listener called after every effective change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.autosave == Some(id) {
            self.autosave = None;
        }
        self.subscribers.remove(id).is_some()
    }

    pub fn is_autosave_enabled(&self) -> bool {
        self.autosave.is_some()
    }

    /// Stops autosave, persisting a still-pending snapshot first.
    pub fn disable_autosave(&mut self) -> bool {
        match self.autosave.take() {
            Some(id) => {
                // Dropping the listener drops its task, which flushes and joins.
                drop(self.subscribers.remove(id));
                info!(
                    "event=autosave_disable module=store status=ok listeners={}",
                    self.subscribers.len()
                );
                true
            }
            None => false,
        }
    }

    // ---- internals ----

    fn project_mut(&mut self) -> &mut Project {
        Arc::make_mut(&mut self.project)
    }

    /// Runs `edit` on the active page; on `true`, stamps the page.
    ///
    /// Returns the active page id when the edit took effect.
    fn with_active_page(&mut self, edit: impl FnOnce(&mut Page) -> bool) -> Option<PageId> {
        let page_id = self.active_page()?.id.clone();
        let mut draft = self.active_page()?.clone();
        if !edit(&mut draft) {
            return None;
        }
        draft.touch();
        if let Some(page) = self.project_mut().page_mut(&page_id) {
            *page = draft;
        }
        Some(page_id)
    }

    fn set_selection(
        &mut self,
        active_page_id: Option<PageId>,
        selected_section_id: Option<SectionId>,
    ) {
        if self.active_page_id == active_page_id
            && self.selected_section_id == selected_section_id
        {
            return;
        }
        self.active_page_id = active_page_id;
        self.selected_section_id = selected_section_id;
        self.subscribers.emit(&StoreEvent::SelectionChanged {
            active_page_id: self.active_page_id.clone(),
            selected_section_id: self.selected_section_id.clone(),
        });
    }

    fn publish_project(&mut self) {
        let snapshot = Arc::clone(&self.project);
        self.subscribers.emit(&StoreEvent::ProjectChanged(snapshot));
    }

    fn skip(&self, event: &str, target: &str) -> bool {
        debug!("event={event} module=store status=skip reason=unknown_target target={target}");
        false
    }
}

impl<S: KeyValueStore + Send + 'static> DocumentStore<S> {
    /// Persists every project change after the configured quiet period.
    ///
    /// Enabling twice is a no-op.
    ///
    /// # Errors
    /// - Returns an error when the autosave worker thread cannot be spawned.
    pub fn enable_autosave(&mut self) -> std::io::Result<()> {
        if self.autosave.is_some() {
            return Ok(());
        }

        let storage = Arc::clone(&self.storage);
        let delay = self.config.autosave_delay();
        let task = DebouncedTask::spawn(delay, move |project: Arc<Project>| {
            if storage.save(&project) {
                debug!(
                    "event=autosave_flush module=store status=ok project_id={}",
                    project.id
                );
            }
        })?;

        let id = self.subscribe(move |event| {
            if let StoreEvent::ProjectChanged(snapshot) = event {
                task.trigger(Arc::clone(snapshot));
            }
        });
        self.autosave = Some(id);
        info!(
            "event=autosave_enable module=store status=ok delay_ms={}",
            self.config.autosave_delay_ms
        );
        Ok(())
    }
}
