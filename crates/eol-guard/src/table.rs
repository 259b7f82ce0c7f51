//! In-memory running document table.
//!
//! [`DocumentTable`] is a small, UI-agnostic host: it owns open documents (text, view state,
//! breakpoints, dirty flag) keyed by an opaque [`DocumentCookie`], and delivers lifecycle
//! notifications to subscribers registered with [`DocumentTable::advise`].
//!
//! It behaves like a typical IDE document model in one important way: replacing a document's
//! text wholesale through [`DocumentHost::write_text`] resets its caret, scroll offsets and
//! breakpoints. Subscribers that rewrite text must restore that state themselves.

use crate::host::{AttributeChanges, DocumentHost, DocumentLifecycleEvents, EventStatus};
use crate::{Breakpoint, HostError, Position, ScrollState, TableError, ViewState};
use std::collections::{BTreeMap, HashMap};

/// Opaque identifier for an open document in a [`DocumentTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentCookie(u64);

impl DocumentCookie {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for a lifecycle subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdviseCookie(u64);

impl AdviseCookie {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A boxed lifecycle subscriber of a [`DocumentTable`].
pub type TableSubscriber = Box<dyn DocumentLifecycleEvents<DocumentTable>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ViewCore {
    caret: Position,
    scroll: ScrollState,
}

#[derive(Debug)]
struct DocumentEntry {
    moniker: Option<String>,
    text: String,
    view: Option<ViewCore>,
    breakpoints: Vec<Breakpoint>,
    dirty: bool,
    read_only: bool,
    version: u64,
}

/// In-memory [`DocumentHost`] with lifecycle notifications.
#[derive(Default)]
pub struct DocumentTable {
    documents: BTreeMap<DocumentCookie, DocumentEntry>,
    moniker_to_document: HashMap<String, DocumentCookie>,
    subscribers: Vec<(AdviseCookie, TableSubscriber)>,
    notifying: bool,
    deferred_dirty: Vec<DocumentCookie>,
    next_document_id: u64,
    next_advise_id: u64,
}

impl std::fmt::Debug for DocumentTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentTable")
            .field("documents", &self.documents)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl DocumentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Cookies of all open documents, in opening order.
    pub fn cookies(&self) -> impl Iterator<Item = DocumentCookie> + '_ {
        self.documents.keys().copied()
    }

    /// Register a lifecycle subscriber.
    pub fn advise(
        &mut self,
        subscriber: impl DocumentLifecycleEvents<DocumentTable> + 'static,
    ) -> AdviseCookie {
        let cookie = AdviseCookie(self.next_advise_id);
        self.next_advise_id += 1;
        self.subscribers.push((cookie, Box::new(subscriber)));
        cookie
    }

    /// Remove a lifecycle subscriber.
    pub fn unadvise(&mut self, cookie: AdviseCookie) -> Result<(), TableError> {
        let index = self
            .subscribers
            .iter()
            .position(|(id, _)| *id == cookie)
            .ok_or(TableError::SubscriberNotFound(cookie))?;
        self.subscribers.remove(index);
        Ok(())
    }

    /// Open a document with a single view, caret at the start.
    ///
    /// Monikers (paths/URIs) are unique within a table.
    pub fn open(
        &mut self,
        moniker: Option<String>,
        text: impl Into<String>,
    ) -> Result<DocumentCookie, TableError> {
        if let Some(moniker) = moniker.as_ref()
            && self.moniker_to_document.contains_key(moniker)
        {
            return Err(TableError::MonikerAlreadyOpen(moniker.clone()));
        }

        let cookie = DocumentCookie(self.next_document_id);
        self.next_document_id += 1;
        if let Some(moniker) = moniker.as_ref() {
            self.moniker_to_document.insert(moniker.clone(), cookie);
        }
        self.documents.insert(
            cookie,
            DocumentEntry {
                moniker,
                text: text.into(),
                view: Some(ViewCore::default()),
                breakpoints: Vec::new(),
                dirty: false,
                read_only: false,
                version: 0,
            },
        );

        self.notify(|subscriber, table| subscriber.on_after_first_lock(table, cookie));
        Ok(cookie)
    }

    /// Close a document.
    pub fn close(&mut self, cookie: DocumentCookie) -> Result<(), TableError> {
        self.entry(cookie)?;
        self.notify(|subscriber, table| subscriber.on_before_last_unlock(table, cookie));

        // A subscriber may already have closed it.
        if let Some(entry) = self.documents.remove(&cookie)
            && let Some(moniker) = entry.moniker
        {
            self.moniker_to_document.remove(&moniker);
        }
        Ok(())
    }

    /// Look up a document by moniker.
    pub fn cookie_for_moniker(&self, moniker: &str) -> Option<DocumentCookie> {
        self.moniker_to_document.get(moniker).copied()
    }

    /// Moniker of a document.
    pub fn moniker(&self, cookie: DocumentCookie) -> Result<Option<&str>, TableError> {
        Ok(self.entry(cookie)?.moniker.as_deref())
    }

    /// Current text of a document.
    pub fn text(&self, cookie: DocumentCookie) -> Result<&str, TableError> {
        Ok(&self.entry(cookie)?.text)
    }

    /// Whether a document has unsaved changes.
    pub fn is_dirty(&self, cookie: DocumentCookie) -> Result<bool, TableError> {
        Ok(self.entry(cookie)?.dirty)
    }

    /// Document version (incremented after each text change).
    pub fn version(&self, cookie: DocumentCookie) -> Result<u64, TableError> {
        Ok(self.entry(cookie)?.version)
    }

    /// Mark a document read-only (text replacement is refused).
    pub fn set_read_only(&mut self, cookie: DocumentCookie, read_only: bool) -> Result<(), TableError> {
        self.entry_mut(cookie)?.read_only = read_only;
        Ok(())
    }

    /// Edit a document's text as a user would; view state is kept.
    pub fn set_text(
        &mut self,
        cookie: DocumentCookie,
        text: impl Into<String>,
    ) -> Result<(), TableError> {
        let entry = self.entry_mut(cookie)?;
        entry.text = text.into();
        entry.version += 1;
        let became_dirty = !entry.dirty;
        entry.dirty = true;
        if became_dirty {
            self.notify_dirty_changed(cookie);
        }
        Ok(())
    }

    /// Move the caret of a document's view.
    pub fn set_caret(&mut self, cookie: DocumentCookie, caret: Position) -> Result<(), TableError> {
        if let Some(view) = self.entry_mut(cookie)?.view.as_mut() {
            view.caret = caret;
        }
        Ok(())
    }

    /// Caret of a document's view, if it has one.
    pub fn caret(&self, cookie: DocumentCookie) -> Result<Option<Position>, TableError> {
        Ok(self.entry(cookie)?.view.map(|view| view.caret))
    }

    /// Scroll a document's view.
    pub fn set_scroll(
        &mut self,
        cookie: DocumentCookie,
        scroll: ScrollState,
    ) -> Result<(), TableError> {
        if let Some(view) = self.entry_mut(cookie)?.view.as_mut() {
            view.scroll = scroll;
        }
        Ok(())
    }

    /// Scroll offsets of a document's view, if it has one.
    pub fn scroll(&self, cookie: DocumentCookie) -> Result<Option<ScrollState>, TableError> {
        Ok(self.entry(cookie)?.view.map(|view| view.scroll))
    }

    /// Close the view of a document (the document stays open).
    pub fn close_view(&mut self, cookie: DocumentCookie) -> Result<(), TableError> {
        self.entry_mut(cookie)?.view = None;
        Ok(())
    }

    /// Open a view for a document that has none.
    pub fn open_view(&mut self, cookie: DocumentCookie) -> Result<(), TableError> {
        let entry = self.entry_mut(cookie)?;
        if entry.view.is_none() {
            entry.view = Some(ViewCore::default());
        }
        Ok(())
    }

    /// Add a breakpoint to a document.
    pub fn add_breakpoint(
        &mut self,
        cookie: DocumentCookie,
        breakpoint: Breakpoint,
    ) -> Result<(), TableError> {
        self.entry_mut(cookie)?.breakpoints.push(breakpoint);
        Ok(())
    }

    /// Breakpoints set in a document.
    pub fn breakpoints(&self, cookie: DocumentCookie) -> Result<&[Breakpoint], TableError> {
        Ok(&self.entry(cookie)?.breakpoints)
    }

    /// Caret, scroll and breakpoints of a document, if it has a view.
    pub fn view_state(&self, cookie: DocumentCookie) -> Result<Option<ViewState>, TableError> {
        let entry = self.entry(cookie)?;
        Ok(entry.view.map(|view| ViewState {
            caret: view.caret,
            scroll: view.scroll,
            breakpoints: entry.breakpoints.clone(),
        }))
    }

    /// Persist a document.
    ///
    /// Subscribers get `on_before_save` first (and may rewrite the text); the resulting text is
    /// returned for the caller to write to storage. The document is then marked clean and
    /// subscribers get `on_after_save`.
    pub fn save(&mut self, cookie: DocumentCookie) -> Result<String, TableError> {
        self.entry(cookie)?;
        if self.notify(|subscriber, table| subscriber.on_before_save(table, cookie))
            == EventStatus::Cancel
        {
            return Err(TableError::SaveCancelled(cookie));
        }

        let entry = self.entry_mut(cookie)?;
        let text = entry.text.clone();
        let was_dirty = entry.dirty;
        entry.dirty = false;
        if was_dirty {
            self.notify_dirty_changed(cookie);
        }

        self.notify(|subscriber, table| subscriber.on_after_save(table, cookie));
        Ok(text)
    }

    fn entry(&self, cookie: DocumentCookie) -> Result<&DocumentEntry, TableError> {
        self.documents
            .get(&cookie)
            .ok_or(TableError::DocumentNotFound(cookie))
    }

    fn entry_mut(&mut self, cookie: DocumentCookie) -> Result<&mut DocumentEntry, TableError> {
        self.documents
            .get_mut(&cookie)
            .ok_or(TableError::DocumentNotFound(cookie))
    }

    fn notify_dirty_changed(&mut self, cookie: DocumentCookie) {
        // Subscribers are detached while a notification is in flight.
        if self.notifying {
            self.deferred_dirty.push(cookie);
            return;
        }
        let changes = AttributeChanges {
            dirty: true,
            ..AttributeChanges::default()
        };
        self.notify(|subscriber, table| {
            subscriber.on_after_attribute_change(table, cookie, changes)
        });
    }

    /// Deliver a notification to every subscriber; `Cancel` from any of them wins.
    fn notify(
        &mut self,
        mut deliver: impl FnMut(&mut TableSubscriber, &mut Self) -> EventStatus,
    ) -> EventStatus {
        // Subscribers receive `&mut self`, so they are detached for the duration of the call.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        let nested = std::mem::replace(&mut self.notifying, true);
        let mut status = EventStatus::Proceed;
        for (_, subscriber) in subscribers.iter_mut() {
            if deliver(subscriber, self) == EventStatus::Cancel {
                status = EventStatus::Cancel;
            }
        }
        // Keep anything advised while notifying.
        subscribers.append(&mut self.subscribers);
        self.subscribers = subscribers;
        self.notifying = nested;

        if !nested {
            while !self.deferred_dirty.is_empty() {
                for cookie in std::mem::take(&mut self.deferred_dirty) {
                    self.notify_dirty_changed(cookie);
                }
            }
        }
        status
    }
}

impl DocumentHost for DocumentTable {
    type Token = DocumentCookie;
    type Handle = DocumentCookie;

    fn resolve_document(&self, token: DocumentCookie) -> Option<DocumentCookie> {
        self.documents.contains_key(&token).then_some(token)
    }

    fn read_text(&self, handle: &DocumentCookie) -> Result<String, HostError> {
        self.documents
            .get(handle)
            .map(|entry| entry.text.clone())
            .ok_or(HostError::DocumentClosed)
    }

    fn write_text(&mut self, handle: &DocumentCookie, text: &str) -> Result<(), HostError> {
        let entry = self
            .documents
            .get_mut(handle)
            .ok_or(HostError::DocumentClosed)?;
        if entry.read_only {
            return Err(HostError::ReadOnly);
        }

        entry.text = text.to_string();
        entry.version += 1;
        let became_dirty = !entry.dirty;
        entry.dirty = true;
        // Wholesale replacement drops view state.
        if let Some(view) = entry.view.as_mut() {
            *view = ViewCore::default();
        }
        entry.breakpoints.clear();
        if became_dirty {
            self.notify_dirty_changed(*handle);
        }
        Ok(())
    }

    fn capture_view_state(&self, handle: &DocumentCookie) -> Result<ViewState, HostError> {
        match self.view_state(*handle) {
            Ok(Some(state)) => Ok(state),
            Ok(None) => Err(HostError::NoView),
            Err(_) => Err(HostError::DocumentClosed),
        }
    }

    fn restore_view_state(
        &mut self,
        handle: &DocumentCookie,
        state: &ViewState,
    ) -> Result<(), HostError> {
        let entry = self
            .documents
            .get_mut(handle)
            .ok_or(HostError::DocumentClosed)?;
        entry.breakpoints = state.breakpoints.clone();
        let view = entry.view.as_mut().ok_or(HostError::NoView)?;
        view.caret = state.caret;
        view.scroll = state.scroll;
        Ok(())
    }
}
