//! Editing session: one window's bookmarks, view and save state

use crate::{
    from_document, to_document, visible_entries, AppError, BookmarkCommand, BookmarkStore,
    DiffTracker, FilterView, ViewState,
};
use app_fs::AssetResolver;
use app_persist::DocumentFile;

const TITLE: &str = "Bookmark Tool";

/// Owns the in-memory store of one window
///
/// Sessions are independent; when several write the same file the last
/// save wins.
pub struct BookmarkSession<R: AssetResolver> {
    store: BookmarkStore,
    view: ViewState,
    /// View used when no bookmark file exists yet
    initial_view: ViewState,
    tracker: DiffTracker,
    file: DocumentFile,
    resolver: R,
}

impl<R: AssetResolver> BookmarkSession<R> {
    /// Empty session, nothing loaded yet
    pub fn new(file: DocumentFile, resolver: R) -> Self {
        Self {
            store: BookmarkStore::new(),
            view: ViewState::default(),
            initial_view: ViewState::default(),
            tracker: DiffTracker::default(),
            file,
            resolver,
        }
    }

    pub fn with_initial_view(mut self, view: ViewState) -> Self {
        self.view = view.clone();
        self.initial_view = view;
        self
    }

    /// Create a session and load the backing file
    pub fn open(file: DocumentFile, resolver: R, initial_view: ViewState) -> Result<Self, AppError> {
        let mut session = Self::new(file, resolver).with_initial_view(initial_view);
        session.load()?;
        Ok(session)
    }

    /// Replace the in-memory state with the backing file
    ///
    /// A missing file gives an empty store. On error the current state is
    /// left untouched.
    pub fn load(&mut self) -> Result<(), AppError> {
        match self.file.load()? {
            Some(doc) => {
                let (store, view) = from_document(doc, &self.resolver);
                tracing::info!(
                    "Loaded {} bookmarks in {} groups from {:?}",
                    store.len(),
                    store.groups().len(),
                    self.file.path()
                );
                self.store = store;
                self.view = view;
            }
            None => {
                tracing::info!("No bookmark file yet, starting empty");
                self.store = BookmarkStore::new();
                self.view = self.initial_view.clone();
            }
        }

        self.tracker.rebase(&self.store);
        Ok(())
    }

    /// Write the store and view to the backing file
    pub fn save(&mut self) -> Result<(), AppError> {
        self.store.refresh_paths(&self.resolver);
        let doc = to_document(&self.store, &self.view, &self.resolver);
        self.file.save(&doc)?;

        self.tracker.rebase(&self.store);
        tracing::info!("Saved {} bookmarks to {:?}", self.store.len(), self.file.path());
        Ok(())
    }

    /// Save and end the session, as when the window closes
    pub fn close(mut self) -> Result<(), AppError> {
        self.save()
    }

    /// Apply one intent and return the state to render
    pub fn dispatch(&mut self, cmd: BookmarkCommand) -> &BookmarkStore {
        self.execute(cmd);
        &self.store
    }

    /// Apply one intent; returns whether it changed the store or view
    pub fn execute(&mut self, cmd: BookmarkCommand) -> bool {
        cmd.apply(&mut self.store, &mut self.view)
    }

    /// Try to resolve missing entries again
    pub fn relink_missing(&mut self) -> usize {
        let relinked = self.store.relink_missing(&self.resolver);
        if relinked > 0 {
            tracing::info!("Relinked {} bookmarks", relinked);
        }
        relinked
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.is_dirty(&self.store)
    }

    /// Window title, marked while there are unsaved changes
    pub fn title(&self) -> String {
        if self.has_unsaved_changes() {
            format!("{}*", TITLE)
        } else {
            TITLE.to_string()
        }
    }

    /// Entries to render for the current view
    pub fn visible(&self) -> FilterView<'_> {
        visible_entries(&self.store, &self.view, self.resolver.kinds())
    }

    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn file(&self) -> &DocumentFile {
        &self.file
    }
}
