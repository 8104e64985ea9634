//! The fetch/display/submit view shared by every screen.
//!
//! A [`RemoteView`] owns whatever one screen shows: the last data set the
//! backend returned, whether a read is in flight, and the banner error.
//! [`EditableView`] adds the companion create/edit form for resources the
//! operator can write to.
//!
//! Views never cache across instances. Every screen builds its own view and
//! talks to the backend through a [`RemoteResource`] implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut view = RemoteView::new(ConfigResource::new(client));
//! view.load(LoadTrigger::Activation).await;
//! match view.error() {
//!     Some(banner) => render_banner(banner.message()),
//!     None => render_table(view.data()),
//! }
//! ```

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

use crate::error::{RequestError, ViewError};
use crate::validation::Validate;

/// A backend read the view can issue.
pub trait RemoteResource: Send + Sync {
    /// The data set a successful read produces.
    type Output: Send;

    /// The transport error. Only logged; the operator sees [`Self::LOAD_FAILURE`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Banner message shown when a read fails.
    const LOAD_FAILURE: &'static str;

    /// Issue one read request.
    fn fetch(&self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

/// A resource that also accepts creates and updates.
pub trait WritableResource: RemoteResource {
    /// The record edited in the companion form.
    type Record: Validate + Clone + Send + Sync;

    /// Form message shown when a write fails.
    const SAVE_FAILURE: &'static str;

    /// Write a new record in full.
    fn create(&self, record: &Self::Record) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Update the record identified by its natural key.
    fn update(&self, record: &Self::Record) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Whether the form is creating a record or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitMode {
    Create,
    Update,
}

impl SubmitMode {
    /// Parse the hidden `mode` form field.
    #[must_use]
    pub fn from_form(value: &str) -> Self {
        if value.eq_ignore_ascii_case("update") {
            Self::Update
        } else {
            Self::Create
        }
    }

    /// Value of the hidden `mode` form field.
    #[must_use]
    pub const fn as_form(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// What caused a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadTrigger {
    /// The screen became visible. Issued at most once per view.
    Activation,
    /// The operator asked for it (search button, date change).
    UserAction,
    /// Follow-up read after a successful write.
    Refresh,
}

/// Whether a read is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
}

/// Handle for one issued read.
///
/// Returned by [`RemoteView::begin_load`] and handed back to
/// [`RemoteView::complete_load`] when the response arrives.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a load ticket must be completed"]
pub struct LoadTicket {
    sequence: u64,
    trigger: LoadTrigger,
}

impl LoadTicket {
    /// Issue order within the view, starting at 1.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// What caused the read.
    #[must_use]
    pub const fn trigger(&self) -> LoadTrigger {
        self.trigger
    }
}

/// State of one screen backed by a remote resource.
#[derive(Debug)]
pub struct RemoteView<R: RemoteResource> {
    resource: R,
    data: Option<R::Output>,
    error: Option<RequestError>,
    in_flight: usize,
    issued: u64,
    activated: bool,
}

impl<R: RemoteResource> RemoteView<R> {
    /// Create an idle view with nothing loaded.
    #[must_use]
    pub const fn new(resource: R) -> Self {
        Self {
            resource,
            data: None,
            error: None,
            in_flight: 0,
            issued: 0,
            activated: false,
        }
    }

    /// The resource this view reads from.
    #[must_use]
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// The last successfully loaded data set, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&R::Output> {
        self.data.as_ref()
    }

    /// Take ownership of the loaded data.
    #[must_use]
    pub fn into_data(self) -> Option<R::Output> {
        self.data
    }

    /// The banner error from the most recent failed read.
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    /// Whether a read is in flight.
    #[must_use]
    pub const fn phase(&self) -> ViewPhase {
        if self.in_flight > 0 {
            ViewPhase::Loading
        } else {
            ViewPhase::Idle
        }
    }

    /// Number of reads issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Mark a read as issued.
    ///
    /// Returns `None` for a repeated [`LoadTrigger::Activation`]; every
    /// other trigger always issues.
    pub fn begin_load(&mut self, trigger: LoadTrigger) -> Option<LoadTicket> {
        if trigger == LoadTrigger::Activation {
            if self.activated {
                debug!("Suppressing repeated activation load");
                return None;
            }
            self.activated = true;
        }

        self.issued += 1;
        self.in_flight += 1;
        Some(LoadTicket {
            sequence: self.issued,
            trigger,
        })
    }

    /// Apply a read result.
    ///
    /// Results are applied in completion order, so when reads overlap the
    /// response that arrives last is the one displayed. A failure keeps the
    /// previous data and sets the banner.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<R::Output, R::Error>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    sequence = ticket.sequence,
                    trigger = ?ticket.trigger,
                    "Remote load failed"
                );
                self.error = Some(RequestError::new(R::LOAD_FAILURE));
            }
        }
    }

    /// Issue one read and apply its result.
    ///
    /// Returns `false` if the read was suppressed (repeated activation).
    pub async fn load(&mut self, trigger: LoadTrigger) -> bool {
        let Some(ticket) = self.begin_load(trigger) else {
            return false;
        };
        let result = self.resource.fetch().await;
        self.complete_load(ticket, result);
        true
    }
}

/// The companion form of an [`EditableView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm<T> {
    pub mode: SubmitMode,
    pub draft: T,
    pub error: Option<ViewError>,
}

/// A [`RemoteView`] whose records can be created and edited.
pub struct EditableView<W: WritableResource> {
    view: RemoteView<W>,
    form: Option<EditForm<W::Record>>,
}

impl<W> fmt::Debug for EditableView<W>
where
    W: WritableResource + fmt::Debug,
    W::Output: fmt::Debug,
    W::Record: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableView")
            .field("view", &self.view)
            .field("form", &self.form)
            .finish()
    }
}

impl<W: WritableResource> EditableView<W> {
    /// Create an idle view with the form closed.
    #[must_use]
    pub const fn new(resource: W) -> Self {
        Self {
            view: RemoteView::new(resource),
            form: None,
        }
    }

    /// The underlying read view.
    #[must_use]
    pub const fn view(&self) -> &RemoteView<W> {
        &self.view
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&EditForm<W::Record>> {
        self.form.as_ref()
    }

    /// Issue one read. See [`RemoteView::load`].
    pub async fn load(&mut self, trigger: LoadTrigger) -> bool {
        self.view.load(trigger).await
    }

    /// Open the form with an empty record.
    pub fn open_create(&mut self)
    where
        W::Record: Default,
    {
        self.form = Some(EditForm {
            mode: SubmitMode::Create,
            draft: W::Record::default(),
            error: None,
        });
    }

    /// Open the form on an existing record.
    pub fn open_edit(&mut self, record: W::Record) {
        self.form = Some(EditForm {
            mode: SubmitMode::Update,
            draft: record,
            error: None,
        });
    }

    /// Validate and write a record, then refresh.
    ///
    /// Validation runs first; if it fails no request is made. On a
    /// successful write the form closes and exactly one refresh read is
    /// issued. On a failed write the form stays open with the error and no
    /// refresh is issued.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Validation`] for missing required input and
    /// [`ViewError::Request`] if the write failed.
    pub async fn submit(&mut self, mode: SubmitMode, record: W::Record) -> Result<(), ViewError> {
        if let Err(e) = record.validate() {
            let error = ViewError::from(e);
            self.keep_open(mode, record, error.clone());
            return Err(error);
        }

        let result = match mode {
            SubmitMode::Create => self.view.resource.create(&record).await,
            SubmitMode::Update => self.view.resource.update(&record).await,
        };

        if let Err(e) = result {
            warn!(error = %e, ?mode, "Remote save failed");
            let error = ViewError::from(RequestError::new(W::SAVE_FAILURE));
            self.keep_open(mode, record, error.clone());
            return Err(error);
        }

        self.form = None;
        self.view.load(LoadTrigger::Refresh).await;
        Ok(())
    }

    fn keep_open(&mut self, mode: SubmitMode, draft: W::Record, error: ViewError) {
        self.form = Some(EditForm {
            mode,
            draft,
            error: Some(error),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::ConfigEntry;

    #[derive(Debug, thiserror::Error)]
    #[error("backend unavailable")]
    struct Unavailable;

    /// In-memory backend that counts every call.
    #[derive(Debug, Default)]
    struct FakeConfig {
        entries: Mutex<Vec<ConfigEntry>>,
        reads: AtomicUsize,
        writes: AtomicUsize,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl FakeConfig {
        fn with(entries: Vec<ConfigEntry>) -> Self {
            Self {
                entries: Mutex::new(entries),
                ..Self::default()
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl RemoteResource for FakeConfig {
        type Output = Vec<ConfigEntry>;
        type Error = Unavailable;
        const LOAD_FAILURE: &'static str = "Failed to load configurations.";

        async fn fetch(&self) -> Result<Self::Output, Self::Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(Unavailable);
            }
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    impl WritableResource for FakeConfig {
        type Record = ConfigEntry;
        const SAVE_FAILURE: &'static str = "Failed to save configuration.";

        async fn create(&self, record: &ConfigEntry) -> Result<(), Self::Error> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(Unavailable);
            }
            self.entries.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn update(&self, record: &ConfigEntry) -> Result<(), Self::Error> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(Unavailable);
            }
            let mut entries = self.entries.lock().unwrap();
            if let Some(existing) = entries.iter_mut().find(|e| e.key == record.key) {
                existing.value.clone_from(&record.value);
            }
            Ok(())
        }
    }

    fn entry(key: &str, value: &str) -> ConfigEntry {
        ConfigEntry {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_load_keeps_response_order() {
        let mut view = RemoteView::new(FakeConfig::with(vec![
            entry("b", "2"),
            entry("a", "1"),
            entry("c", "3"),
        ]));
        assert!(view.load(LoadTrigger::Activation).await);

        let keys: Vec<_> = view.data().unwrap().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_an_error() {
        let mut view = RemoteView::new(FakeConfig::default());
        view.load(LoadTrigger::Activation).await;
        assert_eq!(view.data().unwrap().len(), 0);
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_repeated_activation_is_suppressed() {
        let mut view = RemoteView::new(FakeConfig::default());
        assert!(view.load(LoadTrigger::Activation).await);
        assert!(!view.load(LoadTrigger::Activation).await);
        assert!(view.load(LoadTrigger::UserAction).await);
        assert_eq!(view.resource().reads(), 2);
    }

    #[tokio::test]
    async fn test_reload_is_idempotent() {
        let mut view = RemoteView::new(FakeConfig::with(vec![entry("k", "v")]));
        view.load(LoadTrigger::Activation).await;
        let first = view.data().cloned();
        view.load(LoadTrigger::UserAction).await;
        assert_eq!(view.data().cloned(), first);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let mut view = RemoteView::new(FakeConfig::with(vec![entry("k", "v")]));
        view.load(LoadTrigger::Activation).await;

        let ticket = view.begin_load(LoadTrigger::UserAction).unwrap();
        view.complete_load(ticket, Err(Unavailable));

        assert_eq!(view.data().unwrap().len(), 1);
        assert_eq!(
            view.error().unwrap().message(),
            "Failed to load configurations."
        );

        // A later success clears the banner.
        view.load(LoadTrigger::UserAction).await;
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_first_load_shows_banner() {
        let mut view = RemoteView::new(FakeConfig {
            fail_reads: true,
            ..FakeConfig::default()
        });
        view.load(LoadTrigger::Activation).await;
        assert!(view.data().is_none());
        assert!(view.error().is_some());
    }

    #[test]
    fn test_last_completed_response_wins() {
        let mut view = RemoteView::new(FakeConfig::default());
        let first = view.begin_load(LoadTrigger::UserAction).unwrap();
        let second = view.begin_load(LoadTrigger::UserAction).unwrap();
        assert_eq!(view.phase(), ViewPhase::Loading);
        assert_eq!((first.sequence(), second.sequence()), (1, 2));

        view.complete_load(second, Ok(vec![entry("new", "2")]));
        assert_eq!(view.phase(), ViewPhase::Loading);
        view.complete_load(first, Ok(vec![entry("old", "1")]));

        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.data().unwrap()[0].key, "old");
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_calls() {
        let mut view = EditableView::new(FakeConfig::default());
        view.open_create();

        let err = view
            .submit(SubmitMode::Create, entry("", "v"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Key and Value are required.");
        assert_eq!(view.view().resource().writes(), 0);
        assert_eq!(view.view().resource().reads(), 0);
        assert!(view.form().unwrap().error.is_some());
    }

    #[tokio::test]
    async fn test_successful_submit_refreshes_once() {
        let mut view = EditableView::new(FakeConfig::default());
        view.load(LoadTrigger::Activation).await;
        view.open_create();

        view.submit(SubmitMode::Create, entry("k", "v")).await.unwrap();

        let fake = view.view().resource();
        assert_eq!(fake.writes(), 1);
        assert_eq!(fake.reads(), 2);
        assert!(view.form().is_none());
        assert_eq!(view.view().data().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_is_scoped_to_key() {
        let mut view = EditableView::new(FakeConfig::with(vec![entry("a", "1"), entry("b", "2")]));
        view.open_edit(entry("b", "2"));
        assert_eq!(view.form().unwrap().mode, SubmitMode::Update);

        view.submit(SubmitMode::Update, entry("b", "20")).await.unwrap();

        let data = view.view().data().unwrap();
        assert_eq!(data[0], entry("a", "1"));
        assert_eq!(data[1], entry("b", "20"));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_open() {
        let mut view = EditableView::new(FakeConfig {
            fail_writes: true,
            ..FakeConfig::default()
        });
        view.open_create();

        let err = view
            .submit(SubmitMode::Create, entry("k", "v"))
            .await
            .unwrap_err();

        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Failed to save configuration.");
        assert_eq!(view.view().resource().reads(), 0);

        let form = view.form().unwrap();
        assert_eq!(form.draft, entry("k", "v"));
        assert_eq!(form.mode, SubmitMode::Create);
    }

    #[test]
    fn test_submit_mode_form_value() {
        assert_eq!(SubmitMode::from_form("update"), SubmitMode::Update);
        assert_eq!(SubmitMode::from_form("create"), SubmitMode::Create);
        assert_eq!(SubmitMode::from_form(""), SubmitMode::Create);
        assert_eq!(SubmitMode::Update.as_form(), "update");
    }

    #[tokio::test]
    async fn test_editable_view_debug_shows_open_form() {
        let mut view = EditableView::new(FakeConfig::with(vec![entry("k", "v")]));
        view.load(LoadTrigger::Activation).await;
        view.open_edit(entry("k", "v"));

        let rendered = format!("{view:?}");
        assert!(rendered.starts_with("EditableView"));
        assert!(rendered.contains("mode: Update"));
        assert!(rendered.contains("key: \"k\""));
    }
}
