//! Host integration interfaces.
//!
//! `eol-guard` does not own documents. A host (an IDE, an editor, or the in-memory
//! [`DocumentTable`](crate::DocumentTable)) exposes its documents through [`DocumentHost`] and
//! delivers lifecycle notifications to subscribers implementing [`DocumentLifecycleEvents`].
//!
//! Wiring is an explicit composition step: construct a subscriber (usually a
//! [`SaveInterceptor`](crate::SaveInterceptor)) and register it with the host at startup.

use crate::{HostError, ViewState};
use std::fmt::Debug;

/// Capabilities `eol-guard` needs from a host.
pub trait DocumentHost {
    /// Opaque per-document token carried by lifecycle notifications.
    type Token: Copy + Debug;
    /// Live handle to an open document.
    type Handle: Debug;

    /// Map a notification token to a live document, if there still is one.
    fn resolve_document(&self, token: Self::Token) -> Option<Self::Handle>;

    /// Read the full text of a document.
    fn read_text(&self, handle: &Self::Handle) -> Result<String, HostError>;

    /// Replace the full text of a document.
    fn write_text(&mut self, handle: &Self::Handle, text: &str) -> Result<(), HostError>;

    /// Capture caret, scroll and breakpoint state of a document.
    fn capture_view_state(&self, handle: &Self::Handle) -> Result<ViewState, HostError>;

    /// Restore previously captured view state.
    fn restore_view_state(
        &mut self,
        handle: &Self::Handle,
        state: &ViewState,
    ) -> Result<(), HostError>;
}

/// Status returned from a lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    /// Handled; the host should carry on.
    #[default]
    Proceed,
    /// The subscriber asks the host to abort the operation.
    Cancel,
}

/// Which document attributes changed in an
/// [`on_after_attribute_change`](DocumentLifecycleEvents::on_after_attribute_change) notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeChanges {
    /// The dirty flag changed.
    pub dirty: bool,
    /// The document moniker (path/URI) changed.
    pub moniker: bool,
    /// The document text was reloaded from disk.
    pub reloaded: bool,
}

/// Document lifecycle notifications.
///
/// Every method defaults to [`EventStatus::Proceed`], so subscribers override only what they
/// care about.
#[allow(unused_variables)]
pub trait DocumentLifecycleEvents<H: DocumentHost + ?Sized> {
    /// A document was opened (first lock taken).
    fn on_after_first_lock(&mut self, host: &mut H, token: H::Token) -> EventStatus {
        EventStatus::Proceed
    }

    /// A document is about to be closed (last lock released).
    fn on_before_last_unlock(&mut self, host: &mut H, token: H::Token) -> EventStatus {
        EventStatus::Proceed
    }

    /// A document is about to be persisted. Subscribers may rewrite its text.
    fn on_before_save(&mut self, host: &mut H, token: H::Token) -> EventStatus {
        EventStatus::Proceed
    }

    /// A document was persisted.
    fn on_after_save(&mut self, host: &mut H, token: H::Token) -> EventStatus {
        EventStatus::Proceed
    }

    /// Document attributes changed.
    fn on_after_attribute_change(
        &mut self,
        host: &mut H,
        token: H::Token,
        changes: AttributeChanges,
    ) -> EventStatus {
        EventStatus::Proceed
    }
}
