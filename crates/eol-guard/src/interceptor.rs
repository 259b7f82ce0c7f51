//! Save interceptor.
//!
//! [`SaveInterceptor`] hooks a host's "before save" notification and normalizes the line
//! endings of the document about to be persisted. It never blocks a save: every host failure is
//! logged and the enhancement is skipped for that save.
//!
//! # Example
//!
//! ```rust
//! use eol_guard::{DocumentTable, NormalizeOptions, SaveInterceptor};
//!
//! let mut table = DocumentTable::new();
//! table.advise(SaveInterceptor::new(NormalizeOptions::default()));
//!
//! let cookie = table.open(Some("file:///a.txt".to_string()), "a\r\nb\nc").unwrap();
//! let persisted = table.save(cookie).unwrap();
//! assert_eq!(persisted, "a\r\nb\r\nc");
//! ```

use crate::host::{DocumentHost, DocumentLifecycleEvents, EventStatus};
use crate::{LineIndex, NormalizeOptions, NormalizeOutcome, Normalizer};
use tracing::{debug, warn};

/// Normalizes line endings right before a document is saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveInterceptor {
    normalizer: Normalizer,
}

impl SaveInterceptor {
    /// Create an interceptor with the given normalization options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            normalizer: Normalizer::new(options),
        }
    }

    /// Create an interceptor around an existing normalizer.
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// The normalizer used on save.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Handle a "before save" notification.
    ///
    /// Always returns [`EventStatus::Proceed`].
    pub fn before_save<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        token: H::Token,
    ) -> EventStatus {
        let Some(handle) = host.resolve_document(token) else {
            debug!(?token, "no live document for save notification");
            return EventStatus::Proceed;
        };

        let view_state = match host.capture_view_state(&handle) {
            Ok(state) => state,
            Err(err) => {
                warn!(?handle, error = %err, "could not capture view state; skipping normalization");
                return EventStatus::Proceed;
            }
        };

        let text = match host.read_text(&handle) {
            Ok(text) => text,
            Err(err) => {
                warn!(?handle, error = %err, "could not read document text; skipping normalization");
                return EventStatus::Proceed;
            }
        };

        let (normalized, line_ending) = match self.normalizer.normalize(&text) {
            NormalizeOutcome::NoLineEnding => {
                debug!(?handle, "document has no line ending");
                return EventStatus::Proceed;
            }
            NormalizeOutcome::Unchanged { line_ending } => {
                debug!(?handle, %line_ending, "line endings already uniform");
                return EventStatus::Proceed;
            }
            NormalizeOutcome::Changed { text, line_ending } => (text, line_ending),
        };

        if let Err(err) = host.write_text(&handle, &normalized) {
            warn!(?handle, error = %err, "could not write normalized text");
            return EventStatus::Proceed;
        }
        debug!(?handle, %line_ending, "normalized line endings");

        let restored = view_state.clamped_to(&LineIndex::from_text(&normalized));
        if let Err(err) = host.restore_view_state(&handle, &restored) {
            warn!(?handle, error = %err, "could not restore view state");
        }

        EventStatus::Proceed
    }
}

impl<H: DocumentHost + ?Sized> DocumentLifecycleEvents<H> for SaveInterceptor {
    fn on_before_save(&mut self, host: &mut H, token: H::Token) -> EventStatus {
        self.before_save(host, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostError, Position, ViewState};

    #[derive(Default)]
    struct FakeHost {
        text: Option<String>,
        state: ViewState,
        fail_capture: bool,
        fail_read: bool,
        fail_write: bool,
        fail_restore: bool,
        writes: usize,
        restores: usize,
    }

    impl DocumentHost for FakeHost {
        type Token = u32;
        type Handle = u32;

        fn resolve_document(&self, token: u32) -> Option<u32> {
            self.text.as_ref().map(|_| token)
        }

        fn read_text(&self, _: &u32) -> Result<String, HostError> {
            if self.fail_read {
                return Err(HostError::DocumentClosed);
            }
            Ok(self.text.clone().unwrap_or_default())
        }

        fn write_text(&mut self, _: &u32, text: &str) -> Result<(), HostError> {
            if self.fail_write {
                return Err(HostError::ReadOnly);
            }
            self.writes += 1;
            self.text = Some(text.to_string());
            self.state = ViewState::default();
            Ok(())
        }

        fn capture_view_state(&self, _: &u32) -> Result<ViewState, HostError> {
            if self.fail_capture {
                return Err(HostError::NoView);
            }
            Ok(self.state.clone())
        }

        fn restore_view_state(&mut self, _: &u32, state: &ViewState) -> Result<(), HostError> {
            if self.fail_restore {
                return Err(HostError::NoView);
            }
            self.restores += 1;
            self.state = state.clone();
            Ok(())
        }
    }

    fn host_with(text: &str) -> FakeHost {
        FakeHost {
            text: Some(text.to_string()),
            state: ViewState {
                caret: Position::new(1, 1),
                ..ViewState::default()
            },
            ..FakeHost::default()
        }
    }

    #[test]
    fn test_missing_document_proceeds_untouched() {
        let mut host = FakeHost::default();
        let status = SaveInterceptor::default().before_save(&mut host, 7);
        assert_eq!(status, EventStatus::Proceed);
        assert_eq!(host.writes, 0);
    }

    #[test]
    fn test_changed_text_is_written_and_state_restored() {
        let mut host = host_with("a\r\nb\nc");
        SaveInterceptor::default().before_save(&mut host, 1);
        assert_eq!(host.text.as_deref(), Some("a\r\nb\r\nc"));
        assert_eq!(host.writes, 1);
        assert_eq!(host.restores, 1);
        assert_eq!(host.state.caret, Position::new(1, 1));
    }

    #[test]
    fn test_unchanged_text_skips_write_and_restore() {
        let mut host = host_with("a\nb\n");
        SaveInterceptor::default().before_save(&mut host, 1);
        assert_eq!(host.writes, 0);
        assert_eq!(host.restores, 0);
    }

    #[test]
    fn test_capture_failure_skips_normalization() {
        let mut host = FakeHost {
            fail_capture: true,
            ..host_with("a\r\nb\n")
        };
        let status = SaveInterceptor::default().before_save(&mut host, 1);
        assert_eq!(status, EventStatus::Proceed);
        assert_eq!(host.text.as_deref(), Some("a\r\nb\n"));
    }

    #[test]
    fn test_read_and_write_failures_never_block() {
        let mut host = FakeHost {
            fail_read: true,
            ..host_with("a\r\nb\n")
        };
        assert_eq!(
            SaveInterceptor::default().before_save(&mut host, 1),
            EventStatus::Proceed
        );

        let mut host = FakeHost {
            fail_write: true,
            ..host_with("a\r\nb\n")
        };
        assert_eq!(
            SaveInterceptor::default().before_save(&mut host, 1),
            EventStatus::Proceed
        );
        assert_eq!(host.restores, 0);
    }

    #[test]
    fn test_restore_failure_keeps_normalized_text() {
        let mut host = FakeHost {
            fail_restore: true,
            ..host_with("a\r\nb\n")
        };
        let status = SaveInterceptor::default().before_save(&mut host, 1);
        assert_eq!(status, EventStatus::Proceed);
        assert_eq!(host.text.as_deref(), Some("a\r\nb\r\n"));
    }
}
