use std::time::{Duration, Instant};

use arrowword_core::Grid;

use crate::{DRAFT_KEY, DraftStore, encode_draft};

/// Timing of draft autosave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveSettings {
    /// Quiet time after the last change before the draft is written.
    pub debounce: Duration,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
        }
    }
}

/// A problem with draft saving that the user should hear about once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum AutosaveWarning {
    /// The startup probe failed; autosave is off for this session.
    #[display("draft storage is unavailable; autosave is disabled")]
    Unavailable,
    /// Writing a draft failed.
    #[display("the draft could not be saved; export the puzzle to keep it")]
    WriteFailed,
}

#[derive(Debug)]
struct Pending {
    grid: Grid,
    due: Instant,
}

/// Debounced writer of the draft slot.
///
/// Each change replaces the pending snapshot and pushes the deadline back.
/// Locked puzzles are never written. Write failures are logged and not
/// retried; the first problem of a session is reported through
/// [`Autosave::take_warning`].
#[derive(Debug)]
pub struct Autosave<S> {
    store: S,
    settings: AutosaveSettings,
    available: bool,
    pending: Option<Pending>,
    warning: Option<AutosaveWarning>,
    warned: bool,
}

impl<S: DraftStore> Autosave<S> {
    /// Wraps `store`, probing it once.
    pub fn new(mut store: S, settings: AutosaveSettings) -> Self {
        let available = match store.probe() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("draft storage probe failed, autosave disabled: {e}");
                false
            }
        };
        let mut this = Self {
            store,
            settings,
            available,
            pending: None,
            warning: None,
            warned: false,
        };
        if !available {
            this.raise(AutosaveWarning::Unavailable);
        }
        this
    }

    /// Returns `true` unless the startup probe failed.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if a snapshot waits to be written.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a changed grid; it is written once `debounce` passes quietly.
    pub fn schedule(&mut self, grid: &Grid, locked: bool, now: Instant) {
        if !self.available || locked {
            self.pending = None;
            return;
        }
        self.pending = Some(Pending {
            grid: grid.clone(),
            due: now + self.settings.debounce,
        });
    }

    /// Writes the pending snapshot if its deadline passed.
    ///
    /// Returns `true` if a draft was written.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending.as_ref().is_some_and(|pending| pending.due <= now) {
            self.flush()
        } else {
            false
        }
    }

    /// Writes the pending snapshot immediately.
    ///
    /// Returns `true` if a draft was written.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => self.write(&pending.grid),
            None => false,
        }
    }

    /// Writes `grid` immediately, dropping any pending snapshot.
    ///
    /// Returns `true` if a draft was written.
    pub fn save_now(&mut self, grid: &Grid) -> bool {
        self.pending = None;
        self.available && self.write(grid)
    }

    /// Deletes the stored draft and any pending snapshot.
    pub fn discard(&mut self) {
        self.pending = None;
        if !self.available {
            return;
        }
        if let Err(e) = self.store.remove(DRAFT_KEY) {
            log::warn!("failed to remove draft: {e}");
        }
    }

    /// Returns the first unreported warning of this session.
    pub fn take_warning(&mut self) -> Option<AutosaveWarning> {
        self.warning.take()
    }

    fn write(&mut self, grid: &Grid) -> bool {
        let result = encode_draft(grid)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                self.store
                    .set_string(DRAFT_KEY, &text)
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(()) => {
                log::debug!("draft saved");
                true
            }
            Err(e) => {
                log::warn!("autosave failed: {e}");
                self.raise(AutosaveWarning::WriteFailed);
                false
            }
        }
    }

    fn raise(&mut self, warning: AutosaveWarning) {
        if !self.warned {
            self.warned = true;
            self.warning = Some(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use arrowword_core::{Variant, testing::GridBuilder};

    use super::*;
    use crate::{MemoryDraftStore, load_draft};

    fn grid(text: &str) -> Grid {
        GridBuilder::new()
            .clue((0, 0), text, Variant::LeftThenRight, "")
            .build()
    }

    fn autosave() -> Autosave<MemoryDraftStore> {
        Autosave::new(MemoryDraftStore::new(), AutosaveSettings::default())
    }

    #[test]
    fn test_debounce_writes_latest_snapshot() {
        let t0 = Instant::now();
        let mut autosave = autosave();
        autosave.schedule(&grid("one"), false, t0);
        autosave.schedule(&grid("two"), false, t0 + Duration::from_millis(200));

        assert!(!autosave.poll(t0 + Duration::from_millis(300)));
        assert!(load_draft(autosave.store()).is_none());
        assert!(autosave.poll(t0 + Duration::from_millis(450)));
        assert_eq!(load_draft(autosave.store()), Some(grid("two")));
        assert!(!autosave.is_pending());
        assert!(!autosave.poll(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_flush_forces_write() {
        let mut autosave = autosave();
        autosave.schedule(&grid("x"), false, Instant::now());
        assert!(autosave.flush());
        assert_eq!(load_draft(autosave.store()), Some(grid("x")));
        assert!(!autosave.flush());
    }

    #[test]
    fn test_locked_grids_never_written() {
        let mut autosave = autosave();
        let t0 = Instant::now();
        autosave.schedule(&grid("x"), false, t0);
        autosave.schedule(&grid("locked"), true, t0);
        assert!(!autosave.is_pending());
        assert!(!autosave.poll(t0 + Duration::from_secs(1)));
        assert!(load_draft(autosave.store()).is_none());
    }

    #[test]
    fn test_probe_failure_disables_and_warns_once() {
        let mut autosave = Autosave::new(MemoryDraftStore::failing(), AutosaveSettings::default());
        assert!(!autosave.is_available());
        assert_eq!(autosave.take_warning(), Some(AutosaveWarning::Unavailable));
        assert_eq!(autosave.take_warning(), None);

        autosave.schedule(&grid("x"), false, Instant::now());
        assert!(!autosave.is_pending());
        assert!(!autosave.save_now(&grid("x")));
        assert_eq!(autosave.take_warning(), None);
    }

    #[test]
    fn test_write_failure_warns_once() {
        let mut autosave = autosave();
        assert!(autosave.is_available());
        assert!(autosave.save_now(&grid("a")));

        autosave.store.set_failing(true);
        assert!(!autosave.save_now(&grid("b")));
        assert!(!autosave.save_now(&grid("c")));
        assert_eq!(autosave.take_warning(), Some(AutosaveWarning::WriteFailed));
        assert_eq!(autosave.take_warning(), None);
    }

    #[test]
    fn test_discard_removes_draft() {
        let mut autosave = autosave();
        autosave.save_now(&grid("a"));
        autosave.schedule(&grid("b"), false, Instant::now());
        autosave.discard();
        assert!(!autosave.is_pending());
        assert!(load_draft(autosave.store()).is_none());
    }
}
