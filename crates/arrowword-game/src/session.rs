use std::time::{Duration, Instant};

use crate::{GameError, SessionSettings};

/// Phase of the play session.
///
/// `Idle → AwaitingStart → Countdown → Running → Won`. Resetting the timer
/// or clearing the puzzle returns to `Idle` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// No timer has been started.
    Idle,
    /// Play mode is showing the start prompt.
    AwaitingStart,
    /// The countdown is running.
    Countdown {
        /// When the countdown began.
        since: Instant,
    },
    /// The timer is running.
    Running {
        /// When the timer started.
        since: Instant,
    },
    /// The grid was solved; the elapsed time is frozen.
    Won {
        /// Time taken.
        elapsed: Duration,
    },
}

/// What the countdown overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CountdownDisplay {
    /// A number counting down to one.
    Number(u8),
    /// The "go" message shown before the timer starts.
    Go,
}

/// The timed session around a play-through.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    settings: SessionSettings,
}

impl Session {
    /// Creates an idle session.
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            phase: Phase::Idle,
            settings,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the timing settings.
    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Returns `true` once the timer has been started (running or won).
    #[must_use]
    pub fn has_started(&self) -> bool {
        matches!(self.phase, Phase::Running { .. } | Phase::Won { .. })
    }

    /// Returns `true` while the start prompt or countdown covers the grid.
    #[must_use]
    pub fn is_pre_start(&self) -> bool {
        matches!(self.phase, Phase::AwaitingStart | Phase::Countdown { .. })
    }

    /// Shows the start prompt if no timer was started yet.
    pub(crate) fn await_start(&mut self) {
        if self.phase.is_idle() {
            log::debug!("session awaiting start");
            self.phase = Phase::AwaitingStart;
        }
    }

    /// Starts the countdown from the start prompt.
    pub(crate) fn begin_countdown(&mut self, now: Instant) -> Result<(), GameError> {
        if !self.phase.is_awaiting_start() {
            return Err(GameError::NotAwaitingStart);
        }
        log::debug!("countdown started");
        self.phase = Phase::Countdown { since: now };
        Ok(())
    }

    /// Advances the countdown; returns `true` when the timer just started.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let Phase::Countdown { since } = self.phase else {
            return false;
        };
        if now.saturating_duration_since(since) < self.settings.countdown_total() {
            return false;
        }
        log::debug!("timer started");
        self.phase = Phase::Running { since: now };
        true
    }

    /// Freezes the elapsed time at `now` and returns it.
    pub(crate) fn win(&mut self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        log::debug!("session won after {elapsed:?}");
        self.phase = Phase::Won { elapsed };
        elapsed
    }

    /// Returns to idle, cancelling any countdown and clearing the time.
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Returns the elapsed time: `now - start` while running, the frozen
    /// time once won, zero otherwise.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Running { since } => now.saturating_duration_since(since),
            Phase::Won { elapsed } => elapsed,
            Phase::Idle | Phase::AwaitingStart | Phase::Countdown { .. } => Duration::ZERO,
        }
    }

    /// Returns what the countdown overlay shows at `now`, if it is running.
    #[must_use]
    pub fn countdown(&self, now: Instant) -> Option<CountdownDisplay> {
        let Phase::Countdown { since } = self.phase else {
            return None;
        };
        let passed = now.saturating_duration_since(since);
        let step = self.settings.countdown_step.as_nanos().max(1);
        let steps_done = passed.as_nanos() / step;
        let from = u128::from(self.settings.countdown_from);
        if steps_done < from {
            // steps_done < from <= u8::MAX
            #[expect(clippy::cast_possible_truncation)]
            let remaining = (from - steps_done) as u8;
            Some(CountdownDisplay::Number(remaining))
        } else {
            Some(CountdownDisplay::Go)
        }
    }
}

/// Formats a duration as `m:ss.hh` (minutes, seconds, hundredths).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use arrowword_game::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(83_456)), "1:23.45");
/// assert_eq!(format_elapsed(Duration::ZERO), "0:00.00");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let minutes = millis / 60_000;
    let seconds = millis % 60_000 / 1000;
    let hundredths = millis % 1000 / 10;
    format!("{minutes}:{seconds:02}.{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_full_flow() {
        let t0 = Instant::now();
        let mut session = Session::new(SessionSettings::default());
        assert!(session.phase().is_idle());

        session.await_start();
        assert!(session.phase().is_awaiting_start());
        assert!(session.is_pre_start());

        session.begin_countdown(t0).unwrap();
        assert_eq!(session.countdown(t0), Some(CountdownDisplay::Number(5)));
        assert_eq!(session.countdown(t0 + secs(0.999)), Some(CountdownDisplay::Number(5)));
        assert_eq!(session.countdown(t0 + secs(1.0)), Some(CountdownDisplay::Number(4)));
        assert_eq!(session.countdown(t0 + secs(4.5)), Some(CountdownDisplay::Number(1)));
        assert_eq!(session.countdown(t0 + secs(5.0)), Some(CountdownDisplay::Go));
        assert_eq!(session.elapsed(t0 + secs(3.0)), Duration::ZERO);

        assert!(!session.tick(t0 + secs(6.4)));
        assert!(session.phase().is_countdown());
        let started = t0 + secs(6.5);
        assert!(session.tick(started));
        assert_eq!(session.phase(), Phase::Running { since: started });
        assert_eq!(session.countdown(started), None);
        assert!(session.has_started());

        assert_eq!(session.elapsed(started + secs(12.25)), secs(12.25));
        let elapsed = session.win(started + secs(20.0));
        assert_eq!(elapsed, secs(20.0));
        assert_eq!(session.elapsed(started + secs(99.0)), secs(20.0));
    }

    #[test]
    fn test_await_start_only_from_idle() {
        let t0 = Instant::now();
        let mut session = Session::new(SessionSettings::default());
        session.await_start();
        session.begin_countdown(t0).unwrap();
        session.tick(t0 + secs(7.0));
        session.await_start();
        assert!(session.phase().is_running());
    }

    #[test]
    fn test_begin_countdown_requires_prompt() {
        let mut session = Session::new(SessionSettings::default());
        assert_eq!(
            session.begin_countdown(Instant::now()),
            Err(GameError::NotAwaitingStart)
        );
    }

    #[test]
    fn test_reset_cancels_countdown() {
        let t0 = Instant::now();
        let mut session = Session::new(SessionSettings::default());
        session.await_start();
        session.begin_countdown(t0).unwrap();
        session.reset();
        assert!(session.phase().is_idle());
        assert!(!session.tick(t0 + secs(10.0)));
        assert_eq!(session.countdown(t0 + secs(1.0)), None);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(5)), "0:00.00");
        assert_eq!(format_elapsed(Duration::from_millis(9_990)), "0:09.99");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00.00");
    }
}
