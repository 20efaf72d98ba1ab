use std::time::Duration;

/// Timing of the play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// First number shown by the countdown.
    pub countdown_from: u8,
    /// How long each countdown number is shown.
    pub countdown_step: Duration,
    /// How long the "go" display is shown before the timer starts.
    pub go_duration: Duration,
    /// How often front ends refresh the elapsed-time display.
    ///
    /// Display only; correctness never depends on it.
    pub refresh_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            countdown_from: 5,
            countdown_step: Duration::from_secs(1),
            go_duration: Duration::from_millis(1500),
            refresh_interval: Duration::from_millis(33),
        }
    }
}

impl SessionSettings {
    /// Total time from starting the countdown until the timer runs.
    #[must_use]
    pub fn countdown_total(&self) -> Duration {
        self.countdown_step * u32::from(self.countdown_from) + self.go_duration
    }
}
