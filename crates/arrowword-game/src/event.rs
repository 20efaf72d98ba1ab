use std::{mem, time::Duration};

use arrowword_layout::SegmentId;

/// Notifications for the presentation layer.
///
/// Events are one-shot: each state change is reported once, in the order it
/// happened, and then drained with [`Game::take_events`](crate::Game::take_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// The grid snapshot changed; persist it.
    GridChanged,
    /// A segment just became solved (flash it).
    SegmentSolved(SegmentId),
    /// The countdown finished and the timer started.
    TimerStarted,
    /// The grid just became fully correct.
    Won {
        /// Frozen elapsed time at the winning input.
        elapsed: Duration,
    },
}

#[derive(Debug, Default, Clone)]
pub(crate) struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_all(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_all_returns_events_and_clears_queue() {
        let mut queue = EventQueue::default();
        queue.push(GameEvent::GridChanged);
        queue.push(GameEvent::TimerStarted);

        assert_eq!(
            queue.take_all(),
            [GameEvent::GridChanged, GameEvent::TimerStarted]
        );
        assert!(queue.take_all().is_empty());
    }
}
