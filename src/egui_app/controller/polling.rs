//! Poller that keeps the run table fresh while any run is still live.
//!
//! The poller is a value-typed state machine owned by the controller. Every
//! applied refresh re-evaluates it: live runs keep it polling, an all-terminal
//! set drops it back to idle with no further ticks. Ticks that land while a
//! refresh is in flight are deferred, never queued, so at most one poll
//! request is outstanding. Navigating away stops the poller outright.

use std::time::{Duration, Instant};

use crate::api::RunSummary;

/// Interval between poll refreshes of the run table.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Polling,
}

/// Polling state machine for the run table.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunPoller {
    phase: Phase,
    next_tick: Option<Instant>,
}

impl RunPoller {
    /// Re-evaluate after a refresh: poll while any run is non-terminal.
    pub fn observe(&mut self, runs: &[RunSummary], now: Instant) {
        let any_live = runs.iter().any(|run| !run.status.is_terminal());
        if any_live {
            if self.phase != Phase::Polling {
                self.phase = Phase::Polling;
                self.next_tick = Some(now + POLL_INTERVAL);
            }
        } else {
            self.stop();
        }
    }

    /// Whether a poll tick is due.
    pub fn due(&self, now: Instant) -> bool {
        self.phase == Phase::Polling && self.next_tick.is_some_and(|tick| now >= tick)
    }

    /// Schedule the next tick. Used both after dispatching a refresh and when
    /// a tick is skipped because one is already in flight.
    pub fn defer(&mut self, now: Instant) {
        if self.phase == Phase::Polling {
            self.next_tick = Some(now + POLL_INTERVAL);
        }
    }

    /// Release the timer, whatever state it is in.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.next_tick = None;
    }

    pub fn is_polling(&self) -> bool {
        self.phase == Phase::Polling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RunStatus;

    fn run(status: RunStatus) -> RunSummary {
        RunSummary {
            run_id: "r".to_string(),
            plugin_id: "demo".to_string(),
            status,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            total_cases: None,
            processed_cases: None,
            accuracy: None,
            coverage: None,
            error_rate: None,
            mismatches: 0,
            errors: 0,
        }
    }

    #[test]
    fn live_runs_start_polling_and_terminal_sets_stop_it() {
        let mut poller = RunPoller::default();
        let now = Instant::now();

        poller.observe(&[run(RunStatus::Running), run(RunStatus::Success)], now);
        assert!(poller.is_polling());

        poller.observe(&[run(RunStatus::Success), run(RunStatus::Success)], now);
        assert!(!poller.is_polling());
        assert!(!poller.due(now + POLL_INTERVAL * 10));
    }

    #[test]
    fn pending_counts_as_live() {
        let mut poller = RunPoller::default();
        poller.observe(&[run(RunStatus::Pending)], Instant::now());
        assert!(poller.is_polling());
    }

    #[test]
    fn ticks_become_due_after_the_interval() {
        let mut poller = RunPoller::default();
        let now = Instant::now();
        poller.observe(&[run(RunStatus::Running)], now);

        assert!(!poller.due(now));
        assert!(poller.due(now + POLL_INTERVAL));

        poller.defer(now + POLL_INTERVAL);
        assert!(!poller.due(now + POLL_INTERVAL));
        assert!(poller.due(now + POLL_INTERVAL * 2));
    }

    #[test]
    fn re_observing_live_runs_does_not_reset_the_schedule() {
        let mut poller = RunPoller::default();
        let now = Instant::now();
        poller.observe(&[run(RunStatus::Running)], now);
        let later = now + POLL_INTERVAL / 2;
        poller.observe(&[run(RunStatus::Running)], later);
        // The original tick stays scheduled off the first observation.
        assert!(poller.due(now + POLL_INTERVAL));
    }

    #[test]
    fn stop_releases_the_timer_from_any_state() {
        let mut poller = RunPoller::default();
        let now = Instant::now();
        poller.observe(&[run(RunStatus::Running)], now);
        poller.stop();
        assert!(!poller.is_polling());
        assert!(!poller.due(now + POLL_INTERVAL));

        poller.stop();
        assert!(!poller.is_polling());
    }

    #[test]
    fn empty_run_set_is_idle() {
        let mut poller = RunPoller::default();
        poller.observe(&[], Instant::now());
        assert!(!poller.is_polling());
    }
}
