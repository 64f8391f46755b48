use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Stopped,
    Running,
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Stopped
    }
}

/// Reading session counter. Minutes only advance through [`TimerState::tick`]
/// while running and only drop back through [`TimerState::reset`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub elapsed_minutes: u64,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn start(&mut self) {
        self.status = TimerStatus::Running;
    }

    pub fn pause(&mut self) {
        self.status = TimerStatus::Stopped;
    }

    pub fn reset(&mut self) {
        self.elapsed_minutes = 0;
    }

    /// Returns whether the tick counted.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed_minutes = self.elapsed_minutes.saturating_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = TimerState::new();
        assert_eq!(state.status, TimerStatus::Stopped);
        assert_eq!(state.elapsed_minutes, 0);
    }

    #[test]
    fn test_tick_only_counts_while_running() {
        let mut state = TimerState::new();
        assert!(!state.tick());
        assert_eq!(state.elapsed_minutes, 0);

        state.start();
        assert!(state.tick());
        assert!(state.tick());
        assert_eq!(state.elapsed_minutes, 2);

        state.pause();
        assert!(!state.tick());
        assert_eq!(state.elapsed_minutes, 2);
    }

    #[test]
    fn test_repeated_start_and_pause_are_idempotent() {
        let mut state = TimerState::new();
        let mut counted = 0;

        // Interleave redundant commands with ticks; only running ticks count.
        let script = "ssTpppTTsTsTTpTsTT";
        for step in script.chars() {
            match step {
                's' => state.start(),
                'p' => state.pause(),
                'T' => {
                    if state.is_running() {
                        counted += 1;
                    }
                    state.tick();
                }
                _ => unreachable!(),
            }
        }

        assert_eq!(state.elapsed_minutes, counted);
        assert_eq!(counted, 6);
    }

    #[test]
    fn test_reset_keeps_status() {
        let mut state = TimerState::new();
        state.start();
        state.tick();
        state.tick();

        state.reset();
        assert_eq!(state.elapsed_minutes, 0);
        assert!(state.is_running());

        state.tick();
        assert_eq!(state.elapsed_minutes, 1);

        state.pause();
        state.reset();
        assert_eq!(state.elapsed_minutes, 0);
        assert_eq!(state.status, TimerStatus::Stopped);
    }

    #[test]
    fn test_pause_resume_scenario() {
        let mut state = TimerState::new();
        state.start();
        for _ in 0..3 {
            state.tick();
        }
        state.pause();
        for _ in 0..2 {
            state.tick();
        }
        state.start();
        state.tick();
        assert_eq!(state.elapsed_minutes, 4);
    }
}
