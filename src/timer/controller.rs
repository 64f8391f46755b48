use std::{sync::Arc, time::Duration};

use log::debug;
use serde::Serialize;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::log_info;

use super::TimerState;

const ENABLE_LOGS: bool = true;

/// One simulated minute per tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Longest period the ticker accepts; one tick a day.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub tick_interval_secs: u64,
}

/// Periodic tick source. Cancelled and aborted when dropped.
struct Ticker {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl Ticker {
    fn spawn(state: Arc<Mutex<TimerState>>, period: Duration) -> Self {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        // Re-armed on every start, so the first tick is a full period away.
        let first_tick = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let mut guard = state.lock().await;
                        if !guard.tick() {
                            break;
                        }
                        debug!("Reading timer at {} minutes", guard.elapsed_minutes);
                    }
                }
            }
        });

        Self {
            handle,
            cancel_token,
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        self.handle.abort();
    }
}

/// Owns the reading session and the task that advances it. Clones share
/// both; the ticker stops once the last clone is dropped.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    ticker: Arc<Mutex<Option<Ticker>>>,
    tick_interval: Duration,
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl TimerController {
    pub fn new(tick_interval: Duration) -> Self {
        // `interval_at` panics on a zero period, and `Instant` addition
        // overflows on huge ones.
        let tick_interval = if tick_interval.is_zero() {
            DEFAULT_TICK_INTERVAL
        } else {
            tick_interval.min(MAX_TICK_INTERVAL)
        };

        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval,
        }
    }

    pub async fn get_state(&self) -> TimerState {
        self.state.lock().await.clone()
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.get_state().await,
            tick_interval_secs: self.tick_interval.as_secs(),
        }
    }

    pub async fn start(&self) -> TimerState {
        let mut ticker = self.ticker.lock().await;
        let snapshot = {
            let mut state = self.state.lock().await;
            state.start();
            state.clone()
        };

        if ticker.is_none() {
            *ticker = Some(Ticker::spawn(self.state.clone(), self.tick_interval));
            log_info!(
                "Reading timer started at {} minutes",
                snapshot.elapsed_minutes
            );
        }

        snapshot
    }

    pub async fn pause(&self) -> TimerState {
        let mut ticker = self.ticker.lock().await;
        let snapshot = {
            let mut state = self.state.lock().await;
            state.pause();
            state.clone()
        };

        if ticker.take().is_some() {
            log_info!(
                "Reading timer paused at {} minutes",
                snapshot.elapsed_minutes
            );
        }

        snapshot
    }

    pub async fn reset(&self) -> TimerState {
        let mut state = self.state.lock().await;
        state.reset();
        state.clone()
    }

    /// Deliver one tick by hand; the ticker calls the same transition.
    pub async fn tick(&self) -> TimerState {
        let mut state = self.state.lock().await;
        state.tick();
        state.clone()
    }

    /// Stop the timer and its tick source for good.
    pub async fn shutdown(&self) {
        let state = self.pause().await;
        log_info!(
            "Reading timer shut down after {} minutes",
            state.elapsed_minutes
        );
    }
}
