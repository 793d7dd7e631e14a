use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

/// Identifies one `start` of a `CountdownTimer`.
///
/// Every `start` issues a new token and discards the previous run's callback, so a completion
/// can only ever be attributed to the latest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
}

type Completion = Box<dyn FnOnce(TimerToken) + Send>;

/// A cancellable, restartable whole-second countdown.
///
/// Time is fed in by the caller through `advance`, which makes it equally usable behind a
/// real clock and in simulated tests. Sub-second remainders carry over between calls.
pub struct CountdownTimer {
    state: TimerState,
    remaining_secs: u32,
    carry: Duration,
    generation: u64,
    on_complete: Option<Completion>,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("state", &self.state)
            .field("remaining_secs", &self.remaining_secs)
            .field("generation", &self.generation)
            .field("pending", &self.on_complete.is_some())
            .finish()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining_secs: 0,
            carry: Duration::ZERO,
            generation: 0,
            on_complete: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Token of the most recent `start`, if the timer is still running it.
    pub fn active_token(&self) -> Option<TimerToken> {
        self.is_running().then_some(TimerToken(self.generation))
    }

    /// Supersedes any run in progress and counts down from `seconds`.
    pub fn start<F>(&mut self, seconds: u32, on_complete: F) -> TimerToken
    where
        F: FnOnce(TimerToken) + Send + 'static,
    {
        self.stop();
        self.generation += 1;
        self.remaining_secs = seconds;
        self.state = TimerState::Running;
        self.on_complete = Some(Box::new(on_complete));
        TimerToken(self.generation)
    }

    /// Goes idle and drops the pending callback. Safe when already idle.
    pub fn stop(&mut self) {
        self.state = TimerState::Idle;
        self.carry = Duration::ZERO;
        self.on_complete = None;
    }

    /// Feeds wall-clock time. Returns `true` if the countdown completed during this call.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.is_running() {
            return false;
        }

        self.carry += elapsed;
        while self.remaining_secs > 0 && self.carry >= SECOND {
            self.carry -= SECOND;
            self.remaining_secs -= 1;
        }
        if self.remaining_secs > 0 {
            return false;
        }

        let token = TimerToken(self.generation);
        let callback = self.on_complete.take();
        self.stop();
        if let Some(callback) = callback {
            callback(token);
        }
        true
    }
}
