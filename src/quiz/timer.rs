//! Question timer
//!
//! Runs the per-question countdown as a tokio interval task and the
//! post-answer dwell as a one-shot sleep task. Both report back over an
//! mpsc channel with the [`Ticket`] they were started for. At most one of
//! each exists: starting a new one aborts the old one first, and the game
//! drops any event whose ticket is no longer current.

use crate::config::GameConfig;
use crate::quiz::game::Step;
use crate::quiz::session::Ticket;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Scheduled callback delivered to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One countdown unit elapsed
    Tick(Ticket),
    /// The answer dwell elapsed
    Advance(Ticket),
}

impl TimerEvent {
    pub fn ticket(&self) -> Ticket {
        match self {
            TimerEvent::Tick(ticket) | TimerEvent::Advance(ticket) => *ticket,
        }
    }
}

/// Owner of the countdown and dwell tasks
#[derive(Debug)]
pub struct QuestionTimer {
    events_tx: mpsc::Sender<TimerEvent>,
    tick_interval: Duration,
    answer_dwell: Duration,
    countdown: Option<JoinHandle<()>>,
    pending_advance: Option<JoinHandle<()>>,
}

impl QuestionTimer {
    /// Create a timer that sends its events to `events_tx`
    pub fn new(
        events_tx: mpsc::Sender<TimerEvent>,
        tick_interval: Duration,
        answer_dwell: Duration,
    ) -> Self {
        Self {
            events_tx,
            tick_interval,
            answer_dwell,
            countdown: None,
            pending_advance: None,
        }
    }

    /// Create a timer from config along with the receiving end of its events
    pub fn channel(config: &GameConfig) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self::new(tx, config.tick_interval, config.answer_dwell),
            rx,
        )
    }

    /// Start ticking for the question named by `ticket`, replacing any running timer
    pub fn start_countdown(&mut self, ticket: Ticket) {
        self.cancel();

        let tx = self.events_tx.clone();
        let period = self.tick_interval;
        self.countdown = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(TimerEvent::Tick(ticket)).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop the countdown and deliver `Advance(ticket)` after the dwell
    pub fn schedule_advance(&mut self, ticket: Ticket) {
        self.cancel();

        let tx = self.events_tx.clone();
        let dwell = self.answer_dwell;
        self.pending_advance = Some(tokio::spawn(async move {
            time::sleep(dwell).await;
            // Receiver gone means the game loop has shut down
            let _ = tx.send(TimerEvent::Advance(ticket)).await;
        }));
    }

    /// Abort both tasks
    pub fn cancel(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        if let Some(handle) = self.pending_advance.take() {
            handle.abort();
        }
    }

    /// Schedule whatever `step` calls for
    pub fn follow(&mut self, step: &Step) {
        match step {
            Step::Question(ticket) => self.start_countdown(*ticket),
            Step::Answered { ticket, .. } => self.schedule_advance(*ticket),
            Step::Ended(_) => self.cancel(),
            Step::Ticked { .. } | Step::Ignored => {}
        }
    }

    /// Check if a countdown task is alive
    pub fn is_counting_down(&self) -> bool {
        self.countdown
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Check if an advance is waiting to fire
    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::session::SessionId;

    fn ticket(session: u64, question: usize) -> Ticket {
        Ticket {
            session: SessionId(session),
            question,
        }
    }

    fn timer() -> (QuestionTimer, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            QuestionTimer::new(tx, Duration::from_secs(1), Duration::from_millis(1500)),
            rx,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_every_interval() {
        let (mut timer, mut rx) = timer();
        let start = Instant::now();
        timer.start_countdown(ticket(1, 0));

        for n in 1..=3u64 {
            assert_eq!(rx.recv().await, Some(TimerEvent::Tick(ticket(1, 0))));
            assert_eq!(start.elapsed(), Duration::from_secs(n));
        }
        assert!(timer.is_counting_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_countdown() {
        let (mut timer, mut rx) = timer();
        timer.start_countdown(ticket(1, 0));
        timer.start_countdown(ticket(2, 0));

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(TimerEvent::Tick(ticket(2, 0))));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_fires_once_after_dwell() {
        let (mut timer, mut rx) = timer();
        let start = Instant::now();
        timer.start_countdown(ticket(1, 0));
        timer.schedule_advance(ticket(1, 0));
        assert!(!timer.is_counting_down());

        assert_eq!(rx.recv().await, Some(TimerEvent::Advance(ticket(1, 0))));
        assert_eq!(start.elapsed(), Duration::from_millis(1500));

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_advance() {
        let (mut timer, mut rx) = timer();
        timer.schedule_advance(ticket(1, 2));
        assert!(timer.has_pending_advance());
        timer.cancel();

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.has_pending_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_tasks() {
        let (mut timer, mut rx) = timer();
        timer.start_countdown(ticket(1, 0));
        drop(timer);

        time::sleep(Duration::from_secs(3)).await;
        // The aborted task drops its sender, closing the channel
        assert_eq!(rx.recv().await, None);
    }
}
