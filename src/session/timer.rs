//! Scoped timer tasks feeding the session event channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Event delivered to the session controller by its timers.
///
/// Each armed timer gets a fresh generation; the controller drops events
/// whose generation is not the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second of the question countdown elapsed.
    Tick { generation: u64 },
    /// The feedback pause is over.
    FeedbackElapsed { generation: u64 },
}

impl SessionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            SessionEvent::Tick { generation } | SessionEvent::FeedbackElapsed { generation } => {
                *generation
            }
        }
    }
}

/// A running timer task. Dropping the handle cancels the task.
///
/// Must be created from within a Tokio runtime.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Send a `Tick` every `period`, starting one period from now.
    pub fn repeating(
        period: Duration,
        generation: u64,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                trace!(generation, "tick");
                if events.send(SessionEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    /// Send a single `FeedbackElapsed` after `delay`.
    pub fn once(
        delay: Duration,
        generation: u64,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(SessionEvent::FeedbackElapsed { generation });
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_repeating_ticks_each_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        let _timer = TimerHandle::repeating(Duration::from_secs(1), 3, tx);

        for expected in 1..=3u64 {
            assert_eq!(rx.recv().await, Some(SessionEvent::Tick { generation: 3 }));
            assert_eq!(started.elapsed().as_secs(), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        let timer = TimerHandle::once(Duration::from_millis(2000), 9, tx);

        assert_eq!(
            rx.recv().await,
            Some(SessionEvent::FeedbackElapsed { generation: 9 })
        );
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
        assert_eq!(rx.recv().await, None);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TimerHandle::repeating(Duration::from_secs(1), 1, tx);
        drop(timer);
        assert_eq!(rx.recv().await, None);
    }
}
