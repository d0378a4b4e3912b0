use std::time::Duration;

use gsr_clock::{SystemWallClock, TickScheduler, WallClock};
use gsr_engine::Event;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::commands::watch::Input;

/// Timer task that feeds `TimerTick` events into the same channel as the
/// script, so the engine only ever sees ticks on the consumer task.
pub struct TokioScheduler {
    tx: UnboundedSender<Input>,
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<Input>) -> Self {
        Self { tx, task: None }
    }
}

impl TickScheduler for TokioScheduler {
    fn start(&mut self, initial_delay_ms: u64, interval_ms: u64) {
        self.stop();
        let tx = self.tx.clone();
        let interval = Duration::from_millis(interval_ms.max(1));
        let first = tokio::time::Instant::now() + Duration::from_millis(initial_delay_ms);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first, interval);
            loop {
                ticker.tick().await;
                let now_ms = SystemWallClock.now_ms();
                if tx.send(Input::Event(Event::TimerTick { now_ms })).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
