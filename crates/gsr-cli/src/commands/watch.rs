//! Real-time playback.
//!
//! A feeder task releases script events at their (speed-scaled) offsets and a
//! [`TokioScheduler`] emits `TimerTick`s while a clock runs. Both write to one
//! unbounded channel; this task is the only consumer and the only owner of the
//! engine. The feeder's join handle is watched alongside the channel, so a
//! feeder that fails ends the run instead of leaving it waiting on ticks.

use std::io;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use gsr_clock::{ClockEngine, SystemWallClock};
use gsr_engine::Event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::{build_dispatcher, load_settings, log_refusals, log_summary, JsonLinesSink};
use crate::script::{load_script, ScriptLine};
use crate::tokio_scheduler::TokioScheduler;

#[derive(Debug)]
pub enum Input {
    Event(Event),
    /// Feeder has released every script line.
    ScriptDone,
}

pub async fn run(script_path: &str, config_paths: &[String], speed: Option<f64>) -> Result<()> {
    let run_id = Uuid::new_v4();
    let settings = load_settings(config_paths)?;
    let speed = speed.unwrap_or(settings.playback_speed);
    if !(speed.is_finite() && speed > 0.0) {
        bail!("playback speed must be a positive number, got {speed}");
    }
    let lines = load_script(script_path)?;
    // at_ms never decreases, so the last line bounds every release time.
    if let Some(last) = lines.last() {
        release_at(Instant::now(), last.at_ms, speed)?;
    }
    info!(%run_id, script = script_path, events = lines.len(), speed, "watch start");

    let (tx, mut rx) = mpsc::unbounded_channel::<Input>();
    let clock = ClockEngine::new(
        Box::new(TokioScheduler::new(tx.clone())),
        Box::new(SystemWallClock),
    );
    let mut dispatcher = build_dispatcher(settings.engine, clock);
    let events = lines.len();
    let mut feeder = spawn_feeder(lines, speed, tx);
    let mut feeder_finished = false;

    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock());
    let mut refused = 0usize;
    let started = Instant::now();
    loop {
        tokio::select! {
            input = rx.recv() => match input {
                Some(Input::Event(event)) => {
                    debug!(event = event.name(), "received");
                    dispatcher.enqueue(event);
                    let refusals = dispatcher.drain(&mut sink);
                    log_refusals(started.elapsed().as_millis() as u64, &refusals);
                    refused += refusals.len();
                }
                Some(Input::ScriptDone) | None => break,
            },
            joined = &mut feeder, if !feeder_finished => {
                feeder_finished = true;
                match joined {
                    // ScriptDone is already queued behind the remaining events.
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => return Err(e.context("script feeder failed")),
                    Err(e) => bail!("script feeder stopped: {e}"),
                }
            }
        }
    }
    if !feeder_finished {
        feeder.abort();
    }
    // Dropping the dispatcher stops any running tick task.
    drop(dispatcher);
    let written = sink.finish()?;

    log_summary(
        &run_id,
        events,
        written,
        refused,
        settings.config_hash.as_deref(),
    );
    Ok(())
}

/// When a line stamped `at_ms` is due, measured from `start`.
fn release_at(start: Instant, at_ms: u64, speed: f64) -> Result<Instant> {
    let secs = at_ms as f64 / 1_000.0 / speed;
    let offset = Duration::try_from_secs_f64(secs)
        .map_err(|e| anyhow!("at_ms {at_ms} at speed {speed} is out of range: {e}"))?;
    start
        .checked_add(offset)
        .ok_or_else(|| anyhow!("at_ms {at_ms} at speed {speed} is out of range: too far ahead"))
}

fn spawn_feeder(
    lines: Vec<ScriptLine>,
    speed: f64,
    tx: mpsc::UnboundedSender<Input>,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let start = Instant::now();
        for line in lines {
            let due = release_at(start, line.at_ms, speed)?;
            tokio::time::sleep_until(due).await;
            if tx.send(Input::Event(line.event)).is_err() {
                return Ok(());
            }
        }
        let _ = tx.send(Input::ScriptDone);
        Ok(())
    })
}
