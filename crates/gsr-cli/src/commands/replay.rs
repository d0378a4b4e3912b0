//! Deterministic replay: the wall clock is pinned to each line's `at_ms` and
//! ticks only happen when the script contains `timer_tick` events. Same script
//! and config always print the same lines.

use std::io;

use anyhow::Result;
use gsr_clock::{ClockEngine, ManualScheduler, ManualWallClock};
use tracing::info;
use uuid::Uuid;

use super::{build_dispatcher, load_settings, log_refusals, log_summary, JsonLinesSink};
use crate::script::load_script;

pub fn run(script_path: &str, config_paths: &[String]) -> Result<()> {
    let run_id = Uuid::new_v4();
    let settings = load_settings(config_paths)?;
    let lines = load_script(script_path)?;
    info!(%run_id, script = script_path, events = lines.len(), "replay start");

    let wall = ManualWallClock::at(0);
    let clock = ClockEngine::new(Box::new(ManualScheduler::new()), Box::new(wall.clone()));
    let mut dispatcher = build_dispatcher(settings.engine, clock);

    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock());
    let mut refused = 0usize;
    for line in &lines {
        wall.set(line.at_ms);
        dispatcher.enqueue(line.event.clone());
        let refusals = dispatcher.drain(&mut sink);
        log_refusals(line.at_ms, &refusals);
        refused += refusals.len();
    }
    let written = sink.finish()?;

    log_summary(
        &run_id,
        lines.len(),
        written,
        refused,
        settings.config_hash.as_deref(),
    );
    Ok(())
}
