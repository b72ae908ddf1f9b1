//! # Sleep Tracker Application Entry Point
//!
//! This binary replays a recorded accelerometer file through the classifier
//! and prints one line per state change, for offline evaluation against
//! annotated datasets. On the wearable itself the library is driven by the
//! accelerometer interrupt instead; everything here is test harness.

// Test modules
#[cfg(test)]
mod tests;

use std::cell::Cell;
use std::env;
use std::process;
use std::rc::Rc;

use anyhow::Context;
use sleep_tracker_lib::config::Config;
use sleep_tracker_lib::replay::Replay;
use sleep_tracker_lib::tracker::{SleepTracker, VanHeesTracker};

fn print_usage(program: &str, config: &Config) {
    eprintln!("Usage: {} [INFILE]", program);
    eprintln!("Where [INFILE] is a whitespace-delimited file where each row holds:");
    eprintln!("  TIME X Y Z TRUTH");
    eprintln!(
        "The input sample rate must be {} Hz, with one row per sample.",
        config.sampling.rate_hz
    );
    eprintln!("Output is one line for each change in state in format:");
    eprintln!("  TIME STATE");
    eprintln!("Where [STATE] is 0 or 1 for wake or sleep.");
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let config = Config::load();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "sleep-tracker".into());
    let infile = match args.next() {
        Some(path) => path,
        None => {
            print_usage(&program, &config);
            process::exit(1);
        }
    };

    // The sink only sees the new state, so the current row's timestamp is
    // shared with it through a cell updated by the replay loop.
    let current_time = Rc::new(Cell::new(0.0f32));
    let sink_time = Rc::clone(&current_time);
    let mut tracker = VanHeesTracker::with_config(&config, move |state| {
        println!("{} {}", sink_time.get(), state.code());
    });

    let replay =
        Replay::open(&infile).with_context(|| format!("unable to open '{}'", infile))?;
    for sample in replay {
        let sample = sample.with_context(|| format!("while reading '{}'", infile))?;
        current_time.set(sample.time_s);
        tracker.update_accel(sample.accel[0], sample.accel[1], sample.accel[2]);
    }

    Ok(())
}
