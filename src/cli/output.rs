//! Output formatting, progress bars, and console observer adapters

use std::io::{BufRead, Write};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    error::Error,
    ports::Observer,
    render::FieldSnapshot,
    simulation::Outcome,
};

/// Create a progress bar over the step limit of a run
pub fn create_run_progress(max_steps: u64) -> ProgressBar {
    let pb = ProgressBar::new(max_steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Observer that dumps the field to stdout every tick.
///
/// With pacing enabled it blocks for Enter between ticks, the interactive
/// "press a key to continue" mode.
pub struct ConsoleObserver {
    pause: bool,
}

impl ConsoleObserver {
    pub fn new(pause: bool) -> Self {
        Self { pause }
    }

    fn wait_for_next_step(&self) -> Result<()> {
        print!("\nPress Enter to continue...");
        std::io::stdout().flush().map_err(|source| Error::Io {
            operation: "flush stdout".to_string(),
            source,
        })?;
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read pacing input".to_string(),
                source,
            })?;
        Ok(())
    }
}

impl Observer for ConsoleObserver {
    fn on_start(&mut self, snapshot: &FieldSnapshot) -> Result<()> {
        println!("{snapshot}");
        Ok(())
    }

    fn on_tick(&mut self, step: usize, snapshot: &FieldSnapshot) -> Result<()> {
        println!("step {step}");
        println!("{snapshot}");
        if self.pause {
            self.wait_for_next_step()?;
        }
        Ok(())
    }

    fn on_catch(&mut self, name: &str) -> Result<()> {
        println!("Tiger caught {name}");
        Ok(())
    }

    fn on_escape(&mut self, name: &str, escaped: bool) -> Result<()> {
        if escaped {
            println!("{name} jumped aside");
        } else {
            println!("{name} tried to escape but the cell was occupied or outside the field");
        }
        Ok(())
    }

    fn on_finish(&mut self, outcome: &Outcome) -> Result<()> {
        println!("{outcome}");
        Ok(())
    }
}

/// Observer that drives an indicatif progress bar instead of field dumps.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new(max_steps: usize) -> Self {
        Self {
            bar: create_run_progress(max_steps as u64),
        }
    }
}

impl Observer for ProgressObserver {
    fn on_tick(&mut self, step: usize, _snapshot: &FieldSnapshot) -> Result<()> {
        self.bar.set_position(step as u64);
        Ok(())
    }

    fn on_catch(&mut self, name: &str) -> Result<()> {
        self.bar.set_message(format!("caught {name}"));
        Ok(())
    }

    fn on_finish(&mut self, outcome: &Outcome) -> Result<()> {
        self.bar.finish_with_message(outcome.to_string());
        Ok(())
    }
}
