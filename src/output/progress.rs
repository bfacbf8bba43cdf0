//! Progress indicators using indicatif

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, Styles};

/// Create a spinner for indeterminate progress.
///
/// # Panics
///
/// Panics if the spinner template string is invalid (it is a compile-time constant and will not panic).
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠁", "⠂", "⠄", "⡀", "⡈", "⡐", "⡠", "⣀", "⣁", "⣂", "⣄", "⣌", "⣔", "⣤", "⣥", "⣦",
                "⣮", "⣶", "⣷", "⣿", "⡿", "⠿", "⢟", "⠟", "⡛", "⠛", "⠫", "⢋", "⠋", "⠍", "⡉", "⠉",
                "⠑", "⠡", "⢁",
            ])
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a checkmark on the left.
pub fn finish_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix} {msg}")
            .expect("valid template"),
    );
    pb.set_prefix("✓");
    pb.finish_with_message(msg.to_string());
}

/// `ProgressReporter` that drives a spinner when attached to a TTY and falls
/// back to plain lines otherwise.
pub struct SpinnerReporter {
    bar: Option<ProgressBar>,
    styles: Styles,
    quiet: bool,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new(ctx: &OutputContext) -> Self {
        Self {
            bar: ctx.show_progress().then(|| spinner("starting...")),
            styles: ctx.styles.clone(),
            quiet: ctx.quiet,
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        match &self.bar {
            Some(bar) => bar.set_message(message.to_string()),
            None if !self.quiet => println!("  {message}"),
            None => {}
        }
    }

    fn success(&self, message: &str) {
        if let Some(bar) = &self.bar {
            finish_ok(bar, message);
        } else if !self.quiet {
            println!("  {} {message}", "✓".style(self.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        match &self.bar {
            Some(bar) => bar.println(format!("  {} {message}", "⚠".style(self.styles.warning))),
            None if !self.quiet => {
                println!("  {} {message}", "⚠".style(self.styles.warning));
            }
            None => {}
        }
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        // Error paths return before `success`; clear the tick line.
        if let Some(bar) = &self.bar
            && !bar.is_finished()
        {
            bar.finish_and_clear();
        }
    }
}
