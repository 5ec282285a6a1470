//! UI/Progress presentation layer
//!
//! This module handles:
//! - Styled rendering of devices, resources and services
//! - Progress reporting while a federation of catalogs is probed
//!
//! Probing goes through the ProgressReporter trait so commands can pick an
//! interactive bar or stay silent (scripted output, tests).

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for multi-catalog operations
pub trait ProgressReporter {
    /// Start reporting over the given number of catalogs
    fn begin(&mut self, total_catalogs: u64);

    /// Update to show the catalog currently being probed
    fn probing(&mut self, endpoint: &str);

    /// One catalog finished
    fn inc(&mut self);

    /// All catalogs finished
    fn finish(&mut self);
}

/// Interactive progress reporter with a visual progress bar
#[derive(Default)]
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn begin(&mut self, total_catalogs: u64) {
        #[allow(clippy::expect_used)]
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("static template")
            .progress_chars("#>-");
        let bar = ProgressBar::new(total_catalogs);
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn probing(&mut self, endpoint: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(endpoint.to_string());
        }
    }

    fn inc(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// No-op progress reporter for scripted output
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn begin(&mut self, _total_catalogs: u64) {}
    fn probing(&mut self, _endpoint: &str) {}
    fn inc(&mut self) {}
    fn finish(&mut self) {}
}
