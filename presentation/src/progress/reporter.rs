//! Progress reporting for collection jobs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use prospect_application::ports::collection_progress::CollectionProgress;
use prospect_domain::CollectionReport;
use std::sync::Mutex;

/// Reports collection progress with a bar filling toward the target
pub struct CollectionProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CollectionProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for CollectionProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionProgress for CollectionProgressReporter {
    fn on_start(&self, target_count: usize, accepted_count: usize) {
        let pb = ProgressBar::new(target_count as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Collecting");
        pb.set_position(accepted_count.min(target_count) as u64);
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_refill(&self, requested: usize, received: usize) {
        self.with_bar(|pb| pb.set_message(format!("fetched {}/{} candidates", received, requested)));
    }

    fn on_chunk_submitted(&self, chunk_len: usize, accepted_in_chunk: usize, accepted_count: usize) {
        self.with_bar(|pb| {
            pb.set_position(accepted_count.min(pb.length().unwrap_or(u64::MAX) as usize) as u64);
            pb.set_message(format!("{} {} of {}", "+".green(), accepted_in_chunk, chunk_len));
        });
    }

    fn on_finished(&self, report: &CollectionReport) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            let outcome = if report.outcome.is_fulfilled() {
                report.outcome.to_string().green()
            } else {
                report.outcome.to_string().yellow()
            };
            pb.finish_with_message(format!("{}", outcome));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleCollectionProgress;

impl CollectionProgress for SimpleCollectionProgress {
    fn on_start(&self, target_count: usize, accepted_count: usize) {
        println!(
            "{} {} ({} of {} accepted)",
            "->".cyan(),
            "Collecting".bold(),
            accepted_count,
            target_count
        );
    }

    fn on_refill(&self, requested: usize, received: usize) {
        println!("  {} fetched {}/{} candidates", "~".cyan(), received, requested);
    }

    fn on_chunk_submitted(&self, chunk_len: usize, accepted_in_chunk: usize, accepted_count: usize) {
        println!(
            "  {} submitted {}, accepted {} (total {})",
            "v".green(),
            chunk_len,
            accepted_in_chunk,
            accepted_count
        );
    }

    fn on_finished(&self, report: &CollectionReport) {
        println!("{} {}", "=>".cyan(), report.outcome.to_string().bold());
    }
}
