//! Progress reporting for pattern execution
//!
//! Both reporters write to stderr; stdout carries only results.

use colored::Colorize;
use council_application::ProgressNotifier;
use council_domain::Phase;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, agent: &str, success: bool) {
        let Ok(slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let taken = self.phase_bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(pb) = taken {
            pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, agent: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), agent);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_one_phase_at_a_time() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::Ask, 2);
        reporter.on_task_complete(&Phase::Ask, "codex", true);
        reporter.on_task_complete(&Phase::Ask, "gemini", false);
        {
            let slot = reporter.phase_bar.lock().unwrap();
            assert_eq!(slot.as_ref().unwrap().position(), 2);
        }
        reporter.on_phase_complete(&Phase::Ask);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_task_without_phase_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(&Phase::Synthesis, "gemini", true);
        reporter.on_phase_complete(&Phase::Synthesis);
    }
}
