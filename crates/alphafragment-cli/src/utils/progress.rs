use alphafragment::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;
const SUBSECTION_TEMPLATE: &str = "{prefix:.bold} {msg} [{bar:30.cyan/blue}] {pos}/{len} subsections";

/// Renders engine progress events on stderr, one protein at a time.
///
/// Phases show as a spinner, the subsection search as a bar counting resolved
/// subsections. Widening and bisection events are printed above the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self {
            bar: Arc::new(Mutex::new(bar)),
        }
    }

    /// Labels every following phase, typically with the protein name.
    pub fn set_prefix(&self, prefix: &str) {
        if let Ok(bar) = self.bar.lock() {
            bar.set_prefix(prefix.to_string());
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = Arc::clone(&self.bar);
        Box::new(move |event: Progress| match bar.lock() {
            Ok(bar) => render(&bar, event),
            Err(_) => warn!("Progress bar mutex was poisoned. Cannot update progress."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn render(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓ Done");
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_style(subsection_style());
            bar.set_length(total_steps);
        }
        Progress::TaskIncrement => bar.inc(1),
        Progress::TaskFinish => {
            if let Some(total) = bar.length() {
                bar.set_position(total);
            }
            bar.finish();
        }
        Progress::LengthWidened {
            first_res,
            last_res,
            max_len,
        } => bar.println(format!(
            "  residues {}-{}: no valid fragmentation, maximum length widened to {}",
            first_res + 1,
            last_res + 1,
            max_len
        )),
        Progress::Bisected {
            first_res,
            last_res,
            cut,
        } => bar.println(format!(
            "  residues {}-{}: search timed out, split before residue {}",
            first_res + 1,
            last_res + 1,
            cut + 1
        )),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn subsection_style() -> ProgressStyle {
    ProgressStyle::with_template(SUBSECTION_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}
