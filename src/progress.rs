use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(120);

const BAR_TEMPLATE: &str =
    "{msg} {bar:30.cyan/blue} {bytes:>10}/{total_bytes:<10} {percent:>3}% @ {binary_bytes_per_sec} ETA {eta}";

// Unknown length: count bytes, never compute a ratio.
const COUNTER_TEMPLATE: &str = "{msg} {spinner:.cyan} {bytes} @ {binary_bytes_per_sec}";

/// Live download indicator fed with the size of every received chunk.
///
/// With a known total it renders a bar with a percentage. With `total == 0`
/// (no `Content-Length`) it degrades to a plain byte counter. A reporter
/// dropped before [`finish`](Self::finish) is abandoned in place so the last
/// state stays on screen after a failed download.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter labelled `Downloading {label}`.
    ///
    /// When `enabled` is false nothing is drawn but the running sum is
    /// still tracked.
    pub fn new(total: u64, label: &str, enabled: bool) -> Self {
        let target = if enabled {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        };
        let length = (total > 0).then_some(total);
        let bar = ProgressBar::with_draw_target(length, target);

        if total > 0 {
            bar.set_style(bar_style());
        } else {
            bar.set_style(counter_style());
            if enabled {
                bar.enable_steady_tick(TICK_INTERVAL);
            }
        }
        bar.set_message(style(format!("Downloading {label}")).yellow().to_string());

        Self { bar }
    }

    /// Add one chunk's worth of bytes.
    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    /// Bytes reported so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Whether the reporter reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Mark the stream as exhausted.
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸━")
}

fn counter_style() -> ProgressStyle {
    ProgressStyle::with_template(COUNTER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
