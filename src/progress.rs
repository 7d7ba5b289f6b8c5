//! Progress reporting for the sampling phase.
//!
//! Every worker owns one counter and is the only thread that ever
//! writes it.  The monitor sums the counters without any
//! coordination: loads and stores are relaxed, so the total it sees
//! can lag the truth by a few samples.  That is fine for a progress
//! bar and nothing else reads these values.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// How often the monitor redraws the bar.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

const BAR_WIDTH: u64 = 32;
const EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

// The estimate is noise until the run has been going for a while.
const ETA_AFTER: Duration = Duration::from_secs(2);

/// The per-worker sample counters of one sampling run.
#[derive(Debug)]
pub struct Progress {
    counters: Vec<AtomicU64>,
    running: AtomicUsize,
    per_worker: u64,
}

/// Held by a worker for as long as it runs; dropping it, normally or
/// while unwinding, tells the monitor the worker is gone.
#[derive(Debug)]
pub struct Running<'a>(&'a AtomicUsize);

impl<'a> Drop for Running<'a> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Release);
    }
}

impl Progress {
    /// Counters for `workers` workers, each with a budget of
    /// `per_worker` samples.  All workers start out as running.
    pub fn new(workers: usize, per_worker: u64) -> Self {
        Progress {
            counters: (0..workers).map(|_| AtomicU64::new(0)).collect(),
            running: AtomicUsize::new(workers),
            per_worker,
        }
    }

    /// The counter worker `worker` writes to.
    pub fn counter(&self, worker: usize) -> &AtomicU64 {
        &self.counters[worker]
    }

    /// The token a worker keeps alive while it samples.
    pub fn running(&self) -> Running {
        Running(&self.running)
    }

    /// True once every worker has dropped its `Running` token.  The
    /// counters read after this returns true are final.
    pub fn finished(&self) -> bool {
        self.running.load(Ordering::Acquire) == 0
    }

    /// Samples done so far, summed over all workers.
    pub fn total(&self) -> u64 {
        self.counters
            .iter()
            .fold(0u64, |sum, c| sum.saturating_add(c.load(Ordering::Relaxed)))
    }

    /// Samples the whole run will take.
    pub fn target(&self) -> u64 {
        self.per_worker.saturating_mul(self.counters.len() as u64)
    }
}

/// `mm:ss`, rounded to the nearest second.
pub fn format_duration(secs: f64) -> String {
    let whole = secs.max(0.0).round() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// One line of progress display: a bar with eighth-cell resolution,
/// the percentage done, the time elapsed, and the estimated total.
pub fn bar(progress: u64, max_progress: u64, elapsed: Duration) -> String {
    let (progress, max_progress) = if max_progress == 0 {
        (1, 1)
    } else {
        (progress.min(max_progress), max_progress)
    };

    let eighths = (8 * BAR_WIDTH as u128 * progress as u128 / max_progress as u128) as u64;
    let whole = eighths / 8;
    let part = eighths % 8;

    let mut line = String::with_capacity(64);
    line.push('[');
    for _ in 0..whole {
        line.push(EIGHTHS[8]);
    }
    if progress != max_progress {
        line.push(EIGHTHS[part as usize]);
        for _ in 0..(BAR_WIDTH - whole - 1) {
            line.push(' ');
        }
    }

    let ratio = progress as f64 / max_progress as f64;
    let elapsed_secs = elapsed.as_secs_f64();
    let estimate = if elapsed < ETA_AFTER || progress == 0 {
        "--:--".to_string()
    } else {
        format_duration(elapsed_secs / ratio)
    };

    line.push_str(&format!(
        "] {:.1}%({}/{})",
        100.0 * ratio,
        format_duration(elapsed_secs),
        estimate
    ));
    line
}

/// Redraws the progress line on `out` every `interval` until the
/// target is reached or every worker has stopped.  Never touches the
/// workers beyond reading their counters.
pub fn monitor<W: Write>(progress: &Progress, out: &mut W, interval: Duration) -> io::Result<()> {
    let start = Instant::now();
    let target = progress.target();
    loop {
        let finished = progress.finished();
        let total = progress.total();
        write!(out, "\x1b[1K\x1b[G{}", bar(total, target, start.elapsed()))?;
        out.flush()?;
        if total >= target || finished {
            break;
        }
        thread::sleep(interval);
    }
    writeln!(out)
}
