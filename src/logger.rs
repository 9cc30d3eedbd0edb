//! Terminal logging for labkit.
//!
//! - `log!("build"; "...")` prints a coloured `[build]` prefix to stderr
//! - `debug!` prints the same way, but only with `--verbose`
//! - [`ProgressLine`] redraws `[build] labs(3/12)` in place while the
//!   parallel phase runs
//!
//! Everything goes to stderr; stdout is reserved for JSON output.
//!
//! ```ignore
//! log!("build"; "{} indexed", plural_count(n, "lab"));
//!
//! let progress = ProgressLine::new("labs", files.len());
//! files.par_iter().for_each(|_| progress.inc());
//! progress.finish();
//! ```

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a progress line owns the current terminal line.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Enable or disable `debug!` output.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("list"; "skipping {}: {}", slug, err);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, only when `--verbose` is set
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Write one prefixed line to stderr, clearing a live progress line first.
pub fn log(module: &str, message: &str) {
    let mut err = io::stderr().lock();
    if PROGRESS_ACTIVE.load(Ordering::Acquire) {
        clear_line(&mut err);
    }
    writeln!(err, "{} {message}", prefix(module)).ok();
    err.flush().ok();
}

/// `[module]`, coloured by module family.
fn prefix(module: &str) -> String {
    let label = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "build" => label.bright_green().bold().to_string(),
        "render" | "list" => label.bright_blue().bold().to_string(),
        "error" => label.bright_red().bold().to_string(),
        _ => label.bright_yellow().bold().to_string(),
    }
}

fn clear_line(out: &mut impl Write) {
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

/// In-place `[build] <label>(done/total)` counter, safe to bump from rayon
/// workers.
///
/// Redraws are skipped while another thread is drawing, so workers never
/// wait on the terminal. A line that is dropped without [`finish`] is erased.
///
/// [`finish`]: ProgressLine::finish
pub struct ProgressLine {
    label: &'static str,
    total: usize,
    done: AtomicUsize,
    draw: Mutex<()>,
}

impl ProgressLine {
    pub fn new(label: &'static str, total: usize) -> Self {
        PROGRESS_ACTIVE.store(true, Ordering::Release);
        let progress = Self {
            label,
            total,
            done: AtomicUsize::new(0),
            draw: Mutex::new(()),
        };
        progress.redraw();
        progress
    }

    /// Count one finished item.
    pub fn inc(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.draw.try_lock() {
            self.redraw();
        }
    }

    fn text(&self) -> String {
        format!("{}({}/{})", self.label, self.done.load(Ordering::Relaxed), self.total)
    }

    fn redraw(&self) {
        let mut err = io::stderr().lock();
        clear_line(&mut err);
        write!(err, "{} {}", prefix("build"), self.text()).ok();
        err.flush().ok();
    }

    /// Leave the final count on screen and move to the next line.
    pub fn finish(self) {
        let _guard = self.draw.lock();
        PROGRESS_ACTIVE.store(false, Ordering::Release);

        let mut err = io::stderr().lock();
        clear_line(&mut err);
        writeln!(err, "{} {}", prefix("build"), self.text()).ok();
        err.flush().ok();
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        if PROGRESS_ACTIVE.swap(false, Ordering::AcqRel) {
            let mut err = io::stderr().lock();
            clear_line(&mut err);
            err.flush().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts() {
        let progress = ProgressLine::new("labs", 3);
        assert_eq!(progress.text(), "labs(0/3)");
        progress.inc();
        progress.inc();
        assert_eq!(progress.text(), "labs(2/3)");
        progress.finish();
    }

    #[test]
    fn test_prefix_contains_module() {
        assert!(prefix("build").contains("[build]"));
        assert!(prefix("warning").contains("[warning]"));
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
