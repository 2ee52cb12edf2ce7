//! Logging utilities with colored module prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "bundling {} groups", count);
//! debug!("rewrite"; "skipping {}", reference);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` (the global owo-colors override) and TTY detection.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "build" | "js" | "css" => Style::new().bright_blue().bold(),
        "manifest" | "check" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        "warning" | "hint" => Style::new().bright_yellow().bold(),
        _ => Style::new().bright_cyan().bold(),
    };
    prefix
        .if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

/// Run `f` with the global color override pinned to `enabled`.
///
/// The override is process-wide, so tests touching it take a shared lock.
#[cfg(test)]
pub(crate) fn with_color<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    use std::sync::Mutex;
    static LOCK: Mutex<()> = Mutex::new(());

    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    owo_colors::set_override(enabled);
    let result = f();
    owo_colors::unset_override();
    result
}
