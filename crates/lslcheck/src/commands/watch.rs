//! Watch mode - re-lint on file changes.

use crate::commands::check::{CheckArgs, cmd_check};
use crate::config::Config;
use crate::output::OutputFormat;
use crate::walk;
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

/// Re-run `check` whenever a relevant file changes.
pub fn cmd_watch(args: &CheckArgs, format: &OutputFormat, config: &Config) -> i32 {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));

    eprintln!("Running initial check...");
    let _ = cmd_check(args, format, config);
    eprintln!();
    eprintln!("Watching for changes... (Ctrl+C to stop)");

    let (tx, rx) = channel();
    let mut watcher = match RecommendedWatcher::new(tx, NotifyConfig::default()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to create file watcher: {}", e);
            return 1;
        }
    };

    if let Err(e) = watcher.watch(&root, RecursiveMode::Recursive) {
        eprintln!("Failed to watch directory: {}", e);
        return 1;
    }

    // Debounce file changes
    let mut last_run = Instant::now();
    let debounce = Duration::from_millis(500);

    for res in rx {
        if let Ok(event) = res {
            // Skip hidden files and directories
            let dominated_by_hidden = event.paths.iter().all(|p| {
                p.components()
                    .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
            });
            if dominated_by_hidden {
                continue;
            }

            // Only trigger on LSL files
            let has_relevant_file = event.paths.iter().any(|p| walk::has_lsl_extension(p));
            if !has_relevant_file {
                continue;
            }

            // Debounce: only run if enough time has passed
            if last_run.elapsed() >= debounce {
                eprintln!();
                eprintln!("File changed, re-running check...");
                let _ = cmd_check(args, format, config);
                last_run = Instant::now();
            }
        }
    }

    0
}
