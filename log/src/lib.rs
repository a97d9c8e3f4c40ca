//! Logging setup for gloss with file output and optional console output.
//!
//! Logs always go to a file at `warn` level, or at the requested level when
//! `GLOSS_LOG` or `RUST_LOG` is set. Console logging goes to stderr, enabled by either
//! variable, and always in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`GLOSS_LOG`** (highest priority) - gloss-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for gloss crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/gloss/logs/gloss-<pid>.log`
//! - macOS: `~/Library/Application Support/gloss/logs/gloss-12345.log`
//! - Linux: `~/.local/share/gloss/logs/gloss-12345.log`
//!
//! Override with `--log-file <path>`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate targets that `GLOSS_LOG=<level>` applies to.
const GLOSS_TARGETS: [&str; 3] = ["gloss", "gloss_bin", "gloss_log"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program;
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_enabled =
        env::var("GLOSS_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let console_layer = console_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(create_filter())
    });

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize console-only logging for tests.
///
/// Safe to call from every test; later calls are no-ops.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("gloss-{}.log", std::process::id());

    match override_path {
        // A path with an extension names the file itself.
        Some(path) if path.extension().is_some() => {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            (dir, name)
        },
        Some(dir) => (dir, filename),
        None => {
            let dir = dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gloss")
                .join("logs");
            (dir, filename)
        },
    }
}

/// File filter: uses the user-specified level if set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("GLOSS_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Filter from `GLOSS_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(gloss_log) = env::var("GLOSS_LOG") {
        return EnvFilter::new(expand_gloss_log(&gloss_log));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(expand_gloss_log("info"))
}

/// Expand a bare `GLOSS_LOG` level to every gloss crate.
///
/// - `debug` becomes `warn,gloss=debug,gloss_bin=debug,gloss_log=debug`
/// - directive syntax (`gloss=trace,gloss_bin=info`) is used as-is
fn expand_gloss_log(value: &str) -> String {
    if value.contains(&['=', ':', ','][..]) {
        return value.to_string();
    }
    let targets: Vec<String> = GLOSS_TARGETS
        .iter()
        .map(|target| format!("{target}={value}"))
        .collect();
    format!("warn,{}", targets.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_expands_to_gloss_targets() {
        assert_eq!(
            expand_gloss_log("debug"),
            "warn,gloss=debug,gloss_bin=debug,gloss_log=debug"
        );
    }

    #[test]
    fn directives_pass_through() {
        assert_eq!(expand_gloss_log("gloss=trace"), "gloss=trace");
        assert_eq!(expand_gloss_log("info,gloss_bin=debug"), "info,gloss_bin=debug");
    }

    #[test]
    fn override_with_extension_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("out.log");
        let (dir, name) = resolve_log_path(Some(file));
        assert_eq!(dir, tmp.path());
        assert_eq!(name, "out.log");
    }

    #[test]
    fn override_without_extension_is_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let (dir, name) = resolve_log_path(Some(tmp.path().to_path_buf()));
        assert_eq!(dir, tmp.path());
        assert!(name.starts_with("gloss-") && name.ends_with(".log"));
    }

    #[test]
    fn test_init_is_repeatable() {
        test();
        test();
        tracing::debug!("logging from a test");
    }
}
