//! Logging Module
//!
//! Installs the global tracing subscriber. Output goes to `<log_dir>/app.log`
//! when a log directory is configured and can be opened, otherwise to stdout.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Name of the log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "app.log";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(log_debug: bool) -> &'static str {
    if log_debug {
        "chatx=debug,tower_http=debug"
    } else {
        "chatx=info,tower_http=info"
    }
}

/// Creates `dir` if needed and opens its log file for appending.
pub fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

// == Init ==
/// Installs the subscriber described by `config`. Call once, at startup.
///
/// A log directory that cannot be used is reported and stdout is used instead.
pub fn init(config: &Config) {
    let mut fallback = None;
    let file = match config.log_dir.as_deref() {
        Some(dir) => match open_log_file(dir) {
            Ok((_, file)) => Some(file),
            Err(err) => {
                fallback = Some((dir.to_path_buf(), err));
                None
            }
        },
        None => None,
    };

    let to_file = file.is_some();
    let writer = match file {
        Some(file) => BoxMakeWriter::new(Arc::new(file)),
        None => BoxMakeWriter::new(io::stdout),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(config.log_debug).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!to_file),
        )
        .init();

    if let Some((dir, err)) = fallback {
        warn!(dir = %dir.display(), error = %err, "cannot open log directory, logging to stdout");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chatx-logging-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "chatx=info,tower_http=info");
        assert_eq!(default_filter(true), "chatx=debug,tower_http=debug");
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = scratch_dir("create").join("nested");
        let _ = fs::remove_dir_all(&dir);

        let (path, mut file) = open_log_file(&dir).unwrap();
        writeln!(file, "first").unwrap();

        assert_eq!(path, dir.join(LOG_FILE_NAME));
        assert!(path.is_file());

        fs::remove_dir_all(scratch_dir("create")).unwrap();
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = scratch_dir("append");
        let _ = fs::remove_dir_all(&dir);

        let (path, mut file) = open_log_file(&dir).unwrap();
        writeln!(file, "one").unwrap();
        drop(file);
        let (_, mut file) = open_log_file(&dir).unwrap();
        writeln!(file, "two").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_open_log_file_fails_when_dir_is_a_file() {
        let dir = scratch_dir("blocked");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        assert!(open_log_file(&blocker).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
