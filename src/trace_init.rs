//! File tracing for long-running hosts (IME frontends). The CLI logs to
//! stderr instead.

use std::path::{Path, PathBuf};

/// Name of the JSON-lines trace file inside the host's log directory.
pub const TRACE_FILE_NAME: &str = "lipi-trace.jsonl";

/// Filter used when `RUST_LOG` is unset. Keeps the per-call `transliterate`
/// and `take_key_input` spans and drops the one-off registry build spans.
pub const DEFAULT_FILTER: &str =
    "lipi_core=debug,lipi_core::script_data=info,lipi_session=debug,lipi_engine=debug";

pub fn trace_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(TRACE_FILE_NAME)
}

/// Append one flat JSON object per event to [`trace_file_path`]. Only the
/// first successful call installs a subscriber; a host that already set its
/// own global subscriber keeps it.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    use std::sync::Once;

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let appender = match tracing_appender::rolling::RollingFileAppender::builder()
            .filename_prefix(TRACE_FILE_NAME)
            .build(log_dir)
        {
            Ok(appender) => appender,
            // no writable log dir: stay silent rather than fail the host
            Err(_) => return,
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_file_path() {
        let path = trace_file_path(Path::new("/var/log/lipi"));
        assert_eq!(path, Path::new("/var/log/lipi/lipi-trace.jsonl"));
    }

    #[test]
    fn test_default_filter_names_engine_crates() {
        for target in ["lipi_core", "lipi_session", "lipi_engine"] {
            assert!(DEFAULT_FILTER.contains(&format!("{target}=debug")));
        }
    }
}
