//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger and the global
//! logger functions used by the rt_* macros.

use super::*;
use serial_test::serial;
use std::sync::{Arc, Mutex};

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "glrt::test".to_string(),
        message: format!("{:?} message", severity),
        file,
        line,
    }
}

/// Logger collecting entries from one source, shared with the test body
#[derive(Clone, Default)]
struct CaptureLogger {
    source: &'static str,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn for_source(source: &'static str) -> Self {
        Self { source, entries: Arc::default() }
    }

    fn captured(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == self.source {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("render_target.rs"), Some(42)));
    }
}

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Info, None, None));
    assert!(line.contains("[INFO ]"));
    assert!(line.contains("[glrt::test]"));
    assert!(line.ends_with("Info message"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("vulkan.rs"), Some(123)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(vulkan.rs:123)"));
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<CaptureLogger>();
}

// ============================================================================
// GLOBAL LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_macro_output() {
    let capture = CaptureLogger::for_source("glrt::log_tests::macros");
    set_logger(capture.clone());

    crate::rt_trace!("glrt::log_tests::macros", "trace {}", 1);
    crate::rt_debug!("glrt::log_tests::macros", "debug {}", 2);
    crate::rt_info!("glrt::log_tests::macros", "info {}", 3);
    crate::rt_warn!("glrt::log_tests::macros", "warn {}", 4);
    crate::rt_error!("glrt::log_tests::macros", "error {}", 5);

    reset_logger();

    let captured = capture.captured();
    assert_eq!(captured.len(), 5);
    assert_eq!(captured[0].severity, LogSeverity::Trace);
    assert_eq!(captured[0].message, "trace 1");
    assert_eq!(captured[4].severity, LogSeverity::Error);
    assert!(captured[4].file.is_some());
    assert!(captured[4].line.is_some());
    assert!(captured[3].file.is_none());
}

#[test]
#[serial]
fn test_rt_err_logs_and_builds_backend_error() {
    let capture = CaptureLogger::for_source("glrt::log_tests::err");
    set_logger(capture.clone());

    let err = crate::rt_err!("glrt::log_tests::err", "bind failed: {}", -2);

    reset_logger();

    assert_eq!(err, crate::error::Error::BackendError("bind failed: -2".to_string()));
    let captured = capture.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
}

#[test]
#[serial]
fn test_rt_bail_returns_early() {
    let capture = CaptureLogger::for_source("glrt::log_tests::bail");
    set_logger(capture.clone());

    fn fails(flag: bool) -> crate::error::Result<u32> {
        if flag {
            crate::rt_bail!("glrt::log_tests::bail", "flag was {}", flag);
        }
        Ok(7)
    }

    let failed = fails(true);
    let succeeded = fails(false);

    reset_logger();

    assert!(matches!(failed, Err(crate::error::Error::BackendError(_))));
    assert_eq!(succeeded, Ok(7));
    assert_eq!(capture.captured().len(), 1);
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let capture = CaptureLogger::for_source("glrt::log_tests::reset");
    set_logger(capture.clone());
    reset_logger();

    log(LogSeverity::Info, "glrt::log_tests::reset", "after reset".to_string());

    assert!(capture.captured().is_empty());
}
