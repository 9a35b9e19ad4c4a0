//! Diagnostic logging on stderr.
//!
//! Every line starts with an RFC 3339 timestamp. Panics are routed through
//! `tracing` so they follow the same format instead of the default hook's.

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::ChronoUtc;

/// Default filter directives when none are configured.
pub const DEFAULT_FILTER: &str = "hello_mcp=debug,rmcp=warn";

/// Build the subscriber used by the binary, writing to `writer`.
pub fn subscriber<W>(filter: &str, writer: W) -> Result<impl Subscriber + Send + Sync + 'static>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    Ok(tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer)
        .with_ansi(false)
        .finish())
}

/// Install the stderr subscriber and the panic hook for the whole process.
pub fn init(filter: &str) -> Result<()> {
    tracing::subscriber::set_global_default(subscriber(filter, std::io::stderr)?)?;
    install_panic_hook();
    Ok(())
}

/// Log panics as a single `tracing` error event.
///
/// The hook only reports; unwinding proceeds as usual.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        let location = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let thread = std::thread::current();

        tracing::error!(
            thread = thread.name().unwrap_or("<unnamed>"),
            %location,
            "panic: {}",
            message.replace('\n', " ")
        );
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn starts_with_timestamp(line: &str) -> bool {
        let b = line.as_bytes();
        b.len() >= 19
            && [0, 1, 2, 3, 5, 6, 8, 9, 11, 12, 14, 15, 17, 18]
                .iter()
                .all(|&i| b[i].is_ascii_digit())
            && b[4] == b'-'
            && b[7] == b'-'
            && b[10] == b'T'
            && b[13] == b':'
            && b[16] == b':'
    }

    #[test]
    fn test_lines_are_timestamped() {
        let captured = Captured::default();
        let subscriber = subscriber("debug", captured.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("first");
            tracing::debug!(tool = "get_hello", "second");
        });

        let out = captured.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(starts_with_timestamp(line), "untimestamped line: {:?}", line);
        }
    }

    #[test]
    fn test_filter_applies() {
        let captured = Captured::default();
        let subscriber = subscriber("warn", captured.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::warn!("shown");
        });

        let out = captured.contents();
        assert!(!out.contains("hidden"));
        assert!(out.contains("shown"));
    }

    #[test]
    fn test_invalid_filter_is_error() {
        assert!(subscriber("hello_mcp=notalevel", std::io::sink).is_err());
    }

    #[test]
    fn test_panic_is_logged_as_single_timestamped_line() {
        let captured = Captured::default();
        let subscriber = subscriber("error", captured.clone()).unwrap();

        let previous = std::panic::take_hook();
        install_panic_hook();
        let outcome: std::thread::Result<()> =
            tracing::subscriber::with_default(subscriber, || {
                std::panic::catch_unwind(|| panic!("handler exploded\nsecond line"))
            });
        std::panic::set_hook(previous);

        assert!(outcome.is_err());
        let out = captured.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1, "{:?}", out);
        assert!(starts_with_timestamp(lines[0]));
        assert!(lines[0].contains("panic: handler exploded second line"));
        assert!(lines[0].contains("logging.rs"));
    }
}
