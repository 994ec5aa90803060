//! Tracing setup for the native binary and the browser build.

use cfg_if::cfg_if;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Route events to the browser console. Re-running is harmless.
        pub fn init() {
            let console = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());
            if tracing_subscriber::registry()
                .with(filter_from_env())
                .with(console)
                .try_init()
                .is_err()
            {
                return;
            }

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();
        }
    } else {
        use std::any::Any;
        use std::ffi::OsString;
        use std::io;
        use std::panic::Location;
        use std::path::{Path, PathBuf};

        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
        use tracing_subscriber::fmt;
        use tracing_subscriber::registry::LookupSpan;
        use tracing_subscriber::Layer;

        const LOG_FILE_VAR: &str = "RUST_LOG_FILE";
        const DEFAULT_LOG_FILE: &str = "logs/gallery.log";

        // Dropping the guard stops the background writer, so it lives for the process
        static WRITER_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        /// Install the stderr + rolling file subscriber and the panic hook.
        /// Only the first call does anything.
        pub fn init() {
            if WRITER_GUARD.get().is_some() {
                return;
            }
            let (dir, file) = split_log_path(&log_file_setting());
            let (file_writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file));
            if WRITER_GUARD.set(guard).is_err() {
                return;
            }

            let installed = tracing_subscriber::registry()
                .with(filter_from_env())
                .with(stderr_layer())
                .with(file_layer(file_writer))
                .try_init();
            if installed.is_ok() {
                std::panic::set_hook(Box::new(|info| log_panic(info.location(), info.payload())));
            }
        }

        fn log_file_setting() -> String {
            std::env::var(LOG_FILE_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_owned())
        }

        /// Directory and file name for the daily appender
        fn split_log_path(raw: &str) -> (PathBuf, OsString) {
            let path = Path::new(raw);
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let file = path
                .file_name()
                .map(|f| f.to_os_string())
                .unwrap_or_else(|| OsString::from("gallery.log"));
            (dir, file)
        }

        fn stderr_layer<S>() -> impl Layer<S>
        where
            S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
        {
            fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        }

        fn file_layer<S>(writer: NonBlocking) -> impl Layer<S>
        where
            S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
        {
            fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        }

        fn panic_text(payload: &(dyn Any + Send)) -> &str {
            payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("<non-string panic>")
        }

        fn log_panic(location: Option<&Location<'_>>, payload: &(dyn Any + Send)) {
            let location = location
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "<unknown>".to_owned());
            let backtrace = std::backtrace::Backtrace::force_capture();
            tracing::error!(%location, "panic: {}\n{backtrace}", panic_text(payload));
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn log_path_splits_into_dir_and_file() {
                let (dir, file) = split_log_path("logs/gallery.log");
                assert_eq!(dir, PathBuf::from("logs"));
                assert_eq!(file, OsString::from("gallery.log"));

                let (dir, file) = split_log_path("walk.log");
                assert_eq!(dir, PathBuf::from("."));
                assert_eq!(file, OsString::from("walk.log"));

                let (_, file) = split_log_path("/");
                assert_eq!(file, OsString::from("gallery.log"));
            }

            #[test]
            fn panic_text_reads_str_and_string_payloads() {
                let borrowed: Box<dyn Any + Send> = Box::new("boom");
                assert_eq!(panic_text(borrowed.as_ref()), "boom");
                let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
                assert_eq!(panic_text(owned.as_ref()), "bang");
                let other: Box<dyn Any + Send> = Box::new(7u8);
                assert_eq!(panic_text(other.as_ref()), "<non-string panic>");
            }
        }
    }
}
