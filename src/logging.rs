//! `tracing` output for the browser console.
//!
//! The fmt subscriber formats each event into a [`ConsoleWriter`]; when the
//! writer is dropped the buffered line goes to `console.error`, `console.warn`
//! or `console.log` depending on the event's level.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let line = line.to_string();
        match console_method(self.level) {
            ConsoleMethod::Error => {
                gloo::console::error!(line);
            }
            ConsoleMethod::Warn => {
                gloo::console::warn!(line);
            }
            ConsoleMethod::Log => {
                gloo::console::log!(line);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Log,
}

fn console_method(level: Level) -> ConsoleMethod {
    if level == Level::ERROR {
        ConsoleMethod::Error
    } else if level == Level::WARN {
        ConsoleMethod::Warn
    } else {
        ConsoleMethod::Log
    }
}

pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { level: Level::INFO, buf: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { level: *meta.level(), buf: Vec::new() }
    }
}

/// Install the console subscriber. Safe to call more than once.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(Level::DEBUG)
        .without_time()
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("console subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(console_method(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(console_method(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(console_method(Level::INFO), ConsoleMethod::Log);
        assert_eq!(console_method(Level::DEBUG), ConsoleMethod::Log);
        assert_eq!(console_method(Level::TRACE), ConsoleMethod::Log);
    }

    #[test]
    fn writer_buffers_until_dropped() {
        let mut w = ConsoleWriter { level: Level::INFO, buf: Vec::new() };
        w.write_all(b"catalog ").unwrap();
        w.write_all(b"loaded").unwrap();
        assert_eq!(w.buf, b"catalog loaded");
        // Dropping with content would reach the console, which only exists in the browser.
        w.buf.clear();
    }
}
