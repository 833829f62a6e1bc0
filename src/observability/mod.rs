//! # Structured Logging
//!
//! One-line JSON logs with explicit severity, a leading timestamp, and
//! deterministic field ordering. Writes are synchronous and go out in a
//! single call so concurrent requests never interleave within a line.
//!
//! Request-path logging goes through [`Logger::request`], which stamps
//! every line with the request's correlation id. Raw internal error text
//! belongs here, never in a client response.

use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};

use crate::correlation::CorrelationContext;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Debug,
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// Synchronous JSON logger
pub struct Logger;

impl Logger {
    /// Log a process-level event (startup, shutdown, config)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::write_line(severity, None, event, fields, &mut io::stdout());
    }

    /// Log a request-path event, stamped with the correlation id
    pub fn request(
        severity: Severity,
        ctx: &CorrelationContext,
        event: &str,
        fields: &[(&str, &str)],
    ) {
        Self::write_line(severity, Some(ctx), event, fields, &mut io::stdout());
    }

    /// Log to stderr, for failures during startup and shutdown
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Error, None, event, fields, &mut io::stderr());
    }

    fn write_line<W: Write>(
        severity: Severity,
        ctx: Option<&CorrelationContext>,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(256);

        line.push_str("{\"ts\":\"");
        line.push_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push_str("\",\"event\":\"");
        escape_into(&mut line, event);
        line.push('"');

        if let Some(ctx) = ctx {
            line.push_str(",\"trn_id\":\"");
            escape_into(&mut line, &ctx.id);
            line.push_str("\",\"trn_time\":\"");
            escape_into(&mut line, &ctx.issued_at_rfc3339());
            line.push('"');
        }

        // Sort extra fields for deterministic output
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");

        // One write, one flush: the sink serializes concurrent lines
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}
