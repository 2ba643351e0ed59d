//! Emission of decorated log entries through `tracing`.
//!
//! This module is the leaf-side convenience over [`Context::decorate`]. A
//! [`ContextLogger`] carries a component name and optional default fields;
//! each call folds the caller's fields together with whatever metadata the
//! context accumulated, renders one JSON object, and emits it through the
//! `tracing` macro matching the level. Installing a subscriber is the
//! application's concern.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::Level;

use crate::context::Context;
use crate::fields::Field;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The lowercase name used in rendered entries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// One structured log entry, ready to render or emit.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// When the entry was created.
    pub timestamp: DateTime<Utc>,
    /// Component that produced the entry.
    pub component: String,
    /// Structured fields, in emission order.
    pub fields: Vec<Field>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(level: LogLevel, message: &str, component: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            fields: Vec::new(),
        }
    }

    /// Appends one field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Renders the entry as a single JSON object.
    ///
    /// Fields fold into a `"fields"` object member; if two fields share a
    /// name, the later one wins.
    pub fn to_json(&self) -> Value {
        let mut members = serde_json::Map::with_capacity(self.fields.len());
        for field in &self.fields {
            members.insert(field.name().to_string(), field.value().clone());
        }

        json!({
            "level": self.level.as_str(),
            "message": self.message,
            "timestamp": self.timestamp.to_rfc3339(),
            "component": self.component,
            "fields": Value::Object(members),
        })
    }

    /// Emits the rendered entry through the `tracing` macro matching the
    /// entry's level.
    #[allow(clippy::cognitive_complexity)]
    pub fn emit(&self) {
        let rendered = self.to_json().to_string();
        match self.level {
            LogLevel::Trace => tracing::trace!("{rendered}"),
            LogLevel::Debug => tracing::debug!("{rendered}"),
            LogLevel::Info => tracing::info!("{rendered}"),
            LogLevel::Warn => tracing::warn!("{rendered}"),
            LogLevel::Error => tracing::error!("{rendered}"),
        }
    }
}

/// A logger that decorates every entry from a [`Context`].
///
/// ```
/// use ctxmeta::{Context, ContextLogger, Field, Meta};
///
/// let ctx = Context::new().with_meta(Meta::from([("user_id", "u-1001")]));
/// let logger = ContextLogger::new("api");
///
/// let entry = logger.info(&ctx, "handled request", vec![
///     Field::string("route", "/health"),
/// ]);
/// assert_eq!(entry.fields.last().unwrap().name(), "context");
/// ```
#[derive(Debug, Clone)]
pub struct ContextLogger {
    component: String,
    default_fields: Vec<Field>,
}

impl ContextLogger {
    /// Creates a logger for a component.
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            default_fields: Vec::new(),
        }
    }

    /// Adds a field included in every entry this logger emits. Default
    /// fields precede caller fields, so a caller field of the same name
    /// wins in the rendered object.
    #[must_use]
    pub fn with_default_field(mut self, field: Field) -> Self {
        self.default_fields.push(field);
        self
    }

    /// The component name entries are attributed to.
    pub fn component(&self) -> &str {
        &self.component
    }

    fn entry(
        &self,
        level: LogLevel,
        ctx: &Context,
        message: &str,
        fields: Vec<Field>,
    ) -> LogEntry {
        let mut all = self.default_fields.clone();
        all.extend(fields);

        let mut entry = LogEntry::new(level, message, &self.component);
        entry.fields = ctx.decorate(all);
        entry
    }

    /// Emits at trace level; returns the emitted entry.
    pub fn trace(&self, ctx: &Context, message: &str, fields: Vec<Field>) -> LogEntry {
        let entry = self.entry(LogLevel::Trace, ctx, message, fields);
        entry.emit();
        entry
    }

    /// Emits at debug level; returns the emitted entry.
    pub fn debug(&self, ctx: &Context, message: &str, fields: Vec<Field>) -> LogEntry {
        let entry = self.entry(LogLevel::Debug, ctx, message, fields);
        entry.emit();
        entry
    }

    /// Emits at info level; returns the emitted entry.
    pub fn info(&self, ctx: &Context, message: &str, fields: Vec<Field>) -> LogEntry {
        let entry = self.entry(LogLevel::Info, ctx, message, fields);
        entry.emit();
        entry
    }

    /// Emits at warn level; returns the emitted entry.
    pub fn warn(&self, ctx: &Context, message: &str, fields: Vec<Field>) -> LogEntry {
        let entry = self.entry(LogLevel::Warn, ctx, message, fields);
        entry.emit();
        entry
    }

    /// Emits at error level; returns the emitted entry.
    pub fn error(&self, ctx: &Context, message: &str, fields: Vec<Field>) -> LogEntry {
        let entry = self.entry(LogLevel::Error, ctx, message, fields);
        entry.emit();
        entry
    }
}
