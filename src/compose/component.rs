//! Category, timestamp and message components.

use std::fmt::{self, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};

use crate::diagnostics::DiagContext;
use crate::error::{Error, Result};

use super::formatter::{apply, formatter, square_bracket_wrap, Formatter};

/// Default timestamp layout: `MM/DD HH:MM:SS`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d %H:%M:%S";

/// The component written first; categorises a line by purpose (INFO, ERROR, ...).
#[derive(Clone, Default)]
pub struct Category {
    pub name: String,
    pub formatter: Option<Formatter>,
}

impl Category {
    /// A category with no formatter.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            formatter: None,
        }
    }

    /// A category wrapped in square brackets, the default for constructed loggers.
    pub fn bracketed(name: &str) -> Self {
        Self::new(name).with_formatter(formatter(square_bracket_wrap))
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// The category text: the formatted name, or the name verbatim when
    /// either the name or the formatter is missing.
    pub fn compose(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        apply(self.formatter.as_ref(), &self.name)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("name", &self.name)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// The component written after the category; the time of the log call.
///
/// An empty format composes to empty text.
#[derive(Clone)]
pub struct Timestamp {
    format: String,
    formatter: Option<Formatter>,
}

impl Timestamp {
    /// Create a timestamp with a strftime-style layout.
    ///
    /// # Errors
    /// Returns `InvalidTimestampFormat` if the layout has an unknown specifier.
    pub fn new(format: &str) -> Result<Self> {
        validate_format(format)?;
        Ok(Self {
            format: format.to_string(),
            formatter: None,
        })
    }

    /// A timestamp that composes to empty text.
    pub fn disabled() -> Self {
        Self {
            format: String::new(),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Compose against the current local time.
    pub fn compose(&self) -> String {
        self.compose_at(&Local::now())
    }

    /// Compose against a supplied time.
    pub fn compose_at<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if self.format.is_empty() {
            return String::new();
        }

        let mut datetime = String::new();
        if write!(datetime, "{}", at.format(&self.format)).is_err() {
            crate::log_warn!(
                DiagContext::new("timestamp"),
                "TIMESTAMP_FORMAT_FAILED",
                format = self.format
            );
            return String::new();
        }

        apply(self.formatter.as_ref(), &datetime)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            formatter: None,
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timestamp")
            .field("format", &self.format)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Reject layouts chrono cannot render.
pub fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidTimestampFormat(format.to_string()));
    }
    Ok(())
}

/// The component written last; the caller's text.
#[derive(Clone, Default)]
pub struct Message {
    pub formatter: Option<Formatter>,
}

impl Message {
    pub fn with_formatter(formatter: Formatter) -> Self {
        Self {
            formatter: Some(formatter),
        }
    }

    pub fn compose(&self, raw: &str) -> String {
        apply(self.formatter.as_ref(), raw)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
