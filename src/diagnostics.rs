//! Sink for diagnostics raised while scanning.
//!
//! The scanner never decides what an error means for the program; it hands
//! each one to a [`Reporter`] and keeps going. [`Diagnostics`] is the
//! collector the driver owns and inspects once the scan is over.

use std::fmt;

/// Receives lexical errors as they are found. Implementations must not panic.
pub trait Reporter {
    fn report(&mut self, line: u32, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics { entries: Vec::new() }
    }

    pub fn had_error(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets everything reported so far, e.g. between two prompt lines.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, line: u32, message: &str) {
        self.entries.push(Diagnostic {
            line,
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collects_reports_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());

        diagnostics.report(1, "Unexpected character '@'.");
        diagnostics.report(3, "Unterminated string.");

        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.entries()[0], Diagnostic { line: 1, message: "Unexpected character '@'.".to_owned() });
        assert_eq!(diagnostics.entries()[1].line, 3);
    }

    #[test]
    fn clear_resets_error_state() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(2, "Unterminated string.");
        diagnostics.clear();
        assert!(!diagnostics.had_error());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn formats_with_line_prefix() {
        let diagnostic = Diagnostic { line: 12, message: "Unterminated string.".to_owned() };
        assert_eq!(diagnostic.to_string(), "[line 12] Error: Unterminated string.");
    }
}
