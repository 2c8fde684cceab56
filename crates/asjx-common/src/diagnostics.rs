//! Diagnostic Infrastructure
//!
//! Nothing in the externs model or the JS emitter aborts on malformed input.
//! Duplicate declarations, orphan members and unresolved references are
//! downgraded to diagnostics and accumulated here, so one bad construct never
//! stops the rest of a compilation unit from being processed.
//!
//! # Components
//!
//! - `Diagnostic` - A single diagnostic message with location and severity
//! - `DiagnosticBag` - A collection of diagnostics for one pass
//! - `DiagnosticSeverity` - Error, Warning or Info
//! - `diagnostic_codes` - The `JX` code table
//!
//! # Example
//!
//! ```
//! use asjx_common::{DiagnosticBag, Span, diagnostic_codes};
//!
//! let mut bag = DiagnosticBag::with_file("svg.js");
//! bag.warning(Span::dummy(), "Duplicate class [A]", diagnostic_codes::DUPLICATE_CLASS);
//! assert!(!bag.has_errors());
//! assert_eq!(bag.len(), 1);
//! ```

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Diagnostic Codes
// =============================================================================

pub mod diagnostic_codes {
    pub const DUPLICATE_NAMESPACE: u32 = 1001;
    pub const DUPLICATE_CLASS: u32 = 1002;
    pub const DUPLICATE_TYPEDEF: u32 = 1003;
    pub const DUPLICATE_INTERFACE: u32 = 1004;
    pub const DUPLICATE_FINAL_CLASS: u32 = 1005;
    pub const DUPLICATE_FUNCTION: u32 = 1006;
    pub const DUPLICATE_CONSTANT: u32 = 1007;
    /// A member was attached to a class that is not registered.
    pub const MISSING_OWNER_CLASS: u32 = 1008;
    pub const DUPLICATE_MEMBER: u32 = 1009;
    pub const UNRESOLVED_TYPE_EXPRESSION: u32 = 1010;
    /// A typedef was not synthesized because a class owns its name.
    pub const TYPEDEF_SHADOWED_BY_CLASS: u32 = 1011;

    pub const UNRESOLVED_BASE_CLASS: u32 = 2001;
    pub const UNRESOLVED_INTERFACE: u32 = 2002;
}

// =============================================================================
// Diagnostic Severity
// =============================================================================

/// The severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Informational message
    Info = 3,
    /// A warning
    Warning = 2,
    /// An error (highest severity)
    Error = 1,
}

impl DiagnosticSeverity {
    /// Get the severity name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, DiagnosticSeverity::Warning)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A diagnostic message with location, severity, and code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The file the offending construct came from
    pub file_name: String,
    /// The source span (byte offsets)
    pub span: Span,
    /// The diagnostic message
    pub message: String,
    /// The severity level
    pub severity: DiagnosticSeverity,
    /// The diagnostic code (e.g., JX1002)
    pub code: u32,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        severity: DiagnosticSeverity,
        code: u32,
    ) -> Self {
        Diagnostic {
            file_name: file_name.into(),
            span,
            message: message.into(),
            severity,
            code,
        }
    }

    /// Create an error diagnostic.
    pub fn error(
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self::new(file_name, span, message, DiagnosticSeverity::Error, code)
    }

    /// Create a warning diagnostic.
    pub fn warning(
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self::new(file_name, span, message, DiagnosticSeverity::Warning, code)
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    pub fn is_warning(&self) -> bool {
        self.severity.is_warning()
    }

    /// Format the diagnostic in a simple format.
    ///
    /// Returns a string like: "warning[JX1002]: Duplicate class [A]"
    pub fn format_simple(&self) -> String {
        format!("{}[JX{}]: {}", self.severity, self.code, self.message)
    }

    /// Format the diagnostic with its file name.
    ///
    /// Returns a string like: "svg.js:12: error JX1008: Class [B] not found in svg.js"
    pub fn format(&self) -> String {
        format!(
            "{}:{}: {} JX{}: {}",
            self.file_name, self.span.start, self.severity, self.code, self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

// =============================================================================
// DiagnosticBag
// =============================================================================

/// A collection of diagnostics for one pass.
///
/// Every diagnostic added is also forwarded to `tracing` at the matching
/// level, so a driver that installs a subscriber sees them as they happen.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    /// The collected diagnostics
    diagnostics: Vec<Diagnostic>,
    /// The file name for diagnostics added without explicit file
    default_file: String,
    /// Error count
    error_count: usize,
    /// Warning count
    warning_count: usize,
}

impl DiagnosticBag {
    /// Create a new empty diagnostic bag.
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    /// Create a new diagnostic bag with a default file name.
    pub fn with_file(file_name: impl Into<String>) -> Self {
        DiagnosticBag {
            default_file: file_name.into(),
            ..DiagnosticBag::default()
        }
    }

    pub fn set_default_file(&mut self, file_name: impl Into<String>) {
        self.default_file = file_name.into();
    }

    pub fn default_file(&self) -> &str {
        &self.default_file
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Error => {
                tracing::error!(code = diagnostic.code, file = %diagnostic.file_name, "{}", diagnostic.message);
                self.error_count += 1;
            }
            DiagnosticSeverity::Warning => {
                tracing::warn!(code = diagnostic.code, file = %diagnostic.file_name, "{}", diagnostic.message);
                self.warning_count += 1;
            }
            DiagnosticSeverity::Info => {
                tracing::info!(code = diagnostic.code, file = %diagnostic.file_name, "{}", diagnostic.message);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add an error diagnostic.
    pub fn error(&mut self, span: Span, message: impl Into<String>, code: u32) {
        self.add(Diagnostic::error(&self.default_file, span, message, code));
    }

    /// Add an error diagnostic with explicit file.
    pub fn error_in(
        &mut self,
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        code: u32,
    ) {
        self.add(Diagnostic::error(file_name, span, message, code));
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, span: Span, message: impl Into<String>, code: u32) {
        self.add(Diagnostic::warning(&self.default_file, span, message, code));
    }

    /// Add a warning diagnostic with explicit file.
    pub fn warning_in(
        &mut self,
        file_name: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        code: u32,
    ) {
        self.add(Diagnostic::warning(file_name, span, message, code));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Get all diagnostics as a slice.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Filter diagnostics by code.
    pub fn by_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    /// Take all diagnostics, leaving the bag empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }

    /// Merge another DiagnosticBag into this one.
    ///
    /// The merged diagnostics were already logged when `other` collected
    /// them, so they are moved over without going through `add` again.
    pub fn merge(&mut self, other: DiagnosticBag) {
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Get codes of all diagnostics in insertion order (for testing).
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl Extend<Diagnostic> for DiagnosticBag {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diag in iter {
            self.add(diag);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_severity() {
        assert_eq!(DiagnosticSeverity::Error.name(), "error");
        assert!(DiagnosticSeverity::Error.is_error());
        assert!(!DiagnosticSeverity::Warning.is_error());
        assert!(DiagnosticSeverity::Warning.is_warning());
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::error(
            "svg.js",
            Span::new(10, 20),
            "Class [B] not found in svg.js",
            diagnostic_codes::MISSING_OWNER_CLASS,
        );
        assert_eq!(diag.file_name, "svg.js");
        assert_eq!(diag.span, Span::new(10, 20));
        assert_eq!(diag.code, 1008);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_format_simple() {
        let diag = Diagnostic::warning(
            "svg.js",
            Span::dummy(),
            "Duplicate class [A]",
            diagnostic_codes::DUPLICATE_CLASS,
        );
        assert_eq!(diag.format_simple(), "warning[JX1002]: Duplicate class [A]");
        assert_eq!(diag.to_string(), diag.format_simple());
    }

    #[test]
    fn test_diagnostic_format_with_file() {
        let diag = Diagnostic::error("svg.js", Span::new(12, 14), "Class [B] not found in svg.js", 1008);
        assert_eq!(
            diag.format(),
            "svg.js:12: error JX1008: Class [B] not found in svg.js"
        );
    }

    #[test]
    fn test_diagnostic_bag_basic() {
        let mut bag = DiagnosticBag::with_file("svg.js");
        assert!(bag.is_empty());
        assert!(!bag.has_errors());

        bag.error(Span::new(0, 5), "Error 1", 1008);
        bag.warning(Span::new(10, 15), "Warning 1", 1002);

        assert_eq!(bag.len(), 2);
        assert!(bag.has_errors());
        assert!(bag.has_warnings());
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.warning_count(), 1);
        assert_eq!(bag.diagnostics()[0].file_name, "svg.js");
    }

    #[test]
    fn test_diagnostic_bag_filter_by_code() {
        let mut bag = DiagnosticBag::with_file("svg.js");
        bag.warning(Span::dummy(), "Duplicate class [A]", 1002);
        bag.warning(Span::dummy(), "Duplicate @typedef [T]", 1003);
        bag.warning(Span::dummy(), "Duplicate class [B]", 1002);

        assert_eq!(bag.by_code(1002).count(), 2);
        assert_eq!(bag.codes(), vec![1002, 1003, 1002]);
    }

    #[test]
    fn test_diagnostic_bag_merge_and_take() {
        let mut bag1 = DiagnosticBag::with_file("a.js");
        bag1.error(Span::new(0, 5), "Error 1", 1008);

        let mut bag2 = DiagnosticBag::with_file("b.js");
        bag2.error(Span::new(10, 15), "Error 2", 1008);

        bag1.merge(bag2);
        assert_eq!(bag1.error_count(), 2);
        assert_eq!(bag1.diagnostics()[1].file_name, "b.js");

        let taken = bag1.take();
        assert_eq!(taken.len(), 2);
        assert!(bag1.is_empty());
        assert_eq!(bag1.error_count(), 0);
    }

    #[test]
    fn test_diagnostic_bag_merge_keeps_counts_by_severity() {
        let mut target = DiagnosticBag::with_file("a.js");
        target.warning(Span::dummy(), "Duplicate class [A]", 1002);

        let mut other = DiagnosticBag::with_file("b.js");
        other.error(Span::dummy(), "Class [B] not found in b.js", 1008);
        other.warning(Span::dummy(), "Duplicate function [f]", 1006);
        other.add(Diagnostic::new(
            "b.js",
            Span::dummy(),
            "note",
            DiagnosticSeverity::Info,
            1010,
        ));

        target.merge(other);
        assert_eq!(target.len(), 4);
        assert_eq!(target.error_count(), 1);
        assert_eq!(target.warning_count(), 2);
        assert_eq!(target.codes(), vec![1002, 1008, 1006, 1010]);
    }

    #[test]
    fn test_diagnostic_serializes_lowercase_severity() {
        let diag = Diagnostic::warning("a.js", Span::dummy(), "Duplicate class [A]", 1002);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["code"], 1002);
    }
}
