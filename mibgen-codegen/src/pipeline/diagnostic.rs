//! Diagnostic types for the generation pipeline.
//!
//! Diagnostics are the user-facing record of a run. They are appended in the
//! order they occur, never merged and never edited afterwards.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something failed; the run still completes for everything else.
    Error,
    /// Output may be degraded and should be looked at.
    Warning,
    /// Informational message about what the run decided.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Stable identifier hosts can filter on.
    pub fn code(&self) -> &'static str {
        match self {
            Severity::Error => "ERR001",
            Severity::Warning => "WARN001",
            Severity::Info => "MSG001",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which component raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSource {
    /// The document compiler.
    Compiler,
    /// Cross-module assembly.
    Assembler,
    /// The driver and its selection, guard and emit steps.
    Pipeline,
}

impl std::fmt::Display for DiagnosticSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSource::Compiler => write!(f, "compiler"),
            DiagnosticSource::Assembler => write!(f, "assembler"),
            DiagnosticSource::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// A diagnostic message raised during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The component that produced this diagnostic.
    pub source: DiagnosticSource,
    /// The diagnostic message.
    pub message: String,
    /// Optional location (a document path or module name).
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, source: DiagnosticSource, message: impl Into<String>) -> Self {
        Self {
            severity,
            source,
            message: message.into(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(source: DiagnosticSource, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(source: DiagnosticSource, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, source, message)
    }

    /// Create a new info diagnostic.
    pub fn info(source: DiagnosticSource, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, source, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: {}",
            self.severity,
            self.severity.code(),
            self.message
        )?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(DiagnosticSource::Compiler, "unterminated string");
        assert!(diag.severity.is_error());
        assert_eq!(diag.source, DiagnosticSource::Compiler);
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning(DiagnosticSource::Assembler, "unresolved import")
            .at("IF-MIB");
        assert_eq!(diag.location.as_deref(), Some("IF-MIB"));
    }

    #[test]
    fn test_display_includes_code() {
        let diag = Diagnostic::warning(DiagnosticSource::Assembler, "missing module").at("A-MIB");
        assert_eq!(diag.to_string(), "warning[WARN001]: missing module (at A-MIB)");
    }

    #[test]
    fn test_severity_codes_are_distinct() {
        assert_eq!(Severity::Error.code(), "ERR001");
        assert_eq!(Severity::Warning.code(), "WARN001");
        assert_eq!(Severity::Info.code(), "MSG001");
    }
}
