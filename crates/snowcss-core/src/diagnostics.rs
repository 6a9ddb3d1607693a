//! Diagnostics collected while extracting and resolving token functions.
//!
//! Nothing in the compiler aborts on malformed input. Every stage appends to a
//! [`Diagnostics`] collection instead and keeps going, so one broken call never
//! hides the rest of a document.

use std::fmt;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// The call or value cannot be interpreted at all.
    Error,
    /// The call is interpretable but degrades to a fallback.
    Warning,
    /// Advisory message.
    Info,
}

impl DiagnosticSeverity {
    /// Lowercase name of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: DiagnosticSeverity,
    message: String,
    context: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        context: Option<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            context,
        }
    }

    /// Severity of the diagnostic.
    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stage that produced the diagnostic, e.g. `resolver`.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} [{}]: {}", self.severity, context, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Tuple of a value and the diagnostics produced while computing it.
pub type WithDiagnostics<T> = (T, Diagnostics);

/// Ordered, appendable collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic with the given severity.
    pub fn add(
        &mut self,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        context: Option<&str>,
    ) -> &mut Self {
        let diagnostic = Diagnostic::new(severity, message, context.map(str::to_string));
        tracing::debug!("{}", diagnostic);
        self.items.push(diagnostic);
        self
    }

    /// Append an error.
    pub fn error(&mut self, message: impl Into<String>, context: &str) -> &mut Self {
        self.add(DiagnosticSeverity::Error, message, Some(context))
    }

    /// Append a warning.
    pub fn warning(&mut self, message: impl Into<String>, context: &str) -> &mut Self {
        self.add(DiagnosticSeverity::Warning, message, Some(context))
    }

    /// Append an informational message.
    pub fn info(&mut self, message: impl Into<String>, context: &str) -> &mut Self {
        self.add(DiagnosticSeverity::Info, message, Some(context))
    }

    /// Append all diagnostics from `other`, preserving their order.
    pub fn merge(&mut self, other: Diagnostics) -> &mut Self {
        self.items.extend(other.items);
        self
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any error-level diagnostic is present.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Count diagnostics of one severity.
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.items.iter().filter(|d| d.severity == severity).count()
    }

    /// All diagnostics in insertion order.
    pub fn all(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Iterate over diagnostics in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Remove all diagnostics.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
