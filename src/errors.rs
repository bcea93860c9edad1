//! Error types with rich diagnostics using miette
//!
//! Geometry and construction errors are plain values the controller can log
//! and drop. Script errors carry source spans for readable reports.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::action::ActionKind;

/// A named script text, kept so errors can point back into it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// File name, or `<input>` for inline text
    pub name: String,
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Script error labelling bytes `start..end`, clamped to the text.
    pub fn error(&self, message: impl Into<String>, start: usize, end: usize) -> ScriptError {
        let start = start.min(self.source.len());
        let end = end.clamp(start, self.source.len());
        ScriptError {
            message: message.into(),
            src: NamedSource::new(&self.name, self.source.clone()),
            span: (start, end - start).into(),
        }
    }
}

// ============================================================================
// Numeric Errors
// ============================================================================

/// Rejected numeric input for validating constructors
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    #[error("value is NaN")]
    #[diagnostic(code(penplot::numeric::nan))]
    NaN,

    #[error("value is infinite")]
    #[diagnostic(code(penplot::numeric::infinite))]
    Infinite,

    #[error("value is zero")]
    #[diagnostic(code(penplot::numeric::zero))]
    Zero,

    #[error("value is negative")]
    #[diagnostic(code(penplot::numeric::negative))]
    Negative,

    #[error("minimum {min} is greater than maximum {max}")]
    #[diagnostic(code(penplot::numeric::inverted))]
    Inverted { min: f64, max: f64 },
}

// ============================================================================
// Mapping Errors
// ============================================================================

/// A point could not be mapped between coordinate domains
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("source area is degenerate ({width} x {height})")]
    #[diagnostic(
        code(penplot::mapper::degenerate_source),
        help("the source area needs a non-zero width and height")
    )]
    DegenerateSource { width: f64, height: f64 },

    #[error("point ({x}, {y}) is not finite")]
    #[diagnostic(code(penplot::mapper::non_finite_point))]
    NonFinitePoint { x: f64, y: f64 },
}

// ============================================================================
// Action Errors
// ============================================================================

/// An action was constructed with data its kind does not allow
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum InvalidActionError {
    #[error("{kind} cannot carry a position")]
    #[diagnostic(
        code(penplot::action::position_not_allowed),
        help("paper feed is a bare transition; drop the coordinates")
    )]
    PositionNotAllowed { kind: ActionKind },
}

// ============================================================================
// Script Errors
// ============================================================================

/// Syntax error in an event script
#[derive(Error, Diagnostic, Debug)]
#[error("invalid event script: {message}")]
#[diagnostic(code(penplot::script::syntax))]
pub struct ScriptError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_labels_the_given_range() {
        let ctx = SourceContext::new("draw.plot", "pen down\ngoto 1\n");
        let err = ctx.error("expected two coordinates", 9, 15);
        assert_eq!(err.span, SourceSpan::from((9, 6)));
        assert_eq!(err.to_string(), "invalid event script: expected two coordinates");
    }

    #[test]
    fn error_range_is_clamped_to_the_source() {
        let ctx = SourceContext::new("<input>", "feed");
        let err = ctx.error("unexpected end of input", 4, 40);
        assert_eq!(err.span, SourceSpan::from((4, 0)));
    }
}
