//! Error types for all phases.

use crate::span::Span;
use thiserror::Error;

/// Expression scanner errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at column {}", .1.column)]
    UnexpectedChar(char, Span),

    #[error("Unterminated string at column {}", .0.column)]
    UnterminatedString(Span),

    #[error("Invalid escape sequence '\\{0}' at column {}", .1.column)]
    InvalidEscape(char, Span),

    #[error("Invalid number '{0}' at column {}", .1.column)]
    InvalidNumber(String, Span),
}

impl LexerError {
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::UnexpectedChar(c, span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::UnterminatedString(span)
    }

    pub fn invalid_escape(c: char, span: Span) -> Self {
        Self::InvalidEscape(c, span)
    }

    pub fn invalid_number(s: String, span: Span) -> Self {
        Self::InvalidNumber(s, span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar(_, span) => *span,
            Self::UnterminatedString(span) => *span,
            Self::InvalidEscape(_, span) => *span,
            Self::InvalidNumber(_, span) => *span,
        }
    }
}

/// Expression parser errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Unexpected token '{found}', expected {expected} at column {}", .span.column)]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of expression")]
    UnexpectedEof(Span),

    #[error("{message} at column {}", .span.column)]
    General { message: String, span: Span },
}

impl SyntaxError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(span: Span) -> Self {
        Self::UnexpectedEof(span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEof(span) => *span,
            Self::General { span, .. } => *span,
        }
    }
}

impl From<LexerError> for SyntaxError {
    fn from(err: LexerError) -> Self {
        Self::General {
            message: err.to_string(),
            span: err.span(),
        }
    }
}

/// Structural errors raised while turning lines into the block tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unterminated '{keyword}' block opened at line {line}, expected 'end'")]
    UnterminatedBlock { keyword: String, line: usize },

    #[error("Missing '=' in {construct} at line {line}")]
    MissingSeparator {
        construct: &'static str,
        text: String,
        line: usize,
    },

    #[error("'{keyword}' at line {line} expects {expected}")]
    MissingOperand {
        keyword: String,
        expected: &'static str,
        line: usize,
    },

    #[error("Invalid name '{name}' at line {line}")]
    InvalidName { name: String, line: usize },

    #[error("Unexpected input after '{keyword}' at line {line}")]
    TrailingInput {
        keyword: String,
        text: String,
        line: usize,
    },

    #[error("'end' at line {line} does not close any block")]
    UnexpectedEnd { line: usize },

    #[error("Unknown statement at line {line}")]
    UnknownStatement { text: String, line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedBlock { line, .. } => *line,
            Self::MissingSeparator { line, .. } => *line,
            Self::MissingOperand { line, .. } => *line,
            Self::InvalidName { line, .. } => *line,
            Self::TrailingInput { line, .. } => *line,
            Self::UnexpectedEnd { line } => *line,
            Self::UnknownStatement { line, .. } => *line,
        }
    }

    /// The offending source text, when there is one worth showing.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingSeparator { text, .. } => Some(format!("expected 'name = value' in: {text}")),
            Self::TrailingInput { text, .. } => Some(text.clone()),
            Self::UnknownStatement { text, .. } => Some(text.clone()),
            Self::InvalidName { .. } => {
                Some("names start with a letter or '_' and contain only letters, digits and '_'".to_string())
            }
            Self::UnterminatedBlock { .. } => Some("add a line containing only 'end'".to_string()),
            _ => None,
        }
    }
}

/// What went wrong while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Undefined field '{field}' on '{record}'")]
    UndefinedField { record: String, field: String },

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Wrong number of arguments to '{function}': expected {expected}, got {got}")]
    WrongArity {
        function: String,
        expected: &'static str,
        got: usize,
    },

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    Overflow,

    #[error("Math domain error in '{0}'")]
    MathDomain(String),

    #[error("Loop count must be a number, got {0}")]
    InvalidCount(String),
}

/// Expression evaluation failure (code E002).
///
/// Carries the original expression text so it can be shown as a hint, and the
/// source line of the statement being executed once it is known.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid expression: {kind}{}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub expression: String,
    pub line: Option<usize>,
}

impl EvalError {
    pub fn new(kind: impl Into<EvalErrorKind>, expression: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            expression: expression.into(),
            line: None,
        }
    }

    /// Attach a source line unless one is already set.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid alias '{from}' -> '{to}': aliases map one word to one word")]
    InvalidAlias { from: String, to: String },

    #[error("Invalid extension '{0}': extensions start with '.'")]
    InvalidExtension(String),
}

/// A unified error type for all phases.
#[derive(Debug, Error)]
pub enum TayoError {
    #[error("Invalid file type '{path}'")]
    InvalidFileType { path: String, expected: Vec<String> },

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl TayoError {
    /// Short code shown to the user.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFileType { .. } => "E001",
            Self::Eval(_) => "E002",
            Self::Parse(_) => "E003",
            Self::Io(_) => "E004",
            Self::Config(_) => "E005",
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidFileType { expected, .. } => {
                Some(format!("expected one of: {}", expected.join(", ")))
            }
            Self::Eval(err) => Some(err.expression.clone()),
            Self::Parse(err) => err.hint(),
            Self::Io(_) | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_keeps_first_line() {
        let err = EvalError::new(EvalErrorKind::DivisionByZero, "1/0")
            .at_line(3)
            .at_line(7);
        assert_eq!(err.line, Some(3));
        assert_eq!(err.to_string(), "Invalid expression: Division by zero at line 3");
    }

    #[test]
    fn test_codes() {
        let eval: TayoError = EvalError::new(EvalErrorKind::Overflow, "x").into();
        assert_eq!(eval.code(), "E002");
        assert_eq!(eval.hint().as_deref(), Some("x"));

        let parse: TayoError = ParseError::UnexpectedEnd { line: 2 }.into();
        assert_eq!(parse.code(), "E003");

        let file = TayoError::InvalidFileType {
            path: "a.txt".to_string(),
            expected: vec![".tzx".to_string(), ".tasx".to_string()],
        };
        assert_eq!(file.code(), "E001");
        assert_eq!(file.hint().as_deref(), Some("expected one of: .tzx, .tasx"));
    }

    #[test]
    fn test_lexer_error_becomes_syntax_error() {
        let err: SyntaxError = LexerError::unexpected_char('$', Span::new(2, 3, 1, 3)).into();
        assert_eq!(err.span().column, 3);
        assert!(err.to_string().contains("Unexpected character '$'"));
    }
}
