//! Editor configuration and SQL dialect rendering.

use resultedit_core::Value;
use std::fmt::Write;

/// How identifiers are quoted in generated statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Identifiers are emitted verbatim.
    None,
    /// MySQL-style `` `name` ``.
    #[default]
    Backtick,
    /// ANSI-style `"name"`.
    DoubleQuote,
}

impl QuoteStyle {
    fn quote_char(&self) -> Option<char> {
        match self {
            QuoteStyle::None => None,
            QuoteStyle::Backtick => Some('`'),
            QuoteStyle::DoubleQuote => Some('"'),
        }
    }
}

/// How binary values are written as literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BinaryLiteral {
    /// `X'0A1B'`
    #[default]
    HexX,
    /// `'\x0a1b'` (PostgreSQL bytea hex input).
    ByteaHex,
}

/// Literal and identifier rules of the target server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    quote: QuoteStyle,
    /// Whether backslash is an escape character inside string literals.
    backslash_escapes: bool,
    binary: BinaryLiteral,
}

impl Dialect {
    /// MySQL / MariaDB.
    pub fn mysql() -> Self {
        Self {
            quote: QuoteStyle::Backtick,
            backslash_escapes: true,
            binary: BinaryLiteral::HexX,
        }
    }

    /// PostgreSQL with standard conforming strings.
    pub fn postgres() -> Self {
        Self {
            quote: QuoteStyle::DoubleQuote,
            backslash_escapes: false,
            binary: BinaryLiteral::ByteaHex,
        }
    }

    /// SQLite.
    pub fn sqlite() -> Self {
        Self {
            quote: QuoteStyle::DoubleQuote,
            backslash_escapes: false,
            binary: BinaryLiteral::HexX,
        }
    }

    /// Unquoted identifiers and standard string escaping; handy for logs and tests.
    pub fn plain() -> Self {
        Self {
            quote: QuoteStyle::None,
            backslash_escapes: false,
            binary: BinaryLiteral::HexX,
        }
    }

    /// Overrides identifier quoting.
    pub fn quote_style(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    /// Returns the identifier quoting style.
    #[inline]
    pub fn get_quote_style(&self) -> QuoteStyle {
        self.quote
    }

    /// Quotes an identifier, doubling any embedded quote character.
    pub fn quote_identifier(&self, name: &str) -> String {
        match self.quote.quote_char() {
            None => name.to_string(),
            Some(q) => {
                let mut out = String::with_capacity(name.len() + 2);
                out.push(q);
                for c in name.chars() {
                    if c == q {
                        out.push(q);
                    }
                    out.push(c);
                }
                out.push(q);
                out
            }
        }
    }

    /// Renders a value as an SQL literal.
    pub fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
            Value::Int64(i) => i.to_string(),
            Value::Float64(f) if f.is_nan() => self.string_literal("NaN"),
            Value::Float64(f) if f.is_infinite() => {
                self.string_literal(if *f > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float64(f) => f.to_string(),
            Value::String(s) => self.string_literal(s),
            Value::Bytes(bytes) => {
                let mut hex = String::with_capacity(bytes.len() * 2 + 4);
                match self.binary {
                    BinaryLiteral::HexX => hex.push_str("X'"),
                    BinaryLiteral::ByteaHex => hex.push_str("'\\x"),
                }
                for b in bytes {
                    let _ = write!(hex, "{:02X}", b);
                }
                hex.push('\'');
                hex
            }
        }
    }

    fn string_literal(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' if self.backslash_escapes => out.push_str("\\\\"),
                '\0' if self.backslash_escapes => out.push_str("\\0"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::mysql()
    }
}

/// Configuration of a [`QueryDataEditor`](crate::QueryDataEditor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    dialect: Dialect,
    /// Whether rows without a usable key may be matched on all their non-NULL columns.
    whole_row_fallback: bool,
}

impl EditorConfig {
    /// Creates the default configuration (MySQL dialect, whole-row fallback on).
    pub fn new() -> Self {
        Self {
            dialect: Dialect::default(),
            whole_row_fallback: true,
        }
    }

    /// Sets the SQL dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enables or disables the whole-row fallback.
    ///
    /// When disabled, rows with no usable primary or unique key are reported
    /// as unidentifiable instead of being matched on every column.
    pub fn whole_row_fallback(mut self, enabled: bool) -> Self {
        self.whole_row_fallback = enabled;
        self
    }

    /// Returns the SQL dialect.
    #[inline]
    pub fn get_dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Returns whether the whole-row fallback is enabled.
    #[inline]
    pub fn allows_whole_row_fallback(&self) -> bool {
        self.whole_row_fallback
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
