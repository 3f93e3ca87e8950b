//! # Containers File Codec
//!
//! The containers file is a PHP script returning a list of factory entries:
//!
//! ```php
//! <?php
//! return [
//!     [
//!         'name' => 'acme/foo_0',
//!         'description' => 'Container for package acme/foo',
//!         'factory' => Acme\Foo\ContainerFactory::create(),
//!         'enable' => true,
//!     ],
//! ];
//! ```
//!
//! `factory` is executable code and is written verbatim. Every other value is
//! written as a PHP literal in `var_export` style, so the file loads as plain
//! data in any PHP runtime.
//!
//! Reading goes the other way: [`parse_entries`] understands the literal
//! subset written by [`render_entries`] plus `array(...)` syntax, double
//! quoted strings without interpolation and comments. Any value that is not a
//! literal (a constant, a call, a concatenation) is kept as a raw
//! [`PhpValue::Expression`] and written back unchanged.

use std::fmt::Write as _;

use indexmap::IndexMap;
use thiserror::Error;

use crate::factory::{FactoryEntry, DESCRIPTION_KEY, ENABLE_KEY, FACTORY_KEY, NAME_KEY};

/// A value in the containers file
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PhpValue>),
    Map(IndexMap<String, PhpValue>),
    /// Code kept verbatim
    Expression(String),
}

impl From<&serde_json::Value> for PhpValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => PhpValue::Null,
            Value::Bool(b) => PhpValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PhpValue::Int(i),
                None => PhpValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => PhpValue::String(s.clone()),
            Value::Array(items) => PhpValue::List(items.iter().map(PhpValue::from).collect()),
            Value::Object(map) => PhpValue::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), PhpValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Quote `s` as a single-quoted PHP string.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\\' || ch == '\'' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

fn render_float(f: f64) -> String {
    if f.is_nan() {
        "NAN".to_string()
    } else if f.is_infinite() {
        String::from(if f > 0.0 { "INF" } else { "-INF" })
    } else {
        // `{:?}` keeps a fractional part, so the value reads back as a float.
        format!("{:?}", f)
    }
}

const INDENT: &str = "    ";

fn render_value(out: &mut String, value: &PhpValue, depth: usize) {
    match value {
        PhpValue::Null => out.push_str("NULL"),
        PhpValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        PhpValue::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        PhpValue::Float(f) => out.push_str(&render_float(*f)),
        PhpValue::String(s) => out.push_str(&quote(s)),
        PhpValue::Expression(code) => out.push_str(code),
        PhpValue::List(items) if items.is_empty() => out.push_str("[]"),
        PhpValue::Map(map) if map.is_empty() => out.push_str("[]"),
        PhpValue::List(items) => {
            out.push_str("[\n");
            for item in items {
                out.push_str(&INDENT.repeat(depth + 1));
                render_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
        PhpValue::Map(map) => {
            out.push_str("[\n");
            for (key, item) in map {
                render_pair(out, key, item, depth + 1);
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
    }
}

fn render_pair(out: &mut String, key: &str, value: &PhpValue, depth: usize) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&quote(key));
    out.push_str(" => ");
    render_value(out, value, depth);
    out.push_str(",\n");
}

/// Render the complete containers file for `entries`.
pub fn render_entries(entries: &[FactoryEntry]) -> String {
    let mut out = String::from("<?php\nreturn [\n");
    for entry in entries {
        out.push_str(INDENT);
        out.push_str("[\n");
        render_pair(&mut out, NAME_KEY, &PhpValue::String(entry.name.clone()), 2);
        render_pair(
            &mut out,
            DESCRIPTION_KEY,
            &PhpValue::String(entry.description.clone()),
            2,
        );
        render_pair(
            &mut out,
            FACTORY_KEY,
            &PhpValue::Expression(entry.factory.clone()),
            2,
        );
        let enable = match &entry.enable_expression {
            Some(code) => PhpValue::Expression(code.clone()),
            None => PhpValue::Bool(entry.enable),
        };
        render_pair(&mut out, ENABLE_KEY, &enable, 2);
        for (key, value) in &entry.extra {
            render_pair(&mut out, key, value, 2);
        }
        out.push_str(INDENT);
        out.push_str("],\n");
    }
    out.push_str("];\n");
    out
}

/// A containers file that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Key of an array element
#[derive(Debug, Clone, PartialEq)]
enum ArrayKey {
    Implicit,
    Int(i64),
    Str(String),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let consumed = &self.src[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0)
            + 1;
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Skip whitespace and `//`, `#` and `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                match trimmed[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_trivia();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> ParseResult<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", token)))
        }
    }

    /// Match a case-insensitive keyword not followed by an identifier char.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_trivia();
        let rest = self.rest();
        let matches = rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
            && !rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '\\');
        if matches {
            self.pos += keyword.len();
        }
        matches
    }

    fn parse_file(&mut self) -> ParseResult<PhpValue> {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches('\u{feff}').trim_start();
        self.pos += rest.len() - trimmed.len();
        if !self.rest().starts_with("<?php") {
            return Err(self.error("expected '<?php' open tag"));
        }
        self.pos += "<?php".len();

        if !self.eat_keyword("return") {
            return Err(self.error("expected 'return' statement"));
        }
        let value = self.parse_array()?;
        self.eat(";");
        self.eat("?>");
        self.skip_trivia();
        if self.pos != self.src.len() {
            return Err(self.error("unexpected content after return statement"));
        }
        Ok(value)
    }

    /// Parse `[ ... ]` or `array( ... )`.
    fn parse_array(&mut self) -> ParseResult<PhpValue> {
        let close = if self.eat("[") {
            ']'
        } else if self.eat_keyword("array") {
            self.expect("(")?;
            ')'
        } else {
            return Err(self.error("expected array"));
        };

        let mut elements: Vec<(ArrayKey, PhpValue)> = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                break;
            }

            let first = self.parse_value(close)?;
            let element = if self.eat("=>") {
                let key = match first {
                    PhpValue::Int(i) => ArrayKey::Int(i),
                    PhpValue::String(s) => ArrayKey::Str(s),
                    _ => return Err(self.error("array keys must be string or integer literals")),
                };
                (key, self.parse_value(close)?)
            } else {
                (ArrayKey::Implicit, first)
            };
            elements.push(element);

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                _ => return Err(self.error(format!("expected ',' or '{}'", close))),
            }
        }

        Ok(build_array(elements))
    }

    /// Parse one value, falling back to a raw expression when the text at
    /// this position is not a literal.
    fn parse_value(&mut self, close: char) -> ParseResult<PhpValue> {
        self.skip_trivia();
        let start = self.pos;
        if let Some(value) = self.try_literal()? {
            self.skip_trivia();
            let rest = self.rest();
            if rest.starts_with(',') || rest.starts_with(close) || rest.starts_with("=>") {
                return Ok(value);
            }
        }
        self.pos = start;
        self.parse_expression(close)
    }

    fn try_literal(&mut self) -> ParseResult<Option<PhpValue>> {
        let value = match self.peek() {
            Some('\'') => Some(PhpValue::String(self.parse_single_quoted()?)),
            Some('"') => self.parse_double_quoted()?.map(PhpValue::String),
            Some('[') => Some(self.parse_array()?),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            _ => {
                if self.eat_keyword("true") {
                    Some(PhpValue::Bool(true))
                } else if self.eat_keyword("false") {
                    Some(PhpValue::Bool(false))
                } else if self.eat_keyword("null") {
                    Some(PhpValue::Null)
                } else if self.rest().len() >= 5
                    && self.rest().is_char_boundary(5)
                    && self.rest()[..5].eq_ignore_ascii_case("array")
                {
                    let start = self.pos;
                    match self.parse_array() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            self.pos = start;
                            None
                        }
                    }
                } else {
                    None
                }
            }
        };
        Ok(value)
    }

    fn parse_single_quoted(&mut self) -> ParseResult<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Double-quoted strings are literals only without `$` interpolation.
    fn parse_double_quoted(&mut self) -> ParseResult<Option<String>> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(Some(out)),
                Some('$') => return Ok(None),
                Some('\\') => {
                    let escaped = match self.peek() {
                        Some('n') => Some('\n'),
                        Some('t') => Some('\t'),
                        Some('r') => Some('\r'),
                        Some('v') => Some('\u{0b}'),
                        Some('f') => Some('\u{0c}'),
                        Some('0') => Some('\0'),
                        Some(c @ ('\\' | '"' | '$')) => Some(c),
                        _ => None,
                    };
                    match escaped {
                        Some(c) => {
                            self.bump();
                            out.push(c);
                        }
                        None => out.push('\\'),
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Option<PhpValue> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(i, c)| {
                !(c.is_ascii_digit()
                    || *c == '.'
                    || *c == 'e'
                    || *c == 'E'
                    || *c == '_'
                    || ((*c == '-' || *c == '+')
                        && (*i == 0 || rest[..*i].ends_with(['e', 'E']))))
            })
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let text = rest[..len].replace('_', "");

        let value = if let Ok(i) = text.parse::<i64>() {
            PhpValue::Int(i)
        } else if let Ok(f) = text.parse::<f64>() {
            PhpValue::Float(f)
        } else {
            return None;
        };
        self.pos += len;
        Some(value)
    }

    /// Scan a raw expression up to the next top-level `,` or `close`.
    fn parse_expression(&mut self, close: char) -> ParseResult<PhpValue> {
        self.skip_trivia();
        let start = self.pos;
        let mut stack: Vec<char> = Vec::new();

        loop {
            let Some(ch) = self.peek() else {
                return Err(self.error("unterminated expression"));
            };
            if stack.is_empty() && (ch == ',' || ch == close) {
                break;
            }
            match ch {
                '\'' | '"' => {
                    self.skip_quoted(ch)?;
                    continue;
                }
                '(' => stack.push(')'),
                '[' => stack.push(']'),
                '{' => stack.push('}'),
                ')' | ']' | '}' => {
                    if stack.pop() != Some(ch) {
                        return Err(self.error(format!("unbalanced '{}'", ch)));
                    }
                }
                _ => {}
            }
            self.bump();
        }

        let code = self.src[start..self.pos].trim_end();
        if code.is_empty() {
            return Err(self.error("expected a value"));
        }
        Ok(PhpValue::Expression(code.to_string()))
    }

    fn skip_quoted(&mut self, quote: char) -> ParseResult<()> {
        self.bump();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }
}

/// Lists are arrays whose keys are implicit or exactly `0..n`.
fn build_array(elements: Vec<(ArrayKey, PhpValue)>) -> PhpValue {
    let is_list = elements.iter().enumerate().all(|(index, (key, _))| match key {
        ArrayKey::Implicit => true,
        ArrayKey::Int(i) => *i == index as i64,
        ArrayKey::Str(_) => false,
    });

    if is_list {
        return PhpValue::List(elements.into_iter().map(|(_, value)| value).collect());
    }

    let mut next_index: i64 = 0;
    let mut map = IndexMap::new();
    for (key, value) in elements {
        let key = match key {
            ArrayKey::Implicit => next_index.to_string(),
            ArrayKey::Int(i) => {
                next_index = next_index.max(i.saturating_add(1));
                i.to_string()
            }
            ArrayKey::Str(s) => s,
        };
        map.insert(key, value);
    }
    PhpValue::Map(map)
}

/// Parse a containers file into a generic value.
pub fn parse(src: &str) -> ParseResult<PhpValue> {
    Parser::new(src).parse_file()
}

/// Parse a containers file into factory entries.
///
/// Entries without a string `name` are skipped with a warning. The `factory`
/// value is kept as the exact source text.
pub fn parse_entries(src: &str) -> ParseResult<Vec<FactoryEntry>> {
    let items = match parse(src)? {
        PhpValue::List(items) => items,
        PhpValue::Map(map) => map.into_values().collect(),
        value => vec![value],
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let PhpValue::Map(mut fields) = item else {
            log::warn!("Skipping containers entry {}: not an array of fields", index);
            continue;
        };

        let name = match fields.shift_remove(NAME_KEY) {
            Some(PhpValue::String(name)) => name,
            _ => {
                log::warn!("Skipping containers entry {}: missing string 'name'", index);
                continue;
            }
        };

        let description = match fields.shift_remove(DESCRIPTION_KEY) {
            Some(PhpValue::String(description)) => description,
            Some(_) => {
                log::warn!(
                    "Containers entry '{}' has a non-string 'description'; it will be regenerated",
                    name
                );
                String::new()
            }
            None => String::new(),
        };

        let factory = match fields.shift_remove(FACTORY_KEY) {
            Some(value) => render_inline(&value),
            None => String::new(),
        };

        let (enable, enable_expression) = match fields.shift_remove(ENABLE_KEY) {
            None | Some(PhpValue::Bool(true)) => (true, None),
            Some(PhpValue::Bool(false)) | Some(PhpValue::Null) => (false, None),
            Some(PhpValue::Int(i)) => (i != 0, None),
            Some(other) => (true, Some(render_inline(&other))),
        };

        entries.push(FactoryEntry {
            name,
            description,
            factory,
            enable,
            enable_expression,
            extra: fields,
        });
    }
    Ok(entries)
}

/// Source text of a value, as it would be written back.
fn render_inline(value: &PhpValue) -> String {
    let mut out = String::new();
    render_value(&mut out, value, 2);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, factory: &str) -> FactoryEntry {
        FactoryEntry::new(name, format!("Container for package {}", name), factory)
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"Acme\Foo"), r"'Acme\\Foo'");
    }

    #[test]
    fn test_render_single_entry() {
        let rendered = render_entries(&[entry("acme/bar_0", "Acme\\Bar::create()")]);
        let expected = "<?php\n\
return [\n    [\n        'name' => 'acme/bar_0',\n        \
'description' => 'Container for package acme/bar_0',\n        \
'factory' => Acme\\Bar::create(),\n        'enable' => true,\n    ],\n];\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_extra_values() {
        let mut e = entry("x", "f()");
        e.enable = false;
        e.extra.insert("priority".to_string(), PhpValue::Int(5));
        e.extra.insert(
            "tags".to_string(),
            PhpValue::List(vec![PhpValue::String("a".to_string())]),
        );
        e.extra.insert("weight".to_string(), PhpValue::Float(1.0));
        let rendered = render_entries(&[e]);
        assert!(rendered.contains("        'enable' => false,\n"));
        assert!(rendered.contains("        'priority' => 5,\n"));
        assert!(rendered.contains("        'tags' => [\n            'a',\n        ],\n"));
        assert!(rendered.contains("        'weight' => 1.0,\n"));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_entries(&[]), "<?php\nreturn [\n];\n");
    }

    #[test]
    fn test_parse_rendered_file_restores_entries() {
        let mut first = entry("acme/foo_0", "new \\Acme\\Foo\\Container(['debug' => true])");
        first.enable = false;
        first.extra.insert("note".to_string(), PhpValue::String("it's mine".to_string()));
        let second = entry("acme/foo_1", "Acme\\Foo::create(1, 2)");

        let rendered = render_entries(&[first.clone(), second.clone()]);
        let parsed = parse_entries(&rendered).unwrap();
        assert_eq!(parsed, vec![first, second]);
    }

    #[test]
    fn test_parse_handwritten_file() {
        let src = r#"<?php
// Generated file, edited by hand
return array(
    array(
        'name' => "acme/foo_0",
        'description' => 'Foo', # trailing comment
        'factory' => function ($c) { return new Foo($c, [1, 2]); },
        'enable' => FALSE,
        'priority' => -3,
        'label' => 'a' . 'b',
    ),
    /* disabled block */
    [
        'name' => 'acme/bar_0',
        'factory' => Bar::create(),
    ],
);
"#;
        let entries = parse_entries(src).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "acme/foo_0");
        assert_eq!(entries[0].description, "Foo");
        assert_eq!(
            entries[0].factory,
            "function ($c) { return new Foo($c, [1, 2]); }"
        );
        assert!(!entries[0].enable);
        assert_eq!(entries[0].extra.get("priority"), Some(&PhpValue::Int(-3)));
        assert_eq!(
            entries[0].extra.get("label"),
            Some(&PhpValue::Expression("'a' . 'b'".to_string()))
        );

        assert_eq!(entries[1].name, "acme/bar_0");
        assert_eq!(entries[1].description, "");
        assert!(entries[1].enable);
    }

    #[test]
    fn test_parse_skips_entries_without_name() {
        let src = "<?php return [['factory' => f()], ['name' => 'ok', 'factory' => g()]];";
        let entries = parse_entries(src).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "ok");
    }

    #[test]
    fn test_parse_explicit_index_keys_form_a_list() {
        let value = parse("<?php return array(0 => 'a', 1 => 'b');").unwrap();
        assert_eq!(
            value,
            PhpValue::List(vec![
                PhpValue::String("a".to_string()),
                PhpValue::String("b".to_string())
            ])
        );
    }

    #[test]
    fn test_parse_largest_integer_key() {
        let src = "<?php return [['name' => 'x', 'factory' => f(), 9223372036854775807 => 1, 'k' => 2]];";
        let entries = parse_entries(src).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].extra.get("9223372036854775807"),
            Some(&PhpValue::Int(1))
        );
        assert_eq!(entries[0].extra.get("k"), Some(&PhpValue::Int(2)));

        assert!(parse("<?php return [9223372036854775807 => 'a', 'b'];").is_ok());
    }

    #[test]
    fn test_parse_non_string_description_is_not_an_extra() {
        let src = "<?php return [['name' => 'acme/foo_0', 'description' => null, 'factory' => f(), 'enable' => false]];";
        let entries = parse_entries(src).unwrap();
        assert_eq!(entries[0].description, "");
        assert!(!entries[0].enable);
        assert!(entries[0].extra.is_empty());
    }

    #[test]
    fn test_enable_expression_is_written_back() {
        let src = r#"<?php
return [
    [
        'name' => 'acme/foo_0',
        'description' => 'Foo',
        'factory' => Foo::create(),
        'enable' => getenv('FOO_ENABLED') === '1',
    ],
];
"#;
        let entries = parse_entries(src).unwrap();
        assert_eq!(
            entries[0].enable_expression.as_deref(),
            Some("getenv('FOO_ENABLED') === '1'")
        );
        assert!(entries[0].extra.is_empty());
        assert_eq!(render_entries(&entries), src);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("return [];").is_err());
        assert!(parse("<?php echo 'hi';").is_err());
        assert!(parse("<?php return [").is_err());
        assert!(parse("<?php return ['a' => f(];").is_err());
        assert!(parse("<?php return ['unterminated];").is_err());

        let err = parse("<?php\nreturn [\n  'a' => ]\n];").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_php_value_from_json() {
        let value = PhpValue::from(&serde_json::json!({ "n": 1, "f": 0.5, "l": [true, null] }));
        match value {
            PhpValue::Map(map) => {
                assert_eq!(map.get("n"), Some(&PhpValue::Int(1)));
                assert_eq!(map.get("f"), Some(&PhpValue::Float(0.5)));
                assert_eq!(
                    map.get("l"),
                    Some(&PhpValue::List(vec![PhpValue::Bool(true), PhpValue::Null]))
                );
            }
            other => panic!("Expected map, got {:?}", other),
        }
    }
}
