//! Source formatting for generated code.
//!
//! The exporter writes one construct per line with no indentation. A
//! [`CodeFormatter`] turns that into readable source. Formatting is a
//! cosmetic step: [`format_or_original`] logs any failure and returns the
//! input unchanged, so a formatter problem never fails code generation.
//!
//! [`MarkupFormatter`] is the built-in formatter. It works line by line:
//!
//! - indentation follows bracket depth and JSX tag depth;
//! - string literals switch to the configured quote unless that needs more
//!   escapes (JSX attribute strings are left alone);
//! - sole arrow function parameters gain or lose parentheses;
//! - a single-line tag wider than the print width is broken into one
//!   attribute per line, and a `style={{ ... }}` object into one property per
//!   line.
//!
//! JSX text children are expected inside expression containers, the way the
//! exporter writes them. Raw text holding a quote character is reported as an
//! unterminated string.

use log::{debug, warn};
use thiserror::Error;

use crate::config::{ArrowParens, FormatConfig, QuoteStyle};

/// Parser modes the built-in formatter accepts.
pub const SUPPORTED_PARSERS: &[&str] = &["babel", "babel-ts", "flow", "typescript"];

/// Errors reported by a [`CodeFormatter`]. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported parser `{0}`")]
    UnsupportedParser(String),

    #[error("unbalanced brackets or tags at line {line}")]
    Unbalanced { line: usize },

    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("unterminated tag starting at line {line}")]
    UnterminatedTag { line: usize },
}

/// A source code formatter.
pub trait CodeFormatter {
    /// Formats `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the source cannot be formatted.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Formats `source`, falling back to the unformatted text on failure.
pub fn format_or_original(formatter: &dyn CodeFormatter, source: &str) -> String {
    match formatter.format(source) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(err:%; "Formatting failed, emitting unformatted code");
            source.to_string()
        }
    }
}

/// Built-in formatter for JavaScript and JSX source.
#[derive(Debug, Clone, Default)]
pub struct MarkupFormatter {
    config: FormatConfig,
}

impl MarkupFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    fn push_line(&self, out: &mut String, depth: usize, text: &str) {
        let indent_width = self.config.indent_width();
        let width = depth * indent_width + text.chars().count();

        let broken = if width > self.config.print_width() {
            break_tag(text)
        } else {
            None
        };

        match broken {
            Some(lines) => {
                for (extra, line) in lines {
                    push_indented(out, (depth + extra) * indent_width, &line);
                }
            }
            None => push_indented(out, depth * indent_width, text),
        }
    }
}

impl CodeFormatter for MarkupFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let parser = self.config.parser();
        if !SUPPORTED_PARSERS.contains(&parser) {
            return Err(FormatError::UnsupportedParser(parser.to_string()));
        }

        let mut scanner = Scanner::new(&self.config);
        let mut out = String::with_capacity(source.len() * 2);
        let mut pending_blank = false;
        let mut line_count = 0;

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            line_count = line;

            // Template literal content is kept byte for byte.
            if scanner.in_template {
                scanner.scan_line(raw, line)?;
                out.push_str(raw);
                out.push('\n');
                continue;
            }

            let scanned = scanner.scan_line(raw.trim(), line)?;
            let text = scanned.text.trim_end();
            if text.is_empty() {
                pending_blank = !out.is_empty();
                continue;
            }
            if pending_blank {
                out.push('\n');
                pending_blank = false;
            }
            self.push_line(&mut out, scanned.depth, text);
        }

        scanner.finish(line_count)?;
        debug!(parser, lines = line_count; "Formatted code");
        Ok(out)
    }
}

fn push_indented(out: &mut String, indent: usize, text: &str) {
    out.extend(std::iter::repeat_n(' ', indent));
    out.push_str(text);
    out.push('\n');
}

struct ScannedLine {
    text: String,
    /// Nesting depth the line is printed at.
    depth: usize,
}

/// Tracks nesting across lines.
struct Scanner<'a> {
    config: &'a FormatConfig,
    depth: usize,
    brackets: usize,
    /// Bracket depth at which the currently open tag started.
    tag: Option<usize>,
    tag_line: usize,
    in_template: bool,
    template_line: usize,
}

impl<'a> Scanner<'a> {
    fn new(config: &'a FormatConfig) -> Self {
        Self {
            config,
            depth: 0,
            brackets: 0,
            tag: None,
            tag_line: 0,
            in_template: false,
            template_line: 0,
        }
    }

    fn scan_line(&mut self, text: &str, line: usize) -> Result<ScannedLine, FormatError> {
        let chars: Vec<char> = text.chars().collect();
        let depth_before = self.depth;
        let mut out = String::with_capacity(text.len());
        // Closers seen before any other content move the line itself out.
        let mut leading_closers = 0;
        let mut started = false;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if self.in_template {
                out.push(ch);
                match ch {
                    '\\' => {
                        if let Some(&escaped) = chars.get(i + 1) {
                            out.push(escaped);
                        }
                        i += 2;
                    }
                    '`' => {
                        self.in_template = false;
                        i += 1;
                    }
                    _ => i += 1,
                }
                started = true;
                continue;
            }

            let next = chars.get(i + 1).copied();
            match ch {
                '"' | '\'' => {
                    let attribute = self.at_attribute_value(&out);
                    let end = closing_quote(&chars, i, !attribute)
                        .ok_or(FormatError::UnterminatedString { line })?;
                    let content: String = chars[i + 1..end].iter().collect();
                    if attribute {
                        out.push(ch);
                        out.push_str(&content);
                        out.push(ch);
                    } else {
                        out.push_str(&requote(&content, ch, self.preferred_quote()));
                    }
                    i = end + 1;
                    started = true;
                    continue;
                }
                '`' => {
                    self.in_template = true;
                    self.template_line = line;
                    out.push(ch);
                }
                '/' if next == Some('/') && self.tag.is_none() => {
                    out.extend(&chars[i..]);
                    break;
                }
                '/' if next == Some('>') && self.tag == Some(self.brackets) => {
                    self.close(line)?;
                    self.tag = None;
                    if !started {
                        leading_closers += 1;
                    }
                    out.push_str("/>");
                    i += 2;
                    started = true;
                    continue;
                }
                '>' if self.tag == Some(self.brackets) => {
                    self.tag = None;
                    if !started {
                        leading_closers += 1;
                    }
                    out.push(ch);
                }
                '<' if next == Some('/') => {
                    self.close(line)?;
                    if !started {
                        leading_closers += 1;
                    }
                    let end = chars[i..]
                        .iter()
                        .position(|&c| c == '>')
                        .map(|offset| i + offset)
                        .ok_or(FormatError::UnterminatedTag { line })?;
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                    started = true;
                    continue;
                }
                '<' if next.is_some_and(|c| c.is_ascii_alphabetic() || c == '>') => {
                    self.depth += 1;
                    self.tag = Some(self.brackets);
                    self.tag_line = line;
                    out.push(ch);
                }
                '{' | '(' | '[' => {
                    self.depth += 1;
                    self.brackets += 1;
                    out.push(ch);
                }
                '}' | ')' | ']' => {
                    self.close(line)?;
                    self.brackets = self
                        .brackets
                        .checked_sub(1)
                        .ok_or(FormatError::Unbalanced { line })?;
                    if !started {
                        leading_closers += 1;
                    }
                    out.push(ch);
                    i += 1;
                    continue;
                }
                '=' if next == Some('>') => {
                    self.apply_arrow_parens(&mut out);
                    out.push_str("=>");
                    i += 2;
                    started = true;
                    continue;
                }
                _ => out.push(ch),
            }

            if !ch.is_whitespace() {
                started = true;
            }
            i += 1;
        }

        let depth = depth_before
            .checked_sub(leading_closers)
            .ok_or(FormatError::Unbalanced { line })?;
        Ok(ScannedLine { text: out, depth })
    }

    fn finish(&self, last_line: usize) -> Result<(), FormatError> {
        if self.in_template {
            return Err(FormatError::UnterminatedString {
                line: self.template_line,
            });
        }
        if self.tag.is_some() {
            return Err(FormatError::UnterminatedTag {
                line: self.tag_line,
            });
        }
        if self.depth != 0 {
            return Err(FormatError::Unbalanced { line: last_line });
        }
        Ok(())
    }

    fn close(&mut self, line: usize) -> Result<(), FormatError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(FormatError::Unbalanced { line })?;
        Ok(())
    }

    /// True for the string right after `name=` inside a tag.
    fn at_attribute_value(&self, out: &str) -> bool {
        self.tag == Some(self.brackets) && out.trim_end().ends_with('=')
    }

    fn preferred_quote(&self) -> char {
        match self.config.quote_style() {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }

    /// Rewrites the parameter list written so far, just before an `=>`.
    fn apply_arrow_parens(&self, out: &mut String) {
        let end = out.trim_end().len();
        let head = &out[..end];

        match self.config.arrow_parens() {
            ArrowParens::Always => {
                let Some(start) = head
                    .char_indices()
                    .rev()
                    .take_while(|(_, c)| is_ident_char(*c))
                    .last()
                    .map(|(idx, _)| idx)
                else {
                    return;
                };
                if head[start..].starts_with(|c: char| c.is_ascii_digit())
                    || head[..start].ends_with('.')
                {
                    return;
                }
                let param = format!("({})", &head[start..]);
                out.replace_range(start..end, &param);
            }
            ArrowParens::Avoid => {
                if !head.ends_with(')') {
                    return;
                }
                let Some(open) = head.rfind('(') else {
                    return;
                };
                let param = &head[open + 1..end - 1];
                if param.is_empty()
                    || !param.chars().all(is_ident_char)
                    || param.starts_with(|c: char| c.is_ascii_digit())
                    || head[..open].ends_with(is_ident_char)
                {
                    return;
                }
                let param = param.to_string();
                out.replace_range(open..end, &param);
            }
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Index of the quote closing the string opened at `start`.
///
/// JSX attribute strings have no escape sequences, so `escapes` is false
/// for them.
fn closing_quote(chars: &[char], start: usize, escapes: bool) -> Option<usize> {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if escapes => i += 2,
            c if c == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Re-emits a string literal body, switching to `preferred` unless that
/// would need more escapes than keeping the other quote.
fn requote(content: &str, quote: char, preferred: char) -> String {
    let alternate = if preferred == '"' { '\'' } else { '"' };
    let count = |target: char| content.chars().filter(|&c| c == target).count();
    let target = if count(preferred) > count(alternate) {
        alternate
    } else {
        preferred
    };

    let mut literal = String::with_capacity(content.len() + 2);
    literal.push(target);
    if target == quote {
        literal.push_str(content);
    } else {
        let mut chars = content.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) if escaped == quote => literal.push(escaped),
                    Some(escaped) => {
                        literal.push('\\');
                        literal.push(escaped);
                    }
                    None => literal.push('\\'),
                },
                c if c == target => {
                    literal.push('\\');
                    literal.push(c);
                }
                c => literal.push(c),
            }
        }
    }
    literal.push(target);
    literal
}

/// Breaks a single-line tag into one attribute per line.
///
/// Returns `(extra depth, text)` pairs, or `None` when the line is not a
/// lone tag with attributes.
fn break_tag(line: &str) -> Option<Vec<(usize, String)>> {
    let rest = line.strip_prefix('<')?;
    let name_len =
        rest.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':')))?;
    if name_len == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(name_len);
    let (body, end) = match rest.strip_suffix("/>") {
        Some(body) => (body, "/>"),
        None => (rest.strip_suffix('>')?, ">"),
    };
    if !body.starts_with(char::is_whitespace) {
        return None;
    }

    let attributes = split_top_level(body, char::is_whitespace, false)?;
    if attributes.is_empty() {
        return None;
    }

    let mut lines = vec![(0, format!("<{name}"))];
    for attribute in attributes {
        let object = attribute
            .strip_suffix("}}")
            .and_then(|attribute| attribute.split_once("={{"));
        match object {
            Some((attr_name, body)) => {
                let properties = split_top_level(body, |c| c == ',', true)?;
                if properties.is_empty() {
                    lines.push((1, attribute));
                    continue;
                }
                lines.push((1, format!("{attr_name}={{{{")));
                lines.extend(properties.into_iter().map(|p| (2, format!("{p},"))));
                lines.push((1, "}}".to_string()));
            }
            None => lines.push((1, attribute)),
        }
    }
    lines.push((0, end.to_string()));
    Some(lines)
}

/// Splits on separators outside quotes and brackets. Returns `None` on
/// unbalanced input, or on a bare `<` or `>` unless `allow_angles` is set.
///
/// Backslash escapes only apply inside brackets; top-level strings are
/// attribute values.
fn split_top_level(
    text: &str,
    is_separator: impl Fn(char) -> bool,
    allow_angles: bool,
) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' && depth > 0 {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth = depth.checked_sub(1)?,
            '<' | '>' if depth == 0 && !allow_angles => return None,
            c if depth == 0 && is_separator(c) => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if depth != 0 || quote.is_some() {
        return None;
    }
    parts.push(current);

    Some(
        parts
            .into_iter()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    )
}
