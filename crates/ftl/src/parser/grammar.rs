//! Grammar-rule functions building the AST from a [`Cursor`].
//!
//! `parse` is a total function: unparseable entries become [`Junk`] and
//! scanning resumes at the next recognizable entry start, so the whole
//! parse never fails. Every grammar function either succeeds with a partial
//! AST and an advanced cursor, or returns a structured [`ParseError`] that
//! an outer scope turns into junk recovery.

use std::mem;

use super::ast::*;
use super::cursor::Cursor;
use super::error::{ParseError, ParseErrorKind};

/// A grammar function outcome: the parsed node plus the cursor past it.
pub type ParseResult<'a, T> = Result<(T, Cursor<'a>), ParseError>;

/// Parse a complete source text into a [`Resource`].
///
/// Never fails: syntax errors degrade the offending entry to [`Junk`],
/// carrying annotations, and parsing continues with the next entry.
pub fn parse(source: &str) -> Resource {
    let mut cursor = Cursor::new(source);
    let mut entries = Vec::new();
    loop {
        cursor = skip_blank(cursor);
        if cursor.is_eof() {
            break;
        }
        match get_entry(cursor) {
            Ok((entry, rest)) => {
                entries.push(entry);
                cursor = rest;
            }
            Err(error) => {
                let (junk, rest) = collect_junk(cursor, &error);
                entries.push(Entry::Junk(junk));
                cursor = rest;
            }
        }
    }
    Resource { entries }
}

/// Parse one top-level entry, dispatching on its first character.
fn get_entry(cursor: Cursor<'_>) -> ParseResult<'_, Entry> {
    match cursor.current() {
        '#' => {
            let (comment, rest) = get_comment(cursor)?;
            Ok((Entry::Comment(comment), rest))
        }
        '-' => {
            let (term, rest) = get_term(cursor)?;
            Ok((Entry::Term(term), rest))
        }
        c if c.is_ascii_alphabetic() => {
            let (message, rest) = get_message(cursor)?;
            Ok((Entry::Message(message), rest))
        }
        _ => Err(ParseError::new(ParseErrorKind::ExpectedEntry, cursor.pos())),
    }
}

/// Synthesize a junk entry from the failed entry attempt at `cursor`.
///
/// The offending first line is consumed unconditionally so recovery always
/// makes progress; subsequent lines are consumed until one starts with
/// `#`, `-`, or a letter - the recognized starts of a new entry.
fn collect_junk<'a>(cursor: Cursor<'a>, error: &ParseError) -> (Junk, Cursor<'a>) {
    let start = cursor.pos();
    let mut cursor = consume_line(cursor);
    while !cursor.is_eof() {
        let c = cursor.current();
        if c == '#' || c == '-' || c.is_ascii_alphabetic() {
            break;
        }
        cursor = consume_line(cursor);
    }
    let junk = Junk {
        content: cursor.slice(start, cursor.pos()).to_string(),
        annotations: vec![error.annotation()],
        span: Span::new(start, cursor.pos()),
    };
    (junk, cursor)
}

/// Parse a comment entry. Consecutive lines with the same marker level are
/// merged into a single comment with newline-joined content.
fn get_comment(cursor: Cursor<'_>) -> ParseResult<'_, Comment> {
    let mut scan = cursor;
    let mut level = 0usize;
    while scan.peek(0) == Some('#') {
        level += 1;
        scan = scan.bump();
    }
    if level > 3 {
        return Err(ParseError::new(
            ParseErrorKind::CommentTooDeep,
            cursor.pos(),
        ));
    }
    let (mut content, mut cursor) = get_comment_line(scan)?;
    loop {
        if cursor.is_eof() || !is_line_end(cursor.current()) {
            break;
        }
        let mut probe = skip_eol(cursor);
        let mut next_level = 0usize;
        while probe.peek(0) == Some('#') {
            next_level += 1;
            probe = probe.bump();
        }
        if next_level != level {
            break;
        }
        match probe.peek(0) {
            Some(' ') | None => {}
            Some(c) if is_line_end(c) => {}
            Some(_) => break,
        }
        let (line, rest) = get_comment_line(probe)?;
        content.push('\n');
        content.push_str(&line);
        cursor = rest;
    }
    let kind = match level {
        2 => CommentKind::Group,
        3 => CommentKind::Resource,
        _ => CommentKind::Line,
    };
    Ok((Comment { content, kind }, cursor))
}

/// Parse one comment line's content after its `#` markers. Requires a
/// single space (or line end) after the markers; leaves the cursor at the
/// terminating line end.
fn get_comment_line(cursor: Cursor<'_>) -> ParseResult<'_, String> {
    let mut cursor = cursor;
    if cursor.peek(0) == Some(' ') {
        cursor = cursor.bump();
    } else if !cursor.is_eof() && !is_line_end(cursor.current()) {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedToken(' '),
            cursor.pos(),
        ));
    }
    let start = cursor.pos();
    let mut scan = cursor;
    while !scan.is_eof() && !is_line_end(scan.current()) {
        scan = scan.bump();
    }
    Ok((scan.slice(start, scan.pos()).to_string(), scan))
}

/// Parse a message: `id = pattern` plus following attribute lines.
fn get_message(cursor: Cursor<'_>) -> ParseResult<'_, Message> {
    let start = cursor.pos();
    let (id, cursor) = get_identifier(cursor)?;
    let cursor = skip_blank_inline(cursor);
    let cursor = expect_char(cursor, '=')?;
    let cursor = skip_blank_inline(cursor);
    let (value, cursor) = get_pattern(cursor, PatternContext::Entry)?;
    let (attributes, cursor) = get_attributes(cursor)?;
    if value.is_none() && attributes.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedMessageField { id: id.name },
            cursor.pos(),
        ));
    }
    Ok((
        Message {
            id,
            value,
            attributes,
            span: Span::new(start, cursor.pos()),
        },
        cursor,
    ))
}

/// Parse a term: `-id = pattern` plus following attribute lines.
///
/// Unlike a message, a term must have a value.
fn get_term(cursor: Cursor<'_>) -> ParseResult<'_, Term> {
    let start = cursor.pos();
    let cursor = cursor.bump();
    let (id, cursor) = get_identifier(cursor)?;
    let cursor = skip_blank_inline(cursor);
    let cursor = expect_char(cursor, '=')?;
    let cursor = skip_blank_inline(cursor);
    let (value, cursor) = get_pattern(cursor, PatternContext::Entry)?;
    let Some(value) = value else {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedTermValue { id: id.name },
            cursor.pos(),
        ));
    };
    let (attributes, cursor) = get_attributes(cursor)?;
    Ok((
        Term {
            id,
            value,
            attributes,
            span: Span::new(start, cursor.pos()),
        },
        cursor,
    ))
}

/// Parse the attribute lines following a message or term value.
///
/// An attribute line is: a line end, at least one leading space, then
/// `.id = pattern`. Anything else ends the attribute list without
/// consuming input.
fn get_attributes(cursor: Cursor<'_>) -> ParseResult<'_, Vec<Attribute>> {
    let mut cursor = cursor;
    let mut attributes = Vec::new();
    loop {
        if cursor.is_eof() || !is_line_end(cursor.current()) {
            break;
        }
        let after = skip_eol(cursor);
        let indented = skip_blank_inline(after);
        if indented.pos() == after.pos() || indented.is_eof() || indented.current() != '.' {
            break;
        }
        let (attribute, rest) = get_attribute(indented)?;
        attributes.push(attribute);
        cursor = rest;
    }
    Ok((attributes, cursor))
}

/// Parse a single attribute: `.id = pattern`. The value is mandatory.
fn get_attribute(cursor: Cursor<'_>) -> ParseResult<'_, Attribute> {
    let cursor = cursor.bump();
    let (id, cursor) = get_identifier(cursor)?;
    let cursor = skip_blank_inline(cursor);
    let cursor = expect_char(cursor, '=')?;
    let cursor = skip_blank_inline(cursor);
    let (value, cursor) = get_pattern(cursor, PatternContext::Entry)?;
    let Some(value) = value else {
        return Err(ParseError::new(ParseErrorKind::MissingValue, cursor.pos()));
    };
    Ok((Attribute { id, value }, cursor))
}

/// Where a pattern appears, which decides its extra terminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternContext {
    /// The value of a message, term, or attribute.
    Entry,
    /// The value of a select-expression variant. Also terminated by `}`
    /// (closing the select) and by `[` / `*` (starting the next variant).
    Variant,
}

/// Parse a pattern: a maximal run of text and placeables.
///
/// A pattern is terminated by end-of-line unless the following line is an
/// indented continuation: it begins with at least one space and its first
/// non-space character is not `[`, `*`, `.`, or `}`. A continuation
/// contributes a single space to the pattern in place of the line break;
/// trailing inline spaces are trimmed at each line end and at pattern end.
///
/// Returns `None` for an empty pattern.
fn get_pattern<'a>(
    cursor: Cursor<'a>,
    context: PatternContext,
) -> ParseResult<'a, Option<Pattern>> {
    let mut cursor = cursor;
    let mut elements: Vec<PatternElement> = Vec::new();
    let mut text = String::new();
    loop {
        if cursor.is_eof() {
            break;
        }
        let c = cursor.current();
        if c == '{' {
            flush_text(&mut text, &mut elements);
            let (expression, rest) = get_placeable(cursor)?;
            elements.push(PatternElement::Placeable(expression));
            cursor = rest;
        } else if c == '}' {
            if context == PatternContext::Variant {
                break;
            }
            return Err(ParseError::new(
                ParseErrorKind::UnbalancedClosingBrace,
                cursor.pos(),
            ));
        } else if context == PatternContext::Variant && (c == '[' || c == '*') {
            break;
        } else if is_line_end(c) {
            let after = skip_eol(cursor);
            let indented = skip_blank_inline(after);
            let continues = indented.pos() > after.pos()
                && !indented.is_eof()
                && is_continuation_start(indented.current());
            if !continues {
                break;
            }
            trim_text_end(&mut text);
            if !(elements.is_empty() && text.is_empty()) {
                text.push(' ');
            }
            cursor = indented;
        } else {
            let start = cursor.pos();
            let mut scan = cursor;
            while !scan.is_eof() && !is_text_stop(scan.current(), context) {
                scan = scan.bump();
            }
            text.push_str(cursor.slice(start, scan.pos()));
            cursor = scan;
        }
    }
    trim_text_end(&mut text);
    flush_text(&mut text, &mut elements);
    if elements.is_empty() {
        Ok((None, cursor))
    } else {
        Ok((Some(Pattern { elements }), cursor))
    }
}

/// Whether `c` terminates a text run in the given pattern context.
fn is_text_stop(c: char, context: PatternContext) -> bool {
    if c == '{' || c == '}' || is_line_end(c) {
        return true;
    }
    context == PatternContext::Variant && (c == '[' || c == '*')
}

/// Whether `c` may start an indented continuation line. `[`, `*`, and `.`
/// start a variant, default variant, or attribute; `}` closes a select.
fn is_continuation_start(c: char) -> bool {
    !matches!(c, '[' | '*' | '.' | '}')
}

fn flush_text(text: &mut String, elements: &mut Vec<PatternElement>) {
    if !text.is_empty() {
        elements.push(PatternElement::Text(mem::take(text)));
    }
}

fn trim_text_end(text: &mut String) {
    while text.ends_with(' ') {
        text.pop();
    }
}

/// Parse a placeable: `{` blank `expression` blank `}`.
fn get_placeable(cursor: Cursor<'_>) -> ParseResult<'_, Expression> {
    let cursor = expect_char(cursor, '{')?;
    let cursor = skip_blank(cursor);
    let (expression, cursor) = get_expression(cursor)?;
    let cursor = skip_blank(cursor);
    let cursor = expect_char(cursor, '}')?;
    Ok((expression, cursor))
}

/// Parse an expression: an inline expression, promoted to a select
/// expression when followed by `->` on the same line.
fn get_expression(cursor: Cursor<'_>) -> ParseResult<'_, Expression> {
    let (selector, cursor) = get_inline_expression(cursor)?;
    let probe = skip_blank_inline(cursor);
    if !probe.starts_with("->") {
        return Ok((selector, cursor));
    }
    let arrow = probe.advance(2);
    let (variants, cursor) = get_variant_list(arrow)?;
    Ok((
        Expression::Select {
            selector: Box::new(selector),
            variants,
        },
        cursor,
    ))
}

/// Parse the variants of a select expression, collected until `}`.
///
/// Validates the structural invariant: at least one variant, exactly one of
/// them marked default with `*`.
fn get_variant_list(cursor: Cursor<'_>) -> ParseResult<'_, Vec<Variant>> {
    let mut cursor = cursor;
    let mut variants: Vec<Variant> = Vec::new();
    let mut has_default = false;
    loop {
        cursor = skip_blank(cursor);
        if cursor.is_eof() || cursor.current() == '}' {
            break;
        }
        let default = cursor.current() == '*';
        let mut after_star = cursor;
        if default {
            if has_default {
                return Err(ParseError::new(
                    ParseErrorKind::MultipleDefaultVariants,
                    cursor.pos(),
                ));
            }
            after_star = cursor.bump();
        }
        let open = expect_char(after_star, '[')?;
        let key_start = skip_blank_inline(open);
        let (key, after_key) = get_variant_key(key_start)?;
        let close = expect_char(skip_blank_inline(after_key), ']')?;
        let value_start = skip_blank_inline(close);
        let (value, rest) = get_pattern(value_start, PatternContext::Variant)?;
        let Some(value) = value else {
            return Err(ParseError::new(
                ParseErrorKind::MissingValue,
                value_start.pos(),
            ));
        };
        variants.push(Variant {
            key,
            value,
            default,
        });
        has_default = has_default || default;
        cursor = rest;
    }
    if variants.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingVariants,
            cursor.pos(),
        ));
    }
    if !has_default {
        return Err(ParseError::new(
            ParseErrorKind::MissingDefaultVariant,
            cursor.pos(),
        ));
    }
    Ok((variants, cursor))
}

/// Parse a variant key: an identifier or a number.
fn get_variant_key(cursor: Cursor<'_>) -> ParseResult<'_, VariantKey> {
    match cursor.peek(0) {
        Some(c) if c == '-' || c.is_ascii_digit() => {
            let ((raw, value), rest) = get_number(cursor)?;
            Ok((VariantKey::Number { raw, value }, rest))
        }
        Some(c) if c.is_ascii_alphabetic() => {
            let (id, rest) = get_identifier(cursor)?;
            Ok((VariantKey::Identifier(id), rest))
        }
        _ => Err(ParseError::new(
            ParseErrorKind::ExpectedVariantKey,
            cursor.pos(),
        )),
    }
}

/// Parse an inline expression: a literal, a reference, or a call.
fn get_inline_expression(cursor: Cursor<'_>) -> ParseResult<'_, Expression> {
    if cursor.is_eof() {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedInlineExpression,
            cursor.pos(),
        ));
    }
    match cursor.current() {
        '"' => {
            let (value, rest) = get_string_literal(cursor)?;
            Ok((Expression::StringLiteral { value }, rest))
        }
        '$' => {
            let (id, rest) = get_identifier(cursor.bump())?;
            Ok((Expression::VariableReference { id }, rest))
        }
        '-' => {
            // One character of lookahead disambiguates a term reference
            // from a negative number.
            match cursor.peek(1) {
                Some(c) if c.is_ascii_alphabetic() => get_term_reference(cursor),
                _ => {
                    let ((raw, value), rest) = get_number(cursor)?;
                    Ok((Expression::NumberLiteral { raw, value }, rest))
                }
            }
        }
        c if c.is_ascii_digit() => {
            let ((raw, value), rest) = get_number(cursor)?;
            Ok((Expression::NumberLiteral { raw, value }, rest))
        }
        c if c.is_ascii_alphabetic() => get_reference_or_call(cursor),
        _ => Err(ParseError::new(
            ParseErrorKind::ExpectedInlineExpression,
            cursor.pos(),
        )),
    }
}

/// Parse a message reference or a function call starting at a letter.
///
/// An identifier followed (after optional inline blank) by `(` is a call;
/// the callee must then be all-uppercase.
fn get_reference_or_call(cursor: Cursor<'_>) -> ParseResult<'_, Expression> {
    let (id, cursor) = get_identifier(cursor)?;
    let probe = skip_blank_inline(cursor);
    if probe.peek(0) == Some('(') {
        if !is_callee(&id.name) {
            return Err(ParseError::new(
                ParseErrorKind::ForbiddenCallee,
                probe.pos(),
            ));
        }
        let (arguments, rest) = get_call_arguments(probe)?;
        return Ok((Expression::FunctionReference { id, arguments }, rest));
    }
    let (attribute, cursor) = get_attribute_accessor(cursor)?;
    Ok((Expression::MessageReference { id, attribute }, cursor))
}

/// Parse a term reference: `-id`, optional `.attribute`, optional call
/// arguments.
fn get_term_reference(cursor: Cursor<'_>) -> ParseResult<'_, Expression> {
    let (id, cursor) = get_identifier(cursor.bump())?;
    let (attribute, cursor) = get_attribute_accessor(cursor)?;
    if cursor.peek(0) == Some('(') {
        let (arguments, rest) = get_call_arguments(cursor)?;
        return Ok((
            Expression::TermReference {
                id,
                attribute,
                arguments: Some(arguments),
            },
            rest,
        ));
    }
    Ok((
        Expression::TermReference {
            id,
            attribute,
            arguments: None,
        },
        cursor,
    ))
}

/// Parse an optional `.attribute` accessor directly after an identifier.
fn get_attribute_accessor(cursor: Cursor<'_>) -> ParseResult<'_, Option<Identifier>> {
    if cursor.peek(0) == Some('.') {
        let (id, rest) = get_identifier(cursor.bump())?;
        Ok((Some(id), rest))
    } else {
        Ok((None, cursor))
    }
}

/// Whether an identifier can be used as a function callee: all-uppercase.
fn is_callee(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| !c.is_ascii_lowercase())
}

/// Parse call arguments: `(` comma-separated arguments `)`.
///
/// Each argument is an inline expression; one followed by `:` becomes a
/// named argument, whose name must be a bare identifier and whose value
/// must be a string or number literal. All positional arguments must
/// precede all named arguments, and named-argument names must be unique.
fn get_call_arguments(cursor: Cursor<'_>) -> ParseResult<'_, CallArguments> {
    let mut cursor = skip_blank(cursor.bump());
    let mut positional: Vec<Expression> = Vec::new();
    let mut named: Vec<NamedArgument> = Vec::new();
    loop {
        if cursor.is_eof() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken(')'),
                cursor.pos(),
            ));
        }
        if cursor.current() == ')' {
            cursor = cursor.bump();
            break;
        }
        let argument_start = cursor;
        let (expression, rest) = get_inline_expression(cursor)?;
        cursor = skip_blank(rest);
        if cursor.peek(0) == Some(':') {
            let Expression::MessageReference {
                id: name,
                attribute: None,
            } = expression
            else {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidArgumentName,
                    argument_start.pos(),
                ));
            };
            let value_start = skip_blank(cursor.bump());
            let (value, rest) = get_inline_expression(value_start)?;
            if !matches!(
                value,
                Expression::StringLiteral { .. } | Expression::NumberLiteral { .. }
            ) {
                return Err(ParseError::new(
                    ParseErrorKind::NamedArgumentMustBeLiteral {
                        name: name.name.clone(),
                    },
                    value_start.pos(),
                ));
            }
            if named.iter().any(|argument| argument.name == name) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateNamedArgument { name: name.name },
                    argument_start.pos(),
                ));
            }
            named.push(NamedArgument { name, value });
            cursor = rest;
        } else {
            if !named.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::PositionalArgumentFollowsNamed,
                    argument_start.pos(),
                ));
            }
            positional.push(expression);
        }
        cursor = skip_blank(cursor);
        match cursor.peek(0) {
            Some(',') => cursor = skip_blank(cursor.bump()),
            Some(')') => {}
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedToken(')'),
                    cursor.pos(),
                ));
            }
        }
    }
    Ok((CallArguments { positional, named }, cursor))
}

/// Parse a double-quoted string literal, unescaping its contents.
///
/// Escapes: `\"`, `\\`, `\n`, `\t`, `\uXXXX`, `\UXXXXXX`. The literal must
/// close on the same line.
fn get_string_literal(cursor: Cursor<'_>) -> ParseResult<'_, String> {
    let mut cursor = cursor.bump();
    let mut value = String::new();
    loop {
        if cursor.is_eof() || is_line_end(cursor.current()) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken('"'),
                cursor.pos(),
            ));
        }
        match cursor.current() {
            '"' => {
                cursor = cursor.bump();
                break;
            }
            '\\' => {
                let (unescaped, rest) = get_escape(cursor)?;
                value.push(unescaped);
                cursor = rest;
            }
            c => {
                value.push(c);
                cursor = cursor.bump();
            }
        }
    }
    Ok((value, cursor))
}

/// Parse one backslash escape inside a string literal.
fn get_escape(cursor: Cursor<'_>) -> ParseResult<'_, char> {
    let start = cursor.pos();
    let cursor = cursor.bump();
    let Some(c) = cursor.peek(0) else {
        return Err(ParseError::new(
            ParseErrorKind::UnknownEscapeSequence {
                sequence: String::new(),
            },
            start,
        ));
    };
    match c {
        '"' => Ok(('"', cursor.bump())),
        '\\' => Ok(('\\', cursor.bump())),
        'n' => Ok(('\n', cursor.bump())),
        't' => Ok(('\t', cursor.bump())),
        'u' => get_unicode_escape(cursor.bump(), 4, start),
        'U' => get_unicode_escape(cursor.bump(), 6, start),
        other => Err(ParseError::new(
            ParseErrorKind::UnknownEscapeSequence {
                sequence: other.to_string(),
            },
            start,
        )),
    }
}

/// Parse the hex digits of a `\u` (4 digits) or `\U` (6 digits) escape.
///
/// The code point must be a valid Unicode scalar value; `\U` in particular
/// must not exceed U+10FFFF.
fn get_unicode_escape(cursor: Cursor<'_>, digits: usize, start: usize) -> ParseResult<'_, char> {
    let mut scan = cursor;
    for _ in 0..digits {
        match scan.peek(0) {
            Some(c) if c.is_ascii_hexdigit() => scan = scan.bump(),
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidUnicodeEscape {
                        sequence: cursor.slice(start, scan.pos()).to_string(),
                    },
                    start,
                ));
            }
        }
    }
    let hex = cursor.slice(cursor.pos(), scan.pos());
    let code = u32::from_str_radix(hex, 16).expect("hex digits parse as u32");
    match char::from_u32(code) {
        Some(c) => Ok((c, scan)),
        None => Err(ParseError::new(
            ParseErrorKind::InvalidUnicodeEscape {
                sequence: hex.to_string(),
            },
            start,
        )),
    }
}

/// Parse a number literal: optional `-`, digits, optional `.` and digits.
///
/// Returns both the raw source text and the parsed value; the raw text is
/// preserved on the AST node for exact round-tripping.
fn get_number(cursor: Cursor<'_>) -> ParseResult<'_, (String, f64)> {
    let start = cursor.pos();
    let mut scan = cursor;
    if scan.peek(0) == Some('-') {
        scan = scan.bump();
    }
    scan = expect_digits(scan)?;
    if scan.peek(0) == Some('.') {
        scan = expect_digits(scan.bump())?;
    }
    let raw = cursor.slice(start, scan.pos()).to_string();
    let value = raw
        .parse::<f64>()
        .expect("number grammar yields a valid float");
    Ok(((raw, value), scan))
}

/// Consume one or more ASCII digits.
fn expect_digits(cursor: Cursor<'_>) -> Result<Cursor<'_>, ParseError> {
    let mut scan = cursor;
    while let Some(c) = scan.peek(0) {
        if c.is_ascii_digit() {
            scan = scan.bump();
        } else {
            break;
        }
    }
    if scan.pos() == cursor.pos() {
        return Err(ParseError::new(ParseErrorKind::ExpectedDigit, cursor.pos()));
    }
    Ok(scan)
}

/// Parse an identifier: `[A-Za-z][A-Za-z0-9_-]*`.
fn get_identifier(cursor: Cursor<'_>) -> ParseResult<'_, Identifier> {
    match cursor.peek(0) {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier,
                cursor.pos(),
            ));
        }
    }
    let start = cursor.pos();
    let mut scan = cursor.bump();
    while let Some(c) = scan.peek(0) {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            scan = scan.bump();
        } else {
            break;
        }
    }
    Ok((Identifier::new(cursor.slice(start, scan.pos())), scan))
}

/// Require `expected` at the cursor and step past it.
fn expect_char(cursor: Cursor<'_>, expected: char) -> Result<Cursor<'_>, ParseError> {
    if cursor.peek(0) == Some(expected) {
        Ok(cursor.bump())
    } else {
        Err(ParseError::new(
            ParseErrorKind::ExpectedToken(expected),
            cursor.pos(),
        ))
    }
}

/// Skip inline blank: spaces only, never tabs or line ends.
fn skip_blank_inline(cursor: Cursor<'_>) -> Cursor<'_> {
    let mut cursor = cursor;
    while cursor.peek(0) == Some(' ') {
        cursor = cursor.bump();
    }
    cursor
}

/// Skip blank: spaces and line terminators, not tabs.
fn skip_blank(cursor: Cursor<'_>) -> Cursor<'_> {
    let mut cursor = cursor;
    while matches!(cursor.peek(0), Some(' ' | '\n' | '\r')) {
        cursor = cursor.bump();
    }
    cursor
}

/// Step past a single line terminator (`\n`, `\r\n`, or a lone `\r`).
fn skip_eol(cursor: Cursor<'_>) -> Cursor<'_> {
    let mut cursor = cursor;
    if cursor.peek(0) == Some('\r') {
        cursor = cursor.bump();
    }
    if cursor.peek(0) == Some('\n') {
        cursor = cursor.bump();
    }
    cursor
}

/// Consume the rest of the current line including its terminator.
fn consume_line(cursor: Cursor<'_>) -> Cursor<'_> {
    let mut scan = cursor;
    while !scan.is_eof() && !is_line_end(scan.current()) {
        scan = scan.bump();
    }
    skip_eol(scan)
}

/// Whether `c` terminates a line.
fn is_line_end(c: char) -> bool {
    c == '\n' || c == '\r'
}
