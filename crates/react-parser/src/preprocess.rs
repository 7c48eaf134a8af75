//! Lexical clean-up that runs before swc sees the text.
//!
//! Two passes, both string to string:
//! - [`remove_bad_code`] always runs and drops constructs that are common in
//!   React code bases but that swc's TypeScript grammar rejects.
//! - [`erase_flow_syntax`] runs for Flow-typed sources and blanks out the Flow
//!   spellings the TypeScript grammar does not share. It only ever replaces
//!   ASCII bytes with spaces, so every offset in its output matches its input.
//!
//! Both passes leave string literals, template literals and comments alone.

use tracing::trace;

/// Options for [`preprocess`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PreprocessOptions {
    /// The source carries Flow annotations.
    pub flow: bool,
}

/// Runs every enabled clean-up pass over `raw`.
pub fn preprocess(raw: &str, options: PreprocessOptions) -> String {
    let cleaned = remove_bad_code(raw);
    if options.flow {
        erase_flow_syntax(&cleaned)
    } else {
        cleaned
    }
}

/// Removes the byte-order mark, CRLF line endings and the prefix
/// function-bind operator (`::this.handle` becomes `this.handle`).
pub fn remove_bad_code(raw: &str) -> String {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let text = text.replace("\r\n", "\n");

    let bytes = text.as_bytes();
    let mask = code_mask(&text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if mask[i]
            && mask[i + 1]
            && bytes[i] == b':'
            && bytes[i + 1] == b':'
            && is_bind_operand_start(bytes.get(i + 2).copied())
            && !prev_code_byte(bytes, &mask, i).is_some_and(ends_operand)
        {
            trace!(offset = i, "dropping function-bind operator");
            out.push_str(&text[last..i]);
            last = i + 2;
            i += 2;
            continue;
        }
        i += 1;
    }
    out.push_str(&text[last..]);
    out
}

/// Blanks Flow-only syntax so the TypeScript grammar accepts the rest.
pub fn erase_flow_syntax(text: &str) -> String {
    let mask = code_mask(text);
    let src = text.as_bytes();
    let mut bytes = src.to_vec();

    blank_flow_pragmas(text, &mut bytes);

    let mut i = 0;
    while i < src.len() {
        if !mask[i] {
            i += 1;
            continue;
        }
        let rest = &src[i..];
        match src[i] {
            b'{' if rest.get(1) == Some(&b'|') => bytes[i + 1] = b' ',
            b'|' if rest.get(1) == Some(&b'}') => bytes[i] = b' ',
            b'%' if rest.starts_with(b"%checks") => blank(&mut bytes, i, i + 7),
            b'?' if matches!(prev_code_byte(&bytes, &mask, i), Some(b':' | b'<'))
                && is_type_start(rest.get(1).copied()) =>
            {
                bytes[i] = b' ';
            }
            b'+' | b'-'
                if matches!(prev_code_byte(&bytes, &mask, i), Some(b'{' | b',' | b';'))
                    && is_variance_target(&rest[1..]) =>
            {
                bytes[i] = b' ';
            }
            b'i' if rest.starts_with(b"import typeof ") && at_line_start(src, i) => {
                let end = statement_end(src, i);
                blank(&mut bytes, i, end);
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Blanks `// @flow` and `/* @flow */` comment lines.
fn blank_flow_pragmas(text: &str, bytes: &mut [u8]) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        let is_pragma = trimmed.contains("@flow")
            && (trimmed.starts_with("//")
                || (trimmed.starts_with("/*") && trimmed.ends_with("*/")));
        if is_pragma {
            let content_len = line.trim_end_matches('\n').len();
            blank(bytes, offset, offset + content_len);
        }
        offset += line.len();
    }
}

fn blank(bytes: &mut [u8], start: usize, end: usize) {
    let end = end.min(bytes.len());
    for byte in &mut bytes[start..end] {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}

/// Marks which bytes of `text` are code, as opposed to the inside of a
/// comment, string literal or the literal part of a template.
pub(crate) fn code_mask(text: &str) -> Vec<bool> {
    classify(text)
        .into_iter()
        .map(|class| class == ByteClass::Code)
        .collect()
}

/// For each line of `text`, in [`str::lines`] order, whether the line starts
/// inside a string or template literal.
///
/// Such a line is part of the literal's value: re-indenting it changes what
/// the program computes.
pub fn literal_line_starts(text: &str) -> Vec<bool> {
    let classes = classify(text);
    let mut starts = vec![false];
    starts.extend(
        text.bytes()
            .zip(classes)
            .filter(|(b, _)| *b == b'\n')
            .map(|(_, class)| class == ByteClass::Literal),
    );
    starts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    Code,
    Comment,
    Literal,
}

fn classify(text: &str) -> Vec<ByteClass> {
    #[derive(Clone, Copy)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Quote(u8),
        Template,
    }

    let bytes = text.as_bytes();
    let mut classes = vec![ByteClass::Comment; bytes.len()];
    let mut state = State::Code;
    // Brace depth at which each open `${` substitution started.
    let mut substitutions: Vec<usize> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match b {
                b'/' if next == Some(b'/') => {
                    state = State::LineComment;
                    i += 2;
                }
                b'/' if next == Some(b'*') => {
                    state = State::BlockComment;
                    i += 2;
                }
                b'\'' | b'"' => {
                    state = State::Quote(b);
                    classes[i] = ByteClass::Literal;
                    i += 1;
                }
                b'`' => {
                    state = State::Template;
                    classes[i] = ByteClass::Literal;
                    i += 1;
                }
                b'}' if substitutions.last() == Some(&depth) => {
                    substitutions.pop();
                    state = State::Template;
                    classes[i] = ByteClass::Literal;
                    i += 1;
                }
                _ => {
                    if b == b'{' {
                        depth += 1;
                    } else if b == b'}' {
                        depth = depth.saturating_sub(1);
                    }
                    classes[i] = ByteClass::Code;
                    i += 1;
                }
            },
            State::LineComment => {
                if b == b'\n' {
                    state = State::Code;
                    classes[i] = ByteClass::Code;
                }
                i += 1;
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = State::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            State::Quote(quote) => {
                if b == b'\\' {
                    mark_literal(&mut classes, i, i + 2);
                    i += 2;
                    continue;
                }
                // An unterminated quote (an apostrophe in JSX text) ends at the line.
                if b == b'\n' {
                    state = State::Code;
                    classes[i] = ByteClass::Code;
                } else {
                    if b == quote {
                        state = State::Code;
                    }
                    classes[i] = ByteClass::Literal;
                }
                i += 1;
            }
            State::Template => {
                if b == b'\\' {
                    mark_literal(&mut classes, i, i + 2);
                    i += 2;
                } else if b == b'$' && next == Some(b'{') {
                    substitutions.push(depth);
                    state = State::Code;
                    mark_literal(&mut classes, i, i + 2);
                    i += 2;
                } else {
                    if b == b'`' {
                        state = State::Code;
                    }
                    classes[i] = ByteClass::Literal;
                    i += 1;
                }
            }
        }
    }

    classes
}

fn mark_literal(classes: &mut [ByteClass], start: usize, end: usize) {
    let end = end.min(classes.len());
    for class in &mut classes[start..end] {
        *class = ByteClass::Literal;
    }
}

fn prev_code_byte(bytes: &[u8], mask: &[bool], before: usize) -> Option<u8> {
    (0..before)
        .rev()
        .find(|&j| mask[j] && !bytes[j].is_ascii_whitespace())
        .map(|j| bytes[j])
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_bind_operand_start(b: Option<u8>) -> bool {
    b.is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'$')
}

fn ends_operand(b: u8) -> bool {
    is_ident_byte(b) || b == b')' || b == b']'
}

fn is_type_start(b: Option<u8>) -> bool {
    b.is_some_and(|b| is_ident_byte(b) || matches!(b, b'(' | b'{' | b'['))
}

/// `name:` or `name?:` following a variance sigil.
fn is_variance_target(rest: &[u8]) -> bool {
    let ident_len = rest.iter().take_while(|&&b| is_ident_byte(b)).count();
    if ident_len == 0 || rest[0].is_ascii_digit() {
        return false;
    }
    let mut tail = &rest[ident_len..];
    if tail.first() == Some(&b'?') {
        tail = &tail[1..];
    }
    let spaces = tail.iter().take_while(|b| **b == b' ').count();
    tail.get(spaces) == Some(&b':')
}

fn at_line_start(bytes: &[u8], at: usize) -> bool {
    bytes[..at]
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n')
        .all(|b| b.is_ascii_whitespace())
}

/// End of a single-line statement: just past its `;`, or the end of the line.
fn statement_end(bytes: &[u8], from: usize) -> usize {
    let line_end = bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p);
    bytes[from..line_end]
        .iter()
        .position(|&b| b == b';')
        .map_or(line_end, |p| from + p + 1)
}
