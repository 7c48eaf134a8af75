//! Re-indentation of verbatim source slices.
//!
//! Slices keep the indentation they had in the React file. Every helper here
//! works on text whose first line starts at column zero and whose later lines
//! carry their original absolute indentation. Lines that continue a string
//! or template literal keep their bytes.

use react_parser::literal_line_starts;

/// Removes the common indentation of every line after the first.
pub fn dedent_tail(text: &str) -> String {
    let lines = split_lines(text);
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };
    let common = common_indent(rest);

    let mut out = first.trimmed().to_string();
    for line in rest {
        out.push('\n');
        out.push_str(outdent(line, common));
    }
    out
}

/// Prefixes every non-blank line with `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    split_lines(text)
        .iter()
        .map(|line| {
            if line.in_literal {
                line.text.to_string()
            } else if line.text.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{}", line.text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The statements of a `{ ... }` block, one entry per line, outdented to
/// column zero. `None` if `text` is not a brace-delimited block.
pub fn block_lines(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('{')?.strip_suffix('}')?;
    let lines = split_lines(inner);
    let Some(first) = lines.iter().position(|line| !line.is_blank()) else {
        return Some(Vec::new());
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_blank())
        .unwrap_or(first);
    let body = &lines[first..=last];
    let common = common_indent(body);

    Some(
        body.iter()
            .map(|line| outdent(line, common).to_string())
            .collect(),
    )
}

/// A function-like member: `header { ...body }` with the body re-indented.
///
/// `prelude` lines run before the body's own statements.
pub fn function_block(header: &str, prelude: &[String], body: &str) -> String {
    let Some(mut lines) = block_lines(body) else {
        return format!("{header} {}", dedent_tail(body));
    };
    if !prelude.is_empty() {
        let mut with_prelude = prelude.to_vec();
        with_prelude.append(&mut lines);
        lines = with_prelude;
    }
    if lines.is_empty() {
        return format!("{header} {{}}");
    }
    format!("{header} {{\n{}\n}}", indent(&lines.join("\n"), 2))
}

/// A named object-literal section: `name: {\n  entries\n}`.
pub fn object_section(name: &str, entries: &[String]) -> String {
    format!("{name}: {{\n{}\n}}", indent(&entries.join(",\n"), 2))
}

/// A line of a slice. Lines that start inside a string or template literal
/// are part of its value and are never re-indented.
struct Line<'a> {
    text: &'a str,
    in_literal: bool,
    /// The line break ending this line belongs to a literal.
    continues_literal: bool,
}

impl<'a> Line<'a> {
    fn trimmed(&self) -> &'a str {
        if self.continues_literal {
            self.text
        } else {
            self.text.trim_end()
        }
    }

    fn is_blank(&self) -> bool {
        !self.in_literal && self.text.trim().is_empty()
    }
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let starts = literal_line_starts(text);
    text.lines()
        .enumerate()
        .map(|(n, text)| Line {
            text,
            in_literal: starts.get(n).copied().unwrap_or(false),
            continues_literal: starts.get(n + 1).copied().unwrap_or(false),
        })
        .collect()
}

fn outdent<'a>(line: &Line<'a>, common: usize) -> &'a str {
    if line.in_literal {
        line.trimmed()
    } else if line.is_blank() {
        ""
    } else {
        &line.trimmed()[common..]
    }
}

fn common_indent(lines: &[Line<'_>]) -> usize {
    lines
        .iter()
        .filter(|line| !line.is_blank() && !line.in_literal)
        .map(|line| line.text.len() - line.text.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0)
}
