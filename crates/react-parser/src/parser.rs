//! swc front end configured for React component sources.

use crate::error::{ParseError, ParseErrorKind};
use source_text::{LineIndex, Span};
use swc_common::comments::{Comment, Comments, SingleThreadedComments};
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Span as SwcSpan, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use tracing::debug;

/// A parsed component source.
///
/// Holds the swc module, the comment table the lexer filled, and the cleaned
/// text both were produced from. All slicing goes through the helpers here so
/// callers never deal with swc's file-relative `BytePos` values directly.
pub struct ParsedModule {
    /// The syntax tree.
    pub module: Module,
    /// Leading/trailing comments keyed by swc position.
    pub comments: SingleThreadedComments,
    source: String,
    file_start: BytePos,
}

impl ParsedModule {
    /// The cleaned text the tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset into [`Self::source`] for an swc position.
    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.file_start.0) as usize
    }

    /// The swc position for a byte offset into [`Self::source`].
    pub fn byte_pos(&self, offset: usize) -> BytePos {
        BytePos(self.file_start.0 + offset as u32)
    }

    /// Converts an swc span to a span into [`Self::source`].
    pub fn span(&self, span: SwcSpan) -> Span {
        Span::from_offsets(self.offset(span.lo), self.offset(span.hi))
    }

    /// The source text an swc span covers.
    pub fn text(&self, span: SwcSpan) -> &str {
        self.span(span).slice(&self.source).unwrap_or_default()
    }

    /// Source text of the comments attached before `pos`.
    pub fn leading_comments(&self, pos: BytePos) -> Vec<String> {
        self.comment_texts(self.comments.get_leading(pos))
    }

    /// Source text of the comments attached after `pos`.
    pub fn trailing_comments(&self, pos: BytePos) -> Vec<String> {
        self.comment_texts(self.comments.get_trailing(pos))
    }

    fn comment_texts(&self, comments: Option<Vec<Comment>>) -> Vec<String> {
        comments
            .unwrap_or_default()
            .iter()
            .map(|comment| self.text(comment.span).to_string())
            .collect()
    }
}

/// Parses cleaned source text into a module.
///
/// Errors swc recovers from are still reported: a tree built around a
/// syntax error would be translated into wrong output.
pub fn parse(source: String) -> Result<ParsedModule, ParseError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom("component.tsx".into()).into(),
        source.clone(),
    );
    let file_start = fm.start_pos;
    let line_index = LineIndex::new(&source);
    let comments = SingleThreadedComments::default();

    let result = {
        let lexer = Lexer::new(
            syntax(),
            EsVersion::EsNext,
            StringInput::from(&*fm),
            Some(&comments),
        );
        let mut parser = Parser::new_from(lexer);
        let module = parser.parse_module();
        module.map(|module| (module, parser.take_errors()))
    };

    let to_error = |err: swc_ecma_parser::error::Error, recovered: bool| {
        let lo = err.span().lo.0.saturating_sub(file_start.0) as usize;
        let hi = err.span().hi.0.saturating_sub(file_start.0) as usize;
        let span = Span::from_offsets(lo, hi.max(lo));
        let message = err.kind().msg().to_string();
        let kind = if recovered {
            ParseErrorKind::Recovered { message }
        } else {
            ParseErrorKind::Syntax { message }
        };
        let position = line_index.line_col(span.start).unwrap_or_default();
        ParseError::new(kind, span, position)
    };

    let module = match result {
        Ok((module, recovered)) => {
            if let Some(err) = recovered.into_iter().next() {
                return Err(to_error(err, true));
            }
            module
        }
        Err(err) => return Err(to_error(err, false)),
    };

    debug!(items = module.body.len(), "parsed component module");

    Ok(ParsedModule {
        module,
        comments,
        source,
        file_start,
    })
}

/// TypeScript with TSX and decorators. Flow input reaches this grammar after
/// [`crate::erase_flow_syntax`]; plain JavaScript is a subset of it.
fn syntax() -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: true,
        decorators: true,
        no_early_errors: true,
        ..Default::default()
    })
}
