//! Declared type tokens of interface members.
//!
//! Tokens are read off the member's source text with a name-prefixed
//! pattern. Nothing here understands types: anything that is not a single
//! bare token (unions, generics, object literals, arrays) yields no token,
//! and the caller falls back to an always-pass validator.

use regex::Regex;
use tracing::trace;

/// Reads the declared type token of one interface member.
pub trait TypeTokenExtractor {
    /// The bare type token declared for `name` in `member_text`, if any.
    fn extract(&self, name: &str, member_text: &str) -> Option<String>;
}

/// Extracts tokens by pattern-matching the member's source slice:
/// `name?: token;` yields `token`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSliceExtractor;

impl TypeTokenExtractor for TextSliceExtractor {
    fn extract(&self, name: &str, member_text: &str) -> Option<String> {
        let pattern = format!(
            r#"^(?:readonly\s+)?["']?{}["']?\??\s*:\s*(\S+?)\s*[;,]?$"#,
            regex::escape(name)
        );
        let re = Regex::new(&pattern).ok()?;
        let token = re
            .captures(member_text.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        trace!(name, ?token, "type token");
        token
    }
}
