//! Template compilation.
//!
//! # Responsibilities
//! - Substitute dialect tokens with their regex equivalents
//! - Anchor the result so only full paths match
//! - Fall back to a literal match for unbalanced segment templates

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

/// Expansion of a glob `*`: any run of characters, `/` included.
const ANY_RUN: &str = ".*";

/// Expansion of a segment `{name}`: a non-empty run without `/`.
const SEGMENT_RUN: &str = "[^/]+";

/// Token syntax used by exception templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// `*` matches anything, across path separators.
    Glob,
    /// `{name}` matches a single path segment.
    #[default]
    Segment,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Glob => "glob",
            Dialect::Segment => "segment",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glob" => Ok(Dialect::Glob),
            "segment" => Ok(Dialect::Segment),
            other => Err(format!("unknown dialect {:?} (expected \"glob\" or \"segment\")", other)),
        }
    }
}

/// A template that produced an invalid regular expression.
#[derive(Debug, Error)]
#[error("invalid exception pattern {template:?}: {source}")]
pub struct PatternError {
    pub template: String,
    #[source]
    pub source: regex::Error,
}

/// Anchored matcher compiled from one exception template.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    template: String,
    literal: bool,
    regex: Regex,
}

impl CompiledMatcher {
    /// Compile `template` under `dialect`.
    ///
    /// Segment templates with an unmatched `{` or `}` are matched literally.
    /// Any other regex syntax in the template is passed through as-is, so a
    /// template such as `/v1/(` fails here.
    pub fn compile(template: &str, dialect: Dialect) -> Result<Self, PatternError> {
        let (body, literal) = match dialect {
            Dialect::Glob => (template.replace('*', ANY_RUN), false),
            Dialect::Segment => match expand_placeholders(template) {
                Some(body) => (body, false),
                None => (regex::escape(template), true),
            },
        };

        // The group keeps both anchors on the whole body, even when the
        // template carries an alternation.
        let regex = Regex::new(&format!("^(?:{})$", body)).map_err(|source| PatternError {
            template: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            literal,
            regex,
        })
    }

    /// Returns true if the whole of `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The template as configured.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The anchored expression the template compiled to.
    pub fn expression(&self) -> &str {
        self.regex.as_str()
    }

    /// True when the template was malformed and is matched verbatim.
    pub fn is_literal(&self) -> bool {
        self.literal
    }
}

impl fmt::Display for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

/// Replace every `{...}` span with [`SEGMENT_RUN`].
///
/// Returns `None` when braces are unbalanced: a `}` before any `{`, or a
/// `{` with no later `}`.
fn expand_placeholders(template: &str) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        let (head, tail) = rest.split_at(pos);
        if tail.starts_with('}') {
            return None;
        }
        let close = tail.find('}')?;
        out.push_str(head);
        out.push_str(SEGMENT_RUN);
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    Some(out)
}
