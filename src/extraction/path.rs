//! Path expressions and their resolution against a document.
//!
//! A path is a `.`-separated list of segments. Each segment is a key, optionally followed by a
//! bracket:
//!
//! - `key` looks the key up in the current mapping
//! - `key[N]` / `key[name]` looks the key up, then indexes (sequences) or looks up (mappings)
//! - `key[]` / `key[*]` iterates every element under the key (an *axis*)
//!
//! Leading and trailing `$`/`.` characters are ignored, so `$.a.b`, `$a.b` and `a.b` are the same
//! path. An empty key (`$[*].a`) refers to the current node itself.

use crate::types::Value;

use super::structure::Structure;

/// What follows a segment's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bracket {
    /// Plain key lookup.
    None,
    /// `[N]` or `[name]`: direct lookup of one element.
    Index(String),
    /// `[]` or `[*]`: iterate every element.
    Wildcard,
}

/// One `.`-separated piece of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: String,
    pub bracket: Bracket,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.contains("[]") || raw.contains("[*]") {
            return Self {
                key: raw.replace("[*]", "").replace("[]", ""),
                bracket: Bracket::Wildcard,
            };
        }

        if let (Some(open), true) = (raw.rfind('['), raw.ends_with(']')) {
            return Self {
                key: raw[..open].to_owned(),
                bracket: Bracket::Index(raw[open + 1..raw.len() - 1].to_owned()),
            };
        }

        Self {
            key: raw.to_owned(),
            bracket: Bracket::None,
        }
    }
}

/// A parsed path expression. The original text is kept for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    raw: String,
    segments: Vec<Segment>,
}

impl PathExpression {
    pub fn parse(raw: &str) -> Self {
        let body = raw.trim().trim_matches(|c| c == '$' || c == '.');
        let segments = if body.is_empty() {
            Vec::new()
        } else {
            body.split('.').map(Segment::parse).collect()
        };
        Self {
            raw: raw.to_owned(),
            segments,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Resolve the path against `root`.
    ///
    /// Resolution never fails: missing keys and indexes resolve to absent leaves, and a wildcard
    /// over a missing key resolves to an empty sequence.
    pub fn resolve(&self, root: &Value) -> Structure {
        resolve_segments(&self.segments, Some(root))
    }
}

// Recursion depth is bounded by the segment count; iteration over elements is a loop.
fn resolve_segments(segments: &[Segment], node: Option<&Value>) -> Structure {
    let Some((segment, rest)) = segments.split_first() else {
        return leaf(node);
    };

    let target = child(node, &segment.key);
    match &segment.bracket {
        Bracket::None => resolve_segments(rest, target),
        Bracket::Index(token) => resolve_segments(rest, child(target, token)),
        Bracket::Wildcard => match target {
            Some(Value::Sequence(items)) => Structure::Sequence(
                items
                    .iter()
                    .map(|item| resolve_segments(rest, Some(item)))
                    .collect(),
            ),
            // Loaders collapse single-element collections (e.g. one repeated XML element) into a
            // bare mapping; iterate it as a one-element sequence. An empty mapping (`{}`, `<items/>`)
            // is still one element, so it yields one row of absent leaves rather than none.
            Some(mapping @ Value::Mapping(_)) => Structure::Sequence(vec![resolve_segments(rest, Some(mapping))]),
            Some(_) | None => Structure::Sequence(Vec::new()),
        },
    }
}

fn child<'a>(node: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    let node = node?;
    if key.is_empty() {
        return Some(node);
    }
    match node {
        Value::Mapping(map) => map.get(key),
        Value::Sequence(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Null | Value::Bool(_) | Value::Int64(_) | Value::Float64(_) | Value::Utf8(_) => None,
    }
}

fn leaf(node: Option<&Value>) -> Structure {
    Structure::Leaf(node.map(|v| match v {
        Value::Utf8(s) => Value::Utf8(s.trim().to_owned()),
        other => other.clone(),
    }))
}

/// Rewrite `path` so it names the axis where a shape mismatch occurred.
///
/// The first `axis_indices.len()` wildcard markers are replaced by the concrete indices, in
/// order; the next marker is kept and everything after it is dropped. With no indices the path
/// is cut right after its first marker:
///
/// ```rust
/// use rust_data_extraction::extraction::path::reconstruct_mismatch_path;
///
/// assert_eq!(reconstruct_mismatch_path("$.a[*].b[].c", &[]), "$.a[*]");
/// assert_eq!(reconstruct_mismatch_path("$.a[*].b[].c", &[4]), "$.a[4].b[]");
/// ```
pub fn reconstruct_mismatch_path(path: &str, axis_indices: &[usize]) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    for idx in axis_indices {
        let Some((start, end)) = find_wildcard(rest) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&format!("[{idx}]"));
        rest = &rest[end..];
    }

    match find_wildcard(rest) {
        Some((_, end)) => out.push_str(&rest[..end]),
        None => out.push_str(rest),
    }
    out
}

/// Byte range of the leftmost `[]` or `[*]` marker.
fn find_wildcard(s: &str) -> Option<(usize, usize)> {
    let empty = s.find("[]").map(|i| (i, i + 2));
    let star = s.find("[*]").map(|i| (i, i + 3));
    match (empty, star) {
        (Some(a), Some(b)) => Some(if a.0 < b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}
