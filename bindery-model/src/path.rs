//! Field paths: where a bound field lives inside an external tree.
//!
//! Paths use dotted keys with optional bracketed segments, e.g.
//! `profile.full_name`, `others.roles[0]`, `meta["a.b"]`. A segment written
//! as a canonical decimal is an index. The empty path addresses the whole
//! tree.

use serde_json::{Map, Value};
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Canonical decimals ("0", "12", not "012") are indices.
    fn parse(raw: &str) -> Self {
        let canonical = match raw.as_bytes() {
            [b'0'] => true,
            [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
            _ => false,
        };
        match raw.parse() {
            Ok(i) if canonical => Self::Index(i),
            _ => Self::Key(raw.to_string()),
        }
    }

    fn key(&self) -> String {
        match self {
            Self::Key(k) => k.clone(),
            Self::Index(i) => i.to_string(),
        }
    }

    /// Empty container to create when this segment is written into nothing.
    fn empty_container(&self) -> Value {
        match self {
            Self::Index(_) => Value::Array(Vec::new()),
            Self::Key(_) => Value::Object(Map::new()),
        }
    }
}

/// A parsed location inside a JSON tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The path addressing the whole tree.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a path. Never fails: an unterminated bracket is kept as a
    /// literal key.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        if path.is_empty() {
            return Self { segments };
        }

        let mut rest = path;
        loop {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let key = &rest[..end];
            rest = &rest[end..];
            // "[0]" and "a.[0]" carry no key before the bracket.
            if !key.is_empty() || !rest.starts_with('[') {
                segments.push(Segment::parse(key));
            }

            while rest.starts_with('[') {
                match bracket_contents(&rest[1..]) {
                    Some((segment, consumed)) => {
                        segments.push(segment);
                        rest = &rest[1 + consumed..];
                    }
                    None => {
                        segments.push(Segment::Key(rest.to_string()));
                        rest = "";
                    }
                }
            }

            match rest.strip_prefix('.') {
                Some(tail) => rest = tail,
                None => break,
            }
        }
        Self { segments }
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Reads the value at this path, `None` when any step is missing.
    pub fn read<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(tree, |node, segment| match (node, segment) {
                (Value::Object(map), segment) => map.get(&segment.key()),
                (Value::Array(items), Segment::Index(i)) => items.get(*i),
                _ => None,
            })
    }

    /// Writes `value` at this path, creating intermediate containers.
    ///
    /// The root path replaces the whole tree. Scalars in the way are replaced
    /// by a container, arrays are padded with `null` up to a written index,
    /// and an index applied to an object writes its decimal key.
    pub fn write(&self, tree: &mut Value, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            *tree = value;
            return;
        };

        let mut node = tree;
        for (i, segment) in parents.iter().enumerate() {
            let child = slot_mut(node, segment);
            if !(child.is_object() || child.is_array()) {
                *child = self.segments[i + 1].empty_container();
            }
            node = child;
        }
        *slot_mut(node, last) = value;
    }
}

/// Parses the inside of a bracket, `rest` starting right after `[`. Returns
/// the segment and the bytes consumed, closing `]` included.
fn bracket_contents(rest: &str) -> Option<(Segment, usize)> {
    if let Some(quote) = rest.chars().next().filter(|c| matches!(c, '"' | '\'')) {
        let close = rest[1..].find(quote)? + 1;
        return rest[close + 1..]
            .starts_with(']')
            .then(|| (Segment::Key(rest[1..close].to_string()), close + 2));
    }
    let end = rest.find(']')?;
    Some((Segment::parse(rest[..end].trim()), end + 1))
}

/// The slot for `segment` inside `node`, turning `node` into a container first
/// when it cannot address the segment.
fn slot_mut<'a>(node: &'a mut Value, segment: &Segment) -> &'a mut Value {
    let addressable = match (&*node, segment) {
        (Value::Object(_), _) => true,
        (Value::Array(_), Segment::Index(_)) => true,
        _ => false,
    };
    if !addressable {
        *node = segment.empty_container();
    }

    match (node, segment) {
        (Value::Array(items), Segment::Index(i)) => {
            if items.len() <= *i {
                items.resize(*i + 1, Value::Null);
            }
            &mut items[*i]
        }
        (Value::Object(map), segment) => map.entry(segment.key()).or_insert(Value::Null),
        // Unreachable: `node` was made addressable above.
        (node, _) => node,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(n) => write!(f, "[{n}]")?,
                Segment::Key(k) if needs_brackets(k) => {
                    let quote = if k.contains('"') { '\'' } else { '"' };
                    write!(f, "[{quote}{k}{quote}]")?;
                }
                Segment::Key(k) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
            }
        }
        Ok(())
    }
}

/// Keys that would not parse back as the same plain key.
fn needs_brackets(key: &str) -> bool {
    key.is_empty()
        || key.contains(['.', '['])
        || !matches!(Segment::parse(key), Segment::Key(_))
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}
