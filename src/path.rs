//! Dotted/bracketed paths into schema values and error trees.
//!
//! Paths look like `schema.fields[0].type[1].name`: object keys separated by
//! dots, array positions in brackets.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key, like `fields` or `name`
    Key(String),
    /// Array position
    Index(usize),
}

impl FieldPath {
    /// Create an empty path addressing the root value
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Extend the path with an object key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Extend the path with an array position.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Parse a path. The empty string is the root path.
    pub fn parse(path: &str) -> Result<Self, SchemaError> {
        let mut segments = Vec::new();
        let mut rest = path;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let end = after
                    .find(']')
                    .ok_or_else(|| SchemaError::invalid_path(path, "unterminated '['"))?;
                let index = after[..end]
                    .parse::<usize>()
                    .map_err(|_| SchemaError::invalid_path(path, "array index must be a number"))?;
                segments.push(PathSegment::Index(index));
                rest = &after[end + 1..];
            } else {
                let key_part = if segments.is_empty() {
                    rest
                } else {
                    rest.strip_prefix('.').ok_or_else(|| {
                        SchemaError::invalid_path(path, "expected '.' or '[' between segments")
                    })?
                };
                let end = key_part.find(['.', '[', ']']).unwrap_or(key_part.len());
                if end == 0 {
                    return Err(SchemaError::invalid_path(path, "empty key"));
                }
                segments.push(PathSegment::Key(key_part[..end].to_string()));
                rest = &key_part[end..];
            }
        }
        Ok(FieldPath(segments))
    }
}

impl FromStr for FieldPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
