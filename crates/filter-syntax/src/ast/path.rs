use crate::errors::SyntaxError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref SEGMENT_RE: Regex =
        Regex::new(r"^([A-Za-z_]\w*)(?:\[([^\]]*)\])?$").expect("valid segment regex");
}

/// One dotted component of a path, e.g. `items[0]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn field(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: None,
        }
    }

    pub fn indexed(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index: Some(index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Dot-separated property path (e.g., `customer.email`, `orders.items[0].price`)
///
/// The empty path denotes the value currently in focus, which is how a
/// quantifier's sub-filter refers to the collection element itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    pub segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn parse(path: &str) -> Result<Self, SyntaxError> {
        if path.is_empty() {
            return Ok(Self::default());
        }

        let segments = path
            .split('.')
            .map(|raw| parse_segment(raw).map_err(|reason| SyntaxError::malformed_path(path, reason)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The path made of the segments from `start` onwards.
    pub fn tail(&self, start: usize) -> PropertyPath {
        PropertyPath {
            segments: self.segments.get(start..).unwrap_or_default().to_vec(),
        }
    }
}

fn parse_segment(raw: &str) -> Result<PathSegment, String> {
    if raw.is_empty() {
        return Err("empty path segment".to_string());
    }

    let caps = SEGMENT_RE
        .captures(raw)
        .ok_or_else(|| format!("invalid path segment '{raw}'"))?;

    let name = &caps[1];
    match caps.get(2) {
        Some(index) => Ok(PathSegment::indexed(name, parse_index(index.as_str())?)),
        None => Ok(PathSegment::field(name)),
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    if raw.trim_start().starts_with('-') {
        return Err(format!("negative index [{raw}]"));
    }
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("index [{raw}] is not a non-negative integer"));
    }
    raw.parse::<usize>()
        .map_err(|_| format!("index [{raw}] is not a non-negative integer"))
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .segments
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{rendered}")
    }
}

impl std::str::FromStr for PropertyPath {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_path() {
        let path = PropertyPath::parse("customer.email").unwrap();
        assert_eq!(
            path.segments,
            vec![PathSegment::field("customer"), PathSegment::field("email")]
        );
    }

    #[test]
    fn test_parse_indexed_path() {
        let path = PropertyPath::parse("orders.items[0].price").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments[1], PathSegment::indexed("items", 0));
        assert_eq!(path.to_string(), "orders.items[0].price");
    }

    #[test]
    fn test_empty_path_is_the_focus() {
        let path = PropertyPath::parse("").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_tail() {
        let path = PropertyPath::parse("a.b[2].c").unwrap();
        assert_eq!(path.tail(1).to_string(), "b[2].c");
        assert!(path.tail(3).is_empty());
        assert!(path.tail(7).is_empty());
    }

    #[test]
    fn test_malformed_paths() {
        for bad in ["a..b", ".a", "a.", "a[x]", "a[]", "a[1", "a[1][2]", "1abc", "a b"] {
            let err = PropertyPath::parse(bad).unwrap_err();
            assert!(
                matches!(err, SyntaxError::MalformedPath { .. }),
                "expected malformed path for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_negative_index_is_rejected() {
        let err = PropertyPath::parse("items[-1]").unwrap_err();
        assert!(err.to_string().contains("negative index"));
    }

    #[test]
    fn test_signed_or_padded_index_is_rejected() {
        for bad in ["items[+1]", "items[ 1]", "items[1 ]"] {
            let err = PropertyPath::parse(bad).unwrap_err();
            assert!(err.to_string().contains("not a non-negative integer"), "{bad}: {err}");
        }
        assert_eq!(PropertyPath::parse("items[007]").unwrap().segments[0].index, Some(7));
    }
}
