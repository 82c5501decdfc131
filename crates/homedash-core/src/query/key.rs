use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Composite cache key: query kind, optional target, extra parameters.
///
/// Two keys are equal iff all three parts are equal, so changing a tile's
/// target URL produces a fresh entry and the old one ages out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: &'static str,
    pub target: Option<Url>,
    pub params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(kind: &'static str, target: Option<Url>) -> Self {
        Self {
            kind,
            target,
            params: BTreeMap::new(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind)?;
        if let Some(target) = &self.target {
            write!(f, "@{target}")?;
        }
        for (name, value) in &self.params {
            write!(f, ";{name}={value}")?;
        }
        Ok(())
    }
}
