use std::fmt;

/// Case-normalized function name used as the resolution key.
///
/// Construction lower-cases the input, so `QualifiedName::new("SUM")` and
/// `QualifiedName::new("sum")` are equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
