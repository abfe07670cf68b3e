use std::fmt;

/// Qualified name of a C++ record or template.
///
/// Used as the identity key for record declarations and for the
/// string-class table during default-value extraction.
///
/// # Examples
///
/// ```
/// use cxx_reflect::QualifiedName;
///
/// // Global namespace
/// let point = QualifiedName::global("Point");
/// assert_eq!(point.to_string(), "Point");
///
/// // With namespace
/// let vector = QualifiedName::new("vector", vec!["std".into()]);
/// assert_eq!(vector.to_string(), "std::vector");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "vector", "QString")
    pub name: String,
    /// Namespace path (e.g., ["std", "__cxx11"])
    /// Empty for the global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "std::vector").
    ///
    /// Splits on "::" - the last segment is the name, rest is namespace.
    /// Leading "::" (absolute path) is normalized: "::std::vector" ==
    /// "std::vector".
    pub fn from_qualified_string(s: &str) -> Self {
        let parts: Vec<&str> = s.split("::").filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [] => Self::global(""),
            [only] => Self::global(*only),
            [namespace @ .., name] => Self {
                name: (*name).to_string(),
                namespace: namespace.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
