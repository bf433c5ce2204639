use std::fmt;

/// Identity of a cached fetch: the resource plus an optional entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List,
    Entity(String),
}

impl QueryKey {
    pub fn entity(id: impl Into<String>) -> Self {
        Self::Entity(id.into())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::List => write!(f, "list"),
            QueryKey::Entity(id) => write!(f, "entity:{}", id),
        }
    }
}
