/// The downtime causes recognized for the running session.
///
/// Loaded from `downtime_causes` at startup and handed explicitly to the
/// upsert engine; `CauseLogic::add` extends both the table and this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CauseCatalog {
    causes: Vec<String>,
}

impl CauseCatalog {
    pub fn new<I, S>(causes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for c in causes {
            catalog.push(c.into());
        }
        catalog
    }

    pub fn contains(&self, cause: &str) -> bool {
        self.causes.iter().any(|c| c == cause)
    }

    /// Append a cause, keeping insertion order. Returns false if already known.
    pub fn push(&mut self, cause: String) -> bool {
        if self.contains(&cause) {
            return false;
        }
        self.causes.push(cause);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.causes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}
