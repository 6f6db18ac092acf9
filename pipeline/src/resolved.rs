use crate::{ConfigurationError, HashMap};

/// Every role value resolved for one item.
///
/// Values are never empty; a role is either present with a value or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    values: HashMap<&'static str, String>,
}

impl ResolvedPaths {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add a role value. Empty values are rejected.
    pub fn insert(&mut self, role: &'static str, value: String) -> Result<(), ConfigurationError> {
        if value.is_empty() {
            return Err(ConfigurationError::EmptyValue(role.to_owned()));
        }
        self.values.insert(role, value);
        Ok(())
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.values.get(role).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rejects_empty_value() {
        let mut resolved = ResolvedPaths::default();
        assert!(resolved.insert("dem", String::new()).is_err());
        assert_eq!(resolved.get("dem"), None);
        assert!(resolved.is_empty());
        resolved.insert("dem", "/data/dem.dem".to_owned()).unwrap();
        assert_eq!(resolved.get("dem"), Some("/data/dem.dem"));
        assert_eq!(resolved.len(), 1);
    }
}
