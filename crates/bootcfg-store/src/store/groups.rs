use crate::error::{Result, StoreError};
use crate::model::Group;
use std::collections::HashMap;

/// Immutable id -> group map, built once from the configured groups.
///
/// When the same id is supplied twice the later group wins.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, Group>,
}

impl GroupRegistry {
    pub fn new(groups: impl IntoIterator<Item = Group>) -> Self {
        let groups = groups
            .into_iter()
            .map(|group| (group.id.clone(), group))
            .collect();
        Self { groups }
    }

    pub fn get(&self, id: &str) -> Result<Group> {
        self.groups
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::GroupNotFound(id.to_string()))
    }

    /// All groups, in no particular order.
    pub fn list(&self) -> Vec<Group> {
        self.groups.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_configured_group() {
        let group = Group::new("node1", "etcd").with_selector("mac", "52:54:00:89:d8:10");
        let registry = GroupRegistry::new(vec![group.clone()]);
        assert_eq!(registry.get("node1").unwrap(), group);
    }

    #[test]
    fn test_get_unknown_group() {
        let registry = GroupRegistry::new(vec![Group::new("node1", "etcd")]);
        match registry.get("node2") {
            Err(StoreError::GroupNotFound(id)) => assert_eq!(id, "node2"),
            other => panic!("Expected GroupNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let registry = GroupRegistry::new(vec![
            Group::new("node1", "first"),
            Group::new("node1", "second"),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("node1").unwrap().profile, "second");
    }

    #[test]
    fn test_list_contains_every_group() {
        let registry = GroupRegistry::new(vec![
            Group::new("a", "p"),
            Group::new("b", "p"),
            Group::new("c", "p"),
        ]);
        let mut ids: Vec<_> = registry.list().into_iter().map(|g| g.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = GroupRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }
}
