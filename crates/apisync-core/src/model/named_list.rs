use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::errors::{ApiSyncError, Result};

/// An entity addressable by name inside its owner's collection
pub trait Named {
    /// Singular label used in diagnostics, e.g. `"module"`
    const KIND: &'static str;

    fn name(&self) -> &str;
}

/// Order-preserving collection keyed by name
///
/// Items live in a backing `Vec` (the order the owner exposes and persists);
/// a `name -> position` index serves lookups. Items with an empty name are
/// kept in order but not indexed, so validation can still report them.
#[derive(Debug, Clone)]
pub struct NamedList<T> {
    items: Vec<T>,
    index: BTreeMap<String, usize>,
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T: Named> NamedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// `DuplicateName` when two non-empty names collide.
    pub fn try_from_vec(items: Vec<T>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (pos, item) in items.iter().enumerate() {
            if item.name().is_empty() {
                continue;
            }
            if index.insert(item.name().to_string(), pos).is_some() {
                return Err(ApiSyncError::DuplicateName {
                    collection: T::KIND.to_string(),
                    name: item.name().to_string(),
                });
            }
        }
        Ok(Self { items, index })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&pos| &self.items[pos])
    }

    /// Mutable access to one item. Renaming through this reference is not
    /// reflected in the index.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(name) {
            Some(&pos) => self.items.get_mut(pos),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Overwrite the item with the same name in place, or append it.
    ///
    /// Returns the replaced item, if any.
    pub fn insert(&mut self, item: T) -> Option<T> {
        if let Some(&pos) = self.index.get(item.name()) {
            return Some(std::mem::replace(&mut self.items[pos], item));
        }
        if !item.name().is_empty() {
            self.index.insert(item.name().to_string(), self.items.len());
        }
        self.items.push(item);
        None
    }

    /// Remove by name, keeping the relative order of the remaining items
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let pos = self.index.remove(name)?;
        let removed = self.items.remove(pos);
        self.reindex();
        Some(removed)
    }

    /// Stable ascending sort by name (byte order, case-sensitive)
    pub fn re_order(&mut self) {
        self.items.sort_by(|a, b| a.name().cmp(b.name()));
        self.reindex();
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(Named::name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.name().is_empty())
            .map(|(pos, item)| (item.name().to_string(), pos))
            .collect();
    }
}

/// Later items replace earlier items with the same name.
impl<T: Named> FromIterator<T> for NamedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a NamedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: PartialEq> PartialEq for NamedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Serialize> Serialize for NamedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Named + Deserialize<'de>> Deserialize<'de> for NamedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::try_from_vec(items).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        value: u32,
    }

    impl Named for Item {
        const KIND: &'static str = "item";

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn item(name: &str, value: u32) -> Item {
        Item {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_insert_appends_then_replaces_in_place() {
        let mut list = NamedList::new();
        assert!(list.insert(item("b", 1)).is_none());
        assert!(list.insert(item("a", 1)).is_none());

        let replaced = list.insert(item("b", 2));
        assert_eq!(replaced, Some(item("b", 1)));
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(list.get("b").map(|i| i.value), Some(2));
    }

    #[test]
    fn test_remove_keeps_index_consistent() {
        let mut list: NamedList<Item> =
            vec![item("a", 1), item("b", 2), item("c", 3)].into_iter().collect();

        assert_eq!(list.remove("a"), Some(item("a", 1)));
        assert_eq!(list.position("b"), Some(0));
        assert_eq!(list.position("c"), Some(1));
        assert!(list.remove("a").is_none());
    }

    #[test]
    fn test_re_order_is_case_sensitive_and_stable() {
        let mut list: NamedList<Item> =
            vec![item("b", 1), item("B", 2), item("a", 3)].into_iter().collect();
        list.re_order();
        assert_eq!(list.names().collect::<Vec<_>>(), vec!["B", "a", "b"]);
        assert_eq!(list.get("a").map(|i| i.value), Some(3));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = NamedList::try_from_vec(vec![item("a", 1), item("a", 2)]).unwrap_err();
        assert_eq!(
            err,
            ApiSyncError::DuplicateName {
                collection: "item".to_string(),
                name: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_unnamed_items_kept_but_not_indexed() {
        let list = NamedList::try_from_vec(vec![item("", 1), item("", 2), item("x", 3)]).unwrap();
        assert_eq!(list.len(), 3);
        assert!(!list.contains(""));
        assert_eq!(list.position("x"), Some(2));
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[{"name":"a","value":1},{"name":"a","value":2}]"#;
        let result: std::result::Result<NamedList<Item>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
