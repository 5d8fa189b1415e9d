//! Class id to species name mapping.

use std::collections::{BTreeSet, HashMap};

/// Ordered bijection between classifier output ids and species names.
///
/// Ids are assigned by sorting the distinct names, so the same label source
/// always yields the same mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesIndex {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl SpeciesIndex {
    /// Build an index from species names in any order, with duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();
        Self { names, ids }
    }

    /// Species name for a class id.
    pub fn id_to_name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Class id for a species name (exact match).
    pub fn name_to_id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index has no species.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_sorted_order() {
        let index = SpeciesIndex::from_names(["Monarch", "Adonis", "Viceroy", "Monarch"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.id_to_name(0), Some("Adonis"));
        assert_eq!(index.id_to_name(1), Some("Monarch"));
        assert_eq!(index.id_to_name(2), Some("Viceroy"));
        assert_eq!(index.id_to_name(3), None);
    }

    #[test]
    fn test_round_trip_for_every_name() {
        let names = [
            "Red Admiral",
            "An 88",
            "Zebra Long Wing",
            "Adonis Blue",
            "Adonis",
            "Skipper",
        ];
        let index = SpeciesIndex::from_names(names);
        for name in names {
            let id = index.name_to_id(name);
            assert!(id.is_some(), "{name} missing from index");
            assert_eq!(id.and_then(|id| index.id_to_name(id)), Some(name));
        }
    }

    #[test]
    fn test_mapping_independent_of_input_order() {
        let a = SpeciesIndex::from_names(["Peacock", "Julia", "Crescent"]);
        let b = SpeciesIndex::from_names(["Crescent", "Peacock", "Julia", "Julia"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_byte_order_sorting() {
        // Uppercase sorts before lowercase, as with plain string comparison.
        let index = SpeciesIndex::from_names(["adonis", "Zebra"]);
        assert_eq!(index.id_to_name(0), Some("Zebra"));
        assert_eq!(index.name_to_id("adonis"), Some(1));
    }

    #[test]
    fn test_unknown_name() {
        let index = SpeciesIndex::from_names(["Monarch"]);
        assert_eq!(index.name_to_id("monarch"), None);
        assert!(!index.is_empty());
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![(0, "Monarch")]);
    }
}
