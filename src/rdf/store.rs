//! Ordered in-memory triple store
//!
//! Statements keep their insertion order; that order is the serialization
//! order and the order in which multi-valued properties are read back.
//! Duplicate statements are permitted so that an append followed by a
//! delete of the same value always restores the previous sequence.

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};

/// Insertion-ordered triple store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleStore {
    triples: Vec<Triple>,
}

impl TripleStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-ordered triples
    pub fn from_triples(triples: Vec<Triple>) -> Self {
        Self { triples }
    }

    /// Append a triple after every existing statement
    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Remove the first statement equal to `triple`
    pub fn remove_first(&mut self, triple: &Triple) -> bool {
        match self.triples.iter().position(|t| t == triple) {
            Some(pos) => {
                self.triples.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove the statement at `pos` in the (subject, predicate) sequence
    pub fn remove_nth(&mut self, subject: &RdfSubject, predicate: &RdfPredicate, n: usize) -> bool {
        let pattern = TriplePattern::bound(subject, predicate);
        let pos = self
            .triples
            .iter()
            .enumerate()
            .filter(|(_, t)| pattern.matches(t))
            .nth(n)
            .map(|(i, _)| i);
        match pos {
            Some(pos) => {
                self.triples.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove every statement matching a pattern, returning how many went
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> usize {
        let before = self.triples.len();
        self.triples.retain(|t| !pattern.matches(t));
        before - self.triples.len()
    }

    /// Replace all objects for (subject, predicate) with `objects`, in order
    pub fn replace(&mut self, subject: &RdfSubject, predicate: &RdfPredicate, objects: Vec<RdfObject>) {
        self.remove_matching(&TriplePattern::bound(subject, predicate));
        for object in objects {
            self.insert(Triple::new(subject.clone(), predicate.clone(), object));
        }
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Objects for (subject, predicate), in insertion order
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<&RdfObject> {
        let pattern = TriplePattern::bound(subject, predicate);
        self.triples
            .iter()
            .filter(|t| pattern.matches(t))
            .map(|t| &t.object)
            .collect()
    }

    /// Query triples matching a pattern
    pub fn query(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        self.triples.iter().filter(|t| pattern.matches(t)).collect()
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Clear all triples
    pub fn clear(&mut self) {
        self.triples.clear();
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All statements as a slice
    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode};

    fn subject() -> RdfSubject {
        NamedNode::new("info:fedora/test:1").unwrap().into()
    }

    fn publisher() -> RdfPredicate {
        RdfPredicate::new("http://purl.org/dc/terms/publisher").unwrap()
    }

    fn lit(v: &str) -> RdfObject {
        Literal::new_simple_literal(v).into()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = TripleStore::new();
        for v in ["b", "a", "c"] {
            store.insert(Triple::new(subject(), publisher(), lit(v)));
        }
        let values: Vec<String> = store
            .objects(&subject(), &publisher())
            .into_iter()
            .map(|o| o.lexical())
            .collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicates_and_remove_first() {
        let mut store = TripleStore::new();
        let triple = Triple::new(subject(), publisher(), lit("x"));
        store.insert(triple.clone());
        store.insert(Triple::new(subject(), publisher(), lit("y")));
        store.insert(triple.clone());
        assert_eq!(store.len(), 3);

        assert!(store.remove_first(&triple));
        let values: Vec<String> = store
            .objects(&subject(), &publisher())
            .into_iter()
            .map(|o| o.lexical())
            .collect();
        assert_eq!(values, vec!["y", "x"]);

        let missing = Triple::new(subject(), publisher(), lit("z"));
        assert!(!store.remove_first(&missing));
    }

    #[test]
    fn test_replace() {
        let mut store = TripleStore::new();
        store.insert(Triple::new(subject(), publisher(), lit("old")));
        store.replace(&subject(), &publisher(), vec![lit("new1"), lit("new2")]);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&Triple::new(subject(), publisher(), lit("new2"))));
    }

    #[test]
    fn test_remove_nth() {
        let mut store = TripleStore::new();
        for v in ["a", "b", "c"] {
            store.insert(Triple::new(subject(), publisher(), lit(v)));
        }
        assert!(store.remove_nth(&subject(), &publisher(), 1));
        assert!(!store.remove_nth(&subject(), &publisher(), 5));
        let values: Vec<String> = store
            .objects(&subject(), &publisher())
            .into_iter()
            .map(|o| o.lexical())
            .collect();
        assert_eq!(values, vec!["a", "c"]);
    }
}
