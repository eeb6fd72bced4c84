//! Container-scoped field names

use regex::Regex;
use std::sync::OnceLock;

/// Separator between the container words and the local name
pub const PREFIX_SEPARATOR: &str = "__";

fn word_boundaries() -> &'static [(Regex, &'static str); 2] {
    static PATTERNS: OnceLock<[(Regex, &'static str); 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // "RDFDatastream" -> "RDF_Datastream"
            (Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"), "${1}_${2}"),
            // "descMetadata" -> "desc_Metadata"
            (Regex::new(r"([a-z\d])([A-Z])").expect("valid regex"), "${1}_${2}"),
        ]
    })
}

/// Split a container identity into lower-case words joined by `_`
///
/// `descMetadata` becomes `desc_metadata`, `RELS-EXT` becomes `rels_ext`.
pub fn underscore(identity: &str) -> String {
    let mut word = identity.to_string();
    for (pattern, replacement) in word_boundaries() {
        word = pattern.replace_all(&word, *replacement).into_owned();
    }
    word.replace(['-', ' ', '.', ':'], "_").to_lowercase()
}

/// Deterministic name mangling for one container identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrefixer {
    prefix: String,
}

impl NamePrefixer {
    pub fn new(container_identity: &str) -> Self {
        Self {
            prefix: underscore(container_identity),
        }
    }

    /// Container words, e.g. `desc_metadata`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn apply(&self, local_name: &str) -> String {
        format!("{}{}{}", self.prefix, PREFIX_SEPARATOR, local_name)
    }
}

/// `apply_prefix("descMetadata", "title")` is `desc_metadata__title`
pub fn apply_prefix(container_identity: &str, local_name: &str) -> String {
    NamePrefixer::new(container_identity).apply(local_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("descMetadata"), "desc_metadata");
        assert_eq!(underscore("myFoobar"), "my_foobar");
        assert_eq!(underscore("RELS-EXT"), "rels_ext");
        assert_eq!(underscore("RDFDatastream"), "rdf_datastream");
        assert_eq!(underscore("rdf"), "rdf");
    }

    #[test]
    fn test_apply_prefix() {
        assert_eq!(apply_prefix("myFoobar", "baz"), "my_foobar__baz");
        assert_eq!(apply_prefix("descMetadata", "title"), "desc_metadata__title");
    }

    #[test]
    fn test_distinct_containers_never_collide() {
        let names = ["descMetadata", "rightsMetadata", "rdf", "properties", "myFoobar"];
        for a in names {
            for b in names {
                if a != b {
                    assert_ne!(apply_prefix(a, "title"), apply_prefix(b, "title"));
                }
            }
            assert_eq!(apply_prefix(a, "title"), apply_prefix(a, "title"));
        }
    }
}
