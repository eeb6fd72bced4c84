//! Type-suffixed index field names
//!
//! Suffixes follow the dynamic-field convention of the index schema:
//! `<type code><stored><indexed><multivalued>`, e.g. `tesim` for stored,
//! indexed, multi-valued English text. These strings are part of the schema
//! contract; previously indexed documents depend on them.

use crate::datastream::{UsageTag, ValueType};

/// Suffix used for relationship fields and other plain string values
pub const RELATIONSHIP_SUFFIX: &str = "_s";

/// Field shape derived from a usage tag and a declared value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub value_type: ValueType,
    pub stored: bool,
    pub indexed: bool,
    pub multivalued: bool,
}

impl FieldDescriptor {
    /// Resolve how `usage` stores values of `value_type`
    pub fn for_usage(usage: UsageTag, value_type: ValueType) -> Self {
        let (value_type, stored, indexed, multivalued) = match usage {
            UsageTag::StoredSearchable => (searchable_type(value_type), true, true, true),
            UsageTag::Searchable => (searchable_type(value_type), false, true, true),
            UsageTag::Facetable => (ValueType::String, false, true, true),
            UsageTag::Sortable => (sortable_type(value_type), true, true, false),
            UsageTag::Displayable => (ValueType::String, true, false, true),
            UsageTag::Symbol => (ValueType::String, true, true, true),
            UsageTag::Dateable => (ValueType::Date, true, true, true),
        };
        Self {
            value_type,
            stored,
            indexed,
            multivalued,
        }
    }

    pub fn suffix(&self) -> String {
        let mut suffix = String::from(type_code(self.value_type));
        if self.stored {
            suffix.push('s');
        }
        if self.indexed {
            suffix.push('i');
        }
        if self.multivalued {
            suffix.push('m');
        }
        suffix
    }
}

fn searchable_type(value_type: ValueType) -> ValueType {
    match value_type {
        ValueType::String => ValueType::Text,
        other => other,
    }
}

fn sortable_type(value_type: ValueType) -> ValueType {
    match value_type {
        ValueType::Text => ValueType::String,
        other => other,
    }
}

fn type_code(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "s",
        ValueType::Text => "te",
        ValueType::Date => "dt",
        ValueType::Integer => "i",
        ValueType::Long => "lt",
        ValueType::Boolean => "b",
        ValueType::Float => "f",
        ValueType::Double => "db",
    }
}

/// `<name>_<suffix>` for one usage of a property
pub fn solr_name(name: &str, usage: UsageTag, value_type: ValueType) -> String {
    format!("{}_{}", name, FieldDescriptor::for_usage(usage, value_type).suffix())
}

/// Field holding relationship targets, e.g. `is_part_of_s`
pub fn relationship_field(key: &str) -> String {
    format!("{}{}", key, RELATIONSHIP_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_codes() {
        let cases = [
            (UsageTag::StoredSearchable, ValueType::String, "title_tesim"),
            (UsageTag::StoredSearchable, ValueType::Date, "title_dtsim"),
            (UsageTag::Searchable, ValueType::Text, "title_teim"),
            (UsageTag::Facetable, ValueType::Date, "title_sim"),
            (UsageTag::Sortable, ValueType::Text, "title_ssi"),
            (UsageTag::Sortable, ValueType::Date, "title_dtsi"),
            (UsageTag::Sortable, ValueType::Integer, "title_isi"),
            (UsageTag::Displayable, ValueType::Date, "title_ssm"),
            (UsageTag::Symbol, ValueType::String, "title_ssim"),
            (UsageTag::Dateable, ValueType::String, "title_dtsim"),
        ];
        for (usage, value_type, expected) in cases {
            assert_eq!(solr_name("title", usage, value_type), expected, "{:?}/{:?}", usage, value_type);
        }
    }

    #[test]
    fn test_text_and_date_sortable_do_not_collide() {
        assert_ne!(
            solr_name("created", UsageTag::Sortable, ValueType::Text),
            solr_name("created", UsageTag::Sortable, ValueType::Date)
        );
    }

    #[test]
    fn test_relationship_field() {
        assert_eq!(relationship_field("is_part_of"), "is_part_of_s");
    }
}
