mod common;

use common::{context, StubIndex};
use fedora_model::datastream::{DatastreamType, PropertyDefinition, UsageTag, ValueType};
use fedora_model::rdf::vocab::{dc, foaf};
use fedora_model::rdf::PredicateMappings;
use fedora_model::search::FieldValue;
use fedora_model::{
    DigitalObject, ModelConfig, ModelError, RelationshipOptions, RelationshipRegistry,
    SearchIndexProjector,
};
use indexmap::IndexMap;
use std::sync::Arc;

const SOLR_RDF: &str = include_str!("fixtures/solr_rdf_descMetadata.nt");

fn desc_metadata() -> Arc<DatastreamType> {
    Arc::new(
        DatastreamType::new("DescMetadata")
            .property(
                PropertyDefinition::new("created", dc::CREATED)
                    .unwrap()
                    .index(|i| i.usage([UsageTag::Sortable]).value_type(ValueType::Date)),
            )
            .property(
                PropertyDefinition::new("title", dc::TITLE)
                    .unwrap()
                    .index(|i| i.usage([UsageTag::StoredSearchable, UsageTag::Sortable])),
            )
            .property(PropertyDefinition::new("publisher", dc::PUBLISHER).unwrap())
            .property(
                PropertyDefinition::new("education_level", dc::EDUCATION_LEVEL)
                    .unwrap()
                    .index(|i| i.usage([UsageTag::Displayable])),
            )
            .property(
                PropertyDefinition::new("rights", dc::RIGHTS)
                    .unwrap()
                    .index(|i| i.usage([UsageTag::Symbol])),
            )
            .property(
                PropertyDefinition::new("based_near", foaf::BASED_NEAR)
                    .unwrap()
                    .index(|i| i.usage([UsageTag::Facetable])),
            )
            .property(PropertyDefinition::new("creator", dc::CREATOR).unwrap()),
    )
}

fn book() -> DigitalObject {
    common::init_test_logging();
    let mut registry = RelationshipRegistry::new("Book", PredicateMappings::fedora());
    registry
        .has_relationship("collections", "is_member_of", RelationshipOptions::outbound())
        .unwrap();
    let ctx = context(registry, Arc::new(StubIndex::new()), ModelConfig::default());
    DigitalObject::new(ctx, Some("test:1")).unwrap()
}

fn multi(values: &[&str]) -> FieldValue {
    FieldValue::Multi(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn test_datastream_projection() {
    let mut object = book();
    object
        .add_datastream(desc_metadata(), "descMetadata")
        .unwrap()
        .load(SOLR_RDF.as_bytes())
        .unwrap();
    let doc = object.to_solr().unwrap();

    assert_eq!(doc.get("id"), Some(&FieldValue::Single("test:1".to_string())));
    assert_eq!(
        doc.get("desc_metadata__title_ssi"),
        Some(&FieldValue::Single("Sample title".to_string()))
    );
    assert_eq!(
        doc.get("desc_metadata__title_tesim"),
        Some(&multi(&["Sample title", "Second title"]))
    );
    assert_eq!(
        doc.get("desc_metadata__created_dtsi"),
        Some(&FieldValue::Single("2009-10-10T00:00:00Z".to_string()))
    );
    assert_eq!(
        doc.get("desc_metadata__created_dtsim"),
        Some(&multi(&["2009-10-10T00:00:00Z"]))
    );
    assert_eq!(doc.get("desc_metadata__publisher_tesim"), Some(&multi(&["Penn State"])));
    assert_eq!(doc.get("desc_metadata__education_level_ssm"), Some(&multi(&["Graduate"])));
    assert_eq!(doc.get("desc_metadata__rights_ssim"), Some(&multi(&["Public domain"])));
    assert_eq!(
        doc.get("desc_metadata__based_near_sim"),
        Some(&multi(&["New York, NY, US", "Tahiti"]))
    );
    assert!(!doc.contains("desc_metadata__creator_tesim"));
}

#[test]
fn test_relationship_fields() {
    let mut object = book();
    object.node_mut().append("collections", "test:c1").unwrap();
    object
        .node_mut()
        .add_relationship("is_part_of", "info:fedora/test:book")
        .unwrap();
    let doc = object.to_solr().unwrap();

    assert_eq!(doc.get("has_model_s"), Some(&multi(&["info:fedora/afmodel:Book"])));
    assert_eq!(doc.get("is_member_of_s"), Some(&multi(&["info:fedora/test:c1"])));
    assert_eq!(doc.get("is_part_of_s"), Some(&multi(&["info:fedora/test:book"])));
    assert_eq!(
        doc.field_names().take(2).collect::<Vec<_>>(),
        vec!["id", "has_model_s"]
    );
}

#[test]
fn test_projector_with_explicit_relationships() {
    let mut object = book();
    let ds = object.add_datastream(desc_metadata(), "descMetadata").unwrap();
    ds.property("title").unwrap().set(["Title of work"]).unwrap();

    let mut rels = IndexMap::new();
    rels.insert("is_part_of".to_string(), vec!["info:fedora/test:2".to_string()]);
    let doc = SearchIndexProjector::project(ds, &rels).unwrap();
    assert_eq!(doc.get("is_part_of_s"), Some(&multi(&["info:fedora/test:2"])));
    assert_eq!(doc.len(), 3);
}

#[test]
fn test_datastream_prefixes_must_not_collide() {
    let mut object = book();
    object.add_datastream(desc_metadata(), "descMetadata").unwrap();
    object.add_datastream(desc_metadata(), "descMetadata").unwrap();
    let err = object.add_datastream(desc_metadata(), "desc_metadata").unwrap_err();
    assert!(matches!(
        err,
        ModelError::PrefixCollision { ref prefix, ref existing, .. }
            if prefix == "desc_metadata" && existing == "descMetadata"
    ));
    assert_eq!(object.datastreams().count(), 1);
}

#[test]
fn test_assign_pid_rebinds_datastreams() {
    let mut registry = RelationshipRegistry::new("Book", PredicateMappings::fedora());
    registry
        .has_relationship("collections", "is_member_of", RelationshipOptions::outbound())
        .unwrap();
    let ctx = context(registry, Arc::new(StubIndex::new()), ModelConfig::default());
    let mut object = DigitalObject::new(ctx, None).unwrap();
    object.add_datastream(desc_metadata(), "descMetadata").unwrap();
    assert!(matches!(object.to_solr(), Err(ModelError::UnboundSubject(_))));

    object.assign_pid("test:9").unwrap();
    let ds = object.datastream("descMetadata").unwrap();
    assert_eq!(ds.rdf_subject().unwrap().identifier(), "info:fedora/test:9");
    assert_eq!(
        object.node().relationships("has_model").unwrap(),
        vec!["info:fedora/afmodel:Book"]
    );
}
