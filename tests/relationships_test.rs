mod common;

use common::{context, doc, init_test_logging, StubIndex};
use fedora_model::rdf::PredicateMappings;
use fedora_model::relationships::IndexedObject;
use fedora_model::{
    DigitalObject, FinderOptions, FinderResponse, ModelConfig, ModelError, RawCombination,
    RelationshipOptions, RelationshipRegistry, SemanticNode,
};
use std::sync::Arc;

const PARTS_QUERY: &str = r"is_part_of_s:info\:fedora/test\:sample_pid";

fn book_registry() -> RelationshipRegistry {
    let mut registry = RelationshipRegistry::new("Book", PredicateMappings::fedora());
    registry
        .has_relationship("parts", "is_part_of", RelationshipOptions::inbound())
        .unwrap();
    registry
        .has_relationship(
            "pages",
            "is_part_of",
            RelationshipOptions::inbound().element_type("Page"),
        )
        .unwrap();
    registry
        .has_relationship("collections", "is_member_of", RelationshipOptions::outbound())
        .unwrap();
    registry
        .create_bidirectional_relationship_finders(
            "all_parts",
            "has_part",
            "is_part_of",
            RelationshipOptions::default(),
        )
        .unwrap();
    registry
}

fn book(index: Arc<StubIndex>, config: ModelConfig) -> SemanticNode {
    init_test_logging();
    SemanticNode::new(context(book_registry(), index, config), Some("test:sample_pid"))
}

fn pids(objects: &[IndexedObject]) -> Vec<&str> {
    objects.iter().map(|o| o.pid.as_str()).collect()
}

#[test]
fn test_inbound_query_escapes_subject_and_defaults_rows() {
    let index = Arc::new(StubIndex::new());
    index.respond(PARTS_QUERY, vec![doc("test:2", &["info:fedora/afmodel:Page"])]);
    let node = book(index.clone(), ModelConfig::default());

    let objects = node
        .find("parts", FinderOptions::default())
        .unwrap()
        .into_objects()
        .unwrap();
    assert_eq!(pids(&objects), vec!["test:2"]);
    assert_eq!(index.calls(), vec![(PARTS_QUERY.to_string(), 25)]);

    node.find_ids("parts", FinderOptions::default().rows(10)).unwrap();
    assert_eq!(index.calls()[1], (PARTS_QUERY.to_string(), 10));
}

#[test]
fn test_inbound_raw_response() {
    let index = Arc::new(StubIndex::new());
    index.respond(PARTS_QUERY, vec![doc("test:2", &[]), doc("test:3", &[])]);
    let node = book(index, ModelConfig::default());

    match node.find("parts", FinderOptions::solr()).unwrap() {
        FinderResponse::Raw(response) => {
            assert_eq!(response.num_found, 2);
            assert_eq!(response.ids(), vec!["test:2", "test:3"]);
        }
        other => panic!("expected raw response, got {:?}", other),
    }
}

#[test]
fn test_outbound_ids_come_from_local_statements() {
    let index = Arc::new(StubIndex::new());
    let mut node = book(index.clone(), ModelConfig::default());

    node.append("collections", "test:c1").unwrap();
    node.append("collections", "info:fedora/test:c2").unwrap();
    assert_eq!(
        node.find_ids("collections", FinderOptions::default()).unwrap(),
        vec!["test:c1", "test:c2"]
    );
    assert!(index.calls().is_empty());

    assert!(node.remove("collections", "test:c1").unwrap());
    assert!(!node.remove("collections", "test:c1").unwrap());
    assert_eq!(
        node.ids_for_outbound("is_member_of").unwrap(),
        vec!["test:c2"]
    );
}

#[test]
fn test_outbound_objects_use_id_disjunction() {
    let index = Arc::new(StubIndex::new());
    index.respond(
        r"id:test\:c1 OR id:test\:c2",
        vec![doc("test:c1", &[]), doc("test:c2", &[])],
    );
    let mut node = book(index.clone(), ModelConfig::default());
    node.append("collections", "test:c1").unwrap();
    node.append("collections", "test:c2").unwrap();

    let objects = node.find_from_solr("collections", FinderOptions::default()).unwrap();
    assert_eq!(pids(&objects), vec!["test:c1", "test:c2"]);
    assert_eq!(index.calls()[0].1, 25);
}

#[test]
fn test_empty_outbound_set() {
    let index = Arc::new(StubIndex::new());
    let node = book(index.clone(), ModelConfig::default());

    let objects = node.find("collections", FinderOptions::default()).unwrap();
    assert_eq!(objects, FinderResponse::Objects(Vec::new()));
    assert!(index.calls().is_empty());

    node.find("collections", FinderOptions::solr()).unwrap();
    assert_eq!(index.calls()[0].0, "id:NEVER_USE_THIS_ID");
}

#[test]
fn test_inbound_relationships_are_read_only() {
    let index = Arc::new(StubIndex::new());
    let mut node = book(index, ModelConfig::default());
    let err = node.append("parts", "test:2").unwrap_err();
    assert!(matches!(err, ModelError::ReadOnlyRelationship(ref name) if name == "parts"));
    assert!(err.is_programming_error());
    assert!(!node.context().registry().responds_to("parts_append"));
    assert!(node.context().registry().responds_to("collections_append"));
}

#[test]
fn test_unknown_relationship() {
    let index = Arc::new(StubIndex::new());
    let node = book(index, ModelConfig::default());
    assert!(matches!(
        node.find("chapters", FinderOptions::default()),
        Err(ModelError::UnknownRelationship(ref name)) if name == "chapters"
    ));
    assert!(matches!(
        node.relationship_query("chapters"),
        Err(ModelError::UnknownRelationship(_))
    ));
}

#[test]
fn test_element_type_filter() {
    let index = Arc::new(StubIndex::new());
    let filtered = format!(r"({}) AND (has_model_s:info\:fedora/afmodel\:Page)", PARTS_QUERY);
    index.respond(
        &filtered,
        vec![
            doc("test:p1", &["info:fedora/afmodel:Page"]),
            doc("test:b1", &["info:fedora/afmodel:Book"]),
        ],
    );
    let node = book(index, ModelConfig::default());

    let objects = node
        .find("pages", FinderOptions::default())
        .unwrap()
        .into_objects()
        .unwrap();
    assert_eq!(pids(&objects), vec!["test:p1"]);
    assert_eq!(node.find_ids("pages", FinderOptions::default()).unwrap(), vec!["test:p1"]);
}

#[test]
fn test_bidirectional_lists_outbound_before_inbound() {
    let index = Arc::new(StubIndex::new());
    index.respond(r"id:test\:x", vec![doc("test:x", &[])]);
    index.respond(PARTS_QUERY, vec![doc("test:y", &[])]);
    let mut node = book(index, ModelConfig::default());
    node.append("all_parts", "test:x").unwrap();

    let objects = node
        .find("all_parts", FinderOptions::default())
        .unwrap()
        .into_objects()
        .unwrap();
    assert_eq!(pids(&objects), vec!["test:x", "test:y"]);
    assert_eq!(
        node.find_ids("all_parts", FinderOptions::default()).unwrap(),
        vec!["test:x", "test:y"]
    );
    assert_eq!(
        node.find_ids("all_parts_outbound", FinderOptions::default()).unwrap(),
        vec!["test:x"]
    );
}

#[test]
fn test_bidirectional_raw_is_one_disjunctive_query() {
    let index = Arc::new(StubIndex::new());
    let mut node = book(index.clone(), ModelConfig::default());
    node.append("all_parts", "test:x").unwrap();

    node.find("all_parts", FinderOptions::solr().rows(7)).unwrap();
    assert_eq!(
        index.calls(),
        vec![(format!(r"id:test\:x OR ({})", PARTS_QUERY), 7)]
    );
}

#[test]
fn test_bidirectional_raw_separate_queries() {
    let index = Arc::new(StubIndex::new());
    index.respond(r"id:test\:x", vec![doc("test:x", &[])]);
    index.respond(PARTS_QUERY, vec![doc("test:y", &[])]);
    let config = ModelConfig {
        bidirectional_raw: RawCombination::Separate,
        ..ModelConfig::default()
    };
    let mut node = book(index.clone(), config);
    node.append("all_parts", "test:x").unwrap();

    match node.find("all_parts", FinderOptions::solr()).unwrap() {
        FinderResponse::RawSplit { outbound, inbound } => {
            assert_eq!(outbound.ids(), vec!["test:x"]);
            assert_eq!(inbound.ids(), vec!["test:y"]);
        }
        other => panic!("expected split response, got {:?}", other),
    }
    assert_eq!(index.calls().len(), 2);
}

#[test]
fn test_relationship_query_is_composable() {
    let index = Arc::new(StubIndex::new());
    let node = book(index.clone(), ModelConfig::default());

    let query = node.relationship_query("parts").unwrap().filter("title_tesim:foo").rows(3);
    assert_eq!(
        query.to_query_string(),
        format!("({}) AND (title_tesim:foo)", PARTS_QUERY)
    );
    assert!(index.calls().is_empty());

    query.execute(node.context().index()).unwrap();
    assert_eq!(index.calls()[0].1, 3);
}

#[test]
fn test_index_errors_propagate() {
    let index = Arc::new(StubIndex::failing());
    let node = book(index, ModelConfig::default());
    assert!(matches!(
        node.find("parts", FinderOptions::default()),
        Err(ModelError::IndexQuery(_))
    ));
}

#[test]
fn test_relationships_by_name() {
    let index = Arc::new(StubIndex::new());
    index.respond(PARTS_QUERY, vec![doc("test:2", &[])]);
    let mut node = book(index, ModelConfig::default());
    node.append("collections", "test:c1").unwrap();

    let by_name = node.relationships_by_name().unwrap();
    assert_eq!(by_name["self"]["collections"], vec!["info:fedora/test:c1"]);
    assert!(by_name["inbound"]["parts"].is_empty());

    let with_index = node.relationships_by_name_with_index().unwrap();
    assert_eq!(with_index["inbound"]["parts"], vec!["info:fedora/test:2"]);
    assert_eq!(
        node.relationship_names(),
        vec!["collections", "all_parts_outbound", "parts", "pages", "all_parts_inbound"]
    );
}

#[test]
fn test_unbound_node_cannot_resolve_inbound() {
    let index = Arc::new(StubIndex::new());
    let node = SemanticNode::new(context(book_registry(), index, ModelConfig::default()), None);
    assert!(matches!(
        node.find("parts", FinderOptions::default()),
        Err(ModelError::UnboundSubject(_))
    ));
}

#[test]
fn test_add_relationship_to_other_object() {
    let index = Arc::new(StubIndex::new());
    let registry = Arc::new(book_registry());
    let ctx = fedora_model::ModelContext::new(registry, index, Arc::new(ModelConfig::default()));
    let mut page = DigitalObject::new(ctx.clone(), Some("test:page1")).unwrap();
    let book = DigitalObject::new(ctx, Some("test:book1")).unwrap();

    page.node_mut().add_relationship_to("is_part_of", book.node()).unwrap();
    let rels = page.node().relationships_for_index();
    assert_eq!(rels["is_part_of"], vec!["info:fedora/test:book1"]);
    assert_eq!(rels["has_model"], vec!["info:fedora/afmodel:Book"]);
}

struct Book {
    object: DigitalObject,
}

impl AsRef<SemanticNode> for Book {
    fn as_ref(&self) -> &SemanticNode {
        self.object.node()
    }
}

impl AsMut<SemanticNode> for Book {
    fn as_mut(&mut self) -> &mut SemanticNode {
        self.object.node_mut()
    }
}

fedora_model::relationship_finders!(Book {
    "parts" => { find: parts, ids: parts_ids, query: parts_query, from_solr: parts_from_solr },
    "collections" => {
        find: collections,
        ids: collections_ids,
        query: collections_query,
        from_solr: collections_from_solr,
        append: collections_append,
        remove: collections_remove,
    },
});

#[test]
fn test_typed_wrappers() {
    let index = Arc::new(StubIndex::new());
    index.respond(PARTS_QUERY, vec![doc("test:2", &[])]);
    let ctx = context(book_registry(), index, ModelConfig::default());
    let mut book = Book {
        object: DigitalObject::new(ctx, Some("test:sample_pid")).unwrap(),
    };

    assert_eq!(book.parts_ids(FinderOptions::default()).unwrap(), vec!["test:2"]);
    assert_eq!(pids(&book.parts_from_solr(FinderOptions::default()).unwrap()), vec!["test:2"]);
    assert_eq!(book.parts_query().unwrap().to_query_string(), PARTS_QUERY);
    assert!(matches!(book.parts(FinderOptions::default()).unwrap(), FinderResponse::Objects(_)));

    book.collections_append("test:c1").unwrap();
    assert_eq!(book.collections_ids(FinderOptions::default()).unwrap(), vec!["test:c1"]);
    assert_eq!(book.collections_query().unwrap().to_query_string(), r"id:test\:c1");
    assert!(book.collections_remove("test:c1").unwrap());
    assert!(book.collections(FinderOptions::ids()).unwrap().ids().is_empty());
    assert!(book.collections_from_solr(FinderOptions::default()).unwrap().is_empty());
}
