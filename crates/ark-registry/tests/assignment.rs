//! End-to-end assignment scenarios over the whole registry.
//!
//! Each test wires a real store, an entity graph, and an assigner, and
//! drives the protocol the way entity-creation code would.

use std::sync::Arc;

use ark_registry::{
    AllocationStore, ArkAssigner, ArkGrammar, AssignError, AssignmentRequest, EntityId,
    GeneratorConfig, MemoryStore, Naan, NameShape, SqliteStore,
};
use ark_registry_testkit::GraphFixture;

fn assigner<S: AllocationStore>(
    store: Arc<S>,
    graph: GraphFixture,
) -> ArkAssigner<S, GraphFixture> {
    // RUST_LOG=debug surfaces the allocation-retry logs when debugging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    ArkAssigner::new(store, Arc::new(graph), GeneratorConfig::default())
}

#[tokio::test]
async fn test_minted_identifiers_are_distinct_and_well_shaped() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    let mut graph = GraphFixture::new();
    let org = graph.organization(Naan::new(5));
    let first_agent = graph.agent_of(org);
    let second_agent = graph.agent_of(org);
    let assigner = assigner(Arc::clone(&store), graph);

    let first = assigner
        .assign(AssignmentRequest::mint(first_agent))
        .await
        .unwrap();
    let second = assigner
        .assign(AssignmentRequest::mint(second_agent))
        .await
        .unwrap();

    assert_ne!(first.ark, second.ark);

    let grammar = ArkGrammar::new(&NameShape::default()).unwrap();
    for assignment in [&first, &second] {
        let parsed = grammar.parse_internal(&assignment.ark.to_string()).unwrap();
        assert_eq!(parsed.naan(), Naan::new(5));
        assert_eq!(assignment.cwuri.as_deref(), Some(assignment.ark.uri().as_str()));
        assert!(store
            .exists(parsed.naan(), parsed.name(), None)
            .await
            .unwrap());
    }
}

#[tokio::test]
async fn test_child_entity_gets_qualifier_under_parent_name() {
    let store = Arc::new(MemoryStore::new());
    let mut graph = GraphFixture::new();
    let container = graph.organization(Naan::new(17));
    let unit = graph.unit_in(container);
    let child = graph.unit_in(unit);
    let assigner = assigner(Arc::clone(&store), graph);

    let parent_assignment = assigner
        .assign(AssignmentRequest::mint(unit))
        .await
        .unwrap();
    let child_assignment = assigner
        .assign(AssignmentRequest::mint(child).parent(&parent_assignment.ark))
        .await
        .unwrap();

    assert_eq!(child_assignment.ark.naan(), Naan::new(17));
    assert_eq!(child_assignment.ark.name(), parent_assignment.ark.name());
    let qualifier = child_assignment.ark.qualifier().unwrap();
    assert_eq!(qualifier.len(), NameShape::default().qualifier_length);
    assert!(store
        .exists(Naan::new(17), parent_assignment.ark.name(), Some(qualifier))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_sibling_qualifiers_are_distinct() {
    let store = Arc::new(MemoryStore::new());
    let mut graph = GraphFixture::new();
    let container = graph.organization(Naan::new(17));
    let unit = graph.unit_in(container);
    let first_child = graph.unit_in(unit);
    let second_child = graph.unit_in(unit);
    let assigner = assigner(Arc::clone(&store), graph);

    let parent = assigner
        .assign(AssignmentRequest::mint(unit))
        .await
        .unwrap();
    let first = assigner
        .assign(AssignmentRequest::mint(first_child).parent(&parent.ark))
        .await
        .unwrap();
    let second = assigner
        .assign(AssignmentRequest::mint(second_child).parent(&parent.ark))
        .await
        .unwrap();

    assert_ne!(first.ark.qualifier(), second.ark.qualifier());
}

#[tokio::test]
async fn test_supplied_ark_conflicts_with_existing_allocation() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    let graph = GraphFixture::new();
    let assigner = assigner(Arc::clone(&store), graph);

    assigner
        .assign(
            AssignmentRequest::mint(EntityId::new(1))
                .supplied_ark("ark:/999/987654"),
        )
        .await
        .unwrap();

    let err = assigner
        .assign(
            AssignmentRequest::mint(EntityId::new(2)).supplied_ark("999/987654"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AssignError::DuplicateArk(ark) if ark.to_string() == "999/987654"));
}

#[tokio::test]
async fn test_canonical_uri_embedding_an_ark_short_circuits_minting() {
    let store = Arc::new(MemoryStore::new());
    let mut graph = GraphFixture::new();
    let org = graph.organization(Naan::new(5));
    let assigner = assigner(Arc::clone(&store), graph);

    let assignment = assigner
        .assign(
            AssignmentRequest::mint(org)
                .cwuri("http://catalogue.example.org/ark:/67717/rfabc1234g?view=full"),
        )
        .await
        .unwrap();

    // the embedded identifier wins over the entity's own authority
    assert_eq!(assignment.ark.to_string(), "67717/rfabc1234g");
    assert_eq!(assignment.cwuri, None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_concurrent_minting_never_collides() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    let mut graph = GraphFixture::new();
    let org = graph.organization(Naan::new(5));
    let entities: Vec<_> = (0..16).map(|_| graph.agent_of(org)).collect();
    let assigner = Arc::new(assigner(Arc::clone(&store), graph));

    let mut handles = Vec::new();
    for entity in entities {
        let assigner = Arc::clone(&assigner);
        handles.push(tokio::spawn(async move {
            assigner.assign(AssignmentRequest::mint(entity)).await
        }));
    }

    let mut names = std::collections::HashSet::new();
    for handle in handles {
        let assignment = handle.await.unwrap().unwrap();
        assert!(names.insert(assignment.ark.name().to_string()));
    }
    assert_eq!(names.len(), 16);
}
