use std::sync::Arc;

use pubreg_core::{
    AdditionalIdentifier, ArticleFields, BookContext, ChapterFields, ExistingRecord,
    IncomingRecord, JournalContext, MonographFields, PublicationContext, PublicationInstance,
    Range, Reference,
};

use super::*;
use crate::duplicates::DuplicateReporter;
use crate::oracle::EquivalenceOracle;
use crate::search::SearchResolver;
use crate::testing::{
    AcceptOnly, AlwaysMatch, InMemoryIndex, InMemoryStore, RecordingBlobStore, bare_incoming,
    incoming_with_context, publication_titled,
};

const HANDLE: &str = "https://hdl.handle.net/11250/2838";
const REPORT_ROOT: &str = "DUPLICATES_DETECTED/ntnu";

struct Harness {
    index: Arc<InMemoryIndex>,
    blobs: Arc<RecordingBlobStore>,
    matcher: PublicationMatcher,
}

fn harness(
    index: InMemoryIndex,
    store: InMemoryStore,
    oracle: impl EquivalenceOracle + 'static,
) -> Harness {
    harness_with_blobs(index, store, oracle, RecordingBlobStore::default())
}

fn harness_with_blobs(
    index: InMemoryIndex,
    store: InMemoryStore,
    oracle: impl EquivalenceOracle + 'static,
    blobs: RecordingBlobStore,
) -> Harness {
    let index = Arc::new(index);
    let blobs = Arc::new(blobs);
    let resolver = SearchResolver::new(index.clone(), Arc::new(store));
    let matcher = PublicationMatcher::new(
        resolver,
        Arc::new(oracle),
        DuplicateReporter::new(blobs.clone()),
    );
    Harness {
        index,
        blobs,
        matcher,
    }
}

fn with_handle(mut record: ExistingRecord, handle: &str) -> ExistingRecord {
    record
        .publication
        .additional_identifiers
        .push(AdditionalIdentifier::handle(handle));
    record
}

fn with_cristin(mut record: ExistingRecord, id: &str) -> ExistingRecord {
    record
        .publication
        .additional_identifiers
        .push(AdditionalIdentifier::cristin(id));
    record
}

fn with_doi(mut incoming: IncomingRecord, doi: &str) -> IncomingRecord {
    incoming
        .mapped
        .entity_description
        .reference
        .get_or_insert_with(Reference::default)
        .doi = Some(doi.to_string());
    incoming
}

fn queried_params(index: &InMemoryIndex) -> Vec<String> {
    index
        .queries()
        .into_iter()
        .map(|params| params[0].0.clone())
        .collect()
}

#[test]
fn standard_chain_order() {
    assert_eq!(
        MatchingChain::default().evidence_order(),
        [
            EvidenceKind::StableIdentifier,
            EvidenceKind::SourceIdentifier,
            EvidenceKind::Doi,
            EvidenceKind::Isbn,
            EvidenceKind::SearchMatch,
        ]
    );
}

#[test]
fn duplicate_labels_round_trip() {
    for kind in EvidenceKind::ALL {
        assert_eq!(EvidenceKind::from_duplicate_label(kind.duplicate_label()), Some(kind));
    }
    assert_eq!(EvidenceKind::Isbn.to_string(), "isbn");
    assert_eq!(
        serde_json::to_value(EvidenceKind::SearchMatch).unwrap(),
        "search-match"
    );
}

#[tokio::test]
async fn stable_identifier_beats_doi() {
    let index = InMemoryIndex::default()
        .with_hits(&[("handle", HANDLE)], &["by-handle"])
        .with_hits(&[("doi", "10.1000/x")], &["by-doi"]);
    let store = InMemoryStore::default()
        .with(with_handle(publication_titled("by-handle", "Tidal flats"), HANDLE))
        .with(publication_titled("by-doi", "Tidal flats"));
    let h = harness(index, store, AlwaysMatch);

    let incoming = with_doi(bare_incoming(), "10.1000/x");
    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.evidence, EvidenceKind::StableIdentifier);
    assert_eq!(target.existing.identifier.as_str(), "by-handle");
    assert_eq!(queried_params(&h.index), ["handle"]);
}

#[tokio::test]
async fn handle_hit_without_exact_identifier_is_ignored() {
    let index = InMemoryIndex::default().with_hits(&[("handle", HANDLE)], &["fuzzy"]);
    let store = InMemoryStore::default().with(with_handle(
        publication_titled("fuzzy", "Tidal flats"),
        "https://hdl.handle.net/11250/28380",
    ));
    let h = harness(index, store, AlwaysMatch);

    let target = h
        .matcher
        .resolve_existing_publication(&bare_incoming())
        .await
        .unwrap();
    assert!(target.is_none());
}

#[tokio::test]
async fn record_without_evidence_only_tries_identifiers() {
    let h = harness(InMemoryIndex::default(), InMemoryStore::default(), AlwaysMatch);

    let mut incoming = bare_incoming();
    incoming.source.source_identifier = Some("123".to_string());

    let target = h.matcher.resolve_existing_publication(&incoming).await.unwrap();
    assert!(target.is_none());
    assert_eq!(queried_params(&h.index), ["handle", "cristinIdentifier"]);
    assert!(h.blobs.writes().is_empty());
}

#[tokio::test]
async fn cristin_match_requires_identifier_and_oracle() {
    let index = InMemoryIndex::default().with_hits(
        &[("cristinIdentifier", "123")],
        &["no-cristin-id", "rejected", "accepted"],
    );
    let store = InMemoryStore::default()
        .with(publication_titled("no-cristin-id", "Tidal flats"))
        .with(with_cristin(publication_titled("rejected", "Tidal flats"), "123"))
        .with(with_cristin(publication_titled("accepted", "Tidal flats"), "123"));
    let h = harness(index, store, AcceptOnly(vec!["accepted", "no-cristin-id"]));

    let mut incoming = bare_incoming();
    incoming.source.source_identifier = Some("123".to_string());

    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target.evidence, EvidenceKind::SourceIdentifier);
    assert_eq!(target.existing.identifier.as_str(), "accepted");
    assert!(h.blobs.writes().is_empty());
}

#[tokio::test]
async fn ambiguous_isbn_takes_first_and_reports_all() {
    let index = InMemoryIndex::default().with_hits(
        &[("isbn", "9780306406157")],
        &["first", "second", "third"],
    );
    let store = InMemoryStore::default()
        .with(publication_titled("first", "Fjords"))
        .with(publication_titled("second", "Fjords"))
        .with(publication_titled("third", "Fjords"));
    let h = harness(index, store, AlwaysMatch);

    let incoming = incoming_with_context(PublicationContext::Book(BookContext {
        isbn_list: vec!["0-306-40615-2".to_string()],
        ..Default::default()
    }));
    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.evidence, EvidenceKind::Isbn);
    assert_eq!(target.existing.identifier.as_str(), "first");

    let writes = h.blobs.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, format!("{REPORT_ROOT}/ISBN-duplicates/2838.json"));
    let report: serde_json::Value = serde_json::from_str(&writes[0].1).unwrap();
    assert_eq!(report["candidates"], serde_json::json!(["first", "second", "third"]));
    assert_eq!(report["cause"], "ISBN-duplicates");
    assert_eq!(report["provenance"], "s3://brage/ntnu/2024-02-01/2838.json");
}

#[tokio::test]
async fn isbn_results_are_unioned_across_isbns() {
    let index = InMemoryIndex::default()
        .with_hits(&[("isbn", "9780306406157")], &["print"])
        .with_hits(&[("isbn", "9780074625422")], &["print", "ebook"]);
    let store = InMemoryStore::default()
        .with(publication_titled("print", "Fjords"))
        .with(publication_titled("ebook", "Fjords"));
    let h = harness(index, store, AlwaysMatch);

    let incoming = incoming_with_context(PublicationContext::Report(BookContext {
        isbn_list: vec!["9780306406157".to_string(), "0-07-462542-X".to_string()],
        ..Default::default()
    }));
    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.existing.identifier.as_str(), "print");
    let report: DuplicateCluster = serde_json::from_str(&h.blobs.writes()[0].1).unwrap();
    let ids: Vec<&str> = report.candidates.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["print", "ebook"]);
}

#[tokio::test]
async fn doi_match_after_unmatched_source_identifier() {
    let index = InMemoryIndex::default()
        .with_hits(&[("doi", "10.1000/x")], &["match", "lookalike"]);
    let store = InMemoryStore::default()
        .with(publication_titled("match", "Tidal flats"))
        .with(publication_titled("lookalike", "Tidal flats"));
    let h = harness(index, store, AcceptOnly(vec!["match"]));

    let mut incoming = with_doi(bare_incoming(), "https://doi.org/10.1000/X");
    incoming.source.source_identifier = Some("123".to_string());

    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.evidence, EvidenceKind::Doi);
    assert_eq!(target.existing.identifier.as_str(), "match");
    assert!(h.blobs.writes().is_empty());
    assert_eq!(queried_params(&h.index), ["handle", "cristinIdentifier", "doi"]);
}

#[tokio::test]
async fn title_search_uses_swapped_journal_hint() {
    let index = InMemoryIndex::default().with_hits(
        &[("titleShould", "Tidal flats"), ("contextType", "UnconfirmedJournal")],
        &["by-title"],
    );
    let store = InMemoryStore::default().with(publication_titled("by-title", "Tidal flats"));
    let h = harness(index, store, AlwaysMatch);

    let mut incoming = bare_incoming();
    incoming.mapped.entity_description.main_title = Some("Tidal flats".to_string());
    incoming.mapped.entity_description.reference = Some(Reference {
        doi: None,
        publication_context: Some(PublicationContext::Journal(JournalContext::default())),
        publication_instance: Some(PublicationInstance::AcademicArticle(ArticleFields::default())),
    });

    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target.evidence, EvidenceKind::SearchMatch);
    assert_eq!(target.existing.identifier.as_str(), "by-title");
}

fn titled_incoming(
    title: &str,
    context: PublicationContext,
    instance: PublicationInstance,
) -> IncomingRecord {
    let mut incoming = bare_incoming();
    incoming.mapped.entity_description.main_title = Some(title.to_string());
    incoming.mapped.entity_description.reference = Some(Reference {
        doi: None,
        publication_context: Some(context),
        publication_instance: Some(instance),
    });
    incoming
}

fn reported_ids(body: &str) -> Vec<String> {
    let report: DuplicateCluster = serde_json::from_str(body).unwrap();
    report
        .candidates
        .iter()
        .map(|id| id.as_str().to_string())
        .collect()
}

#[tokio::test]
async fn ambiguous_title_takes_first_and_reports_all() {
    let index = InMemoryIndex::default().with_hits(
        &[("titleShould", "Tidal flats"), ("contextType", "UnconfirmedJournal")],
        &["older", "newer"],
    );
    let store = InMemoryStore::default()
        .with(publication_titled("older", "Tidal flats"))
        .with(publication_titled("newer", "Tidal flats"));
    let h = harness(index, store, AlwaysMatch);

    let incoming = titled_incoming(
        "Tidal flats",
        PublicationContext::Journal(JournalContext::default()),
        PublicationInstance::AcademicArticle(ArticleFields::default()),
    );
    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.evidence, EvidenceKind::SearchMatch);
    assert_eq!(target.existing.identifier.as_str(), "older");

    let writes = h.blobs.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, format!("{REPORT_ROOT}/Title-duplicates/2838.json"));
    assert_eq!(reported_ids(&writes[0].1), ["older", "newer"]);
}

#[tokio::test]
async fn conference_report_is_searched_under_event() {
    let index = InMemoryIndex::default().with_hits(
        &[("titleShould", "Arctic Frontiers 2024"), ("contextType", "Event")],
        &["proceedings"],
    );
    let store =
        InMemoryStore::default().with(publication_titled("proceedings", "Arctic Frontiers 2024"));
    let h = harness(index, store, AlwaysMatch);

    let incoming = titled_incoming(
        "Arctic Frontiers 2024",
        PublicationContext::Report(BookContext::default()),
        PublicationInstance::ConferenceReport(MonographFields::default()),
    );
    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(target.evidence, EvidenceKind::SearchMatch);
    assert_eq!(target.existing.identifier.as_str(), "proceedings");
    assert!(h.blobs.writes().is_empty());
}

#[tokio::test]
async fn ambiguous_cristin_identifier_is_reported() {
    let index = InMemoryIndex::default()
        .with_hits(&[("cristinIdentifier", "123")], &["first", "second"]);
    let store = InMemoryStore::default()
        .with(with_cristin(publication_titled("first", "Tidal flats"), "123"))
        .with(with_cristin(publication_titled("second", "Tidal flats"), "123"));
    let h = harness(index, store, AlwaysMatch);

    let mut incoming = bare_incoming();
    incoming.source.source_identifier = Some("123".to_string());

    let target = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target.evidence, EvidenceKind::SourceIdentifier);
    assert_eq!(target.existing.identifier.as_str(), "first");

    let writes = h.blobs.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, format!("{REPORT_ROOT}/Cristin-duplicates/2838.json"));
    assert_eq!(reported_ids(&writes[0].1), ["first", "second"]);
}

#[tokio::test]
async fn ambiguous_handle_is_reported() {
    let index = InMemoryIndex::default().with_hits(&[("handle", HANDLE)], &["first", "second"]);
    let store = InMemoryStore::default()
        .with(with_handle(publication_titled("first", "Tidal flats"), HANDLE))
        .with(with_handle(publication_titled("second", "Tidal flats"), HANDLE));
    let h = harness(index, store, AlwaysMatch);

    let target = h
        .matcher
        .resolve_existing_publication(&bare_incoming())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(target.evidence, EvidenceKind::StableIdentifier);
    assert_eq!(target.existing.identifier.as_str(), "first");

    let writes = h.blobs.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, format!("{REPORT_ROOT}/Handle-duplicates/2838.json"));
    assert_eq!(reported_ids(&writes[0].1), ["first", "second"]);
}

#[tokio::test]
async fn source_descriptive_fields_are_not_evidence() {
    let index = InMemoryIndex::default().with_hits(&[("doi", "10.1000/x")], &["a"]);
    let store = InMemoryStore::default().with(publication_titled("a", "Tidal flats"));
    let h = harness(index, store, AlwaysMatch);

    let mut incoming = bare_incoming();
    incoming.source.doi = Some("10.1000/x".to_string());
    incoming.source.isbns = vec!["9780306406157".to_string()];
    incoming.source.title = Some("Tidal flats".to_string());
    incoming.source.resource_type = Some("Journal article".to_string());

    assert!(h.matcher.resolve_existing_publication(&incoming).await.unwrap().is_none());
    assert_eq!(queried_params(&h.index), ["handle"]);
}

#[tokio::test]
async fn title_without_instance_type_abstains() {
    let h = harness(InMemoryIndex::default(), InMemoryStore::default(), AlwaysMatch);

    let mut incoming = bare_incoming();
    incoming.mapped.entity_description.main_title = Some("Tidal flats".to_string());

    assert!(h.matcher.resolve_existing_publication(&incoming).await.unwrap().is_none());
    assert_eq!(queried_params(&h.index), ["handle"]);
}

#[tokio::test]
async fn search_failure_stops_the_chain() {
    let h = harness(InMemoryIndex::default().failing(), InMemoryStore::default(), AlwaysMatch);

    let incoming = with_doi(bare_incoming(), "10.1000/x");
    let err = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap_err();

    match err {
        EngineError::Strategy { evidence, record, .. } => {
            assert_eq!(evidence, EvidenceKind::StableIdentifier);
            assert_eq!(record, HANDLE);
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(h.index.queries().len(), 1);
}

#[tokio::test]
async fn record_fetch_failure_propagates() {
    let index = InMemoryIndex::default().with_hits(&[("doi", "10.1000/x")], &["a"]);
    let h = harness(index, InMemoryStore::default().failing(), AlwaysMatch);

    let incoming = with_doi(bare_incoming(), "10.1000/x");
    let err = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Strategy {
            evidence: EvidenceKind::Doi,
            ..
        }
    ));
}

#[tokio::test]
async fn report_failure_fails_resolution() {
    let index = InMemoryIndex::default().with_hits(&[("doi", "10.1000/x")], &["a", "b"]);
    let store = InMemoryStore::default()
        .with(publication_titled("a", "Tidal flats"))
        .with(publication_titled("b", "Tidal flats"));
    let h = harness_with_blobs(index, store, AlwaysMatch, RecordingBlobStore::failing());

    let incoming = with_doi(bare_incoming(), "10.1000/x");
    let err = h
        .matcher
        .resolve_existing_publication(&incoming)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateReport { .. }));
}

#[tokio::test]
async fn custom_chain_runs_only_its_strategies() {
    let index = InMemoryIndex::default().with_hits(&[("doi", "10.1000/x")], &["a"]);
    let store = InMemoryStore::default().with(publication_titled("a", "Tidal flats"));
    let h = harness(index, store, AlwaysMatch);
    let matcher = h
        .matcher
        .with_chain(MatchingChain::new(vec![Box::new(DoiMatch)]));

    let incoming = with_doi(bare_incoming(), "10.1000/x");
    let target = matcher.resolve_existing_publication(&incoming).await.unwrap();
    assert_eq!(target.map(|t| t.evidence), Some(EvidenceKind::Doi));
    assert_eq!(queried_params(&h.index), ["doi"]);
}

#[test]
fn update_target_merges_into_existing_instance() {
    let mut existing = publication_titled("a", "Tidal flats");
    existing.publication.entity_description.reference = Some(Reference {
        publication_instance: Some(PublicationInstance::AcademicChapter(ChapterFields::default())),
        ..Default::default()
    });
    let target = UpdateTarget {
        evidence: EvidenceKind::Doi,
        existing,
    };
    let incoming = PublicationInstance::AcademicChapter(ChapterFields {
        pages: Some(Range::new("5", "20")),
    });

    assert_eq!(target.merged_instance(&incoming), incoming);

    let bare = UpdateTarget {
        evidence: EvidenceKind::Doi,
        existing: publication_titled("b", "Tidal flats"),
    };
    let article = PublicationInstance::AcademicArticle(ArticleFields::default());
    assert_eq!(bare.merged_instance(&article), article);
}
