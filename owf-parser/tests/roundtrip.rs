//! Serializer round trips over the sample corpus

use owf_parser::owf::testing::samples::{SampleKind, Samples};
use owf_parser::owf::testing::workspace_path;
use owf_parser::{parse, resolve, serialize, Variables};
use rstest::rstest;

fn assert_round_trip(source: &str) {
    let doc = parse(source).unwrap();
    let text = serialize(&doc);
    let reparsed = parse(&text).unwrap_or_else(|e| panic!("reparse failed: {}\n{}", e, text));
    assert_eq!(reparsed, doc, "round trip changed the document:\n{}", text);
    assert_eq!(serialize(&reparsed), text, "output is not idempotent");
}

#[rstest(
    kind,
    number,
    case(SampleKind::Endurance, 1),
    case(SampleKind::Endurance, 2),
    case(SampleKind::Strength, 1),
    case(SampleKind::Blocks, 1),
    case(SampleKind::Blocks, 2),
    case(SampleKind::Notes, 1),
    case(SampleKind::Notes, 2),
    case(SampleKind::Sessions, 1),
    case(SampleKind::Includes, 1),
    case(SampleKind::Includes, 2)
)]
fn element_samples_round_trip(kind: SampleKind, number: usize) {
    assert_round_trip(&Samples::load(kind, number).source());
}

#[test]
fn document_samples_round_trip() {
    for sample in Samples::all_documents() {
        assert_round_trip(&sample.source());
    }
}

#[test]
fn resolved_documents_round_trip() {
    let doc = Samples::document(1).parse();
    let resolved = resolve(&doc, &Variables::new()).unwrap();
    let reparsed = parse(&serialize(&resolved)).unwrap();
    assert_eq!(reparsed, resolved);
}

#[test]
fn test_full_week_canonical_form() {
    let source = std::fs::read_to_string(workspace_path("specs/v1/documents/01-full-week.owf"))
        .unwrap();
    let text = serialize(&parse(&source).unwrap());

    assert!(text.starts_with("---\nFTP: 250W\n1RM bench press: 100kg\n"));
    assert!(text.contains("\n- warmup 15min @60% of FTP\n"));
    assert!(text.contains("\n- emom 12min alternating:\n"));
    assert!(text.contains("\n  - box jump 10rep @24in\n"));
    assert!(text.contains("\n  - run 1mile\n"));
    assert!(text.ends_with("  - air squat 15rep\n"));
    assert!(!text.contains("\n\n\n"));
}

#[test]
fn session_sample_keeps_session_headings() {
    let text = serialize(&Samples::sessions(1).parse());
    assert!(text.contains("## Saturday Training\n"));
    assert!(text.contains("\n# Threshold Ride [bike]\n"));
    assert!(!text.contains("[combination]"));
}
