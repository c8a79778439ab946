//! Include resolution through the loader

use owf_parser::owf::loader::{load, DocumentLoader, LoaderError};
use owf_parser::owf::testing::assert_doc;
use owf_parser::owf::testing::samples::Samples;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_includes_01_same_document() {
    let doc = Samples::includes(1).load();

    assert_doc(&doc).workout_count(3).workout(2, |w| {
        w.name("Session")
            .step_count(3)
            .step(0, |s| {
                s.assert_include()
                    .workout_name("Warm Up")
                    .resolved_to("Warm Up", 1);
            })
            .step(1, |s| {
                s.assert_rest().duration_secs(120.0);
            })
            .step(2, |s| {
                s.assert_include().resolved_to("Cool Down", 1);
            });
    });
}

#[test]
fn test_includes_02_from_file() {
    let doc = Samples::includes(2).load();

    assert_doc(&doc).workout(0, |w| {
        w.step(0, |s| {
            s.assert_include()
                .workout_name("Mobility Flow")
                .resolved_to("Mobility Flow", 2);
        });
    });
}

#[test]
fn parse_does_not_resolve() {
    let doc = Samples::includes(2).parse();

    assert_doc(&doc).workout(0, |w| {
        w.step(0, |s| {
            s.assert_include().unresolved();
        });
    });
}

#[test]
fn includes_nest_across_directories() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("core.owf"),
        "# Core\n- plank 60s\n- include: Breathing\n",
    )
    .unwrap();
    fs::write(dir.path().join("breathing.owf"), "# Breathing\n- box breathing 5min\n").unwrap();
    fs::write(
        dir.path().join("week.owf"),
        "## Monday\n# Ride [bike]\n- bike 1h\n# Strength [strength]\n- include: Core\n",
    )
    .unwrap();

    let doc = load(dir.path().join("week.owf")).unwrap();
    assert_doc(&doc).workout(0, |w| {
        w.nested_workout(1, |w| {
            w.step(0, |s| {
                s.assert_include().resolved_to("Core", 2);
            });
        });
    });
}

#[test]
fn test_self_include_is_circular() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loop.owf");
    fs::write(&path, "# Day\n- include: loop\n").unwrap();

    let err = load(&path).unwrap_err();
    let LoaderError::Include { message, .. } = err else {
        panic!("expected include error, got {:?}", err);
    };
    assert_eq!(message, "Circular include detected: 'loop'");
}

#[test]
fn string_sources_resolve_same_document_includes() {
    let doc = DocumentLoader::from_string(Samples::includes(1).source())
        .load()
        .unwrap();
    assert_doc(&doc).workout(2, |w| {
        w.step(2, |s| {
            s.assert_include().resolved_to("Cool Down", 1);
        });
    });
}
