//! Note attachment: steps, blocks and workouts

use owf_parser::owf::testing::assert_doc;
use owf_parser::owf::testing::samples::Samples;

#[test]
fn test_notes_01_step_block_and_workout() {
    let doc = Samples::notes(1).parse();

    assert_doc(&doc).workout(0, |w| {
        w.notes(&["Note 1.", "Note 2."])
            .step_count(2)
            .step(0, |s| {
                s.assert_endurance().notes(&["keep cadence above 90"]);
            })
            .step(1, |s| {
                s.assert_block()
                    .notes(&["hold the last one"])
                    .step_count(2)
                    .step(0, |s| {
                        s.assert_endurance().notes(&[]);
                    });
            });
    });
}

#[test]
fn test_notes_02_single_trailing_note_stays_on_step() {
    let doc = Samples::notes(2).parse();

    assert_doc(&doc).workout(0, |w| {
        w.notes(&[]).step(0, |s| {
            s.assert_endurance().notes(&["Great run!"]);
        });
    });
}
