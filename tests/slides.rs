use pretty_assertions::assert_eq;
use sus_rs::{SusOutput, SusWarning, model::notes::Note, parse::ParseWarning, parse_sus};

fn slides(source: &str) -> (Vec<(u8, f64, f64)>, Vec<SusWarning>) {
    let SusOutput { song, warnings } = parse_sus(source).expect("must be parsed");
    let slides = song
        .notes
        .iter()
        .filter_map(|note| match note {
            Note::Slide(slide) => Some((slide.channel, slide.start.beat, slide.end.beat)),
            _ => None,
        })
        .collect();
    (slides, warnings)
}

#[test]
fn start_and_end_on_separate_lines() {
    let (slides, warnings) = slides("#BPM01:120\n#00008:01\n#000301:10\n#001321:20\n");
    assert_eq!(slides, vec![(1, 0.0, 4.0)]);
    assert_eq!(warnings, vec![]);
}

#[test]
fn closed_within_a_line_does_not_steal_an_open_slide() {
    const SOURCE: &str = "\
#BPM01:120
#00008:01
#000301:1000
#000311:00102000
#001301:20
";
    let (slides, warnings) = slides(SOURCE);
    assert_eq!(slides, vec![(1, 0.0, 4.0), (1, 1.0, 2.0)]);
    assert_eq!(warnings, vec![]);
}

#[test]
fn channel_is_reused_after_closed() {
    const SOURCE: &str = "\
#BPM01:120
#00008:01
#000302:1020
#001302:1000
#002302:2000
";
    let (slides, warnings) = slides(SOURCE);
    assert_eq!(slides, vec![(2, 0.0, 2.0), (2, 4.0, 8.0)]);
    assert_eq!(warnings, vec![]);
}

#[test]
fn end_is_not_before_start() {
    let source = include_str!("files/tempo_changes.sus");
    let SusOutput { song, .. } = parse_sus(source).unwrap();
    for note in &song.notes {
        if let Note::Slide(slide) = note {
            assert!(slide.start.beat <= slide.end.beat);
            assert!(slide.start.seconds <= slide.end.seconds);
        }
    }
}

#[test]
fn second_start_drops_the_first() {
    const SOURCE: &str = "#BPM01:120\n#00008:01\n#000303:1010\n#001303:20\n";
    let (slides, warnings) = slides(SOURCE);
    assert_eq!(slides, vec![(3, 2.0, 4.0)]);
    assert!(matches!(
        warnings.as_slice(),
        [SusWarning::Parse(warning)]
            if matches!(warning.content(), ParseWarning::UnclosedSlide { channel: 3, .. })
    ));
}
