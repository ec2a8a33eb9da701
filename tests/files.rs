use std::num::NonZeroU64;

use pretty_assertions::assert_eq;
use sus_rs::{
    SusOutput, SusWarning,
    command::{BpmId, mixin::SourceRangeMixinExt, time::ObjTime},
    model::notes::{Note, NotePoint, Slide, Tap},
    parse::ParseWarning,
    parse_sus,
};

fn range_of(source: &str, line: &str) -> std::ops::Range<usize> {
    let start = source.find(line).expect("line must be in source");
    start..start + line.len()
}

fn point(lane: u8, width: u8, beat: f64, seconds: f64) -> NotePoint {
    NotePoint {
        lane,
        width,
        beat,
        seconds,
    }
}

#[test]
fn test_tempo_changes() {
    let source = include_str!("files/tempo_changes.sus");
    let SusOutput { song, warnings } = parse_sus(source).expect("must be parsed");
    assert_eq!(warnings, vec![]);

    assert_eq!(song.info.title.as_deref(), Some("Tempo Changes"));
    assert_eq!(song.info.artist.as_deref(), Some("Someone"));
    assert_eq!(song.info.designer.as_deref(), Some("Chart Maker"));
    assert_eq!(song.info.wave_offset, 0.0);

    let measures: Vec<_> = song
        .measure_anchors()
        .iter()
        .map(|anchor| (anchor.measure, anchor.beat, anchor.seconds))
        .collect();
    assert_eq!(measures, vec![(0.0, 0.0, 0.0), (2.0, 8.0, 4.0)]);

    let bpms: Vec<_> = song
        .bpm_anchors()
        .iter()
        .map(|anchor| (anchor.id.to_string(), anchor.beat, anchor.seconds))
        .collect();
    assert_eq!(
        bpms,
        vec![("01".to_string(), 0.0, 0.0), ("02".to_string(), 8.0, 4.0)]
    );

    assert_eq!(
        song.notes,
        vec![
            Note::Tap(Tap {
                point: point(0, 4, 0.0, 0.0)
            }),
            Note::Slide(Slide {
                channel: 5,
                start: point(1, 3, 2.0, 1.0),
                end: point(4, 3, 9.5, 4.375),
            }),
            Note::Tap(Tap {
                point: point(2, 2, 4.0, 2.0)
            }),
            Note::Slide(Slide {
                channel: 10,
                start: point(0, 2, 5.0, 2.5),
                end: point(0, 2, 7.0, 3.5),
            }),
            Note::Tap(Tap {
                point: point(8, 3, 11.0, 4.75)
            }),
        ]
    );
    assert_eq!(song.last_time(), Some(4.75));
}

#[test]
fn test_truncated() {
    let source = include_str!("files/truncated.sus");
    let SusOutput { song, warnings } = parse_sus(source).expect("must be parsed");

    assert_eq!(
        song.notes,
        vec![Note::Slide(Slide {
            channel: 2,
            start: point(1, 3, 0.0, 0.0),
            end: point(0, 3, 4.0, 1.6),
        })]
    );
    let time = |track, numerator, denominator| {
        ObjTime::new(track, numerator, NonZeroU64::new(denominator).unwrap()).unwrap()
    };
    assert_eq!(
        warnings,
        vec![
            SusWarning::Parse(
                ParseWarning::UnplacedBpm(BpmId::try_from("02").unwrap())
                    .into_wrapper_range(range_of(source, "#BPM02:75")),
            ),
            SusWarning::Parse(
                ParseWarning::UnmatchedSlideEnd {
                    channel: 3,
                    time: time(3, 0, 1),
                }
                .into_wrapper_range(range_of(source, "#003303:22")),
            ),
            SusWarning::Parse(
                ParseWarning::UnclosedSlide {
                    channel: 2,
                    time: time(2, 0, 2),
                }
                .into_wrapper_range(range_of(source, "#002302:1300")),
            ),
        ]
    );
}

#[test]
fn test_offset_crlf() {
    let source = include_str!("files/offset_crlf.sus");
    let SusOutput { song, warnings } = parse_sus(source).expect("must be parsed");

    assert_eq!(song.info.title.as_deref(), Some("offset"));
    assert_eq!(song.info.wave_offset, 10.0);
    assert_eq!(
        warnings,
        vec![SusWarning::Parse(
            ParseWarning::ImplicitInitialBpm(BpmId::try_from("01").unwrap())
                .into_wrapper_range(range_of(source, "#BPM01:120")),
        )]
    );
    let seconds: Vec<_> = song.notes.iter().map(Note::first_time).collect();
    assert_eq!(seconds, vec![-10.0, -9.0]);
}
