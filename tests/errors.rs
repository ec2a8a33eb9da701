use pretty_assertions::assert_eq;
use sus_rs::{SusError, command::BpmId, lex::LexError, parse::ParseError, parse_sus};

fn parse_error(source: &str) -> (ParseError, &str) {
    match parse_sus(source) {
        Err(SusError::Parse(err)) => (err.content().clone(), &source[err.range().clone()]),
        other => panic!("expected a parse error, but got {other:?}"),
    }
}

#[test]
fn malformed_values_are_lex_errors() {
    let cases = [
        ("#BPM01:fast\n", 1, "decimal BPM"),
        ("#TITLE x\n#WAVEOFFSET soon\n", 2, "decimal seconds"),
        ("\n\n#00002:four\n", 3, "decimal beats per measure"),
    ];
    for (source, line, message) in cases {
        let Err(SusError::Lex(err)) = parse_sus(source) else {
            panic!("expected a lex error: {source:?}");
        };
        assert_eq!(
            err.content(),
            &LexError::ExpectedToken {
                line,
                message: message.to_string(),
            }
        );
    }
}

#[test]
fn bpm_id_out_of_base36() {
    let Err(SusError::Lex(err)) = parse_sus("#BPM!1:120\n") else {
        panic!("expected a lex error");
    };
    assert_eq!(
        err.content(),
        &LexError::OutOfBase36 {
            line: 1,
            id: "!1".to_string(),
        }
    );
}

#[test]
fn no_bpm_definition() {
    let (err, _) = parse_error("#00010:10\n");
    assert_eq!(err, ParseError::NoBpmDefinition);
}

#[test]
fn undefined_bpm_placement() {
    let (err, line) = parse_error("#BPM01:120\n#00008:0102\n");
    assert_eq!(err, ParseError::UndefinedBpm(BpmId::try_from("02").unwrap()));
    assert_eq!(line, "#00008:0102");
}

#[test]
fn non_positive_bpm() {
    let (err, line) = parse_error("#BPM01:120\n#BPM02:-60\n#00008:01\n");
    assert_eq!(err, ParseError::NonPositiveBpm(BpmId::try_from("02").unwrap()));
    assert_eq!(line, "#BPM02:-60");
}

#[test]
fn unrecognized_lines_are_ignored() {
    const SOURCE: &str = "\
free text
#REQUEST \"mertonome enabled\"
#BPMINFO something
#BPM01
#00005:00
#00020:1010
#BPM01:120
";
    let output = parse_sus(SOURCE).expect("must be parsed");
    assert_eq!(output.song.notes, vec![]);

    let output = parse_sus("#BPM01:120\n#00008:01\n#BPMINFO something\n#00010:12\n")
        .expect("must be parsed");
    assert_eq!(output.song.notes.len(), 1);
    assert_eq!(output.warnings, vec![]);
}

#[test]
fn error_messages() {
    let err = parse_sus("#BPM01:120\n#00008:02\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: parse: undefined BPM: #BPM02 at indices [11, 20)"
    );
}
