//! Definitions of the token in SUS format.

use strict_num_extended::FinF64;

use crate::command::{
    BpmId,
    channel::{Channel, read_channel},
    mixin::SourceRangeMixin,
    time::Track,
};

use super::{LexError, Result, cursor::Cursor};

/// A token content of SUS format. One token is classified from one line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Token<'a> {
    /// `#ARTIST [string]`. Defines the artist name of the music.
    Artist(&'a str),
    /// `#XXX02:[f64]`. Defines the number of beats in the measure `XXX` and after.
    BeatsPerMeasure {
        /// The measure where the definition starts.
        track: Track,
        /// The number of beats in a measure.
        beats: FinF64,
    },
    /// `#BPMxx:[f64]`. Defines the BPM to be placed by a BPM change message.
    BpmDef {
        /// The base-36 id of the definition.
        id: BpmId,
        /// The beats per minute.
        bpm: FinF64,
    },
    /// `#DESIGNER [string]`. Defines the chart designer name.
    Designer(&'a str),
    /// `#[name] [args]` Other command line starts from `#`.
    Header {
        /// String after `#` and until the first whitespace.
        name: &'a str,
        /// String after `#name` and whitespaces.
        args: &'a str,
    },
    /// `#XXXYY:ZZ...`. Defines the message which places the objects onto the score. `XXX` is the
    /// measure, `YY` is the channel, and `ZZ...` is the two-character slot sequence.
    Message {
        /// The measure, starts from 0.
        track: Track,
        /// The channel commonly expresses what kind of object and which lane.
        channel: Channel,
        /// The slot sequence.
        message: &'a str,
    },
    /// Non-empty lines that not starts in `'#'`.
    NotACommand(&'a str),
    /// `#TITLE [string]`. Defines the title of the music.
    Title(&'a str),
    /// `#WAVEOFFSET [f64]`. Defines the seconds from the start of the audio to the beat 0.
    WaveOffset(FinF64),
}

/// A token with position information.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

/// Parses a finite decimal, such as `120` or `-0.25`.
pub(crate) fn parse_finite(text: &str) -> Option<FinF64> {
    let value: f64 = text.trim().parse().ok()?;
    value
        .is_finite()
        .then(|| FinF64::new(value).expect("finiteness checked above"))
}

/// Splits `BPMxx:[value]` into the two-character id and the value, or `None` for other shapes.
fn split_bpm_def(command: &str) -> Option<(&str, &str)> {
    let (head, value) = command.split_once(':')?;
    let id = head
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("BPM"))
        .and_then(|_| head.get(3..))?;
    (id.chars().count() == 2).then_some((id, value))
}

/// Strips the surrounding double quotes of a string argument, if any.
fn unquote(args: &str) -> &str {
    args.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(args)
}

impl<'a> Token<'a> {
    /// Classifies the next non-empty line. Returns `Ok(None)` if there is no more line.
    pub(crate) fn parse(c: &mut Cursor<'a>) -> Result<Option<TokenWithRange<'a>>> {
        let (range, line) = loop {
            match c.next_line_with_range() {
                Some((_, "")) => continue,
                Some(next) => break next,
                None => return Ok(None),
            }
        };
        let Some(command) = line.strip_prefix('#') else {
            return Ok(Some(SourceRangeMixin::new(Self::NotACommand(line), range)));
        };
        let (name, args) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, args)| (name, args.trim()));

        if let Some((id, value)) = split_bpm_def(command) {
            let token = Self::parse_bpm_def(c, id, value, range.clone())?;
            return Ok(Some(SourceRangeMixin::new(token, range)));
        }

        let upper = name.to_ascii_uppercase();
        let token = match upper.as_str() {
            "WAVEOFFSET" => {
                let offset = args.split_whitespace().next().and_then(parse_finite);
                Self::WaveOffset(
                    offset.ok_or_else(|| {
                        c.make_err_expected_token(range.clone(), "decimal seconds")
                    })?,
                )
            }
            "TITLE" => Self::Title(unquote(args)),
            "ARTIST" => Self::Artist(unquote(args)),
            "DESIGNER" => Self::Designer(unquote(args)),
            _ => match Self::parse_message(command) {
                Some((track, "02", value)) => {
                    let beats = parse_finite(value).ok_or_else(|| {
                        c.make_err_expected_token(range.clone(), "decimal beats per measure")
                    })?;
                    Self::BeatsPerMeasure { track, beats }
                }
                Some((track, channel, message))
                    if !message.is_empty() && message.chars().all(|ch| ch.is_ascii_alphanumeric()) =>
                {
                    match read_channel(channel) {
                        Some(channel) => Self::Message {
                            track,
                            channel,
                            message,
                        },
                        None => Self::Header { name, args },
                    }
                }
                _ => Self::Header { name, args },
            },
        };
        Ok(Some(SourceRangeMixin::new(token, range)))
    }

    fn parse_bpm_def(
        c: &Cursor<'a>,
        id: &str,
        value: &str,
        range: std::ops::Range<usize>,
    ) -> Result<Self> {
        let id = BpmId::try_from(id).map_err(|id| {
            SourceRangeMixin::new(
                LexError::OutOfBase36 {
                    line: c.line() - 1,
                    id: id.to_owned(),
                },
                range.clone(),
            )
        })?;
        let bpm =
            parse_finite(value).ok_or_else(|| c.make_err_expected_token(range, "decimal BPM"))?;
        Ok(Self::BpmDef { id, bpm })
    }

    /// Splits `XXXYY:ZZ...` into the measure, the channel and the trimmed message.
    fn parse_message(command: &'a str) -> Option<(Track, &'a str, &'a str)> {
        let (head, message) = command.split_once(':')?;
        let measure = head.get(..3)?;
        let channel = head.get(3..)?;
        if !measure.chars().all(|ch| ch.is_ascii_digit())
            || channel.is_empty()
            || !channel.chars().all(|ch| ch.is_ascii_alphanumeric())
        {
            return None;
        }
        let track = measure.parse().ok()?;
        Some((Track(track), channel, message.trim()))
    }
}
