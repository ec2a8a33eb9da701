//! Parsing [`SongData`] from [`TokenStream`](crate::lex::TokenStream).
//!
//! Raw [String] == [lex](crate::lex) ==> [`TokenStream`](crate::lex::TokenStream) == [parse](SongData::from_token_stream) ==> [`SongData`] (in [`ParseOutput`])
//!
//! The tokens are read twice. The first pass collects the beats per measure, because placing any
//! object onto the beat needs the whole measure timeline. The second pass collects the rest, then
//! the BPM timeline is built and every note is placed onto seconds.

pub mod message;
pub mod prompt;

mod bpm;
mod notes;

use std::collections::{BTreeMap, btree_map::Entry};

use thiserror::Error;

use crate::{
    command::{
        BpmId,
        channel::Channel,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::{ObjTime, Track},
    },
    lex::token::{Token, TokenWithRange},
    model::{
        SongData, SongInfo,
        bpm::BpmTimeline,
        measure::{MeasureAnchor, MeasureTimeline},
    },
};

use self::{
    bpm::BpmDefs,
    message::decode_message,
    notes::NoteAssembler,
    prompt::{AlwaysUseNewer, Prompter, PromptingDuplication},
};

/// A fatal error occurred when parsing the [`TokenStream`](crate::lex::TokenStream).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// A BPM change message placed the id which is not defined by `#BPMxx`.
    #[error("undefined BPM: #BPM{0}")]
    UndefinedBpm(BpmId),
    /// The BPM is zero or negative, so the beats cannot be converted into seconds.
    #[error("non-positive BPM: #BPM{0}")]
    NonPositiveBpm(BpmId),
    /// No `#BPMxx` is defined.
    #[error("no BPM definition found")]
    NoBpmDefinition,
    /// The [`prompt::Prompter`] chose to halt on a duplication.
    #[error("parsing halted by the prompter")]
    Halted,
}

/// A parse error with position information.
pub type ParseErrorWithRange = SourceRangeMixin<ParseError>;

/// Type alias of `core::result::Result<T, ParseErrorWithRange>`
pub(crate) type Result<T> = core::result::Result<T, ParseErrorWithRange>;

/// A non-fatal condition found when parsing. The result is still produced.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// A slide started but never ended on its channel, or another start came on the channel before
    /// the end. The slide is dropped.
    #[error("slide on channel {channel} started at {time:?} is never closed")]
    UnclosedSlide {
        /// The pairing channel.
        channel: u8,
        /// Where the slide started.
        time: ObjTime,
    },
    /// A slide ended without its start on the channel. The end is ignored.
    #[error("slide end on channel {channel} at {time:?} has no start")]
    UnmatchedSlideEnd {
        /// The pairing channel.
        channel: u8,
        /// Where the slide ended.
        time: ObjTime,
    },
    /// The BPM is defined but never placed, so it does not change the tempo.
    #[error("BPM #BPM{0} is never placed")]
    UnplacedBpm(BpmId),
    /// No BPM is placed, so the lowest defined one is used from the beat 0.
    #[error("no BPM is placed, using #BPM{0} from the beginning")]
    ImplicitInitialBpm(BpmId),
    /// `#BPMxx` is defined twice, that the prompter chose to warn.
    #[error("duplicating BPM definition: #BPM{0}")]
    DuplicatingBpmDef(BpmId),
    /// A BPM id is placed twice, that the prompter chose to warn.
    #[error("duplicating BPM placement: #BPM{0}")]
    DuplicatingBpmPlacement(BpmId),
    /// The beats per measure is defined twice for a measure, that the prompter chose to warn.
    #[error("duplicating beats per measure definition: {0}")]
    DuplicatingMeasureDef(Track),
}

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// The settings of parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseConfig<P> {
    prompter: P,
}

/// The default settings, whose later declarations overwrite earlier ones.
#[must_use]
pub const fn default_config() -> ParseConfig<AlwaysUseNewer> {
    ParseConfig {
        prompter: AlwaysUseNewer,
    }
}

impl<P: Prompter> ParseConfig<P> {
    /// Replaces the prompter, which handles duplicated declarations.
    #[must_use]
    pub fn prompter<P2: Prompter>(self, prompter: P2) -> ParseConfig<P2> {
        ParseConfig { prompter }
    }
}

impl Default for ParseConfig<AlwaysUseNewer> {
    fn default() -> Self {
        default_config()
    }
}

/// Sus Parse Output
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ParseOutput {
    /// The output song.
    pub song: SongData,
    /// Warnings that occurred during parsing.
    pub parse_warnings: Vec<ParseWarningWithRange>,
}

impl SongData {
    /// Parses a token stream into [`SongData`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorWithRange`] if the BPM timeline cannot be built, or the prompter chose to
    /// halt. There is no partial result.
    pub fn from_token_stream<'a, P: Prompter>(
        tokens: impl IntoIterator<Item = &'a TokenWithRange<'a>>,
        config: ParseConfig<P>,
    ) -> Result<ParseOutput> {
        let prompter = &config.prompter;
        let tokens: Vec<_> = tokens.into_iter().collect();
        let mut parse_warnings = vec![];

        let measure_timeline = collect_measures(&tokens, prompter, &mut parse_warnings)?;

        let mut info = SongInfo::default();
        let mut bpm_defs = BpmDefs::default();
        let mut assembler = NoteAssembler::default();
        for token in &tokens {
            let range = token.range().clone();
            match token.content() {
                Token::Title(title) => info.title = Some((*title).to_owned()),
                Token::Artist(artist) => info.artist = Some((*artist).to_owned()),
                Token::Designer(designer) => info.designer = Some((*designer).to_owned()),
                Token::WaveOffset(offset) => info.wave_offset = offset.as_f64(),
                Token::BpmDef { id, bpm } => {
                    bpm_defs.define(*id, *bpm, range, prompter, &mut parse_warnings)?;
                }
                Token::Message {
                    track,
                    channel,
                    message,
                } => {
                    let objs = decode_message(*track, message, &measure_timeline);
                    match *channel {
                        Channel::BpmChange => {
                            for obj in objs {
                                let Some(id) = BpmId::new(obj.value()) else {
                                    continue;
                                };
                                bpm_defs.place(id, obj.time, obj.beat, range.clone());
                            }
                        }
                        Channel::Tap { lane } => assembler.on_tap(lane, objs),
                        Channel::Slide { lane, channel } => {
                            assembler.on_slide(lane, channel, objs, range);
                        }
                        Channel::BeatsPerMeasure | Channel::Unsupported { .. } => {}
                    }
                }
                Token::BeatsPerMeasure { .. } | Token::Header { .. } | Token::NotACommand(_) => {}
            }
        }

        let anchors = bpm_defs.into_anchors(prompter, &mut parse_warnings)?;
        let bpm_timeline = BpmTimeline::new(anchors, info.wave_offset)
            .ok_or_else(|| ParseError::NoBpmDefinition.into_wrapper_range(0..0))?;

        let mut measure_timeline = measure_timeline;
        for anchor in measure_timeline.anchors_mut() {
            anchor.seconds = bpm_timeline.beat_to_sec(anchor.beat);
        }

        let (mut notes, note_warnings) = assembler.finish();
        parse_warnings.extend(note_warnings);
        for note in &mut notes {
            note.resolve_seconds(&bpm_timeline);
        }
        notes.sort_by(|a, b| a.first_time().total_cmp(&b.first_time()));

        Ok(ParseOutput {
            song: SongData {
                info,
                notes,
                bpm_timeline,
                measure_timeline,
            },
            parse_warnings,
        })
    }
}

/// Collects `#XXX02:n` into the measure timeline, in measure order.
fn collect_measures(
    tokens: &[&TokenWithRange<'_>],
    prompter: &impl Prompter,
    warnings: &mut Vec<ParseWarningWithRange>,
) -> Result<MeasureTimeline> {
    let mut defs = BTreeMap::new();
    for token in tokens {
        let Token::BeatsPerMeasure { track, beats } = token.content() else {
            continue;
        };
        match defs.entry(*track) {
            Entry::Vacant(entry) => {
                entry.insert(*beats);
            }
            Entry::Occupied(mut entry) => {
                let duplication = PromptingDuplication::BeatsPerMeasure {
                    track: *track,
                    older: entry.get(),
                    newer: beats,
                };
                let warning = duplication.to_warning();
                if let Some(warning) = prompter
                    .handle_duplication(duplication)
                    .apply(entry.get_mut(), *beats, warning)
                    .map_err(|err| err.into_wrapper(*token))?
                {
                    warnings.push(warning.into_wrapper(*token));
                }
            }
        }
    }
    Ok(MeasureTimeline::new(
        defs.into_iter()
            .map(|(track, beats)| MeasureAnchor::new(track.0 as f64, beats))
            .collect(),
    ))
}
