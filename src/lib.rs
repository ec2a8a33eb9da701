//! The SUS chart format parser, which resolves every note onto the timeline in seconds.
//!
//! # Usage
//!
//! ```
//! use sus_rs::{SusOutput, parse_sus};
//!
//! let source = "#TITLE \"Song\"\n#BPM01:120\n#00008:01\n#00010:0012\n";
//! let SusOutput { song, warnings } = parse_sus(source).expect("the chart must be valid");
//! assert_eq!(song.info.title.as_deref(), Some("Song"));
//! assert_eq!(song.notes[0].first_time(), 1.0);
//! assert!(warnings.is_empty());
//! ```
//!
//! Parsing has two phases, lexical analyzing and token parsing:
//!
//! - [`lex`] classifies each line of the source into a token, by its structural pattern.
//! - [`parse`] builds the measure timeline and the BPM timeline from the tokens, then decodes
//!   the lane events into notes placed onto both beats and seconds.
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `str` to input).
//! - Lines which match no pattern are ignored.
//! - Non-fatal oddities, such as a slide never closed, are reported as warnings with their
//!   source ranges, and never abort parsing.

pub mod command;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod lex;
pub mod model;
pub mod parse;
pub mod prelude;

use thiserror::Error;

use self::{
    lex::{LexErrorWithRange, TokenStream},
    model::SongData,
    parse::{
        ParseConfig, ParseErrorWithRange, ParseOutput, ParseWarningWithRange, default_config,
        prompt::Prompter,
    },
};

/// A fatal error occurred when parsing the SUS format file. No partial result is available.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SusError {
    /// An error comes from lexical analyzer.
    #[error("Error: lex: {0}")]
    Lex(#[from] LexErrorWithRange),
    /// An error comes from syntax parser.
    #[error("Error: parse: {0}")]
    Parse(#[from] ParseErrorWithRange),
}

/// A non-fatal condition occurred when parsing the SUS format file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SusWarning {
    /// A warning comes from syntax parser.
    #[error("Warn: parse: {0}")]
    Parse(#[from] ParseWarningWithRange),
}

/// Output of parsing a SUS file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SusOutput {
    /// The parsed song data.
    pub song: SongData,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<SusWarning>,
}

/// Parses a SUS file from source text, with [`default_config`].
///
/// # Errors
///
/// Returns [`SusError`] if a line has a malformed value, or the BPM timeline cannot be built.
pub fn parse_sus(source: &str) -> Result<SusOutput, SusError> {
    parse_sus_with_config(source, default_config())
}

/// Parses a SUS file from source text, with the config.
///
/// A step of [`parse_sus`]
///
/// # Errors
///
/// Returns [`SusError`] if a line has a malformed value, the BPM timeline cannot be built, or the
/// prompter chose to halt.
pub fn parse_sus_with_config<P: Prompter>(
    source: &str,
    config: ParseConfig<P>,
) -> Result<SusOutput, SusError> {
    let TokenStream { tokens } = TokenStream::parse_lex(source)?;
    let ParseOutput {
        song,
        parse_warnings,
    } = SongData::from_token_stream(&tokens, config)?;
    Ok(SusOutput {
        song,
        warnings: parse_warnings.into_iter().map(SusWarning::Parse).collect(),
    })
}
