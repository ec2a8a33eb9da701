//! Lexical analyzer of SUS format.
//!
//! Raw [String] == [lex](TokenStream::parse_lex) ==> [`TokenStream`] == [parse](crate::parse) ==> [`SongData`](crate::model::SongData)
//!
//! Every line is classified on its own by its structural pattern. Lines which match no pattern
//! are kept as [`Token::Header`] or [`Token::NotACommand`], so the parser can ignore them.

pub mod cursor;
pub mod token;

use thiserror::Error;

use crate::command::mixin::SourceRangeMixin;

use self::{
    cursor::Cursor,
    token::{Token, TokenWithRange},
};

/// An error occurred when lexical analysis.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexError {
    /// The token was expected but not found.
    #[error("expected {message}, but not found at line {line}")]
    ExpectedToken {
        /// The line number of the token expected.
        line: usize,
        /// What the expected is.
        message: String,
    },
    /// Failed to read a BPM id as 2 digits of base 36 (`0-9A-Za-z`).
    #[error("expected id format is 2 digits of base 36 (`0-9A-Za-z`), but found `{id}` at line {line}")]
    OutOfBase36 {
        /// The line number.
        line: usize,
        /// The id found.
        id: String,
    },
}

/// A lex error with position information.
pub type LexErrorWithRange = SourceRangeMixin<LexError>;

/// type alias of `core::result::Result<T, LexErrorWithRange>`
pub(crate) type Result<T> = core::result::Result<T, LexErrorWithRange>;

/// The classified lines of a SUS source, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream<'a> {
    /// tokens
    pub tokens: Vec<TokenWithRange<'a>>,
}

impl<'a> TokenStream<'a> {
    /// Analyzes and classifies every line of the SUS format text.
    ///
    /// # Errors
    ///
    /// Returns [`LexErrorWithRange`] on the first line whose shape is recognized but whose value
    /// is malformed. There is no partial result.
    pub fn parse_lex(source: &'a str) -> Result<Self> {
        let mut cursor = Cursor::new(source);
        let mut tokens = vec![];
        while let Some(token) = Token::parse(&mut cursor)? {
            tokens.push(token);
        }
        Ok(Self { tokens })
    }

    /// Iterates the tokens without their ranges.
    pub fn contents(&self) -> impl Iterator<Item = &Token<'a>> {
        self.tokens.iter().map(SourceRangeMixin::content)
    }
}

impl<'a> IntoIterator for TokenStream<'a> {
    type Item = TokenWithRange<'a>;
    type IntoIter = std::vec::IntoIter<TokenWithRange<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strict_num_extended::FinF64;

    use crate::command::{BpmId, channel::Channel, time::Track};

    use super::{LexError, TokenStream, token::Token::*};

    #[test]
    fn simple() {
        const SRC: &str = r#"
This file was generated by an editor.
#TITLE "BAR(^^)"
#ARTIST MikuroXina
#DESIGNER someone
#WAVEOFFSET 0.1
#REQUEST "ticks_per_beat 480"

#00002: 4
#BPM01: 120
#00008: 01

#00010:1200001200
#00131a:1300
#00231a:2300
"#;

        let tokens = TokenStream::parse_lex(SRC).expect("SRC must be lexed");
        let fin = |value: f64| FinF64::new(value).expect("finite");

        assert_eq!(
            tokens.contents().cloned().collect::<Vec<_>>(),
            vec![
                NotACommand("This file was generated by an editor."),
                Title("BAR(^^)"),
                Artist("MikuroXina"),
                Designer("someone"),
                WaveOffset(fin(0.1)),
                Header {
                    name: "REQUEST",
                    args: "\"ticks_per_beat 480\"",
                },
                BeatsPerMeasure {
                    track: Track(0),
                    beats: fin(4.0),
                },
                BpmDef {
                    id: BpmId::try_from("01").unwrap(),
                    bpm: fin(120.0),
                },
                Message {
                    track: Track(0),
                    channel: Channel::BpmChange,
                    message: "01",
                },
                Message {
                    track: Track(0),
                    channel: Channel::Tap { lane: 0 },
                    message: "1200001200",
                },
                Message {
                    track: Track(1),
                    channel: Channel::Slide {
                        lane: 1,
                        channel: 10
                    },
                    message: "1300",
                },
                Message {
                    track: Track(2),
                    channel: Channel::Slide {
                        lane: 1,
                        channel: 10
                    },
                    message: "2300",
                },
            ]
        );
    }

    #[test]
    fn error_has_line_and_range() {
        const SRC: &str = "#TITLE a\n#BPM01:abc\n";
        let err = TokenStream::parse_lex(SRC).unwrap_err();
        assert_eq!(
            err.content(),
            &LexError::ExpectedToken {
                line: 2,
                message: "decimal BPM".into(),
            }
        );
        assert_eq!(err.as_span(), (9, 19));
    }
}
