//! Prelude module for the crate.
//!
//! This module re-exports the public types for convenient access.
//! You can use `use sus_rs::prelude::*;` to import them at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_sus_warnings};

pub use crate::{
    SusError, SusOutput, SusWarning,
    command::{
        BpmId, base36_digit,
        channel::{Channel, read_channel},
        digit_to_base36,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::{ObjTime, Track},
    },
    lex::{
        LexError, LexErrorWithRange, TokenStream,
        cursor::Cursor,
        token::{Token, TokenWithRange},
    },
    model::{
        SongData, SongInfo,
        bpm::{BpmAnchor, BpmTimeline},
        measure::{DEFAULT_BEATS_PER_MEASURE, MeasureAnchor, MeasureTimeline},
        notes::{Note, NotePoint, Slide, Tap},
        timeline::Anchor,
    },
    parse::{
        ParseConfig, ParseError, ParseErrorWithRange, ParseOutput, ParseWarning,
        ParseWarningWithRange, default_config,
        message::{LaneObj, decode_message},
        prompt::{
            AlwaysHalt, AlwaysUseNewer, AlwaysUseOlder, AlwaysWarnAndUseNewer,
            AlwaysWarnAndUseOlder, DuplicationWorkaround, Prompter, PromptingDuplication,
        },
    },
    parse_sus, parse_sus_with_config,
};
