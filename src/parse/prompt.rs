//! Prompting interface and utilities.
//!
//! An object implementing [`Prompter`] is carried by [`super::ParseConfig`]. It is used to handle
//! duplicated declarations on parsing the SUS file.

use strict_num_extended::FinF64;

use crate::command::{
    BpmId,
    time::{ObjTime, Track},
};

use super::{ParseError, ParseWarning};

/// An interface to prompt about handling conflicts on the SUS file.
pub trait Prompter {
    /// Determines a [`DuplicationWorkaround`] for duplicating conflicts.
    fn handle_duplication(&self, duplication: PromptingDuplication) -> DuplicationWorkaround;
}

impl<P: Prompter + ?Sized> Prompter for &P {
    fn handle_duplication(&self, duplication: PromptingDuplication) -> DuplicationWorkaround {
        (**self).handle_duplication(duplication)
    }
}

/// It represents that there is a duplicated declaration on the SUS file.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PromptingDuplication<'a> {
    /// `#BPMxx` is defined twice.
    BpmDef {
        /// Duplicated BPM id.
        id: BpmId,
        /// Existing definition.
        older: &'a FinF64,
        /// Incoming definition.
        newer: &'a FinF64,
    },
    /// A BPM id is placed twice by `#XXX08` messages.
    BpmPlacement {
        /// Duplicated BPM id.
        id: BpmId,
        /// Existing placement.
        older: ObjTime,
        /// Incoming placement.
        newer: ObjTime,
    },
    /// `#XXX02` is defined twice for a measure.
    BeatsPerMeasure {
        /// Duplicated measure.
        track: Track,
        /// Existing definition.
        older: &'a FinF64,
        /// Incoming definition.
        newer: &'a FinF64,
    },
}

impl PromptingDuplication<'_> {
    /// The warning reported when the workaround asks to warn.
    #[must_use]
    pub const fn to_warning(&self) -> ParseWarning {
        match *self {
            Self::BpmDef { id, .. } => ParseWarning::DuplicatingBpmDef(id),
            Self::BpmPlacement { id, .. } => ParseWarning::DuplicatingBpmPlacement(id),
            Self::BeatsPerMeasure { track, .. } => ParseWarning::DuplicatingMeasureDef(track),
        }
    }
}

/// A choice to handle the duplicated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DuplicationWorkaround {
    /// Choose to use the existing one.
    UseOlder,
    /// Choose to use the incoming one.
    UseNewer,
    /// Choose to use the existing one, and report a warning.
    WarnAndUseOlder,
    /// Choose to use the incoming one, and report a warning.
    WarnAndUseNewer,
    /// Choose to interrupt this parsing.
    Halt,
}

impl DuplicationWorkaround {
    /// Applies the choice onto `target`. Returns the warning to be reported, if the choice asks
    /// to warn.
    pub(crate) fn apply<T>(
        self,
        target: &mut T,
        newer: T,
        warning: ParseWarning,
    ) -> Result<Option<ParseWarning>, ParseError> {
        match self {
            Self::UseOlder => Ok(None),
            Self::UseNewer => {
                *target = newer;
                Ok(None)
            }
            Self::WarnAndUseOlder => Ok(Some(warning)),
            Self::WarnAndUseNewer => {
                *target = newer;
                Ok(Some(warning))
            }
            Self::Halt => Err(ParseError::Halted),
        }
    }
}

/// The strategy that always using older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysUseOlder;

impl Prompter for AlwaysUseOlder {
    fn handle_duplication(&self, _: PromptingDuplication) -> DuplicationWorkaround {
        DuplicationWorkaround::UseOlder
    }
}

/// The strategy that always using newer ones. Later declarations overwrite earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysUseNewer;

impl Prompter for AlwaysUseNewer {
    fn handle_duplication(&self, _: PromptingDuplication) -> DuplicationWorkaround {
        DuplicationWorkaround::UseNewer
    }
}

/// The strategy that always warns and uses older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysWarnAndUseOlder;

impl Prompter for AlwaysWarnAndUseOlder {
    fn handle_duplication(&self, _: PromptingDuplication) -> DuplicationWorkaround {
        DuplicationWorkaround::WarnAndUseOlder
    }
}

/// The strategy that always warns and uses newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysWarnAndUseNewer;

impl Prompter for AlwaysWarnAndUseNewer {
    fn handle_duplication(&self, _: PromptingDuplication) -> DuplicationWorkaround {
        DuplicationWorkaround::WarnAndUseNewer
    }
}

/// The strategy that always halts parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlwaysHalt;

impl Prompter for AlwaysHalt {
    fn handle_duplication(&self, _: PromptingDuplication) -> DuplicationWorkaround {
        DuplicationWorkaround::Halt
    }
}
