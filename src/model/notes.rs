//! Definitions of the playable notes.

use super::bpm::BpmTimeline;

/// A position of a note, on the playfield and on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotePoint {
    /// The leftmost lane the note occupies, 0 to 35.
    pub lane: u8,
    /// The number of lanes the note spans, 1 to 36.
    pub width: u8,
    /// The beat position.
    pub beat: f64,
    /// The seconds position, derived from [`NotePoint::beat`].
    pub seconds: f64,
}

impl NotePoint {
    /// Creates a point whose seconds position is not resolved yet.
    #[must_use]
    pub const fn new(lane: u8, width: u8, beat: f64) -> Self {
        Self {
            lane,
            width,
            beat,
            seconds: 0.0,
        }
    }

    fn resolve(&mut self, bpm_timeline: &BpmTimeline) {
        self.seconds = bpm_timeline.beat_to_sec(self.beat);
    }
}

/// A note to hit once. `#XXX1x:...`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tap {
    /// Where the note is.
    pub point: NotePoint,
}

/// A note to hold from the start and release at the end. `#XXX3xy:...`
///
/// The start and the end are paired by their channel `y`. A slide exists only with both.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slide {
    /// The channel which paired the start and the end.
    pub channel: u8,
    /// Where the gesture starts.
    pub start: NotePoint,
    /// Where the gesture ends.
    pub end: NotePoint,
}

/// A playable note.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Note {
    /// A tap note.
    Tap(Tap),
    /// A slide note.
    Slide(Slide),
}

impl Note {
    /// The point where the note first appears.
    #[must_use]
    pub const fn first_point(&self) -> &NotePoint {
        match self {
            Self::Tap(tap) => &tap.point,
            Self::Slide(slide) => &slide.start,
        }
    }

    /// The seconds when the note first appears. The note list is ordered by this.
    #[must_use]
    pub const fn first_time(&self) -> f64 {
        self.first_point().seconds
    }

    /// Resolves the seconds positions of every point from their beat positions.
    pub(crate) fn resolve_seconds(&mut self, bpm_timeline: &BpmTimeline) {
        match self {
            Self::Tap(tap) => tap.point.resolve(bpm_timeline),
            Self::Slide(slide) => {
                slide.start.resolve(bpm_timeline);
                slide.end.resolve(bpm_timeline);
            }
        }
    }
}

impl From<Tap> for Note {
    fn from(value: Tap) -> Self {
        Self::Tap(value)
    }
}

impl From<Slide> for Note {
    fn from(value: Slide) -> Self {
        Self::Slide(value)
    }
}
