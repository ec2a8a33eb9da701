//! The time-resolved score data of SUS format.

pub mod bpm;
pub mod measure;
pub mod notes;
pub mod timeline;

use self::{
    bpm::{BpmAnchor, BpmTimeline},
    measure::{MeasureAnchor, MeasureTimeline},
    notes::Note,
};

/// The song information in the score. These do not affect the timing.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongInfo {
    /// The title of the music. `#TITLE`
    pub title: Option<String>,
    /// The artist of the music. `#ARTIST`
    pub artist: Option<String>,
    /// The designer of the chart. `#DESIGNER`
    pub designer: Option<String>,
    /// The seconds from the start of the audio to the beat 0. The beat 0 is at the negative of
    /// this on the timeline. `#WAVEOFFSET`
    pub wave_offset: f64,
}

/// A score data aggregate of SUS format, whose every note is placed on seconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongData {
    /// The song information.
    pub info: SongInfo,
    /// The notes, sorted by [`Note::first_time`] in ascending order.
    pub notes: Vec<Note>,
    /// The conversion from beats into seconds.
    pub bpm_timeline: BpmTimeline,
    /// The conversion from measures into beats.
    pub measure_timeline: MeasureTimeline,
}

impl SongData {
    /// The BPM changes, sorted by beat.
    #[must_use]
    pub fn bpm_anchors(&self) -> &[BpmAnchor] {
        self.bpm_timeline.anchors()
    }

    /// The changes of beats per measure, sorted by measure.
    #[must_use]
    pub fn measure_anchors(&self) -> &[MeasureAnchor] {
        self.measure_timeline.anchors()
    }

    /// Iterates the notes whose first time is in `range` seconds.
    pub fn notes_in(&self, range: std::ops::Range<f64>) -> impl Iterator<Item = &Note> {
        let start = self.notes.partition_point(|note| note.first_time() < range.start);
        self.notes[start..]
            .iter()
            .take_while(move |note| note.first_time() < range.end)
    }

    /// The seconds when the last point of the notes comes, if any note exists.
    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.notes
            .iter()
            .map(|note| match note {
                Note::Tap(tap) => tap.point.seconds,
                Note::Slide(slide) => slide.end.seconds,
            })
            .max_by(f64::total_cmp)
    }
}
