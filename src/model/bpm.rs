//! This module introduces struct [`BpmTimeline`], which maps beats into seconds.

use strict_num_extended::PositiveF64;

use crate::command::BpmId;

use super::timeline::{self, Anchor, ResolveAnchor};

/// A BPM change placed onto the score. `#BPMxx:n` placed by `#XXX08:xx`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmAnchor {
    /// The id of the definition.
    pub id: BpmId,
    /// The beats per minute, from [`BpmAnchor::beat`] until the next anchor.
    pub bpm: PositiveF64,
    /// The beat position where the change is placed.
    pub beat: f64,
    /// The seconds position of [`BpmAnchor::beat`].
    pub seconds: f64,
}

impl BpmAnchor {
    /// Creates an anchor whose seconds position is not resolved yet.
    #[must_use]
    pub const fn new(id: BpmId, bpm: PositiveF64, beat: f64) -> Self {
        Self {
            id,
            bpm,
            beat,
            seconds: 0.0,
        }
    }
}

impl Anchor for BpmAnchor {
    fn position(&self) -> f64 {
        self.beat
    }

    fn value(&self) -> f64 {
        self.seconds
    }

    fn advance(&self, seconds: f64, beats: f64) -> f64 {
        seconds + beats / self.bpm.as_f64() * 60.0
    }
}

impl ResolveAnchor for BpmAnchor {
    fn set_value(&mut self, value: f64) {
        self.seconds = value;
    }
}

/// The piecewise-linear function from beat to seconds.
///
/// It always has at least one anchor, and the anchors are sorted by beat. Anchors may share a
/// beat; then the first one is the representative on that beat.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmTimeline {
    anchors: Vec<BpmAnchor>,
    wave_offset: f64,
}

impl BpmTimeline {
    /// Builds the timeline from anchors and resolves their seconds positions. The beat 0 is at
    /// `-wave_offset` seconds.
    ///
    /// The anchors are stably sorted by beat. Returns `None` if `anchors` is empty.
    #[must_use]
    pub fn new(mut anchors: Vec<BpmAnchor>, wave_offset: f64) -> Option<Self> {
        if anchors.is_empty() {
            return None;
        }
        anchors.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        timeline::resolve_values(&mut anchors, -wave_offset);
        Some(Self {
            anchors,
            wave_offset,
        })
    }

    /// Converts the beat position into the seconds position.
    #[must_use]
    pub fn beat_to_sec(&self, beat: f64) -> f64 {
        timeline::interpolate(&self.anchors, -self.wave_offset, beat)
            .expect("a BPM timeline has at least one anchor")
    }

    /// The BPM at the beat position, of the last anchor at or before it.
    #[must_use]
    pub fn bpm_at(&self, beat: f64) -> PositiveF64 {
        let idx = self.anchors.partition_point(|anchor| anchor.beat <= beat);
        self.anchors[idx.saturating_sub(1)].bpm
    }

    /// The anchors sorted by beat.
    #[must_use]
    pub fn anchors(&self) -> &[BpmAnchor] {
        &self.anchors
    }

    /// The seconds from the start of the audio to the beat 0.
    #[must_use]
    pub const fn wave_offset(&self) -> f64 {
        self.wave_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(id: &str, bpm: f64, beat: f64) -> BpmAnchor {
        BpmAnchor::new(
            BpmId::try_from(id).unwrap(),
            PositiveF64::new(bpm).unwrap(),
            beat,
        )
    }

    #[test]
    fn single_bpm() {
        let timeline = BpmTimeline::new(vec![anchor("01", 120.0, 0.0)], 0.0).unwrap();
        assert_eq!(timeline.beat_to_sec(2.0), 1.0);
        assert_eq!(timeline.beat_to_sec(0.0), 0.0);
    }

    #[test]
    fn wave_offset_shifts_the_origin() {
        let timeline = BpmTimeline::new(vec![anchor("01", 120.0, 0.0)], 10.0).unwrap();
        assert_eq!(timeline.anchors()[0].seconds, -10.0);
        assert_eq!(timeline.beat_to_sec(0.0), -10.0);
        assert_eq!(timeline.beat_to_sec(4.0), -8.0);
    }

    #[test]
    fn sorts_and_integrates() {
        let timeline = BpmTimeline::new(
            vec![anchor("02", 60.0, 8.0), anchor("01", 120.0, 0.0)],
            0.0,
        )
        .unwrap();
        let ids: Vec<_> = timeline.anchors().iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["01", "02"]);
        assert_eq!(timeline.anchors()[1].seconds, 4.0);
        assert_eq!(timeline.beat_to_sec(10.0), 6.0);
        assert_eq!(timeline.bpm_at(7.0).as_f64(), 120.0);
        assert_eq!(timeline.bpm_at(8.0).as_f64(), 60.0);
    }

    #[test]
    fn before_first_anchor_uses_its_bpm() {
        let timeline = BpmTimeline::new(vec![anchor("01", 60.0, 4.0)], 0.0).unwrap();
        assert_eq!(timeline.anchors()[0].seconds, 4.0);
        assert_eq!(timeline.beat_to_sec(1.0), 1.0);
    }

    #[test]
    fn divides_by_bpm_before_scaling_to_minutes() {
        let timeline = BpmTimeline::new(vec![anchor("01", 150.0, 0.0)], 0.0).unwrap();
        assert_eq!(timeline.beat_to_sec(0.75), 0.3);
        assert_eq!(timeline.beat_to_sec(4.0), 1.6);
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(BpmTimeline::new(vec![], 0.0), None);
    }
}
