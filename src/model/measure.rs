//! This module introduces struct [`MeasureTimeline`], which maps measures into beats.

use strict_num_extended::FinF64;

use super::timeline::{self, Anchor, ResolveAnchor};

/// The number of beats in a measure when the score declares nothing.
pub const DEFAULT_BEATS_PER_MEASURE: f64 = 4.0;

/// A change of the number of beats in a measure. `#XXX02:n`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureAnchor {
    /// The measure where the change starts.
    pub measure: f64,
    /// The number of beats in a measure, from [`MeasureAnchor::measure`] until the next anchor.
    pub beats_per_measure: FinF64,
    /// The beat position of [`MeasureAnchor::measure`].
    pub beat: f64,
    /// The seconds position of [`MeasureAnchor::measure`], resolved after the BPM timeline.
    pub seconds: f64,
}

impl MeasureAnchor {
    /// Creates an anchor whose positions are not resolved yet.
    #[must_use]
    pub const fn new(measure: f64, beats_per_measure: FinF64) -> Self {
        Self {
            measure,
            beats_per_measure,
            beat: 0.0,
            seconds: 0.0,
        }
    }
}

impl Anchor for MeasureAnchor {
    fn position(&self) -> f64 {
        self.measure
    }

    fn value(&self) -> f64 {
        self.beat
    }

    fn advance(&self, beat: f64, measures: f64) -> f64 {
        beat + measures * self.beats_per_measure.as_f64()
    }
}

impl ResolveAnchor for MeasureAnchor {
    fn set_value(&mut self, value: f64) {
        self.beat = value;
    }
}

/// The monotonic piecewise-linear function from measure to beat.
///
/// It always has at least one anchor, and the anchors are sorted by measure without duplicates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureTimeline {
    anchors: Vec<MeasureAnchor>,
}

impl MeasureTimeline {
    /// Builds the timeline from anchors sorted by measure without duplicates, and resolves
    /// their beat positions. If `anchors` is empty, 4 beats per measure from the measure 0 is
    /// assumed.
    #[must_use]
    pub fn new(mut anchors: Vec<MeasureAnchor>) -> Self {
        if anchors.is_empty() {
            anchors.push(MeasureAnchor::new(
                0.0,
                FinF64::new(DEFAULT_BEATS_PER_MEASURE).expect("default is finite"),
            ));
        }
        timeline::resolve_values(&mut anchors, 0.0);
        Self { anchors }
    }

    /// Converts the real-valued measure position into the beat position.
    #[must_use]
    pub fn measure_to_beat(&self, measure: f64) -> f64 {
        timeline::interpolate(&self.anchors, 0.0, measure)
            .expect("a measure timeline has at least one anchor")
    }

    /// The anchors sorted by measure.
    #[must_use]
    pub fn anchors(&self) -> &[MeasureAnchor] {
        &self.anchors
    }

    pub(crate) fn anchors_mut(&mut self) -> &mut [MeasureAnchor] {
        &mut self.anchors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(defs: &[(f64, f64)]) -> MeasureTimeline {
        MeasureTimeline::new(
            defs.iter()
                .map(|&(measure, beats)| MeasureAnchor::new(measure, FinF64::new(beats).unwrap()))
                .collect(),
        )
    }

    #[test]
    fn single_declaration() {
        let timeline = timeline(&[(0.0, 4.0)]);
        assert_eq!(timeline.measure_to_beat(0.0), 0.0);
        assert_eq!(timeline.measure_to_beat(2.0), 8.0);
        assert_eq!(timeline.measure_to_beat(0.25), 1.0);
    }

    #[test]
    fn empty_defaults_to_four_beats() {
        let timeline = timeline(&[]);
        assert_eq!(timeline.anchors().len(), 1);
        assert_eq!(timeline.measure_to_beat(3.0), 12.0);
    }

    #[test]
    fn changes_in_the_middle() {
        let timeline = timeline(&[(0.0, 4.0), (2.0, 3.0), (3.0, 4.0)]);
        let beats: Vec<_> = timeline.anchors().iter().map(|a| a.beat).collect();
        assert_eq!(beats, vec![0.0, 8.0, 11.0]);
        assert_eq!(timeline.measure_to_beat(2.5), 9.5);
        assert_eq!(timeline.measure_to_beat(3.0), 11.0);
        assert_eq!(timeline.measure_to_beat(4.5), 17.0);
    }

    #[test]
    fn before_first_declaration_extrapolates_from_zero() {
        let timeline = timeline(&[(2.0, 3.0)]);
        assert_eq!(timeline.anchors()[0].beat, 6.0);
        assert_eq!(timeline.measure_to_beat(1.0), 3.0);
        assert_eq!(timeline.measure_to_beat(2.0), 6.0);
    }
}
