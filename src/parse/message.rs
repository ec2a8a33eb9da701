//! Decoding of lane event messages, `#XXXYY:ZZ...`.
//!
//! A message splits its measure into as many slots as its two-character units. Each unit other
//! than `00` is an object at the slot, which is placed onto the beat by the measure timeline.

use std::num::NonZeroU64;

use itertools::Itertools;

use crate::{
    command::{
        base36_digit,
        time::{ObjTime, Track},
    },
    model::measure::MeasureTimeline,
};

/// An object decoded from a slot of the message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneObj {
    /// The slot position in the measure.
    pub time: ObjTime,
    /// The beat position of [`LaneObj::time`].
    pub beat: f64,
    /// The two base-36 digits of the slot.
    pub data: [u8; 2],
}

impl LaneObj {
    /// The numeric value of the two digits, such as a BPM id.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.data[0] as u16 * 36 + self.data[1] as u16
    }
}

/// Decodes the non-empty slots of the message, in time order.
///
/// A trailing character which does not make a two-character unit is ignored, and so is a unit
/// having a non base-36 character.
pub fn decode_message<'a>(
    track: Track,
    message: &'a str,
    measure_timeline: &'a MeasureTimeline,
) -> impl Iterator<Item = LaneObj> + 'a {
    let denominator = NonZeroU64::new((message.chars().count() / 2) as u64);
    message
        .chars()
        .tuples()
        .enumerate()
        .filter_map(move |(idx, (high, low))| {
            let data = [base36_digit(high)?, base36_digit(low)?];
            if data == [0, 0] {
                return None;
            }
            let time = ObjTime::new(track.0, idx as u64, denominator?)?;
            let beat = measure_timeline.measure_to_beat(time.as_measure());
            Some(LaneObj { time, beat, data })
        })
}

#[cfg(test)]
mod tests {
    use strict_num_extended::FinF64;

    use super::*;
    use crate::model::measure::MeasureAnchor;

    fn four_four() -> MeasureTimeline {
        MeasureTimeline::new(vec![MeasureAnchor::new(0.0, FinF64::new(4.0).unwrap())])
    }

    #[test]
    fn skips_empty_slots() {
        let timeline = four_four();
        let objs: Vec<_> = decode_message(Track(1), "10002a00", &timeline).collect();
        assert_eq!(objs.len(), 2);
        assert_eq!(objs[0].beat, 4.0);
        assert_eq!(objs[0].data, [1, 0]);
        assert_eq!(objs[1].beat, 6.0);
        assert_eq!(objs[1].data, [2, 10]);
        assert_eq!(objs[1].time.numerator(), 1);
        assert_eq!(objs[1].time.denominator().get(), 2);
    }

    #[test]
    fn follows_measure_changes() {
        let timeline = MeasureTimeline::new(vec![
            MeasureAnchor::new(0.0, FinF64::new(4.0).unwrap()),
            MeasureAnchor::new(1.0, FinF64::new(2.0).unwrap()),
        ]);
        let beats: Vec<_> = decode_message(Track(1), "11111111", &timeline)
            .map(|obj| obj.beat)
            .collect();
        assert_eq!(beats, vec![4.0, 4.5, 5.0, 5.5]);
    }

    #[test]
    fn ignores_odd_tail_and_empty() {
        let timeline = four_four();
        assert_eq!(decode_message(Track(0), "121", &timeline).count(), 1);
        assert_eq!(decode_message(Track(0), "1", &timeline).count(), 0);
        assert_eq!(decode_message(Track(0), "", &timeline).count(), 0);
    }

    #[test]
    fn value_is_base36() {
        let timeline = four_four();
        let obj = decode_message(Track(0), "zz", &timeline).next().unwrap();
        assert_eq!(obj.value(), 1295);
    }
}
