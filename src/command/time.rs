//! Definitions of time in SUS.

use std::num::NonZeroU64;

/// A track, or measure, or bar, in the score. The first measure is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track(pub u64);

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

/// A time of the object on the score, as a slot of its track.
///
/// A message `#XXXYY:ZZ...` with `n` slots places its `i`-th slot at `track + i / n`. The
/// fraction is kept reduced, so the same position from different resolutions compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjTime {
    track: Track,
    numerator: u64,
    denominator: NonZeroU64,
}

impl ObjTime {
    /// Create a new time with the reduced fraction, or `None` if `numerator` is out of
    /// `0..denominator`.
    #[must_use]
    pub const fn new(track: u64, numerator: u64, denominator: NonZeroU64) -> Option<Self> {
        if numerator >= denominator.get() {
            return None;
        }
        let divisor = gcd(numerator, denominator.get());
        let Some(denominator) = NonZeroU64::new(denominator.get() / divisor) else {
            return None;
        };
        Some(Self {
            track: Track(track),
            numerator: numerator / divisor,
            denominator,
        })
    }

    /// The track, or measure, where the object is in.
    #[must_use]
    pub const fn track(&self) -> Track {
        self.track
    }

    /// The time offset numerator in the track.
    #[must_use]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// The time offset denominator in the track.
    #[must_use]
    pub const fn denominator(&self) -> NonZeroU64 {
        self.denominator
    }

    /// The real-valued measure position, `track + numerator / denominator`.
    #[must_use]
    pub fn as_measure(&self) -> f64 {
        self.track.0 as f64 + self.numerator as f64 / self.denominator.get() as f64
    }
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl PartialOrd for ObjTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let self_time_in_track = self.numerator as u128 * other.denominator.get() as u128;
        let other_time_in_track = other.numerator as u128 * self.denominator.get() as u128;
        self.track
            .cmp(&other.track)
            .then(self_time_in_track.cmp(&other_time_in_track))
    }
}
