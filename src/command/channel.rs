//! Definitions of channel in SUS.
//!
//! A lane event message is `#XXXYY:ZZ...` or `#XXXYYW:ZZ...`, where `XXX` is the measure and `YY` or
//! `YYW` is the channel. The first character of the channel is the object type, and the rest tells
//! the lane and, for long notes, the pairing channel.

/// The channel, or object type with its lane, of a lane event message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Channel {
    /// For the beats per measure, `#XXX02:n`. Its payload is a decimal, not a slot sequence.
    BeatsPerMeasure,
    /// For the BPM change object, `#XXX08:...`. Each slot is a [`crate::command::BpmId`].
    BpmChange,
    /// For the tap note, `#XXX1x:...`.
    Tap {
        /// The leftmost lane the note occupies, 0 to 35.
        lane: u8,
    },
    /// For the slide note, `#XXX3xy:...`.
    Slide {
        /// The leftmost lane the endpoint occupies, 0 to 35.
        lane: u8,
        /// The channel pairing the start with the end, 0 to 35.
        channel: u8,
    },
    /// Other object types, such as holds, curved slides or air notes. These are not decoded.
    Unsupported {
        /// The object type character.
        kind: char,
    },
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digit = |d: u8| super::digit_to_base36(d).unwrap_or('?');
        match self {
            Self::BeatsPerMeasure => write!(f, "02"),
            Self::BpmChange => write!(f, "08"),
            Self::Tap { lane } => write!(f, "1{}", digit(*lane)),
            Self::Slide { lane, channel } => write!(f, "3{}{}", digit(*lane), digit(*channel)),
            Self::Unsupported { kind } => write!(f, "{kind}?"),
        }
    }
}

/// Reads a channel from the characters between the measure and the colon.
///
/// Returns `None` if the channel is too short for its object type or has a non base-36 lane.
#[must_use]
pub fn read_channel(channel: &str) -> Option<Channel> {
    let mut chars = channel.chars();
    let kind = chars.next()?;
    let lane = chars.next().and_then(super::base36_digit);
    let pair = chars.next().and_then(super::base36_digit);
    Some(match kind {
        '0' => match channel.get(1..)? {
            "2" => Channel::BeatsPerMeasure,
            "8" => Channel::BpmChange,
            "" => return None,
            _ => Channel::Unsupported { kind },
        },
        '1' => Channel::Tap { lane: lane? },
        '3' => Channel::Slide {
            lane: lane?,
            channel: pair?,
        },
        kind if kind.is_ascii_alphanumeric() => Channel::Unsupported { kind },
        _ => return None,
    })
}
