//! Definitions of command argument data.
//!
//! Structures in this module can be used in [Lex](crate::lex) part, [Parse](crate::parse) part, and the output models.

pub mod channel;
pub mod mixin;
pub mod time;

/// Converts an ASCII alphanumeric character into its base-36 digit value, case-insensitively.
#[must_use]
pub const fn base36_digit(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'A'..='Z' => Some(ch as u8 - b'A' + 10),
        'a'..='z' => Some(ch as u8 - b'a' + 10),
        _ => None,
    }
}

/// Converts a base-36 digit value back into its uppercase character.
#[must_use]
pub const fn digit_to_base36(digit: u8) -> Option<char> {
    match digit {
        0..=9 => Some((b'0' + digit) as char),
        10..=35 => Some((b'A' + digit - 10) as char),
        _ => None,
    }
}

#[test]
fn test_base36() {
    assert_eq!(base36_digit('/'), None);
    assert_eq!(base36_digit('0'), Some(0));
    assert_eq!(base36_digit('9'), Some(9));
    assert_eq!(base36_digit(':'), None);
    assert_eq!(base36_digit('@'), None);
    assert_eq!(base36_digit('A'), Some(10));
    assert_eq!(base36_digit('Z'), Some(35));
    assert_eq!(base36_digit('['), None);
    assert_eq!(base36_digit('a'), Some(10));
    assert_eq!(base36_digit('z'), Some(35));
    assert_eq!(base36_digit('{'), None);
    assert_eq!(digit_to_base36(35), Some('Z'));
    assert_eq!(digit_to_base36(36), None);
}

/// An id of the BPM definition, `#BPMxx`. It is also the payload of BPM change events.
///
/// The representation is 2 digits of base-36, so the value ranges from 0 to 1295.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmId(u16);

impl BpmId {
    /// The largest id representable with 2 base-36 digits.
    pub const MAX: u16 = 36 * 36 - 1;

    /// Creates an id from its numeric value, if it is in range.
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Converts the id into an `u16` value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl std::fmt::Debug for BpmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BpmId").field(&self.to_string()).finish()
    }
}

impl std::fmt::Display for BpmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let high = digit_to_base36((self.0 / 36) as u8).unwrap_or('?');
        let low = digit_to_base36((self.0 % 36) as u8).unwrap_or('?');
        write!(f, "{high}{low}")
    }
}

impl<'a> TryFrom<&'a str> for BpmId {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        let mut chars = value.chars();
        let [Some(ch1), Some(ch2), None] = [chars.next(), chars.next(), chars.next()] else {
            return Err(value);
        };
        let (Some(high), Some(low)) = (base36_digit(ch1), base36_digit(ch2)) else {
            return Err(value);
        };
        Ok(Self(high as u16 * 36 + low as u16))
    }
}

impl From<BpmId> for u16 {
    fn from(value: BpmId) -> Self {
        value.0
    }
}
