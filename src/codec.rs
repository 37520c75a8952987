//! Decoding of native result encodings
//!
//! The native side returns variable-length results as ASCII comma-separated
//! decimal integers and fixed-size digital state as a bit-packed integer.
//!
//! ```text
//! connected controllers   "0,2,3"          every parsable token, in order
//! action origins          "3,101,205,310"  count first, then the codes
//! digital action state    0x11             bit 0 = state, bit 4 = active
//! ```

use crate::action_data::DigitalActionState;
use crate::origin::ActionOrigin;
use tracing::debug;

pub const DELIMITER: char = ',';

const DIGITAL_STATE_BIT: i32 = 1 << 0;
const DIGITAL_ACTIVE_BIT: i32 = 1 << 4;

/// Decodes a plain integer list; empty and malformed tokens are skipped
pub fn decode_integer_list(encoded: &str) -> Vec<i32> {
    encoded
        .split(DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<i32>() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Skipping malformed list token {:?}: {}", token, e);
                None
            }
        })
        .collect()
}

/// Origin query result with the count prefix split off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginList {
    /// Number of origins the native side reported
    pub count: usize,
    /// Decoded codes in token order, at most `count` of them
    pub origins: Vec<ActionOrigin>,
}

/// Decodes a count-prefixed origin list
pub fn decode_origin_list(encoded: &str) -> OriginList {
    let mut tokens = encoded.split(DELIMITER);
    let count = parse_count(tokens.next());
    let origins = tokens.take(count).map(parse_origin).collect();
    OriginList { count, origins }
}

/// Compatibility adapter for callers that pass their own origin buffer
///
/// Token `i` is written to `out[i]`, so the first origin lands at index 1 and
/// index 0 is never touched. Codes that do not fit the buffer are dropped.
/// Without a buffer only the count is decoded. Returns the reported count.
pub fn decode_origin_list_into(encoded: &str, out: Option<&mut [ActionOrigin]>) -> usize {
    let mut tokens = encoded.split(DELIMITER);
    let count = parse_count(tokens.next());

    if let Some(out) = out {
        for (index, token) in tokens.enumerate().take(count) {
            match out.get_mut(index + 1) {
                Some(slot) => *slot = parse_origin(token),
                None => break,
            }
        }
    }

    count
}

/// Splits a bit-packed digital state into its two flags
pub fn decode_digital_state(raw: i32) -> DigitalActionState {
    DigitalActionState {
        state: raw & DIGITAL_STATE_BIT != 0,
        active: raw & DIGITAL_ACTIVE_BIT != 0,
    }
}

fn parse_count(token: Option<&str>) -> usize {
    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .and_then(|token| token.parse::<usize>().ok())
        .unwrap_or(0)
}

fn parse_origin(token: &str) -> ActionOrigin {
    token
        .trim()
        .parse::<i32>()
        .map(ActionOrigin::from_raw)
        .unwrap_or(ActionOrigin::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[ActionOrigin]) -> Vec<i32> {
        values.iter().map(|o| o.raw()).collect()
    }

    #[test]
    fn legacy_decode_writes_from_index_one() {
        let mut out = [ActionOrigin::from_raw(7); 8];
        let count = decode_origin_list_into("3,101,205,310", Some(&mut out));

        assert_eq!(count, 3);
        assert_eq!(out[0].raw(), 7);
        assert_eq!(raw(&out[1..4]), vec![101, 205, 310]);
        assert_eq!(out[4].raw(), 7);
    }

    #[test]
    fn legacy_decode_of_empty_string_is_zero_and_untouched() {
        let mut out = [ActionOrigin::from_raw(9); 4];
        assert_eq!(decode_origin_list_into("", Some(&mut out)), 0);
        assert!(out.iter().all(|o| o.raw() == 9));
    }

    #[test]
    fn legacy_decode_without_buffer_only_counts() {
        assert_eq!(decode_origin_list_into("2,5,6", None), 2);
    }

    #[test]
    fn legacy_decode_drops_what_does_not_fit() {
        let mut out = [ActionOrigin::UNKNOWN; 3];
        assert_eq!(decode_origin_list_into("4,1,2,3,4", Some(&mut out)), 4);
        assert_eq!(raw(&out), vec![-1, 1, 2]);
    }

    #[test]
    fn malformed_count_decodes_to_zero() {
        let mut out = [ActionOrigin::from_raw(5); 3];
        assert_eq!(decode_origin_list_into("x,1,2", Some(&mut out)), 0);
        assert_eq!(raw(&out), vec![5, 5, 5]);
        assert_eq!(decode_origin_list("-2,1").count, 0);
    }

    #[test]
    fn structured_decode_starts_at_index_zero() {
        let list = decode_origin_list("3,101,205,310");
        assert_eq!(list.count, 3);
        assert_eq!(raw(&list.origins), vec![101, 205, 310]);
    }

    #[test]
    fn structured_decode_marks_bad_codes_unknown() {
        let list = decode_origin_list("2,12,oops");
        assert_eq!(raw(&list.origins), vec![12, -1]);
        assert_eq!(decode_origin_list(""), OriginList::default());
    }

    #[test]
    fn integer_list_skips_empty_and_malformed_tokens() {
        assert_eq!(decode_integer_list("0,,2, 3,x,"), vec![0, 2, 3]);
        assert!(decode_integer_list("").is_empty());
    }

    #[test]
    fn digital_state_uses_bits_zero_and_four() {
        assert_eq!(
            decode_digital_state(0x11),
            DigitalActionState {
                state: true,
                active: true
            }
        );
        assert_eq!(
            decode_digital_state(0x10),
            DigitalActionState {
                state: false,
                active: true
            }
        );
        assert_eq!(
            decode_digital_state(0x01),
            DigitalActionState {
                state: true,
                active: false
            }
        );
        assert_eq!(decode_digital_state(0x0e), DigitalActionState::default());
    }
}
