//! Virtual handles handed out to application code
//!
//! The native side identifies controllers with opaque 64-bit ids and action
//! sets/actions with its own handle types. None of those cross the boundary:
//! callers only ever see a small integer that the gateway resolves back to the
//! native object. The only things a caller may do with a handle are compare
//! it, hash it and pass it back.

use std::fmt;

macro_rules! virtual_handle {
    ($(#[$meta:meta])* $name:ident, invalid = $invalid:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Sentinel returned whenever the handle could not be produced
            pub const INVALID: Self = Self($invalid);

            /// Sentinel returned while the facade is inactive
            pub const INACTIVE: Self = Self(-1);

            /// Wraps a raw value received from the gateway
            pub const fn from_raw(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw value to hand back to the gateway
            pub const fn raw(self) -> i32 {
                self.0
            }

            /// Valid handles are strictly above both sentinels
            pub const fn is_valid(self) -> bool {
                self.0 > $invalid
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

virtual_handle!(
    /// Slot index of a connected controller. Only valid until the next
    /// enumeration, since a disconnect frees the slot.
    ControllerHandle,
    invalid = -1
);

virtual_handle!(
    /// Handle of a named action set (or action set layer)
    ActionSetHandle,
    invalid = 0
);

virtual_handle!(
    /// Handle of a named digital action
    DigitalActionHandle,
    invalid = 0
);

virtual_handle!(
    /// Handle of a named analog action
    AnalogActionHandle,
    invalid = 0
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_sentinel_is_minus_one() {
        assert_eq!(ControllerHandle::INVALID.raw(), -1);
        assert!(!ControllerHandle::default().is_valid());
        assert!(ControllerHandle::from_raw(0).is_valid());
        assert!(!ControllerHandle::from_raw(-7).is_valid());
    }

    #[test]
    fn action_handles_treat_zero_as_invalid() {
        assert!(!ActionSetHandle::INVALID.is_valid());
        assert!(!DigitalActionHandle::from_raw(0).is_valid());
        assert!(AnalogActionHandle::from_raw(3).is_valid());
    }

    #[test]
    fn inactive_sentinel_is_minus_one_and_never_valid() {
        assert_eq!(ActionSetHandle::INACTIVE.raw(), -1);
        assert_eq!(DigitalActionHandle::INACTIVE.raw(), -1);
        assert_eq!(AnalogActionHandle::INACTIVE.raw(), -1);
        assert_eq!(ControllerHandle::INACTIVE, ControllerHandle::INVALID);
        assert!(!ActionSetHandle::INACTIVE.is_valid());
        assert!(!DigitalActionHandle::INACTIVE.is_valid());
        assert!(!AnalogActionHandle::INACTIVE.is_valid());
    }

    #[test]
    fn display_names_the_handle_kind() {
        assert_eq!(
            ControllerHandle::from_raw(2).to_string(),
            "ControllerHandle(2)"
        );
    }
}
