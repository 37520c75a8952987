//! Action origins: the physical control an action is currently bound to
//!
//! The table below is the canonical origin list, in native order. A single
//! macro expansion produces both the [`Origin`] enum and its name table, so the
//! numeric value of every origin and its display name cannot drift apart.
//!
//! Lookups are total in the origin → name direction ([`ActionOrigin::display_name`]
//! never fails) and partial in the other ([`ActionOrigin::from_name`] falls back
//! to [`ActionOrigin::UNKNOWN`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Name reported for any value outside the table
pub const UNKNOWN_ORIGIN_NAME: &str = "unknown";

macro_rules! origin_table {
    ($($name:ident),+ $(,)?) => {
        /// Every origin the native side can report, in native numbering
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum Origin {
            $($name,)+
            /// End of the valid range, not an origin
            Count,
        }

        impl Origin {
            /// All real origins in numeric order (`Count` excluded)
            pub const ALL: &'static [Origin] = &[$(Origin::$name),+];

            /// Stable display name of this origin
            pub const fn name(self) -> &'static str {
                match self {
                    $(Origin::$name => stringify!($name),)+
                    Origin::Count => UNKNOWN_ORIGIN_NAME,
                }
            }
        }
    };
}

origin_table! {
    None,

    // Steam Controller
    SteamController_A,
    SteamController_B,
    SteamController_X,
    SteamController_Y,
    SteamController_LeftBumper,
    SteamController_RightBumper,
    SteamController_LeftGrip,
    SteamController_RightGrip,
    SteamController_Start,
    SteamController_Back,
    SteamController_LeftPad_Touch,
    SteamController_LeftPad_Swipe,
    SteamController_LeftPad_Click,
    SteamController_LeftPad_DPadNorth,
    SteamController_LeftPad_DPadSouth,
    SteamController_LeftPad_DPadWest,
    SteamController_LeftPad_DPadEast,
    SteamController_RightPad_Touch,
    SteamController_RightPad_Swipe,
    SteamController_RightPad_Click,
    SteamController_RightPad_DPadNorth,
    SteamController_RightPad_DPadSouth,
    SteamController_RightPad_DPadWest,
    SteamController_RightPad_DPadEast,
    SteamController_LeftTrigger_Pull,
    SteamController_LeftTrigger_Click,
    SteamController_RightTrigger_Pull,
    SteamController_RightTrigger_Click,
    SteamController_LeftStick_Move,
    SteamController_LeftStick_Click,
    SteamController_LeftStick_DPadNorth,
    SteamController_LeftStick_DPadSouth,
    SteamController_LeftStick_DPadWest,
    SteamController_LeftStick_DPadEast,
    SteamController_Gyro_Move,
    SteamController_Gyro_Pitch,
    SteamController_Gyro_Yaw,
    SteamController_Gyro_Roll,
    SteamController_Reserved0,
    SteamController_Reserved1,
    SteamController_Reserved2,
    SteamController_Reserved3,
    SteamController_Reserved4,
    SteamController_Reserved5,
    SteamController_Reserved6,
    SteamController_Reserved7,
    SteamController_Reserved8,
    SteamController_Reserved9,
    SteamController_Reserved10,

    // PS4 DualShock
    PS4_X,
    PS4_Circle,
    PS4_Triangle,
    PS4_Square,
    PS4_LeftBumper,
    PS4_RightBumper,
    PS4_Options,
    PS4_Share,
    PS4_LeftPad_Touch,
    PS4_LeftPad_Swipe,
    PS4_LeftPad_Click,
    PS4_LeftPad_DPadNorth,
    PS4_LeftPad_DPadSouth,
    PS4_LeftPad_DPadWest,
    PS4_LeftPad_DPadEast,
    PS4_RightPad_Touch,
    PS4_RightPad_Swipe,
    PS4_RightPad_Click,
    PS4_RightPad_DPadNorth,
    PS4_RightPad_DPadSouth,
    PS4_RightPad_DPadWest,
    PS4_RightPad_DPadEast,
    PS4_CenterPad_Touch,
    PS4_CenterPad_Swipe,
    PS4_CenterPad_Click,
    PS4_CenterPad_DPadNorth,
    PS4_CenterPad_DPadSouth,
    PS4_CenterPad_DPadWest,
    PS4_CenterPad_DPadEast,
    PS4_LeftTrigger_Pull,
    PS4_LeftTrigger_Click,
    PS4_RightTrigger_Pull,
    PS4_RightTrigger_Click,
    PS4_LeftStick_Move,
    PS4_LeftStick_Click,
    PS4_LeftStick_DPadNorth,
    PS4_LeftStick_DPadSouth,
    PS4_LeftStick_DPadWest,
    PS4_LeftStick_DPadEast,
    PS4_RightStick_Move,
    PS4_RightStick_Click,
    PS4_RightStick_DPadNorth,
    PS4_RightStick_DPadSouth,
    PS4_RightStick_DPadWest,
    PS4_RightStick_DPadEast,
    PS4_DPad_North,
    PS4_DPad_South,
    PS4_DPad_West,
    PS4_DPad_East,
    PS4_Gyro_Move,
    PS4_Gyro_Pitch,
    PS4_Gyro_Yaw,
    PS4_Gyro_Roll,
    PS4_DPad_Move,
    PS4_Reserved1,
    PS4_Reserved2,
    PS4_Reserved3,
    PS4_Reserved4,
    PS4_Reserved5,
    PS4_Reserved6,
    PS4_Reserved7,
    PS4_Reserved8,
    PS4_Reserved9,
    PS4_Reserved10,

    // Xbox One
    XBoxOne_A,
    XBoxOne_B,
    XBoxOne_X,
    XBoxOne_Y,
    XBoxOne_LeftBumper,
    XBoxOne_RightBumper,
    XBoxOne_Menu,
    XBoxOne_View,
    XBoxOne_LeftTrigger_Pull,
    XBoxOne_LeftTrigger_Click,
    XBoxOne_RightTrigger_Pull,
    XBoxOne_RightTrigger_Click,
    XBoxOne_LeftStick_Move,
    XBoxOne_LeftStick_Click,
    XBoxOne_LeftStick_DPadNorth,
    XBoxOne_LeftStick_DPadSouth,
    XBoxOne_LeftStick_DPadWest,
    XBoxOne_LeftStick_DPadEast,
    XBoxOne_RightStick_Move,
    XBoxOne_RightStick_Click,
    XBoxOne_RightStick_DPadNorth,
    XBoxOne_RightStick_DPadSouth,
    XBoxOne_RightStick_DPadWest,
    XBoxOne_RightStick_DPadEast,
    XBoxOne_DPad_North,
    XBoxOne_DPad_South,
    XBoxOne_DPad_West,
    XBoxOne_DPad_East,
    XBoxOne_DPad_Move,
    XBoxOne_LeftGrip_Lower,
    XBoxOne_LeftGrip_Upper,
    XBoxOne_RightGrip_Lower,
    XBoxOne_RightGrip_Upper,
    XBoxOne_Share,
    XBoxOne_Reserved6,
    XBoxOne_Reserved7,
    XBoxOne_Reserved8,
    XBoxOne_Reserved9,
    XBoxOne_Reserved10,

    // Xbox 360
    XBox360_A,
    XBox360_B,
    XBox360_X,
    XBox360_Y,
    XBox360_LeftBumper,
    XBox360_RightBumper,
    XBox360_Start,
    XBox360_Back,
    XBox360_LeftTrigger_Pull,
    XBox360_LeftTrigger_Click,
    XBox360_RightTrigger_Pull,
    XBox360_RightTrigger_Click,
    XBox360_LeftStick_Move,
    XBox360_LeftStick_Click,
    XBox360_LeftStick_DPadNorth,
    XBox360_LeftStick_DPadSouth,
    XBox360_LeftStick_DPadWest,
    XBox360_LeftStick_DPadEast,
    XBox360_RightStick_Move,
    XBox360_RightStick_Click,
    XBox360_RightStick_DPadNorth,
    XBox360_RightStick_DPadSouth,
    XBox360_RightStick_DPadWest,
    XBox360_RightStick_DPadEast,
    XBox360_DPad_North,
    XBox360_DPad_South,
    XBox360_DPad_West,
    XBox360_DPad_East,
    XBox360_DPad_Move,
    XBox360_Reserved1,
    XBox360_Reserved2,
    XBox360_Reserved3,
    XBox360_Reserved4,
    XBox360_Reserved5,
    XBox360_Reserved6,
    XBox360_Reserved7,
    XBox360_Reserved8,
    XBox360_Reserved9,
    XBox360_Reserved10,

    // Switch (Pro Controller and Joy-Con pair)
    Switch_A,
    Switch_B,
    Switch_X,
    Switch_Y,
    Switch_LeftBumper,
    Switch_RightBumper,
    Switch_Plus,
    Switch_Minus,
    Switch_Capture,
    Switch_LeftTrigger_Pull,
    Switch_LeftTrigger_Click,
    Switch_RightTrigger_Pull,
    Switch_RightTrigger_Click,
    Switch_LeftStick_Move,
    Switch_LeftStick_Click,
    Switch_LeftStick_DPadNorth,
    Switch_LeftStick_DPadSouth,
    Switch_LeftStick_DPadWest,
    Switch_LeftStick_DPadEast,
    Switch_RightStick_Move,
    Switch_RightStick_Click,
    Switch_RightStick_DPadNorth,
    Switch_RightStick_DPadSouth,
    Switch_RightStick_DPadWest,
    Switch_RightStick_DPadEast,
    Switch_DPad_North,
    Switch_DPad_South,
    Switch_DPad_West,
    Switch_DPad_East,
    Switch_ProGyro_Move,
    Switch_ProGyro_Pitch,
    Switch_ProGyro_Yaw,
    Switch_ProGyro_Roll,
    Switch_DPad_Move,
    Switch_Reserved1,
    Switch_Reserved2,
    Switch_Reserved3,
    Switch_Reserved4,
    Switch_Reserved5,
    Switch_Reserved6,
    Switch_Reserved7,
    Switch_Reserved8,
    Switch_Reserved9,
    Switch_Reserved10,

    // Switch Joy-Con specific
    Switch_RightGyro_Move,
    Switch_RightGyro_Pitch,
    Switch_RightGyro_Yaw,
    Switch_RightGyro_Roll,
    Switch_LeftGyro_Move,
    Switch_LeftGyro_Pitch,
    Switch_LeftGyro_Yaw,
    Switch_LeftGyro_Roll,
    Switch_LeftGrip_Lower,
    Switch_LeftGrip_Upper,
    Switch_RightGrip_Lower,
    Switch_RightGrip_Upper,
    Switch_JoyConButton_N,
    Switch_JoyConButton_E,
    Switch_JoyConButton_S,
    Switch_JoyConButton_W,
    Switch_Reserved15,
    Switch_Reserved16,
    Switch_Reserved17,
    Switch_Reserved18,
    Switch_Reserved19,
    Switch_Reserved20,

    // PS5 DualSense
    PS5_X,
    PS5_Circle,
    PS5_Triangle,
    PS5_Square,
    PS5_LeftBumper,
    PS5_RightBumper,
    PS5_Option,
    PS5_Create,
    PS5_Mute,
    PS5_LeftPad_Touch,
    PS5_LeftPad_Swipe,
    PS5_LeftPad_Click,
    PS5_LeftPad_DPadNorth,
    PS5_LeftPad_DPadSouth,
    PS5_LeftPad_DPadWest,
    PS5_LeftPad_DPadEast,
    PS5_RightPad_Touch,
    PS5_RightPad_Swipe,
    PS5_RightPad_Click,
    PS5_RightPad_DPadNorth,
    PS5_RightPad_DPadSouth,
    PS5_RightPad_DPadWest,
    PS5_RightPad_DPadEast,
    PS5_CenterPad_Touch,
    PS5_CenterPad_Swipe,
    PS5_CenterPad_Click,
    PS5_CenterPad_DPadNorth,
    PS5_CenterPad_DPadSouth,
    PS5_CenterPad_DPadWest,
    PS5_CenterPad_DPadEast,
    PS5_LeftTrigger_Pull,
    PS5_LeftTrigger_Click,
    PS5_RightTrigger_Pull,
    PS5_RightTrigger_Click,
    PS5_LeftStick_Move,
    PS5_LeftStick_Click,
    PS5_LeftStick_DPadNorth,
    PS5_LeftStick_DPadSouth,
    PS5_LeftStick_DPadWest,
    PS5_LeftStick_DPadEast,
    PS5_RightStick_Move,
    PS5_RightStick_Click,
    PS5_RightStick_DPadNorth,
    PS5_RightStick_DPadSouth,
    PS5_RightStick_DPadWest,
    PS5_RightStick_DPadEast,
    PS5_DPad_North,
    PS5_DPad_South,
    PS5_DPad_West,
    PS5_DPad_East,
    PS5_Gyro_Move,
    PS5_Gyro_Pitch,
    PS5_Gyro_Yaw,
    PS5_Gyro_Roll,
    PS5_DPad_Move,
    PS5_LeftGrip,
    PS5_RightGrip,
    PS5_LeftFn,
    PS5_RightFn,
    PS5_Reserved5,
    PS5_Reserved6,
    PS5_Reserved7,
    PS5_Reserved8,
    PS5_Reserved9,
    PS5_Reserved10,
    PS5_Reserved11,
    PS5_Reserved12,
    PS5_Reserved13,
    PS5_Reserved14,
    PS5_Reserved15,
    PS5_Reserved16,
    PS5_Reserved17,
    PS5_Reserved18,
    PS5_Reserved19,
    PS5_Reserved20,

    // Steam Deck
    SteamDeck_A,
    SteamDeck_B,
    SteamDeck_X,
    SteamDeck_Y,
    SteamDeck_L1,
    SteamDeck_R1,
    SteamDeck_Menu,
    SteamDeck_View,
    SteamDeck_LeftPad_Touch,
    SteamDeck_LeftPad_Swipe,
    SteamDeck_LeftPad_Click,
    SteamDeck_LeftPad_DPadNorth,
    SteamDeck_LeftPad_DPadSouth,
    SteamDeck_LeftPad_DPadWest,
    SteamDeck_LeftPad_DPadEast,
    SteamDeck_RightPad_Touch,
    SteamDeck_RightPad_Swipe,
    SteamDeck_RightPad_Click,
    SteamDeck_RightPad_DPadNorth,
    SteamDeck_RightPad_DPadSouth,
    SteamDeck_RightPad_DPadWest,
    SteamDeck_RightPad_DPadEast,
    SteamDeck_L2_SoftPull,
    SteamDeck_L2,
    SteamDeck_R2_SoftPull,
    SteamDeck_R2,
    SteamDeck_LeftStick_Move,
    SteamDeck_L3,
    SteamDeck_LeftStick_DPadNorth,
    SteamDeck_LeftStick_DPadSouth,
    SteamDeck_LeftStick_DPadWest,
    SteamDeck_LeftStick_DPadEast,
    SteamDeck_LeftStick_Touch,
    SteamDeck_RightStick_Move,
    SteamDeck_R3,
    SteamDeck_RightStick_DPadNorth,
    SteamDeck_RightStick_DPadSouth,
    SteamDeck_RightStick_DPadWest,
    SteamDeck_RightStick_DPadEast,
    SteamDeck_RightStick_Touch,
    SteamDeck_L4,
    SteamDeck_R4,
    SteamDeck_L5,
    SteamDeck_R5,
    SteamDeck_DPad_Move,
    SteamDeck_DPad_North,
    SteamDeck_DPad_South,
    SteamDeck_DPad_West,
    SteamDeck_DPad_East,
    SteamDeck_Gyro_Move,
    SteamDeck_Gyro_Pitch,
    SteamDeck_Gyro_Yaw,
    SteamDeck_Gyro_Roll,
    SteamDeck_Reserved1,
    SteamDeck_Reserved2,
    SteamDeck_Reserved3,
    SteamDeck_Reserved4,
    SteamDeck_Reserved5,
    SteamDeck_Reserved6,
    SteamDeck_Reserved7,
    SteamDeck_Reserved8,
    SteamDeck_Reserved9,
    SteamDeck_Reserved10,
    SteamDeck_Reserved11,
    SteamDeck_Reserved12,
    SteamDeck_Reserved13,
    SteamDeck_Reserved14,
    SteamDeck_Reserved15,
    SteamDeck_Reserved16,
    SteamDeck_Reserved17,
    SteamDeck_Reserved18,
    SteamDeck_Reserved19,
    SteamDeck_Reserved20,

    // Horipad for Steam extras
    Horipad_M1,
    Horipad_M2,
    Horipad_L4,
    Horipad_R4,
}

/// Raw origin value as exchanged with the native side
///
/// Unlike [`Origin`] this can hold values outside the table: the decode
/// failure marker [`ActionOrigin::UNKNOWN`], the [`ActionOrigin::COUNT`] end
/// marker, or anything a newer native build reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionOrigin(i32);

impl ActionOrigin {
    /// Decode failure / unresolved name
    pub const UNKNOWN: Self = Self(-1);

    /// One past the last valid origin
    pub const COUNT: Self = Self(Origin::Count as i32);

    /// Upper bound the native side documents for origin values
    pub const MAXIMUM_POSSIBLE_VALUE: Self = Self(32767);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// The table entry for this value, if it has one
    pub fn origin(self) -> Option<Origin> {
        usize::try_from(self.0)
            .ok()
            .and_then(|index| Origin::ALL.get(index).copied())
    }

    /// Display name; values outside the table yield `"unknown"`
    pub fn display_name(self) -> &'static str {
        self.origin().map_or(UNKNOWN_ORIGIN_NAME, Origin::name)
    }

    /// Resolves a numeric string or an origin name (case-insensitive)
    pub fn from_name(text: &str) -> Self {
        let text = text.trim();
        if let Ok(raw) = text.parse::<i32>() {
            return Self(raw);
        }

        name_index()
            .get(&text.to_ascii_lowercase())
            .copied()
            .unwrap_or(Self::UNKNOWN)
    }
}

impl From<Origin> for ActionOrigin {
    fn from(origin: Origin) -> Self {
        Self(origin as i32)
    }
}

impl Default for ActionOrigin {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for ActionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// Built on first reverse lookup, read-only afterwards.
fn name_index() -> &'static HashMap<String, ActionOrigin> {
    static INDEX: OnceLock<HashMap<String, ActionOrigin>> = OnceLock::new();
    INDEX.get_or_init(|| {
        Origin::ALL
            .iter()
            .map(|origin| (origin.name().to_ascii_lowercase(), ActionOrigin::from(*origin)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_dense_and_ordered() {
        for (index, origin) in Origin::ALL.iter().enumerate() {
            assert_eq!(*origin as i32, index as i32);
        }
        assert_eq!(Origin::ALL.len() as i32, ActionOrigin::COUNT.raw());
    }

    #[test]
    fn every_origin_round_trips_through_its_name() {
        for origin in Origin::ALL {
            let value = ActionOrigin::from(*origin);
            assert_eq!(ActionOrigin::from_name(value.display_name()), value);
        }
    }

    #[test]
    fn names_are_unique() {
        assert_eq!(name_index().len(), Origin::ALL.len());
    }

    #[test]
    fn steam_controller_a_round_trips() {
        let a = ActionOrigin::from(Origin::SteamController_A);
        assert_eq!(ActionOrigin::from_name("SteamController_A"), a);
        assert_eq!(a.display_name(), "SteamController_A");
        assert_eq!(a.raw(), 1);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            ActionOrigin::from_name("ps5_leftstick_move"),
            ActionOrigin::from(Origin::PS5_LeftStick_Move)
        );
    }

    #[test]
    fn numeric_text_is_taken_verbatim() {
        assert_eq!(ActionOrigin::from_name("42").raw(), 42);
        assert_eq!(ActionOrigin::from_name("-1"), ActionOrigin::UNKNOWN);
    }

    #[test]
    fn unresolved_names_fall_back_to_unknown() {
        assert_eq!(
            ActionOrigin::from_name("not_a_real_origin"),
            ActionOrigin::UNKNOWN
        );
        assert_eq!(ActionOrigin::from_name(""), ActionOrigin::UNKNOWN);
    }

    #[test]
    fn out_of_table_values_display_as_unknown() {
        assert_eq!(ActionOrigin::UNKNOWN.display_name(), "unknown");
        assert_eq!(ActionOrigin::COUNT.display_name(), "unknown");
        assert_eq!(ActionOrigin::MAXIMUM_POSSIBLE_VALUE.display_name(), "unknown");
        assert_eq!(ActionOrigin::from(Origin::None).display_name(), "None");
    }

    #[test]
    fn horipad_extras_close_the_table() {
        assert_eq!(Origin::ALL.last(), Some(&Origin::Horipad_R4));
    }
}
