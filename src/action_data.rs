//! Action and motion snapshots
//!
//! The native side exposes analog and motion data as a snapshot call followed
//! by one query per field. The helpers here run that sequence and assemble the
//! typed record. They take `&mut dyn NativeGateway`, so nothing else can reach
//! the gateway between the snapshot and its field reads.

use crate::gateway::{MotionField, NativeGateway};
use crate::handle::{AnalogActionHandle, ControllerHandle};

/// Decoded digital action state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalActionState {
    /// Logical button state
    pub state: bool,
    /// Whether the action is bound and active in the current action set
    pub active: bool,
}

/// How the native side currently sources an analog action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputSourceMode {
    #[default]
    None,
    Dpad,
    Buttons,
    FourButtons,
    AbsoluteMouse,
    RelativeMouse,
    JoystickMove,
    JoystickMouse,
    JoystickCamera,
    ScrollWheel,
    Trigger,
    TouchMenu,
    MouseJoystick,
    MouseRegion,
    RadialMenu,
    SingleButton,
    Switches,
}

impl InputSourceMode {
    /// Unknown raw values decode to `None`
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Dpad,
            2 => Self::Buttons,
            3 => Self::FourButtons,
            4 => Self::AbsoluteMouse,
            5 => Self::RelativeMouse,
            6 => Self::JoystickMove,
            7 => Self::JoystickMouse,
            8 => Self::JoystickCamera,
            9 => Self::ScrollWheel,
            10 => Self::Trigger,
            11 => Self::TouchMenu,
            12 => Self::MouseJoystick,
            13 => Self::MouseRegion,
            14 => Self::RadialMenu,
            15 => Self::SingleButton,
            16 => Self::Switches,
            _ => Self::None,
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }
}

/// Analog action snapshot. `x`/`y` only mean something while `active` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalogActionState {
    pub active: bool,
    pub mode: InputSourceMode,
    pub x: f32,
    pub y: f32,
}

/// Motion sensor snapshot, all zero while the sensor is inactive
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub rot_quat_x: f32,
    pub rot_quat_y: f32,
    pub rot_quat_z: f32,
    pub rot_quat_w: f32,
    pub pos_accel_x: f32,
    pub pos_accel_y: f32,
    pub pos_accel_z: f32,
    pub rot_vel_x: f32,
    pub rot_vel_y: f32,
    pub rot_vel_z: f32,
}

impl MotionState {
    fn field_mut(&mut self, field: MotionField) -> &mut f32 {
        match field {
            MotionField::RotQuatX => &mut self.rot_quat_x,
            MotionField::RotQuatY => &mut self.rot_quat_y,
            MotionField::RotQuatZ => &mut self.rot_quat_z,
            MotionField::RotQuatW => &mut self.rot_quat_w,
            MotionField::PosAccelX => &mut self.pos_accel_x,
            MotionField::PosAccelY => &mut self.pos_accel_y,
            MotionField::PosAccelZ => &mut self.pos_accel_z,
            MotionField::RotVelX => &mut self.rot_vel_x,
            MotionField::RotVelY => &mut self.rot_vel_y,
            MotionField::RotVelZ => &mut self.rot_vel_z,
        }
    }
}

/// Controller family reported for a handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    #[default]
    Unknown,
    SteamController,
    XBox360Controller,
    XBoxOneController,
    GenericGamepad,
    PS4Controller,
    AppleMFiController,
    AndroidController,
    SwitchJoyConPair,
    SwitchJoyConSingle,
    SwitchProController,
    MobileTouch,
    PS3Controller,
    PS5Controller,
    SteamDeckController,
}

impl InputType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::SteamController,
            2 => Self::XBox360Controller,
            3 => Self::XBoxOneController,
            4 => Self::GenericGamepad,
            5 => Self::PS4Controller,
            6 => Self::AppleMFiController,
            7 => Self::AndroidController,
            8 => Self::SwitchJoyConPair,
            9 => Self::SwitchJoyConSingle,
            10 => Self::SwitchProController,
            11 => Self::MobileTouch,
            12 => Self::PS3Controller,
            13 => Self::PS5Controller,
            14 => Self::SteamDeckController,
            _ => Self::Unknown,
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }
}

/// Snapshot one analog action into `out`
///
/// An action the snapshot reports as inactive keeps the default mode and
/// coordinates; its field reads are skipped.
pub(crate) fn read_analog_action(
    gateway: &mut dyn NativeGateway,
    controller: ControllerHandle,
    action: AnalogActionHandle,
    out: &mut AnalogActionState,
) {
    *out = AnalogActionState::default();
    gateway.fetch_analog_action_data(controller.raw(), action.raw());

    out.active = gateway.analog_data_active();
    if !out.active {
        return;
    }
    out.mode = InputSourceMode::from_raw(gateway.analog_data_mode());
    out.x = gateway.analog_data_x();
    out.y = gateway.analog_data_y();
}

/// Snapshot the motion sensors of `controller` into `out`
pub(crate) fn read_motion(
    gateway: &mut dyn NativeGateway,
    controller: ControllerHandle,
    out: &mut MotionState,
) {
    gateway.fetch_motion_data(controller.raw());
    for field in MotionField::ALL {
        *out.field_mut(field) = gateway.motion_data_field(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::recording::{GatewayScript, RecordingGateway};

    #[test]
    fn inactive_analog_snapshot_skips_field_reads() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript {
            analog_active: false,
            analog_x: 0.7,
            ..Default::default()
        });
        let mut out = AnalogActionState {
            active: true,
            mode: InputSourceMode::JoystickMove,
            x: 0.3,
            y: -0.3,
        };

        read_analog_action(
            &mut gateway,
            ControllerHandle::from_raw(0),
            AnalogActionHandle::from_raw(1),
            &mut out,
        );

        assert_eq!(out, AnalogActionState::default());
        assert_eq!(log.count("analog_data_x"), 0);
        assert_eq!(log.count("fetch_analog_action_data"), 1);
    }

    #[test]
    fn active_analog_snapshot_reads_every_field() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript {
            analog_active: true,
            analog_mode: 6,
            analog_x: 0.25,
            analog_y: -0.5,
            ..Default::default()
        });
        let mut out = AnalogActionState::default();

        read_analog_action(
            &mut gateway,
            ControllerHandle::from_raw(1),
            AnalogActionHandle::from_raw(2),
            &mut out,
        );

        assert_eq!(
            out,
            AnalogActionState {
                active: true,
                mode: InputSourceMode::JoystickMove,
                x: 0.25,
                y: -0.5,
            }
        );
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn motion_snapshot_maps_fields_in_order() {
        let motion = [0.0, 0.0, 0.0, 1.0, 0.1, 0.2, 9.8, 1.5, 2.5, 3.5];
        let (mut gateway, log) = RecordingGateway::new(GatewayScript {
            motion,
            ..Default::default()
        });
        let mut out = MotionState::default();

        read_motion(&mut gateway, ControllerHandle::from_raw(0), &mut out);

        assert_eq!(out.rot_quat_w, 1.0);
        assert_eq!(out.pos_accel_z, 9.8);
        assert_eq!(out.rot_vel_x, 1.5);
        assert_eq!(out.rot_vel_z, 3.5);
        assert_eq!(log.count("motion_data_field"), 10);
    }

    #[test]
    fn unknown_raw_modes_decode_to_none() {
        assert_eq!(InputSourceMode::from_raw(10), InputSourceMode::Trigger);
        assert_eq!(InputSourceMode::from_raw(99), InputSourceMode::None);
        assert_eq!(InputSourceMode::JoystickMove.raw(), 6);
        assert_eq!(InputType::from_raw(13), InputType::PS5Controller);
        assert_eq!(InputType::from_raw(-4), InputType::Unknown);
    }
}
