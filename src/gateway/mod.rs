//! Native call gateway
//!
//! The native input subsystem is reached through a flat set of typed entry
//! points. Arguments and results stay at the ABI level on purpose: raw `i32`
//! handles, bit-packed integers and comma-delimited strings. Turning them into
//! typed values is the facade's job (see [`crate::codec`]), not the gateway's.
//!
//! Implementations:
//!
//! 1. [`gilrs_gateway::GilrsGateway`] - backed by gilrs (feature `gilrs`)
//! 2. [`recording::RecordingGateway`] - scripted double that logs every call

pub mod error;
#[cfg(feature = "gilrs")]
pub mod gilrs_gateway;
pub mod recording;

pub use error::GatewayError;

use std::fmt;

/// Single-field reads available after [`NativeGateway::fetch_motion_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionField {
    RotQuatX,
    RotQuatY,
    RotQuatZ,
    RotQuatW,
    PosAccelX,
    PosAccelY,
    PosAccelZ,
    RotVelX,
    RotVelY,
    RotVelZ,
}

impl MotionField {
    pub const ALL: [MotionField; 10] = [
        MotionField::RotQuatX,
        MotionField::RotQuatY,
        MotionField::RotQuatZ,
        MotionField::RotQuatW,
        MotionField::PosAccelX,
        MotionField::PosAccelY,
        MotionField::PosAccelZ,
        MotionField::RotVelX,
        MotionField::RotVelY,
        MotionField::RotVelZ,
    ];
}

/// Native pad selector. The native protocol has no "both pads" value.
pub const PAD_LEFT: i32 = 0;
pub const PAD_RIGHT: i32 = 1;

/// Entry points of the native input subsystem
///
/// Every call is synchronous. Controller arguments are slot indices handed out
/// by [`NativeGateway::connected_controllers`]; the native device ids behind
/// them never leave the implementation.
pub trait NativeGateway: fmt::Debug {
    /// Brings the input subsystem up. `false` leaves the facade inactive.
    fn init(&mut self) -> bool;

    fn shutdown(&mut self);

    /// Pumps native state; called once per application frame
    fn run_frame(&mut self);

    // Static SDK limits

    fn max_controllers(&mut self) -> i32;
    fn max_analog_actions(&mut self) -> i32;
    fn max_digital_actions(&mut self) -> i32;
    fn max_origins(&mut self) -> i32;
    fn min_analog_value(&mut self) -> f32;
    fn max_analog_value(&mut self) -> f32;

    // Controllers and action sets

    /// Comma-separated slot indices of connected controllers
    fn connected_controllers(&mut self) -> String;
    fn activate_action_set(&mut self, controller: i32, action_set: i32) -> bool;
    fn current_action_set(&mut self, controller: i32) -> i32;
    fn activate_action_set_layer(&mut self, controller: i32, layer: i32) -> bool;
    fn deactivate_action_set_layer(&mut self, controller: i32, layer: i32) -> bool;
    fn deactivate_all_action_set_layers(&mut self, controller: i32) -> bool;
    /// Comma-separated action set handles of the active layers
    fn active_action_set_layers(&mut self, controller: i32) -> String;
    fn action_set_handle(&mut self, name: &str) -> i32;
    fn digital_action_handle(&mut self, name: &str) -> i32;
    fn analog_action_handle(&mut self, name: &str) -> i32;
    fn input_type_for_handle(&mut self, controller: i32) -> i32;
    fn controller_for_gamepad_index(&mut self, index: i32) -> i32;
    fn gamepad_index_for_controller(&mut self, controller: i32) -> i32;
    fn show_binding_panel(&mut self, controller: i32) -> bool;

    // Action state

    /// Bit 0: state, bit 4: bound and active
    fn digital_action_data(&mut self, controller: i32, action: i32) -> i32;
    /// Count-prefixed comma list of origins
    fn digital_action_origins(&mut self, controller: i32, action_set: i32, action: i32) -> String;
    /// Count-prefixed comma list of origins
    fn analog_action_origins(&mut self, controller: i32, action_set: i32, action: i32) -> String;

    /// Takes the analog snapshot read by the `analog_data_*` calls
    fn fetch_analog_action_data(&mut self, controller: i32, action: i32);
    fn analog_data_active(&mut self) -> bool;
    fn analog_data_mode(&mut self) -> i32;
    fn analog_data_x(&mut self) -> f32;
    fn analog_data_y(&mut self) -> f32;
    fn stop_analog_action_momentum(&mut self, controller: i32, action: i32);

    /// Takes the motion snapshot read by [`NativeGateway::motion_data_field`]
    fn fetch_motion_data(&mut self, controller: i32);
    fn motion_data_field(&mut self, field: MotionField) -> f32;

    // Glyphs and origin hints

    fn glyph_for_action_origin(&mut self, origin: i32) -> String;
    fn string_for_action_origin(&mut self, origin: i32) -> String;

    // Output

    fn trigger_haptic_pulse(&mut self, controller: i32, pad: i32, duration_us: u16);
    fn trigger_repeated_haptic_pulse(
        &mut self,
        controller: i32,
        pad: i32,
        on_us: u16,
        off_us: u16,
        repeat: u16,
        flags: u32,
    );
    fn trigger_vibration(&mut self, controller: i32, left_speed: u16, right_speed: u16);
    fn set_led_color(&mut self, controller: i32, red: u8, green: u8, blue: u8, flags: u32);
}
