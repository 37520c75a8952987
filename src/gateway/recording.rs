//! Scripted gateway that records every native call
//!
//! Answers come from a [`GatewayScript`]; every call lands in a shared
//! [`CallLog`] the caller keeps after the gateway has been boxed into the
//! facade. Used by the crate's own tests and usable by applications that want
//! to test their input code without hardware.

use super::{MotionField, NativeGateway};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One native call as observed by the gateway
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    /// Any entry point whose arguments the tests do not care about
    Query(&'static str),
    ActivateActionSet {
        controller: i32,
        action_set: i32,
    },
    HapticPulse {
        controller: i32,
        pad: i32,
        duration_us: u16,
    },
    RepeatedHapticPulse {
        controller: i32,
        pad: i32,
        on_us: u16,
        off_us: u16,
        repeat: u16,
        flags: u32,
    },
    Vibration {
        controller: i32,
        left_speed: u16,
        right_speed: u16,
    },
    LedColor {
        controller: i32,
        red: u8,
        green: u8,
        blue: u8,
        flags: u32,
    },
}

impl NativeCall {
    fn is_haptic(&self) -> bool {
        matches!(
            self,
            NativeCall::HapticPulse { .. } | NativeCall::RepeatedHapticPulse { .. }
        )
    }
}

/// Shared, append-only record of native calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<NativeCall>>>);

impl CallLog {
    fn push(&self, call: NativeCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of [`NativeCall::Query`] entries for `name`
    pub fn count(&self, name: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|call| matches!(call, NativeCall::Query(n) if *n == name))
            .count()
    }

    /// Haptic dispatches in call order
    pub fn haptics(&self) -> Vec<NativeCall> {
        self.0
            .borrow()
            .iter()
            .filter(|call| call.is_haptic())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Canned answers for a [`RecordingGateway`]
#[derive(Debug, Clone)]
pub struct GatewayScript {
    pub init_succeeds: bool,
    pub activate_succeeds: bool,
    pub controllers: String,
    pub layers: String,
    pub origins: String,
    pub digital_state: i32,
    pub analog_active: bool,
    pub analog_mode: i32,
    pub analog_x: f32,
    pub analog_y: f32,
    pub motion: [f32; 10],
    pub action_sets: HashMap<String, i32>,
    pub digital_actions: HashMap<String, i32>,
    pub analog_actions: HashMap<String, i32>,
    pub input_type: i32,
    pub glyph_path: String,
}

impl Default for GatewayScript {
    fn default() -> Self {
        Self {
            init_succeeds: true,
            activate_succeeds: true,
            controllers: "0,1".to_string(),
            layers: String::new(),
            origins: String::new(),
            digital_state: 0,
            analog_active: false,
            analog_mode: 0,
            analog_x: 0.0,
            analog_y: 0.0,
            motion: [0.0; 10],
            action_sets: HashMap::new(),
            digital_actions: HashMap::new(),
            analog_actions: HashMap::new(),
            input_type: 0,
            glyph_path: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct RecordingGateway {
    script: GatewayScript,
    log: CallLog,
    current_action_set: HashMap<i32, i32>,
}

impl RecordingGateway {
    /// Creates the gateway and hands back the log it writes to
    pub fn new(script: GatewayScript) -> (Self, CallLog) {
        let log = CallLog::default();
        let gateway = Self {
            script,
            log: log.clone(),
            current_action_set: HashMap::new(),
        };
        (gateway, log)
    }

    fn query(&self, name: &'static str) {
        self.log.push(NativeCall::Query(name));
    }
}

impl NativeGateway for RecordingGateway {
    fn init(&mut self) -> bool {
        self.query("init");
        self.script.init_succeeds
    }

    fn shutdown(&mut self) {
        self.query("shutdown");
    }

    fn run_frame(&mut self) {
        self.query("run_frame");
    }

    fn max_controllers(&mut self) -> i32 {
        self.query("max_controllers");
        16
    }

    fn max_analog_actions(&mut self) -> i32 {
        self.query("max_analog_actions");
        24
    }

    fn max_digital_actions(&mut self) -> i32 {
        self.query("max_digital_actions");
        256
    }

    fn max_origins(&mut self) -> i32 {
        self.query("max_origins");
        8
    }

    fn min_analog_value(&mut self) -> f32 {
        self.query("min_analog_value");
        -1.0
    }

    fn max_analog_value(&mut self) -> f32 {
        self.query("max_analog_value");
        1.0
    }

    fn connected_controllers(&mut self) -> String {
        self.query("connected_controllers");
        self.script.controllers.clone()
    }

    fn activate_action_set(&mut self, controller: i32, action_set: i32) -> bool {
        self.log.push(NativeCall::ActivateActionSet {
            controller,
            action_set,
        });
        if !self.script.activate_succeeds {
            return false;
        }
        self.current_action_set.insert(controller, action_set);
        true
    }

    fn current_action_set(&mut self, controller: i32) -> i32 {
        self.query("current_action_set");
        self.current_action_set
            .get(&controller)
            .copied()
            .unwrap_or(0)
    }

    fn activate_action_set_layer(&mut self, _controller: i32, _layer: i32) -> bool {
        self.query("activate_action_set_layer");
        true
    }

    fn deactivate_action_set_layer(&mut self, _controller: i32, _layer: i32) -> bool {
        self.query("deactivate_action_set_layer");
        true
    }

    fn deactivate_all_action_set_layers(&mut self, _controller: i32) -> bool {
        self.query("deactivate_all_action_set_layers");
        true
    }

    fn active_action_set_layers(&mut self, _controller: i32) -> String {
        self.query("active_action_set_layers");
        self.script.layers.clone()
    }

    fn action_set_handle(&mut self, name: &str) -> i32 {
        self.query("action_set_handle");
        self.script.action_sets.get(name).copied().unwrap_or(0)
    }

    fn digital_action_handle(&mut self, name: &str) -> i32 {
        self.query("digital_action_handle");
        self.script.digital_actions.get(name).copied().unwrap_or(0)
    }

    fn analog_action_handle(&mut self, name: &str) -> i32 {
        self.query("analog_action_handle");
        self.script.analog_actions.get(name).copied().unwrap_or(0)
    }

    fn input_type_for_handle(&mut self, _controller: i32) -> i32 {
        self.query("input_type_for_handle");
        self.script.input_type
    }

    fn controller_for_gamepad_index(&mut self, index: i32) -> i32 {
        self.query("controller_for_gamepad_index");
        index
    }

    fn gamepad_index_for_controller(&mut self, controller: i32) -> i32 {
        self.query("gamepad_index_for_controller");
        controller
    }

    fn show_binding_panel(&mut self, _controller: i32) -> bool {
        self.query("show_binding_panel");
        true
    }

    fn digital_action_data(&mut self, _controller: i32, _action: i32) -> i32 {
        self.query("digital_action_data");
        self.script.digital_state
    }

    fn digital_action_origins(&mut self, _controller: i32, _set: i32, _action: i32) -> String {
        self.query("digital_action_origins");
        self.script.origins.clone()
    }

    fn analog_action_origins(&mut self, _controller: i32, _set: i32, _action: i32) -> String {
        self.query("analog_action_origins");
        self.script.origins.clone()
    }

    fn fetch_analog_action_data(&mut self, _controller: i32, _action: i32) {
        self.query("fetch_analog_action_data");
    }

    fn analog_data_active(&mut self) -> bool {
        self.query("analog_data_active");
        self.script.analog_active
    }

    fn analog_data_mode(&mut self) -> i32 {
        self.query("analog_data_mode");
        self.script.analog_mode
    }

    fn analog_data_x(&mut self) -> f32 {
        self.query("analog_data_x");
        self.script.analog_x
    }

    fn analog_data_y(&mut self) -> f32 {
        self.query("analog_data_y");
        self.script.analog_y
    }

    fn stop_analog_action_momentum(&mut self, _controller: i32, _action: i32) {
        self.query("stop_analog_action_momentum");
    }

    fn fetch_motion_data(&mut self, _controller: i32) {
        self.query("fetch_motion_data");
    }

    fn motion_data_field(&mut self, field: MotionField) -> f32 {
        self.query("motion_data_field");
        let index = MotionField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.script.motion[index]
    }

    fn glyph_for_action_origin(&mut self, _origin: i32) -> String {
        self.query("glyph_for_action_origin");
        self.script.glyph_path.clone()
    }

    fn string_for_action_origin(&mut self, origin: i32) -> String {
        self.query("string_for_action_origin");
        format!("origin {origin}")
    }

    fn trigger_haptic_pulse(&mut self, controller: i32, pad: i32, duration_us: u16) {
        self.log.push(NativeCall::HapticPulse {
            controller,
            pad,
            duration_us,
        });
    }

    fn trigger_repeated_haptic_pulse(
        &mut self,
        controller: i32,
        pad: i32,
        on_us: u16,
        off_us: u16,
        repeat: u16,
        flags: u32,
    ) {
        self.log.push(NativeCall::RepeatedHapticPulse {
            controller,
            pad,
            on_us,
            off_us,
            repeat,
            flags,
        });
    }

    fn trigger_vibration(&mut self, controller: i32, left_speed: u16, right_speed: u16) {
        self.log.push(NativeCall::Vibration {
            controller,
            left_speed,
            right_speed,
        });
    }

    fn set_led_color(&mut self, controller: i32, red: u8, green: u8, blue: u8, flags: u32) {
        self.log.push(NativeCall::LedColor {
            controller,
            red,
            green,
            blue,
            flags,
        });
    }
}
