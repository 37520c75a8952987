//! The facade application code talks to
//!
//! [`SteamInput`] owns the gateway, the capability cache and the `active`
//! flag. There is one per process and it is passed explicitly to whoever
//! needs input; nothing here is global.
//!
//! Every public operation starts with the same precondition: when the facade
//! is inactive (never brought up, or shut down) it returns its safe default
//! without touching the gateway. A native failure looks exactly like an
//! inactive facade to the caller.

pub mod bootstrap;

use crate::action_data::{
    self, AnalogActionState, DigitalActionState, InputType, MotionState,
};
use crate::capability::{CapabilityCache, CapabilityKind};
use crate::codec;
use crate::gateway::{GatewayError, NativeGateway};
use crate::handle::{AnalogActionHandle, ActionSetHandle, ControllerHandle, DigitalActionHandle};
use crate::haptics::{self, SteamControllerPad};
use crate::origin::ActionOrigin;
use bootstrap::Bootstrap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

/// Errors raised while bringing the facade up
///
/// They never reach callers of the facade's operations; [`SteamInput::initialize`]
/// reports them and returns an inactive facade instead.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Native input subsystem refused to initialize")]
    InitializationFailed,

    #[error("No gateway was loaded before start")]
    MissingGateway,
}

/// The single failure callback configured by the host
#[derive(Clone, Default)]
pub struct ErrorReporter(Option<Rc<dyn Fn(&str)>>);

impl ErrorReporter {
    pub fn new(callback: impl Fn(&str) + 'static) -> Self {
        Self(Some(Rc::new(callback)))
    }

    /// Reporter that drops every message
    pub fn none() -> Self {
        Self(None)
    }

    pub fn report(&self, message: &str) {
        if let Some(callback) = &self.0 {
            callback(message);
        }
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorReporter")
            .field(&self.0.as_ref().map(|_| "callback"))
            .finish()
    }
}

/// Safe facade over the native input subsystem
#[derive(Debug)]
pub struct SteamInput {
    gateway: Option<Box<dyn NativeGateway>>,
    capabilities: CapabilityCache,
    reporter: ErrorReporter,
    active: bool,
}

impl SteamInput {
    /// Loads the gateway and brings the input subsystem up
    ///
    /// Never fails: if either step fails the error goes to `reporter` once and
    /// the returned facade stays inactive for good.
    pub fn initialize<L>(loader: L, reporter: ErrorReporter) -> Self
    where
        L: FnOnce() -> Result<Box<dyn NativeGateway>, GatewayError>,
    {
        let started = Bootstrap::create(reporter.clone())
            .load(loader)
            .and_then(|ready| ready.start());

        match started {
            Ok(input) => {
                info!("Steam Input facade is active");
                input
            }
            Err(e) => {
                error!("Steam Input facade unavailable: {}", e);
                reporter.report(&e.to_string());
                Self::inactive(reporter)
            }
        }
    }

    /// A facade that was never brought up
    pub fn inactive(reporter: ErrorReporter) -> Self {
        Self {
            gateway: None,
            capabilities: CapabilityCache::new(),
            reporter,
            active: false,
        }
    }

    pub(crate) fn with_gateway(gateway: Box<dyn NativeGateway>, reporter: ErrorReporter) -> Self {
        Self {
            gateway: Some(gateway),
            capabilities: CapabilityCache::new(),
            reporter,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Shuts the input subsystem down; the facade stays inactive afterwards
    pub fn shutdown(&mut self) {
        let Some(gateway) = self.gateway() else {
            debug!("Shutdown requested on inactive facade");
            return;
        };
        gateway.shutdown();
        self.active = false;
        info!("Steam Input facade shut down");
    }

    // Gateway access gated on the active flag
    fn gateway(&mut self) -> Option<&mut (dyn NativeGateway + 'static)> {
        if !self.active {
            return None;
        }
        self.gateway.as_deref_mut()
    }

    /// Pumps native input state; call once per frame
    pub fn run_frame(&mut self) {
        if let Some(gateway) = self.gateway() {
            gateway.run_frame();
        }
    }

    // Capability limits

    /// Memoized SDK limit
    ///
    /// Not gated on the active flag: the limits are static, so a loaded
    /// gateway is still asked after shutdown.
    pub fn capability(&mut self, kind: CapabilityKind) -> f64 {
        self.capabilities.get(kind, self.gateway.as_deref_mut())
    }

    pub fn max_controllers(&mut self) -> usize {
        self.capability(CapabilityKind::MaxControllers) as usize
    }

    pub fn max_analog_actions(&mut self) -> usize {
        self.capability(CapabilityKind::MaxAnalogActions) as usize
    }

    pub fn max_digital_actions(&mut self) -> usize {
        self.capability(CapabilityKind::MaxDigitalActions) as usize
    }

    pub fn max_origins(&mut self) -> usize {
        self.capability(CapabilityKind::MaxOrigins) as usize
    }

    pub fn min_analog_value(&mut self) -> f32 {
        self.capability(CapabilityKind::MinAnalogValue) as f32
    }

    pub fn max_analog_value(&mut self) -> f32 {
        self.capability(CapabilityKind::MaxAnalogValue) as f32
    }

    // Controllers and action sets

    /// Handles of the connected controllers, in native order
    ///
    /// Handles from an earlier call must not be reused after this one.
    pub fn connected_controllers(&mut self) -> Vec<ControllerHandle> {
        let Some(gateway) = self.gateway() else {
            return Vec::new();
        };
        let controllers: Vec<ControllerHandle> =
            codec::decode_integer_list(&gateway.connected_controllers())
                .into_iter()
                .map(ControllerHandle::from_raw)
                .collect();
        trace!("Connected controllers: {:?}", controllers);
        controllers
    }

    pub fn activate_action_set(
        &mut self,
        controller: ControllerHandle,
        action_set: ActionSetHandle,
    ) -> bool {
        let Some(gateway) = self.gateway() else {
            return false;
        };
        let activated = gateway.activate_action_set(controller.raw(), action_set.raw());
        if !activated {
            let message = format!("Failed to activate {} on {}", action_set, controller);
            warn!("{}", message);
            self.reporter.report(&message);
        }
        activated
    }

    pub fn current_action_set(&mut self, controller: ControllerHandle) -> ActionSetHandle {
        let Some(gateway) = self.gateway() else {
            return ActionSetHandle::INACTIVE;
        };
        ActionSetHandle::from_raw(gateway.current_action_set(controller.raw()))
    }

    pub fn activate_action_set_layer(
        &mut self,
        controller: ControllerHandle,
        layer: ActionSetHandle,
    ) -> bool {
        let Some(gateway) = self.gateway() else {
            return false;
        };
        gateway.activate_action_set_layer(controller.raw(), layer.raw())
    }

    pub fn deactivate_action_set_layer(
        &mut self,
        controller: ControllerHandle,
        layer: ActionSetHandle,
    ) -> bool {
        let Some(gateway) = self.gateway() else {
            return false;
        };
        gateway.deactivate_action_set_layer(controller.raw(), layer.raw())
    }

    pub fn deactivate_all_action_set_layers(&mut self, controller: ControllerHandle) -> bool {
        let Some(gateway) = self.gateway() else {
            return false;
        };
        gateway.deactivate_all_action_set_layers(controller.raw())
    }

    pub fn active_action_set_layers(&mut self, controller: ControllerHandle) -> Vec<ActionSetHandle> {
        let Some(gateway) = self.gateway() else {
            return Vec::new();
        };
        codec::decode_integer_list(&gateway.active_action_set_layers(controller.raw()))
            .into_iter()
            .map(ActionSetHandle::from_raw)
            .collect()
    }

    /// Resolve once at startup and keep the handle; lookups are by string
    pub fn action_set_handle(&mut self, name: &str) -> ActionSetHandle {
        let Some(gateway) = self.gateway() else {
            return ActionSetHandle::INACTIVE;
        };
        let handle = ActionSetHandle::from_raw(gateway.action_set_handle(name));
        debug!("Action set {:?} resolved to {}", name, handle);
        handle
    }

    pub fn digital_action_handle(&mut self, name: &str) -> DigitalActionHandle {
        let Some(gateway) = self.gateway() else {
            return DigitalActionHandle::INACTIVE;
        };
        let handle = DigitalActionHandle::from_raw(gateway.digital_action_handle(name));
        debug!("Digital action {:?} resolved to {}", name, handle);
        handle
    }

    pub fn analog_action_handle(&mut self, name: &str) -> AnalogActionHandle {
        let Some(gateway) = self.gateway() else {
            return AnalogActionHandle::INACTIVE;
        };
        let handle = AnalogActionHandle::from_raw(gateway.analog_action_handle(name));
        debug!("Analog action {:?} resolved to {}", name, handle);
        handle
    }

    pub fn input_type_for_handle(&mut self, controller: ControllerHandle) -> InputType {
        let Some(gateway) = self.gateway() else {
            return InputType::Unknown;
        };
        InputType::from_raw(gateway.input_type_for_handle(controller.raw()))
    }

    pub fn controller_for_gamepad_index(&mut self, index: i32) -> ControllerHandle {
        let Some(gateway) = self.gateway() else {
            return ControllerHandle::INVALID;
        };
        ControllerHandle::from_raw(gateway.controller_for_gamepad_index(index))
    }

    /// Gamepad index of `controller`, `-1` when it has none
    pub fn gamepad_index_for_controller(&mut self, controller: ControllerHandle) -> i32 {
        let Some(gateway) = self.gateway() else {
            return -1;
        };
        gateway.gamepad_index_for_controller(controller.raw())
    }

    pub fn show_binding_panel(&mut self, controller: ControllerHandle) -> bool {
        let Some(gateway) = self.gateway() else {
            return false;
        };
        gateway.show_binding_panel(controller.raw())
    }

    // Action data

    pub fn digital_action_data(
        &mut self,
        controller: ControllerHandle,
        action: DigitalActionHandle,
    ) -> DigitalActionState {
        let Some(gateway) = self.gateway() else {
            return DigitalActionState::default();
        };
        codec::decode_digital_state(gateway.digital_action_data(controller.raw(), action.raw()))
    }

    pub fn analog_action_data(
        &mut self,
        controller: ControllerHandle,
        action: AnalogActionHandle,
    ) -> AnalogActionState {
        let mut state = AnalogActionState::default();
        self.analog_action_data_into(controller, action, &mut state);
        state
    }

    /// Fills a reused record; an inactive facade resets it to the default
    pub fn analog_action_data_into(
        &mut self,
        controller: ControllerHandle,
        action: AnalogActionHandle,
        out: &mut AnalogActionState,
    ) {
        let Some(gateway) = self.gateway() else {
            *out = AnalogActionState::default();
            return;
        };
        action_data::read_analog_action(gateway, controller, action, out);
    }

    pub fn stop_analog_action_momentum(
        &mut self,
        controller: ControllerHandle,
        action: AnalogActionHandle,
    ) {
        if let Some(gateway) = self.gateway() {
            gateway.stop_analog_action_momentum(controller.raw(), action.raw());
        }
    }

    pub fn motion_data(&mut self, controller: ControllerHandle) -> MotionState {
        let mut state = MotionState::default();
        self.motion_data_into(controller, &mut state);
        state
    }

    /// Fills a reused record; an inactive facade resets it to the default
    pub fn motion_data_into(&mut self, controller: ControllerHandle, out: &mut MotionState) {
        let Some(gateway) = self.gateway() else {
            *out = MotionState::default();
            return;
        };
        action_data::read_motion(gateway, controller, out);
    }

    // Origins and glyphs

    /// Origins bound to a digital action, first origin at index 0
    pub fn digital_action_origins(
        &mut self,
        controller: ControllerHandle,
        action_set: ActionSetHandle,
        action: DigitalActionHandle,
    ) -> Vec<ActionOrigin> {
        let Some(gateway) = self.gateway() else {
            return Vec::new();
        };
        let encoded = gateway.digital_action_origins(controller.raw(), action_set.raw(), action.raw());
        codec::decode_origin_list(&encoded).origins
    }

    /// Buffer variant of [`SteamInput::digital_action_origins`]
    ///
    /// Keeps the native layout: the first origin is written to `out[1]`.
    /// Returns the number of origins found.
    pub fn digital_action_origins_into(
        &mut self,
        controller: ControllerHandle,
        action_set: ActionSetHandle,
        action: DigitalActionHandle,
        out: Option<&mut [ActionOrigin]>,
    ) -> usize {
        let Some(gateway) = self.gateway() else {
            return 0;
        };
        let encoded = gateway.digital_action_origins(controller.raw(), action_set.raw(), action.raw());
        codec::decode_origin_list_into(&encoded, out)
    }

    /// Origins bound to an analog action, first origin at index 0
    pub fn analog_action_origins(
        &mut self,
        controller: ControllerHandle,
        action_set: ActionSetHandle,
        action: AnalogActionHandle,
    ) -> Vec<ActionOrigin> {
        let Some(gateway) = self.gateway() else {
            return Vec::new();
        };
        let encoded = gateway.analog_action_origins(controller.raw(), action_set.raw(), action.raw());
        codec::decode_origin_list(&encoded).origins
    }

    /// Buffer variant of [`SteamInput::analog_action_origins`], same layout as
    /// [`SteamInput::digital_action_origins_into`]
    pub fn analog_action_origins_into(
        &mut self,
        controller: ControllerHandle,
        action_set: ActionSetHandle,
        action: AnalogActionHandle,
        out: Option<&mut [ActionOrigin]>,
    ) -> usize {
        let Some(gateway) = self.gateway() else {
            return 0;
        };
        let encoded = gateway.analog_action_origins(controller.raw(), action_set.raw(), action.raw());
        codec::decode_origin_list_into(&encoded, out)
    }

    /// Path of the glyph image for `origin`, empty when unavailable
    pub fn glyph_for_action_origin(&mut self, origin: ActionOrigin) -> String {
        let Some(gateway) = self.gateway() else {
            return String::new();
        };
        gateway.glyph_for_action_origin(origin.raw())
    }

    /// Localized description of `origin`, empty when unavailable
    pub fn string_for_action_origin(&mut self, origin: ActionOrigin) -> String {
        let Some(gateway) = self.gateway() else {
            return String::new();
        };
        gateway.string_for_action_origin(origin.raw())
    }

    // Haptics and output

    /// Single pulse of up to [`crate::MAX_SINGLE_PULSE_TIME`] microseconds
    pub fn trigger_haptic_pulse(
        &mut self,
        controller: ControllerHandle,
        pad: SteamControllerPad,
        duration_us: u32,
    ) {
        if let Some(gateway) = self.gateway() {
            haptics::pulse(gateway, controller, pad, duration_us);
        }
    }

    pub fn trigger_repeated_haptic_pulse(
        &mut self,
        controller: ControllerHandle,
        pad: SteamControllerPad,
        on_us: u32,
        off_us: u16,
        repeat: u16,
        flags: u32,
    ) {
        if let Some(gateway) = self.gateway() {
            haptics::repeated_pulse(gateway, controller, pad, on_us, off_us, repeat, flags);
        }
    }

    /// Rumble for `duration_ms` at `strength` in `0.0..=1.0`
    pub fn rumble(
        &mut self,
        controller: ControllerHandle,
        pad: SteamControllerPad,
        duration_ms: u32,
        strength: f64,
    ) {
        if let Some(gateway) = self.gateway() {
            haptics::rumble(gateway, controller, pad, duration_ms, strength);
        }
    }

    /// Motor speeds are clamped to `0..=65535`
    pub fn trigger_vibration(&mut self, controller: ControllerHandle, left_speed: i32, right_speed: i32) {
        let Some(gateway) = self.gateway() else {
            return;
        };
        let clamp = |speed: i32| speed.clamp(0, i32::from(u16::MAX)) as u16;
        gateway.trigger_vibration(controller.raw(), clamp(left_speed), clamp(right_speed));
    }

    /// Color channels are clamped to `0..=255`
    pub fn set_led_color(
        &mut self,
        controller: ControllerHandle,
        red: i32,
        green: i32,
        blue: i32,
        flags: u32,
    ) {
        let Some(gateway) = self.gateway() else {
            return;
        };
        let clamp = |channel: i32| channel.clamp(0, i32::from(u8::MAX)) as u8;
        gateway.set_led_color(controller.raw(), clamp(red), clamp(green), clamp(blue), flags);
    }
}
