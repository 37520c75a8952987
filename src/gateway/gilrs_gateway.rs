//! Gateway backed by gilrs
//!
//! Plays the native side for plain gamepads. Connected gamepads live in a
//! fixed slot arena; the slot index is the controller handle and the
//! `GamepadId` never leaves this file. Action sets and actions come from the
//! [`ActionManifest`] instead of an SDK-side actions file.
//!
//! Not everything maps onto gilrs: there is no motion sensor, no LED, no
//! glyph set and no binding panel. Those calls answer with neutral values.

use super::{GatewayError, MotionField, NativeGateway, PAD_RIGHT};
use crate::action_data::{InputSourceMode, InputType};
use crate::capability::CapabilityKind;
use crate::codec::DELIMITER;
use crate::config::{ActionManifest, AnalogSource, ButtonType};
use crate::origin::{ActionOrigin, Origin};
use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Repeat, Replay, Ticks};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, info, trace, warn};

/// Number of controller slots
pub const MAX_CONTROLLERS: usize = 16;

// One connected gamepad
#[derive(Debug, Clone)]
struct Slot {
    id: GamepadId,
    action_set: i32,
    layers: Vec<i32>,
}

impl Slot {
    fn new(id: GamepadId) -> Self {
        Self {
            id,
            action_set: 0,
            layers: Vec::new(),
        }
    }
}

// Force feedback output a running effect is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EffectChannel {
    Pad(i32),
    Vibration,
}

#[derive(Debug, Clone, Copy, Default)]
struct AnalogSnapshot {
    active: bool,
    mode: InputSourceMode,
    x: f32,
    y: f32,
}

pub struct GilrsGateway {
    // Gilrs context
    gilrs: Gilrs,

    // Declared action sets and bindings
    manifest: ActionManifest,

    // Controller handle -> gamepad
    slots: [Option<Slot>; MAX_CONTROLLERS],

    // Effects stop when dropped, so running ones are kept here
    effects: HashMap<(usize, EffectChannel), Effect>,

    // Result of the last fetch_analog_action_data
    analog: AnalogSnapshot,
}

impl fmt::Debug for GilrsGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GilrsGateway")
            .field("manifest", &self.manifest)
            .field("slots", &self.slots)
            .field("effects", &self.effects.len())
            .field("analog", &self.analog)
            .finish()
    }
}

impl GilrsGateway {
    /// Opens the gilrs context; this is the gateway's load step
    pub fn new(manifest: ActionManifest) -> Result<Self, GatewayError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(GatewayError::LoadError(e.to_string()));
            }
        };

        Ok(Self {
            gilrs,
            manifest,
            slots: Default::default(),
            effects: HashMap::new(),
            analog: AnalogSnapshot::default(),
        })
    }

    /// Loader for [`crate::SteamInput::initialize`]
    pub fn boxed(manifest: ActionManifest) -> Result<Box<dyn NativeGateway>, GatewayError> {
        Ok(Box::new(Self::new(manifest)?))
    }

    fn assign_slot(&mut self, id: GamepadId) {
        if self.slot_of(id).is_some() {
            return;
        }
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                info!("Gamepad {} assigned to controller slot {}", id, index);
                self.slots[index] = Some(Slot::new(id));
            }
            None => warn!("No free controller slot for gamepad {}", id),
        }
    }

    fn release_slot(&mut self, id: GamepadId) {
        if let Some(index) = self.slot_of(id) {
            info!("Gamepad {} left controller slot {}", id, index);
            self.slots[index] = None;
            self.effects.retain(|(slot, _), _| *slot != index);
        }
    }

    fn slot_of(&self, id: GamepadId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.id == id))
    }

    fn slot(&self, controller: i32) -> Option<&Slot> {
        let index = usize::try_from(controller).ok()?;
        self.slots.get(index)?.as_ref()
    }

    fn slot_mut(&mut self, controller: i32) -> Option<&mut Slot> {
        let index = usize::try_from(controller).ok()?;
        self.slots.get_mut(index)?.as_mut()
    }

    fn gamepad(&self, controller: i32) -> Option<Gamepad<'_>> {
        let id = self.slot(controller)?.id;
        self.gilrs.connected_gamepad(id)
    }

    fn family(&self, controller: i32) -> InputType {
        self.gamepad(controller)
            .map(|gamepad| input_type_from_name(gamepad.name()))
            .unwrap_or(InputType::Unknown)
    }

    // Active layers win over the base set, most recent layer first
    fn active_sets(&self, controller: i32) -> Vec<i32> {
        match self.slot(controller) {
            Some(slot) => slot
                .layers
                .iter()
                .rev()
                .copied()
                .chain(std::iter::once(slot.action_set))
                .collect(),
            None => Vec::new(),
        }
    }

    fn play(
        &mut self,
        controller: i32,
        channel: EffectChannel,
        effects: Vec<BaseEffect>,
        repeat: Repeat,
    ) {
        let Some((index, id)) = usize::try_from(controller)
            .ok()
            .and_then(|index| Some((index, self.slot(controller)?.id)))
        else {
            debug!("Force feedback for unknown controller {}", controller);
            return;
        };

        let mut builder = EffectBuilder::new();
        for effect in effects {
            builder.add_effect(effect);
        }
        let started = builder
            .gamepads(&[id])
            .repeat(repeat)
            .finish(&mut self.gilrs)
            .and_then(|effect| effect.play().map(|_| effect));

        match started {
            Ok(effect) => {
                self.effects.insert((index, channel), effect);
            }
            Err(e) => warn!("Force feedback on gamepad {} failed: {}", id, e),
        }
    }
}

impl NativeGateway for GilrsGateway {
    fn init(&mut self) -> bool {
        let connected: Vec<(GamepadId, String)> = self
            .gilrs
            .gamepads()
            .map(|(id, gamepad)| (id, gamepad.name().to_string()))
            .collect();

        if connected.is_empty() {
            warn!("No gamepad connected, continuing in idle mode");
        } else {
            info!("Found {} gamepads:", connected.len());
        }
        for (id, name) in connected {
            info!("  ID: {}, Name: {}", id, name);
            self.assign_slot(id);
        }
        true
    }

    fn shutdown(&mut self) {
        info!("Releasing {} running effects", self.effects.len());
        self.effects.clear();
        self.slots = Default::default();
    }

    fn run_frame(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => self.assign_slot(id),
                EventType::Disconnected => self.release_slot(id),
                _ => {}
            }
        }
    }

    fn max_controllers(&mut self) -> i32 {
        MAX_CONTROLLERS as i32
    }

    fn max_analog_actions(&mut self) -> i32 {
        CapabilityKind::MaxAnalogActions.documented() as i32
    }

    fn max_digital_actions(&mut self) -> i32 {
        CapabilityKind::MaxDigitalActions.documented() as i32
    }

    fn max_origins(&mut self) -> i32 {
        CapabilityKind::MaxOrigins.documented() as i32
    }

    fn min_analog_value(&mut self) -> f32 {
        CapabilityKind::MinAnalogValue.documented() as f32
    }

    fn max_analog_value(&mut self) -> f32 {
        CapabilityKind::MaxAnalogValue.documented() as f32
    }

    fn connected_controllers(&mut self) -> String {
        join(
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some())
                .map(|(index, _)| index as i32),
        )
    }

    fn activate_action_set(&mut self, controller: i32, action_set: i32) -> bool {
        if self.manifest.action_set(action_set).is_none() {
            return false;
        }
        match self.slot_mut(controller) {
            Some(slot) => {
                slot.action_set = action_set;
                true
            }
            None => false,
        }
    }

    fn current_action_set(&mut self, controller: i32) -> i32 {
        self.slot(controller).map_or(0, |slot| slot.action_set)
    }

    fn activate_action_set_layer(&mut self, controller: i32, layer: i32) -> bool {
        if self.manifest.action_set(layer).is_none() {
            return false;
        }
        match self.slot_mut(controller) {
            Some(slot) => {
                if !slot.layers.contains(&layer) {
                    slot.layers.push(layer);
                }
                true
            }
            None => false,
        }
    }

    fn deactivate_action_set_layer(&mut self, controller: i32, layer: i32) -> bool {
        match self.slot_mut(controller) {
            Some(slot) => {
                slot.layers.retain(|l| *l != layer);
                true
            }
            None => false,
        }
    }

    fn deactivate_all_action_set_layers(&mut self, controller: i32) -> bool {
        match self.slot_mut(controller) {
            Some(slot) => {
                slot.layers.clear();
                true
            }
            None => false,
        }
    }

    fn active_action_set_layers(&mut self, controller: i32) -> String {
        match self.slot(controller) {
            Some(slot) => join(slot.layers.iter().copied()),
            None => String::new(),
        }
    }

    fn action_set_handle(&mut self, name: &str) -> i32 {
        self.manifest.action_set_handle(name)
    }

    fn digital_action_handle(&mut self, name: &str) -> i32 {
        self.manifest.digital_action_handle(name)
    }

    fn analog_action_handle(&mut self, name: &str) -> i32 {
        self.manifest.analog_action_handle(name)
    }

    fn input_type_for_handle(&mut self, controller: i32) -> i32 {
        self.family(controller).raw()
    }

    fn controller_for_gamepad_index(&mut self, index: i32) -> i32 {
        if self.slot(index).is_some() {
            index
        } else {
            -1
        }
    }

    fn gamepad_index_for_controller(&mut self, controller: i32) -> i32 {
        if self.slot(controller).is_some() {
            controller
        } else {
            -1
        }
    }

    fn show_binding_panel(&mut self, _controller: i32) -> bool {
        debug!("No binding panel without the Steam overlay");
        false
    }

    fn digital_action_data(&mut self, controller: i32, action: i32) -> i32 {
        let Some(button) = self
            .active_sets(controller)
            .into_iter()
            .find_map(|set| self.manifest.digital_binding(set, action))
        else {
            return 0;
        };
        let pressed = self
            .gamepad(controller)
            .is_some_and(|gamepad| is_pressed(&gamepad, button));
        0x10 | i32::from(pressed)
    }

    fn digital_action_origins(&mut self, controller: i32, action_set: i32, action: i32) -> String {
        let family = self.family(controller);
        let origin = self
            .manifest
            .digital_binding(action_set, action)
            .and_then(|button| FamilyOrigins::of(family).button(button));
        encode_origins(origin)
    }

    fn analog_action_origins(&mut self, controller: i32, action_set: i32, action: i32) -> String {
        let family = self.family(controller);
        let origin = self
            .manifest
            .analog_binding(action_set, action)
            .map(|source| FamilyOrigins::of(family).analog(source));
        encode_origins(origin)
    }

    fn fetch_analog_action_data(&mut self, controller: i32, action: i32) {
        self.analog = AnalogSnapshot::default();
        let Some(source) = self
            .active_sets(controller)
            .into_iter()
            .find_map(|set| self.manifest.analog_binding(set, action))
        else {
            return;
        };
        let Some(gamepad) = self.gamepad(controller) else {
            return;
        };

        let snapshot = match source {
            AnalogSource::LeftStick => AnalogSnapshot {
                active: true,
                mode: InputSourceMode::JoystickMove,
                x: gamepad.value(Axis::LeftStickX),
                y: gamepad.value(Axis::LeftStickY),
            },
            AnalogSource::RightStick => AnalogSnapshot {
                active: true,
                mode: InputSourceMode::JoystickMove,
                x: gamepad.value(Axis::RightStickX),
                y: gamepad.value(Axis::RightStickY),
            },
            AnalogSource::LeftTrigger => AnalogSnapshot {
                active: true,
                mode: InputSourceMode::Trigger,
                x: trigger_value(&gamepad, Button::LeftTrigger2),
                y: 0.0,
            },
            AnalogSource::RightTrigger => AnalogSnapshot {
                active: true,
                mode: InputSourceMode::Trigger,
                x: trigger_value(&gamepad, Button::RightTrigger2),
                y: 0.0,
            },
        };
        self.analog = snapshot;
    }

    fn analog_data_active(&mut self) -> bool {
        self.analog.active
    }

    fn analog_data_mode(&mut self) -> i32 {
        self.analog.mode.raw()
    }

    fn analog_data_x(&mut self) -> f32 {
        self.analog.x
    }

    fn analog_data_y(&mut self) -> f32 {
        self.analog.y
    }

    fn stop_analog_action_momentum(&mut self, _controller: i32, _action: i32) {
        // Sticks and triggers carry no momentum
    }

    fn fetch_motion_data(&mut self, controller: i32) {
        debug!("Controller {} has no motion sensor", controller);
    }

    fn motion_data_field(&mut self, _field: MotionField) -> f32 {
        0.0
    }

    fn glyph_for_action_origin(&mut self, _origin: i32) -> String {
        String::new()
    }

    fn string_for_action_origin(&mut self, origin: i32) -> String {
        ActionOrigin::from_raw(origin).display_name().to_string()
    }

    fn trigger_haptic_pulse(&mut self, controller: i32, pad: i32, duration_us: u16) {
        let effect = BaseEffect {
            kind: pad_motor(pad, u16::MAX),
            scheduling: Replay {
                play_for: ticks_from_us(u32::from(duration_us)),
                ..Default::default()
            },
            ..Default::default()
        };
        let total = ticks_from_us(u32::from(duration_us));
        self.play(controller, EffectChannel::Pad(pad), vec![effect], Repeat::For(total));
    }

    fn trigger_repeated_haptic_pulse(
        &mut self,
        controller: i32,
        pad: i32,
        on_us: u16,
        off_us: u16,
        repeat: u16,
        _flags: u32,
    ) {
        let Some(total) = repeated_span(on_us, off_us, repeat) else {
            trace!("Zero repeat pulse on controller {} ignored", controller);
            return;
        };
        let effect = BaseEffect {
            kind: pad_motor(pad, u16::MAX),
            scheduling: Replay {
                play_for: ticks_from_us(u32::from(on_us)),
                with_delay: ticks_from_us(u32::from(off_us)),
                ..Default::default()
            },
            ..Default::default()
        };
        self.play(controller, EffectChannel::Pad(pad), vec![effect], Repeat::For(total));
    }

    fn trigger_vibration(&mut self, controller: i32, left_speed: u16, right_speed: u16) {
        if left_speed == 0 && right_speed == 0 {
            if let Ok(index) = usize::try_from(controller) {
                self.effects.remove(&(index, EffectChannel::Vibration));
            }
            return;
        }

        let effects = vec![
            BaseEffect {
                kind: BaseEffectType::Strong {
                    magnitude: left_speed,
                },
                ..Default::default()
            },
            BaseEffect {
                kind: BaseEffectType::Weak {
                    magnitude: right_speed,
                },
                ..Default::default()
            },
        ];
        self.play(controller, EffectChannel::Vibration, effects, Repeat::Infinitely);
    }

    fn set_led_color(&mut self, controller: i32, red: u8, green: u8, blue: u8, _flags: u32) {
        debug!(
            "LED color ({}, {}, {}) for controller {} not supported by gilrs",
            red, green, blue, controller
        );
    }
}

// Left pad drives the heavy motor, right pad the light one
fn pad_motor(pad: i32, magnitude: u16) -> BaseEffectType {
    match pad {
        PAD_RIGHT => BaseEffectType::Weak { magnitude },
        _ => BaseEffectType::Strong { magnitude },
    }
}

// Ticks are 50 ms; anything non-zero plays for at least one
fn ticks_from_us(duration_us: u32) -> Ticks {
    Ticks::from_ms(duration_us.div_ceil(1000).max(1))
}

// Whole span of a repeated pulse, none when nothing should play
fn repeated_span(on_us: u16, off_us: u16, repeat: u16) -> Option<Ticks> {
    if repeat == 0 {
        return None;
    }
    let period_us = u32::from(on_us) + u32::from(off_us);
    Some(ticks_from_us(period_us.saturating_mul(u32::from(repeat))))
}

fn join(values: impl Iterator<Item = i32>) -> String {
    values
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn encode_origins(origin: Option<Origin>) -> String {
    match origin {
        Some(origin) => format!("1{}{}", DELIMITER, origin as i32),
        None => "0".to_string(),
    }
}

fn trigger_value(gamepad: &Gamepad<'_>, button: Button) -> f32 {
    gamepad.button_data(button).map_or(0.0, |data| data.value())
}

fn is_pressed(gamepad: &Gamepad<'_>, button: ButtonType) -> bool {
    match map_button(button) {
        Some(button) => gamepad.is_pressed(button),
        None => false,
    }
}

// Helper function to map our ButtonType to the gilrs Button
fn map_button(button: ButtonType) -> Option<Button> {
    match button {
        ButtonType::A => Some(Button::South),
        ButtonType::B => Some(Button::East),
        ButtonType::X => Some(Button::West),
        ButtonType::Y => Some(Button::North),
        ButtonType::Start => Some(Button::Start),
        ButtonType::Select => Some(Button::Select),
        ButtonType::LeftBumper => Some(Button::LeftTrigger),
        ButtonType::RightBumper => Some(Button::RightTrigger),
        ButtonType::LeftTrigger => Some(Button::LeftTrigger2),
        ButtonType::RightTrigger => Some(Button::RightTrigger2),
        ButtonType::LeftStick => Some(Button::LeftThumb),
        ButtonType::RightStick => Some(Button::RightThumb),
        ButtonType::DPadUp => Some(Button::DPadUp),
        ButtonType::DPadDown => Some(Button::DPadDown),
        ButtonType::DPadLeft => Some(Button::DPadLeft),
        ButtonType::DPadRight => Some(Button::DPadRight),
        ButtonType::Guide => Some(Button::Mode),
    }
}

/// Guesses the controller family from the name gilrs reports
pub fn input_type_from_name(name: &str) -> InputType {
    let name = name.to_ascii_lowercase();
    let has = |needle: &str| name.contains(needle);

    if has("steam deck") {
        InputType::SteamDeckController
    } else if has("steam controller") {
        InputType::SteamController
    } else if has("xbox 360") || has("x-box 360") {
        InputType::XBox360Controller
    } else if has("xbox") {
        InputType::XBoxOneController
    } else if has("dualsense") || has("ps5") {
        InputType::PS5Controller
    } else if has("dualshock 4") || has("ps4") || has("sony interactive") {
        InputType::PS4Controller
    } else if has("ps3") || has("playstation(r)3") {
        InputType::PS3Controller
    } else if has("joy-con") && (has("(l/r)") || has("pair")) {
        InputType::SwitchJoyConPair
    } else if has("joy-con") {
        InputType::SwitchJoyConSingle
    } else if has("pro controller") || has("switch") {
        InputType::SwitchProController
    } else {
        InputType::GenericGamepad
    }
}

// Origins a family reports for each logical control
struct FamilyOrigins {
    a: Origin,
    b: Origin,
    x: Origin,
    y: Origin,
    start: Origin,
    select: Origin,
    left_bumper: Origin,
    right_bumper: Origin,
    left_trigger_click: Origin,
    right_trigger_click: Origin,
    left_trigger_pull: Origin,
    right_trigger_pull: Origin,
    left_stick_click: Origin,
    right_stick_click: Origin,
    left_stick_move: Origin,
    right_stick_move: Origin,
    dpad_north: Origin,
    dpad_south: Origin,
    dpad_west: Origin,
    dpad_east: Origin,
}

const XBOX_ONE: FamilyOrigins = FamilyOrigins {
    a: Origin::XBoxOne_A,
    b: Origin::XBoxOne_B,
    x: Origin::XBoxOne_X,
    y: Origin::XBoxOne_Y,
    start: Origin::XBoxOne_Menu,
    select: Origin::XBoxOne_View,
    left_bumper: Origin::XBoxOne_LeftBumper,
    right_bumper: Origin::XBoxOne_RightBumper,
    left_trigger_click: Origin::XBoxOne_LeftTrigger_Click,
    right_trigger_click: Origin::XBoxOne_RightTrigger_Click,
    left_trigger_pull: Origin::XBoxOne_LeftTrigger_Pull,
    right_trigger_pull: Origin::XBoxOne_RightTrigger_Pull,
    left_stick_click: Origin::XBoxOne_LeftStick_Click,
    right_stick_click: Origin::XBoxOne_RightStick_Click,
    left_stick_move: Origin::XBoxOne_LeftStick_Move,
    right_stick_move: Origin::XBoxOne_RightStick_Move,
    dpad_north: Origin::XBoxOne_DPad_North,
    dpad_south: Origin::XBoxOne_DPad_South,
    dpad_west: Origin::XBoxOne_DPad_West,
    dpad_east: Origin::XBoxOne_DPad_East,
};

const XBOX_360: FamilyOrigins = FamilyOrigins {
    a: Origin::XBox360_A,
    b: Origin::XBox360_B,
    x: Origin::XBox360_X,
    y: Origin::XBox360_Y,
    start: Origin::XBox360_Start,
    select: Origin::XBox360_Back,
    left_bumper: Origin::XBox360_LeftBumper,
    right_bumper: Origin::XBox360_RightBumper,
    left_trigger_click: Origin::XBox360_LeftTrigger_Click,
    right_trigger_click: Origin::XBox360_RightTrigger_Click,
    left_trigger_pull: Origin::XBox360_LeftTrigger_Pull,
    right_trigger_pull: Origin::XBox360_RightTrigger_Pull,
    left_stick_click: Origin::XBox360_LeftStick_Click,
    right_stick_click: Origin::XBox360_RightStick_Click,
    left_stick_move: Origin::XBox360_LeftStick_Move,
    right_stick_move: Origin::XBox360_RightStick_Move,
    dpad_north: Origin::XBox360_DPad_North,
    dpad_south: Origin::XBox360_DPad_South,
    dpad_west: Origin::XBox360_DPad_West,
    dpad_east: Origin::XBox360_DPad_East,
};

const PS4: FamilyOrigins = FamilyOrigins {
    a: Origin::PS4_X,
    b: Origin::PS4_Circle,
    x: Origin::PS4_Square,
    y: Origin::PS4_Triangle,
    start: Origin::PS4_Options,
    select: Origin::PS4_Share,
    left_bumper: Origin::PS4_LeftBumper,
    right_bumper: Origin::PS4_RightBumper,
    left_trigger_click: Origin::PS4_LeftTrigger_Click,
    right_trigger_click: Origin::PS4_RightTrigger_Click,
    left_trigger_pull: Origin::PS4_LeftTrigger_Pull,
    right_trigger_pull: Origin::PS4_RightTrigger_Pull,
    left_stick_click: Origin::PS4_LeftStick_Click,
    right_stick_click: Origin::PS4_RightStick_Click,
    left_stick_move: Origin::PS4_LeftStick_Move,
    right_stick_move: Origin::PS4_RightStick_Move,
    dpad_north: Origin::PS4_DPad_North,
    dpad_south: Origin::PS4_DPad_South,
    dpad_west: Origin::PS4_DPad_West,
    dpad_east: Origin::PS4_DPad_East,
};

const PS5: FamilyOrigins = FamilyOrigins {
    a: Origin::PS5_X,
    b: Origin::PS5_Circle,
    x: Origin::PS5_Square,
    y: Origin::PS5_Triangle,
    start: Origin::PS5_Option,
    select: Origin::PS5_Create,
    left_bumper: Origin::PS5_LeftBumper,
    right_bumper: Origin::PS5_RightBumper,
    left_trigger_click: Origin::PS5_LeftTrigger_Click,
    right_trigger_click: Origin::PS5_RightTrigger_Click,
    left_trigger_pull: Origin::PS5_LeftTrigger_Pull,
    right_trigger_pull: Origin::PS5_RightTrigger_Pull,
    left_stick_click: Origin::PS5_LeftStick_Click,
    right_stick_click: Origin::PS5_RightStick_Click,
    left_stick_move: Origin::PS5_LeftStick_Move,
    right_stick_move: Origin::PS5_RightStick_Move,
    dpad_north: Origin::PS5_DPad_North,
    dpad_south: Origin::PS5_DPad_South,
    dpad_west: Origin::PS5_DPad_West,
    dpad_east: Origin::PS5_DPad_East,
};

// Labels follow the position gilrs reports, not the printed letter
const SWITCH: FamilyOrigins = FamilyOrigins {
    a: Origin::Switch_B,
    b: Origin::Switch_A,
    x: Origin::Switch_Y,
    y: Origin::Switch_X,
    start: Origin::Switch_Plus,
    select: Origin::Switch_Minus,
    left_bumper: Origin::Switch_LeftBumper,
    right_bumper: Origin::Switch_RightBumper,
    left_trigger_click: Origin::Switch_LeftTrigger_Click,
    right_trigger_click: Origin::Switch_RightTrigger_Click,
    left_trigger_pull: Origin::Switch_LeftTrigger_Pull,
    right_trigger_pull: Origin::Switch_RightTrigger_Pull,
    left_stick_click: Origin::Switch_LeftStick_Click,
    right_stick_click: Origin::Switch_RightStick_Click,
    left_stick_move: Origin::Switch_LeftStick_Move,
    right_stick_move: Origin::Switch_RightStick_Move,
    dpad_north: Origin::Switch_DPad_North,
    dpad_south: Origin::Switch_DPad_South,
    dpad_west: Origin::Switch_DPad_West,
    dpad_east: Origin::Switch_DPad_East,
};

impl FamilyOrigins {
    fn of(family: InputType) -> &'static FamilyOrigins {
        match family {
            InputType::XBox360Controller => &XBOX_360,
            InputType::PS4Controller | InputType::PS3Controller => &PS4,
            InputType::PS5Controller => &PS5,
            InputType::SwitchProController
            | InputType::SwitchJoyConPair
            | InputType::SwitchJoyConSingle => &SWITCH,
            _ => &XBOX_ONE,
        }
    }

    // No family has an origin for the guide button
    fn button(&self, button: ButtonType) -> Option<Origin> {
        let origin = match button {
            ButtonType::A => self.a,
            ButtonType::B => self.b,
            ButtonType::X => self.x,
            ButtonType::Y => self.y,
            ButtonType::Start => self.start,
            ButtonType::Select => self.select,
            ButtonType::LeftBumper => self.left_bumper,
            ButtonType::RightBumper => self.right_bumper,
            ButtonType::LeftTrigger => self.left_trigger_click,
            ButtonType::RightTrigger => self.right_trigger_click,
            ButtonType::LeftStick => self.left_stick_click,
            ButtonType::RightStick => self.right_stick_click,
            ButtonType::DPadUp => self.dpad_north,
            ButtonType::DPadDown => self.dpad_south,
            ButtonType::DPadLeft => self.dpad_west,
            ButtonType::DPadRight => self.dpad_east,
            ButtonType::Guide => return None,
        };
        Some(origin)
    }

    fn analog(&self, source: AnalogSource) -> Origin {
        match source {
            AnalogSource::LeftStick => self.left_stick_move,
            AnalogSource::RightStick => self.right_stick_move,
            AnalogSource::LeftTrigger => self.left_trigger_pull,
            AnalogSource::RightTrigger => self.right_trigger_pull,
        }
    }
}
