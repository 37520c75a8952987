//! Haptic pulse scheduling
//!
//! The hardware only understands timed on/off pulses for one pad at a time,
//! each at most [`MAX_SINGLE_PULSE_TIME`] microseconds long. A rumble request
//! is turned into pulses in two steps:
//!
//! ```text
//! rumble(duration_ms, strength)
//!   └─► plan_rumble  ─► RumblePlan { on_us, off_us, repeat }   (pure)
//!         └─► PulseSpec per physical pad ─► gateway pulse call
//! ```
//!
//! Strength is approximated by the on/off ratio of each pulse.

use crate::gateway::{NativeGateway, PAD_LEFT, PAD_RIGHT};
use crate::handle::ControllerHandle;
use tracing::debug;

/// Longest single pulse the hardware protocol accepts, in microseconds
pub const MAX_SINGLE_PULSE_TIME: u32 = 65535;

/// Pad targeted by a haptic request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteamControllerPad {
    Left,
    Right,
    /// Fanned out to `Left` then `Right`
    Both,
}

impl SteamControllerPad {
    /// Physical pads in dispatch order
    fn physical(self) -> &'static [i32] {
        match self {
            SteamControllerPad::Left => &[PAD_LEFT],
            SteamControllerPad::Right => &[PAD_RIGHT],
            SteamControllerPad::Both => &[PAD_LEFT, PAD_RIGHT],
        }
    }
}

/// Pulse timing computed for one rumble request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RumblePlan {
    pub on_us: u16,
    pub off_us: u16,
    pub repeat: u16,
}

/// One low-level pulse command for a single pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PulseSpec {
    pub pad: i32,
    pub on_us: u16,
    pub off_us: u16,
    /// `None` sends a one-shot pulse with an implicit off phase
    pub repeat: Option<u16>,
    pub flags: u32,
}

fn clamp_pulse(duration_us: u32) -> u16 {
    duration_us.min(MAX_SINGLE_PULSE_TIME) as u16
}

/// Splits a rumble into pulse timing; `None` when there is nothing to play
///
/// Durations longer than one pulse become `repeat` full-length pulses. The off
/// phase is never zero.
pub fn plan_rumble(duration_ms: u32, strength: f64) -> Option<RumblePlan> {
    if strength.is_nan() || strength <= 0.0 {
        return None;
    }
    let strength = strength.min(1.0);

    let mut duration_us = u64::from(duration_ms) * 1000;
    let mut repeat = 1u64;
    let limit = u64::from(MAX_SINGLE_PULSE_TIME);
    if duration_us > limit {
        repeat = duration_us.div_ceil(limit);
        duration_us = limit;
    }

    let duration = duration_us as f64;
    let on_us = (duration * strength).floor() as u32;
    let mut off_us = (duration * (1.0 - strength)).floor() as u32;
    if off_us == 0 {
        off_us = 1;
    }

    Some(RumblePlan {
        on_us: clamp_pulse(on_us),
        off_us: clamp_pulse(off_us),
        repeat: repeat.min(u64::from(u16::MAX)) as u16,
    })
}

fn dispatch(gateway: &mut dyn NativeGateway, controller: ControllerHandle, spec: PulseSpec) {
    match spec.repeat {
        None => gateway.trigger_haptic_pulse(controller.raw(), spec.pad, spec.on_us),
        Some(repeat) => gateway.trigger_repeated_haptic_pulse(
            controller.raw(),
            spec.pad,
            spec.on_us,
            spec.off_us,
            repeat,
            spec.flags,
        ),
    }
}

/// Single pulse; `Both` becomes two sequential single-pad pulses
pub(crate) fn pulse(
    gateway: &mut dyn NativeGateway,
    controller: ControllerHandle,
    pad: SteamControllerPad,
    duration_us: u32,
) {
    let on_us = clamp_pulse(duration_us);
    for &pad in pad.physical() {
        dispatch(
            gateway,
            controller,
            PulseSpec {
                pad,
                on_us,
                off_us: 0,
                repeat: None,
                flags: 0,
            },
        );
    }
}

/// Repeated pulse; only the on-time is clamped
pub(crate) fn repeated_pulse(
    gateway: &mut dyn NativeGateway,
    controller: ControllerHandle,
    pad: SteamControllerPad,
    on_us: u32,
    off_us: u16,
    repeat: u16,
    flags: u32,
) {
    let on_us = clamp_pulse(on_us);
    for &pad in pad.physical() {
        dispatch(
            gateway,
            controller,
            PulseSpec {
                pad,
                on_us,
                off_us,
                repeat: Some(repeat),
                flags,
            },
        );
    }
}

/// Plays a rumble of `duration_ms` at `strength` (0..=1)
pub(crate) fn rumble(
    gateway: &mut dyn NativeGateway,
    controller: ControllerHandle,
    pad: SteamControllerPad,
    duration_ms: u32,
    strength: f64,
) {
    let Some(plan) = plan_rumble(duration_ms, strength) else {
        debug!("Ignoring rumble with strength {}", strength);
        return;
    };
    debug!("Rumble on {} {:?}: {:?}", controller, pad, plan);

    if plan.repeat > 1 {
        repeated_pulse(
            gateway,
            controller,
            pad,
            u32::from(plan.on_us),
            plan.off_us,
            plan.repeat,
            0,
        );
    } else {
        pulse(gateway, controller, pad, u32::from(plan.on_us));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::recording::{GatewayScript, NativeCall, RecordingGateway};

    const LIMIT: u16 = MAX_SINGLE_PULSE_TIME as u16;

    fn controller() -> ControllerHandle {
        ControllerHandle::from_raw(0)
    }

    #[test]
    fn long_rumble_is_split_into_full_pulses() {
        let plan = plan_rumble(70, 1.0).unwrap();
        assert_eq!(plan.repeat, 2);
        assert_eq!(plan.on_us, LIMIT);
        assert_eq!(plan.off_us, 1);

        let plan = plan_rumble(1000, 0.5).unwrap();
        assert_eq!(plan.repeat, 16);
        assert_eq!(plan.on_us, 32767);
        assert_eq!(plan.off_us, 32767);
    }

    #[test]
    fn short_rumble_is_one_pulse() {
        let plan = plan_rumble(10, 0.25).unwrap();
        assert_eq!(
            plan,
            RumblePlan {
                on_us: 2500,
                off_us: 7500,
                repeat: 1
            }
        );
    }

    #[test]
    fn timing_is_floored_in_double_precision() {
        let plan = plan_rumble(10, 0.7).unwrap();
        assert_eq!(plan.on_us, 7000);
        assert_eq!(plan.off_us, 3000);
        assert_eq!(plan.repeat, 1);
    }

    #[test]
    fn off_time_is_never_zero() {
        for strength in [0.01, 0.3, 0.5, 0.99, 1.0, 4.0] {
            for duration_ms in [0, 1, 10, 65, 66, 70, 500, 100_000] {
                let plan = plan_rumble(duration_ms, strength).unwrap();
                assert_ne!(plan.off_us, 0);
                assert!(u32::from(plan.on_us) <= MAX_SINGLE_PULSE_TIME);
                assert!(u32::from(plan.off_us) <= MAX_SINGLE_PULSE_TIME);
            }
        }
    }

    #[test]
    fn non_positive_strength_plans_nothing() {
        assert_eq!(plan_rumble(100, 0.0), None);
        assert_eq!(plan_rumble(100, -0.5), None);
        assert_eq!(plan_rumble(100, f64::NAN), None);
    }

    #[test]
    fn zero_strength_rumble_dispatches_nothing() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        rumble(&mut gateway, controller(), SteamControllerPad::Left, 100, 0.0);
        assert!(log.is_empty());
    }

    #[test]
    fn both_pads_fan_out_left_then_right() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        rumble(&mut gateway, controller(), SteamControllerPad::Both, 10, 0.5);

        assert_eq!(
            log.haptics(),
            vec![
                NativeCall::HapticPulse {
                    controller: 0,
                    pad: PAD_LEFT,
                    duration_us: 5000
                },
                NativeCall::HapticPulse {
                    controller: 0,
                    pad: PAD_RIGHT,
                    duration_us: 5000
                },
            ]
        );
    }

    #[test]
    fn long_rumble_uses_repeated_primitive() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        rumble(&mut gateway, controller(), SteamControllerPad::Right, 70, 1.0);

        assert_eq!(
            log.haptics(),
            vec![NativeCall::RepeatedHapticPulse {
                controller: 0,
                pad: PAD_RIGHT,
                on_us: LIMIT,
                off_us: 1,
                repeat: 2,
                flags: 0,
            }]
        );
    }

    #[test]
    fn pulse_duration_is_clamped() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        pulse(&mut gateway, controller(), SteamControllerPad::Left, 1_000_000);
        repeated_pulse(
            &mut gateway,
            controller(),
            SteamControllerPad::Both,
            90_000,
            400,
            3,
            7,
        );

        let calls = log.haptics();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            NativeCall::HapticPulse {
                controller: 0,
                pad: PAD_LEFT,
                duration_us: LIMIT
            }
        );
        for (call, pad) in calls[1..].iter().zip([PAD_LEFT, PAD_RIGHT]) {
            assert_eq!(
                *call,
                NativeCall::RepeatedHapticPulse {
                    controller: 0,
                    pad,
                    on_us: LIMIT,
                    off_us: 400,
                    repeat: 3,
                    flags: 7,
                }
            );
        }
    }
}
