//! Safe facade over a Steam Input style controller SDK
//!
//! Application code talks to [`SteamInput`]; everything native sits behind the
//! [`gateway::NativeGateway`] trait. The facade translates between the native
//! conventions and typed values:
//!
//! ```text
//! Application ──► SteamInput ──► NativeGateway
//!                 │  ▲               │
//!                 │  └── codec ◄─────┘ (comma lists, bit-packed state)
//!                 ├── capability (memoized limits)
//!                 └── haptics   (rumble → pulses)
//! ```
//!
//! Every operation degrades to an inert default when the facade is inactive,
//! so per-frame polling loops never need error branches.

pub mod action_data;
pub mod bridge;
pub mod capability;
pub mod codec;
pub mod config;
pub mod gateway;
pub mod handle;
pub mod haptics;
pub mod origin;

pub use action_data::{
    AnalogActionState, DigitalActionState, InputSourceMode, InputType, MotionState,
};
pub use bridge::{BridgeError, ErrorReporter, SteamInput};
pub use capability::{CapabilityCache, CapabilityKind};
pub use gateway::{GatewayError, NativeGateway};
pub use handle::{AnalogActionHandle, ActionSetHandle, ControllerHandle, DigitalActionHandle};
pub use haptics::{SteamControllerPad, MAX_SINGLE_PULSE_TIME};
pub use origin::{ActionOrigin, Origin};
