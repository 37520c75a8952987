//! Memoized SDK limits
//!
//! The limits are SDK constants, not device state. Each one is fetched from
//! the gateway the first time it is asked for and never again; there is no
//! invalidation. The cache is built once with the facade and owned by it.

use crate::gateway::NativeGateway;
use std::cell::OnceCell;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    MaxControllers,
    MaxAnalogActions,
    MaxDigitalActions,
    MaxOrigins,
    MinAnalogValue,
    MaxAnalogValue,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 6] = [
        CapabilityKind::MaxControllers,
        CapabilityKind::MaxAnalogActions,
        CapabilityKind::MaxDigitalActions,
        CapabilityKind::MaxOrigins,
        CapabilityKind::MinAnalogValue,
        CapabilityKind::MaxAnalogValue,
    ];

    /// Value the SDK documents for this limit
    pub const fn documented(self) -> f64 {
        match self {
            CapabilityKind::MaxControllers => 16.0,
            CapabilityKind::MaxAnalogActions => 24.0,
            CapabilityKind::MaxDigitalActions => 256.0,
            CapabilityKind::MaxOrigins => 8.0,
            CapabilityKind::MinAnalogValue => -1.0,
            CapabilityKind::MaxAnalogValue => 1.0,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn fetch(self, gateway: &mut dyn NativeGateway) -> f64 {
        match self {
            CapabilityKind::MaxControllers => f64::from(gateway.max_controllers()),
            CapabilityKind::MaxAnalogActions => f64::from(gateway.max_analog_actions()),
            CapabilityKind::MaxDigitalActions => f64::from(gateway.max_digital_actions()),
            CapabilityKind::MaxOrigins => f64::from(gateway.max_origins()),
            CapabilityKind::MinAnalogValue => f64::from(gateway.min_analog_value()),
            CapabilityKind::MaxAnalogValue => f64::from(gateway.max_analog_value()),
        }
    }
}

/// Lazily populated limits, one cell per [`CapabilityKind`]
#[derive(Debug, Default)]
pub struct CapabilityCache {
    values: [OnceCell<f64>; 6],
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the limit, querying the gateway only on the first call
    ///
    /// Without a gateway the documented value is returned and nothing is
    /// memoized.
    pub fn get(
        &self,
        kind: CapabilityKind,
        gateway: Option<&mut (dyn NativeGateway + 'static)>,
    ) -> f64 {
        let cell = &self.values[kind.index()];
        if let Some(value) = cell.get() {
            return *value;
        }

        match gateway {
            Some(gateway) => *cell.get_or_init(|| {
                let value = kind.fetch(gateway);
                debug!("Cached capability {:?} = {}", kind, value);
                value
            }),
            None => kind.documented(),
        }
    }

    /// Whether `kind` has already been fetched
    pub fn is_cached(&self, kind: CapabilityKind) -> bool {
        self.values[kind.index()].get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::recording::{GatewayScript, RecordingGateway};

    #[test]
    fn each_limit_is_fetched_once() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        let cache = CapabilityCache::new();

        for _ in 0..3 {
            assert_eq!(cache.get(CapabilityKind::MaxControllers, Some(&mut gateway)), 16.0);
            assert_eq!(cache.get(CapabilityKind::MinAnalogValue, Some(&mut gateway)), -1.0);
        }

        assert_eq!(log.count("max_controllers"), 1);
        assert_eq!(log.count("min_analog_value"), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn cached_value_survives_without_gateway() {
        let (mut gateway, log) = RecordingGateway::new(GatewayScript::default());
        let cache = CapabilityCache::new();
        cache.get(CapabilityKind::MaxOrigins, Some(&mut gateway));

        assert_eq!(cache.get(CapabilityKind::MaxOrigins, None), 8.0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn missing_gateway_yields_documented_values_uncached() {
        let cache = CapabilityCache::new();
        for kind in CapabilityKind::ALL {
            assert_eq!(cache.get(kind, None), kind.documented());
            assert!(!cache.is_cached(kind));
        }
    }
}
