//! Facade bring-up
//!
//! Two steps, each able to fail: load the gateway, then ask it to bring the
//! input subsystem up. The typestate keeps `start` unreachable until a gateway
//! has been loaded.
//!
//! ```text
//! Bootstrap<Loading> ──load()──► Bootstrap<Ready> ──start()──► SteamInput
//! ```

use super::{BridgeError, ErrorReporter, SteamInput};
use crate::gateway::{GatewayError, NativeGateway};
use statum::{machine, state};
use tracing::{debug, info, warn};

#[state]
#[derive(Debug, Clone)]
pub enum BootState {
    Loading,
    Ready,
}

#[machine]
#[derive(Debug)]
pub struct Bootstrap<S: BootState> {
    // Receives the failure message if bring-up fails
    reporter: ErrorReporter,

    // Loaded gateway, present from `Ready` on
    gateway: Option<Box<dyn NativeGateway>>,
}

impl Bootstrap<Loading> {
    pub fn create(reporter: ErrorReporter) -> Self {
        debug!("Creating facade bootstrap");
        Self::new(reporter, None)
    }

    /// Runs the loader and transitions to `Ready`
    pub fn load<L>(mut self, loader: L) -> Result<Bootstrap<Ready>, BridgeError>
    where
        L: FnOnce() -> Result<Box<dyn NativeGateway>, GatewayError>,
    {
        info!("Loading native input gateway");
        let gateway = match loader() {
            Ok(gateway) => gateway,
            Err(e) => {
                warn!("Native gateway failed to load: {}", e);
                return Err(e.into());
            }
        };
        debug!("Loaded gateway: {:?}", gateway);

        self.gateway = Some(gateway);
        Ok(self.transition())
    }
}

impl Bootstrap<Ready> {
    /// Initializes the input subsystem and hands out the active facade
    pub fn start(mut self) -> Result<SteamInput, BridgeError> {
        let mut gateway = self.gateway.take().ok_or(BridgeError::MissingGateway)?;

        info!("Initializing native input subsystem");
        if !gateway.init() {
            warn!("Native input subsystem refused to initialize");
            return Err(BridgeError::InitializationFailed);
        }

        Ok(SteamInput::with_gateway(gateway, self.reporter.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::recording::{GatewayScript, RecordingGateway};

    #[test]
    fn load_then_start_yields_active_facade() {
        let (gateway, log) = RecordingGateway::new(GatewayScript::default());
        let input = Bootstrap::create(ErrorReporter::none())
            .load(move || Ok(Box::new(gateway) as Box<dyn NativeGateway>))
            .and_then(|ready| ready.start())
            .unwrap();

        assert!(input.is_active());
        assert_eq!(log.count("init"), 1);
    }

    #[test]
    fn loader_error_surfaces_as_gateway_error() {
        let result = Bootstrap::create(ErrorReporter::none())
            .load(|| Err(GatewayError::LoadError("missing library".to_string())));

        assert!(matches!(result, Err(BridgeError::Gateway(_))));
    }

    #[test]
    fn refused_init_is_an_error() {
        let (gateway, _log) = RecordingGateway::new(GatewayScript {
            init_succeeds: false,
            ..Default::default()
        });
        let result = Bootstrap::create(ErrorReporter::none())
            .load(move || Ok(Box::new(gateway) as Box<dyn NativeGateway>))
            .and_then(|ready| ready.start());

        assert!(matches!(result, Err(BridgeError::InitializationFailed)));
    }
}
