use color_eyre::{eyre::eyre, Result};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use steam_input_bridge::config::{ActionSetConfig, BridgeConfig};
use steam_input_bridge::gateway::gilrs_gateway::GilrsGateway;
use steam_input_bridge::{
    ActionSetHandle, AnalogActionHandle, AnalogActionState, ControllerHandle,
    DigitalActionHandle, DigitalActionState, ErrorReporter, SteamControllerPad, SteamInput,
};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

// Handles resolved once for one action set of the manifest
struct ResolvedSet {
    name: String,
    handle: ActionSetHandle,
    digital: Vec<(String, DigitalActionHandle)>,
    analog: Vec<(String, AnalogActionHandle)>,
}

fn main() -> Result<()> {
    setup()?;
    let config = BridgeConfig::load().map_err(|e| eyre!("Failed to load config: {}", e))?;
    setup_logging_env(config.level());
    info!("Using config: {:?}", BridgeConfig::default_path());

    let manifest = config.manifest.clone();
    let mut input = SteamInput::initialize(
        move || GilrsGateway::boxed(manifest),
        ErrorReporter::new(|message| error!("Steam Input: {}", message)),
    );
    if !input.is_active() {
        return Err(eyre!("Input facade could not be started"));
    }

    log_capabilities(&mut input);
    let sets = resolve_sets(&mut input, &config.manifest.action_sets);
    run_probe(&mut input, &config, &sets);

    input.shutdown();
    info!("Probe finished");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    Ok(())
}

fn setup_logging_env(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn log_capabilities(input: &mut SteamInput) {
    info!(
        "Limits: {} controllers, {} digital / {} analog actions, {} origins, analog range {}..={}",
        input.max_controllers(),
        input.max_digital_actions(),
        input.max_analog_actions(),
        input.max_origins(),
        input.min_analog_value(),
        input.max_analog_value()
    );
}

fn resolve_sets(input: &mut SteamInput, sets: &[ActionSetConfig]) -> Vec<ResolvedSet> {
    let mut resolved = Vec::new();
    for set in sets {
        let handle = input.action_set_handle(&set.name);
        if !handle.is_valid() {
            warn!("Action set {} could not be resolved", set.name);
            continue;
        }

        let digital = set
            .digital
            .iter()
            .map(|binding| (binding.name.clone(), input.digital_action_handle(&binding.name)))
            .filter(|(_, handle)| handle.is_valid())
            .collect();
        let analog = set
            .analog
            .iter()
            .map(|binding| (binding.name.clone(), input.analog_action_handle(&binding.name)))
            .filter(|(_, handle)| handle.is_valid())
            .collect();

        resolved.push(ResolvedSet {
            name: set.name.clone(),
            handle,
            digital,
            analog,
        });
    }
    resolved
}

fn describe_controller(input: &mut SteamInput, controller: ControllerHandle, set: &ResolvedSet) {
    info!(
        "{}: {:?}, gamepad index {}",
        controller,
        input.input_type_for_handle(controller),
        input.gamepad_index_for_controller(controller)
    );
    for (name, action) in &set.digital {
        let origins = input.digital_action_origins(controller, set.handle, *action);
        let labels: Vec<String> = origins
            .into_iter()
            .map(|origin| input.string_for_action_origin(origin))
            .collect();
        info!("  {}/{} bound to {:?}", set.name, name, labels);
    }
    for (name, action) in &set.analog {
        let origins = input.analog_action_origins(controller, set.handle, *action);
        let labels: Vec<&str> = origins.iter().map(|origin| origin.display_name()).collect();
        info!("  {}/{} bound to {:?}", set.name, name, labels);
    }
}

fn run_probe(input: &mut SteamInput, config: &BridgeConfig, sets: &[ResolvedSet]) {
    let Some(set) = sets.first() else {
        warn!("No usable action set in manifest, nothing to probe");
        return;
    };
    info!(
        "Probing {} for {} frames every {} ms",
        set.name, config.probe_frames, config.poll_interval_ms
    );

    let mut digital_seen: HashMap<(ControllerHandle, DigitalActionHandle), DigitalActionState> =
        HashMap::new();
    let mut analog_buffer = AnalogActionState::default();
    let mut known: Vec<ControllerHandle> = Vec::new();

    for frame in 0..config.probe_frames {
        input.run_frame();
        let controllers = input.connected_controllers();

        for &controller in &controllers {
            if !known.contains(&controller) {
                if input.current_action_set(controller) != set.handle {
                    input.activate_action_set(controller, set.handle);
                }
                describe_controller(input, controller, set);
                input.rumble(
                    controller,
                    SteamControllerPad::Both,
                    config.rumble.duration_ms,
                    config.rumble.strength,
                );
            }

            for (name, action) in &set.digital {
                let state = input.digital_action_data(controller, *action);
                let previous = digital_seen.insert((controller, *action), state);
                if previous.is_some_and(|p| p.state != state.state) {
                    info!(
                        "Frame {}: {} {} {}",
                        frame,
                        controller,
                        name,
                        if state.state { "pressed" } else { "released" }
                    );
                }
            }

            for (name, action) in &set.analog {
                input.analog_action_data_into(controller, *action, &mut analog_buffer);
                if analog_buffer.active && (analog_buffer.x.abs() > 0.1 || analog_buffer.y.abs() > 0.1) {
                    debug!(
                        "Frame {}: {} {} {:?} ({:.3}, {:.3})",
                        frame, controller, name, analog_buffer.mode, analog_buffer.x, analog_buffer.y
                    );
                }
            }
        }

        known = controllers;
        thread::sleep(Duration::from_millis(config.poll_interval_ms));
    }

    for &controller in &known {
        input.trigger_vibration(controller, 0, 0);
    }
}
