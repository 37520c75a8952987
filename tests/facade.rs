use std::cell::RefCell;
use std::rc::Rc;
use steam_input_bridge::gateway::recording::{CallLog, GatewayScript, NativeCall, RecordingGateway};
use steam_input_bridge::gateway::{PAD_LEFT, PAD_RIGHT};
use steam_input_bridge::{
    ActionOrigin, ActionSetHandle, AnalogActionHandle, AnalogActionState, CapabilityKind,
    ControllerHandle, DigitalActionHandle, ErrorReporter, GatewayError, InputSourceMode,
    InputType, MotionState, NativeGateway, Origin, SteamControllerPad, SteamInput,
};

fn start(script: GatewayScript) -> (SteamInput, CallLog) {
    let (gateway, log) = RecordingGateway::new(script);
    let input = SteamInput::initialize(
        move || Ok(Box::new(gateway) as Box<dyn NativeGateway>),
        ErrorReporter::none(),
    );
    assert!(input.is_active());
    log.clear();
    (input, log)
}

fn pad0() -> ControllerHandle {
    ControllerHandle::from_raw(0)
}

#[test]
fn never_loaded_facade_answers_with_defaults() {
    let mut input = SteamInput::inactive(ErrorReporter::none());
    let controller = pad0();

    for kind in CapabilityKind::ALL {
        assert_eq!(input.capability(kind), kind.documented());
    }
    assert_eq!(input.max_controllers(), 16);
    assert_eq!(input.max_origins(), 8);
    assert!(input.connected_controllers().is_empty());
    assert_eq!(input.current_action_set(controller).raw(), -1);
    assert_eq!(input.action_set_handle("menu").raw(), -1);
    assert_eq!(input.digital_action_handle("jump").raw(), -1);
    assert_eq!(input.analog_action_handle("move").raw(), -1);
    assert_eq!(input.digital_action_handle("jump"), DigitalActionHandle::INACTIVE);
    assert_eq!(input.analog_action_handle("move"), AnalogActionHandle::INACTIVE);
    assert_eq!(input.input_type_for_handle(controller), InputType::Unknown);
    assert_eq!(input.controller_for_gamepad_index(0), ControllerHandle::INVALID);
    assert_eq!(input.gamepad_index_for_controller(controller), -1);
    assert!(!input.show_binding_panel(controller));
    assert_eq!(input.motion_data(controller), MotionState::default());
    assert!(input.glyph_for_action_origin(ActionOrigin::from_raw(1)).is_empty());
    assert_eq!(
        input.digital_action_origins_into(
            controller,
            ActionSetHandle::from_raw(1),
            DigitalActionHandle::from_raw(1),
            None
        ),
        0
    );
}

#[test]
fn refused_init_reports_and_stays_inactive() {
    let (gateway, log) = RecordingGateway::new(GatewayScript {
        init_succeeds: false,
        ..Default::default()
    });
    let reports = Rc::new(RefCell::new(0));
    let counter = reports.clone();

    let mut input = SteamInput::initialize(
        move || Ok(Box::new(gateway) as Box<dyn NativeGateway>),
        ErrorReporter::new(move |_| *counter.borrow_mut() += 1),
    );
    log.clear();

    assert!(!input.is_active());
    assert_eq!(*reports.borrow(), 1);

    input.run_frame();
    input.rumble(pad0(), SteamControllerPad::Left, 50, 0.5);
    assert!(log.is_empty());
}

#[test]
fn load_error_message_reaches_the_callback() {
    let reports = Rc::new(RefCell::new(Vec::new()));
    let sink = reports.clone();

    let input = SteamInput::initialize(
        || Err(GatewayError::InitializationError("no display".to_string())),
        ErrorReporter::new(move |msg| sink.borrow_mut().push(msg.to_string())),
    );

    assert!(!input.is_active());
    assert_eq!(reports.borrow().len(), 1);
    assert!(reports.borrow()[0].contains("no display"));
}

#[test]
fn digital_state_decodes_both_bits() {
    let cases = [(0x11, true, true), (0x10, false, true), (0x01, true, false), (0, false, false)];
    for (raw, state, active) in cases {
        let (mut input, _log) = start(GatewayScript {
            digital_state: raw,
            ..Default::default()
        });
        let data = input.digital_action_data(pad0(), DigitalActionHandle::from_raw(3));
        assert_eq!((data.state, data.active), (state, active), "raw {:#x}", raw);
    }
}

#[test]
fn analog_snapshot_is_read_back_to_back() {
    let (mut input, log) = start(GatewayScript {
        analog_active: true,
        analog_mode: 10,
        analog_x: 0.8,
        ..Default::default()
    });

    let data = input.analog_action_data(pad0(), AnalogActionHandle::from_raw(1));
    assert_eq!(
        data,
        AnalogActionState {
            active: true,
            mode: InputSourceMode::Trigger,
            x: 0.8,
            y: 0.0,
        }
    );
    assert_eq!(
        log.calls(),
        vec![
            NativeCall::Query("fetch_analog_action_data"),
            NativeCall::Query("analog_data_active"),
            NativeCall::Query("analog_data_mode"),
            NativeCall::Query("analog_data_x"),
            NativeCall::Query("analog_data_y"),
        ]
    );
}

#[test]
fn motion_buffer_is_overwritten_in_place() {
    let mut motion = [0.0; 10];
    motion[3] = 1.0;
    motion[6] = -9.81;
    let (mut input, _log) = start(GatewayScript {
        motion,
        ..Default::default()
    });

    let mut buffer = MotionState {
        rot_vel_y: 42.0,
        ..Default::default()
    };
    input.motion_data_into(pad0(), &mut buffer);

    assert_eq!(buffer.rot_quat_w, 1.0);
    assert_eq!(buffer.pos_accel_z, -9.81);
    assert_eq!(buffer.rot_vel_y, 0.0);
}

#[test]
fn layers_are_decoded_as_action_set_handles() {
    let (mut input, log) = start(GatewayScript {
        layers: "4,,7".to_string(),
        ..Default::default()
    });
    let controller = pad0();
    let layer = ActionSetHandle::from_raw(4);

    assert!(input.activate_action_set_layer(controller, layer));
    assert!(input.deactivate_action_set_layer(controller, layer));
    assert!(input.deactivate_all_action_set_layers(controller));
    assert_eq!(
        input.active_action_set_layers(controller),
        vec![ActionSetHandle::from_raw(4), ActionSetHandle::from_raw(7)]
    );
    assert_eq!(log.count("activate_action_set_layer"), 1);
    assert_eq!(log.count("deactivate_all_action_set_layers"), 1);
}

#[test]
fn rumble_through_the_facade_fans_out_to_both_pads() {
    let (mut input, log) = start(GatewayScript::default());

    input.rumble(ControllerHandle::from_raw(1), SteamControllerPad::Both, 1000, 0.5);

    let expected = |pad| NativeCall::RepeatedHapticPulse {
        controller: 1,
        pad,
        on_us: 32767,
        off_us: 32767,
        repeat: 16,
        flags: 0,
    };
    assert_eq!(log.haptics(), vec![expected(PAD_LEFT), expected(PAD_RIGHT)]);
}

#[test]
fn single_pulse_is_clamped_through_the_facade() {
    let (mut input, log) = start(GatewayScript::default());

    input.trigger_haptic_pulse(pad0(), SteamControllerPad::Right, 200_000);
    input.trigger_repeated_haptic_pulse(pad0(), SteamControllerPad::Left, 500, 250, 4, 0);

    assert_eq!(
        log.haptics(),
        vec![
            NativeCall::HapticPulse {
                controller: 0,
                pad: PAD_RIGHT,
                duration_us: u16::MAX
            },
            NativeCall::RepeatedHapticPulse {
                controller: 0,
                pad: PAD_LEFT,
                on_us: 500,
                off_us: 250,
                repeat: 4,
                flags: 0
            },
        ]
    );
}

#[test]
fn origin_lookups_and_descriptions() {
    let code = Origin::XBoxOne_A as i32;
    let (mut input, _log) = start(GatewayScript {
        origins: format!("1,{}", code),
        glyph_path: "/glyphs/xbox_a.png".to_string(),
        ..Default::default()
    });
    let set = ActionSetHandle::from_raw(1);

    let origins = input.analog_action_origins(pad0(), set, AnalogActionHandle::from_raw(1));
    assert_eq!(origins, vec![ActionOrigin::from(Origin::XBoxOne_A)]);
    assert_eq!(origins[0].display_name(), "XBoxOne_A");
    assert_eq!(ActionOrigin::from_name("xboxone_a"), origins[0]);

    assert_eq!(input.glyph_for_action_origin(origins[0]), "/glyphs/xbox_a.png");
    assert_eq!(input.string_for_action_origin(origins[0]), format!("origin {}", code));

    let mut buffer = [ActionOrigin::UNKNOWN; 1];
    let count = input.analog_action_origins_into(
        pad0(),
        set,
        AnalogActionHandle::from_raw(1),
        Some(&mut buffer),
    );
    assert_eq!(count, 1);
    assert_eq!(buffer[0], ActionOrigin::UNKNOWN);
}

#[test]
fn controller_queries_forward_raw_values() {
    let (mut input, log) = start(GatewayScript {
        input_type: 13,
        ..Default::default()
    });

    assert_eq!(input.input_type_for_handle(pad0()), InputType::PS5Controller);
    assert_eq!(input.controller_for_gamepad_index(2), ControllerHandle::from_raw(2));
    assert_eq!(input.gamepad_index_for_controller(ControllerHandle::from_raw(1)), 1);
    assert!(input.show_binding_panel(pad0()));
    input.stop_analog_action_momentum(pad0(), AnalogActionHandle::from_raw(1));
    input.run_frame();

    assert_eq!(log.count("stop_analog_action_momentum"), 1);
    assert_eq!(log.count("run_frame"), 1);
}

#[test]
fn capabilities_are_memoized_per_kind() {
    let (mut input, log) = start(GatewayScript::default());

    for _ in 0..4 {
        assert_eq!(input.max_analog_actions(), 24);
        assert_eq!(input.min_analog_value(), -1.0);
        assert_eq!(input.max_analog_value(), 1.0);
    }
    assert_eq!(log.len(), 3);
}
