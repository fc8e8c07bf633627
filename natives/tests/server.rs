//! Generated server wrappers against an in-process native table

use std::sync::{Arc, Mutex};

use nativecall_core::encode::joaat;
use nativecall_core::frame::InitialValue;
use nativecall_core::{BoundaryError, ErrorKind, Invoker, NativeTable, StructuredObject, Vector3};
use nativecall_natives::server;
use serde_json::{Value, json};

fn invoker_for(table: NativeTable) -> (Arc<NativeTable>, Invoker) {
    let table = Arc::new(table);
    let invoker = Invoker::new(Arc::clone(&table));
    (table, invoker)
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers_match_declarations() {
    assert_eq!(server::CREATE_VEHICLE.namespace(), 0);
    assert_eq!(server::CREATE_VEHICLE.hash(), 0xdd75460a);
    assert_eq!(server::GET_GAME_TIMER.to_string(), "0x00000000:0xa4ea0691");
    assert_ne!(server::GET_ENTITY_COORDS, server::GET_ENTITY_ROTATION);
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_create_vehicle_hashes_model_name() {
    let mut table = NativeTable::new();
    table.define(server::CREATE_VEHICLE, |ctx| {
        assert_eq!(ctx.arg_count(), 7);
        assert_eq!(ctx.arg_int(0)?, i64::from(joaat("adder")));
        assert_eq!(ctx.arg_float(1)?, 100.0);
        assert_eq!(ctx.arg_float(2)?, -50.5);
        assert_eq!(ctx.arg_float(3)?, 30.0);
        assert_eq!(ctx.arg_float(4)?, 90.0);
        assert!(ctx.arg_bool(5)?);
        assert!(!ctx.arg_bool(6)?);
        ctx.push_int(4242);
        Ok(())
    });
    let (table, invoker) = invoker_for(table);

    let vehicle = server::create_vehicle(
        &invoker,
        "ADDER",
        Vector3::new(100.0, -50.5, 30.0),
        90.0,
        true,
        false,
    )
    .unwrap();

    assert_eq!(vehicle, 4242);
    assert_eq!(table.call_count(), 1);
}

#[test]
fn test_set_entity_coords_without_results() {
    let seen = Arc::new(Mutex::new(None));
    let mut table = NativeTable::new();
    let sink = Arc::clone(&seen);
    table.define(server::SET_ENTITY_COORDS, move |ctx| {
        let coords = ctx.arg_vector(1)?;
        *sink.lock().unwrap() = Some((ctx.arg_int(0)?, coords, ctx.arg_bool(7)?));
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    server::set_entity_coords(
        &invoker,
        77,
        Vector3::new(1.0, 2.0, 3.0),
        true,
        false,
        false,
        true,
    )
    .unwrap();

    let (entity, coords, clear_area) = seen.lock().unwrap().take().unwrap();
    assert_eq!(entity, 77);
    assert_eq!(coords, Vector3::new(1.0, 2.0, 3.0));
    assert!(clear_area);
}

#[test]
fn test_http_request_sends_payload_and_length() {
    let mut table = NativeTable::new();
    table.define(server::PERFORM_HTTP_REQUEST_INTERNAL_EX, |ctx| {
        let payload = ctx.arg_bytes(0)?;
        assert_eq!(ctx.arg_int(1)?, payload.len() as i64);
        let request: Value = serde_json::from_slice(payload)
            .map_err(|e| BoundaryError::Rejected(e.to_string()))?;
        assert_eq!(request["method"], "GET");
        ctx.push_int(request["url"].as_str().map_or(0, |url| url.len() as i32));
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let request = StructuredObject::new()
        .with_field("url", "http://example.com/")
        .with_field("method", "GET");
    let handle = server::perform_http_request_internal_ex(&invoker, &request).unwrap();

    assert_eq!(handle, 19);
}

#[test]
fn test_console_listener_reference_round_trips_through_registry() {
    let captured = Arc::new(Mutex::new(String::new()));
    let mut table = NativeTable::new();
    let sink = Arc::clone(&captured);
    table.define(server::REGISTER_CONSOLE_LISTENER, move |ctx| {
        *sink.lock().unwrap() = ctx.arg_func_ref(0)?.to_string();
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let lines = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&lines);
    let listener = invoker.register_callback(move |args| {
        let Some(line) = args.first().and_then(Value::as_str) else {
            anyhow::bail!("listener expects a message");
        };
        log.lock().unwrap().push(line.to_string());
        Ok(Value::Null)
    });

    server::register_console_listener(&invoker, &listener).unwrap();

    // The runtime later re-enters through the reference it was given
    let reference = captured.lock().unwrap().clone();
    assert_eq!(reference, listener.reference());
    invoker
        .callbacks()
        .call(&reference, &[json!("server started")])
        .unwrap();
    assert!(invoker.callbacks().call(&reference, &[json!(1)]).is_err());

    assert_eq!(*lines.lock().unwrap(), ["server started"]);
    assert!(listener.cancel());
    assert!(!invoker.callbacks().is_registered(&reference));
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_scalar_results() {
    let mut table = NativeTable::new();
    table
        .define(server::GET_GAME_TIMER, |ctx| {
            ctx.push_long(u64::from(u32::MAX) + 10);
            Ok(())
        })
        .define(server::GET_ENTITY_HEADING, |ctx| {
            ctx.push_float(271.5);
            Ok(())
        })
        .define(server::DOES_ENTITY_EXIST, |ctx| {
            ctx.push_bool(ctx.arg_int(0)? == 5);
            Ok(())
        });
    let (_, invoker) = invoker_for(table);

    let timer = server::get_game_timer(&invoker).unwrap();
    assert_eq!(timer, u64::from(u32::MAX) + 10);
    assert_eq!(server::get_entity_heading(&invoker, 5).unwrap(), 271.5);
    assert!(server::does_entity_exist(&invoker, 5).unwrap());
    assert!(!server::does_entity_exist(&invoker, 6).unwrap());
}

#[test]
fn test_entity_coords_vector() {
    let mut table = NativeTable::new();
    table.define(server::GET_ENTITY_COORDS, |ctx| {
        ctx.push_vector(Vector3::new(-1200.5, 300.25, 14.0));
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let coords = server::get_entity_coords(&invoker, 12).unwrap();
    assert_eq!(coords, Vector3::new(-1200.5, 300.25, 14.0));
    assert_eq!(coords.z(), 14.0);
}

#[test]
fn test_player_name_may_be_null() {
    let mut table = NativeTable::new();
    table.define(server::GET_PLAYER_NAME, |ctx| {
        match ctx.arg_str(0)? {
            "1" => ctx.push_str("Niko"),
            _ => ctx.push_null(),
        };
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let name = server::get_player_name(&invoker, "1").unwrap();
    assert_eq!(name.as_deref(), Some("Niko"));
    assert_eq!(server::get_player_name(&invoker, "99").unwrap(), None);
}

#[test]
fn test_all_vehicles_object() {
    let mut table = NativeTable::new();
    table.define(server::GET_ALL_VEHICLES, |ctx| {
        ctx.push_object(&[101, 102, 103])?;
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let vehicles = server::get_all_vehicles(&invoker).unwrap();
    assert_eq!(vehicles, json!([101, 102, 103]));
}

#[test]
fn test_lights_state_keeps_declared_order() {
    let mut table = NativeTable::new();
    table.define(server::GET_VEHICLE_LIGHTS_STATE, |ctx| {
        assert_eq!(ctx.outputs().count(), 3);
        // lights on, high beams off, then the native's own result
        ctx.push_int(1).push_int(0).push_bool(true);
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let (lights, high_beams, ok) = server::get_vehicle_lights_state(&invoker, 9).unwrap();
    assert!(lights);
    assert!(!high_beams);
    assert!(ok);
}

#[test]
fn test_vehicle_colour_pointers() {
    let mut table = NativeTable::new();
    table
        .define(server::GET_VEHICLE_COLOURS, |ctx| {
            ctx.push_int(12).push_int(0);
            Ok(())
        })
        .define(server::GET_VEHICLE_CUSTOM_PRIMARY_COLOUR, |ctx| {
            ctx.push_int(255).push_int(128).push_int(0);
            Ok(())
        });
    let (_, invoker) = invoker_for(table);

    assert_eq!(server::get_vehicle_colours(&invoker, 3).unwrap(), (12, 0));
    let primary = server::get_vehicle_custom_primary_colour(&invoker, 3).unwrap();
    assert_eq!(primary, (255, 128, 0));
}

#[test]
fn test_dashboard_colour_in_out() {
    let mut table = NativeTable::new();
    table.define(server::GET_VEHICLE_DASHBOARD_COLOUR, |ctx| {
        assert_eq!(ctx.arg_count(), 1);
        let Some(InitialValue::Int(current)) = ctx.initial(0) else {
            return Err(BoundaryError::Rejected("colour pointer not initialized".into()));
        };
        ctx.push_int(current + 1);
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let colour = server::get_vehicle_dashboard_colour(&invoker, 3, 40).unwrap();
    assert_eq!(colour, 41);
}

#[test]
fn test_remove_blip_clears_handle() {
    let mut table = NativeTable::new();
    table.define(server::REMOVE_BLIP, |ctx| {
        match ctx.initial(0) {
            Some(InitialValue::Int(_)) => ctx.push_int(0),
            _ => return Err(BoundaryError::Rejected("blip pointer not initialized".into())),
        };
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    assert_eq!(server::remove_blip(&invoker, 31).unwrap(), 0);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unknown_native_is_boundary_failure() {
    let (table, invoker) = invoker_for(NativeTable::new());

    let err = server::delete_entity(&invoker, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BoundaryFailure);
    assert_eq!(table.call_count(), 1);
}

#[test]
fn test_short_result_is_decode_mismatch() {
    let mut table = NativeTable::new();
    table.define(server::GET_VEHICLE_COLOURS, |ctx| {
        ctx.push_int(12);
        Ok(())
    });
    let (_, invoker) = invoker_for(table);

    let err = server::get_vehicle_colours(&invoker, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeMismatch);
}

#[test]
fn test_bad_player_source_never_reaches_host() {
    let (table, invoker) = invoker_for(NativeTable::new());

    let err = server::get_player_routing_bucket(&invoker, "bad\0src").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(table.call_count(), 0);
}
