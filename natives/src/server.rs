// GENERATED FILE - DO NOT EDIT
// Source: natives/include/server
// Generator: tools/native-gen

use nativecall_core::encode;
use nativecall_core::{
    CallbackHandle, InvokeError, Invoker, NativeId, Out, Ret, StructuredObject, Vector3, kind,
};

// =============================================================================
// Blips
// =============================================================================

/// Identifier of [`add_blip_for_coord`].
pub const ADD_BLIP_FOR_COORD: NativeId = NativeId::new(0x00000000, 0xc6f43d0e);

/// Creates a blip for the specified coordinates. You can use `SET_BLIP_`
/// natives to change the blip.
///
/// Server-side RPC equivalent of the client native `ADD_BLIP_FOR_COORD`.
pub fn add_blip_for_coord(invoker: &Invoker, coords: Vector3) -> Result<i32, InvokeError> {
    invoker
        .invoke(ADD_BLIP_FOR_COORD)
        .arg(coords)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`add_blip_for_entity`].
pub const ADD_BLIP_FOR_ENTITY: NativeId = NativeId::new(0x00000000, 0x30822554);

/// Create a blip that by default is red (enemy), you can use
/// `SET_BLIP_AS_FRIENDLY` to make it blue (friend).
pub fn add_blip_for_entity(invoker: &Invoker, entity: i32) -> Result<i32, InvokeError> {
    invoker
        .invoke(ADD_BLIP_FOR_ENTITY)
        .arg(entity)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`remove_blip`].
pub const REMOVE_BLIP: NativeId = NativeId::new(0x00000000, 0xd8c3c1cd);

/// Removes the blip from your map. The handle is cleared on return.
pub fn remove_blip(invoker: &Invoker, blip: i32) -> Result<i32, InvokeError> {
    invoker
        .invoke(REMOVE_BLIP)
        .in_out_int(blip)
        .call::<Out<kind::Int>>()
}

// =============================================================================
// Entities
// =============================================================================

/// Identifier of [`delete_entity`].
pub const DELETE_ENTITY: NativeId = NativeId::new(0x00000000, 0xfaa3d236);

/// Deletes the specified entity.
pub fn delete_entity(invoker: &Invoker, entity: i32) -> Result<(), InvokeError> {
    invoker.invoke(DELETE_ENTITY).arg(entity).call::<()>()
}

/// Identifier of [`does_entity_exist`].
pub const DOES_ENTITY_EXIST: NativeId = NativeId::new(0x00000000, 0x3ac90869);

pub fn does_entity_exist(invoker: &Invoker, entity: i32) -> Result<bool, InvokeError> {
    invoker
        .invoke(DOES_ENTITY_EXIST)
        .arg(entity)
        .call::<Ret<kind::Bool>>()
}

/// Identifier of [`get_all_objects`].
pub const GET_ALL_OBJECTS: NativeId = NativeId::new(0x00000000, 0x6886c3fe);

/// Returns all object handles known to the server. The data returned
/// adheres to the entity's scope.
pub fn get_all_objects(invoker: &Invoker) -> Result<serde_json::Value, InvokeError> {
    invoker.invoke(GET_ALL_OBJECTS).call::<Ret<kind::Object>>()
}

/// Identifier of [`get_all_peds`].
pub const GET_ALL_PEDS: NativeId = NativeId::new(0x00000000, 0xb8584fef);

/// Returns all peds handles known to the server.
pub fn get_all_peds(invoker: &Invoker) -> Result<serde_json::Value, InvokeError> {
    invoker.invoke(GET_ALL_PEDS).call::<Ret<kind::Object>>()
}

/// Identifier of [`get_all_vehicles`].
pub const GET_ALL_VEHICLES: NativeId = NativeId::new(0x00000000, 0x332169f5);

/// Returns all vehicle handles known to the server.
pub fn get_all_vehicles(invoker: &Invoker) -> Result<serde_json::Value, InvokeError> {
    invoker.invoke(GET_ALL_VEHICLES).call::<Ret<kind::Object>>()
}

/// Identifier of [`get_entity_coords`].
pub const GET_ENTITY_COORDS: NativeId = NativeId::new(0x00000000, 0x1647f1cb);

/// Gets the current coordinates for a specified entity.
pub fn get_entity_coords(invoker: &Invoker, entity: i32) -> Result<Vector3, InvokeError> {
    invoker
        .invoke(GET_ENTITY_COORDS)
        .arg(entity)
        .call::<Ret<kind::Vector>>()
}

/// Identifier of [`get_entity_heading`].
pub const GET_ENTITY_HEADING: NativeId = NativeId::new(0x00000000, 0x972cc383);

pub fn get_entity_heading(invoker: &Invoker, entity: i32) -> Result<f32, InvokeError> {
    invoker
        .invoke(GET_ENTITY_HEADING)
        .arg(entity)
        .call::<Ret<kind::Float>>()
}

/// Identifier of [`get_entity_model`].
pub const GET_ENTITY_MODEL: NativeId = NativeId::new(0x00000000, 0xdafcb3ec);

pub fn get_entity_model(invoker: &Invoker, entity: i32) -> Result<i32, InvokeError> {
    invoker
        .invoke(GET_ENTITY_MODEL)
        .arg(entity)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`get_entity_rotation`].
pub const GET_ENTITY_ROTATION: NativeId = NativeId::new(0x00000000, 0x8ff45b04);

pub fn get_entity_rotation(invoker: &Invoker, entity: i32) -> Result<Vector3, InvokeError> {
    invoker
        .invoke(GET_ENTITY_ROTATION)
        .arg(entity)
        .call::<Ret<kind::Vector>>()
}

/// Identifier of [`get_entity_velocity`].
pub const GET_ENTITY_VELOCITY: NativeId = NativeId::new(0x00000000, 0xc14c9b6b);

pub fn get_entity_velocity(invoker: &Invoker, entity: i32) -> Result<Vector3, InvokeError> {
    invoker
        .invoke(GET_ENTITY_VELOCITY)
        .arg(entity)
        .call::<Ret<kind::Vector>>()
}

/// Identifier of [`set_entity_coords`].
pub const SET_ENTITY_COORDS: NativeId = NativeId::new(0x00000000, 0xdf70b41b);

/// Sets the coordinates (world position) for a specified entity,
/// offset by the radius of the entity on the Z axis.
///
/// `clear_area` clears the area around the entity, like `SET_ENTITY_COORDS`
/// in the client does.
pub fn set_entity_coords(
    invoker: &Invoker,
    entity: i32,
    coords: Vector3,
    alive: bool,
    dead_flag: bool,
    ragdoll_flag: bool,
    clear_area: bool,
) -> Result<(), InvokeError> {
    invoker
        .invoke(SET_ENTITY_COORDS)
        .arg(entity)
        .arg(coords)
        .arg(alive)
        .arg(dead_flag)
        .arg(ragdoll_flag)
        .arg(clear_area)
        .call::<()>()
}

// =============================================================================
// Players
// =============================================================================

/// Identifier of [`get_player_name`].
pub const GET_PLAYER_NAME: NativeId = NativeId::new(0x00000000, 0x406b4b20);

pub fn get_player_name(invoker: &Invoker, player_src: &str) -> Result<Option<String>, InvokeError> {
    invoker
        .invoke(GET_PLAYER_NAME)
        .arg(player_src)
        .call::<Ret<kind::Str>>()
}

/// Identifier of [`get_player_identifier`].
pub const GET_PLAYER_IDENTIFIER: NativeId = NativeId::new(0x00000000, 0x7302dbcf);

/// To get the number of identifiers, use `get_num_player_identifiers`.
pub fn get_player_identifier(
    invoker: &Invoker,
    player_src: &str,
    identifier: i32,
) -> Result<Option<String>, InvokeError> {
    invoker
        .invoke(GET_PLAYER_IDENTIFIER)
        .arg(player_src)
        .arg(identifier)
        .call::<Ret<kind::Str>>()
}

/// Identifier of [`get_num_player_identifiers`].
pub const GET_NUM_PLAYER_IDENTIFIERS: NativeId = NativeId::new(0x00000000, 0xff7f66ab);

pub fn get_num_player_identifiers(invoker: &Invoker, player_src: &str) -> Result<i32, InvokeError> {
    invoker
        .invoke(GET_NUM_PLAYER_IDENTIFIERS)
        .arg(player_src)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`network_get_voice_proximity_override`].
pub const NETWORK_GET_VOICE_PROXIMITY_OVERRIDE: NativeId = NativeId::new(0x00000000, 0x7a6462f4);

/// Returns the voice proximity override vector of the player.
pub fn network_get_voice_proximity_override(
    invoker: &Invoker,
    player_src: &str,
) -> Result<Vector3, InvokeError> {
    invoker
        .invoke(NETWORK_GET_VOICE_PROXIMITY_OVERRIDE)
        .arg(player_src)
        .call::<Ret<kind::Vector>>()
}

// =============================================================================
// Routing Buckets
// =============================================================================

/// Identifier of [`get_player_routing_bucket`].
pub const GET_PLAYER_ROUTING_BUCKET: NativeId = NativeId::new(0x00000000, 0x52441c34);

/// Gets the routing bucket for the specified player.
pub fn get_player_routing_bucket(invoker: &Invoker, player_src: &str) -> Result<i32, InvokeError> {
    invoker
        .invoke(GET_PLAYER_ROUTING_BUCKET)
        .arg(player_src)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`set_player_routing_bucket`].
pub const SET_PLAYER_ROUTING_BUCKET: NativeId = NativeId::new(0x00000000, 0x6504eb38);

/// Sets the routing bucket for the specified player.
pub fn set_player_routing_bucket(
    invoker: &Invoker,
    player_src: &str,
    bucket: i32,
) -> Result<(), InvokeError> {
    invoker
        .invoke(SET_PLAYER_ROUTING_BUCKET)
        .arg(player_src)
        .arg(bucket)
        .call::<()>()
}

/// Identifier of [`set_entity_routing_bucket`].
pub const SET_ENTITY_ROUTING_BUCKET: NativeId = NativeId::new(0x00000000, 0x635e5289);

/// Sets the routing bucket for the specified entity.
pub fn set_entity_routing_bucket(
    invoker: &Invoker,
    entity: i32,
    bucket: i32,
) -> Result<(), InvokeError> {
    invoker
        .invoke(SET_ENTITY_ROUTING_BUCKET)
        .arg(entity)
        .arg(bucket)
        .call::<()>()
}

/// Identifier of [`set_routing_bucket_population_enabled`].
pub const SET_ROUTING_BUCKET_POPULATION_ENABLED: NativeId = NativeId::new(0x00000000, 0xce51ac2c);

/// Sets whether or not the specified routing bucket has automatically-
/// created population enabled.
pub fn set_routing_bucket_population_enabled(
    invoker: &Invoker,
    bucket_id: i32,
    mode: bool,
) -> Result<(), InvokeError> {
    invoker
        .invoke(SET_ROUTING_BUCKET_POPULATION_ENABLED)
        .arg(bucket_id)
        .arg(mode)
        .call::<()>()
}

// =============================================================================
// Runtime
// =============================================================================

/// Identifier of [`get_game_timer`].
pub const GET_GAME_TIMER: NativeId = NativeId::new(0x00000000, 0xa4ea0691);

/// Returns the current game timer in milliseconds.
pub fn get_game_timer(invoker: &Invoker) -> Result<u64, InvokeError> {
    invoker.invoke(GET_GAME_TIMER).call::<Ret<kind::Long>>()
}

/// Identifier of [`get_hash_key`].
pub const GET_HASH_KEY: NativeId = NativeId::new(0x00000000, 0x98eff6f1);

/// Hashes a name the way the runtime does (case-insensitive).
pub fn get_hash_key(invoker: &Invoker, model: &str) -> Result<i32, InvokeError> {
    invoker
        .invoke(GET_HASH_KEY)
        .arg(model)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`register_console_listener`].
pub const REGISTER_CONSOLE_LISTENER: NativeId = NativeId::new(0x00000000, 0x281b5448);

/// Registers a listener for console output messages.
pub fn register_console_listener(
    invoker: &Invoker,
    listener: &CallbackHandle,
) -> Result<(), InvokeError> {
    invoker
        .invoke(REGISTER_CONSOLE_LISTENER)
        .arg(listener)
        .call::<()>()
}

/// Identifier of [`register_resource_build_task_factory`].
pub const REGISTER_RESOURCE_BUILD_TASK_FACTORY: NativeId = NativeId::new(0x00000000, 0x285b43ca);

/// Registers a build task factory for resources.
pub fn register_resource_build_task_factory(
    invoker: &Invoker,
    factory_id: &str,
    factory_fn: &CallbackHandle,
) -> Result<(), InvokeError> {
    invoker
        .invoke(REGISTER_RESOURCE_BUILD_TASK_FACTORY)
        .arg(factory_id)
        .arg(factory_fn)
        .call::<()>()
}

/// Identifier of [`perform_http_request_internal_ex`].
pub const PERFORM_HTTP_REQUEST_INTERNAL_EX: NativeId = NativeId::new(0x00000000, 0x6b171e87);

/// Starts an HTTP request described by a structured object.
/// Returns the request handle.
pub fn perform_http_request_internal_ex(
    invoker: &Invoker,
    request_data: &StructuredObject,
) -> Result<i32, InvokeError> {
    invoker
        .invoke(PERFORM_HTTP_REQUEST_INTERNAL_EX)
        .arg(request_data)
        .call::<Ret<kind::Int>>()
}

// =============================================================================
// Vehicles
// =============================================================================

/// Identifier of [`create_vehicle`].
pub const CREATE_VEHICLE: NativeId = NativeId::new(0x00000000, 0xdd75460a);

/// Creates a vehicle with the specified model at the specified position.
/// The model name is hashed before the call.
pub fn create_vehicle(
    invoker: &Invoker,
    model: &str,
    coords: Vector3,
    heading: f32,
    is_network: bool,
    net_mission_entity: bool,
) -> Result<i32, InvokeError> {
    invoker
        .invoke(CREATE_VEHICLE)
        .arg(encode::hash(model))
        .arg(coords)
        .arg(heading)
        .arg(is_network)
        .arg(net_mission_entity)
        .call::<Ret<kind::Int>>()
}

/// Identifier of [`get_vehicle_colours`].
pub const GET_VEHICLE_COLOURS: NativeId = NativeId::new(0x00000000, 0x40d82d88);

/// Returns the primary and secondary colour indices.
pub fn get_vehicle_colours(invoker: &Invoker, vehicle: i32) -> Result<(i32, i32), InvokeError> {
    invoker
        .invoke(GET_VEHICLE_COLOURS)
        .arg(vehicle)
        .call::<(Out<kind::Int>, Out<kind::Int>)>()
}

/// Identifier of [`get_vehicle_custom_primary_colour`].
pub const GET_VEHICLE_CUSTOM_PRIMARY_COLOUR: NativeId = NativeId::new(0x00000000, 0x1c2b9fef);

pub fn get_vehicle_custom_primary_colour(
    invoker: &Invoker,
    vehicle: i32,
) -> Result<(i32, i32, i32), InvokeError> {
    invoker
        .invoke(GET_VEHICLE_CUSTOM_PRIMARY_COLOUR)
        .arg(vehicle)
        .call::<(Out<kind::Int>, Out<kind::Int>, Out<kind::Int>)>()
}

/// Identifier of [`get_vehicle_dashboard_colour`].
pub const GET_VEHICLE_DASHBOARD_COLOUR: NativeId = NativeId::new(0x00000000, 0xa0dbd08d);

pub fn get_vehicle_dashboard_colour(
    invoker: &Invoker,
    vehicle: i32,
    color: i32,
) -> Result<i32, InvokeError> {
    invoker
        .invoke(GET_VEHICLE_DASHBOARD_COLOUR)
        .arg(vehicle)
        .in_out_int(color)
        .call::<Out<kind::Int>>()
}

/// Identifier of [`get_vehicle_lights_state`].
pub const GET_VEHICLE_LIGHTS_STATE: NativeId = NativeId::new(0x00000000, 0x7c278621);

/// Returns whether the lights and the high beams are on, followed by
/// the native's own result.
pub fn get_vehicle_lights_state(
    invoker: &Invoker,
    vehicle: i32,
) -> Result<(bool, bool, bool), InvokeError> {
    invoker
        .invoke(GET_VEHICLE_LIGHTS_STATE)
        .arg(vehicle)
        .call::<(Out<kind::Bool>, Out<kind::Bool>, Ret<kind::Bool>)>()
}

