//! Entity Natives

extern "C" {
    /// Deletes the specified entity.
    #[native(0x00000000, 0xfaa3d236)]
    pub fn delete_entity(entity: i32);

    #[native(0x00000000, 0x3ac90869)]
    pub fn does_entity_exist(entity: i32) -> Ret<Bool>;

    /// Returns all object handles known to the server. The data returned
    /// adheres to the entity's scope.
    #[native(0x00000000, 0x6886c3fe)]
    pub fn get_all_objects() -> Ret<Object>;

    /// Returns all peds handles known to the server.
    #[native(0x00000000, 0xb8584fef)]
    pub fn get_all_peds() -> Ret<Object>;

    /// Returns all vehicle handles known to the server.
    #[native(0x00000000, 0x332169f5)]
    pub fn get_all_vehicles() -> Ret<Object>;

    /// Gets the current coordinates for a specified entity.
    #[native(0x00000000, 0x1647f1cb)]
    pub fn get_entity_coords(entity: i32) -> Ret<Vector>;

    #[native(0x00000000, 0x972cc383)]
    pub fn get_entity_heading(entity: i32) -> Ret<Float>;

    #[native(0x00000000, 0xdafcb3ec)]
    pub fn get_entity_model(entity: i32) -> Ret<Int>;

    #[native(0x00000000, 0x8ff45b04)]
    pub fn get_entity_rotation(entity: i32) -> Ret<Vector>;

    #[native(0x00000000, 0xc14c9b6b)]
    pub fn get_entity_velocity(entity: i32) -> Ret<Vector>;

    /// Sets the coordinates (world position) for a specified entity,
    /// offset by the radius of the entity on the Z axis.
    ///
    /// `clear_area` clears the area around the entity, like `SET_ENTITY_COORDS`
    /// in the client does.
    #[native(0x00000000, 0xdf70b41b)]
    pub fn set_entity_coords(
        entity: i32,
        coords: Vector3,
        alive: bool,
        dead_flag: bool,
        ragdoll_flag: bool,
        clear_area: bool,
    );
}
