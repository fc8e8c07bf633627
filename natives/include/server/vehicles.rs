//! Vehicle Natives

extern "C" {
    /// Creates a vehicle with the specified model at the specified position.
    /// The model name is hashed before the call.
    #[native(0x00000000, 0xdd75460a)]
    pub fn create_vehicle(
        model: Hash,
        coords: Vector3,
        heading: f32,
        is_network: bool,
        net_mission_entity: bool,
    ) -> Ret<Int>;

    /// Returns the primary and secondary colour indices.
    #[native(0x00000000, 0x40d82d88)]
    pub fn get_vehicle_colours(vehicle: i32) -> (Out<Int>, Out<Int>);

    #[native(0x00000000, 0x1c2b9fef)]
    pub fn get_vehicle_custom_primary_colour(vehicle: i32) -> (Out<Int>, Out<Int>, Out<Int>);

    #[native(0x00000000, 0xa0dbd08d)]
    pub fn get_vehicle_dashboard_colour(vehicle: i32, color: InOut<i32>) -> Out<Int>;

    /// Returns whether the lights and the high beams are on, followed by
    /// the native's own result.
    #[native(0x00000000, 0x7c278621)]
    pub fn get_vehicle_lights_state(vehicle: i32) -> (Out<Bool>, Out<Bool>, Ret<Bool>);
}
