//! Blip Natives

extern "C" {
    /// Creates a blip for the specified coordinates. You can use `SET_BLIP_`
    /// natives to change the blip.
    ///
    /// Server-side RPC equivalent of the client native `ADD_BLIP_FOR_COORD`.
    #[native(0x00000000, 0xc6f43d0e)]
    pub fn add_blip_for_coord(coords: Vector3) -> Ret<Int>;

    /// Create a blip that by default is red (enemy), you can use
    /// `SET_BLIP_AS_FRIENDLY` to make it blue (friend).
    #[native(0x00000000, 0x30822554)]
    pub fn add_blip_for_entity(entity: i32) -> Ret<Int>;

    /// Removes the blip from your map. The handle is cleared on return.
    #[native(0x00000000, 0xd8c3c1cd)]
    pub fn remove_blip(blip: InOut<i32>) -> Out<Int>;
}
