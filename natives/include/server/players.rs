//! Player Natives

extern "C" {
    #[native(0x00000000, 0x406b4b20)]
    pub fn get_player_name(player_src: &str) -> Ret<Str>;

    /// To get the number of identifiers, use `get_num_player_identifiers`.
    #[native(0x00000000, 0x7302dbcf)]
    pub fn get_player_identifier(player_src: &str, identifier: i32) -> Ret<Str>;

    #[native(0x00000000, 0xff7f66ab)]
    pub fn get_num_player_identifiers(player_src: &str) -> Ret<Int>;

    /// Returns the voice proximity override vector of the player.
    #[native(0x00000000, 0x7a6462f4)]
    pub fn network_get_voice_proximity_override(player_src: &str) -> Ret<Vector>;
}
