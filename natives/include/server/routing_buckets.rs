//! Routing Bucket Natives
//!
//! Routing buckets partition entities and players; a bucket id is a plain
//! integer.

extern "C" {
    /// Gets the routing bucket for the specified player.
    #[native(0x00000000, 0x52441c34)]
    pub fn get_player_routing_bucket(player_src: &str) -> Ret<Int>;

    /// Sets the routing bucket for the specified player.
    #[native(0x00000000, 0x6504eb38)]
    pub fn set_player_routing_bucket(player_src: &str, bucket: i32);

    /// Sets the routing bucket for the specified entity.
    #[native(0x00000000, 0x635e5289)]
    pub fn set_entity_routing_bucket(entity: i32, bucket: i32);

    /// Sets whether or not the specified routing bucket has automatically-
    /// created population enabled.
    #[native(0x00000000, 0xce51ac2c)]
    pub fn set_routing_bucket_population_enabled(bucket_id: i32, mode: bool);
}
