//! Runtime Natives

extern "C" {
    /// Returns the current game timer in milliseconds.
    #[native(0x00000000, 0xa4ea0691)]
    pub fn get_game_timer() -> Ret<Long>;

    /// Hashes a name the way the runtime does (case-insensitive).
    #[native(0x00000000, 0x98eff6f1)]
    pub fn get_hash_key(model: &str) -> Ret<Int>;

    /// Registers a listener for console output messages.
    #[native(0x00000000, 0x281b5448)]
    pub fn register_console_listener(listener: FuncRef);

    /// Registers a build task factory for resources.
    #[native(0x00000000, 0x285b43ca)]
    pub fn register_resource_build_task_factory(factory_id: &str, factory_fn: FuncRef);

    /// Starts an HTTP request described by a structured object.
    /// Returns the request handle.
    #[native(0x00000000, 0x6b171e87)]
    pub fn perform_http_request_internal_ex(request_data: Object) -> Ret<Int>;
}
