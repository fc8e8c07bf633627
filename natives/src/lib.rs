//! Typed native wrappers
//!
//! Each side module is generated by `tools/native-gen` from the extern
//! declarations in `natives/include/<side>/`. Regenerate with
//! `cargo run -p native-gen -- generate` after editing a declaration; CI runs
//! `native-gen check` to catch stale wrappers.

pub mod server;
