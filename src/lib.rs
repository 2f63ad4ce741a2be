//! The `pathfarm` worker binary's library half: the CLI surface, the
//! scene-construction contract boundary, and the network render engine.
//! Split out of `main.rs` so integration tests can drive a real
//! `TcpListener` against [`worker::run`] without spawning the binary.

pub mod cli;
pub mod error;
pub mod scene;
pub mod worker;
