//! WASM bindings for tempo-playback
//!
//! Runs the session in the browser over an `<audio>` element, with
//! `setInterval`/`clearInterval` supplied by the page.

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod scheduler;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub use player::WasmTempoPlayer;
