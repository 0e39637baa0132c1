//! # Voxel Engine Application Entry Point
//!
//! This is the main entry point for the native application version of the voxel engine.
//! It simply calls into the library's `run()` function to build the world and drive a
//! scripted camera session.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_engine::run();
}
