//! # Voxel World Entry Point
//!
//! Runs the library's headless session. Pass a JSON config path as the first
//! argument or through `VOXEL_CONFIG` to change world parameters.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    if let Err(error) = voxel_world::run() {
        eprintln!("voxel-world: {error}");
        std::process::exit(1);
    }
}
