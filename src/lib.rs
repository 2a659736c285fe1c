// ----------------------------------------------------------------------------
//! Split-merge ROAM terrain LOD tessellation: a heightmap-driven bintree that
//! keeps a single triangulation of a square domain consistent while refining
//! (splitting) near the camera and coarsening (merging) away from it, within
//! a polygon-count budget enforced by a feedback-controlled quality scalar.
//!
//! The crate is intentionally decoupled from any renderer or windowing
//! system: a host supplies four callbacks ([`Callbacks`]) and drives
//! [`Engine::init`], [`Engine::update`], [`Engine::draw`] once per frame.
// ----------------------------------------------------------------------------
mod callbacks;
mod config;
mod engine;
mod heightmap_io;
mod hypo;
mod mesh;
mod node_id;
mod pool;
mod quality;
mod splitmerge;
mod variance;
// ----------------------------------------------------------------------------
pub use callbacks::Callbacks;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::Engine;
pub use heightmap_io::Heightmap;
pub use pool::BinTriPool;
