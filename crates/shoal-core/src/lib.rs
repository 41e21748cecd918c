pub mod agent;
pub mod animation;
pub mod aquarium;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod instance;
pub mod regime;
pub mod school;
pub mod target;

pub use agent::*;
pub use animation::*;
pub use aquarium::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use geometry::*;
pub use instance::*;
pub use regime::*;
pub use school::*;
pub use target::*;

pub use glam;
