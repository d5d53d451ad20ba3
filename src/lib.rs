pub mod assets;
pub mod config;
pub mod demo;
pub mod renderer;
pub mod scope;
pub mod world;
