pub mod actions;
pub mod ai;
pub mod combat;
pub mod command;
pub mod config;
pub mod dodge;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod projectile;
pub mod round;
pub mod sprite;
