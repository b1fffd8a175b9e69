pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod machines;
pub mod seed;
pub mod state;
pub mod telemetry;
