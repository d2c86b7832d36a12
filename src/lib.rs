#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod regulator;
pub mod shadow;
pub mod skill;
pub mod telemetry;

pub use config::Config;
pub use error::{NidoError, Result};
