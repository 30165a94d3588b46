//! Application layer: port traits, domain events, screen layout, and the
//! control-loop service that ties the session state machine to the video
//! pipeline.

pub mod events;
pub mod ports;
pub mod screens;
pub mod service;
