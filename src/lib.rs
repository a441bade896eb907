pub mod bot_command_handlers;
pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod errors;
pub mod navigator;
pub mod screen_registry;
pub mod screens;
pub mod shared_main;
