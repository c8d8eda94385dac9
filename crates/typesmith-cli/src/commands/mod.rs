pub mod dump;
pub mod self_modules;
pub mod server_typings;
