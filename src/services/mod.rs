// Service module exports

pub mod api;
pub mod board;
pub mod countdown;
pub mod creators;
pub mod settings;
