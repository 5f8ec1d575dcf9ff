//! Keeps a terminal view of the news backend's corporate announcements in
//! sync: an initial load, periodic polling and a two-phase manual refresh.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod present;
pub mod services;
pub mod sources;
pub mod storage;
