pub mod api;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod generators;
pub mod google;
pub mod models;
pub mod orchestrator;
pub mod process;
pub mod prompts;
pub mod render;
pub mod routing;
pub mod session;
pub mod storage;
pub mod tools;
pub mod ui;
