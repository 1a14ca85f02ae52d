pub mod args;
pub mod audit;
pub mod cli;
pub mod coda_api;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod report;
pub mod terminal;
