// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;

pub mod classify;
pub mod data;
pub mod decide;
pub mod duration;
pub mod extract;
pub mod file;
pub mod params;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod util;
