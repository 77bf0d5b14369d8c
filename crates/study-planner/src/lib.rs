pub mod auth;
pub mod budget;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod currency;
pub mod error;
pub mod journey;
pub mod telemetry;
pub mod validation;
