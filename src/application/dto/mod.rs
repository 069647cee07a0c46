//! # Data Transfer Objects

pub mod export_config;
