//! Breed Service - Pet breed disease registry with similarity-based risk analysis.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod services;
pub mod startup;
