//! Portfolio API - REST backend for a personal portfolio site
//!
//! This library exposes the contact, blog and gallery record API together with
//! the storage layer it runs on.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
