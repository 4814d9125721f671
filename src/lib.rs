//! Parallax movie catalog service: personalized, content-based movie
//! recommendations over a relational catalog.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
