//! Steam game recommender
//!
//! Tool server that lets an assistant search the Steam catalog and ask for
//! curated recommendations by discount, budget, taste, recency or sub-genre.

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
