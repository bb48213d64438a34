// API routes and handlers

pub mod auth;
pub mod health;
pub mod routes;
pub mod workouts;
