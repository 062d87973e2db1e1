mod handlers;
pub mod models;
mod query_logs;
mod rejections;
mod resources;
pub mod routes;
