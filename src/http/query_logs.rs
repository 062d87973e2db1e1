use std::time::Instant;

use tracing::{error, info, warn};

use crate::Status;

/// Structured log line emitted once per handled request.
pub struct QueryEvent {
    method: &'static str,
    url: String,
    handler: &'static str,
    start: Instant,
}

impl QueryEvent {
    pub fn new(method: &'static str, url: impl Into<String>, handler: &'static str) -> Self {
        QueryEvent {
            method,
            url: url.into(),
            handler,
            start: Instant::now(),
        }
    }

    pub fn log(self, response_size: usize) {
        info!(
            http_request.request_method = self.method,
            http_request.request_url = self.url,
            labels.log_type = QUERY_LOGS,
            labels.handler = self.handler,
            request.latency = self.start.elapsed().as_millis(),
            response.size = response_size,
            "{} {}",
            self.method,
            self.url
        )
    }

    pub fn log_error(self, status: &Status) {
        match status {
            Status::Internal(_) => error!(
                http_request.request_method = self.method,
                http_request.request_url = self.url,
                labels.log_type = QUERY_LOGS,
                labels.handler = self.handler,
                labels.status = status.to_string(),
                request.latency = self.start.elapsed().as_millis(),
                "{} {}",
                self.method,
                self.url
            ),
            _ => warn!(
                http_request.request_method = self.method,
                http_request.request_url = self.url,
                labels.log_type = QUERY_LOGS,
                labels.handler = self.handler,
                labels.status = status.to_string(),
                request.latency = self.start.elapsed().as_millis(),
                "{} {}",
                self.method,
                self.url
            ),
        }
    }
}

const QUERY_LOGS: &str = "query_logs";

pub const WELCOME_HANDLER: &str = "welcome";
pub const LIST_HANDLER: &str = "list_games";
pub const CREATE_HANDLER: &str = "create_game";
pub const GET_HANDLER: &str = "get_game";
pub const UPDATE_HANDLER: &str = "update_game";
pub const DELETE_HANDLER: &str = "delete_game";
pub const FAVORITE_HANDLER: &str = "toggle_favorite";
pub const STATS_HANDLER: &str = "stats";
pub const EXPORT_HANDLER: &str = "export";
