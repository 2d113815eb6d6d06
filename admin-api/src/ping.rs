use crate::envelope::Envelope;
use crate::state::AppState;
use axum::extract::State;
use chrono::SecondsFormat;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize, PartialEq)]
pub struct Pong {
    pub message: &'static str,
    pub timestamp: String,
    pub service: String,
}

pub async fn ping_handler(State(state): State<Arc<AppState>>) -> Envelope<Pong> {
    Envelope::success(Pong {
        message: "pong",
        timestamp: state
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Secs, false),
        service: state.service_name.clone(),
    })
}
