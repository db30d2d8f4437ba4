//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, info, warn};

use crate::{
    events::{
        DonationWebhook, EventSubMessage, TwitchEvent, TwitchMessageType,
        TWITCH_MESSAGE_TYPE_HEADER,
    },
    state::AppState,
};
use super::responses::{
    ApiResponse, HealthResponse, MinutesRequest, StatusResponse, TimeResponse,
};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// 400 response carrying the current timer view
fn bad_request(state: &AppState, message: &str) -> (StatusCode, Json<ApiResponse>) {
    warn!("Rejected request: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message.to_string(), state.timer.snapshot())),
    )
}

/// Handle GET /api/time - Current countdown for the control panel
pub async fn api_time_handler(State(state): State<Arc<AppState>>) -> Json<TimeResponse> {
    Json(TimeResponse {
        status: "ok".to_string(),
        timer: state.timer.snapshot(),
    })
}

/// Handle GET /overlay - Same text as the overlay file, for browser sources
pub async fn overlay_handler(State(state): State<Arc<AppState>>) -> String {
    state.timer.snapshot().display
}

/// Handle POST /add_time - Add a positive number of minutes
pub async fn add_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> HandlerResult {
    if request.minutes <= 0 {
        return Err(bad_request(&state, "Minutes must be positive"));
    }

    state.timer.add_time(request.minutes);
    state.record_action("add_time");

    Ok(Json(
        ApiResponse::ok(
            format!("Added {} minutes", request.minutes),
            state.timer.snapshot(),
        )
        .with_minutes(request.minutes),
    ))
}

/// Handle POST /set_time - Set the remaining time to a positive number of minutes
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> HandlerResult {
    if request.minutes <= 0 {
        return Err(bad_request(&state, "Minutes must be positive"));
    }

    state.timer.set_time(request.minutes);
    state.record_action("set_time");

    Ok(Json(
        ApiResponse::ok(
            format!("Timer set to {} minutes", request.minutes),
            state.timer.snapshot(),
        )
        .with_minutes(request.minutes),
    ))
}

/// Handle POST /pause - Freeze the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let changed = state.timer.pause();
    if changed {
        state.record_action("pause");
    }

    let message = if changed { "Timer paused" } else { "Timer was already paused" };
    Json(ApiResponse::new("paused", message.to_string(), state.timer.snapshot()).with_changed(changed))
}

/// Handle POST /resume - Restart the countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let changed = state.timer.resume();
    if changed {
        state.record_action("resume");
    }

    let message = if changed { "Timer resumed" } else { "Timer was already running" };
    Json(ApiResponse::new("resumed", message.to_string(), state.timer.snapshot()).with_changed(changed))
}

/// Handle POST /webhook - Streamlabs donations
pub async fn donation_handler(
    State(state): State<Arc<AppState>>,
    Json(webhook): Json<DonationWebhook>,
) -> Json<ApiResponse> {
    let mut total = 0i64;

    for donation in &webhook.message {
        let minutes = state
            .policy
            .donation_minutes(donation.amount, &donation.currency);

        if minutes <= 0 {
            debug!(
                "Donation from {} of {} {} earns no time",
                donation.donor(),
                donation.amount,
                donation.currency
            );
            continue;
        }

        info!(
            "Donation: {} donated {} {} -> +{} min",
            donation.donor(),
            donation.amount,
            donation.currency,
            minutes
        );
        if let Some(message) = donation.message.as_deref().filter(|m| !m.is_empty()) {
            debug!("Donation message: {}", message);
        }

        state.timer.add_time(minutes);
        total = total.saturating_add(minutes);
    }

    if total > 0 {
        state.record_action("donation");
    }

    Json(
        ApiResponse::ok(
            format!("Processed {} donation(s)", webhook.message.len()),
            state.timer.snapshot(),
        )
        .with_minutes(total),
    )
}

/// Handle POST /twitch - EventSub verification and notifications
pub async fn twitch_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(message): Json<EventSubMessage>,
) -> Response {
    let message_type = TwitchMessageType::from_header(
        headers
            .get(TWITCH_MESSAGE_TYPE_HEADER)
            .and_then(|value| value.to_str().ok()),
    );

    match message_type {
        TwitchMessageType::Verification => match message.challenge {
            Some(challenge) => {
                info!("Answering EventSub verification for {}", message.subscription.kind);
                (StatusCode::OK, challenge).into_response()
            }
            None => bad_request(&state, "Verification without challenge").into_response(),
        },
        TwitchMessageType::Revocation => {
            warn!("EventSub subscription {} revoked", message.subscription.kind);
            Json(ApiResponse::ok(
                "Revocation acknowledged".to_string(),
                state.timer.snapshot(),
            ))
            .into_response()
        }
        TwitchMessageType::Unknown(kind) => {
            debug!("Ignoring EventSub message type {}", kind);
            Json(ApiResponse::ok(
                format!("Ignored message type {}", kind),
                state.timer.snapshot(),
            ))
            .into_response()
        }
        TwitchMessageType::Notification => {
            let event = message.event_kind();
            let minutes = state.policy.twitch_minutes(&event);
            let channel = message.channel();

            match &event {
                TwitchEvent::Subscribe => info!("Subscription on {} -> +{} min", channel, minutes),
                TwitchEvent::Cheer { bits } => {
                    info!("{} bits on {} -> +{} min", bits, channel, minutes)
                }
                TwitchEvent::Other(kind) => debug!("Ignoring EventSub event {}", kind),
            }

            if minutes > 0 {
                state.timer.add_time(minutes);
                state.record_action(event.action());
            }

            Json(
                ApiResponse::ok(
                    format!("Processed {}", message.subscription.kind),
                    state.timer.snapshot(),
                )
                .with_minutes(minutes.max(0)),
            )
            .into_response()
        }
    }
}

/// Handle GET /status - Timer and server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.timer.snapshot(),
        overlay_path: state.timer.overlay().path().display().to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(&state.timer.snapshot()))
}
