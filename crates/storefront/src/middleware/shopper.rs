//! Shopper extractor.
//!
//! Maps the session cookie to a [`Shopper`]. A session without a shopper ID
//! gets a fresh one on first use, which makes tower-sessions issue the cookie.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tokio::sync::Mutex;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::session::SHOPPER_ID;
use crate::state::{AppState, Shopper};

/// Extractor yielding the current session's shopper.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentShopper(shopper): CurrentShopper) -> impl IntoResponse {
///     let shopper = shopper.lock().await;
///     format!("{} items", shopper.cart.total_items())
/// }
/// ```
pub struct CurrentShopper(pub Arc<Mutex<Shopper>>);

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = shopper_id(&session).await?;
        Ok(Self(state.shopper(id).await))
    }
}

/// Read the shopper ID from the session, assigning a new one if absent.
async fn shopper_id(session: &Session) -> Result<Uuid, AppError> {
    // An unreadable value is treated like a missing one.
    if let Some(id) = session.get::<Uuid>(SHOPPER_ID).await.ok().flatten() {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session
        .insert(SHOPPER_ID, id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store shopper id: {e}")))?;
    tracing::debug!(shopper_id = %id, "New shopper");
    Ok(id)
}
