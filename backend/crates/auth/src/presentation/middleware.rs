//! Auth Middleware
//!
//! `require_auth` guards protected routes:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/analyze", post(analyze))
//!     .route_layer(axum::middleware::from_fn_with_state(state, require_auth::<R>));
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Reject requests without a valid session cookie.
///
/// On success the [`AuthenticatedUser`](crate::application::AuthenticatedUser)
/// is available to handlers via `Extension`.
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(token.as_deref()).await?;

    tracing::debug!(user_id = %user.user_id, "Authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
