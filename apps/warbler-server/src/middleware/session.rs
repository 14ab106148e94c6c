//! Session extractors and cookie helpers.
//!
//! The cookie only carries an opaque session id; the logged-in user is looked
//! up in the session store on every request.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use warbler_core::domain::User;

use crate::config::SessionConfig;
use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "warbler_session";

/// The logged-in user. Extracting it fails with 401 when there is no valid
/// session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session_id: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let session_id = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state =
                state.ok_or_else(|| AppError::Internal("AppState not configured".to_string()))?;
            let session_id = session_id.ok_or(AppError::Unauthorized)?;

            let session = state
                .sessions
                .load(&session_id)
                .await?
                .ok_or(AppError::Unauthorized)?;

            // The account may have been deleted from another session.
            let user = state
                .users
                .find(session.curr_user)
                .await?
                .ok_or(AppError::Unauthorized)?;

            Ok(CurrentUser { user, session_id })
        })
    }
}

/// The logged-in user, if any. Never rejects a request.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            match current.await {
                Ok(user) => Ok(MaybeUser(Some(user))),
                Err(AppError::Unauthorized) => Ok(MaybeUser(None)),
                Err(e) => {
                    tracing::warn!(error = %e, "Session lookup failed, treating as anonymous");
                    Ok(MaybeUser(None))
                }
            }
        })
    }
}

/// Cookie carrying `session_id`.
pub fn session_cookie(session_id: &str, config: &SessionConfig) -> Cookie<'static> {
    let max_age = i64::try_from(config.ttl.as_secs()).unwrap_or(i64::MAX);

    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(CookieDuration::seconds(max_age))
        .finish()
}

/// Cookie that clears the session cookie in the browser.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig {
            ttl: Duration::from_secs(3600),
            cookie_secure: true,
        };

        let cookie = session_cookie("abc", &config);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(3600)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
