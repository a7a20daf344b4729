use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::error::AppError;
use crate::models::user::User;
use crate::store::UserStore;

/// The username carried by a verified bearer token.
///
/// Inserted into request extensions by
/// [`AuthMiddleware`](super::AuthMiddleware) after token verification.
#[derive(Debug, Clone)]
pub struct AuthenticatedUsername(pub String);

/// Resolves the verified token subject to a full [`User`] record.
///
/// This extractor is intended for routes protected by `AuthMiddleware`. It
/// looks the username up in the [`UserStore`]; if the user no longer exists
/// (purged after the token was issued) the request is rejected with 401,
/// the same as any other authentication failure.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError is converted into ActixError via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let username = req
            .extensions()
            .get::<AuthenticatedUsername>()
            .map(|subject| subject.0.clone());
        let users = req.app_data::<web::Data<UserStore>>().cloned();

        Box::pin(async move {
            let username = match username {
                Some(username) => username,
                // Only reachable if the middleware did not run for this route.
                None => return Err(AppError::Unauthorized("Missing token".into()).into()),
            };
            let users = match users {
                Some(users) => users,
                None => {
                    return Err(
                        AppError::InternalServerError("User store not configured".into()).into(),
                    )
                }
            };

            match users.find_by_username(&username).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => Err(AppError::Unauthorized("Unknown user".into()).into()),
            }
        })
    }
}
