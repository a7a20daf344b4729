use crate::{
    auth::{
        hash_password, verify_password, AuthResponse, CurrentUser, LoginRequest, RegisterRequest,
        TokenService,
    },
    error::AppError,
    models::user::{Role, UserResponse},
    store::UserStore,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. The first account ever created is granted the
/// admin role; every later account is a regular user.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if username already exists
    if users
        .find_by_username(&register_data.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // The very first account gets the admin role.
    let role = if users.count().await? == 0 {
        Role::Admin
    } else {
        Role::User
    };

    let user = users
        .create(&register_data.username, &password_hash, role)
        .await?;

    log::info!("Registered user {} with role {:?}", user.username, user.role);

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login user
///
/// Authenticates a user and returns a bearer token.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = users.find_by_username(&login_data.username).await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash) {
                let token = tokens.issue(&user.username)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user_id: user.id,
                }))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        // Same answer for an unknown username as for a wrong password.
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}

/// Returns the account behind the presented bearer token.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}
