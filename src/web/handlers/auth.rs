//! Member handlers and shared application state.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::auth::{authenticate, signup as register_member, SignupRequest as NewSignup};
use crate::board::BoardService;
use crate::db::{Member, MemberRepository};
use crate::storage::ImageStore;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, MemberResponse, SignupRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;
use crate::Database;

/// Default multipart upload limit (10 MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Store for uploaded post images.
    pub images: Arc<dyn ImageStore>,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Maximum accepted request body for uploads, in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        images: Arc<dyn ImageStore>,
        jwt_secret: &str,
        access_expiry: u64,
    ) -> Self {
        Self {
            db,
            images,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the maximum upload size in bytes.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Board service over this state's database and image store.
    pub fn board(&self) -> BoardService<'_> {
        BoardService::new(&self.db, self.images.as_ref())
    }

    /// Load the member a token was issued to.
    ///
    /// A token for a member that no longer exists is treated as invalid.
    pub async fn member(&self, claims: &JwtClaims) -> Result<Member, ApiError> {
        let mut conn = self.db.acquire().await?;
        MemberRepository::new(&mut conn)
            .get_by_id(claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))
    }

    /// Load the viewer for optional-auth endpoints.
    pub async fn viewer(&self, claims: Option<&JwtClaims>) -> Result<Option<Member>, ApiError> {
        let Some(claims) = claims else {
            return Ok(None);
        };
        let mut conn = self.db.acquire().await?;
        Ok(MemberRepository::new(&mut conn).get_by_id(claims.sub).await?)
    }

    /// Generate an access token for a member.
    pub fn generate_access_token(&self, member: &Member) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: member.id,
            username: member.username.clone(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }
}

/// POST /member/signup - Register a new member.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, ApiError> {
    let mut request = NewSignup::new(req.username, req.password, req.name);
    if let Some(image) = req.image {
        request = request.with_image(image);
    }

    let member = {
        let mut conn = state.db.acquire().await?;
        register_member(&mut conn, request).await?
    };

    Ok(Json(ApiResponse::new(MemberResponse::from(member))))
}

/// POST /member/login - Exchange credentials for an access token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let member = {
        let mut conn = state.db.acquire().await?;
        authenticate(&mut conn, &req.username, &req.password).await?
    };

    let access_token = state.generate_access_token(&member)?;

    let response = LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.access_token_expiry,
        member: MemberResponse::from(member),
    };

    Ok(Json(ApiResponse::new(response)))
}
