//! Comment handlers for the HTTP API.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{
    ApiResponse, CommentResponse, CreateCommentRequest, MessageResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// POST /board/:id/comment - Comment on a post.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<Json<ApiResponse<CommentResponse>>, ApiError> {
    let author = state.member(&claims).await?;
    let comment = state
        .board()
        .add_comment(post_id, &req.content, &author)
        .await?;
    Ok(Json(ApiResponse::new(CommentResponse::written_by(
        comment, &author,
    ))))
}

/// DELETE /comment/:id - Delete one's own comment.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let actor = state.member(&claims).await?;
    state.board().delete_comment(comment_id, &actor).await?;
    Ok(Json(ApiResponse::new(MessageResponse::new("Comment deleted"))))
}
