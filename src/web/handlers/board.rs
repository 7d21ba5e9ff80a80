//! Board handlers for the HTTP API.

use axum::{
    extract::{rejection::QueryRejection, Multipart, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::board::{Category, ImageUpload, Pagination, PostSummary, PostUpdate};
use crate::web::dto::{
    ApiResponse, CategoryPageQuery, CategoryQuery, HeartResponse, MessageResponse,
    PaginatedResponse, PostCreatedResponse, PostDetailResponse, PostSummaryResponse,
    UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

fn summaries(posts: Vec<PostSummary>) -> Vec<PostSummaryResponse> {
    posts.into_iter().map(PostSummaryResponse::from).collect()
}

fn query_error(e: QueryRejection) -> ApiError {
    ApiError::bad_request(e.body_text())
}

/// GET /board/recent - The five most recent posts.
pub async fn recent_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PostSummaryResponse>>>, ApiError> {
    let posts = state.board().recent_posts().await?;
    Ok(Json(ApiResponse::new(summaries(posts))))
}

/// GET /board/recent-category?category=X - The five most recent posts in a category.
pub async fn recent_posts_by_category(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CategoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<PostSummaryResponse>>>, ApiError> {
    let Query(query) = query.map_err(query_error)?;
    let posts = state
        .board()
        .recent_posts_by_category(query.category)
        .await?;
    Ok(Json(ApiResponse::new(summaries(posts))))
}

/// GET /board/category?category=X[&page=N&per_page=M] - Posts in a category.
///
/// Without paging parameters every post in the category is returned.
pub async fn posts_by_category(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CategoryPageQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(query_error)?;
    let service = state.board();

    match query.page() {
        None => {
            let posts = service.posts_by_category(query.category).await?;
            Ok(Json(ApiResponse::new(summaries(posts))).into_response())
        }
        Some((page, per_page)) => {
            let result = service
                .posts_by_category_paginated(query.category, Pagination::page(page, per_page))
                .await?;
            let total = result.total.max(0) as u64;
            let response = PaginatedResponse::new(summaries(result.items), page, per_page, total);
            Ok(Json(response).into_response())
        }
    }
}

/// GET /board/:id - Post detail with comments.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let viewer = state.viewer(auth.as_ref()).await?;
    let detail = state.board().get_post(post_id, viewer.as_ref()).await?;
    Ok(Json(ApiResponse::new(PostDetailResponse::from(detail))))
}

/// POST /board - Create a post.
///
/// Request body: multipart/form-data with "title", "content", "category"
/// and an "image" file.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PostCreatedResponse>>, ApiError> {
    let author = state.member(&claims).await?;

    let mut title: Option<String> = None;
    let mut content: Option<String> = None;
    let mut category: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!("Failed to read image: {}", e);
                    ApiError::bad_request("Failed to read image")
                })?;
                image = Some(ImageUpload::new(file_name, bytes.to_vec()));
            }
            "title" | "content" | "category" => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request(format!("Invalid {name}")))?;
                match name.as_str() {
                    "title" => title = Some(text),
                    "content" => content = Some(text),
                    _ => category = Some(text),
                }
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| ApiError::unprocessable("title is required"))?;
    let content = content.ok_or_else(|| ApiError::unprocessable("content is required"))?;
    let category: Category = category
        .ok_or_else(|| ApiError::unprocessable("category is required"))?
        .parse::<Category>()
        .map_err(ApiError::unprocessable)?;
    let image = image.ok_or_else(|| ApiError::unprocessable("image is required"))?;

    let post = state
        .board()
        .create_post(&author, &title, &content, category, image)
        .await?;

    Ok(Json(ApiResponse::new(PostCreatedResponse {
        id: post.id,
        message: "Post created".to_string(),
    })))
}

/// PUT /board/:id - Update a post (writer only).
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let actor = state.member(&claims).await?;
    let update: PostUpdate = req.into();
    state.board().update_post(post_id, &update, &actor).await?;
    Ok(Json(ApiResponse::new(MessageResponse::new("Post updated"))))
}

/// DELETE /board/:id - Delete a post (writer only).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let actor = state.member(&claims).await?;
    state.board().delete_post(post_id, &actor).await?;
    Ok(Json(ApiResponse::new(MessageResponse::new("Post deleted"))))
}

/// POST /board/:id/heart - Toggle the caller's like on a post.
pub async fn toggle_heart(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<HeartResponse>>, ApiError> {
    let member = state.member(&claims).await?;
    let toggle = state.board().toggle_heart(post_id, &member).await?;
    Ok(Json(ApiResponse::new(HeartResponse::from(toggle))))
}
