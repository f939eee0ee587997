//! Announcement CRUD handlers.
//!
//! Each handler validates its payload first, then opens one scoped storage
//! session: a pooled connection for reads, a transaction for writes. Dropping
//! the transaction on any error path rolls it back.

pub mod storage;
pub mod types;
pub mod validate;


use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Extension, Path},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use self::{
    storage::Announcement,
    types::{
        AnnouncementResponse, CreateAnnouncement, CreatedAnnouncement, PatchAnnouncement,
        StatusResponse,
    },
    validate::validate,
};
use crate::api::error::{ApiError, ErrorResponse};

/// Resolves the `{id}` path segment. Only plain decimal digits that fit in an
/// `i32` can name a row; anything else is reported as not found.
fn announcement_id(id: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = id.map_err(|rejection| {
        debug!("Unmatched announcement id: {rejection}");
        ApiError::NotFound
    })?;

    parse_id(&raw).ok_or_else(|| {
        debug!("Unmatched announcement id: {raw}");
        ApiError::NotFound
    })
}

fn parse_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

async fn fetch_announcement(conn: &mut PgConnection, id: i32) -> Result<Announcement, ApiError> {
    storage::get(conn, id).await?.ok_or(ApiError::NotFound)
}

#[utoipa::path(
    post,
    path = "/announcements/",
    request_body = CreateAnnouncement,
    responses(
        (status = 201, description = "Announcement created.", body = CreatedAnnouncement),
        (status = 400, description = "Invalid payload.", body = ErrorResponse),
    ),
    tag = "announcements"
)]
/// Creates an announcement; storage assigns `id` and `created_at`.
#[instrument(skip_all)]
pub async fn create_announcement(
    pool: Extension<PgPool>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: CreateAnnouncement = validate(&body)?;

    let mut tx = pool.begin().await?;
    let record = storage::insert(&mut tx, &payload).await?;
    tx.commit().await?;

    debug!("Created announcement {}", record.id);

    let location = format!("/announcements/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(CreatedAnnouncement::from(record)),
    ))
}

#[utoipa::path(
    get,
    path = "/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement detail.", body = AnnouncementResponse),
        (status = 404, description = "Announcement not found.", body = ErrorResponse),
    ),
    tag = "announcements"
)]
/// Fetches one announcement by id. The response body does not echo the id.
#[instrument(skip_all)]
pub async fn get_announcement(
    id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> Result<Json<AnnouncementResponse>, ApiError> {
    let id = announcement_id(id)?;

    let mut conn = pool.acquire().await?;
    let record = fetch_announcement(&mut conn, id).await?;

    Ok(Json(record.into()))
}

#[utoipa::path(
    patch,
    path = "/announcements/{id}",
    request_body = PatchAnnouncement,
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement updated.", body = StatusResponse),
        (status = 400, description = "Invalid payload.", body = ErrorResponse),
        (status = 404, description = "Announcement not found.", body = ErrorResponse),
    ),
    tag = "announcements"
)]
/// Applies a partial update. Each non-empty field replaces its own column.
#[instrument(skip_all)]
pub async fn patch_announcement(
    id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let id = announcement_id(id)?;
    let patch: PatchAnnouncement = validate(&body)?;

    let mut tx = pool.begin().await?;
    let mut record = fetch_announcement(&mut tx, id).await?;
    patch.apply_to(&mut record);
    storage::update(&mut tx, &record).await?;
    tx.commit().await?;

    Ok(Json(StatusResponse::success()))
}

#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement deleted.", body = StatusResponse),
        (status = 404, description = "Announcement not found.", body = ErrorResponse),
    ),
    tag = "announcements"
)]
/// Hard-deletes one announcement.
#[instrument(skip_all)]
pub async fn delete_announcement(
    id: Result<Path<String>, PathRejection>,
    pool: Extension<PgPool>,
) -> Result<Json<StatusResponse>, ApiError> {
    let id = announcement_id(id)?;

    let mut tx = pool.begin().await?;
    let record = fetch_announcement(&mut tx, id).await?;
    storage::delete(&mut tx, &record).await?;
    tx.commit().await?;

    Ok(Json(StatusResponse::success()))
}
