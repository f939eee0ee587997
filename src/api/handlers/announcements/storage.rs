//! SQL storage for the `announcement` table.
//!
//! Row operations take a `&mut PgConnection` so the caller decides the scope:
//! a pooled connection for reads, a transaction for writes.

use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use tracing::instrument;

use super::types::CreateAnnouncement;

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub id: i32,
    pub header: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub created_at: String,
}

/// Creates the `announcement` table if it does not exist yet.
///
/// # Errors
/// Returns an error if the DDL cannot be executed.
pub async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

/// Inserts a row and returns it with the storage-assigned `id` and `created_at`.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(conn))]
pub async fn insert(
    conn: &mut PgConnection,
    new: &CreateAnnouncement,
) -> Result<Announcement, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO announcement (header, description, owner)
        VALUES ($1, $2, $3)
        RETURNING id, header, description, owner,
            to_char(created_at, 'YYYY-MM-DD"T"HH24:MI:SS.US') AS created_at
        "#,
    )
    .bind(&new.header)
    .bind(&new.description)
    .bind(&new.owner)
    .fetch_one(&mut *conn)
    .await?;

    announcement_from_row(&row)
}

/// Fetches one row by primary key.
///
/// # Errors
/// Returns an error if the query fails.
#[instrument(skip(conn))]
pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Option<Announcement>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, header, description, owner,
            to_char(created_at, 'YYYY-MM-DD"T"HH24:MI:SS.US') AS created_at
        FROM announcement
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(announcement_from_row).transpose()
}

/// Writes the mutable columns of `record` back to its row.
///
/// # Errors
/// Returns an error if the update fails.
#[instrument(skip(conn))]
pub async fn update(conn: &mut PgConnection, record: &Announcement) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE announcement
        SET header = $2, description = $3, owner = $4
        WHERE id = $1
        ",
    )
    .bind(record.id)
    .bind(&record.header)
    .bind(&record.description)
    .bind(&record.owner)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Hard-deletes the row backing `record`.
///
/// # Errors
/// Returns an error if the delete fails.
#[instrument(skip(conn))]
pub async fn delete(conn: &mut PgConnection, record: &Announcement) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM announcement WHERE id = $1")
        .bind(record.id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

fn announcement_from_row(row: &PgRow) -> Result<Announcement, sqlx::Error> {
    Ok(Announcement {
        id: row.try_get("id")?,
        header: row.try_get("header")?,
        description: row.try_get("description")?,
        owner: row.try_get("owner")?,
        created_at: row.try_get("created_at")?,
    })
}
