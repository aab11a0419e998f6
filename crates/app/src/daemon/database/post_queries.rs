//! Post write service and post read projections.
//!
//! A post's category set is exactly its `post_categories` rows. Every write
//! that touches those rows runs in a single transaction together with the
//! post row itself, so readers observe either the old or the new
//! association set and a failed write commits nothing.

use std::collections::{HashMap, HashSet};

use common::prelude::{CategoryRef, CoverImage, Post, PostDraft, PostDraftError};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use uuid::Uuid;

use super::{decode_timestamp, decode_uuid, now_micros, Database};

#[derive(Debug, thiserror::Error)]
pub enum PostWriteError {
    #[error("invalid post: {0}")]
    Invalid(#[from] PostDraftError),
    #[error("unknown category: {}", format_ids(.0))]
    UnknownCategories(Vec<Uuid>),
    #[error("post not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn format_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// What remains of a post after it has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedPost {
    pub id: Uuid,
    pub title: String,
}

const POST_COLUMNS: &str = "p.id, p.title, p.content, p.cover_image_key, p.shop_name, \
     p.business_hours, p.phone_number, p.created_at, p.updated_at";

fn post_from_row(row: &SqliteRow, categories: Vec<CategoryRef>) -> Result<Post, sqlx::Error> {
    let cover_image_key: String = row.try_get("cover_image_key")?;
    Ok(Post {
        id: decode_uuid(row.try_get("id")?)?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        cover_image: CoverImage::for_key(cover_image_key.clone()),
        cover_image_key,
        shop_name: row.try_get("shop_name")?,
        business_hours: row.try_get("business_hours")?,
        phone_number: row.try_get("phone_number")?,
        categories,
        created_at: decode_timestamp(row.try_get("created_at")?)?,
        updated_at: decode_timestamp(row.try_get("updated_at")?)?,
    })
}

/// Look up every requested category. Fails without side effects if any is missing.
async fn resolve_categories(
    conn: &mut SqliteConnection,
    ids: &[Uuid],
) -> Result<Vec<CategoryRef>, PostWriteError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name FROM categories WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.to_string());
    }
    separated.push_unseparated(") ORDER BY name ASC");

    let rows = query.build().fetch_all(&mut *conn).await?;
    let found = rows
        .iter()
        .map(|row| {
            Ok(CategoryRef {
                id: decode_uuid(row.try_get("id")?)?,
                name: row.try_get("name")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    let known: HashSet<Uuid> = found.iter().map(|c| c.id).collect();
    let missing: Vec<Uuid> = ids.iter().filter(|id| !known.contains(id)).copied().collect();
    if !missing.is_empty() {
        return Err(PostWriteError::UnknownCategories(missing));
    }

    Ok(found)
}

async fn link_categories(
    conn: &mut SqliteConnection,
    post_id: &str,
    category_ids: &[Uuid],
    now: i64,
) -> Result<(), sqlx::Error> {
    for category_id in category_ids {
        sqlx::query(
            r#"
            INSERT INTO post_categories (post_id, category_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(post_id)
        .bind(category_id.to_string())
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Resolved categories for each of `post_ids`, ordered by category name.
async fn categories_by_post(
    conn: &mut SqliteConnection,
    post_ids: &[String],
) -> Result<HashMap<Uuid, Vec<CategoryRef>>, sqlx::Error> {
    let mut by_post: HashMap<Uuid, Vec<CategoryRef>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(by_post);
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT pc.post_id, c.id, c.name \
         FROM post_categories pc \
         JOIN categories c ON c.id = pc.category_id \
         WHERE pc.post_id IN (",
    );
    let mut separated = query.separated(", ");
    for id in post_ids {
        separated.push_bind(id.as_str());
    }
    separated.push_unseparated(") ORDER BY c.name ASC");

    for row in query.build().fetch_all(&mut *conn).await? {
        let post_id = decode_uuid(row.try_get("post_id")?)?;
        by_post.entry(post_id).or_default().push(CategoryRef {
            id: decode_uuid(row.try_get("id")?)?,
            name: row.try_get("name")?,
        });
    }

    Ok(by_post)
}

async fn posts_with_categories(
    conn: &mut SqliteConnection,
    rows: Vec<SqliteRow>,
) -> Result<Vec<Post>, sqlx::Error> {
    let ids = rows
        .iter()
        .map(|row| row.try_get::<String, _>("id"))
        .collect::<Result<Vec<_>, _>>()?;
    let mut categories = categories_by_post(conn, &ids).await?;

    rows.iter()
        .map(|row| {
            let id = decode_uuid(row.try_get("id")?)?;
            post_from_row(row, categories.remove(&id).unwrap_or_default())
        })
        .collect()
}

impl Database {
    /// List posts, newest first, optionally only those in `category`.
    pub async fn list_posts(&self, category: Option<&Uuid>) -> Result<Vec<Post>, sqlx::Error> {
        // One snapshot for the posts and their join rows
        let mut tx = self.begin().await?;

        let rows = match category {
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM posts p ORDER BY p.created_at DESC, p.rowid DESC",
                    POST_COLUMNS
                ))
                .fetch_all(&mut *tx)
                .await?
            }
            Some(category_id) => {
                sqlx::query(&format!(
                    "SELECT {} FROM posts p \
                     WHERE EXISTS ( \
                         SELECT 1 FROM post_categories pc \
                         WHERE pc.post_id = p.id AND pc.category_id = ?1 \
                     ) \
                     ORDER BY p.created_at DESC, p.rowid DESC",
                    POST_COLUMNS
                ))
                .bind(category_id.to_string())
                .fetch_all(&mut *tx)
                .await?
            }
        };

        let posts = posts_with_categories(&mut tx, rows).await?;
        tx.commit().await?;
        Ok(posts)
    }

    /// Get a post by ID with its categories
    pub async fn get_post(&self, id: &Uuid) -> Result<Option<Post>, sqlx::Error> {
        let mut tx = self.begin().await?;

        let row = sqlx::query(&format!("SELECT {} FROM posts p WHERE p.id = ?1", POST_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;

        let post = match row {
            Some(row) => posts_with_categories(&mut tx, vec![row]).await?.pop(),
            None => None,
        };

        tx.commit().await?;
        Ok(post)
    }

    /// Create a post and its category associations atomically.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, PostWriteError> {
        let draft = draft.normalize()?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = now_micros();

        let mut tx = self.begin_write().await?;
        let categories = resolve_categories(&mut tx, &draft.category_ids).await?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, title, content, cover_image_key, shop_name,
                business_hours, phone_number, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
        )
        .bind(&id_str)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.cover_image_key)
        .bind(&draft.shop_name)
        .bind(&draft.business_hours)
        .bind(&draft.phone_number)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        link_categories(&mut tx, &id_str, &draft.category_ids, now).await?;
        tx.commit().await?;

        let timestamp = decode_timestamp(now)?;
        Ok(Post {
            id,
            title: draft.title,
            content: draft.content,
            cover_image: CoverImage::for_key(draft.cover_image_key.clone()),
            cover_image_key: draft.cover_image_key,
            shop_name: draft.shop_name,
            business_hours: draft.business_hours,
            phone_number: draft.phone_number,
            categories,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Replace a post's fields and category set atomically.
    ///
    /// Old associations are deleted and the new ones inserted inside the same
    /// transaction as the field update.
    pub async fn update_post(&self, id: &Uuid, draft: PostDraft) -> Result<Post, PostWriteError> {
        let draft = draft.normalize()?;
        let id_str = id.to_string();
        let now = now_micros();

        let mut tx = self.begin_write().await?;

        let created_at: i64 = sqlx::query_scalar("SELECT created_at FROM posts WHERE id = ?1")
            .bind(&id_str)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PostWriteError::NotFound(*id))?;

        let categories = resolve_categories(&mut tx, &draft.category_ids).await?;

        sqlx::query("DELETE FROM post_categories WHERE post_id = ?1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE posts
            SET title = ?1, content = ?2, cover_image_key = ?3, shop_name = ?4,
                business_hours = ?5, phone_number = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.cover_image_key)
        .bind(&draft.shop_name)
        .bind(&draft.business_hours)
        .bind(&draft.phone_number)
        .bind(now)
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        link_categories(&mut tx, &id_str, &draft.category_ids, now).await?;
        tx.commit().await?;

        Ok(Post {
            id: *id,
            title: draft.title,
            content: draft.content,
            cover_image: CoverImage::for_key(draft.cover_image_key.clone()),
            cover_image_key: draft.cover_image_key,
            shop_name: draft.shop_name,
            business_hours: draft.business_hours,
            phone_number: draft.phone_number,
            categories,
            created_at: decode_timestamp(created_at)?,
            updated_at: decode_timestamp(now)?,
        })
    }

    /// Delete a post and its category associations atomically.
    pub async fn delete_post(&self, id: &Uuid) -> Result<DeletedPost, PostWriteError> {
        let id_str = id.to_string();
        let mut tx = self.begin_write().await?;

        let title: String = sqlx::query_scalar("SELECT title FROM posts WHERE id = ?1")
            .bind(&id_str)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PostWriteError::NotFound(*id))?;

        sqlx::query("DELETE FROM post_categories WHERE post_id = ?1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DeletedPost { id: *id, title })
    }
}
