use common::prelude::{Category, CategoryName};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{decode_timestamp, decode_uuid, now_micros, Database};

#[derive(Debug, thiserror::Error)]
pub enum CategoryWriteError {
    #[error("category not found: {0}")]
    NotFound(Uuid),
    #[error("category name already exists: {0}")]
    DuplicateName(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for CategoryWriteError {
    fn from(err: sqlx::Error) -> Self {
        CategoryWriteError::Database(err)
    }
}

fn category_from_row(row: &SqliteRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: decode_uuid(row.try_get("id")?)?,
        name: row.try_get("name")?,
        created_at: decode_timestamp(row.try_get("created_at")?)?,
        updated_at: decode_timestamp(row.try_get("updated_at")?)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl Database {
    /// List all categories ordered by name
    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&**self)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    /// Get a category by ID
    pub async fn get_category(&self, id: &Uuid) -> Result<Option<Category>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&**self)
        .await?;

        row.as_ref().map(category_from_row).transpose()
    }

    /// Create a new category
    pub async fn create_category(&self, name: &CategoryName) -> Result<Category, CategoryWriteError> {
        let id = Uuid::new_v4();
        let now = now_micros();

        let result = sqlx::query(
            r#"
            INSERT INTO categories (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(id.to_string())
        .bind(name.as_str())
        .bind(now)
        .execute(&**self)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CategoryWriteError::DuplicateName(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Category {
            id,
            name: name.to_string(),
            created_at: decode_timestamp(now)?,
            updated_at: decode_timestamp(now)?,
        })
    }

    /// Rename a category
    pub async fn update_category(
        &self,
        id: &Uuid,
        name: &CategoryName,
    ) -> Result<Category, CategoryWriteError> {
        let now = now_micros();

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?1, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(name.as_str())
        .bind(now)
        .bind(id.to_string())
        .execute(&**self)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if is_unique_violation(&e) => {
                return Err(CategoryWriteError::DuplicateName(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        if result.rows_affected() == 0 {
            return Err(CategoryWriteError::NotFound(*id));
        }

        self.get_category(id)
            .await?
            .ok_or(CategoryWriteError::NotFound(*id))
    }

    /// Delete a category together with its post associations.
    ///
    /// Posts that referenced the category are kept.
    pub async fn delete_category(&self, id: &Uuid) -> Result<Category, CategoryWriteError> {
        let id_str = id.to_string();
        let mut tx = self.begin_write().await?;

        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(&id_str)
        .fetch_optional(&mut *tx)
        .await?;

        let category = match row {
            Some(row) => category_from_row(&row)?,
            None => return Err(CategoryWriteError::NotFound(*id)),
        };

        sqlx::query("DELETE FROM post_categories WHERE category_id = ?1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> CategoryName {
        CategoryName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_sorted_by_name() {
        let db = Database::in_memory().await.unwrap();
        db.create_category(&name("洋菓子店")).await.unwrap();
        db.create_category(&name("カフェ")).await.unwrap();
        db.create_category(&name("プリン")).await.unwrap();

        let names: Vec<String> = db
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_rejected() {
        let db = Database::in_memory().await.unwrap();
        let first = db.create_category(&name("プリン")).await.unwrap();
        let other = db.create_category(&name("カフェ")).await.unwrap();

        let err = db.create_category(&name("プリン")).await.unwrap_err();
        assert!(matches!(err, CategoryWriteError::DuplicateName(_)));

        let err = db
            .update_category(&other.id, &name("プリン"))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryWriteError::DuplicateName(_)));

        // renaming to its own name is fine
        let same = db.update_category(&first.id, &name("プリン")).await.unwrap();
        assert_eq!(same.id, first.id);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_category() {
        let db = Database::in_memory().await.unwrap();
        let missing = Uuid::new_v4();

        let err = db
            .update_category(&missing, &name("スイーツ"))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryWriteError::NotFound(id) if id == missing));

        let err = db.delete_category(&missing).await.unwrap_err();
        assert!(matches!(err, CategoryWriteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_updates_timestamp() {
        let db = Database::in_memory().await.unwrap();
        let created = db.create_category(&name("プリン")).await.unwrap();
        let renamed = db
            .update_category(&created.id, &name("極上プリン"))
            .await
            .unwrap();

        assert_eq!(renamed.name, "極上プリン");
        assert_eq!(renamed.created_at, created.created_at);
        assert!(renamed.updated_at >= created.updated_at);
    }
}
