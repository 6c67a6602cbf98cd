use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// An item joined with the household's rating row for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RatedItem {
    pub item_id: Uuid,
    pub name: String,
    pub kind: String,
    pub category: Option<String>,
    pub rating: String,
    pub confidence_score: Option<i32>,
    pub is_favourite: bool,
}

const RATED_ITEM_SELECT: &str = r#"
    SELECT i.id AS item_id, i.name, i.kind, i.category,
           hi.rating, hi.confidence_score, hi.is_favourite
    FROM household_items hi
    JOIN items i ON i.id = hi.item_id
"#;

impl RatedItem {
    pub async fn list_for_household(
        db: &PgPool,
        household_id: Uuid,
        kind: Option<&str>,
    ) -> anyhow::Result<Vec<RatedItem>> {
        let sql = format!(
            "{RATED_ITEM_SELECT}
            WHERE hi.household_id = $1 AND ($2::text IS NULL OR i.kind = $2)
            ORDER BY i.name"
        );
        let rows = sqlx::query_as::<_, RatedItem>(&sql)
            .bind(household_id)
            .bind(kind)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn get(
        db: &PgPool,
        household_id: Uuid,
        item_id: Uuid,
    ) -> anyhow::Result<Option<RatedItem>> {
        let sql = format!(
            "{RATED_ITEM_SELECT}
            WHERE hi.household_id = $1 AND hi.item_id = $2"
        );
        let row = sqlx::query_as::<_, RatedItem>(&sql)
            .bind(household_id)
            .bind(item_id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn favourites(db: &PgPool, household_id: Uuid) -> anyhow::Result<Vec<RatedItem>> {
        let sql = format!(
            "{RATED_ITEM_SELECT}
            WHERE hi.household_id = $1 AND hi.is_favourite AND i.kind = 'meal'
            ORDER BY i.name"
        );
        let rows = sqlx::query_as::<_, RatedItem>(&sql)
            .bind(household_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Creates the item and its household rating link in one transaction.
    /// The upsert on the link keeps the at-most-one-rating invariant even
    /// when two requests race on the same item id.
    pub async fn create(
        db: &PgPool,
        household_id: Uuid,
        created_by: Uuid,
        name: &str,
        kind: &str,
        category: Option<&str>,
        rating: &str,
        confidence_score: Option<i32>,
    ) -> anyhow::Result<RatedItem> {
        let mut tx = db.begin().await?;

        let (item_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO items (name, kind, category, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(category)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO household_items (household_id, item_id, rating, confidence_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (household_id, item_id)
            DO UPDATE SET rating = EXCLUDED.rating, confidence_score = EXCLUDED.confidence_score
            "#,
        )
        .bind(household_id)
        .bind(item_id)
        .bind(rating)
        .bind(confidence_score)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RatedItem {
            item_id,
            name: name.to_string(),
            kind: kind.to_string(),
            category: category.map(str::to_string),
            rating: rating.to_string(),
            confidence_score,
            is_favourite: false,
        })
    }

    /// Partial update of the rating link; absent fields keep their value.
    pub async fn update_link(
        db: &PgPool,
        household_id: Uuid,
        item_id: Uuid,
        rating: Option<&str>,
        confidence_score: Option<i32>,
        is_favourite: Option<bool>,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE household_items
            SET rating = COALESCE($3, rating),
                confidence_score = COALESCE($4, confidence_score),
                is_favourite = COALESCE($5, is_favourite)
            WHERE household_id = $1 AND item_id = $2
            "#,
        )
        .bind(household_id)
        .bind(item_id)
        .bind(rating)
        .bind(confidence_score)
        .bind(is_favourite)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlinks the item from the household and removes the item row itself.
    pub async fn delete(db: &PgPool, household_id: Uuid, item_id: Uuid) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;

        let unlinked = sqlx::query(
            r#"DELETE FROM household_items WHERE household_id = $1 AND item_id = $2"#,
        )
        .bind(household_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if unlinked == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(r#"DELETE FROM items WHERE id = $1"#)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
