use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

pub struct StoredShoppingList;

impl StoredShoppingList {
    pub async fn get(
        db: &PgPool,
        household_id: Uuid,
        week_start: Date,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            r#"
            SELECT items_json
            FROM shopping_lists
            WHERE household_id = $1 AND week_start = $2
            "#,
        )
        .bind(household_id)
        .bind(week_start)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(items,)| items))
    }

    pub async fn upsert(
        db: &PgPool,
        household_id: Uuid,
        week_start: Date,
        items_json: &serde_json::Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shopping_lists (household_id, week_start, items_json)
            VALUES ($1, $2, $3)
            ON CONFLICT (household_id, week_start)
            DO UPDATE SET items_json = EXCLUDED.items_json
            "#,
        )
        .bind(household_id)
        .bind(week_start)
        .bind(items_json)
        .execute(db)
        .await?;
        Ok(())
    }
}
