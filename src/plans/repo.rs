use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

pub struct WeeklyPlan;

impl WeeklyPlan {
    pub async fn get(
        db: &PgPool,
        household_id: Uuid,
        week_start: Date,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            r#"
            SELECT plan_json
            FROM weekly_plans
            WHERE household_id = $1 AND week_start = $2
            "#,
        )
        .bind(household_id)
        .bind(week_start)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(plan,)| plan))
    }

    /// Conflict on (household_id, week_start) overwrites: last writer wins.
    pub async fn upsert(
        db: &PgPool,
        household_id: Uuid,
        week_start: Date,
        plan_json: &serde_json::Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO weekly_plans (household_id, week_start, plan_json)
            VALUES ($1, $2, $3)
            ON CONFLICT (household_id, week_start)
            DO UPDATE SET plan_json = EXCLUDED.plan_json
            "#,
        )
        .bind(household_id)
        .bind(week_start)
        .bind(plan_json)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, household_id: Uuid, week_start: Date) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weekly_plans
            WHERE household_id = $1 AND week_start = $2
            "#,
        )
        .bind(household_id)
        .bind(week_start)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
