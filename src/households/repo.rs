use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct Household;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HouseholdSettings {
    pub id: Uuid,
    pub household_id: Uuid,
    pub risk_level: i32,
    pub prep_time_preference: String,
    pub kids_appetite: String,
    pub onboarding_step: i32,
}

impl Household {
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT household_id
            FROM user_households
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Creates a household, links the caller as owner and seeds default
    /// settings, all in one transaction.
    pub async fn create_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<HouseholdSettings> {
        let mut tx = db.begin().await?;

        let (household_id,): (Uuid,) =
            sqlx::query_as(r#"INSERT INTO households DEFAULT VALUES RETURNING id"#)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query(
            r#"
            INSERT INTO user_households (user_id, household_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(user_id)
        .bind(household_id)
        .execute(&mut *tx)
        .await?;

        let settings = sqlx::query_as::<_, HouseholdSettings>(
            r#"
            INSERT INTO household_settings (household_id, risk_level, prep_time_preference, kids_appetite, onboarding_step)
            VALUES ($1, 5, 'standard', 'medium', 2)
            RETURNING id, household_id, risk_level, prep_time_preference, kids_appetite, onboarding_step
            "#,
        )
        .bind(household_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(settings)
    }
}

impl HouseholdSettings {
    pub async fn get(db: &PgPool, household_id: Uuid) -> anyhow::Result<Option<HouseholdSettings>> {
        let settings = sqlx::query_as::<_, HouseholdSettings>(
            r#"
            SELECT id, household_id, risk_level, prep_time_preference, kids_appetite, onboarding_step
            FROM household_settings
            WHERE household_id = $1
            "#,
        )
        .bind(household_id)
        .fetch_optional(db)
        .await?;
        Ok(settings)
    }

    pub async fn update(
        db: &PgPool,
        household_id: Uuid,
        risk_level: i32,
        prep_time_preference: &str,
        kids_appetite: &str,
        onboarding_step: Option<i32>,
    ) -> anyhow::Result<HouseholdSettings> {
        let settings = sqlx::query_as::<_, HouseholdSettings>(
            r#"
            UPDATE household_settings
            SET risk_level = $2,
                prep_time_preference = $3,
                kids_appetite = $4,
                onboarding_step = COALESCE($5, onboarding_step)
            WHERE household_id = $1
            RETURNING id, household_id, risk_level, prep_time_preference, kids_appetite, onboarding_step
            "#,
        )
        .bind(household_id)
        .bind(risk_level)
        .bind(prep_time_preference)
        .bind(kids_appetite)
        .bind(onboarding_step)
        .fetch_one(db)
        .await?;
        Ok(settings)
    }
}
