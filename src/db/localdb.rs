// db/localdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::localmodel::{Local, LocalKind};

#[async_trait]
pub trait LocalExt {
    async fn create_local(
        &self,
        name: &str,
        kind: LocalKind,
        floors: Option<i32>,
        total_rooms: Option<i32>,
        category: Option<String>,
        capacity: Option<i32>,
    ) -> Result<Local, sqlx::Error>;

    async fn get_local(&self, local_id: Uuid) -> Result<Option<Local>, sqlx::Error>;

    async fn get_locals(&self, include_inactive: bool) -> Result<Vec<Local>, sqlx::Error>;

    async fn set_local_active(
        &self,
        local_id: Uuid,
        is_active: bool,
    ) -> Result<Option<Local>, sqlx::Error>;
}

#[async_trait]
impl LocalExt for DBClient {
    async fn create_local(
        &self,
        name: &str,
        kind: LocalKind,
        floors: Option<i32>,
        total_rooms: Option<i32>,
        category: Option<String>,
        capacity: Option<i32>,
    ) -> Result<Local, sqlx::Error> {
        sqlx::query_as::<_, Local>(
            r#"
            INSERT INTO locals (name, kind, floors, total_rooms, category, capacity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, kind, floors, total_rooms, category, capacity,
                      is_active, created_at
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(floors)
        .bind(total_rooms)
        .bind(category)
        .bind(capacity)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_local(&self, local_id: Uuid) -> Result<Option<Local>, sqlx::Error> {
        sqlx::query_as::<_, Local>(
            r#"
            SELECT id, name, kind, floors, total_rooms, category, capacity,
                   is_active, created_at
            FROM locals
            WHERE id = $1
            "#,
        )
        .bind(local_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_locals(&self, include_inactive: bool) -> Result<Vec<Local>, sqlx::Error> {
        if include_inactive {
            sqlx::query_as::<_, Local>(
                r#"
                SELECT id, name, kind, floors, total_rooms, category, capacity,
                       is_active, created_at
                FROM locals
                ORDER BY name
                "#,
            )
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, Local>(
                r#"
                SELECT id, name, kind, floors, total_rooms, category, capacity,
                       is_active, created_at
                FROM locals
                WHERE is_active = true
                ORDER BY name
                "#,
            )
            .fetch_all(&self.pool)
            .await
        }
    }

    async fn set_local_active(
        &self,
        local_id: Uuid,
        is_active: bool,
    ) -> Result<Option<Local>, sqlx::Error> {
        sqlx::query_as::<_, Local>(
            r#"
            UPDATE locals
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, kind, floors, total_rooms, category, capacity,
                      is_active, created_at
            "#,
        )
        .bind(local_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
    }
}
