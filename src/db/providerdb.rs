// db/providerdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{providermodel::ExternalProvider, ticketmodel::TicketCategory};

#[async_trait]
pub trait ProviderExt {
    async fn create_provider(
        &self,
        name: &str,
        telephone: Option<String>,
        email: Option<String>,
        specialite: Option<TicketCategory>,
    ) -> Result<ExternalProvider, sqlx::Error>;

    async fn get_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<ExternalProvider>, sqlx::Error>;

    async fn get_providers(&self) -> Result<Vec<ExternalProvider>, sqlx::Error>;
}

#[async_trait]
impl ProviderExt for DBClient {
    async fn create_provider(
        &self,
        name: &str,
        telephone: Option<String>,
        email: Option<String>,
        specialite: Option<TicketCategory>,
    ) -> Result<ExternalProvider, sqlx::Error> {
        sqlx::query_as::<_, ExternalProvider>(
            r#"
            INSERT INTO external_providers (name, telephone, email, specialite)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, telephone, email, specialite, is_active, created_at
            "#,
        )
        .bind(name)
        .bind(telephone)
        .bind(email)
        .bind(specialite)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<ExternalProvider>, sqlx::Error> {
        sqlx::query_as::<_, ExternalProvider>(
            r#"
            SELECT id, name, telephone, email, specialite, is_active, created_at
            FROM external_providers
            WHERE id = $1
            "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_providers(&self) -> Result<Vec<ExternalProvider>, sqlx::Error> {
        sqlx::query_as::<_, ExternalProvider>(
            r#"
            SELECT id, name, telephone, email, specialite, is_active, created_at
            FROM external_providers
            WHERE is_active = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
