// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    ticketmodel::TicketCategory,
    usermodel::{User, UserRole},
};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        prenom: T,
        nom: T,
        email: T,
        telephone: Option<String>,
        password: T,
        role: UserRole,
        specialite: Option<TicketCategory>,
    ) -> Result<User, sqlx::Error>;

    async fn get_artisans(
        &self,
        specialite: Option<TicketCategory>,
    ) -> Result<Vec<User>, sqlx::Error>;

    async fn get_admins(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        prenom: String,
        nom: String,
        telephone: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn add_fcm_token(&self, user_id: Uuid, token: &str) -> Result<User, sqlx::Error>;

    async fn remove_fcm_token(&self, user_id: Uuid, token: &str) -> Result<User, sqlx::Error>;

    async fn set_user_active(&self, user_id: Uuid, is_active: bool)
        -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, prenom, nom, email, password, role, telephone, specialite,
                       is_active, fcm_tokens, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, prenom, nom, email, password, role, telephone, specialite,
                       is_active, fcm_tokens, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        prenom: T,
        nom: T,
        email: T,
        telephone: Option<String>,
        password: T,
        role: UserRole,
        specialite: Option<TicketCategory>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (prenom, nom, email, telephone, password, role, specialite)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, prenom, nom, email, password, role, telephone, specialite,
                      is_active, fcm_tokens, created_at, updated_at
            "#,
        )
        .bind(prenom.into())
        .bind(nom.into())
        .bind(email.into())
        .bind(telephone)
        .bind(password.into())
        .bind(role)
        .bind(specialite)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_artisans(
        &self,
        specialite: Option<TicketCategory>,
    ) -> Result<Vec<User>, sqlx::Error> {
        match specialite {
            Some(category) => {
                sqlx::query_as::<_, User>(
                    r#"
                    SELECT id, prenom, nom, email, password, role, telephone, specialite,
                           is_active, fcm_tokens, created_at, updated_at
                    FROM users
                    WHERE role = 'artisan'::user_role
                      AND is_active = true
                      AND specialite = $1
                    ORDER BY nom, prenom
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, User>(
                    r#"
                    SELECT id, prenom, nom, email, password, role, telephone, specialite,
                           is_active, fcm_tokens, created_at, updated_at
                    FROM users
                    WHERE role = 'artisan'::user_role
                      AND is_active = true
                    ORDER BY nom, prenom
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    async fn get_admins(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, prenom, nom, email, password, role, telephone, specialite,
                   is_active, fcm_tokens, created_at, updated_at
            FROM users
            WHERE role = 'admin'::user_role
              AND is_active = true
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        prenom: String,
        nom: String,
        telephone: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET prenom = $2,
                nom = $3,
                telephone = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, prenom, nom, email, password, role, telephone, specialite,
                      is_active, fcm_tokens, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(prenom)
        .bind(nom)
        .bind(telephone)
        .fetch_one(&self.pool)
        .await
    }

    async fn add_fcm_token(&self, user_id: Uuid, token: &str) -> Result<User, sqlx::Error> {
        // Idempotent: re-registering a device must not duplicate its token.
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET fcm_tokens = CASE
                    WHEN $2 = ANY(fcm_tokens) THEN fcm_tokens
                    ELSE array_append(fcm_tokens, $2)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, prenom, nom, email, password, role, telephone, specialite,
                      is_active, fcm_tokens, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await
    }

    async fn remove_fcm_token(&self, user_id: Uuid, token: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET fcm_tokens = array_remove(fcm_tokens, $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, prenom, nom, email, password, role, telephone, specialite,
                      is_active, fcm_tokens, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_user_active(
        &self,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, prenom, nom, email, password, role, telephone, specialite,
                      is_active, fcm_tokens, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }
}
