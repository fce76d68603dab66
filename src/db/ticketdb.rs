// db/ticketdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::ticketmodel::{
    NewTicket, RoutingUpdate, Ticket, TicketQueryParams, ValidationUpdate,
};

/// Lifecycle updates are guarded: the expected source status sits in the
/// WHERE clause and a `None` return means the ticket moved under us (or
/// never existed). Callers turn that into a precise error.
#[async_trait]
pub trait TicketExt {
    async fn create_ticket(&self, data: NewTicket) -> Result<Ticket, sqlx::Error>;

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error>;

    async fn get_tickets(
        &self,
        params: &TicketQueryParams,
    ) -> Result<Vec<Ticket>, sqlx::Error>;

    async fn get_student_tickets(&self, student_id: Uuid) -> Result<Vec<Ticket>, sqlx::Error>;

    async fn get_artisan_tickets(&self, artisan_id: Uuid) -> Result<Vec<Ticket>, sqlx::Error>;

    async fn assign_ticket(
        &self,
        ticket_id: Uuid,
        update: RoutingUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn externalize_ticket(
        &self,
        ticket_id: Uuid,
        update: RoutingUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn set_before_photo(
        &self,
        ticket_id: Uuid,
        photo_url: &str,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn complete_ticket(
        &self,
        ticket_id: Uuid,
        after_photo_url: &str,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn validate_ticket(
        &self,
        ticket_id: Uuid,
        update: ValidationUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn cancel_ticket(
        &self,
        ticket_id: Uuid,
        reason: Option<String>,
    ) -> Result<Option<Ticket>, sqlx::Error>;

    async fn archive_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error>;
}

#[async_trait]
impl TicketExt for DBClient {
    async fn create_ticket(&self, data: NewTicket) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (
                student_id, student_name, category, description, location,
                is_urgent, ticket_type, scheduled_date, scheduled_time,
                image_urls, audio_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(data.student_id)
        .bind(data.student_name)
        .bind(data.category)
        .bind(data.description)
        .bind(data.location)
        .bind(data.is_urgent)
        .bind(data.ticket_type)
        .bind(data.scheduled_date)
        .bind(data.scheduled_time)
        .bind(data.image_urls)
        .bind(data.audio_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, student_id, student_name, category, description, location,
                   is_urgent, ticket_type, scheduled_date, scheduled_time,
                   status, assigned_to_id, assigned_to_name, externalized_to_name,
                   image_urls, audio_url, before_photo_url, after_photo_url,
                   rating, student_comment, cancel_reason, archived,
                   created_at, validated_at, completed_at, cancelled_at, updated_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_tickets(
        &self,
        params: &TicketQueryParams,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, student_id, student_name, category, description, location,
                   is_urgent, ticket_type, scheduled_date, scheduled_time,
                   status, assigned_to_id, assigned_to_name, externalized_to_name,
                   image_urls, audio_url, before_photo_url, after_photo_url,
                   rating, student_comment, cancel_reason, archived,
                   created_at, validated_at, completed_at, cancelled_at, updated_at
            FROM tickets
            WHERE ($1::ticket_status IS NULL OR status = $1)
              AND ($2::ticket_category IS NULL OR category = $2)
              AND ($3::boolean IS NULL OR is_urgent = $3)
              AND archived = $4
            "#,
        )
        .bind(params.status)
        .bind(params.category)
        .bind(params.urgent)
        .bind(params.archived.unwrap_or(false))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_student_tickets(&self, student_id: Uuid) -> Result<Vec<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, student_id, student_name, category, description, location,
                   is_urgent, ticket_type, scheduled_date, scheduled_time,
                   status, assigned_to_id, assigned_to_name, externalized_to_name,
                   image_urls, audio_url, before_photo_url, after_photo_url,
                   rating, student_comment, cancel_reason, archived,
                   created_at, validated_at, completed_at, cancelled_at, updated_at
            FROM tickets
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_artisan_tickets(&self, artisan_id: Uuid) -> Result<Vec<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, student_id, student_name, category, description, location,
                   is_urgent, ticket_type, scheduled_date, scheduled_time,
                   status, assigned_to_id, assigned_to_name, externalized_to_name,
                   image_urls, audio_url, before_photo_url, after_photo_url,
                   rating, student_comment, cancel_reason, archived,
                   created_at, validated_at, completed_at, cancelled_at, updated_at
            FROM tickets
            WHERE assigned_to_id = $1
              AND archived = false
            "#,
        )
        .bind(artisan_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn assign_ticket(
        &self,
        ticket_id: Uuid,
        update: RoutingUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        // Reassignment is allowed from any live status; the routing payload
        // carries both handler sides, so the provider column is cleared in
        // the same write.
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = $2,
                assigned_to_id = $3,
                assigned_to_name = $4,
                externalized_to_name = $5,
                updated_at = NOW()
            WHERE id = $1
              AND status <> 'cancelled'::ticket_status
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(update.status)
        .bind(update.assigned_to_id)
        .bind(update.assigned_to_name)
        .bind(update.externalized_to_name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn externalize_ticket(
        &self,
        ticket_id: Uuid,
        update: RoutingUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = $2,
                assigned_to_id = $3,
                assigned_to_name = $4,
                externalized_to_name = $5,
                updated_at = NOW()
            WHERE id = $1
              AND status IN ('pending'::ticket_status, 'in_progress'::ticket_status)
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(update.status)
        .bind(update.assigned_to_id)
        .bind(update.assigned_to_name)
        .bind(update.externalized_to_name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_before_photo(
        &self,
        ticket_id: Uuid,
        photo_url: &str,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET before_photo_url = $2,
                updated_at = NOW()
            WHERE id = $1
              AND status = 'in_progress'::ticket_status
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(photo_url)
        .fetch_optional(&self.pool)
        .await
    }

    async fn complete_ticket(
        &self,
        ticket_id: Uuid,
        after_photo_url: &str,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        // The before photo must already be on record; the after photo
        // arrives with the completion call itself.
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = 'termine_artisan'::ticket_status,
                after_photo_url = $2,
                completed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
              AND status = 'in_progress'::ticket_status
              AND before_photo_url IS NOT NULL
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(after_photo_url)
        .fetch_optional(&self.pool)
        .await
    }

    async fn validate_ticket(
        &self,
        ticket_id: Uuid,
        update: ValidationUpdate,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = $2,
                rating = $3,
                student_comment = $4,
                validated_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
              AND status = 'termine_artisan'::ticket_status
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(update.status)
        .bind(update.rating)
        .bind(update.student_comment)
        .fetch_optional(&self.pool)
        .await
    }

    async fn cancel_ticket(
        &self,
        ticket_id: Uuid,
        reason: Option<String>,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = 'cancelled'::ticket_status,
                cancel_reason = $2,
                cancelled_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
              AND status IN ('pending'::ticket_status, 'in_progress'::ticket_status)
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
    }

    async fn archive_ticket(&self, ticket_id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET archived = true,
                updated_at = NOW()
            WHERE id = $1
              AND status IN ('completed'::ticket_status,
                             'cancelled'::ticket_status,
                             'externalized'::ticket_status)
            RETURNING id, student_id, student_name, category, description, location,
                      is_urgent, ticket_type, scheduled_date, scheduled_time,
                      status, assigned_to_id, assigned_to_name, externalized_to_name,
                      image_urls, audio_url, before_photo_url, after_photo_url,
                      rating, student_comment, cancel_reason, archived,
                      created_at, validated_at, completed_at, cancelled_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await
    }
}
