// service/notification_service.rs
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt, userdb::UserExt},
    models::{notificationmodel::NotificationKind, ticketmodel::Ticket, usermodel::User},
    push::fcm::PushClient,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
    push_client: PushClient,
}

/// Every device token of every recipient, flattened into one multicast list.
pub fn collect_push_tokens(users: &[User]) -> Vec<String> {
    users
        .iter()
        .flat_map(|user| user.fcm_tokens.iter().cloned())
        .collect()
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>, push_client: PushClient) -> Self {
        Self {
            db_client,
            push_client,
        }
    }

    /// New ticket: one in-app row per admin, then a single multicast push to
    /// every admin device. No admin token anywhere means no push at all.
    pub async fn notify_ticket_created(&self, ticket: &Ticket) -> Result<(), ServiceError> {
        tracing::info!(
            "New ticket notification: {} ({}) at {}",
            ticket.id,
            ticket.category.to_str(),
            ticket.location
        );

        let admins = self.db_client.get_admins().await?;

        let message = format!(
            "Nouveau ticket: {} - {} (par {})",
            ticket.category.to_str(),
            ticket.location,
            ticket.student_name
        );
        let deep_link = json!({
            "url": "/app/admin",
            "ticketId": ticket.id,
        });

        let stores = admins.iter().map(|admin| {
            self.db_client.store_notification(
                admin.id,
                NotificationKind::NewTicket,
                message.clone(),
                Some(ticket.id),
                Some(deep_link.clone()),
            )
        });
        for result in join_all(stores).await {
            result?;
        }

        let tokens = collect_push_tokens(&admins);
        if tokens.is_empty() {
            tracing::info!("No admin push tokens registered; skipping push");
            return Ok(());
        }

        self.push_client
            .send_multicast(
                &tokens,
                "Nouveau ticket",
                &format!(
                    "{} - {} (par {})",
                    ticket.category.to_str(),
                    ticket.location,
                    ticket.student_name
                ),
                deep_link,
            )
            .await
            .map_err(ServiceError::Notification)
    }

    /// Dispatch: the assigned artisan gets an in-app row and, when they have
    /// registered devices, one multicast push.
    pub async fn notify_ticket_assigned(
        &self,
        ticket: &Ticket,
        artisan: &User,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Dispatch notification: ticket {} assigned to artisan {}",
            ticket.id,
            artisan.id
        );

        let message = format!(
            "Nouvelle intervention: {} - {}",
            ticket.category.to_str(),
            ticket.location
        );
        let deep_link = json!({
            "url": "/app/artisan",
            "ticketId": ticket.id,
        });

        self.db_client
            .store_notification(
                artisan.id,
                NotificationKind::Assignment,
                message.clone(),
                Some(ticket.id),
                Some(deep_link.clone()),
            )
            .await?;

        if artisan.fcm_tokens.is_empty() {
            tracing::info!("Artisan {} has no push tokens; skipping push", artisan.id);
            return Ok(());
        }

        self.push_client
            .send_multicast(&artisan.fcm_tokens, "Nouvelle intervention", &message, deep_link)
            .await
            .map_err(ServiceError::Notification)
    }

    /// Work finished: in-app row telling the student to validate. Store-only.
    pub async fn notify_ticket_completed(&self, ticket: &Ticket) -> Result<(), ServiceError> {
        tracing::info!(
            "Completion notification: ticket {} awaiting student validation",
            ticket.id
        );

        self.db_client
            .store_notification(
                ticket.student_id,
                NotificationKind::Completion,
                "Intervention terminée - veuillez valider les travaux".to_string(),
                Some(ticket.id),
                Some(json!({
                    "url": "/app/etudiant",
                    "ticketId": ticket.id,
                })),
            )
            .await?;

        Ok(())
    }

    /// Student validated: in-app row carrying the rating back to the artisan.
    /// Store-only.
    pub async fn notify_ticket_validated(
        &self,
        ticket: &Ticket,
        artisan_id: Uuid,
        rating: i32,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Validation notification: ticket {} rated {}/5",
            ticket.id,
            rating
        );

        self.db_client
            .store_notification(
                artisan_id,
                NotificationKind::Validation,
                format!("Intervention validée avec la note {}/5", rating),
                Some(ticket.id),
                Some(json!({
                    "url": "/app/artisan",
                    "ticketId": ticket.id,
                })),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserRole;
    use chrono::Utc;

    fn admin_with_tokens(tokens: Vec<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            prenom: "Fatou".to_string(),
            nom: "Ndiaye".to_string(),
            email: format!("{}@fixliya.test", Uuid::new_v4()),
            password: "hash".to_string(),
            role: UserRole::Admin,
            telephone: None,
            specialite: None,
            is_active: true,
            fcm_tokens: tokens.into_iter().map(String::from).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_collect_push_tokens_flattens_all_devices() {
        let admins = vec![
            admin_with_tokens(vec!["tok-1", "tok-2"]),
            admin_with_tokens(vec![]),
            admin_with_tokens(vec!["tok-3"]),
        ];

        let tokens = collect_push_tokens(&admins);
        assert_eq!(tokens, vec!["tok-1", "tok-2", "tok-3"]);
    }

    #[test]
    fn test_collect_push_tokens_empty_when_no_devices() {
        let admins = vec![admin_with_tokens(vec![]), admin_with_tokens(vec![])];
        assert!(collect_push_tokens(&admins).is_empty());

        let nobody: Vec<User> = vec![];
        assert!(collect_push_tokens(&nobody).is_empty());
    }
}
