// service/lifecycle.rs
//
// Transition rules for the ticket state machine, kept as pure functions so
// the service layer stays thin and the rules stay testable without a pool.
use uuid::Uuid;

use super::error::ServiceError;
use crate::models::ticketmodel::{Ticket, TicketStatus};

pub fn is_terminal(status: TicketStatus) -> bool {
    matches!(
        status,
        TicketStatus::Completed | TicketStatus::Cancelled | TicketStatus::Externalized
    )
}

/// Assignment is deliberately permissive: an admin may reassign a ticket in
/// any live status, including one already completed or handed to a provider.
/// Only a cancelled ticket refuses.
pub fn ensure_assignable(ticket: &Ticket) -> Result<(), ServiceError> {
    if ticket.status == TicketStatus::Cancelled {
        return Err(ServiceError::CannotAssignCancelled);
    }
    Ok(())
}

pub fn ensure_externalizable(ticket: &Ticket) -> Result<(), ServiceError> {
    match ticket.status {
        TicketStatus::Pending | TicketStatus::InProgress => Ok(()),
        current => Err(ServiceError::InvalidTransition(
            ticket.id,
            "externalized",
            current,
        )),
    }
}

pub fn ensure_before_photo_attachable(ticket: &Ticket) -> Result<(), ServiceError> {
    if ticket.status != TicketStatus::InProgress {
        return Err(ServiceError::InvalidTransition(
            ticket.id,
            "photographed",
            ticket.status,
        ));
    }
    Ok(())
}

/// Completion needs the before photo already on record; the after photo
/// arrives with the completion call itself.
pub fn ensure_completable(ticket: &Ticket) -> Result<(), ServiceError> {
    if ticket.status != TicketStatus::InProgress {
        return Err(ServiceError::InvalidTransition(
            ticket.id,
            "completed",
            ticket.status,
        ));
    }
    if ticket.before_photo_url.is_none() {
        return Err(ServiceError::MissingBeforePhoto(ticket.id));
    }
    Ok(())
}

pub fn ensure_validatable(ticket: &Ticket) -> Result<(), ServiceError> {
    if ticket.status != TicketStatus::TermineArtisan {
        return Err(ServiceError::InvalidTransition(
            ticket.id,
            "validated",
            ticket.status,
        ));
    }
    Ok(())
}

pub fn ensure_cancellable(ticket: &Ticket) -> Result<(), ServiceError> {
    match ticket.status {
        TicketStatus::Pending | TicketStatus::InProgress => Ok(()),
        current => Err(ServiceError::InvalidTransition(
            ticket.id,
            "cancelled",
            current,
        )),
    }
}

pub fn ensure_archivable(ticket: &Ticket) -> Result<(), ServiceError> {
    if is_terminal(ticket.status) {
        Ok(())
    } else {
        Err(ServiceError::InvalidTransition(
            ticket.id,
            "archived",
            ticket.status,
        ))
    }
}

/// A dispatch push goes to the artisan only when the assignee actually
/// changed. Re-saving the same assignee stays silent.
pub fn is_dispatch_event(previous: Option<Uuid>, new: Option<Uuid>) -> bool {
    match (previous, new) {
        (None, Some(_)) => true,
        (Some(prev), Some(next)) => prev != next,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticketmodel::{TicketCategory, TicketType};
    use chrono::Utc;

    fn ticket_in(status: TicketStatus) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            student_name: "Moussa Traore".to_string(),
            category: TicketCategory::Electrical,
            description: "Prise cassée".to_string(),
            location: "Building B - Room 204".to_string(),
            is_urgent: false,
            ticket_type: TicketType::Planifier,
            scheduled_date: None,
            scheduled_time: None,
            status,
            assigned_to_id: None,
            assigned_to_name: None,
            externalized_to_name: None,
            image_urls: vec![],
            audio_url: None,
            before_photo_url: None,
            after_photo_url: None,
            rating: None,
            student_comment: None,
            cancel_reason: None,
            archived: false,
            created_at: now,
            validated_at: None,
            completed_at: None,
            cancelled_at: None,
            updated_at: now,
        }
    }

    #[test]
    fn test_assign_allowed_from_every_live_status() {
        for status in [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::TermineArtisan,
            TicketStatus::Completed,
            TicketStatus::Externalized,
        ] {
            assert!(
                ensure_assignable(&ticket_in(status)).is_ok(),
                "assign should be allowed from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_assign_rejected_only_when_cancelled() {
        let err = ensure_assignable(&ticket_in(TicketStatus::Cancelled)).unwrap_err();
        assert_eq!(err.to_string(), "cannot assign a cancelled ticket");
    }

    #[test]
    fn test_externalize_only_from_pending_or_in_progress() {
        assert!(ensure_externalizable(&ticket_in(TicketStatus::Pending)).is_ok());
        assert!(ensure_externalizable(&ticket_in(TicketStatus::InProgress)).is_ok());

        for status in [
            TicketStatus::TermineArtisan,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
            TicketStatus::Externalized,
        ] {
            assert!(
                ensure_externalizable(&ticket_in(status)).is_err(),
                "externalize should be rejected from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_before_photo_requires_in_progress() {
        assert!(ensure_before_photo_attachable(&ticket_in(TicketStatus::InProgress)).is_ok());
        assert!(ensure_before_photo_attachable(&ticket_in(TicketStatus::Pending)).is_err());
        assert!(
            ensure_before_photo_attachable(&ticket_in(TicketStatus::TermineArtisan)).is_err()
        );
    }

    #[test]
    fn test_complete_requires_before_photo() {
        let mut ticket = ticket_in(TicketStatus::InProgress);

        let err = ensure_completable(&ticket).unwrap_err();
        assert!(matches!(err, ServiceError::MissingBeforePhoto(_)));

        ticket.before_photo_url = Some("http://host/uploads/interventions/x/before.jpg".into());
        assert!(ensure_completable(&ticket).is_ok());
    }

    #[test]
    fn test_complete_rejected_outside_in_progress() {
        for status in [
            TicketStatus::Pending,
            TicketStatus::TermineArtisan,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
            TicketStatus::Externalized,
        ] {
            let mut ticket = ticket_in(status);
            ticket.before_photo_url = Some("http://host/before.jpg".into());
            assert!(
                ensure_completable(&ticket).is_err(),
                "complete should be rejected from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_validate_only_from_termine_artisan() {
        assert!(ensure_validatable(&ticket_in(TicketStatus::TermineArtisan)).is_ok());

        for status in [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
            TicketStatus::Externalized,
        ] {
            assert!(
                ensure_validatable(&ticket_in(status)).is_err(),
                "validate should be rejected from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_cancel_only_from_pending_or_in_progress() {
        assert!(ensure_cancellable(&ticket_in(TicketStatus::Pending)).is_ok());
        assert!(ensure_cancellable(&ticket_in(TicketStatus::InProgress)).is_ok());

        for status in [
            TicketStatus::TermineArtisan,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
            TicketStatus::Externalized,
        ] {
            assert!(
                ensure_cancellable(&ticket_in(status)).is_err(),
                "cancel should be rejected from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_archive_only_terminal_statuses() {
        for status in [
            TicketStatus::Completed,
            TicketStatus::Cancelled,
            TicketStatus::Externalized,
        ] {
            assert!(
                ensure_archivable(&ticket_in(status)).is_ok(),
                "archive should be allowed from {:?}",
                status
            );
        }

        for status in [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::TermineArtisan,
        ] {
            assert!(
                ensure_archivable(&ticket_in(status)).is_err(),
                "archive should be rejected from {:?}",
                status
            );
        }
    }

    #[test]
    fn test_dispatch_event_truth_table() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(is_dispatch_event(None, Some(a)));
        assert!(is_dispatch_event(Some(a), Some(b)));
        assert!(!is_dispatch_event(Some(a), Some(a)));
        assert!(!is_dispatch_event(None, None));
        assert!(!is_dispatch_event(Some(a), None));
    }
}
