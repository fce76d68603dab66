// utils/media.rs
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use uuid::Uuid;

pub const MAX_PHOTO_MB: usize = 10;
pub const MAX_AUDIO_MB: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaKind {
    Photo,
    VoiceNote,
}

pub fn detect_kind(data_url: &str) -> Option<MediaKind> {
    if data_url.starts_with("data:image") {
        Some(MediaKind::Photo)
    } else if data_url.starts_with("data:audio") {
        Some(MediaKind::VoiceNote)
    } else {
        None
    }
}

fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        data.split(',').nth(1).unwrap_or(data)
    } else {
        data
    }
}

pub fn validate_media_size(base64_data: &str, max_size_mb: usize) -> Result<()> {
    let clean_data = strip_data_url(base64_data);

    let size_in_bytes = (clean_data.len() * 3) / 4; // Approximate decoded size
    let max_size_bytes = max_size_mb * 1024 * 1024;

    if size_in_bytes > max_size_bytes {
        bail!("media exceeds the {}MB limit", max_size_mb);
    }
    Ok(())
}

pub fn decode_media(base64_data: &str) -> Result<Vec<u8>> {
    let clean_data = strip_data_url(base64_data);

    general_purpose::STANDARD
        .decode(clean_data)
        .context("failed to decode base64 media")
}

/// Sanity check that the decoded bytes really are an image (JPEG or PNG).
pub fn ensure_image(bytes: &[u8]) -> Result<()> {
    image::load_from_memory(bytes).context("payload is not a valid image")?;
    Ok(())
}

/// Labels come from the client; keep them filesystem-safe.
pub fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "media".to_string()
    } else {
        cleaned
    }
}

pub fn ticket_media_path(student_id: Uuid, label: &str) -> String {
    format!(
        "tickets/{}/{}_{}",
        student_id,
        Utc::now().timestamp_millis(),
        sanitize_label(label)
    )
}

pub fn intervention_photo_path(ticket_id: Uuid, label: &str) -> String {
    format!(
        "interventions/{}/{}_{}.jpg",
        ticket_id,
        sanitize_label(label),
        Utc::now().timestamp_millis()
    )
}

pub async fn store(upload_dir: &str, rel_path: &str, bytes: &[u8]) -> Result<()> {
    let full_path = std::path::Path::new(upload_dir).join(rel_path);

    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create media directory {:?}", parent))?;
    }

    tokio::fs::write(&full_path, bytes)
        .await
        .with_context(|| format!("failed to write media file {:?}", full_path))?;

    Ok(())
}

/// Public download URL persisted on the ticket record.
pub fn public_url(app_url: &str, rel_path: &str) -> String {
    format!("{}/uploads/{}", app_url.trim_end_matches('/'), rel_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind("data:image/jpeg;base64,abcd"),
            Some(MediaKind::Photo)
        );
        assert_eq!(
            detect_kind("data:audio/mp3;base64,abcd"),
            Some(MediaKind::VoiceNote)
        );
        assert_eq!(detect_kind("data:text/plain;base64,abcd"), None);
        assert_eq!(detect_kind("abcd"), None);
    }

    #[test]
    fn test_validate_media_size() {
        let small = "data:image/jpeg;base64,aaaa";
        assert!(validate_media_size(small, 1).is_ok());

        // ~2MB of base64 against a 1MB limit
        let big = "a".repeat(2 * 1024 * 1024 * 4 / 3 + 8);
        assert!(validate_media_size(&big, 1).is_err());
    }

    #[test]
    fn test_decode_media_with_data_url() {
        let encoded = general_purpose::STANDARD.encode(b"hello");
        let data_url = format!("data:image/jpeg;base64,{}", encoded);

        assert_eq!(decode_media(&data_url).unwrap(), b"hello");
        assert_eq!(decode_media(&encoded).unwrap(), b"hello");
        assert!(decode_media("not base64!!!").is_err());
    }

    #[test]
    fn test_ensure_image() {
        let img = image::RgbImage::new(2, 2);
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageOutputFormat::Png)
            .unwrap();

        assert!(ensure_image(buf.get_ref()).is_ok());
        assert!(ensure_image(b"definitely not an image").is_err());
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("photo_1.jpg"), "photo_1.jpg");
        assert_eq!(sanitize_label("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_label("note vocale.mp3"), "note_vocale.mp3");
        assert_eq!(sanitize_label(""), "media");
    }

    #[test]
    fn test_path_conventions() {
        let student_id = Uuid::new_v4();
        let ticket_id = Uuid::new_v4();

        let upload = ticket_media_path(student_id, "photo_1.jpg");
        assert!(upload.starts_with(&format!("tickets/{}/", student_id)));
        assert!(upload.ends_with("_photo_1.jpg"));

        let before = intervention_photo_path(ticket_id, "before");
        assert!(before.starts_with(&format!("interventions/{}/before_", ticket_id)));
        assert!(before.ends_with(".jpg"));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("http://localhost:8000/", "tickets/x/1_a.jpg"),
            "http://localhost:8000/uploads/tickets/x/1_a.jpg"
        );
    }
}
