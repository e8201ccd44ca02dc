//! Repair endpoints: list/detail hydration, multipart submission, feedback,
//! and targeted status/process-date mutations.

use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::types::{Repair, RepairStatus};

use super::client::ApiClient;
use super::wire::{ApiError, MutationOutcome, MutationReply, RepairWire, StatusEnvelope};

// ---------------------------------------------------------------------------
// Submission forms
// ---------------------------------------------------------------------------

/// An image attachment held in memory, ready for multipart upload.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Structured form for filing a new repair request.
#[derive(Debug, Clone, Default)]
pub struct RepairForm {
    pub report_date: String,
    pub report_time: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub building_id: String,
    pub floor_id: String,
    pub room_id: String,
    pub description: String,
    pub images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub repair_id: String,
    /// Rating, 1–5.
    pub rating: u8,
    pub comment: String,
}

/// Infer an attachment's media type from its file extension.
///
/// Unrecognized or absent extensions default to `image/jpeg`, which is what
/// the backend assumes for untyped uploads.
pub fn media_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

pub async fn list(client: &ApiClient) -> Result<Vec<Repair>, ApiError> {
    let envelope: StatusEnvelope<Vec<RepairWire>> = client.get("repairs").await?;
    Ok(envelope
        .into_data("repairs")?
        .into_iter()
        .map(RepairWire::into_domain)
        .collect())
}

pub async fn detail(client: &ApiClient, id: &str) -> Result<Repair, ApiError> {
    let envelope: StatusEnvelope<RepairWire> = client.get(&format!("repairs/{id}")).await?;
    Ok(envelope.into_data("repair")?.into_domain())
}

/// Submit a new repair request as a multipart form.
pub async fn submit(client: &ApiClient, form: &RepairForm) -> Result<(), ApiError> {
    let mut multipart = Form::new()
        .text("report_date", form.report_date.clone())
        .text("report_time", form.report_time.clone())
        .text("reporter_name", form.reporter_name.clone())
        .text("reporter_phone", form.reporter_phone.clone())
        .text("building_id", form.building_id.clone())
        .text("floor_id", form.floor_id.clone())
        .text("room_id", form.room_id.clone())
        .text("description", form.description.clone());

    for image in &form.images {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(media_type_for(&image.filename))?;
        multipart = multipart.part("images[]", part);
    }

    let reply: MutationReply = client.post_multipart("repairs", multipart).await?;
    match reply.outcome() {
        MutationOutcome::Success | MutationOutcome::Warning => Ok(()),
        MutationOutcome::Error => Err(ApiError::Backend(
            reply
                .message
                .unwrap_or_else(|| "repair submission rejected".to_owned()),
        )),
    }
}

pub async fn submit_feedback(client: &ApiClient, form: &FeedbackForm) -> Result<(), ApiError> {
    let body = json!({
        "rating": form.rating,
        "comment": form.comment,
    });
    let reply: MutationReply = client
        .post_json(&format!("repairs/{}/feedback", form.repair_id), &body)
        .await?;
    match reply.outcome() {
        MutationOutcome::Success | MutationOutcome::Warning => Ok(()),
        MutationOutcome::Error => Err(ApiError::Backend(
            reply
                .message
                .unwrap_or_else(|| "feedback submission rejected".to_owned()),
        )),
    }
}

/// Move a ticket to a new lifecycle status. The reply's tri-state outcome is
/// returned as-is for the caller to render.
pub async fn update_status(
    client: &ApiClient,
    id: &str,
    status: &RepairStatus,
) -> Result<MutationReply, ApiError> {
    client
        .post_json(
            &format!("repairs/{id}/status"),
            &json!({ "status": status.as_str() }),
        )
        .await
}

pub async fn update_process_date(
    client: &ApiClient,
    id: &str,
    date: &str,
    time: &str,
) -> Result<MutationReply, ApiError> {
    client
        .post_json(
            &format!("repairs/{id}/process-date"),
            &json!({ "process_date": date, "process_time": time }),
        )
        .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
