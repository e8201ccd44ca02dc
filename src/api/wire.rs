//! Wire-level payload shapes and their conversions into domain types.
//!
//! The backend wraps every response in one of two envelopes: repair/area
//! endpoints use a `status` string discriminator, the notification endpoint
//! a `success` boolean. Mutation endpoints reply with a tri-state
//! `success`/`warning`/`error` status rendered by callers as a toast.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::images;
use crate::types::notification::flag_de;
use crate::types::{Feedback, Repair, RepairStatus};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend-reported logical failure; carries the backend's own message.
    #[error("{0}")]
    Backend(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Tolerant deserializers
// ---------------------------------------------------------------------------

/// Deserialize a `String` from either a JSON string or a number; the PHP
/// backend is inconsistent about id fields.
pub(crate) mod string_de {
    use serde::{self, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => s,
            Raw::Int(n) => n.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// `{status: "success"|..., data, message?}` — repair and area endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct StatusEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> StatusEnvelope<T> {
    /// Unwrap the payload, mapping any non-success reply to a backend error
    /// carrying the backend's message, or a generic fallback naming `what`.
    pub fn into_data(self, what: &str) -> Result<T, ApiError> {
        if self.status == "success"
            && let Some(data) = self.data
        {
            return Ok(data);
        }
        Err(ApiError::Backend(
            self.message
                .unwrap_or_else(|| format!("failed to load {what}")),
        ))
    }
}

/// `{success: bool, data, unreadCount?, message?}` — notification endpoint.
#[derive(Debug, Deserialize)]
pub struct FlagEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, rename = "unreadCount")]
    pub unread_count: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> FlagEnvelope<T> {
    pub fn into_data(self, what: &str) -> Result<(T, Option<u32>), ApiError> {
        if self.success
            && let Some(data) = self.data
        {
            return Ok((data, self.unread_count));
        }
        Err(ApiError::Backend(
            self.message
                .unwrap_or_else(|| format!("failed to load {what}")),
        ))
    }
}

// ---------------------------------------------------------------------------
// Mutation replies
// ---------------------------------------------------------------------------

/// Result discriminator for targeted mutations.
///
/// `Warning` is not a hard failure: the backend partially accepted the
/// change (e.g. a date outside the allowed window) and the store is still
/// updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Deserialize)]
pub struct MutationReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationReply {
    pub fn outcome(&self) -> MutationOutcome {
        match self.status.as_str() {
            "success" => MutationOutcome::Success,
            "warning" => MutationOutcome::Warning,
            _ => MutationOutcome::Error,
        }
    }
}

// ---------------------------------------------------------------------------
// Repair wire type
// ---------------------------------------------------------------------------

/// Repair record as transmitted, before image-reference normalization.
#[derive(Debug, Deserialize)]
pub struct RepairWire {
    #[serde(deserialize_with = "string_de::deserialize")]
    pub id: String,
    pub report_date: String,
    #[serde(default)]
    pub report_time: String,
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_phone: String,
    #[serde(deserialize_with = "string_de::deserialize")]
    pub building_id: String,
    #[serde(deserialize_with = "string_de::deserialize")]
    pub floor_id: String,
    #[serde(deserialize_with = "string_de::deserialize")]
    pub room_id: String,
    #[serde(default)]
    pub description: String,
    /// Raw image payload; see `images::parse_image_refs` for the shapes
    /// this can take.
    #[serde(default)]
    pub image: Value,
    pub status: RepairStatus,
    #[serde(default)]
    pub received_by: Option<String>,
    #[serde(default)]
    pub process_date: Option<String>,
    #[serde(default)]
    pub process_time: Option<String>,
    #[serde(default)]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub completed_solution: Option<String>,
    #[serde(default, deserialize_with = "flag_de::deserialize")]
    pub has_feedback: bool,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub feedback_comment: Option<String>,
}

impl RepairWire {
    pub fn into_domain(self) -> Repair {
        let images = images::parse_image_refs(&self.image);
        let feedback = self.rating.map(|rating| Feedback {
            rating,
            comment: self.feedback_comment.unwrap_or_default(),
        });
        Repair {
            id: self.id,
            report_date: self.report_date,
            report_time: self.report_time,
            reporter_name: self.reporter_name,
            reporter_phone: self.reporter_phone,
            building_id: self.building_id,
            floor_id: self.floor_id,
            room_id: self.room_id,
            description: self.description,
            images,
            status: self.status,
            received_by: self.received_by,
            process_date: self.process_date,
            process_time: self.process_time,
            completed_date: self.completed_date,
            completed_solution: self.completed_solution,
            has_feedback: self.has_feedback,
            feedback,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_envelope_success_unwraps_data() {
        let envelope: StatusEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"success","data":[1,2]}"#).unwrap();
        assert_eq!(envelope.into_data("numbers").unwrap(), vec![1, 2]);
    }

    #[test]
    fn status_envelope_failure_prefers_backend_message() {
        let envelope: StatusEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"error","message":"ticket not found"}"#).unwrap();
        let err = envelope.into_data("repair").unwrap_err();
        assert_eq!(err.to_string(), "ticket not found");
    }

    #[test]
    fn status_envelope_failure_generic_fallback() {
        let envelope: StatusEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        let err = envelope.into_data("repair").unwrap_err();
        assert_eq!(err.to_string(), "failed to load repair");
    }

    #[test]
    fn success_status_without_data_is_an_error() {
        let envelope: StatusEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(envelope.into_data("repairs").is_err());
    }

    #[test]
    fn flag_envelope_carries_unread_count() {
        let envelope: FlagEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[],"unreadCount":3}"#).unwrap();
        let (data, unread) = envelope.into_data("notifications").unwrap();
        assert!(data.is_empty());
        assert_eq!(unread, Some(3));
    }

    #[test]
    fn mutation_outcomes() {
        let parse = |json: &str| -> MutationReply { serde_json::from_str(json).unwrap() };
        assert_eq!(
            parse(r#"{"status":"success"}"#).outcome(),
            MutationOutcome::Success
        );
        assert_eq!(
            parse(r#"{"status":"warning","message":"date outside window"}"#).outcome(),
            MutationOutcome::Warning
        );
        assert_eq!(
            parse(r#"{"status":"error"}"#).outcome(),
            MutationOutcome::Error
        );
        assert_eq!(
            parse(r#"{"status":"anything-else"}"#).outcome(),
            MutationOutcome::Error
        );
    }

    #[test]
    fn repair_wire_normalizes_images_and_flags() {
        let wire: RepairWire = serde_json::from_str(
            r#"{
                "id": 42,
                "report_date": "2024-06-10",
                "report_time": "09:30",
                "reporter_name": "Somchai",
                "building_id": "1",
                "floor_id": 2,
                "room_id": "3",
                "description": "AC leaking",
                "image": "[\"a.jpg\",\"b.jpg\"",
                "status": "inprogress",
                "received_by": "tech-7",
                "process_date": "2024-06-11",
                "has_feedback": "0",
                "rating": null
            }"#,
        )
        .unwrap();
        let repair = wire.into_domain();
        assert_eq!(repair.id, "42");
        assert_eq!(repair.floor_id, "2");
        assert_eq!(repair.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(repair.status, RepairStatus::InProgress);
        assert!(!repair.has_feedback);
        assert!(repair.feedback.is_none());
    }

    #[test]
    fn repair_wire_builds_feedback_from_rating() {
        let wire: RepairWire = serde_json::from_str(
            r#"{
                "id": "7",
                "report_date": "2024-05-01",
                "reporter_name": "Nok",
                "building_id": "1",
                "floor_id": "1",
                "room_id": "9",
                "description": "Door jammed",
                "status": "completed",
                "completed_solution": "Replaced hinge",
                "has_feedback": 1,
                "rating": 5,
                "feedback_comment": "fast work"
            }"#,
        )
        .unwrap();
        let repair = wire.into_domain();
        assert!(repair.has_feedback);
        let feedback = repair.feedback.unwrap();
        assert_eq!(feedback.rating, 5);
        assert_eq!(feedback.comment, "fast work");
    }
}
