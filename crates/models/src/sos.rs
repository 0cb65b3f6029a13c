//! SOS request domain model.
//!
//! `SosRecord` is both the persisted shape and the JSON wire shape
//! (camelCase keys, `type` for the emergency kind).

use std::{fmt, str::FromStr};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Records expire seven days after creation.
pub const TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Sentinel accepted by listing filters meaning "every type".
pub const ALL_TYPES: &str = "all";

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    Medical,
    Food,
    Shelter,
    Rescue,
    Water,
    Other,
}

/// Display metadata for an emergency type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub value: EmergencyType,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

const fn type_info(
    value: EmergencyType,
    label: &'static str,
    color: &'static str,
    icon: &'static str,
) -> TypeInfo {
    TypeInfo { value, label, color, icon }
}

const TYPE_INFO: [TypeInfo; 6] = [
    type_info(EmergencyType::Medical, "Medical Emergency", "#ef4444", "🏥"),
    type_info(EmergencyType::Food, "Food & Supplies", "#f59e0b", "🍽️"),
    type_info(EmergencyType::Shelter, "Shelter Needed", "#8b5cf6", "🏠"),
    type_info(EmergencyType::Rescue, "Rescue Required", "#ec4899", "🚁"),
    type_info(EmergencyType::Water, "Water Needed", "#06b6d4", "💧"),
    type_info(EmergencyType::Other, "Other", "#6b7280", "📢"),
];

impl EmergencyType {
    pub const ALL: [EmergencyType; 6] = [
        EmergencyType::Medical,
        EmergencyType::Food,
        EmergencyType::Shelter,
        EmergencyType::Rescue,
        EmergencyType::Water,
        EmergencyType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::Medical => "medical",
            EmergencyType::Food => "food",
            EmergencyType::Shelter => "shelter",
            EmergencyType::Rescue => "rescue",
            EmergencyType::Water => "water",
            EmergencyType::Other => "other",
        }
    }

    pub fn info(&self) -> &'static TypeInfo {
        // TYPE_INFO is ordered like the enum
        &TYPE_INFO[*self as usize]
    }

    /// Metadata for a raw type string; unknown values fall back to `other`.
    pub fn lookup_info(raw: &str) -> &'static TypeInfo {
        raw.parse::<EmergencyType>()
            .unwrap_or(EmergencyType::Other)
            .info()
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmergencyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::Parse(format!("unknown emergency type: {s}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SosStatus {
    Active,
    Resolved,
}

impl SosStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SosStatus::Active => "active",
            SosStatus::Resolved => "resolved",
        }
    }

    /// Status only moves forward: active -> resolved.
    pub fn can_transition_to(&self, next: SosStatus) -> bool {
        !matches!((self, next), (SosStatus::Resolved, SosStatus::Active))
    }
}

impl fmt::Display for SosStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SosStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SosStatus::Active),
            "resolved" => Ok(SosStatus::Resolved),
            other => Err(ModelError::Parse(format!("unknown status: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SosRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EmergencyType,
    pub location: Location,
    #[serde(default)]
    pub notes: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub status: SosStatus,
    /// Expiry, epoch seconds.
    pub ttl: i64,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl SosRecord {
    /// Fresh active record created at `now_ms`.
    pub fn new(kind: EmergencyType, location: Location, notes: String, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            location,
            notes,
            timestamp: now_ms,
            status: SosStatus::Active,
            ttl: ttl_for(now_ms),
            updated_at: None,
        }
    }

    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.ttl <= now_secs
    }

    pub fn is_resolved(&self) -> bool {
        self.status == SosStatus::Resolved
    }
}

/// Expiry in epoch seconds for a record created at `created_ms`.
pub fn ttl_for(created_ms: i64) -> i64 {
    created_ms.div_euclid(1000) + TTL_SECS
}

/// Raw coordinates as submitted. Fields are optional so that a missing
/// component is reported as a validation error rather than a decode failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Submission payload: `{type, location: {lat, lng}, notes?}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitSos {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A submission that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidSubmission {
    pub kind: EmergencyType,
    pub location: Location,
    pub notes: String,
}

impl SubmitSos {
    pub fn new(kind: EmergencyType, lat: f64, lng: f64, notes: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            location: Some(LocationInput { lat: Some(lat), lng: Some(lng) }),
            notes: Some(notes.into()),
        }
    }

    /// Presence and type checks. Coordinates must be finite numbers within
    /// range; zero is a valid coordinate.
    pub fn validate(&self) -> Result<ValidSubmission, ModelError> {
        let raw_kind = self
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ModelError::Validation("Missing required field: type".into()))?;
        let kind = raw_kind
            .parse::<EmergencyType>()
            .map_err(|_| ModelError::Validation(format!("Invalid type: {raw_kind}")))?;

        let location = self
            .location
            .ok_or_else(|| ModelError::Validation("Missing required field: location".into()))?;
        let lat = coordinate("lat", location.lat, 90.0)?;
        let lng = coordinate("lng", location.lng, 180.0)?;

        Ok(ValidSubmission {
            kind,
            location: Location { lat, lng },
            notes: self.notes.clone().unwrap_or_default(),
        })
    }
}

fn coordinate(field: &str, value: Option<f64>, bound: f64) -> Result<f64, ModelError> {
    let v = value.ok_or_else(|| ModelError::Validation(format!("Missing required field: location.{field}")))?;
    if !v.is_finite() {
        return Err(ModelError::Validation(format!("location.{field} must be a finite number")));
    }
    if v.abs() > bound {
        return Err(ModelError::Validation(format!("location.{field} out of range (±{bound})")));
    }
    Ok(v)
}

/// Resolved type filter for a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// No filter: absent, blank or `"all"`.
    #[default]
    Any,
    Kind(EmergencyType),
    /// A value naming no known type. Matches nothing.
    Unknown,
}

impl TypeFilter {
    pub fn matches(&self, kind: EmergencyType) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Kind(k) => *k == kind,
            TypeFilter::Unknown => false,
        }
    }
}

/// Listing filter as received from callers. `kind` of `None`, `""` or
/// `"all"` means no type filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SosStatus>,
}

impl ListQuery {
    pub fn of_type(kind: EmergencyType) -> Self {
        Self { kind: Some(kind.as_str().to_string()), status: None }
    }

    pub fn with_status(mut self, status: SosStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Resolve the raw type filter. Matching is exact, so `"Food"` is an
    /// unknown type rather than an error.
    pub fn type_filter(&self) -> TypeFilter {
        match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_TYPES) => TypeFilter::Any,
            Some(raw) => raw
                .parse::<EmergencyType>()
                .map_or(TypeFilter::Unknown, TypeFilter::Kind),
        }
    }
}
