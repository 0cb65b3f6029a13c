use sea_orm::{entity::prelude::*, Set};

use crate::errors::ModelError;
use crate::sos::{Location, SosRecord};

/// Row of the `sos_request` table. Enums are stored as their lowercase names.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sos_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub timestamp: i64,
    pub status: String,
    pub ttl: i64,
    pub updated_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for SosRecord {
    type Error = ModelError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(SosRecord {
            kind: m.kind.parse()?,
            status: m.status.parse()?,
            id: m.id,
            location: Location { lat: m.lat, lng: m.lng },
            notes: m.notes,
            timestamp: m.timestamp,
            ttl: m.ttl,
            updated_at: m.updated_at,
        })
    }
}

impl From<&SosRecord> for ActiveModel {
    fn from(r: &SosRecord) -> Self {
        ActiveModel {
            id: Set(r.id.clone()),
            kind: Set(r.kind.as_str().to_string()),
            lat: Set(r.location.lat),
            lng: Set(r.location.lng),
            notes: Set(r.notes.clone()),
            timestamp: Set(r.timestamp),
            status: Set(r.status.as_str().to_string()),
            ttl: Set(r.ttl),
            updated_at: Set(r.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sos::{EmergencyType, SosStatus};

    #[test]
    fn row_round_trips_into_record() {
        let row = Model {
            id: "abc".into(),
            kind: "rescue".into(),
            lat: 14.6507,
            lng: 121.0494,
            notes: "rooftop".into(),
            timestamp: 42,
            status: "resolved".into(),
            ttl: 99,
            updated_at: Some(50),
        };
        let rec = SosRecord::try_from(row).unwrap();
        assert_eq!(rec.kind, EmergencyType::Rescue);
        assert_eq!(rec.status, SosStatus::Resolved);
        assert_eq!(rec.updated_at, Some(50));
    }

    #[test]
    fn corrupt_row_is_a_parse_error() {
        let row = Model {
            id: "abc".into(),
            kind: "volcano".into(),
            lat: 0.0,
            lng: 0.0,
            notes: String::new(),
            timestamp: 0,
            status: "active".into(),
            ttl: 0,
            updated_at: None,
        };
        assert!(matches!(SosRecord::try_from(row), Err(ModelError::Parse(_))));
    }
}
