pub mod api;
pub mod db;
pub mod entity;
pub mod errors;
pub mod geo;
pub mod sos;

pub use sos::{
    EmergencyType, ListQuery, Location, LocationInput, SosRecord, SosStatus, SubmitSos, TypeFilter,
};
