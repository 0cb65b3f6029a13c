//! Shared helpers for the SOS relay workspace: logging setup, runtime
//! directory checks and small response types used by more than one crate.

pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_body_serializes_message_key() {
        let body = types::MessageBody::new("CORS OK");
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"message": "CORS OK"}));
    }
}
