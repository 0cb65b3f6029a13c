use std::path::PathBuf;

use async_trait::async_trait;
use models::{sos, EmergencyType, ListQuery, Location, SosRecord, SubmitSos};
use service::records::{FileRecordStore, RecordStore};
use service::SosService;
use tracing::info;

use crate::api::{Backend, SosApi};
use crate::error::ClientError;

/// Local fallback backed by a JSON file on this device. Runs the same
/// service rules as the server.
pub struct LocalSosApi {
    service: SosService<FileRecordStore>,
}

/// Sample requests around Manila: (type, lat, lng, notes, minutes ago).
const DEMO_REQUESTS: [(EmergencyType, f64, f64, &str, i64); 5] = [
    (
        EmergencyType::Medical,
        14.5995,
        120.9842,
        "Elderly person needs urgent medical attention",
        60,
    ),
    (EmergencyType::Food, 14.6091, 121.0223, "Family of 5 needs food supplies", 120),
    (EmergencyType::Shelter, 14.5547, 121.0244, "House destroyed, need temporary shelter", 180),
    (EmergencyType::Rescue, 14.6507, 121.0494, "People trapped on rooftop due to flooding", 30),
    (EmergencyType::Water, 14.5764, 120.9772, "Clean drinking water urgently needed", 90),
];

impl LocalSosApi {
    /// Open the store file, creating its directory when missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ClientError> {
        let store = FileRecordStore::open(path).await?;
        Ok(Self { service: SosService::new(store) })
    }

    /// Insert the demo requests when the store holds no live records.
    /// Returns how many were inserted.
    pub async fn seed_demo_data(&self) -> Result<usize, ClientError> {
        if !self.service.is_empty().await? {
            return Ok(0);
        }
        let now = sos::now_millis();
        for (kind, lat, lng, notes, minutes_ago) in DEMO_REQUESTS {
            let created = now - minutes_ago * 60_000;
            let record = SosRecord::new(kind, Location { lat, lng }, notes.to_string(), created);
            self.service.store().put(record).await?;
        }
        info!(count = DEMO_REQUESTS.len(), "seeded local store with demo requests");
        Ok(DEMO_REQUESTS.len())
    }
}

#[async_trait]
impl SosApi for LocalSosApi {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    async fn submit(&self, input: SubmitSos) -> Result<SosRecord, ClientError> {
        Ok(self.service.submit(input).await?)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<SosRecord>, ClientError> {
        Ok(self.service.list(query).await?)
    }

    async fn resolve(&self, id: &str) -> Result<SosRecord, ClientError> {
        Ok(self.service.resolve(id).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        Ok(self.service.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::SosStatus;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("sos_local_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn local_round_trip() -> anyhow::Result<()> {
        let path = temp_path();
        let api = LocalSosApi::open(&path).await?;

        let rec = api.submit(SubmitSos::new(EmergencyType::Shelter, 14.55, 121.02, "roof gone")).await?;
        let listed = api.list(&ListQuery::default()).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].kind, EmergencyType::Shelter);
        assert_eq!(listed[0].location, rec.location);
        assert_eq!(listed[0].notes, "roof gone");

        let resolved = api.resolve(&rec.id).await?;
        assert_eq!(resolved.status, SosStatus::Resolved);
        assert!(api.list(&ListQuery::default()).await?.is_empty());
        let only_resolved = ListQuery::default().with_status(SosStatus::Resolved);
        assert_eq!(api.list(&only_resolved).await?.len(), 1);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn open_creates_missing_directory() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("sos_local_dir_{}", uuid::Uuid::new_v4()));
        let path = dir.join("device").join("local_sos.json");
        let api = LocalSosApi::open(&path).await?;
        assert!(api.list(&ListQuery::default()).await?.is_empty());
        assert!(tokio::fs::metadata(&path).await?.is_file());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() -> anyhow::Result<()> {
        let path = temp_path();
        let api = LocalSosApi::open(&path).await?;
        assert!(matches!(api.resolve("missing").await, Err(ClientError::NotFound(_))));
        assert!(matches!(api.delete("missing").await, Err(ClientError::NotFound(_))));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn validation_matches_server_rules() -> anyhow::Result<()> {
        let path = temp_path();
        let api = LocalSosApi::open(&path).await?;
        let no_type = SubmitSos { kind: None, ..SubmitSos::new(EmergencyType::Food, 1.0, 1.0, "") };
        assert!(matches!(api.submit(no_type).await, Err(ClientError::Validation(_))));
        assert!(api.submit(SubmitSos::new(EmergencyType::Food, 0.0, 0.0, "")).await.is_ok());
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn demo_seed_runs_once() -> anyhow::Result<()> {
        let path = temp_path();
        let api = LocalSosApi::open(&path).await?;
        assert_eq!(api.seed_demo_data().await?, 5);
        assert_eq!(api.seed_demo_data().await?, 0);

        let listed = api.list(&ListQuery::default()).await?;
        assert_eq!(listed.len(), 5);
        // 30 minutes ago is the newest sample
        assert_eq!(listed[0].kind, EmergencyType::Rescue);
        assert_eq!(listed[4].kind, EmergencyType::Shelter);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
