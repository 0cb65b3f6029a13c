use async_trait::async_trait;
use models::entity::sos_request::{self, ActiveModel, Column, Entity};
use models::{sos, SosRecord, SosStatus, TypeFilter};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

use super::{apply_status, RecordFilter, RecordStore, StatusFilter};
use crate::errors::ServiceError;

/// SeaORM-backed table store (`sos_request`).
pub struct SeaOrmRecordStore {
    pub db: DatabaseConnection,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(m: sos_request::Model) -> Result<SosRecord, ServiceError> {
    SosRecord::try_from(m).map_err(|e| ServiceError::Store(format!("corrupt row: {e}")))
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn put(&self, record: SosRecord) -> Result<(), ServiceError> {
        Entity::insert(ActiveModel::from(&record))
            .exec_without_returning(&self.db)
            .await
            .map_err(ServiceError::store)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SosRecord>, ServiceError> {
        Entity::find_by_id(id.to_string())
            .filter(Column::Ttl.gt(sos::now_secs()))
            .one(&self.db)
            .await
            .map_err(ServiceError::store)?
            .map(to_record)
            .transpose()
    }

    async fn update_status(
        &self,
        id: &str,
        status: SosStatus,
    ) -> Result<(SosRecord, bool), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::store)?;
        let row = Entity::find_by_id(id.to_string())
            .filter(Column::Ttl.gt(sos::now_secs()))
            .one(&txn)
            .await
            .map_err(ServiceError::store)?
            .ok_or_else(|| ServiceError::not_found("SOS submission"))?;

        let mut rec = to_record(row.clone())?;
        let changed = apply_status(&mut rec, status, sos::now_millis())?;
        if changed {
            let mut am: ActiveModel = row.into();
            am.status = Set(rec.status.as_str().to_string());
            am.updated_at = Set(rec.updated_at);
            am.update(&txn).await.map_err(ServiceError::store)?;
        }
        txn.commit().await.map_err(ServiceError::store)?;
        Ok((rec, changed))
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<SosRecord>, ServiceError> {
        let mut query = Entity::find().filter(Column::Ttl.gt(sos::now_secs()));
        query = match filter.kind {
            TypeFilter::Any => query,
            TypeFilter::Kind(kind) => query.filter(Column::Kind.eq(kind.as_str())),
            TypeFilter::Unknown => return Ok(Vec::new()),
        };
        query = match filter.status {
            StatusFilter::Unresolved => {
                query.filter(Column::Status.ne(SosStatus::Resolved.as_str()))
            }
            StatusFilter::Only(s) => query.filter(Column::Status.eq(s.as_str())),
            StatusFilter::Any => query,
        };
        let rows = query.all(&self.db).await.map_err(ServiceError::store)?;
        debug!(count = rows.len(), "table store scan");
        rows.into_iter().map(to_record).collect()
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Ttl.gt(sos::now_secs()))
            .exec(&self.db)
            .await
            .map_err(ServiceError::store)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("SOS submission"));
        }
        Ok(())
    }

    async fn purge_expired(&self, now_secs: i64) -> Result<usize, ServiceError> {
        let res = Entity::delete_many()
            .filter(Column::Ttl.lte(now_secs))
            .exec(&self.db)
            .await
            .map_err(ServiceError::store)?;
        Ok(res.rows_affected as usize)
    }
}
