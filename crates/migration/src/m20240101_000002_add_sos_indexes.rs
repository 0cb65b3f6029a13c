//! Secondary indexes for the expiry sweep and status-filtered scans.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_sos_request_ttl")
                    .table(SosRequest::Table)
                    .col(SosRequest::Ttl)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sos_request_status_type")
                    .table(SosRequest::Table)
                    .col(SosRequest::Status)
                    .col(SosRequest::Type)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sos_request_status_type").table(SosRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sos_request_ttl").table(SosRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SosRequest {
    Table,
    Type,
    Status,
    Ttl,
}
