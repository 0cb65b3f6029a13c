//! Create `sos_request` table.
//! One row per SOS request, keyed by id, with an epoch-seconds `ttl` column
//! used for expiry.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SosRequest::Table)
                    .if_not_exists()
                    .col(string_len(SosRequest::Id, 64).primary_key())
                    .col(string_len(SosRequest::Type, 16).not_null())
                    .col(double(SosRequest::Lat).not_null())
                    .col(double(SosRequest::Lng).not_null())
                    .col(text(SosRequest::Notes).not_null())
                    .col(big_integer(SosRequest::Timestamp).not_null())
                    .col(string_len(SosRequest::Status, 16).not_null())
                    .col(big_integer(SosRequest::Ttl).not_null())
                    .col(big_integer_null(SosRequest::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SosRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SosRequest {
    Table,
    Id,
    Type,
    Lat,
    Lng,
    Notes,
    Timestamp,
    Status,
    Ttl,
    UpdatedAt,
}
