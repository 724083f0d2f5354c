use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    UserId,
    ServiceName,
    Price,
    StartDate,
    EndDate,
}

fn subscriptions_table() -> TableCreateStatement {
    Table::create()
        .table(Subscriptions::Table)
        .if_not_exists()
        .col(ColumnDef::new(Subscriptions::UserId).uuid().not_null())
        .col(ColumnDef::new(Subscriptions::ServiceName).string().not_null())
        .col(ColumnDef::new(Subscriptions::Price).integer().not_null())
        .col(ColumnDef::new(Subscriptions::StartDate).date().not_null())
        .col(ColumnDef::new(Subscriptions::EndDate).date().null())
        .primary_key(
            Index::create()
                .name("pk_subscriptions")
                .col(Subscriptions::UserId)
                .col(Subscriptions::ServiceName),
        )
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(subscriptions_table()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_user_dates")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::StartDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_has_no_length_limit() {
        let sql = subscriptions_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains("\"service_name\" varchar"), "{sql}");
        assert!(!sql.contains("varchar("), "{sql}");
    }
}
