use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_centers_table::Migration),
            Box::new(m20240501_000002_create_products_table::Migration),
            Box::new(m20240501_000003_create_beneficiaries_table::Migration),
            Box::new(m20240501_000004_create_transfers_table::Migration),
            Box::new(m20240501_000005_create_notifications_table::Migration),
            Box::new(m20240501_000006_create_activity_logs_table::Migration),
            Box::new(m20240501_000007_create_users_table::Migration),
        ]
    }
}

mod m20240501_000001_create_centers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000001_create_centers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Centers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Centers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Centers::Name).string().not_null())
                        .col(ColumnDef::new(Centers::Location).string().not_null())
                        .col(ColumnDef::new(Centers::CenterType).string().not_null())
                        .col(ColumnDef::new(Centers::Status).string().not_null())
                        .col(
                            ColumnDef::new(Centers::Contact)
                                .string()
                                .not_null()
                                .default("-"),
                        )
                        .col(
                            ColumnDef::new(Centers::Population)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Centers::Capacity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Centers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Centers::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_centers_status")
                        .table(Centers::Table)
                        .col(Centers::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Centers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Centers {
        Table,
        Id,
        Name,
        Location,
        CenterType,
        Status,
        Contact,
        Population,
        Capacity,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240501_000002_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(
                            ColumnDef::new(Products::Category)
                                .string()
                                .not_null()
                                .default("other"),
                        )
                        .col(
                            ColumnDef::new(Products::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::Unit).string().not_null())
                        .col(
                            ColumnDef::new(Products::MinLevel)
                                .integer()
                                .not_null()
                                .default(10),
                        )
                        .col(ColumnDef::new(Products::Location).string().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_category")
                        .table(Products::Table)
                        .col(Products::Category)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
        Name,
        Category,
        Quantity,
        Unit,
        MinLevel,
        Location,
        UpdatedAt,
    }
}

mod m20240501_000003_create_beneficiaries_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000003_create_beneficiaries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Beneficiaries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Beneficiaries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Beneficiaries::FirstName).string().not_null())
                        .col(ColumnDef::new(Beneficiaries::LastName).string().not_null())
                        .col(ColumnDef::new(Beneficiaries::Age).integer().not_null())
                        .col(ColumnDef::new(Beneficiaries::Gender).string().not_null())
                        .col(ColumnDef::new(Beneficiaries::CenterId).uuid().null())
                        .col(ColumnDef::new(Beneficiaries::CenterName).string().null())
                        .col(
                            ColumnDef::new(Beneficiaries::Status)
                                .string()
                                .not_null()
                                .default("normal"),
                        )
                        .col(
                            ColumnDef::new(Beneficiaries::ChronicDisease)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Beneficiaries::RegisteredAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_beneficiaries_center_id")
                        .table(Beneficiaries::Table)
                        .col(Beneficiaries::CenterId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Beneficiaries::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Beneficiaries {
        Table,
        Id,
        FirstName,
        LastName,
        Age,
        Gender,
        CenterId,
        CenterName,
        Status,
        ChronicDisease,
        RegisteredAt,
    }
}

mod m20240501_000004_create_transfers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000004_create_transfers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transfers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Transfers::DocNo).string().not_null())
                        .col(
                            ColumnDef::new(Transfers::DestinationCenterId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transfers::DestinationName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transfers::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(Transfers::RequestedBy).string().not_null())
                        .col(ColumnDef::new(Transfers::ApprovedBy).string().null())
                        .col(ColumnDef::new(Transfers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Transfers::UpdatedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            // Unique: two concurrent creations computing the same sequence fail
            // loudly instead of producing duplicate document numbers.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transfers_doc_no")
                        .table(Transfers::Table)
                        .col(Transfers::DocNo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transfers_status")
                        .table(Transfers::Table)
                        .col(Transfers::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TransferItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransferItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TransferItems::TransferId).uuid().not_null())
                        .col(ColumnDef::new(TransferItems::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(TransferItems::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TransferItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(TransferItems::Unit).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transfer_items_transfer_id")
                                .from(TransferItems::Table, TransferItems::TransferId)
                                .to(Transfers::Table, Transfers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transfer_items_transfer_id")
                        .table(TransferItems::Table)
                        .col(TransferItems::TransferId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransferItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Transfers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Transfers {
        Table,
        Id,
        DocNo,
        DestinationCenterId,
        DestinationName,
        Status,
        RequestedBy,
        ApprovedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum TransferItems {
        Table,
        Id,
        TransferId,
        ProductId,
        ProductName,
        Quantity,
        Unit,
    }
}

mod m20240501_000005_create_notifications_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000005_create_notifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Notifications::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Notifications::Kind).string().not_null())
                        .col(ColumnDef::new(Notifications::Title).string().not_null())
                        .col(ColumnDef::new(Notifications::Message).string().not_null())
                        .col(
                            ColumnDef::new(Notifications::Read)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Notifications::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Notifications {
        Table,
        Id,
        Kind,
        Title,
        Message,
        Read,
        CreatedAt,
    }
}

mod m20240501_000006_create_activity_logs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000006_create_activity_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ActivityLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ActivityLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                        .col(
                            ColumnDef::new(ActivityLogs::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ActivityLogs::Actor).string().not_null())
                        .col(
                            ColumnDef::new(ActivityLogs::IpAddress)
                                .string()
                                .not_null()
                                .default("-"),
                        )
                        .col(
                            ColumnDef::new(ActivityLogs::Timestamp)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_activity_logs_timestamp")
                        .table(ActivityLogs::Table)
                        .col(ActivityLogs::Timestamp)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ActivityLogs {
        Table,
        Id,
        Action,
        Description,
        Actor,
        IpAddress,
        Timestamp,
    }
}

mod m20240501_000007_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000007_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Username).string().not_null())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Salt).string().not_null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(ColumnDef::new(Users::DisplayName).string().not_null())
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_users_username")
                        .table(Users::Table)
                        .col(Users::Username)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Users {
        Table,
        Id,
        Username,
        PasswordHash,
        Salt,
        Role,
        DisplayName,
        CreatedAt,
    }
}
