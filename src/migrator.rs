use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240210_000001_create_locations_table::Migration),
            Box::new(m20240210_000002_create_suppliers_table::Migration),
            Box::new(m20240210_000003_create_inputs_table::Migration),
            Box::new(m20240210_000004_create_concrete_types_table::Migration),
            Box::new(m20240210_000005_create_devices_table::Migration),
            Box::new(m20240210_000006_create_pours_table::Migration),
            Box::new(m20240210_000007_create_users_table::Migration),
        ]
    }
}

// Migration implementations. Table names follow the original deployment's
// Portuguese collection names.

mod m20240210_000001_create_locations_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000001_create_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Locations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Locations::Name).string().not_null())
                        .col(ColumnDef::new(Locations::CostCenter).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Locations {
        #[iden = "locais"]
        Table,
        Id,
        Name,
        CostCenter,
    }
}

mod m20240210_000002_create_suppliers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000002_create_suppliers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Contact).string().not_null())
                        .col(ColumnDef::new(Suppliers::Rating).small_integer().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Suppliers {
        #[iden = "fornecedores"]
        Table,
        Id,
        Name,
        Contact,
        Rating,
    }
}

mod m20240210_000003_create_inputs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000003_create_inputs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inputs::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Inputs::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Inputs::Code).integer().not_null())
                        .col(ColumnDef::new(Inputs::Name).string().not_null())
                        .col(ColumnDef::new(Inputs::Unit).string_len(8).not_null())
                        .col(ColumnDef::new(Inputs::Price).decimal().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inputs::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Inputs {
        #[iden = "insumos"]
        Table,
        Id,
        Code,
        Name,
        Unit,
        Price,
    }
}

mod m20240210_000004_create_concrete_types_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000004_create_concrete_types_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ConcreteTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ConcreteTypes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ConcreteTypes::Name).string().not_null())
                        .col(
                            ColumnDef::new(ConcreteTypes::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ConcreteTypes::CharacteristicStrength)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ConcreteTypes::Ingredients).json().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ConcreteTypes::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ConcreteTypes {
        #[iden = "tipos_concreto"]
        Table,
        Id,
        Name,
        Description,
        CharacteristicStrength,
        Ingredients,
    }
}

mod m20240210_000005_create_devices_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000005_create_devices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Devices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Devices::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Devices::DeviceType).string().not_null())
                        .col(ColumnDef::new(Devices::Ua).string().not_null())
                        .col(ColumnDef::new(Devices::LocationId).uuid().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_dispositivos_location")
                        .table(Devices::Table)
                        .col(Devices::LocationId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Devices::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Devices {
        #[iden = "dispositivos"]
        Table,
        Id,
        DeviceType,
        Ua,
        LocationId,
    }
}

mod m20240210_000006_create_pours_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000006_create_pours_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Reference columns carry no FK constraint: registry deletes must
            // never cascade into or be blocked by historical pours.
            manager
                .create_table(
                    Table::create()
                        .table(Pours::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Pours::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Pours::Date).date().not_null())
                        .col(ColumnDef::new(Pours::InvoiceNumber).string().not_null())
                        .col(ColumnDef::new(Pours::LocationId).uuid().not_null())
                        .col(ColumnDef::new(Pours::DeviceId).uuid().null())
                        .col(ColumnDef::new(Pours::SupplierId).uuid().not_null())
                        .col(ColumnDef::new(Pours::ConcreteTypeId).uuid().not_null())
                        .col(ColumnDef::new(Pours::VolumeDelivered).decimal().not_null())
                        .col(ColumnDef::new(Pours::TruckId).string().null())
                        .col(ColumnDef::new(Pours::Notes).string().null())
                        .col(ColumnDef::new(Pours::Weather).string_len(8).null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_concretagens_date")
                        .table(Pours::Table)
                        .col(Pours::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Pours::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Pours {
        #[iden = "concretagens"]
        Table,
        Id,
        Date,
        InvoiceNumber,
        LocationId,
        DeviceId,
        SupplierId,
        ConcreteTypeId,
        VolumeDelivered,
        TruckId,
        Notes,
        Weather,
    }
}

mod m20240210_000007_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240210_000007_create_users_table"
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
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
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
        Email,
        PasswordHash,
        CreatedAt,
    }
}
