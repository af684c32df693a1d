//! Initial schema migration.
//!
//! - `users`: registered members, keyed by email
//! - `teams`: registered and staged teams, keyed by team number

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Email,
    Name,
    TeamCode,
    Password,
    Role,
    TimeTable,
}

#[derive(Iden)]
enum Teams {
    Table,
    Number,
    TeamCode,
    Name,
    Registered,
    DataSetOne,
    DataSetTwo,
    DataSetThree,
    DataSetFour,
    DataSetFive,
    DataSetSix,
    DataSetSeven,
    DataSetEight,
    DataSetNine,
    DataSetTen,
}

const DATA_SETS: [Teams; 10] = [
    Teams::DataSetOne,
    Teams::DataSetTwo,
    Teams::DataSetThree,
    Teams::DataSetFour,
    Teams::DataSetFive,
    Teams::DataSetSix,
    Teams::DataSetSeven,
    Teams::DataSetEight,
    Teams::DataSetNine,
    Teams::DataSetTen,
];

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::TeamCode).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string())
                    .col(ColumnDef::new(Users::TimeTable).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-team_code")
                    .table(Users::Table)
                    .col(Users::TeamCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .to_owned(),
            )
            .await?;

        let mut teams = Table::create();
        teams
            .table(Teams::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Teams::Number)
                    .big_integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Teams::TeamCode).string().unique_key())
            .col(ColumnDef::new(Teams::Name).string())
            .col(
                ColumnDef::new(Teams::Registered)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        for column in DATA_SETS {
            teams.col(ColumnDef::new(column).text());
        }
        manager.create_table(teams.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
