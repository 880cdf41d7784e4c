use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Name lookups go through LOWER(nome) LIKE ...
        manager
            .create_index(
                Index::create()
                    .name("idx_produto_nome")
                    .table(Produto::Table)
                    .col(Produto::Nome)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_produto_nome").table(Produto::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Produto { Table, Nome }
