use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608010009_create_attachments"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attachments"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("file_name")).text().not_null())
                    .col(ColumnDef::new(Alias::new("file_path")).text().not_null())
                    .col(ColumnDef::new(Alias::new("file_type")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("file_size"))
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("upload_date"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(ColumnDef::new(Alias::new("timeline_item_id")).big_integer())
                    .col(
                        ColumnDef::new(Alias::new("assignment_submission_id"))
                            .big_integer()
                            // Exactly one parent: a row belongs to a timeline item or a
                            // submission, never both and never neither.
                            .check(Expr::cust(
                                "(timeline_item_id IS NULL) <> (assignment_submission_id IS NULL)",
                            )),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("attachments"), Alias::new("timeline_item_id"))
                            .to(Alias::new("timeline_items"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                Alias::new("attachments"),
                                Alias::new("assignment_submission_id"),
                            )
                            .to(Alias::new("assignment_submissions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("attachments")).to_owned())
            .await
    }
}
