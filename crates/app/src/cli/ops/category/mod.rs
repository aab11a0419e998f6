use clap::{Args, Subcommand};

pub mod create;
pub mod ls;
pub mod rename;
pub mod rm;

use crate::cli::op::Op;
use pudding_blog::http_server::api::categories::{
    CreateCategoryRequest, DeleteCategoryRequest, ListCategoriesRequest, UpdateCategoryRequest,
};

crate::command_enum! {
    (Ls, ListCategoriesRequest),
    (Create, CreateCategoryRequest),
    (Rename, UpdateCategoryRequest),
    (Rm, DeleteCategoryRequest),
}

pub type CategoryCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Category {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[async_trait::async_trait]
impl Op for Category {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
