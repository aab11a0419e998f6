use clap::Args;

use pudding_blog::http_server::api::posts::CreatePostRequest;

use super::{detail, PostFields, PostWriteOpError};

#[derive(Args, Debug, Clone)]
pub struct Create {
    #[command(flatten)]
    pub fields: PostFields,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = PostWriteOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let draft = self.fields.clone().into_draft().await?;
        let post = ctx.client.call(CreatePostRequest { draft }).await?;
        Ok(format!("Created post\n{}", detail(&post)))
    }
}
