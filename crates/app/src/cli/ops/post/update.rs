use clap::Args;
use uuid::Uuid;

use pudding_blog::http_server::api::posts::UpdatePostRequest;

use super::{detail, PostFields, PostWriteOpError};

#[derive(Args, Debug, Clone)]
pub struct Update {
    /// Post to update
    pub post_id: Uuid,

    #[command(flatten)]
    pub fields: PostFields,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Update {
    type Error = PostWriteOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let draft = self.fields.clone().into_draft().await?;
        let post = ctx
            .client
            .call(UpdatePostRequest {
                post_id: self.post_id,
                draft,
            })
            .await?;
        Ok(format!("Updated post\n{}", detail(&post)))
    }
}
