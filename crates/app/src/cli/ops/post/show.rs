use pudding_blog::http_server::api::client::ApiError;
use pudding_blog::http_server::api::posts::GetPostRequest;

use super::detail;

#[async_trait::async_trait]
impl crate::cli::op::Op for GetPostRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let post = ctx.client.call(self.clone()).await?;
        Ok(detail(&post))
    }
}
