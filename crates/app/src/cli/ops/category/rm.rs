use pudding_blog::http_server::api::categories::DeleteCategoryRequest;
use pudding_blog::http_server::api::client::ApiError;

#[async_trait::async_trait]
impl crate::cli::op::Op for DeleteCategoryRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.clone()).await?;
        Ok(response.message)
    }
}
