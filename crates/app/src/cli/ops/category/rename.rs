use pudding_blog::http_server::api::categories::UpdateCategoryRequest;
use pudding_blog::http_server::api::client::ApiError;

#[async_trait::async_trait]
impl crate::cli::op::Op for UpdateCategoryRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let category = ctx.client.call(self.clone()).await?;
        Ok(format!("Renamed category {} to {}", category.id, category.name))
    }
}
