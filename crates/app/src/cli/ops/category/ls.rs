use pudding_blog::http_server::api::categories::ListCategoriesRequest;
use pudding_blog::http_server::api::client::ApiError;

#[async_trait::async_trait]
impl crate::cli::op::Op for ListCategoriesRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let categories = ctx.client.call(self.clone()).await?;

        if categories.is_empty() {
            return Ok("No categories found".to_string());
        }

        Ok(categories
            .iter()
            .map(|c| format!("{}  {}", c.id, c.name))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
