use pudding_blog::http_server::api::client::ApiError;
use pudding_blog::http_server::api::posts::ListPostsRequest;

use super::summary_line;

#[async_trait::async_trait]
impl crate::cli::op::Op for ListPostsRequest {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let posts = ctx.client.call(self.clone()).await?;

        if posts.is_empty() {
            return Ok("No posts found".to_string());
        }

        Ok(posts.iter().map(summary_line).collect::<Vec<_>>().join("\n"))
    }
}
