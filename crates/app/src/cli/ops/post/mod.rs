use std::path::PathBuf;

use clap::{Args, Subcommand};
use uuid::Uuid;

use common::prelude::{Post as BlogPost, PostDraft};
use pudding_blog::http_server::api::client::ApiError;
use pudding_blog::http_server::api::posts::{DeletePostRequest, GetPostRequest, ListPostsRequest};

pub mod create;
pub mod ls;
pub mod rm;
pub mod show;
pub mod update;

use crate::cli::op::Op;

crate::command_enum! {
    (Ls, ListPostsRequest),
    (Show, GetPostRequest),
    (Create, create::Create),
    (Update, update::Update),
    (Rm, DeletePostRequest),
}

pub type PostCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Post {
    #[command(subcommand)]
    pub command: PostCommand,
}

#[async_trait::async_trait]
impl Op for Post {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// Every writable field of a post. Updates replace all of them.
#[derive(Args, Debug, Clone)]
pub struct PostFields {
    #[arg(long)]
    pub title: String,

    /// Post body (a small HTML subset is rendered)
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the post body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Key returned by `pudding cover upload`
    #[arg(long)]
    pub cover_key: String,

    /// Category id, repeat for several
    #[arg(long = "category")]
    pub categories: Vec<Uuid>,

    #[arg(long)]
    pub shop_name: Option<String>,

    #[arg(long)]
    pub business_hours: Option<String>,

    #[arg(long)]
    pub phone_number: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PostWriteOpError {
    #[error("failed to read {0}: {1}")]
    ReadContent(PathBuf, std::io::Error),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl PostFields {
    pub async fn into_draft(self) -> Result<PostDraft, PostWriteOpError> {
        let content = match (self.content, self.content_file) {
            (Some(content), _) => content,
            (None, Some(path)) => tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| PostWriteOpError::ReadContent(path, e))?,
            (None, None) => String::new(),
        };

        Ok(PostDraft {
            title: self.title,
            content,
            cover_image_key: self.cover_key,
            category_ids: self.categories,
            shop_name: self.shop_name,
            business_hours: self.business_hours,
            phone_number: self.phone_number,
        })
    }
}

fn category_names(post: &BlogPost) -> String {
    post.categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per post for listings
pub(crate) fn summary_line(post: &BlogPost) -> String {
    format!(
        "{}  {}  {}  [{}]",
        post.id,
        post.created_at.format("%Y-%m-%d %H:%M"),
        post.title,
        category_names(post)
    )
}

/// Every field of a post
pub(crate) fn detail(post: &BlogPost) -> String {
    let mut lines = vec![
        format!("id:             {}", post.id),
        format!("title:          {}", post.title),
        format!("categories:     {}", category_names(post)),
        format!("cover key:      {}", post.cover_image_key),
    ];
    if let Some(shop_name) = &post.shop_name {
        lines.push(format!("shop name:      {}", shop_name));
    }
    if let Some(hours) = &post.business_hours {
        lines.push(format!("business hours: {}", hours));
    }
    if let Some(phone) = &post.phone_number {
        lines.push(format!("phone number:   {}", phone));
    }
    lines.push(format!("created:        {}", post.created_at.to_rfc3339()));
    lines.push(format!("updated:        {}", post.updated_at.to_rfc3339()));
    lines.push(String::new());
    lines.push(post.content.clone());
    lines.join("\n")
}
