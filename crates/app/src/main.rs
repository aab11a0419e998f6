// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Category, Cover, Daemon, Health, Init, Post, Version};

command_enum! {
    (Category, Category),
    (Cover, Cover),
    (Daemon, Daemon),
    (Health, Health),
    (Init, Init),
    (Post, Post),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Remote: explicit flag > config app_port > localhost:8080
    let remote = cli::op::resolve_remote(args.remote, args.config_path.clone());
    // Token: explicit flag or PUDDING_TOKEN > first static token in config
    let token = cli::op::resolve_token(args.token, args.config_path.clone());

    let ctx = match cli::op::OpContext::new(remote, token, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
