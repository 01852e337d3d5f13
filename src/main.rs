use anyhow::{Context, Result};
use clap::Parser;
use postcraft_rs::catalog::Catalogs;
use postcraft_rs::cli::{Args, Command};
use postcraft_rs::config::Config;
use postcraft_rs::generator::records;
use postcraft_rs::launch;
use postcraft_rs::logging;
use postcraft_rs::repository::{SqlitePostRepository, UpdateOutcome};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(args.verbose);
            error!("❌ 加载配置失败: {:#}", e);
            return Err(e);
        }
    };
    logging::init(config.verbose);

    // 各模块只向上传播错误，失败在这里统一记录一次
    run(&args.command, &config)
        .await
        .inspect_err(|e| error!("❌ 运行失败: {:#}", e))
}

async fn run(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Generate(generate) => {
            let outcome = launch(config, &generate.to_request()).await?;

            match &outcome.post.posted_url {
                Some(url) => println!("Posted: {}", url),
                None => println!("Run with the --post flag to publish this post."),
            }
        }
        Command::List => {
            let catalogs = Catalogs::load(&config.data_dir);
            println!("{}", records::render_options(&catalogs));
        }
        Command::History => {
            let repository = open_repository(&config.database.url).await?;
            println!("{}", records::history(&repository).await?);
        }
        Command::Show { id } => {
            let repository = open_repository(&config.database.url).await?;
            println!("{}", records::show(&repository, *id).await?);
        }
        Command::AttachUrl { id, url } => {
            let repository = open_repository(&config.database.url).await?;
            match records::attach_url(&repository, *id, url).await? {
                UpdateOutcome::Updated => println!("Post {} now links to {}", id, url),
                UpdateOutcome::NotFound => println!("No post with id {id}."),
            }
        }
    }

    Ok(())
}

async fn open_repository(url: &str) -> Result<SqlitePostRepository> {
    SqlitePostRepository::connect(url)
        .await
        .context(format!("Failed to open database {}", url))
}
