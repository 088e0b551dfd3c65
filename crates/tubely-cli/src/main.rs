//! Tubely CLI - mint access tokens and upload thumbnails.
//!
//! `mint-token` signs with JWT_SECRET. `create-video` and `upload-thumbnail`
//! talk to TUBELY_API_URL (default http://localhost:8091) with TUBELY_TOKEN.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tubely_cli::{content_type_for_path, init_tracing, ApiClient};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tubely", about = "Tubely API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an access token for a user
    MintToken {
        /// User UUID the token is issued for
        #[arg(long)]
        user_id: Uuid,
        /// Token lifetime in seconds
        #[arg(long, default_value = "3600")]
        expires_in_secs: i64,
    },
    /// Create a video owned by the token's user
    CreateVideo {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Upload a thumbnail for a video
    UploadThumbnail {
        /// Video UUID
        video_id: Uuid,
        /// Path to a PNG or JPEG file
        file: PathBuf,
        /// Override the content type guessed from the file extension
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::MintToken {
            user_id,
            expires_in_secs,
        } => {
            let secret = std::env::var("JWT_SECRET").context("Set JWT_SECRET to sign tokens")?;
            let token = tubely_api::auth::make_jwt(
                user_id,
                &secret,
                chrono::Duration::seconds(expires_in_secs),
            )?;
            println!("{}", token);
        }
        Commands::CreateVideo { title, description } => {
            let client = ApiClient::from_env()?;
            let video = client.create_video(&title, &description).await?;
            let out = serde_json::to_string_pretty(&video).context("Serialize response")?;
            println!("{}", out);
        }
        Commands::UploadThumbnail {
            video_id,
            file,
            content_type,
        } => {
            let client = ApiClient::from_env()?;
            let content_type =
                content_type.unwrap_or_else(|| content_type_for_path(&file).to_string());
            let video = client
                .upload_thumbnail(video_id, &file, &content_type)
                .await?;
            let out = serde_json::to_string_pretty(&video).context("Serialize response")?;
            println!("{}", out);
        }
    }

    Ok(())
}
