//! Command-line subcommands and their execution against an [`ActorHubApi`].

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::debug;
use serde_json::Value;
use std::path::PathBuf;

use crate::client::ActorHubApi;
use crate::models::{
    ConsentCheckRequest, LicenseListRequest, LicenseType, MarketplaceListRequest,
    PurchaseLicenseRequest, UsageType, VerifyRequest,
};

mod image;

pub use image::ImageSource;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check whether an image contains protected identities
    Verify(VerifyArgs),

    /// Show details of an identity
    Identity {
        #[arg(value_name = "IDENTITY_ID")]
        id: String,
    },

    /// Check consent for a face before generating content with it
    Consent(ConsentArgs),

    /// Search marketplace listings
    Marketplace(MarketplaceArgs),

    /// List licenses bought with this API key
    Licenses(LicensesArgs),

    /// Start a license purchase checkout
    Purchase(PurchaseArgs),

    /// Show Actor Pack training status
    ActorPack {
        #[arg(value_name = "PACK_ID")]
        id: String,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ImageArgs {
    /// Public URL of the image
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Local image file, sent inline as base64
    #[arg(long = "file", value_name = "PATH", conflicts_with = "base64")]
    pub file: Option<PathBuf>,

    /// Image data already encoded as base64
    #[arg(long = "base64", value_name = "DATA")]
    pub base64: Option<String>,
}

impl From<&ImageArgs> for ImageSource {
    fn from(args: &ImageArgs) -> Self {
        ImageSource {
            url: args.url.clone(),
            file: args.file.clone(),
            base64: args.base64.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// Include license options for matched identities
    #[arg(long)]
    pub license_options: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ConsentArgs {
    #[command(flatten)]
    pub image: ImageArgs,

    /// Precomputed face embedding, comma separated
    #[arg(long, value_name = "FLOATS", value_delimiter = ',')]
    pub embedding: Vec<f64>,

    /// Generation platform (e.g. runway)
    #[arg(long)]
    pub platform: String,

    /// Intended use (e.g. video)
    #[arg(long)]
    pub intended_use: String,

    /// Region code (e.g. US)
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct MarketplaceArgs {
    /// Free-text search
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Tags, comma separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    #[arg(long)]
    pub featured: Option<bool>,

    #[arg(long, value_name = "USD")]
    pub min_price: Option<f64>,

    #[arg(long, value_name = "USD")]
    pub max_price: Option<f64>,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LicensesArgs {
    /// Only licenses in this status (e.g. active)
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PurchaseArgs {
    #[arg(value_name = "IDENTITY_ID")]
    pub identity_id: String,

    /// standard, extended or exclusive
    #[arg(long, default_value = "standard")]
    pub license_type: LicenseType,

    /// personal, editorial, commercial or educational
    #[arg(long)]
    pub usage_type: UsageType,

    #[arg(long)]
    pub project_name: String,

    #[arg(long, default_value = "")]
    pub project_description: String,

    /// License length in days (server default 30)
    #[arg(long)]
    pub duration_days: Option<u32>,

    /// Platform the content may appear on; repeatable
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub allowed_platforms: Vec<String>,

    #[arg(long)]
    pub max_impressions: Option<u64>,

    #[arg(long)]
    pub max_outputs: Option<u64>,
}

/// Runs `command` and returns the response as JSON.
#[tracing::instrument(skip(api))]
pub async fn execute<A: ActorHubApi + ?Sized>(api: &A, command: Command) -> Result<Value> {
    debug!("Executing {:?}", command);

    let value = match command {
        Command::Verify(args) => {
            let (image_url, image_base64) = ImageSource::from(&args.image).resolve()?;
            let request = VerifyRequest {
                image_url,
                image_base64,
                include_license_options: args.license_options,
            };
            serde_json::to_value(api.verify(&request).await.context("Verification failed")?)?
        }
        Command::Identity { id } => serde_json::to_value(
            api.get_identity(&id)
                .await
                .with_context(|| format!("Failed to fetch identity {}", id))?,
        )?,
        Command::Consent(args) => {
            let (image_url, image_base64) = ImageSource::from(&args.image).resolve()?;
            let request = ConsentCheckRequest {
                image_url,
                image_base64,
                face_embedding: (!args.embedding.is_empty()).then_some(args.embedding),
                platform: args.platform,
                intended_use: args.intended_use,
                region: args.region,
            };
            serde_json::to_value(
                api.check_consent(&request)
                    .await
                    .context("Consent check failed")?,
            )?
        }
        Command::Marketplace(args) => {
            let request = MarketplaceListRequest {
                query: args.query,
                category: args.category,
                tags: args.tags,
                featured: args.featured,
                min_price: args.min_price,
                max_price: args.max_price,
                sort_by: args.sort_by,
                page: args.page,
                limit: args.limit,
            };
            serde_json::to_value(
                api.list_marketplace(&request)
                    .await
                    .context("Failed to list marketplace")?,
            )?
        }
        Command::Licenses(args) => {
            let request = LicenseListRequest {
                status: args.status,
                page: args.page,
                limit: args.limit,
            };
            serde_json::to_value(
                api.get_my_licenses(&request)
                    .await
                    .context("Failed to list licenses")?,
            )?
        }
        Command::Purchase(args) => {
            let request = PurchaseLicenseRequest {
                identity_id: args.identity_id,
                license_type: args.license_type,
                usage_type: args.usage_type,
                project_name: args.project_name,
                project_description: args.project_description,
                duration_days: args.duration_days,
                allowed_platforms: args.allowed_platforms,
                max_impressions: args.max_impressions,
                max_outputs: args.max_outputs,
            };
            serde_json::to_value(
                api.purchase_license(&request)
                    .await
                    .context("License purchase failed")?,
            )?
        }
        Command::ActorPack { id } => serde_json::to_value(
            api.get_actor_pack(&id)
                .await
                .with_context(|| format!("Failed to fetch actor pack {}", id))?,
        )?,
    };

    Ok(value)
}
