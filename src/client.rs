//! Typed wrappers over the ActorHub REST endpoints.

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Dispatcher};
use crate::models::{
    ActorPackResponse, ConsentCheckRequest, ConsentCheckResponse, IdentityResponse,
    LicenseListRequest, LicenseResponse, MarketplaceListRequest, MarketplaceListingResponse,
    PurchaseLicenseRequest, PurchaseResponse, VerifyRequest, VerifyResponse,
};

/// The operations the ActorHub API offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorHubApi: Send + Sync {
    /// Checks whether an image contains protected identities.
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse>;

    async fn get_identity(&self, identity_id: &str) -> Result<IdentityResponse>;

    /// Checks consent for a face before AI generation.
    async fn check_consent(&self, request: &ConsentCheckRequest) -> Result<ConsentCheckResponse>;

    async fn list_marketplace(
        &self,
        request: &MarketplaceListRequest,
    ) -> Result<Vec<MarketplaceListingResponse>>;

    /// Licenses bought by the owner of the API key.
    async fn get_my_licenses(&self, request: &LicenseListRequest) -> Result<Vec<LicenseResponse>>;

    /// Starts a checkout for a license. Duration defaults to 30 days.
    async fn purchase_license(&self, request: &PurchaseLicenseRequest) -> Result<PurchaseResponse>;

    /// Training status and details of an Actor Pack.
    async fn get_actor_pack(&self, pack_id: &str) -> Result<ActorPackResponse>;
}

/// ActorHub API client.
///
/// Cheap to clone; clones share one connection pool. Every call made through
/// a client returned by [`Client::with_cancellation`] aborts with
/// [`Error::Cancelled`] once that token fires.
#[derive(Debug, Clone)]
pub struct Client {
    dispatcher: Dispatcher,
    cancel: CancellationToken,
}

impl Client {
    /// Client with default settings for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
            cancel: CancellationToken::new(),
        })
    }

    /// Client configured from `ACTORHUB_API_KEY` and `ACTORHUB_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Handle sharing this client's transport whose calls honor `cancel`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            cancel,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatches `request`; an empty success body becomes `T::default()`.
    async fn fetch<T: DeserializeOwned + Default>(&self, request: ApiRequest) -> Result<T> {
        Ok(self
            .dispatcher
            .send(&request, &self.cancel)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl ActorHubApi for Client {
    #[tracing::instrument(skip(self, request))]
    async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse> {
        if !request.has_image() {
            return Err(Error::local_validation(
                "Must provide image_url or image_base64",
            ));
        }
        self.fetch(ApiRequest::post("/api/v1/identity/verify").json(request)?)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_identity(&self, identity_id: &str) -> Result<IdentityResponse> {
        let path = format!("/api/v1/identity/{}", urlencoding::encode(identity_id));
        self.fetch(ApiRequest::get(path)).await
    }

    #[tracing::instrument(skip(self, request))]
    async fn check_consent(&self, request: &ConsentCheckRequest) -> Result<ConsentCheckResponse> {
        if !request.has_face() {
            return Err(Error::local_validation(
                "Must provide image_url, image_base64, or face_embedding",
            ));
        }
        self.fetch(ApiRequest::post("/api/v1/consent/check").json(request)?)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_marketplace(
        &self,
        request: &MarketplaceListRequest,
    ) -> Result<Vec<MarketplaceListingResponse>> {
        let query = request.to_query();
        debug!("Listing marketplace with {} filters", query.len());
        self.fetch(ApiRequest::get("/api/v1/marketplace/listings").query(query))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_my_licenses(&self, request: &LicenseListRequest) -> Result<Vec<LicenseResponse>> {
        self.fetch(ApiRequest::get("/api/v1/marketplace/licenses/mine").query(request.to_query()))
            .await
    }

    #[tracing::instrument(skip(self, request))]
    async fn purchase_license(&self, request: &PurchaseLicenseRequest) -> Result<PurchaseResponse> {
        let request = request.with_default_duration();
        self.fetch(ApiRequest::post("/api/v1/marketplace/license/purchase").json(&request)?)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_actor_pack(&self, pack_id: &str) -> Result<ActorPackResponse> {
        let path = format!("/api/v1/actor-packs/status/{}", urlencoding::encode(pack_id));
        self.fetch(ApiRequest::get(path)).await
    }
}
