//! Request and response bodies of the ActorHub API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// Deserialize a value that may be null or absent as its default
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt: Option<T> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Status of an Actor Pack training job.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStatus {
    #[default]
    Queued,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Identity protection tier.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    #[default]
    Free,
    Pro,
    Enterprise,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    #[default]
    Standard,
    Extended,
    Exclusive,
    #[serde(other)]
    Unknown,
}

/// Usage category a license is bought for.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    #[default]
    Personal,
    Editorial,
    Commercial,
    Educational,
    #[serde(other)]
    Unknown,
}

impl FromStr for LicenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(LicenseType::Standard),
            "extended" => Ok(LicenseType::Extended),
            "exclusive" => Ok(LicenseType::Exclusive),
            other => Err(format!(
                "unknown license type '{}' (expected standard, extended or exclusive)",
                other
            )),
        }
    }
}

impl FromStr for UsageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal" => Ok(UsageType::Personal),
            "editorial" => Ok(UsageType::Editorial),
            "commercial" => Ok(UsageType::Commercial),
            "educational" => Ok(UsageType::Educational),
            other => Err(format!(
                "unknown usage type '{}' (expected personal, editorial, commercial or educational)",
                other
            )),
        }
    }
}

/// Face bounding box in image coordinates.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceBBox {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub x: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub y: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub width: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub height: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct LicenseOption {
    #[serde(rename = "type", default, deserialize_with = "deserialize_nullable")]
    pub license_type: LicenseType,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub price_usd: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub duration_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_impressions: Option<u64>,
}

/// One matched identity in a verification.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct VerifyResult {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license_required: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub blocked_categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license_options: Vec<LicenseOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_bbox: Option<FaceBBox>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct VerifyResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protected: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub faces_detected: u32,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub identities: Vec<VerifyResult>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub response_time_ms: u64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub request_id: String,
}

/// What an identity owner allows.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsentDetails {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub commercial_use: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub ai_training: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub video_generation: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub deepfake: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsentRestrictions {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub blocked_categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub blocked_regions: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub blocked_brands: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ConsentLicenseInfo {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<HashMap<String, f64>>,
}

/// Consent verdict for one detected face.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ConsentResult {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub consent: ConsentDetails,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub restrictions: ConsentRestrictions,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license: ConsentLicenseInfo,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ConsentCheckResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub request_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protected: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub faces_detected: u32,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub faces: Vec<ConsentResult>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_remaining: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct IdentityResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protection_level: ProtectionLevel,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub protection_mode: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub total_verifications: u64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub total_licenses: u64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub allow_commercial: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub allow_ai_training: bool,
    /// ISO 8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct MarketplaceListingResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub identity_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub base_price_usd: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub featured: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct LicenseResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub identity_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub identity_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license_type: LicenseType,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub usage_type: UsageType,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub allowed_platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_impressions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_outputs: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub price_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Which assets an Actor Pack contains.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActorPackComponents {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub face: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub voice: bool,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub motion: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ActorPackResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub identity_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub training_status: TrainingStatus,
    /// Percent complete, 0-100.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub training_progress: u8,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub training_images_count: u32,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub training_audio_seconds: u32,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub components: ActorPackComponents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lora_model_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub total_downloads: u64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Checkout session created by a license purchase.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct PurchaseResponse {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub checkout_url: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub session_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub price_usd: f64,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub license_details: Map<String, Value>,
}

/// Image to check against protected identities. Set `image_url` or `image_base64`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct VerifyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_license_options: bool,
}

impl VerifyRequest {
    pub fn from_url(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            ..Default::default()
        }
    }

    pub fn from_base64(image_base64: impl Into<String>) -> Self {
        Self {
            image_base64: Some(image_base64.into()),
            ..Default::default()
        }
    }

    pub fn with_license_options(mut self) -> Self {
        self.include_license_options = true;
        self
    }

    pub(crate) fn has_image(&self) -> bool {
        is_set(&self.image_url) || is_set(&self.image_base64)
    }
}

/// Face to check consent for, plus the intended use.
///
/// One of `image_url`, `image_base64` or `face_embedding` must be set.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ConsentCheckRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_embedding: Option<Vec<f64>>,
    pub platform: String,
    pub intended_use: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ConsentCheckRequest {
    pub(crate) fn has_face(&self) -> bool {
        is_set(&self.image_url)
            || is_set(&self.image_base64)
            || self.face_embedding.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Marketplace search filters. Unset fields are not sent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct MarketplaceListRequest {
    pub query: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MarketplaceListRequest {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_str(&mut params, "query", &self.query);
        push_str(&mut params, "category", &self.category);
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.join(",")));
        }
        if let Some(featured) = self.featured {
            params.push(("featured", featured.to_string()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("max_price", max_price.to_string()));
        }
        push_str(&mut params, "sort_by", &self.sort_by);
        push_positive(&mut params, "page", self.page);
        push_positive(&mut params, "limit", self.limit);
        params
    }
}

/// Filters for the caller's own licenses.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LicenseListRequest {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl LicenseListRequest {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_str(&mut params, "status", &self.status);
        push_positive(&mut params, "page", self.page);
        push_positive(&mut params, "limit", self.limit);
        params
    }
}

/// Days a license runs when the request leaves the duration unset.
pub const DEFAULT_LICENSE_DURATION_DAYS: u32 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct PurchaseLicenseRequest {
    pub identity_id: String,
    pub license_type: LicenseType,
    pub usage_type: UsageType,
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_impressions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_outputs: Option<u64>,
}

impl PurchaseLicenseRequest {
    /// Copy of the request with an unset or zero duration replaced by the default.
    pub(crate) fn with_default_duration(&self) -> Self {
        let mut request = self.clone();
        if request.duration_days.unwrap_or(0) == 0 {
            request.duration_days = Some(DEFAULT_LICENSE_DURATION_DAYS);
        }
        request
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn push_str(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn push_positive(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<u32>) {
    if let Some(value) = value.filter(|v| *v > 0) {
        params.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_request_omits_unset_fields() {
        let body = serde_json::to_value(VerifyRequest::from_url("https://x/img.jpg")).unwrap();
        assert_eq!(body, json!({"image_url": "https://x/img.jpg"}));

        let body = serde_json::to_value(VerifyRequest::from_base64("aGk=").with_license_options())
            .unwrap();
        assert_eq!(
            body,
            json!({"image_base64": "aGk=", "include_license_options": true})
        );
    }

    #[test]
    fn test_verify_request_has_image() {
        assert!(!VerifyRequest::default().has_image());
        assert!(
            !VerifyRequest {
                image_url: Some(String::new()),
                ..Default::default()
            }
            .has_image()
        );
        assert!(VerifyRequest::from_url("u").has_image());
        assert!(VerifyRequest::from_base64("b").has_image());
    }

    #[test]
    fn test_consent_request_has_face() {
        let base = ConsentCheckRequest {
            platform: "runway".to_string(),
            intended_use: "video".to_string(),
            ..Default::default()
        };
        assert!(!base.has_face());
        assert!(
            !ConsentCheckRequest {
                face_embedding: Some(vec![]),
                ..base.clone()
            }
            .has_face()
        );
        assert!(
            ConsentCheckRequest {
                face_embedding: Some(vec![0.1, 0.2]),
                ..base.clone()
            }
            .has_face()
        );
        assert!(
            ConsentCheckRequest {
                image_url: Some("u".to_string()),
                ..base
            }
            .has_face()
        );
    }

    #[test]
    fn test_consent_request_always_sends_platform_and_use() {
        let request = ConsentCheckRequest {
            face_embedding: Some(vec![0.5]),
            platform: "runway".to_string(),
            intended_use: "video".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"face_embedding": [0.5], "platform": "runway", "intended_use": "video"})
        );
    }

    #[test]
    fn test_marketplace_query() {
        let request = MarketplaceListRequest {
            query: Some("actor".to_string()),
            category: Some(String::new()),
            tags: vec!["drama".to_string(), "comedy".to_string()],
            featured: Some(false),
            min_price: Some(10.5),
            max_price: Some(100.0),
            sort_by: Some("popular".to_string()),
            page: Some(0),
            limit: Some(5),
        };
        assert_eq!(
            request.to_query(),
            vec![
                ("query", "actor".to_string()),
                ("tags", "drama,comedy".to_string()),
                ("featured", "false".to_string()),
                ("min_price", "10.5".to_string()),
                ("max_price", "100".to_string()),
                ("sort_by", "popular".to_string()),
                ("limit", "5".to_string()),
            ]
        );
        assert!(MarketplaceListRequest::default().to_query().is_empty());
    }

    #[test]
    fn test_license_list_query() {
        let request = LicenseListRequest {
            status: Some("active".to_string()),
            page: Some(2),
            limit: None,
        };
        assert_eq!(
            request.to_query(),
            vec![("status", "active".to_string()), ("page", "2".to_string())]
        );
    }

    #[test]
    fn test_purchase_default_duration() {
        let request = PurchaseLicenseRequest {
            identity_id: "id-1".to_string(),
            project_name: "Spot".to_string(),
            ..Default::default()
        };
        assert_eq!(request.with_default_duration().duration_days, Some(30));

        let zero = PurchaseLicenseRequest {
            duration_days: Some(0),
            ..request.clone()
        };
        assert_eq!(zero.with_default_duration().duration_days, Some(30));

        let explicit = PurchaseLicenseRequest {
            duration_days: Some(90),
            ..request
        };
        assert_eq!(explicit.with_default_duration().duration_days, Some(90));
    }

    #[test]
    fn test_purchase_request_wire_format() {
        let request = PurchaseLicenseRequest {
            identity_id: "id-1".to_string(),
            license_type: LicenseType::Extended,
            usage_type: UsageType::Commercial,
            project_name: "Spot".to_string(),
            project_description: "TV ad".to_string(),
            duration_days: Some(60),
            allowed_platforms: vec!["youtube".to_string()],
            max_impressions: None,
            max_outputs: Some(10),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "identity_id": "id-1",
                "license_type": "extended",
                "usage_type": "commercial",
                "project_name": "Spot",
                "project_description": "TV ad",
                "duration_days": 60,
                "allowed_platforms": ["youtube"],
                "max_outputs": 10
            })
        );
    }

    #[test]
    fn test_actor_pack_response_parsing() {
        let pack: ActorPackResponse = serde_json::from_value(json!({
            "id": "pack-1",
            "identity_id": "id-1",
            "name": "Hero Pack",
            "training_status": "PROCESSING",
            "training_progress": 40,
            "components": {"face": true, "voice": false, "motion": true},
            "is_available": false
        }))
        .unwrap();
        assert_eq!(pack.training_status, TrainingStatus::Processing);
        assert_eq!(pack.training_progress, 40);
        assert!(pack.components.face);
        assert!(!pack.components.voice);
        assert!(pack.lora_model_url.is_none());
        assert!(pack.created_at.is_none());
    }

    #[test]
    fn test_unknown_enum_values_decode() {
        let pack: ActorPackResponse = serde_json::from_value(json!({
            "id": "p",
            "identity_id": "i",
            "name": "n",
            "training_status": "ARCHIVED"
        }))
        .unwrap();
        assert_eq!(pack.training_status, TrainingStatus::Unknown);

        let level: ProtectionLevel = serde_json::from_value(json!("platinum")).unwrap();
        assert_eq!(level, ProtectionLevel::Unknown);
    }

    #[test]
    fn test_verify_response_parsing() {
        let response: VerifyResponse = serde_json::from_value(json!({
            "protected": true,
            "faces_detected": 1,
            "identities": [{
                "protected": true,
                "identity_id": "id-1",
                "similarity_score": 0.93,
                "display_name": "Jane Doe",
                "license_required": true,
                "blocked_categories": ["political"],
                "license_options": [
                    {"type": "standard", "price_usd": 49.0, "duration_days": 30}
                ],
                "face_bbox": {"x": 1.0, "y": 2.0, "width": 30.0, "height": 40.0}
            }],
            "response_time_ms": 120,
            "request_id": "req-1"
        }))
        .unwrap();
        assert!(response.protected);
        let identity = &response.identities[0];
        assert_eq!(identity.display_name.as_deref(), Some("Jane Doe"));
        assert_eq!(identity.license_options[0].license_type, LicenseType::Standard);
        assert!(identity.license_options[0].max_impressions.is_none());
        assert_eq!(identity.face_bbox.unwrap().width, 30.0);
    }

    #[test]
    fn test_license_and_usage_from_str() {
        assert_eq!("Extended".parse::<LicenseType>(), Ok(LicenseType::Extended));
        assert_eq!("educational".parse::<UsageType>(), Ok(UsageType::Educational));
        assert!("lifetime".parse::<LicenseType>().is_err());
        assert!("".parse::<UsageType>().is_err());
    }

    #[test]
    fn test_consent_response_null_optionals() {
        let response: ConsentCheckResponse = serde_json::from_value(json!({
            "request_id": "r",
            "protected": false,
            "faces_detected": 0,
            "faces": [],
            "response_time_ms": 5,
            "rate_limit_remaining": null
        }))
        .unwrap();
        assert!(response.rate_limit_remaining.is_none());
        assert!(response.faces.is_empty());
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let purchase: PurchaseResponse = serde_json::from_value(json!({
            "checkout_url": "https://pay.example/c",
            "session_id": "cs_1",
            "price_usd": 10.0,
            "license_details": null
        }))
        .unwrap();
        assert!(purchase.license_details.is_empty());

        let verify: VerifyResponse = serde_json::from_value(json!({
            "protected": true,
            "identities": null,
            "request_id": null
        }))
        .unwrap();
        assert!(verify.protected);
        assert!(verify.identities.is_empty());
        assert_eq!(verify.request_id, "");

        let consent: ConsentCheckResponse = serde_json::from_value(json!({
            "protected": true,
            "faces": [{
                "protected": true,
                "consent": null,
                "restrictions": {"blocked_regions": null, "blocked_brands": ["acme"]}
            }]
        }))
        .unwrap();
        let face = &consent.faces[0];
        assert_eq!(face.consent, ConsentDetails::default());
        assert!(face.restrictions.blocked_regions.is_empty());
        assert_eq!(face.restrictions.blocked_brands, vec!["acme"]);

        let listing: MarketplaceListingResponse = serde_json::from_value(json!({
            "id": "l-1",
            "title": null,
            "tags": null
        }))
        .unwrap();
        assert_eq!(listing.title, "");
        assert!(listing.tags.is_empty());
    }

    #[test]
    fn test_omitted_fields_decode_as_zero_values() {
        let option: LicenseOption = serde_json::from_value(json!({"type": "extended"})).unwrap();
        assert_eq!(option.license_type, LicenseType::Extended);
        assert_eq!(option.price_usd, 0.0);
        assert_eq!(option.duration_days, 0);

        let result: VerifyResult =
            serde_json::from_value(json!({"identity_id": "id-1", "face_bbox": {"x": 4.0}}))
                .unwrap();
        assert!(!result.protected);
        assert_eq!(
            result.face_bbox,
            Some(FaceBBox {
                x: 4.0,
                ..Default::default()
            })
        );

        let license: LicenseResponse = serde_json::from_value(json!({"id": "lic-1"})).unwrap();
        assert_eq!(license.identity_id, "");
        assert_eq!(license.license_type, LicenseType::Standard);
        assert_eq!(license.usage_type, UsageType::Personal);
        assert!(license.allowed_platforms.is_empty());

        let pack: ActorPackResponse =
            serde_json::from_value(json!({"id": "pack-1", "training_status": null})).unwrap();
        assert_eq!(pack.name, "");
        assert_eq!(pack.training_status, TrainingStatus::Queued);

        let purchase: PurchaseResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(purchase, PurchaseResponse::default());

        let identity: IdentityResponse = serde_json::from_value(json!({"id": "id-9"})).unwrap();
        assert_eq!(identity.display_name, "");
    }
}
