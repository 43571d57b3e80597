//! Request bodies accepted by the vendor API proxy endpoints.
//!
//! Every request names the vendor `baseUrl` explicitly — the browser may
//! target several vendor deployments and the gateway holds no vendor
//! configuration of its own. Fields are `Option` at the serde layer so the
//! handlers can answer with a `Missing required fields: ...` message that
//! lists exactly what was absent, instead of a generic deserialization
//! error.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body for `POST /api/proxy/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginProxyRequest {
    /// Vendor API base URL, e.g. `https://api.vendor.example`.
    pub base_url: Option<String>,
    /// Tenant code appended to the login path.
    pub tenant_code: Option<String>,
    /// Vendor account username.
    pub username: Option<String>,
    /// Vendor account password.
    pub password: Option<String>,
}

/// Body for `POST /api/proxy/device-data`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDataProxyRequest {
    /// Vendor API base URL.
    pub base_url: Option<String>,
    /// Session token obtained from the login proxy.
    pub token: Option<String>,
    /// Telemetry payload, forwarded verbatim.
    pub data_points: Option<serde_json::Value>,
}

/// Body for `POST /api/proxy/devices`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DevicesProxyRequest {
    /// Vendor API base URL.
    pub base_url: Option<String>,
    /// Session token obtained from the login proxy.
    pub token: Option<String>,
    /// Optional override path; defaults to `/v1/vendor/devices`.
    pub endpoint: Option<String>,
}

/// Body for `POST /api/proxy/device-profiles`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfilesProxyRequest {
    /// Vendor API base URL.
    pub base_url: Option<String>,
    /// Session token obtained from the login proxy.
    pub token: Option<String>,
}

/// Body for `POST /api/proxy/device-profile/property`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePropertyProxyRequest {
    /// Vendor API base URL.
    pub base_url: Option<String>,
    /// Session token obtained from the login proxy.
    pub token: Option<String>,
    /// Device profile whose properties are requested.
    pub profile_id: Option<String>,
}

/// Body for `POST /api/proxy/device/create`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceProxyRequest {
    /// Vendor API base URL.
    pub base_url: Option<String>,
    /// Session token obtained from the login proxy.
    pub token: Option<String>,
    /// Device definition, forwarded verbatim.
    pub device_data: Option<serde_json::Value>,
}
