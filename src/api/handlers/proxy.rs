//! Vendor API proxy handlers.
//!
//! The browser cannot call the vendor's REST API directly (CORS), so these
//! endpoints forward requests server-side. There is no logic beyond
//! validating required fields, forwarding with a timeout, and passing the
//! upstream body back — including on upstream failure, where the vendor's
//! status and body are preserved so the frontend can surface them.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::{
    CreateDeviceProxyRequest, DeviceDataProxyRequest, DeviceProfilesProxyRequest,
    DevicesProxyRequest, LoginProxyRequest, ProfilePropertyProxyRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// Session token header the vendor API expects on every call after login.
const XSRF_HEADER: &str = "x-xsrf-token";

/// `POST /api/proxy/login` — Authenticate against the vendor API.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/login",
    tag = "Vendor Proxy",
    summary = "Proxy a vendor login request",
    request_body = LoginProxyRequest,
    responses(
        (status = 200, description = "Vendor login response, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_login(
    State(state): State<AppState>,
    Json(req): Json<LoginProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(tenant_code), Some(username), Some(password)) =
        (req.base_url, req.tenant_code, req.username, req.password)
    else {
        return Err(GatewayError::MissingFields(
            "baseUrl, tenantCode, username, password",
        ));
    };

    let response = state
        .http
        .post(format!("{base_url}/v1/login/{tenant_code}"))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .timeout(state.config.proxy_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Login failed", err))?;

    let body = forward_upstream("Login failed", response).await?;
    tracing::info!(tenant = %tenant_code, "proxy login successful");
    Ok(Json(body))
}

/// `POST /api/proxy/device-data` — Push telemetry to the vendor API.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/device-data",
    tag = "Vendor Proxy",
    summary = "Proxy a telemetry upload",
    request_body = DeviceDataProxyRequest,
    responses(
        (status = 200, description = "Vendor response, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_device_data(
    State(state): State<AppState>,
    Json(req): Json<DeviceDataProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(token), Some(data_points)) =
        (req.base_url, req.token, req.data_points)
    else {
        return Err(GatewayError::MissingFields("baseUrl, token, dataPoints"));
    };

    let response = state
        .http
        .post(format!("{base_url}/v1/device/device-data"))
        .header(XSRF_HEADER, &token)
        .json(&data_points)
        .timeout(state.config.proxy_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Send data failed", err))?;

    let body = forward_upstream("Send data failed", response).await?;
    Ok(Json(body))
}

/// `POST /api/proxy/devices` — Fetch the vendor's device list.
///
/// The vendor serves this endpoint noticeably slower than the rest of its
/// API, hence the separate (longer) timeout.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/devices",
    tag = "Vendor Proxy",
    summary = "Proxy a device-list fetch",
    request_body = DevicesProxyRequest,
    responses(
        (status = 200, description = "Vendor device list, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_devices(
    State(state): State<AppState>,
    Json(req): Json<DevicesProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(token)) = (req.base_url, req.token) else {
        return Err(GatewayError::MissingFields("baseUrl, token"));
    };

    let url = match req.endpoint.as_deref() {
        Some(endpoint) if !endpoint.is_empty() => format!("{base_url}{endpoint}"),
        _ => format!("{base_url}/v1/vendor/devices"),
    };

    let response = state
        .http
        .get(&url)
        .header(XSRF_HEADER, &token)
        .timeout(state.config.proxy_fetch_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Get devices failed", err))?;

    let body = forward_upstream("Get devices failed", response).await?;
    tracing::info!(%url, "proxy fetched devices");
    Ok(Json(body))
}

/// `POST /api/proxy/device-profiles` — Fetch the vendor's device profiles.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/device-profiles",
    tag = "Vendor Proxy",
    summary = "Proxy a device-profile fetch",
    request_body = DeviceProfilesProxyRequest,
    responses(
        (status = 200, description = "Vendor device profiles, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_device_profiles(
    State(state): State<AppState>,
    Json(req): Json<DeviceProfilesProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(token)) = (req.base_url, req.token) else {
        return Err(GatewayError::MissingFields("baseUrl, token"));
    };

    let response = state
        .http
        .get(format!("{base_url}/v1/vendor/device-profiles"))
        .header(XSRF_HEADER, &token)
        .timeout(state.config.proxy_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Get device profiles failed", err))?;

    let body = forward_upstream("Get device profiles failed", response).await?;
    Ok(Json(body))
}

/// `POST /api/proxy/device-profile/property` — Fetch a profile's properties.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/device-profile/property",
    tag = "Vendor Proxy",
    summary = "Proxy a profile-property fetch",
    request_body = ProfilePropertyProxyRequest,
    responses(
        (status = 200, description = "Vendor profile properties, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_profile_property(
    State(state): State<AppState>,
    Json(req): Json<ProfilePropertyProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(token), Some(profile_id)) =
        (req.base_url, req.token, req.profile_id)
    else {
        return Err(GatewayError::MissingFields("baseUrl, token, profileId"));
    };

    let response = state
        .http
        .get(format!("{base_url}/v1/vendor/device-profile/property"))
        .query(&[("profileId", &profile_id)])
        .header(XSRF_HEADER, &token)
        .timeout(state.config.proxy_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Get profile properties failed", err))?;

    let body = forward_upstream("Get profile properties failed", response).await?;
    Ok(Json(body))
}

/// `POST /api/proxy/device/create` — Create a device on the vendor side.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields or upstream failure.
#[utoipa::path(
    post,
    path = "/api/proxy/device/create",
    tag = "Vendor Proxy",
    summary = "Proxy a device creation",
    request_body = CreateDeviceProxyRequest,
    responses(
        (status = 200, description = "Vendor response, forwarded verbatim"),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
    )
)]
pub async fn proxy_create_device(
    State(state): State<AppState>,
    Json(req): Json<CreateDeviceProxyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (Some(base_url), Some(token), Some(device_data)) =
        (req.base_url, req.token, req.device_data)
    else {
        return Err(GatewayError::MissingFields("baseUrl, token, deviceData"));
    };

    let device_name = device_data
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();

    let response = state
        .http
        .post(format!("{base_url}/v1/vendor/device"))
        .header(XSRF_HEADER, &token)
        .json(&device_data)
        .timeout(state.config.proxy_timeout())
        .send()
        .await
        .map_err(|err| GatewayError::unreachable("Create device failed", err))?;

    let body = forward_upstream("Create device failed", response).await?;
    tracing::info!(device = %device_name, "proxy created device");
    Ok(Json(body))
}

/// Passes an upstream response through: success bodies are returned as-is,
/// non-success statuses become [`GatewayError::UpstreamStatus`] carrying the
/// upstream status and body.
async fn forward_upstream(
    context: &'static str,
    response: reqwest::Response,
) -> Result<Value, GatewayError> {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    if status.is_success() {
        Ok(body)
    } else {
        tracing::error!(context, status = status.as_u16(), "vendor API request failed");
        Err(GatewayError::UpstreamStatus {
            context,
            status: status.as_u16(),
            details: Some(body),
        })
    }
}

/// Vendor proxy routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/proxy/login", post(proxy_login))
        .route("/proxy/device-data", post(proxy_device_data))
        .route("/proxy/devices", post(proxy_devices))
        .route("/proxy/device-profiles", post(proxy_device_profiles))
        .route("/proxy/device-profile/property", post(proxy_profile_property))
        .route("/proxy/device/create", post(proxy_create_device))
}
