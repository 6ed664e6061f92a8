//! Tenant API Handlers

use axum::{Json, extract::State};
use chrono::Utc;

use crate::core::ServerState;
use crate::db::models::{Tenant, TenantCreate};
use crate::db::repository::TenantRepository;
use crate::utils::{AppResult, ValidatedJson};

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Tenant>>> {
    let tenants = TenantRepository::new(state.get_db()).find_all().await?;
    Ok(Json(tenants))
}

pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<TenantCreate>,
) -> AppResult<Json<Tenant>> {
    let tenant = Tenant {
        id: String::new(),
        name: payload.name,
        domain: payload.domain.trim().to_lowercase(),
        industry: payload.industry,
        is_active: true,
        settings: serde_json::json!({}),
        created_at: Utc::now(),
    };
    let tenant = TenantRepository::new(state.get_db()).create(&tenant).await?;
    tracing::info!(tenant_id = %tenant.id, name = %tenant.name, "Tenant created");
    Ok(Json(tenant))
}
