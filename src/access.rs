//! Licence-gated access: who may save imports and export reports.

use std::collections::HashMap;

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::error::{MonthcloseError, Result};
use crate::settings::LicenceSettings;
use crate::store::find_user;

const GUMROAD_VERIFY_URL: &str = "https://api.gumroad.com/v2/licenses/verify";

/// Checks a licence key against the seller.
pub trait LicenceVerifier {
    fn verify(&self, licence_key: &str) -> Result<bool>;
}

pub struct GumroadVerifier {
    client: reqwest::blocking::Client,
    endpoint: String,
    product_permalink: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
}

impl GumroadVerifier {
    pub fn new(settings: &LicenceSettings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: GUMROAD_VERIFY_URL.to_string(),
            product_permalink: settings.product_permalink.clone(),
            token: settings.application_token(),
        }
    }
}

impl LicenceVerifier for GumroadVerifier {
    fn verify(&self, licence_key: &str) -> Result<bool> {
        let mut req = self.client.post(&self.endpoint).form(&[
            ("product_permalink", self.product_permalink.as_str()),
            ("license_key", licence_key),
        ]);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let res = req.send()?;
        if !res.status().is_success() {
            tracing::debug!(status = %res.status(), "licence rejected");
            return Ok(false);
        }
        let body: VerifyResponse = res.json()?;
        Ok(body.success)
    }
}

// ---------------------------------------------------------------------------
// Entitlements
// ---------------------------------------------------------------------------

pub fn has_access(conn: &Connection, user_id: i64) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM access WHERE user_id = ?1 AND is_active = 1")?;
    Ok(stmt.exists([user_id])?)
}

pub fn require_access(conn: &Connection, user_id: i64) -> Result<()> {
    if has_access(conn, user_id)? {
        Ok(())
    } else {
        Err(MonthcloseError::Locked)
    }
}

pub fn set_access(conn: &Connection, user_id: i64, active: bool, licence_key: Option<&str>) -> Result<()> {
    conn.execute(
        "INSERT INTO access (user_id, is_active, licence_key, updated_at) \
         VALUES (?1, ?2, ?3, datetime('now')) \
         ON CONFLICT(user_id) DO UPDATE SET \
         is_active = excluded.is_active, licence_key = excluded.licence_key, updated_at = excluded.updated_at",
        params![user_id, active, licence_key],
    )?;
    tracing::info!(user_id, active, "access updated");
    Ok(())
}

/// Verify `licence_key` and activate the user on success.
pub fn unlock(
    conn: &Connection,
    user_id: i64,
    verifier: &dyn LicenceVerifier,
    licence_key: &str,
) -> Result<()> {
    let key = licence_key.trim();
    if key.is_empty() {
        return Err(MonthcloseError::MissingLicenceKey);
    }
    if !verifier.verify(key)? {
        return Err(MonthcloseError::InvalidLicence);
    }
    set_access(conn, user_id, true, Some(key))
}

// ---------------------------------------------------------------------------
// Sale events
// ---------------------------------------------------------------------------

/// A seller notification about a purchase, refund or chargeback.
#[derive(Debug, Clone, Default)]
pub struct SaleEvent {
    pub product_permalink: String,
    pub email: String,
    pub licence_key: Option<String>,
    pub refunded: bool,
    pub chargebacked: bool,
}

impl SaleEvent {
    /// Build from form-style string fields as the seller posts them.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| fields.get(*k))
                .find(|v| !v.is_empty())
                .cloned()
        };
        let flag = |key: &str| fields.get(key).map(String::as_str) == Some("true");
        Self {
            product_permalink: get(&["product_permalink", "product_id"]).unwrap_or_default(),
            email: get(&["email"]).unwrap_or_default(),
            licence_key: get(&["license_key", "licence_key"]),
            refunded: flag("refunded"),
            chargebacked: flag("chargebacked"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
    /// Event is for a different product.
    Ignored,
    /// No account with that email yet.
    Pending,
    Updated { active: bool },
}

pub fn apply_sale_event(
    conn: &Connection,
    settings: &LicenceSettings,
    token: Option<&str>,
    event: &SaleEvent,
) -> Result<SaleOutcome> {
    match (settings.webhook_token.as_deref(), token) {
        (Some(expected), Some(given)) if !expected.is_empty() && expected == given => {}
        _ => return Err(MonthcloseError::Forbidden),
    }
    if event.email.trim().is_empty() {
        return Err(MonthcloseError::Other("Missing email".to_string()));
    }
    if event.product_permalink != settings.product_permalink {
        return Ok(SaleOutcome::Ignored);
    }
    let Some(user_id) = find_user(conn, event.email.trim())? else {
        return Ok(SaleOutcome::Pending);
    };
    let active = !(event.refunded || event.chargebacked);
    set_access(conn, user_id, active, event.licence_key.as_deref())?;
    Ok(SaleOutcome::Updated { active })
}
