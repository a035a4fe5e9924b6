use std::collections::HashMap;

use crate::access::{apply_sale_event, unlock, GumroadVerifier, SaleEvent, SaleOutcome};
use crate::cli::Session;
use crate::error::{MonthcloseError, Result};

pub fn run(session: &Session, licence_key: &str) -> Result<()> {
    let verifier = GumroadVerifier::new(&session.settings.licence);
    unlock(&session.conn, session.user_id, &verifier, licence_key)?;
    println!("Unlocked. Imports and PDF exports are now available.");
    Ok(())
}

pub fn sale_event(session: &Session, payload: &str, token: Option<&str>) -> Result<()> {
    let content = std::fs::read_to_string(payload)?;
    let fields: HashMap<String, String> = serde_json::from_str(&content)
        .map_err(|e| MonthcloseError::Other(format!("Invalid payload: {e}")))?;
    let event = SaleEvent::from_fields(&fields);

    match apply_sale_event(&session.conn, &session.settings.licence, token, &event)? {
        SaleOutcome::Ignored => println!("Ignored: event is for another product."),
        SaleOutcome::Pending => println!("No account for {} yet; nothing changed.", event.email),
        SaleOutcome::Updated { active: true } => println!("Access active for {}.", event.email),
        SaleOutcome::Updated { active: false } => println!("Access revoked for {}.", event.email),
    }
    Ok(())
}
