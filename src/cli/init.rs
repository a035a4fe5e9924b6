use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::{MonthcloseError, Result};
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::ensure_user;

pub fn run(
    data_dir: Option<String>,
    email: &str,
    name: Option<String>,
    business: Option<String>,
) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(MonthcloseError::Other("An email is required".to_string()));
    }

    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    settings.user_email = email.to_string();
    if let Some(name) = name {
        settings.user_name = name;
    }
    if let Some(business) = business {
        settings.business_name = business;
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let conn = get_connection(&settings.db_path())?;
    init_db(&conn)?;
    ensure_user(&conn, email)?;

    println!("Initialized monthclose at {}", resolved.display());
    Ok(())
}
