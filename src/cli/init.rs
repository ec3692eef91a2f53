use std::path::PathBuf;

use crate::error::{FinancasError, Result};
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};
use crate::store::{JsonFileStore, TransactionStore};

pub fn run(data_dir: Option<String>, currency: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(code) = currency {
        let code = code.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FinancasError::Settings(format!(
                "'{code}' is not a three-letter currency code"
            )));
        }
        settings.currency = code;
    }

    let data_path = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&data_path)?;
    save_settings(&settings)?;

    let mut store = JsonFileStore::in_dir(&data_path);
    let existing = store.exists();
    let count = store.load().len();

    println!("Settings:  {}", settings_path().display());
    println!("Data file: {}", store.path().display());
    println!("Currency:  {}", settings.currency);
    if existing {
        println!("Found {count} existing transactions.");
    } else {
        println!("Created an empty transaction file.");
    }
    Ok(())
}
