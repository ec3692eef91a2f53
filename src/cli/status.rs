use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{api_key, load_settings, settings_file_exists, settings_path};
use crate::store::JsonFileStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let mut store = JsonFileStore::in_dir(&settings.data_path());

    let settings_note = if settings_file_exists() { "" } else { " (defaults)" };
    println!("Settings:   {}{settings_note}", settings_path().display());
    println!("Data dir:   {}", settings.data_dir);
    println!("Data file:  {}", store.path().display());
    println!("Currency:   {}", settings.currency);
    println!("Model:      {}", settings.model);
    println!("API key:    {}", if api_key().is_some() { "set" } else { "(not set)" });

    if store.exists() {
        let size = std::fs::metadata(store.path())?.len();
        println!("File size:  {}", format_bytes(size));
        println!();
        match store.try_load() {
            Ok(transactions) => println!("Transactions:  {}", transactions.len()),
            Err(e) => println!("Transactions:  unreadable ({e})"),
        }
    } else {
        println!();
        println!("No transaction file yet. Run `financas init` or add a transaction.");
    }

    Ok(())
}
