//! Show or set the persisted display theme.

use anyhow::Result;

use tiq_common::theme::{Theme, ThemeStore};

pub fn run(value: Option<Theme>) -> Result<()> {
    let store = ThemeStore::default_location();
    match value {
        Some(theme) => {
            store.save(theme)?;
            println!("theme set to {theme}");
        }
        None => println!("{}", store.load()),
    }
    Ok(())
}
