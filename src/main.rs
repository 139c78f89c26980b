use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rusty_signals::{TabularDataStore, UserSettings};

const USAGE: &str = "usage: rusty-signals <file.csv> [settings.json] [--export]";

fn main() -> Result<()> {
    env_logger::init();

    let mut export = false;
    let mut positional: Vec<PathBuf> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--export" => export = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let (csv_path, settings_path) = match positional.as_slice() {
        [csv] => (csv.clone(), None),
        [csv, settings] => (csv.clone(), Some(settings.clone())),
        _ => bail!("{USAGE}"),
    };

    let settings = match &settings_path {
        Some(path) => UserSettings::load(path)
            .with_context(|| format!("reading settings {}", path.display()))?,
        None => UserSettings::default(),
    };
    let config = settings.general.header_structure.to_classification_config();

    let mut store = TabularDataStore::new();
    store
        .load(&csv_path)
        .with_context(|| format!("loading {}", csv_path.display()))?;

    let result = store.classify(&config).context("classifying headers")?;
    log::info!(
        "{} columns classified into {} groups",
        result.entry_count(),
        result.len()
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    if export {
        let target = store.export().context("exporting table")?;
        eprintln!("Exported to {}", target.display());
    }

    Ok(())
}
