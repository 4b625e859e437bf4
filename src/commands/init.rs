use anyhow::Result;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Docdrift configuration

[ignore]
patterns = [
    "**/venv/**",
    "**/.venv/**",
    "**/build/**",
    "**/site-packages/**",
]

[checks]
# Diagnostic codes to silence, e.g. "DOC008"
disabled = []
"#;

    std::fs::write(&config_path, default_config)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
