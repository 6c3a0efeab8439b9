use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".perfmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Perfmap Configuration

# Relative importance per factor (model feature importances)
[weights]
satisfaction = 0.285
training = 0.198
work_hours = 0.124
overtime = 0.098
sick_days = 0.072

# Signed multipliers: positive factors help the score, negative hurt it
[multipliers]
satisfaction = 0.5
training = 0.4
work_hours = -0.2
overtime = -0.5
sick_days = -0.6

# Session baseline (current workforce averages)
[baseline]
satisfaction = 3.8
training_hours = 35.0
work_hours = 43.0
overtime = 10.0
sick_days = 5.0
score = 75.0

# Performance category cutoffs
[thresholds]
medium = 60.0
high = 80.0

[api]
base_url = "http://localhost:8000"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .perfmap.toml configuration file");

    Ok(())
}
