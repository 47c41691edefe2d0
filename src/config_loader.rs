use crate::config::RunConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse a generation plan from a YAML file
pub fn load_config(config_path: &Path) -> Result<RunConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: RunConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    warn_about_remainders(&config);

    info!(
        "Loaded {} batches ({} pools) starting at {}",
        config.batches.len(),
        config.total_pools(),
        config.start_address
    );

    Ok(config)
}

/// CLI arguments that can override values from the plan file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start_address: Option<std::net::Ipv4Addr>,
    pub start_ordinal: Option<u64>,
    pub format: Option<crate::output::DocumentFormat>,
}

/// Apply CLI overrides to a plan
pub fn apply_overrides(config: &mut RunConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(address) = overrides.start_address {
        info!("Overriding start address: {} -> {}", config.start_address, address);
        config.start_address = address;
    }

    if let Some(ordinal) = overrides.start_ordinal {
        info!("Overriding start ordinal: {} -> {}", config.start_ordinal, ordinal);
        config.start_ordinal = ordinal;
    }

    if let Some(format) = overrides.format {
        info!("Overriding output format: {:?} -> {:?}", config.format, format);
        config.format = format;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Write the built-in plan as YAML so it can be used as a template
pub fn write_default_config(output_path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(&RunConfig::default())?;
    std::fs::write(output_path, yaml)
        .wrap_err_with(|| format!("Failed to write configuration to '{}'", output_path.display()))?;
    info!("Default configuration written to {:?}", output_path);
    Ok(())
}

/// Batches whose address count does not split evenly leave addresses unused
fn warn_about_remainders(config: &RunConfig) {
    for batch in &config.batches {
        let remainder = batch.total_addresses % batch.pool_count;
        if remainder != 0 {
            warn!(
                "Batch {}: {} addresses do not divide evenly into {} pools, {} will stay unallocated",
                batch.output_name, batch.total_addresses, batch.pool_count, remainder
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
batches:
  - total_addresses: 1000
    pool_count: 10
    output_name: "small.yaml"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.batches.len(), 1);
        assert_eq!(config.start_address, crate::config::DEFAULT_START_ADDRESS);
        assert_eq!(config.start_ordinal, 1);
    }

    #[test]
    fn test_load_rejects_zero_pools() {
        let yaml = r#"
batches:
  - total_addresses: 1000
    pool_count: 0
    output_name: "broken.yaml"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("pool_count must be greater than 0"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/plan.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to open configuration file"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = RunConfig::default();
        let overrides = CliOverrides {
            start_address: Some("10.0.0.0".parse().unwrap()),
            start_ordinal: Some(500),
            format: Some(crate::output::DocumentFormat::Json),
        };

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.start_address, std::net::Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(config.start_ordinal, 500);
        assert_eq!(config.format, crate::output::DocumentFormat::Json);
        assert_eq!(config.batches.len(), 4);
    }

    #[test]
    fn test_apply_overrides_revalidates() {
        let mut config = RunConfig::default();
        let overrides = CliOverrides {
            start_ordinal: Some(0),
            ..Default::default()
        };
        assert!(apply_overrides(&mut config, &overrides).is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_default_config(temp_file.path()).unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded, RunConfig::default());
    }
}
