use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileInputConfig};
use super::models::{AppConfig, InputOptions};
use crate::cli::{BasisArgs, InputArgs};
use crate::error::{CliError, Result};
use rnacycle::engine::config::{BasisConfigBuilder, BasisMode};
use std::str::FromStr;
use std::time::Duration;

pub fn build_config(args: &BasisArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let basis_file = file_config.basis.take().unwrap_or_default();

    let mode = args
        .mode
        .map(BasisMode::from)
        .or(basis_file.mode)
        .unwrap_or(defaults.mode);

    let verify = if args.no_verify {
        false
    } else {
        basis_file.verify.unwrap_or(defaults.verify)
    };

    let allow_two_cycles = match (
        args.two_cycles.allow_two_cycles,
        args.two_cycles.forbid_two_cycles,
    ) {
        (true, false) => true,
        (false, true) => false,
        _ => basis_file
            .allow_two_cycles
            .unwrap_or(defaults.allow_two_cycles),
    };

    let max_candidate_depth = args
        .max_candidate_depth
        .or(basis_file.max_candidate_depth)
        .unwrap_or(defaults.max_candidate_depth);

    let timeout = args
        .timeout_ms
        .or(basis_file.timeout_ms)
        .or(defaults.timeout_ms)
        .map(Duration::from_millis);

    let core_config = BasisConfigBuilder::new()
        .mode(mode)
        .verify(verify)
        .allow_two_cycles(allow_two_cycles)
        .max_candidate_depth(max_candidate_depth)
        .timeout(timeout)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let input = build_input_options(&args.input, file_config.input.take())?;

    Ok(AppConfig {
        inputs: args.input.input.clone(),
        output_dir: args.output.clone(),
        input,
        core_config,
    })
}

/// Resolves the graph construction options from flags, an optional `[input]` section and
/// the built-in defaults.
pub fn build_input_options(
    args: &InputArgs,
    file: Option<FileInputConfig>,
) -> Result<InputOptions> {
    let defaults = DefaultsConfig::default();
    let file = file.unwrap_or_default();

    let add_backbone = match (args.backbone.add_backbone, args.backbone.no_backbone) {
        (true, false) => true,
        (false, true) => false,
        _ => file.add_backbone.unwrap_or(defaults.add_backbone),
    };
    let default_weight = args
        .default_weight
        .or(file.default_weight)
        .unwrap_or(defaults.default_weight);

    if !default_weight.is_finite() || default_weight < 0.0 {
        return Err(CliError::Config(format!(
            "Default weight must be a finite, non-negative number, got {}",
            default_weight
        )));
    }

    Ok(InputOptions {
        add_backbone,
        default_weight,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, expected: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            expected, key, value_str
        ))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0];
        let value_str = parts[1];

        match key {
            "basis.mode" => {
                let mode = BasisMode::from_str(value_str.trim()).map_err(|e| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?;
                config.basis.get_or_insert_with(Default::default).mode = Some(mode);
            }
            "basis.verify" => {
                config.basis.get_or_insert_with(Default::default).verify =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "basis.allow-two-cycles" => {
                config
                    .basis
                    .get_or_insert_with(Default::default)
                    .allow_two_cycles = Some(parse_value(key, value_str, "boolean")?);
            }
            "basis.max-candidate-depth" => {
                config
                    .basis
                    .get_or_insert_with(Default::default)
                    .max_candidate_depth = Some(parse_value(key, value_str, "integer")?);
            }
            "basis.timeout-ms" => {
                config.basis.get_or_insert_with(Default::default).timeout_ms =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "input.add-backbone" => {
                config
                    .input
                    .get_or_insert_with(Default::default)
                    .add_backbone = Some(parse_value(key, value_str, "boolean")?);
            }
            "input.default-weight" => {
                config
                    .input
                    .get_or_insert_with(Default::default)
                    .default_weight = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
