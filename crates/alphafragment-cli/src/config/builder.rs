use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileProfile};
use super::models::AppConfig;
use crate::cli::{FragmentArgs, ThresholdArgs};
use crate::error::{CliError, Result};
use alphafragment::core::domains::thresholds::{PartialThresholds, ThresholdProfile};
use alphafragment::engine::config::FragmentationConfigBuilder;
use alphafragment::workflows::domains::DomainSourceConfig;
use std::str::FromStr;
use std::time::Duration;

pub fn build_config(args: &FragmentArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let fragment_file = file_config.fragment.take().unwrap_or_default();
    let file_length = fragment_file.length.unwrap_or_default();
    let length = FileProfile {
        min: args.min_length.or(file_length.min),
        ideal: args.ideal_length.or(file_length.ideal),
        max: args.max_length.or(file_length.max),
    }
    .or_defaults(defaults.length);
    let overlap = fragment_file
        .overlap
        .unwrap_or_default()
        .or_defaults(defaults.overlap);
    let length_increment = fragment_file
        .length_increment
        .unwrap_or(defaults.length_increment);
    let time_limit = match args.time_limit.or(fragment_file.time_limit) {
        Some(seconds) => seconds_to_duration(seconds)?,
        None => defaults.time_limit,
    };

    let fragmentation = FragmentationConfigBuilder::new()
        .length(length)
        .overlap(overlap)
        .length_increment(length_increment)
        .time_limit(time_limit)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let domain_file = file_config.domains.take().unwrap_or_default();
    let method = args
        .method
        .as_deref()
        .or(domain_file.method.as_deref())
        .unwrap_or(defaults.method.as_str());
    let file_thresholds = domain_file.custom.map(Into::into).unwrap_or_default();
    let thresholds = resolve_thresholds(method, args.thresholds, file_thresholds)?;

    let domain_sources = DomainSourceConfig {
        use_structure_prediction: !args.no_pae && domain_file.use_pae.unwrap_or(defaults.use_pae),
        use_manual: !args.no_manual && domain_file.use_manual.unwrap_or(defaults.use_manual),
        thresholds,
    };

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        fragmentation,
        domain_sources,
    })
}

/// Turns a method name into a threshold profile. Values given on the command line take
/// precedence over the ones from the config file; both are only used by `custom`.
pub fn resolve_thresholds(
    method: &str,
    cli: ThresholdArgs,
    file: PartialThresholds,
) -> Result<ThresholdProfile> {
    let custom = PartialThresholds {
        distance_cutoff: cli.distance_cutoff.or(file.distance_cutoff),
        close_threshold: cli.close_threshold.or(file.close_threshold),
        far_threshold: cli.far_threshold.or(file.far_threshold),
    };
    ThresholdProfile::from_method(method, Some(custom))
        .map_err(|e| CliError::Config(e.to_string()))
}

fn seconds_to_duration(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        CliError::Config(format!(
            "Time limit must be a non-negative number of seconds, got {}",
            seconds
        ))
    })
}

fn parse_set_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        let fragment = config.fragment.get_or_insert_with(Default::default);
        match key {
            "fragment.length.min" | "fragment.length.ideal" | "fragment.length.max" => {
                let profile = fragment.length.get_or_insert_with(Default::default);
                set_profile_bound(profile, key, value)?;
            }
            "fragment.overlap.min" | "fragment.overlap.ideal" | "fragment.overlap.max" => {
                let profile = fragment.overlap.get_or_insert_with(Default::default);
                set_profile_bound(profile, key, value)?;
            }
            "fragment.length-increment" => {
                fragment.length_increment = Some(parse_set_value(key, value)?);
            }
            "fragment.time-limit" => {
                fragment.time_limit = Some(parse_set_value(key, value)?);
            }
            _ => {
                let domains = config.domains.get_or_insert_with(Default::default);
                match key {
                    "domains.method" => domains.method = Some(value.trim().to_string()),
                    "domains.use-pae" => domains.use_pae = Some(parse_set_value(key, value)?),
                    "domains.use-manual" => {
                        domains.use_manual = Some(parse_set_value(key, value)?)
                    }
                    "domains.custom.distance-cutoff" => {
                        domains
                            .custom
                            .get_or_insert_with(Default::default)
                            .distance_cutoff = Some(parse_set_value(key, value)?);
                    }
                    "domains.custom.close-threshold" => {
                        domains
                            .custom
                            .get_or_insert_with(Default::default)
                            .close_threshold = Some(parse_set_value(key, value)?);
                    }
                    "domains.custom.far-threshold" => {
                        domains
                            .custom
                            .get_or_insert_with(Default::default)
                            .far_threshold = Some(parse_set_value(key, value)?);
                    }
                    _ => {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    }
                }
            }
        }
    }
    Ok(config)
}

fn set_profile_bound(profile: &mut FileProfile, key: &str, value: &str) -> Result<()> {
    let bound = parse_set_value(key, value)?;
    match key.rsplit('.').next() {
        Some("min") => profile.min = Some(bound),
        Some("ideal") => profile.ideal = Some(bound),
        _ => profile.max = Some(bound),
    }
    Ok(())
}
