//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges before any network is built.

use crate::{ConfigError, ConfigResult, SpikenetConfig, ValueRange};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Range with a non-finite bound or width, or `min > max`
    MalformedRange { field: String, min: f64, max: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRange { field, min, max } => {
                write!(f, "Range {} = [{}, {}) is malformed or empty", field, min, max)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Network shape (N > 0, k < N, seed neuron inside the network)
/// - Run length (T > 0)
/// - Network size within the 32-bit neuron id space
/// - Well-formed sampling ranges (finite bounds and width, `min <= max`, positive weights)
/// - Finite scalar constants
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &SpikenetConfig) -> ConfigResult<()> {
    let errors = collect_validation_errors(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Run every check and return all violations found
pub fn collect_validation_errors(config: &SpikenetConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    validate_network(config, &mut errors);
    validate_ranges(config, &mut errors);
    validate_scalars(config, &mut errors);

    errors
}

fn validate_network(config: &SpikenetConfig, errors: &mut Vec<ConfigValidationError>) {
    let network = &config.network;

    if network.node_count == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.node_count".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    // Neuron ids are 32-bit
    if network.node_count > u32::MAX as usize {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.node_count".to_string(),
            reason: format!(
                "must not exceed {} neurons, got {}",
                u32::MAX,
                network.node_count
            ),
        });
    }

    if network.out_degree >= network.node_count {
        errors.push(ConfigValidationError::InvalidValue {
            field: "network.out_degree".to_string(),
            reason: format!(
                "must be less than network.node_count ({}), got {}",
                network.node_count, network.out_degree
            ),
        });
    }

    if config.simulation.steps == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.steps".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    if network.node_count > 0 && config.stimulus.seed_neuron >= network.node_count {
        errors.push(ConfigValidationError::InvalidValue {
            field: "stimulus.seed_neuron".to_string(),
            reason: format!(
                "index {} is outside the network (node_count = {})",
                config.stimulus.seed_neuron, network.node_count
            ),
        });
    }
}

fn validate_ranges(config: &SpikenetConfig, errors: &mut Vec<ConfigValidationError>) {
    let ranges: [(&str, &ValueRange); 7] = [
        ("neuron.a", &config.neuron.a),
        ("neuron.b", &config.neuron.b),
        ("neuron.c", &config.neuron.c),
        ("neuron.d", &config.neuron.d),
        ("synapse.weight", &config.synapse.weight),
        ("propagation.noise", &config.propagation.noise),
        ("dynamics.clamp", &config.dynamics.clamp),
    ];

    for (field, range) in ranges {
        if !range.is_well_formed() {
            errors.push(ConfigValidationError::MalformedRange {
                field: field.to_string(),
                min: range.min,
                max: range.max,
            });
        }
    }

    if config.synapse.weight.is_well_formed() && config.synapse.weight.min <= 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "synapse.weight".to_string(),
            reason: format!("weights must be positive, min = {}", config.synapse.weight.min),
        });
    }
}

fn validate_scalars(config: &SpikenetConfig, errors: &mut Vec<ConfigValidationError>) {
    let scalars = [
        ("propagation.firing_threshold", config.propagation.firing_threshold),
        ("dynamics.spike_cutoff", config.dynamics.spike_cutoff),
        ("stimulus.baseline_potential", config.stimulus.baseline_potential),
        ("stimulus.seed_potential", config.stimulus.seed_potential),
        ("stimulus.seed_input_current", config.stimulus.seed_input_current),
    ];

    for (field, value) in scalars {
        if !value.is_finite() {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: format!("must be finite, got {}", value),
            });
        }
    }

    match config.logging.format.as_str() {
        "text" | "json" => {}
        other => errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("expected \"text\" or \"json\", got \"{}\"", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SpikenetConfig::default()).is_ok());
    }

    #[test]
    fn test_out_degree_equal_to_node_count_fails() {
        let mut config = SpikenetConfig::default();
        config.network.node_count = 5;
        config.network.out_degree = 5;

        let errors = collect_validation_errors(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("network.out_degree"));
    }

    #[test]
    fn test_single_neuron_without_edges_is_valid() {
        let mut config = SpikenetConfig::default();
        config.network.node_count = 1;
        config.network.out_degree = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_nodes_and_zero_steps_fail() {
        let mut config = SpikenetConfig::default();
        config.network.node_count = 0;
        config.network.out_degree = 0;
        config.simulation.steps = 0;

        let errors = collect_validation_errors(&config);
        let fields: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert!(fields.iter().any(|f| f.contains("network.node_count")));
        assert!(fields.iter().any(|f| f.contains("simulation.steps")));
    }

    #[test]
    fn test_malformed_ranges_are_all_reported() {
        let mut config = SpikenetConfig::default();
        config.neuron.c = ValueRange::new(-58.0, -68.0);
        config.propagation.noise = ValueRange::new(f64::NAN, 0.5);

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("neuron.c"));
        assert!(err.contains("propagation.noise"));
    }

    #[test]
    fn test_ranges_with_overflowing_width_fail() {
        let mut config = SpikenetConfig::default();
        config.propagation.noise = ValueRange::new(-1e308, 1e308);
        config.neuron.d = ValueRange::new(-1e308, 1e308);

        let errors = collect_validation_errors(&config);
        assert_eq!(errors.len(), 2);
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("propagation.noise"));
        assert!(err.contains("neuron.d"));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_node_count_beyond_neuron_id_space_fails() {
        let mut config = SpikenetConfig::default();
        config.network.node_count = u32::MAX as usize + 1;

        let errors = collect_validation_errors(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("network.node_count"));
    }

    #[test]
    fn test_non_positive_weights_fail() {
        let mut config = SpikenetConfig::default();
        config.synapse.weight = ValueRange::new(-0.2, 1.2);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_seed_neuron_outside_network_fails() {
        let mut config = SpikenetConfig::default();
        config.network.node_count = 3;
        config.network.out_degree = 1;
        config.stimulus.seed_neuron = 3;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_log_format_fails() {
        let mut config = SpikenetConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }
}
