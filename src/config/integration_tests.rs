use crate::chain::Payload;
use crate::config::{load_and_validate_config, RuntimeBuilder};
use crate::engine::ChainOutcome;

const SAMPLE_CONFIG: &str = "configs/chainwork.yaml";

/// Test that the shipped sample configuration loads and validates
#[test]
fn test_sample_config_yaml_loading() {
    let config = load_and_validate_config(SAMPLE_CONFIG).unwrap();

    assert_eq!(config.units.len(), 8);
    assert_eq!(config.units[0].name, "echo");
    assert!(!config.units[7].enabled);
    assert_eq!(config.aliases.get("yell").map(String::as_str), Some("shout"));
    assert_eq!(config.limits.get_max_chain_length(), 32);
    assert_eq!(config.limits.get_invoke_timeout_ms(), 30_000);
    assert_eq!(config.context.get("environment").map(String::as_str), Some("local"));
}

/// Test running chains through a runner built from the sample configuration
#[tokio::test]
async fn test_sample_config_chains() {
    let config = load_and_validate_config(SAMPLE_CONFIG).unwrap();
    let runner = RuntimeBuilder::from_config(&config).unwrap();

    let test_cases = vec![
        ("/pipeline/upper/echo/hello", "", "HELLO"),
        ("/pipeline/echo/hello", "", "hello"),
        ("/circuit/upper/reverse", "hello", "OLLEH"),
        ("/io/yell/reverse", "hello", "OLLEH"),
        ("/circuit/wrap/[/]/title/echo/the%20end", "", "[The%20end]"),
        ("/pipeline/count/reverse", "one two three", "3"),
        ("/pipeline/echo/legacy_count", "", "legacy_count"),
    ];

    for (address, input, expected) in test_cases {
        match runner.run(address, Payload::new(input)).await {
            ChainOutcome::Completed(result) => {
                assert_eq!(result.text(), expected, "address {}", address)
            }
            other => panic!("unexpected outcome for {}: {:?}", address, other),
        }
    }
}

/// Test that a chain error from a config-built runner names its position
#[tokio::test]
async fn test_sample_config_rejects_interior_count() {
    let config = load_and_validate_config(SAMPLE_CONFIG).unwrap();
    let runner = RuntimeBuilder::from_config(&config).unwrap();

    match runner.run("/circuit/upper/count/echo/x", Payload::default()).await {
        ChainOutcome::Failed(error) => {
            assert_eq!(error.kind(), "chaining_not_supported");
            assert_eq!(error.position(), Some(1));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
