//! Integration tests for the `delivery` front end.
//!
//! The `pipeline` tests call the library directly; the `binary` tests run
//! the compiled executable against the fixtures.

use std::path::PathBuf;
use std::process::Command;

use cli::config::Config;
use cli::error::CliError;
use cli::order_file::OrderFile;
use domain::{Money, OrderStatus};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_order() -> OrderFile {
    cli::load_order_file(&fixture("order.json")).unwrap()
}

mod pipeline {
    use super::*;

    #[test]
    fn fixture_order_totals_35_90() {
        let summary = cli::run(&Config::default(), &fixture_order()).unwrap();

        assert_eq!(summary.subtotal, Money::from_units(25));
        assert_eq!(summary.total, Money::from_cents(3590));
        assert_eq!(
            summary.stages,
            vec!["discount", "tax", "express_fee", "delivery_fee", "subtotal"]
        );
    }

    #[test]
    fn order_is_walked_to_completion() {
        let summary = cli::run(&Config::default(), &fixture_order()).unwrap();

        assert_eq!(summary.final_status, OrderStatus::Completed);
        assert_eq!(
            summary.transitions,
            vec![
                (OrderStatus::Preparing, OrderStatus::Delivering),
                (OrderStatus::Delivering, OrderStatus::Completed),
            ]
        );
        assert!(summary.observer_failures.is_empty());
    }

    #[test]
    fn standard_order_skips_express_fee() {
        let mut file = fixture_order();
        file.order.kind = domain::OrderKind::Standard;

        let summary = cli::run(&Config::default(), &file).unwrap();

        // 25 + 3 = 28, tax 5.60, discount 2.50
        assert_eq!(summary.total, Money::from_cents(3110));
    }

    #[test]
    fn pricing_file_overrides_fee_settings() {
        let config = Config {
            pricing_config_path: Some(fixture("pricing.json")),
            ..Config::default()
        };

        let summary = cli::run(&config, &fixture_order()).unwrap();

        // (25 + 3 - 2.50) * 1.20
        assert_eq!(summary.total, Money::from_cents(3060));
        assert_eq!(
            summary.stages,
            vec!["tax", "discount", "delivery_fee", "subtotal"]
        );
    }

    #[test]
    fn summary_lists_lines_and_total() {
        let summary = cli::run(&Config::default(), &fixture_order()).unwrap();
        let text = summary.to_string();

        assert!(text.contains("for Ivan"));
        assert!(text.contains("Burger x2  $20.00"));
        assert!(text.contains("Total: $35.90"));
        assert!(text.ends_with("Final status: Completed"));
    }

    #[test]
    fn unknown_item_fails_the_run() {
        let mut file = fixture_order();
        file.order.lines[0].item_id = "pizza".to_string();

        let err = cli::run(&Config::default(), &file).unwrap_err();
        assert_eq!(err.kind(), "ItemNotFound");
    }

    #[test]
    fn zero_quantity_fails_the_run() {
        let mut file = fixture_order();
        file.order.lines[1].quantity = 0;

        let err = cli::run(&Config::default(), &file).unwrap_err();
        assert_eq!(err.kind(), "InvalidQuantity");
    }

    #[test]
    fn oversized_price_fails_the_run() {
        let mut file = fixture_order();
        file.catalog[0].price = Money::new(rust_decimal::Decimal::MAX);

        let err = cli::run(&Config::default(), &file).unwrap_err();
        assert_eq!(err.kind(), "InvalidPrice");
    }

    #[test]
    fn overflowing_line_total_fails_the_run() {
        let mut file = fixture_order();
        file.catalog[0].price = Money::MAX;

        let err = cli::run(&Config::default(), &file).unwrap_err();
        assert_eq!(err.kind(), "AmountOverflow");
    }

    #[test]
    fn out_of_range_tax_rate_fails_the_run() {
        let config = Config {
            tax_rate: rust_decimal::Decimal::TWO,
            ..Config::default()
        };

        let err = cli::run(&config, &fixture_order()).unwrap_err();
        assert_eq!(err.kind(), "InvalidRate");
    }

    #[test]
    fn malformed_json_is_reported() {
        let err: CliError = serde_json::from_str::<OrderFile>("{ \"catalog\": [")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "MalformedInput");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = cli::load_order_file(&fixture("missing.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}

mod binary {
    use super::*;

    fn delivery() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_delivery"));
        for key in [
            "RUST_LOG",
            "LOG_FORMAT",
            "DELIVERY_FEE",
            "EXPRESS_FEE",
            "TAX_RATE",
            "DISCOUNT_THRESHOLD",
            "DISCOUNT_PERCENT",
            "PRICING_CONFIG",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    #[test]
    fn prints_total_and_exits_zero() {
        let output = delivery().arg(fixture("order.json")).output().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("Total: $35.90"));
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let output = delivery().output().unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("error[Usage]:"));
    }

    #[test]
    fn huge_price_is_an_error_not_a_crash() {
        let dir = std::env::temp_dir().join(format!("delivery-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("huge.json");
        let mut file = fixture_order();
        file.catalog[0].price = Money::new(rust_decimal::Decimal::MAX);
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let output = delivery().arg(&path).output().unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("error[InvalidPrice]:"));
        assert!(!stderr.contains("panicked"));
    }

    #[test]
    fn malformed_log_filter_exits_one() {
        let output = delivery()
            .arg(fixture("order.json"))
            .env("RUST_LOG", "delivery=loud")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("error[InvalidConfig]: Invalid configuration: RUST_LOG"));
    }

    #[test]
    fn bad_environment_value_exits_one() {
        let output = delivery()
            .arg(fixture("order.json"))
            .env("TAX_RATE", "plenty")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("error[InvalidConfig]:"));
    }
}
