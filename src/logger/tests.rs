//! Tests for subscriber assembly and runtime level changes

#[cfg(test)]
mod output_tests {
    use crate::logger::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn file_only(path: &Path, format: LogFormat, append: bool, level: &str) -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig {
                enabled: true,
                path: path.to_path_buf(),
                append,
                format,
            },
            level: level.to_string(),
        }
    }

    fn emit_with(config: &LoggerConfig, f: impl FnOnce()) {
        let (subscriber, _handle) = build_subscriber(config).expect("subscriber should build");
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn json_file_output_contains_event_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/catalog.log");

        emit_with(&file_only(&path, LogFormat::Json, true, "info"), || {
            tracing::info!(product_id = 7, "product created");
        });

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().expect("one line written");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["fields"]["message"], "product created");
        assert_eq!(value["fields"]["product_id"], 7);
        assert_eq!(value["level"], "INFO");
    }

    #[test]
    fn level_filter_drops_lower_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.log");

        emit_with(&file_only(&path, LogFormat::Full, true, "warn"), || {
            tracing::info!("hidden");
            tracing::warn!("visible");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("hidden"));
        assert!(contents.contains("visible"));
        assert!(!contents.contains("\u{1b}["), "file output must not contain ANSI codes");
    }

    #[test]
    fn append_false_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.log");
        fs::write(&path, "previous run\n").unwrap();

        emit_with(&file_only(&path, LogFormat::Compact, false, "info"), || {
            tracing::info!("fresh");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("previous run"));
        assert!(contents.contains("fresh"));
    }

    #[test]
    fn append_true_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.log");
        fs::write(&path, "previous run\n").unwrap();

        emit_with(&file_only(&path, LogFormat::Compact, true, "info"), || {
            tracing::info!("fresh");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("previous run"));
        assert!(contents.contains("fresh"));
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let config = LoggerConfig {
            level: "catalog_rs=loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            build_subscriber(&config),
            Err(LoggerError::Config { .. })
        ));
    }
}

#[cfg(test)]
mod dynamic_level_tests {
    use crate::logger::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

    fn console_only(level: &str) -> LoggerConfig {
        LoggerConfig {
            level: level.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn set_level_changes_what_reaches_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.log");
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig {
                enabled: true,
                path: path.clone(),
                append: true,
                format: LogFormat::Full,
            },
            level: "error".to_string(),
        };

        let (subscriber, handle) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("before change");
            handle.set_level("info").unwrap();
            tracing::info!("after change");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("before change"));
        assert!(contents.contains("after change"));
    }

    #[test]
    fn invalid_directive_is_rejected() {
        let (_subscriber, handle) = build_subscriber(&console_only("info")).unwrap();
        let result = handle.set_level("catalog_rs=notalevel");
        assert!(matches!(result, Err(LoggerError::Config { .. })));
        let current = handle.current_level().unwrap();
        assert_eq!(current.to_lowercase(), "info");
    }

    proptest! {
        /// Any sequence of valid levels leaves the last one active.
        #[test]
        fn prop_last_level_wins(indices in prop::collection::vec(0usize..5, 1..6)) {
            let (_subscriber, handle) = build_subscriber(&console_only("info")).unwrap();

            for &idx in &indices {
                prop_assert!(handle.set_level(LEVELS[idx]).is_ok());
            }

            let expected = LEVELS[*indices.last().unwrap()];
            let current = handle.current_level().unwrap_or_default();
            prop_assert_eq!(current.to_lowercase(), expected);
        }

        /// Per-target directives are accepted alongside the base level.
        #[test]
        fn prop_envfilter_directives_accepted(base in 0usize..5, module in 0usize..5) {
            let (_subscriber, handle) = build_subscriber(&console_only("info")).unwrap();
            let directive = format!("{},catalog_rs::services={}", LEVELS[base], LEVELS[module]);
            prop_assert!(handle.set_level(&directive).is_ok());
        }
    }
}
