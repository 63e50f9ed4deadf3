// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试从文件加载配置以及覆盖顺序

#[cfg(test)]
mod tests {
    use config::File;
    use github_telex::config::settings::Settings;
    use std::io::Write;

    const CONFIG_TOML: &str = r#"
[server]
port = 9100

[telex]
webhook_url = "https://ping.telex.im/v1/webhooks/from-file"
timeout_secs = 3

[github]
secret = "file-secret"

[integration]
name = "Repo Activity"
app_url = "https://hooks.example.com"

[relay]
max_concurrency = 2
"#;

    fn write_config() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(CONFIG_TOML.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_loading_from_toml_file() {
        let file = write_config();

        let settings = Settings::from_builder(
            Settings::defaults()
                .unwrap()
                .add_source(File::from(file.path())),
        )
        .unwrap();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(
            settings.telex.webhook_url,
            "https://ping.telex.im/v1/webhooks/from-file"
        );
        assert_eq!(settings.telex.timeout_secs, 3);
        assert_eq!(settings.github.secret, "file-secret");
        assert_eq!(settings.integration.name, "Repo Activity");
        assert_eq!(settings.integration.id, "github-telex-integration");
        assert_eq!(
            settings.integration.app_url.as_deref(),
            Some("https://hooks.example.com")
        );
        assert_eq!(settings.relay.max_concurrency, 2);
        assert_eq!(settings.relay.queue_capacity, 1024);
    }

    #[test]
    fn test_overrides_take_precedence_over_file() {
        let file = write_config();

        let settings = Settings::from_builder(
            Settings::defaults()
                .unwrap()
                .add_source(File::from(file.path()))
                .set_override("github.secret", "override-secret")
                .unwrap(),
        )
        .unwrap();

        assert_eq!(settings.github.secret, "override-secret");
    }

    #[test]
    fn test_zero_queue_capacity_is_rejected() {
        let file = write_config();

        let result = Settings::from_builder(
            Settings::defaults()
                .unwrap()
                .add_source(File::from(file.path()))
                .set_override("relay.queue_capacity", 0)
                .unwrap(),
        );

        assert!(result.is_err());
    }
}
