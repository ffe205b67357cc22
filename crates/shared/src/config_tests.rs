use super::*;

#[test]
fn test_load_defaults_without_sources() {
    temp_env::with_vars_unset(
        [
            "MSB__SERVER__PORT",
            "MSB__EMAIL__SMTP_HOST",
            "MSB__BACKUP__PROVIDER",
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.email.smtp_host, "localhost");
            assert_eq!(config.email.smtp_port, 1025);
            assert!(matches!(config.backup, BackupConfig::LocalFs { ref root } if root == "./backups"));
        },
    );
}

#[test]
fn test_env_overrides() {
    temp_env::with_vars(
        [
            ("MSB__SERVER__PORT", Some("9090")),
            ("MSB__EMAIL__SMTP_HOST", Some("smtp.example.com")),
            ("MSB__EMAIL__FROM_NAME", Some("Filing Desk")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.email.smtp_host, "smtp.example.com");
            assert_eq!(config.email.from_name, "Filing Desk");
        },
    );
}

#[test]
fn test_backup_s3_from_env() {
    temp_env::with_vars(
        [
            ("MSB__BACKUP__PROVIDER", Some("s3")),
            ("MSB__BACKUP__ENDPOINT", Some("https://r2.example.com")),
            ("MSB__BACKUP__BUCKET", Some("msb-backups")),
            ("MSB__BACKUP__ACCESS_KEY_ID", Some("key")),
            ("MSB__BACKUP__SECRET_ACCESS_KEY", Some("secret")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            match config.backup {
                BackupConfig::S3 { bucket, region, .. } => {
                    assert_eq!(bucket, "msb-backups");
                    assert_eq!(region, "auto");
                }
                BackupConfig::LocalFs { .. } => panic!("expected s3 backup config"),
            }
        },
    );
}

#[test]
fn test_email_config_default() {
    let config = EmailConfig::default();
    assert_eq!(config.smtp_host, "localhost");
    assert_eq!(config.smtp_port, 1025);
    assert!(config.smtp_username.is_empty());
}
