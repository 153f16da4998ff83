//! Configuration sourced from the process environment.
//!
//! Everything is read once at startup into an immutable [`Config`]. Missing
//! or inconsistent settings are rejected here, before a connection is ever
//! opened.

use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{MirrorError, Result};

/// Socket timeout in seconds when `FTP_TIMEOUT_SECS` is unset.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Full runtime configuration for one mirror run.
#[derive(Debug, Clone)]
pub struct Config {
    pub ftp: FtpSettings,
    pub sync: SyncSettings,
}

/// Connection settings for the FTP session.
#[derive(Debug, Clone)]
pub struct FtpSettings {
    /// Server host, optionally `host:port` (port defaults to 21)
    pub host: String,
    pub user: String,
    pub password: String,
    /// Applied to the connect and to every socket read/write
    pub timeout: Duration,
}

/// What to mirror and where.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Prefix joined onto every remote path, forward-slash semantics
    pub remote_base: String,
    /// Prefix joined onto every local path, host-native semantics
    pub local_base: PathBuf,
    /// Backup directory relative to each mirrored file's directory;
    /// empty puts backups next to the file itself
    pub backup_path: PathBuf,
    /// Ordered (remote, local) path pairs
    pub pairs: Vec<SyncPair>,
}

/// One configured remote-to-local mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    pub remote: String,
    pub local: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Example
    /// ```no_run
    /// use ftp_mirror::Config;
    ///
    /// let config = Config::from_env().expect("missing FTP settings");
    /// println!("{} pairs configured", config.sync.pairs.len());
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = required(&get, "FTP_HOST")?;
        let user = required(&get, "FTP_USER")?;
        let password = required(&get, "FTP_PASSWORD")?;
        let remote_list = required(&get, "REMOTE_PATHS")?;
        let local_list = required(&get, "LOCAL_PATHS")?;

        let timeout_secs = get("FTP_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let pairs = parse_pairs(&remote_list, &local_list)?;

        Ok(Self {
            ftp: FtpSettings {
                host,
                user,
                password,
                timeout: Duration::from_secs(timeout_secs),
            },
            sync: SyncSettings {
                remote_base: get("REMOTE_BASE_PATH").unwrap_or_default(),
                local_base: PathBuf::from(get("LOCAL_BASE_PATH").unwrap_or_default()),
                backup_path: PathBuf::from(get("BACKUP_PATH").unwrap_or_default()),
                pairs,
            },
        })
    }
}

/// A required variable is rejected both when unset and when set to "".
fn required(get: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    match get(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(MirrorError::Config(format!("{name} is not set"))),
    }
}

/// Split the two semicolon-delimited path lists and zip them into pairs.
///
/// The lists must be the same length; a mismatch means the operator's
/// intent is unknowable, so nothing is transferred.
fn parse_pairs(remote_list: &str, local_list: &str) -> Result<Vec<SyncPair>> {
    let remote_paths: Vec<&str> = remote_list.split(';').collect();
    let local_paths: Vec<&str> = local_list.split(';').collect();

    if remote_paths.len() != local_paths.len() {
        return Err(MirrorError::Config(format!(
            "REMOTE_PATHS has {} entries but LOCAL_PATHS has {}",
            remote_paths.len(),
            local_paths.len()
        )));
    }

    Ok(remote_paths
        .into_iter()
        .zip(local_paths)
        .map(|(remote, local)| SyncPair {
            remote: remote.to_string(),
            local: local.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("FTP_HOST", "ftp.example.com"),
            ("FTP_USER", "mirror"),
            ("FTP_PASSWORD", "secret"),
            ("REMOTE_PATHS", "/app/tool.exe;/app/data.db"),
            ("LOCAL_PATHS", "app/tool.exe;app/data.db"),
        ]
    }

    #[test]
    fn test_full_config() {
        let mut vars = base_vars();
        vars.extend([
            ("REMOTE_BASE_PATH", "/srv/files"),
            ("LOCAL_BASE_PATH", "/var/mirror"),
            ("BACKUP_PATH", "backup"),
            ("FTP_TIMEOUT_SECS", "5"),
        ]);

        let config = Config::from_vars(lookup(&vars)).unwrap();

        assert_eq!(config.ftp.host, "ftp.example.com");
        assert_eq!(config.ftp.user, "mirror");
        assert_eq!(config.ftp.timeout, Duration::from_secs(5));
        assert_eq!(config.sync.remote_base, "/srv/files");
        assert_eq!(config.sync.local_base, PathBuf::from("/var/mirror"));
        assert_eq!(config.sync.backup_path, PathBuf::from("backup"));
        assert_eq!(config.sync.pairs.len(), 2);
        assert_eq!(
            config.sync.pairs[0],
            SyncPair {
                remote: "/app/tool.exe".to_string(),
                local: "app/tool.exe".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_settings_default() {
        let config = Config::from_vars(lookup(&base_vars())).unwrap();

        assert_eq!(config.sync.remote_base, "");
        assert_eq!(config.sync.local_base, PathBuf::new());
        assert_eq!(config.sync.backup_path, PathBuf::new());
        assert_eq!(config.ftp.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_required_var_is_config_error() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(name, _)| *name != "FTP_PASSWORD")
            .collect();

        let err = Config::from_vars(lookup(&vars)).unwrap_err();
        assert!(matches!(err, MirrorError::Config(_)));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("FTP_PASSWORD"));
    }

    #[test]
    fn test_empty_required_var_is_config_error() {
        let mut vars = base_vars();
        for entry in vars.iter_mut() {
            if entry.0 == "FTP_USER" {
                entry.1 = "";
            }
        }

        let err = Config::from_vars(lookup(&vars)).unwrap_err();
        assert!(matches!(err, MirrorError::Config(_)));
    }

    #[test]
    fn test_pair_count_mismatch_is_config_error() {
        let mut vars = base_vars();
        for entry in vars.iter_mut() {
            if entry.0 == "LOCAL_PATHS" {
                entry.1 = "app/tool.exe";
            }
        }

        let err = Config::from_vars(lookup(&vars)).unwrap_err();
        assert!(matches!(err, MirrorError::Config(_)));
        assert!(err.to_string().contains("2"));
        assert!(err.to_string().contains("1"));
    }

    #[test]
    fn test_unparseable_timeout_falls_back_to_default() {
        let mut vars = base_vars();
        vars.push(("FTP_TIMEOUT_SECS", "soon"));

        let config = Config::from_vars(lookup(&vars)).unwrap();
        assert_eq!(config.ftp.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_pairs_keep_order_and_empty_entries() {
        let mut vars = base_vars();
        for entry in vars.iter_mut() {
            match entry.0 {
                "REMOTE_PATHS" => entry.1 = "a.bin;;c.bin",
                "LOCAL_PATHS" => entry.1 = "a.bin;b.bin;c.bin",
                _ => {}
            }
        }

        let config = Config::from_vars(lookup(&vars)).unwrap();
        let remotes: Vec<&str> = config
            .sync
            .pairs
            .iter()
            .map(|p| p.remote.as_str())
            .collect();
        assert_eq!(remotes, vec!["a.bin", "", "c.bin"]);
    }
}
