//! Server configuration loaded from environment variables.
//!
//! All settings have defaults. Override any variable at process startup;
//! no config file required.
//!
//! | Variable                   | Default       | Description                                   |
//! |----------------------------|---------------|-----------------------------------------------|
//! | `BIGO_HOST`                | `0.0.0.0`     | Listen address                                |
//! | `BIGO_PORT`                | `3000`        | Listen port                                   |
//! | `BIGO_DATABASE`            | `analysis.db` | SQLite file (`:memory:` for a throwaway store)|
//! | `BIGO_LOG_LEVEL`           | `info`        | tracing filter (trace/debug/info/warn/error)  |
//! | `BIGO_MAX_ITEMS`           | `0`           | Largest `n` accepted by `/analyze` (0 = off)  |
//! | `BIGO_PLOT_WIDTH`          | `1000`        | Curve image width in pixels                   |
//! | `BIGO_PLOT_HEIGHT`         | `600`         | Curve image height in pixels                  |
//! | `BIGO_FONT_PATH`           | unset         | TTF used for plot text                        |
//! | `BIGO_STRICT_SAVE`         | `false`       | Reject saves with inconsistent timing fields  |
//! | `BIGO_STRICT_TOLERANCE_MS` | `1.0`         | Allowed drift for strict saves                |
//! | `BIGO_MAX_BODY_BYTES`      | `16777216`    | Request body limit                            |

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Runtime configuration for the bigo server process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// Path of the SQLite database file.
    pub database: String,

    /// Tracing filter string, e.g. `"bigo_server=debug,info"`.
    pub log_level: String,

    /// Largest `n` accepted by `/analyze` (0 = unbounded).
    pub max_items: usize,

    pub plot_width:  u32,
    pub plot_height: u32,

    /// Explicit font file for plot text; common system locations are tried when unset.
    pub font_path: Option<String>,

    /// Wrap the store so saves with inconsistent timing fields are refused.
    pub strict_save: bool,

    pub strict_tolerance_ms: f64,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables, applying defaults where
    /// a variable is absent or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            host:                var("BIGO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:                parse_var(var("BIGO_PORT")).unwrap_or(3000),
            database:            var("BIGO_DATABASE").unwrap_or_else(|| "analysis.db".to_string()),
            log_level:           var("BIGO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            max_items:           parse_var(var("BIGO_MAX_ITEMS")).unwrap_or(0),
            plot_width:          parse_var(var("BIGO_PLOT_WIDTH")).unwrap_or(bigo_plot::DEFAULT_WIDTH),
            plot_height:         parse_var(var("BIGO_PLOT_HEIGHT")).unwrap_or(bigo_plot::DEFAULT_HEIGHT),
            font_path:           var("BIGO_FONT_PATH"),
            strict_save:         var("BIGO_STRICT_SAVE").map(|v| is_truthy(&v)).unwrap_or(false),
            strict_tolerance_ms: parse_var(var("BIGO_STRICT_TOLERANCE_MS")).unwrap_or(1.0),
            max_body_bytes:      parse_var(var("BIGO_MAX_BODY_BYTES")).unwrap_or(16 * 1024 * 1024),
        }
    }

    /// Socket address built from `host` and `port`.
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_var<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_are_sane() {
        let cfg = from_map(&[]);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.database, "analysis.db");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.max_items, 0);
        assert_eq!((cfg.plot_width, cfg.plot_height), (1000, 600));
        assert!(cfg.font_path.is_none());
        assert!(!cfg.strict_save);
        assert!(cfg.max_body_bytes > 0);
        assert_eq!(cfg.addr().unwrap().port(), 3000);
    }

    #[test]
    fn overrides_applied() {
        let cfg = from_map(&[
            ("BIGO_PORT", "9090"),
            ("BIGO_HOST", "127.0.0.1"),
            ("BIGO_DATABASE", ":memory:"),
            ("BIGO_MAX_ITEMS", "5000"),
            ("BIGO_STRICT_SAVE", "TRUE"),
            ("BIGO_FONT_PATH", "/tmp/font.ttf"),
        ]);
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(cfg.database, ":memory:");
        assert_eq!(cfg.max_items, 5000);
        assert!(cfg.strict_save);
        assert_eq!(cfg.font_path.as_deref(), Some("/tmp/font.ttf"));
    }

    #[test]
    fn unparseable_values_fall_back() {
        let cfg = from_map(&[("BIGO_PORT", "not-a-port"), ("BIGO_PLOT_WIDTH", "-3"), ("BIGO_HOST", "")]);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.plot_width, 1000);
        assert_eq!(cfg.host, "0.0.0.0");
    }

    #[test]
    fn numeric_fields_parse_to_their_own_types() {
        let cfg = from_map(&[
            ("BIGO_PORT", "8080"),
            ("BIGO_MAX_ITEMS", " 20000 "),
            ("BIGO_PLOT_WIDTH", "640"),
            ("BIGO_PLOT_HEIGHT", "480"),
            ("BIGO_STRICT_TOLERANCE_MS", "2.5"),
            ("BIGO_MAX_BODY_BYTES", "1048576"),
        ]);
        assert_eq!(cfg.port, 8080_u16);
        assert_eq!(cfg.max_items, 20_000_usize);
        assert_eq!((cfg.plot_width, cfg.plot_height), (640_u32, 480_u32));
        assert_eq!(cfg.strict_tolerance_ms, 2.5_f64);
        assert_eq!(cfg.max_body_bytes, 1_048_576_usize);
    }

    #[test]
    fn bad_host_is_reported() {
        assert!(from_map(&[("BIGO_HOST", "not an ip")]).addr().is_err());
    }
}
