//! Provenance record stored in the container header.
//!
//! Serialized as
//! `{"build-info":{"host":…,"version":…,"user":…,"time":…}}` with
//! `serde_json`.  The timestamp is supplied by the caller so that every
//! container written with the same [`BuildInfo`] carries the same time and
//! tests can pin it.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use sysinfo::{ProcessRefreshKind, System, UpdateKind, Users};

/// `yyyy-MM-ddTHH:mm:ss.ffffffZ`, UTC, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub const UNKNOWN: &str = "unknown";

pub fn tool_version() -> String {
    format!("zs {}", env!("CARGO_PKG_VERSION"))
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Account that owns the running process, resolved through the OS user
/// database.  `None` when the owner has no name entry.
pub fn process_owner() -> Option<String> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = System::new();
    system.refresh_process_specifics(pid, ProcessRefreshKind::new().with_user(UpdateKind::Always));
    let uid = system.process(pid)?.user_id()?.clone();
    let users = Users::new_with_refreshed_list();
    users
        .get_user_by_id(&uid)
        .map(|user| user.name().to_string())
        .filter(|name| !name.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub host:    String,
    pub version: String,
    pub user:    String,
    #[serde(serialize_with = "serialize_time")]
    pub time:    DateTime<Utc>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "build-info")]
    build_info: &'a BuildInfo,
}

fn serialize_time<S: Serializer>(time: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(time))
}

impl BuildInfo {
    pub fn new(host: impl Into<String>, user: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            host:    host.into(),
            version: tool_version(),
            user:    user.into(),
            time,
        }
    }

    /// Host and user of the running process, stamped with `time`.
    pub fn from_environment(time: DateTime<Utc>) -> Self {
        let host = System::host_name().filter(|h| !h.is_empty());
        let user = process_owner().or_else(|| {
            ["USER", "USERNAME"]
                .iter()
                .find_map(|key| std::env::var(key).ok().filter(|u| !u.is_empty()))
        });
        Self::new(
            host.unwrap_or_else(|| UNKNOWN.to_string()),
            user.unwrap_or_else(|| UNKNOWN.to_string()),
            time,
        )
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// UTF-8 bytes written as the header's metadata field.
    pub fn build(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&Envelope { build_info: self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pinned() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 3, 4, 17, 5, 9).unwrap() + chrono::Duration::microseconds(42)
    }

    #[test]
    fn timestamp_has_microseconds_and_zulu_suffix() {
        assert_eq!(format_timestamp(&pinned()), "2018-03-04T17:05:09.000042Z");
    }

    #[test]
    fn record_is_well_formed_and_ordered() {
        let info = BuildInfo::new("build-01", "sam", pinned());
        let text = String::from_utf8(info.build().unwrap()).unwrap();
        assert_eq!(
            text,
            format!(
                r#"{{"build-info":{{"host":"build-01","version":"{}","user":"sam","time":"2018-03-04T17:05:09.000042Z"}}}}"#,
                tool_version()
            )
        );

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["build-info"]["user"], "sam");
    }

    #[test]
    fn quotes_in_fields_are_escaped() {
        let info = BuildInfo::new("a\"b", "c\\d", pinned()).with_version("zs test");
        let parsed: serde_json::Value = serde_json::from_slice(&info.build().unwrap()).unwrap();
        assert_eq!(parsed["build-info"]["host"], "a\"b");
        assert_eq!(parsed["build-info"]["user"], "c\\d");
        assert_eq!(parsed["build-info"]["version"], "zs test");
    }

    #[test]
    fn environment_fields_are_never_empty() {
        let info = BuildInfo::from_environment(pinned());
        assert!(!info.host.is_empty());
        assert!(!info.user.is_empty());
        assert_eq!(info.version, tool_version());
    }
}
