//! Timezone database port
//!
//! The engine never talks to the timezone database directly; it goes
//! through the [`ZoneResolver`] trait so hosts can substitute their own
//! lookup (a restricted allowlist, a test stub). [`IanaResolver`] is the
//! production implementation backed by the bundled IANA database.

use std::str::FromStr;

use chrono_tz::Tz;
use tempus_domain::Zone;

/// Lookup port for named (non-offset, non-UTC) timezones.
pub trait ZoneResolver: Send + Sync {
    /// Resolve a zone name such as `"Europe/Amsterdam"`. Returns `None`
    /// when the name is not known.
    fn resolve(&self, name: &str) -> Option<Zone>;
}

/// Resolver backed by the IANA timezone database bundled with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaResolver;

impl ZoneResolver for IanaResolver {
    fn resolve(&self, name: &str) -> Option<Zone> {
        match Tz::from_str(name) {
            Ok(tz) => Some(Zone::Named(tz)),
            Err(_) => {
                tracing::debug!(zone = %name, "timezone.lookup_failed");
                None
            }
        }
    }
}
