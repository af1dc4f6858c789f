//! Method-name routing namespace.
//!
//! Method strings follow `"<route>/<resource>/<action>"`, where the leading
//! segment names the destination surface: `codestream` for agent-bound
//! traffic, `host` for the editor process, `webview` for the embedded UI.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Destination surface of a routed method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum IpcRoute {
    /// Agent-bound traffic (the `codestream` prefix).
    #[serde(rename = "codestream")]
    Agent,
    /// Editor-process-bound traffic.
    #[serde(rename = "host")]
    Host,
    /// Webview-bound traffic.
    #[serde(rename = "webview")]
    Webview,
}

impl IpcRoute {
    /// Wire prefix of this route.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "codestream",
            Self::Host => "host",
            Self::Webview => "webview",
        }
    }

    /// Classify a method name by its leading segment.
    ///
    /// Returns `None` for methods outside the known namespaces.
    #[must_use]
    pub fn of_method(method: &str) -> Option<Self> {
        let prefix = method.split_once('/').map_or(method, |(prefix, _)| prefix);
        match prefix {
            "codestream" => Some(Self::Agent),
            "host" => Some(Self::Host),
            "webview" => Some(Self::Webview),
            _ => None,
        }
    }

    /// Build a `"<route>/<resource>/<action>"` method name.
    #[must_use]
    pub fn method(self, resource: &str, action: &str) -> String {
        format!("{}/{resource}/{action}", self.as_str())
    }
}

impl Display for IpcRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
