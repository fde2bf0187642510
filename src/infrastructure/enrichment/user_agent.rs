// src/infrastructure/enrichment/user_agent.rs
use crate::application::ports::enrichment::UserAgentInspector;
use crate::domain::audit::DeviceInfo;
use woothee::parser::Parser;

/// Woothee-backed User-Agent parsing. Woothee reports "UNKNOWN" rather than
/// absence, so those sentinels are normalized to `None` here.
pub struct WootheeInspector {
    parser: Parser,
}

impl WootheeInspector {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }
}

impl Default for WootheeInspector {
    fn default() -> Self {
        Self::new()
    }
}

fn known(value: &str) -> Option<String> {
    if value.is_empty() || value == "UNKNOWN" {
        None
    } else {
        Some(value.to_string())
    }
}

impl UserAgentInspector for WootheeInspector {
    fn inspect(&self, user_agent: &str) -> Option<DeviceInfo> {
        let result = self.parser.parse(user_agent)?;

        Some(DeviceInfo {
            browser_name: known(result.name),
            browser_version: known(&result.version),
            os_name: known(result.os),
            os_version: known(&result.os_version),
            category: known(result.category),
            is_bot: result.category == "crawler",
        })
    }
}
