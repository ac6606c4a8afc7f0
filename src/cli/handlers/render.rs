//! Render command handler
//!
//! Runs a saved notification through decode, check and translate, and
//! prints the card instead of posting it.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

use crate::error::AppResult;
use crate::relay::{decode_payload, translate, RelayError};

/// Reads the payload from stdin
pub const STDIN_PATH: &str = "-";

/// Handler for the render command
pub struct RenderCommandHandler {
    file: PathBuf,
    pretty: bool,
}

impl RenderCommandHandler {
    pub fn new(file: PathBuf, pretty: bool) -> Self {
        Self { file, pretty }
    }

    /// Prints the MessageCard for the payload to stdout.
    ///
    /// # Errors
    /// - the input cannot be read
    /// - the payload is malformed, has an unsupported version or no
    ///   notifications
    pub fn execute(&self) -> AppResult<()> {
        let body = self.read_input()?;
        println!("{}", self.render(&body)?);
        Ok(())
    }

    /// Card JSON for a raw payload body
    pub fn render(&self, body: &[u8]) -> AppResult<String> {
        let payload = decode_payload(body)?;
        payload.check()?;
        let card = translate(&payload)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&card)
        } else {
            serde_json::to_string(&card)
        };
        Ok(json.map_err(RelayError::Serialization)?)
    }

    fn read_input(&self) -> AppResult<Vec<u8>> {
        let mut body = Vec::new();

        if self.file.as_os_str() == STDIN_PATH {
            std::io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read notification payload from stdin")?;
        } else {
            body = std::fs::read(&self.file).with_context(|| {
                format!("Failed to read notification payload from '{}'", self.file.display())
            })?;
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::Value;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"{
        "payload_version": 1,
        "run_url": "https://app.terraform.io/app/acme/prod/runs/run-1",
        "run_id": "run-1",
        "workspace_name": "prod",
        "organization_name": "acme",
        "notifications": [{ "message": "Run done", "trigger": "run:completed" }]
    }"#;

    #[test]
    fn test_render_compact() {
        let handler = RenderCommandHandler::new(PathBuf::from("-"), false);
        let output = handler.render(PAYLOAD.as_bytes()).unwrap();

        assert!(!output.contains('\n'));
        let card: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(card["title"], "Run done in prod.");
        assert_eq!(card["themeColor"], "#a0d911");
    }

    #[test]
    fn test_render_pretty() {
        let handler = RenderCommandHandler::new(PathBuf::from("-"), true);
        let output = handler.render(PAYLOAD.as_bytes()).unwrap();
        assert!(output.contains("\n  \"@type\": \"MessageCard\""));
    }

    #[test]
    fn test_render_rejects_unsupported_version() {
        let handler = RenderCommandHandler::new(PathBuf::from("-"), false);
        let err = handler
            .render(br#"{"payload_version": 2, "notifications": [{"message": "x"}]}"#)
            .unwrap_err();

        assert!(matches!(err, AppError::Relay(RelayError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_reads_payload_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notification.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        let handler = RenderCommandHandler::new(path, false);
        let body = handler.read_input().unwrap();
        assert_eq!(body, PAYLOAD.as_bytes());
        assert!(handler.execute().is_ok());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let handler = RenderCommandHandler::new(PathBuf::from("/no/such/payload.json"), false);
        let err = handler.execute().unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert!(format!("{:?}", err).contains("/no/such/payload.json"));
    }
}
