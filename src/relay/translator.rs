//! Notification → MessageCard mapping.
//!
//! `translate` is pure apart from the warning emitted for unknown triggers.

use jiff::Timestamp;
use validator::{ValidationError, ValidationErrors};

use super::card::{Fact, MessageCard, PotentialAction, Section, MESSAGE_CARD_CONTEXT, MESSAGE_CARD_TYPE};
use super::error::{RelayError, RelayResult};
use super::payload::InboundNotificationPayload;
use super::trigger::RunTrigger;

/// `DD/MM/YYYY HH:MM:SS`, always rendered in UTC
pub const TIMESTAMP_LAYOUT: &str = "%d/%m/%Y %H:%M:%S";

pub const FACT_ORGANISATION: &str = "Organisation";
pub const FACT_RUN_ID: &str = "Run ID";
pub const FACT_RUN_CREATED_BY: &str = "Run Created By";
pub const FACT_RUN_CREATED_AT: &str = "Run Created At";

/// Renders a timestamp with [`TIMESTAMP_LAYOUT`].
pub fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.strftime(TIMESTAMP_LAYOUT).to_string()
}

/// Card colour for a trigger, empty when the trigger is unknown.
pub fn theme_color(trigger: &str) -> &'static str {
    match trigger.parse::<RunTrigger>() {
        Ok(trigger) => trigger.theme_color(),
        Err(err) => {
            tracing::warn!(trigger = %err.0, "unsupported trigger");
            ""
        }
    }
}

/// Builds the card title from the first notification and the workspace.
pub fn card_title(message: &str, workspace_name: &str) -> String {
    if workspace_name.is_empty() {
        message.to_string()
    } else {
        format!("{} in {}.", message, workspace_name)
    }
}

/// Facts in fixed order; absent values produce no entry at all.
pub fn run_facts(payload: &InboundNotificationPayload) -> Vec<Fact> {
    let mut facts = Vec::with_capacity(4);

    if !payload.organization_name.is_empty() {
        facts.push(Fact::new(FACT_ORGANISATION, &payload.organization_name));
    }

    if !payload.run_id.is_empty() {
        facts.push(Fact::new(FACT_RUN_ID, &payload.run_id));
    }

    if !payload.run_created_by.is_empty() {
        facts.push(Fact::new(FACT_RUN_CREATED_BY, &payload.run_created_by));
    }

    if let Some(created_at) = payload.run_created_at {
        facts.push(Fact::new(FACT_RUN_CREATED_AT, format_timestamp(created_at)));
    }

    facts
}

/// Converts a notification payload into a Teams MessageCard.
///
/// The caller is expected to have run [`InboundNotificationPayload::check`];
/// a payload without notifications is still reported as invalid rather than
/// panicking.
pub fn translate(payload: &InboundNotificationPayload) -> RelayResult<MessageCard> {
    let notification = payload.primary_notification().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("notifications", ValidationError::new("length"));
        RelayError::InvalidPayload(errors)
    })?;

    let title = card_title(&notification.message, &payload.workspace_name);

    let section = Section {
        activity_title: Some(notification.run_updated_by.clone()).filter(|s| !s.is_empty()),
        activity_subtitle: notification.run_updated_at.map(format_timestamp),
        facts: run_facts(payload),
    };

    Ok(MessageCard {
        card_type: MESSAGE_CARD_TYPE.to_string(),
        context: MESSAGE_CARD_CONTEXT.to_string(),
        summary: title.clone(),
        title,
        text: payload.run_message.clone(),
        theme_color: theme_color(&notification.trigger).to_string(),
        sections: vec![section],
        potential_actions: vec![PotentialAction::view_run(&payload.run_url)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::payload::NotificationEntry;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn entry(message: &str, trigger: &str) -> NotificationEntry {
        NotificationEntry {
            message: message.to_string(),
            trigger: trigger.to_string(),
            ..Default::default()
        }
    }

    fn minimal(message: &str, trigger: &str) -> InboundNotificationPayload {
        InboundNotificationPayload {
            payload_version: 1,
            notifications: vec![entry(message, trigger)],
            ..Default::default()
        }
    }

    fn full() -> InboundNotificationPayload {
        InboundNotificationPayload {
            payload_version: 1,
            notification_configuration_id: "nc-1".to_string(),
            run_url: "https://app.terraform.io/app/acme/prod/runs/run-1".to_string(),
            run_id: "run-1".to_string(),
            run_message: "Triggered via UI".to_string(),
            run_created_at: Some("2021-03-04T05:06:07Z".parse().unwrap()),
            run_created_by: "alice".to_string(),
            workspace_id: "ws-1".to_string(),
            workspace_name: "prod".to_string(),
            organization_name: "acme".to_string(),
            notifications: vec![NotificationEntry {
                message: "Applied".to_string(),
                trigger: "run:completed".to_string(),
                run_status: "applied".to_string(),
                run_updated_at: Some("2021-03-04T05:16:27Z".parse().unwrap()),
                run_updated_by: "bob".to_string(),
            }],
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn translate_capturing(payload: &InboundNotificationPayload) -> (MessageCard, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let card = tracing::subscriber::with_default(subscriber, || translate(payload).unwrap());
        (card, logs.contents())
    }

    #[test]
    fn test_title_with_workspace() {
        let mut payload = minimal("Run done", "run:completed");
        payload.workspace_name = "prod".to_string();

        let card = translate(&payload).unwrap();
        assert_eq!(card.title, "Run done in prod.");
        assert_eq!(card.summary, card.title);
    }

    #[test]
    fn test_title_without_workspace() {
        let card = translate(&minimal("Run done", "run:completed")).unwrap();
        assert_eq!(card.title, "Run done");
        assert_eq!(card.summary, "Run done");
    }

    #[test]
    fn test_errored_trigger_colour() {
        let card = translate(&minimal("Run failed", "run:errored")).unwrap();
        assert_eq!(card.theme_color, "#f5222d");
    }

    #[test]
    fn test_unknown_trigger_logs_and_leaves_colour_empty() {
        let (card, logs) = translate_capturing(&minimal("Something", "unknown:x"));

        assert_eq!(card.theme_color, "");
        assert!(logs.contains("unsupported trigger"), "logs: {}", logs);
        assert!(logs.contains("unknown:x"), "logs: {}", logs);

        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("themeColor").is_none());
    }

    #[test]
    fn test_known_trigger_does_not_log_warning() {
        let (card, logs) = translate_capturing(&minimal("Planned", "run:planning"));

        assert_eq!(card.theme_color, "#13c2c2");
        assert!(!logs.contains("unsupported trigger"), "logs: {}", logs);
    }

    #[test]
    fn test_facts_only_for_present_fields() {
        let mut payload = minimal("Run done", "run:completed");
        payload.organization_name = "acme".to_string();
        payload.run_created_by = "alice".to_string();

        let card = translate(&payload).unwrap();
        let names: Vec<&str> = card.sections[0]
            .facts
            .iter()
            .map(|fact| fact.name.as_str())
            .collect();
        assert_eq!(names, vec![FACT_ORGANISATION, FACT_RUN_CREATED_BY]);
    }

    #[test]
    fn test_no_facts_for_empty_payload() {
        let card = translate(&minimal("Run done", "run:completed")).unwrap();

        assert_eq!(card.sections.len(), 1);
        assert!(card.sections[0].facts.is_empty());
        assert!(card.sections[0].activity_title.is_none());
        assert!(card.sections[0].activity_subtitle.is_none());
    }

    #[test]
    fn test_full_payload() {
        let card = translate(&full()).unwrap();

        assert_eq!(card.card_type, "MessageCard");
        assert_eq!(card.context, "https://schema.org/extensions");
        assert_eq!(card.title, "Applied in prod.");
        assert_eq!(card.text, "Triggered via UI");
        assert_eq!(card.theme_color, "#a0d911");

        let section = &card.sections[0];
        assert_eq!(section.activity_title.as_deref(), Some("bob"));
        assert_eq!(section.activity_subtitle.as_deref(), Some("04/03/2021 05:16:27"));
        assert_eq!(
            section.facts,
            vec![
                Fact::new("Organisation", "acme"),
                Fact::new("Run ID", "run-1"),
                Fact::new("Run Created By", "alice"),
                Fact::new("Run Created At", "04/03/2021 05:06:07"),
            ]
        );

        assert_eq!(card.potential_actions.len(), 1);
        let action = &card.potential_actions[0];
        assert_eq!(action.action_type, "OpenUri");
        assert_eq!(action.name, "View Run");
        assert_eq!(action.targets[0].uri, "https://app.terraform.io/app/acme/prod/runs/run-1");
    }

    #[test]
    fn test_translation_is_deterministic() {
        let payload = full();
        let first = serde_json::to_string(&translate(&payload).unwrap()).unwrap();
        let second = serde_json::to_string(&translate(&payload).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_first_notification_is_used() {
        let mut payload = minimal("First", "run:created");
        payload.notifications.push(entry("Second", "run:errored"));

        let card = translate(&payload).unwrap();
        assert_eq!(card.title, "First");
        assert_eq!(card.theme_color, "#595959");
    }

    #[test]
    fn test_action_points_at_empty_run_url() {
        let card = translate(&minimal("Run done", "run:completed")).unwrap();
        assert_eq!(card.potential_actions[0].targets[0].uri, "");
    }

    #[test]
    fn test_empty_notifications_is_invalid() {
        let payload = InboundNotificationPayload {
            payload_version: 1,
            ..Default::default()
        };
        assert!(matches!(translate(&payload), Err(RelayError::InvalidPayload(_))));
    }

    #[test]
    fn test_timestamp_layout_is_zero_padded() {
        let ts: Timestamp = "2022-01-02T03:04:05.999Z".parse().unwrap();
        assert_eq!(format_timestamp(ts), "02/01/2022 03:04:05");
    }

    #[test]
    fn test_offset_timestamps_are_rendered_in_utc() {
        let ts: Timestamp = "2019-01-25T20:34:00+02:00".parse().unwrap();
        assert_eq!(format_timestamp(ts), "25/01/2019 18:34:00");

        let payload = crate::relay::decode_payload(
            br#"{"payload_version":1,"run_created_at":"2019-01-25T20:34:00+02:00",
                "notifications":[{"message":"Applied","trigger":"run:applied",
                "run_updated_at":"2019-01-25T23:59:59-01:00"}]}"#,
        )
        .unwrap();
        let card = translate(&payload).unwrap();

        let created_at = card.sections[0]
            .facts
            .iter()
            .find(|fact| fact.name == FACT_RUN_CREATED_AT)
            .unwrap();
        assert_eq!(created_at.value, "25/01/2019 18:34:00");
        assert_eq!(card.sections[0].activity_subtitle.as_deref(), Some("26/01/2019 00:59:59"));
    }
}
