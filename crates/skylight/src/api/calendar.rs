//! Calendar events and connected source calendars.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{CalendarEvent, Envelope, SourceCalendar};

const EVENTS_ENDPOINT: &str = "/api/frames/{frame_id}/calendar_events";
const SOURCE_CALENDARS_ENDPOINT: &str = "/api/frames/{frame_id}/source_calendars";

/// Date window for an event listing.
#[derive(Debug, Clone)]
pub struct CalendarEventQuery {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    /// Defaults to the configured zone.
    pub timezone: Option<String>,
    /// Comma-separated related resources to side-load.
    pub include: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventWriteBody {
    data: EventWriteData,
}

#[derive(Debug, Serialize)]
struct EventWriteData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: Map<String, Value>,
}

impl SkylightClient {
    /// Get calendar events in a date window.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn calendar_events(
        &self,
        query: &CalendarEventQuery,
    ) -> Result<Vec<CalendarEvent>, SkylightError> {
        let timezone = query
            .timezone
            .clone()
            .unwrap_or_else(|| self.timezone().name().to_string());

        let mut params = vec![
            ("date_min".to_string(), query.date_min.to_string()),
            ("date_max".to_string(), query.date_max.to_string()),
            ("timezone".to_string(), timezone),
        ];
        if let Some(include) = &query.include {
            params.push(("include".to_string(), include.clone()));
        }

        let envelope: Envelope<Vec<CalendarEvent>> = self
            .get_with_query(EVENTS_ENDPOINT, &params)
            .await
            .map_err(|e| e.for_kind("calendar event"))?;
        Ok(envelope.data)
    }

    /// Get connected calendar accounts.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn source_calendars(&self) -> Result<Vec<SourceCalendar>, SkylightError> {
        let envelope: Envelope<Vec<SourceCalendar>> = self
            .get(SOURCE_CALENDARS_ENDPOINT)
            .await
            .map_err(|e| e.for_kind("source calendar"))?;
        Ok(envelope.data)
    }

    /// Create a calendar event from raw attributes (the backend does not
    /// commit to a fixed event schema).
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn create_calendar_event(
        &self,
        attributes: Map<String, Value>,
    ) -> Result<CalendarEvent, SkylightError> {
        let body = EventWriteBody {
            data: EventWriteData {
                kind: "calendar_event",
                attributes,
            },
        };
        let envelope: Envelope<CalendarEvent> = self
            .post(EVENTS_ENDPOINT, &body)
            .await
            .map_err(|e| e.for_kind("calendar event"))?;
        Ok(envelope.data)
    }

    /// Update a calendar event; only supplied attributes are sent.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn update_calendar_event(
        &self,
        event_id: &str,
        attributes: Map<String, Value>,
    ) -> Result<CalendarEvent, SkylightError> {
        let body = EventWriteBody {
            data: EventWriteData {
                kind: "calendar_event",
                attributes,
            },
        };
        let endpoint = format!("{EVENTS_ENDPOINT}/{event_id}");
        let envelope: Envelope<CalendarEvent> = self
            .put(&endpoint, &body)
            .await
            .map_err(|e| e.for_kind("calendar event"))?;
        Ok(envelope.data)
    }

    /// Delete a calendar event.
    ///
    /// # Errors
    /// Returns classified API errors; a second delete surfaces `NotFound`.
    pub async fn delete_calendar_event(&self, event_id: &str) -> Result<(), SkylightError> {
        let endpoint = format!("{EVENTS_ENDPOINT}/{event_id}");
        self.delete(&endpoint)
            .await
            .map_err(|e| e.for_kind("calendar event"))
    }
}
