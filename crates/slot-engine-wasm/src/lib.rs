//! WASM bindings for slot-engine.
//!
//! Exposes the slot search and result summaries to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Deserialize;
use slot_engine::time::{parse_local_datetime, LOCAL_DATETIME_FORMAT};
use slot_engine::tool::{
    DEFAULT_DURATION_MINUTES, DEFAULT_INTERVAL_MINUTES, DEFAULT_MAX_CANDIDATES,
};
use slot_engine::{ScheduleEntry, SlotSearchRequest, SlotSearchResult, WorkingHours};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}

fn default_true() -> bool {
    true
}

fn default_working_hours_start() -> String {
    "09:00".to_string()
}

fn default_working_hours_end() -> String {
    "18:00".to_string()
}

/// Search request as sent from JavaScript. Omitted options take the tool
/// defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInput {
    schedules: Vec<ScheduleEntry>,
    start_date_time: String,
    #[serde(default = "default_interval")]
    interval_minutes: u32,
    #[serde(default = "default_duration")]
    duration_minutes: u32,
    #[serde(default = "default_working_hours_start")]
    working_hours_start: String,
    #[serde(default = "default_working_hours_end")]
    working_hours_end: String,
    #[serde(default = "default_true")]
    working_hours_only: bool,
    #[serde(default = "default_max_candidates")]
    max_candidates: usize,
    #[serde(default = "default_true")]
    include_tentative: bool,
}

impl SearchInput {
    fn into_request(self) -> Result<SlotSearchRequest, JsValue> {
        let start = parse_local_datetime(&self.start_date_time).map_err(|e| {
            JsValue::from_str(&format!("{} (expected {})", e, LOCAL_DATETIME_FORMAT))
        })?;
        let working_hours =
            WorkingHours::parse(&self.working_hours_start, &self.working_hours_end)
                .map_err(to_js)?;
        let request = SlotSearchRequest {
            schedules: self.schedules,
            start,
            interval_minutes: self.interval_minutes,
            duration_minutes: self.duration_minutes,
            working_hours,
            max_candidates: self.max_candidates,
            include_tentative: self.include_tentative,
            working_hours_only: self.working_hours_only,
        };
        request.validate().map_err(to_js)?;
        Ok(request)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find common meeting slots.
///
/// `request_json` is an object with `schedules` (array of
/// `{scheduleId?, availabilityView}`), `startDateTime`, and optional
/// `intervalMinutes`, `durationMinutes`, `workingHoursStart`,
/// `workingHoursEnd`, `workingHoursOnly`, `maxCandidates`, `includeTentative`.
/// Returns the search result as a JSON string.
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(request_json: &str) -> Result<String, JsValue> {
    let input: SearchInput = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let request = input.into_request()?;

    let result = slot_engine::find_available_slots(&request);

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Summarize a search result for rendering.
///
/// `result_json` is the output of `findAvailableSlots`; `emails_json` is the
/// attendee email array in schedule order. Returns the summary as a JSON
/// string.
#[wasm_bindgen(js_name = "summarizeSlots")]
pub fn summarize_slots(
    result_json: &str,
    emails_json: &str,
    duration_minutes: u32,
) -> Result<String, JsValue> {
    let result: SlotSearchResult = serde_json::from_str(result_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid result JSON: {}", e)))?;
    let emails: Vec<String> = serde_json::from_str(emails_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid emails JSON: {}", e)))?;

    let summary = slot_engine::summarize(&result, &emails, duration_minutes);

    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_options_take_tool_defaults() {
        let input: SearchInput = serde_json::from_str(
            r#"{"schedules":[{"availabilityView":"0000"}],"startDateTime":"2026-02-16T09:00:00"}"#,
        )
        .unwrap();
        let request = input.into_request().ok().unwrap();
        assert_eq!(request.interval_minutes, 30);
        assert_eq!(request.duration_minutes, 60);
        assert_eq!(request.max_candidates, 5);
        assert!(request.working_hours_only);
        assert!(request.include_tentative);
        assert_eq!(request.working_hours, WorkingHours::default());
    }

    #[test]
    fn find_then_summarize() {
        let result = find_available_slots(
            r#"{"schedules":[{"scheduleId":"a@example.com","availabilityView":"0000"},
                              {"scheduleId":"b@example.com","availabilityView":"1100"}],
                "startDateTime":"2026-02-16T09:00:00","maxCandidates":10}"#,
        )
        .ok()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["totalCandidatesFound"], 3);
        assert_eq!(value["candidates"][0]["start"], "2026-02-16T10:00:00");

        let summary = summarize_slots(&result, r#"["a@example.com","b@example.com"]"#, 60)
            .ok()
            .unwrap();
        let summary: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(summary["shown"], 3);
        assert_eq!(
            summary["slots"][1]["tentativeAttendees"],
            serde_json::json!(["b@example.com"])
        );
    }
}
