use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Headers, HtmlAnchorElement, Request, RequestInit, RequestMode, Response, Url};

use serde::Serialize;

use crate::types::WorkoutPlan;

const PARSE_URL: &str = "http://localhost:5000/data";
const TRACK_URL: &str = "http://localhost:5001/Newdata";

/// Column keys the write-back service expects for each editable field.
/// Legacy names live only here, at the wire; the in-app schema stays
/// canonical.
pub const FIELD_WEIGHT: &str = "weightTaken";
pub const FIELD_RPE: &str = "actual_rpe";
pub const FIELD_NOTES: &str = "notes";

/// Forward the raw sheet grid to the parsing backend and get the nested
/// week -> day -> exercise plan back. This is the sole producer of plan
/// data; the client never parses the grid itself.
pub async fn parse_sheet(grid: &serde_json::Value) -> Result<WorkoutPlan, String> {
    let body = serde_json::to_string(grid).map_err(|e| e.to_string())?;
    let json = post_json(PARSE_URL, &body)
        .await
        .map_err(|e| describe_failure("parse workout sheet", e))?;
    serde_wasm_bindgen::from_value(json)
        .map_err(|_| "parse workout sheet: unexpected response shape".to_string())
}

/// One committed edit, addressed the way the write-back service locates
/// cells: by day, week, exercise and the prescribed scheme it sits next to.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TrackingUpdate {
    pub field: String,
    #[serde(rename = "newValue")]
    pub new_value: String,
    pub day: String,
    pub week: String,
    pub exercise: String,
    pub prescribed: String,
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
}

/// Fire-and-forget, at-most-once, no retry: a lost update costs one cell
/// the user can re-commit. Failures go to the console only.
pub fn send_tracking_update(update: TrackingUpdate) {
    wasm_bindgen_futures::spawn_local(async move {
        match send_tracking_async(&update).await {
            Ok(()) => web_sys::console::log_1(
                &format!("Tracked {} for {}", update.field, update.exercise).into(),
            ),
            Err(e) => web_sys::console::warn_1(
                &format!("Tracking update failed: {:?}", e).into(),
            ),
        }
    });
}

async fn send_tracking_async(update: &TrackingUpdate) -> Result<(), JsValue> {
    let body = serde_json::to_string(update).map_err(|e| e.to_string())?;
    post_json(TRACK_URL, &body).await?;
    Ok(())
}

/// Serialize the held plan to a JavaScript source literal and hand it to
/// the browser as a download. A formatting convenience for offline reuse,
/// not a durable store.
pub fn download_plan_as_file(plan: &WorkoutPlan, filename: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(plan).map_err(|e| e.to_string())?;
    let content = format!(
        "// Generated workout data from Google Sheets\nexport const workoutData = {json};\n"
    );

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&content));
    let props = BlobPropertyBag::new();
    props.set_type("text/javascript");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)
        .map_err(|_| "Could not build export file".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Could not build export file".to_string())?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Could not build export link".to_string())?
        .dyn_into()
        .map_err(|_| "Could not build export link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or("no document body")?;
    let _ = body.append_child(&anchor);
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);

    Ok(())
}

// ============ FETCH PLUMBING ============

async fn post_json(url: &str, body: &str) -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));
    opts.set_headers(&JsValue::from(&headers));

    let request = Request::new_with_str_and_init(url, &opts)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()).into());
    }

    JsFuture::from(resp.json()?).await
}

fn describe_failure(what: &str, err: JsValue) -> String {
    match err.as_string() {
        Some(detail) => format!("{what}: {detail}"),
        None => format!("{what}: request failed"),
    }
}
