use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use serde::Deserialize;

use crate::types::{SpreadsheetFile, UserProfile};

const CLIENT_ID: &str = "473070785433-j66nu8cvkos5mkhml3se4mr1b4iop3po.apps.googleusercontent.com";
const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets.readonly \
    https://www.googleapis.com/auth/drive.metadata.readonly \
    https://www.googleapis.com/auth/userinfo.profile \
    https://www.googleapis.com/auth/userinfo.email";

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Bounded grid covering the largest supported program sheet, including
/// programs that don't start in the first column.
pub const DEFAULT_RANGE: &str = "A1:U58";

// ============ OAUTH (implicit flow) ============

/// Send the browser to Google's consent screen. The redirect lands back on
/// the app origin with the token in the URL fragment.
pub fn begin_sign_in() -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| "Could not read page origin".to_string())?;

    let url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=token&scope={}",
        AUTH_ENDPOINT,
        CLIENT_ID,
        js_sys::encode_uri_component(&origin),
        js_sys::encode_uri_component(SCOPES),
    );

    window
        .location()
        .set_href(&url)
        .map_err(|_| "Could not navigate to Google sign-in".to_string())
}

/// Pull the sign-in outcome out of the redirect fragment, if we just came
/// back from the consent screen: the token on success, the provider's
/// error code (e.g. `access_denied` when the user refuses) on failure.
/// Clears the fragment so neither sits in the address bar or browser
/// history. The token stays opaque.
pub fn token_from_redirect() -> Option<Result<String, String>> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    let fragment = hash.strip_prefix('#')?;

    let outcome = parse_redirect_fragment(fragment)?;
    let _ = window.location().set_hash("");
    Some(outcome)
}

/// `None` when the fragment has nothing to do with sign-in (no token, no
/// error key), so ordinary fragments pass through untouched.
fn parse_redirect_fragment(fragment: &str) -> Option<Result<String, String>> {
    let mut token = None;
    let mut error = None;
    for pair in fragment.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            match key {
                "access_token" => token = Some(value.to_string()),
                "error" => error = Some(value.to_string()),
                _ => {}
            }
        }
    }

    match (token, error) {
        (Some(token), _) => Some(Ok(token)),
        (None, Some(code)) => Some(Err(format!("Google sign-in failed: {code}"))),
        (None, None) => None,
    }
}

/// Who just signed in. Google rejected or the user denied the request if
/// this fails; the caller surfaces that as a retryable banner.
pub async fn fetch_user_profile(token: &str) -> Result<UserProfile, String> {
    let json = get_json(USERINFO_URL, token, "load user profile").await?;
    serde_wasm_bindgen::from_value(json)
        .map_err(|_| "load user profile: unexpected response shape".to_string())
}

// ============ DRIVE / SHEETS ============

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<SpreadsheetFile>,
}

/// All spreadsheets the user can see. An empty list is a valid answer
/// (rendered as an empty state), not an error.
pub async fn list_spreadsheets(token: &str) -> Result<Vec<SpreadsheetFile>, String> {
    let query = js_sys::encode_uri_component(
        "mimeType=\"application/vnd.google-apps.spreadsheet\"",
    );
    let url = format!("{DRIVE_FILES_URL}?q={query}&fields=files(id,name)");
    let json = get_json(&url, token, "list spreadsheets").await?;
    let list: DriveFileList = serde_wasm_bindgen::from_value(json)
        .map_err(|_| "list spreadsheets: unexpected response shape".to_string())?;
    Ok(list.files)
}

/// Raw cell values for one bounded range, kept as untyped JSON because the
/// grid is forwarded verbatim to the parsing backend.
pub async fn fetch_sheet_values(
    token: &str,
    sheet_id: &str,
    range: &str,
) -> Result<serde_json::Value, String> {
    let url = format!("{SHEETS_URL}/{sheet_id}/values/{range}");
    let json = get_json(&url, token, "fetch sheet data").await?;
    serde_wasm_bindgen::from_value(json)
        .map_err(|_| "fetch sheet data: unexpected response shape".to_string())
}

// ============ FETCH PLUMBING ============

/// Authorized GET returning the parsed JSON body. Failures carry the name
/// of the operation so the UI can say which call broke.
async fn get_json(url: &str, token: &str, what: &str) -> Result<JsValue, String> {
    get_json_inner(url, token)
        .await
        .map_err(|e| describe_failure(what, e))
}

async fn get_json_inner(url: &str, token: &str) -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let headers = Headers::new()?;
    headers.set("Authorization", &format!("Bearer {token}"))?;
    headers.set("Content-Type", "application/json")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_fragment_with_token_signs_in() {
        let outcome = parse_redirect_fragment("access_token=ya29.abc&token_type=Bearer");
        assert_eq!(outcome, Some(Ok("ya29.abc".to_string())));
    }

    #[test]
    fn denied_consent_surfaces_the_error_code() {
        let outcome = parse_redirect_fragment("error=access_denied");
        let message = outcome.expect("denial must produce an outcome").unwrap_err();
        assert!(message.contains("access_denied"), "{message}");
    }

    #[test]
    fn token_wins_over_a_stray_error_key() {
        let outcome = parse_redirect_fragment("error=ignored&access_token=tok");
        assert_eq!(outcome, Some(Ok("tok".to_string())));
    }

    #[test]
    fn unrelated_fragments_are_left_alone() {
        assert_eq!(parse_redirect_fragment(""), None);
        assert_eq!(parse_redirect_fragment("section=plates"), None);
    }
}
