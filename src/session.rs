use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

const SESSION_KEY: &str = "liftsheet_session_v1";
const SHEET_KEY: &str = "liftsheet_sheet_id";

/// Everything tied to one signed-in user: the bearer token, the profile,
/// the chosen spreadsheet and the last raw grid fetched from it. Built at
/// sign-in, dropped at sign-out; no module-level mutable state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub spreadsheet_id: Option<String>,
    /// Raw Sheets response exactly as fetched, kept for re-parsing and
    /// export. In-memory only; not worth persisting.
    #[serde(skip)]
    pub last_grid: Option<serde_json::Value>,
}

impl Session {
    pub fn new(token: String, user: UserProfile) -> Self {
        Self {
            token,
            user,
            spreadsheet_id: load_sheet_id(),
            last_grid: None,
        }
    }
}

pub fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn save_session(session: &Session) {
    if let Some(storage) = get_local_storage() {
        if let Ok(json) = serde_json::to_string(session) {
            let _ = storage.set_item(SESSION_KEY, &json);
        }
    }
}

pub fn load_session() -> Option<Session> {
    let storage = get_local_storage()?;
    let json = storage.get_item(SESSION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
        let _ = storage.remove_item(SHEET_KEY);
    }
}

/// Remember the picked spreadsheet across reloads so the picker can
/// preselect it.
pub fn save_sheet_id(id: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(SHEET_KEY, id);
    }
}

pub fn load_sheet_id() -> Option<String> {
    get_local_storage()?.get_item(SHEET_KEY).ok()?
}
