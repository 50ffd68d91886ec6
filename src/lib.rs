mod app;
mod backend;
mod classify;
mod google;
mod plan;
mod plates;
mod session;
mod types;

use wasm_bindgen::prelude::*;
use leptos::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(app::App);
}
