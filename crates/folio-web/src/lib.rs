#![forbid(unsafe_code)]

//! WASM frontend for the Folio portfolio site.
//!
//! Each page mounts the apps it needs once, from a module script:
//!
//! ```js
//! import init, { GalleryApp, ContactApp, EffectsApp, NavApp } from "./folio_web.js";
//! await init();
//! window.folio = {
//!     gallery: GalleryApp.mount(null),
//!     contact: ContactApp.mount(),
//!     effects: EffectsApp.mount(),
//!     nav: NavApp.mount(),
//! };
//! ```
//!
//! Every app owns its event listeners. Dropping a handle (an explicit
//! `free()`, or garbage collection once JS holds no reference) removes them,
//! which is why the handles are stored on `window` above.
//!
//! All state lives in `folio-core`; this crate only reads the pre-rendered
//! markup, registers event listeners and applies core projections to the
//! page. Everything here is compiled on `wasm32` only.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod contact;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod effects;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use contact::ContactApp;
#[cfg(target_arch = "wasm32")]
pub use effects::EffectsApp;
#[cfg(target_arch = "wasm32")]
pub use wasm::{GalleryApp, NavApp};
