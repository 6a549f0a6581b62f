//! Domain services: one `ApiClient` method per backend resource operation.
//!
//! Each method fixes a path and, for writes, a body shape, then delegates
//! to `get`/`post`. Nothing here catches errors or keeps state.
//!
//! Deletion is modelled by the backend as an action (`POST .../delete`), not
//! as the DELETE verb.

pub mod api_tool;
pub mod app;
pub mod builtin_tool;
