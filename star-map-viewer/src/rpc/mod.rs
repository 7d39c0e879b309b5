//! JSON-RPC 2.0 bridge between the viewer iframe and its host page.
//!
//! Messages travel over `postMessage`. Requests carry an id and get a
//! response; messages without an id are notifications and only act.
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> ├─ handle_rpc_request()
//!        │                                     ├─ RpcCommand ─> ECS event
//!        │ <──────────────── Response (ID) ────┤
//!        │ <────────── Notification (no ID) ───┤
//! ```
//!
//! Validation happens in the pure `handle_rpc_request()`, which sees the app
//! state through an `RpcContext` and returns the command to dispatch. Systems
//! push updates to the host with `WebRpcInterface::send_notification()`;
//! everything queued in a frame is flushed in `Last`.
//!
//! ## Error Handling
//!
//! - `-32600`: Invalid request (wrong `jsonrpc` version)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params, including unknown selection ids
//! - `-32603`: Internal error, e.g. colour modes before metrics load
//!
//! ## Methods
//!
//! - `select_item {id}`: Select a system or selectable
//! - `get_selection`: Current selection id and kind, or null
//! - `set_colour_mode {mode}`: `security`, `traffic` (alias `jumps`), `ship_kills`, `npc_kills`
//! - `load_map {map}`: `nec`, `pochven` or `anoikis`
//! - `reset_camera`: Look down on the selection from the current distance
//! - `set_jumps_visible {visible}`: Show or hide stargate lines
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! - `navigate_detail_frame {url}`: Point the host page's detail frame at a page
//! - `selection_changed {id, kind}`
//! - `colour_modes_enabled`: Metric datasets finished loading
//! - `map_loaded {map, systems}`
//! - `fps_update {fps}`

/// Detail frame URL tracking for the host page.
pub mod detail_frame;

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
