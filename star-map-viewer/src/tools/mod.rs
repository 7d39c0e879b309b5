//! Interactive tools for exploring the star map.
//!
//! Pointer picking, the selection state machine, the hover label and the view
//! controls (jump lines, camera reset). Requests arrive as events from
//! keyboard shortcuts (native), pointer input or RPC (WASM).
//!
//! ## Selection Flow
//!
//! ```text
//! Click / RPC select_item / map load
//!   └─> SelectItemEvent
//!       └─> handle_select_item_events()
//!           ├─> Recolour (dim to cluster members or restore)
//!           ├─> Show or hide the selection label
//!           ├─> Start the camera transition
//!           └─> Point the detail frame at the item page
//! ```
//!
//! ## Cross-Platform Considerations
//!
//! Native builds get keyboard shortcuts for colour modes, jump lines, camera
//! reset and map variants. WASM builds are driven by the host page over
//! JSON-RPC 2.0.

/// Hover label for the system under the pointer.
pub mod hover;

/// Pointer to ray conversion and nearest-sphere picking.
pub mod picking;

/// Ray and sphere intersection.
pub mod ray;

/// Selection state machine and its side effects.
pub mod selection;

/// Jump line toggle, camera reset and native view shortcuts.
pub mod view_controls;
