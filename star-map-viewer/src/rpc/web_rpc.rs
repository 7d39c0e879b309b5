use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::selectables::Selectables;
use crate::engine::assets::star_map::StarMap;
use crate::engine::assets::system_id::SystemId;
use crate::engine::colour::strategy::ColourMode;
use crate::engine::loading::map_loader::LoadMapEvent;
use crate::engine::loading::map_variant::MapVariant;
use crate::engine::systems::colour_mode::{
    ColourModeEvent, ColourModeSource, check_colour_mode_available,
};
use crate::tools::selection::{SelectItemEvent, SelectionSource, SelectionState};
use crate::tools::view_controls::{ResetCameraEvent, SetJumpsVisibleEvent};
use crate::engine::systems::fps_tracking::smoothed_fps;
use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an id are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and Bevy. Handles both request-response patterns and notification
/// broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last flush.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(crate::engine::core::frame_scheduler::MapFrameSet::Input),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Ownership moves to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Work a validated request asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCommand {
    SelectItem(SystemId),
    SetColourMode(ColourMode),
    LoadMap(MapVariant),
    ResetCamera,
    SetJumpsVisible(bool),
}

/// Read-only view of the app state requests are validated against.
pub struct RpcContext<'a> {
    pub map: &'a StarMap,
    pub selectables: &'a Selectables,
    pub metrics: &'a SystemMetrics,
    pub selection: &'a SelectionState,
    pub fps: Option<f64>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    (map, selectables, metrics, selection): (
        Res<StarMap>,
        Res<Selectables>,
        Res<SystemMetrics>,
        Res<SelectionState>,
    ),
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut select_events: EventWriter<SelectItemEvent>,
    mut colour_mode_events: EventWriter<ColourModeEvent>,
    mut load_map_events: EventWriter<LoadMapEvent>,
    mut reset_camera_events: EventWriter<ResetCameraEvent>,
    mut jumps_events: EventWriter<SetJumpsVisibleEvent>,
) {
    let context = RpcContext {
        map: &map,
        selectables: &selectables,
        metrics: &metrics,
        selection: &selection,
        fps: smoothed_fps(&diagnostics),
    };

    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
                continue;
            }
        };

        debug!("Processing RPC method: {}", request.method);
        let (command, response) = handle_rpc_request(&request, &context);

        match command {
            Some(RpcCommand::SelectItem(id)) => {
                select_events.write(SelectItemEvent {
                    id,
                    source: SelectionSource::Rpc,
                });
            }
            Some(RpcCommand::SetColourMode(mode)) => {
                colour_mode_events.write(ColourModeEvent {
                    mode,
                    source: ColourModeSource::Rpc,
                });
            }
            Some(RpcCommand::LoadMap(variant)) => {
                load_map_events.write(LoadMapEvent { variant });
            }
            Some(RpcCommand::ResetCamera) => {
                reset_camera_events.write(ResetCameraEvent);
            }
            Some(RpcCommand::SetJumpsVisible(visible)) => {
                jumps_events.write(SetJumpsVisibleEvent { visible });
            }
            None => {}
        }

        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

type MethodResult = Result<(Option<RpcCommand>, serde_json::Value), RpcError>;

/// Validate a request and decide what it does. The command is returned for
/// notifications too; the response only when the request carries an id.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
) -> (Option<RpcCommand>, Option<RpcResponse>) {
    let result = if request.jsonrpc != "2.0" {
        Err(RpcError::invalid_request("Expected jsonrpc 2.0"))
    } else {
        match request.method.as_str() {
            "select_item" => handle_select_item(&request.params, context),
            "set_colour_mode" => handle_set_colour_mode(&request.params, context),
            "load_map" => handle_load_map(&request.params),
            "reset_camera" => Ok((
                Some(RpcCommand::ResetCamera),
                serde_json::json!({ "success": true }),
            )),
            "set_jumps_visible" => handle_set_jumps_visible(&request.params),
            "get_selection" => Ok((None, selection_payload(context.selection))),
            "get_fps" => Ok((
                None,
                serde_json::json!({ "fps": context.fps.unwrap_or(0.0) as f32 }),
            )),
            _ => {
                warn!("Unknown RPC method: {}", request.method);
                Err(RpcError {
                    code: -32601,
                    message: "Method not found".to_string(),
                    data: Some(serde_json::json!({"method": request.method})),
                })
            }
        }
    };

    let (command, result) = match result {
        Ok((command, value)) => (command, Ok(value)),
        Err(error) => {
            if request.id.is_none() {
                warn!("Dropped RPC notification {}: {}", request.method, error.message);
            }
            (None, Err(error))
        }
    };

    let response = request.id.clone().map(|id| match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    });

    (command, response)
}

/// Ids are checked up front so callers hear about unknown items directly.
fn handle_select_item(params: &serde_json::Value, context: &RpcContext) -> MethodResult {
    #[derive(Deserialize)]
    struct SelectItemParams {
        id: SystemId,
    }

    let parsed = serde_json::from_value::<SelectItemParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;

    if !context.map.contains(&parsed.id) && !context.selectables.contains(&parsed.id) {
        return Err(RpcError::invalid_params(&format!(
            "Unknown item: {}",
            parsed.id
        )));
    }

    let result = serde_json::json!({
        "success": true,
        "id": parsed.id,
    });
    Ok((Some(RpcCommand::SelectItem(parsed.id)), result))
}

fn handle_set_colour_mode(params: &serde_json::Value, context: &RpcContext) -> MethodResult {
    #[derive(Deserialize)]
    struct ColourModeParams {
        mode: String,
    }

    let parsed = serde_json::from_value::<ColourModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;

    let mode = ColourMode::from_string(&parsed.mode)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown colour mode: {}", parsed.mode)))?;

    check_colour_mode_available(context.metrics)
        .map_err(|error| RpcError::internal_error(&error.to_string()))?;

    Ok((
        Some(RpcCommand::SetColourMode(mode)),
        serde_json::json!({
            "success": true,
            "mode": mode.as_str(),
        }),
    ))
}

fn handle_load_map(params: &serde_json::Value) -> MethodResult {
    #[derive(Deserialize)]
    struct LoadMapParams {
        map: String,
    }

    let parsed = serde_json::from_value::<LoadMapParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'map' parameter"))?;

    let variant = MapVariant::from_string(&parsed.map)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown map: {}", parsed.map)))?;

    Ok((
        Some(RpcCommand::LoadMap(variant)),
        serde_json::json!({
            "success": true,
            "map": variant.as_str(),
        }),
    ))
}

fn handle_set_jumps_visible(params: &serde_json::Value) -> MethodResult {
    #[derive(Deserialize)]
    struct JumpsParams {
        visible: bool,
    }

    let parsed = serde_json::from_value::<JumpsParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'visible' parameter"))?;

    Ok((
        Some(RpcCommand::SetJumpsVisible(parsed.visible)),
        serde_json::json!({
            "success": true,
            "visible": parsed.visible,
        }),
    ))
}

fn selection_payload(selection: &SelectionState) -> serde_json::Value {
    let current = selection.current();
    serde_json::json!({
        "id": current.id(),
        "kind": current.kind(),
    })
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::metrics::TrafficFile;
    use crate::engine::assets::selectables::SelectableCatalogFile;
    use crate::engine::assets::system_catalog::SystemCatalogFile;

    struct Fixture {
        map: StarMap,
        selectables: Selectables,
        metrics: SystemMetrics,
        selection: SelectionState,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog: SystemCatalogFile = serde_json::from_str(
                r#"{"30000142": {"x": 0, "y": 0, "z": 0, "solarSystemName": "Jita", "security": 0.9}}"#,
            )
            .unwrap();
            let selectables: SelectableCatalogFile = serde_json::from_str(
                r#"{"10000002": {"x": 0, "y": 0, "z": 0, "distance": 1e17, "name": "The Forge"}}"#,
            )
            .unwrap();
            Self {
                map: StarMap::from_catalog(&catalog),
                selectables: Selectables::from_file(&selectables),
                metrics: SystemMetrics::default(),
                selection: SelectionState::default(),
            }
        }

        fn context(&self) -> RpcContext<'_> {
            RpcContext {
                map: &self.map,
                selectables: &self.selectables,
                metrics: &self.metrics,
                selection: &self.selection,
                fps: Some(59.5),
            }
        }
    }

    fn request(method: &str, params: serde_json::Value, id: Option<i64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(serde_json::Value::from),
        }
    }

    fn error_code(response: Option<RpcResponse>) -> Option<i32> {
        response.and_then(|r| r.error).map(|e| e.code)
    }

    #[test]
    fn select_item_accepts_numeric_and_string_ids() {
        let fixture = Fixture::new();
        let (command, response) = handle_rpc_request(
            &request("select_item", serde_json::json!({"id": 30000142}), Some(1)),
            &fixture.context(),
        );
        assert_eq!(command, Some(RpcCommand::SelectItem(SystemId::from("30000142"))));
        let response = response.unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.id, Some(serde_json::json!(1)));

        let (command, _) = handle_rpc_request(
            &request("select_item", serde_json::json!({"id": "10000002"}), None),
            &fixture.context(),
        );
        assert_eq!(command, Some(RpcCommand::SelectItem(SystemId::from("10000002"))));
    }

    #[test]
    fn unknown_items_are_invalid_params() {
        let fixture = Fixture::new();
        let (command, response) = handle_rpc_request(
            &request("select_item", serde_json::json!({"id": 42}), Some(2)),
            &fixture.context(),
        );
        assert!(command.is_none());
        assert_eq!(error_code(response), Some(-32602));
    }

    #[test]
    fn notifications_get_no_response() {
        let fixture = Fixture::new();
        let (command, response) = handle_rpc_request(
            &request("set_jumps_visible", serde_json::json!({"visible": false}), None),
            &fixture.context(),
        );
        assert_eq!(command, Some(RpcCommand::SetJumpsVisible(false)));
        assert!(response.is_none());
    }

    #[test]
    fn colour_modes_wait_for_metrics() {
        let mut fixture = Fixture::new();
        let (command, response) = handle_rpc_request(
            &request("set_colour_mode", serde_json::json!({"mode": "traffic"}), Some(3)),
            &fixture.context(),
        );
        assert!(command.is_none());
        assert_eq!(error_code(response), Some(-32603));

        let traffic: TrafficFile =
            serde_json::from_str(r#"[{"system_id": 30000142, "ship_jumps": 3}]"#).unwrap();
        fixture.metrics = SystemMetrics::from_files(Some(&traffic), None);
        let (command, _) = handle_rpc_request(
            &request("set_colour_mode", serde_json::json!({"mode": "jumps"}), Some(4)),
            &fixture.context(),
        );
        assert_eq!(command, Some(RpcCommand::SetColourMode(ColourMode::Traffic)));

        let (_, response) = handle_rpc_request(
            &request("set_colour_mode", serde_json::json!({"mode": "plaid"}), Some(5)),
            &fixture.context(),
        );
        assert_eq!(error_code(response), Some(-32602));
    }

    #[test]
    fn load_map_parses_variants() {
        let fixture = Fixture::new();
        let (command, _) = handle_rpc_request(
            &request("load_map", serde_json::json!({"map": "anoikis"}), Some(6)),
            &fixture.context(),
        );
        assert_eq!(command, Some(RpcCommand::LoadMap(MapVariant::Anoikis)));

        let (_, response) = handle_rpc_request(
            &request("load_map", serde_json::json!({}), Some(7)),
            &fixture.context(),
        );
        assert_eq!(error_code(response), Some(-32602));
    }

    #[test]
    fn queries_report_state() {
        let fixture = Fixture::new();
        let (command, response) =
            handle_rpc_request(&request("get_selection", serde_json::Value::Null, Some(8)), &fixture.context());
        assert!(command.is_none());
        let result = response.unwrap().result.unwrap();
        assert!(result["id"].is_null());

        let (_, response) =
            handle_rpc_request(&request("get_fps", serde_json::Value::Null, Some(9)), &fixture.context());
        assert_eq!(response.unwrap().result.unwrap()["fps"], serde_json::json!(59.5));
    }

    #[test]
    fn bad_envelopes_are_rejected() {
        let fixture = Fixture::new();
        let (_, response) =
            handle_rpc_request(&request("warp_drive", serde_json::Value::Null, Some(10)), &fixture.context());
        assert_eq!(error_code(response), Some(-32601));

        let mut wrong_version = request("reset_camera", serde_json::Value::Null, Some(11));
        wrong_version.jsonrpc = "1.0".to_string();
        let (command, response) = handle_rpc_request(&wrong_version, &fixture.context());
        assert!(command.is_none());
        assert_eq!(error_code(response), Some(-32600));
    }

    #[test]
    fn missing_params_default_to_null() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "method": "reset_camera"}"#).unwrap();
        assert!(request.params.is_null());
        assert!(request.id.is_none());
    }
}
