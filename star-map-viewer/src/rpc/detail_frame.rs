use crate::constants::path::detail_page_url;
use crate::engine::assets::system_id::SystemId;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Last page the hosting page's detail frame was pointed at.
#[derive(Resource, Debug, Default, Clone)]
pub struct DetailFrame {
    current_url: Option<String>,
}

impl DetailFrame {
    /// Record `url` as the frame's page. Returns false when it already is.
    pub fn navigate(&mut self, url: &str) -> bool {
        if self.current_url.as_deref() == Some(url) {
            return false;
        }
        self.current_url = Some(url.to_string());
        true
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Point the detail frame at the page for `id`, notifying the host only
    /// when the page changes.
    pub fn show_item(&mut self, id: &SystemId, rpc_interface: &mut WebRpcInterface) {
        let url = detail_page_url(id.as_str());
        if self.navigate(&url) {
            rpc_interface.send_notification(
                "navigate_detail_frame",
                serde_json::json!({ "url": url }),
            );
        }
    }
}
