//! Hand-off to the rendering component.
//!
//! The grid itself (pagination, sizing to the window, click handling) lives in
//! a front-end bundle this crate does not ship. What it does own is the
//! payload contract: a JSON object of parallel arrays plus display flags.
//!
//! ```json
//! {
//!   "representations": ["data:image/jpeg;base64,..."],
//!   "sizes": [[640, 480]],
//!   "names": ["cat.jpg"],
//!   "showNames": true,
//!   "columns": 2,
//!   "rows": 2,
//!   "key": null
//! }
//! ```

use crate::prepare::ViewerRequest;
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized form of a [`ViewerRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgePayload {
    pub representations: Vec<String>,
    pub sizes: Vec<[u32; 2]>,
    pub names: Vec<String>,
    pub show_names: bool,
    pub columns: u32,
    pub rows: u32,
    pub key: Option<String>,
}

/// Something that can display a viewer and report back what the user did.
///
/// The returned value is opaque to this crate (typically the index of the
/// selected image); `None` means no interaction happened.
pub trait ComponentBridge {
    fn render(&mut self, payload: &BridgePayload)
    -> Result<Option<serde_json::Value>, BridgeError>;
}

/// Prepare the payload for `request` and pass it to `bridge`.
pub fn show(
    bridge: &mut dyn ComponentBridge,
    request: &ViewerRequest,
) -> Result<Option<serde_json::Value>, BridgeError> {
    bridge.render(&request.payload())
}

/// Bridge that writes the payload as pretty JSON and never reports interaction.
///
/// Used by the CLI so another process can pick the payload up.
pub struct JsonBridge<W: Write> {
    writer: W,
}

impl<W: Write> JsonBridge<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ComponentBridge for JsonBridge<W> {
    fn render(
        &mut self,
        payload: &BridgePayload,
    ) -> Result<Option<serde_json::Value>, BridgeError> {
        serde_json::to_writer_pretty(&mut self.writer, payload)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::prepare::ImageEntry;
    use serde_json::json;

    fn sample() -> BridgePayload {
        BridgePayload {
            representations: vec!["data:image/jpeg;base64,AAAA".into(), "media/x.png".into()],
            sizes: vec![[640, 480], [10, 20]],
            names: vec!["cat.jpg".into(), "x.png".into()],
            show_names: true,
            columns: 2,
            rows: 1,
            key: None,
        }
    }

    #[test]
    fn payload_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "representations": ["data:image/jpeg;base64,AAAA", "media/x.png"],
                "sizes": [[640, 480], [10, 20]],
                "names": ["cat.jpg", "x.png"],
                "showNames": true,
                "columns": 2,
                "rows": 1,
                "key": null
            })
        );
    }

    #[test]
    fn payload_key_serialized_when_present() {
        let mut payload = sample();
        payload.key = Some("image_viewer".into());
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["key"], "image_viewer");
    }

    #[test]
    fn json_bridge_writes_parseable_payload() {
        let mut bridge = JsonBridge::new(Vec::new());
        let result = bridge.render(&sample()).unwrap();
        assert!(result.is_none());

        let written = String::from_utf8(bridge.into_inner()).unwrap();
        assert!(written.ends_with('\n'));
        let parsed: BridgePayload = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample());
    }

    struct PickFirst;

    impl ComponentBridge for PickFirst {
        fn render(
            &mut self,
            payload: &BridgePayload,
        ) -> Result<Option<serde_json::Value>, BridgeError> {
            Ok((!payload.names.is_empty()).then(|| json!(0)))
        }
    }

    fn request_with(entries: Vec<ImageEntry>) -> ViewerRequest {
        ViewerRequest {
            entries,
            layout: crate::layout::LayoutSpec::new(1, 1).unwrap(),
            show_names: true,
            key: None,
        }
    }

    #[test]
    fn show_returns_bridge_value() {
        let request = request_with(vec![ImageEntry {
            representation: "media/a.png".into(),
            size: Dimensions {
                width: 3,
                height: 2,
            },
            display_name: "a.png".into(),
        }]);
        assert_eq!(show(&mut PickFirst, &request).unwrap(), Some(json!(0)));
    }

    #[test]
    fn show_passes_through_no_interaction() {
        assert_eq!(show(&mut PickFirst, &request_with(vec![])).unwrap(), None);
    }
}
