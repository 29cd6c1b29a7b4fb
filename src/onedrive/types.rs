use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry from the Graph children listing.
///
/// Only the fields the pipeline needs are typed; everything else the API
/// returns is kept in `extra` so the snapshot cache can persist records
/// verbatim. The `file` and `folder` facet objects distinguish real files
/// from containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DriveItem {
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

/// One page of the children listing: a batch of items plus the absolute
/// URL of the next page, absent on the last page.
#[derive(Debug, Deserialize)]
pub struct ChildrenPage {
    #[serde(default)]
    pub value: Vec<DriveItem>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}
