use serde::Deserialize;
use serde_json::Value;

/// One asset from the Immich search endpoint. Which name field is
/// populated varies by Immich version and upload path, so all three are
/// optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmichAsset {
    #[serde(default)]
    pub original_file_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub original_path: Option<String>,
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl ImmichAsset {
    /// The name this asset is matched under.
    ///
    /// Preference order: the explicit original filename, then the generic
    /// filename, then the last segment of the stored path. Empty fields
    /// fall through; `None` when nothing is derivable.
    pub fn display_name(&self) -> Option<&str> {
        self.original_file_name
            .as_deref()
            .and_then(non_empty)
            .or_else(|| self.file_name.as_deref().and_then(non_empty))
            .or_else(|| {
                self.original_path
                    .as_deref()
                    .and_then(|p| p.rsplit('/').next())
                    .and_then(non_empty)
            })
    }
}

/// Response envelope of `POST /api/search/metadata`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub assets: AssetPage,
}

/// One page of search results.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    #[serde(default)]
    pub items: Vec<ImmichAsset>,
    /// A number or a numeric string; null, empty, and absent all mean
    /// "last page".
    #[serde(default)]
    pub next_page: Option<Value>,
}

impl AssetPage {
    pub fn has_next(&self) -> bool {
        match &self.next_page {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// The next page number, when the token parses as an integer.
    pub fn next_page_number(&self) -> Option<u64> {
        match &self.next_page {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
