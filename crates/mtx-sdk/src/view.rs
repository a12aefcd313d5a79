use serde::{Deserialize, Serialize};

use mtx_store::TableDocument;

/// Blank merge parameters, returned alongside the destination table so a
/// caller can fill in the form and submit it back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTemplate {
    pub how: String,
    pub left_on: String,
    pub right_on: String,
    pub dup_policy: String,
}

/// The merge-preparation view: current destination table (empty document
/// when the workflow has none) plus an empty parameter template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeView {
    pub matrix: TableDocument,
    pub template: MergeTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_fields_default_empty() {
        let t = MergeTemplate::default();
        assert!(t.how.is_empty());
        assert!(t.left_on.is_empty());
        assert!(t.right_on.is_empty());
        assert!(t.dup_policy.is_empty());
    }

    #[test]
    fn view_serializes_both_parts() {
        let view = MergeView {
            matrix: TableDocument::default(),
            template: MergeTemplate::default(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"matrix\""));
        assert!(json.contains("\"template\""));
    }
}
