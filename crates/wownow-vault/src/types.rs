//! Records the client keeps in local storage.
//!
//! Field names serialize in camelCase so entries stay readable by, and
//! compatible with, what earlier client versions wrote.

use serde::{Deserialize, Serialize};

/// Signed-in user profile cached next to the auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUserInfo {
    pub id: i64,
    pub nickname: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A generated image kept in the chat output strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOutput {
    pub id: String,
    pub content: String,
    pub image_url: String,
    pub style_id: Option<i64>,
}

/// Draft text of the chat composer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichInput {
    pub text: String,
    pub html: String,
}

impl RichInput {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.html.is_empty()
    }
}

/// Manufacturing speed tier offered for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOption {
    pub default: bool,
    pub duration: String,
    pub price: f64,
    pub process_type: ProcessType,
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessType {
    #[serde(rename = "Express Processing")]
    Express,
    #[serde(rename = "Premium Processing")]
    Premium,
}

/// What an NFC tag embedded in the product points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NfcContentType {
    #[default]
    Link,
    Custom,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcAttachment {
    pub name: String,
    pub url: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcAgent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub cover_url: String,
    pub url: String,
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url_error: Option<bool>,
}

/// NFC payload attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub content_type: NfcContentType,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<NfcAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<NfcAgent>,
}

/// Partial update merged into [`NfcContent`]; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct NfcContentPatch {
    pub id: Option<String>,
    pub content_type: Option<NfcContentType>,
    pub link: Option<String>,
    pub text: Option<String>,
    pub attachments: Option<Vec<NfcAttachment>>,
    pub asset_id: Option<i64>,
    pub agent: Option<NfcAgent>,
}

impl NfcContent {
    /// Overwrite every field the patch sets.
    pub fn merge(&mut self, patch: NfcContentPatch) {
        if let Some(id) = patch.id {
            self.id = Some(id);
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(attachments) = patch.attachments {
            self.attachments = attachments;
        }
        if let Some(asset_id) = patch.asset_id {
            self.asset_id = Some(asset_id);
        }
        if let Some(agent) = patch.agent {
            self.agent = Some(agent);
        }
    }
}

impl From<NfcContentPatch> for NfcContent {
    fn from(patch: NfcContentPatch) -> Self {
        let mut content = NfcContent::default();
        content.merge(patch);
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_optional_fields() {
        let info: StoredUserInfo =
            serde_json::from_value(json!({"id": 1, "nickname": "wow", "avatar": ""})).unwrap();
        assert_eq!(info.mobile, None);
        let back = serde_json::to_value(&info).unwrap();
        assert!(back.get("email").is_none());
    }

    #[test]
    fn test_chat_output_camel_case() {
        let output = ChatOutput {
            id: "o1".to_string(),
            content: "a cat coin".to_string(),
            image_url: "https://cdn/x.png".to_string(),
            style_id: None,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["imageUrl"], "https://cdn/x.png");
        assert!(value["styleId"].is_null());
    }

    #[test]
    fn test_process_type_names() {
        let option: ProcessOption = serde_json::from_value(json!({
            "default": true,
            "duration": "3-5 days",
            "price": 9.9,
            "processType": "Express Processing",
            "taskType": "coin",
        }))
        .unwrap();
        assert_eq!(option.process_type, ProcessType::Express);
        assert_eq!(option.discounted_price, None);
    }

    #[test]
    fn test_nfc_content_type_field() {
        let content = NfcContent {
            content_type: NfcContentType::Agent,
            ..Default::default()
        };
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], "agent");
    }

    #[test]
    fn test_nfc_merge_keeps_unset_fields() {
        let mut content = NfcContent {
            link: "https://iwownow.ai".to_string(),
            text: "hello".to_string(),
            ..Default::default()
        };
        content.merge(NfcContentPatch {
            text: Some("updated".to_string()),
            ..Default::default()
        });
        assert_eq!(content.link, "https://iwownow.ai");
        assert_eq!(content.text, "updated");
    }

    #[test]
    fn test_rich_input_empty() {
        assert!(RichInput::default().is_empty());
        assert!(!RichInput {
            text: String::new(),
            html: "<p></p>".to_string()
        }
        .is_empty());
    }
}
