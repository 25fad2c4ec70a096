//! Typed accessors for the client's plain (unencrypted) local storage keys.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::{ChatOutput, RichInput, StoredUserInfo};

/// Storage keys used by the client.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_INFO: &str = "userInfo";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const COUPON_SELECTOR: &str = "showCouponSelector";
    pub const CHAT_RECORDS: &str = "chatRecords";
    pub const CHAT_TEMPLATE: &str = "chatTemplate";
    pub const CHAT_OUTPUT_LIST: &str = "chatOutputList";
    pub const CHAT_RICH_INPUT: &str = "chatRichInput";
    pub const CHAT_UPLOAD_IMAGES: &str = "chatUploadImages";
    pub const ACTIVE_TAB: &str = "homeActiveTab";
}

/// Auth, session and chat-draft state stored as plain JSON text.
///
/// Getters never fail: unreadable entries are logged and read as `None`.
/// Setters surface store errors, since a rejected write is something the
/// caller may want to report.
#[derive(Clone)]
pub struct AppStorage {
    store: Arc<dyn KeyValueStore>,
}

impl AppStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "failed to read local storage");
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to parse local storage entry");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }

    /// Write `value` as JSON, or remove the key when `value` is `None`.
    fn write_or_remove<T: Serialize + ?Sized>(&self, key: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(v) => self.write_json(key, v),
            None => Ok(self.store.remove(key)?),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.write_or_remove(key, (!items.is_empty()).then_some(items))
    }

    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        match token.filter(|t| !t.is_empty()) {
            Some(t) => self.store.set(keys::TOKEN, t)?,
            None => self.store.remove(keys::TOKEN)?,
        }
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.raw(keys::TOKEN)
    }

    pub fn set_user_info(&self, info: Option<&StoredUserInfo>) -> Result<()> {
        self.write_or_remove(keys::USER_INFO, info)
    }

    pub fn user_info(&self) -> Option<StoredUserInfo> {
        self.read_json(keys::USER_INFO)
    }

    pub fn set_logged_in(&self, logged_in: bool) -> Result<()> {
        if logged_in {
            self.store.set(keys::IS_LOGGED_IN, "true")?;
        } else {
            self.store.remove(keys::IS_LOGGED_IN)?;
        }
        Ok(())
    }

    pub fn logged_in(&self) -> bool {
        self.raw(keys::IS_LOGGED_IN).as_deref() == Some("true")
    }

    /// Drop the token, profile and login flag.
    pub fn clear_auth(&self) -> Result<()> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::USER_INFO)?;
        self.store.remove(keys::IS_LOGGED_IN)?;
        Ok(())
    }

    pub fn set_coupon_selector(&self, show: bool) -> Result<()> {
        self.store
            .set(keys::COUPON_SELECTOR, if show { "true" } else { "false" })?;
        Ok(())
    }

    pub fn coupon_selector(&self) -> bool {
        self.raw(keys::COUPON_SELECTOR).as_deref() == Some("true")
    }

    /// Chat records are opaque to storage; the UI layer owns their shape.
    pub fn set_chat_records(&self, records: &[Value]) -> Result<()> {
        self.write_list(keys::CHAT_RECORDS, records)
    }

    pub fn chat_records(&self) -> Option<Vec<Value>> {
        self.read_json(keys::CHAT_RECORDS)
    }

    pub fn set_chat_template(&self, template: Option<&Value>) -> Result<()> {
        self.write_or_remove(keys::CHAT_TEMPLATE, template)
    }

    pub fn chat_template(&self) -> Option<Value> {
        self.read_json(keys::CHAT_TEMPLATE)
    }

    pub fn set_chat_output_list(&self, outputs: &[ChatOutput]) -> Result<()> {
        self.write_list(keys::CHAT_OUTPUT_LIST, outputs)
    }

    pub fn chat_output_list(&self) -> Option<Vec<ChatOutput>> {
        self.read_json(keys::CHAT_OUTPUT_LIST)
    }

    pub fn set_chat_rich_input(&self, input: &RichInput) -> Result<()> {
        self.write_or_remove(keys::CHAT_RICH_INPUT, (!input.is_empty()).then_some(input))
    }

    pub fn chat_rich_input(&self) -> Option<RichInput> {
        self.read_json(keys::CHAT_RICH_INPUT)
    }

    pub fn set_chat_upload_images(&self, images: &[String]) -> Result<()> {
        self.write_list(keys::CHAT_UPLOAD_IMAGES, images)
    }

    pub fn chat_upload_images(&self) -> Option<Vec<String>> {
        self.read_json(keys::CHAT_UPLOAD_IMAGES)
    }

    pub fn set_active_tab(&self, tab_id: i64) -> Result<()> {
        self.store.set(keys::ACTIVE_TAB, &tab_id.to_string())?;
        Ok(())
    }

    pub fn active_tab(&self) -> Option<i64> {
        self.raw(keys::ACTIVE_TAB)?.trim().parse().ok()
    }

    /// Wipe the whole store, encrypted entries included.
    pub fn clear_all(&self) -> Result<()> {
        self.store.clear()?;
        Ok(())
    }
}
