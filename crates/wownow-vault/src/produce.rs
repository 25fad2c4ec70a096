//! Order draft for a physical product, persisted through [`EncryptedStorage`].
//!
//! Every mutation writes the full snapshot back under [`PRODUCE_STORE_KEY`],
//! so a restarted client resumes the order where the user left it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::persist::EncryptedStorage;
use crate::types::{NfcContent, NfcContentPatch, ProcessOption};

/// Storage key of the order draft.
pub const PRODUCE_STORE_KEY: &str = "produceStore";

/// Snapshot of the order draft as stored.
///
/// Each field is read independently: a missing, `null` or mistyped field
/// falls back to its default without discarding the rest of the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProduceState {
    #[serde(deserialize_with = "lenient")]
    pub device_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub asset_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub style_id: Option<i64>,
    /// Template as returned by the template API; not interpreted here.
    #[serde(deserialize_with = "lenient")]
    pub template_info: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub product_image_url: String,
    #[serde(deserialize_with = "lenient")]
    pub price: f64,
    #[serde(deserialize_with = "lenient")]
    pub discounted_price: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub selected_process_option: Option<ProcessOption>,
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(deserialize_with = "lenient")]
    pub nfc_content: Option<NfcContent>,
}

/// Any value that does not fit `T` (including `null`) becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Accepts any JSON number (`2`, `2.0`), rounded and clamped to at least 1.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let quantity = value
        .as_f64()
        .filter(|q| q.is_finite())
        .map(|q| q.round().clamp(1.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(1);
    Ok(quantity)
}

impl Default for ProduceState {
    fn default() -> Self {
        Self {
            device_id: None,
            asset_id: None,
            style_id: None,
            template_info: None,
            product_image_url: String::new(),
            price: 0.0,
            discounted_price: None,
            selected_process_option: None,
            quantity: 1,
            nfc_content: None,
        }
    }
}

impl ProduceState {
    /// Unit price times quantity, rounded to cents.
    ///
    /// A zero discounted price counts as "no discount".
    pub fn total_price(&self) -> f64 {
        let unit = self
            .discounted_price
            .filter(|p| *p != 0.0)
            .unwrap_or(self.price);
        (unit * f64::from(self.quantity) * 100.0).round() / 100.0
    }

    pub fn has_nfc(&self) -> bool {
        self.nfc_content.is_some()
    }

    pub fn is_device_selected(&self) -> bool {
        self.device_id.is_some()
    }

    pub fn is_asset_selected(&self) -> bool {
        self.asset_id.is_some()
    }
}

/// The order draft plus the storage it persists to.
pub struct ProduceStore {
    storage: EncryptedStorage,
    state: ProduceState,
}

impl ProduceStore {
    /// Restore the saved draft, or start from defaults.
    pub async fn restore(storage: EncryptedStorage) -> Self {
        let state = storage
            .load_encrypted::<ProduceState>(PRODUCE_STORE_KEY)
            .await
            .unwrap_or_default();
        Self { storage, state }
    }

    pub fn state(&self) -> &ProduceState {
        &self.state
    }

    async fn persist(&self) {
        self.storage
            .save_encrypted(PRODUCE_STORE_KEY, &self.state)
            .await;
    }

    pub async fn set_device_id(&mut self, id: Option<i64>) {
        self.state.device_id = id;
        self.persist().await;
    }

    pub async fn set_asset_id(&mut self, id: Option<i64>) {
        self.state.asset_id = id;
        self.persist().await;
    }

    pub async fn set_style_id(&mut self, id: Option<i64>) {
        self.state.style_id = id;
        self.persist().await;
    }

    pub async fn set_template_info(&mut self, template: Option<Value>) {
        self.state.template_info = template;
        self.persist().await;
    }

    pub async fn set_product_image_url(&mut self, url: impl Into<String>) {
        self.state.product_image_url = url.into();
        self.persist().await;
    }

    pub async fn set_price(&mut self, price: f64) {
        self.state.price = price;
        self.persist().await;
    }

    pub async fn set_discounted_price(&mut self, price: Option<f64>) {
        self.state.discounted_price = price;
        self.persist().await;
    }

    pub async fn set_selected_process_option(&mut self, option: Option<ProcessOption>) {
        self.state.selected_process_option = option;
        self.persist().await;
    }

    /// Set the quantity; anything below one becomes one.
    pub async fn set_quantity(&mut self, quantity: u32) {
        self.state.quantity = quantity.max(1);
        self.persist().await;
    }

    /// Merge `patch` into the current NFC content, creating it if needed.
    pub async fn set_nfc_content(&mut self, patch: NfcContentPatch) {
        match &mut self.state.nfc_content {
            Some(content) => content.merge(patch),
            None => self.state.nfc_content = Some(patch.into()),
        }
        self.persist().await;
    }

    pub async fn clear_nfc(&mut self) {
        self.state.nfc_content = None;
        self.persist().await;
    }

    pub async fn clear_asset_id(&mut self) {
        self.state.asset_id = None;
        self.persist().await;
    }

    /// Start a new order for the same product: drop NFC, quantity back to one.
    pub async fn reset_order(&mut self) {
        self.state.nfc_content = None;
        self.state.quantity = 1;
        self.persist().await;
    }

    /// Forget the draft entirely, including the stored record.
    pub async fn reset_all(&mut self) {
        self.state = ProduceState::default();
        self.storage.remove(PRODUCE_STORE_KEY).await;
    }

    pub fn total_price(&self) -> f64 {
        self.state.total_price()
    }

    pub fn has_nfc(&self) -> bool {
        self.state.has_nfc()
    }

    pub fn is_device_selected(&self) -> bool {
        self.state.is_device_selected()
    }

    pub fn is_asset_selected(&self) -> bool {
        self.state.is_asset_selected()
    }
}
