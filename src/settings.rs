//! Runtime knobs shared by the page generator and the browser runtime.
//!
//! The generator serializes [`WidgetSettings`] into the page as
//! `<script type="application/json" id="widget-settings">`; the runtime reads
//! it back on mount. A page without that element, or with JSON the runtime
//! cannot read, runs on [`WidgetSettings::default`].

use serde::{Deserialize, Serialize};

use crate::rules::FieldId;

/// Id of the element carrying the serialized settings.
pub const SETTINGS_ELEMENT_ID: &str = "widget-settings";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub slider: SliderSettings,
    pub form: FormSettings,
}

impl WidgetSettings {
    /// Serialize for embedding inside a `<script>` element.
    ///
    /// `</` is escaped so copy containing `</script>` cannot close the
    /// element early.
    pub fn to_embedded_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }

    /// Parse embedded settings, falling back to defaults.
    pub fn from_embedded_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring malformed widget settings: {e}");
                Self::default()
            }
        }
    }
}

/// Comparison slider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderSettings {
    /// Arrow-key step, in percent.
    pub step: u8,
    /// Arrow-key step with Shift held, in percent.
    pub fine_step: u8,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            step: 5,
            fine_step: 1,
        }
    }
}

/// Contact form behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Simulated submit latency before the form resets.
    pub submit_delay_ms: u32,
    /// Submit button label while a submit is pending.
    pub busy_label: String,
    /// Text of the dialog shown once the submit completes.
    pub acknowledgment: String,
    pub messages: FieldMessages,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1000,
            busy_label: "送信中...".to_string(),
            acknowledgment:
                "お問い合わせありがとうございます。担当者より折り返しご連絡いたします。"
                    .to_string(),
            messages: FieldMessages::default(),
        }
    }
}

/// Inline error message per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldMessages {
    pub name: String,
    pub tel: String,
    pub email: String,
    pub contact_method: String,
    pub privacy: String,
    /// Used for any field whose own message is empty.
    pub fallback: String,
}

impl Default for FieldMessages {
    fn default() -> Self {
        Self {
            name: "お名前を2文字以上で入力してください".to_string(),
            tel: "正しい電話番号を入力してください（10桁以上）".to_string(),
            email: "正しいメールアドレスを入力してください".to_string(),
            contact_method: "ご希望の連絡方法を選択してください".to_string(),
            privacy: "プライバシーポリシーへの同意が必要です".to_string(),
            fallback: "入力内容をご確認ください".to_string(),
        }
    }
}

impl FieldMessages {
    pub fn for_field(&self, field: FieldId) -> &str {
        let message = match field {
            FieldId::Name => &self.name,
            FieldId::Tel => &self.tel,
            FieldId::Email => &self.email,
            FieldId::ContactMethod => &self.contact_method,
            FieldId::Privacy => &self.privacy,
        };
        if message.is_empty() {
            &self.fallback
        } else {
            message
        }
    }
}
