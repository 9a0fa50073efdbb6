//! Landing page configuration.
//!
//! Handles loading, validating, and merging `config.toml`. The page copy,
//! the case image pairs, the FAQ, and the widget behavior all come from this
//! one file in the source directory:
//!
//! ```text
//! site/
//! ├── config.toml              # Everything below is optional
//! └── assets/                  # Copied verbatim to the output root
//!     └── cases/
//!         ├── bath-before.jpg
//!         └── bath-after.jpg
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "住まいのリフォーム"
//! lang = "ja"
//!
//! [slider]
//! step = 5                  # Arrow-key step (percent)
//! fine_step = 1             # Arrow-key step with Shift held
//!
//! [[cases]]
//! before = "assets/cases/bath-before.jpg"
//! after = "assets/cases/bath-after.jpg"
//! caption = "浴室リフォーム（築25年）"
//!
//! [[faq]]
//! id = "warranty"           # Deep link: /#warranty
//! question = "保証はありますか？"
//! answer = "工事完了後 **10年間** の保証が付きます。"
//!
//! [form]
//! submit_delay_ms = 1000
//!
//! [form.messages]
//! tel = "電話番号は10桁以上で入力してください"
//!
//! [colors]
//! accent = "#c8553d"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{
    FieldMessages, FormSettings, SETTINGS_ELEMENT_ID, SliderSettings, WidgetSettings,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Landing page configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    /// Page-level copy and metadata.
    pub site: SiteCopy,
    /// Comparison slider behavior.
    pub slider: SliderSettings,
    /// Before/after pairs. The first one is shown on load.
    pub cases: Vec<CaseEntry>,
    /// FAQ entries, in display order.
    pub faq: Vec<FaqEntry>,
    /// Contact form copy and behavior.
    pub form: FormConfig,
    /// Color palette.
    pub colors: ColorConfig,
}

impl LandingConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, step) in [
            ("slider.step", self.slider.step),
            ("slider.fine_step", self.slider.fine_step),
        ] {
            if step == 0 || step > 100 {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }

        for (i, case) in self.cases.iter().enumerate() {
            if case.before.trim().is_empty() || case.after.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "cases[{i}] needs both `before` and `after` images"
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for (i, entry) in self.faq.iter().enumerate() {
            if !is_valid_anchor(&entry.id) {
                return Err(ConfigError::Validation(format!(
                    "faq[{i}].id '{}' must be non-empty and use only letters, digits, '-' or '_'",
                    entry.id
                )));
            }
            if RESERVED_IDS.contains(&entry.id.as_str()) || entry.id.ends_with(ANSWER_SUFFIX) {
                return Err(ConfigError::Validation(format!(
                    "faq[{i}].id '{}' clashes with an element id the page already uses",
                    entry.id
                )));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "faq[{i}].id '{}' is used more than once",
                    entry.id
                )));
            }
        }

        if self.form.contact_methods.is_empty() {
            return Err(ConfigError::Validation(
                "form.contact_methods must not be empty".into(),
            ));
        }
        if self.form.submit_delay_ms > 60_000 {
            return Err(ConfigError::Validation(
                "form.submit_delay_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }

    /// The runtime knobs the browser runtime reads from the page.
    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            slider: self.slider.clone(),
            form: FormSettings {
                submit_delay_ms: self.form.submit_delay_ms,
                busy_label: self.form.busy_label.clone(),
                acknowledgment: self.form.acknowledgment.clone(),
                messages: self.form.messages.clone(),
            },
        }
    }
}

/// Element ids the generated page assigns outside the FAQ.
const RESERVED_IDS: &[&str] = &[
    "cases",
    "faq",
    "contact",
    "contact-form",
    "name",
    "tel",
    "email",
    SETTINGS_ELEMENT_ID,
];

/// Answer panels take `<id>-answer`, so no FAQ id may end with it.
const ANSWER_SUFFIX: &str = "-answer";

/// FAQ ids double as URL fragments and element ids.
fn is_valid_anchor(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Page-level copy and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteCopy {
    /// `<title>` and hero heading.
    pub title: String,
    /// Hero sub-heading.
    pub tagline: String,
    /// `<meta name="description">`.
    pub description: String,
    /// Company name shown in the footer.
    pub company: String,
    /// `<html lang>`.
    pub lang: String,
    /// Heading above the comparison widget.
    pub cases_heading: String,
    /// Heading above the FAQ.
    pub faq_heading: String,
}

impl Default for SiteCopy {
    fn default() -> Self {
        Self {
            title: "住まいのリフォーム".to_string(),
            tagline: "施工事例のビフォー・アフターをご覧ください".to_string(),
            description: "リフォーム施工事例とお問い合わせ".to_string(),
            company: String::new(),
            lang: "ja".to_string(),
            cases_heading: "施工事例".to_string(),
            faq_heading: "よくあるご質問".to_string(),
        }
    }
}

/// One before/after image pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseEntry {
    /// Image path or URL shown as "before".
    pub before: String,
    /// Image path or URL shown as "after".
    pub after: String,
    /// Caption shown under the widget while this pair is selected.
    #[serde(default)]
    pub caption: String,
}

/// One FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqEntry {
    /// Anchor id; `/#<id>` opens this entry.
    pub id: String,
    pub question: String,
    /// Markdown.
    pub answer: String,
}

/// Contact form copy and behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub heading: String,
    /// Visible labels of the text fields and the radio group.
    pub labels: FieldLabels,
    pub submit_label: String,
    /// Submit button label while the (simulated) submit is pending.
    pub busy_label: String,
    /// Dialog text shown when the submit completes.
    pub acknowledgment: String,
    /// Simulated submit latency.
    pub submit_delay_ms: u32,
    /// Options of the preferred-contact radio group.
    pub contact_methods: Vec<ContactMethod>,
    /// Label of the consent checkbox.
    pub privacy_label: String,
    /// Where the privacy policy link points.
    pub privacy_url: String,
    /// Inline error messages per field.
    pub messages: FieldMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        let settings = FormSettings::default();
        Self {
            heading: "お問い合わせ".to_string(),
            labels: FieldLabels::default(),
            submit_label: "送信する".to_string(),
            busy_label: settings.busy_label,
            acknowledgment: settings.acknowledgment,
            submit_delay_ms: settings.submit_delay_ms,
            contact_methods: vec![
                ContactMethod {
                    value: "phone".to_string(),
                    label: "電話".to_string(),
                },
                ContactMethod {
                    value: "email".to_string(),
                    label: "メール".to_string(),
                },
            ],
            privacy_label: "プライバシーポリシーに同意する".to_string(),
            privacy_url: "/privacy.html".to_string(),
            messages: settings.messages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldLabels {
    pub name: String,
    pub tel: String,
    pub email: String,
    pub contact_method: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            name: "お名前".to_string(),
            tel: "電話番号".to_string(),
            email: "メールアドレス".to_string(),
            contact_method: "ご希望の連絡方法".to_string(),
        }
    }
}

/// One option of the preferred-contact radio group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactMethod {
    pub value: String,
    pub label: String,
}

/// Color palette, rendered as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Secondary text (captions, footer).
    pub text_muted: String,
    /// Buttons, handle, active thumbnail.
    pub accent: String,
    /// Inline validation errors.
    pub error: String,
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#fbfaf7".to_string(),
            text: "#222222".to_string(),
            text_muted: "#6b6b6b".to_string(),
            accent: "#c8553d".to_string(),
            error: "#c0392b".to_string(),
            border: "#e2ddd5".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LandingConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `[[cases]]` list in the overlay replaces the stock list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LandingConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LandingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<LandingConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Landing Page Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page copy
# ---------------------------------------------------------------------------
[site]
title = "住まいのリフォーム"
tagline = "施工事例のビフォー・アフターをご覧ください"
description = "リフォーム施工事例とお問い合わせ"
company = ""
lang = "ja"
cases_heading = "施工事例"
faq_heading = "よくあるご質問"

# ---------------------------------------------------------------------------
# Before/after slider
# ---------------------------------------------------------------------------
[slider]
# Arrow-key step in percent, and the step with Shift held.
step = 5
fine_step = 1

# ---------------------------------------------------------------------------
# Cases: before/after pairs. The first one is shown on load; every pair
# gets a thumbnail that switches the slider to it.
# ---------------------------------------------------------------------------
# [[cases]]
# before = "assets/cases/bath-before.jpg"
# after = "assets/cases/bath-after.jpg"
# caption = "浴室リフォーム（築25年）"

# ---------------------------------------------------------------------------
# FAQ. `id` becomes the deep link: /#warranty opens that entry.
# Answers are Markdown.
# ---------------------------------------------------------------------------
# [[faq]]
# id = "warranty"
# question = "保証はありますか？"
# answer = "工事完了後 **10年間** の保証が付きます。"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
heading = "お問い合わせ"
submit_label = "送信する"
busy_label = "送信中..."
acknowledgment = "お問い合わせありがとうございます。担当者より折り返しご連絡いたします。"
# Simulated submit latency (no request is sent).
submit_delay_ms = 1000
privacy_label = "プライバシーポリシーに同意する"
privacy_url = "/privacy.html"

[form.labels]
name = "お名前"
tel = "電話番号"
email = "メールアドレス"
contact_method = "ご希望の連絡方法"

[[form.contact_methods]]
value = "phone"
label = "電話"

[[form.contact_methods]]
value = "email"
label = "メール"

# Inline error messages. An empty message falls back to `fallback`.
[form.messages]
name = "お名前を2文字以上で入力してください"
tel = "正しい電話番号を入力してください（10桁以上）"
email = "正しいメールアドレスを入力してください"
contact_method = "ご希望の連絡方法を選択してください"
privacy = "プライバシーポリシーへの同意が必要です"
fallback = "入力内容をご確認ください"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#fbfaf7"
text = "#222222"
text_muted = "#6b6b6b"
accent = "#c8553d"
error = "#c0392b"
border = "#e2ddd5"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-error: {error};
    --color-border: {border};
}}"#,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        error = colors.error,
        border = colors.border,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        fs::write(dir.path().join("config.toml"), content).unwrap();
    }

    #[test]
    fn default_config_has_form_defaults() {
        let config = LandingConfig::default();
        assert_eq!(config.form.submit_delay_ms, 1000);
        assert_eq!(config.form.busy_label, "送信中...");
        assert_eq!(config.form.contact_methods.len(), 2);
        assert_eq!(config.slider.step, 5);
        assert_eq!(config.slider.fine_step, 1);
        assert!(config.cases.is_empty());
        assert!(config.faq.is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#0055aa"
"##;
        let config: LandingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent, "#0055aa");
        assert_eq!(config.colors.background, "#fbfaf7");
        assert_eq!(config.site.lang, "ja");
    }

    #[test]
    fn parse_cases_and_faq() {
        let toml = r##"
[[cases]]
before = "a-before.jpg"
after = "a-after.jpg"
caption = "Kitchen"

[[cases]]
before = "b-before.jpg"
after = "b-after.jpg"

[[faq]]
id = "cost"
question = "How much?"
answer = "It *depends*."
"##;
        let config: LandingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.cases.len(), 2);
        assert_eq!(config.cases[0].caption, "Kitchen");
        assert_eq!(config.cases[1].caption, "");
        assert_eq!(config.faq[0].id, "cost");
    }

    #[test]
    fn parse_partial_messages_keep_other_defaults() {
        let toml = r##"
[form.messages]
tel = "Phone number looks wrong"
"##;
        let config: LandingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.form.messages.tel, "Phone number looks wrong");
        assert_eq!(config.form.messages.name, "お名前を2文字以上で入力してください");
    }

    #[test]
    fn widget_settings_mirror_config() {
        let mut config = LandingConfig::default();
        config.slider.step = 10;
        config.form.submit_delay_ms = 400;
        config.form.messages.email = "Bad email".to_string();
        let settings = config.widget_settings();
        assert_eq!(settings.slider.step, 10);
        assert_eq!(settings.form.submit_delay_ms, 400);
        assert_eq!(settings.form.messages.email, "Bad email");
        assert_eq!(settings.form.busy_label, config.form.busy_label);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "住まいのリフォーム");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        write_config(
            &tmp,
            r##"
[site]
title = "Tanaka Renovation"

[[cases]]
before = "assets/x-before.jpg"
after = "assets/x-after.jpg"
"##,
        );
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Tanaka Renovation");
        assert_eq!(config.site.lang, "ja");
        assert_eq!(config.cases.len(), 1);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "this is not valid toml [[[");
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[slider]\nspeed = 3\n");
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<LandingConfig, _> = toml::from_str("[analytics]\nid = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn user_contact_methods_replace_defaults() {
        let overlay: toml::Value = toml::from_str(
            r#"
[[form.contact_methods]]
value = "line"
label = "LINE"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.form.contact_methods.len(), 1);
        assert_eq!(config.form.contact_methods[0].value, "line");
        assert_eq!(config.form.heading, "お問い合わせ");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(LandingConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_step_zero() {
        let mut config = LandingConfig::default();
        config.slider.step = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_fine_step_too_large() {
        let mut config = LandingConfig::default();
        config.slider.fine_step = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_case_needs_both_images() {
        let mut config = LandingConfig::default();
        config.cases.push(CaseEntry {
            before: "before.jpg".to_string(),
            after: "  ".to_string(),
            caption: String::new(),
        });
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("cases[0]"));
    }

    #[test]
    fn validate_faq_id_characters() {
        let mut config = LandingConfig::default();
        config.faq.push(FaqEntry {
            id: "has space".to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_duplicate_faq_ids() {
        let mut config = LandingConfig::default();
        for _ in 0..2 {
            config.faq.push(FaqEntry {
                id: "cost".to_string(),
                question: "q".to_string(),
                answer: "a".to_string(),
            });
        }
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn validate_faq_id_reserved() {
        for id in ["contact-form", "tel", "widget-settings", "faq", "cost-answer"] {
            let mut config = LandingConfig::default();
            config.faq.push(FaqEntry {
                id: id.to_string(),
                question: "q".to_string(),
                answer: "a".to_string(),
            });
            let err = config.validate().unwrap_err().to_string();
            assert!(err.contains("clashes"), "{id} accepted: {err}");
        }

        let mut config = LandingConfig::default();
        config.faq.push(FaqEntry {
            id: "answers".to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_contact_methods() {
        let mut config = LandingConfig::default();
        config.form.contact_methods.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, "[form]\nsubmit_delay_ms = 120000\n");
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Merging and stock config
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: LandingConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = LandingConfig::default();
        assert_eq!(parsed.site.title, defaults.site.title);
        assert_eq!(parsed.slider, defaults.slider);
        assert_eq!(parsed.form.labels, defaults.form.labels);
        assert_eq!(parsed.form.contact_methods, defaults.form.contact_methods);
        assert_eq!(parsed.form.messages, defaults.form.messages);
        assert_eq!(parsed.form.acknowledgment, defaults.form.acknowledgment);
        assert_eq!(parsed.colors.accent, defaults.colors.accent);
        assert!(parsed.cases.is_empty());
        assert!(parsed.faq.is_empty());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        for section in ["site", "slider", "cases", "faq", "form", "colors"] {
            assert!(table.contains_key(section), "missing section {section}");
        }
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.accent = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("--color-error:"));
        assert!(css.contains("--color-bg:"));
    }
}
