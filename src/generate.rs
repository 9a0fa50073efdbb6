//! Landing page generation.
//!
//! Renders `config.toml` into a single static page and copies the source
//! `assets/` directory next to it.
//!
//! ## Page Sections
//!
//! - **Hero**: title and tagline
//! - **Cases** (`#cases`): before/after comparison widget plus one thumbnail
//!   per configured pair, omitted when no cases are configured
//! - **FAQ** (`#faq`): accordion, answers rendered from Markdown
//! - **Contact** (`#contact`): the validated contact form
//! - **Footer**: company name
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! └── assets/                # Copied from the source directory
//!     └── cases/
//!         └── ...
//! ```
//!
//! The wasm runtime is not built here: `wasm-pack build --target web
//! --out-dir dist/pkg` puts it where the page's loader expects it.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/loader.js`: Module script that starts the wasm runtime
//!
//! Runtime knobs (slider steps, submit delay, error messages) travel to the
//! browser as JSON in `<script type="application/json" id="widget-settings">`.

use std::fs;
use std::path::{Path, PathBuf};

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use thiserror::Error;
use walkdir::WalkDir;

use crate::accordion::panel_id;
use crate::config::{self, CaseEntry, ConfigError, FaqEntry, FormConfig, LandingConfig};
use crate::rules::FieldId;
use crate::settings::SETTINGS_ELEMENT_ID;
use crate::slider::RESET_POSITION;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const LOADER_JS: &str = include_str!("../static/loader.js");

/// Directory under the source root that is copied verbatim.
pub const ASSETS_DIR: &str = "assets";

/// What a build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub page: PathBuf,
    pub title: String,
    pub cases: Vec<CaseEntry>,
    pub faq: Vec<String>,
    /// Copied asset files, relative to the output directory.
    pub assets: Vec<PathBuf>,
}

/// Result of checking a source directory without writing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub title: String,
    pub cases: usize,
    pub faq: usize,
    /// Local case images referenced in config but absent on disk.
    pub missing: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Render the page and copy assets from `source` into `output`.
pub fn build(source: &Path, output: &Path) -> Result<BuildSummary, GenerateError> {
    let config = config::load_config(source)?;

    fs::create_dir_all(output)?;
    let page = output.join("index.html");
    fs::write(&page, render_page(&config)?.into_string())?;
    tracing::info!(page = %page.display(), "wrote page");

    let assets = copy_assets(source, output)?;
    tracing::info!(count = assets.len(), "copied assets");

    Ok(BuildSummary {
        page,
        title: config.site.title,
        cases: config.cases,
        faq: config.faq.into_iter().map(|entry| entry.id).collect(),
        assets,
    })
}

/// Validate config and report case images that do not exist under `source`.
pub fn check(source: &Path) -> Result<CheckReport, GenerateError> {
    let config = config::load_config(source)?;
    let missing = config
        .cases
        .iter()
        .flat_map(|case| [case.before.as_str(), case.after.as_str()])
        .filter(|reference| is_local(reference))
        .filter(|reference| !source.join(reference.trim_start_matches('/')).is_file())
        .map(str::to_string)
        .collect();

    Ok(CheckReport {
        title: config.site.title,
        cases: config.cases.len(),
        faq: config.faq.len(),
        missing,
    })
}

/// References the build is responsible for, as opposed to remote URLs.
fn is_local(reference: &str) -> bool {
    !(reference.contains("://") || reference.starts_with("//") || reference.starts_with("data:"))
}

/// Copy `<source>/assets/` to `<output>/assets/`, returning the copied
/// files relative to `output`. A missing assets directory copies nothing.
fn copy_assets(source: &Path, output: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let assets_root = source.join(ASSETS_DIR);
    if !assets_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(&assets_root).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = output.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied.push(relative.to_path_buf());
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Render the complete landing page.
pub fn render_page(config: &LandingConfig) -> Result<Markup, GenerateError> {
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let settings = config.widget_settings().to_embedded_json()?;

    let content = html! {
        header.hero {
            h1.hero__title { (config.site.title) }
            @if !config.site.tagline.is_empty() {
                p.hero__tagline { (config.site.tagline) }
            }
        }
        main {
            (render_cases(&config.site.cases_heading, &config.cases))
            (render_faq(&config.site.faq_heading, &config.faq))
            (render_contact(&config.form))
        }
        footer.site-footer {
            @if !config.site.company.is_empty() {
                p { "© " (config.site.company) }
            }
        }
    };

    Ok(base_document(config, &css, &settings, content))
}

/// Renders the base HTML document structure
fn base_document(config: &LandingConfig, css: &str, settings: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.title) }
                @if !config.site.description.is_empty() {
                    meta name="description" content=(config.site.description);
                }
                style { (PreEscaped(css)) }
                script type="application/json" id=(SETTINGS_ELEMENT_ID) { (PreEscaped(settings)) }
                script type="module" { (PreEscaped(LOADER_JS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The comparison widget, showing the first case, plus its thumbnails.
fn render_cases(heading: &str, cases: &[CaseEntry]) -> Markup {
    let Some(first) = cases.first() else {
        return html! {};
    };
    html! {
        section.cases #cases {
            h2 { (heading) }
            div.ba data-before=(first.before) data-after=(first.after) {
                div.ba__container {
                    img.ba__image."ba__image--after" src=(first.after) alt="After" draggable="false";
                    img.ba__image."ba__image--before" src=(first.before) alt="Before" draggable="false"
                        style=(format!("clip-path: inset(0 {}% 0 0)", 100 - RESET_POSITION));
                    div.ba__handle aria-hidden="true" style=(format!("left: {}%", RESET_POSITION)) {}
                }
                input.ba__slider type="range" min="0" max="100" value=(RESET_POSITION)
                    aria-label="Before/after comparison";
                p.cases__caption aria-live="polite" { (first.caption) }
            }
            @if cases.len() > 1 {
                ul.cases__thumbs {
                    @for (i, case) in cases.iter().enumerate() {
                        li {
                            button.cases__thumb."cases__thumb--active"[i == 0]
                                type="button"
                                data-before=(case.before)
                                data-after=(case.after)
                                data-caption=(case.caption)
                            {
                                img src=(case.after) alt=(case.caption) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    }
}

/// FAQ items: each trigger names its panel through `data-accordion`.
fn render_faq(heading: &str, entries: &[FaqEntry]) -> Markup {
    if entries.is_empty() {
        return html! {};
    }
    html! {
        section.faq #faq {
            h2 { (heading) }
            @for entry in entries {
                div.faq__item {
                    h3 {
                        button.faq__question #(entry.id)
                            type="button"
                            data-accordion=(entry.id)
                            aria-expanded="false"
                            aria-controls=(panel_id(&entry.id))
                        {
                            (entry.question)
                        }
                    }
                    div.faq__answer #(panel_id(&entry.id)) role="region" aria-hidden="true" {
                        (PreEscaped(render_markdown(&entry.answer)))
                    }
                }
            }
        }
    }
}

fn render_markdown(source: &str) -> String {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

fn render_contact(form: &FormConfig) -> Markup {
    html! {
        section.contact #contact {
            h2 { (form.heading) }
            form #contact-form novalidate {
                (text_field(FieldId::Name, "text", "name", &form.labels.name))
                (text_field(FieldId::Tel, "tel", "tel", &form.labels.tel))
                (text_field(FieldId::Email, "email", "email", &form.labels.email))
                fieldset.contact__field {
                    legend { (form.labels.contact_method) }
                    @for method in &form.contact_methods {
                        label.contact__option {
                            input type="radio" name=(FieldId::ContactMethod.as_str()) value=(method.value);
                            " " (method.label)
                        }
                    }
                    p.contact__error aria-live="polite" {}
                }
                div.contact__field {
                    label.contact__option {
                        input type="checkbox" name=(FieldId::Privacy.as_str()) value="agree";
                        " "
                        a href=(form.privacy_url) target="_blank" rel="noopener" { (form.privacy_label) }
                    }
                    p.contact__error aria-live="polite" {}
                }
                button.contact__submit type="submit" { (form.submit_label) }
            }
        }
    }
}

fn text_field(field: FieldId, input_type: &str, autocomplete: &str, label: &str) -> Markup {
    let id = field.as_str();
    html! {
        div.contact__field {
            label for=(id) { (label) }
            input #(id) type=(input_type) name=(id) autocomplete=(autocomplete);
            p.contact__error aria-live="polite" {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WidgetSettings;
    use tempfile::TempDir;

    fn case(name: &str, caption: &str) -> CaseEntry {
        CaseEntry {
            before: format!("assets/{name}-before.jpg"),
            after: format!("assets/{name}-after.jpg"),
            caption: caption.to_string(),
        }
    }

    fn faq_entry(id: &str, answer: &str) -> FaqEntry {
        FaqEntry {
            id: id.to_string(),
            question: format!("Question {id}?"),
            answer: answer.to_string(),
        }
    }

    fn sample_config() -> LandingConfig {
        let mut config = LandingConfig::default();
        config.site.title = "Tanaka Renovation".to_string();
        config.site.company = "Tanaka Komuten".to_string();
        config.cases = vec![case("bath", "Bathroom"), case("kitchen", "Kitchen")];
        config.faq = vec![
            faq_entry("warranty", "Ten years, **in writing**."),
            faq_entry("cost", "It depends."),
        ];
        config
    }

    fn page(config: &LandingConfig) -> String {
        render_page(config).unwrap().into_string()
    }

    #[test]
    fn base_document_includes_doctype_and_lang() {
        let html = page(&LandingConfig::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="ja">"#));
    }

    #[test]
    fn page_includes_color_variables() {
        let mut config = LandingConfig::default();
        config.colors.accent = "#0055aa".to_string();
        let html = page(&config);
        assert!(html.contains("--color-accent: #0055aa"));
    }

    #[test]
    fn page_embeds_widget_settings() {
        let mut config = sample_config();
        config.form.submit_delay_ms = 250;
        let html = page(&config);

        let marker = r#"<script type="application/json" id="widget-settings">"#;
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find("</script>").unwrap();
        let settings = WidgetSettings::from_embedded_json(Some(&html[start..end]));
        assert_eq!(settings.form.submit_delay_ms, 250);
        assert_eq!(settings, config.widget_settings());
    }

    #[test]
    fn page_includes_module_loader() {
        let html = page(&LandingConfig::default());
        assert!(html.contains(r#"<script type="module">"#));
        assert!(html.contains("./pkg/renovation_lp.js"));
    }

    #[test]
    fn widget_root_mirrors_first_case() {
        let html = page(&sample_config());
        assert!(html.contains(
            r#"class="ba" data-before="assets/bath-before.jpg" data-after="assets/bath-after.jpg""#
        ));
        assert!(html.contains(r#"class="ba__slider" type="range" min="0" max="100" value="50""#));
        assert!(html.contains("inset(0 50% 0 0)"));
        assert!(html.contains(r#"<p class="cases__caption" aria-live="polite">Bathroom</p>"#));
    }

    #[test]
    fn thumbnails_carry_image_pairs() {
        let html = page(&sample_config());
        assert_eq!(html.matches("data-caption=").count(), 2);
        assert!(html.contains(r#"data-before="assets/kitchen-before.jpg""#));
        assert!(html.contains(r#"data-caption="Kitchen""#));
        assert!(html.contains(&format!("cases__thumb {}", crate::cases::ACTIVE_CLASS)));
    }

    #[test]
    fn single_case_has_no_thumbnails() {
        let mut config = sample_config();
        config.cases.truncate(1);
        let html = page(&config);
        assert!(html.contains(r#"class="ba""#));
        assert!(!html.contains("cases__thumb"));
    }

    #[test]
    fn no_cases_omits_widget() {
        let html = page(&LandingConfig::default());
        assert!(!html.contains(r#"class="ba""#));
        assert!(!html.contains(r#"id="cases""#));
    }

    #[test]
    fn faq_pairs_trigger_with_panel() {
        let html = page(&sample_config());
        assert!(html.contains(r#"data-accordion="warranty""#));
        assert!(html.contains(r#"aria-controls="warranty-answer""#));
        assert!(html.contains(r#"id="warranty-answer""#));
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"aria-hidden="true""#));
    }

    #[test]
    fn faq_answer_renders_markdown() {
        let html = page(&sample_config());
        assert!(html.contains("<strong>in writing</strong>"));
    }

    #[test]
    fn contact_form_has_every_field() {
        let html = page(&LandingConfig::default());
        assert!(html.contains(r#"<form id="contact-form" novalidate>"#));
        for id in ["name", "tel", "email"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert_eq!(html.matches(r#"name="contact_method""#).count(), 2);
        assert!(html.contains(r#"type="checkbox" name="privacy""#));
        assert_eq!(html.matches(r#"class="contact__error""#).count(), 5);
        assert!(html.contains(r#"<button class="contact__submit" type="submit">送信する</button>"#));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut config = LandingConfig::default();
        config.site.title = "<script>alert(1)</script>".to_string();
        let html = page(&config);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn footer_omitted_company_when_empty() {
        let html = page(&LandingConfig::default());
        assert!(!html.contains("©"));
        assert!(page(&sample_config()).contains("© Tanaka Komuten"));
    }

    // =========================================================================
    // build / check
    // =========================================================================

    fn write_site(dir: &Path, config: &str) {
        fs::write(dir.join("config.toml"), config).unwrap();
    }

    const SITE: &str = r#"
[site]
title = "Test Site"

[[cases]]
before = "assets/cases/a-before.jpg"
after = "assets/cases/a-after.jpg"
caption = "A"

[[faq]]
id = "q1"
question = "Q?"
answer = "A."
"#;

    #[test]
    fn build_writes_page_and_copies_assets() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_site(source.path(), SITE);
        fs::create_dir_all(source.path().join("assets/cases")).unwrap();
        fs::write(source.path().join("assets/cases/a-before.jpg"), b"b").unwrap();
        fs::write(source.path().join("assets/cases/a-after.jpg"), b"a").unwrap();

        let summary = build(source.path(), output.path()).unwrap();

        assert_eq!(summary.title, "Test Site");
        assert_eq!(summary.faq, vec!["q1".to_string()]);
        assert_eq!(summary.assets.len(), 2);
        let html = fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(html.contains("<title>Test Site</title>"));
        assert!(output.path().join("assets/cases/a-after.jpg").is_file());
    }

    #[test]
    fn build_without_assets_dir() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let summary = build(source.path(), &output.path().join("dist")).unwrap();
        assert!(summary.assets.is_empty());
        assert!(output.path().join("dist/index.html").is_file());
    }

    #[test]
    fn build_rejects_invalid_config() {
        let source = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_site(source.path(), "[slider]\nstep = 0\n");
        assert!(matches!(
            build(source.path(), output.path()),
            Err(GenerateError::Config(ConfigError::Validation(_)))
        ));
        assert!(!output.path().join("index.html").exists());
    }

    #[test]
    fn check_reports_missing_images() {
        let source = TempDir::new().unwrap();
        write_site(source.path(), SITE);
        fs::create_dir_all(source.path().join("assets/cases")).unwrap();
        fs::write(source.path().join("assets/cases/a-before.jpg"), b"b").unwrap();

        let report = check(source.path()).unwrap();
        assert!(!report.is_ok());
        assert_eq!(report.missing, vec!["assets/cases/a-after.jpg".to_string()]);
        assert_eq!(report.cases, 1);
        assert_eq!(report.faq, 1);
    }

    #[test]
    fn check_ignores_remote_images() {
        let source = TempDir::new().unwrap();
        write_site(
            source.path(),
            r#"
[[cases]]
before = "https://cdn.example.com/b.jpg"
after = "//cdn.example.com/a.jpg"
"#,
        );
        assert!(check(source.path()).unwrap().is_ok());
    }
}
