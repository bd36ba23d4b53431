use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub site: SiteConfig,
    pub header: HeaderConfig,
    #[serde(default)]
    pub links: Vec<LinkItem>
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct SiteConfig {
    pub title: String,
    pub base_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub og_image: Option<OgImage>,
    #[serde(default)]
    pub group_by_category: bool,
    #[serde(default)]
    pub footer_links: Vec<FooterLink>
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct HeaderConfig {
    pub logo: ImageAsset,
    pub heading: String,
    pub subheading: Option<String>,
    pub avatar: Option<Avatar>,
    pub background_color: Option<String>
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct ImageAsset {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Avatar {
    pub src: String,
    pub alt: String
}

/// One clickable destination on the page. Entries are fixed at configuration
/// time; `is_active = false` hides an entry without deleting it.
#[derive(Debug, Deserialize, Clone)]
pub struct LinkItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<LinkCategory>,
    /// Lower sorts earlier; ties keep configuration order.
    pub priority: i32,
    pub open_in_new_tab: Option<bool>,
    #[serde(default = "default_true")]
    pub is_active: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    Social,
    Website,
    Resource,
    Shop,
    Contact
}

impl LinkCategory {
    pub const ALL: [LinkCategory; 5] = [
        LinkCategory::Social,
        LinkCategory::Website,
        LinkCategory::Resource,
        LinkCategory::Shop,
        LinkCategory::Contact
    ];

    pub fn label(self) -> &'static str {
        match self {
            LinkCategory::Social => "Social",
            LinkCategory::Website => "Website",
            LinkCategory::Resource => "Resources",
            LinkCategory::Shop => "Shop",
            LinkCategory::Contact => "Contact"
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_locale() -> String {
    "en_US".to_string()
}

pub fn load_config(dir: &Path) -> Result<Config, Box<dyn Error>> {
    let config_path = dir.join("linkdeck.toml");
    if !config_path.exists() {
        return Err("No manifest file found".into());
    }
    Ok(toml::from_str(&fs::read_to_string(config_path)?)?)
}

impl Config {
    /// Authoring lints. None of these stop a build; `check` treats them as
    /// fatal so misconfigurations surface before deployment.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        for link in &self.links {
            if !seen.insert(link.id.as_str()) {
                issues.push(format!("Duplicate link id: {}", link.id));
            }
            if link.title.trim().is_empty() {
                issues.push(format!("Link {} has an empty title", link.id));
            }
            if link.url.trim().is_empty() {
                issues.push(format!("Link {} has an empty url", link.id));
            }
        }
        issues
    }
}

pub fn run_check(dir: PathBuf) -> Result<(), Box<dyn Error>> {
    info!("Reading config");
    let config = load_config(&dir)?;

    let issues = config.validate();
    if issues.is_empty() {
        let active = config.links.iter().filter(|l| l.is_active).count();
        info!(
            "Configuration OK: {} links ({} active)",
            config.links.len(),
            active
        );
        Ok(())
    } else {
        for issue in &issues {
            error!("{}", issue);
        }
        Err(format!("{} configuration issues found", issues.len()).into())
    }
}
