use std::collections::HashMap;
use std::error::Error;
use std::fs::{self};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::{Captures, Regex};
use tera::{Context, Tera};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::{Config, LinkCategory, LinkItem, load_config};
use crate::links::{DisplayLink, active_links, by_category};

#[derive(serde::Serialize)]
struct Section<'a> {
    name: &'a str,
    links: Vec<DisplayLink<'a>>
}

pub fn run_build(dir: PathBuf, minify: bool) -> Result<(), Box<dyn Error>> {
    let output_path = dir.join("dist");
    fs::create_dir_all(&output_path)?;

    info!("Reading config");
    let config = load_config(&dir)?;
    config.validate().iter().for_each(|i| warn!("{}", i));

    let scss_path = dir.join("templates/main.scss");
    if scss_path.exists() {
        info!("Compiling SCSS");
        let css = grass::from_path(scss_path, &grass::Options::default())?;
        fs::write(output_path.join("style.css"), css)?;
    } else {
        info!("No SCSS found, skipping");
    }

    info!("Copying static assets");
    let static_path = dir.join("static");
    if static_path.exists() {
        copy_assets(&static_path, &output_path)?;
    }
    let asset_hashes = collect_asset_hashes(&output_path, &output_path)?;
    debug!("{:?}", &asset_hashes);

    info!("Initializing Tera");
    let tera = Tera::new(
        dir.join("templates/**/*.html")
            .to_str()
            .ok_or("Non UTF8 template path")?
    )?;

    info!("Rendering page");
    render_page(&config, &output_path, &tera, &asset_hashes, minify)?;

    info!("Build complete");
    Ok(())
}

fn render_page(
    config: &Config,
    out_dir: &Path,
    tera: &Tera,
    asset_hashes: &HashMap<String, String>,
    minify: bool
) -> Result<(), Box<dyn Error>> {
    let active = active_links(&config.links);
    debug!("{} of {} links active", active.len(), config.links.len());

    let cards: Vec<DisplayLink> = active.iter().map(|l| DisplayLink::from_item(l)).collect();
    let sections = collect_sections(&active);

    let mut context = Context::new();
    context.insert("asset_hashes", asset_hashes);
    context.insert("site", &config.site);
    context.insert("header", &config.header);
    context.insert("links", &cards);
    context.insert("sections", &sections);

    let rendered =
        bust_image_urls(&tera.render("index.html", &context)?, asset_hashes).into_bytes();

    debug!("Minifying");
    let minified = if minify {
        let cfg = minify_html::Cfg::new();
        minify_html::minify(&rendered, &cfg)
    } else {
        rendered
    };

    debug!("Writing file {}", out_dir.display());
    fs::write(out_dir.join("index.html"), minified)?;
    Ok(())
}

// Uncategorized links lead in an unnamed section, then one section per
// category in declaration order. Empty sections are dropped.
fn collect_sections<'a>(active: &[&'a LinkItem]) -> Vec<Section<'a>> {
    let mut sections = Vec::new();

    let uncategorized: Vec<DisplayLink> = active
        .iter()
        .filter(|l| l.category.is_none())
        .map(|l| DisplayLink::from_item(l))
        .collect();
    if !uncategorized.is_empty() {
        sections.push(Section {
            name: "",
            links: uncategorized
        });
    }

    for category in LinkCategory::ALL {
        let links: Vec<DisplayLink> = by_category(active, category)
            .into_iter()
            .map(DisplayLink::from_item)
            .collect();
        if !links.is_empty() {
            sections.push(Section {
                name: category.label(),
                links
            });
        }
    }
    sections
}

fn hash_file(path: &Path) -> Result<String, Box<dyn Error>> {
    let contents = fs::read(path)?;
    Ok(format!("{:x}", xxh3_64(&contents)))
}

fn collect_asset_hashes(
    dir: &Path,
    base: &Path
) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let mut hashes = HashMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            hashes.extend(collect_asset_hashes(&path, base)?);
        } else {
            let ext = path.extension().and_then(|s| s.to_str());
            match ext {
                Some("html") => {}
                _ => {
                    let hash = hash_file(&path)?;
                    let rel = path.strip_prefix(base)?;
                    let url = format!(
                        "/{}",
                        rel.to_str().ok_or("Non UTF8 asset path")?.replace('\\', "/")
                    );
                    hashes.insert(url, hash);
                }
            }
        }
    }
    Ok(hashes)
}

fn bust_image_urls(html: &str, asset_hashes: &HashMap<String, String>) -> String {
    let re = Regex::new(r#"<img([^>]*?)src="(/[^"?]+)"([^>]*?)>"#).unwrap();
    re.replace_all(html, |caps: &Captures| {
        let before = &caps[1];
        let src = &caps[2];
        let after = &caps[3];
        if let Some(hash) = asset_hashes.get(src) {
            format!(r#"<img{}src="{}?v={}"{}>"#, before, src, hash, after)
        } else {
            caps[0].to_string()
        }
    })
    .to_string()
}

fn copy_assets(src: &Path, dst: &Path) -> Result<(), Box<dyn Error>> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            let dest_dir = dst.join(path.file_name().ok_or("Bad asset path")?);
            fs::create_dir_all(&dest_dir)?;
            copy_assets(&path, &dest_dir)?;
        } else {
            let ext = path.extension().and_then(|s| s.to_str());
            match ext {
                Some("toml") | Some("scss") => {}
                _ => {
                    let dest = dst.join(path.file_name().ok_or("Bad asset path")?);
                    fs::copy(&path, &dest)?;
                }
            }
        }
    }
    Ok(())
}
