use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tags::{DEFAULT_TAGS, NestingRule};

/// Renderer configuration, usually read from `tagdown.toml`.
///
/// ```toml
/// [tags]
/// "_" = "em"
/// "__" = "strong"
/// "~~" = "strike"
///
/// [[nesting]]
/// tag = "strong"
/// forbidden_inside = "em"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Delimiter string to HTML tag name
    pub tags: BTreeMap<String, String>,
    /// Tags that must stay literal while another tag is open
    pub nesting: Vec<NestingRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS
                .iter()
                .map(|(delimiter, name)| (delimiter.to_string(), name.to_string()))
                .collect(),
            nesting: vec![NestingRule::new("strong", "em")],
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn tag(mut self, delimiter: &str, name: &str) -> Self {
        self.config
            .tags
            .insert(delimiter.to_string(), name.to_string());
        self
    }

    pub fn without_tag(mut self, delimiter: &str) -> Self {
        self.config.tags.remove(delimiter);
        self
    }

    pub fn nesting_rule(mut self, tag: &str, forbidden_inside: &str) -> Self {
        self.config
            .nesting
            .push(NestingRule::new(tag, forbidden_inside));
        self
    }

    pub fn clear_nesting(mut self) -> Self {
        self.config.nesting.clear();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".tagdown.toml", "tagdown.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    let p = dirs::config_dir()?.join("tagdown").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .tagdown.toml, tagdown.toml
/// 3) user config dir: tagdown/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = user_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
