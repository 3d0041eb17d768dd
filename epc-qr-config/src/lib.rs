use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use v1::logo::{LogoConfig, MAX_LOGO_SCALE};
pub use v1::render::RenderConfig;
pub use v1::validation::{OverflowPolicy, ValidationConfig};

mod v1 {
    /// QR render settings
    pub mod render;

    /// Logo overlay settings
    pub mod logo;

    /// Field validation policy
    pub mod validation;
}

pub const CURRENT_VERSION: usize = 1;

fn default_version() -> usize {
    CURRENT_VERSION
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    render: v1::render::RenderConfig,
    #[serde(default)]
    logo: v1::logo::LogoConfig,
    #[serde(default)]
    validation: v1::validation::ValidationConfig,
    #[serde(default = "default_version")]
    version: usize,
}

impl Config {
    pub fn render(&self) -> &v1::render::RenderConfig {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut v1::render::RenderConfig {
        &mut self.render
    }

    pub fn logo(&self) -> &v1::logo::LogoConfig {
        &self.logo
    }

    pub fn logo_mut(&mut self) -> &mut v1::logo::LogoConfig {
        &mut self.logo
    }

    pub fn validation(&self) -> &v1::validation::ValidationConfig {
        &self.validation
    }

    pub fn validation_mut(&mut self) -> &mut v1::validation::ValidationConfig {
        &mut self.validation
    }

    pub fn needs_upgrade(&self) -> bool {
        self.version < CURRENT_VERSION
    }

    pub fn upgrade_to_latest(self) -> Self {
        self
    }

    pub fn from_toml(toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    pub fn load_from_file() -> Self {
        let config_file = config_location();
        if !config_file.exists() {
            Default::default()
        } else {
            let config = std::fs::read_to_string(config_file).expect("Could not read config file");
            Self::from_toml(&config).expect("Could not parse config file")
        }
    }

    pub fn save_to_file(&self) {
        let config_file = config_location();
        let config_file = std::fs::File::create(config_file).unwrap();
        let toml = self.to_toml().expect("Could not serialize config");
        let mut buf = BufWriter::new(config_file);
        buf.write_all(toml.as_bytes())
            .expect("Could not write config file");
        buf.flush().expect("Could not flush config file");
    }

    /// get a list of all things potentially wrong with the config
    pub fn config_errors(&self) -> Vec<&str> {
        let mut errors = Vec::new();
        if self.render().module_pixels == 0 {
            errors.push("Render module size is 0 pixels");
        }
        if self.render().border_modules == 0 {
            errors.push("Quiet zone is 0 modules, scanners may reject the code");
        }
        if self.logo().scale <= 0.0 {
            errors.push("Logo scale is not positive");
        }
        if self.logo().scale > v1::logo::MAX_LOGO_SCALE {
            errors.push("Logo scale exceeds the overlay ceiling");
        }
        errors
    }
}

fn config_location() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let dir = config_dir.join("epc-qr");
        std::fs::create_dir_all(&dir).expect("Could not create config directory");
        dir.join("config.toml")
    } else {
        PathBuf::from("epc-qr.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            render: v1::render::RenderConfig::default(),
            logo: v1::logo::LogoConfig::default(),
            validation: v1::validation::ValidationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_renderer() {
        let config = Config::default();
        assert_eq!(config.render().module_pixels, 10);
        assert_eq!(config.render().border_modules, 4);
        assert!(config.logo().enabled);
        assert_eq!(config.validation().text_overflow, OverflowPolicy::Reject);
        assert!(!config.needs_upgrade());
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        let back = Config::from_toml(&toml).unwrap();
        assert_eq!(back.render().module_pixels, config.render().module_pixels);
        assert_eq!(back.logo().scale, config.logo().scale);
        assert_eq!(
            back.validation().text_overflow,
            config.validation().text_overflow
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.render().module_pixels, 10);
        assert!(config.config_errors().is_empty());
    }

    #[test]
    fn config_errors_flag_broken_settings() {
        let mut config = Config::default();
        config.render_mut().module_pixels = 0;
        config.logo_mut().scale = 0.4;
        let errors = config.config_errors();
        assert_eq!(errors.len(), 2);
    }
}
