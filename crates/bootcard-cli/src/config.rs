// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use bootcard_app::{CardEffect, TransitionTiming};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_ENTER_EFFECT: &str = "fade-in";
const DEFAULT_EXIT_EFFECT: &str = "fade-out";
const DEFAULT_DELAY_MS: i64 = 600;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub deck: DeckSection,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            deck: DeckSection::default(),
            animation: Animation::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Animation {
    pub enter: Option<String>,
    pub exit: Option<String>,
    pub delay_ms: Option<i64>,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            enter: Some(DEFAULT_ENTER_EFFECT.to_owned()),
            exit: Some(DEFAULT_EXIT_EFFECT.to_owned()),
            delay_ms: Some(DEFAULT_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub high_contrast: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            high_contrast: Some(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            file: None,
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("BOOTCARD_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set BOOTCARD_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join("bootcard");
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [deck], [animation], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "log.level in {} must be one of {}; got {level:?}",
                path.display(),
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }

    /// Deck file to load, if any. Without one the built-in deck is used.
    pub fn deck_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.deck.path {
            return Some(PathBuf::from(path));
        }
        env::var_os("BOOTCARD_DECK_PATH").map(PathBuf::from)
    }

    /// Transition delay, with zero and negative values falling back to the
    /// stock delay rather than producing an instant swap.
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming::from_millis(self.animation.delay_ms)
    }

    pub fn enter_effect(&self) -> CardEffect {
        CardEffect::for_name(
            self.animation
                .enter
                .as_deref()
                .unwrap_or(DEFAULT_ENTER_EFFECT),
        )
    }

    pub fn exit_effect(&self) -> CardEffect {
        CardEffect::for_name(self.animation.exit.as_deref().unwrap_or(DEFAULT_EXIT_EFFECT))
    }

    pub fn high_contrast(&self) -> bool {
        self.ui.high_contrast.unwrap_or(false)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log.file.as_ref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# bootcard config\n# Place this file at: {}\n\nversion = 1\n\n[deck]\n# Optional. Without a path the built-in welcome deck is shown.\n# path = \"/etc/bootcard/deck.toml\"\n\n[animation]\nenter = \"{}\"\nexit = \"{}\"\ndelay_ms = {}\n\n[ui]\nhigh_contrast = false\n\n[log]\n# Optional. Without a file, logging stays off.\n# file = \"/var/log/bootcard.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_ENTER_EFFECT,
            DEFAULT_EXIT_EFFECT,
            DEFAULT_DELAY_MS,
            DEFAULT_LOG_LEVEL,
        )
    }
}
