use std::path::{Path, PathBuf};

/// Knobs of the scene manager.
///
/// ```
/// let config = desk_ngin::config::SceneConfig::default()
///     .with_asset_root("textures")
///     .strict();
/// assert!(config.strict_textures);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Directory texture files are resolved against.
    pub asset_root: PathBuf,
    /// Abort scene preparation when a texture cannot be loaded instead of
    /// rendering the affected draws with `fallback_color`.
    pub strict_textures: bool,
    /// Flat colour for draws whose texture is not registered.
    pub fallback_color: [f32; 4],
    /// Value of the global lighting switch.
    pub lighting: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            strict_textures: false,
            fallback_color: [0.5, 0.5, 0.5, 1.0],
            lighting: true,
        }
    }
}

impl SceneConfig {
    pub const ASSET_ROOT_VAR: &'static str = "DESK_ASSET_ROOT";
    pub const STRICT_TEXTURES_VAR: &'static str = "DESK_STRICT_TEXTURES";
    pub const LIGHTING_VAR: &'static str = "DESK_LIGHTING";

    /// Defaults, overridden by `DESK_ASSET_ROOT`, `DESK_STRICT_TEXTURES`
    /// and `DESK_LIGHTING` where set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(root) = lookup(Self::ASSET_ROOT_VAR) {
            config.asset_root = PathBuf::from(root);
        }
        if let Some(flag) = lookup(Self::STRICT_TEXTURES_VAR) {
            config.strict_textures = parse_flag(Self::STRICT_TEXTURES_VAR, &flag, config.strict_textures);
        }
        if let Some(flag) = lookup(Self::LIGHTING_VAR) {
            config.lighting = parse_flag(Self::LIGHTING_VAR, &flag, config.lighting);
        }
        config
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_textures = true;
        self
    }

    pub fn with_fallback_color(mut self, rgba: [f32; 4]) -> Self {
        self.fallback_color = rgba;
        self
    }

    pub fn with_lighting(mut self, lighting: bool) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn asset_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(file)
    }
}

fn parse_flag(var: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            log::warn!("ignoring {var}={other}, expected true or false");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("DESK_ASSET_ROOT", "/srv/textures"),
            ("DESK_STRICT_TEXTURES", "yes"),
            ("DESK_LIGHTING", "0"),
        ]
        .into();
        let config = SceneConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.asset_root, PathBuf::from("/srv/textures"));
        assert!(config.strict_textures);
        assert!(!config.lighting);
    }

    #[test]
    fn unparsable_flags_keep_defaults() {
        let config = SceneConfig::from_lookup(|k| (k == "DESK_LIGHTING").then(|| "sometimes".to_string()));
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn assets_resolve_against_root() {
        let config = SceneConfig::default().with_asset_root("res");
        assert_eq!(config.asset_path("wood.jpg"), PathBuf::from("res/wood.jpg"));
    }
}
