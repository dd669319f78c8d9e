use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counters: CountersConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Easing curve applied to counter progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant rate
    #[default]
    Linear,
    /// Fast start that settles onto the target, 1 - (1-t)^3
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Force the reduced-motion preference on or off (unset = ask the host)
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// Simulated animation frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: None,
            frame_rate: default_frame_rate(),
        }
    }
}

impl MotionConfig {
    /// Duration of one animation frame
    pub fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_nanos(16_666_667) // ~60fps fallback
        } else {
            Duration::from_nanos(1_000_000_000 / self.frame_rate as u64)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Classes whose elements form one reveal group each
    #[serde(default = "default_reveal_groups")]
    pub groups: Vec<String>,
    /// Fraction of the element that must be on screen
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Bottom root margin in pixels (negative shrinks the viewport)
    #[serde(default = "default_reveal_root_margin")]
    pub root_margin_bottom_px: f64,
    /// Safety-net delay after which everything is revealed
    #[serde(default = "default_reveal_fallback")]
    pub fallback_ms: u64,
    /// Class applied while waiting to be revealed
    #[serde(default = "default_pending_class")]
    pub pending_class: String,
    /// Class applied once revealed
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            groups: default_reveal_groups(),
            threshold: default_reveal_threshold(),
            root_margin_bottom_px: default_reveal_root_margin(),
            fallback_ms: default_reveal_fallback(),
            pending_class: default_pending_class(),
            visible_class: default_visible_class(),
        }
    }
}

impl RevealConfig {
    pub fn fallback(&self) -> Duration {
        Duration::from_millis(self.fallback_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterGroupConfig {
    /// Class selecting the counters of this group
    pub class: String,
    /// Animation length in milliseconds
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
    /// Intersection threshold that starts the animation
    #[serde(default = "default_counter_threshold")]
    pub threshold: f64,
}

impl CounterGroupConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountersConfig {
    /// Safety-net delay after which every counter starts
    #[serde(default = "default_counter_fallback")]
    pub fallback_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    #[serde(default = "default_counter_groups")]
    pub groups: Vec<CounterGroupConfig>,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            fallback_ms: default_counter_fallback(),
            easing: EasingType::default(),
            groups: default_counter_groups(),
        }
    }
}

impl CountersConfig {
    pub fn fallback(&self) -> Duration {
        Duration::from_millis(self.fallback_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Class of the scrolling track
    #[serde(default = "default_track_class")]
    pub track_class: String,
    /// Class of each card inside the track
    #[serde(default = "default_card_class")]
    pub card_class: String,
    /// Classes stripped from the decorative clones
    #[serde(default = "default_clone_strip_classes")]
    pub clone_strip_classes: Vec<String>,
    /// Pixels per frame on wide viewports
    #[serde(default = "default_speed_wide")]
    pub speed_wide: f64,
    /// Pixels per frame below the breakpoint
    #[serde(default = "default_speed_narrow")]
    pub speed_narrow: f64,
    /// Viewport width under which the narrow speed applies
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f64,
    /// +1 or -1
    #[serde(default = "default_direction")]
    pub direction: i8,
    /// Where in the ring the track starts, as a fraction of the loop width
    #[serde(default = "default_seed_fraction")]
    pub seed_fraction: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            track_class: default_track_class(),
            card_class: default_card_class(),
            clone_strip_classes: default_clone_strip_classes(),
            speed_wide: default_speed_wide(),
            speed_narrow: default_speed_narrow(),
            narrow_breakpoint_px: default_narrow_breakpoint(),
            direction: default_direction(),
            seed_fraction: default_seed_fraction(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_parallax_wrap_class")]
    pub wrap_class: String,
    /// Layers carrying this class are left alone
    #[serde(default = "default_parallax_exclude_class")]
    pub exclude_class: String,
    #[serde(default = "default_parallax_depth")]
    pub default_depth: f64,
    /// Horizontal travel per unit of depth at the pointer extremes
    #[serde(default = "default_pointer_x_range")]
    pub pointer_x_range: f64,
    /// Vertical travel per unit of depth at the pointer extremes
    #[serde(default = "default_pointer_y_range")]
    pub pointer_y_range: f64,
    /// Vertical travel per unit of depth across the scroll pass
    #[serde(default = "default_scroll_range")]
    pub scroll_range: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            wrap_class: default_parallax_wrap_class(),
            exclude_class: default_parallax_exclude_class(),
            default_depth: default_parallax_depth(),
            pointer_x_range: default_pointer_x_range(),
            pointer_y_range: default_pointer_y_range(),
            scroll_range: default_scroll_range(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_progress_class")]
    pub bar_class: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            bar_class: default_progress_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarConfig {
    #[serde(default = "default_navbar_class")]
    pub root_class: String,
    #[serde(default = "default_nav_link_class")]
    pub link_class: String,
    /// Scroll distance after which the navbar counts as scrolled
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold_px: f64,
    /// Offset added to the scroll position when picking the active section
    #[serde(default = "default_active_offset")]
    pub active_offset_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            root_class: default_navbar_class(),
            link_class: default_nav_link_class(),
            scrolled_threshold_px: default_scrolled_threshold(),
            active_offset_px: default_active_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels scrolled per key press in the preview
    #[serde(default = "default_scroll_step")]
    pub scroll_step_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll_step_px: default_scroll_step(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_frame_rate() -> u32 {
    60
}

fn default_reveal_groups() -> Vec<String> {
    vec!["js-reveal".to_string(), "js-review-reveal".to_string()]
}

fn default_reveal_threshold() -> f64 {
    0.16
}

fn default_reveal_root_margin() -> f64 {
    -40.0
}

fn default_reveal_fallback() -> u64 {
    1700
}

fn default_pending_class() -> String {
    "will-reveal".to_string()
}

fn default_visible_class() -> String {
    "is-visible".to_string()
}

fn default_counter_duration() -> u64 {
    1000
}

fn default_counter_threshold() -> f64 {
    0.3
}

fn default_counter_groups() -> Vec<CounterGroupConfig> {
    vec![
        CounterGroupConfig {
            class: "js-counter".to_string(),
            duration_ms: 1000,
            threshold: 0.3,
        },
        CounterGroupConfig {
            class: "js-stat-counter".to_string(),
            duration_ms: 1200,
            threshold: 0.35,
        },
    ]
}

fn default_counter_fallback() -> u64 {
    1800
}

fn default_track_class() -> String {
    "js-reviews-track".to_string()
}

fn default_card_class() -> String {
    "review-card".to_string()
}

fn default_clone_strip_classes() -> Vec<String> {
    vec!["js-review-reveal".to_string(), "will-reveal".to_string()]
}

fn default_speed_wide() -> f64 {
    0.5
}

fn default_speed_narrow() -> f64 {
    0.34
}

fn default_narrow_breakpoint() -> f64 {
    768.0
}

fn default_direction() -> i8 {
    -1 // cards drift left-to-right in the viewport
}

fn default_seed_fraction() -> f64 {
    0.5
}

fn default_parallax_wrap_class() -> String {
    "js-parallax-wrap".to_string()
}

fn default_parallax_exclude_class() -> String {
    "float-orb".to_string()
}

fn default_parallax_depth() -> f64 {
    0.1
}

fn default_pointer_x_range() -> f64 {
    22.0
}

fn default_pointer_y_range() -> f64 {
    16.0
}

fn default_scroll_range() -> f64 {
    24.0
}

fn default_progress_class() -> String {
    "scroll-progress".to_string()
}

fn default_navbar_class() -> String {
    "tlc-navbar".to_string()
}

fn default_nav_link_class() -> String {
    "js-nav-link".to_string()
}

fn default_scrolled_threshold() -> f64 {
    8.0
}

fn default_active_offset() -> f64 {
    130.0
}

fn default_tick_rate() -> u64 {
    16
}

fn default_scroll_step() -> f64 {
    60.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagemotion/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagemotion")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = AppConfig::default();
        assert_eq!(config.reveal.threshold, 0.16);
        assert_eq!(config.reveal.root_margin_bottom_px, -40.0);
        assert_eq!(config.reveal.fallback(), Duration::from_millis(1700));
        assert_eq!(config.counters.fallback(), Duration::from_millis(1800));
        assert_eq!(config.counters.groups.len(), 2);
        assert_eq!(config.counters.groups[1].duration(), Duration::from_millis(1200));
        assert_eq!(config.counters.easing, EasingType::Linear);
        assert_eq!(config.carousel.direction, -1);
        assert!(config.motion.reduced_motion.is_none());
    }

    #[test]
    fn test_frame_interval() {
        let mut motion = MotionConfig::default();
        assert_eq!(motion.frame_interval(), Duration::from_nanos(16_666_666));

        motion.frame_rate = 0;
        assert_eq!(motion.frame_interval(), Duration::from_nanos(16_666_667));

        motion.frame_rate = 120;
        assert_eq!(motion.frame_interval(), Duration::from_nanos(8_333_333));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [motion]
            reduced_motion = true

            [carousel]
            speed_wide = 0.8
            direction = 1

            [counters]
            easing = "ease_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.motion.reduced_motion, Some(true));
        assert_eq!(config.carousel.speed_wide, 0.8);
        assert_eq!(config.carousel.direction, 1);
        assert_eq!(config.carousel.speed_narrow, 0.34);
        assert_eq!(config.counters.easing, EasingType::EaseOut);
        assert_eq!(config.counters.groups.len(), 2);
        assert_eq!(config.reveal.pending_class, "will-reveal");
    }

    #[test]
    fn test_counter_group_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [[counters.groups]]
            class = "js-price"
            "#,
        )
        .unwrap();

        assert_eq!(config.counters.groups.len(), 1);
        assert_eq!(config.counters.groups[0].class, "js-price");
        assert_eq!(config.counters.groups[0].duration_ms, 1000);
        assert_eq!(config.counters.groups[0].threshold, 0.3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.reveal.groups, config.reveal.groups);
        assert_eq!(parsed.parallax.default_depth, config.parallax.default_depth);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[motion\nframe_rate = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
