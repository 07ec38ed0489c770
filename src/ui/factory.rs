//! Widget trees from declarative RON documents
//!
//! A document is one node: required `identifier` and `rect`, optional
//! layout fields, and a `children` list built recursively in document
//! order. Which behavior the node gets is decided by field presence:
//! a `text` field makes it a text widget, else `corner_radius` makes it
//! a rounded rectangle, else it is a blank grouping node.
//!
//! Construction is the one moment configuration can fail; the returned
//! tree is afterwards only mutated through paths, never rebuilt.

use macroquad::prelude::{vec2, Color, WHITE};
use serde::Deserialize;

use crate::config::ConfigError;

use super::{Rect, RoundRect, Text, Widget};

/// Serde model of one document node.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    pub identifier: String,
    pub rect: Rect,
    #[serde(default)]
    pub anchor: Option<([f32; 2], [f32; 2])>,
    #[serde(default)]
    pub scale: Option<[f32; 2]>,
    #[serde(default)]
    pub pivot: Option<[f32; 2]>,
    #[serde(default)]
    pub enabled: Option<bool>,

    // Text behavior fields.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub layout: Option<[f32; 2]>,
    #[serde(default)]
    pub dynamic_layout: Option<bool>,

    // RoundRect behavior field.
    #[serde(default)]
    pub corner_radius: Option<f32>,

    // Shared by both drawing behaviors.
    #[serde(default)]
    pub color: Option<[f32; 4]>,

    #[serde(default)]
    pub children: Vec<WidgetConfig>,
}

/// Parse and validate a document without building it.
pub fn parse(source: &str) -> Result<WidgetConfig, ConfigError> {
    let config: WidgetConfig = ron::from_str(source)?;
    validate(&config)?;
    Ok(config)
}

/// Parse, validate, and build in one step.
pub fn construct(source: &str) -> Result<Widget, ConfigError> {
    Ok(build(&parse(source)?))
}

/// Build a widget tree from an already-validated document.
pub fn build(config: &WidgetConfig) -> Widget {
    let mut widget = Widget::new(config.identifier.clone(), config.rect);

    if let Some((a0, a1)) = config.anchor {
        widget.set_anchor(vec2(a0[0], a0[1]), vec2(a1[0], a1[1]));
    }
    if let Some(s) = config.scale {
        widget.set_scale(vec2(s[0], s[1]));
    }
    if let Some(p) = config.pivot {
        widget.set_pivot(vec2(p[0], p[1]));
    }
    if let Some(enabled) = config.enabled {
        widget.set_enabled(enabled);
    }

    let color = config
        .color
        .map(|c| Color::new(c[0], c[1], c[2], c[3]))
        .unwrap_or(WHITE);

    if let Some(text) = &config.text {
        let layout = config
            .layout
            .map(|l| vec2(l[0], l[1]))
            .unwrap_or(vec2(0.5, 0.5));
        widget.set_behavior(Box::new(Text::new(
            text,
            config.font.as_deref().unwrap_or("default"),
            layout,
            color,
            config.dynamic_layout.unwrap_or(true),
        )));
    } else if let Some(corner_radius) = config.corner_radius {
        widget.set_behavior(Box::new(RoundRect::new(corner_radius, color)));
    }

    for child in &config.children {
        widget.add_child(build(child));
    }
    widget
}

fn validate(config: &WidgetConfig) -> Result<(), ConfigError> {
    if config.identifier.is_empty() {
        return Err(ConfigError::Validation("empty widget identifier".into()));
    }
    if config.identifier.contains(':') {
        // ':' is the path separator and can never be addressed.
        return Err(ConfigError::Validation(format!(
            "widget identifier `{}` contains ':'",
            config.identifier
        )));
    }
    for (i, child) in config.children.iter().enumerate() {
        if config.children[..i]
            .iter()
            .any(|other| other.identifier == child.identifier)
        {
            return Err(ConfigError::Validation(format!(
                "duplicate child identifier `{}` under `{}`",
                child.identifier, config.identifier
            )));
        }
        validate(child)?;
    }
    Ok(())
}
