use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::animation::{
    query_sequence, Animation, ColorTween, Height, Opacity, Rotate, Scale, SequenceBox, Stat, StatConfig,
    StyleTween, Translate, Width,
};
use crate::dom::{CssStyleDeclaration, Document};

/// A scene: the elements of a document and the animations to run on them
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// User-agent style defaults keyed by tag name (`*` for every element)
    #[serde(default)]
    pub defaults: HashMap<String, String>,

    #[serde(default, rename = "element")]
    pub elements: Vec<ElementConfig>,

    #[serde(default, rename = "animation")]
    pub animations: Vec<AnimationDefinition>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ElementConfig {
    #[serde(default = "default_tag")]
    pub tag: String,

    pub id: Option<String>,

    #[serde(default)]
    pub classes: Vec<String>,

    /// Inline style text, e.g. `width: 100px; color: #fff !important`
    #[serde(default)]
    pub style: String,

    /// Pseudo-element styles keyed by selector (`::before`)
    #[serde(default)]
    pub pseudo: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnimationDefinition {
    pub selector: String,

    #[serde(default)]
    pub stat: StatConfig,

    #[serde(default)]
    pub sequence: Vec<SequenceConfig>,
}

/// One sequence entry, selected by `kind`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SequenceConfig {
    Width {
        value: f32,
    },
    Height {
        value: f32,
    },
    Opacity {
        value: f32,
    },
    Translate {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Rotate {
        degrees: f32,
    },
    Scale {
        x: f32,
        #[serde(default)]
        y: Option<f32>,
    },
    Color {
        property: String,
        hex: String,
        #[serde(default = "default_alpha")]
        alpha: u8,
    },
    Style {
        property: String,
        to: String,
    },
}

fn default_tag() -> String {
    "div".to_string()
}
fn default_alpha() -> u8 {
    100
}

impl SequenceConfig {
    pub fn build(&self) -> Result<SequenceBox> {
        let sequence: SequenceBox = match self {
            SequenceConfig::Width { value } => Box::new(Width::new(*value)),
            SequenceConfig::Height { value } => Box::new(Height::new(*value)),
            SequenceConfig::Opacity { value } => Box::new(Opacity::new(*value)),
            SequenceConfig::Translate { x, y } => Box::new(Translate { x: *x, y: *y }),
            SequenceConfig::Rotate { degrees } => Box::new(Rotate { degrees: *degrees }),
            SequenceConfig::Scale { x, y } => Box::new(Scale {
                x: *x,
                y: y.unwrap_or(*x),
            }),
            SequenceConfig::Color { property, hex, alpha } => Box::new(
                ColorTween::from_hex(property, hex, *alpha)
                    .with_context(|| format!("Invalid color sequence for '{}'", property))?,
            ),
            SequenceConfig::Style { property, to } => Box::new(
                StyleTween::parse(property, to)
                    .with_context(|| format!("Invalid style sequence for '{}'", property))?,
            ),
        };
        Ok(sequence)
    }
}

impl Config {
    pub async fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        info!("📄 Reading config from: {}", expanded_path);

        let content = fs::read_to_string(expanded_path.as_ref())
            .await
            .with_context(|| format!("Failed to read config file '{}'", expanded_path))?;

        let config = Self::from_str(&content)?;
        debug!(
            "📋 Config loaded: {} element(s), {} animation(s)",
            config.elements.len(),
            config.animations.len()
        );

        Ok(config)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Create a document holding every configured element
    pub fn build_document(&self) -> Result<Document> {
        let doc = Document::new();

        for (tag, style) in &self.defaults {
            let decl = CssStyleDeclaration::parse(style)
                .with_context(|| format!("Invalid default style for '{}'", tag))?;
            doc.set_default_style(tag, decl);
        }

        for config in &self.elements {
            let element = doc.create_element(&config.tag);
            if let Some(id) = &config.id {
                element.set_id(id);
            }
            for class in &config.classes {
                element.add_class(class);
            }

            let style = CssStyleDeclaration::parse(&config.style)
                .with_context(|| format!("Invalid style for element {}", element.label()))?;
            element.set_style(style);

            for (pseudo, style) in &config.pseudo {
                let decl = CssStyleDeclaration::parse(style)
                    .with_context(|| format!("Invalid {} style for {}", pseudo, element.label()))?;
                element.set_pseudo_style(pseudo, decl);
            }
        }

        Ok(doc)
    }

    /// Resolve every animation definition against `doc`
    pub fn build_animations(&self, doc: &Document) -> Result<Vec<Animation>> {
        let mut animations = Vec::with_capacity(self.animations.len());

        for definition in &self.animations {
            if definition.sequence.is_empty() {
                warn!("Animation on '{}' has no sequences", definition.selector);
            }

            let stat = Stat::new(definition.stat.clone())
                .with_context(|| format!("Invalid timing for '{}'", definition.selector))?;
            let sequences = definition
                .sequence
                .iter()
                .map(SequenceConfig::build)
                .collect::<Result<Vec<_>>>()?;

            let animation = query_sequence(doc, &definition.selector, stat, sequences)
                .with_context(|| format!("Failed to query '{}'", definition.selector))?;
            animations.push(animation);
        }

        Ok(animations)
    }
}
