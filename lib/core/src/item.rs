use crate::vocabulary::{Category, ColorLabel, Gender, Material, Occasion, Style};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry as the matching engine sees it.
///
/// Items are owned by the catalog; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    /// Accepts either a single style or a list of styles
    #[serde(alias = "style", deserialize_with = "one_or_many")]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub occasions: Vec<Occasion>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub colors: Vec<ColorLabel>,
    #[serde(default = "default_gender")]
    pub gender: Gender,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_gender() -> Gender {
    Gender::Unisex
}

fn default_in_stock() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}

impl CatalogItem {
    /// Create an in-stock unisex item with no optional attributes
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            category,
            styles: Vec::new(),
            occasions: Vec::new(),
            materials: Vec::new(),
            colors: Vec::new(),
            gender: Gender::Unisex,
            in_stock: true,
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_styles(mut self, styles: impl IntoIterator<Item = Style>) -> Self {
        self.styles = styles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_occasions(mut self, occasions: impl IntoIterator<Item = Occasion>) -> Self {
        self.occasions = occasions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.materials = materials.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = ColorLabel>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    #[must_use]
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    #[inline]
    pub fn has_style(&self, style: Style) -> bool {
        self.styles.contains(&style)
    }

    #[inline]
    pub fn has_occasion(&self, occasion: Occasion) -> bool {
        self.occasions.contains(&occasion)
    }

    #[inline]
    pub fn has_material(&self, material: Material) -> bool {
        self.materials.contains(&material)
    }
}
