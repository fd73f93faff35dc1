//! Attribute taxonomy and classifier configuration.

use crate::error::ModelError;

/// How an attribute is summarized and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Numeric-valued, summarized by its arithmetic mean.
    Continuous,
    /// String-valued, summarized by an empirical frequency table.
    Categorical,
}

/// A named attribute with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create a continuous attribute.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: AttributeKind::Continuous }
    }

    /// Create a categorical attribute.
    pub fn categorical(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: AttributeKind::Categorical }
    }

    /// Return the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the attribute kind.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }
}

/// The fixed attribute set used by every pipeline component, plus the
/// name of the numeric label field.
///
/// This is configuration, not data: one `Schema` is built per run and
/// passed by reference everywhere. Iteration order is the declaration
/// order and is stable across the whole pipeline.
#[derive(Debug, Clone)]
pub struct Schema {
    attributes: Vec<Attribute>,
    label: String,
}

impl Schema {
    /// Build a schema from an attribute list and a label field name.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`ModelError::EmptySchema`] | `attributes` is empty |
    /// | [`ModelError::DuplicateAttribute`] | two attributes share a name, or the label name collides with an attribute |
    pub fn new(attributes: Vec<Attribute>, label: impl Into<String>) -> Result<Self, ModelError> {
        let label = label.into();
        if attributes.is_empty() {
            return Err(ModelError::EmptySchema);
        }
        for (i, attr) in attributes.iter().enumerate() {
            if attr.name == label {
                return Err(ModelError::DuplicateAttribute { name: label });
            }
            if attributes[..i].iter().any(|a| a.name == attr.name) {
                return Err(ModelError::DuplicateAttribute { name: attr.name.clone() });
            }
        }
        Ok(Self { attributes, label })
    }

    /// The county vaccination schema: four continuous demographic
    /// attributes, one categorical vulnerability index, labeled by
    /// vaccination rate.
    #[must_use]
    pub fn vaccination() -> Self {
        Self {
            attributes: vec![
                Attribute::continuous("Population-Density"),
                Attribute::continuous("Percent-Over-65"),
                Attribute::continuous("Income"),
                Attribute::continuous("Percent-Attend-College"),
                Attribute::categorical("Social Vulnerability Index"),
            ],
            label: "Vax-Rate".to_string(),
        }
    }

    /// Return the attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Return the label field name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Configuration for one classification run.
///
/// Construct via [`ClassifierConfig::new`], then chain `with_*` methods.
/// The default schema is [`Schema::vaccination`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    threshold: f64,
    schema: Schema,
}

impl ClassifierConfig {
    /// Create a config with the given classification threshold.
    ///
    /// Records with label strictly above the threshold belong to the
    /// high class; all others to the low class.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidThreshold`] if `threshold` is NaN
    /// or infinite.
    pub fn new(threshold: f64) -> Result<Self, ModelError> {
        if !threshold.is_finite() {
            return Err(ModelError::InvalidThreshold { threshold });
        }
        Ok(Self { threshold, schema: Schema::vaccination() })
    }

    /// Replace the default schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Return the classification threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Render the threshold for prediction labels.
    ///
    /// Integer-valued thresholds render without a decimal point, so the
    /// default 55.0 yields labels `<=55%` and `>55%`.
    #[must_use]
    pub fn threshold_text(&self) -> String {
        if self.threshold.fract() == 0.0 {
            format!("{}", self.threshold as i64)
        } else {
            format!("{}", self.threshold)
        }
    }
}
