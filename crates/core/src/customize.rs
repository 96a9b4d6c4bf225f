//! Per-SKU customization engine.
//!
//! Each SKU maps onto one of a closed set of customization schemas
//! ([`SkuSchema`]); a per-product draft walks an explicit state machine
//! (`Uninitialized -> Draft -> Submitted`) with two editing sub-modes:
//! uniform (editing unit 0 writes through to every unit) and per-unit.
//! Validation is per schema; checkout may proceed only when every
//! customizable SKU group in the order validates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::order::CustomizationDetails;

/// Maximum length of an engraved title or phone field, in characters.
pub const MAX_ENGRAVING_LEN: usize = 13;

/// Default color for color-customizable units left untouched.
pub const DEFAULT_COLOR: &str = "white";

/// The closed set of customization schemas, selected by SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuSchema {
    /// Primary + secondary color choice; no field-level validation
    /// (the default color is a legitimate choice).
    ColorOnly,
    /// Engraved title, required and length-capped.
    EngravedTitle,
    /// Engraved title plus phone number, both required.
    EngravedTitlePhone,
    /// Up to three image URLs; structural validation only.
    ImageSet,
    /// Unknown or unmapped SKU: no customization step, always valid.
    None,
}

impl SkuSchema {
    pub fn for_sku(sku: &str) -> Self {
        match sku {
            "KCKR001" => SkuSchema::ColorOnly,
            "KCNP002" | "KCNP004" => SkuSchema::EngravedTitle,
            "KCNP003" => SkuSchema::EngravedTitlePhone,
            "LPSW007" => SkuSchema::ImageSet,
            _ => SkuSchema::None,
        }
    }

    /// Whether this schema presents a customization step at all.
    pub fn is_customizable(self) -> bool {
        !matches!(self, SkuSchema::None)
    }

    /// The blank/default unit value for this schema.
    pub fn default_unit(self) -> Option<UnitCustomization> {
        match self {
            SkuSchema::ColorOnly => Some(UnitCustomization::Color {
                color_primary: DEFAULT_COLOR.into(),
                color_secondary: DEFAULT_COLOR.into(),
            }),
            SkuSchema::EngravedTitle => Some(UnitCustomization::Title {
                title: String::new(),
            }),
            SkuSchema::EngravedTitlePhone => Some(UnitCustomization::TitlePhone {
                title: String::new(),
                phone: String::new(),
            }),
            SkuSchema::ImageSet => Some(UnitCustomization::Images {
                image_url1: String::new(),
                image_url2: String::new(),
                image_url3: String::new(),
            }),
            SkuSchema::None => None,
        }
    }

    /// Whether `unit` has the shape this schema expects.
    fn accepts(self, unit: &UnitCustomization) -> bool {
        matches!(
            (self, unit),
            (SkuSchema::ColorOnly, UnitCustomization::Color { .. })
                | (SkuSchema::EngravedTitle, UnitCustomization::Title { .. })
                | (
                    SkuSchema::EngravedTitlePhone,
                    UnitCustomization::TitlePhone { .. }
                )
                | (SkuSchema::ImageSet, UnitCustomization::Images { .. })
        )
    }

    /// Field-level validation for one unit.
    fn unit_is_valid(self, unit: &UnitCustomization) -> bool {
        if !self.accepts(unit) {
            return false;
        }
        match unit {
            UnitCustomization::Title { title } => engraving_ok(title),
            UnitCustomization::TitlePhone { title, phone } => {
                engraving_ok(title) && engraving_ok(phone)
            }
            // Colors and images may legitimately be left at their defaults.
            UnitCustomization::Color { .. } | UnitCustomization::Images { .. } => true,
        }
    }
}

fn engraving_ok(field: &str) -> bool {
    let trimmed = field.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_ENGRAVING_LEN
}

/// The customization value for a single unit of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UnitCustomization {
    Color {
        color_primary: String,
        color_secondary: String,
    },
    Title {
        title: String,
    },
    TitlePhone {
        title: String,
        phone: String,
    },
    Images {
        image_url1: String,
        image_url2: String,
        image_url3: String,
    },
}

/// A labelled unit inside a [`CustomizationEntry`]. Labels are `#1..#N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationUnit {
    pub unit_label: String,
    #[serde(flatten)]
    pub value: UnitCustomization,
}

/// A completed customization payload for one product in one order.
/// Invariant: `units.len()` equals the ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationEntry {
    pub link_id: String,
    pub sku: String,
    pub units: Vec<CustomizationUnit>,
}

/// Validation predicate for a submitted entry, by SKU.
///
/// Unknown SKUs are always valid (no customization required). Title-bearing
/// schemas require every unit's title (and phone, where applicable) to be
/// non-blank after trimming and at most [`MAX_ENGRAVING_LEN`] characters.
pub fn is_valid_for_sku(sku: &str, units: &[UnitCustomization]) -> bool {
    let schema = SkuSchema::for_sku(sku);
    if !schema.is_customizable() {
        return true;
    }
    units.iter().all(|u| schema.unit_is_valid(u))
}

/// Editing sub-mode of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomizeMode {
    /// Editing unit 0 writes through to every unit.
    #[default]
    Uniform,
    /// Each unit is edited independently (explicit opt-in).
    PerUnit,
}

/// In-progress customization for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    link_id: String,
    sku: String,
    schema: SkuSchema,
    mode: CustomizeMode,
    units: Vec<UnitCustomization>,
}

impl ProductDraft {
    /// Create a draft sized to `quantity`, seeded from a previously saved
    /// entry when one exists with a matching unit count (supports
    /// navigating back without data loss).
    pub fn new(
        link_id: &str,
        sku: &str,
        quantity: u32,
        prior: Option<&CustomizationEntry>,
    ) -> Result<Self, CoreError> {
        let schema = SkuSchema::for_sku(sku);
        let Some(blank) = schema.default_unit() else {
            return Err(CoreError::Validation(format!(
                "SKU {sku} does not support customization"
            )));
        };
        if quantity == 0 {
            return Err(CoreError::Validation(
                "Quantity must be at least 1".into(),
            ));
        }

        let units = match prior {
            Some(entry) if entry.units.len() == quantity as usize => entry
                .units
                .iter()
                .map(|u| u.value.clone())
                .collect(),
            _ => vec![blank; quantity as usize],
        };

        Ok(Self {
            link_id: link_id.to_string(),
            sku: sku.to_string(),
            schema,
            mode: CustomizeMode::Uniform,
            units,
        })
    }

    pub fn mode(&self) -> CustomizeMode {
        self.mode
    }

    pub fn units(&self) -> &[UnitCustomization] {
        &self.units
    }

    /// Switch editing modes.
    ///
    /// Opting into per-unit editing preserves the existing values; opting
    /// back out re-propagates unit 0 to every unit so the draft is again
    /// internally uniform.
    pub fn set_mode(&mut self, mode: CustomizeMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == CustomizeMode::Uniform {
            if let Some(first) = self.units.first().cloned() {
                for unit in &mut self.units[1..] {
                    *unit = first.clone();
                }
            }
        }
    }

    /// Write a value into the draft.
    ///
    /// In uniform mode only unit 0 is editable and the value writes
    /// through to every unit; in per-unit mode any index is editable
    /// independently.
    pub fn set_unit(&mut self, index: usize, value: UnitCustomization) -> Result<(), CoreError> {
        if !self.schema.accepts(&value) {
            return Err(CoreError::Validation(format!(
                "Customization value does not match the schema for SKU {}",
                self.sku
            )));
        }
        if index >= self.units.len() {
            return Err(CoreError::Validation(format!(
                "Unit index {index} out of range for quantity {}",
                self.units.len()
            )));
        }
        match self.mode {
            CustomizeMode::Uniform => {
                if index != 0 {
                    return Err(CoreError::Validation(
                        "Only unit 0 is editable in uniform mode".into(),
                    ));
                }
                for unit in &mut self.units {
                    *unit = value.clone();
                }
            }
            CustomizeMode::PerUnit => {
                self.units[index] = value;
            }
        }
        Ok(())
    }

    /// Whether the draft currently passes its schema validation.
    pub fn is_valid(&self) -> bool {
        self.units.iter().all(|u| self.schema.unit_is_valid(u))
    }

    fn to_entry(&self) -> CustomizationEntry {
        CustomizationEntry {
            link_id: self.link_id.clone(),
            sku: self.sku.clone(),
            units: self
                .units
                .iter()
                .enumerate()
                .map(|(i, value)| CustomizationUnit {
                    unit_label: format!("#{}", i + 1),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Per-product draft state. Keyed by product id in [`CustomizationFlow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    /// Quantity not yet known; no draft allocated.
    Uninitialized,
    Draft(ProductDraft),
    /// The engine has handed a completed entry to the orchestrator.
    Submitted(CustomizationEntry),
}

/// The customization step for one checkout session: a map of per-product
/// draft states plus the readiness predicate gating the next step.
///
/// The flow owns its drafts; callers mutate through the methods here and
/// never share the map (message-passing style, no global state).
#[derive(Debug, Clone)]
pub struct CustomizationFlow {
    link_id: String,
    states: BTreeMap<String, DraftState>,
}

impl CustomizationFlow {
    pub fn new(link_id: &str) -> Self {
        Self {
            link_id: link_id.to_string(),
            states: BTreeMap::new(),
        }
    }

    /// Register a customizable product before its quantity is known. The
    /// product blocks readiness until [`Self::init_product`] runs.
    pub fn register_product(&mut self, product_id: &str, sku: &str) {
        if !SkuSchema::for_sku(sku).is_customizable() {
            return;
        }
        self.states
            .entry(product_id.to_string())
            .or_insert(DraftState::Uninitialized);
    }

    /// Transition a product `Uninitialized -> Draft` once its quantity is
    /// known. A previously submitted entry seeds the new draft; an existing
    /// draft is left untouched.
    pub fn init_product(
        &mut self,
        product_id: &str,
        sku: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if !SkuSchema::for_sku(sku).is_customizable() {
            return Ok(());
        }
        let prior = match self.states.get(product_id) {
            Some(DraftState::Draft(_)) => return Ok(()),
            Some(DraftState::Submitted(entry)) => Some(entry.clone()),
            _ => None,
        };
        let draft = ProductDraft::new(&self.link_id, sku, quantity, prior.as_ref())?;
        self.states
            .insert(product_id.to_string(), DraftState::Draft(draft));
        Ok(())
    }

    pub fn draft_mut(&mut self, product_id: &str) -> Option<&mut ProductDraft> {
        match self.states.get_mut(product_id) {
            Some(DraftState::Draft(draft)) => Some(draft),
            _ => None,
        }
    }

    /// Transition `Draft -> Submitted`, validating the draft first.
    pub fn submit(&mut self, product_id: &str) -> Result<&CustomizationEntry, CoreError> {
        let state = self.states.get_mut(product_id).ok_or_else(|| {
            CoreError::Validation(format!("No customization draft for product {product_id}"))
        })?;
        match state {
            DraftState::Draft(draft) => {
                if !draft.is_valid() {
                    return Err(CoreError::Validation(format!(
                        "Customization for product {product_id} is incomplete"
                    )));
                }
                *state = DraftState::Submitted(draft.to_entry());
            }
            DraftState::Submitted(_) => {}
            DraftState::Uninitialized => {
                return Err(CoreError::Validation(format!(
                    "Customization for product {product_id} was never started"
                )));
            }
        }
        match state {
            DraftState::Submitted(entry) => Ok(entry),
            _ => unreachable!("state was just set to Submitted"),
        }
    }

    /// Checkout-readiness: every customizable SKU group must independently
    /// validate. Products without a customizable SKU never block.
    pub fn ready(&self) -> bool {
        self.states.values().all(|state| match state {
            DraftState::Uninitialized => false,
            DraftState::Draft(draft) => draft.is_valid(),
            DraftState::Submitted(_) => true,
        })
    }

    /// Collapse the flow into the mapping persisted on the order record.
    /// Unsubmitted-but-valid drafts are submitted on the way out.
    pub fn into_details(mut self) -> Result<CustomizationDetails, CoreError> {
        let ids: Vec<String> = self.states.keys().cloned().collect();
        let mut details = CustomizationDetails::new();
        for id in ids {
            self.submit(&id)?;
            if let Some(DraftState::Submitted(entry)) = self.states.remove(&id) {
                details.insert(id, entry);
            }
        }
        Ok(details)
    }
}
