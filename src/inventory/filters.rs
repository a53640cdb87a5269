//! List filters for units, plots and sellers.
//!
//! Every criterion may be absent or the sentinel `"all"`, meaning no
//! constraint. Supplied criteria are ANDed. Search is a case-insensitive
//! substring match over each item's text fields.

use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer};

use super::models::{Facing, OccupancyStatus, Plot, Seller, SellerStatus, Unit};
use crate::auth::Role;

/// Sentinel value meaning "no constraint"
pub const ALL: &str = "all";

/// Single filter criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion<T> {
    Any,
    Is(T),
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Criterion::Any
    }
}

impl<T: PartialEq> Criterion<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Criterion::Any => true,
            Criterion::Is(expected) => expected == value,
        }
    }

    /// Match against an optional value; `None` only satisfies `Any`
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Criterion::Any, _) => true,
            (Criterion::Is(expected), Some(value)) => expected == value,
            (Criterion::Is(_), None) => false,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Criterion<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(Criterion::Any),
            Some(text) if text.eq_ignore_ascii_case(ALL) => Ok(Criterion::Any),
            Some(text) => {
                let inner: de::value::StrDeserializer<'_, de::value::Error> =
                    text.into_deserializer();
                T::deserialize(inner)
                    .map(Criterion::Is)
                    .map_err(de::Error::custom)
            }
        }
    }
}

/// Lowercased search needle; empty matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct SearchTerm(String);

impl From<String> for SearchTerm {
    fn from(raw: String) -> Self {
        SearchTerm(raw.trim().to_lowercase())
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        SearchTerm(raw.trim().to_lowercase())
    }
}

impl SearchTerm {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any field contains the term, ignoring case
    pub fn matches<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Predicate over list items
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Keep the items matching `filter`, preserving their order.
pub fn filter_items<'a, T, F>(items: impl IntoIterator<Item = &'a T>, filter: &F) -> Vec<T>
where
    T: Clone + 'a,
    F: Filter<T>,
{
    items
        .into_iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Unit list query: `?status=&type=&building_id=&search=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnitFilter {
    pub status: Criterion<OccupancyStatus>,
    #[serde(rename = "type")]
    pub unit_type: Criterion<String>,
    pub building_id: Criterion<uuid::Uuid>,
    pub search: SearchTerm,
}

impl Filter<Unit> for UnitFilter {
    fn matches(&self, unit: &Unit) -> bool {
        let buyer = unit.booking.as_ref();
        self.status.matches(&unit.status)
            && self.unit_type.matches_opt(unit.unit_type.as_ref())
            && self.building_id.matches(&unit.building_id)
            && self.search.matches(
                [
                    Some(unit.number.as_str()),
                    buyer.map(|b| b.buyer_name.as_str()),
                    buyer.map(|b| b.buyer_email.as_str()),
                ]
                .into_iter()
                .flatten(),
            )
    }
}

/// Plot list query: `?status=&facing=&search=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlotFilter {
    pub status: Criterion<OccupancyStatus>,
    pub facing: Criterion<Facing>,
    pub search: SearchTerm,
}

impl Filter<Plot> for PlotFilter {
    fn matches(&self, plot: &Plot) -> bool {
        self.status.matches(&plot.status)
            && self.facing.matches(&plot.facing)
            && self.search.matches(
                [Some(plot.plot_number.as_str()), plot.owner_name.as_deref()]
                    .into_iter()
                    .flatten(),
            )
    }
}

/// Seller list query: `?status=&role=&search=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SellerFilter {
    pub status: Criterion<SellerStatus>,
    pub role: Criterion<Role>,
    pub search: SearchTerm,
}

impl Filter<Seller> for SellerFilter {
    fn matches(&self, seller: &Seller) -> bool {
        self.status.matches(&seller.status)
            && self.role.matches(&seller.role)
            && self.search.matches([
                seller.full_name.as_str(),
                seller.email.as_str(),
                seller.username.as_str(),
            ])
    }
}
