use std::fmt;
use std::str::FromStr;

use crate::models::SizeCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Popcorn,
    Soda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    fn index(self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownChoice {
    kind: &'static str,
    value: String,
}

impl FromStr for Product {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popcorn" => Ok(Product::Popcorn),
            "soda" | "sodas" => Ok(Product::Soda),
            _ => Err(UnknownChoice { kind: "product", value: s.to_string() }),
        }
    }
}

impl FromStr for Size {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "small" => Ok(Size::Small),
            "m" | "medium" => Ok(Size::Medium),
            "l" | "large" => Ok(Size::Large),
            _ => Err(UnknownChoice { kind: "size", value: s.to_string() }),
        }
    }
}

/// Popcorn and soda counters, one per size. Counters never drop below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Concessions {
    popcorn: SizeCounts,
    soda: SizeCounts,
}

impl Concessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn counts_mut(&mut self, product: Product) -> &mut SizeCounts {
        match product {
            Product::Popcorn => &mut self.popcorn,
            Product::Soda => &mut self.soda,
        }
    }

    pub fn add(&mut self, product: Product, size: Size) -> u32 {
        let slot = &mut self.counts_mut(product).0[size.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn remove(&mut self, product: Product, size: Size) -> u32 {
        let slot = &mut self.counts_mut(product).0[size.index()];
        *slot = slot.saturating_sub(1);
        *slot
    }

    pub fn count(&self, product: Product, size: Size) -> u32 {
        self.counts(product).0[size.index()]
    }

    pub fn counts(&self, product: Product) -> SizeCounts {
        match product {
            Product::Popcorn => self.popcorn,
            Product::Soda => self.soda,
        }
    }

    /// Back to nothing, as the cancel button does.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Concessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [ps, pm, pl] = self.popcorn.0;
        let [ss, sm, sl] = self.soda.0;
        write!(f, "popcorn S{} M{} L{} | soda S{} M{} L{}", ps, pm, pl, ss, sm, sl)
    }
}
