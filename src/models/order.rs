use serde::{Deserialize, Serialize};

/// Small / medium / large quantities of one concession product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct SizeCounts(pub [u32; 3]);

impl SizeCounts {
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// Бэкенд присылает массив; недостающие размеры считаем нулями.
impl From<Vec<u32>> for SizeCounts {
    fn from(values: Vec<u32>) -> Self {
        let mut counts = [0; 3];
        for (slot, value) in counts.iter_mut().zip(values) {
            *slot = value;
        }
        SizeCounts(counts)
    }
}

impl From<SizeCounts> for Vec<u32> {
    fn from(counts: SizeCounts) -> Self {
        counts.0.to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned by the backend; anything sent on create is overwritten.
    #[serde(default)]
    pub id: i64,
    pub screening_id: i64,
    pub account_id: i64,
    pub tickets: u32,
    #[serde(default)]
    pub popcorn: SizeCounts,
    #[serde(default)]
    pub soda: SizeCounts,
    /// Seat labels such as `B4`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seats: Vec<String>,
}

impl Order {
    pub fn has_soda(&self) -> bool {
        !self.soda.is_empty()
    }

    pub fn has_popcorn(&self) -> bool {
        !self.popcorn.is_empty()
    }
}
