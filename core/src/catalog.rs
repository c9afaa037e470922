use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Result, bail};

use crate::models::{FoodRecord, validate_food_record};
use crate::nutrition;

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    records: builtin_foods(),
});

/// The fixed food list shipped with the tracker.
#[must_use]
pub fn builtin_foods() -> Vec<FoodRecord> {
    vec![
        FoodRecord::new(1, "Tavuk Göğsü (Izgara)", 165.0, 150.0),
        FoodRecord::new(2, "Pilav", 130.0, 200.0),
        FoodRecord::new(3, "Tam Buğday Ekmeği", 247.0, 50.0),
        FoodRecord::new(4, "Yoğurt", 61.0, 200.0),
        FoodRecord::new(5, "Taze Meyve Salatası", 50.0, 150.0),
        FoodRecord::new(6, "Ton Balığı", 184.0, 100.0),
        FoodRecord::new(7, "Mercimek Çorbası", 65.0, 300.0),
        FoodRecord::new(8, "Peynir (Beyaz)", 264.0, 30.0),
        FoodRecord::new(9, "Yumurta (Haşlanmış)", 155.0, 50.0),
        FoodRecord::new(10, "Zeytin", 115.0, 30.0),
    ]
}

/// Read-only set of food records. Order is preserved and is the order search
/// results come back in.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<FoodRecord>,
}

impl Catalog {
    pub fn new(records: Vec<FoodRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            validate_food_record(record)?;
            if !seen.insert(record.id) {
                bail!("Duplicate food id {} in catalog", record.id);
            }
        }
        tracing::debug!(records = records.len(), "catalog built");
        Ok(Self { records })
    }

    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    #[must_use]
    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&FoodRecord> {
        self.records.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&FoodRecord> {
        nutrition::search_records(&self.records, query)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin().clone()
    }
}
