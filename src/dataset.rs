//! Immutable café dataset snapshot.
//!
//! Raw rows arrive with coordinates scaled by 10^7 and yes/no strings for
//! boolean attributes. [`SnapshotBuilder`] normalizes them once; the built
//! [`DatasetSnapshot`] is read-only and shared by reference between requests.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{info, warn};

use crate::graph::USER_NODE_ID;
use crate::hours::OpeningHours;

pub type CafeId = i64;
pub type ProductId = i64;
pub type DrinkId = i64;

/// Fixed-point scale of stored coordinates.
pub const COORDINATE_SCALE: f64 = 1e7;

#[derive(Debug, Clone, Deserialize)]
pub struct CafeRow {
    pub cafe_id: CafeId,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<i64>,
    #[serde(default)]
    pub longitude: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagRow {
    pub cafe_id: CafeId,
    pub pet_friendly: Option<String>,
    pub wifi: Option<String>,
    pub enchufes: Option<String>,
    pub terraza: Option<String>,
    pub tipo_musica: Option<String>,
    pub iluminacion: Option<String>,
    pub estilo_decorativo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub product_id: ProductId,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub precio: Option<String>,
    #[serde(default)]
    pub vegano: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrinkRow {
    pub drink_id: DrinkId,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub precio: Option<String>,
    #[serde(default)]
    pub vegano: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CafeProductRow {
    pub cafe_id: CafeId,
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CafeDrinkRow {
    pub cafe_id: CafeId,
    pub drink_id: DrinkId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoursRow {
    pub cafe_id: CafeId,
    pub dia: String,
    pub apertura: String,
    pub cierre: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoffeeRow {
    pub cafe_id: CafeId,
    pub variedad: String,
}

/// A café point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Cafe {
    pub id: CafeId,
    pub name: String,
    latitude_e7: Option<i64>,
    longitude_e7: Option<i64>,
}

impl Cafe {
    /// Location in degrees, or `None` when either coordinate is missing.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude_e7, self.longitude_e7) {
            (Some(lat), Some(lng)) => {
                Some((lat as f64 / COORDINATE_SCALE, lng as f64 / COORDINATE_SCALE))
            }
            _ => None,
        }
    }
}

/// Normalized attribute tags of a café.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CafeTags {
    pub pet_friendly: bool,
    pub wifi: bool,
    pub power_outlets: bool,
    pub terrace: bool,
    pub music: Option<String>,
    pub lighting: Option<String>,
    pub decor_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub kind: Option<String>,
    pub price: Option<String>,
    pub vegan: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drink {
    pub id: DrinkId,
    pub category: Option<String>,
    pub price: Option<String>,
    pub vegan: bool,
}

/// Interpret a localized yes/no value. Only variants of "yes" are true.
pub fn parse_yes_no(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "sí" | "si" | "sì" | "yes" | "y" | "true" | "1"
    )
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(parse_yes_no)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read-only tables of cafés and their catalogs, indexed by café id.
#[derive(Debug, Default)]
pub struct DatasetSnapshot {
    cafes: Vec<Cafe>,
    cafe_index: HashMap<CafeId, usize>,
    tags: HashMap<CafeId, CafeTags>,
    products: HashMap<ProductId, Product>,
    drinks: HashMap<DrinkId, Drink>,
    cafe_products: HashMap<CafeId, Vec<ProductId>>,
    cafe_drinks: HashMap<CafeId, Vec<DrinkId>>,
    hours: HashMap<CafeId, Vec<OpeningHours>>,
    coffee_varieties: HashMap<CafeId, Vec<String>>,
}

impl DatasetSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Cafés in load order.
    pub fn cafes(&self) -> &[Cafe] {
        &self.cafes
    }

    pub fn cafe(&self, id: CafeId) -> Option<&Cafe> {
        self.cafe_index.get(&id).map(|&index| &self.cafes[index])
    }

    pub fn tags(&self, id: CafeId) -> Option<&CafeTags> {
        self.tags.get(&id)
    }

    /// Catalogued products served by a café. Dangling relation rows are skipped.
    pub fn products_for(&self, id: CafeId) -> impl Iterator<Item = &Product> + '_ {
        self.cafe_products
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|product_id| self.products.get(product_id))
    }

    /// Catalogued drinks served by a café. Dangling relation rows are skipped.
    pub fn drinks_for(&self, id: CafeId) -> impl Iterator<Item = &Drink> + '_ {
        self.cafe_drinks
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|drink_id| self.drinks.get(drink_id))
    }

    pub fn hours_for(&self, id: CafeId) -> &[OpeningHours] {
        self.hours.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn coffee_varieties(&self, id: CafeId) -> &[String] {
        self.coffee_varieties
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Collects raw rows and normalizes them into a [`DatasetSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: DatasetSnapshot,
    skipped_rows: usize,
}

impl SnapshotBuilder {
    pub fn cafe(mut self, row: CafeRow) -> Self {
        if row.cafe_id == USER_NODE_ID {
            warn!(cafe_id = row.cafe_id, "skipping cafe whose id is reserved for the user node");
            self.skipped_rows += 1;
            return self;
        }
        if self.snapshot.cafe_index.contains_key(&row.cafe_id) {
            warn!(cafe_id = row.cafe_id, "skipping duplicate cafe row");
            self.skipped_rows += 1;
            return self;
        }

        let index = self.snapshot.cafes.len();
        self.snapshot.cafe_index.insert(row.cafe_id, index);
        self.snapshot.cafes.push(Cafe {
            id: row.cafe_id,
            name: row.name,
            latitude_e7: row.latitude,
            longitude_e7: row.longitude,
        });
        self
    }

    pub fn tags(mut self, row: TagRow) -> Self {
        let tags = CafeTags {
            pet_friendly: flag(&row.pet_friendly),
            wifi: flag(&row.wifi),
            power_outlets: flag(&row.enchufes),
            terrace: flag(&row.terraza),
            music: non_blank(row.tipo_musica),
            lighting: non_blank(row.iluminacion),
            decor_style: non_blank(row.estilo_decorativo),
        };
        self.snapshot.tags.insert(row.cafe_id, tags);
        self
    }

    pub fn product(mut self, row: ProductRow) -> Self {
        let product = Product {
            id: row.product_id,
            kind: non_blank(row.tipo),
            price: non_blank(row.precio),
            vegan: flag(&row.vegano),
        };
        self.snapshot.products.insert(product.id, product);
        self
    }

    pub fn drink(mut self, row: DrinkRow) -> Self {
        let drink = Drink {
            id: row.drink_id,
            category: non_blank(row.categoria),
            price: non_blank(row.precio),
            vegan: flag(&row.vegano),
        };
        self.snapshot.drinks.insert(drink.id, drink);
        self
    }

    pub fn cafe_product(mut self, row: CafeProductRow) -> Self {
        self.snapshot
            .cafe_products
            .entry(row.cafe_id)
            .or_default()
            .push(row.product_id);
        self
    }

    pub fn cafe_drink(mut self, row: CafeDrinkRow) -> Self {
        self.snapshot
            .cafe_drinks
            .entry(row.cafe_id)
            .or_default()
            .push(row.drink_id);
        self
    }

    pub fn hours(mut self, row: HoursRow) -> Self {
        match OpeningHours::parse(&row.dia, &row.apertura, &row.cierre) {
            Some(hours) => self.snapshot.hours.entry(row.cafe_id).or_default().push(hours),
            None => {
                warn!(
                    cafe_id = row.cafe_id,
                    day = %row.dia,
                    opens = %row.apertura,
                    closes = %row.cierre,
                    "skipping unreadable opening-hours row"
                );
                self.skipped_rows += 1;
            }
        }
        self
    }

    pub fn coffee(mut self, row: CoffeeRow) -> Self {
        if let Some(variety) = non_blank(Some(row.variedad)) {
            self.snapshot
                .coffee_varieties
                .entry(row.cafe_id)
                .or_default()
                .push(variety);
        }
        self
    }

    pub fn build(self) -> DatasetSnapshot {
        info!(
            cafes = self.snapshot.cafes.len(),
            products = self.snapshot.products.len(),
            drinks = self.snapshot.drinks.len(),
            skipped_rows = self.skipped_rows,
            "dataset snapshot built"
        );
        self.snapshot
    }
}
