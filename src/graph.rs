//! Preference graph: a star from the user node to every surviving café.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::cost::preference_delta;
use crate::dataset::{Cafe, DatasetSnapshot};
use crate::filters::{OneOrMany, PreferenceFilters};
use crate::haversine::haversine_km;
use crate::hours::is_open;

pub type NodeId = i64;

/// Reserved identifier of the synthetic user node.
pub const USER_NODE_ID: NodeId = 0;

/// Weighted directed graph keyed by node id.
///
/// `nodes` keeps insertion order, which downstream ranking uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    adjacency: HashMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if not already present.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.adjacency.contains_key(&node) {
            self.nodes.push(node);
            self.adjacency.insert(node, BTreeMap::new());
        }
    }

    /// Adds or replaces the edge `from -> to`, creating missing endpoints.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.add_node(from);
        self.add_node(to);
        if let Some(neighbours) = self.adjacency.get_mut(&from) {
            neighbours.insert(to, weight);
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().map(|(&to, &weight)| (to, weight)))
    }

    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    /// All `(from, to, weight)` triples in node order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId, f64)> {
        self.nodes
            .iter()
            .flat_map(|&from| self.neighbours(from).map(move |(to, weight)| (from, to, weight)))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Whether a negative edge leaves any node other than `source`.
    ///
    /// Priority-queue search from `source` is exact as long as this is false.
    pub fn has_negative_edge_beyond(&self, source: NodeId) -> bool {
        self.adjacency
            .iter()
            .filter(|(from, _)| **from != source)
            .any(|(_, neighbours)| neighbours.values().any(|weight| *weight < 0.0))
    }
}

/// A built preference graph together with its user node.
#[derive(Debug, Clone)]
pub struct PreferenceGraph {
    pub graph: Graph,
    pub user_node: NodeId,
}

/// Why a café did not make it into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingTag,
    TooFar,
    Closed,
    Price,
    DrinkCategory,
    ProductType,
}

/// Build the star graph for a user location.
///
/// Hard filters run in a fixed order and drop the café on the first miss.
/// Each survivor gets one edge from the user node weighted by haversine
/// distance plus its preference delta.
pub fn build_preference_graph(
    snapshot: &DatasetSnapshot,
    user_location: (f64, f64),
    filters: &PreferenceFilters,
    now: NaiveDateTime,
) -> PreferenceGraph {
    let mut graph = Graph::new();
    graph.add_node(USER_NODE_ID);

    let mut missing_coordinates = 0usize;
    let mut rejected = 0usize;

    for cafe in snapshot.cafes() {
        let Some(location) = cafe.coordinates() else {
            missing_coordinates += 1;
            continue;
        };

        let distance = haversine_km(user_location, location);
        if let Err(reason) = passes_hard_filters(snapshot, cafe, distance, filters, now) {
            debug!(cafe_id = cafe.id, ?reason, "cafe excluded by hard filter");
            rejected += 1;
            continue;
        }

        let delta = preference_delta(snapshot, cafe.id, filters);
        graph.add_edge(USER_NODE_ID, cafe.id, distance + delta);
    }

    debug!(
        candidates = snapshot.cafes().len(),
        missing_coordinates,
        rejected,
        edges = graph.edge_count(),
        "preference graph built"
    );

    PreferenceGraph {
        graph,
        user_node: USER_NODE_ID,
    }
}

fn passes_hard_filters(
    snapshot: &DatasetSnapshot,
    cafe: &Cafe,
    distance: f64,
    filters: &PreferenceFilters,
    now: NaiveDateTime,
) -> Result<(), Rejection> {
    if filters.requires_tag_record() {
        let Some(tags) = snapshot.tags(cafe.id) else {
            return Err(Rejection::MissingTag);
        };
        let required = [
            (filters.wifi, tags.wifi),
            (filters.terrace, tags.terrace),
            (filters.power_outlets, tags.power_outlets),
        ];
        if required
            .iter()
            .any(|&(wanted, present)| PreferenceFilters::requires(wanted) && !present)
        {
            return Err(Rejection::MissingTag);
        }
    }

    if let Some(max_km) = filters.max_distance_km {
        if distance > max_km {
            return Err(Rejection::TooFar);
        }
    }

    if PreferenceFilters::requires(filters.open_now)
        && !is_open(snapshot.hours_for(cafe.id), now.weekday(), now.time())
    {
        return Err(Rejection::Closed);
    }

    if let Some(prices) = &filters.price {
        let product_prices = snapshot.products_for(cafe.id).map(|p| p.price.as_deref());
        let drink_prices = snapshot.drinks_for(cafe.id).map(|d| d.price.as_deref());
        if !any_matches(prices, product_prices.chain(drink_prices)) {
            return Err(Rejection::Price);
        }
    }

    if let Some(categories) = &filters.drink_category {
        if !any_matches(categories, snapshot.drinks_for(cafe.id).map(|d| d.category.as_deref())) {
            return Err(Rejection::DrinkCategory);
        }
    }

    if let Some(kinds) = &filters.product_type {
        if !any_matches(kinds, snapshot.products_for(cafe.id).map(|p| p.kind.as_deref())) {
            return Err(Rejection::ProductType);
        }
    }

    Ok(())
}

fn any_matches<'a>(wanted: &OneOrMany, mut values: impl Iterator<Item = Option<&'a str>>) -> bool {
    values.any(|value| value.is_some_and(|value| wanted.matches(value)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::dataset::{
        CafeDrinkRow, CafeProductRow, CafeRow, DrinkRow, HoursRow, ProductRow, TagRow,
    };

    fn monday_noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 12)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn cafe(id: i64, lat: f64, lng: f64) -> CafeRow {
        CafeRow {
            cafe_id: id,
            name: format!("Café {}", id),
            latitude: Some((lat * 1e7) as i64),
            longitude: Some((lng * 1e7) as i64),
        }
    }

    fn tags(id: i64, wifi: &str) -> TagRow {
        TagRow {
            cafe_id: id,
            wifi: Some(wifi.to_string()),
            ..TagRow::default()
        }
    }

    #[test]
    fn test_graph_edges_and_weights() {
        let mut graph = Graph::new();
        graph.add_edge(0, 1, 2.5);
        graph.add_edge(0, 2, -1.0);
        graph.add_node(0);

        assert_eq!(graph.nodes(), &[0, 1, 2]);
        assert_eq!(graph.weight(0, 2), Some(-1.0));
        assert_eq!(graph.weight(1, 0), None);
        assert_eq!(graph.edges(), vec![(0, 1, 2.5), (0, 2, -1.0)]);
        assert!(!graph.has_negative_edge_beyond(0));

        graph.add_edge(1, 2, -0.5);
        assert!(graph.has_negative_edge_beyond(0));
    }

    #[test]
    fn test_star_from_user_node() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 1.0))
            .cafe(cafe(2, 0.0, 0.5))
            .build();

        let built = build_preference_graph(&snapshot, (0.0, 0.0), &PreferenceFilters::default(), monday_noon());
        assert_eq!(built.user_node, USER_NODE_ID);
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1, 2]);
        assert_eq!(built.graph.edge_count(), 2);
        assert_eq!(built.graph.neighbours(1).count(), 0, "cafés have no outgoing edges");
        let weight = built.graph.weight(USER_NODE_ID, 1).unwrap();
        assert!((weight - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_missing_coordinates_are_skipped() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(CafeRow {
                cafe_id: 1,
                name: "Sin ubicación".to_string(),
                latitude: None,
                longitude: Some(0),
            })
            .build();
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &PreferenceFilters::default(), monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID]);
        assert_eq!(built.graph.edge_count(), 0);
    }

    #[test]
    fn test_required_tags_exclude_untagged_and_false() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 0.1))
            .cafe(cafe(2, 0.0, 0.2))
            .cafe(cafe(3, 0.0, 0.3))
            .tags(tags(1, "sí"))
            .tags(tags(2, "no"))
            .build();
        let filters = PreferenceFilters {
            wifi: Some(true),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &filters, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1]);
    }

    #[test]
    fn test_pet_friendly_requires_a_tag_record_only() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 0.1))
            .cafe(cafe(2, 0.0, 0.2))
            .tags(tags(1, "no"))
            .build();
        let filters = PreferenceFilters {
            pet_friendly: Some(true),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &filters, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1]);
        let weight = built.graph.weight(USER_NODE_ID, 1).unwrap();
        assert!((weight - (haversine_km((0.0, 0.0), (0.0, 0.1)) + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_max_distance() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 0.01))
            .cafe(cafe(2, 0.0, 0.5))
            .build();
        let filters = PreferenceFilters {
            max_distance_km: Some(5.0),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &filters, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1]);
    }

    #[test]
    fn test_open_now() {
        let hours = |id: i64, day: &str, opens: &str, closes: &str| HoursRow {
            cafe_id: id,
            dia: day.to_string(),
            apertura: opens.to_string(),
            cierre: closes.to_string(),
        };
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 0.1))
            .cafe(cafe(2, 0.0, 0.2))
            .cafe(cafe(3, 0.0, 0.3))
            .cafe(cafe(4, 0.0, 0.4))
            .hours(hours(1, "Lunes", "08:00", "20:00"))
            .hours(hours(2, "lunes", "14:00", "20:00"))
            .hours(hours(3, "Martes", "14:00", "20:00"))
            .build();
        let filters = PreferenceFilters {
            open_now: Some(true),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &filters, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1, 3, 4]);
    }

    #[test]
    fn test_catalog_membership_filters() {
        let snapshot = DatasetSnapshot::builder()
            .cafe(cafe(1, 0.0, 0.1))
            .cafe(cafe(2, 0.0, 0.2))
            .product(ProductRow {
                product_id: 10,
                tipo: Some("Postre".to_string()),
                precio: Some("medio".to_string()),
                vegano: None,
            })
            .drink(DrinkRow {
                drink_id: 20,
                categoria: Some("Espresso".to_string()),
                precio: Some("bajo".to_string()),
                vegano: None,
            })
            .cafe_product(CafeProductRow { cafe_id: 1, product_id: 10 })
            .cafe_drink(CafeDrinkRow { cafe_id: 1, drink_id: 20 })
            .cafe_drink(CafeDrinkRow { cafe_id: 2, drink_id: 20 })
            .build();

        let by_price = PreferenceFilters {
            price: Some(OneOrMany::One("Medio".to_string())),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &by_price, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1]);

        let by_drink = PreferenceFilters {
            drink_category: Some(OneOrMany::Many(vec!["latte".to_string(), "espresso".to_string()])),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &by_drink, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID, 1, 2]);

        let by_product = PreferenceFilters {
            product_type: Some(OneOrMany::One("sándwich".to_string())),
            ..PreferenceFilters::default()
        };
        let built = build_preference_graph(&snapshot, (0.0, 0.0), &by_product, monday_noon());
        assert_eq!(built.graph.nodes(), &[USER_NODE_ID]);
    }
}
