//! Preference cost model.
//!
//! Turns soft preferences into a signed delta added to the raw distance of a
//! café. Negative deltas are discounts, positive ones penalties. Missing data
//! always takes the unmet branch.

use crate::dataset::{CafeId, CafeTags, DatasetSnapshot};
use crate::filters::{PreferenceFilters, same_text};

pub const PET_FRIENDLY_PENALTY: f64 = 5.0;
pub const MUSIC_MATCH_DISCOUNT: f64 = -1.0;
pub const LIGHTING_MATCH_DISCOUNT: f64 = -0.8;
pub const DECOR_MATCH_DISCOUNT: f64 = -0.8;
pub const VEGAN_MATCH_DISCOUNT: f64 = -1.5;
pub const VEGAN_MISSING_PENALTY: f64 = 5.0;
pub const COFFEE_VARIETY_DISCOUNT: f64 = -2.0;

/// Largest total discount a café can earn. Edge weights never drop below
/// `distance + MAX_TOTAL_DISCOUNT`.
pub const MAX_TOTAL_DISCOUNT: f64 = MUSIC_MATCH_DISCOUNT
    + LIGHTING_MATCH_DISCOUNT
    + DECOR_MATCH_DISCOUNT
    + VEGAN_MATCH_DISCOUNT
    + COFFEE_VARIETY_DISCOUNT;

/// Preference-cost delta for one café.
pub fn preference_delta(snapshot: &DatasetSnapshot, cafe_id: CafeId, filters: &PreferenceFilters) -> f64 {
    let tags = snapshot.tags(cafe_id);
    let mut delta = tag_delta(tags, filters);

    if PreferenceFilters::requires(filters.vegan) {
        if snapshot.products_for(cafe_id).any(|product| product.vegan) {
            delta += VEGAN_MATCH_DISCOUNT;
        } else {
            delta += VEGAN_MISSING_PENALTY;
        }
    }

    if let Some(variety) = filters.coffee_variety.as_deref() {
        if snapshot
            .coffee_varieties(cafe_id)
            .iter()
            .any(|served| same_text(served, variety))
        {
            delta += COFFEE_VARIETY_DISCOUNT;
        }
    }

    delta
}

fn tag_delta(tags: Option<&CafeTags>, filters: &PreferenceFilters) -> f64 {
    let mut delta = 0.0;

    if PreferenceFilters::requires(filters.pet_friendly) && !tags.is_some_and(|t| t.pet_friendly) {
        delta += PET_FRIENDLY_PENALTY;
    }

    let Some(tags) = tags else {
        return delta;
    };

    if text_matches(filters.music.as_deref(), tags.music.as_deref()) {
        delta += MUSIC_MATCH_DISCOUNT;
    }
    if text_matches(filters.lighting.as_deref(), tags.lighting.as_deref()) {
        delta += LIGHTING_MATCH_DISCOUNT;
    }
    if text_matches(filters.decor_style.as_deref(), tags.decor_style.as_deref()) {
        delta += DECOR_MATCH_DISCOUNT;
    }

    delta
}

fn text_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (Some(wanted), Some(actual)) => same_text(wanted, actual),
        _ => false,
    }
}
