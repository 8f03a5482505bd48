//! Static mapping from marketplace category identifiers to the seven
//! product groups used for report grouping and diversity scoring.
//!
//! The assignment is a fixed editorial list maintained alongside the
//! elasticity extracts, not derived from the data.

use std::fmt;

use serde::Serialize;

/// Top-level product group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ProductGroup {
    Furniture,
    Electronics,
    HealthBeauty,
    HomeKitchen,
    SportsLeisure,
    Fashion,
    FoodOther,
}

impl fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductGroup::Furniture => write!(f, "Furniture"),
            ProductGroup::Electronics => write!(f, "Electronics/IT"),
            ProductGroup::HealthBeauty => write!(f, "Health/Beauty"),
            ProductGroup::HomeKitchen => write!(f, "Home/Kitchen"),
            ProductGroup::SportsLeisure => write!(f, "Sports/Leisure"),
            ProductGroup::Fashion => write!(f, "Fashion/Apparel"),
            ProductGroup::FoodOther => write!(f, "Food/Other"),
        }
    }
}

/// Group for a category identifier. Unknown categories map to `None`
/// rather than a catch-all, so new categories are visible instead of
/// silently misfiled.
pub fn group_for_category(category: &str) -> Option<ProductGroup> {
    use ProductGroup::*;
    let group = match category {
        "furniture_decor" | "bed_bath_table" | "office_furniture"
        | "kitchen_dining_laundry_garden_furniture" | "furniture_living_room"
        | "furniture_bedroom" | "furniture_mattress_and_pillow" => Furniture,

        "telephony" | "computers_accessories" | "electronics" | "consoles_games"
        | "air_conditioning" | "audio" | "tablets_printing_image" | "fixed_telephony"
        | "small_appliances_home_oven_and_coffee" => Electronics,

        "health_beauty" | "perfumery" | "baby" | "diapers_and_hygiene" => HealthBeauty,

        "housewares" | "home_confectionery" | "home_construction" | "garden_tools"
        | "pet_shop" | "cool_stuff" | "luggage_accessories" | "home_appliances"
        | "home_appliances_2" | "flowers" | "kitchen_laptops_and_food_preparation"
        | "small_appliances" => HomeKitchen,

        "sports_leisure" | "musical_instruments" | "books_general_interest"
        | "books_technical" | "books_imported" | "toys" | "party_supplies" | "art"
        | "arts_and_craftsmanship" => SportsLeisure,

        "watches_sun_glass" | "fashion_bags_accessories" | "fashion_shoes"
        | "fashion_underwear_beach" | "fashion_male_clothing" | "fashion_female_clothing"
        | "fashion_childrens_clothes" | "fashion_sport" => Fashion,

        "food_drink" | "food" | "drinks" | "market_place" | "agro_industry_and_commerce"
        | "industry_commerce_and_business" | "construction_tools_construction"
        | "construction_tools_safety" | "construction_tools_lights"
        | "costruction_tools_garden" | "costruction_tools_tools"
        | "signaling_and_security" | "security_and_services" | "christmas_supplies" => FoodOther,

        _ => return None,
    };
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve() {
        assert_eq!(group_for_category("bed_bath_table"), Some(ProductGroup::Furniture));
        assert_eq!(group_for_category("telephony"), Some(ProductGroup::Electronics));
        assert_eq!(group_for_category("perfumery"), Some(ProductGroup::HealthBeauty));
        assert_eq!(group_for_category("garden_tools"), Some(ProductGroup::HomeKitchen));
        assert_eq!(group_for_category("toys"), Some(ProductGroup::SportsLeisure));
        assert_eq!(group_for_category("fashion_shoes"), Some(ProductGroup::Fashion));
        assert_eq!(group_for_category("food_drink"), Some(ProductGroup::FoodOther));
    }

    #[test]
    fn unknown_category_is_none() {
        assert_eq!(group_for_category("quantum_widgets"), None);
        assert_eq!(group_for_category(""), None);
    }
}
