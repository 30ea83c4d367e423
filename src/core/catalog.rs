use super::types::{CityProfile, StrategyVariant};

pub static STRATEGIES: &[StrategyVariant] = &[
    StrategyVariant {
        id: "lean",
        display_name: "Lean FIRE",
        description: "Minimal expenses, frugal lifestyle",
        multiplier: 25.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "coast",
        display_name: "Coast FIRE",
        description: "Enough saved to coast to traditional retirement",
        multiplier: 25.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "barista",
        display_name: "Barista FIRE",
        description: "Part-time work covers partial expenses",
        multiplier: 15.0,
        income_coverage_ratio: Some(0.4),
    },
    StrategyVariant {
        id: "chubby",
        display_name: "Chubby FIRE",
        description: "Comfortable lifestyle with some luxuries",
        multiplier: 30.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "fat",
        display_name: "Fat FIRE",
        description: "Luxurious lifestyle, high expenses",
        multiplier: 35.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "flamingo",
        display_name: "Flamingo FIRE",
        description: "Single person optimized approach",
        multiplier: 22.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "geo",
        display_name: "Geo FIRE",
        description: "Retire in lower cost-of-living area",
        multiplier: 20.0,
        income_coverage_ratio: None,
    },
    StrategyVariant {
        id: "hobby",
        display_name: "Hobby FIRE",
        description: "Monetize hobbies for partial income",
        multiplier: 18.0,
        income_coverage_ratio: Some(0.3),
    },
];

// Multipliers are relative to Mumbai.
pub static CITIES: &[CityProfile] = &[
    CityProfile {
        id: "mumbai",
        display_name: "Mumbai",
        region: "Maharashtra",
        cost_multiplier: 1.0,
        average_rent: 35_000.0,
        average_utilities: 3_500.0,
        average_food: 12_000.0,
        average_transport: 4_000.0,
    },
    CityProfile {
        id: "bangalore",
        display_name: "Bangalore",
        region: "Karnataka",
        cost_multiplier: 0.85,
        average_rent: 25_000.0,
        average_utilities: 3_000.0,
        average_food: 10_000.0,
        average_transport: 3_500.0,
    },
    CityProfile {
        id: "delhi",
        display_name: "Delhi",
        region: "Delhi",
        cost_multiplier: 0.9,
        average_rent: 28_000.0,
        average_utilities: 3_200.0,
        average_food: 11_000.0,
        average_transport: 3_800.0,
    },
    CityProfile {
        id: "pune",
        display_name: "Pune",
        region: "Maharashtra",
        cost_multiplier: 0.7,
        average_rent: 18_000.0,
        average_utilities: 2_500.0,
        average_food: 8_500.0,
        average_transport: 3_000.0,
    },
    CityProfile {
        id: "goa",
        display_name: "Goa",
        region: "Goa",
        cost_multiplier: 0.6,
        average_rent: 15_000.0,
        average_utilities: 2_200.0,
        average_food: 7_500.0,
        average_transport: 2_500.0,
    },
    CityProfile {
        id: "kochi",
        display_name: "Kochi",
        region: "Kerala",
        cost_multiplier: 0.55,
        average_rent: 12_000.0,
        average_utilities: 2_000.0,
        average_food: 7_000.0,
        average_transport: 2_200.0,
    },
    CityProfile {
        id: "jaipur",
        display_name: "Jaipur",
        region: "Rajasthan",
        cost_multiplier: 0.5,
        average_rent: 10_000.0,
        average_utilities: 1_800.0,
        average_food: 6_500.0,
        average_transport: 2_000.0,
    },
    CityProfile {
        id: "bhubaneswar",
        display_name: "Bhubaneswar",
        region: "Odisha",
        cost_multiplier: 0.45,
        average_rent: 8_000.0,
        average_utilities: 1_500.0,
        average_food: 5_500.0,
        average_transport: 1_800.0,
    },
];

pub fn strategy_by_id(id: &str) -> Option<&'static StrategyVariant> {
    STRATEGIES.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

pub fn city_by_id(id: &str) -> Option<&'static CityProfile> {
    CITIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
