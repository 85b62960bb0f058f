//! Fixed candidate pools the simulation draws from: known orders, the driver
//! pool, delivery windows, road segments for traffic incidents, and driver
//! chat phrases. Everything here is static data; random selection happens in
//! the processes that consume it.

use tracing::info;

use crate::order::{Driver, GeoPoint, Order, OrderItem, OrderStatus};

/// Order id used whenever tracking starts without a recognizable order.
pub const DEFAULT_ORDER_ID: &str = "ORD-1234";

/// Candidate delivery drivers. Reassignment picks from this pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverProfile {
    pub name: &'static str,
    pub phone: &'static str,
    pub rating: f64,
    pub avatar_index: u8,
    pub license_plate: &'static str,
    pub start_location: GeoPoint,
}

pub const DRIVER_POOL: [DriverProfile; 5] = [
    DriverProfile {
        name: "Jonas Weber",
        phone: "+49 30 555 0141",
        rating: 4.8,
        avatar_index: 0,
        license_plate: "B-FD 1021",
        start_location: GeoPoint {
            lat: 52.5145,
            lng: 13.3901,
        },
    },
    DriverProfile {
        name: "Miriam Schulz",
        phone: "+49 30 555 0172",
        rating: 4.9,
        avatar_index: 1,
        license_plate: "B-FD 2264",
        start_location: GeoPoint {
            lat: 52.5211,
            lng: 13.4105,
        },
    },
    DriverProfile {
        name: "Deniz Aydin",
        phone: "+49 30 555 0186",
        rating: 4.7,
        avatar_index: 2,
        license_plate: "B-FD 3318",
        start_location: GeoPoint {
            lat: 52.5082,
            lng: 13.4226,
        },
    },
    DriverProfile {
        name: "Petra Lehmann",
        phone: "+49 30 555 0119",
        rating: 4.6,
        avatar_index: 3,
        license_plate: "B-FD 4407",
        start_location: GeoPoint {
            lat: 52.5269,
            lng: 13.3846,
        },
    },
    DriverProfile {
        name: "Tomasz Kowalski",
        phone: "+49 30 555 0153",
        rating: 4.9,
        avatar_index: 4,
        license_plate: "B-FD 5522",
        start_location: GeoPoint {
            lat: 52.5038,
            lng: 13.3967,
        },
    },
];

/// Display strings for the estimated delivery window.
pub const DELIVERY_WINDOWS: [&str; 4] = ["10-20 min", "15-25 min", "20-30 min", "25-35 min"];

/// Road segments named in traffic incident notifications.
pub const ROAD_SEGMENTS: [&str; 5] = [
    "Frankfurter Allee",
    "Sonnenallee",
    "Mehringdamm",
    "Prenzlauer Allee",
    "Kantstrasse",
];

/// Conditions paired with a road segment in incident notifications.
pub const ROAD_CONDITIONS: [&str; 4] = [
    "slow-moving traffic",
    "a lane closure",
    "stop-and-go congestion",
    "an accident being cleared",
];

/// Canned driver chat messages.
pub const DRIVER_PHRASES: [&str; 5] = [
    "On my way to the fuel station now.",
    "Fuel loaded, heading to your address.",
    "Traffic is fine, should be on time.",
    "Almost there, keep your phone handy.",
    "I'll call you when I pull up.",
];

pub fn driver_from_profile(profile: &DriverProfile) -> Driver {
    Driver {
        name: profile.name.to_string(),
        location: profile.start_location,
        rating: profile.rating,
        phone: profile.phone.to_string(),
        avatar_index: profile.avatar_index,
    }
}

fn base_order(id: &str, items: Vec<OrderItem>) -> Order {
    let total = items.iter().map(|item| item.price).sum();
    // Placeholder assignment; the session build replaces driver, plate, and
    // window before anything observes the order.
    let profile = &DRIVER_POOL[0];
    Order {
        id: id.to_string(),
        status: OrderStatus::Processing,
        progress: 0,
        status_detail: String::new(),
        items,
        total,
        license_plate: profile.license_plate.to_string(),
        estimated_window: DELIVERY_WINDOWS[0].to_string(),
        driver: driver_from_profile(profile),
    }
}

/// The deterministic default order every unrecognized id falls back to.
pub fn default_order() -> Order {
    base_order(
        DEFAULT_ORDER_ID,
        vec![
            OrderItem {
                name: "Premium Petrol".to_string(),
                quantity_label: "20 L".to_string(),
                price: 37.80,
            },
            OrderItem {
                name: "Doorstep service".to_string(),
                quantity_label: "1x".to_string(),
                price: 4.99,
            },
        ],
    )
}

/// Orders known to this session's catalog.
pub fn order_by_id(id: &str) -> Option<Order> {
    match id {
        DEFAULT_ORDER_ID => Some(default_order()),
        "ORD-2210" => Some(base_order(
            "ORD-2210",
            vec![
                OrderItem {
                    name: "Diesel".to_string(),
                    quantity_label: "30 L".to_string(),
                    price: 52.50,
                },
                OrderItem {
                    name: "Doorstep service".to_string(),
                    quantity_label: "1x".to_string(),
                    price: 4.99,
                },
            ],
        )),
        _ => None,
    }
}

/// Resolve the order to track. Missing or unknown ids recover to the default
/// order — never an error (the tracking view must always have something to
/// show).
pub fn resolve_order(order_id: Option<&str>) -> Order {
    match order_id {
        Some(id) => order_by_id(id).unwrap_or_else(|| {
            info!(order_id = id, "unknown order id, tracking default order");
            default_order()
        }),
        None => default_order(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_order_resolves_to_itself() {
        let order = resolve_order(Some("ORD-2210"));
        assert_eq!(order.id, "ORD-2210");
        assert_eq!(order.items.len(), 2);
        assert!((order.total - 57.49).abs() < 1e-9);
    }

    #[test]
    fn unknown_or_missing_id_falls_back_to_default() {
        let fallback = resolve_order(Some("ORD-9999"));
        let default = default_order();
        assert_eq!(fallback.id, default.id);
        assert_eq!(fallback.items, default.items);
        assert!((fallback.total - default.total).abs() < 1e-9);

        let missing = resolve_order(None);
        assert_eq!(missing.id, DEFAULT_ORDER_ID);
    }

    #[test]
    fn order_total_matches_item_sum() {
        let order = default_order();
        let sum: f64 = order.items.iter().map(|i| i.price).sum();
        assert!((order.total - sum).abs() < 1e-9);
    }

    #[test]
    fn driver_pool_profiles_are_distinct() {
        for (i, a) in DRIVER_POOL.iter().enumerate() {
            for b in DRIVER_POOL.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
                assert_ne!(a.license_plate, b.license_plate);
            }
        }
    }
}
