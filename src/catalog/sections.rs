use crate::models::{Offering, OfferingKind, SeatGrid};

fn section(
    id: &str,
    name: &str,
    price: u32,
    perks: &[&str],
    total_seats: u32,
    rows: u32,
    seats_per_row: u32,
) -> Offering {
    Offering {
        id: id.to_string(),
        name: name.to_string(),
        kind: OfferingKind::Section,
        price,
        perks: perks.iter().map(|p| p.to_string()).collect(),
        description: None,
        total_seats,
        available_seats: total_seats,
        available: true,
        grid: Some(SeatGrid { rows, seats_per_row }),
    }
}

/// Stadium sections from the stage outwards.
pub fn all() -> Vec<Offering> {
    vec![
        section(
            "platinum",
            "PLATINUM",
            499,
            &[
                "Front row view of Max Kate",
                "Exclusive meet & greet opportunity",
                "Complimentary drinks",
                "VIP entrance",
                "Limited to 50 seats",
            ],
            50,
            5,
            10,
        ),
        section(
            "vip",
            "VIP",
            399,
            &[
                "Premium stage view",
                "Dedicated bar access",
                "VIP entrance",
                "Limited to 100 seats",
            ],
            100,
            10,
            10,
        ),
        // The seat map shows one 10x10 block of the tier.
        section(
            "gold",
            "GOLD",
            299,
            &[
                "Excellent viewing position",
                "Priority entry",
                "Access to premium bars",
                "Limited to 200 seats",
            ],
            200,
            10,
            10,
        ),
        section(
            "silver",
            "SILVER",
            199,
            &[
                "Great atmosphere",
                "General admission entry",
                "Access to main bars",
                "Limited to 500 seats",
            ],
            500,
            20,
            25,
        ),
    ]
}
