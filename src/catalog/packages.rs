use crate::models::{Offering, OfferingKind};

const PACKAGE_PRICE: u32 = 20000;

fn package(id: &str, name: &str, description: &str, perks: &[&str]) -> Offering {
    Offering {
        id: id.to_string(),
        name: name.to_string(),
        kind: OfferingKind::Package,
        price: PACKAGE_PRICE,
        perks: perks.iter().map(|p| p.to_string()).collect(),
        description: Some(description.to_string()),
        // One engagement per booking.
        total_seats: 1,
        available_seats: 1,
        available: true,
        grid: None,
    }
}

pub const LIVE_OPTION_ID: &str = "live";

pub fn platinum_options() -> Vec<Offering> {
    vec![
        package(
            "djing",
            "DJING SET",
            "Experience 2 hours of energetic DJ performance",
            &[
                "Ranges of Genres from House, Afro, Melodic Techno, World to Commercial Music",
                "Welcome to 2hours of Straight Good Music, Amplifying Energy",
                "Tech Rider",
                "Hospitality Rider",
            ],
        ),
        package(
            LIVE_OPTION_ID,
            "LIVE PERFORMANCE",
            "Select your preferred live performance format",
            &[
                "Choose from Solo, 3 Piece, or 5 Piece Band",
                "Welcome to 2hours of Straight Soulful Music, Nostalgia",
                "Tech Rider",
                "Hospitality Rider",
            ],
        ),
    ]
}

pub fn performance_options() -> Vec<Offering> {
    vec![
        package(
            "solo",
            "SOLO PERFORMANCE",
            "An intimate solo performance",
            &[
                "Solo Performance By Max Kate on Piano & Guitar",
                "Welcome to 2hours of Straight Soulful Music, Nostalgia",
                "Tech Rider",
                "Hospitality Rider",
            ],
        ),
        package(
            "threepiece",
            "3 PIECE BAND",
            "A dynamic trio performance",
            &[
                "3 Piece Band Performance",
                "Welcome to 2hours of Straight Soulful Music, Nostalgia",
                "Tech Rider",
                "Hospitality Rider",
            ],
        ),
        package(
            "fivepiece",
            "5 PIECE BAND",
            "Full band experience",
            &[
                "5 Piece Band Performance",
                "Welcome to 2hours of Straight Soulful Music, Nostalgia",
                "Tech Rider",
                "Hospitality Rider",
            ],
        ),
    ]
}
