//! Fixed default datasets used when persisted storage is absent or corrupt.

use crate::model::{Booking, BookingStatus, Category, Item, Listing, Role, User};

#[must_use]
pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Alice Ramos".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::User,
            active: true,
        },
        User {
            id: 2,
            name: "Ben Cruz".to_string(),
            email: "ben@example.com".to_string(),
            role: Role::Renter,
            active: true,
        },
        User {
            id: 3,
            name: "Manager".to_string(),
            email: "manager@rentease".to_string(),
            role: Role::Admin,
            active: true,
        },
    ]
}

#[must_use]
pub fn items() -> Vec<Item> {
    vec![
        Item {
            id: 1,
            title: "City Sedan".to_string(),
            category: "Vehicle".to_string(),
            price: 2500,
            location: "Manila".to_string(),
            active: true,
        },
        Item {
            id: 2,
            title: "Sunny Residences".to_string(),
            category: "Apartment".to_string(),
            price: 15000,
            location: "Quezon City".to_string(),
            active: true,
        },
        Item {
            id: 3,
            title: "Power Drill".to_string(),
            category: "Equipment".to_string(),
            price: 800,
            location: "Makati".to_string(),
            active: true,
        },
    ]
}

#[must_use]
pub fn bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: 1,
            item: "City Sedan".to_string(),
            user: "alice@example.com".to_string(),
            start: "2025-08-10".to_string(),
            end: "2025-08-11".to_string(),
            qty: 1,
            status: BookingStatus::Paid,
        },
        Booking {
            id: 2,
            item: "Sunny Residences".to_string(),
            user: "ben@example.com".to_string(),
            start: "2025-08-01".to_string(),
            end: "2025-08-31".to_string(),
            qty: 1,
            status: BookingStatus::Paid,
        },
        Booking {
            id: 3,
            item: "Power Drill".to_string(),
            user: "alice@example.com".to_string(),
            start: "2025-07-15".to_string(),
            end: "2025-07-15".to_string(),
            qty: 1,
            status: BookingStatus::NotPaid,
        },
    ]
}

/// Marketplace catalog partition for one category. Static data: the
/// marketplace browses it but never writes it back.
#[must_use]
pub fn catalog(category: Category) -> Vec<Listing> {
    match category {
        Category::Property => vec![
            Listing {
                id: 1,
                title: "Cozy 1BR near BGC".to_string(),
                price: 28000,
                location: "Taguig".to_string(),
                kind: "apartment".to_string(),
                img: "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?q=80&w=1200"
                    .to_string(),
                description: "Bright 1-bedroom apartment with balcony, 24/7 security."
                    .to_string(),
            },
            Listing {
                id: 2,
                title: "Family Townhouse in QC".to_string(),
                price: 42000,
                location: "Quezon City".to_string(),
                kind: "townhouse".to_string(),
                img: "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?q=80&w=1200"
                    .to_string(),
                description: "Spacious townhouse in a quiet subdivision with garden.".to_string(),
            },
        ],
        Category::Car => vec![
            Listing {
                id: 4,
                title: "Toyota Vios 2021".to_string(),
                price: 2500,
                location: "Manila".to_string(),
                kind: "sedan".to_string(),
                img: "https://images.unsplash.com/photo-1605559424843-9d36b7a3d8ec?q=80&w=1200"
                    .to_string(),
                description: "Fuel-efficient sedan, perfect for city driving.".to_string(),
            },
            Listing {
                id: 5,
                title: "Honda CR-V SUV".to_string(),
                price: 4000,
                location: "Cebu".to_string(),
                kind: "suv".to_string(),
                img: "https://images.unsplash.com/photo-1592194996308-7b43878e84a6?q=80&w=1200"
                    .to_string(),
                description: "Spacious SUV ideal for family trips.".to_string(),
            },
        ],
        Category::Equipment => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{bookings, catalog, items, users};
    use crate::model::{BookingStatus, Category, Role};

    #[test]
    fn seed_users_cover_all_roles() {
        let seeded = users();
        assert_eq!(seeded.len(), 3);
        let roles: Vec<Role> = seeded.iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Renter, Role::Admin]);
        assert!(seeded.iter().all(|u| u.active));
    }

    #[test]
    fn seed_bookings_reference_seed_items_by_title() {
        let titles: Vec<String> = items().into_iter().map(|i| i.title).collect();
        for booking in bookings() {
            assert!(titles.contains(&booking.item), "missing {}", booking.item);
        }
    }

    #[test]
    fn seed_bookings_include_an_unpaid_one() {
        assert!(bookings()
            .iter()
            .any(|b| b.status == BookingStatus::NotPaid));
    }

    #[test]
    fn equipment_catalog_is_empty() {
        assert!(catalog(Category::Equipment).is_empty());
        assert_eq!(catalog(Category::Property).len(), 2);
        assert_eq!(catalog(Category::Car).len(), 2);
    }
}
