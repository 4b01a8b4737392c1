//! # Record Store
//!
//! Process-wide home of all dish and order records. Collections are plain
//! ordered lists mutated in place; the store owns every record and handlers
//! borrow through the [`crate::state::AppState`] lock.
//!
//! Ids come from a monotonic counter, so a record id is never reused for the
//! lifetime of the process.

use crate::dishes::Dish;
use crate::orders::{Order, OrderDish, OrderStatus};

pub trait Keyed {
    fn id(&self) -> &str;
}

pub struct Records<T> {
    items: Vec<T>,
}

impl<T: Keyed> Records<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|record| record.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|record| record.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|record| record.id() == id)
    }

    pub fn append(&mut self, record: T) {
        self.items.push(record);
    }

    pub fn remove_at(&mut self, index: usize) -> T {
        self.items.remove(index)
    }
}

impl<T: Keyed> Default for Records<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Store {
    pub dishes: Records<Dish>,
    pub orders: Records<Order>,
    next_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            dishes: Records::new(),
            orders: Records::new(),
            next_id: 1,
        }
    }

    /// Starting menu and a couple of open orders, in place of a database.
    pub fn seeded() -> Self {
        let mut store = Self::new();

        for (name, description, price, image_url) in [
            (
                "Spaghetti and Meatballs",
                "Fresh pasta tossed in a rich tomato sauce with handmade meatballs",
                1400,
                "https://images.chow.test/spaghetti-and-meatballs.jpg",
            ),
            (
                "Chicken Fried Steak",
                "Cube steak breaded and fried, smothered in pepper gravy",
                1600,
                "https://images.chow.test/chicken-fried-steak.jpg",
            ),
            (
                "Broccoli Cheddar Soup",
                "Creamy soup loaded with broccoli florets and sharp cheddar",
                800,
                "https://images.chow.test/broccoli-cheddar-soup.jpg",
            ),
        ] {
            let dish = Dish {
                id: store.next_id(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                image_url: image_url.to_string(),
            };
            store.dishes.append(dish);
        }

        let first_dish = store.dishes.list()[0].id.clone();
        let second_dish = store.dishes.list()[1].id.clone();

        let pending = Order {
            id: store.next_id(),
            deliver_to: "1600 Pennsylvania Avenue NW".to_string(),
            mobile_number: "(202) 456-1111".to_string(),
            status: OrderStatus::Pending,
            dishes: vec![OrderDish {
                dish_id: first_dish,
                quantity: 1,
            }],
        };
        store.orders.append(pending);

        let preparing = Order {
            id: store.next_id(),
            deliver_to: "308 Negra Arroyo Lane".to_string(),
            mobile_number: "(505) 143-3369".to_string(),
            status: OrderStatus::Preparing,
            dishes: vec![OrderDish {
                dish_id: second_dish,
                quantity: 2,
            }],
        };
        store.orders.append(preparing);

        store
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{:08x}", self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str) -> Dish {
        Dish {
            id: id.to_string(),
            name: "Garlic Bread".to_string(),
            description: "Toasted baguette with garlic butter".to_string(),
            price: 500,
            image_url: "https://images.chow.test/garlic-bread.jpg".to_string(),
        }
    }

    #[test]
    fn test_next_id_unique() {
        let mut store = Store::new();
        let first = store.next_id();
        let second = store.next_id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_seeded_ids_do_not_collide() {
        let mut store = Store::seeded();
        let fresh = store.next_id();
        assert!(store.dishes.find(&fresh).is_none());
        assert!(store.orders.find(&fresh).is_none());
    }

    #[test]
    fn test_find_and_append() {
        let mut records = Records::new();
        assert!(records.find("a").is_none());

        records.append(dish("a"));
        records.append(dish("b"));

        assert_eq!(records.find("b").map(|d| d.id()), Some("b"));
        assert_eq!(records.position("b"), Some(1));
        assert_eq!(records.list().len(), 2);
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut records = Records::new();
        records.append(dish("a"));
        records.append(dish("b"));
        records.append(dish("c"));

        let removed = records.remove_at(1);
        assert_eq!(removed.id, "b");
        assert_eq!(records.position("c"), Some(1));
    }
}
