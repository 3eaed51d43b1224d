//! The predefined story catalog.
//!
//! Every game starts from the same twenty stories. They are revealed into
//! the backlog in catalog order.

use serde::Serialize;

use super::story::{Effort, Story};
use crate::core::ids::StoryId;

/// Static story data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StoryDefinition {
    pub id: StoryId,
    pub description: &'static str,
    pub price: u64,
    pub effort: Effort,
}

impl StoryDefinition {
    /// Create a definition from raw values.
    #[must_use]
    pub const fn new(id: u32, description: &'static str, price: u64, effort: [u32; 3]) -> Self {
        Self {
            id: StoryId::new(id),
            description,
            price,
            effort: Effort::new(effort[0], effort[1], effort[2]),
        }
    }

    /// Build a hidden runtime story from this definition.
    #[must_use]
    pub fn instantiate(&self) -> Story {
        Story::new(self.id, self.description, self.price, self.effort)
    }
}

/// Standard catalog: description, price, and analysis/dev/test effort.
pub const CATALOG: [StoryDefinition; 20] = [
    StoryDefinition::new(1, "User Login & Registration", 150, [8, 18, 10]),
    StoryDefinition::new(2, "Product Catalog Search", 120, [6, 15, 8]),
    StoryDefinition::new(3, "Shopping Cart Functionality", 180, [10, 20, 12]),
    StoryDefinition::new(4, "Payment Gateway Integration", 200, [12, 25, 15]),
    StoryDefinition::new(5, "User Profile Management", 100, [5, 12, 7]),
    StoryDefinition::new(6, "Order History View", 90, [4, 10, 6]),
    StoryDefinition::new(7, "Admin Product Management", 160, [9, 19, 11]),
    StoryDefinition::new(8, "Forgot Password Flow", 70, [3, 8, 5]),
    StoryDefinition::new(9, "Email Notification System", 110, [6, 14, 9]),
    StoryDefinition::new(10, "Customer Support Chatbot", 170, [11, 22, 13]),
    StoryDefinition::new(11, "Product Reviews & Ratings", 130, [7, 16, 9]),
    StoryDefinition::new(12, "Wishlist Feature", 80, [4, 9, 5]),
    StoryDefinition::new(13, "API for Mobile App", 190, [10, 23, 14]),
    StoryDefinition::new(14, "Search Engine Optimization (SEO)", 60, [3, 7, 4]),
    StoryDefinition::new(15, "Data Analytics Dashboard", 220, [15, 28, 18]),
    StoryDefinition::new(16, "GDPR Compliance", 140, [8, 17, 10]),
    StoryDefinition::new(17, "Multi-language Support", 160, [9, 20, 11]),
    StoryDefinition::new(18, "Guest Checkout", 95, [5, 11, 6]),
    StoryDefinition::new(19, "Referral Program", 125, [7, 16, 9]),
    StoryDefinition::new(20, "Server Performance Optimization", 175, [10, 24, 15]),
];
