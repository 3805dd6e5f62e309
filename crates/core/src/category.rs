//! Category routing.
//!
//! Every submission lands in one of a fixed set of buckets, chosen from the
//! endpoint it arrived on. Matching is by substring and never fails: paths
//! that name no known bucket go to [`Category::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination bucket for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "short_form_9_16")]
    ShortForm,
    #[serde(rename = "long_form_16_9_or_9_16")]
    LongForm,
    #[serde(rename = "listings_16_9")]
    Listings,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Category {
    /// All categories, in routing priority order.
    pub const ALL: [Category; 4] = [
        Category::ShortForm,
        Category::LongForm,
        Category::Listings,
        Category::Unknown,
    ];

    /// Storage subdirectory under the input root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::ShortForm => "short_form_9_16",
            Category::LongForm => "long_form_16_9_or_9_16",
            Category::Listings => "listings_16_9",
            Category::Unknown => "unknown",
        }
    }

    /// Human readable label used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::ShortForm => "Short form",
            Category::LongForm => "Long form",
            Category::Listings => "Listings",
            Category::Unknown => "Unknown",
        }
    }

    /// Endpoint path fragment that selects this category.
    fn endpoint_marker(&self) -> Option<&'static str> {
        match self {
            Category::ShortForm => Some("short-form"),
            Category::LongForm => Some("long-form"),
            Category::Listings => Some("listings"),
            Category::Unknown => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps an inbound endpoint path to its category.
pub fn resolve_category(endpoint_path: &str) -> Category {
    Category::ALL
        .into_iter()
        .find(|category| {
            category
                .endpoint_marker()
                .is_some_and(|marker| endpoint_path.contains(marker))
        })
        .unwrap_or(Category::Unknown)
}
