//! Curated browse categories. Each resolves to movies by keyword lookup.

/// A browse category and the titles it is seeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Category shown when none is picked.
pub const DEFAULT_CATEGORY: &str = "popular";

const CATALOG: &[Category] = &[
    Category {
        id: "popular",
        label: "Popular",
        keywords: &["Avengers", "Inception", "Interstellar", "Titanic", "Avatar"],
    },
    Category {
        id: "romance",
        label: "Romance",
        keywords: &["Notebook", "Pride", "Titanic", "La La Land", "Before Sunrise"],
    },
    Category {
        id: "classic",
        label: "Classic",
        keywords: &["Casablanca", "Godfather", "Citizen Kane", "Psycho", "Vertigo"],
    },
    Category {
        id: "comedy",
        label: "Comedy",
        keywords: &["Hangover", "Superbad", "Bridesmaids", "Dumb", "Anchorman"],
    },
    Category {
        id: "youngadult",
        label: "Young Adult",
        keywords: &["Hunger Games", "Twilight", "Divergent", "Maze Runner", "Fault"],
    },
];

#[must_use]
pub fn categories() -> &'static [Category] {
    CATALOG
}

/// Case-insensitive lookup by id.
#[must_use]
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.id.eq_ignore_ascii_case(id.trim()))
}
