/// A named pattern in the catalog. An empty `rle` marks a reserved entry that has no encoding yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub category: &'static str,
    pub name: &'static str,
    pub rle: &'static str,
}

impl Entry {
    const fn new(category: &'static str, name: &'static str, rle: &'static str) -> Self {
        Self {
            category,
            name,
            rle,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.rle.is_empty()
    }
}

/// Every known starting pattern, grouped by category. Names are unique across categories.
pub const CATALOG: &[Entry] = &[
    Entry::new("still", "block", "2o$2o!"),
    Entry::new("still", "beehive", "b2o$o2bo$b2o!"),
    Entry::new("still", "loaf", "b2o$o2bo$bobo$2bob!"),
    Entry::new("oscillators", "blinkers", "3o!"),
    Entry::new("oscillators", "toad", "bo3bo$3o2b3o!"),
    Entry::new("oscillators", "beacon", "2o2b2o$2o2b2o!"),
    Entry::new("spaceships", "glider", "bob$2bo$3o!"),
    Entry::new("spaceships", "lwss", ""),
    Entry::new("spaceships", "weekender", ""),
    Entry::new("spaceships", "glider_duplicator", ""),
    Entry::new("spaceships", "rPentomino", "5b$2b2ob$b2o2b$2bo2b$5b!"),
];

/// Find a pattern by its exact, case-sensitive name.
pub fn lookup(name: &str) -> Option<&'static Entry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

/// Category names, in catalog order and without repeats.
pub fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();

    for entry in CATALOG {
        if !categories.contains(&entry.category) {
            categories.push(entry.category);
        }
    }

    categories
}

/// Entries of a single category, in catalog order.
pub fn in_category(category: &str) -> impl Iterator<Item = &'static Entry> {
    CATALOG
        .iter()
        .filter(move |entry| entry.category == category)
}
