//! Built-in crop growing guide.

/// Growing conditions of one crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropProfile {
    pub name: &'static str,
    /// Emoji shown next to the name; not searched.
    pub icon: &'static str,
    pub climate: &'static str,
    pub soil: &'static str,
    pub rainfall: &'static str,
    pub ph: &'static str,
    pub npk: &'static str,
    pub growing_season: &'static str,
}

impl CropProfile {
    /// Labelled fields in display order.
    pub fn fields(&self) -> [(&'static str, &'static str); 6] {
        [
            ("Climate", self.climate),
            ("Soil", self.soil),
            ("Rainfall", self.rainfall),
            ("pH Range", self.ph),
            ("NPK Requirements", self.npk),
            ("Growing Season", self.growing_season),
        ]
    }
}

const PROFILES: &[CropProfile] = &[
    CropProfile {
        name: "Rice",
        icon: "🌾",
        climate: "Warm and humid (20-35°C)",
        soil: "Clay or loamy soil with good water retention",
        rainfall: "150-300 cm annually",
        ph: "5.5 - 7.0",
        npk: "High nitrogen, moderate phosphorus and potassium",
        growing_season: "3-6 months",
    },
    CropProfile {
        name: "Maize",
        icon: "🌽",
        climate: "Warm weather (18-32°C)",
        soil: "Well-drained, fertile loamy soil",
        rainfall: "50-100 cm",
        ph: "5.8 - 7.0",
        npk: "High nitrogen, moderate phosphorus and potassium",
        growing_season: "3-5 months",
    },
    CropProfile {
        name: "Chickpea",
        icon: "🧆",
        climate: "Cool and dry climate (10-30°C)",
        soil: "Well-drained loamy to clay soils",
        rainfall: "60-90 cm",
        ph: "6.0 - 9.0",
        npk: "Moderate nitrogen, high phosphorus",
        growing_season: "3-5 months",
    },
    CropProfile {
        name: "Kidney Beans",
        icon: "🔴",
        climate: "Warm climate (15-27°C)",
        soil: "Well-drained loamy soil",
        rainfall: "40-60 cm",
        ph: "6.0 - 7.0",
        npk: "Moderate nitrogen and phosphorus",
        growing_season: "3-4 months",
    },
    CropProfile {
        name: "Pigeon Peas",
        icon: "🟡",
        climate: "Tropical climate (20-35°C)",
        soil: "Loamy or sandy loam soils",
        rainfall: "60-100 cm",
        ph: "6.0 - 7.5",
        npk: "Moderate nitrogen, high phosphorus",
        growing_season: "5-6 months",
    },
    CropProfile {
        name: "Moth Beans",
        icon: "🟤",
        climate: "Hot and dry (25-35°C)",
        soil: "Sandy or loamy soils",
        rainfall: "20-40 cm",
        ph: "7.0 - 8.5",
        npk: "Low nitrogen requirement",
        growing_season: "3-4 months",
    },
    CropProfile {
        name: "Mung Bean",
        icon: "🟢",
        climate: "Warm climate (20-35°C)",
        soil: "Loamy soils rich in organic matter",
        rainfall: "60-120 cm",
        ph: "6.2 - 7.2",
        npk: "Moderate nitrogen and phosphorus",
        growing_season: "2-3 months",
    },
    CropProfile {
        name: "Black Gram",
        icon: "⚫",
        climate: "Warm and humid climate (25-35°C)",
        soil: "Loamy or clay-loam soils",
        rainfall: "60-90 cm",
        ph: "6.0 - 7.5",
        npk: "High phosphorus, moderate nitrogen",
        growing_season: "3-4 months",
    },
    CropProfile {
        name: "Lentil",
        icon: "🟠",
        climate: "Cool climate (10-25°C)",
        soil: "Well-drained loamy soils",
        rainfall: "30-45 cm",
        ph: "6.0 - 8.0",
        npk: "Moderate nitrogen, high phosphorus",
        growing_season: "3-5 months",
    },
    CropProfile {
        name: "Pomegranate",
        icon: "🍈",
        climate: "Hot, dry climate (20-40°C)",
        soil: "Well-drained loamy soil",
        rainfall: "50-60 cm",
        ph: "5.5 - 7.0",
        npk: "Moderate nitrogen, high potassium",
        growing_season: "6-7 months",
    },
    CropProfile {
        name: "Banana",
        icon: "🍌",
        climate: "Warm and humid (26-30°C)",
        soil: "Loamy soil rich in organic matter",
        rainfall: "150-250 cm",
        ph: "6.5 - 7.5",
        npk: "High nitrogen and potassium",
        growing_season: "10-12 months",
    },
    CropProfile {
        name: "Mango",
        icon: "🥭",
        climate: "Warm tropical climate (24-30°C)",
        soil: "Well-drained alluvial soil",
        rainfall: "75-250 cm",
        ph: "5.5 - 7.5",
        npk: "Moderate nitrogen, high potassium",
        growing_season: "6-11 months",
    },
    CropProfile {
        name: "Grapes",
        icon: "🍇",
        climate: "Warm dry climate (15-40°C)",
        soil: "Sandy loam or black soil",
        rainfall: "50-75 cm",
        ph: "6.5 - 7.5",
        npk: "High nitrogen and potassium",
        growing_season: "4-5 months",
    },
    CropProfile {
        name: "Watermelon",
        icon: "🍉",
        climate: "Hot climate (25-35°C)",
        soil: "Sandy loam soil",
        rainfall: "50-75 cm",
        ph: "6.0 - 6.8",
        npk: "Moderate nitrogen, high potassium",
        growing_season: "3-4 months",
    },
    CropProfile {
        name: "Muskmelon",
        icon: "🍈",
        climate: "Hot and dry (25-35°C)",
        soil: "Sandy loam soil",
        rainfall: "40-60 cm",
        ph: "6.0 - 6.7",
        npk: "Moderate nitrogen, high potassium",
        growing_season: "2.5-3 months",
    },
    CropProfile {
        name: "Apple",
        icon: "🍎",
        climate: "Cold climate (0-20°C)",
        soil: "Well-drained loamy soil",
        rainfall: "100-125 cm",
        ph: "5.5 - 6.5",
        npk: "High potassium",
        growing_season: "6-7 months",
    },
    CropProfile {
        name: "Orange",
        icon: "🍊",
        climate: "Subtropical climate (15-30°C)",
        soil: "Well-drained sandy loam",
        rainfall: "75-120 cm",
        ph: "5.5 - 7.0",
        npk: "High nitrogen and potassium",
        growing_season: "6-8 months",
    },
    CropProfile {
        name: "Papaya",
        icon: "🍈",
        climate: "Warm tropical climate (25-35°C)",
        soil: "Sandy loam soil rich in organic matter",
        rainfall: "150-200 cm",
        ph: "6.0 - 6.5",
        npk: "High nitrogen",
        growing_season: "6-9 months",
    },
    CropProfile {
        name: "Coconut",
        icon: "🥥",
        climate: "Humid tropical (20-32°C)",
        soil: "Sandy loam soil",
        rainfall: "150-250 cm",
        ph: "5.0 - 8.0",
        npk: "High potassium",
        growing_season: "12-14 months",
    },
    CropProfile {
        name: "Cotton",
        icon: "☁️",
        climate: "Hot climate (21-30°C)",
        soil: "Black soil or deep loamy soil",
        rainfall: "50-100 cm",
        ph: "6.0 - 8.0",
        npk: "Moderate nitrogen, high phosphorus and potassium",
        growing_season: "5-6 months",
    },
    CropProfile {
        name: "Jute",
        icon: "🧵",
        climate: "Warm and humid (24-37°C)",
        soil: "Alluvial soil",
        rainfall: "150-200 cm",
        ph: "6.4 - 7.2",
        npk: "Moderate nitrogen and phosphorus",
        growing_season: "4-5 months",
    },
    CropProfile {
        name: "Coffee",
        icon: "☕",
        climate: "Cool tropical (15-25°C)",
        soil: "Well-drained loamy soil with organic matter",
        rainfall: "150-250 cm",
        ph: "6.0 - 6.5",
        npk: "High nitrogen and potassium",
        growing_season: "6-11 months",
    },
];

/// Read-only crop guide with case-insensitive name search.
#[derive(Debug, Clone, Copy)]
pub struct CropCatalog {
    profiles: &'static [CropProfile],
}

impl CropCatalog {
    pub fn builtin() -> Self {
        Self { profiles: PROFILES }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Lookup by name ignoring case and spaces, so model labels such as
    /// `kidneybeans` find "Kidney Beans".
    pub fn get(&self, name: &str) -> Option<&'static CropProfile> {
        let key = lookup_key(name);
        self.profiles.iter().find(|p| lookup_key(p.name) == key)
    }

    /// Profiles whose name contains `query`, ignoring case, in catalog order.
    /// An empty query matches everything; no match is an empty vector.
    pub fn search(&self, query: &str) -> Vec<&'static CropProfile> {
        if query.is_empty() {
            return self.profiles.iter().collect();
        }
        let needle = query.to_lowercase();
        self.profiles
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
