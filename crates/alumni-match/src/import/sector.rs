/// Fallback sector for companies no keyword recognizes.
pub const OTHER_SECTOR: &str = "Other";

// Checked in order; the first sector with a hit wins.
const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "microsoft", "google", "apple", "amazon", "meta", "facebook", "netflix", "adobe",
            "oracle", "salesforce", "ibm", "intel", "nvidia", "cisco", "vmware", "paypal", "uber",
            "lyft", "airbnb", "twitter", "linkedin", "snapchat", "tiktok", "zoom", "slack",
            "dropbox", "spotify", "tesla", "qualcomm", "amd", "samsung", "sony", "dell", "hp",
            "lenovo", "tech", "software", "digital", "cloud", "saas", "platform", "app", "system",
            "solution", "service", "infrastructure", "network", "data", "analytics", "ai",
            "machine learning", "artificial intelligence",
        ],
    ),
    (
        "Finance",
        &[
            "bank", "financial", "investment", "capital", "wealth", "credit", "loan", "mortgage",
            "insurance", "trading", "brokerage", "hedge fund", "asset", "jpmorgan",
            "goldman sachs", "morgan stanley", "citibank", "wells fargo", "chase",
            "american express", "visa", "mastercard", "stripe", "square", "fintech", "crypto",
            "blockchain", "bitcoin", "ethereum",
        ],
    ),
    (
        "Consulting",
        &[
            "consulting", "consultant", "mckinsey", "bain", "bcg", "deloitte", "pwc", "ey",
            "ernst", "kpmg", "accenture", "capgemini", "cognizant", "tcs", "infosys", "wipro",
            "hcl", "strategy", "advisory",
        ],
    ),
    (
        "Healthcare",
        &[
            "health", "medical", "pharma", "pharmaceutical", "hospital", "clinic", "biotech",
            "biotechnology", "pfizer", "johnson", "merck", "novartis", "roche", "abbott",
            "medtronic", "baxter", "bristol", "lilly",
        ],
    ),
    (
        "Manufacturing",
        &[
            "manufacturing", "production", "factory", "industrial", "automotive", "ford", "gm",
            "toyota", "honda", "bmw", "mercedes", "volkswagen", "boeing", "airbus", "caterpillar",
            "deere", "ge", "siemens",
        ],
    ),
    (
        "Retail",
        &[
            "retail", "store", "shop", "walmart", "target", "costco", "home depot", "lowes",
            "best buy", "macy", "nordstrom", "ecommerce", "online store",
        ],
    ),
    (
        "Energy",
        &[
            "energy", "oil", "gas", "petroleum", "exxon", "chevron", "shell", "bp", "renewable",
            "solar", "wind", "power", "electricity", "utility",
        ],
    ),
    (
        "Telecommunications",
        &[
            "telecom", "telecommunication", "verizon", "at&t", "t-mobile", "sprint",
            "communication", "wireless", "mobile", "network provider",
        ],
    ),
    (
        "Media & Entertainment",
        &[
            "media", "entertainment", "disney", "warner", "paramount", "universal", "news",
            "broadcast", "television", "radio", "publishing", "magazine",
        ],
    ),
    (
        "Education",
        &[
            "education", "university", "college", "school", "learning", "academy", "training",
            "edtech", "online learning", "course", "tutoring",
        ],
    ),
    (
        "Real Estate",
        &[
            "real estate", "property", "construction", "building", "development", "housing",
            "commercial", "residential", "realtor",
        ],
    ),
    (
        "Transportation & Logistics",
        &[
            "transport", "logistics", "shipping", "delivery", "freight", "supply chain", "fedex",
            "ups", "dhl", "railway", "airline",
        ],
    ),
    (
        "Aerospace & Defense",
        &[
            "aerospace", "defense", "lockheed", "raytheon", "northrop", "military", "aviation",
            "space", "satellite",
        ],
    ),
    (
        "Consumer Goods",
        &[
            "consumer", "goods", "procter", "unilever", "nestle", "coca cola", "pepsi", "p&g",
            "philip morris",
        ],
    ),
];

/// Keywords this short only count as whole words ("ai" must not hit "Jaipur").
const WHOLE_WORD_MAX_LEN: usize = 3;

/// Best-effort sector for a company name; `None` when the name is blank.
pub fn detect_company_sector(company: &str) -> Option<&'static str> {
    let normalized = company.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric() && c != '&' && c != '-')
        .filter(|word| !word.is_empty())
        .collect();

    let hit = |keyword: &str| {
        if keyword.len() <= WHOLE_WORD_MAX_LEN {
            words.iter().any(|word| *word == keyword)
        } else {
            normalized.contains(keyword)
        }
    };

    let sector = SECTOR_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| hit(*keyword)))
        .map(|(sector, _)| *sector)
        .unwrap_or(OTHER_SECTOR);

    Some(sector)
}

/// Every sector a record can carry, `Other` last.
pub fn sector_options() -> Vec<&'static str> {
    SECTOR_KEYWORDS
        .iter()
        .map(|(sector, _)| *sector)
        .chain(std::iter::once(OTHER_SECTOR))
        .collect()
}
