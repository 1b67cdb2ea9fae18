//! Query shaping for the recipe search endpoint.
//!
//! Browsing a category and running a filtered search hit the same remote
//! endpoint but with different parameter sets. The rules live here so the
//! route handlers never assemble search parameters by hand.

/// Fixed page size for every search request.
pub const RESULTS_PER_PAGE: u32 = 12;

/// Categories that translate to a diet filter instead of a query term.
const DIET_CATEGORIES: &[(&str, &str)] = &[
    ("vegetarian", "vegetarian"),
    ("vegan", "vegan"),
    ("gluten-free", "gluten free"),
    ("keto", "ketogenic"),
];

/// Raw browse/search input as it arrives from the user.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub category: String,
    pub text: String,
    pub cuisine: Option<String>,
    pub max_ready_time: Option<u32>,
}

/// Shaped parameters ready to be sent to `GET /recipes/complexSearch`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub max_ready_time: Option<u32>,
    pub number: u32,
}

impl SearchQuery {
    /// Query-string pairs for this search. Empty values are omitted,
    /// `number` is always present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.query.is_empty() {
            params.push(("query", self.query.clone()));
        }
        if let Some(diet) = &self.diet {
            params.push(("diet", diet.clone()));
        }
        if let Some(cuisine) = &self.cuisine {
            params.push(("cuisine", cuisine.clone()));
        }
        if let Some(minutes) = self.max_ready_time {
            params.push(("maxReadyTime", minutes.to_string()));
        }
        params.push(("number", self.number.to_string()));
        params
    }
}

/// Turn user-facing filters into the parameters of one search request.
///
/// Three shapes exist:
/// - a category with a diet mapping always becomes a `diet` filter and is
///   never appended to the query text;
/// - any free text, cuisine, or cook-time limit makes a compound search,
///   with a plain category riding along as an extra query term;
/// - otherwise the category alone is the query (`all` sends no term).
pub fn shape_query(filters: &SearchFilters) -> SearchQuery {
    let category = normalize_category(&filters.category);
    let text = filters.text.trim();
    let cuisine = normalize_optional(filters.cuisine.as_deref());

    let mut query = SearchQuery {
        query: String::new(),
        diet: None,
        cuisine: None,
        max_ready_time: None,
        number: RESULTS_PER_PAGE,
    };

    if let Some(diet) = diet_for_category(&category) {
        query.query = text.to_string();
        query.diet = Some(diet.to_string());
        query.cuisine = cuisine;
        query.max_ready_time = filters.max_ready_time;
        return query;
    }

    let compound = !text.is_empty() || cuisine.is_some() || filters.max_ready_time.is_some();
    if compound {
        query.query = join_terms(text, &category);
        query.cuisine = cuisine;
        query.max_ready_time = filters.max_ready_time;
    } else if category != "all" {
        query.query = category;
    }

    query
}

fn diet_for_category(category: &str) -> Option<&'static str> {
    DIET_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, diet)| *diet)
}

fn normalize_category(category: &str) -> String {
    let trimmed = category.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        "all".to_string()
    } else {
        trimmed
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn join_terms(text: &str, category: &str) -> String {
    if category == "all" {
        return text.to_string();
    }
    if text.is_empty() {
        return category.to_string();
    }
    format!("{text} {category}")
}
