//! Shared catalog types

/// Ingredients a user has on hand
///
/// Items are trimmed, blanks dropped, and repeats ignored (first kept), so
/// `" egg, rice,,egg "` becomes `["egg", "rice"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientQuery {
    ingredients: Vec<String>,
}

impl IngredientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse comma-separated free text
    pub fn parse(text: &str) -> Self {
        Self::from_items(text.split(','))
    }

    /// Build from individual items
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Self::new();
        for item in items {
            query.push(item.as_ref());
        }
        query
    }

    /// Add one ingredient. Returns false if it was blank or already present.
    pub fn push(&mut self, ingredient: &str) -> bool {
        let trimmed = ingredient.trim();
        if trimmed.is_empty() || self.ingredients.iter().any(|i| i == trimmed) {
            return false;
        }
        self.ingredients.push(trimmed.to_string());
        true
    }

    /// Drop the ingredient at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Comma-joined form, as sent to a search backend
    pub fn to_param(&self) -> String {
        self.ingredients.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_dedups() {
        let query = IngredientQuery::parse(" egg, rice,,egg ,  ");
        assert_eq!(query.ingredients(), ["egg", "rice"]);
        assert_eq!(query.to_param(), "egg,rice");
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(IngredientQuery::parse("").is_empty());
        assert!(IngredientQuery::parse(" , ,").is_empty());
    }

    #[test]
    fn test_push_and_remove() {
        let mut query = IngredientQuery::new();
        assert!(query.push("tomato"));
        assert!(!query.push(" tomato "));
        assert!(!query.push("   "));
        assert!(query.push("basil"));

        assert_eq!(query.remove(0).as_deref(), Some("tomato"));
        assert_eq!(query.remove(5), None);
        assert_eq!(query.ingredients(), ["basil"]);
    }

    #[test]
    fn test_case_is_kept() {
        let query = IngredientQuery::from_items(["Garlic", "garlic"]);
        assert_eq!(query.ingredients().len(), 2);
    }
}
