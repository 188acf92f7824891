/// Query-string filter for backend list requests, e.g. `?articleId=3&userId=7`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pairs: Vec<(String, String)>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((field.into(), value.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let filter = QueryFilter::new().eq("articleId", 3).eq("userId", "7");
        assert_eq!(
            filter.pairs(),
            &[
                ("articleId".to_string(), "3".to_string()),
                ("userId".to_string(), "7".to_string())
            ]
        );
    }
}
