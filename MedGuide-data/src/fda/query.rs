/// Name fields that a free-text medication search is matched against
const NAME_FIELDS: [&str; 3] = [
    "openfda.generic_name",
    "openfda.brand_name",
    "openfda.substance_name",
];

/// A lookup against the drug-label endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelQuery {
    /// OR-combined match on the brand, generic and substance names
    ByName { term: String, limit: u32 },
    /// Exact match on the label document id
    ById(String),
}

impl LabelQuery {
    pub fn by_name(term: impl Into<String>, limit: u32) -> Self {
        LabelQuery::ByName { term: term.into(), limit }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        LabelQuery::ById(id.into())
    }

    /// Value of the `search` query parameter.
    ///
    /// The term is percent-encoded and the clauses are joined with a literal
    /// `+OR+`, which openFDA reads as a space-separated boolean OR.
    pub fn search_expression(&self) -> String {
        match self {
            LabelQuery::ByName { term, .. } => {
                let encoded = urlencoding::encode(term);
                let clauses: Vec<String> = NAME_FIELDS
                    .iter()
                    .map(|field| format!("{}:\"{}\"", field, encoded))
                    .collect();
                format!("({})", clauses.join("+OR+"))
            }
            LabelQuery::ById(id) => format!("id:\"{}\"", urlencoding::encode(id)),
        }
    }

    /// Result limit, if the lookup carries one
    pub fn limit(&self) -> Option<u32> {
        match self {
            LabelQuery::ByName { limit, .. } => Some(*limit),
            LabelQuery::ById(_) => None,
        }
    }

    /// Full query string appended to the endpoint URL
    pub fn to_query_string(&self) -> String {
        match self.limit() {
            Some(limit) => format!("search={}&limit={}", self.search_expression(), limit),
            None => format!("search={}", self.search_expression()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_query_combines_fields() {
        let query = LabelQuery::by_name("advil", 10);
        assert_eq!(
            query.to_query_string(),
            "search=(openfda.generic_name:\"advil\"+OR+openfda.brand_name:\"advil\"+OR+openfda.substance_name:\"advil\")&limit=10"
        );
    }

    #[test]
    fn test_name_query_encodes_term() {
        let query = LabelQuery::by_name("tylenol pm", 5);
        let expression = query.search_expression();
        assert!(expression.contains("\"tylenol%20pm\""));
        assert!(!expression.contains("tylenol pm"));
    }

    #[test]
    fn test_id_query_has_no_limit() {
        let query = LabelQuery::by_id("3b5b3e1c-0000");
        assert_eq!(query.limit(), None);
        assert_eq!(query.to_query_string(), "search=id:\"3b5b3e1c-0000\"");
    }
}
