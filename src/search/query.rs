use serde::Serialize;
use serde_json::Value;

use crate::types::FIELDS;

/// Longest query text the search box accepts.
pub const MAX_QUERY_CHARS: usize = 50;

/// Check query text against the search box limits (1-50 characters).
pub fn check_query(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        Err("query must not be empty".into())
    } else if text.chars().count() > MAX_QUERY_CHARS {
        Err(format!("query must be at most {MAX_QUERY_CHARS} characters"))
    } else {
        Ok(())
    }
}

/// A `nearText` semantic query against one collection.
#[derive(Debug, Clone)]
pub struct NearTextQuery<'a> {
    pub collection: &'a str,
    pub text: &'a str,
    pub limit: Option<usize>,
    pub fields: &'a [&'a str],
}

impl<'a> NearTextQuery<'a> {
    /// Query with the full dish projection.
    pub fn new(collection: &'a str, text: &'a str, limit: Option<usize>) -> Self {
        Self {
            collection,
            text,
            limit,
            fields: &FIELDS,
        }
    }

    /// Render the GraphQL document.
    ///
    /// The query text goes through JSON string escaping, which yields a valid
    /// GraphQL string literal for any input.
    pub fn to_graphql(&self) -> String {
        let concept = Value::String(self.text.to_string()).to_string();
        let limit = self
            .limit
            .map(|n| format!(", limit: {n}"))
            .unwrap_or_default();
        format!(
            "{{ Get {{ {}(nearText: {{concepts: [{}]}}{}) {{ {} }} }} }}",
            self.collection,
            concept,
            limit,
            self.fields.join(" ")
        )
    }

    /// Request body for `POST /v1/graphql`.
    pub fn body(&self) -> GraphqlRequest {
        GraphqlRequest {
            query: self.to_graphql(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
}

/// The nested response exactly as returned by the service.
#[derive(Debug, Clone)]
pub struct RawResultSet {
    pub collection: String,
    pub body: Value,
}

impl RawResultSet {
    pub fn new(collection: impl Into<String>, body: Value) -> Self {
        Self {
            collection: collection.into(),
            body,
        }
    }

    /// The value at `data.Get.<collection>`, if the path exists.
    pub fn records(&self) -> Option<&Value> {
        self.body
            .get("data")?
            .get("Get")?
            .get(&self.collection)
            .filter(|v| !v.is_null())
    }

    /// GraphQL error messages carried in the body, if any.
    pub fn errors(&self) -> Vec<String> {
        self.body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errs| {
                errs.iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .map_or_else(|| e.to_string(), str::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
