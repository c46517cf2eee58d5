use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// The public-safe message substituted for every unexpected error.
pub const MASKED_ERROR_MESSAGE: &str = "Sorry, something went wrong.";

const MASKED_ERROR_CODE: &str = "INTERNAL_SERVER_ERROR";

/// One entry of a GraphQL error `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPathSegment {
    Field(String),
    Index(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLErrorExtensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Set by the upstream commerce API on errors it intends clients to see
    /// (out-of-stock, invalid session, ...). Everything else gets masked.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub expected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<ErrorPathSegment>>,
    #[serde(default)]
    pub extensions: GraphQLErrorExtensions,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            path: None,
            extensions: GraphQLErrorExtensions::default(),
        }
    }

    /// A domain error the upstream API tagged as known/expected. Passed
    /// through to clients verbatim.
    pub fn expected(message: impl Into<String>, code: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            path: None,
            extensions: GraphQLErrorExtensions {
                code: Some(code.into()),
                expected: true,
            },
        }
    }

    pub fn with_path(mut self, path: Vec<ErrorPathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn is_expected(&self) -> bool {
        self.extensions.expected
    }

    fn masked(&self) -> Self {
        GraphQLError {
            message: MASKED_ERROR_MESSAGE.to_string(),
            path: self.path.clone(),
            extensions: GraphQLErrorExtensions {
                code: Some(MASKED_ERROR_CODE.to_string()),
                expected: false,
            },
        }
    }
}

/// Applies the public error policy: expected domain errors pass through
/// unchanged, everything else is replaced with the fixed safe message. The
/// original errors are logged in full before masking.
pub fn mask_errors(errors: Vec<GraphQLError>) -> Vec<GraphQLError> {
    errors
        .into_iter()
        .map(|err| {
            if err.is_expected() {
                err
            } else {
                error!(
                    message = %err.message,
                    path = ?err.path,
                    code = err.extensions.code.as_deref(),
                    "masking unexpected GraphQL execution error"
                );
                err.masked()
            }
        })
        .collect()
}

/// Cache directives computed by the per-request context, surfaced to the
/// caller through response extensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseExtensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,
}

/// What `execute` hands back to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResponse {
    pub data: Value,
    pub errors: Vec<GraphQLError>,
    pub extensions: ResponseExtensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_errors_pass_through_unchanged() {
        let domain = GraphQLError::expected("Product not available", "PRODUCT_NOT_AVAILABLE");
        let masked = mask_errors(vec![domain.clone()]);
        assert_eq!(masked, vec![domain]);
    }

    #[test]
    fn unexpected_errors_are_masked_and_keep_their_path() {
        let boom = GraphQLError::new("boom").with_path(vec![
            ErrorPathSegment::Field("products".to_string()),
            ErrorPathSegment::Index(2),
        ]);
        let masked = mask_errors(vec![boom]);

        assert_eq!(masked.len(), 1);
        assert_eq!(masked[0].message, MASKED_ERROR_MESSAGE);
        assert_eq!(masked[0].extensions.code.as_deref(), Some("INTERNAL_SERVER_ERROR"));
        assert_eq!(
            masked[0].path,
            Some(vec![
                ErrorPathSegment::Field("products".to_string()),
                ErrorPathSegment::Index(2),
            ])
        );
    }

    #[test]
    fn mixed_errors_are_handled_independently() {
        let errors = vec![
            GraphQLError::expected("Item out of stock", "ITEM_OUT_OF_STOCK"),
            GraphQLError::new("connection refused"),
        ];
        let masked = mask_errors(errors);

        assert_eq!(masked[0].message, "Item out of stock");
        assert!(masked[0].is_expected());
        assert_eq!(masked[1].message, MASKED_ERROR_MESSAGE);
        assert!(!masked[1].is_expected());
    }

    #[test]
    fn expected_flag_is_omitted_from_serialized_output_when_false() {
        let err = GraphQLError::new("boom");
        let json = serde_json::to_value(mask_errors(vec![err])).unwrap();
        assert_eq!(
            json[0]["extensions"],
            serde_json::json!({ "code": "INTERNAL_SERVER_ERROR" })
        );
    }
}
