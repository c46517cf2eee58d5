//! A small catalog schema for running the gateway standalone. Real
//! deployments plug their own engine in through the schema factory.

use std::sync::Arc;

use async_trait::async_trait;
use graphql_parser::query::{Definition, Document, OperationDefinition, Selection};
use serde_json::{json, Map, Value};
use storefront_gateway_executor::{
    ContextError, ContextFactory, EngineArgs, EngineOutput, EngineResponse, ErrorPathSegment,
    ExecutableSchema, ExecutionContext, GraphQLError, RequestDetails, ResolverInfo,
    ResolverOutcome, ResolverPath, SchemaBuildError, SchemaFactory, CacheControl,
};

pub struct CatalogSchemaFactory;

#[async_trait]
impl SchemaFactory for CatalogSchemaFactory {
    async fn build(&self) -> Result<Arc<dyn ExecutableSchema>, SchemaBuildError> {
        Ok(Arc::new(CatalogSchema))
    }
}

struct CatalogSchema;

#[async_trait]
impl ExecutableSchema for CatalogSchema {
    async fn execute(&self, args: EngineArgs<'_>) -> EngineOutput {
        let mut data = Map::new();
        let mut errors = Vec::new();

        for field in root_fields(args.document) {
            let value = match field.as_str() {
                "products" => resolve_products(args.context),
                "banner" => resolve_scalar(args.context, "banner"),
                "clusterHighlights" => {
                    errors.push(resolve_cluster_highlights(args.context));
                    Value::Null
                }
                unknown => {
                    errors.push(GraphQLError::new(format!(
                        "Cannot query field \"{}\" on type \"Query\"",
                        unknown
                    )));
                    continue;
                }
            };
            data.insert(field, value);
        }

        EngineOutput::Complete(EngineResponse {
            data: Value::Object(data),
            errors,
        })
    }
}

fn root_fields(document: &Document<'static, String>) -> Vec<String> {
    let mut fields = Vec::new();
    for definition in &document.definitions {
        let selection_set = match definition {
            Definition::Operation(OperationDefinition::Query(query)) => &query.selection_set,
            Definition::Operation(OperationDefinition::SelectionSet(set)) => set,
            _ => continue,
        };
        for selection in &selection_set.items {
            if let Selection::Field(field) = selection {
                fields.push(field.name.clone());
            }
        }
    }
    fields
}

fn resolve_products(context: &ExecutionContext) -> Value {
    let products = json!([
        { "id": "sku-1", "name": "Shirt", "price": 59.9 },
        { "id": "sku-2", "name": "Sneakers", "price": 249.9 },
    ]);

    if let Some(trace) = &context.trace {
        let products_path = ResolverPath::field("products");
        let guard = trace.on_resolve(ResolverInfo {
            path: products_path.clone(),
            field_name: "products".to_string(),
            parent_type: "Query".to_string(),
            return_type: "[Product]".to_string(),
            args: None,
        });

        for (index, product) in products.as_array().into_iter().flatten().enumerate() {
            for field in ["name", "price"] {
                let child = trace.on_resolve(ResolverInfo {
                    path: products_path.child_index(index).child_field(field),
                    field_name: field.to_string(),
                    parent_type: "Product".to_string(),
                    return_type: if field == "price" { "Float" } else { "String" }.to_string(),
                    args: Some(json!({ "id": product["id"] })),
                });
                child.settle(ResolverOutcome::Success);
            }
        }
        guard.settle(ResolverOutcome::Success);
    }

    products
}

fn resolve_scalar(context: &ExecutionContext, field: &str) -> Value {
    if let Some(trace) = &context.trace {
        let guard = trace.on_resolve(ResolverInfo {
            path: ResolverPath::field(field),
            field_name: field.to_string(),
            parent_type: "Query".to_string(),
            return_type: "String".to_string(),
            args: None,
        });
        guard.settle(ResolverOutcome::Success);
    }
    Value::String("Free shipping on orders above $100".to_string())
}

// This resolver always fails, which makes it handy for exercising error
// spans and masking against a live collector.
fn resolve_cluster_highlights(context: &ExecutionContext) -> GraphQLError {
    if let Some(trace) = &context.trace {
        let guard = trace.on_resolve(ResolverInfo {
            path: ResolverPath::field("clusterHighlights"),
            field_name: "clusterHighlights".to_string(),
            parent_type: "Query".to_string(),
            return_type: "[Highlight]".to_string(),
            args: None,
        });
        guard.settle(ResolverOutcome::Failure(
            storefront_gateway_executor::ResolverFailure::new(
                "UpstreamError",
                "highlights service is unavailable",
            ),
        ));
    }
    GraphQLError::new("highlights service is unavailable")
        .with_path(vec![ErrorPathSegment::Field("clusterHighlights".to_string())])
}

/// Derives per-request state from the incoming headers.
pub struct StoreContextFactory;

#[async_trait]
impl ContextFactory for StoreContextFactory {
    async fn create(&self, details: &RequestDetails) -> Result<ExecutionContext, ContextError> {
        let mut values = std::collections::HashMap::new();
        if let Some(locale) = details
            .headers
            .get("accept-language")
            .and_then(|v| v.to_str().ok())
        {
            values.insert("locale".to_string(), Value::String(locale.to_string()));
        }

        Ok(ExecutionContext {
            cache_control: Some(CacheControl {
                max_age: Some(60),
                stale_while_revalidate: Some(600),
                scope: Some("public".to_string()),
            }),
            values,
            trace: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::parse_query;

    #[test]
    fn collects_root_fields_from_named_and_anonymous_operations() {
        let named = parse_query::<String>("query Home { products { name } banner }")
            .unwrap()
            .into_static();
        assert_eq!(root_fields(&named), vec!["products", "banner"]);

        let anonymous = parse_query::<String>("{ banner }").unwrap().into_static();
        assert_eq!(root_fields(&anonymous), vec!["banner"]);
    }

    #[tokio::test]
    async fn unknown_fields_produce_an_error_entry() {
        let document = parse_query::<String>("{ nope }").unwrap().into_static();
        let context = ExecutionContext::default();
        let output = CatalogSchema
            .execute(EngineArgs {
                document: &document,
                query: "{ nope }",
                operation_name: None,
                variables: &Map::new(),
                context: &context,
            })
            .await;

        match output {
            EngineOutput::Complete(response) => {
                assert_eq!(response.errors.len(), 1);
                assert!(response.errors[0].message.contains("nope"));
            }
            EngineOutput::Incremental => panic!("expected a complete response"),
        }
    }
}
