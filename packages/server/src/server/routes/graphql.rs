use crate::server::graphql::{GraphQLContext, Schema};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use juniper::http::{GraphQLBatchRequest, GraphQLRequest};
use serde::Serialize;
use std::sync::Arc;

/// Query shown when the playground opens
const PLAYGROUND_QUERY: &str = r#"{
  jobs(dead: true) {
    id
    type
    broadcaster
    stream
    ... on VideoJob {
      live
      url
      profiles { name resolution }
    }
  }
}"#;

/// Requests that fail before execution (parse, validation) answer 400.
fn respond<T: Serialize>(executed: bool, body: T) -> Response {
    let status = if executed {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body)).into_response()
}

/// GraphQL POST endpoint
pub async fn graphql_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(request): Json<GraphQLRequest>,
) -> Response {
    let response = request.execute(&schema, &context).await;
    respond(response.is_ok(), response)
}

/// GraphQL batch POST endpoint
pub async fn graphql_batch_handler(
    State(schema): State<Arc<Schema>>,
    Extension(context): Extension<GraphQLContext>,
    Json(batch): Json<GraphQLBatchRequest>,
) -> Response {
    let response = batch.execute(&schema, &context).await;
    respond(response.is_ok(), response)
}

/// GraphQL playground (GraphiQL)
pub async fn graphql_playground() -> Html<String> {
    Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <title>Job Graph Playground</title>
    <style>
        body {{ height: 100%; margin: 0; width: 100%; overflow: hidden; }}
        #graphiql {{ height: 100vh; }}
    </style>
    <script crossorigin src="https://unpkg.com/react@18/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom@18/umd/react-dom.production.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body>
    <div id="graphiql">Loading...</div>
    <script src="https://unpkg.com/graphiql/graphiql.min.js" type="application/javascript"></script>
    <script>
        const fetcher = GraphiQL.createFetcher({{ url: '/graphql' }});

        ReactDOM.render(
            React.createElement(GraphiQL, {{ fetcher: fetcher, defaultQuery: {query} }}),
            document.getElementById('graphiql'),
        );
    </script>
</body>
</html>
"#,
        query = serde_json::to_string(PLAYGROUND_QUERY).unwrap_or_default()
    ))
}
