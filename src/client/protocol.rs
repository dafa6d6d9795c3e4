//! Wire types for the OAuth token endpoint and BigQuery `jobs.query`.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::error::{ClientError, ClientResult};
use crate::fields::{self, FieldKind};
use crate::result::{QueryResult, Value};

/// OAuth token response from Google.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Body of `POST /projects/{project}/queries`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub use_legacy_sql: bool,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub job_complete: bool,
    #[serde(default)]
    pub schema: Option<TableSchema>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub total_rows: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Deserialize)]
pub struct TableFieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TableRow {
    pub f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub v: Json,
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// How a result column's cells are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Integer,
    Float,
    Percent,
    Text,
}

impl CellType {
    fn for_column(column: &TableFieldSchema) -> Self {
        match column.field_type.to_uppercase().as_str() {
            "INTEGER" | "INT64" => CellType::Integer,
            "FLOAT" | "FLOAT64" | "NUMERIC" | "BIGNUMERIC" => {
                match fields::by_label(&column.name).map(|f| f.kind) {
                    Some(FieldKind::Percent) => CellType::Percent,
                    _ => CellType::Float,
                }
            }
            _ => CellType::Text,
        }
    }
}

impl QueryResponse {
    /// Decode the rows against the schema.
    pub fn into_result(self) -> ClientResult<QueryResult> {
        let schema = self
            .schema
            .ok_or_else(|| ClientError::MalformedResponse("response has no schema".into()))?;

        let types: Vec<CellType> = schema.fields.iter().map(CellType::for_column).collect();
        let mut result = QueryResult::new(schema.fields.into_iter().map(|f| f.name).collect());

        for (i, row) in self.rows.into_iter().enumerate() {
            if row.f.len() != types.len() {
                return Err(ClientError::MalformedResponse(format!(
                    "row {} has {} cells, schema has {} columns",
                    i,
                    row.f.len(),
                    types.len()
                )));
            }

            let values = row
                .f
                .into_iter()
                .zip(&types)
                .map(|(cell, ty)| decode_cell(cell.v, *ty))
                .collect::<ClientResult<Vec<_>>>()?;
            result.push_row(values);
        }

        Ok(result)
    }
}

fn decode_cell(raw: Json, ty: CellType) -> ClientResult<Value> {
    // BigQuery sends every scalar as a JSON string.
    let text = match raw {
        Json::Null => return Ok(Value::Null),
        Json::String(s) => s,
        other => other.to_string(),
    };

    Ok(match ty {
        CellType::Integer => Value::Integer(text.parse().map_err(|_| malformed("integer", &text))?),
        CellType::Float => Value::Float(text.parse().map_err(|_| malformed("float", &text))?),
        CellType::Percent => Value::Percent(text.parse().map_err(|_| malformed("percent", &text))?),
        CellType::Text => Value::Text(text),
    })
}

fn malformed(kind: &str, text: &str) -> ClientError {
    ClientError::MalformedResponse(format!("bad {} cell: {:?}", kind, text))
}
