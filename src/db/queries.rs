use super::models::*;
use super::{CypherQuery, Database, DatabaseError, Row};
use serde_json::Value;

pub const LIST_RECORDS: &str = "MATCH (r:Record) RETURN r";
pub const CREATE_RECORD: &str = "CREATE (r:Record {iso_code:$iso_code,year:$year,population:$population,total_ghg:$total_ghg}) RETURN r";
pub const LIST_COUNTRIES: &str = "MATCH (c:Country) RETURN c";
pub const PING: &str = "RETURN 1 AS ok";

// Record queries
pub async fn list_records(db: &Database) -> Result<Vec<Properties>, DatabaseError> {
    let rows = db.run(&CypherQuery::new(LIST_RECORDS, "r")).await?;
    rows.into_iter().map(|row| node_properties(row, "r")).collect()
}

pub async fn create_record(db: &Database, record: &Record) -> Result<Properties, DatabaseError> {
    let query = CypherQuery::new(CREATE_RECORD, "r")
        .param("iso_code", record.iso_code.as_str())
        .param("year", record.year)
        .param("population", record.population)
        .param("total_ghg", record.total_ghg);

    let row = db
        .run(&query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DatabaseError::Mapping("create returned no rows".to_string()))?;

    node_properties(row, "r")
}

// Country queries
pub async fn list_countries(db: &Database) -> Result<Vec<Properties>, DatabaseError> {
    let rows = db.run(&CypherQuery::new(LIST_COUNTRIES, "c")).await?;
    rows.into_iter().map(|row| node_properties(row, "c")).collect()
}

// Liveness
pub async fn ping(db: &Database) -> Result<(), DatabaseError> {
    db.run(&CypherQuery::new(PING, "ok")).await?;
    Ok(())
}

fn node_properties(mut row: Row, column: &str) -> Result<Properties, DatabaseError> {
    match row.remove(column) {
        Some(Value::Object(properties)) => Ok(properties),
        Some(other) => Err(DatabaseError::Mapping(format!(
            "column `{}` is not a node: {}",
            column, other
        ))),
        None => Err(DatabaseError::Mapping(format!("column `{}` missing", column))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_properties_extracts_object() {
        let row = json!({"r": {"iso_code": "US", "year": 2001}})
            .as_object()
            .cloned()
            .unwrap();

        let props = node_properties(row, "r").unwrap();
        assert_eq!(props.get("iso_code"), Some(&json!("US")));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_node_properties_rejects_scalars_and_missing_columns() {
        let scalar = json!({"r": 1}).as_object().cloned().unwrap();
        assert!(matches!(
            node_properties(scalar, "r"),
            Err(DatabaseError::Mapping(_))
        ));

        let other = json!({"c": {}}).as_object().cloned().unwrap();
        assert!(matches!(
            node_properties(other, "r"),
            Err(DatabaseError::Mapping(_))
        ));
    }
}
