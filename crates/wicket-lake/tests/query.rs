//! Queries against a small on-disk `DuckDB` fixture.

use duckdb::Connection;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wicket_lake::{CricketLake, LakeError};

fn fixture() -> (TempDir, CricketLake) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cricket.duckdb");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        r"
        CREATE TABLE balls (
            match_id VARCHAR, innings INTEGER, over INTEGER, ball INTEGER,
            batter VARCHAR, bowler VARCHAR, runs_off_bat INTEGER, wicket_type VARCHAR
        );
        INSERT INTO balls VALUES
            ('m1', 1, 0, 1, 'V Kohli', 'JJ Bumrah', 4, NULL),
            ('m1', 1, 0, 2, 'V Kohli', 'JJ Bumrah', 0, NULL),
            ('m1', 1, 0, 3, 'V Kohli', 'JJ Bumrah', 6, NULL),
            ('m1', 1, 0, 4, 'RG Sharma', 'JJ Bumrah', 0, 'bowled');
        CREATE TABLE matches (match_id VARCHAR, date DATE, venue VARCHAR);
        INSERT INTO matches VALUES ('m1', DATE '2024-04-07', 'Wankhede Stadium');
        ",
    )
    .unwrap();
    drop(conn);
    (dir, CricketLake::new(path))
}

#[tokio::test]
async fn rows_keep_column_order_and_types() {
    let (_dir, lake) = fixture();
    let rows = lake
        .query(
            "SELECT batter, SUM(runs_off_bat) AS runs, COUNT(*) AS balls, \
             ROUND(SUM(runs_off_bat) * 100.0 / COUNT(*), 2) AS strike_rate \
             FROM balls GROUP BY batter ORDER BY runs DESC",
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["batter", "runs", "balls", "strike_rate"]);
    assert_eq!(rows[0]["batter"], json!("V Kohli"));
    assert_eq!(rows[0]["runs"], json!(10));
    assert_eq!(rows[0]["balls"], json!(3));
    assert_eq!(rows[0]["strike_rate"].as_f64(), Some(333.33));
}

#[tokio::test]
async fn dates_and_nulls_convert() {
    let (_dir, lake) = fixture();
    let rows = lake
        .query("SELECT m.date, b.wicket_type FROM matches m JOIN balls b USING (match_id) ORDER BY b.ball LIMIT 1")
        .await
        .unwrap();
    assert_eq!(rows[0]["date"], json!("2024-04-07"));
    assert_eq!(rows[0]["wicket_type"], json!(null));
}

#[tokio::test]
async fn empty_result_is_empty_vec() {
    let (_dir, lake) = fixture();
    let rows = lake
        .query("SELECT * FROM balls WHERE batter = 'MS Dhoni'")
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn bad_sql_is_a_duckdb_error() {
    let (_dir, lake) = fixture();
    let err = lake.query("SELEC batter FROM balls").await.unwrap_err();
    assert!(matches!(err, LakeError::DuckDb(_)));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn connection_is_read_only() {
    let (_dir, lake) = fixture();
    let err = lake
        .query("INSERT INTO balls VALUES ('m2', 1, 0, 1, 'X', 'Y', 1, NULL)")
        .await
        .unwrap_err();
    assert!(matches!(err, LakeError::DuckDb(_)));

    let rows = lake.query("SELECT COUNT(*) AS n FROM balls").await.unwrap();
    assert_eq!(rows[0]["n"], json!(4));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let lake = CricketLake::new(dir.path().join("absent.duckdb"));
    assert!(!lake.exists());
    let err = lake.query("SELECT 1").await.unwrap_err();
    assert!(matches!(err, LakeError::NotFound(_)));
}
