//! SQLite data source implementation

use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parking_lot::Mutex;
use recnav_core::PageWindow;
use rusqlite::{Connection, OpenFlags, ToSql};

use super::RecordSource;
use crate::records::{names_schema, records_to_batch, Gender, NameFilter, NameRecord};
use crate::DataError;

/// Read-only SQLite names store, paged with `LIMIT/OFFSET`
pub struct SqliteSource {
    name: String,
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
    schema: SchemaRef,
}

/// Filtered select and its bound parameters
struct FilteredQuery {
    sql: String,
    params: Vec<Box<dyn ToSql>>,
}

impl FilteredQuery {
    fn new(filter: &NameFilter) -> Self {
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(like_pattern(&filter.search))];

        let mut genders: Vec<Gender> = filter.genders.clone();
        genders.sort();
        genders.dedup();

        let gender_clause = if genders.is_empty() {
            "0".to_string()
        } else {
            let placeholders: Vec<String> = genders
                .iter()
                .map(|gender| {
                    params.push(Box::new(gender.code()));
                    format!("?{}", params.len())
                })
                .collect();
            format!("gender IN ({})", placeholders.join(", "))
        };

        let sql = format!(
            "SELECT name, gender, births FROM names WHERE name LIKE ?1 ESCAPE '\\' AND {} \
             ORDER BY births DESC, name ASC",
            gender_clause
        );

        Self { sql, params }
    }

    fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| &**p as &dyn ToSql).collect()
    }
}

/// `%search%` with LIKE wildcards in the search text taken literally
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl SqliteSource {
    /// Open an existing names database read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.db")
            .to_string();

        let mut source = Self::from_connection(conn, name)?;
        source.path = Some(path);
        Ok(source)
    }

    /// Wrap an already open connection holding a `names` table
    pub fn from_connection(conn: Connection, name: impl Into<String>) -> Result<Self, DataError> {
        Self::check_schema(&conn)?;

        Ok(Self {
            name: name.into(),
            path: None,
            conn: Mutex::new(conn),
            schema: names_schema(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Make sure the `names` table has the expected columns
    fn check_schema(conn: &Connection) -> Result<(), DataError> {
        let mut stmt = conn.prepare("PRAGMA table_info(names)")?;
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        for expected in ["name", "gender", "births"] {
            if !columns.iter().any(|c| c == expected) {
                return Err(DataError::Schema(format!(
                    "Table 'names' is missing column '{}'",
                    expected
                )));
            }
        }

        Ok(())
    }
}

impl RecordSource for SqliteSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn count(&self, filter: &NameFilter) -> Result<usize, DataError> {
        let query = FilteredQuery::new(filter);
        let sql = format!("SELECT COUNT(*) FROM ({})", query.sql);

        let conn = self.conn.lock();
        let count: i64 = conn.query_row(&sql, query.param_refs().as_slice(), |row| row.get(0))?;

        tracing::debug!(source = %self.name, count, "Counted filtered records");
        Ok(count.max(0) as usize)
    }

    fn fetch(&self, filter: &NameFilter, window: PageWindow) -> Result<RecordBatch, DataError> {
        let mut query = FilteredQuery::new(filter);
        let sql = format!(
            "{} LIMIT ?{} OFFSET ?{}",
            query.sql,
            query.params.len() + 1,
            query.params.len() + 2
        );
        query.params.push(Box::new(i64::try_from(window.limit).unwrap_or(i64::MAX)));
        query.params.push(Box::new(i64::try_from(window.offset).unwrap_or(i64::MAX)));

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(query.param_refs().as_slice(), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (name, code, births) = row?;
            let gender = Gender::from_code(&code)
                .ok_or_else(|| DataError::Schema(format!("Unknown gender code '{}'", code)))?;
            records.push(NameRecord { name, gender, births });
        }

        tracing::debug!(source = %self.name, %window, rows = records.len(), "Fetched page");
        records_to_batch(&records)
    }
}
