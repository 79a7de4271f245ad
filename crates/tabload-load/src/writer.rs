//! Chunked bulk loading into Postgres.

use polars::prelude::DataFrame;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::rows::{TypedColumn, materialize_columns};
use crate::schema::{TableSchema, quote_ident};

/// Postgres caps a single statement at 65535 bind parameters.
pub const PG_BIND_LIMIT: usize = 65535;

/// Default rows per INSERT before the bind-parameter cap is applied.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// How to treat an existing destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Error if the table already exists.
    #[default]
    Fail,
    /// Drop and recreate the table.
    Replace,
    /// Create the table if absent, then insert into it.
    Append,
}

/// Load configuration.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub mode: LoadMode,
    /// Upper bound on rows per INSERT statement.
    pub batch_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: LoadMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Rows per INSERT statement for the given batch size and column count.
///
/// Never exceeds the bind-parameter limit, never drops below one row.
pub fn rows_per_statement(batch_size: usize, column_count: usize) -> usize {
    let bind_cap = PG_BIND_LIMIT / column_count.max(1);
    batch_size.clamp(1, bind_cap.max(1))
}

/// Connects a connection pool to the destination database.
pub async fn connect(url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
    Ok(pool)
}

/// Checks whether the destination table exists in the current schema.
async fn table_exists(pool: &PgPool, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = $1)",
    )
    .bind(table)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// What [`prepare_table`] must do, given the load mode and whether the
/// destination table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableAction {
    /// Create the table; it does not exist yet.
    Create,
    /// Drop the existing table, then create it.
    Recreate,
    /// Insert into the existing table as-is.
    Reuse,
    /// Refuse to touch the existing table.
    Refuse,
}

fn table_action(mode: LoadMode, exists: bool) -> TableAction {
    match (mode, exists) {
        (LoadMode::Fail, true) => TableAction::Refuse,
        (LoadMode::Replace, true) => TableAction::Recreate,
        (LoadMode::Append, true) => TableAction::Reuse,
        (_, false) => TableAction::Create,
    }
}

/// Prepares the destination table according to the load mode.
async fn prepare_table(
    pool: &PgPool,
    table: &str,
    schema: &TableSchema,
    mode: LoadMode,
) -> Result<()> {
    let exists = table_exists(pool, table).await?;

    match table_action(mode, exists) {
        TableAction::Refuse => {
            return Err(LoadError::TableExists {
                table: table.to_string(),
            });
        }
        TableAction::Reuse => {
            debug!(table, "appending to existing table");
            return Ok(());
        }
        TableAction::Recreate => {
            info!(table, "dropping existing table");
            sqlx::query(&format!("DROP TABLE {}", quote_ident(table)))
                .execute(pool)
                .await?;
        }
        TableAction::Create => {}
    }

    let ddl = schema.create_table_sql(table);
    debug!(table, ddl = ddl.as_str(), "creating table");
    sqlx::query(&ddl).execute(pool).await?;

    Ok(())
}

/// Loads the DataFrame into the destination table in chunked multi-row
/// INSERT statements. Returns the number of rows inserted.
pub async fn load(
    pool: &PgPool,
    df: &DataFrame,
    table: &str,
    schema: &TableSchema,
    options: &LoadOptions,
) -> Result<u64> {
    prepare_table(pool, table, schema, options.mode).await?;

    let height = df.height();
    if height == 0 {
        info!(table, "no rows to load");
        return Ok(0);
    }

    let columns = materialize_columns(df)?;
    let chunk_rows = rows_per_statement(options.batch_size, columns.len());
    let prefix = format!(
        "INSERT INTO {} ({}) ",
        quote_ident(table),
        schema.column_list_sql()
    );

    info!(
        table,
        rows = height,
        columns = columns.len(),
        rows_per_statement = chunk_rows,
        "loading rows"
    );

    let mut inserted = 0u64;
    let mut chunk_start = 0usize;
    while chunk_start < height {
        let chunk_end = (chunk_start + chunk_rows).min(height);

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(&prefix);
        builder.push_values(chunk_start..chunk_end, |mut row_builder, row| {
            for (_, column) in &columns {
                match column {
                    TypedColumn::Int(values) => {
                        row_builder.push_bind(values[row]);
                    }
                    TypedColumn::Float(values) => {
                        row_builder.push_bind(values[row]);
                    }
                    TypedColumn::Bool(values) => {
                        row_builder.push_bind(values[row]);
                    }
                    TypedColumn::Timestamp(values) => {
                        row_builder.push_bind(values[row]);
                    }
                    TypedColumn::Date(values) => {
                        row_builder.push_bind(values[row]);
                    }
                    TypedColumn::Text(values) => {
                        row_builder.push_bind(values[row].clone());
                    }
                }
            }
        });

        let result = builder.build().execute(pool).await?;
        inserted += result.rows_affected();

        debug!(
            table,
            loaded = chunk_end,
            of = height,
            "inserted chunk"
        );

        chunk_start = chunk_end;
    }

    info!(table, rows = inserted, "load complete");
    Ok(inserted)
}
