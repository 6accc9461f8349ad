//! Sample data for the grid model.
//!
//! [`SampleData::grid_ops`] is the fixed demonstration data set and
//! [`SeedLoader::insert_sample_data`] writes it table by table, in
//! [`GridTable::ALL`] order so foreign-key targets always exist first.
//!
//! Identities are literal constants, so seeding twice without dropping the
//! schema fails on the first duplicate primary key.

use chrono::NaiveDate;
use duckdb::{params, ToSql};
use serde::Serialize;
use tracing::{debug, info};

use crate::db::{Database, DbResult};
use crate::schema::{GridTable, GRID_OPS_SCHEMA};
use crate::sql::dml::Insert;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substation {
    pub substation_id: i32,
    pub name: String,
    pub location: String,
    pub capacity_mw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionLine {
    pub line_id: i32,
    pub from_sub_id: i32,
    pub to_sub_id: i32,
    pub length_km: f64,
    pub voltage_kv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceRecord {
    pub record_id: i32,
    pub line_id: i32,
    pub date: NaiveDate,
    pub description: String,
}

/// A generation unit. `kind` is stored in the `type` column as free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generator {
    pub generator_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub max_output_mw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorConnection {
    pub conn_id: i32,
    pub generator_id: i32,
    pub substation_id: i32,
}

/// Rows for every grid table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleData {
    pub substations: Vec<Substation>,
    pub transmission_lines: Vec<TransmissionLine>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub generators: Vec<Generator>,
    pub generator_connections: Vec<GeneratorConnection>,
}

fn substation(substation_id: i32, name: &str, location: &str, capacity_mw: f64) -> Substation {
    Substation {
        substation_id,
        name: name.to_string(),
        location: location.to_string(),
        capacity_mw,
    }
}

fn line(
    line_id: i32,
    from_sub_id: i32,
    to_sub_id: i32,
    length_km: f64,
    voltage_kv: f64,
) -> TransmissionLine {
    TransmissionLine {
        line_id,
        from_sub_id,
        to_sub_id,
        length_km,
        voltage_kv,
    }
}

// Only used in const items, so an invalid date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid sample date"),
    }
}

/// Service dates of the sample maintenance records, by record id.
const MAINTENANCE_DATES: [NaiveDate; 6] = [
    ymd(2025, 1, 15),
    ymd(2025, 3, 5),
    ymd(2025, 5, 10),
    ymd(2025, 2, 20),
    ymd(2025, 6, 1),
    ymd(2025, 4, 15),
];

fn maintenance(
    record_id: i32,
    line_id: i32,
    date: NaiveDate,
    description: &str,
) -> MaintenanceRecord {
    MaintenanceRecord {
        record_id,
        line_id,
        date,
        description: description.to_string(),
    }
}

fn generator(generator_id: i32, name: &str, kind: &str, max_output_mw: f64) -> Generator {
    Generator {
        generator_id,
        name: name.to_string(),
        kind: kind.to_string(),
        max_output_mw,
    }
}

impl SampleData {
    /// The demonstration data set: three Dutch substations in a ring,
    /// six maintenance records, one wind and one solar generator.
    pub fn grid_ops() -> Self {
        Self {
            substations: vec![
                substation(1, "Amsterdam Zuid Substation", "Amsterdam", 500.0),
                substation(2, "Rotterdam Noord Substation", "Rotterdam", 350.0),
                substation(3, "Utrecht Lunetten Substation", "Utrecht", 400.0),
            ],
            transmission_lines: vec![
                line(1, 1, 2, 150.0, 220.0),
                line(2, 2, 3, 200.0, 110.0),
                line(3, 3, 1, 180.0, 220.0),
            ],
            maintenance_records: vec![
                maintenance(1, 1, MAINTENANCE_DATES[0], "Transformer replacement"),
                maintenance(2, 2, MAINTENANCE_DATES[1], "Line inspection"),
                maintenance(3, 1, MAINTENANCE_DATES[2], "Cable fault repair"),
                maintenance(4, 3, MAINTENANCE_DATES[3], "Tower maintenance"),
                maintenance(5, 2, MAINTENANCE_DATES[4], "Insulator cleaning"),
                maintenance(6, 3, MAINTENANCE_DATES[5], "Ground wire replacement"),
            ],
            generators: vec![
                generator(1, "WP-IJM-01", "Wind", 180.0),
                generator(2, "SP-EEM-01", "Solar", 75.0),
            ],
            generator_connections: vec![
                GeneratorConnection {
                    conn_id: 1,
                    generator_id: 1,
                    substation_id: 1,
                },
                GeneratorConnection {
                    conn_id: 2,
                    generator_id: 2,
                    substation_id: 2,
                },
            ],
        }
    }

    /// Number of rows held for a table.
    pub fn len_of(&self, table: GridTable) -> usize {
        match table {
            GridTable::Substations => self.substations.len(),
            GridTable::TransmissionLines => self.transmission_lines.len(),
            GridTable::MaintenanceRecords => self.maintenance_records.len(),
            GridTable::Generators => self.generators.len(),
            GridTable::GeneratorConnections => self.generator_connections.len(),
        }
    }
}

/// Rows inserted per table by one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub substations: usize,
    pub transmission_lines: usize,
    pub maintenance_records: usize,
    pub generators: usize,
    pub generator_connections: usize,
}

impl SeedSummary {
    fn record(&mut self, table: GridTable, rows: usize) {
        let slot = match table {
            GridTable::Substations => &mut self.substations,
            GridTable::TransmissionLines => &mut self.transmission_lines,
            GridTable::MaintenanceRecords => &mut self.maintenance_records,
            GridTable::Generators => &mut self.generators,
            GridTable::GeneratorConnections => &mut self.generator_connections,
        };
        *slot = rows;
    }

    pub fn total(&self) -> usize {
        self.substations
            + self.transmission_lines
            + self.maintenance_records
            + self.generators
            + self.generator_connections
    }
}

/// Writes [`SampleData`] into an initialized `grid_ops` schema.
pub struct SeedLoader<'a> {
    db: &'a Database,
}

impl<'a> SeedLoader<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert the fixed demonstration rows.
    pub fn insert_sample_data(&self) -> DbResult<SeedSummary> {
        self.insert(&SampleData::grid_ops())
    }

    /// Insert a data set, one prepared INSERT per table executed once per row.
    ///
    /// Stops at the first failing row; rows already written stay written.
    pub fn insert(&self, data: &SampleData) -> DbResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        for table in GridTable::ALL {
            let rows = match table {
                GridTable::Substations => self.insert_rows(table, &data.substations, |r| {
                    vec![&r.substation_id as &dyn ToSql, &r.name, &r.location, &r.capacity_mw]
                })?,
                GridTable::TransmissionLines => {
                    self.insert_rows(table, &data.transmission_lines, |r| {
                        vec![
                            &r.line_id as &dyn ToSql,
                            &r.from_sub_id,
                            &r.to_sub_id,
                            &r.length_km,
                            &r.voltage_kv,
                        ]
                    })?
                }
                GridTable::MaintenanceRecords => {
                    self.insert_rows(table, &data.maintenance_records, |r| {
                        vec![&r.record_id as &dyn ToSql, &r.line_id, &r.date, &r.description]
                    })?
                }
                GridTable::Generators => self.insert_rows(table, &data.generators, |r| {
                    vec![&r.generator_id as &dyn ToSql, &r.name, &r.kind, &r.max_output_mw]
                })?,
                GridTable::GeneratorConnections => {
                    self.insert_rows(table, &data.generator_connections, |r| {
                        vec![&r.conn_id as &dyn ToSql, &r.generator_id, &r.substation_id]
                    })?
                }
            };
            summary.record(table, rows);
        }

        info!(
            substations = summary.substations,
            transmission_lines = summary.transmission_lines,
            maintenance_records = summary.maintenance_records,
            generators = summary.generators,
            generator_connections = summary.generator_connections,
            "inserted sample data"
        );
        Ok(summary)
    }

    fn insert_rows<T>(
        &self,
        table: GridTable,
        rows: &[T],
        bind: impl Fn(&T) -> Vec<&dyn ToSql>,
    ) -> DbResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let columns = table.definition();
        let sql = Insert::into(table.name())
            .schema(GRID_OPS_SCHEMA)
            .columns(columns.column_names())
            .to_sql();
        debug!(sql = %sql, rows = rows.len(), "insert");

        let mut stmt = self.db.connection().prepare(&sql)?;
        for row in rows {
            let values = bind(row);
            stmt.execute(values.as_slice())?;
        }
        Ok(rows.len())
    }
}

/// Insert a single transmission line; used to exercise referential checks.
pub fn insert_transmission_line(db: &Database, line: &TransmissionLine) -> DbResult<()> {
    let sql = Insert::into(GridTable::TransmissionLines.name())
        .schema(GRID_OPS_SCHEMA)
        .columns(GridTable::TransmissionLines.definition().column_names())
        .to_sql();
    db.connection().execute(
        &sql,
        params![
            line.line_id,
            line.from_sub_id,
            line.to_sub_id,
            line.length_km,
            line.voltage_kv
        ],
    )?;
    Ok(())
}
