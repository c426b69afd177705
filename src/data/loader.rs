use super::normalize::UnitNormalizer;
use super::schema::ColumnSchema;
use super::{BudgetRecord, DataError, GenreGroups, ProfitRecord, Result};
use crate::config::GenreSettings;
use crate::types::{Field, MISSING_VALUE};
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Line-by-line ingestion of the movie table into one analysis view.
pub trait DatasetParser {
    type Output;

    fn parse_reader<R: Read>(&self, input: R) -> Result<Self::Output>;

    fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<Self::Output> {
        let file = File::open(path.as_ref())?;
        debug!("Reading movie table from {}", path.as_ref().display());
        self.parse_reader(file)
    }
}

/// The header row is not special-cased: it goes through the same filter as
/// every other row and drops out because its fields equal their labels.
/// Fields are not trimmed, so sentinel, header and genre matches are exact.
fn records<R: Read>(input: R) -> impl Iterator<Item = Result<(u64, StringRecord)>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(input)
        .into_records()
        .map(|result| -> Result<(u64, StringRecord)> {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            Ok((line, record))
        })
}

fn is_excluded(schema: &ColumnSchema, fields: &[(Field, &str)]) -> bool {
    fields
        .iter()
        .any(|&(field, value)| value == MISSING_VALUE || value == schema.header(field))
}

/// Surrounding whitespace is tolerated around numbers only.
fn parse_number<T: std::str::FromStr>(value: &str, field: Field, line: u64) -> Result<T> {
    value.trim().parse().map_err(|_| DataError::MalformedValue {
        line,
        field,
        value: value.to_string(),
    })
}

/// Emits `(release year, production budget)` pairs, budget in the
/// normalizer's unit.
pub struct BudgetParser {
    schema: ColumnSchema,
    normalizer: UnitNormalizer,
}

impl BudgetParser {
    pub fn new(schema: ColumnSchema, normalizer: UnitNormalizer) -> Self {
        Self { schema, normalizer }
    }
}

impl DatasetParser for BudgetParser {
    type Output = Vec<BudgetRecord>;

    fn parse_reader<R: Read>(&self, input: R) -> Result<Self::Output> {
        let mut budgets = Vec::new();
        for result in records(input) {
            let (line, row) = result?;
            let [year, cost] = self
                .schema
                .extract(&row, [Field::ReleaseYear, Field::ProductionCost], line)?;
            let cost = self.normalizer.normalize(
                cost,
                self.schema.header(Field::ProductionCost),
                Field::ProductionCost,
                line,
            )?;

            if is_excluded(
                &self.schema,
                &[(Field::ReleaseYear, year), (Field::ProductionCost, &*cost)],
            ) {
                continue;
            }

            budgets.push(BudgetRecord {
                release_year: parse_number(year, Field::ReleaseYear, line)?,
                production_budget: parse_number(&cost, Field::ProductionCost, line)?,
            });
        }
        debug!("Parsed {} budget records", budgets.len());
        Ok(budgets)
    }
}

/// Emits `(runtime, profit)` pairs with profit left in base currency units.
pub struct ProfitParser {
    schema: ColumnSchema,
}

impl ProfitParser {
    pub fn new(schema: ColumnSchema) -> Self {
        Self { schema }
    }
}

impl DatasetParser for ProfitParser {
    type Output = Vec<ProfitRecord>;

    fn parse_reader<R: Read>(&self, input: R) -> Result<Self::Output> {
        let mut profits = Vec::new();
        for result in records(input) {
            let (line, row) = result?;
            let [runtime, gross, cost] = self.schema.extract(
                &row,
                [Field::Runtime, Field::WorldwideGross, Field::ProductionCost],
                line,
            )?;

            if is_excluded(
                &self.schema,
                &[
                    (Field::Runtime, runtime),
                    (Field::WorldwideGross, gross),
                    (Field::ProductionCost, cost),
                ],
            ) {
                continue;
            }

            let gross: f64 = parse_number(gross, Field::WorldwideGross, line)?;
            let cost: f64 = parse_number(cost, Field::ProductionCost, line)?;
            profits.push(ProfitRecord {
                runtime_minutes: parse_number(runtime, Field::Runtime, line)?,
                profit: gross - cost,
            });
        }
        debug!("Parsed {} profit records", profits.len());
        Ok(profits)
    }
}

/// Groups normalized worldwide gross by genre, folding non-focus genres into
/// the catch-all group.
pub struct GenreParser {
    schema: ColumnSchema,
    normalizer: UnitNormalizer,
    genres: GenreSettings,
}

impl GenreParser {
    pub fn new(schema: ColumnSchema, normalizer: UnitNormalizer, genres: GenreSettings) -> Self {
        Self {
            schema,
            normalizer,
            genres,
        }
    }

    fn group_for<'g>(&'g self, genre: &'g str) -> &'g str {
        if self.genres.focus.iter().any(|g| g == genre) {
            genre
        } else {
            &self.genres.other
        }
    }
}

impl DatasetParser for GenreParser {
    type Output = GenreGroups;

    fn parse_reader<R: Read>(&self, input: R) -> Result<Self::Output> {
        let mut groups = GenreGroups::new(&self.genres.focus, &self.genres.other);
        for result in records(input) {
            let (line, row) = result?;
            let [genre, gross] = self
                .schema
                .extract(&row, [Field::Genre, Field::WorldwideGross], line)?;
            let gross = self.normalizer.normalize(
                gross,
                self.schema.header(Field::WorldwideGross),
                Field::WorldwideGross,
                line,
            )?;

            if is_excluded(
                &self.schema,
                &[(Field::Genre, genre), (Field::WorldwideGross, &*gross)],
            ) {
                continue;
            }

            let gross: f64 = parse_number(&gross, Field::WorldwideGross, line)?;
            groups.push(self.group_for(genre), gross);
        }
        debug!(
            "Parsed genre groups: {}",
            groups
                .iter()
                .map(|(name, values)| format!("{name}={}", values.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "rank,release_date,title,url,production_cost,domestic_gross,worldwide_gross,opening_weekend,mpaa,genre,theaters,runtime,year";

    fn table(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    fn genre_settings() -> GenreSettings {
        GenreSettings::default()
    }

    #[test]
    fn test_budget_parser_scales_budget() {
        let input = table(&["1,2000-06-30,Film,url,100000000,5,6,7,PG,Action,3000,95,2000"]);
        let parser = BudgetParser::new(ColumnSchema::default(), UnitNormalizer::default());

        let budgets = parser.parse_reader(input.as_bytes()).unwrap();

        assert_eq!(
            budgets,
            vec![BudgetRecord {
                release_year: 2000,
                production_budget: 1.0,
            }]
        );
    }

    #[test]
    fn test_budget_parser_skips_missing_values() {
        let input = table(&[
            "1,2000-06-30,A,url,NA,5,6,7,PG,Action,3000,95,2000",
            "2,2001-06-30,B,url,50000000,5,6,7,PG,Action,3000,95,NA",
            "3,2002-06-30,C,url,250000000,5,6,7,PG,Drama,3000,95,2002",
        ]);
        let parser = BudgetParser::new(ColumnSchema::default(), UnitNormalizer::default());

        let budgets = parser.parse_reader(input.as_bytes()).unwrap();

        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].release_year, 2002);
        assert_relative_eq!(budgets[0].production_budget, 2.5);
    }

    #[test]
    fn test_budget_parser_rejects_malformed_budget() {
        let input = table(&["1,2000-06-30,A,url,lots,5,6,7,PG,Action,3000,95,2000"]);
        let parser = BudgetParser::new(ColumnSchema::default(), UnitNormalizer::default());

        let err = parser.parse_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::MalformedValue {
                line: 2,
                field: Field::ProductionCost,
                ..
            }
        ));
    }

    #[test]
    fn test_profit_parser_keeps_base_units() {
        let input = table(&[
            "1,2000-06-30,A,url,1000000,5,5000000,7,PG,Action,3000,95,2000",
            "2,2001-06-30,B,url,1000000,5,NA,7,PG,Action,3000,95,2001",
            "3,2002-06-30,C,url,1000000,5,2000000,7,PG,Action,3000,NA,2002",
        ]);
        let parser = ProfitParser::new(ColumnSchema::default());

        let profits = parser.parse_reader(input.as_bytes()).unwrap();

        assert_eq!(
            profits,
            vec![ProfitRecord {
                runtime_minutes: 95.0,
                profit: 4_000_000.0,
            }]
        );
    }

    #[test]
    fn test_genre_parser_folds_other_genres() {
        let input = table(&[
            "1,2000-06-30,A,url,1,5,200000000,7,PG,Action,3000,95,2000",
            "2,2001-06-30,B,url,1,5,50000000,7,PG,Documentary,3000,95,2001",
            "3,2002-06-30,C,url,1,5,NA,7,PG,Drama,3000,95,2002",
            "4,2003-06-30,D,url,1,5,100000000,7,PG,NA,3000,95,2003",
        ]);
        let parser = GenreParser::new(
            ColumnSchema::default(),
            UnitNormalizer::default(),
            genre_settings(),
        );

        let groups = parser.parse_reader(input.as_bytes()).unwrap();

        assert_eq!(groups.get("Action"), Some(&[2.0][..]));
        assert_eq!(groups.get("Other"), Some(&[0.5][..]));
        assert_eq!(groups.get("Drama"), Some(&[][..]));
        assert_eq!(groups.get("Documentary"), None);
        assert_eq!(
            groups.group_names(),
            &["Action", "Adventure", "Drama", "Other"]
        );
    }

    #[test]
    fn test_genre_match_is_exact() {
        let input = table(&[
            "1,2000-06-30,A,url,1,5,200000000,7,PG, Action ,3000,95,2000",
            "2,2001-06-30,B,url,1,5,100000000,7,PG,action,3000,95,2001",
            "3,2002-06-30,C,url,1,5,300000000,7,PG, NA,3000,95,2002",
            "4,2003-06-30,D,url,1,5,400000000,7,PG,Action,3000,95,2003",
        ]);
        let parser = GenreParser::new(
            ColumnSchema::default(),
            UnitNormalizer::default(),
            genre_settings(),
        );

        let groups = parser.parse_reader(input.as_bytes()).unwrap();

        assert_eq!(groups.get("Action"), Some(&[4.0][..]));
        assert_eq!(groups.get("Other"), Some(&[2.0, 1.0, 3.0][..]));
    }

    #[test]
    fn test_profit_parser_rejects_malformed_runtime() {
        let input = table(&["1,2000-06-30,A,url,1000000,5,5000000,7,PG,Action,3000,long,2000"]);
        let parser = ProfitParser::new(ColumnSchema::default());

        let err = parser.parse_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::MalformedValue {
                line: 2,
                field: Field::Runtime,
                ref value,
            } if value == "long"
        ));
    }

    #[test]
    fn test_genre_parser_rejects_fractional_gross() {
        let input = table(&[
            "1,2000-06-30,A,url,1,5,200000000,7,PG,Action,3000,95,2000",
            "2,2001-06-30,B,url,1,5,1.5e8,7,PG,Drama,3000,95,2001",
        ]);
        let parser = GenreParser::new(
            ColumnSchema::default(),
            UnitNormalizer::default(),
            genre_settings(),
        );

        let err = parser.parse_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::MalformedValue {
                line: 3,
                field: Field::WorldwideGross,
                ..
            }
        ));
    }

    #[test]
    fn test_header_only_input_yields_nothing() {
        let input = table(&[]);
        let parser = ProfitParser::new(ColumnSchema::default());

        assert!(parser.parse_reader(input.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_short_row_aborts_parse() {
        let input = table(&["1,2000,95"]);
        let parser = ProfitParser::new(ColumnSchema::default());

        let err = parser.parse_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(err, DataError::OutOfRange { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let parser = ProfitParser::new(ColumnSchema::default());

        let err = parser
            .parse_path("definitely/not/a/movies.csv")
            .unwrap_err();

        assert!(matches!(err, DataError::Io(_)));
    }
}
