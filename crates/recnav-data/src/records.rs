//! Name records, the filter that selects them, and their Arrow layout

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, Int64Builder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Serialize, Deserialize};

use crate::DataError;

/// Recorded sex of a name's bearers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" | "f" => Some(Gender::Female),
            "M" | "m" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of the names table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameRecord {
    pub name: String,
    pub gender: Gender,
    pub births: i64,
}

impl NameRecord {
    pub fn new(name: impl Into<String>, gender: Gender, births: i64) -> Self {
        Self {
            name: name.into(),
            gender,
            births,
        }
    }
}

/// Parameters that define the browsed record set
///
/// Used as the navigator's query fingerprint, so any change here sends the
/// browser back to the first page. The search text is matched as a
/// case-insensitive substring of the name and is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameFilter {
    pub search: String,
    pub genders: Vec<Gender>,
}

impl NameFilter {
    /// Every record
    pub fn all() -> Self {
        Self {
            search: String::new(),
            genders: Gender::ALL.to_vec(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.genders = genders.into_iter().collect();
        self
    }

    pub fn matches(&self, record: &NameRecord) -> bool {
        self.matches_parts(&record.name, record.gender)
    }

    pub(crate) fn matches_parts(&self, name: &str, gender: Gender) -> bool {
        self.genders.contains(&gender)
            && name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Arrow schema of a page of name records
pub fn names_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("gender", DataType::Utf8, false),
        Field::new("births", DataType::Int64, false),
    ]))
}

/// Sort by births, most frequent first, then by name
pub fn sort_records(records: &mut [NameRecord]) {
    records.sort_by(|a, b| b.births.cmp(&a.births).then_with(|| a.name.cmp(&b.name)));
}

/// Build a record batch in the [`names_schema`] layout
pub fn records_to_batch(records: &[NameRecord]) -> Result<RecordBatch, DataError> {
    let mut names = StringBuilder::new();
    let mut genders = StringBuilder::new();
    let mut births = Int64Builder::new();

    for record in records {
        names.append_value(&record.name);
        genders.append_value(record.gender.code());
        births.append_value(record.births);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(names.finish()) as ArrayRef,
        Arc::new(genders.finish()) as ArrayRef,
        Arc::new(births.finish()) as ArrayRef,
    ];

    Ok(RecordBatch::try_new(names_schema(), columns)?)
}

/// Typed columns of a batch in the [`names_schema`] layout
pub(crate) struct NameColumns<'a> {
    pub names: &'a StringArray,
    pub genders: &'a StringArray,
    pub births: &'a Int64Array,
}

impl<'a> NameColumns<'a> {
    pub fn from_batch(batch: &'a RecordBatch) -> Result<Self, DataError> {
        fn column<'b, T: 'static>(batch: &'b RecordBatch, name: &str) -> Result<&'b T, DataError> {
            batch
                .column_by_name(name)
                .and_then(|col| col.as_any().downcast_ref::<T>())
                .ok_or_else(|| DataError::Schema(format!("Column '{}' missing or mistyped", name)))
        }

        Ok(Self {
            names: column::<StringArray>(batch, "name")?,
            genders: column::<StringArray>(batch, "gender")?,
            births: column::<Int64Array>(batch, "births")?,
        })
    }

    pub fn gender(&self, row: usize) -> Result<Gender, DataError> {
        let code = self.genders.value(row);
        Gender::from_code(code)
            .ok_or_else(|| DataError::Schema(format!("Unknown gender code '{}'", code)))
    }
}

/// Read the records back out of a batch in the [`names_schema`] layout
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<NameRecord>, DataError> {
    let columns = NameColumns::from_batch(batch)?;

    (0..batch.num_rows())
        .map(|row| {
            Ok(NameRecord {
                name: columns.names.value(row).to_string(),
                gender: columns.gender(row)?,
                births: columns.births.value(row),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let filter = NameFilter::all().with_search("ann");
        assert!(filter.matches(&NameRecord::new("Joanna", Gender::Female, 10)));
        assert!(filter.matches(&NameRecord::new("ANNIE", Gender::Female, 10)));
        assert!(!filter.matches(&NameRecord::new("Jane", Gender::Female, 10)));
    }

    #[test]
    fn test_filter_restricts_gender() {
        let filter = NameFilter::all().with_genders([Gender::Male]);
        assert!(filter.matches(&NameRecord::new("Liam", Gender::Male, 1)));
        assert!(!filter.matches(&NameRecord::new("Emma", Gender::Female, 1)));

        let none = NameFilter::all().with_genders(Vec::new());
        assert!(!none.matches(&NameRecord::new("Liam", Gender::Male, 1)));
    }

    #[test]
    fn test_filter_equality_is_by_value() {
        assert_eq!(NameFilter::all(), NameFilter::default());
        assert_ne!(NameFilter::all(), NameFilter::all().with_search("a"));
    }

    #[test]
    fn test_sort_births_desc_then_name() {
        let mut records = vec![
            NameRecord::new("Zoe", Gender::Female, 5),
            NameRecord::new("Amy", Gender::Female, 5),
            NameRecord::new("Noah", Gender::Male, 9),
        ];
        sort_records(&mut records);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Noah", "Amy", "Zoe"]);
    }

    #[test]
    fn test_batch_round_trip() {
        let records = vec![
            NameRecord::new("Emma", Gender::Female, 18688),
            NameRecord::new("Liam", Gender::Male, 19837),
        ];
        let batch = records_to_batch(&records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch_to_records(&batch).unwrap(), records);
    }
}
