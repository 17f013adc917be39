use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// Name of a canned query in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryId {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
}

impl QueryId {
    pub const ALL: [QueryId; 10] = [
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
        Self::Q10,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Self::Q1 => "Stops on a line in sequence order",
            Self::Q2 => "Trips departing within a time window",
            Self::Q3 => "Transfer stops served by multiple lines",
            Self::Q4 => "Complete route travelled by a trip",
            Self::Q5 => "Lines serving every stop in a target set",
            Self::Q6 => "Average boardings by line",
            Self::Q7 => "Busiest stops by total activity",
            Self::Q8 => "Delayed stop events counted by line",
            Self::Q9 => "Trips with repeated delays",
            Self::Q10 => "Stops with above-average boardings",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::Q5 => "Q5",
            Self::Q6 => "Q6",
            Self::Q7 => "Q7",
            Self::Q8 => "Q8",
            Self::Q9 => "Q9",
            Self::Q10 => "Q10",
        }
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            "Q5" => Ok(Self::Q5),
            "Q6" => Ok(Self::Q6),
            "Q7" => Ok(Self::Q7),
            "Q8" => Ok(Self::Q8),
            "Q9" => Ok(Self::Q9),
            "Q10" => Ok(Self::Q10),
            other => Err(Error::UnknownQuery(other.to_string())),
        }
    }
}

/// Structured result of one query run.
///
/// Rows are JSON objects whose keys match `columns`; the column list keeps
/// the intended display order, which a JSON object does not.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: QueryId,
    pub description: &'static str,
    pub columns: Vec<&'static str>,
    pub results: Vec<Value>,
    pub count: usize,
}

impl QueryReport {
    pub(super) fn new(query: QueryId, columns: Vec<&'static str>, results: Vec<Value>) -> Self {
        let count = results.len();
        Self {
            query,
            description: query.description(),
            columns,
            results,
            count,
        }
    }
}
