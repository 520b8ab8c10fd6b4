use super::a1_notation::A1Notation;

/// Where a submission lands: a spreadsheet and a sheet-qualified range whose
/// trailing rows receive the appended values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendTarget {
    spreadsheet_id: String,
    range: A1Notation,
}

impl AppendTarget {
    pub fn new(spreadsheet_id: impl Into<String>, range: A1Notation) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range,
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn range(&self) -> &A1Notation {
        &self.range
    }
}
