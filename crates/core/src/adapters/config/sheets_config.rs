use crate::domain::sheets::a1_notation::A1Notation;

#[derive(serde::Deserialize, Clone)]
pub struct SpreadsheetConfig {
    /// Serialized service account JSON, as downloaded from the Cloud console.
    pub service_account_key: Option<Box<str>>,
    pub spreadsheet_id: Option<Box<str>>,
    pub range: A1Notation,
    /// Overrides the Sheets API root (`https://sheets.googleapis.com/`), e.g.
    /// for an emulator.
    pub api_base_url: Option<Box<str>>,
}

impl std::fmt::Debug for SpreadsheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetConfig")
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "<redacted>"),
            )
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
