use crate::errors::CoreError;
use crate::models::document::FinancialData;

/// High-level storage operations: save/load the whole data document as
/// JSON. No partial updates — last write wins.
pub struct StorageManager;

impl StorageManager {
    /// Parse a document from a JSON string, then run migration so older
    /// documents (missing collections or category lists) load cleanly.
    pub fn load_from_str(json: &str) -> Result<FinancialData, CoreError> {
        let mut data: FinancialData = serde_json::from_str(json)?;
        data.migrate();
        Ok(data)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn save_to_string(data: &FinancialData) -> Result<String, CoreError> {
        serde_json::to_string_pretty(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize document: {e}")))
    }

    /// Load the document from a JSON file on disk.
    pub fn load_from_file(path: &str) -> Result<FinancialData, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::load_from_str(&json)
    }

    /// Save the document to a JSON file on disk.
    pub fn save_to_file(data: &FinancialData, path: &str) -> Result<(), CoreError> {
        let json = Self::save_to_string(data)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
