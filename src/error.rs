use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration value: {0}")]
    Config(String),

    #[error("Refusing to export to {}: it is the input dataset", .0.display())]
    ExportOverwritesInput(std::path::PathBuf),

    #[error("No data loaded. Please load the CSV file first.")]
    NoData,
}
