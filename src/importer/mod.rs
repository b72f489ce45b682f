// ==========================================
// 阀门数字孪生大屏 - 导入层
// ==========================================
// 职责: 表格文件解析 + 行规范化 + 导入管线
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod pipeline;
pub mod row_normalizer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawRow, UniversalFileParser};
pub use pipeline::{ImportConfig, ImportPipeline};
pub use row_normalizer::RowNormalizer;
