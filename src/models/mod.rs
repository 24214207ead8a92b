pub mod cell;
pub mod field;
pub mod loaders;
pub mod record;
pub mod subject;

pub use cell::{CellValue, Row};
pub use field::{DataType, FieldMapping, SchemaAnalysis};
pub use loaders::{load_import_file, ImportFile};
pub use record::{CanonicalGradeRecord, ExamContext, UNKNOWN_CLASS, UNKNOWN_STUDENT};
pub use subject::Subject;
